//! Repository for the `notes` table.
//!
//! Notes carry no owner column; ownership is always resolved through the
//! parent book.

use notes_core::types::{EntityId, UserId};
use sqlx::PgPool;

use crate::models::note::{CreateNote, Note};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, book_id, title, text, created_at";

/// Provides book-scoped CRUD operations for notes.
pub struct NoteRepo;

impl NoteRepo {
    /// Insert a note into a book owned by `owner_id`.
    ///
    /// The ownership check and the insert are one statement. Returns `None`
    /// when the book does not exist or belongs to someone else.
    pub async fn create_in_owned_book(
        pool: &PgPool,
        owner_id: UserId,
        input: &CreateNote,
    ) -> Result<Option<Note>, sqlx::Error> {
        let query = format!(
            "INSERT INTO notes (book_id, title, text)
             SELECT b.id, $2, $3 FROM books b WHERE b.id = $1 AND b.owner_id = $4
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Note>(&query)
            .bind(input.book_id)
            .bind(&input.title)
            .bind(&input.text)
            .bind(owner_id)
            .fetch_optional(pool)
            .await
    }

    /// List the notes of a book, oldest first.
    ///
    /// Callers must check book ownership first; this only filters by book.
    pub async fn list_by_book(pool: &PgPool, book_id: EntityId) -> Result<Vec<Note>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM notes WHERE book_id = $1 ORDER BY created_at, id");
        sqlx::query_as::<_, Note>(&query)
            .bind(book_id)
            .fetch_all(pool)
            .await
    }

    /// Delete a note from a book owned by `owner_id`.
    ///
    /// Returns `false` when the note is absent from that book or the book is
    /// not owned by `owner_id`.
    pub async fn delete_owned(
        pool: &PgPool,
        owner_id: UserId,
        book_id: EntityId,
        id: EntityId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM notes n
             USING books b
             WHERE n.id = $1 AND n.book_id = $2 AND b.id = n.book_id AND b.owner_id = $3",
        )
        .bind(id)
        .bind(book_id)
        .bind(owner_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
