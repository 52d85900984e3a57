//! Repository for the `books` table.

use notes_core::types::{EntityId, UserId};
use sqlx::PgPool;

use crate::models::book::{Book, BookSummary, CreateBook};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, owner_id, title, created_at";

/// Provides owner-scoped CRUD operations for books.
pub struct BookRepo;

impl BookRepo {
    /// Insert a new book, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateBook) -> Result<Book, sqlx::Error> {
        let query = format!(
            "INSERT INTO books (owner_id, title)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Book>(&query)
            .bind(input.owner_id)
            .bind(&input.title)
            .fetch_one(pool)
            .await
    }

    /// Find a book by id, but only if `owner_id` owns it.
    pub async fn find_owned(
        pool: &PgPool,
        owner_id: UserId,
        id: EntityId,
    ) -> Result<Option<Book>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM books WHERE id = $1 AND owner_id = $2");
        sqlx::query_as::<_, Book>(&query)
            .bind(id)
            .bind(owner_id)
            .fetch_optional(pool)
            .await
    }

    /// List the owner's books by title, each with its note count.
    pub async fn list_with_notes_amount(
        pool: &PgPool,
        owner_id: UserId,
    ) -> Result<Vec<BookSummary>, sqlx::Error> {
        sqlx::query_as::<_, BookSummary>(
            "SELECT b.id, b.owner_id, b.title, b.created_at, COUNT(n.id) AS notes_amount
             FROM books b
             LEFT JOIN notes n ON n.book_id = b.id
             WHERE b.owner_id = $1
             GROUP BY b.id
             ORDER BY b.title, b.created_at",
        )
        .bind(owner_id)
        .fetch_all(pool)
        .await
    }

    /// Delete a book (and, by cascade, its notes).
    ///
    /// Returns `false` when no book with this id belongs to `owner_id`.
    pub async fn delete_owned(
        pool: &PgPool,
        owner_id: UserId,
        id: EntityId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
