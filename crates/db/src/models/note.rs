//! Note entity model and DTOs.

use notes_core::types::{EntityId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `notes` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Note {
    pub id: EntityId,
    pub book_id: EntityId,
    pub title: String,
    pub text: String,
    pub created_at: Timestamp,
}

/// DTO for creating a note inside a book.
#[derive(Debug, Clone)]
pub struct CreateNote {
    pub book_id: EntityId,
    pub title: String,
    pub text: String,
}
