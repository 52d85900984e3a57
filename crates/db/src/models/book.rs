//! Book entity model and DTOs.

use notes_core::types::{EntityId, Timestamp, UserId};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `books` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Book {
    pub id: EntityId,
    pub owner_id: UserId,
    pub title: String,
    pub created_at: Timestamp,
}

/// A book together with the number of notes it holds, as listed to its owner.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct BookSummary {
    pub id: EntityId,
    pub owner_id: UserId,
    pub title: String,
    pub created_at: Timestamp,
    pub notes_amount: i64,
}

/// DTO for creating a book.
#[derive(Debug, Clone)]
pub struct CreateBook {
    pub owner_id: UserId,
    pub title: String,
}
