//! Aggregate counters shown on the landing page and profile.

use serde::Serialize;
use sqlx::FromRow;

/// Service-wide totals.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Statistics {
    pub users_amount: i64,
    pub books_amount: i64,
    pub notes_amount: i64,
    pub task_lists_amount: i64,
}

/// Totals for a single user.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserStatistics {
    pub books_amount: i64,
    pub notes_amount: i64,
    pub task_lists_amount: i64,
}
