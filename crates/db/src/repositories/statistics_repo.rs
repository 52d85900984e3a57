//! Aggregate counters across the `users`, `books`, `notes` and `task_lists` tables.

use notes_core::types::UserId;
use sqlx::PgPool;

use crate::models::statistics::{Statistics, UserStatistics};

/// Read-only counting queries.
pub struct StatisticsRepo;

impl StatisticsRepo {
    /// Totals across all users.
    pub async fn totals(pool: &PgPool) -> Result<Statistics, sqlx::Error> {
        sqlx::query_as::<_, Statistics>(
            "SELECT
                (SELECT COUNT(*) FROM users) AS users_amount,
                (SELECT COUNT(*) FROM books) AS books_amount,
                (SELECT COUNT(*) FROM notes) AS notes_amount,
                (SELECT COUNT(*) FROM task_lists) AS task_lists_amount",
        )
        .fetch_one(pool)
        .await
    }

    /// Totals for the resources owned by one user.
    pub async fn for_user(pool: &PgPool, owner_id: UserId) -> Result<UserStatistics, sqlx::Error> {
        sqlx::query_as::<_, UserStatistics>(
            "SELECT
                (SELECT COUNT(*) FROM books WHERE owner_id = $1) AS books_amount,
                (SELECT COUNT(*) FROM notes n JOIN books b ON b.id = n.book_id
                  WHERE b.owner_id = $1) AS notes_amount,
                (SELECT COUNT(*) FROM task_lists WHERE owner_id = $1) AS task_lists_amount",
        )
        .bind(owner_id)
        .fetch_one(pool)
        .await
    }
}
