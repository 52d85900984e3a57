/// Users are keyed by their Telegram id.
pub type UserId = i64;

/// Books, notes, task lists and tasks use UUID primary keys.
pub type EntityId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
