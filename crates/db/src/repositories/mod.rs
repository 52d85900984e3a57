//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. Every method touching a
//! user-owned resource takes the acting user's id and filters on it.

pub mod book_repo;
pub mod note_repo;
pub mod statistics_repo;
pub mod task_list_repo;
pub mod user_repo;

pub use book_repo::BookRepo;
pub use note_repo::NoteRepo;
pub use statistics_repo::StatisticsRepo;
pub use task_list_repo::TaskListRepo;
pub use user_repo::UserRepo;
