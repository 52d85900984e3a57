//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - An input DTO for inserts, built by the api layer after validation

pub mod book;
pub mod note;
pub mod statistics;
pub mod task_list;
pub mod user;
