//! Handlers for the `/method/...` API.
//!
//! Each handler takes a typed request body, validates it, performs one
//! repository call scoped to the caller and answers with the
//! [`ApiResponse`](crate::response::ApiResponse) envelope.

pub mod auth;
pub mod books;
pub mod notes;
pub mod statistics;
pub mod task_lists;
