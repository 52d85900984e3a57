//! Domain building blocks for the notes service.
//!
//! This crate performs no I/O: it holds the shared id types, the
//! [`error::CoreError`] taxonomy, argument validation rules and the
//! Telegram login-widget signature check.

pub mod error;
pub mod telegram;
pub mod types;
pub mod validation;
