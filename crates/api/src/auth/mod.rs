//! Session credentials.
//!
//! - [`jwt`] -- HS256 session token issuance and validation.
//!
//! Telegram login verification itself lives in `notes_core::telegram`.

pub mod jwt;

/// Request header carrying the session token.
pub const AUTH_TOKEN_HEADER: &str = "x-notes-auth-token";
