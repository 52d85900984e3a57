//! Request extractors enforcing authentication.
//!
//! - [`auth::AuthUser`] -- Extracts the caller from the `X-Notes-Auth-Token` header.

pub mod auth;
