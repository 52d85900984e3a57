//! HTTP API of the notes service.
//!
//! Exposes the `/method/<name>` JSON API (login through the Telegram login
//! widget, books, notes and task lists) and a `/health` probe.

pub mod auth;
pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
