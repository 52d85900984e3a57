//! Success envelope for `/method` responses.
//!
//! Every successful call answers `{ "ok": true, "result": ... }`; failures
//! are rendered by [`AppError`](crate::error::AppError) as
//! `{ "ok": false, "error_code": ..., "description": ... }`.

use axum::Json;
use serde::Serialize;

/// Standard `{ "ok": true, "result": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub ok: bool,
    pub result: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Wrap `result` in a successful envelope.
    pub fn json(result: T) -> Json<Self> {
        Json(Self { ok: true, result })
    }
}
