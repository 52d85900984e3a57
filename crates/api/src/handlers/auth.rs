//! Handlers for login and the caller's own profile.

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use notes_core::error::CoreError;
use notes_core::telegram::{self, LoginPayload};
use notes_db::models::user::{UpsertUser, User};
use notes_db::repositories::UserRepo;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::auth::jwt::issue_token;
use crate::error::{AppError, AppResult};
use crate::extract::ApiJson;
use crate::middleware::auth::AuthUser;
use crate::response::ApiResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Successful login result.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    /// Session token to send back in `X-Notes-Auth-Token`.
    pub auth_token: String,
    /// Token expiry (UTC Unix timestamp).
    pub expires_at: i64,
    pub user: User,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /method/login
///
/// Verify the Telegram login widget payload, create or refresh the user and
/// issue a session token. The body is the widget's flat field object.
pub async fn login(
    State(state): State<AppState>,
    ApiJson(fields): ApiJson<Map<String, Value>>,
) -> AppResult<Json<ApiResponse<LoginResponse>>> {
    let payload = LoginPayload::from_json(fields).map_err(CoreError::from)?;

    let now = Utc::now().timestamp();
    let settings = &state.config.telegram;
    let profile = telegram::verify_login(
        &payload,
        &settings.bot_token,
        now,
        settings.max_auth_age_secs,
    )
    .map_err(|err| {
        tracing::warn!(error = %err, "Rejected Telegram login");
        CoreError::from(err)
    })?;

    let user = UserRepo::upsert(&state.pool, &UpsertUser::from(profile)).await?;

    let issued = issue_token(user.id, now, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    tracing::info!(user_id = user.id, "User logged in");

    Ok(ApiResponse::json(LoginResponse {
        auth_token: issued.token,
        expires_at: issued.expires_at,
        user,
    }))
}

/// POST /method/get_me
pub async fn get_me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<ApiResponse<User>>> {
    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or(CoreError::NotFound { entity: "user" })?;
    Ok(ApiResponse::json(user))
}
