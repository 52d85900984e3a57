//! Handlers for aggregate counters.

use axum::extract::State;
use axum::Json;
use notes_db::models::statistics::{Statistics, UserStatistics};
use notes_db::repositories::StatisticsRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::ApiResponse;
use crate::state::AppState;

/// POST /method/get_statistics
///
/// Public; shown on the landing page before login.
pub async fn get_statistics(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Statistics>>> {
    let stats = StatisticsRepo::totals(&state.pool).await?;
    Ok(ApiResponse::json(stats))
}

/// POST /method/get_user_statistics
pub async fn get_user_statistics(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<ApiResponse<UserStatistics>>> {
    let stats = StatisticsRepo::for_user(&state.pool, auth.user_id).await?;
    Ok(ApiResponse::json(stats))
}
