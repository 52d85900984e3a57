//! Request body extractor that reports failures in the API envelope.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::Json;

use crate::error::AppError;

/// Drop-in replacement for [`axum::Json`] whose rejection is an [`AppError`].
///
/// Any body that does not deserialize into `T` (not JSON, wrong content
/// type, missing or mistyped fields) is answered with
/// "invalid request format"; serde's detail only goes to the log.
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ApiJson(value)),
            Err(rejection) => {
                tracing::debug!(error = %rejection.body_text(), "Rejected request body");
                Err(AppError::BadRequest("invalid request format".into()))
            }
        }
    }
}
