//! Handlers for books.

use axum::extract::State;
use axum::Json;
use notes_core::error::CoreError;
use notes_core::types::EntityId;
use notes_core::validation::validate_title;
use notes_db::models::book::{Book, BookSummary, CreateBook};
use notes_db::repositories::BookRepo;
use serde::Deserialize;

use crate::error::AppResult;
use crate::extract::ApiJson;
use crate::middleware::auth::AuthUser;
use crate::response::ApiResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Arguments of `create_book`.
#[derive(Debug, Deserialize)]
pub struct CreateBookRequest {
    pub title: String,
}

impl CreateBookRequest {
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_title("title", &self.title)
    }
}

/// Arguments of `delete_book`.
#[derive(Debug, Deserialize)]
pub struct DeleteBookRequest {
    pub book_id: EntityId,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /method/get_books
///
/// The caller's books ordered by title, each with its note count.
pub async fn get_books(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<ApiResponse<Vec<BookSummary>>>> {
    let books = BookRepo::list_with_notes_amount(&state.pool, auth.user_id).await?;
    Ok(ApiResponse::json(books))
}

/// POST /method/create_book
pub async fn create_book(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(input): ApiJson<CreateBookRequest>,
) -> AppResult<Json<ApiResponse<Book>>> {
    input.validate()?;

    let book = BookRepo::create(
        &state.pool,
        &CreateBook {
            owner_id: auth.user_id,
            title: input.title,
        },
    )
    .await?;

    tracing::info!(user_id = auth.user_id, book_id = %book.id, "Book created");

    Ok(ApiResponse::json(book))
}

/// POST /method/delete_book
///
/// Deletes the book and all of its notes.
pub async fn delete_book(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(input): ApiJson<DeleteBookRequest>,
) -> AppResult<Json<ApiResponse<bool>>> {
    let deleted = BookRepo::delete_owned(&state.pool, auth.user_id, input.book_id).await?;
    if !deleted {
        return Err(CoreError::NotFound { entity: "book" }.into());
    }

    tracing::info!(user_id = auth.user_id, book_id = %input.book_id, "Book deleted");

    Ok(ApiResponse::json(true))
}
