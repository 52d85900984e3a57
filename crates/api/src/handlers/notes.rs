//! Handlers for notes. Every operation is scoped through a book the caller
//! owns; a foreign or missing book is reported as "book not found".

use axum::extract::State;
use axum::Json;
use notes_core::error::CoreError;
use notes_core::types::{EntityId, UserId};
use notes_core::validation::{validate_note_text, validate_title};
use notes_db::models::note::{CreateNote, Note};
use notes_db::repositories::{BookRepo, NoteRepo};
use notes_db::DbPool;
use serde::Deserialize;

use crate::error::AppResult;
use crate::extract::ApiJson;
use crate::middleware::auth::AuthUser;
use crate::response::ApiResponse;
use crate::state::AppState;

const BOOK_NOT_FOUND: CoreError = CoreError::NotFound { entity: "book" };

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Arguments of `get_notes`.
#[derive(Debug, Deserialize)]
pub struct GetNotesRequest {
    pub book_id: EntityId,
}

/// Arguments of `create_note`.
#[derive(Debug, Deserialize)]
pub struct CreateNoteRequest {
    pub book_id: EntityId,
    pub title: String,
    pub text: String,
}

impl CreateNoteRequest {
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_title("title", &self.title)?;
        validate_note_text(&self.text)
    }
}

/// Arguments of `delete_note`.
#[derive(Debug, Deserialize)]
pub struct DeleteNoteRequest {
    pub book_id: EntityId,
    pub note_id: EntityId,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /method/get_notes
pub async fn get_notes(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(input): ApiJson<GetNotesRequest>,
) -> AppResult<Json<ApiResponse<Vec<Note>>>> {
    ensure_book_owned(&state.pool, auth.user_id, input.book_id).await?;
    let notes = NoteRepo::list_by_book(&state.pool, input.book_id).await?;
    Ok(ApiResponse::json(notes))
}

/// POST /method/create_note
pub async fn create_note(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(input): ApiJson<CreateNoteRequest>,
) -> AppResult<Json<ApiResponse<Note>>> {
    input.validate()?;

    let create = CreateNote {
        book_id: input.book_id,
        title: input.title,
        text: input.text,
    };
    let note = NoteRepo::create_in_owned_book(&state.pool, auth.user_id, &create)
        .await?
        .ok_or(BOOK_NOT_FOUND)?;

    tracing::info!(
        user_id = auth.user_id,
        book_id = %note.book_id,
        note_id = %note.id,
        "Note created",
    );

    Ok(ApiResponse::json(note))
}

/// POST /method/delete_note
pub async fn delete_note(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(input): ApiJson<DeleteNoteRequest>,
) -> AppResult<Json<ApiResponse<bool>>> {
    ensure_book_owned(&state.pool, auth.user_id, input.book_id).await?;

    let deleted =
        NoteRepo::delete_owned(&state.pool, auth.user_id, input.book_id, input.note_id).await?;
    if !deleted {
        return Err(CoreError::NotFound { entity: "note" }.into());
    }

    tracing::info!(user_id = auth.user_id, note_id = %input.note_id, "Note deleted");

    Ok(ApiResponse::json(true))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn ensure_book_owned(pool: &DbPool, owner_id: UserId, book_id: EntityId) -> AppResult<()> {
    BookRepo::find_owned(pool, owner_id, book_id)
        .await?
        .ok_or(BOOK_NOT_FOUND)?;
    Ok(())
}
