//! Route definitions for the `/method/<name>` API.

use axum::handler::Handler;
use axum::routing::{any, post, MethodRouter};
use axum::Router;
use notes_core::error::CoreError;

use crate::error::AppError;
use crate::handlers::{auth, books, notes, statistics, task_lists};
use crate::state::AppState;

/// Every API method is a `POST` with a JSON object body.
pub fn router() -> Router<AppState> {
    Router::new()
        // Session.
        .route("/login", api_method(auth::login))
        .route("/get_me", api_method(auth::get_me))
        // Counters.
        .route("/get_statistics", api_method(statistics::get_statistics))
        .route("/get_user_statistics", api_method(statistics::get_user_statistics))
        // Books.
        .route("/get_books", api_method(books::get_books))
        .route("/create_book", api_method(books::create_book))
        .route("/delete_book", api_method(books::delete_book))
        // Notes.
        .route("/get_notes", api_method(notes::get_notes))
        .route("/create_note", api_method(notes::create_note))
        .route("/delete_note", api_method(notes::delete_note))
        // Task lists.
        .route("/get_task_lists", api_method(task_lists::get_task_lists))
        .route("/create_task_list", api_method(task_lists::create_task_list))
        .route("/delete_task_list", api_method(task_lists::delete_task_list))
        .route("/set_task_done", api_method(task_lists::set_task_done))
        .route("/{*name}", any(unknown_method))
}

/// `POST` route whose other HTTP methods answer in the error envelope.
fn api_method<H, T>(handler: H) -> MethodRouter<AppState>
where
    H: Handler<T, AppState>,
    T: 'static,
{
    post(handler).fallback(wrong_http_method)
}

async fn unknown_method() -> AppError {
    AppError::Core(CoreError::NotFound { entity: "method" })
}

async fn wrong_http_method() -> AppError {
    AppError::MethodNotAllowed
}
