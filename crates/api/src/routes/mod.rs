pub mod health;
pub mod method;

use axum::Router;

use crate::state::AppState;

/// Build the JSON API route tree.
///
/// Route hierarchy:
///
/// ```text
/// /method/login                 verify Telegram login, issue token (public)
/// /method/get_me                caller's profile
/// /method/get_statistics        global counters (public)
/// /method/get_user_statistics   caller's counters
///
/// /method/get_books             list books with note counts
/// /method/create_book           create book
/// /method/delete_book           delete book and its notes
///
/// /method/get_notes             list notes of an owned book
/// /method/create_note           create note in an owned book
/// /method/delete_note           delete note from an owned book
///
/// /method/get_task_lists        list task lists with tasks
/// /method/create_task_list      create task list with tasks
/// /method/delete_task_list      delete task list
/// /method/set_task_done         mark a task done or not done
///
/// /method/{anything else}       "method not found"
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/method", method::router())
}
