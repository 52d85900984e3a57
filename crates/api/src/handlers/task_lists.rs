//! Handlers for task lists and their tasks.

use axum::extract::State;
use axum::Json;
use notes_core::error::CoreError;
use notes_core::types::EntityId;
use notes_core::validation::{validate_task_titles, validate_title};
use notes_db::models::task_list::{CreateTaskList, Task, TaskListWithTasks};
use notes_db::repositories::TaskListRepo;
use serde::Deserialize;

use crate::error::AppResult;
use crate::extract::ApiJson;
use crate::middleware::auth::AuthUser;
use crate::response::ApiResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Arguments of `create_task_list`.
#[derive(Debug, Deserialize)]
pub struct CreateTaskListRequest {
    pub title: String,
    /// Task titles in display order.
    pub tasks: Vec<String>,
}

impl CreateTaskListRequest {
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_title("title", &self.title)?;
        validate_task_titles(&self.tasks)
    }
}

/// Arguments of `delete_task_list`.
#[derive(Debug, Deserialize)]
pub struct DeleteTaskListRequest {
    pub task_list_id: EntityId,
}

/// Arguments of `set_task_done`.
#[derive(Debug, Deserialize)]
pub struct SetTaskDoneRequest {
    pub task_list_id: EntityId,
    pub task_id: EntityId,
    pub is_done: bool,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /method/get_task_lists
pub async fn get_task_lists(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<ApiResponse<Vec<TaskListWithTasks>>>> {
    let lists = TaskListRepo::list_with_tasks(&state.pool, auth.user_id).await?;
    Ok(ApiResponse::json(lists))
}

/// POST /method/create_task_list
///
/// The list and all of its tasks are inserted atomically.
pub async fn create_task_list(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(input): ApiJson<CreateTaskListRequest>,
) -> AppResult<Json<ApiResponse<TaskListWithTasks>>> {
    input.validate()?;

    let created = TaskListRepo::create_with_tasks(
        &state.pool,
        &CreateTaskList {
            owner_id: auth.user_id,
            title: input.title,
            tasks: input.tasks,
        },
    )
    .await?;

    tracing::info!(
        user_id = auth.user_id,
        task_list_id = %created.task_list.id,
        tasks = created.tasks.len(),
        "Task list created",
    );

    Ok(ApiResponse::json(created))
}

/// POST /method/delete_task_list
pub async fn delete_task_list(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(input): ApiJson<DeleteTaskListRequest>,
) -> AppResult<Json<ApiResponse<bool>>> {
    let deleted =
        TaskListRepo::delete_owned(&state.pool, auth.user_id, input.task_list_id).await?;
    if !deleted {
        return Err(CoreError::NotFound { entity: "task list" }.into());
    }

    tracing::info!(
        user_id = auth.user_id,
        task_list_id = %input.task_list_id,
        "Task list deleted",
    );

    Ok(ApiResponse::json(true))
}

/// POST /method/set_task_done
///
/// Toggles a single task; lists are otherwise immutable once created.
pub async fn set_task_done(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(input): ApiJson<SetTaskDoneRequest>,
) -> AppResult<Json<ApiResponse<Task>>> {
    let task = TaskListRepo::set_task_done(
        &state.pool,
        auth.user_id,
        input.task_list_id,
        input.task_id,
        input.is_done,
    )
    .await?
    .ok_or(CoreError::NotFound { entity: "task" })?;

    tracing::info!(
        user_id = auth.user_id,
        task_id = %task.id,
        is_done = task.is_done,
        "Task updated",
    );

    Ok(ApiResponse::json(task))
}
