//! Task list and task entity models and DTOs.

use notes_core::types::{EntityId, Timestamp, UserId};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `task_lists` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TaskList {
    pub id: EntityId,
    pub owner_id: UserId,
    pub title: String,
    pub created_at: Timestamp,
}

/// A row from the `tasks` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Task {
    pub id: EntityId,
    pub task_list_id: EntityId,
    pub title: String,
    pub is_done: bool,
    pub position: i32,
}

/// A task list with its tasks in position order.
#[derive(Debug, Clone, Serialize)]
pub struct TaskListWithTasks {
    #[serde(flatten)]
    pub task_list: TaskList,
    pub tasks: Vec<Task>,
}

/// DTO for creating a task list together with its initial tasks.
#[derive(Debug, Clone)]
pub struct CreateTaskList {
    pub owner_id: UserId,
    pub title: String,
    pub tasks: Vec<String>,
}
