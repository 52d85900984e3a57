//! Repository for the `task_lists` and `tasks` tables.

use std::collections::HashMap;

use notes_core::types::{EntityId, UserId};
use sqlx::PgPool;

use crate::models::task_list::{CreateTaskList, Task, TaskList, TaskListWithTasks};

/// Column lists shared across queries to avoid repetition.
const LIST_COLUMNS: &str = "id, owner_id, title, created_at";
const TASK_COLUMNS: &str = "id, task_list_id, title, is_done, position";

/// Provides owner-scoped operations for task lists and their tasks.
pub struct TaskListRepo;

impl TaskListRepo {
    /// Insert a task list and all of its tasks in a single transaction.
    ///
    /// Tasks keep the order they were given in (`position` 0, 1, ...).
    pub async fn create_with_tasks(
        pool: &PgPool,
        input: &CreateTaskList,
    ) -> Result<TaskListWithTasks, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let list_query = format!(
            "INSERT INTO task_lists (owner_id, title)
             VALUES ($1, $2)
             RETURNING {LIST_COLUMNS}"
        );
        let task_list = sqlx::query_as::<_, TaskList>(&list_query)
            .bind(input.owner_id)
            .bind(&input.title)
            .fetch_one(&mut *tx)
            .await?;

        let tasks_query = format!(
            "INSERT INTO tasks (task_list_id, title, position)
             SELECT $1, t.title, (t.ord - 1)::INT
             FROM UNNEST($2::TEXT[]) WITH ORDINALITY AS t(title, ord)
             RETURNING {TASK_COLUMNS}"
        );
        let mut tasks = sqlx::query_as::<_, Task>(&tasks_query)
            .bind(task_list.id)
            .bind(&input.tasks)
            .fetch_all(&mut *tx)
            .await?;

        tx.commit().await?;
        tracing::debug!(task_list_id = %task_list.id, tasks = tasks.len(), "Task list inserted");

        tasks.sort_by_key(|t| t.position);
        Ok(TaskListWithTasks { task_list, tasks })
    }

    /// List the owner's task lists (newest first) with their tasks.
    pub async fn list_with_tasks(
        pool: &PgPool,
        owner_id: UserId,
    ) -> Result<Vec<TaskListWithTasks>, sqlx::Error> {
        let list_query = format!(
            "SELECT {LIST_COLUMNS} FROM task_lists
             WHERE owner_id = $1
             ORDER BY created_at DESC, id"
        );
        let lists = sqlx::query_as::<_, TaskList>(&list_query)
            .bind(owner_id)
            .fetch_all(pool)
            .await?;

        if lists.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<EntityId> = lists.iter().map(|l| l.id).collect();
        let tasks_query = format!(
            "SELECT {TASK_COLUMNS} FROM tasks
             WHERE task_list_id = ANY($1)
             ORDER BY task_list_id, position"
        );
        let tasks = sqlx::query_as::<_, Task>(&tasks_query)
            .bind(&ids)
            .fetch_all(pool)
            .await?;

        let mut by_list: HashMap<EntityId, Vec<Task>> = HashMap::new();
        for task in tasks {
            by_list.entry(task.task_list_id).or_default().push(task);
        }

        Ok(lists
            .into_iter()
            .map(|task_list| {
                let tasks = by_list.remove(&task_list.id).unwrap_or_default();
                TaskListWithTasks { task_list, tasks }
            })
            .collect())
    }

    /// Delete a task list (and, by cascade, its tasks).
    ///
    /// Returns `false` when no task list with this id belongs to `owner_id`.
    pub async fn delete_owned(
        pool: &PgPool,
        owner_id: UserId,
        id: EntityId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM task_lists WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Mark a task as done or not done.
    ///
    /// Returns `None` when the task is not in that list or the list is not
    /// owned by `owner_id`.
    pub async fn set_task_done(
        pool: &PgPool,
        owner_id: UserId,
        task_list_id: EntityId,
        task_id: EntityId,
        is_done: bool,
    ) -> Result<Option<Task>, sqlx::Error> {
        sqlx::query_as::<_, Task>(
            "UPDATE tasks t SET is_done = $3
             FROM task_lists l
             WHERE t.id = $1 AND t.task_list_id = $2
               AND l.id = t.task_list_id AND l.owner_id = $4
             RETURNING t.id, t.task_list_id, t.title, t.is_done, t.position",
        )
        .bind(task_id)
        .bind(task_list_id)
        .bind(is_done)
        .bind(owner_id)
        .fetch_optional(pool)
        .await
    }
}
