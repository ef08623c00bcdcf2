use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::Json,
};
use shared::{CreateTaskRequest, Task, UpdateTaskRequest};

use crate::error::ApiError;
use crate::state::AppState;
use crate::store::{parse_id, TaskFilter};

// The owning list is never looked up: tasks may name a list that does not exist.

pub async fn list_tasks(
    Path(task_list_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Vec<Task>>, ApiError> {
    let task_list_id = parse_id(&task_list_id)?;
    let tasks = state.tasks.find(&TaskFilter::in_list(task_list_id)).await?;
    Ok(Json(tasks))
}

pub async fn create_task(
    Path(task_list_id): Path<String>,
    State(state): State<AppState>,
    payload: Result<Json<CreateTaskRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Task>), ApiError> {
    let Json(payload) = payload?;
    tracing::debug!(%task_list_id, ?payload, "create task");
    let task_list_id = parse_id(&task_list_id)?;
    let task = state.tasks.insert(Task::new(task_list_id, payload)).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

pub async fn get_task(
    Path((task_list_id, task_id)): Path<(String, String)>,
    State(state): State<AppState>,
) -> Result<Json<Option<Task>>, ApiError> {
    let filter = TaskFilter::one(parse_id(&task_list_id)?, parse_id(&task_id)?);
    let task = state.tasks.find_one(&filter).await?;
    Ok(Json(task))
}

/// Responds with the task as it was before the update.
pub async fn update_task(
    Path((task_list_id, task_id)): Path<(String, String)>,
    State(state): State<AppState>,
    payload: Result<Json<UpdateTaskRequest>, JsonRejection>,
) -> Result<Json<Option<Task>>, ApiError> {
    let Json(payload) = payload?;
    tracing::debug!(%task_list_id, %task_id, ?payload, "update task");
    let filter = TaskFilter::one(parse_id(&task_list_id)?, parse_id(&task_id)?);
    let previous = state.tasks.find_one_and_update(&filter, payload).await?;
    Ok(Json(previous))
}

pub async fn delete_task(
    Path((task_list_id, task_id)): Path<(String, String)>,
    State(state): State<AppState>,
) -> Result<Json<Option<Task>>, ApiError> {
    let filter = TaskFilter::one(parse_id(&task_list_id)?, parse_id(&task_id)?);
    let removed = state.tasks.find_one_and_delete(&filter).await?;
    Ok(Json(removed))
}
