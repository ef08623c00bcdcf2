use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::Json,
};
use shared::{CreateTaskListRequest, TaskList, UpdateTaskListRequest};

use crate::error::ApiError;
use crate::state::AppState;
use crate::store::{parse_id, TaskListFilter};

pub async fn list_task_lists(
    State(state): State<AppState>,
) -> Result<Json<Vec<TaskList>>, ApiError> {
    let lists = state.task_lists.find(&TaskListFilter::All).await?;
    Ok(Json(lists))
}

/// Answers with an array, empty when nothing matches.
pub async fn get_task_list(
    Path(task_list_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Vec<TaskList>>, ApiError> {
    let id = parse_id(&task_list_id)?;
    let lists = state.task_lists.find(&TaskListFilter::Id(id)).await?;
    Ok(Json(lists))
}

pub async fn create_task_list(
    State(state): State<AppState>,
    payload: Result<Json<CreateTaskListRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<TaskList>), ApiError> {
    let Json(payload) = payload?;
    tracing::debug!(?payload, "create task list");
    let list = TaskList::new(payload)?;
    let list = state.task_lists.insert(list).await?;
    Ok((StatusCode::CREATED, Json(list)))
}

/// Serves both PUT and PATCH. Responds with the list as it was before the
/// update, or `null` when the id matched nothing.
pub async fn update_task_list(
    Path(task_list_id): Path<String>,
    State(state): State<AppState>,
    payload: Result<Json<UpdateTaskListRequest>, JsonRejection>,
) -> Result<Json<Option<TaskList>>, ApiError> {
    let Json(payload) = payload?;
    tracing::debug!(%task_list_id, ?payload, "update task list");
    let id = parse_id(&task_list_id)?;
    let previous = state
        .task_lists
        .find_one_and_update(&TaskListFilter::Id(id), payload)
        .await?;
    Ok(Json(previous))
}

/// Tasks owned by the list are left in place.
pub async fn delete_task_list(
    Path(task_list_id): Path<String>,
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<Option<TaskList>>), ApiError> {
    let id = parse_id(&task_list_id)?;
    let removed = state
        .task_lists
        .find_one_and_delete(&TaskListFilter::Id(id))
        .await?;
    Ok((StatusCode::CREATED, Json(removed)))
}
