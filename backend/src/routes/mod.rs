mod task_lists;
mod tasks;

use axum::{
    http::{header, HeaderName, Method},
    routing::get,
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::state::AppState;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/tasklists",
            get(task_lists::list_task_lists).post(task_lists::create_task_list),
        )
        .route(
            "/tasklists/:tasklist_id",
            get(task_lists::get_task_list)
                .put(task_lists::update_task_list)
                .patch(task_lists::update_task_list)
                .delete(task_lists::delete_task_list),
        )
        .route(
            "/tasklists/:tasklist_id/tasks",
            get(tasks::list_tasks).post(tasks::create_task),
        )
        .route(
            "/tasklists/:tasklist_id/tasks/:task_id",
            get(tasks::get_task)
                .patch(tasks::update_task)
                .delete(tasks::delete_task),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer())
        .with_state(state)
}

/// Any origin may call the API, which is consumed by a separately served frontend.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::OPTIONS,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([
            HeaderName::from_static("x-requested-with"),
            header::CONTENT_TYPE,
        ])
}
