use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};

use crate::{
    app_state::SharedState, authentication::auth::auth_middleware, task_controller::TaskController,
};

pub const ROUTER_PATH: &str = "/task";

pub fn get_router(app_state: SharedState) -> Router {
    Router::new()
        .route(format!("{}/get_all", ROUTER_PATH).as_str(), get(TaskController::get_all))
        .route(format!("{}/create", ROUTER_PATH).as_str(), post(TaskController::create))
        .route(format!("{}/update", ROUTER_PATH).as_str(), put(TaskController::update))
        .route(
            format!("{}/mark_as_completed", ROUTER_PATH).as_str(),
            put(TaskController::mark_as_completed),
        )
        .route(
            format!("{}/mark_as_not_completed", ROUTER_PATH).as_str(),
            put(TaskController::mark_as_not_completed),
        )
        .route(format!("{}/delete", ROUTER_PATH).as_str(), delete(TaskController::delete))
        .layer(middleware::from_fn_with_state(app_state.clone(), auth_middleware))
        .with_state(app_state)
}
