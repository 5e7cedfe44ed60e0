use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};

use crate::{
    app_state::SharedState, authentication::auth::auth_middleware,
    priority_controller::PriorityController,
};

pub const ROUTER_PATH: &str = "/priority";

pub fn get_router(app_state: SharedState) -> Router {
    Router::new()
        .route(format!("{}/get_all", ROUTER_PATH).as_str(), get(PriorityController::get_all))
        .route(format!("{}/create", ROUTER_PATH).as_str(), post(PriorityController::create))
        .route(format!("{}/delete", ROUTER_PATH).as_str(), delete(PriorityController::delete))
        .layer(middleware::from_fn_with_state(app_state.clone(), auth_middleware))
        .with_state(app_state)
}
