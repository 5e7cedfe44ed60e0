pub mod authentication_routes;
pub mod health_routes;
pub mod priority_routes;
pub mod task_routes;
pub mod user_routes;

use axum::Router;

use crate::app_state::SharedState;

pub fn map_routes(app_state: SharedState) -> Router {
    Router::new()
        .merge(health_routes::get_router())
        .merge(authentication_routes::get_router(app_state.clone()))
        .merge(user_routes::get_router(app_state.clone()))
        .merge(priority_routes::get_router(app_state.clone()))
        .merge(task_routes::get_router(app_state))
}
