use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::{app_state::SharedState, authentication::auth::auth_middleware, user_controller::UserController};

pub const ROUTER_PATH: &str = "/user";

pub fn get_router(app_state: SharedState) -> Router {
    let protected = Router::new()
        .route(format!("{}/me", ROUTER_PATH).as_str(), get(UserController::me))
        .layer(middleware::from_fn_with_state(app_state.clone(), auth_middleware));

    Router::new()
        .route(format!("{}/register", ROUTER_PATH).as_str(), post(UserController::register))
        .merge(protected)
        .with_state(app_state)
}
