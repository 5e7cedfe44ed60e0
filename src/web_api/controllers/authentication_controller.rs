use axum::{extract::State, http::StatusCode, Json};

use crate::{
    app_state::SharedState, authentication::auth, login_request::LoginRequest,
    login_response::LoginResponse, ApiError, ApiJson,
};

pub struct AuthenticationController {}

impl AuthenticationController {
    pub async fn login(
        State(state): State<SharedState>,
        ApiJson(payload): ApiJson<LoginRequest>,
    ) -> Result<Json<LoginResponse>, ApiError> {
        let user = state
            .data_context
            .get_user_by_username(&payload.username)?
            .ok_or_else(|| ApiError::unauthorized("Invalid credentials"))?;

        if !auth::verify_password(&payload.password, &user.password_hash) {
            return Err(ApiError::unauthorized("Invalid credentials"));
        }

        let token = auth::create_token(
            &user,
            &state.settings.jwt_secret,
            state.settings.jwt_expiration_in_minutes,
        )
        .map_err(|e| ApiError::internal(format!("token signing: {e}")))?;

        tracing::info!(username = %user.username, "user logged in");
        Ok(Json(LoginResponse { token }))
    }

    /// Tokens are stateless; the client drops its copy.
    pub async fn logout() -> StatusCode {
        StatusCode::OK
    }
}
