use axum::{extract::State, http::StatusCode, Extension, Json};

use crate::{
    app_state::SharedState, user::User, user_get_response::UserGetResponse,
    user_register_request::UserRegisterRequest, ApiError, ApiJson,
};

pub struct UserController {}

impl UserController {
    pub async fn register(
        State(state): State<SharedState>,
        ApiJson(body): ApiJson<UserRegisterRequest>,
    ) -> Result<(StatusCode, Json<UserGetResponse>), ApiError> {
        body.validate()?;
        let user = User::new(body.username, &body.password)
            .map_err(|e| ApiError::internal(format!("password hash: {e}")))?;
        state.data_context.create_user(&user)?;
        Ok((StatusCode::CREATED, Json(user.to_get_dto())))
    }

    pub async fn me(Extension(user): Extension<User>) -> Json<UserGetResponse> {
        Json(user.to_get_dto())
    }
}
