use axum::{extract::State, Extension, Json};

use crate::{
    app_state::SharedState, create_priority_request::CreatePriorityRequest, id_query::IdQuery,
    owner::Owner, priority::Priority, ApiError, ApiJson, ApiQuery,
};

pub struct PriorityController {}

impl PriorityController {
    pub async fn get_all(
        State(state): State<SharedState>,
        Extension(owner): Extension<Owner>,
    ) -> Result<Json<Vec<Priority>>, ApiError> {
        Ok(Json(state.data_context.priorities().list(owner)?))
    }

    pub async fn create(
        State(state): State<SharedState>,
        Extension(owner): Extension<Owner>,
        ApiJson(body): ApiJson<CreatePriorityRequest>,
    ) -> Result<Json<Priority>, ApiError> {
        let input = body.validate()?;
        Ok(Json(state.data_context.priorities().create(owner, input)?))
    }

    pub async fn delete(
        State(state): State<SharedState>,
        Extension(owner): Extension<Owner>,
        ApiQuery(IdQuery { id }): ApiQuery<IdQuery>,
    ) -> Result<Json<Priority>, ApiError> {
        Ok(Json(state.data_context.priorities().delete(owner, id)?))
    }
}
