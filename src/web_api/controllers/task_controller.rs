use axum::{extract::State, Extension, Json};

use crate::{
    app_state::SharedState, create_task_request::CreateTaskRequest, id_query::IdQuery,
    owner::Owner, task_response::TaskResponse, update_task_request::UpdateTaskRequest, ApiError,
    ApiJson, ApiQuery,
};

pub struct TaskController {}

impl TaskController {
    pub async fn get_all(
        State(state): State<SharedState>,
        Extension(owner): Extension<Owner>,
    ) -> Result<Json<Vec<TaskResponse>>, ApiError> {
        Ok(Json(state.data_context.tasks().list(owner)?))
    }

    pub async fn create(
        State(state): State<SharedState>,
        Extension(owner): Extension<Owner>,
        ApiJson(body): ApiJson<CreateTaskRequest>,
    ) -> Result<Json<TaskResponse>, ApiError> {
        let fields = body.validate()?;
        Ok(Json(state.data_context.tasks().create(owner, fields)?))
    }

    pub async fn update(
        State(state): State<SharedState>,
        Extension(owner): Extension<Owner>,
        ApiJson(body): ApiJson<UpdateTaskRequest>,
    ) -> Result<Json<TaskResponse>, ApiError> {
        let (id, fields) = body.validate()?;
        Ok(Json(state.data_context.tasks().update(owner, id, fields)?))
    }

    pub async fn mark_as_completed(
        State(state): State<SharedState>,
        Extension(owner): Extension<Owner>,
        ApiQuery(IdQuery { id }): ApiQuery<IdQuery>,
    ) -> Result<Json<TaskResponse>, ApiError> {
        Ok(Json(state.data_context.tasks().mark_as_completed(owner, id)?))
    }

    pub async fn mark_as_not_completed(
        State(state): State<SharedState>,
        Extension(owner): Extension<Owner>,
        ApiQuery(IdQuery { id }): ApiQuery<IdQuery>,
    ) -> Result<Json<TaskResponse>, ApiError> {
        Ok(Json(state.data_context.tasks().mark_as_not_completed(owner, id)?))
    }

    pub async fn delete(
        State(state): State<SharedState>,
        Extension(owner): Extension<Owner>,
        ApiQuery(IdQuery { id }): ApiQuery<IdQuery>,
    ) -> Result<Json<TaskResponse>, ApiError> {
        Ok(Json(state.data_context.tasks().delete(owner, id)?))
    }
}
