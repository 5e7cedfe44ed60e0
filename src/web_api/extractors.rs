use axum::extract::{FromRequest, FromRequestParts};

use crate::ApiError;

/// `axum::Json` that rejects malformed bodies with a JSON `ApiError`.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// `axum::extract::Query` that rejects malformed query strings with a JSON
/// `ApiError`.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);
