//---------------------------------------
pub mod web_api {
    pub mod api_error;
    pub mod controllers;
    pub mod extractors;
    pub mod routes;
}

pub use web_api::api_error::ApiError;
pub use web_api::controllers::*;
pub use web_api::extractors::{ApiJson, ApiQuery};
pub use web_api::routes::map_routes;
//---------------------------------------

//---------------------------------------
pub mod shared {
    pub mod dto;
    pub mod models;
    pub mod validation;
}

pub use shared::dto::*;
pub use shared::models::*;
//---------------------------------------

//---------------------------------------
pub mod authentication {
    pub mod auth;
}
//---------------------------------------

//---------------------------------------
pub mod data_access {
    pub mod data_context;
    pub mod priority_store;
    pub mod store_error;
    pub mod task_store;
}

pub use data_access::data_context::DataContext;
pub use data_access::store_error::StoreError;
//---------------------------------------
