// Requests
pub mod create_priority_request;
pub mod create_task_request;
pub mod id_query;
pub mod login_request;
pub mod update_task_request;
pub mod user_register_request;

// Responses
pub mod health_response;
pub mod login_response;
pub mod task_response;
pub mod user_get_response;
