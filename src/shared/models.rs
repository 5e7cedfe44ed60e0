pub mod app_state;
pub mod owner;
pub mod priority;
pub mod settings;
pub mod task;
pub mod user;
