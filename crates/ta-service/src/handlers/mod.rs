pub mod analysis_handler;
pub mod auth_handler;
