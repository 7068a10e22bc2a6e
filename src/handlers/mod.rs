pub mod auth_handler;
pub mod league;
pub mod registration_handler;
