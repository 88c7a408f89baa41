pub mod account_service;
pub mod auth_service;
pub mod health_service;
pub mod message_service;
