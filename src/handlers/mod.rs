pub mod health_handlers;
pub mod key_handlers;
