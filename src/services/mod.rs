pub mod graphql_client;
pub mod key_service;
pub mod mutations;
