use anyhow::{Context, Result};
use axum::Router;
use std::io::ErrorKind;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

mod config;
mod errors;
mod handlers;
mod models;
mod routes;
mod services;

use services::{graphql_client::GraphQlClient, key_service::KeyService};

#[tokio::main]
async fn main() -> Result<()> {
    // --- .env is optional ---
    let dotenv_loaded = dotenv::dotenv().is_ok();

    // --- Logging setup ---
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if !dotenv_loaded {
        tracing::debug!("No .env file loaded");
    }

    // --- Parse config ---
    let cfg = config::AppConfig::from_env_and_args()?;

    tracing::info!("Starting ingest-key-gateway with config: {:?}", cfg);

    // --- Initialize upstream client ---
    let client = match &cfg.api_key {
        Some(api_key) => Some(
            GraphQlClient::new(&cfg.graphql_endpoint, api_key, cfg.request_timeout)
                .context("building GraphQL client")?,
        ),
        None => {
            tracing::warn!("NEW_RELIC_API_KEY is not set; key requests will be rejected");
            None
        }
    };
    let service = KeyService::new(client);

    // --- Build router ---
    let app: Router = routes::routes::routes().with_state(service);

    // --- Start server ---
    let addr = cfg.addr();
    let listener = match TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(err)
            if err.kind() == ErrorKind::PermissionDenied
                && matches!(cfg.host.as_str(), "0.0.0.0" | "::") =>
        {
            let fallback_addr = format!("127.0.0.1:{}", cfg.port);
            tracing::warn!(
                "Permission denied binding to {} ({}). Falling back to {}",
                addr,
                err,
                fallback_addr
            );
            TcpListener::bind(&fallback_addr).await?
        }
        Err(err) => return Err(err.into()),
    };

    tracing::info!("Server listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
