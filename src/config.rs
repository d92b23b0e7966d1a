use anyhow::{Context, Result};
use clap::Parser;
use std::{env, fmt, time::Duration};

pub const DEFAULT_GRAPHQL_ENDPOINT: &str = "https://api.eu.newrelic.com/graphql";

/// Centralized application configuration.
/// Combines environment variables and CLI arguments.
#[derive(Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub graphql_endpoint: String,
    pub api_key: Option<String>,
    pub request_timeout: Duration,
}

/// Command-line + environment configuration.
#[derive(Parser, Debug, Default)]
#[command(author, version, about = "REST facade for New Relic ingest key management")]
pub struct Args {
    /// Host to bind to (overrides KEY_GATEWAY_HOST)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind to (overrides KEY_GATEWAY_PORT)
    #[arg(long)]
    pub port: Option<u16>,

    /// NerdGraph endpoint (overrides NEW_RELIC_GRAPHQL_ENDPOINT)
    #[arg(long)]
    pub graphql_endpoint: Option<String>,

    /// Upstream request timeout in seconds (overrides KEY_GATEWAY_TIMEOUT_SECS)
    #[arg(long)]
    pub timeout_secs: Option<u64>,
}

impl AppConfig {
    /// Parse environment variables + CLI args into AppConfig.
    pub fn from_env_and_args() -> Result<Self> {
        Self::from_args(Args::parse())
    }

    /// Merge already-parsed CLI args with the environment.
    pub fn from_args(args: Args) -> Result<Self> {
        // --- Environment fallback ---
        let env_host = env::var("KEY_GATEWAY_HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let env_port = parse_env("KEY_GATEWAY_PORT", 8080u16)?;
        let env_endpoint = env::var("NEW_RELIC_GRAPHQL_ENDPOINT")
            .unwrap_or_else(|_| DEFAULT_GRAPHQL_ENDPOINT.into());
        let env_timeout = parse_env("KEY_GATEWAY_TIMEOUT_SECS", 30u64)?;
        let api_key = non_blank(env::var("NEW_RELIC_API_KEY").ok());

        // --- Merge ---
        Ok(Self {
            host: args.host.unwrap_or(env_host),
            port: args.port.unwrap_or(env_port),
            graphql_endpoint: args.graphql_endpoint.unwrap_or(env_endpoint),
            api_key,
            request_timeout: Duration::from_secs(args.timeout_secs.unwrap_or(env_timeout)),
        })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// A blank credential is treated as no credential.
fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|key| !key.trim().is_empty())
}

fn parse_env<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(value) => value
            .parse::<T>()
            .with_context(|| format!("parsing {} value `{}`", name, value)),
        Err(env::VarError::NotPresent) => Ok(default),
        Err(err) => Err(err).with_context(|| format!("reading {}", name)),
    }
}

// The credential must never reach the logs.
impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("graphql_endpoint", &self.graphql_endpoint)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}
