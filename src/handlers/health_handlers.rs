//! Health & readiness handlers.
//!
//! - GET /healthz  -> simple liveness ("ok")
//! - GET /readyz   -> readiness that checks an upstream credential is configured

use crate::services::key_service::{KeyService, MISSING_API_KEY};
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use std::collections::HashMap;

/// `GET /healthz`
///
/// Always returns 200 OK with a plain JSON body. Never performs I/O.
pub async fn healthz() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "ok".into(),
        }),
    )
}

/// `GET /readyz`
///
/// HTTP 200 when the service can call upstream, HTTP 503 otherwise. The
/// upstream itself is not contacted.
pub async fn readyz(State(service): State<KeyService>) -> impl IntoResponse {
    let credential_ok = service.has_credential();

    let mut checks = HashMap::new();
    checks.insert(
        "credential",
        CheckStatus {
            ok: credential_ok,
            error: (!credential_ok).then(|| MISSING_API_KEY.to_string()),
        },
    );

    let body = ReadyResponse {
        status: if credential_ok {
            "ok".into()
        } else {
            "error".into()
        },
        checks,
    };

    let status = if credential_ok {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(body))
}

#[derive(Serialize)]
struct HealthResponse {
    status: String,
}

#[derive(Serialize)]
struct ReadyResponse {
    status: String,
    checks: HashMap<&'static str, CheckStatus>,
}

#[derive(Serialize)]
struct CheckStatus {
    ok: bool,
    error: Option<String>,
}
