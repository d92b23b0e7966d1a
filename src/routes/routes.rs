//! Defines routes for the key management facade.
//!
//! ## Structure
//! - **Key endpoints**
//!   - `POST /create-insert-key` — create an ingest key through NerdGraph
//!   - `POST /delete-key`        — delete an ingest or user key
//!
//! - **Probes**
//!   - `GET /healthz`, `GET /readyz`

use crate::{
    handlers::{
        health_handlers::{healthz, readyz},
        key_handlers::{create_insert_key, delete_key},
    },
    services::key_service::KeyService,
};
use axum::{
    Router,
    routing::{get, post},
};

/// Build the router. Handlers share `KeyService` as state.
pub fn routes() -> Router<KeyService> {
    Router::new()
        // health endpoints (mounted at root)
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .route("/create-insert-key", post(create_insert_key))
        .route("/delete-key", post(delete_key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::graphql_client::{GraphQlClient, test_support::fake_upstream};
    use axum::{
        body::Body,
        http::{Request, StatusCode, header},
    };
    use serde_json::{Value, json};
    use std::time::Duration;
    use tower::ServiceExt;

    async fn app_with_upstream(reply: Value) -> Router {
        let (endpoint, _) = fake_upstream(StatusCode::OK, reply).await;
        let client = GraphQlClient::new(endpoint, "NRAK-TEST", Duration::from_secs(5)).unwrap();
        routes().with_state(KeyService::new(Some(client)))
    }

    async fn send(app: Router, method: &str, uri: &str, body: &str) -> (StatusCode, Value) {
        send_as(app, method, uri, "application/json", body).await
    }

    async fn send_as(
        app: Router,
        method: &str,
        uri: &str,
        content_type: &str,
        body: &str,
    ) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, content_type)
            .body(Body::from(body.to_owned()))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    #[tokio::test]
    async fn create_insert_key_relays_created_key() {
        let app = app_with_upstream(json!({
            "data": { "apiAccessCreateKeys": {
                "createdKeys": [{
                    "id": "NEW-1", "key": "eu01xxSECRET", "name": "edge",
                    "notes": "n", "type": "INGEST", "ingestType": "LICENSE"
                }],
                "errors": []
            }}
        }))
        .await;

        let (status, body) = send(
            app,
            "POST",
            "/create-insert-key",
            r#"{"account_id": 12, "name": "edge", "notes": "n", "ingestType": "LICENSE"}"#,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["insert_key"]["id"], "NEW-1");
        assert_eq!(body["insert_key"]["ingestType"], "LICENSE");
    }

    #[tokio::test]
    async fn json_body_is_accepted_with_form_content_type() {
        let app = app_with_upstream(json!({
            "data": { "apiAccessCreateKeys": {
                "createdKeys": [{ "id": "NEW-2", "type": "INGEST", "ingestType": "BROWSER" }],
                "errors": []
            }}
        }))
        .await;

        let (status, body) = send_as(
            app,
            "POST",
            "/create-insert-key",
            "application/x-www-form-urlencoded",
            r#"{"account_id": 12, "name": "edge", "ingestType": "BROWSER"}"#,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["insert_key"]["id"], "NEW-2");
    }

    #[tokio::test]
    async fn malformed_json_is_bad_request() {
        let app = app_with_upstream(json!({})).await;

        let (status, body) = send(app, "POST", "/create-insert-key", "{not json").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid JSON request body");
    }

    #[tokio::test]
    async fn wrong_shape_is_bad_request() {
        let app = app_with_upstream(json!({})).await;

        let (status, _) = send(
            app,
            "POST",
            "/create-insert-key",
            r#"{"account_id": "twelve", "name": "edge", "ingestType": "LICENSE"}"#,
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn missing_credential_is_unauthorized() {
        let app = routes().with_state(KeyService::new(None));

        let (status, body) = send(
            app,
            "POST",
            "/create-insert-key",
            r#"{"account_id": 12, "name": "edge", "ingestType": "BROWSER"}"#,
        )
        .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Missing NEW_RELIC_API_KEY");
    }

    #[tokio::test]
    async fn missing_credential_is_checked_before_body() {
        let (status, _) = send(
            routes().with_state(KeyService::new(None)),
            "POST",
            "/create-insert-key",
            "{not json",
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) = send(
            routes().with_state(KeyService::new(None)),
            "POST",
            "/delete-key",
            r#"{"key_id": ""}"#,
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn delete_key_relays_deleted_id() {
        let app = app_with_upstream(json!({
            "data": { "apiAccessDeleteKeys": { "deletedKeys": [{ "id": "OLD-1" }], "errors": [] } }
        }))
        .await;

        let (status, body) = send(app, "POST", "/delete-key", r#"{"key_id": "OLD-1"}"#).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["deleted_key"]["id"], "OLD-1");
    }

    #[tokio::test]
    async fn blank_key_id_is_bad_request() {
        let app = app_with_upstream(json!({})).await;

        let (status, body) = send(app, "POST", "/delete-key", r#"{"key_id": ""}"#).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["details"], "key_id must not be empty");
    }

    #[tokio::test]
    async fn health_endpoints_report_status() {
        let (status, body) = send(
            routes().with_state(KeyService::new(None)),
            "GET",
            "/readyz",
            "",
        )
        .await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["checks"]["credential"]["ok"], false);

        let (status, body) = send(app_with_upstream(json!({})).await, "GET", "/readyz", "").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["checks"]["credential"]["ok"], true);

        let app = app_with_upstream(json!({})).await;
        let (status, body) = send(app, "GET", "/healthz", "").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }
}
