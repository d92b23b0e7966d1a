//! HTTP handlers for the two key operations.
//! Each checks the credential, decodes and validates its body, then hands off
//! to `KeyService`. Bodies are decoded as JSON whatever the `Content-Type`.

use crate::{
    errors::AppError,
    models::{
        delete_key::{DeleteKeyRequest, DeletedKey},
        insert_key::{CreatedKey, InsertKeyRequest},
    },
    services::key_service::KeyService,
};
use axum::{Json, body::Bytes, extract::State, http::StatusCode, response::IntoResponse};
use serde::{Serialize, de::DeserializeOwned};

const INVALID_BODY: &str = "Invalid JSON request body";

#[derive(Serialize)]
struct InsertKeyResponse {
    insert_key: CreatedKey,
}

#[derive(Serialize)]
struct DeleteKeyResponse {
    deleted_key: DeletedKey,
}

/// `POST /create-insert-key`
pub async fn create_insert_key(
    State(service): State<KeyService>,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    tracing::info!("Received request to create a new key");
    service.require_credential()?;

    let req: InsertKeyRequest = decode_body(&body)?;
    req.validate()
        .map_err(|reason| AppError::bad_request(INVALID_BODY).with_details(reason))?;

    let key = service.create_ingest_key(&req).await?;
    Ok((StatusCode::OK, Json(InsertKeyResponse { insert_key: key })))
}

/// `POST /delete-key`
pub async fn delete_key(
    State(service): State<KeyService>,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    tracing::info!("Received request to delete a key");
    service.require_credential()?;

    let req: DeleteKeyRequest = decode_body(&body)?;
    req.validate()
        .map_err(|reason| AppError::bad_request(INVALID_BODY).with_details(reason))?;

    let deleted = service.delete_key(&req).await?;
    Ok((StatusCode::OK, Json(DeleteKeyResponse { deleted_key: deleted })))
}

fn decode_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, AppError> {
    serde_json::from_slice(body).map_err(|err| {
        tracing::debug!(error = %err, "Rejected request body");
        AppError::bad_request(INVALID_BODY).with_details(err.to_string())
    })
}
