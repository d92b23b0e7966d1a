//! KeyService — turns REST key requests into NerdGraph mutations and maps
//! the mutation payloads onto HTTP outcomes.
//!
//! Outcome ladder, shared by both operations:
//! - no credential configured → 401
//! - transport or GraphQL failure → 500 with the failure as details
//! - payload `errors` non-empty → 400 with the errors as details
//! - at least one key in the payload → 200 with the first key
//! - otherwise → 500

use crate::{
    errors::AppError,
    models::{
        delete_key::{DeleteKeyRequest, DeleteKeysData, DeletedKey},
        insert_key::{CreateKeysData, CreatedKey, InsertKeyRequest},
    },
    services::{
        graphql_client::{GraphQlClient, GraphQlError},
        mutations,
    },
};
use serde_json::json;
use std::sync::Arc;

pub const MISSING_API_KEY: &str = "Missing NEW_RELIC_API_KEY";

#[derive(Clone)]
pub struct KeyService {
    /// `None` when the process started without a credential.
    client: Option<Arc<GraphQlClient>>,
}

impl KeyService {
    pub fn new(client: Option<GraphQlClient>) -> Self {
        Self {
            client: client.map(Arc::new),
        }
    }

    pub fn has_credential(&self) -> bool {
        self.client.is_some()
    }

    /// Fail with 401 when the process started without a credential.
    pub fn require_credential(&self) -> Result<(), AppError> {
        self.client().map(|_| ())
    }

    fn client(&self) -> Result<&GraphQlClient, AppError> {
        self.client
            .as_deref()
            .ok_or_else(|| AppError::unauthorized(MISSING_API_KEY))
    }

    /// Create one ingest key and return it as NerdGraph reported it.
    pub async fn create_ingest_key(&self, req: &InsertKeyRequest) -> Result<CreatedKey, AppError> {
        let client = self.client()?;
        let mutation = mutations::create_ingest_key(req);

        tracing::info!(
            account_id = req.account_id,
            ingest_type = req.ingest_type.as_str(),
            "Creating ingest key"
        );

        let data: CreateKeysData = client
            .execute(&mutation)
            .await
            .map_err(|err| transport_failure("Failed to create insert key", err))?;
        let payload = data.api_access_create_keys;

        if !payload.errors.is_empty() {
            tracing::warn!(count = payload.errors.len(), "Key creation rejected upstream");
            return Err(AppError::bad_request("API returned an error").with_details(json!(payload.errors)));
        }

        let key = payload
            .created_keys
            .into_iter()
            .next()
            .ok_or_else(|| AppError::internal("No key was created"))?;

        tracing::info!(key_id = %key.id, "Ingest key created");
        Ok(key)
    }

    /// Delete one key and return the id NerdGraph confirmed.
    pub async fn delete_key(&self, req: &DeleteKeyRequest) -> Result<DeletedKey, AppError> {
        let client = self.client()?;
        let mutation = mutations::delete_keys(req);

        tracing::info!(key_id = %req.key_id, key_type = ?req.key_type, "Deleting key");

        let data: DeleteKeysData = client
            .execute(&mutation)
            .await
            .map_err(|err| transport_failure("Failed to delete key", err))?;
        let payload = data.api_access_delete_keys;

        if !payload.errors.is_empty() {
            tracing::warn!(count = payload.errors.len(), "Key deletion rejected upstream");
            return Err(AppError::bad_request("API returned an error").with_details(json!(payload.errors)));
        }

        payload
            .deleted_keys
            .into_iter()
            .next()
            .ok_or_else(|| AppError::internal("No key was deleted"))
    }
}

fn transport_failure(message: &str, err: GraphQlError) -> AppError {
    tracing::error!(error = %err, "{}", message);
    let details = match &err {
        GraphQlError::Upstream(errors) => json!(errors),
        other => json!(other.to_string()),
    };
    AppError::internal(message).with_details(details)
}
