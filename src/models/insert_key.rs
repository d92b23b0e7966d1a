//! Ingest key creation: the REST request and the `apiAccessCreateKeys` payload.

use super::null_as_empty;
use serde::{Deserialize, Serialize};

/// Which ingest key flavour NerdGraph should mint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IngestType {
    License,
    Browser,
}

impl IngestType {
    /// The GraphQL enum literal for this type.
    pub fn as_str(&self) -> &'static str {
        match self {
            IngestType::License => "LICENSE",
            IngestType::Browser => "BROWSER",
        }
    }
}

/// Body of `POST /create-insert-key`.
#[derive(Debug, Clone, Deserialize)]
pub struct InsertKeyRequest {
    pub account_id: i64,
    pub name: String,
    #[serde(default)]
    pub notes: String,
    #[serde(rename = "ingestType", alias = "ingest_type")]
    pub ingest_type: IngestType,
}

impl InsertKeyRequest {
    /// Reject values that decode fine but can never produce a key.
    pub fn validate(&self) -> Result<(), String> {
        if self.account_id <= 0 {
            return Err(format!(
                "account_id must be positive, got {}",
                self.account_id
            ));
        }
        // NerdGraph `Int` is 32-bit.
        if self.account_id > i64::from(i32::MAX) {
            return Err(format!(
                "account_id {} exceeds the largest NerdGraph account id",
                self.account_id
            ));
        }
        if self.name.trim().is_empty() {
            return Err("name must not be empty".into());
        }
        Ok(())
    }
}

/// `data` of the create mutation.
#[derive(Debug, Deserialize)]
pub struct CreateKeysData {
    #[serde(rename = "apiAccessCreateKeys")]
    pub api_access_create_keys: CreateKeysPayload,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateKeysPayload {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub created_keys: Vec<CreatedKey>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub errors: Vec<CreateKeyError>,
}

/// A key as NerdGraph reports it after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedKey {
    pub id: String,
    pub key: Option<String>,
    pub name: Option<String>,
    pub notes: Option<String>,
    #[serde(rename = "type")]
    pub key_type: Option<String>,
    pub ingest_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateKeyError {
    pub message: String,
    #[serde(rename = "type")]
    pub error_type_name: Option<String>,
    pub account_id: Option<i64>,
    pub error_type: Option<String>,
    pub ingest_type: Option<String>,
}
