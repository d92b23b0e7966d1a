//! Key deletion: the REST request and the `apiAccessDeleteKeys` payload.

use super::null_as_empty;
use serde::{Deserialize, Serialize};

/// NerdGraph deletes ingest and user keys through separate id lists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum KeyType {
    #[default]
    Ingest,
    User,
}

impl KeyType {
    /// Argument name inside `ApiAccessDeleteInput`.
    pub fn id_list_field(&self) -> &'static str {
        match self {
            KeyType::Ingest => "ingestKeyIds",
            KeyType::User => "userKeyIds",
        }
    }
}

/// Body of `POST /delete-key`.
#[derive(Debug, Clone, Deserialize)]
pub struct DeleteKeyRequest {
    #[serde(alias = "keyId")]
    pub key_id: String,
    #[serde(default, alias = "keyType")]
    pub key_type: KeyType,
}

impl DeleteKeyRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.key_id.trim().is_empty() {
            return Err("key_id must not be empty".into());
        }
        Ok(())
    }
}

/// `data` of the delete mutation.
#[derive(Debug, Deserialize)]
pub struct DeleteKeysData {
    #[serde(rename = "apiAccessDeleteKeys")]
    pub api_access_delete_keys: DeleteKeysPayload,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteKeysPayload {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub deleted_keys: Vec<DeletedKey>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub errors: Vec<DeleteKeyError>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeletedKey {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteKeyError {
    pub message: String,
    #[serde(rename = "type")]
    pub key_type: Option<String>,
}
