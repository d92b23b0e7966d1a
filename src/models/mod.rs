//! Request and response shapes for the key management endpoints.
//!
//! Requests are decoded from the REST callers; payloads mirror what NerdGraph
//! returns for `apiAccessCreateKeys` and `apiAccessDeleteKeys` and are
//! serialized back unchanged.

use serde::{Deserialize, Deserializer};

pub mod delete_key;
pub mod insert_key;

/// NerdGraph returns `null` instead of an empty list in some error paths.
pub(crate) fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
