//! GraphQL mutation templates for NerdGraph key management.
//!
//! User-supplied strings only ever enter a template through
//! [`graphql_string`], so a name or note can't close the literal and inject
//! extra arguments.

use crate::models::{delete_key::DeleteKeyRequest, insert_key::InsertKeyRequest};
use std::fmt::Write as _;

/// Build the `apiAccessCreateKeys` mutation for a single ingest key.
pub fn create_ingest_key(req: &InsertKeyRequest) -> String {
    format!(
        r#"mutation {{
  apiAccessCreateKeys(
    keys: {{
      ingest: {{
        accountId: {account_id}
        ingestType: {ingest_type}
        name: {name}
        notes: {notes}
      }}
    }}
  ) {{
    createdKeys {{
      id
      key
      name
      notes
      type
      ... on ApiAccessIngestKey {{
        ingestType
      }}
    }}
    errors {{
      message
      type
      ... on ApiAccessIngestKeyError {{
        accountId
        errorType
        ingestType
      }}
    }}
  }}
}}"#,
        account_id = req.account_id,
        ingest_type = req.ingest_type.as_str(),
        name = graphql_string(&req.name),
        notes = graphql_string(&req.notes),
    )
}

/// Build the `apiAccessDeleteKeys` mutation for a single key.
pub fn delete_keys(req: &DeleteKeyRequest) -> String {
    format!(
        r#"mutation {{
  apiAccessDeleteKeys(keys: {{ {field}: [{id}] }}) {{
    deletedKeys {{
      id
    }}
    errors {{
      message
      type
    }}
  }}
}}"#,
        field = req.key_type.id_list_field(),
        id = graphql_string(&req.key_id),
    )
}

/// Render `value` as a quoted GraphQL string literal.
pub fn graphql_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for ch in value.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0C}' => out.push_str("\\f"),
            c if c.is_control() => {
                let _ = write!(out, "\\u{:04X}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
