//! Export-side types: the request body and the client-side outcome.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::enums::{FileFormat, ModuleType, OutcomeStatus, SortOrder};

/// JSON body for `POST /{module}/export`.
///
/// `fields` governs column order in the delivered file and must be a subset
/// of the module's catalog fields; the builder in the workflow crate
/// enforces that before a request is constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRequest {
    pub module_type: ModuleType,
    pub file_format: FileFormat,
    pub fields: Vec<String>,
    /// Raw filter predicate, opaque to the client.
    #[serde(default)]
    pub filter: String,
    /// Empty means unsorted; the server applies its default order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,
    pub sort_order: SortOrder,
    pub include_inactive: bool,
}

/// Client-side summary of a completed export.
///
/// The export endpoint returns only the binary payload, so everything here
/// except the record count is derived locally; the count comes from the
/// `X-Record-Count` response header when the server provides it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportOutcome {
    pub status: OutcomeStatus,
    pub message: String,
    pub file_name: String,
    pub file_size_bytes: u64,
    pub record_count: u64,
    pub exported_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_camel_case() {
        let request = ExportRequest {
            module_type: ModuleType::User,
            file_format: FileFormat::Json,
            fields: vec!["username".to_string(), "email".to_string()],
            filter: String::new(),
            sort_by: None,
            sort_order: SortOrder::Asc,
            include_inactive: false,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["moduleType"], "user");
        assert_eq!(value["fileFormat"], "json");
        assert_eq!(value["sortOrder"], "ASC");
        assert_eq!(value["includeInactive"], false);
        assert_eq!(value["fields"][1], "email");
        assert!(value.get("sortBy").is_none());
    }
}
