//! Closed enums shared across the workspace.
//!
//! The backend keys its routes and payloads by lowercase module names and
//! upper-case status/sort tokens; the serde renames below pin those exact
//! spellings.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Record domain a workflow operates over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleType {
    Camera,
    Robot,
    Task,
    User,
    Map,
}

impl ModuleType {
    /// All module types, in display order.
    pub const ALL: [ModuleType; 5] = [
        ModuleType::Camera,
        ModuleType::Robot,
        ModuleType::Task,
        ModuleType::User,
        ModuleType::Map,
    ];

    /// Lowercase name as used in API routes and file names.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ModuleType::Camera => "camera",
            ModuleType::Robot => "robot",
            ModuleType::Task => "task",
            ModuleType::User => "user",
            ModuleType::Map => "map",
        }
    }
}

impl fmt::Display for ModuleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModuleType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "camera" => Ok(ModuleType::Camera),
            "robot" => Ok(ModuleType::Robot),
            "task" => Ok(ModuleType::Task),
            "user" => Ok(ModuleType::User),
            "map" => Ok(ModuleType::Map),
            other => Err(ModelError::UnknownModule(other.to_string())),
        }
    }
}

/// File format for exports and templates.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum FileFormat {
    #[default]
    Csv,
    Xlsx,
    Json,
}

impl FileFormat {
    /// File extension without the leading dot.
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            FileFormat::Csv => "csv",
            FileFormat::Xlsx => "xlsx",
            FileFormat::Json => "json",
        }
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for FileFormat {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(FileFormat::Csv),
            "xlsx" => Ok(FileFormat::Xlsx),
            "json" => Ok(FileFormat::Json),
            other => Err(ModelError::UnknownFormat(other.to_string())),
        }
    }
}

/// Terminal status reported for an import or export run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OutcomeStatus {
    /// Records were imported (or exported) successfully.
    Success,
    /// The request failed outright; the message carries the cause.
    Error,
    /// The server accepted the request but reported per-row failures.
    ValidationErrors,
    /// Validate-only run finished with no failures.
    Valid,
}

impl OutcomeStatus {
    /// True for the favorable terminal states.
    #[must_use]
    pub fn is_favorable(self) -> bool {
        matches!(self, OutcomeStatus::Success | OutcomeStatus::Valid)
    }
}

/// Sort direction for export requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// Action a user may be granted on a module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Import,
    Export,
    Template,
}

impl Action {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Action::Import => "import",
            Action::Export => "export",
            Action::Template => "template",
        }
    }
}

impl FromStr for Action {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "import" => Ok(Action::Import),
            "export" => Ok(Action::Export),
            "template" => Ok(Action::Template),
            other => Err(ModelError::UnknownAction(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn module_round_trips_through_str() {
        for module in ModuleType::ALL {
            assert_eq!(module.as_str().parse::<ModuleType>().unwrap(), module);
        }
        assert!("drone".parse::<ModuleType>().is_err());
    }

    #[test]
    fn status_uses_screaming_snake_on_the_wire() {
        let json = serde_json::to_string(&OutcomeStatus::ValidationErrors).unwrap();
        assert_eq!(json, "\"VALIDATION_ERRORS\"");
        let status: OutcomeStatus = serde_json::from_str("\"VALID\"").unwrap();
        assert_eq!(status, OutcomeStatus::Valid);
        assert!(status.is_favorable());
        assert!(!OutcomeStatus::Error.is_favorable());
    }

    #[test]
    fn format_defaults_to_csv() {
        assert_eq!(FileFormat::default(), FileFormat::Csv);
        assert_eq!(FileFormat::Xlsx.extension(), "xlsx");
    }
}
