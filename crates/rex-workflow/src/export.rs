//! Export request assembly.
//!
//! Exports have no multi-step workflow, only a single request/response.
//! The builder tracks user selections and guarantees the invariant that
//! selected fields are a subset of the module's catalog fields. Manual
//! toggles keep insertion order (which governs column order in the
//! delivered file); select-all uses catalog order.

use thiserror::Error;

use rex_model::{ExportRequest, FileFormat, ModuleType, SortOrder};
use rex_validate::FieldCatalog;

/// Errors from invalid export selections.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ExportBuildError {
    #[error("unknown field `{field}` for module {module}")]
    UnknownField { module: ModuleType, field: String },
}

/// Assembles an [`ExportRequest`] from user selections.
#[derive(Debug, Clone)]
pub struct ExportRequestBuilder {
    module: ModuleType,
    format: FileFormat,
    fields: Vec<String>,
    filter: String,
    sort_by: Option<String>,
    sort_order: SortOrder,
    include_inactive: bool,
}

impl ExportRequestBuilder {
    /// Start a request with the defaults: CSV, no fields selected, no
    /// filter, unsorted (ascending when a sort field is chosen), active
    /// records only.
    #[must_use]
    pub fn new(module: ModuleType) -> Self {
        Self {
            module,
            format: FileFormat::default(),
            fields: Vec::new(),
            filter: String::new(),
            sort_by: None,
            sort_order: SortOrder::default(),
            include_inactive: false,
        }
    }

    #[must_use]
    pub fn module(&self) -> ModuleType {
        self.module
    }

    /// Currently selected fields, in selection order.
    #[must_use]
    pub fn selected_fields(&self) -> &[String] {
        &self.fields
    }

    pub fn set_format(&mut self, format: FileFormat) -> &mut Self {
        self.format = format;
        self
    }

    /// Select every catalog field, in catalog order.
    pub fn select_all(&mut self) -> &mut Self {
        self.fields = FieldCatalog::entry(self.module)
            .all
            .iter()
            .map(|field| (*field).to_string())
            .collect();
        self
    }

    pub fn clear_fields(&mut self) -> &mut Self {
        self.fields.clear();
        self
    }

    /// Flip one field in or out of the selection. Returns whether the
    /// field is selected afterwards. Remaining selections keep their
    /// order.
    pub fn toggle_field(&mut self, field: &str) -> Result<bool, ExportBuildError> {
        self.ensure_known(field)?;
        if let Some(index) = self.fields.iter().position(|f| f == field) {
            self.fields.remove(index);
            Ok(false)
        } else {
            self.fields.push(field.to_string());
            Ok(true)
        }
    }

    /// Set a field's selection state explicitly (checkbox semantics).
    pub fn set_field(&mut self, field: &str, selected: bool) -> Result<(), ExportBuildError> {
        self.ensure_known(field)?;
        let position = self.fields.iter().position(|f| f == field);
        match (position, selected) {
            (None, true) => self.fields.push(field.to_string()),
            (Some(index), false) => {
                self.fields.remove(index);
            }
            _ => {}
        }
        Ok(())
    }

    /// Raw filter predicate, passed to the server opaquely.
    pub fn set_filter(&mut self, filter: impl Into<String>) -> &mut Self {
        self.filter = filter.into();
        self
    }

    /// Choose the sort field, or `None` for the server's default order.
    pub fn set_sort_by(&mut self, field: Option<&str>) -> Result<(), ExportBuildError> {
        if let Some(field) = field {
            self.ensure_known(field)?;
            self.sort_by = Some(field.to_string());
        } else {
            self.sort_by = None;
        }
        Ok(())
    }

    pub fn set_sort_order(&mut self, order: SortOrder) -> &mut Self {
        self.sort_order = order;
        self
    }

    pub fn set_include_inactive(&mut self, include: bool) -> &mut Self {
        self.include_inactive = include;
        self
    }

    /// Assemble the request. Field membership was validated at selection
    /// time, so this cannot fail.
    #[must_use]
    pub fn build(&self) -> ExportRequest {
        ExportRequest {
            module_type: self.module,
            file_format: self.format,
            fields: self.fields.clone(),
            filter: self.filter.clone(),
            sort_by: self.sort_by.clone(),
            sort_order: self.sort_order,
            include_inactive: self.include_inactive,
        }
    }

    fn ensure_known(&self, field: &str) -> Result<(), ExportBuildError> {
        if FieldCatalog::entry(self.module).contains(field) {
            Ok(())
        } else {
            Err(ExportBuildError::UnknownField {
                module: self.module,
                field: field.to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_csv_ascending_unsorted() {
        let request = ExportRequestBuilder::new(ModuleType::Camera).build();
        assert_eq!(request.file_format, FileFormat::Csv);
        assert_eq!(request.sort_order, SortOrder::Asc);
        assert_eq!(request.sort_by, None);
        assert!(request.fields.is_empty());
        assert!(!request.include_inactive);
    }

    #[test]
    fn select_all_uses_catalog_order() {
        let mut builder = ExportRequestBuilder::new(ModuleType::User);
        builder.select_all();
        let request = builder.build();
        let expected: Vec<String> = FieldCatalog::entry(ModuleType::User)
            .all
            .iter()
            .map(|f| (*f).to_string())
            .collect();
        assert_eq!(request.fields, expected);
    }

    #[test]
    fn toggles_preserve_insertion_order() {
        let mut builder = ExportRequestBuilder::new(ModuleType::User);
        builder.toggle_field("email").unwrap();
        builder.toggle_field("id").unwrap();
        builder.toggle_field("username").unwrap();
        // Deselecting does not reorder the remaining selections.
        builder.toggle_field("id").unwrap();
        assert_eq!(builder.selected_fields(), ["email", "username"]);
    }

    #[test]
    fn unknown_field_is_rejected() {
        let mut builder = ExportRequestBuilder::new(ModuleType::Camera);
        let err = builder.toggle_field("serialNumber").unwrap_err();
        assert_eq!(
            err,
            ExportBuildError::UnknownField {
                module: ModuleType::Camera,
                field: "serialNumber".to_string(),
            }
        );
        assert!(builder.set_sort_by(Some("nope")).is_err());
    }

    #[test]
    fn set_field_is_idempotent() {
        let mut builder = ExportRequestBuilder::new(ModuleType::Robot);
        builder.set_field("name", true).unwrap();
        builder.set_field("name", true).unwrap();
        assert_eq!(builder.selected_fields(), ["name"]);
        builder.set_field("name", false).unwrap();
        builder.set_field("name", false).unwrap();
        assert!(builder.selected_fields().is_empty());
    }

    #[test]
    fn sort_and_filter_flow_into_request() {
        let mut builder = ExportRequestBuilder::new(ModuleType::Task);
        builder.set_sort_by(Some("dueDate")).unwrap();
        builder
            .set_sort_order(SortOrder::Desc)
            .set_filter("status = 'OPEN'")
            .set_include_inactive(true)
            .set_format(FileFormat::Xlsx);
        let request = builder.build();
        assert_eq!(request.sort_by.as_deref(), Some("dueDate"));
        assert_eq!(request.sort_order, SortOrder::Desc);
        assert_eq!(request.filter, "status = 'OPEN'");
        assert!(request.include_inactive);
        assert_eq!(request.file_format, FileFormat::Xlsx);
    }
}
