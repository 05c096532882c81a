//! Static per-module field metadata.
//!
//! One entry per module type, fixed at compile time. The `all` list is the
//! backend's canonical column order; export field selection is validated
//! against it.

use rex_model::ModuleType;

use crate::validator::RuleSet;

/// Field lists for one module type.
#[derive(Debug, Clone, Copy)]
pub struct FieldCatalogEntry {
    pub module: ModuleType,
    pub required: &'static [&'static str],
    pub optional: &'static [&'static str],
    /// Every exportable field, in canonical column order.
    pub all: &'static [&'static str],
}

impl FieldCatalogEntry {
    /// True when `field` is one of this module's exportable fields.
    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.all.iter().any(|f| *f == field)
    }
}

static CAMERA: FieldCatalogEntry = FieldCatalogEntry {
    module: ModuleType::Camera,
    required: &["name", "type"],
    optional: &["ipAddress", "location", "isActive", "description"],
    all: &["id", "name", "type", "ipAddress", "location", "isActive", "description"],
};

static ROBOT: FieldCatalogEntry = FieldCatalogEntry {
    module: ModuleType::Robot,
    required: &["name", "model"],
    optional: &["serialNumber", "manufacturer", "isActive", "description"],
    all: &["id", "name", "model", "serialNumber", "manufacturer", "isActive", "description"],
};

static TASK: FieldCatalogEntry = FieldCatalogEntry {
    module: ModuleType::Task,
    required: &["name", "type"],
    optional: &["priority", "status", "assignedTo", "dueDate", "isActive", "description"],
    all: &[
        "id", "name", "type", "priority", "status", "assignedTo", "dueDate", "isActive",
        "description",
    ],
};

static USER: FieldCatalogEntry = FieldCatalogEntry {
    module: ModuleType::User,
    required: &["username", "email"],
    optional: &["firstName", "lastName", "role", "department", "isActive"],
    all: &["id", "username", "email", "firstName", "lastName", "role", "department", "isActive"],
};

static MAP: FieldCatalogEntry = FieldCatalogEntry {
    module: ModuleType::Map,
    required: &["name", "type"],
    optional: &["resolution", "width", "height", "originX", "originY", "isActive", "description"],
    all: &[
        "id", "name", "type", "resolution", "width", "height", "originX", "originY", "isActive",
        "description",
    ],
};

/// Pure lookup over the static field tables.
pub struct FieldCatalog;

impl FieldCatalog {
    /// Field lists for the given module.
    #[must_use]
    pub fn entry(module: ModuleType) -> &'static FieldCatalogEntry {
        match module {
            ModuleType::Camera => &CAMERA,
            ModuleType::Robot => &ROBOT,
            ModuleType::Task => &TASK,
            ModuleType::User => &USER,
            ModuleType::Map => &MAP,
        }
    }

    /// Validation rules for a field name, where the catalog defines any.
    ///
    /// Rules are keyed by field name across modules; fields without an
    /// entry carry no client-side constraints.
    #[must_use]
    pub fn rules_for(field: &str) -> Option<RuleSet> {
        let rules = match field {
            "email" => RuleSet::new().required().email(),
            "name" => RuleSet::new().required().min_length(2).max_length(100),
            "description" => RuleSet::new().max_length(1000),
            "priority" => RuleSet::new().integer().min(1.0).max(10.0),
            "resolution" => RuleSet::new().number().positive(),
            "width" | "height" => RuleSet::new().integer().positive(),
            _ => return None,
        };
        Some(rules)
    }
}
