//! Field catalog and client-side value validation.
//!
//! The catalog is static per-module metadata (required/optional/all field
//! lists plus per-field validation rules) loaded into the binary at compile
//! time and exposed as pure lookups. The validator is a set of stateless
//! checks that evaluate a single value against a declarative rule set.

pub mod catalog;
pub mod validator;

pub use catalog::{FieldCatalog, FieldCatalogEntry};
pub use validator::{RuleSet, validate_field};
