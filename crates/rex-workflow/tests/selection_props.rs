#![allow(missing_docs)]

//! Property checks for the file guard and the export field selection.

use proptest::prelude::*;

use rex_model::ModuleType;
use rex_validate::FieldCatalog;
use rex_workflow::{ExportRequestBuilder, FileGuard, FileGuardError, ImportWorkflow};

const GUARD_MAX: u64 = 1024 * 1024;

fn any_module() -> impl Strategy<Value = ModuleType> {
    prop::sample::select(ModuleType::ALL.to_vec())
}

proptest! {
    #[test]
    fn any_oversized_file_is_rejected_before_the_workflow(extra in 1usize..2048) {
        let guard = FileGuard::new([".csv"], GUARD_MAX);
        let mut workflow = ImportWorkflow::with_guard(ModuleType::Robot, guard);
        let content = vec![0u8; GUARD_MAX as usize + extra];
        let err = workflow.select_file("data.csv", content).unwrap_err();
        prop_assert_eq!(err.to_string(), "File size exceeds 1MB limit");
        prop_assert!(workflow.candidate().is_none());
    }

    #[test]
    fn any_unlisted_extension_is_rejected(ext in "[a-z]{1,4}") {
        prop_assume!(![".csv", ".xlsx", ".xls", ".json"].contains(&format!(".{ext}").as_str()));
        let guard = FileGuard::default();
        let err = guard.accept(&format!("data.{ext}"), vec![1]).unwrap_err();
        prop_assert!(
            matches!(err, FileGuardError::UnsupportedFormat { .. }),
            "unexpected error: {err:?}"
        );
    }

    #[test]
    fn select_all_matches_the_catalog_exactly(module in any_module()) {
        let mut builder = ExportRequestBuilder::new(module);
        builder.select_all();
        let request = builder.build();
        let catalog: Vec<&str> = FieldCatalog::entry(module).all.to_vec();
        prop_assert_eq!(request.fields.len(), catalog.len());
        for (selected, expected) in request.fields.iter().zip(catalog) {
            prop_assert_eq!(selected.as_str(), expected);
        }
    }

    #[test]
    fn toggling_keeps_fields_a_duplicate_free_subset(
        module in any_module(),
        picks in prop::collection::vec(0usize..16, 0..40),
    ) {
        let entry = FieldCatalog::entry(module);
        let mut builder = ExportRequestBuilder::new(module);
        for pick in picks {
            let field = entry.all[pick % entry.all.len()];
            builder.toggle_field(field).unwrap();
        }
        let request = builder.build();
        for field in &request.fields {
            prop_assert!(entry.contains(field));
            prop_assert_eq!(request.fields.iter().filter(|f| *f == field).count(), 1);
        }
    }
}
