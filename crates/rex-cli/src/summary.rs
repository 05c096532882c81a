//! Human-facing result rendering.

use std::path::Path;

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use rex_model::{ExportOutcome, ImportOutcome, ModuleType, OutcomeStatus};
use rex_transfer::{DownloadedFile, format_bytes};
use rex_validate::{FieldCatalog, RuleSet};
use rex_workflow::displayed_errors;

pub fn print_import_summary(module: ModuleType, outcome: &ImportOutcome) {
    println!("Import: {module}");
    println!("Status: {} - {}", status_label(outcome.status), outcome.message);

    let mut table = new_table();
    table.set_header(vec![
        header_cell("Total"),
        header_cell("Successful"),
        header_cell("Failed"),
        header_cell("Time (ms)"),
    ]);
    for column in table.column_iter_mut() {
        column.set_cell_alignment(CellAlignment::Right);
    }
    table.add_row(vec![
        Cell::new(outcome.total_records),
        Cell::new(outcome.successful_records).fg(Color::Green),
        Cell::new(outcome.failed_records).fg(if outcome.failed_records > 0 {
            Color::Red
        } else {
            Color::Grey
        }),
        Cell::new(outcome.processing_time_ms),
    ]);
    println!("{table}");

    if !outcome.errors.is_empty() {
        print_error_list(outcome);
    }
}

fn print_error_list(outcome: &ImportOutcome) {
    let (shown, elided) = displayed_errors(outcome);
    let mut table = new_table();
    table.set_header(vec![
        header_cell("Row"),
        header_cell("Field"),
        header_cell("Code"),
        header_cell("Message"),
        header_cell("Value"),
    ]);
    for error in shown {
        table.add_row(vec![
            Cell::new(error.row),
            Cell::new(&error.field),
            Cell::new(&error.error_code).fg(Color::Red),
            Cell::new(&error.error_message),
            Cell::new(error.actual_value.as_deref().unwrap_or("-")),
        ]);
    }
    println!("{table}");
    if elided > 0 {
        println!("... and {elided} more validation errors");
    }
}

pub fn print_export_summary(outcome: &ExportOutcome, path: &Path) {
    println!("Export: {}", outcome.file_name);
    println!("Written to: {}", path.display());
    println!("Size: {}", format_bytes(outcome.file_size_bytes));
    if outcome.record_count > 0 {
        println!("Records: {}", outcome.record_count);
    }
}

pub fn print_template_summary(file: &DownloadedFile, path: &Path) {
    println!("Template: {}", file.file_name);
    println!("Written to: {}", path.display());
    println!("Size: {}", format_bytes(file.data.len() as u64));
}

pub fn print_field_catalog(module: ModuleType) {
    let entry = FieldCatalog::entry(module);
    let mut table = new_table();
    table.set_header(vec![header_cell("Field"), header_cell("Kind"), header_cell("Rules")]);
    for field in entry.all {
        let kind = if entry.required.contains(field) {
            Cell::new("required").fg(Color::Yellow)
        } else if entry.optional.contains(field) {
            Cell::new("optional")
        } else {
            Cell::new("server-assigned").fg(Color::Grey)
        };
        let rules = FieldCatalog::rules_for(field)
            .map(|rules| describe_rules(&rules))
            .unwrap_or_default();
        table.add_row(vec![Cell::new(field), kind, Cell::new(rules)]);
    }
    println!("Fields for {module}:");
    println!("{table}");
}

fn describe_rules(rules: &RuleSet) -> String {
    let mut parts = Vec::new();
    if rules.required {
        parts.push("required".to_string());
    }
    if rules.email {
        parts.push("email".to_string());
    }
    if let Some(min) = rules.min_length {
        parts.push(format!("min length {min}"));
    }
    if let Some(max) = rules.max_length {
        parts.push(format!("max length {max}"));
    }
    if rules.integer {
        parts.push("integer".to_string());
    } else if rules.number {
        parts.push("number".to_string());
    }
    if rules.positive {
        parts.push("positive".to_string());
    }
    if let Some(min) = rules.min {
        parts.push(format!(">= {min}"));
    }
    if let Some(max) = rules.max {
        parts.push(format!("<= {max}"));
    }
    parts.join(", ")
}

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn header_cell(text: &str) -> Cell {
    Cell::new(text).add_attribute(Attribute::Bold)
}

fn status_label(status: OutcomeStatus) -> &'static str {
    match status {
        OutcomeStatus::Success => "SUCCESS",
        OutcomeStatus::Error => "ERROR",
        OutcomeStatus::ValidationErrors => "VALIDATION ERRORS",
        OutcomeStatus::Valid => "VALID",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rule_descriptions_are_compact() {
        let rules = FieldCatalog::rules_for("priority").unwrap();
        assert_eq!(describe_rules(&rules), "integer, >= 1, <= 10");
        let rules = FieldCatalog::rules_for("name").unwrap();
        assert_eq!(describe_rules(&rules), "required, min length 2, max length 100");
    }
}
