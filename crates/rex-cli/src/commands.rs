//! Subcommand implementations.

use std::fs;
use std::path::Path;

use anyhow::{Context, bail};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use rex_model::{ImportOptions, ModuleType, SortOrder};
use rex_transfer::{Transfer, TransferClient};
use rex_workflow::{
    DEFAULT_ACCEPTED_EXTENSIONS, Disposition, ExportRequestBuilder, FileGuard, ImportWorkflow,
    PermissionGate,
};

use crate::cli::{ExportArgs, FieldsArgs, ImportArgs, TemplateArgs};
use crate::summary;

/// Load session grants from a JSON file, or allow everything when the
/// operator did not provide one.
pub fn load_permission_gate(path: Option<&Path>) -> anyhow::Result<PermissionGate> {
    match path {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("reading permissions file {}", path.display()))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("parsing permissions file {}", path.display()))
        }
        None => Ok(PermissionGate::allow_all()),
    }
}

pub async fn run_import(
    args: &ImportArgs,
    api_url: &str,
    gate: &PermissionGate,
) -> anyhow::Result<i32> {
    let module = ModuleType::from(args.module);
    if !gate.can_import(module) {
        bail!("permission denied: import is not allowed for module {module}");
    }

    let guard = match args.max_size_mb {
        Some(mb) => FileGuard::new(DEFAULT_ACCEPTED_EXTENSIONS.iter().copied(), mb * 1024 * 1024),
        None => FileGuard::default(),
    };
    let mut workflow = ImportWorkflow::with_guard(module, guard);
    workflow.set_options(ImportOptions {
        validate_only: args.validate_only,
        skip_errors: args.skip_errors,
    })?;

    let content = fs::read(&args.file)
        .with_context(|| format!("reading {}", args.file.display()))?;
    let file_name = args
        .file
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("upload.dat")
        .to_string();
    workflow.select_file(&file_name, content)?;

    let client = TransferClient::new(api_url)?;
    let bar = upload_bar();
    let bar_handle = bar.clone();
    let on_progress = move |pct: u8| bar_handle.set_position(u64::from(pct));
    let outcome = workflow.submit(&client, Some(&on_progress)).await?.clone();
    bar.finish_and_clear();

    summary::print_import_summary(module, &outcome);
    Ok(match Disposition::of(outcome.status) {
        Disposition::Favorable => 0,
        Disposition::Partial | Disposition::Failed => 1,
    })
}

pub async fn run_export(
    args: &ExportArgs,
    api_url: &str,
    gate: &PermissionGate,
) -> anyhow::Result<i32> {
    let module = ModuleType::from(args.module);
    if !gate.can_export(module) {
        bail!("permission denied: export is not allowed for module {module}");
    }

    let mut builder = ExportRequestBuilder::new(module);
    builder.set_format(args.format.into());
    if args.fields.is_empty() {
        builder.select_all();
    } else {
        for field in &args.fields {
            builder.set_field(field, true)?;
        }
    }
    builder.set_sort_by(args.sort_by.as_deref())?;
    if args.desc {
        builder.set_sort_order(SortOrder::Desc);
    }
    builder
        .set_filter(args.filter.clone())
        .set_include_inactive(args.include_inactive);
    let request = builder.build();

    let client = TransferClient::new(api_url)?;
    let file = client.export(&request).await?;
    let path = args.output_dir.join(&file.file_name);
    fs::write(&path, &file.data).with_context(|| format!("writing {}", path.display()))?;
    info!(path = %path.display(), bytes = file.data.len(), "export written");

    summary::print_export_summary(&file.export_outcome(), &path);
    Ok(0)
}

pub async fn run_template(
    args: &TemplateArgs,
    api_url: &str,
    gate: &PermissionGate,
) -> anyhow::Result<i32> {
    let module = ModuleType::from(args.module);
    if !gate.can_download_template(module) {
        bail!("permission denied: template download is not allowed for module {module}");
    }

    let client = TransferClient::new(api_url)?;
    let file = client.download_template(module, args.format.into()).await?;
    let path = args.output_dir.join(&file.file_name);
    fs::write(&path, &file.data).with_context(|| format!("writing {}", path.display()))?;

    summary::print_template_summary(&file, &path);
    Ok(0)
}

pub fn run_fields(args: &FieldsArgs) -> i32 {
    summary::print_field_catalog(ModuleType::from(args.module));
    0
}

fn upload_bar() -> ProgressBar {
    let bar = ProgressBar::new(100);
    bar.set_style(
        ProgressStyle::with_template("{bar:40} {pos}% {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    bar.set_message("uploading");
    bar
}
