//! CLI argument definitions for the record exchange console.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use rex_model::{FileFormat, ModuleType};

#[derive(Parser)]
#[command(
    name = "rex",
    version,
    about = "Record exchange console - import and export operator records",
    long_about = "Import and export operator records (cameras, robots, tasks, users, maps)\n\
                  against the backend REST API. Supports CSV, Excel, and JSON files,\n\
                  server-side validation runs, and sample template downloads."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Backend API base URL.
    #[arg(
        long = "api-url",
        value_name = "URL",
        env = "REX_API_URL",
        default_value = "http://localhost:8080/api",
        global = true
    )]
    pub api_url: String,

    /// Session permission grants: JSON map of module to allowed actions.
    /// Every action is allowed when omitted.
    #[arg(long = "permissions", value_name = "PATH", global = true)]
    pub permissions: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Import records from a CSV, Excel, or JSON file.
    Import(ImportArgs),

    /// Export records into a delivered file.
    Export(ExportArgs),

    /// Download a sample template showing the expected columns.
    Template(TemplateArgs),

    /// List the field catalog for a module.
    Fields(FieldsArgs),
}

#[derive(Parser)]
pub struct ImportArgs {
    /// Module to import into.
    #[arg(value_enum)]
    pub module: ModuleArg,

    /// File to upload.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Run all checks without persisting records.
    #[arg(long = "validate-only")]
    pub validate_only: bool,

    /// Continue processing past row-level failures instead of aborting.
    #[arg(long = "skip-errors")]
    pub skip_errors: bool,

    /// Override the upload size limit in MB (default 10).
    #[arg(long = "max-size-mb", value_name = "MB")]
    pub max_size_mb: Option<u64>,
}

#[derive(Parser)]
pub struct ExportArgs {
    /// Module to export from.
    #[arg(value_enum)]
    pub module: ModuleArg,

    /// Delivered file format.
    #[arg(long, value_enum, default_value = "csv")]
    pub format: FormatArg,

    /// Fields to include, comma-separated, in column order.
    /// All catalog fields when omitted.
    #[arg(long, value_delimiter = ',', value_name = "FIELD")]
    pub fields: Vec<String>,

    /// Raw filter predicate, passed to the server opaquely.
    #[arg(long, default_value = "")]
    pub filter: String,

    /// Field to sort by (server default order when omitted).
    #[arg(long = "sort-by", value_name = "FIELD")]
    pub sort_by: Option<String>,

    /// Sort descending instead of ascending.
    #[arg(long)]
    pub desc: bool,

    /// Include inactive records.
    #[arg(long = "include-inactive")]
    pub include_inactive: bool,

    /// Directory to write the delivered file into.
    #[arg(long = "output-dir", value_name = "DIR", default_value = ".")]
    pub output_dir: PathBuf,
}

#[derive(Parser)]
pub struct TemplateArgs {
    /// Module whose template to download.
    #[arg(value_enum)]
    pub module: ModuleArg,

    /// Template file format.
    #[arg(long, value_enum, default_value = "csv")]
    pub format: FormatArg,

    /// Directory to write the template into.
    #[arg(long = "output-dir", value_name = "DIR", default_value = ".")]
    pub output_dir: PathBuf,
}

#[derive(Parser)]
pub struct FieldsArgs {
    /// Module whose catalog to list.
    #[arg(value_enum)]
    pub module: ModuleArg,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ModuleArg {
    Camera,
    Robot,
    Task,
    User,
    Map,
}

impl From<ModuleArg> for ModuleType {
    fn from(arg: ModuleArg) -> Self {
        match arg {
            ModuleArg::Camera => ModuleType::Camera,
            ModuleArg::Robot => ModuleType::Robot,
            ModuleArg::Task => ModuleType::Task,
            ModuleArg::User => ModuleType::User,
            ModuleArg::Map => ModuleType::Map,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum FormatArg {
    Csv,
    Xlsx,
    Json,
}

impl From<FormatArg> for FileFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Csv => FileFormat::Csv,
            FormatArg::Xlsx => FileFormat::Xlsx,
            FormatArg::Json => FileFormat::Json,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
