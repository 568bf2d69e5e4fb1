//! CLI Argument Structures and Configuration
//!
//! This module contains all CLI argument definitions, command structures,
//! and configuration enums used by the Relume CLI binary.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use relume::{ReportFormat, Throughput};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Lua Variable Renaming Engine
#[derive(Parser)]
#[command(name = "relume")]
#[command(version = VERSION)]
#[command(about = "🔤 Relume - Lua Variable Renaming Engine")]
#[command(long_about = "
Rename machine-generated variables (v1, v12, pu7, ...) in obfuscated Lua
scripts. Replacements are inferred from how each variable is first assigned,
or suggested in batches by Gemini in assisted mode.

Common Usage:

  # Rule-based rename, output written next to the input
  relume rename script.lua

  # AI-assisted rename with large batches (requires GEMINI_API_KEY)
  relume rename --mode assisted --throughput fast script.lua

  # Preview the assisted-mode batch plan without calling the API
  relume rename --mode assisted --dry-run script.lua

  # List the cryptic identifiers without rewriting anything
  relume scan script.lua

  # Write a JSON report alongside the renamed source
  relume rename --report pass.json script.lua

Learn more: https://github.com/relume-dev/relume
")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Rename cryptic variables in a Lua source file
    Rename(Box<RenameArgs>),

    /// Scan a Lua source file and list its cryptic variables
    Scan(ScanArgs),

    /// Print default configuration in YAML format
    #[command(name = "print-default-config")]
    PrintDefaultConfig,

    /// Initialize a configuration file with defaults
    #[command(name = "init-config")]
    InitConfig(InitConfigArgs),

    /// Validate a Relume configuration file
    #[command(name = "validate-config")]
    ValidateConfig(ValidateConfigArgs),
}

#[derive(Args)]
pub struct RenameArgs {
    /// Lua source file to rename
    pub input: PathBuf,

    /// Output file for the renamed source (default: <input>.renamed.lua)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Naming mode: deterministic rules or AI-assisted batches
    #[arg(short, long, value_enum, default_value = "basic")]
    pub mode: ModeArg,

    /// Batch sizing for assisted mode
    #[arg(short = 't', long, value_enum, default_value = "normal")]
    pub throughput: ThroughputArg,

    /// Configuration file path (default: .relume.yml if present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Write a pass report to this path
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Report file format
    #[arg(short, long, value_enum, default_value = "json")]
    pub format: ReportFormatArg,

    /// Assisted mode only: print the batch plan without calling the API
    #[arg(long)]
    pub dry_run: bool,

    /// Override the Gemini model used in assisted mode
    #[arg(long)]
    pub model: Option<String>,

    /// Per-request timeout in seconds for assisted mode
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Maximum concurrent batch requests in assisted mode
    #[arg(long)]
    pub concurrency: Option<usize>,
}

#[derive(Args)]
pub struct ScanArgs {
    /// Lua source file to scan
    pub input: PathBuf,

    /// Configuration file path (default: .relume.yml if present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output format for the scan listing
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: ScanFormatArg,
}

#[derive(Args)]
pub struct InitConfigArgs {
    /// Output configuration file name
    #[arg(short, long, default_value = ".relume.yml")]
    pub output: PathBuf,

    /// Overwrite existing configuration file
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Args)]
pub struct ValidateConfigArgs {
    /// Path to configuration file to validate
    #[arg(short, long, required = true)]
    pub config: PathBuf,

    /// Show detailed configuration breakdown
    #[arg(short, long)]
    pub detailed: bool,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ModeArg {
    /// Deterministic rule-based naming, fully offline
    Basic,
    /// Batched AI suggestions via Gemini (requires GEMINI_API_KEY)
    Assisted,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ThroughputArg {
    /// Small batches for careful suggestions
    Normal,
    /// Large batches for fewer round trips
    Fast,
}

impl From<ThroughputArg> for Throughput {
    fn from(value: ThroughputArg) -> Self {
        match value {
            ThroughputArg::Normal => Throughput::Normal,
            ThroughputArg::Fast => Throughput::Fast,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ReportFormatArg {
    /// JSON report file
    Json,
    /// YAML report file
    Yaml,
}

impl From<ReportFormatArg> for ReportFormat {
    fn from(value: ReportFormatArg) -> Self {
        match value {
            ReportFormatArg::Json => ReportFormat::Json,
            ReportFormatArg::Yaml => ReportFormat::Yaml,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ScanFormatArg {
    /// Human-readable table
    Table,
    /// Machine-readable JSON
    Json,
}
