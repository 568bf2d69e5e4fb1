//! Command Execution Logic for Rename Operations
//!
//! This module contains the main command execution logic: configuration
//! loading, pipeline orchestration, progress tracking, and the config
//! management subcommands.

use crate::cli::args::*;
use crate::cli::output::*;
use console::Term;
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use std::path::{Path, PathBuf};
use tabled::{settings::Style as TableStyle, Table, Tabled};
use tracing::info;

use relume::core::config::DEFAULT_CONFIG_FILE;
use relume::{
    NamingOracle, OracleConfig, ProgressCallback, RenameConfig, RenamePipeline, RenameResult,
    ReportWriter, Throughput,
};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Main rename command implementation
pub async fn rename_command(args: RenameArgs, quiet: bool) -> anyhow::Result<()> {
    if !quiet {
        print_header();
    }

    let config = load_rename_config(args.config.as_deref(), quiet).await?;
    let pipeline = RenamePipeline::new(config)?;

    if !args.input.exists() {
        eprintln!(
            "{} {}",
            "❌ Input file does not exist:".red(),
            args.input.display()
        );
        std::process::exit(1);
    }

    let source = tokio::fs::read_to_string(&args.input).await?;
    let occurrences = pipeline.scan(&source)?;

    if !quiet {
        println!(
            "{} {}",
            "🔎 Cryptic identifiers found:".bold(),
            occurrences.len().to_string().cyan()
        );
        println!();
    }

    let outcome = match args.mode {
        ModeArg::Basic => {
            let (bar, progress) = rename_progress(occurrences.len(), quiet)?;
            let outcome = pipeline.rename_basic(&source, progress)?;
            if let Some(bar) = bar {
                bar.finish_with_message("Rename Complete");
            }
            outcome
        }
        ModeArg::Assisted => {
            let oracle_config = match OracleConfig::from_env() {
                Ok(config) => apply_oracle_overrides(config, &args),
                Err(_) => {
                    eprintln!("{}", "❌ GEMINI_API_KEY not set".red());
                    eprintln!(
                        "   Assisted mode sends variable batches to Gemini and needs an API key."
                    );
                    eprintln!("   Export GEMINI_API_KEY or run with --mode basic.");
                    std::process::exit(1);
                }
            };
            let oracle = NamingOracle::new(oracle_config)?;
            let throughput = Throughput::from(args.throughput);

            if args.dry_run {
                let plan = oracle.plan_batches(&occurrences, throughput);
                print_batch_plan(&plan);
                return Ok(());
            }

            let (bar, progress) = rename_progress(occurrences.len(), quiet)?;
            let outcome = pipeline
                .rename_assisted(&source, &oracle, throughput, progress)
                .await?;
            if let Some(bar) = bar {
                bar.finish_with_message("Rename Complete");
            }
            outcome
        }
    };

    info!(
        "Pass {} finished with {} failures",
        outcome.report.pass_id, outcome.report.failed_count
    );

    let output_path = args
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&args.input));
    tokio::fs::write(&output_path, &outcome.output).await?;

    if !quiet {
        println!();
        display_rename_results(&outcome.report);
        println!();
    }
    println!("📄 Renamed source: {}", output_path.display());

    if let Some(report_path) = &args.report {
        ReportWriter::new().write_report(&outcome.report, report_path, args.format.into())?;
        println!("📊 Pass report: {}", report_path.display());
    }

    if !quiet {
        println!();
        println!(
            "{}",
            format!(
                "✨ Renamed {} of {} variables in {}ms",
                outcome.report.renamed_count,
                outcome.report.variables_found,
                outcome.report.duration_ms
            )
            .bright_green()
            .bold()
        );
    }

    Ok(())
}

/// Scan command: list cryptic identifiers without rewriting anything
pub async fn scan_command(args: ScanArgs, quiet: bool) -> anyhow::Result<()> {
    if !quiet {
        print_header();
    }

    let config = load_rename_config(args.config.as_deref(), quiet).await?;
    let pipeline = RenamePipeline::new(config)?;

    if !args.input.exists() {
        eprintln!(
            "{} {}",
            "❌ Input file does not exist:".red(),
            args.input.display()
        );
        std::process::exit(1);
    }

    let source = tokio::fs::read_to_string(&args.input).await?;
    let occurrences = pipeline.scan(&source)?;

    match args.format {
        ScanFormatArg::Table => {
            if occurrences.is_empty() {
                println!("{}", "✅ No cryptic identifiers found".bright_green().bold());
            } else {
                display_scan_results(&occurrences);
            }
        }
        ScanFormatArg::Json => {
            println!("{}", serde_json::to_string_pretty(&occurrences)?);
        }
    }

    Ok(())
}

/// Print default configuration in YAML format
pub async fn print_default_config() -> anyhow::Result<()> {
    println!("{}", "# Default relume configuration".dimmed());
    println!("{}", "# Save this to a file and customize as needed".dimmed());
    println!(
        "{}",
        "# Usage: relume rename --config your-config.yml <input>".dimmed()
    );
    println!();

    let config = RenameConfig::default();
    let yaml_output = serde_yaml::to_string(&config)?;
    println!("{}", yaml_output);

    Ok(())
}

/// Initialize a configuration file with defaults
pub async fn init_config(args: InitConfigArgs) -> anyhow::Result<()> {
    // Check if file exists and force not specified
    if args.output.exists() && !args.force {
        eprintln!(
            "{} {}",
            "❌ Configuration file already exists:".red(),
            args.output.display()
        );
        eprintln!("   Use --force to overwrite or choose a different name with --output");
        std::process::exit(1);
    }

    let config = RenameConfig::default();
    config.to_yaml_file(&args.output)?;

    println!(
        "{} {}",
        "✅ Configuration saved to:".bright_green().bold(),
        args.output.display().to_string().cyan()
    );
    println!();
    println!("{}", "📝 Next steps:".bright_blue().bold());
    println!("   1. Edit the configuration file to customize the rename rules");
    println!(
        "   2. Run a pass with: {}",
        format!("relume rename --config {} <input>", args.output.display()).cyan()
    );

    println!();
    println!("{}", "🔧 Key settings you can customize:".bright_blue().bold());

    #[derive(Tabled)]
    struct CustomizationRow {
        setting: String,
        description: String,
    }

    let customization_rows = vec![
        CustomizationRow {
            setting: "prefixes".to_string(),
            description: "Identifier prefixes treated as cryptic (v, pu, ...)".to_string(),
        },
        CustomizationRow {
            setting: "service_aliases".to_string(),
            description: "Canonical names for GetService lookups".to_string(),
        },
        CustomizationRow {
            setting: "fallback_base".to_string(),
            description: "Base name used when no naming rule matches".to_string(),
        },
    ];

    let mut table = Table::new(customization_rows);
    table.with(TableStyle::rounded());
    println!("{}", table);

    Ok(())
}

/// Validate a Relume configuration file
pub async fn validate_config(args: ValidateConfigArgs) -> anyhow::Result<()> {
    println!(
        "{} {}",
        "🔍 Validating configuration:".bright_blue().bold(),
        args.config.display().to_string().cyan()
    );
    println!();

    let config = match RenameConfig::from_yaml_file(&args.config) {
        Ok(config) => {
            println!("{}", "✅ Configuration file is valid!".bright_green().bold());
            println!();
            config
        }
        Err(e) => {
            eprintln!("{} {}", "❌ Configuration validation failed:".red(), e);
            println!();
            println!("{}", "🔧 Common issues:".bright_blue().bold());
            println!("   • Check YAML syntax (indentation, colons, quotes)");
            println!("   • Prefixes must be non-empty and alphabetic");
            println!("   • fallback_base and marker_prefix must be valid identifiers");
            println!();
            println!(
                "{}",
                "💡 Tip: Use 'relume print-default-config' to see valid format".dimmed()
            );
            std::process::exit(1);
        }
    };

    display_config_summary(&config);

    if args.detailed {
        println!("{}", "🔧 Detailed Settings".bright_blue().bold());
        println!();

        #[derive(Tabled)]
        struct DetailRow {
            setting: String,
            value: String,
        }

        let mut detail_rows = vec![
            DetailRow {
                setting: "Prefixes".to_string(),
                value: config.prefixes.join(", "),
            },
            DetailRow {
                setting: "Fallback base".to_string(),
                value: config.fallback_base.clone(),
            },
            DetailRow {
                setting: "Marker prefix".to_string(),
                value: config.marker_prefix.clone(),
            },
        ];

        let mut aliases: Vec<_> = config.service_aliases.iter().collect();
        aliases.sort();
        for (alias, canonical) in aliases {
            detail_rows.push(DetailRow {
                setting: format!("Alias {alias}"),
                value: canonical.clone(),
            });
        }

        let mut table = Table::new(detail_rows);
        table.with(TableStyle::rounded());
        println!("{}", table);
        println!();
    }

    println!(
        "{}",
        "💡 Configuration is ready to use with 'relume rename'".dimmed()
    );

    Ok(())
}

/// Load rename configuration from an explicit path, the default config file,
/// or built-in defaults
pub async fn load_rename_config(
    config_path: Option<&Path>,
    quiet: bool,
) -> anyhow::Result<RenameConfig> {
    let config = match config_path {
        Some(path) => {
            if !quiet {
                println!(
                    "{} {}",
                    "✅ Loading configuration from".green(),
                    path.display().to_string().cyan()
                );
            }
            RenameConfig::from_yaml_file(path)?
        }
        None => {
            let default_path = Path::new(DEFAULT_CONFIG_FILE);
            if default_path.exists() {
                if !quiet {
                    println!(
                        "{} {}",
                        "✅ Loading configuration from".green(),
                        default_path.display().to_string().cyan()
                    );
                }
                RenameConfig::from_yaml_file(default_path)?
            } else {
                if !quiet {
                    println!("{}", "✅ Using default configuration".green());
                }
                RenameConfig::default()
            }
        }
    };

    Ok(config)
}

/// Display a summary of the active configuration
pub fn display_config_summary(config: &RenameConfig) {
    println!("{}", "⚙️  Configuration Summary".bright_blue().bold());
    println!();

    #[derive(Tabled)]
    struct ConfigRow {
        setting: String,
        value: String,
    }

    let rows = vec![
        ConfigRow {
            setting: "Cryptic prefixes".to_string(),
            value: config.prefixes.join(", "),
        },
        ConfigRow {
            setting: "Fallback base".to_string(),
            value: config.fallback_base.clone(),
        },
        ConfigRow {
            setting: "Marker prefix".to_string(),
            value: config.marker_prefix.clone(),
        },
        ConfigRow {
            setting: "Service aliases".to_string(),
            value: config.service_aliases.len().to_string(),
        },
        ConfigRow {
            setting: "Reserved words".to_string(),
            value: config.reserved_words.len().to_string(),
        },
    ];

    let mut table = Table::new(rows);
    table.with(TableStyle::rounded());
    println!("{}", table);
    println!();
}

/// Print Relume header with version info
pub fn print_header() {
    if Term::stdout().size().1 >= 80 {
        // Full header for wide terminals
        println!(
            "{}",
            "┌".cyan().bold().to_string()
                + &"─".repeat(60).cyan().to_string()
                + &"┐".cyan().bold().to_string()
        );
        println!(
            "{} {} {}",
            "│".cyan().bold(),
            format!("🔤 Relume v{} - Lua Variable Renaming", VERSION)
                .bright_cyan()
                .bold(),
            "│".cyan().bold()
        );
        println!(
            "{}",
            "└".cyan().bold().to_string()
                + &"─".repeat(60).cyan().to_string()
                + &"┘".cyan().bold().to_string()
        );
    } else {
        // Compact header for narrow terminals
        println!(
            "{} {}",
            "🔤".bright_cyan(),
            format!("Relume v{}", VERSION).bright_cyan().bold()
        );
    }
    println!();
}

/// Progress bar plus pipeline callback for one pass, suppressed in quiet mode
fn rename_progress(
    total: usize,
    quiet: bool,
) -> anyhow::Result<(Option<ProgressBar>, Option<ProgressCallback>)> {
    if quiet {
        return Ok((None, None));
    }

    let bar = ProgressBar::new(total as u64);
    bar.set_style(ProgressStyle::with_template(
        "🔤 {msg} [{bar:40.bright_blue/blue}] {pos:>3}/{len:3} {elapsed_precise}",
    )?);
    bar.set_message("Renaming variables");

    let callback: ProgressCallback = Box::new({
        let bar = bar.clone();
        move |done: usize, _total: usize, result: &RenameResult| {
            bar.set_position(done as u64);
            match &result.renamed {
                Some(name) => bar.set_message(format!("{} -> {}", result.original, name)),
                None => bar.set_message(format!("{} failed", result.original)),
            }
        }
    });

    Ok((Some(bar), Some(callback)))
}

fn apply_oracle_overrides(mut config: OracleConfig, args: &RenameArgs) -> OracleConfig {
    if let Some(model) = &args.model {
        config = config.with_model(model.clone());
    }
    if let Some(secs) = args.timeout_secs {
        config = config.with_timeout_secs(secs);
    }
    if let Some(concurrency) = args.concurrency {
        config = config.with_concurrency(concurrency);
    }
    config
}

/// Default output path: the input with a .renamed.lua extension.
fn default_output_path(input: &Path) -> PathBuf {
    input.with_extension("renamed.lua")
}
