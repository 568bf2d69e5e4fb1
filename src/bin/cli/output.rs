//! Output Formatting and Display Functions
//!
//! This module contains the display utilities for rename results, scan
//! listings, and assisted-mode batch plans.

use owo_colors::OwoColorize;
use tabled::{settings::Style as TableStyle, Table, Tabled};

use relume::{BatchPlan, RenameReport, VariableOccurrence};

/// Rows shown in the per-variable result table before truncating.
const MAX_RESULT_ROWS: usize = 20;

/// Display per-variable rename results with summary statistics
pub fn display_rename_results(report: &RenameReport) {
    println!("{}", "✅ Rename Complete".bright_green().bold());
    println!();

    #[derive(Tabled)]
    struct ResultRow {
        original: String,
        renamed: String,
        status: String,
    }

    let rows: Vec<ResultRow> = report
        .results
        .iter()
        .take(MAX_RESULT_ROWS)
        .map(|result| ResultRow {
            original: result.original.clone(),
            renamed: result.renamed.clone().unwrap_or_else(|| "-".to_string()),
            status: if result.success {
                "✅ renamed".to_string()
            } else {
                "❌ failed".to_string()
            },
        })
        .collect();

    if !rows.is_empty() {
        let mut table = Table::new(rows);
        table.with(TableStyle::rounded());
        println!("{}", table);
        if report.results.len() > MAX_RESULT_ROWS {
            println!(
                "   ... and {} more",
                report.results.len() - MAX_RESULT_ROWS
            );
        }
        println!();
    }

    #[derive(Tabled)]
    struct StatsRow {
        metric: String,
        value: String,
    }

    let stats_rows = vec![
        StatsRow {
            metric: "📄 Variables Found".to_string(),
            value: report.variables_found.to_string(),
        },
        StatsRow {
            metric: "✅ Renamed".to_string(),
            value: report.renamed_count.to_string(),
        },
        StatsRow {
            metric: "❌ Failed".to_string(),
            value: report.failed_count.to_string(),
        },
        StatsRow {
            metric: "⏱️  Duration".to_string(),
            value: format!("{}ms", report.duration_ms),
        },
        StatsRow {
            metric: "🆔 Pass".to_string(),
            value: report.pass_id.to_string(),
        },
    ];

    let mut table = Table::new(stats_rows);
    table.with(TableStyle::rounded());
    println!("{}", table);
}

/// Display scanned identifiers with occurrence counts and context
pub fn display_scan_results(occurrences: &[VariableOccurrence]) {
    println!(
        "{} {}",
        "🔎 Cryptic identifiers:".bright_blue().bold(),
        occurrences.len().to_string().cyan()
    );
    println!();

    #[derive(Tabled)]
    struct ScanRow {
        name: String,
        occurrences: usize,
        first_line: usize,
        context: String,
    }

    let rows: Vec<ScanRow> = occurrences
        .iter()
        .map(|occurrence| ScanRow {
            name: occurrence.name.clone(),
            occurrences: occurrence.occurrence_count,
            first_line: occurrence.first_line,
            context: truncate_context(&occurrence.context_line, 48),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(TableStyle::rounded());
    println!("{}", table);
}

/// Print the assisted-mode batch plan without touching the network
pub fn print_batch_plan(plan: &BatchPlan) {
    println!();
    println!("{}", "🔍 [DRY-RUN] Batch Plan".bright_blue().bold());
    println!("   📄 Total variables: {}", plan.total_variables);
    println!(
        "   🚚 Throughput: {} ({} per batch)",
        plan.throughput, plan.batch_size
    );
    println!("   📦 Batches: {}", plan.batches.len());
    println!();

    for (index, batch) in plan.batches.iter().enumerate() {
        println!("   Batch {}: {}", index, preview_names(batch, 8));
    }

    println!();
    println!(
        "{}",
        "💡 Re-run without --dry-run to request suggestions".dimmed()
    );
}

/// Shorten a context line so scan tables stay readable.
fn truncate_context(line: &str, max_chars: usize) -> String {
    if line.chars().count() <= max_chars {
        return line.to_string();
    }
    let cut: String = line.chars().take(max_chars).collect();
    format!("{cut}...")
}

fn preview_names(names: &[String], max: usize) -> String {
    if names.len() <= max {
        names.join(", ")
    } else {
        format!("{}, ... ({} total)", names[..max].join(", "), names.len())
    }
}
