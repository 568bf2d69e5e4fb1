//! Rename pass orchestration.
//!
//! The pipeline coordinates one full pass over a source text:
//! - scan for cryptic identifiers
//! - propose replacements (rule cascade, or the naming oracle in assisted
//!   mode)
//! - reserve unique final names
//! - rewrite the text and assemble the report
//!
//! A pass never fails on malformed input: every detected identifier appears
//! in the report, failed ones flagged, and the rewrite applies whatever
//! mapping was assembled.

use std::collections::HashMap;
use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::analysis::inferencer::NameInferencer;
use crate::analysis::registry::NameRegistry;
use crate::analysis::rewriter::apply_renames;
use crate::analysis::scanner::{VariableOccurrence, VariableScanner};
use crate::core::config::RenameConfig;
use crate::core::errors::Result;
use crate::oracle::{NamingOracle, Throughput};

/// Progress callback invoked after each variable is finalized, with the
/// cumulative completed count, the total count, and the variable's result.
pub type ProgressCallback = Box<dyn Fn(usize, usize, &RenameResult) + Send + Sync>;

/// Outcome for one variable in a rename pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameResult {
    /// The cryptic identifier as it appears in the input.
    pub original: String,
    /// The finalized replacement, `None` when no proposal was produced.
    pub renamed: Option<String>,
    /// True only if a valid, non-conflicting replacement was produced.
    pub success: bool,
}

/// How replacement names are proposed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenameMode {
    /// Deterministic rule cascade, fully offline.
    Basic,
    /// Batched suggestions from the external naming service.
    Assisted,
}

impl std::fmt::Display for RenameMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Basic => write!(f, "basic"),
            Self::Assisted => write!(f, "assisted"),
        }
    }
}

/// Summary of one rename pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenameReport {
    /// Unique id for this pass.
    pub pass_id: Uuid,
    /// Mode the pass ran in.
    pub mode: RenameMode,
    /// Throughput setting, present in assisted mode only.
    pub throughput: Option<Throughput>,
    /// When the pass started.
    pub timestamp: DateTime<Utc>,
    /// Wall-clock duration of the pass.
    pub duration_ms: u64,
    /// Distinct cryptic identifiers detected.
    pub variables_found: usize,
    /// Variables that received a replacement.
    pub renamed_count: usize,
    /// Variables left unrenamed.
    pub failed_count: usize,
    /// Per-variable results, in completion order.
    pub results: Vec<RenameResult>,
}

/// A finished pass: the rewritten text plus its report.
#[derive(Debug, Clone)]
pub struct RenameOutcome {
    /// Rewritten source, provenance header included.
    pub output: String,
    /// The pass report.
    pub report: RenameReport,
}

/// Drives rename passes over in-memory source text.
pub struct RenamePipeline {
    config: RenameConfig,
}

impl RenamePipeline {
    /// Create a pipeline, validating the configuration up front.
    pub fn new(config: RenameConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The active configuration.
    pub fn config(&self) -> &RenameConfig {
        &self.config
    }

    /// Scan only: the sorted list of distinct cryptic identifiers.
    pub fn scan(&self, source: &str) -> Result<Vec<VariableOccurrence>> {
        let scanner = VariableScanner::new(&self.config)?;
        Ok(scanner.scan(source))
    }

    /// Run a basic-mode pass: deterministic rule-based inference, then
    /// rewrite. Running this twice on the same input produces identical
    /// output.
    pub fn rename_basic(
        &self,
        source: &str,
        progress: Option<ProgressCallback>,
    ) -> Result<RenameOutcome> {
        let started = Instant::now();
        let timestamp = Utc::now();
        let pass_id = Uuid::new_v4();
        info!("Starting basic rename pass {}", pass_id);

        let occurrences = self.scan(source)?;
        let total = occurrences.len();

        let inferencer = NameInferencer::new(&self.config);
        let mut registry = NameRegistry::with_reserved(self.config.reserved_words.clone());
        let mut results = Vec::with_capacity(total);
        let mut mapping = HashMap::with_capacity(total);

        for (index, occurrence) in occurrences.iter().enumerate() {
            let base = inferencer.propose(source, &occurrence.name);
            let final_name = registry.reserve(&base);
            debug!(
                "{} -> {} ({} occurrences)",
                occurrence.name, final_name, occurrence.occurrence_count
            );

            mapping.insert(occurrence.name.clone(), final_name.clone());
            let result = RenameResult {
                original: occurrence.name.clone(),
                renamed: Some(final_name),
                success: true,
            };
            if let Some(ref callback) = progress {
                callback(index + 1, total, &result);
            }
            results.push(result);
        }

        let output = apply_renames(source, &mapping)?;
        let report = build_report(
            pass_id,
            RenameMode::Basic,
            None,
            timestamp,
            started,
            results,
        );
        info!(
            "Basic pass {} complete: {}/{} variables renamed in {}ms",
            pass_id, report.renamed_count, report.variables_found, report.duration_ms
        );

        Ok(RenameOutcome { output, report })
    }

    /// Run an assisted-mode pass: batch the identifiers to the naming
    /// oracle, fall back per batch on failure, then rewrite with whatever
    /// mapping was assembled. Variables in failed batches are left unrenamed
    /// and flagged in the report; a failed batch never aborts the pass.
    pub async fn rename_assisted(
        &self,
        source: &str,
        oracle: &NamingOracle,
        throughput: Throughput,
        progress: Option<ProgressCallback>,
    ) -> Result<RenameOutcome> {
        let started = Instant::now();
        let timestamp = Utc::now();
        let pass_id = Uuid::new_v4();
        info!(
            "Starting assisted rename pass {} ({} throughput)",
            pass_id, throughput
        );

        let occurrences = self.scan(source)?;
        let results = oracle
            .suggest_names(
                source,
                &occurrences,
                &self.config,
                throughput,
                progress.as_ref(),
            )
            .await;

        let mapping: HashMap<String, String> = results
            .iter()
            .filter(|r| r.success)
            .filter_map(|r| {
                r.renamed
                    .as_ref()
                    .map(|renamed| (r.original.clone(), renamed.clone()))
            })
            .collect();

        let output = apply_renames(source, &mapping)?;
        let report = build_report(
            pass_id,
            RenameMode::Assisted,
            Some(throughput),
            timestamp,
            started,
            results,
        );
        info!(
            "Assisted pass {} complete: {}/{} variables renamed in {}ms",
            pass_id, report.renamed_count, report.variables_found, report.duration_ms
        );

        Ok(RenameOutcome { output, report })
    }
}

fn build_report(
    pass_id: Uuid,
    mode: RenameMode,
    throughput: Option<Throughput>,
    timestamp: DateTime<Utc>,
    started: Instant,
    results: Vec<RenameResult>,
) -> RenameReport {
    let renamed_count = results.iter().filter(|r| r.success).count();
    RenameReport {
        pass_id,
        mode,
        throughput,
        timestamp,
        duration_ms: started.elapsed().as_millis() as u64,
        variables_found: results.len(),
        renamed_count,
        failed_count: results.len() - renamed_count,
        results,
    }
}
