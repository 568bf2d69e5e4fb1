//! # Relume: Lua Variable Renaming Engine
//!
//! A renaming engine for obfuscated Lua scripts, built for Roblox script
//! workflows. Relume detects machine-generated identifiers (`v1`, `v12`,
//! `pu7`, ...), infers descriptive replacements, and rewrites the source
//! with a provenance header. This library provides:
//!
//! - **Scanning**: Whole-word detection of cryptic identifiers, ordered by
//!   numeric suffix
//! - **Rule-based inference**: Deterministic naming from `GetService`,
//!   player accessors, and child lookups
//! - **AI-assisted naming**: Batched suggestions from Gemini with per-batch
//!   failure confinement
//! - **Collision-free rewriting**: Unique final names and boundary-safe
//!   text replacement
//!
//! ## Architecture
//!
//! ```text
//! scan -> infer (rules or oracle) -> reserve unique names -> rewrite
//! ```
//!
//! Every stage works on in-memory text; the pipeline is stateless between
//! passes and reports progress through an injected callback.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use relume::{RenameConfig, RenamePipeline};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let pipeline = RenamePipeline::new(RenameConfig::default())?;
//!     let source = "local v1 = game:GetService(\"Players\")\nprint(v1)";
//!     let outcome = pipeline.rename_basic(source, None)?;
//!
//!     println!("{}", outcome.output);
//!     println!("{} variables renamed", outcome.report.renamed_count);
//!     Ok(())
//! }
//! ```
//!
//! Assisted mode batches the scanned variables to the Gemini API and needs
//! a key in `GEMINI_API_KEY`:
//!
//! ```rust,no_run
//! use relume::{NamingOracle, OracleConfig, RenameConfig, RenamePipeline, Throughput};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let pipeline = RenamePipeline::new(RenameConfig::default())?;
//!     let oracle = NamingOracle::new(OracleConfig::from_env()?)?;
//!     let outcome = pipeline
//!         .rename_assisted("local v1 = game", &oracle, Throughput::Normal, None)
//!         .await?;
//!
//!     println!("{} variables renamed", outcome.report.renamed_count);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![cfg_attr(docsrs, feature(doc_cfg))]

// Configuration, errors, and pass orchestration
pub mod core {
    //! Core configuration, error, and pipeline types.

    pub mod config;
    pub mod errors;
    pub mod pipeline;
}

// Scanning, inference, and rewriting stages
pub mod analysis {
    //! The stages of a rename pass.

    pub mod inferencer;
    pub mod registry;
    pub mod rewriter;
    pub mod scanner;
}

// Report persistence
pub mod io {
    //! Report rendering and persistence.

    pub mod reports;
}

// AI naming oracle
pub mod oracle;

// Re-export primary types for convenience
pub use analysis::registry::NameRegistry;
pub use analysis::rewriter::PROVENANCE_HEADER;
pub use analysis::scanner::VariableOccurrence;
pub use core::config::RenameConfig;
pub use core::errors::{RelumeError, Result, ResultExt};
pub use core::pipeline::{
    ProgressCallback, RenameMode, RenameOutcome, RenamePipeline, RenameReport, RenameResult,
};
pub use io::reports::{ReportFormat, ReportWriter};
pub use oracle::{BatchPlan, NamingOracle, OracleConfig, Throughput};

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
