#!/usr/bin/env rust
//! Relume CLI - Lua Variable Renaming Engine
//!
//! This binary wraps the relume library with rich console output, progress
//! tracking, and configuration management for day-to-day deobfuscation work.

use clap::Parser;
use tracing;

mod cli;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing/logging
    let log_level = if cli.verbose {
        tracing::Level::DEBUG
    } else if cli.quiet {
        tracing::Level::WARN
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .init();

    // Execute command
    match cli.command {
        Commands::Rename(args) => {
            cli::rename_command(*args, cli.quiet).await?;
        }
        Commands::Scan(args) => {
            cli::scan_command(args, cli.quiet).await?;
        }
        Commands::PrintDefaultConfig => {
            cli::print_default_config().await?;
        }
        Commands::InitConfig(args) => {
            cli::init_config(args).await?;
        }
        Commands::ValidateConfig(args) => {
            cli::validate_config(args).await?;
        }
    }

    Ok(())
}
