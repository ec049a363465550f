//! Outline CLI
//!
//! Command-line interface for structure analysis and program diagnostics.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use outline_analyzer::Workspace;
use outline_core::{CoreError, EngineConfig};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "outline")]
#[command(about = "Outline - Functions, classes and diagnostics for TypeScript and JavaScript")]
#[command(version)]
struct Cli {
    /// Config file (default: ~/.outline/config.yaml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List functions and classes declared in each file
    Structure {
        /// Files to analyze
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Build one program over the files and print its diagnostics
    Check {
        /// Program members
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let (config, fallback) = resolve_config(cli.config.as_deref())?;

    // stdout carries JSON, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Some(e) = fallback {
        warn!(path = ?EngineConfig::default_path(), "Failed to load config file, using defaults: {}", e);
    }

    let workspace = Arc::new(Workspace::new(config));

    match cli.command {
        Commands::Structure { files, pretty } => cmd_structure(workspace, files, pretty).await,
        Commands::Check { files, pretty } => cmd_check(workspace, files, pretty).await,
    }
}

/// Resolve the engine config before logging is installed.
///
/// An explicit `--config` must load. The default file falls back to
/// defaults, handing back the error so it can be logged once tracing is up.
fn resolve_config(explicit: Option<&Path>) -> Result<(EngineConfig, Option<CoreError>)> {
    if let Some(path) = explicit {
        let config = EngineConfig::load_from(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?;
        return Ok((config, None));
    }

    Ok(match EngineConfig::load_or_default(&EngineConfig::default_path()) {
        Ok(config) => (config, None),
        Err(e) => (EngineConfig::default(), Some(e)),
    })
}

async fn cmd_structure(workspace: Arc<Workspace>, files: Vec<PathBuf>, pretty: bool) -> Result<ExitCode> {
    let handles: Vec<_> = files
        .into_iter()
        .map(|path| {
            let workspace = workspace.clone();
            tokio::task::spawn_blocking(move || {
                let result = workspace.analyze_file(&path);
                (path, result)
            })
        })
        .collect();

    let mut results = Vec::with_capacity(handles.len());
    let mut failed = false;
    for handle in handles {
        let (path, result) = handle.await.context("Analysis task panicked")?;
        match result {
            Ok(analysis) => results.push(analysis),
            Err(e) => {
                eprintln!("{}: {}", path.display(), e);
                failed = true;
            }
        }
    }

    print_json(&results, pretty)?;
    debug!(stats = ?workspace.source_cache().stats(), "Source cache");

    Ok(if failed { ExitCode::FAILURE } else { ExitCode::SUCCESS })
}

async fn cmd_check(workspace: Arc<Workspace>, files: Vec<PathBuf>, pretty: bool) -> Result<ExitCode> {
    let diagnostics = tokio::task::spawn_blocking(move || workspace.program_diagnostics(&files))
        .await
        .context("Program build panicked")?;

    print_json(&diagnostics, pretty)?;

    let has_errors = diagnostics.iter().any(|d| d.is_error());
    Ok(if has_errors { ExitCode::FAILURE } else { ExitCode::SUCCESS })
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T, pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", json);
    Ok(())
}
