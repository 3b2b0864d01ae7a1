//! Operator Terminal - Entry Point
//!
//! Loads configuration and content, restores saved progress and runs the
//! line-driven terminal loop on stdin/stdout.

use operator_terminal::content::{ContentCache, DirectorySource};
use operator_terminal::core::error::Result;
use operator_terminal::core::TerminalConfig;
use operator_terminal::engine::SurveyEngine;
use operator_terminal::state::{FileExportSink, FileStore, Storage};
use operator_terminal::ui::{run_session, SessionOptions, TerminalHistory, TerminalRenderer};

use clap::Parser;
use crossterm::tty::IsTty;
use std::io;
use std::path::PathBuf;

/// Operator Terminal - answer the survey one field at a time
#[derive(Parser, Debug)]
#[command(name = "operator-terminal")]
#[command(about = "Command-driven survey terminal")]
struct Args {
    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory holding survey.json and ui-texts.json
    #[arg(long)]
    content_dir: Option<PathBuf>,

    /// Directory for saved progress
    #[arg(long)]
    state_dir: Option<PathBuf>,

    /// Directory exported results are written to
    #[arg(long)]
    export_dir: Option<PathBuf>,

    /// Show a short static card instead of the celebration animation
    #[arg(long, default_value_t = false)]
    reduced_motion: bool,

    /// Log filter directive, overrides RUST_LOG
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = match &args.log_level {
        Some(level) => tracing_subscriber::EnvFilter::new(level),
        None => tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("operator_terminal=info")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let config = load_config(&args)?;
    tracing::info!("Operator Terminal starting, content from {:?}", config.content_dir);

    let cache = ContentCache::new();
    let content = cache.get_or_load(&DirectorySource::new(&config.content_dir))?;

    let storage = Storage::new(FileStore::new(&config.state_dir));
    let sink = FileExportSink::new(&config.export_dir);
    let mut engine = SurveyEngine::new(content, storage, sink, config.export_filename.clone());

    let stdout = io::stdout();
    let interactive = stdout.is_tty();
    let mut renderer = TerminalRenderer::new(stdout, interactive);
    let mut history = TerminalHistory::new(config.history_limit);

    let options = SessionOptions::from(&config);
    run_session(&mut engine, &mut renderer, &mut history, &options, io::stdin().lock())?;

    tracing::info!("Operator Terminal exiting");
    Ok(())
}

fn load_config(args: &Args) -> Result<TerminalConfig> {
    let mut config = match &args.config {
        Some(path) => TerminalConfig::load(path)?,
        None => TerminalConfig::default(),
    };
    if let Some(dir) = &args.content_dir {
        config.content_dir = dir.clone();
    }
    if let Some(dir) = &args.state_dir {
        config.state_dir = dir.clone();
    }
    if let Some(dir) = &args.export_dir {
        config.export_dir = dir.clone();
    }
    if args.reduced_motion {
        config.reduced_motion = true;
    }
    config.validate()?;
    Ok(config)
}
