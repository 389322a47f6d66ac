pub mod actions;
pub mod config;
pub mod matcher;
pub mod voice_commands;

use actions::{ActionError, LogActionHandler};
use clap::Parser;
use config::{load_config_from, AppConfig, ConfigError};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use thiserror::Error;
use voice_commands::{DispatchOutcome, VoiceCommandDispatcher};

/// Match spoken portfolio commands against the configured catalog
#[derive(Parser, Debug)]
#[command(name = "portfolio-voice", version)]
#[command(about = "Fuzzy voice command matching for the portfolio site", long_about = None)]
pub struct Args {
    /// Utterances to dispatch; reads lines from stdin when omitted
    pub utterances: Vec<String>,

    /// Path to the config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override the acceptance threshold
    #[arg(short, long)]
    pub threshold: Option<f64>,

    /// Print one JSON object per outcome
    #[arg(long)]
    pub json: bool,

    /// Print the command catalog and exit
    #[arg(long)]
    pub list: bool,
}

#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("io error: {0}")]
    Io(#[from] io::Error),

    #[error("failed to encode outcome: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Action(#[from] ActionError),
}

/// Build the dispatcher, applying a threshold override if given
pub fn build_dispatcher(
    config: &AppConfig,
    threshold: Option<f64>,
) -> Result<VoiceCommandDispatcher, ConfigError> {
    let dispatcher = VoiceCommandDispatcher::from_config(config)?;
    match threshold {
        Some(t) if !(0.0..=1.0).contains(&t) => Err(ConfigError::Threshold(t)),
        Some(t) => Ok(dispatcher.with_threshold(t)),
        None => Ok(dispatcher),
    }
}

/// Dispatch each utterance and write one line per outcome
pub fn dispatch_all<I, W>(
    dispatcher: &VoiceCommandDispatcher,
    utterances: I,
    json: bool,
    out: &mut W,
) -> Result<Vec<DispatchOutcome>, RunError>
where
    I: IntoIterator<Item = io::Result<String>>,
    W: Write,
{
    let mut handler = LogActionHandler::default();
    let mut outcomes = Vec::new();

    for utterance in utterances {
        let utterance = utterance?;
        if utterance.trim().is_empty() {
            continue;
        }
        let outcome = dispatcher.dispatch(&utterance, &mut handler)?;
        if json {
            writeln!(out, "{}", serde_json::to_string(&outcome)?)?;
        } else {
            writeln!(out, "{}", outcome.message())?;
        }
        outcomes.push(outcome);
    }

    log::debug!("performed {} of {} commands", handler.performed, outcomes.len());
    Ok(outcomes)
}

pub fn run(args: Args) -> Result<(), RunError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let path = args.config.clone().unwrap_or_else(config::config_path);
    let config = load_config_from(&path)?;
    let dispatcher = build_dispatcher(&config, args.threshold)?;
    log::info!(
        "loaded {} voice commands from {} (threshold {})",
        dispatcher.catalog().len(),
        path.display(),
        dispatcher.threshold()
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if args.list {
        for (phrase, action) in dispatcher.catalog().entries() {
            writeln!(out, "{phrase} → {action}")?;
        }
        return Ok(());
    }

    if args.utterances.is_empty() {
        dispatch_all(&dispatcher, io::stdin().lock().lines(), args.json, &mut out)?;
    } else {
        let utterances = args.utterances.into_iter().map(Ok);
        dispatch_all(&dispatcher, utterances, args.json, &mut out)?;
    }
    Ok(())
}

/// Parse the command line and run
pub fn run_cli() -> Result<(), RunError> {
    run(Args::parse())
}
