//! darkroom-replay: run a recorded event script without a window or GPU.
//!
//! Prints the final canvas state as JSON on stdout.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use darkroom::replay::{run_script, ReplayScript};
use darkroom::{EditorConfig, ReplayError};

/// Replay a recorded darkroom event script against a headless engine.
#[derive(Parser, Debug)]
#[command(
    name = "darkroom-replay",
    about = "Replay recorded canvas input without a window or GPU",
    long_about = "Feed a JSON event script through the darkroom canvas handlers and\n\
                  print the resulting viewport, widget values, mask vertex count and\n\
                  recompute runs as JSON.\n\n\
                  Example:\n  \
                  darkroom-replay session.json editor-config.json"
)]
struct Args {
    /// Event script (JSON).
    #[arg(value_name = "SCRIPT.json")]
    script: PathBuf,

    /// Editor configuration (JSON). Defaults apply when omitted.
    #[arg(value_name = "CONFIG.json")]
    config: Option<PathBuf>,
}

fn load_config(path: Option<&PathBuf>) -> Result<EditorConfig, ReplayError> {
    match path {
        Some(path) => {
            let json = std::fs::read_to_string(path)?;
            Ok(EditorConfig::from_json(&json)?)
        }
        None => Ok(EditorConfig::default()),
    }
}

fn run(args: Args) -> Result<(), ReplayError> {
    let config = load_config(args.config.as_ref())?;

    // RUST_LOG, when set, overrides the configured level
    env_logger::Builder::new()
        .filter_level(config.log_level.to_level_filter())
        .parse_default_env()
        .init();

    let script = ReplayScript::load(&args.script)?;
    log::info!("Loaded {} events from {}", script.events.len(), args.script.display());
    let summary = run_script(&script, config)?;
    println!("{}", summary.to_json()?);
    Ok(())
}

fn main() -> ExitCode {
    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Replay error: {}", e);
            ExitCode::FAILURE
        }
    }
}
