use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use lift_sign_macro::modules;
use shared_resources::config::{parse_log_level, ConfigError, Hotkey, MacroConfig};

/// Types CraftBook lift signs for every floor of an elevator.
#[derive(Parser, Debug)]
#[command(name = "lift_sign_macro", version)]
struct Args {
    /// Configuration file (default: config.json, then _config.json)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Key that writes the next sign, e.g. F4 or g
    #[arg(long)]
    hotkey: Option<String>,

    /// One of trace, debug, info, warn, error
    #[arg(long)]
    log_level: Option<String>,

    /// Print the signs in this terminal instead of typing them
    #[arg(long)]
    dry_run: bool,
}

fn load_config(args: &Args) -> Result<MacroConfig, ConfigError> {
    let mut config = MacroConfig::load(args.config.as_deref())?;
    if let Some(hotkey) = &args.hotkey {
        config.keyboard.hotkey = Hotkey::parse(hotkey)?;
    }
    if let Some(level) = &args.log_level {
        config.logging.level = parse_log_level(level)?;
    }
    Ok(config)
}

fn main() -> ExitCode {
    let args = Args::parse();

    // READ CONFIGURATION
    let config = match load_config(&args) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };

    // INITIALIZE LOGGING
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(config.logging.level)
        .init();
    tracing::debug!(?config, "configuration loaded");

    match modules::run(config, args.dry_run) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(%err, "lift sign macro stopped");
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
