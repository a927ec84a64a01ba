//! wavpress CLI - WAV to MP3 converter
//!
//! Command-line interface for the wavpress conversion core.

use std::error::Error;
use std::process::ExitCode;

use clap::Parser;
use env_logger::Env;
use log::info;

use wavpress::cli::{commands, Cli, Commands};
use wavpress::Result;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter)).init();

    info!("wavpress v{}", env!("CARGO_PKG_VERSION"));

    match handle_command(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error[{}]: {}", e.error_kind(), e);
            let mut source = e.source();
            while let Some(cause) = source {
                eprintln!("  caused by: {}", cause);
                source = cause.source();
            }
            eprintln!("  hint: {}", e.recovery_hint());
            ExitCode::from(1)
        }
    }
}

fn handle_command(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Convert {
            input,
            bitrate,
            lame_path,
        } => commands::convert(&input, bitrate, lame_path.as_deref()),
        Commands::Inspect { input, json } => commands::inspect(&input, json),
    }
}
