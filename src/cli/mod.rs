//! CLI Module
//!
//! Command-line interface for the wavpress converter.

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::convert::DEFAULT_BITRATE_KBPS;

/// wavpress - WAV to MP3 conversion via the LAME encoder
#[derive(Parser, Debug)]
#[command(name = "wavpress")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert a WAV file to MP3
    #[command(name = "convert")]
    Convert {
        /// Input WAV file
        input: PathBuf,

        /// Target constant bitrate in kbit/s
        #[arg(short, long, default_value_t = DEFAULT_BITRATE_KBPS)]
        bitrate: u32,

        /// Use a specific LAME executable instead of discovering one
        #[arg(long)]
        lame_path: Option<PathBuf>,
    },

    /// Validate a WAV file and print its audio parameters
    #[command(name = "inspect")]
    Inspect {
        /// WAV file to inspect
        input: PathBuf,

        /// Print machine-readable JSON instead of text
        #[arg(long)]
        json: bool,
    },
}
