//! MP3 encoder interfaces and implementations
//!
//! This module provides:
//! - `Mp3Encoder` trait for anything that can turn a WAV file into an MP3
//! - `LameEncoder`, the production adapter over the LAME command-line tool
//! - Mock implementations for exercising the pipeline without LAME

mod lame;
mod mock;

pub use lame::{LameEncoder, LAME_PATH_ENV};
pub use mock::*;

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Faults raised by an encoder backend itself, as opposed to a rejected
/// input file. These surface to callers as native-library failures.
#[derive(Debug, Error)]
pub enum EncoderError {
    #[error("encoder unavailable: {detail}")]
    Unavailable { detail: String },

    #[error("permission denied launching encoder '{}'", .path.display())]
    Permission {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("encoder I/O failure: {0}")]
    Io(#[from] io::Error),
}

/// Trait that all MP3 encoder backends must implement
pub trait Mp3Encoder: Send + Sync {
    /// Encode a WAV file to MP3.
    ///
    /// # Arguments
    /// * `wav_path` - Path to the validated input WAV file
    /// * `mp3_path` - Path where the MP3 should be written
    /// * `bitrate_kbps` - Target constant bitrate in kbit/s
    ///
    /// # Returns
    /// `Ok(true)` when the backend produced an MP3, `Ok(false)` when the
    /// backend ran but rejected the job, and `Err` only when the backend
    /// itself could not be used at all.
    fn encode(&self, wav_path: &Path, mp3_path: &Path, bitrate_kbps: u32)
        -> Result<bool, EncoderError>;

    /// Short name for log lines.
    fn name(&self) -> &str {
        "encoder"
    }

    /// Check whether the backend can be used right now.
    fn is_available(&self) -> bool {
        true
    }
}
