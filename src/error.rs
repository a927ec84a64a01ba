//! Error handling for wavpress
//!
//! Every failure mode of the conversion pipeline maps to exactly one
//! [`ConvertError`] variant. The `Display` message of each variant is the
//! user-visible detail string; callers render it directly.

use std::path::PathBuf;

use thiserror::Error;

use crate::encoder::EncoderError;

/// Result type alias for wavpress operations
pub type Result<T> = std::result::Result<T, ConvertError>;

/// Main error type for WAV to MP3 conversion
#[derive(Error, Debug)]
pub enum ConvertError {
    // Input file errors
    #[error("WAV file not found: {}", .path.display())]
    FileNotFound { path: PathBuf },

    #[error("no permission to read WAV file: {}", .path.display())]
    ReadPermission {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid WAV file {}: {reason}", .path.display())]
    InvalidFile { path: PathBuf, reason: String },

    // Output location errors
    #[error("could not create output directory: {}", .path.display())]
    DirectoryCreation {
        path: PathBuf,
        #[source]
        source: Option<std::io::Error>,
    },

    #[error("no permission to write to directory: {}", .path.display())]
    WritePermission {
        path: PathBuf,
        #[source]
        source: Option<std::io::Error>,
    },

    #[error(
        "insufficient disk space: {available_bytes} bytes available, \
         approximately {required_bytes} bytes required"
    )]
    Storage {
        available_bytes: u64,
        required_bytes: u64,
        #[source]
        source: Option<std::io::Error>,
    },

    // Encoder errors
    #[error("MP3 encoder unavailable: {detail}")]
    NativeLibrary {
        detail: String,
        #[source]
        source: Option<EncoderError>,
    },

    #[error("{detail}")]
    Conversion {
        wav_path: PathBuf,
        mp3_path: PathBuf,
        detail: String,
    },

    #[error("{detail}")]
    EmptyFile { path: PathBuf, detail: String },

    // Catch-all; must always retain the original cause
    #[error("unexpected error during conversion: {detail}")]
    Unknown {
        detail: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl ConvertError {
    /// Get the stable error code for this error kind
    pub fn error_kind(&self) -> &'static str {
        match self {
            ConvertError::FileNotFound { .. } => "FILE_NOT_FOUND",
            ConvertError::ReadPermission { .. } => "READ_PERMISSION",
            ConvertError::InvalidFile { .. } => "INVALID_FILE",
            ConvertError::DirectoryCreation { .. } => "DIRECTORY_CREATION",
            ConvertError::WritePermission { .. } => "WRITE_PERMISSION",
            ConvertError::Storage { .. } => "STORAGE",
            ConvertError::NativeLibrary { .. } => "NATIVE_LIBRARY",
            ConvertError::Conversion { .. } => "CONVERSION",
            ConvertError::EmptyFile { .. } => "EMPTY_FILE",
            ConvertError::Unknown { .. } => "UNKNOWN",
        }
    }

    /// Returns a suggested next step for this error
    pub fn recovery_hint(&self) -> &'static str {
        match self {
            Self::FileNotFound { .. } => "Check that the file path is correct",
            Self::ReadPermission { .. } => "Check the file's read permissions",
            Self::InvalidFile { .. } => {
                "Re-export the audio as an uncompressed 16-bit PCM WAV file"
            }
            Self::DirectoryCreation { .. } | Self::WritePermission { .. } => {
                "Choose an output location you can write to"
            }
            Self::Storage { .. } => "Free up disk space and try again",
            Self::NativeLibrary { .. } => {
                "Install the LAME encoder or set WAVPRESS_LAME_PATH to the executable"
            }
            Self::Conversion { .. } => "Check the encoder log output for details",
            _ => "Check the error details and try again",
        }
    }
}
