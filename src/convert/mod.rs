//! WAV to MP3 conversion pipeline
//!
//! [`preconditions`] interrogates the filesystem before any work starts;
//! [`orchestrator`] drives a full run from request to verified artifact.

pub mod orchestrator;
pub mod preconditions;

pub use orchestrator::{
    derive_output_path, ConversionReport, ConversionRequest, Converter, DEFAULT_BITRATE_KBPS,
};
pub use preconditions::MIN_WAV_FILE_LEN;
