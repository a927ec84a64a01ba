//! WAV container inspection
//!
//! Everything that reads WAV bytes lives here. [`header`] validates the
//! RIFF/WAVE structure and extracts the audio parameters; [`sniff`]
//! classifies non-WAV files by their leading bytes so rejections can name
//! the format the user actually handed us.

pub mod header;
pub mod sniff;

pub use header::{validate, validate_file, WavError, WavInfo};
pub use sniff::SniffedFormat;
