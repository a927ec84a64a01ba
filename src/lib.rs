//! wavpress - WAV to MP3 conversion
//!
//! Validates that an input file is an encoder-compatible RIFF/WAVE stream,
//! checks that the filesystem is ready to take the output, drives the LAME
//! encoder, and verifies the artifact it leaves behind. Every failure
//! surfaces as exactly one typed [`ConvertError`].
//!
//! # Architecture
//!
//! A conversion is a fixed sequence:
//! - Preconditions: input exists, is readable and large enough; the output
//!   directory can be created, is writable, and has enough free space
//! - Validation: the RIFF/WAVE container is parsed and only 16-bit PCM
//!   is accepted
//! - Encoding: the external LAME encoder is invoked synchronously
//! - Verification: the MP3 artifact must exist on disk with non-zero size
//!
//! Calls block for the duration of encoding, so interactive callers run
//! [`Converter::convert`] on a worker thread. Concurrent conversions are
//! independent as long as they target distinct output paths; once the
//! encoder has been invoked a run cannot be cancelled.

pub mod cli;
pub mod convert;
pub mod encoder;
pub mod error;
pub mod wav;

pub use convert::{
    derive_output_path, ConversionReport, ConversionRequest, Converter, DEFAULT_BITRATE_KBPS,
};
pub use error::{ConvertError, Result};
pub use wav::{WavError, WavInfo};
