//! Conversion orchestration
//!
//! Sequences one conversion run: derive the output path, check the
//! filesystem preconditions, validate the WAV container, invoke the
//! encoder, verify the artifact. Every failure leaves as exactly one
//! [`ConvertError`] variant.
//!
//! The whole run is synchronous and blocks for the duration of encoding,
//! so interactive callers must dispatch it to a worker thread. Once the
//! encoder has been invoked there is no cancellation hook; abandoning a
//! run is only possible before [`Converter::convert`] is called.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

use log::{debug, info, warn};
use serde::Serialize;

use super::preconditions;
use crate::encoder::{EncoderError, LameEncoder, Mp3Encoder};
use crate::error::{ConvertError, Result};
use crate::wav::{self, WavError, WavInfo};

/// Bitrate used when the caller does not specify one.
pub const DEFAULT_BITRATE_KBPS: u32 = 128;

/// One conversion job: an input WAV and a target bitrate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionRequest {
    pub input_path: PathBuf,
    pub bitrate_kbps: u32,
}

impl ConversionRequest {
    /// Request at the default bitrate.
    pub fn new<P: Into<PathBuf>>(input_path: P) -> Self {
        Self {
            input_path: input_path.into(),
            bitrate_kbps: DEFAULT_BITRATE_KBPS,
        }
    }

    pub fn with_bitrate(mut self, bitrate_kbps: u32) -> Self {
        self.bitrate_kbps = bitrate_kbps;
        self
    }
}

/// What a successful conversion produced.
#[derive(Debug, Clone, Serialize)]
pub struct ConversionReport {
    /// Path of the MP3 artifact, verified present and non-empty.
    pub mp3_path: PathBuf,
    /// Input size in bytes.
    pub wav_bytes: u64,
    /// Artifact size in bytes, always greater than zero.
    pub mp3_bytes: u64,
    /// Audio parameters of the validated input.
    pub wav_info: WavInfo,
    /// Wall-clock time of the whole run in milliseconds.
    pub elapsed_ms: u64,
}

impl ConversionReport {
    /// Input-to-output size ratio.
    pub fn compression_ratio(&self) -> f64 {
        self.wav_bytes as f64 / self.mp3_bytes as f64
    }
}

/// Runs conversion requests against an encoder backend.
///
/// Each call to [`convert`](Converter::convert) is an independent run with
/// no shared mutable state, so one `Converter` may serve concurrent
/// requests as long as they target distinct output paths. Requests
/// hitting the same output path race with last-writer-wins semantics;
/// serializing those is the caller's job.
pub struct Converter<E: Mp3Encoder = LameEncoder> {
    encoder: E,
}

impl Converter<LameEncoder> {
    /// Converter backed by the LAME command-line encoder.
    pub fn new() -> Self {
        Self {
            encoder: LameEncoder::new(),
        }
    }
}

impl Default for Converter<LameEncoder> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Mp3Encoder> Converter<E> {
    /// Converter over a caller-supplied encoder backend.
    pub fn with_encoder(encoder: E) -> Self {
        Self { encoder }
    }

    pub fn encoder(&self) -> &E {
        &self.encoder
    }

    /// Convert one WAV file to MP3.
    ///
    /// The output path is derived from the input path; see
    /// [`derive_output_path`]. Blocks until the encoder finishes.
    pub fn convert(&self, request: &ConversionRequest) -> Result<ConversionReport> {
        let started = Instant::now();
        let input = request.input_path.as_path();
        let output = derive_output_path(input);

        info!(
            "converting '{}' -> '{}' at {} kbps using {}",
            input.display(),
            output.display(),
            request.bitrate_kbps,
            self.encoder.name()
        );

        let wav_bytes = preconditions::check(input, &output)?;

        debug!("validating WAV container of '{}'", input.display());
        let wav_info =
            wav::validate_file(input).map_err(|e| classify_wav_error(input, e))?;
        debug!("validated input: {}", wav_info.summary());

        let succeeded = self
            .encoder
            .encode(input, &output, request.bitrate_kbps)
            .map_err(|e| classify_encoder_error(&output, e))?;

        if !succeeded {
            return Err(conversion_failure(
                input,
                &output,
                wav_bytes,
                started.elapsed().as_millis() as u64,
            ));
        }

        let mp3_bytes = verify_artifact(&output)?;
        let elapsed_ms = started.elapsed().as_millis() as u64;

        let report = ConversionReport {
            mp3_path: output,
            wav_bytes,
            mp3_bytes,
            wav_info,
            elapsed_ms,
        };
        info!(
            "wrote '{}': {} bytes from {} bytes in {} ms ({:.1}:1)",
            report.mp3_path.display(),
            report.mp3_bytes,
            report.wav_bytes,
            report.elapsed_ms,
            report.compression_ratio()
        );
        Ok(report)
    }
}

/// Derive the MP3 output path from the input path.
///
/// A trailing `.wav` extension (any case) is replaced with `.mp3`. For any
/// other input, `.mp3` is appended, so the output path never collides with
/// the input path.
pub fn derive_output_path(input: &Path) -> PathBuf {
    let has_wav_ext = input
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("wav"))
        .unwrap_or(false);
    if has_wav_ext {
        input.with_extension("mp3")
    } else {
        let mut raw = input.as_os_str().to_os_string();
        raw.push(".mp3");
        PathBuf::from(raw)
    }
}

fn classify_wav_error(input: &Path, err: WavError) -> ConvertError {
    warn!("rejecting '{}': {}", input.display(), err);
    ConvertError::InvalidFile {
        path: input.to_path_buf(),
        reason: err.to_string(),
    }
}

fn classify_encoder_error(output: &Path, err: EncoderError) -> ConvertError {
    match err {
        EncoderError::Unavailable { ref detail } => {
            let detail = detail.clone();
            ConvertError::NativeLibrary {
                detail,
                source: Some(err),
            }
        }
        EncoderError::Permission { source, .. } => ConvertError::WritePermission {
            path: output.to_path_buf(),
            source: Some(source),
        },
        EncoderError::Io(source) => ConvertError::Unknown {
            detail: format!("encoder I/O fault while writing '{}'", output.display()),
            source: Box::new(source),
        },
    }
}

/// Failure outcome for an encoder that ran but reported no success. The
/// detail names the canonical suspects along with the concrete paths and
/// sizes; callers surface it verbatim.
fn conversion_failure(
    input: &Path,
    output: &Path,
    wav_bytes: u64,
    elapsed_ms: u64,
) -> ConvertError {
    let artifact = match fs::metadata(output) {
        Ok(m) => format!("{} bytes of partial output", m.len()),
        Err(_) => "no output written".to_string(),
    };
    ConvertError::Conversion {
        wav_path: input.to_path_buf(),
        mp3_path: output.to_path_buf(),
        detail: format!(
            "encoder reported failure after {} ms for '{}' ({} bytes) -> '{}' ({}); \
             possible causes: corrupt WAV data, an unsupported audio format or bit depth, \
             a file I/O failure, encoder initialization failure, or an error during encoding",
            elapsed_ms,
            input.display(),
            wav_bytes,
            output.display(),
            artifact
        ),
    }
}

/// Confirm the artifact is on disk with non-zero size; returns its length.
fn verify_artifact(output: &Path) -> Result<u64> {
    let len = match fs::metadata(output) {
        Ok(m) => m.len(),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(ConvertError::EmptyFile {
                path: output.to_path_buf(),
                detail: format!(
                    "encoder reported success but no MP3 exists at '{}'",
                    output.display()
                ),
            });
        }
        Err(e) => {
            return Err(ConvertError::Unknown {
                detail: format!("verifying artifact '{}'", output.display()),
                source: Box::new(e),
            });
        }
    };
    if len == 0 {
        return Err(ConvertError::EmptyFile {
            path: output.to_path_buf(),
            detail: format!(
                "encoder reported success but the MP3 at '{}' is empty",
                output.display()
            ),
        });
    }
    Ok(len)
}
