//! CLI Command Implementations
//!
//! Implements the actual logic for each CLI command.

use std::io;
use std::path::Path;

use log::info;

use crate::convert::{ConversionRequest, Converter};
use crate::encoder::LameEncoder;
use crate::error::{ConvertError, Result};
use crate::wav::{self, WavError};

/// Convert a WAV file to MP3 next to it.
pub fn convert(input: &Path, bitrate: u32, lame_path: Option<&Path>) -> Result<()> {
    let request = ConversionRequest::new(input).with_bitrate(bitrate);

    let report = match lame_path {
        Some(exe) => {
            Converter::with_encoder(LameEncoder::with_executable(exe)).convert(&request)?
        }
        None => Converter::new().convert(&request)?,
    };

    println!("Converted: {}", report.mp3_path.display());
    println!(
        "  Input:  {} bytes, {}",
        report.wav_bytes,
        report.wav_info.summary()
    );
    println!(
        "  Output: {} bytes ({:.1}:1 in {} ms)",
        report.mp3_bytes,
        report.compression_ratio(),
        report.elapsed_ms
    );

    Ok(())
}

/// Validate a WAV file and print its audio parameters.
pub fn inspect(input: &Path, json: bool) -> Result<()> {
    info!("inspecting '{}'", input.display());

    let wav_info = wav::validate_file(input).map_err(|e| match e {
        WavError::Io(source) if source.kind() == io::ErrorKind::NotFound => {
            ConvertError::FileNotFound {
                path: input.to_path_buf(),
            }
        }
        other => ConvertError::InvalidFile {
            path: input.to_path_buf(),
            reason: other.to_string(),
        },
    })?;

    if json {
        let rendered =
            serde_json::to_string_pretty(&wav_info).map_err(|e| ConvertError::Unknown {
                detail: "serializing inspection output".to_string(),
                source: Box::new(e),
            })?;
        println!("{}", rendered);
        return Ok(());
    }

    println!("WAV: {}", input.display());
    println!("  Format code: {} (PCM)", wav_info.format_code);
    println!("  Channels:    {}", wav_info.channels);
    println!("  Sample rate: {} Hz", wav_info.sample_rate);
    println!("  Bit depth:   {}-bit", wav_info.bits_per_sample);
    println!("  fmt chunk:   {} bytes", wav_info.fmt_chunk_len);

    Ok(())
}
