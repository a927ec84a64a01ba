//! RIFF/WAVE header validation
//!
//! Walks the chunked RIFF container of a WAV file far enough to find the
//! `fmt ` chunk, extracts the audio parameters the encoder cares about, and
//! rejects everything the encoder cannot take: non-RIFF files (classified
//! via the sniff table), compressed WAV variants, and bit depths other than
//! 16-bit PCM.
//!
//! The scan is bounded: a `fmt ` chunk that does not start within the first
//! 1024 bytes is treated as absent, so malformed or hostile files cannot
//! send the parser chasing chunk headers through gigabytes of garbage.

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use serde::Serialize;
use thiserror::Error;

use super::sniff::{printable_tag, SniffedFormat};

/// RIFF format code for uncompressed PCM samples.
pub const WAVE_FORMAT_PCM: u16 = 1;

/// The only bit depth the converter accepts.
pub const SUPPORTED_BIT_DEPTH: u16 = 16;

/// The `fmt ` chunk must start before this byte offset.
pub const FMT_SCAN_LIMIT: u64 = 1024;

/// Minimum `fmt ` payload that can hold the canonical PCM fields.
const MIN_FMT_PAYLOAD: u32 = 16;

const RIFF_TAG: &[u8; 4] = b"RIFF";
const WAVE_TAG: &[u8; 4] = b"WAVE";
const FMT_TAG: &[u8; 4] = b"fmt ";

/// Audio parameters extracted from a WAV file's `fmt ` chunk.
///
/// Derived once per validation call and immutable afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WavInfo {
    /// RIFF audio format code (1 = PCM).
    pub format_code: u16,
    /// Number of interleaved channels.
    pub channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Bits per sample.
    pub bits_per_sample: u16,
    /// Byte length of the `fmt ` chunk the fields came from.
    pub fmt_chunk_len: u32,
}

impl WavInfo {
    /// One-line human-readable description of the stream parameters.
    pub fn summary(&self) -> String {
        format!(
            "PCM, {} channel(s), {} Hz, {}-bit",
            self.channels, self.sample_rate, self.bits_per_sample
        )
    }
}

/// Reasons a byte stream fails WAV validation.
///
/// The `Display` string of each variant is the reason handed to the caller;
/// it has to stand on its own in an error dialog.
#[derive(Debug, Error)]
pub enum WavError {
    #[error("header incomplete, file is shorter than 12 bytes")]
    HeaderIncomplete,

    #[error("not a WAV file, detected format: {detected}")]
    NotRiff { detected: SniffedFormat },

    #[error("not a WAV file, expected 'WAVE' at offset 8, found '{found}'")]
    NotWave { found: String },

    #[error("corrupted WAV file, chunk truncated")]
    ChunkTruncated,

    #[error("fmt chunk not found in the first 1024 bytes")]
    FmtNotFound,

    #[error("fmt chunk too small, {len} bytes cannot hold the PCM format fields")]
    FmtTooSmall { len: u32 },

    #[error("corrupted WAV file, fmt chunk truncated")]
    FmtTruncated,

    #[error("unsupported audio format {code}, only PCM (1) is accepted")]
    UnsupportedFormat { code: u16 },

    #[error("unsupported bit depth {bits}-bit, only 16-bit is accepted")]
    UnsupportedBitDepth { bits: u16 },

    #[error("failed to read WAV data: {0}")]
    Io(#[from] io::Error),
}

/// Validate a WAV byte stream and extract its audio parameters.
///
/// Reads the 12-byte RIFF preamble, then scans sub-chunks sequentially
/// until the `fmt ` chunk is found. Returns at the first `fmt ` chunk;
/// later chunks (`data`, `LIST`, ...) are not examined. All multi-byte
/// fields are little-endian as fixed by the RIFF specification.
pub fn validate<R: Read>(mut reader: R) -> Result<WavInfo, WavError> {
    let mut preamble = [0u8; 12];
    read_exact_or(&mut reader, &mut preamble, WavError::HeaderIncomplete)?;

    if &preamble[0..4] != RIFF_TAG {
        return Err(WavError::NotRiff {
            detected: SniffedFormat::from_leading_bytes(&preamble[0..4]),
        });
    }
    if &preamble[8..12] != WAVE_TAG {
        return Err(WavError::NotWave {
            found: printable_tag(&preamble[8..12]),
        });
    }

    let mut cursor: u64 = 12;
    while cursor < FMT_SCAN_LIMIT {
        let mut chunk_header = [0u8; 8];
        read_exact_or(&mut reader, &mut chunk_header, WavError::ChunkTruncated)?;

        let chunk_len = u32_le(&chunk_header, 4);
        if &chunk_header[0..4] == FMT_TAG {
            return parse_fmt_payload(&mut reader, chunk_len);
        }

        skip_or(&mut reader, u64::from(chunk_len), WavError::ChunkTruncated)?;
        cursor += 8 + u64::from(chunk_len);
    }

    Err(WavError::FmtNotFound)
}

/// Open `path` and validate it as a WAV file.
pub fn validate_file<P: AsRef<Path>>(path: P) -> Result<WavInfo, WavError> {
    let file = File::open(path.as_ref())?;
    validate(BufReader::new(file))
}

/// Consume the declared `fmt ` payload and extract the PCM fields.
///
/// Only the 16-byte canonical prefix is buffered; the remainder of the
/// declared payload (extension fields of non-canonical fmt chunks) is
/// drained so a forged multi-gigabyte size cannot force an allocation,
/// while a short payload still registers as truncation.
fn parse_fmt_payload<R: Read>(reader: &mut R, chunk_len: u32) -> Result<WavInfo, WavError> {
    if chunk_len < MIN_FMT_PAYLOAD {
        return Err(WavError::FmtTooSmall { len: chunk_len });
    }

    let mut fields = [0u8; MIN_FMT_PAYLOAD as usize];
    read_exact_or(reader, &mut fields, WavError::FmtTruncated)?;
    skip_or(
        reader,
        u64::from(chunk_len - MIN_FMT_PAYLOAD),
        WavError::FmtTruncated,
    )?;

    let format_code = u16_le(&fields, 0);
    let channels = u16_le(&fields, 2);
    let sample_rate = u32_le(&fields, 4);
    let bits_per_sample = u16_le(&fields, 14);

    if format_code != WAVE_FORMAT_PCM {
        return Err(WavError::UnsupportedFormat { code: format_code });
    }
    if bits_per_sample != SUPPORTED_BIT_DEPTH {
        return Err(WavError::UnsupportedBitDepth {
            bits: bits_per_sample,
        });
    }

    Ok(WavInfo {
        format_code,
        channels,
        sample_rate,
        bits_per_sample,
        fmt_chunk_len: chunk_len,
    })
}

/// `read_exact` that reports end-of-stream as the given validation error.
fn read_exact_or<R: Read>(
    reader: &mut R,
    buf: &mut [u8],
    on_eof: WavError,
) -> Result<(), WavError> {
    reader.read_exact(buf).map_err(|e| {
        if e.kind() == io::ErrorKind::UnexpectedEof {
            on_eof
        } else {
            WavError::Io(e)
        }
    })
}

/// Discard exactly `len` bytes; a short stream yields the given error.
fn skip_or<R: Read>(reader: &mut R, len: u64, on_short: WavError) -> Result<(), WavError> {
    let copied = io::copy(&mut reader.by_ref().take(len), &mut io::sink())?;
    if copied < len {
        return Err(on_short);
    }
    Ok(())
}

fn u16_le(buf: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([buf[offset], buf[offset + 1]])
}

fn u32_le(buf: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        buf[offset],
        buf[offset + 1],
        buf[offset + 2],
        buf[offset + 3],
    ])
}
