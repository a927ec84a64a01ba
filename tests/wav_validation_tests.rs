//! WAV Validation Tests
//!
//! File-level tests for the RIFF/WAVE validator: fixtures written by a
//! real WAV writer plus handcrafted corrupt files on disk.

use std::fs;
use std::path::PathBuf;

use pretty_assertions::assert_eq;
use tempfile::TempDir;

use wavpress::wav::{self, WavError};

/// Helper to write a WAV fixture through hound.
fn create_fixture(dir: &TempDir, name: &str, channels: u16, sample_rate: u32) -> PathBuf {
    let path = dir.path().join(name);
    let spec = hound::WavSpec {
        channels,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(&path, spec).unwrap();
    for i in 0..(channels as i32 * 500) {
        writer.write_sample((i % 100) as i16).unwrap();
    }
    writer.finalize().unwrap();
    path
}

/// Handcrafted canonical WAV bytes with a chosen format code and depth.
fn raw_wav(format_code: u16, bits_per_sample: u16) -> Vec<u8> {
    let mut v = Vec::new();
    v.extend_from_slice(b"RIFF");
    v.extend_from_slice(&36u32.to_le_bytes());
    v.extend_from_slice(b"WAVE");
    v.extend_from_slice(b"fmt ");
    v.extend_from_slice(&16u32.to_le_bytes());
    v.extend_from_slice(&format_code.to_le_bytes());
    v.extend_from_slice(&1u16.to_le_bytes());
    v.extend_from_slice(&22_050u32.to_le_bytes());
    v.extend_from_slice(&44_100u32.to_le_bytes());
    v.extend_from_slice(&2u16.to_le_bytes());
    v.extend_from_slice(&bits_per_sample.to_le_bytes());
    v.extend_from_slice(b"data");
    v.extend_from_slice(&0u32.to_le_bytes());
    v
}

// === Accepted Files ===

#[test]
fn test_mono_fixture_validates() {
    let dir = TempDir::new().unwrap();
    let path = create_fixture(&dir, "mono.wav", 1, 44_100);

    let info = wav::validate_file(&path).unwrap();
    assert_eq!(info.format_code, 1);
    assert_eq!(info.channels, 1);
    assert_eq!(info.sample_rate, 44_100);
    assert_eq!(info.bits_per_sample, 16);
}

#[test]
fn test_stereo_48k_fixture_validates() {
    let dir = TempDir::new().unwrap();
    let path = create_fixture(&dir, "stereo.wav", 2, 48_000);

    let info = wav::validate_file(&path).unwrap();
    assert_eq!(info.channels, 2);
    assert_eq!(info.sample_rate, 48_000);
}

#[test]
fn test_data_chunk_before_fmt_is_skipped() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("reordered.wav");

    let mut v = Vec::new();
    v.extend_from_slice(b"RIFF");
    v.extend_from_slice(&0u32.to_le_bytes());
    v.extend_from_slice(b"WAVE");
    v.extend_from_slice(b"data");
    v.extend_from_slice(&100u32.to_le_bytes());
    v.extend_from_slice(&[0u8; 100]);
    v.extend_from_slice(&raw_wav(1, 16)[12..]);
    fs::write(&path, v).unwrap();

    let info = wav::validate_file(&path).unwrap();
    assert_eq!(info.bits_per_sample, 16);
}

#[test]
fn test_descriptor_serializes_for_inspection() {
    let dir = TempDir::new().unwrap();
    let path = create_fixture(&dir, "mono.wav", 1, 44_100);

    let info = wav::validate_file(&path).unwrap();
    let json = serde_json::to_string(&info).unwrap();
    assert!(json.contains("\"sample_rate\":44100"));
    assert!(json.contains("\"bits_per_sample\":16"));
}

// === Rejected Files ===

#[test]
fn test_float_wav_rejected_with_code() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("float.wav");
    fs::write(&path, raw_wav(3, 32)).unwrap();

    let err = wav::validate_file(&path).unwrap_err();
    assert!(matches!(err, WavError::UnsupportedFormat { code: 3 }));
    assert!(err.to_string().contains('3'));
}

#[test]
fn test_eight_bit_wav_rejected_with_depth() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("eight.wav");
    fs::write(&path, raw_wav(1, 8)).unwrap();

    let err = wav::validate_file(&path).unwrap_err();
    assert!(matches!(err, WavError::UnsupportedBitDepth { bits: 8 }));
    assert!(err.to_string().contains("8-bit"));
}

#[test]
fn test_flac_file_classified() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("audio.wav");
    let mut bytes = b"fLaC".to_vec();
    bytes.resize(64, 0);
    fs::write(&path, bytes).unwrap();

    let err = wav::validate_file(&path).unwrap_err();
    assert!(err.to_string().contains("FLAC"));
}

#[test]
fn test_truncated_file_reports_truncation() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("cut.wav");
    let mut bytes = raw_wav(1, 16);
    bytes.truncate(30); // mid fmt payload
    fs::write(&path, bytes).unwrap();

    let err = wav::validate_file(&path).unwrap_err();
    assert!(matches!(err, WavError::FmtTruncated));
}

#[test]
fn test_missing_file_is_io_error() {
    let err = wav::validate_file("no/such/file.wav").unwrap_err();
    assert!(matches!(err, WavError::Io(_)));
}

#[test]
fn test_directory_input_is_io_error() {
    let dir = TempDir::new().unwrap();
    let err = wav::validate_file(dir.path()).unwrap_err();
    assert!(matches!(err, WavError::Io(_)));
}
