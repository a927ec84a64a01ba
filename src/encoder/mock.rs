//! Mock encoder implementations for testing
//!
//! These backends don't produce real MP3 audio but simulate every outcome
//! an encoder can have, so the conversion pipeline can be exercised on
//! machines without LAME installed.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::{EncoderError, Mp3Encoder};

/// One recorded `encode` invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeCall {
    pub wav_path: PathBuf,
    pub mp3_path: PathBuf,
    pub bitrate_kbps: u32,
}

/// Mock encoder that fabricates an artifact and records its invocations.
pub struct MockEncoder {
    artifact_bytes: u64,
    calls: Mutex<Vec<EncodeCall>>,
}

impl MockEncoder {
    /// Mock producing a plausibly-sized artifact.
    pub fn new() -> Self {
        Self::with_artifact_bytes(1024)
    }

    /// Mock producing exactly `artifact_bytes` bytes of output. Zero is
    /// allowed and yields an empty artifact file.
    pub fn with_artifact_bytes(artifact_bytes: u64) -> Self {
        Self {
            artifact_bytes,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Invocations seen so far, oldest first.
    pub fn calls(&self) -> Vec<EncodeCall> {
        self.calls.lock().unwrap().clone()
    }
}

impl Default for MockEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Mp3Encoder for MockEncoder {
    fn encode(
        &self,
        wav_path: &Path,
        mp3_path: &Path,
        bitrate_kbps: u32,
    ) -> Result<bool, EncoderError> {
        self.calls.lock().unwrap().push(EncodeCall {
            wav_path: wav_path.to_path_buf(),
            mp3_path: mp3_path.to_path_buf(),
            bitrate_kbps,
        });
        fs::write(mp3_path, vec![0u8; self.artifact_bytes as usize])?;
        Ok(true)
    }

    fn name(&self) -> &str {
        "mock"
    }
}

/// Mock encoder that claims success without ever touching the output path.
pub struct NoOutputEncoder;

impl Mp3Encoder for NoOutputEncoder {
    fn encode(&self, _wav: &Path, _mp3: &Path, _bitrate_kbps: u32) -> Result<bool, EncoderError> {
        Ok(true)
    }

    fn name(&self) -> &str {
        "no-output"
    }
}

/// Mock encoder that runs but rejects every job.
pub struct FailingEncoder;

impl Mp3Encoder for FailingEncoder {
    fn encode(&self, _wav: &Path, _mp3: &Path, _bitrate_kbps: u32) -> Result<bool, EncoderError> {
        Ok(false)
    }

    fn name(&self) -> &str {
        "failing"
    }
}

/// Mock encoder whose backend is permanently missing.
pub struct UnavailableEncoder;

impl Mp3Encoder for UnavailableEncoder {
    fn encode(&self, _wav: &Path, _mp3: &Path, _bitrate_kbps: u32) -> Result<bool, EncoderError> {
        Err(EncoderError::Unavailable {
            detail: "mock backend intentionally absent".to_string(),
        })
    }

    fn name(&self) -> &str {
        "unavailable"
    }

    fn is_available(&self) -> bool {
        false
    }
}

/// Mock encoder that raises a permission-class fault on every call.
pub struct PermissionDeniedEncoder;

impl Mp3Encoder for PermissionDeniedEncoder {
    fn encode(&self, _wav: &Path, _mp3: &Path, _bitrate_kbps: u32) -> Result<bool, EncoderError> {
        Err(EncoderError::Permission {
            path: PathBuf::from("mock-lame"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "mock permission fault"),
        })
    }

    fn name(&self) -> &str {
        "permission-denied"
    }
}

/// Mock encoder that raises an I/O-class fault on every call.
pub struct IoFaultEncoder;

impl Mp3Encoder for IoFaultEncoder {
    fn encode(&self, _wav: &Path, _mp3: &Path, _bitrate_kbps: u32) -> Result<bool, EncoderError> {
        Err(EncoderError::Io(io::Error::new(
            io::ErrorKind::BrokenPipe,
            "mock I/O fault",
        )))
    }

    fn name(&self) -> &str {
        "io-fault"
    }
}
