//! LAME command-line encoder adapter
//!
//! Shells out to the `lame` executable rather than binding libmp3lame
//! directly, so the crate carries no native build baggage. Discovery runs
//! once per process and the outcome is cached; a machine without LAME
//! fails fast with an unavailability error instead of retrying discovery
//! on every call.

use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::OnceLock;

use log::{debug, warn};

use super::{EncoderError, Mp3Encoder};

/// Environment variable that overrides LAME executable discovery.
pub const LAME_PATH_ENV: &str = "WAVPRESS_LAME_PATH";

/// Conventional install locations tried after a PATH lookup fails.
const FALLBACK_LOCATIONS: &[&str] = &[
    "/usr/bin/lame",
    "/usr/local/bin/lame",
    "/opt/homebrew/bin/lame",
];

/// Discovery runs once per process; every encoder instance without an
/// explicit override shares the outcome.
static DISCOVERED: OnceLock<Option<PathBuf>> = OnceLock::new();

/// Production encoder backed by the LAME command-line tool.
pub struct LameEncoder {
    override_path: Option<PathBuf>,
}

impl LameEncoder {
    /// Encoder that discovers `lame` via the environment and PATH.
    pub fn new() -> Self {
        Self {
            override_path: None,
        }
    }

    /// Encoder pinned to a specific executable, skipping discovery.
    pub fn with_executable<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            override_path: Some(path.into()),
        }
    }

    /// Resolve the `lame` executable.
    ///
    /// Resolution order: explicit override, the [`LAME_PATH_ENV`] variable,
    /// a PATH lookup, then a handful of conventional install locations.
    /// Discovery is idempotent; repeated calls return the cached outcome.
    fn executable(&self) -> Result<&Path, EncoderError> {
        if let Some(path) = &self.override_path {
            return Ok(path);
        }

        let discovered = DISCOVERED.get_or_init(|| {
            if let Ok(path) = std::env::var(LAME_PATH_ENV) {
                if !path.is_empty() {
                    debug!("using LAME executable from {}: {}", LAME_PATH_ENV, path);
                    return Some(PathBuf::from(path));
                }
            }
            if let Ok(path) = which::which("lame") {
                debug!("found LAME on PATH: {}", path.display());
                return Some(path);
            }
            FALLBACK_LOCATIONS
                .iter()
                .map(Path::new)
                .find(|p| p.is_file())
                .map(Path::to_path_buf)
        });

        discovered.as_deref().ok_or_else(|| EncoderError::Unavailable {
            detail: format!(
                "no 'lame' executable found; install LAME or set {}",
                LAME_PATH_ENV
            ),
        })
    }
}

impl Default for LameEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Mp3Encoder for LameEncoder {
    fn encode(
        &self,
        wav_path: &Path,
        mp3_path: &Path,
        bitrate_kbps: u32,
    ) -> Result<bool, EncoderError> {
        let exe = self.executable()?;
        debug!(
            "invoking {} at {} kbps: '{}' -> '{}'",
            exe.display(),
            bitrate_kbps,
            wav_path.display(),
            mp3_path.display()
        );

        let output = Command::new(exe)
            .arg("-b")
            .arg(bitrate_kbps.to_string())
            .arg("--silent")
            .arg(wav_path)
            .arg(mp3_path)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| match e.kind() {
                io::ErrorKind::NotFound => EncoderError::Unavailable {
                    detail: format!("encoder executable '{}' not found", exe.display()),
                },
                io::ErrorKind::PermissionDenied => EncoderError::Permission {
                    path: exe.to_path_buf(),
                    source: e,
                },
                _ => EncoderError::Io(e),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            warn!(
                "lame exited with {} for '{}': {}",
                output.status,
                wav_path.display(),
                stderr.trim()
            );
            return Ok(false);
        }
        Ok(true)
    }

    fn name(&self) -> &str {
        "lame"
    }

    fn is_available(&self) -> bool {
        self.executable().is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_executable_is_unavailable() {
        let encoder = LameEncoder::with_executable("/definitely/not/installed/lame");
        let err = encoder
            .encode(Path::new("in.wav"), Path::new("out.mp3"), 128)
            .unwrap_err();
        assert!(matches!(err, EncoderError::Unavailable { .. }));
    }

    #[test]
    fn test_name_identifies_backend() {
        assert_eq!(LameEncoder::new().name(), "lame");
    }

    #[cfg(unix)]
    mod scripted {
        use super::*;
        use std::fs;
        use std::os::unix::fs::PermissionsExt;
        use tempfile::TempDir;

        /// Drop a tiny shell script in place of the real encoder.
        fn fake_lame(dir: &TempDir, body: &str) -> PathBuf {
            let path = dir.path().join("lame");
            fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
            fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
            path
        }

        #[test]
        fn test_zero_exit_is_success() {
            let dir = TempDir::new().unwrap();
            let exe = fake_lame(&dir, "exit 0");
            let encoder = LameEncoder::with_executable(exe);
            let ok = encoder
                .encode(Path::new("in.wav"), Path::new("out.mp3"), 128)
                .unwrap();
            assert!(ok);
        }

        #[test]
        fn test_nonzero_exit_is_rejection_not_fault() {
            let dir = TempDir::new().unwrap();
            let exe = fake_lame(&dir, "echo 'bad input' >&2; exit 1");
            let encoder = LameEncoder::with_executable(exe);
            let ok = encoder
                .encode(Path::new("in.wav"), Path::new("out.mp3"), 128)
                .unwrap();
            assert!(!ok);
        }

        #[test]
        fn test_bitrate_reaches_command_line() {
            let dir = TempDir::new().unwrap();
            let args_file = dir.path().join("args.txt");
            let exe = fake_lame(&dir, &format!("echo \"$@\" > '{}'", args_file.display()));
            let encoder = LameEncoder::with_executable(exe);
            encoder
                .encode(Path::new("in.wav"), Path::new("out.mp3"), 192)
                .unwrap();
            let recorded = fs::read_to_string(&args_file).unwrap();
            assert!(recorded.contains("-b 192"));
            assert!(recorded.contains("--silent"));
        }

        #[test]
        fn test_unexecutable_file_is_permission_fault() {
            let dir = TempDir::new().unwrap();
            let path = dir.path().join("lame");
            fs::write(&path, "#!/bin/sh\nexit 0\n").unwrap();
            fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();
            let encoder = LameEncoder::with_executable(&path);
            let err = encoder
                .encode(Path::new("in.wav"), Path::new("out.mp3"), 128)
                .unwrap_err();
            assert!(matches!(err, EncoderError::Permission { .. }));
        }
    }
}
