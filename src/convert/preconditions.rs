//! Filesystem preconditions for a conversion run
//!
//! Every check here runs before a single input byte is parsed and before
//! the encoder is touched. The checks are ordered and short-circuit on the
//! first failure, so the caller always sees the most fundamental problem
//! first (a missing file, not an unwritable output directory).

use std::fs::{self, File};
use std::io;
use std::path::Path;

use log::{debug, warn};

use crate::error::ConvertError;

/// Minimum byte length of a canonical WAV file: 12-byte RIFF preamble,
/// 24-byte fmt chunk, 8-byte data chunk header.
pub const MIN_WAV_FILE_LEN: u64 = 44;

/// Check everything the filesystem can tell us about a conversion before
/// running it.
///
/// Order: input exists, input non-empty, input at least 44 bytes, input
/// readable, output parent creatable, output parent writable, free space
/// at the output at least the input size (a conservative proxy for the
/// MP3 size, which is normally smaller).
///
/// Returns the input length in bytes on success.
pub fn check(input: &Path, output: &Path) -> Result<u64, ConvertError> {
    let metadata = match fs::metadata(input) {
        Ok(m) => m,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            warn!("input does not exist: '{}'", input.display());
            return Err(ConvertError::FileNotFound {
                path: input.to_path_buf(),
            });
        }
        Err(e) if e.kind() == io::ErrorKind::PermissionDenied => {
            warn!("input is not readable: '{}'", input.display());
            return Err(ConvertError::ReadPermission {
                path: input.to_path_buf(),
                source: e,
            });
        }
        Err(e) => {
            warn!("metadata query failed for '{}': {}", input.display(), e);
            return Err(ConvertError::Unknown {
                detail: format!("querying metadata of '{}'", input.display()),
                source: Box::new(e),
            });
        }
    };

    let input_len = metadata.len();
    if input_len == 0 {
        warn!("input is empty: '{}'", input.display());
        return Err(ConvertError::InvalidFile {
            path: input.to_path_buf(),
            reason: "file is empty".to_string(),
        });
    }
    if input_len < MIN_WAV_FILE_LEN {
        warn!(
            "input is {} bytes, below the minimal WAV size: '{}'",
            input_len,
            input.display()
        );
        return Err(ConvertError::InvalidFile {
            path: input.to_path_buf(),
            reason: format!(
                "file too small ({} bytes), minimum {} bytes",
                input_len, MIN_WAV_FILE_LEN
            ),
        });
    }

    // Opening the file is the only reliable readability probe; the handle
    // is dropped immediately.
    if let Err(e) = File::open(input) {
        warn!("cannot open input for reading: '{}': {}", input.display(), e);
        return Err(match e.kind() {
            io::ErrorKind::NotFound => ConvertError::FileNotFound {
                path: input.to_path_buf(),
            },
            io::ErrorKind::PermissionDenied => ConvertError::ReadPermission {
                path: input.to_path_buf(),
                source: e,
            },
            _ => ConvertError::Unknown {
                detail: format!("probing readability of '{}'", input.display()),
                source: Box::new(e),
            },
        });
    }

    let parent = output_parent(output);
    if let Err(e) = fs::create_dir_all(parent) {
        // Creation may lose a race with another creator; only a directory
        // that is still absent afterwards counts as a failure.
        if !parent.is_dir() {
            warn!("cannot create output directory '{}'", parent.display());
            return Err(ConvertError::DirectoryCreation {
                path: parent.to_path_buf(),
                source: Some(e),
            });
        }
    }
    if !parent.is_dir() {
        return Err(ConvertError::DirectoryCreation {
            path: parent.to_path_buf(),
            source: None,
        });
    }

    if let Err(e) = tempfile::tempfile_in(parent) {
        warn!("output directory is not writable: '{}'", parent.display());
        return Err(ConvertError::WritePermission {
            path: parent.to_path_buf(),
            source: Some(e),
        });
    }

    let available = match fs2::available_space(parent) {
        Ok(n) => n,
        Err(e) => {
            // A filesystem that cannot report free space is treated as
            // having none; the error rides along as the cause.
            warn!(
                "free-space query failed for '{}': {}",
                parent.display(),
                e
            );
            return Err(ConvertError::Storage {
                available_bytes: 0,
                required_bytes: input_len,
                source: Some(e),
            });
        }
    };
    if available < input_len {
        warn!(
            "insufficient space at '{}': {} bytes available, {} required",
            parent.display(),
            available,
            input_len
        );
        return Err(ConvertError::Storage {
            available_bytes: available,
            required_bytes: input_len,
            source: None,
        });
    }

    debug!(
        "preconditions ok for '{}' ({} bytes)",
        input.display(),
        input_len
    );
    Ok(input_len)
}

/// Parent directory of the output path; a bare filename writes to the
/// current directory.
fn output_parent(output: &Path) -> &Path {
    match output.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn write_input(dir: &TempDir, name: &str, len: usize) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, vec![0u8; len]).unwrap();
        path
    }

    #[test]
    fn test_missing_input_is_file_not_found() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("ghost.wav");
        let output = dir.path().join("ghost.mp3");
        let err = check(&input, &output).unwrap_err();
        assert!(matches!(err, ConvertError::FileNotFound { .. }));
    }

    #[test]
    fn test_empty_input_is_invalid() {
        let dir = TempDir::new().unwrap();
        let input = write_input(&dir, "a.wav", 0);
        let err = check(&input, &dir.path().join("a.mp3")).unwrap_err();
        match err {
            ConvertError::InvalidFile { reason, .. } => assert!(reason.contains("empty")),
            other => panic!("expected InvalidFile, got {:?}", other),
        }
    }

    #[test]
    fn test_undersized_input_is_invalid() {
        let dir = TempDir::new().unwrap();
        let input = write_input(&dir, "a.wav", 10);
        let err = check(&input, &dir.path().join("a.mp3")).unwrap_err();
        match err {
            ConvertError::InvalidFile { reason, .. } => {
                assert!(reason.contains("too small"));
                assert!(reason.contains("44"));
            }
            other => panic!("expected InvalidFile, got {:?}", other),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_metadata_fault_is_unknown_with_cause() {
        use std::error::Error;
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        // An interior NUL can never reach the OS, so the metadata query
        // fails with neither NotFound nor PermissionDenied.
        let bogus = Path::new(OsStr::from_bytes(b"bad\0name.wav"));
        let err = check(bogus, Path::new("out.mp3")).unwrap_err();
        assert!(matches!(err, ConvertError::Unknown { .. }));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_creates_missing_output_directory() {
        let dir = TempDir::new().unwrap();
        let input = write_input(&dir, "a.wav", 100);
        let output = dir.path().join("deep/nested/out/a.mp3");
        let len = check(&input, &output).unwrap();
        assert_eq!(len, 100);
        assert!(dir.path().join("deep/nested/out").is_dir());
    }

    #[test]
    fn test_output_parent_occupied_by_file() {
        let dir = TempDir::new().unwrap();
        let input = write_input(&dir, "a.wav", 100);
        let blocker = write_input(&dir, "blocker", 1);
        let output = blocker.join("a.mp3");
        let err = check(&input, &output).unwrap_err();
        assert!(matches!(err, ConvertError::DirectoryCreation { .. }));
    }

    #[test]
    fn test_bare_filename_targets_current_directory() {
        assert_eq!(output_parent(Path::new("out.mp3")), Path::new("."));
        assert_eq!(
            output_parent(Path::new("dir/out.mp3")),
            Path::new("dir")
        );
    }
}
