//! Classification of non-WAV file signatures
//!
//! When a file fails the RIFF check, its leading bytes are matched against a
//! small table of well-known audio container signatures so the rejection
//! message can name the format the user actually picked instead of a bare
//! tag mismatch.

use std::fmt;

/// Best-effort classification of a non-RIFF leading tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SniffedFormat {
    /// MPEG audio with an ID3 metadata tag.
    Mp3,
    /// Ogg container (Vorbis, Opus).
    Ogg,
    /// FLAC stream.
    Flac,
    /// ISO base media file (`ftyp` box), typically MP4 or M4A.
    Mp4,
    /// None of the known signatures matched.
    Unknown { tag: String },
}

impl SniffedFormat {
    /// Classify the 4-byte tag found at the start of a file.
    ///
    /// `ID3` and `Ogg` are three-byte prefixes; `fLaC` and `ftyp` use the
    /// whole tag. Everything else is reported verbatim as unknown.
    pub fn from_leading_bytes(tag: &[u8]) -> Self {
        if tag.starts_with(b"ID3") {
            SniffedFormat::Mp3
        } else if tag.starts_with(b"Ogg") {
            SniffedFormat::Ogg
        } else if tag.starts_with(b"fLaC") {
            SniffedFormat::Flac
        } else if tag.starts_with(b"ftyp") {
            SniffedFormat::Mp4
        } else {
            SniffedFormat::Unknown {
                tag: printable_tag(tag),
            }
        }
    }
}

impl fmt::Display for SniffedFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SniffedFormat::Mp3 => write!(f, "MP3 (ID3 tag)"),
            SniffedFormat::Ogg => write!(f, "OGG"),
            SniffedFormat::Flac => write!(f, "FLAC"),
            SniffedFormat::Mp4 => write!(f, "MP4/M4A"),
            SniffedFormat::Unknown { tag } => write!(f, "unknown ('{tag}')"),
        }
    }
}

/// Render a chunk tag with non-printable bytes escaped.
pub(crate) fn printable_tag(tag: &[u8]) -> String {
    tag.iter()
        .map(|&b| {
            if (0x20..0x7f).contains(&b) {
                (b as char).to_string()
            } else {
                format!("\\x{b:02x}")
            }
        })
        .collect()
}
