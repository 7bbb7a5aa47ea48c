//! Binary detection and text decoding with a UTF-8 fast path.
//!
//! Files that are not valid UTF-8 are decoded with the encoding guessed by
//! chardetng; anything undecodable ends up as UTF-8 with replacement
//! characters rather than an error.

use anyhow::{Context, Result};
use chardetng::EncodingDetector;
use encoding_rs::{Encoding, UTF_8};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Number of leading bytes inspected for NUL bytes.
pub const BINARY_SAMPLE_SIZE: usize = 8192;

/// Guess the encoding of raw bytes.
///
/// BOM markers win, then strict UTF-8, then chardetng.
pub fn detect_encoding(bytes: &[u8]) -> &'static Encoding {
    if let Some((encoding, _)) = Encoding::for_bom(bytes) {
        return encoding;
    }
    if std::str::from_utf8(bytes).is_ok() {
        return UTF_8;
    }

    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    detector.guess(None, true)
}

/// `true` when the first `sample_size` bytes of the file contain a NUL byte.
pub fn is_binary_file(path: &Path, sample_size: usize) -> std::io::Result<bool> {
    let file = File::open(path)?;
    let mut sample = Vec::with_capacity(sample_size);
    file.take(sample_size as u64).read_to_end(&mut sample)?;
    Ok(sample.contains(&0))
}

/// Read a whole file as text.
///
/// Returns the decoded content and the name of the encoding used.
pub fn read_file_safe(path: &Path) -> Result<(String, &'static str)> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    Ok(decode_bytes(&bytes))
}

fn decode_bytes(bytes: &[u8]) -> (String, &'static str) {
    if let Ok(text) = std::str::from_utf8(bytes) {
        return (text.to_string(), UTF_8.name());
    }

    let encoding = detect_encoding(bytes);
    let (decoded, used, had_errors) = encoding.decode(bytes);
    if !had_errors {
        return (decoded.into_owned(), used.name());
    }

    tracing::debug!("Lossy decode after {} failed", used.name());
    (String::from_utf8_lossy(bytes).into_owned(), UTF_8.name())
}
