//! Printable string extraction from arbitrary binary samples.
//!
//! Two passes run over the same buffer and feed a single result set:
//! - ASCII: maximal runs of bytes in `0x20..=0x7E`.
//! - UTF-16LE: maximal runs of "printable byte, zero byte" pairs.
//!
//! Results are trimmed of surrounding whitespace and deduplicated by content,
//! so an ASCII run and a UTF-16LE run with the same text collapse into one.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::model::{Encoding, ExtractedString};

/// Default minimum string length.
pub const DEFAULT_MIN_LEN: usize = 8;
/// Default maximum string length.
pub const DEFAULT_MAX_LEN: usize = 256;

/// Length bounds for a single extraction configuration.
///
/// Frequency tables built with different bounds are not comparable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractOptions {
    pub min_len: usize,
    pub max_len: usize,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self { min_len: DEFAULT_MIN_LEN, max_len: DEFAULT_MAX_LEN }
    }
}

impl ExtractOptions {
    pub fn new(min_len: usize, max_len: usize) -> Self {
        Self { min_len, max_len }
    }
}

/// Distinct strings recovered from one sample.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StringSet {
    entries: HashMap<String, Encoding>,
}

impl StringSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a trimmed string; the first encoding seen for a value wins.
    ///
    /// Returns `false` if the value was empty after trimming or already present.
    pub fn insert(&mut self, raw: &str, encoding: Encoding) -> bool {
        let value = raw.trim();
        if value.is_empty() {
            return false;
        }
        match self.entries.entry(value.to_string()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(encoding);
                true
            }
        }
    }

    pub fn contains(&self, value: &str) -> bool {
        self.entries.contains_key(value)
    }

    pub fn encoding_of(&self, value: &str) -> Option<Encoding> {
        self.entries.get(value).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over the string values in no particular order.
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Consume the set into owned entries sorted by value.
    pub fn into_sorted(self) -> Vec<ExtractedString> {
        let mut out: Vec<ExtractedString> = self
            .entries
            .into_iter()
            .map(|(value, encoding)| ExtractedString { value, encoding })
            .collect();
        out.sort_by(|a, b| a.value.cmp(&b.value));
        out
    }
}

/// Extracts printable ASCII and UTF-16LE strings within configured bounds.
#[derive(Debug, Clone, Copy, Default)]
pub struct Extractor {
    options: ExtractOptions,
}

impl Extractor {
    pub fn new(options: ExtractOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> ExtractOptions {
        self.options
    }

    /// Read one sample and extract its strings.
    ///
    /// I/O failures are logged and yield an empty set so that a corpus walk
    /// can keep going past a single bad file.
    pub fn extract_file(&self, path: &Path) -> StringSet {
        let data = match std::fs::read(path) {
            Ok(data) => data,
            Err(err) => {
                error!(path = %path.display(), error = %err, "failed to read sample");
                return StringSet::new();
            }
        };
        let set = self.extract_bytes_from(&data, path);
        debug!(path = %path.display(), count = set.len(), "extracted unique strings");
        set
    }

    /// Extract strings from an in-memory buffer.
    pub fn extract_bytes(&self, data: &[u8]) -> StringSet {
        self.extract_bytes_from(data, Path::new("<memory>"))
    }

    fn extract_bytes_from(&self, data: &[u8], origin: &Path) -> StringSet {
        let mut set = StringSet::new();
        self.scan_ascii(data, &mut set);
        self.scan_utf16le(data, origin, &mut set);
        set
    }

    fn scan_ascii(&self, data: &[u8], set: &mut StringSet) {
        let ExtractOptions { min_len, max_len } = self.options;
        let mut i = 0;
        while i < data.len() {
            if !is_printable(data[i]) {
                i += 1;
                continue;
            }
            let start = i;
            while i < data.len() && is_printable(data[i]) {
                i += 1;
            }
            let run = &data[start..i];
            if run.len() < min_len || run.len() > max_len {
                continue;
            }
            // Every byte is in 0x20..=0x7E, so this is always valid UTF-8.
            if let Ok(text) = std::str::from_utf8(run) {
                set.insert(text, Encoding::Ascii);
            }
        }
    }

    /// Only the decoded character count is checked against `max_len`; the
    /// byte-level run itself has no upper bound.
    fn scan_utf16le(&self, data: &[u8], origin: &Path, set: &mut StringSet) {
        let ExtractOptions { min_len, max_len } = self.options;
        let mut i = 0;
        while i + 1 < data.len() {
            if !is_utf16le_unit(data, i) {
                i += 1;
                continue;
            }
            let start = i;
            while i + 1 < data.len() && is_utf16le_unit(data, i) {
                i += 2;
            }
            let units = (i - start) / 2;
            if units < min_len {
                continue;
            }
            let code_units: Vec<u16> = data[start..i]
                .chunks_exact(2)
                .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
                .collect();
            match String::from_utf16(&code_units) {
                Ok(decoded) => {
                    if decoded.trim().chars().count() <= max_len {
                        set.insert(&decoded, Encoding::Utf16Le);
                    }
                }
                Err(err) => {
                    debug!(path = %origin.display(), offset = start, error = %err, "utf-16le decode failed");
                }
            }
        }
    }
}

#[inline]
fn is_printable(byte: u8) -> bool {
    (0x20..=0x7E).contains(&byte)
}

#[inline]
fn is_utf16le_unit(data: &[u8], offset: usize) -> bool {
    is_printable(data[offset]) && data[offset + 1] == 0
}

/// Convenience wrapper: extract strings from `path` with the given bounds.
pub fn extract(path: &Path, min_len: usize, max_len: usize) -> StringSet {
    Extractor::new(ExtractOptions::new(min_len, max_len)).extract_file(path)
}
