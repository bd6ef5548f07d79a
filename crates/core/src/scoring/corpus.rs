//! Corpus walking and per-corpus document-frequency tables.
//!
//! A corpus is any directory tree. Regular files and symlinks to files are
//! samples; directory symlinks are not followed.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

use crate::extract::{ExtractOptions, Extractor};
use crate::scoring::ScoreError;

/// Document frequency of every string across one corpus.
///
/// A count is the number of distinct samples containing the string, not the
/// number of occurrences. Tables are only comparable when built with the same
/// `ExtractOptions`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: HashMap<String, u32>,
    samples: usize,
    options: ExtractOptions,
}

impl FrequencyTable {
    pub fn new(options: ExtractOptions) -> Self {
        Self { counts: HashMap::new(), samples: 0, options }
    }

    /// Record one sample's distinct strings.
    pub fn add_sample<'a, I>(&mut self, strings: I)
    where
        I: IntoIterator<Item = &'a str>,
    {
        for value in strings {
            *self.counts.entry(value.to_string()).or_insert(0) += 1;
        }
        self.samples += 1;
    }

    /// Count for `value`, 0 if absent.
    pub fn get(&self, value: &str) -> u32 {
        self.counts.get(value).copied().unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.counts.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Number of distinct strings in the table.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Number of samples that contributed to the table.
    pub fn sample_count(&self) -> usize {
        self.samples
    }

    pub fn options(&self) -> ExtractOptions {
        self.options
    }
}

/// Where a corpus root stands before walking it.
enum CorpusRoot {
    Absent,
    Directory,
}

fn inspect_root(dir: &Path) -> Result<CorpusRoot, ScoreError> {
    match std::fs::metadata(dir) {
        Ok(meta) if meta.is_dir() => {}
        Ok(_) => return Err(ScoreError::NotADirectory(dir.to_path_buf())),
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(CorpusRoot::Absent),
        Err(err) => return Err(inaccessible(dir, err)),
    }
    // Metadata can succeed on a directory we are not allowed to list.
    std::fs::read_dir(dir).map_err(|err| inaccessible(dir, err))?;
    Ok(CorpusRoot::Directory)
}

fn inaccessible(dir: &Path, source: io::Error) -> ScoreError {
    ScoreError::Inaccessible { path: dir.to_path_buf(), source }
}

/// Every file under `dir`, recursively, sorted by file name per level.
///
/// Symlinks are listed unless they point at a directory, so a dangling link
/// still reaches the extractor and soft-fails there. Entries below the root
/// that cannot be read are logged and skipped.
pub fn collect_samples(dir: &Path) -> Result<Vec<PathBuf>, ScoreError> {
    if let CorpusRoot::Absent = inspect_root(dir)? {
        warn!(path = %dir.display(), "corpus directory not found; treating as empty");
        return Ok(Vec::new());
    }

    let mut samples = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        match entry {
            Ok(entry) if is_sample(&entry) => samples.push(entry.into_path()),
            Ok(_) => {}
            Err(err) => {
                warn!(path = %dir.display(), error = %err, "skipping unreadable corpus entry");
            }
        }
    }
    Ok(samples)
}

fn is_sample(entry: &DirEntry) -> bool {
    let file_type = entry.file_type();
    file_type.is_file() || (file_type.is_symlink() && !entry.path().is_dir())
}

/// Build the document-frequency table from an already collected sample list.
pub fn frequencies_of(samples: &[PathBuf], extractor: &Extractor) -> FrequencyTable {
    let mut table = FrequencyTable::new(extractor.options());
    for sample in samples {
        let strings = extractor.extract_file(sample);
        table.add_sample(strings.values());
    }
    table
}

/// Build the document-frequency table for the corpus rooted at `dir`.
///
/// A missing directory yields an empty table; a directory that exists but
/// cannot be traversed is an error.
pub fn frequencies(dir: &Path, extractor: &Extractor) -> Result<FrequencyTable, ScoreError> {
    let table = frequencies_of(&collect_samples(dir)?, extractor);
    debug!(
        path = %dir.display(),
        samples = table.sample_count(),
        strings = table.len(),
        "built frequency table"
    );
    Ok(table)
}
