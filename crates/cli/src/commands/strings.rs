use std::path::Path;

use anyhow::{anyhow, Result};
use yargen_core::extract::{ExtractOptions, Extractor};
use yargen_core::model::ExtractedString;

/// Print the distinct strings of a single sample, sorted by value.
pub fn strings_command(
    path: &Path,
    min_len: usize,
    max_len: usize,
    json: bool,
) -> Result<Vec<ExtractedString>> {
    if !path.is_file() {
        return Err(anyhow!("Sample file does not exist: {}", path.display()));
    }
    let extractor = Extractor::new(ExtractOptions::new(min_len, max_len));
    let strings = extractor.extract_file(path).into_sorted();

    if json {
        println!("{}", serde_json::to_string_pretty(&strings)?);
    } else {
        for s in &strings {
            println!("[{}] {}", s.encoding, s.value);
        }
    }
    Ok(strings)
}
