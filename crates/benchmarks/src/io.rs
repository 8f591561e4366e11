//! I/O operations for benchmark results.
//!
//! This module reads JMH JSON result files from the filesystem.

use crate::error::{CompareError, Result};
use crate::result::BenchmarkResult;
use serde_json::error::Category;
use std::fs;
use std::path::Path;

/// Load a JMH result file.
///
/// The whole file is read into memory and closed before parsing. Results are
/// returned in file order.
///
/// # Errors
///
/// Returns [`CompareError::Read`] if the file cannot be read,
/// [`CompareError::Parse`] if it is not valid JSON and
/// [`CompareError::Schema`] if it is valid JSON but not an array of
/// benchmark records.
pub fn load(path: impl AsRef<Path>) -> Result<Vec<BenchmarkResult>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| CompareError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let results = parse_results(&content, path)?;
    tracing::debug!(path = %path.display(), count = results.len(), "loaded benchmark results");
    Ok(results)
}

/// Parse JMH results from an in-memory JSON document.
///
/// `origin` is only used to label errors.
pub fn parse_results(content: &str, origin: impl AsRef<Path>) -> Result<Vec<BenchmarkResult>> {
    serde_json::from_str(content).map_err(|source| {
        let path = origin.as_ref().to_path_buf();
        match source.classify() {
            Category::Data => CompareError::Schema { path, source },
            Category::Io | Category::Syntax | Category::Eof => CompareError::Parse { path, source },
        }
    })
}
