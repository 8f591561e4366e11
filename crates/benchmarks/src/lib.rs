//! JMH baseline comparison.
//!
//! This crate loads two JMH JSON result files, a baseline run and an
//! optimized run, and reports the relative change of every benchmark the two
//! runs share.
//!
//! # Quick Start
//!
//! ```no_run
//! use jmh_compare_benchmarks::{compare, io, report};
//!
//! let baseline = io::load("baseline.json")?;
//! let optimized = io::load("optimized.json")?;
//!
//! let rows = compare(baseline, optimized);
//! print!("{}", report::render(report::DEFAULT_TITLE, &rows));
//! # Ok::<(), jmh_compare_benchmarks::CompareError>(())
//! ```
//!
//! # Modules
//!
//! - [`result`] - The JMH `BenchmarkResult` record
//! - [`io`] - Loading result files
//! - [`index`] - Name-keyed result index
//! - [`compare`] - Per-benchmark change computation
//! - [`report`] - Plain-text report
//! - [`markdown`] - Markdown report

#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod compare;
pub mod error;
pub mod index;
pub mod io;
pub mod markdown;
pub mod report;
pub mod result;

pub use compare::{compare, Change, Comparator, Comparison, Direction, Summary};
pub use error::{CompareError, Result};
pub use index::ResultIndex;
pub use result::{BenchmarkResult, Mode, Params, PrimaryMetric};

/// Load both files and compare them.
///
/// Both files are fully loaded before any comparison is made, so a failure
/// in either produces no partial result.
///
/// # Errors
///
/// Returns the first [`CompareError`] from loading the baseline, then the
/// optimized file.
pub fn compare_files(
    baseline: impl AsRef<std::path::Path>,
    optimized: impl AsRef<std::path::Path>,
) -> Result<Vec<Comparison>> {
    let baseline = io::load(baseline)?;
    let optimized = io::load(optimized)?;
    Ok(compare(baseline, optimized))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const BASELINE: &str = r#"[
        {"benchmark": "pkg.Bench.run", "mode": "thrpt", "params": {},
         "primaryMetric": {"score": 100.0, "scoreUnit": "ops/s"}}
    ]"#;

    const OPTIMIZED: &str = r#"[
        {"benchmark": "pkg.Bench.run", "mode": "thrpt", "params": {},
         "primaryMetric": {"score": 150.0, "scoreUnit": "ops/s"}}
    ]"#;

    #[test]
    fn test_compare_files() {
        let dir = tempfile::tempdir().unwrap();
        let baseline = dir.path().join("baseline.json");
        let optimized = dir.path().join("optimized.json");
        fs::write(&baseline, BASELINE).unwrap();
        fs::write(&optimized, OPTIMIZED).unwrap();

        let rows = compare_files(&baseline, &optimized).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].short_name, "run");
        assert_eq!(rows[0].change.improvement(), Some(50.0));
    }

    #[test]
    fn test_compare_files_fails_on_missing_optimized() {
        let dir = tempfile::tempdir().unwrap();
        let baseline = dir.path().join("baseline.json");
        fs::write(&baseline, BASELINE).unwrap();

        let err = compare_files(&baseline, dir.path().join("nope.json")).unwrap_err();
        assert!(err.path().ends_with("nope.json"));
    }

    #[test]
    fn test_report_is_idempotent() {
        let load = || {
            compare(
                io::parse_results(BASELINE, "b.json").unwrap(),
                io::parse_results(OPTIMIZED, "o.json").unwrap(),
            )
        };
        let first = report::render("T", &load());
        let second = report::render("T", &load());
        assert_eq!(first, second);
    }
}
