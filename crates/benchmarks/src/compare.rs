//! Baseline versus optimized comparison.
//!
//! A [`Comparator`] indexes both result sets by benchmark name and yields one
//! [`Comparison`] per benchmark present in both, ordered by full name.
//! Benchmarks missing from either side are skipped.

use crate::index::ResultIndex;
use crate::result::{BenchmarkResult, Mode, Params};
use serde::Serialize;
use std::fmt;

/// Direction of the score change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Score went up.
    Up,
    /// Score went down.
    Down,
}

impl Direction {
    /// Arrow symbol used in reports.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Up => "↑",
            Self::Down => "↓",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Change between a baseline and an optimized score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Change {
    /// Relative change in percent. Positive `improvement` is always better,
    /// whichever way the mode ranks scores.
    Measured {
        /// Signed improvement in percent of the baseline score.
        improvement: f64,
        /// Direction the raw score moved.
        direction: Direction,
    },
    /// The baseline score is zero, so no relative change exists.
    Undefined,
}

impl Change {
    /// Compute the change from `baseline` to `optimized` under `mode`.
    ///
    /// For higher-is-better modes the improvement is `(p - b) / b * 100` and
    /// the arrow points up when it is positive. For every other mode it is
    /// `(b - p) / b * 100` and the arrow points down when it is positive.
    pub fn between(mode: &Mode, baseline: f64, optimized: f64) -> Self {
        if baseline == 0.0 {
            return Self::Undefined;
        }

        if mode.higher_is_better() {
            let improvement = (optimized - baseline) / baseline * 100.0;
            let direction = if improvement > 0.0 {
                Direction::Up
            } else {
                Direction::Down
            };
            Self::Measured {
                improvement,
                direction,
            }
        } else {
            let improvement = (baseline - optimized) / baseline * 100.0;
            let direction = if improvement > 0.0 {
                Direction::Down
            } else {
                Direction::Up
            };
            Self::Measured {
                improvement,
                direction,
            }
        }
    }

    /// Signed improvement in percent, if defined.
    pub fn improvement(&self) -> Option<f64> {
        match self {
            Self::Measured { improvement, .. } => Some(*improvement),
            Self::Undefined => None,
        }
    }

    /// Returns `true` if performance got worse by more than `threshold` percent.
    pub fn regressed_beyond(&self, threshold: f64) -> bool {
        self.improvement().is_some_and(|i| i < -threshold)
    }
}

/// One benchmark present in both result sets.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    /// Fully qualified benchmark name.
    pub benchmark: String,
    /// Method name, the part after the last `.`.
    pub short_name: String,
    /// Mode of the baseline record, which decides the direction.
    pub mode: Mode,
    /// Parameters of the optimized record.
    pub params: Params,
    /// Baseline primary score.
    pub baseline: f64,
    /// Optimized primary score.
    pub optimized: f64,
    /// Unit of the baseline score.
    pub baseline_unit: String,
    /// Unit of the optimized score.
    pub optimized_unit: String,
    /// Relative change.
    pub change: Change,
}

impl Comparison {
    /// Pair a baseline record with its optimized counterpart.
    pub fn new(baseline: &BenchmarkResult, optimized: &BenchmarkResult) -> Self {
        let change = Change::between(&baseline.mode, baseline.score(), optimized.score());
        if baseline.unit() != optimized.unit() {
            tracing::warn!(
                benchmark = %optimized.benchmark,
                baseline_unit = baseline.unit(),
                optimized_unit = optimized.unit(),
                "score units differ, change compares raw scores"
            );
        }
        if change == Change::Undefined {
            tracing::warn!(
                benchmark = %optimized.benchmark,
                "baseline score is zero, change reported as N/A"
            );
        }

        Self {
            benchmark: optimized.benchmark.clone(),
            short_name: short_name(&optimized.benchmark).to_string(),
            mode: baseline.mode.clone(),
            params: optimized.params.clone(),
            baseline: baseline.score(),
            optimized: optimized.score(),
            baseline_unit: baseline.unit().to_string(),
            optimized_unit: optimized.unit().to_string(),
            change,
        }
    }
}

/// Method part of a fully qualified benchmark name.
///
/// Returns the whole name when it contains no `.`.
pub fn short_name(benchmark: &str) -> &str {
    benchmark.rsplit('.').next().unwrap_or(benchmark)
}

/// Indexed baseline and optimized result sets.
#[derive(Debug, Clone, Default)]
pub struct Comparator {
    baseline: ResultIndex,
    optimized: ResultIndex,
}

impl Comparator {
    /// Index both result sets.
    pub fn new(baseline: Vec<BenchmarkResult>, optimized: Vec<BenchmarkResult>) -> Self {
        let baseline = ResultIndex::build(baseline);
        let optimized = ResultIndex::build(optimized);
        tracing::debug!(
            baseline = baseline.len(),
            optimized = optimized.len(),
            "indexed benchmark results"
        );
        Self {
            baseline,
            optimized,
        }
    }

    /// Comparisons for every optimized benchmark that also has a baseline,
    /// in ascending order of full name.
    pub fn comparisons(&self) -> Vec<Comparison> {
        self.optimized
            .sorted_names()
            .into_iter()
            .filter_map(|name| {
                let optimized = self.optimized.get(name)?;
                match self.baseline.get(name) {
                    Some(baseline) => Some(Comparison::new(baseline, optimized)),
                    None => {
                        tracing::debug!(benchmark = name, "no baseline result, skipping");
                        None
                    }
                }
            })
            .collect()
    }
}

/// Compare two result sets.
pub fn compare(baseline: Vec<BenchmarkResult>, optimized: Vec<BenchmarkResult>) -> Vec<Comparison> {
    Comparator::new(baseline, optimized).comparisons()
}

/// Tally of comparison outcomes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// Rows with a positive improvement.
    pub improved: usize,
    /// Rows with a negative improvement.
    pub regressed: usize,
    /// Rows with no change.
    pub unchanged: usize,
    /// Rows whose baseline score is zero.
    pub undefined: usize,
}

impl Summary {
    /// Count outcomes over `comparisons`.
    pub fn from_comparisons(comparisons: &[Comparison]) -> Self {
        comparisons
            .iter()
            .fold(Self::default(), |mut summary, c| {
                match c.change.improvement() {
                    Some(i) if i > 0.0 => summary.improved += 1,
                    Some(i) if i < 0.0 => summary.regressed += 1,
                    Some(_) => summary.unchanged += 1,
                    None => summary.undefined += 1,
                }
                summary
            })
    }

    /// Total number of rows counted.
    pub fn total(&self) -> usize {
        self.improved + self.regressed + self.unchanged + self.undefined
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} compared: {} improved, {} regressed, {} unchanged",
            self.total(),
            self.improved,
            self.regressed,
            self.unchanged
        )?;
        if self.undefined > 0 {
            write!(f, ", {} with zero baseline", self.undefined)?;
        }
        Ok(())
    }
}
