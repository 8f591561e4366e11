//! Plain-text comparison report.
//!
//! Layout, one block per benchmark:
//!
//! ```text
//! ================================================================================
//! Performance Comparison
//! ================================================================================
//!
//! put                                                ({'size': '100'})
//!   Baseline:         1000.000 ops/s
//!   Optimized:        1250.000 ops/s
//!   Change:    ↑  25.00%
//!
//! ```

use crate::compare::{Change, Comparison};
use std::fmt;

/// Title used when none is given.
pub const DEFAULT_TITLE: &str = "Performance Comparison";

const RULE_WIDTH: usize = 80;

/// Text report over a set of comparisons.
#[derive(Debug, Clone, Copy)]
pub struct TextReport<'a> {
    title: &'a str,
    comparisons: &'a [Comparison],
}

impl<'a> TextReport<'a> {
    /// Create a report with the given title.
    pub fn new(title: &'a str, comparisons: &'a [Comparison]) -> Self {
        Self { title, comparisons }
    }
}

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(RULE_WIDTH);
        writeln!(f, "{rule}")?;
        writeln!(f, "{}", self.title)?;
        writeln!(f, "{rule}")?;
        writeln!(f)?;

        for comparison in self.comparisons {
            write_block(f, comparison)?;
        }
        Ok(())
    }
}

fn write_block(f: &mut fmt::Formatter<'_>, c: &Comparison) -> fmt::Result {
    writeln!(f, "{:<50} {:<15}", c.short_name, params_column(c))?;
    writeln!(f, "  Baseline:  {:>15.3} {}", c.baseline, c.baseline_unit)?;
    writeln!(f, "  Optimized: {:>15.3} {}", c.optimized, c.optimized_unit)?;
    match c.change {
        Change::Measured {
            improvement,
            direction,
        } => writeln!(f, "  Change:    {direction} {:>6.2}%", improvement.abs())?,
        Change::Undefined => writeln!(f, "  Change:    N/A")?,
    }
    writeln!(f)
}

/// `({'k': 'v'})` for non-empty parameters, empty otherwise.
pub fn params_column(c: &Comparison) -> String {
    if c.params.is_empty() {
        String::new()
    } else {
        format!("({})", c.params)
    }
}

/// Render the text report.
pub fn render(title: &str, comparisons: &[Comparison]) -> String {
    TextReport::new(title, comparisons).to_string()
}
