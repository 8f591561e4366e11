//! Markdown output generation for comparison results.
//!
//! This module renders the same rows as [`crate::report`] as a Markdown
//! table, suitable for pasting into a pull request.

use crate::compare::{Change, Comparison, Summary};
use crate::report::params_column;
use std::fmt;

/// Markdown report over a set of comparisons.
#[derive(Debug, Clone, Copy)]
pub struct MarkdownReport<'a> {
    title: &'a str,
    comparisons: &'a [Comparison],
}

impl<'a> MarkdownReport<'a> {
    /// Create a report with the given title.
    pub fn new(title: &'a str, comparisons: &'a [Comparison]) -> Self {
        Self { title, comparisons }
    }
}

impl fmt::Display for MarkdownReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}", self.title)?;
        writeln!(f)?;
        writeln!(f, "| Benchmark | Params | Baseline | Optimized | Unit | Change |")?;
        writeln!(f, "|-----------|--------|---------:|----------:|------|-------:|")?;

        for c in self.comparisons {
            let change = match c.change {
                Change::Measured {
                    improvement,
                    direction,
                } => format!("{direction} {:.2}%", improvement.abs()),
                Change::Undefined => "N/A".to_string(),
            };
            writeln!(
                f,
                "| {} | {} | {:.3} | {:.3} | {} | {} |",
                escape(&c.short_name),
                escape(&params_column(c)),
                c.baseline,
                c.optimized,
                escape(&unit_column(c)),
                change
            )?;
        }

        writeln!(f)?;
        writeln!(f, "---")?;
        writeln!(f, "{}", Summary::from_comparisons(self.comparisons))
    }
}

/// One unit, or `baseline → optimized` when the two runs disagree.
fn unit_column(c: &Comparison) -> String {
    if c.baseline_unit == c.optimized_unit {
        c.optimized_unit.clone()
    } else {
        format!("{} → {}", c.baseline_unit, c.optimized_unit)
    }
}

fn escape(cell: &str) -> String {
    cell.replace('|', "\\|")
}

/// Render the Markdown report.
pub fn render(title: &str, comparisons: &[Comparison]) -> String {
    MarkdownReport::new(title, comparisons).to_string()
}
