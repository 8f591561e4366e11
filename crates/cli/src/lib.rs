//! CLI for jmh-compare.
//!
//! This crate provides the `jmh-compare` command, which prints a comparison of
//! a baseline and an optimized JMH result file.

#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

use anyhow::Result;
use clap::{CommandFactory, Parser, ValueEnum};
use jmh_compare_benchmarks::{compare_files, markdown, report, Comparison, Summary};
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// jmh-compare CLI.
#[derive(Parser, Debug)]
#[command(name = "jmh-compare")]
#[command(author, version, long_about = None)]
#[command(about = "Compare two JMH benchmark result files.")]
#[command(after_help = "\
For every benchmark present in both files, prints the baseline score, the
optimized score and the percentage change. Throughput modes (thrpt, sample)
count a higher score as better; all other modes count a lower score as better.")]
pub struct Cli {
    /// Baseline JMH result file.
    #[arg(value_name = "BASELINE")]
    pub baseline: Option<PathBuf>,

    /// Optimized JMH result file.
    #[arg(value_name = "OPTIMIZED")]
    pub optimized: Option<PathBuf>,

    /// Report title.
    #[arg(value_name = "TITLE", default_value = report::DEFAULT_TITLE)]
    pub title: String,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text, env = "JMH_COMPARE_FORMAT")]
    pub format: OutputFormat,

    /// Fail when any benchmark regressed by more than this many percent.
    #[arg(long, value_name = "PCT", env = "JMH_COMPARE_MAX_REGRESSION")]
    pub max_regression: Option<f64>,

    /// Verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

/// Report output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Fixed-width text blocks.
    Text,
    /// Markdown table.
    Markdown,
    /// Pretty-printed JSON.
    Json,
}

/// Run the CLI with the process arguments.
///
/// # Returns
///
/// The exit code to terminate with, or an error if a result file could not
/// be loaded.
pub fn run() -> Result<ExitCode> {
    // A missing .env file is fine.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    execute(&cli, &mut out)
}

/// Install the stderr log subscriber. `RUST_LOG` overrides the default level.
pub fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // Ignore the error if a subscriber is already installed.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Help text printed when the two result files are not both given.
pub fn usage() -> String {
    Cli::command().render_help().to_string()
}

/// Execute a parsed command line, writing the report to `out`.
pub fn execute(cli: &Cli, out: &mut impl Write) -> Result<ExitCode> {
    let (Some(baseline), Some(optimized)) = (&cli.baseline, &cli.optimized) else {
        out.write_all(usage().as_bytes())?;
        return Ok(ExitCode::FAILURE);
    };

    let rows = compare_files(baseline, optimized).map_err(|err| {
        let side = if err.path() == baseline.as_path() {
            "baseline"
        } else {
            "optimized"
        };
        let context = format!("loading {side} results from {}", err.path().display());
        anyhow::Error::new(err).context(context)
    })?;
    let summary = Summary::from_comparisons(&rows);
    tracing::info!(%summary, "comparison complete");

    match cli.format {
        OutputFormat::Text => write!(out, "{}", report::TextReport::new(&cli.title, &rows))?,
        OutputFormat::Markdown => {
            write!(out, "{}", markdown::MarkdownReport::new(&cli.title, &rows))?
        }
        OutputFormat::Json => {
            let doc = serde_json::json!({
                "title": cli.title,
                "comparisons": rows,
                "summary": summary,
            });
            serde_json::to_writer_pretty(&mut *out, &doc)?;
            writeln!(out)?;
        }
    }
    out.flush()?;

    match cli.max_regression {
        Some(threshold) if !regressions(&rows, threshold).is_empty() => Ok(ExitCode::FAILURE),
        _ => Ok(ExitCode::SUCCESS),
    }
}

/// Rows that regressed by more than `threshold` percent.
pub fn regressions(rows: &[Comparison], threshold: f64) -> Vec<&Comparison> {
    let regressed: Vec<&Comparison> = rows
        .iter()
        .filter(|c| c.change.regressed_beyond(threshold))
        .collect();
    for c in &regressed {
        tracing::warn!(
            benchmark = %c.benchmark,
            improvement = c.change.improvement().unwrap_or_default(),
            threshold,
            "regression exceeds threshold"
        );
    }
    regressed
}
