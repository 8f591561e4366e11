use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const BASELINE: &str = r#"[
  {"benchmark": "pkg.Bench.zeta", "mode": "avgt", "params": {"size": "10"},
   "primaryMetric": {"score": 10.0, "scoreUnit": "us/op"}},
  {"benchmark": "pkg.Bench.run", "mode": "thrpt", "params": {},
   "primaryMetric": {"score": 100.0, "scoreUnit": "ops/s"}},
  {"benchmark": "pkg.Bench.baselineOnly", "mode": "thrpt",
   "primaryMetric": {"score": 1.0, "scoreUnit": "ops/s"}}
]"#;

const OPTIMIZED: &str = r#"[
  {"benchmark": "pkg.Bench.run", "mode": "thrpt", "params": {},
   "primaryMetric": {"score": 150.0, "scoreUnit": "ops/s"}},
  {"benchmark": "pkg.Bench.zeta", "mode": "avgt", "params": {"size": "10"},
   "primaryMetric": {"score": 8.0, "scoreUnit": "us/op"}},
  {"benchmark": "pkg.Bench.optimizedOnly", "mode": "thrpt",
   "primaryMetric": {"score": 1.0, "scoreUnit": "ops/s"}}
]"#;

struct Fixture {
    dir: TempDir,
    baseline: PathBuf,
    optimized: PathBuf,
}

fn fixture() -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    let baseline = dir.path().join("baseline.json");
    let optimized = dir.path().join("optimized.json");
    fs::write(&baseline, BASELINE).unwrap();
    fs::write(&optimized, OPTIMIZED).unwrap();
    Fixture {
        dir,
        baseline,
        optimized,
    }
}

fn cmd(fx: &Fixture) -> Command {
    let mut cmd = Command::cargo_bin("jmh-compare").unwrap();
    cmd.current_dir(fx.dir.path())
        .env_remove("JMH_COMPARE_FORMAT")
        .env_remove("JMH_COMPARE_MAX_REGRESSION")
        .env_remove("RUST_LOG");
    cmd
}

fn expected_report(title: &str) -> String {
    let rule = "=".repeat(80);
    [
        rule.clone(),
        title.to_string(),
        rule,
        String::new(),
        format!("{:<50} {:<15}", "run", ""),
        "  Baseline:          100.000 ops/s".to_string(),
        "  Optimized:         150.000 ops/s".to_string(),
        "  Change:    ↑  50.00%".to_string(),
        String::new(),
        format!("{:<50} {:<15}", "zeta", "({'size': '10'})"),
        "  Baseline:           10.000 us/op".to_string(),
        "  Optimized:           8.000 us/op".to_string(),
        "  Change:    ↓  20.00%".to_string(),
        String::new(),
    ]
    .iter()
    .map(|line| format!("{line}\n"))
    .collect()
}

#[test]
fn help_works() {
    Command::cargo_bin("jmh-compare").unwrap()
        .arg("--help")
        .assert()
        .success();
}

#[test]
fn version_works() {
    Command::cargo_bin("jmh-compare").unwrap()
        .arg("--version")
        .assert()
        .success();
}

#[test]
fn no_arguments_prints_usage_and_exits_1() {
    Command::cargo_bin("jmh-compare").unwrap()
        .assert()
        .code(1)
        .stdout(predicate::str::starts_with("Compare two JMH benchmark result files."));
}

#[test]
fn full_report_matches_layout() {
    let fx = fixture();
    cmd(&fx)
        .arg(&fx.baseline)
        .arg(&fx.optimized)
        .assert()
        .success()
        .stdout(predicate::str::diff(expected_report("Performance Comparison")));
}

#[test]
fn custom_title() {
    let fx = fixture();
    cmd(&fx)
        .arg(&fx.baseline)
        .arg(&fx.optimized)
        .arg("PR #123 vs main")
        .assert()
        .success()
        .stdout(predicate::str::diff(expected_report("PR #123 vs main")));
}

#[test]
fn one_sided_benchmarks_are_skipped() {
    let fx = fixture();
    cmd(&fx)
        .arg(&fx.baseline)
        .arg(&fx.optimized)
        .assert()
        .success()
        .stdout(predicate::str::contains("baselineOnly").not())
        .stdout(predicate::str::contains("optimizedOnly").not());
}

#[test]
fn output_is_idempotent() {
    let fx = fixture();
    let first = cmd(&fx).arg(&fx.baseline).arg(&fx.optimized).output().unwrap();
    let second = cmd(&fx).arg(&fx.baseline).arg(&fx.optimized).output().unwrap();
    assert_eq!(first.stdout, second.stdout);
}

#[test]
fn missing_file_fails() {
    let fx = fixture();
    cmd(&fx)
        .arg(&fx.baseline)
        .arg(fx.dir.path().join("missing.json"))
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Error: loading optimized results"));
}

#[test]
fn malformed_json_fails() {
    let fx = fixture();
    let broken = fx.dir.path().join("broken.json");
    fs::write(&broken, "[{").unwrap();

    cmd(&fx)
        .arg(&broken)
        .arg(&fx.optimized)
        .assert()
        .failure()
        .stderr(predicate::str::contains("as JSON"));
}

#[test]
fn markdown_format() {
    let fx = fixture();
    cmd(&fx)
        .arg(&fx.baseline)
        .arg(&fx.optimized)
        .args(["--format", "markdown"])
        .assert()
        .success()
        .stdout(predicate::str::contains("| run |  | 100.000 | 150.000 | ops/s | ↑ 50.00% |"))
        .stdout(predicate::str::contains("2 compared: 2 improved, 0 regressed, 0 unchanged"));
}

#[test]
fn format_from_environment() {
    let fx = fixture();
    cmd(&fx)
        .env("JMH_COMPARE_FORMAT", "json")
        .arg(&fx.baseline)
        .arg(&fx.optimized)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("{"));
}

#[test]
fn regression_gate_fails_run() {
    let fx = fixture();
    let slower = fx.dir.path().join("slower.json");
    fs::write(
        &slower,
        r#"[{"benchmark": "pkg.Bench.run", "mode": "thrpt",
             "primaryMetric": {"score": 50.0, "scoreUnit": "ops/s"}}]"#,
    )
    .unwrap();

    cmd(&fx)
        .arg(&fx.baseline)
        .arg(&slower)
        .args(["--max-regression", "5"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("  Change:    ↓  50.00%"))
        .stderr(predicate::str::contains("regression exceeds threshold"));
}

#[test]
fn mismatched_units_are_printed_per_score() {
    let fx = fixture();
    let per_ms = fx.dir.path().join("per_ms.json");
    fs::write(
        &per_ms,
        r#"[{"benchmark": "pkg.Bench.run", "mode": "thrpt",
             "primaryMetric": {"score": 1000.0, "scoreUnit": "ops/ms"}}]"#,
    )
    .unwrap();

    cmd(&fx)
        .arg(&per_ms)
        .arg(&fx.optimized)
        .assert()
        .success()
        .stdout(predicate::str::contains("  Baseline:         1000.000 ops/ms\n"))
        .stdout(predicate::str::contains("  Optimized:         150.000 ops/s\n"))
        .stderr(predicate::str::contains("score units differ"));
}
