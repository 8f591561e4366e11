//! Name-keyed index over a set of benchmark results.

use crate::result::BenchmarkResult;
use std::collections::HashMap;

/// Benchmark results keyed by fully qualified benchmark name.
///
/// When a name occurs more than once, the last occurrence wins.
#[derive(Debug, Clone, Default)]
pub struct ResultIndex {
    entries: HashMap<String, BenchmarkResult>,
}

impl ResultIndex {
    /// Build an index from results in file order.
    pub fn build(results: impl IntoIterator<Item = BenchmarkResult>) -> Self {
        let mut entries = HashMap::new();
        for result in results {
            if entries.contains_key(&result.benchmark) {
                tracing::warn!(
                    benchmark = %result.benchmark,
                    "duplicate benchmark name, keeping the last entry"
                );
            }
            entries.insert(result.benchmark.clone(), result);
        }
        Self { entries }
    }

    /// Look up a result by fully qualified name.
    pub fn get(&self, name: &str) -> Option<&BenchmarkResult> {
        self.entries.get(name)
    }

    /// All benchmark names in ascending lexicographic order.
    pub fn sorted_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of distinct benchmark names.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the index is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<BenchmarkResult> for ResultIndex {
    fn from_iter<I: IntoIterator<Item = BenchmarkResult>>(iter: I) -> Self {
        Self::build(iter)
    }
}
