//! JMH benchmark result types.
//!
//! This module provides the typed schema for one element of the JSON array
//! JMH writes with `-rf json`. Only the fields used by the comparison are
//! modelled; everything else in the record is ignored.

use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A single JMH benchmark result record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BenchmarkResult {
    /// Fully qualified benchmark name, e.g. `org.example.MapBench.put`.
    pub benchmark: String,
    /// Measurement mode.
    pub mode: Mode,
    /// The primary scored metric.
    pub primary_metric: PrimaryMetric,
    /// Benchmark parameters, empty when the benchmark has none.
    #[serde(default)]
    pub params: Params,
}

impl BenchmarkResult {
    /// Create a result with no parameters.
    pub fn new(
        benchmark: impl Into<String>,
        mode: Mode,
        score: f64,
        score_unit: impl Into<String>,
    ) -> Self {
        Self {
            benchmark: benchmark.into(),
            mode,
            primary_metric: PrimaryMetric {
                score,
                score_unit: score_unit.into(),
            },
            params: Params::default(),
        }
    }

    /// Attach parameters to this result.
    pub fn with_params(mut self, params: Params) -> Self {
        self.params = params;
        self
    }

    /// Primary metric score.
    pub fn score(&self) -> f64 {
        self.primary_metric.score
    }

    /// Primary metric unit.
    pub fn unit(&self) -> &str {
        &self.primary_metric.score_unit
    }
}

/// Primary metric of a benchmark run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrimaryMetric {
    /// Score value.
    pub score: f64,
    /// Unit of the score, e.g. `ops/s` or `us/op`.
    pub score_unit: String,
}

/// JMH measurement mode.
///
/// Unknown tags are kept verbatim in [`Mode::Other`] and compared as
/// lower-is-better.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Mode {
    /// `thrpt`: operations per unit of time.
    Throughput,
    /// `sample`: sampled time per operation.
    SampleTime,
    /// `avgt`: average time per operation.
    AverageTime,
    /// `ss`: single-shot invocation time.
    SingleShot,
    /// Any other mode tag.
    Other(String),
}

impl Mode {
    /// JMH tag for this mode.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Throughput => "thrpt",
            Self::SampleTime => "sample",
            Self::AverageTime => "avgt",
            Self::SingleShot => "ss",
            Self::Other(tag) => tag,
        }
    }

    /// Whether a larger score means better performance in this mode.
    pub fn higher_is_better(&self) -> bool {
        matches!(self, Self::Throughput | Self::SampleTime)
    }
}

impl From<String> for Mode {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "thrpt" => Self::Throughput,
            "sample" => Self::SampleTime,
            "avgt" => Self::AverageTime,
            "ss" => Self::SingleShot,
            _ => Self::Other(tag),
        }
    }
}

impl From<&str> for Mode {
    fn from(tag: &str) -> Self {
        Self::from(tag.to_string())
    }
}

impl From<Mode> for String {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Other(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Benchmark parameters in file order.
///
/// JMH writes parameter values as strings; other scalars are accepted and
/// kept as their JSON text. A missing or `null` `params` field yields an
/// empty set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params(Vec<(String, String)>);

impl Params {
    /// Build from `(name, value)` pairs, keeping their order.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Returns `true` if there are no parameters.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Look up a parameter value by name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Iterate over `(name, value)` pairs in file order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    fn insert(&mut self, name: String, value: String) {
        match self.0.iter_mut().find(|(k, _)| *k == name) {
            Some(slot) => slot.1 = value,
            None => self.0.push((name, value)),
        }
    }
}

/// Renders as a mapping literal: `{'size': '100', 'kind': 'hash'}`.
impl fmt::Display for Params {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (name, value)) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write_quoted(f, name)?;
            f.write_str(": ")?;
            write_quoted(f, value)?;
        }
        f.write_str("}")
    }
}

/// Single quotes unless the text holds a `'` and no `"`; backslashes and the
/// chosen quote are escaped.
fn write_quoted(f: &mut fmt::Formatter<'_>, text: &str) -> fmt::Result {
    let quote = if text.contains('\'') && !text.contains('"') {
        '"'
    } else {
        '\''
    };
    write!(f, "{quote}")?;
    for ch in text.chars() {
        if ch == '\\' || ch == quote {
            write!(f, "\\")?;
        }
        write!(f, "{ch}")?;
    }
    write!(f, "{quote}")
}

impl Serialize for Params {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

impl<'de> Deserialize<'de> for Params {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ParamsVisitor;

        impl<'de> Visitor<'de> for ParamsVisitor {
            type Value = Params;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of parameter names to values")
            }

            fn visit_unit<E: de::Error>(self) -> Result<Params, E> {
                Ok(Params::default())
            }

            fn visit_none<E: de::Error>(self) -> Result<Params, E> {
                Ok(Params::default())
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Params, A::Error> {
                let mut params = Params::default();
                while let Some((name, value)) = map.next_entry::<String, serde_json::Value>()? {
                    let value = match value {
                        serde_json::Value::String(s) => s,
                        serde_json::Value::Array(_) | serde_json::Value::Object(_) => {
                            return Err(de::Error::custom(format!(
                                "parameter `{name}` must be a scalar value"
                            )));
                        }
                        other => other.to_string(),
                    };
                    params.insert(name, value);
                }
                Ok(params)
            }
        }

        deserializer.deserialize_any(ParamsVisitor)
    }
}
