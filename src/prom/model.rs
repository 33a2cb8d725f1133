use std::collections::HashMap;
use std::fmt;

use super::parser::{self, ParsedLine};

/// One observation parsed from a sample line.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub metric_name: String,
    pub labels: HashMap<String, String>,
    pub value: f64,
    /// Milliseconds since the epoch, when the line carried one. Absent means
    /// "scrape time" and is perfectly valid.
    pub timestamp: Option<i64>,
}

impl Sample {
    pub fn label(&self, name: &str) -> Option<&str> {
        self.labels.get(name).map(String::as_str)
    }
}

/// Metric type hint from a `# TYPE` comment.
///
/// Unknown wire tokens are carried verbatim in [`MetricType::Other`] instead
/// of being rejected; exporters keep inventing types faster than parsers
/// learn them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetricType {
    Counter,
    Gauge,
    Histogram,
    Summary,
    Untyped,
    Other(String),
}

impl MetricType {
    pub fn parse(token: &str) -> MetricType {
        match token.to_ascii_lowercase().as_str() {
            "counter" => MetricType::Counter,
            "gauge" => MetricType::Gauge,
            "histogram" => MetricType::Histogram,
            "summary" => MetricType::Summary,
            "untyped" => MetricType::Untyped,
            _ => MetricType::Other(token.to_string()),
        }
    }
}

impl fmt::Display for MetricType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricType::Counter => f.write_str("counter"),
            MetricType::Gauge => f.write_str("gauge"),
            MetricType::Histogram => f.write_str("histogram"),
            MetricType::Summary => f.write_str("summary"),
            MetricType::Untyped => f.write_str("untyped"),
            MetricType::Other(token) => f.write_str(token),
        }
    }
}

impl Default for MetricType {
    fn default() -> Self {
        MetricType::Untyped
    }
}

/// All samples sharing one metric name within one snapshot, plus the
/// HELP/TYPE metadata seen for that name.
///
/// Histogram and summary suffix variants (`_bucket`, `_sum`, `_count`) are
/// separate families by their literal names; nothing here merges them.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricFamily {
    pub name: String,
    pub help: Option<String>,
    pub metric_type: MetricType,
    /// Samples in the order they appeared in the source text.
    pub samples: Vec<Sample>,
}

impl MetricFamily {
    fn new(name: &str) -> MetricFamily {
        MetricFamily {
            name: name.to_string(),
            help: None,
            metric_type: MetricType::Untyped,
            samples: Vec::new(),
        }
    }

    /// The raw values of all samples, in sample order.
    pub fn values(&self) -> Vec<f64> {
        self.samples.iter().map(|sample| sample.value).collect()
    }
}

/// The complete parse result of one exposition-format fetch.
///
/// Built once per body, immutable afterwards, and safe to share for
/// concurrent grouping and aggregation reads. Nothing is cached across
/// snapshots.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    families: Vec<MetricFamily>,
    index: HashMap<String, usize>,
    malformed_lines: usize,
}

impl Snapshot {
    /// Parses one exposition-format body. Never fails: lines that cannot be
    /// parsed are counted in [`Snapshot::malformed_lines`] and skipped, and
    /// empty or whitespace-only input yields an empty snapshot.
    pub fn parse(text: &str) -> Snapshot {
        parser::parse_snapshot(text)
    }

    /// Family lookup by the metric name as it literally appeared.
    pub fn get(&self, metric_name: &str) -> Option<&MetricFamily> {
        self.index.get(metric_name).map(|&i| &self.families[i])
    }

    /// Families in first-appearance order.
    pub fn families(&self) -> impl Iterator<Item = &MetricFamily> {
        self.families.iter()
    }

    pub fn family_count(&self) -> usize {
        self.families.len()
    }

    pub fn is_empty(&self) -> bool {
        self.families.is_empty()
    }

    /// Total number of samples across all families.
    pub fn sample_count(&self) -> usize {
        self.families.iter().map(|f| f.samples.len()).sum()
    }

    /// Lines that looked like samples but failed to parse.
    pub fn malformed_lines(&self) -> usize {
        self.malformed_lines
    }

    /// Folds one classified line into the snapshot. HELP/TYPE metadata may
    /// arrive before or after the samples of its family; a repeated HELP or
    /// TYPE for the same name overwrites the previous one.
    pub(crate) fn record(&mut self, line: ParsedLine) {
        match line {
            ParsedLine::Blank | ParsedLine::Comment => {}
            ParsedLine::Help { metric_name, text } => {
                self.family_mut(&metric_name).help = Some(text);
            }
            ParsedLine::Type {
                metric_name,
                metric_type,
            } => {
                self.family_mut(&metric_name).metric_type = metric_type;
            }
            ParsedLine::Sample(sample) => {
                let family = self.family_mut(&sample.metric_name);
                family.samples.push(sample);
            }
            ParsedLine::Malformed => {
                self.malformed_lines += 1;
            }
        }
    }

    fn family_mut(&mut self, name: &str) -> &mut MetricFamily {
        let idx = match self.index.get(name) {
            Some(&i) => i,
            None => {
                let i = self.families.len();
                self.families.push(MetricFamily::new(name));
                self.index.insert(name.to_string(), i);
                i
            }
        };
        &mut self.families[idx]
    }
}
