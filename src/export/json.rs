use std::collections::BTreeMap;

use chrono::Local;
use serde::Serialize;

use crate::analyze::{CategoryCount, CategoryRules, Groups};
use crate::prom::Snapshot;

/// Top-level shape of the exported summary document.
#[derive(Debug, Serialize)]
pub struct SummaryDoc {
    pub timestamp: String,
    pub endpoint: String,
    pub total_families: usize,
    pub total_samples: usize,
    pub malformed_lines: usize,
    pub categories: BTreeMap<String, CategoryCount>,
}

pub fn summary_doc(snapshot: &Snapshot, endpoint: &str, rules: &CategoryRules) -> SummaryDoc {
    SummaryDoc {
        timestamp: Local::now().to_rfc3339(),
        endpoint: endpoint.to_string(),
        total_families: snapshot.family_count(),
        total_samples: snapshot.sample_count(),
        malformed_lines: snapshot.malformed_lines(),
        categories: rules.count_by_category(snapshot).into_iter().collect(),
    }
}

/// Per-metric entry inside one container group: how many series the group
/// holds for that metric, and the first value seen as a taster.
#[derive(Debug, Serialize)]
pub struct MetricDigest {
    pub count: usize,
    pub sample_value: f64,
}

/// One grouped container inside the container document.
#[derive(Debug, Serialize)]
pub struct ContainerDoc {
    pub metric_count: usize,
    pub metrics: BTreeMap<String, MetricDigest>,
}

/// Top-level shape of the exported container document.
#[derive(Debug, Serialize)]
pub struct ContainerExportDoc {
    pub timestamp: String,
    pub endpoint: String,
    pub group_label: String,
    pub containers: BTreeMap<String, ContainerDoc>,
}

/// Digests label groups into the container document. When `id_filters` is
/// non-empty, only group keys containing at least one of the substrings are
/// kept; an empty filter list keeps everything.
pub fn container_doc(
    groups: &Groups<'_>,
    endpoint: &str,
    group_label: &str,
    id_filters: &[String],
) -> ContainerExportDoc {
    let mut containers = BTreeMap::new();
    for (key, samples) in groups {
        if !id_filters.is_empty() && !id_filters.iter().any(|needle| key.contains(needle.as_str()))
        {
            continue;
        }
        let mut metrics: BTreeMap<String, MetricDigest> = BTreeMap::new();
        for sample in samples {
            metrics
                .entry(sample.metric_name.clone())
                .or_insert(MetricDigest {
                    count: 0,
                    sample_value: sample.value,
                })
                .count += 1;
        }
        containers.insert(
            key.clone(),
            ContainerDoc {
                metric_count: metrics.len(),
                metrics,
            },
        );
    }
    ContainerExportDoc {
        timestamp: Local::now().to_rfc3339(),
        endpoint: endpoint.to_string(),
        group_label: group_label.to_string(),
        containers,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyze::group_by_label;
    use crate::prom::test_data;

    fn fixture() -> Snapshot {
        Snapshot::parse(test_data::CADVISOR_SCRAPE)
    }

    #[test]
    fn summary_doc_carries_the_totals() {
        let snapshot = fixture();
        let doc = summary_doc(&snapshot, "http://localhost:8080/metrics", &CategoryRules::cadvisor());
        assert_eq!(doc.total_families, test_data::FAMILY_COUNT);
        assert_eq!(doc.total_samples, test_data::SAMPLE_COUNT);
        assert_eq!(doc.malformed_lines, 0);
        assert_eq!(doc.categories["CPU"].families, 4);
        assert_eq!(doc.categories["other"].series, 7);

        let json = serde_json::to_value(&doc).expect("serializable");
        assert_eq!(json["endpoint"], "http://localhost:8080/metrics");
        assert_eq!(json["categories"]["Memory"]["series"], 8);
    }

    #[test]
    fn container_doc_filters_and_digests() {
        let snapshot = fixture();
        let groups = group_by_label(&snapshot, "id");
        let filters = vec!["kubepods".to_string(), "container".to_string()];
        let doc = container_doc(&groups, "http://localhost:8080/metrics", "id", &filters);

        // The system slice matches neither substring.
        assert_eq!(doc.containers.len(), 2);
        assert!(!doc.containers.contains_key(test_data::SYSTEM_SLICE));

        let one = &doc.containers[test_data::CONTAINER_ONE];
        assert_eq!(one.metric_count, 12);
        assert_eq!(one.metrics["container_cpu_usage_seconds_total"].count, 1);
        assert_eq!(
            one.metrics["container_memory_usage_bytes"].sample_value,
            536870912.0
        );
        assert_eq!(doc.containers[test_data::CONTAINER_TWO].metric_count, 10);
    }

    #[test]
    fn empty_filter_list_keeps_every_group() {
        let snapshot = fixture();
        let groups = group_by_label(&snapshot, "id");
        let doc = container_doc(&groups, "e", "id", &[]);
        assert_eq!(doc.containers.len(), 3);
        assert!(doc.containers.contains_key(test_data::SYSTEM_SLICE));
    }

    #[test]
    fn digest_counts_repeated_metrics_and_keeps_first_value() {
        let snapshot = Snapshot::parse(
            "m{id=\"a\",n=\"1\"} 10\nm{id=\"a\",n=\"2\"} 20\nm{id=\"a\",n=\"3\"} 30\n",
        );
        let groups = group_by_label(&snapshot, "id");
        let doc = container_doc(&groups, "e", "id", &[]);
        let digest = &doc.containers["a"].metrics["m"];
        assert_eq!(digest.count, 3);
        assert_eq!(digest.sample_value, 10.0);
    }
}
