//! Artifact export: raw scrape text, JSON documents and a Markdown report.

mod json;
mod markdown;

pub use self::json::container_doc;
pub use self::json::summary_doc;
pub use self::json::ContainerDoc;
pub use self::json::ContainerExportDoc;
pub use self::json::MetricDigest;
pub use self::json::SummaryDoc;
pub use self::markdown::render_report;

use std::fs;
use std::path::PathBuf;

use anyhow::Context;

use crate::analyze::{group_by_label, CategoryRules};
use crate::prom::{self, Snapshot};

pub const RAW_FILE: &str = "cadvisor_metrics_raw.txt";
pub const CONTAINER_FILE: &str = "container_metrics.json";
pub const SUMMARY_FILE: &str = "cadvisor_metrics_summary.json";
pub const REPORT_FILE: &str = "report.md";

/// Where the export goes and how container groups are selected.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub output_dir: PathBuf,
    /// Label whose value identifies a container group.
    pub group_label: String,
    /// Substring filters on the group key; empty keeps every group.
    pub id_filters: Vec<String>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        ExportOptions {
            output_dir: PathBuf::from("metrics_export"),
            group_label: "id".to_string(),
            id_filters: vec!["kubepods".to_string(), "container".to_string()],
        }
    }
}

/// Writes all four artifacts from an already-fetched body. Returns the paths
/// written, in write order.
pub fn write_all(
    body: &str,
    snapshot: &Snapshot,
    endpoint: &str,
    rules: &CategoryRules,
    options: &ExportOptions,
) -> anyhow::Result<Vec<PathBuf>> {
    fs::create_dir_all(&options.output_dir)
        .with_context(|| format!("creating {}", options.output_dir.display()))?;
    let mut written = Vec::new();

    let raw_path = options.output_dir.join(RAW_FILE);
    fs::write(&raw_path, body).with_context(|| format!("writing {}", raw_path.display()))?;
    written.push(raw_path);

    let groups = group_by_label(snapshot, &options.group_label);
    let containers = container_doc(&groups, endpoint, &options.group_label, &options.id_filters);
    let container_path = options.output_dir.join(CONTAINER_FILE);
    fs::write(&container_path, to_pretty_json(&containers)?)
        .with_context(|| format!("writing {}", container_path.display()))?;
    written.push(container_path);

    let summary = summary_doc(snapshot, endpoint, rules);
    let summary_path = options.output_dir.join(SUMMARY_FILE);
    fs::write(&summary_path, to_pretty_json(&summary)?)
        .with_context(|| format!("writing {}", summary_path.display()))?;
    written.push(summary_path);

    let report_path = options.output_dir.join(REPORT_FILE);
    fs::write(&report_path, render_report(snapshot, endpoint, rules))
        .with_context(|| format!("writing {}", report_path.display()))?;
    written.push(report_path);

    log::info!(
        "exported {} container group(s) to {}",
        containers.containers.len(),
        options.output_dir.display()
    );
    Ok(written)
}

fn to_pretty_json<T: serde::Serialize>(doc: &T) -> anyhow::Result<String> {
    let mut text = serde_json::to_string_pretty(doc).context("serializing export document")?;
    text.push('\n');
    Ok(text)
}

/// The `export` subcommand: one fetch, four files, paths echoed to stdout.
pub async fn run(
    endpoint: &str,
    rules: &CategoryRules,
    options: ExportOptions,
) -> anyhow::Result<()> {
    println!("Fetching metrics from {endpoint}...");
    let body = prom::fetch_once(endpoint).await?;
    let snapshot = Snapshot::parse(&body);
    println!(
        "Parsed {} families, {} samples",
        snapshot.family_count(),
        snapshot.sample_count()
    );
    if snapshot.malformed_lines() > 0 {
        println!("Skipped {} malformed line(s)", snapshot.malformed_lines());
    }

    let written = write_all(&body, &snapshot, endpoint, rules, &options)?;
    println!("Wrote {} files:", written.len());
    for path in &written {
        println!("  {}", path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prom::test_data;
    use std::env;

    fn scratch_dir(tag: &str) -> PathBuf {
        env::temp_dir().join(format!("cadviz-export-{tag}-{}", std::process::id()))
    }

    #[test]
    fn write_all_produces_the_four_artifacts() {
        let dir = scratch_dir("all");
        let snapshot = Snapshot::parse(test_data::CADVISOR_SCRAPE);
        let options = ExportOptions {
            output_dir: dir.clone(),
            ..ExportOptions::default()
        };
        let written = write_all(
            test_data::CADVISOR_SCRAPE,
            &snapshot,
            "http://localhost:8080/metrics",
            &CategoryRules::cadvisor(),
            &options,
        )
        .expect("export succeeds");

        assert_eq!(written.len(), 4);
        let raw = fs::read_to_string(dir.join(RAW_FILE)).expect("raw file");
        assert_eq!(raw, test_data::CADVISOR_SCRAPE);

        let summary: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(dir.join(SUMMARY_FILE)).expect("summary"))
                .expect("valid json");
        assert_eq!(summary["total_families"], 17);

        let containers: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(dir.join(CONTAINER_FILE)).expect("containers"))
                .expect("valid json");
        assert_eq!(containers["group_label"], "id");
        assert!(containers["containers"][test_data::CONTAINER_ONE].is_object());

        let report = fs::read_to_string(dir.join(REPORT_FILE)).expect("report");
        assert!(report.starts_with("# cAdvisor metrics report"));

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn default_options_match_the_cadvisor_layout() {
        let options = ExportOptions::default();
        assert_eq!(options.group_label, "id");
        assert_eq!(options.id_filters, vec!["kubepods", "container"]);
        assert_eq!(options.output_dir, PathBuf::from("metrics_export"));
    }
}
