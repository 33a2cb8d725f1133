use std::fmt::Write;
use std::fs;
use std::path::Path;

use anyhow::Context;

use crate::analyze::{aggregate, CategoryRules};
use crate::export;
use crate::prom::{self, MetricFamily, Snapshot};
use crate::units::format_for_metric;

const HEADER_WIDTH: usize = 80;

/// The cAdvisor families the overview always reports on, grouped the way
/// they are printed.
const KEY_METRICS: &[(&str, &[&str])] = &[
    (
        "CPU",
        &[
            "container_cpu_cfs_periods_total",
            "container_cpu_cfs_throttled_periods_total",
            "container_cpu_load_average_10s",
        ],
    ),
    (
        "Memory",
        &[
            "container_memory_usage_bytes",
            "container_memory_limit_bytes",
            "container_memory_working_set_bytes",
        ],
    ),
    (
        "Network",
        &[
            "container_network_receive_bytes_total",
            "container_network_transmit_bytes_total",
            "container_network_receive_packets_total",
            "container_network_transmit_packets_total",
        ],
    ),
    (
        "Filesystem",
        &["container_fs_usage_bytes", "container_fs_limit_bytes"],
    ),
];

/// Family carrying build labels such as `cadvisorVersion`.
const VERSION_FAMILY: &str = "cadvisor_version_info";

/// The `summary` subcommand: one fetch, an overview on stdout and optionally
/// the summary document as JSON.
pub async fn run(
    endpoint: &str,
    rules: &CategoryRules,
    json_path: Option<&Path>,
) -> anyhow::Result<()> {
    println!("Connecting to {endpoint}...");
    let body = prom::fetch_once(endpoint).await?;
    println!("Fetched {} bytes", body.len());

    let snapshot = Snapshot::parse(&body);
    print!("{}", render_overview(&snapshot, rules));

    if let Some(path) = json_path {
        let doc = export::summary_doc(&snapshot, endpoint, rules);
        let mut text = serde_json::to_string_pretty(&doc).context("serializing summary")?;
        text.push('\n');
        fs::write(path, text).with_context(|| format!("writing {}", path.display()))?;
        println!();
        println!("Summary saved to {}", path.display());
    }
    Ok(())
}

pub fn render_overview(snapshot: &Snapshot, rules: &CategoryRules) -> String {
    let mut out = String::new();
    let bar = "=".repeat(HEADER_WIDTH);
    let _ = writeln!(out, "{bar}");
    let _ = writeln!(
        out,
        "{title:^width$}",
        title = "CADVISOR METRICS OVERVIEW",
        width = HEADER_WIDTH
    );
    let _ = writeln!(out, "{bar}");
    let _ = writeln!(out);
    let _ = writeln!(out, "Metric families: {}", snapshot.family_count());
    let _ = writeln!(out, "Samples:         {}", snapshot.sample_count());
    if snapshot.malformed_lines() > 0 {
        let _ = writeln!(out, "Malformed lines: {}", snapshot.malformed_lines());
    }
    let _ = writeln!(out);

    draw_version(&mut out, snapshot);
    draw_categories(&mut out, snapshot, rules);
    draw_key_metrics(&mut out, snapshot);
    out
}

fn draw_version(out: &mut String, snapshot: &Snapshot) {
    let sample = snapshot
        .get(VERSION_FAMILY)
        .and_then(|family| family.samples.first());
    let _ = writeln!(out, "cAdvisor build:");
    match sample {
        Some(sample) => {
            let label = |name: &str| sample.label(name).unwrap_or("unknown").to_string();
            let _ = writeln!(out, "  version  {}", label("cadvisorVersion"));
            let _ = writeln!(out, "  kernel   {}", label("kernelVersion"));
            let _ = writeln!(out, "  os       {}", label("osVersion"));
        }
        None => {
            let _ = writeln!(out, "  {VERSION_FAMILY} not exposed");
        }
    }
    let _ = writeln!(out);
}

fn draw_categories(out: &mut String, snapshot: &Snapshot, rules: &CategoryRules) {
    let _ = writeln!(out, "Categories:");
    for (category, count) in rules.count_by_category(snapshot) {
        let _ = writeln!(
            out,
            "  {category:<12} {:>4} families {:>6} series",
            count.families, count.series
        );
    }
    let _ = writeln!(out);
}

fn draw_key_metrics(out: &mut String, snapshot: &Snapshot) {
    let _ = writeln!(out, "Key metrics:");
    for (section, names) in KEY_METRICS {
        let _ = writeln!(out, "[{section}]");
        for name in *names {
            match snapshot.get(name) {
                Some(family) => draw_key_metric(out, name, family),
                None => {
                    let _ = writeln!(out, "  {name:<44} not exposed");
                }
            }
        }
    }
}

fn draw_key_metric(out: &mut String, name: &str, family: &MetricFamily) {
    match aggregate(&family.values()) {
        Ok(agg) => {
            let _ = writeln!(
                out,
                "  {name:<44} {:>4} series  avg {}",
                agg.count,
                format_for_metric(name, agg.average)
            );
        }
        Err(_) => {
            let _ = writeln!(out, "  {name:<44}    0 series");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prom::test_data;

    #[test]
    fn overview_carries_totals_version_and_categories() {
        let snapshot = Snapshot::parse(test_data::CADVISOR_SCRAPE);
        let overview = render_overview(&snapshot, &CategoryRules::cadvisor());

        assert!(overview.contains("CADVISOR METRICS OVERVIEW"));
        assert!(overview.contains("Metric families: 17"));
        assert!(overview.contains("Samples:         34"));
        assert!(overview.contains("version  v0.47.2"));
        assert!(overview.contains("kernel   6.1.0-13-amd64"));
        assert!(overview.contains("CPU") && overview.contains("4 families"));
    }

    #[test]
    fn key_metrics_show_averages_with_units() {
        let snapshot = Snapshot::parse(test_data::CADVISOR_SCRAPE);
        let overview = render_overview(&snapshot, &CategoryRules::cadvisor());

        // (419430400 + 104857600) / 2 bytes
        assert!(overview.contains("avg 250.00 MB"));
        // (152363 + 48120) / 2, not byte formatted
        assert!(overview.contains("avg 100241.50"));
    }

    #[test]
    fn absent_key_metrics_are_called_out() {
        let snapshot = Snapshot::parse(test_data::CADVISOR_SCRAPE);
        let overview = render_overview(&snapshot, &CategoryRules::cadvisor());
        let line = overview
            .lines()
            .find(|l| l.contains("container_network_transmit_packets_total"))
            .expect("key metric listed");
        assert!(line.ends_with("not exposed"));
    }

    #[test]
    fn empty_snapshot_still_renders() {
        let snapshot = Snapshot::parse("");
        let overview = render_overview(&snapshot, &CategoryRules::cadvisor());
        assert!(overview.contains("Metric families: 0"));
        assert!(overview.contains("cadvisor_version_info not exposed"));
    }

    #[test]
    fn malformed_line_total_appears_when_nonzero() {
        let snapshot = Snapshot::parse("ok 1\nbroken !!!\n");
        let overview = render_overview(&snapshot, &CategoryRules::cadvisor());
        assert!(overview.contains("Malformed lines: 1"));
    }
}
