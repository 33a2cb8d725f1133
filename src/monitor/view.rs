use std::fmt::Write;

use crate::analyze::{aggregate, CategoryCount, CategoryRules};
use crate::prom::{ScrapeHistory, Snapshot};
use crate::units::format_for_metric;

const PANEL_WIDTH: usize = 80;
const FAMILIES_PER_PANEL: usize = 3;

/// Renders one full console frame from the current scrape state. Pure
/// string building so it can run and be tested without a terminal.
pub fn render(
    history: &ScrapeHistory,
    endpoint: &str,
    rules: &CategoryRules,
    interval: u64,
) -> String {
    let mut out = String::new();
    draw_banner(&mut out);
    if let Some(update) = history.last_update() {
        let _ = writeln!(out, "Last update: {}", update.format("%Y-%m-%d %H:%M:%S"));
    }
    let _ = writeln!(out);

    if let Some(error) = history.last_error() {
        draw_error(&mut out, error);
    }
    match history.latest() {
        Some(snapshot) => draw_snapshot(&mut out, snapshot, rules),
        None => {
            if history.last_error().is_none() {
                let _ = writeln!(out, "Waiting for the first scrape of {endpoint}...");
            }
        }
    }

    draw_footer(&mut out, endpoint, history, interval);
    out
}

fn draw_banner(out: &mut String) {
    let inner = PANEL_WIDTH - 2;
    let _ = writeln!(out, "┌{}┐", "─".repeat(inner));
    let _ = writeln!(
        out,
        "│{title:^inner$}│",
        title = "CADVISOR LIVE METRICS",
        inner = inner
    );
    let _ = writeln!(out, "└{}┘", "─".repeat(inner));
}

fn draw_snapshot(out: &mut String, snapshot: &Snapshot, rules: &CategoryRules) {
    let _ = writeln!(
        out,
        "Families: {}   Samples: {}   Malformed: {}",
        snapshot.family_count(),
        snapshot.sample_count(),
        snapshot.malformed_lines()
    );
    let _ = writeln!(out);
    for (category, count) in rules.count_by_category(snapshot) {
        draw_category(out, snapshot, rules, &category, &count);
    }
}

fn draw_category(
    out: &mut String,
    snapshot: &Snapshot,
    rules: &CategoryRules,
    category: &str,
    count: &CategoryCount,
) {
    panel_top(out, category);
    let _ = writeln!(
        out,
        "│ {} families, {} series",
        count.families, count.series
    );
    for family in rules.top_families(snapshot, category, FAMILIES_PER_PANEL) {
        match aggregate(&family.values()) {
            Ok(agg) => {
                let _ = writeln!(
                    out,
                    "│   {}: {} series, avg {}",
                    family.name,
                    agg.count,
                    format_for_metric(&family.name, agg.average)
                );
            }
            Err(_) => {
                let _ = writeln!(out, "│   {}: no samples", family.name);
            }
        }
    }
    panel_bottom(out);
    let _ = writeln!(out);
}

fn draw_error(out: &mut String, error: &str) {
    panel_top(out, "SCRAPE ERROR");
    let _ = writeln!(out, "│ {error}");
    let _ = writeln!(out, "│ Retrying on the next interval.");
    panel_bottom(out);
    let _ = writeln!(out);
}

fn draw_footer(out: &mut String, endpoint: &str, history: &ScrapeHistory, interval: u64) {
    let _ = writeln!(
        out,
        "Endpoint: {endpoint}   Scrapes: {}   Interval: {interval}s   Ctrl-C to quit",
        history.scrapes()
    );
}

fn panel_top(out: &mut String, title: &str) {
    let head = format!("┌─ {title} ");
    let fill = PANEL_WIDTH.saturating_sub(head.chars().count() + 1);
    let _ = writeln!(out, "{head}{}┐", "─".repeat(fill));
}

fn panel_bottom(out: &mut String) {
    let _ = writeln!(out, "└{}┘", "─".repeat(PANEL_WIDTH - 2));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prom::test_data;
    use anyhow::anyhow;

    fn rules() -> CategoryRules {
        CategoryRules::cadvisor()
    }

    #[test]
    fn empty_history_shows_the_waiting_line() {
        let history = ScrapeHistory::default();
        let frame = render(&history, "http://localhost:8080/metrics", &rules(), 5);
        assert!(frame.contains("CADVISOR LIVE METRICS"));
        assert!(frame.contains("Waiting for the first scrape"));
        assert!(frame.contains("Scrapes: 0"));
        assert!(frame.contains("Interval: 5s"));
    }

    #[test]
    fn snapshot_renders_category_panels() {
        let mut history = ScrapeHistory::default();
        history.record_success(Snapshot::parse(test_data::CADVISOR_SCRAPE));
        let frame = render(&history, "e", &rules(), 5);

        assert!(frame.contains("Families: 17   Samples: 34   Malformed: 0"));
        assert!(frame.contains("┌─ CPU "));
        assert!(frame.contains("┌─ Memory "));
        assert!(frame.contains("┌─ other "));
        assert!(frame.contains("│ 4 families, 9 series"));
        // Three CPU families tie at 2 series; the name tie-break keeps the
        // panel deterministic.
        assert!(frame.contains("container_cpu_usage_seconds_total: 3 series"));
        assert!(!frame.contains("Waiting for the first scrape"));
    }

    #[test]
    fn byte_families_show_byte_averages() {
        let mut history = ScrapeHistory::default();
        history.record_success(Snapshot::parse(test_data::CADVISOR_SCRAPE));
        let frame = render(&history, "e", &rules(), 5);
        assert!(frame.contains("container_memory_usage_bytes: 3 series, avg 234.67 MB"));
    }

    #[test]
    fn error_panel_appears_next_to_stale_data() {
        let mut history = ScrapeHistory::default();
        history.record_success(Snapshot::parse("up 1\n"));
        history.record_failure(&anyhow!("connection refused"));
        let frame = render(&history, "e", &rules(), 5);

        assert!(frame.contains("┌─ SCRAPE ERROR "));
        assert!(frame.contains("connection refused"));
        // The previous snapshot stays on screen.
        assert!(frame.contains("Families: 1"));
    }

    #[test]
    fn error_without_data_skips_the_waiting_line() {
        let mut history = ScrapeHistory::default();
        history.record_failure(&anyhow!("no route to host"));
        let frame = render(&history, "e", &rules(), 5);
        assert!(frame.contains("no route to host"));
        assert!(!frame.contains("Waiting for the first scrape"));
    }
}
