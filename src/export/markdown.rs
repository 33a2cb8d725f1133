use std::fmt::Write;

use chrono::Local;

use crate::analyze::{aggregate, CategoryRules};
use crate::prom::Snapshot;
use crate::units::format_for_metric;

/// Families listed per category in the report.
const FAMILIES_PER_CATEGORY: usize = 5;

/// Renders the Markdown report for one snapshot. Pure string building; the
/// caller decides where it goes.
pub fn render_report(snapshot: &Snapshot, endpoint: &str, rules: &CategoryRules) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# cAdvisor metrics report");
    let _ = writeln!(out);
    let _ = writeln!(out, "- Endpoint: `{endpoint}`");
    let _ = writeln!(out, "- Generated: {}", Local::now().to_rfc3339());
    let _ = writeln!(out, "- Metric families: {}", snapshot.family_count());
    let _ = writeln!(out, "- Samples: {}", snapshot.sample_count());
    if snapshot.malformed_lines() > 0 {
        let _ = writeln!(
            out,
            "- Skipped malformed lines: {}",
            snapshot.malformed_lines()
        );
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "## Categories");
    let _ = writeln!(out);
    let _ = writeln!(out, "| Category | Families | Series |");
    let _ = writeln!(out, "|----------|---------:|-------:|");
    for (category, count) in rules.count_by_category(snapshot) {
        let _ = writeln!(out, "| {category} | {} | {} |", count.families, count.series);
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "## Largest families per category");
    for category in rules.categories() {
        let families = rules.top_families(snapshot, category, FAMILIES_PER_CATEGORY);
        if families.is_empty() {
            continue;
        }
        let _ = writeln!(out);
        let _ = writeln!(out, "### {category}");
        let _ = writeln!(out);
        let _ = writeln!(out, "| Metric | Series | Min | Max | Sum | Average |");
        let _ = writeln!(out, "|--------|-------:|----:|----:|----:|--------:|");
        for family in families {
            match aggregate(&family.values()) {
                Ok(agg) => {
                    let _ = writeln!(
                        out,
                        "| `{}` | {} | {} | {} | {} | {} |",
                        family.name,
                        agg.count,
                        format_for_metric(&family.name, agg.min),
                        format_for_metric(&family.name, agg.max),
                        format_for_metric(&family.name, agg.sum),
                        format_for_metric(&family.name, agg.average),
                    );
                }
                Err(_) => {
                    let _ = writeln!(out, "| `{}` | 0 | - | - | - | - |", family.name);
                }
            }
        }
    }
    out
}
