use std::str::FromStr;

use serde::Serialize;

use crate::prom::{MetricFamily, Snapshot};

/// Name of the fallback bucket for metric names no rule matches.
pub const OTHER_CATEGORY: &str = "other";

/// How a rule recognizes metric names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameMatcher {
    /// Matches names starting with the pattern, e.g. `container_cpu`.
    Prefix(String),
    /// Matches names containing the pattern anywhere.
    Contains(String),
}

impl NameMatcher {
    pub fn matches(&self, metric_name: &str) -> bool {
        match self {
            NameMatcher::Prefix(pattern) => metric_name.starts_with(pattern.as_str()),
            NameMatcher::Contains(pattern) => metric_name.contains(pattern.as_str()),
        }
    }
}

/// One categorization rule. Rules are tried in order; the first match wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRule {
    pub category: String,
    pub matcher: NameMatcher,
}

impl FromStr for CategoryRule {
    type Err = String;

    /// Accepts a `NAME=PREFIX` pair, as passed on the command line.
    fn from_str(s: &str) -> Result<CategoryRule, String> {
        match s.split_once('=') {
            Some((category, prefix)) if !category.is_empty() && !prefix.is_empty() => {
                Ok(CategoryRule {
                    category: category.to_string(),
                    matcher: NameMatcher::Prefix(prefix.to_string()),
                })
            }
            _ => Err(format!("expected NAME=PREFIX, got {s:?}")),
        }
    }
}

/// An ordered rule list. Metric names matching no rule land in
/// [`OTHER_CATEGORY`]; the rules themselves never change a parse result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRules {
    rules: Vec<CategoryRule>,
}

/// Family and series counts for one category of one snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub families: usize,
    pub series: usize,
}

impl CategoryRules {
    pub fn new(rules: Vec<CategoryRule>) -> CategoryRules {
        CategoryRules { rules }
    }

    /// The cAdvisor rule set: CPU, Memory, Network and Filesystem by metric
    /// name prefix.
    pub fn cadvisor() -> CategoryRules {
        let prefix = |category: &str, pattern: &str| CategoryRule {
            category: category.to_string(),
            matcher: NameMatcher::Prefix(pattern.to_string()),
        };
        CategoryRules::new(vec![
            prefix("CPU", "container_cpu"),
            prefix("Memory", "container_memory"),
            prefix("Network", "container_network"),
            prefix("Filesystem", "container_fs"),
        ])
    }

    /// The category of one metric name.
    pub fn categorize(&self, metric_name: &str) -> &str {
        self.rules
            .iter()
            .find(|rule| rule.matcher.matches(metric_name))
            .map(|rule| rule.category.as_str())
            .unwrap_or(OTHER_CATEGORY)
    }

    /// Distinct category names in rule order, the fallback last.
    pub fn categories(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for rule in &self.rules {
            if !names.contains(&rule.category.as_str()) {
                names.push(rule.category.as_str());
            }
        }
        names.push(OTHER_CATEGORY);
        names
    }

    /// The category's families with the most series, metric name as the
    /// tie-break, capped at `limit`.
    pub fn top_families<'a>(
        &self,
        snapshot: &'a Snapshot,
        category: &str,
        limit: usize,
    ) -> Vec<&'a MetricFamily> {
        let mut families: Vec<&MetricFamily> = snapshot
            .families()
            .filter(|family| self.categorize(&family.name) == category)
            .collect();
        families.sort_by(|a, b| {
            b.samples
                .len()
                .cmp(&a.samples.len())
                .then_with(|| a.name.cmp(&b.name))
        });
        families.truncate(limit);
        families
    }

    /// Family and series tallies per category over a whole snapshot, in
    /// [`CategoryRules::categories`] order. Categories no family matched are
    /// present with zero counts.
    pub fn count_by_category(&self, snapshot: &Snapshot) -> Vec<(String, CategoryCount)> {
        let mut counts: Vec<(String, CategoryCount)> = self
            .categories()
            .into_iter()
            .map(|name| (name.to_string(), CategoryCount::default()))
            .collect();
        for family in snapshot.families() {
            let category = self.categorize(&family.name);
            if let Some((_, count)) = counts.iter_mut().find(|(name, _)| name == category) {
                count.families += 1;
                count.series += family.samples.len();
            }
        }
        counts
    }
}

impl Default for CategoryRules {
    fn default() -> Self {
        CategoryRules::cadvisor()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prom::test_data;

    #[test]
    fn default_rules_cover_the_cadvisor_prefixes() {
        let rules = CategoryRules::cadvisor();
        assert_eq!(rules.categorize("container_cpu_usage_seconds_total"), "CPU");
        assert_eq!(rules.categorize("container_memory_usage_bytes"), "Memory");
        assert_eq!(
            rules.categorize("container_network_receive_bytes_total"),
            "Network"
        );
        assert_eq!(rules.categorize("container_fs_usage_bytes"), "Filesystem");
        assert_eq!(rules.categorize("machine_cpu_cores"), OTHER_CATEGORY);
        assert_eq!(rules.categorize("go_gc_duration_seconds"), OTHER_CATEGORY);
    }

    #[test]
    fn first_matching_rule_wins() {
        let rules = CategoryRules::new(vec![
            CategoryRule {
                category: "broad".to_string(),
                matcher: NameMatcher::Prefix("container_".to_string()),
            },
            CategoryRule {
                category: "narrow".to_string(),
                matcher: NameMatcher::Prefix("container_cpu".to_string()),
            },
        ]);
        assert_eq!(rules.categorize("container_cpu_usage_seconds_total"), "broad");
    }

    #[test]
    fn contains_matcher_looks_anywhere() {
        let rules = CategoryRules::new(vec![CategoryRule {
            category: "gc".to_string(),
            matcher: NameMatcher::Contains("_gc_".to_string()),
        }]);
        assert_eq!(rules.categorize("go_gc_duration_seconds"), "gc");
        assert_eq!(rules.categorize("go_goroutines"), OTHER_CATEGORY);
    }

    #[test]
    fn empty_rule_list_sends_everything_to_other() {
        let rules = CategoryRules::new(Vec::new());
        assert_eq!(rules.categorize("anything_at_all"), OTHER_CATEGORY);
        assert_eq!(rules.categories(), vec![OTHER_CATEGORY]);
    }

    #[test]
    fn categories_list_order_and_fallback() {
        let rules = CategoryRules::cadvisor();
        assert_eq!(
            rules.categories(),
            vec!["CPU", "Memory", "Network", "Filesystem", OTHER_CATEGORY]
        );
    }

    #[test]
    fn count_by_category_tallies_the_fixture() {
        let snapshot = Snapshot::parse(test_data::CADVISOR_SCRAPE);
        let counts = CategoryRules::cadvisor().count_by_category(&snapshot);
        let get = |name: &str| {
            counts
                .iter()
                .find(|(n, _)| n == name)
                .map(|(_, c)| c.clone())
                .expect("category present")
        };
        assert_eq!(get("CPU"), CategoryCount { families: 4, series: 9 });
        assert_eq!(get("Memory"), CategoryCount { families: 3, series: 8 });
        assert_eq!(get("Network"), CategoryCount { families: 3, series: 6 });
        assert_eq!(
            get("Filesystem"),
            CategoryCount { families: 2, series: 4 }
        );
        assert_eq!(
            get(OTHER_CATEGORY),
            CategoryCount { families: 5, series: 7 }
        );
    }

    #[test]
    fn top_families_sorts_by_series_then_name() {
        let snapshot = Snapshot::parse(
            "container_cpu_b{c=\"1\"} 1\ncontainer_cpu_b{c=\"2\"} 2\ncontainer_cpu_a 3\ncontainer_cpu_c 4\n",
        );
        let rules = CategoryRules::cadvisor();
        let top = rules.top_families(&snapshot, "CPU", 3);
        let names: Vec<&str> = top.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["container_cpu_b", "container_cpu_a", "container_cpu_c"]
        );

        assert_eq!(rules.top_families(&snapshot, "CPU", 2).len(), 2);
        assert!(rules.top_families(&snapshot, "Memory", 3).is_empty());
    }

    #[test]
    fn rule_parses_from_name_equals_prefix() {
        let rule: CategoryRule = "GPU=container_accelerator".parse().expect("valid rule");
        assert_eq!(rule.category, "GPU");
        assert!(rule.matcher.matches("container_accelerator_duty_cycle"));

        assert!("no-separator".parse::<CategoryRule>().is_err());
        assert!("=prefix".parse::<CategoryRule>().is_err());
        assert!("name=".parse::<CategoryRule>().is_err());
    }
}
