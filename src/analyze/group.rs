use std::collections::BTreeMap;

use crate::prom::{Sample, Snapshot};

/// Samples keyed by the value of one label, in sorted key order.
pub type Groups<'a> = BTreeMap<String, Vec<&'a Sample>>;

/// Collects every sample in the snapshot whose label set contains
/// `label_key`, keyed by that label's value. Samples without the key are left
/// out entirely; an empty-string value is a real group. Within a group,
/// samples keep snapshot order.
pub fn group_by_label<'a>(snapshot: &'a Snapshot, label_key: &str) -> Groups<'a> {
    let mut groups: Groups<'a> = BTreeMap::new();
    for family in snapshot.families() {
        for sample in &family.samples {
            if let Some(value) = sample.labels.get(label_key) {
                groups.entry(value.clone()).or_default().push(sample);
            }
        }
    }
    groups
}
