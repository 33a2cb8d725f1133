//! Grouping, categorization and aggregation over a parsed snapshot.
//!
//! Everything here reads a [`crate::prom::Snapshot`] and computes; no I/O,
//! no mutation of the snapshot.

mod aggregate;
mod categorize;
mod group;

pub use self::aggregate::aggregate;
pub use self::aggregate::Aggregate;
pub use self::aggregate::EmptyAggregation;
pub use self::categorize::CategoryCount;
pub use self::categorize::CategoryRule;
pub use self::categorize::CategoryRules;
pub use self::categorize::NameMatcher;
pub use self::categorize::OTHER_CATEGORY;
pub use self::group::group_by_label;
pub use self::group::Groups;
