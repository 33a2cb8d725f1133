//! Parse, categorize and aggregate cAdvisor metrics in Prometheus
//! exposition format.
//!
//! The crate works one scrape at a time: fetch a body, parse it into a
//! [`prom::Snapshot`], then let [`analyze`] group, categorize and aggregate
//! it. The `summary`, `monitor` and `export` subcommands are thin layers
//! over that engine.

pub mod analyze;
pub mod cli;
pub mod export;
pub mod logging;
pub mod monitor;
pub mod prom;
pub mod report;
pub mod units;
