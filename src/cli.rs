use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;
use clap::ValueHint;

use crate::analyze::{CategoryRule, CategoryRules};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// cAdvisor endpoint to scrape
    ///
    /// The exposition-format endpoint metrics are read from.
    #[arg(short, long, env="CADVISOR_ENDPOINT", value_hint=ValueHint::Url, default_value="http://localhost:8080/metrics")]
    pub endpoint: String,

    /// cAdvisor endpoint's port number
    ///
    /// Replaces the port number in the endpoint. Example: http://localhost:<PORT>/metrics
    #[arg(short, long, env="CADVISOR_PORT", value_hint=ValueHint::Other)]
    pub port: Option<u16>,

    /// Scrape interval of the cAdvisor endpoint
    ///
    /// The time interval in seconds between 2 consecutive scrapes in monitor mode.
    #[arg(short='i', long, env="CADVISOR_SCRAPE_INTERVAL", value_hint=ValueHint::Other, default_value="5")]
    pub scrape_interval: u16,

    /// Set the logging level
    ///
    /// Set the logging level to use when logging to the app log file.
    #[arg(short, long, env="LOG_LEVEL", value_hint=ValueHint::Other, default_value="INFO")]
    pub loglevel: log::LevelFilter,

    /// Category rule as NAME=PREFIX, repeatable
    ///
    /// Replaces the built-in cAdvisor categories (CPU=container_cpu, Memory=container_memory,
    /// Network=container_network, Filesystem=container_fs). Rules are tried in the
    /// order given; unmatched metrics land in "other".
    #[arg(long="category", value_name="NAME=PREFIX")]
    pub categories: Vec<CategoryRule>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print a one-shot overview of the endpoint's metrics
    Summary {
        /// Also write the summary as JSON to this path
        #[arg(long, value_hint=ValueHint::FilePath)]
        json: Option<PathBuf>,
    },
    /// Live per-category console view, redrawn every scrape interval
    Monitor,
    /// Export raw text, JSON documents and a Markdown report
    Export {
        /// Directory the artifacts are written to
        #[arg(short, long, value_hint=ValueHint::DirPath, default_value="metrics_export")]
        output: PathBuf,

        /// Label whose value identifies a container group
        #[arg(long, default_value="id")]
        group_label: String,

        /// Keep only groups whose key contains one of these substrings
        #[arg(long="id-contains", value_name="SUBSTRING", default_values_t=[String::from("kubepods"), String::from("container")])]
        id_filters: Vec<String>,
    },
}

impl Cli {
    /// The active rule set: explicit `--category` rules when given, the
    /// cAdvisor defaults otherwise.
    pub fn category_rules(&self) -> CategoryRules {
        if self.categories.is_empty() {
            CategoryRules::cadvisor()
        } else {
            CategoryRules::new(self.categories.clone())
        }
    }
}
