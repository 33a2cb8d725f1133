use clap::Parser;
use regex::Regex;

use cadviz::cli::{Cli, Command};
use cadviz::export::ExportOptions;
use cadviz::logging::app_config;
use cadviz::{export, monitor, report};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // initialize the logger
    log4rs::init_config(app_config("cadviz.log", cli.loglevel)).unwrap();
    log::info!("Starting the application!");

    let rules = cli.category_rules();

    let regex = Regex::new(":(\\d{2,5})/").unwrap();
    let endpoint = match cli.port {
        Some(port) => regex
            .replace(&cli.endpoint, format!(":{port}/", port = port))
            .to_string(),
        None => cli.endpoint,
    };
    log::info!("Reading metrics from endpoint: {}", endpoint);

    match cli.command {
        Command::Summary { json } => {
            report::run(&endpoint, &rules, json.as_deref()).await?;
        }
        Command::Monitor => {
            log::info!("Scraping interval is: {}s", cli.scrape_interval);
            monitor::show(endpoint, cli.scrape_interval as u64, &rules).await?;
        }
        Command::Export {
            output,
            group_label,
            id_filters,
        } => {
            let options = ExportOptions {
                output_dir: output,
                group_label,
                id_filters,
            };
            export::run(&endpoint, &rules, options).await?;
        }
    }
    Ok(())
}
