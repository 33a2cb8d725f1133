//! Live console view: clear, redraw, repeat until Ctrl-C.

mod view;

use std::io::{stdout, Write};

use crossterm::cursor::MoveTo;
use crossterm::execute;
use crossterm::terminal::{Clear, ClearType};
use tokio::time::{self, Duration};

use crate::analyze::CategoryRules;
use crate::prom::MetricScraper;

/// Runs the live view. Scrapes arrive from the background scraper thread;
/// this loop only reads the shared history and repaints.
pub async fn show(
    endpoint: String,
    scrape_interval: u64,
    rules: &CategoryRules,
) -> anyhow::Result<()> {
    let scraper = MetricScraper::new(endpoint.clone(), scrape_interval);
    let mut ticker = time::interval(Duration::from_secs(scrape_interval));
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let frame = {
                    let history = scraper.get_history_lock()?;
                    view::render(&history, &endpoint, rules, scrape_interval)
                };
                redraw(&frame)?;
            }
            _ = tokio::signal::ctrl_c() => {
                println!();
                println!("Monitoring stopped.");
                break;
            }
        }
    }
    Ok(())
}

fn redraw(frame: &str) -> anyhow::Result<()> {
    let mut out = stdout();
    execute!(out, Clear(ClearType::All), MoveTo(0, 0))?;
    out.write_all(frame.as_bytes())?;
    out.flush()?;
    Ok(())
}
