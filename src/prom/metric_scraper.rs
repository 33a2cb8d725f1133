use std::sync::{Arc, Mutex, MutexGuard};
use std::thread;
use std::time::Duration;

use anyhow::{anyhow, Context};
use chrono::{DateTime, Local};

use super::model::Snapshot;

/// One blocking GET of the exposition endpoint, body returned as text.
/// Non-2xx statuses are errors.
pub fn fetch_text(endpoint: &str) -> anyhow::Result<String> {
    let response = reqwest::blocking::get(endpoint)
        .with_context(|| format!("requesting {endpoint}"))?
        .error_for_status()
        .with_context(|| format!("bad status from {endpoint}"))?;
    response.text().context("reading response body")
}

/// One fetch for callers already on the tokio runtime. The blocking client
/// must not run on a runtime worker, so the request is pushed to the
/// blocking pool.
pub async fn fetch_once(endpoint: &str) -> anyhow::Result<String> {
    let endpoint = endpoint.to_owned();
    tokio::task::spawn_blocking(move || fetch_text(&endpoint))
        .await
        .context("metrics fetch task failed")?
}

/// What the scraper publishes after every attempt: the latest snapshot plus
/// enough diagnostics for the live view. Only the most recent scrape is
/// kept; there is no history across scrapes.
#[derive(Debug, Default)]
pub struct ScrapeHistory {
    latest: Option<Snapshot>,
    scrapes: u64,
    last_update: Option<DateTime<Local>>,
    last_error: Option<String>,
}

impl ScrapeHistory {
    pub fn latest(&self) -> Option<&Snapshot> {
        self.latest.as_ref()
    }

    /// Number of successful scrapes so far.
    pub fn scrapes(&self) -> u64 {
        self.scrapes
    }

    pub fn last_update(&self) -> Option<DateTime<Local>> {
        self.last_update
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub(crate) fn record_success(&mut self, snapshot: Snapshot) {
        self.latest = Some(snapshot);
        self.scrapes += 1;
        self.last_update = Some(Local::now());
        self.last_error = None;
    }

    // A failure keeps the previous snapshot around so the view can keep
    // showing data next to the error.
    pub(crate) fn record_failure(&mut self, error: &anyhow::Error) {
        self.last_error = Some(format!("{error:#}"));
    }
}

/// Scrapes the endpoint on a fixed interval from a background thread and
/// keeps the most recent result behind a shared lock.
//TODO: Add a stop flag so the monitor can shut the thread down instead of
//      relying on process exit.
#[derive(Debug)]
pub struct MetricScraper {
    history: Arc<Mutex<ScrapeHistory>>,
}

impl MetricScraper {
    pub fn new(endpoint: String, scrape_interval: u64) -> MetricScraper {
        let history = Arc::new(Mutex::new(ScrapeHistory::default()));
        let shared = Arc::clone(&history);
        thread::Builder::new()
            .name("metric-scraper".to_string())
            .spawn(move || scrape_loop(&endpoint, scrape_interval, &shared))
            .expect("spawning the scraper thread");
        MetricScraper { history }
    }

    pub fn get_history_lock(&self) -> anyhow::Result<MutexGuard<'_, ScrapeHistory>> {
        self.history
            .lock()
            .map_err(|_| anyhow!("scrape history lock poisoned"))
    }
}

fn scrape_loop(endpoint: &str, scrape_interval: u64, history: &Arc<Mutex<ScrapeHistory>>) {
    loop {
        match fetch_text(endpoint) {
            Ok(body) => {
                let snapshot = Snapshot::parse(&body);
                log::info!(
                    "scraped {} families, {} samples, {} malformed line(s)",
                    snapshot.family_count(),
                    snapshot.sample_count(),
                    snapshot.malformed_lines()
                );
                if let Ok(mut history) = history.lock() {
                    history.record_success(snapshot);
                }
            }
            Err(error) => {
                log::error!("scrape of {endpoint} failed: {error:#}");
                if let Ok(mut history) = history.lock() {
                    history.record_failure(&error);
                }
            }
        }
        thread::sleep(Duration::from_secs(scrape_interval));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_replaces_snapshot_and_clears_error() {
        let mut history = ScrapeHistory::default();
        history.record_failure(&anyhow!("connection refused"));
        assert!(history.last_error().is_some());
        assert_eq!(history.scrapes(), 0);

        history.record_success(Snapshot::parse("up 1\n"));
        assert!(history.last_error().is_none());
        assert_eq!(history.scrapes(), 1);
        assert!(history.last_update().is_some());
        assert_eq!(history.latest().map(|s| s.family_count()), Some(1));
    }

    #[test]
    fn failure_keeps_the_previous_snapshot() {
        let mut history = ScrapeHistory::default();
        history.record_success(Snapshot::parse("up 1\n"));
        history.record_failure(&anyhow!("timed out"));

        assert_eq!(history.latest().map(|s| s.family_count()), Some(1));
        assert_eq!(history.scrapes(), 1);
        assert!(history.last_error().expect("error recorded").contains("timed out"));
    }
}
