mod model;
pub use self::model::MetricFamily;
pub use self::model::MetricType;
pub use self::model::Sample;
pub use self::model::Snapshot;

pub(crate) mod parser;

mod metric_scraper;
pub use self::metric_scraper::fetch_once;
pub use self::metric_scraper::fetch_text;
pub use self::metric_scraper::MetricScraper;
pub use self::metric_scraper::ScrapeHistory;

pub mod test_data;
