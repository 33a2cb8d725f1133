use log::LevelFilter;
use log4rs::append::file::FileAppender;
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;

/// Logging configuration for the whole application. Everything goes to one
/// log file so stdout stays free for the overview and the live view.
pub fn app_config(logfile: &str, level: LevelFilter) -> Config {
    let file = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} {l} {t} - {m}{n}",
        )))
        .build(logfile)
        .expect("creating the log file appender");

    Config::builder()
        .appender(Appender::builder().build("logfile", Box::new(file)))
        .build(Root::builder().appender("logfile").build(level))
        .expect("assembling the logging configuration")
}
