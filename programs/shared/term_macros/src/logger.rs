use log::{Level, LevelFilter, Log, Metadata, Record};
use owo_colors::OwoColorize;

struct TermLogger {
    level: LevelFilter,
}

impl Log for TermLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let tag = match record.level() {
            Level::Error => "error".red().bold().to_string(),
            Level::Warn => "warn".yellow().bold().to_string(),
            Level::Info => "info".green().to_string(),
            Level::Debug => "debug".blue().to_string(),
            Level::Trace => "trace".dimmed().to_string(),
        };
        eprintln!("{} {} {}", tag, record.target().dimmed(), record.args());
    }

    fn flush(&self) {}
}

/// Installs the stderr logger. Calling it twice keeps the first logger.
pub fn init(level: LevelFilter) {
    if log::set_boxed_logger(Box::new(TermLogger { level })).is_ok() {
        log::set_max_level(level);
    }
}
