//! Browser console sink for the `log` facade, plus a millisecond clock for
//! perf lines.

use log::{Level, LevelFilter, Log, Metadata, Record};

/// Forwards log records to `console.error` / `console.warn` / `console.log`
struct ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format!("[{}] {}", record.target(), record.args());
        write_line(record.level(), line);
    }

    fn flush(&self) {}
}

#[cfg(target_arch = "wasm32")]
fn write_line(level: Level, line: String) {
    match level {
        Level::Error => web_sys::console::error_1(&line.into()),
        Level::Warn => web_sys::console::warn_1(&line.into()),
        _ => web_sys::console::log_1(&line.into()),
    }
}

/// No browser console off wasm; fall back to stderr
#[cfg(not(target_arch = "wasm32"))]
fn write_line(level: Level, line: String) {
    eprintln!("{:<5} {}", level, line);
}

static LOGGER: ConsoleLogger = ConsoleLogger;

/// Map a level name from JavaScript to a filter, defaulting to info
pub fn parse_level(level: &str) -> LevelFilter {
    level.trim().parse().unwrap_or(LevelFilter::Info)
}

/// Install the console logger. Later calls only adjust the level.
pub fn init(level: LevelFilter) {
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(level);
}

/// Milliseconds since the epoch
#[cfg(target_arch = "wasm32")]
pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

/// Milliseconds since the epoch
#[cfg(not(target_arch = "wasm32"))]
pub fn now_ms() -> f64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs_f64() * 1000.0)
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("debug"), LevelFilter::Debug);
        assert_eq!(parse_level("WARN"), LevelFilter::Warn);
        assert_eq!(parse_level("off"), LevelFilter::Off);
        assert_eq!(parse_level("chatty"), LevelFilter::Info);
    }

    #[test]
    fn test_now_ms_positive() {
        assert!(now_ms() > 0.0);
    }

    #[test]
    fn test_init_logs_without_browser() {
        init(LevelFilter::Debug);
        log::info!("console logger installed");
        log::warn!("warn record");
        assert_eq!(log::max_level(), LevelFilter::Debug);
    }
}
