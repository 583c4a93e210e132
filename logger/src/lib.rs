// Copyright 2022 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! A small stdout logger on top of the `log` facade.
//!
//! ```no_run
//! use logger::info;
//!
//! logger::Logger::new()
//!     .label("demo")
//!     .level(logger::Level::Info)
//!     .init()
//!     .expect("Failed to initialize logger");
//! info!("ready");
//! ```

pub use log::{debug, error, info, trace, warn};
pub use log::{Level, LevelFilter, SetLoggerError};

use log::{Metadata, Record};

use std::io::Write;

/// Log at error level, flush, and terminate the process with a non-zero
/// exit code.
#[macro_export]
macro_rules! fatal {
    ($($arg:tt)*) => {{
        $crate::error!($($arg)*);
        $crate::flush();
        std::process::exit(1);
    }};
}

/// Flush the installed logger.
pub fn flush() {
    log::logger().flush();
}

pub struct Logger {
    label: &'static str,
    level: Level,
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger {
    pub fn new() -> Self {
        Self {
            label: "",
            level: Level::Info,
        }
    }

    /// Label printed in place of the target for messages above debug.
    pub fn label(mut self, label: &'static str) -> Self {
        self.label = label;
        self
    }

    pub fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    pub fn init(self) -> Result<(), SetLoggerError> {
        let filter = self.level.to_level_filter();
        log::set_boxed_logger(Box::new(self)).map(|()| log::set_max_level(filter))
    }

    fn format(&self, record: &Record) -> String {
        let now = time::now();
        let timestamp = time::strftime("%Y-%m-%d %H:%M:%S", &now).unwrap_or_default();
        let target = if record.level() >= Level::Debug || self.label.is_empty() {
            record.target()
        } else {
            self.label
        };
        format!(
            "{}.{:03} {:<5} [{}] {}",
            timestamp,
            now.tm_nsec / 1_000_000,
            record.level(),
            target,
            record.args()
        )
    }
}

impl log::Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let line = self.format(record);
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            let _ = writeln!(handle, "{}", line);
        }
    }

    fn flush(&self) {
        let _ = std::io::stdout().flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::Log;

    #[test]
    fn label_replaces_target_above_debug() {
        let logger = Logger::new().label("bench_plot");
        let line = logger.format(
            &Record::builder()
                .args(format_args!("loaded {} rows", 3))
                .level(Level::Info)
                .target("sp_bench_plot::loader")
                .build(),
        );
        assert!(line.ends_with("INFO  [bench_plot] loaded 3 rows"), "{}", line);
    }

    #[test]
    fn debug_keeps_target() {
        let logger = Logger::new().label("bench_plot");
        let line = logger.format(
            &Record::builder()
                .args(format_args!("skipped"))
                .level(Level::Debug)
                .target("sp_bench_plot::loader")
                .build(),
        );
        assert!(line.ends_with("DEBUG [sp_bench_plot::loader] skipped"), "{}", line);
    }

    #[test]
    fn level_filters_messages() {
        let logger = Logger::new().level(Level::Warn);
        let warn = Metadata::builder().level(Level::Warn).build();
        let info = Metadata::builder().level(Level::Info).build();
        assert!(logger.enabled(&warn));
        assert!(!logger.enabled(&info));
    }
}
