//! Process-wide logger setup for the condense binary.

use std::fs::File;
use std::path::Path;

use log::LevelFilter;
use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};

use crate::config::{LogDestination, LoggingConfig};

/// Initialize the global logger from the logging section of the config.
///
/// Falls back to the terminal when the log file cannot be created, so a
/// misconfigured path never leaves the service silent.
pub fn initialize(settings: &LoggingConfig) {
    let level =
        condense_logging::parse_level(&settings.level).unwrap_or_else(condense_logging::default_level);
    let config = build_config();

    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::new();
    if matches!(settings.destination, LogDestination::File | LogDestination::Both) {
        if let Some(file_logger) = create_file_logger(&settings.file, level, config.clone()) {
            loggers.push(file_logger);
        }
    }
    if matches!(settings.destination, LogDestination::Terminal | LogDestination::Both)
        || loggers.is_empty()
    {
        loggers.push(TermLogger::new(
            level,
            config,
            TerminalMode::Mixed,
            ColorChoice::Auto,
        ));
    }

    let _ = CombinedLogger::init(loggers);
}

fn build_config() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        // Request-level noise from the HTTP stack is not useful here.
        .add_filter_ignore_str("hyper")
        .add_filter_ignore_str("reqwest")
        .build()
}

fn create_file_logger(
    path: &Path,
    level: LevelFilter,
    config: Config,
) -> Option<Box<WriteLogger<File>>> {
    match File::create(path) {
        Ok(file) => Some(WriteLogger::new(level, config, file)),
        Err(err) => {
            eprintln!("Warning: Could not create log file at {:?}: {}", path, err);
            None
        }
    }
}
