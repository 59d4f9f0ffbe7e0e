use env_logger::Builder;
use log::{LevelFilter, SetLoggerError};
use crate::config_loader::MasterConfig;

pub fn initialize_logging(config: Option<&MasterConfig>, cli_matches: &clap::ArgMatches) -> Result<(), SetLoggerError> {
    let mut builder = Builder::new();

    // Determine log level from CLI, then config, then default
    let log_level_str = if cli_matches.get_flag("debug") {
        "debug".to_string()
    } else {
        config
            .and_then(|c| c.app_settings.log_level.clone())
            .unwrap_or_else(|| "info".to_string())
    };

    let level = parse_level_filter(&log_level_str).unwrap_or_else(|| {
        eprintln!("Unrecognized log level '{}', defaulting to info.", log_level_str);
        LevelFilter::Info
    });
    builder.filter_level(level);
    // RUST_LOG still wins for per-module tuning, e.g. RUST_LOG=reqwest=warn
    builder.parse_default_env();

    builder.try_init()
}

fn parse_level_filter(level: &str) -> Option<LevelFilter> {
    match level.to_lowercase().as_str() {
        "off" => Some(LevelFilter::Off),
        "error" => Some(LevelFilter::Error),
        "warn" => Some(LevelFilter::Warn),
        "info" => Some(LevelFilter::Info),
        "debug" => Some(LevelFilter::Debug),
        "trace" => Some(LevelFilter::Trace),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_levels_case_insensitively() {
        assert_eq!(parse_level_filter("DEBUG"), Some(LevelFilter::Debug));
        assert_eq!(parse_level_filter("warn"), Some(LevelFilter::Warn));
        assert_eq!(parse_level_filter("verbose"), None);
    }
}
