use thiserror::Error;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::ParseError;

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("invalid log filter: {0}")]
    Filter(#[from] ParseError),
    #[error("failed to install log subscriber: {0}")]
    Install(String),
}

/// Installs the global subscriber. `RUST_LOG` wins over `default_filter` when set.
/// Output goes to stderr so calculator JSON on stdout stays clean.
pub fn init(default_filter: &str) -> Result<(), LoggingError> {
    let from_env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = select_filter(from_env.as_deref(), default_filter)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| LoggingError::Install(e.to_string()))
}

/// Usable env directives win; blank or malformed ones fall back to the default.
fn select_filter(from_env: Option<&str>, default_filter: &str) -> Result<EnvFilter, LoggingError> {
    if let Some(directives) = from_env.filter(|d| !d.trim().is_empty()) {
        if let Ok(filter) = EnvFilter::try_new(directives) {
            return Ok(filter);
        }
    }
    Ok(EnvFilter::try_new(default_filter)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::filter::LevelFilter;

    fn max_level(filter: &EnvFilter) -> Option<LevelFilter> {
        filter.max_level_hint()
    }

    #[test]
    fn env_directives_override_default() {
        let filter = select_filter(Some("debug"), "warn").expect("valid filter");
        assert_eq!(max_level(&filter), Some(LevelFilter::DEBUG));
    }

    #[test]
    fn missing_or_blank_env_uses_default() {
        let filter = select_filter(None, "warn").expect("valid filter");
        assert_eq!(max_level(&filter), Some(LevelFilter::WARN));

        let filter = select_filter(Some("  "), "error").expect("valid filter");
        assert_eq!(max_level(&filter), Some(LevelFilter::ERROR));
    }

    #[test]
    fn malformed_env_falls_back_to_default() {
        let filter = select_filter(Some("fincalc=loudest"), "info").expect("valid filter");
        assert_eq!(max_level(&filter), Some(LevelFilter::INFO));
    }

    #[test]
    fn malformed_default_is_an_error() {
        let err = select_filter(None, "fincalc=loudest");
        assert!(matches!(err, Err(LoggingError::Filter(_))));
    }
}
