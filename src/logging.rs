//! Logging setup shared by the command-line tools

use anyhow::Result;

/// Initialize structured logging with the configured level.
///
/// `RUST_LOG` takes precedence over `log_level`. Output goes to stderr so
/// console tables on stdout stay clean.
pub fn init_logging(log_level: &str) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

/// Pick the effective log level from the configured one and the verbose flag
pub fn effective_level(configured: &str, verbose: bool) -> String {
    let configured = configured.to_lowercase();
    if verbose && matches!(configured.as_str(), "warn" | "error") {
        "info".to_string()
    } else {
        configured
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbose_raises_quiet_levels() {
        assert_eq!(effective_level("warn", true), "info");
        assert_eq!(effective_level("ERROR", true), "info");
        assert_eq!(effective_level("warn", false), "warn");
    }

    #[test]
    fn test_verbose_keeps_detailed_levels() {
        assert_eq!(effective_level("debug", true), "debug");
        assert_eq!(effective_level("trace", false), "trace");
    }
}
