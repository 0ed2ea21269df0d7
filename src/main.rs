use std::env;
use std::process;

use anyhow::{Context, Result, bail};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use cityu_keep_online::{LoginConfig, PortalClient};

const LOG_LEVEL_ENV: &str = "LOG_LEVEL";

#[tokio::main]
async fn main() {
    if let Err(e) = init_tracing() {
        eprintln!("Fatal: {:#}", e);
        process::exit(1);
    }

    if let Err(e) = run().await {
        tracing::error!("{:#}", e);
        process::exit(1);
    }
}

/// Timestamped text logs filtered by LOG_LEVEL (default: info)
fn init_tracing() -> Result<()> {
    let level = match env::var(LOG_LEVEL_ENV) {
        Ok(level) if !level.trim().is_empty() => parse_log_level(&level)
            .with_context(|| format!("Invalid {}", LOG_LEVEL_ENV))?,
        _ => LevelFilter::INFO,
    };

    tracing_subscriber::registry()
        .with(EnvFilter::default().add_directive(level.into()))
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(())
}

/// Map a logrus-style level name onto a tracing level.
///
/// `fatal` and `panic` have no tracing counterpart and collapse to `error`.
fn parse_log_level(name: &str) -> Result<LevelFilter> {
    let level = match name.trim().to_ascii_lowercase().as_str() {
        "panic" | "fatal" | "error" => LevelFilter::ERROR,
        "warn" | "warning" => LevelFilter::WARN,
        "info" => LevelFilter::INFO,
        "debug" => LevelFilter::DEBUG,
        "trace" => LevelFilter::TRACE,
        _ => bail!("not a valid level: {:?}", name),
    };
    Ok(level)
}

async fn run() -> Result<()> {
    let config = LoginConfig::from_env().context("Failed to load configuration")?;
    let client = PortalClient::new(config).context("Failed to build HTTP client")?;

    client.login().await.context("Login failed")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_log_level_accepts_logrus_names() {
        assert_eq!(parse_log_level("warning").unwrap(), LevelFilter::WARN);
        assert_eq!(parse_log_level("warn").unwrap(), LevelFilter::WARN);
        assert_eq!(parse_log_level("fatal").unwrap(), LevelFilter::ERROR);
        assert_eq!(parse_log_level("panic").unwrap(), LevelFilter::ERROR);
        assert_eq!(parse_log_level("DEBUG").unwrap(), LevelFilter::DEBUG);
        assert_eq!(parse_log_level(" trace ").unwrap(), LevelFilter::TRACE);
    }

    #[test]
    fn test_parse_log_level_rejects_unknown_names() {
        assert!(parse_log_level("verbose").is_err());
        assert!(parse_log_level("cityu_keep_online=debug").is_err());
    }
}
