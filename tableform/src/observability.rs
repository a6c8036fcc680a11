//! Logging setup
//!
//! Structured logging through `tracing`. Library code only emits events;
//! binaries call [`init`] once at startup to install a subscriber.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingSettings;

/// Initialize the global tracing subscriber
///
/// The filter comes from `RUST_LOG` if set, then from the configured filter,
/// then from a build-dependent default. Output is pretty in debug builds and
/// JSON in release builds unless `settings.json` says otherwise. Events go
/// to stderr so stdout stays free for command output.
///
/// # Errors
///
/// Returns an error if the configured filter is invalid or a global
/// subscriber is already installed.
///
/// # Example
///
/// ```rust,no_run
/// use tableform::{config::LoggingSettings, observability};
///
/// # fn main() -> anyhow::Result<()> {
/// observability::init(&LoggingSettings::default())?;
/// tracing::info!("Started");
/// # Ok(())
/// # }
/// ```
pub fn init(settings: &LoggingSettings) -> anyhow::Result<()> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => match settings.filter {
            Some(ref directive) => EnvFilter::try_new(directive)?,
            None => EnvFilter::new(default_directive()),
        },
    };

    let json = settings.json.unwrap_or(!cfg!(debug_assertions));
    let registry = tracing_subscriber::registry().with(env_filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .try_init()?;
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().pretty().with_writer(std::io::stderr))
            .try_init()?;
    }

    Ok(())
}

const fn default_directive() -> &'static str {
    if cfg!(debug_assertions) {
        "info,tableform=debug"
    } else {
        "warn"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_filter_is_rejected() {
        // Only reached when RUST_LOG is unset
        if std::env::var_os("RUST_LOG").is_some() {
            return;
        }
        let settings = LoggingSettings {
            filter: Some("tableform=notalevel".into()),
            json: None,
        };
        assert!(init(&settings).is_err());
    }
}
