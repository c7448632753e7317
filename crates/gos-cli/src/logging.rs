use anyhow::Result;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{fmt, EnvFilter, Registry};

/// Environment variable that overrides the configured log filter.
pub const LOG_ENV: &str = "GOS_LOG";

/// Installs the global subscriber. Logs go to stderr so command output stays clean.
///
/// `default_level` is any `EnvFilter` directive, e.g. `"warn"` or
/// `"gos_core=debug,info"`; `GOS_LOG` takes precedence when set.
pub fn init_tracing(default_level: &str) -> Result<()> {
    let env_filter = EnvFilter::try_from_env(LOG_ENV).or_else(|_| EnvFilter::try_new(default_level))?;

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true);

    let subscriber = Registry::default().with(env_filter).with(fmt_layer);
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
