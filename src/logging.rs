use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;

/// Installs the global tracing subscriber
///
/// `RUST_LOG` wins when set; otherwise the configured `log_level` is used.
/// Calling this more than once is a no-op, so tests and embedding
/// applications can both call it.
pub fn init(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let initialized = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .try_init()
        .is_ok();

    if initialized {
        tracing::debug!(level = %config.log_level, "Tracing initialized");
    }
}
