//! Tracing subscriber setup

use tracing_subscriber::{fmt, EnvFilter};
use ts_shared::config::{LogFormat, LoggingConfig};

/// Install the global subscriber
///
/// `RUST_LOG` syntax is accepted in `config.level`; an unparsable filter
/// falls back to `info`. Records from the `log` crate (actix's request
/// logger) are forwarded as well.
pub fn init_tracing(config: &LoggingConfig) {
    let filter = EnvFilter::try_new(&config.level).unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = fmt().with_env_filter(filter).with_target(true);

    match config.format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.init(),
    }
}
