use std::str::FromStr;

use tracing::Level;
use tracing_subscriber::{
    EnvFilter, Layer, filter::LevelFilter, layer::SubscriberExt, util::SubscriberInitExt,
};

/// Installs the global subscriber: a compact fmt layer on stderr, filtered by
/// `RUST_LOG` when set and `mcsearch=<level>` otherwise.
pub fn init_subscriber(debug: bool) {
    let log_level = if debug {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let fmt_layer = tracing_subscriber::fmt::layer()
        .compact()
        .with_level(true)
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_filter(LevelFilter::from_level(log_level));

    tracing_subscriber::registry()
        .with(default_filter(log_level))
        .with(fmt_layer)
        .init();
}

fn default_filter(log_level: Level) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::from_str(&format!("mcsearch={log_level},mcsearch_protocol={log_level}"))
            .unwrap_or_else(|_| EnvFilter::new(log_level.to_string()))
    })
}
