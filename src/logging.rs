use tracing_subscriber::EnvFilter;

/// Installs the global subscriber. `info` unless `debug` is set, in which
/// case `RUST_LOG` may override the level.
pub fn init(debug: bool) {
    let filter = if debug {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::new("info")
    };

    // A second init (tests, embedders) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
