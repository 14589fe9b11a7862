use tracing_subscriber::EnvFilter;

/// Installs the global tracing subscriber.
///
/// The filter directive comes from the config file; `RUST_LOG` takes
/// precedence when set. Calling this twice is a no-op rather than a panic so
/// tests can initialize freely.
pub fn init(filter: &str) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));
    let _ = tracing_subscriber::fmt().with_env_filter(env_filter).try_init();
}
