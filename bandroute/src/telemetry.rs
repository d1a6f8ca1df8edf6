use tracing_subscriber::EnvFilter;

/// Install the stdout subscriber. `RUST_LOG` takes precedence over `fallback`.
pub fn init_stdout_tracing(fallback: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
