use tracing_subscriber::EnvFilter;

const DEFAULT_DIRECTIVES: &str = "info";

/// Install the global tracing subscriber. Diagnostics go to stderr so the
/// extracted text on stdout stays clean.
pub fn init() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
