use tracing_subscriber::{EnvFilter, fmt};

/// Environment variable that switches logging over to tokio-console.
pub const TOKIO_CONSOLE_ENV: &str = "TOKIO_CONSOLE";

/// Initialize the logging system with JSON formatting and environment-based filtering
///
/// - `RUST_LOG` controls filtering (defaults to "info" if not set)
/// - Events are emitted as flattened JSON objects, one per line
pub fn init_normal_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .json()
        .flatten_event(true)
        .init();
}

pub fn init_logging() {
    // tokio-console installs its own subscriber; only one may be global.
    if std::env::var(TOKIO_CONSOLE_ENV).is_ok() {
        console_subscriber::init();
    } else {
        init_normal_logging();
    }
}
