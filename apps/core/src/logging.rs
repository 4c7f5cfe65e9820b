use tracing_subscriber::EnvFilter;

pub const LOG_ENV_VAR: &str = "DOCPALETTE_LOG";

/// `DOCPALETTE_LOG` wins over `default_filter` when set and valid.
pub fn env_filter(default_filter: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(default_filter))
}

/// Installs the global subscriber on stderr; stdout carries the transport protocol.
/// Returns `false` when a subscriber was already installed.
pub fn init(default_filter: &str) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(default_filter))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .is_ok()
}
