use tracing_subscriber::{fmt, EnvFilter};

use crate::consts::LOG_LEVEL;

/// Default filter for a `-v` count. `RUST_LOG` still takes precedence.
pub fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => LOG_LEVEL,
        1 => "debug",
        _ => "trace",
    }
}

/// Logs go to stderr; stdout carries only the report.
pub fn init_logging(verbosity: u8) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .with_writer(std::io::stderr)
        .init();
}
