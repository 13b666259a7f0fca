//! Diagnostic logging
//!
//! `tracing` events go to stderr through `tracing-subscriber`. The filter
//! comes from `POCKETWISE_LOG` when set (any `EnvFilter` directive string),
//! otherwise from the `-v` count on the command line.

use std::sync::Once;

use tracing_subscriber::{fmt, EnvFilter};

/// Environment variable holding an `EnvFilter` directive string
pub const LOG_ENV: &str = "POCKETWISE_LOG";

static TRACING_INIT: Once = Once::new();

/// Default directive for a given verbosity
pub fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "pocketwise=warn",
        1 => "pocketwise=info",
        2 => "pocketwise=debug",
        _ => "pocketwise=trace",
    }
}

/// Install the global subscriber. Later calls are no-ops.
pub fn init_tracing(verbosity: u8) {
    TRACING_INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV)
            .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

        fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive() {
        assert_eq!(default_directive(0), "pocketwise=warn");
        assert_eq!(default_directive(2), "pocketwise=debug");
        assert_eq!(default_directive(9), "pocketwise=trace");
    }

    #[test]
    fn test_init_is_idempotent() {
        init_tracing(0);
        init_tracing(3);
        tracing::info!("still running");
    }
}
