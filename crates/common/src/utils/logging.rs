use std::io;
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize tracing subscriber with sensible defaults and stdout writer.
/// - Respects `RUST_LOG` if set
/// - Falls back to `info,tower_http=info,axum=info`
/// - Writes to stdout to improve visibility in environments that hide stderr
pub fn init_logging_default() {
    init_compact("info,tower_http=info,axum=info");
}

/// Initialize tracing subscriber with JSON structured output.
/// - Respects `RUST_LOG` if set, defaults to `info`
/// - Emits structured JSON logs for machine parsing in production
pub fn init_logging_json() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,sqlx=warn"));
    let _ = fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .json()
        .with_writer(io::stdout)
        .try_init();
}

/// Pick the subscriber for the runtime mode.
///
/// Development gets compact, debug-level output for the service crates and
/// per-request HTTP traces; production gets JSON at `info`.
pub fn init_logging_for_mode(development: bool) {
    if development {
        init_compact(default_filter(true));
    } else {
        init_logging_json();
    }
}

/// Default filter directive used when `RUST_LOG` is unset.
pub fn default_filter(development: bool) -> &'static str {
    if development {
        "debug,tower_http=debug,sqlx=info,hyper=info"
    } else {
        "info,sqlx=warn"
    }
}

fn init_compact(fallback: &str) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(fallback));
    let _ = fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .with_writer(io::stdout)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn development_filter_is_more_verbose() {
        assert!(default_filter(true).starts_with("debug"));
        assert!(default_filter(false).starts_with("info"));
    }

    #[test]
    fn init_is_idempotent() {
        init_logging_default();
        init_logging_for_mode(true);
    }
}
