//! Tracing initialization.

use crate::config::{LogFormat, LoggingConfig};
use std::sync::Once;
use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Whether we are running under a test harness.
fn is_test_run() -> bool {
    std::env::var("NEXTEST").is_ok() || std::env::var("CARGO_TARGET_TMPDIR").is_ok()
}

/// Build the filter: `RUST_LOG` when set, otherwise the configured level.
fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|e| {
            eprintln!("Invalid log level '{}': {}, using info", level, e);
            EnvFilter::new("info")
        })
}

/// Initialize tracing. Safe to call multiple times; only the first call wins.
///
/// Logs go to stderr so stdout stays free for the MCP protocol. Under a test
/// harness the test writer is used instead, so output is captured per test.
pub fn init(config: &LoggingConfig) {
    install(config, is_test_run());
}

/// Initialize tracing for tests: debug level, captured by the test writer.
pub fn init_for_tests() {
    let config = LoggingConfig {
        level: "debug".to_string(),
        format: LogFormat::Compact,
    };
    install(&config, true);
}

fn install(config: &LoggingConfig, test_writer: bool) {
    INIT.call_once(|| {
        let level = if test_writer { "debug" } else { config.level.as_str() };
        let builder = tracing_subscriber::fmt()
            .with_env_filter(build_filter(level))
            .with_ansi(false)
            .with_target(true);

        let result = match (test_writer, config.format) {
            (true, _) => builder.compact().with_test_writer().try_init(),
            (false, LogFormat::Compact) => {
                builder.compact().with_writer(std::io::stderr).try_init()
            }
            (false, LogFormat::Json) => builder.json().with_writer(std::io::stderr).try_init(),
        };

        if let Err(e) = result {
            eprintln!("Failed to initialize tracing: {}", e);
        }
    });
}
