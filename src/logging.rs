//! Log output for the command line tool.
//!
//! The library only emits `tracing` events. Installing a subscriber is left
//! to the binary, which keeps stdout for JSON output and logs to stderr.

use std::io;

/// Initialize logging to stderr, keeping stdout free for command output
pub fn setup_logging(verbose_level: u8) {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        // Use RUST_LOG if set
        tracing_subscriber::EnvFilter::from_default_env()
    } else {
        // Map verbosity count to filters
        let filter_str = match verbose_level {
            0 => "warn,fenced_tools=info",
            1 => "info,fenced_tools=debug",
            _ => "debug,fenced_tools=trace",
        };
        tracing_subscriber::EnvFilter::new(filter_str)
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true)
        .with_level(true)
        .with_writer(io::stderr)
        .init();
}
