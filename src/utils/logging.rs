//! Tracing setup
//!
//! Skipped-trade diagnostics are part of the program's output, so their
//! target keeps a `warn` floor no matter what `RUST_LOG` asks for.

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Target of the per-trade skip diagnostics
pub const SKIP_TARGET: &str = "trade_plots::skipped";

/// `directives` in `RUST_LOG` syntax; empty means `info`
pub fn env_filter(directives: &str) -> EnvFilter {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .parse_lossy(directives);
    match format!("{}=warn", SKIP_TARGET).parse() {
        Ok(floor) => filter.add_directive(floor),
        Err(_) => filter,
    }
}

/// Install the stdout fmt subscriber, filtered by `RUST_LOG`
pub fn init_tracing() {
    let directives = std::env::var(EnvFilter::DEFAULT_ENV).unwrap_or_default();
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(&directives))
        .with_target(true)
        .with_thread_ids(true)
        .init();
}
