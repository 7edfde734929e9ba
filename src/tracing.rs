//! Logging for the `zephyr` tool
//!
//! Two sinks:
//! - stderr, so converted documents written to stdout stay clean. Level
//!   comes from `-v` flags (warn, info, debug, trace) unless `RUST_LOG` is
//!   set, e.g. `RUST_LOG=zephyr::format::brf=debug` to see page-length
//!   inference, or `RUST_LOG=zephyr::model::rewrap=debug` for lines the
//!   rewrap left over-length.
//! - `<config dir>/logs/zephyr.log.DATE`, rotated daily, always at debug.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

const LOG_FILE_PREFIX: &str = "zephyr.log";

/// Console filter directive for a `-v` count
fn console_directive(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "zephyr=info,warn",
        2 => "zephyr=debug,info",
        _ => "trace",
    }
}

/// Install the console and file subscribers
pub fn init(verbose: u8) {
    let console_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(console_directive(verbose)));

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(verbose > 0)
        .without_time()
        .with_filter(console_filter);

    let file_layer = match crate::config_paths::ensure_logs_dir() {
        Ok(logs_dir) => Some(
            fmt::layer()
                .with_writer(tracing_appender::rolling::daily(logs_dir, LOG_FILE_PREFIX))
                .with_ansi(false)
                .with_target(true)
                .with_line_number(true)
                .with_filter(EnvFilter::new("zephyr=debug,warn")),
        ),
        Err(e) => {
            eprintln!("zephyr: file logging disabled: {}", e);
            None
        }
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();
}
