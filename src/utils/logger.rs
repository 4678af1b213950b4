use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Builds the filter directive for this crate. `RUST_LOG` still wins when set.
pub fn filter_directive(verbose: bool, level: Option<&str>) -> String {
    if verbose {
        "flashcards=debug,warn".to_string()
    } else {
        format!("flashcards={}", level.unwrap_or(DEFAULT_LOG_LEVEL))
    }
}

// stdout carries the console protocol, so diagnostics go to stderr.
pub fn init_cli_logger(verbose: bool, level: Option<&str>) {
    let directive = filter_directive(verbose, level);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}
