use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize logging with optional quiet mode.
///
/// When `quiet` is true, only error-level events are emitted.
/// When `quiet` is false, info-level and above events are emitted (default).
/// `RUST_LOG` directives are honored on top of the default directive.
///
/// Safe to call more than once; only the first call installs a subscriber.
pub fn init_logging(quiet: bool) {
    let directive = if quiet {
        "webpilot_core=error"
    } else {
        "webpilot_core=info"
    };

    let mut filter = EnvFilter::from_default_env();
    match directive.parse() {
        Ok(parsed) => filter = filter.add_directive(parsed),
        Err(e) => eprintln!("Invalid log directive '{}': {}", directive, e),
    }

    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr)
                .with_current_span(false)
                .with_span_list(false),
        )
        .with(filter)
        .try_init();
}
