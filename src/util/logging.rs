use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Initializes the global tracing subscriber.
///
/// Nothing is installed unless `RUST_LOG` is set, so ordinary runs print
/// only script output. Use `RUST_LOG=ripple=debug` to follow scheduling and
/// `RUST_LOG=ripple=trace` to also see every call. Safe to call more than
/// once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{EnvFilter, fmt, prelude::*};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry().with(fmt::layer().with_target(true)
                                                            .with_level(true)
                                                            .with_writer(std::io::stderr))
                                          .with(filter)
                                          .init();
        }
    });
}
