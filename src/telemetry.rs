use std::sync::Once;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Diagnostics go to stderr so task output on stdout stays clean. `RUST_LOG`
/// wins over `--verbose`.
pub fn init_tracing(verbose: bool) {
    static INIT: Once = Once::new();

    INIT.call_once(|| {
        let default_filter = if verbose { "debug" } else { "warn" };

        let filter_layer = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_filter));

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_level(true)
            .compact()
            .with_writer(std::io::stderr);

        let _ = tracing_subscriber::registry()
            .with(filter_layer)
            .with(fmt_layer)
            .try_init();
    });
}
