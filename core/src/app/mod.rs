// Application wiring: adapter bundle, service context, startup
// sequencing, and the pure UI-state reducers.

pub mod context;
pub mod init;
pub mod state;

use std::sync::Once;

static INIT_LOGGING: Once = Once::new();

/// Install the tracing subscriber. Safe to call more than once; only
/// the first call wins.
pub fn init_logging() {
    INIT_LOGGING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
            )
            .try_init();
    });
}
