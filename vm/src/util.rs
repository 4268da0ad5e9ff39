use std::any::Any;

use tracing_forest::ForestLayer;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{layer::SubscriberExt, EnvFilter};

/// Keeps the profiling backend alive. Trace files are flushed when it is
/// dropped, so hold it until the program is done.
#[must_use = "dropping the guard stops and flushes profiling"]
pub struct LoggerGuard {
    profile: Option<Box<dyn Any>>,
}

impl LoggerGuard {
    pub fn is_profiling(&self) -> bool {
        self.profile.is_some()
    }
}

/// Initializes the global tracing subscriber.
///
/// The default `Level` is `INFO`. It can be overridden with `RUST_LOG`.
/// Calling it more than once is harmless; later calls are ignored.
pub fn init_logger() -> LoggerGuard {
    if cfg!(feature = "profile") || cfg!(feature = "perfetto") {
        use tracing_profile::init_tracing;
        let profile = init_tracing()
            .ok()
            .map(|guard| Box::new(guard) as Box<dyn Any>);
        LoggerGuard { profile }
    } else {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(ForestLayer::default())
            .try_init();

        LoggerGuard { profile: None }
    }
}
