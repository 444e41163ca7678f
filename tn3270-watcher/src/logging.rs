use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// Inicializa el logging. `RUST_LOG` tiene prioridad sobre el nivel
/// configurado. Si ya hay un subscriber global no hace nada.
pub fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .try_init();
}
