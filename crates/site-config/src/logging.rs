use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Install a tracing subscriber with default configuration.
///
/// Uses the `RUST_LOG` environment variable for filtering, defaulting to
/// "info". The library itself only emits events; embedding applications
/// pick their own subscriber and can skip this entirely.
pub fn init() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let fmt_layer = fmt::layer().with_target(true).compact();

    let filter_layer = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
