use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize logging to stderr so stdout carries only the report.
///
/// `RUST_LOG` takes precedence over `level` when set.
pub fn init_logging(level: &str) -> color_eyre::Result<()> {
    let default_filter = format!("firecalc={level},firecalc_core={level}");
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&default_filter))?;

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_thread_ids(false),
        )
        .try_init()?;

    tracing::debug!(level, "logging initialized");
    Ok(())
}
