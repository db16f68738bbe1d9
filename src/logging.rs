use tracing_subscriber::EnvFilter;

/// Installs the global subscriber. The level comes from `LOG_LEVEL`
/// (an `EnvFilter` directive), `info` when unset. Records of crates logging
/// through `log`, teloxide among them, are forwarded as well.
pub fn init_tracing(json: bool) -> anyhow::Result<()> {
    tracing_log::LogTracer::init()?;

    let filter = EnvFilter::try_from_env("LOG_LEVEL").unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_line_number(true)
        .with_target(false);

    if json {
        tracing::subscriber::set_global_default(builder.json().finish())?;
    } else {
        tracing::subscriber::set_global_default(builder.finish())?;
    }
    Ok(())
}
