use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Installs the stderr log subscriber. `RUST_LOG` overrides `default_level`.
pub fn init(default_level: &str, verbose: bool) {
    if tracing::dispatcher::has_been_set() {
        return;
    }
    let directives = match std::env::var("RUST_LOG") {
        Ok(value) if !value.trim().is_empty() => value,
        _ if verbose => "debug".to_string(),
        _ => default_level.to_string(),
    };
    let filter = EnvFilter::try_new(&directives).unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true);
    let _ = Registry::default().with(filter).with(fmt_layer).try_init();
}
