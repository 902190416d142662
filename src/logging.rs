use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs the JSON subscriber. Writes to stderr: stdout belongs to stdio transports.
pub fn init() {
    let fmt_layer = fmt::layer().json().with_writer(std::io::stderr);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::registry().with(filter).with(fmt_layer).try_init();
}
