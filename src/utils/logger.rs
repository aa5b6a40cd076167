use crate::domain::ports::LogFormat;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// `RUST_LOG` wins over `level`, which wins over the verbose switch.
fn build_filter(verbose: bool, level: Option<&str>) -> EnvFilter {
    let fallback = match (level, verbose) {
        (Some(level), _) => format!("card_validator={level},tower_http={level},warn"),
        (None, true) => "card_validator=debug,tower_http=debug,info".to_string(),
        (None, false) => "card_validator=info,tower_http=info,warn".to_string(),
    };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback))
}

pub fn init_logger(verbose: bool, level: Option<&str>, format: LogFormat) {
    let registry = tracing_subscriber::registry().with(build_filter(verbose, level));
    let layer = tracing_subscriber::fmt::layer()
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);

    match format {
        LogFormat::Compact => registry.with(layer.with_target(false).compact()).init(),
        // JSON for log shippers
        LogFormat::Json => registry.with(layer.with_target(true).json()).init(),
    }
}
