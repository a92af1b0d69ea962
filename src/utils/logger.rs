use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// `RUST_LOG` wins when set; otherwise this crate logs at `level` and dependencies at `warn`.
fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,catalog_services={}", level)))
}

pub fn init_cli_logger(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };

    tracing_subscriber::registry()
        .with(env_filter(level))
        .with(
            fmt::layer()
                .with_target(verbose)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

/// One JSON object per line for CloudWatch; the current span (bucket, key) rides along.
pub fn init_lambda_logger() {
    tracing_subscriber::registry()
        .with(env_filter("info"))
        .with(
            fmt::layer()
                .json()
                .with_current_span(true)
                .with_span_list(false)
                .with_target(false)
                .without_time(),
        )
        .init();
}
