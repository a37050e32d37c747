//! Logging & metrics recorder setup.

use crate::settings::AppEnvironment;
use anyhow::Result;
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use tracing_appender::non_blocking::NonBlocking;
use tracing_subscriber::{fmt, prelude::*, EnvFilter, Layer, Registry};

/// Filter used when `RUST_LOG` is not set.
pub const DEFAULT_LOG_FILTER: &str = "jobtracker_server=info,tower_http=info";

const EXPONENTIAL_SECONDS: &[f64] = &[
    0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
];

/// Setup the [tracing] subscriber: human readable output locally,
/// JSON lines everywhere else.
pub fn setup_tracing(writer: NonBlocking, environment: AppEnvironment) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let format_layer: Box<dyn Layer<Registry> + Send + Sync> = match environment {
        AppEnvironment::Local => fmt::layer().with_writer(writer).with_target(true).boxed(),
        _ => fmt::layer()
            .json()
            .with_writer(writer)
            .with_target(true)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(format_layer.with_filter(filter))
        .try_init()?;

    Ok(())
}

/// Sets up Prometheus buckets for matched metrics and installs recorder.
pub fn setup_metrics_recorder() -> Result<PrometheusHandle> {
    let builder = PrometheusBuilder::new().set_buckets_for_metric(
        Matcher::Full("http_requests_duration_seconds".to_string()),
        EXPONENTIAL_SECONDS,
    )?;

    Ok(builder.install_recorder()?)
}
