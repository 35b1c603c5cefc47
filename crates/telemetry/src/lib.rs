//! Tracing pipeline initialization.

use anyhow::anyhow;
use tracing_subscriber::EnvFilter;

use bookstall_kernel::settings::{LogFormat, TelemetrySettings};

/// Initialize the global tracing subscriber.
///
/// Honors `RUST_LOG` when set, defaulting to `info`. Output format is
/// controlled by `telemetry.log_format`.
pub fn init(settings: &TelemetrySettings) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let result = match settings.log_format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.try_init(),
    };

    result.map_err(|e| anyhow!("failed to initialize tracing subscriber: {e}"))
}
