//! Tracing setup for hosts embedding `candle-view`.
//!
//! The engine only emits `tracing` events; installing a subscriber is left to
//! the host unless the `telemetry` feature is enabled and
//! [`init_default_tracing`] is called.

/// Installs a compact `fmt` subscriber filtered by `RUST_LOG`
/// (falling back to `candle_view=info`).
///
/// Returns `false` when the `telemetry` feature is disabled or when the host
/// already installed a global subscriber.
#[must_use]
pub fn init_default_tracing() -> bool {
    #[cfg(feature = "telemetry")]
    {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("candle_view=info"));

        return tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .compact()
            .try_init()
            .is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        false
    }
}
