//! Opt-in tracing setup for hosts embedding `chart-axis`.
//!
//! Axis layout emits `debug` events for range changes and placement, `trace`
//! events for label-extent recomputation and `warn` events for rejected input.
//! Hosts with their own subscriber need nothing from this module.

/// Default directive used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "chart_axis=info";

/// Installs a compact `fmt` subscriber filtered by `RUST_LOG`, falling back to
/// [`DEFAULT_FILTER`].
///
/// Returns `false` when the `telemetry` feature is disabled or a global
/// subscriber is already installed.
#[must_use]
pub fn init_default_tracing() -> bool {
    init_tracing_with_filter(DEFAULT_FILTER)
}

/// Like [`init_default_tracing`] with an explicit fallback directive such as
/// `"chart_axis=debug"`.
#[must_use]
pub fn init_tracing_with_filter(fallback: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(fallback));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .compact()
            .try_init()
            .is_ok()
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = fallback;
        false
    }
}
