//! Tracing setup for hosts embedding `datechart`.
//!
//! The library only emits `tracing` events (render passes, pool growth,
//! transform broadcasts). Installing a subscriber stays the host's call:
//! either through [`init_default_tracing`] or with its own filters.

/// Default filter used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "datechart=info";

/// Installs a compact `tracing` subscriber when the `telemetry` feature is enabled.
///
/// Returns `false` when the feature is disabled or when the host already set a
/// global subscriber.
#[must_use]
pub fn init_default_tracing() -> bool {
    init_tracing_with_filter(DEFAULT_FILTER)
}

/// Same as [`init_default_tracing`] with an explicit fallback directive, e.g.
/// `"datechart=trace"` to see every redraw.
#[must_use]
pub fn init_tracing_with_filter(fallback_directive: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(fallback_directive));
        return tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .compact()
            .try_init()
            .is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = fallback_directive;
        false
    }
}
