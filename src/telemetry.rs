//! Opt-in tracing setup for binaries that embed `chart-svg`.
//!
//! The library only emits `tracing` events. Hosts with their own subscriber
//! can ignore this module; everyone else gets a compact stderr formatter.

/// Filter used when `RUST_LOG` is unset: render warnings (skipped series)
/// from this crate only.
pub const DEFAULT_FILTER: &str = "chart_svg=warn";

/// Installs a compact subscriber filtered by `RUST_LOG` or [`DEFAULT_FILTER`].
///
/// Returns `false` without the `telemetry` feature or when a global
/// subscriber is already installed.
#[must_use]
pub fn init_default_tracing() -> bool {
    init_tracing_with_filter(DEFAULT_FILTER)
}

/// Same as [`init_default_tracing`] with a caller-chosen fallback directive,
/// e.g. `"chart_svg=debug"` to trace every render stage.
#[must_use]
pub fn init_tracing_with_filter(fallback: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(fallback));
        return tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .compact()
            .try_init()
            .is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = fallback;
        false
    }
}
