//! Tracing subscriber initialisation.

use std::error::Error;

use tracing_subscriber::{EnvFilter, fmt};

/// Install a JSON formatter filtered by `RUST_LOG`.
///
/// Returns the error instead of panicking when a global subscriber is already
/// installed, so embedding hosts and test harnesses can call it freely.
///
/// # Examples
/// ```
/// use tracing::warn;
///
/// if let Err(error) = hydration_backend::telemetry::init_tracing() {
///     warn!(%error, "tracing init failed");
/// }
/// ```
pub fn init_tracing() -> Result<(), Box<dyn Error + Send + Sync + 'static>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
}
