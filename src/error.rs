// Error taxonomy for twin operations

use thiserror::Error;

/// Errors a twin operation can surface. Device model transitions never
/// fail (they clamp); only argument validation and live telemetry do.
#[derive(Debug, Error)]
pub enum TwinError {
    /// Malformed or out-of-range numeric arguments to a simulation run.
    /// Recovered locally by the command dispatcher.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The telemetry provider failed to produce a reading. Fatal to the
    /// single operation that needed it, not to the session.
    #[error("telemetry unavailable: {0}")]
    TelemetryUnavailable(String),
}
