//! Error taxonomy shared by the integrator and its callers.

use thiserror::Error;

/// Result type alias for the numerical core.
pub type SirResult<T> = Result<T, SirError>;

/// Everything the numerical core can fail with.
///
/// None of these are retried or papered over inside the core; they go
/// straight back to whoever asked for the run.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SirError {
    /// A caller-supplied parameter is outside the model's domain.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter {
        /// Field name, as it appears in `SimulationParameters`.
        name: &'static str,
        /// Human-readable description of the violated precondition.
        reason: String,
    },

    /// The ODE solver could not produce a trajectory at the requested tolerance.
    #[error("integration failed: {0}")]
    IntegrationFailure(String),

    /// Statistics were requested over a trajectory with no samples.
    #[error("cannot summarize an empty trajectory")]
    EmptyTrajectory,
}

impl SirError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        SirError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}
