use std::fmt;

use thiserror::Error;

/// Loop of the adjustment solver that failed to converge.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SolverStage {
    /// Outward search for the second endpoint of the bracket.
    Bracketing,
    /// Illinois refinement of the bracket.
    Refinement,
}

impl fmt::Display for SolverStage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            SolverStage::Bracketing => "bracketing",
            SolverStage::Refinement => "refinement",
        })
    }
}

/// Failure to compute a rating update.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum UpdateError {
    #[error("invalid argument: {reason}")]
    InvalidArgument { reason: String },
    #[error("{stage} did not converge within {iterations} iterations")]
    ConvergenceFailure {
        stage: SolverStage,
        iterations: u32,
    },
    #[error("numeric instability: {quantity} is not finite")]
    NumericInstability { quantity: &'static str },
}

impl UpdateError {
    pub(crate) fn invalid(reason: impl Into<String>) -> UpdateError {
        UpdateError::InvalidArgument {
            reason: reason.into(),
        }
    }
}

/// Returns `value` if it is finite, or reports which quantity blew up.
#[inline]
pub(crate) fn finite(quantity: &'static str, value: f64) -> Result<f64, UpdateError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(UpdateError::NumericInstability { quantity })
    }
}
