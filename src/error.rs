//! Error types for dissonance computations.

use thiserror::Error;

/// Errors raised by the dissonance engine.
///
/// Every error is raised synchronously by the call that detects it and no
/// partial result accompanies it.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DissonanceError {
    /// Amplitude-combination model name is neither `min` nor `product`.
    #[error("unknown amplitude model '{0}' (expected \"min\" or \"product\")")]
    InvalidModel(String),

    /// An amplitude sequence does not line up with its frequency sequence.
    #[error("amplitude vector has {actual} entries, expected {expected}")]
    AmplitudeLengthMismatch { expected: usize, actual: usize },

    /// Interpolation asked for at least as many points as there are domain units.
    #[error(
        "cannot interpolate {points} points over a domain of {domain_units} units (points must be fewer than units)"
    )]
    InsufficientDomainRange { points: usize, domain_units: usize },

    /// A numeric precondition of the engine does not hold.
    #[error("invalid parameter '{name}': {reason}")]
    InvalidParameter {
        name: &'static str,
        reason: String,
    },

    /// A pitch name could not be parsed.
    #[error("invalid pitch '{0}'")]
    InvalidPitch(String),
}

impl DissonanceError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        DissonanceError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, DissonanceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_messages() {
        let err = DissonanceError::InvalidModel("max".into());
        assert_eq!(
            err.to_string(),
            "unknown amplitude model 'max' (expected \"min\" or \"product\")"
        );

        let err = DissonanceError::AmplitudeLengthMismatch {
            expected: 6,
            actual: 4,
        };
        assert_eq!(err.to_string(), "amplitude vector has 4 entries, expected 6");

        let err = DissonanceError::invalid("ratio_step", "must be positive");
        assert_eq!(
            err.to_string(),
            "invalid parameter 'ratio_step': must be positive"
        );
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<DissonanceError>();
    }
}
