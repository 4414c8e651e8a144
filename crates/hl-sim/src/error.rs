//! Error types for simulation setup.

use hl_core::HlError;
use thiserror::Error;

/// Errors raised while building or configuring a loop simulation.
///
/// Every variant is a configuration problem detected before the first tick;
/// stepping a constructed simulation cannot fail.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    #[error("Invalid configuration: {what}")]
    InvalidConfig { what: &'static str },

    #[error("Explicit conduction step is unstable: ratio {ratio:.4} exceeds {limit}")]
    Unstable { ratio: f64, limit: f64 },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error(transparent)]
    Core(#[from] HlError),
}

pub type SimResult<T> = Result<T, SimError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = SimError::Unstable {
            ratio: 0.75,
            limit: 0.5,
        };
        assert!(err.to_string().contains("0.7500"));
    }

    #[test]
    fn core_errors_pass_through() {
        let core = HlError::NotQuantized {
            what: "tank volume",
            value: 0.21,
            quantum: 0.02,
        };
        let err: SimError = core.clone().into();
        assert_eq!(err.to_string(), core.to_string());
    }
}
