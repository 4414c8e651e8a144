use thiserror::Error;

pub type HlResult<T> = Result<T, HlError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum HlError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("{what} must be positive, got {value}")]
    NotPositive { what: &'static str, value: f64 },

    #[error("{what} must not be negative, got {value}")]
    Negative { what: &'static str, value: f64 },

    #[error("{what} = {value} is not an integer multiple of {quantum}")]
    NotQuantized {
        what: &'static str,
        value: f64,
        quantum: f64,
    },
}
