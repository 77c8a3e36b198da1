use thiserror::Error;

pub type CcResult<T> = Result<T, CcError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CcError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Invariant violated: {what}")]
    Invariant { what: &'static str },
}
