//! Model input errors.

use cc_core::CcError;
use thiserror::Error;

/// Result type for model operations.
pub type ModelResult<T> = Result<T, ModelError>;

/// Errors raised while shaping model inputs.
///
/// Numeric domain problems (log of non-positive CO2) are deliberately absent:
/// they travel through the tables as non-finite values.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    /// A year sequence must contain at least one year.
    #[error("Year sequence is empty")]
    EmptyYears,

    /// Range bounds in the wrong order.
    #[error("Invalid year range: start {start} is after end {end}")]
    InvalidRange { start: i32, end: i32 },

    /// Explicit year lists must step by exactly one.
    #[error("Years are not consecutive at index {index}: {previous} followed by {found}")]
    NonConsecutiveYears {
        index: usize,
        previous: i32,
        found: i32,
    },

    /// Shared numeric failure surfaced by table checks.
    #[error(transparent)]
    Core(#[from] CcError),
}
