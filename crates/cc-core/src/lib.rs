//! cc-core: stable foundation for climate-calculus.
//!
//! Contains:
//! - units (uom SI views for ppm, °C anomaly, cm and m)
//! - numeric (Real + tolerances + float helpers)
//! - ids (compact run identifiers for ensemble members)
//! - error (shared error types)
//! - timing (opt-in stage timing)

pub mod error;
pub mod ids;
pub mod numeric;
pub mod timing;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{CcError, CcResult};
pub use ids::*;
pub use numeric::*;
pub use units::*;
