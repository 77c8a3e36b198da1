//! cc-model: closed-form CO2 pathway and climate response model.
//!
//! Provides:
//! - Year sequences (validated, consecutive time axes)
//! - Simulation parameters with documented defaults and partial overrides
//! - CO2 pathway, temperature response and sea-level rise series
//! - Result rows and tables shared by single runs and ensembles
//!
//! Every function here is pure. Non-positive CO2 reaching the logarithm is not
//! an error: it yields NaN or -inf for that entry and the value propagates.
//!
//! # Example
//!
//! ```
//! use cc_model::{SimulationParams, YearSequence, simulate};
//!
//! let years = YearSequence::range(2020, 2030).unwrap();
//! let table = simulate(&years, &SimulationParams::default());
//! assert_eq!(table.len(), 11);
//! assert_eq!(table.rows()[0].co2, 420.0);
//! ```

pub mod error;
pub mod params;
pub mod pathway;
pub mod response;
pub mod sea_level;
pub mod simulate;
pub mod table;
pub mod years;

// Re-exports for ergonomics
pub use error::{ModelError, ModelResult};
pub use params::{ParameterOverrides, SimulationParams};
pub use pathway::co2_pathway;
pub use response::{climate_response, climate_response_with_reference};
pub use sea_level::sea_level_rise;
pub use simulate::{simulate, simulate_years};
pub use table::{NonFiniteValue, SeriesField, SimulationRow, SimulationTable};
pub use years::{Year, YearSequence};
