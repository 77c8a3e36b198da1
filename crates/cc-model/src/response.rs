//! Temperature response to CO2 forcing.

use cc_core::units::constants::{
    CO2_FORCING_COEFF_W_M2, FORCING_2XCO2_W_M2, PREINDUSTRIAL_CO2_PPM,
};

/// Temperature anomaly (°C) against the 280 ppm pre-industrial baseline.
///
/// The baseline is fixed and does not follow the pathway's own `c0`.
pub fn climate_response(co2: &[f64], lambda_ecs: f64) -> Vec<f64> {
    climate_response_with_reference(co2, lambda_ecs, PREINDUSTRIAL_CO2_PPM)
}

/// Temperature anomaly (°C) against an explicit reference concentration.
///
/// `forcing = 5.35 * ln(co2 / reference_co2)`, `temp = lambda_ecs * forcing / 3.7`.
///
/// Each entry is independent. A zero concentration gives `-inf`, a negative one
/// gives NaN; neither is clamped and the other entries are unaffected.
pub fn climate_response_with_reference(
    co2: &[f64],
    lambda_ecs: f64,
    reference_co2: f64,
) -> Vec<f64> {
    co2.iter()
        .map(|&c| {
            let forcing = CO2_FORCING_COEFF_W_M2 * (c / reference_co2).ln();
            lambda_ecs * forcing / FORCING_2XCO2_W_M2
        })
        .collect()
}
