//! Sea-level rise from thermal expansion and ice melt.

use cc_core::units::constants::CM_PER_M;

/// Sea-level rise (cm) for each temperature anomaly.
///
/// `thermosteric = beta * ocean_depth_m * 100 * temp`, `ice = ice_coeff_cm_per_c * temp`.
/// Linear in temperature; negative anomalies give negative rise.
pub fn sea_level_rise(
    temp: &[f64],
    beta: f64,
    ocean_depth_m: f64,
    ice_coeff_cm_per_c: f64,
) -> Vec<f64> {
    temp.iter()
        .map(|&t| {
            let thermosteric = beta * ocean_depth_m * CM_PER_M * t;
            let ice = ice_coeff_cm_per_c * t;
            thermosteric + ice
        })
        .collect()
}
