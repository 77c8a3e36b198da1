//! Single deterministic run: CO2 -> temperature -> sea level.

use crate::{
    ModelResult, SimulationParams, SimulationRow, SimulationTable, Year, YearSequence,
    climate_response, co2_pathway, sea_level_rise,
};

/// Run the model once over `years`.
///
/// Rows come back in year order without a run index.
pub fn simulate(years: &YearSequence, params: &SimulationParams) -> SimulationTable {
    let co2 = co2_pathway(years, params.c0, params.r, params.seasonal_amp);
    let temp = climate_response(&co2, params.lambda_ecs);
    let slr = sea_level_rise(
        &temp,
        params.beta,
        params.ocean_depth_m,
        params.ice_coeff_cm_per_c,
    );
    debug_assert_eq!(co2.len(), years.len());

    let rows = years
        .iter()
        .zip(co2)
        .zip(temp)
        .zip(slr)
        .map(|(((year, co2), temp), slr)| SimulationRow {
            year,
            co2,
            temp,
            slr,
            run: None,
        })
        .collect();

    SimulationTable::from_rows(rows)
}

/// Validate an explicit year list, then run the model.
pub fn simulate_years(years: &[Year], params: &SimulationParams) -> ModelResult<SimulationTable> {
    let years = YearSequence::from_years(years)?;
    Ok(simulate(&years, params))
}
