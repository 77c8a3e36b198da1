//! Atmospheric CO2 pathway.

use crate::YearSequence;
use cc_core::units::constants::SEASONAL_CYCLE_STEPS;
use std::f64::consts::PI;

/// CO2 concentration (ppm) for every year in `years`.
///
/// `co2[t] = c0 * exp(r * (year[t] - year[0])) + seasonal_amp * sin(2π * (t mod 12) / 12)`
///
/// The seasonal term is keyed to the position `t` in the sequence, not to a
/// calendar month: each row is one step of a 12-step cycle.
pub fn co2_pathway(years: &YearSequence, c0: f64, r: f64, seasonal_amp: f64) -> Vec<f64> {
    let first = years.start();
    years
        .iter()
        .enumerate()
        .map(|(t, year)| {
            let elapsed = f64::from(year) - f64::from(first);
            let growth = c0 * (r * elapsed).exp();
            growth + seasonal_amp * seasonal_phase(t).sin()
        })
        .collect()
}

fn seasonal_phase(t: usize) -> f64 {
    let step = (t % SEASONAL_CYCLE_STEPS) as f64;
    2.0 * PI * step / SEASONAL_CYCLE_STEPS as f64
}
