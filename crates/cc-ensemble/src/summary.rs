//! Per-year statistics across ensemble members.

use cc_core::{mean, std_dev};
use cc_model::{SeriesField, SimulationTable, Year};
use std::collections::BTreeMap;

/// Spread of one series at one year.
///
/// NaN in any member makes every statistic NaN.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesStats {
    pub mean: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
}

impl SeriesStats {
    pub fn from_values(values: &[f64]) -> Self {
        if values.iter().any(|v| v.is_nan()) {
            return Self {
                mean: f64::NAN,
                std_dev: f64::NAN,
                min: f64::NAN,
                max: f64::NAN,
            };
        }
        Self {
            mean: mean(values),
            std_dev: std_dev(values),
            min: values.iter().copied().fold(f64::INFINITY, f64::min),
            max: values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct YearSummary {
    pub year: Year,
    /// Number of rows contributing to this year.
    pub members: usize,
    pub co2: SeriesStats,
    pub temp: SeriesStats,
    pub slr: SeriesStats,
}

/// Summarise every year of `table`, in ascending year order.
pub fn summarize_by_year(table: &SimulationTable) -> Vec<YearSummary> {
    let mut by_year: BTreeMap<Year, Vec<usize>> = BTreeMap::new();
    for (i, row) in table.rows().iter().enumerate() {
        by_year.entry(row.year).or_default().push(i);
    }

    let columns: Vec<Vec<f64>> = SeriesField::ALL
        .iter()
        .map(|&field| table.column(field))
        .collect();

    by_year
        .into_iter()
        .map(|(year, indices)| {
            let stats = |col: &[f64]| {
                let values: Vec<f64> = indices.iter().map(|&i| col[i]).collect();
                SeriesStats::from_values(&values)
            };
            YearSummary {
                year,
                members: indices.len(),
                co2: stats(&columns[0]),
                temp: stats(&columns[1]),
                slr: stats(&columns[2]),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EnsembleRequest, monte_carlo};
    use cc_core::RunIndex;
    use cc_model::{SimulationParams, SimulationRow};

    fn row(year: Year, temp: f64, run: u32) -> SimulationRow {
        SimulationRow {
            year,
            co2: 400.0,
            temp,
            slr: 2.0 * temp,
            run: RunIndex::from_index(run),
        }
    }

    #[test]
    fn stats_per_year() {
        let table = SimulationTable::from_rows(vec![
            row(2020, 1.0, 0),
            row(2021, 2.0, 0),
            row(2020, 3.0, 1),
            row(2021, 4.0, 1),
        ]);
        let summary = summarize_by_year(&table);
        assert_eq!(summary.len(), 2);

        assert_eq!(summary[0].year, 2020);
        assert_eq!(summary[0].members, 2);
        assert_eq!(summary[0].temp.mean, 2.0);
        assert_eq!(summary[0].temp.min, 1.0);
        assert_eq!(summary[0].temp.max, 3.0);
        assert_eq!(summary[0].temp.std_dev, 1.0);
        assert_eq!(summary[0].slr.mean, 4.0);
        assert_eq!(summary[0].co2.std_dev, 0.0);

        assert_eq!(summary[1].year, 2021);
        assert_eq!(summary[1].temp.mean, 3.0);
    }

    #[test]
    fn nan_member_poisons_year() {
        let table = SimulationTable::from_rows(vec![row(2020, 1.0, 0), row(2020, f64::NAN, 1)]);
        let summary = summarize_by_year(&table);
        assert!(summary[0].temp.mean.is_nan());
        assert!(summary[0].temp.min.is_nan());
        assert_eq!(summary[0].co2.mean, 400.0);
    }

    #[test]
    fn ensemble_summary_has_spread() {
        let req = EnsembleRequest::new(50, 2020, 2060, SimulationParams::default()).with_seed(5);
        let table = monte_carlo(&req).unwrap();
        let summary = summarize_by_year(&table);
        assert_eq!(summary.len(), 41);
        assert!(summary.iter().all(|s| s.members == 50));
        let last = summary.last().unwrap();
        assert!(last.temp.std_dev > 0.0);
        assert!(last.temp.min <= last.temp.mean && last.temp.mean <= last.temp.max);
    }

    #[test]
    fn empty_table() {
        assert!(summarize_by_year(&SimulationTable::default()).is_empty());
    }
}
