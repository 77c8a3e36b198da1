//! Result rows and tables.

use crate::{ModelResult, Year};
use cc_core::units::{Length, Ratio, TempAnomaly, cm, delta_c, ppm};
use cc_core::{RunIndex, ensure_finite};
use std::fmt;

/// One simulated year.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationRow {
    pub year: Year,
    /// CO2 concentration, ppm.
    pub co2: f64,
    /// Temperature anomaly, °C.
    pub temp: f64,
    /// Sea-level rise, cm.
    pub slr: f64,
    /// Ensemble member that produced the row; `None` for single runs.
    pub run: Option<RunIndex>,
}

impl SimulationRow {
    pub fn co2_ppm(&self) -> Ratio {
        ppm(self.co2)
    }

    pub fn temp_anomaly(&self) -> TempAnomaly {
        delta_c(self.temp)
    }

    pub fn sea_level_rise(&self) -> Length {
        cm(self.slr)
    }

    fn value(&self, field: SeriesField) -> f64 {
        match field {
            SeriesField::Co2 => self.co2,
            SeriesField::Temp => self.temp,
            SeriesField::Slr => self.slr,
        }
    }
}

/// Floating-point columns of a result table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeriesField {
    Co2,
    Temp,
    Slr,
}

impl SeriesField {
    pub const ALL: [SeriesField; 3] = [SeriesField::Co2, SeriesField::Temp, SeriesField::Slr];

    /// Column header used in exported tables.
    pub fn column_name(self) -> &'static str {
        match self {
            Self::Co2 => "CO2",
            Self::Temp => "Temp",
            Self::Slr => "SLR",
        }
    }
}

impl fmt::Display for SeriesField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

/// Location of a NaN or infinite value inside a table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NonFiniteValue {
    pub row: usize,
    pub year: Year,
    pub run: Option<RunIndex>,
    pub field: SeriesField,
    pub value: f64,
}

impl fmt::Display for NonFiniteValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={} at year {}", self.field, self.value, self.year)?;
        if let Some(run) = self.run {
            write!(f, " (run {})", run)?;
        }
        Ok(())
    }
}

/// Ordered result rows: by run index, then by year within a run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimulationTable {
    rows: Vec<SimulationRow>,
}

impl SimulationTable {
    pub fn from_rows(rows: Vec<SimulationRow>) -> Self {
        Self { rows }
    }

    /// Concatenate tables in the order given.
    pub fn concat<I>(tables: I) -> Self
    where
        I: IntoIterator<Item = SimulationTable>,
    {
        let mut out = Self::default();
        for table in tables {
            out.append(table);
        }
        out
    }

    pub fn append(&mut self, mut other: SimulationTable) {
        self.rows.append(&mut other.rows);
    }

    /// Tag every row with `run`.
    pub fn with_run(mut self, run: RunIndex) -> Self {
        for row in &mut self.rows {
            row.run = Some(run);
        }
        self
    }

    pub fn rows(&self) -> &[SimulationRow] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<SimulationRow> {
        self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SimulationRow> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// First `n` rows (or all of them).
    pub fn head(&self, n: usize) -> &[SimulationRow] {
        &self.rows[..n.min(self.rows.len())]
    }

    /// True when the table carries ensemble run indices.
    pub fn has_run_column(&self) -> bool {
        self.rows.iter().any(|row| row.run.is_some())
    }

    /// Contiguous groups of rows sharing one run index.
    pub fn runs(&self) -> impl Iterator<Item = &[SimulationRow]> {
        self.rows.chunk_by(|a, b| a.run == b.run)
    }

    pub fn run_count(&self) -> usize {
        self.runs().count()
    }

    pub fn years(&self) -> Vec<Year> {
        self.rows.iter().map(|row| row.year).collect()
    }

    pub fn column(&self, field: SeriesField) -> Vec<f64> {
        self.rows.iter().map(|row| row.value(field)).collect()
    }

    /// First NaN or infinite value in row order.
    pub fn first_non_finite(&self) -> Option<NonFiniteValue> {
        self.rows.iter().enumerate().find_map(|(i, row)| {
            SeriesField::ALL.iter().find_map(|&field| {
                let value = row.value(field);
                (!value.is_finite()).then_some(NonFiniteValue {
                    row: i,
                    year: row.year,
                    run: row.run,
                    field,
                    value,
                })
            })
        })
    }

    /// Fail on the first NaN or infinite value.
    pub fn ensure_all_finite(&self) -> ModelResult<()> {
        for row in &self.rows {
            for field in SeriesField::ALL {
                ensure_finite(row.value(field), field.column_name())?;
            }
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a SimulationTable {
    type Item = &'a SimulationRow;
    type IntoIter = std::slice::Iter<'a, SimulationRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
