//! Delimited text export of result tables.
//!
//! Layout: header `Year,CO2,Temp,SLR` plus `,Run` for ensembles, one line per
//! row. NaN is written as an empty field and infinities as `inf` / `-inf`.
//!
//! Values use Rust's shortest round-trip form, which switches to exponent
//! notation outside roughly `1e-5..1e16` (`1e-7`, `1e16`). [`parse_csv`]
//! reads both forms back exactly.

use crate::{ResultsError, ResultsResult};
use cc_core::RunIndex;
use cc_model::{SeriesField, SimulationRow, SimulationTable};
use std::io::Write;
use std::path::Path;

const YEAR_COLUMN: &str = "Year";
const RUN_COLUMN: &str = "Run";

/// Shortest round-trip decimal; integral values keep a trailing `.0`.
pub fn format_value(v: f64) -> String {
    if v.is_nan() {
        String::new()
    } else if v.is_infinite() {
        let text = if v > 0.0 { "inf" } else { "-inf" };
        text.to_string()
    } else {
        format!("{v:?}")
    }
}

fn header(with_run: bool) -> String {
    let mut columns = vec![YEAR_COLUMN];
    columns.extend(SeriesField::ALL.iter().map(|f| f.column_name()));
    if with_run {
        columns.push(RUN_COLUMN);
    }
    columns.join(",")
}

pub fn write_csv<W: Write>(table: &SimulationTable, mut out: W) -> std::io::Result<()> {
    let with_run = table.has_run_column();
    writeln!(out, "{}", header(with_run))?;
    for row in table {
        write!(
            out,
            "{},{},{},{}",
            row.year,
            format_value(row.co2),
            format_value(row.temp),
            format_value(row.slr)
        )?;
        if with_run {
            match row.run {
                Some(run) => write!(out, ",{}", run)?,
                None => write!(out, ",")?,
            }
        }
        writeln!(out)?;
    }
    Ok(())
}

pub fn to_csv_string(table: &SimulationTable) -> String {
    let mut buf = Vec::new();
    // Writing into a Vec cannot fail.
    let _ = write_csv(table, &mut buf);
    String::from_utf8_lossy(&buf).into_owned()
}

pub fn write_csv_file(table: &SimulationTable, path: &Path) -> ResultsResult<()> {
    let file = std::fs::File::create(path)?;
    let mut writer = std::io::BufWriter::new(file);
    write_csv(table, &mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Parse text produced by [`write_csv`].
pub fn parse_csv(text: &str) -> ResultsResult<SimulationTable> {
    let mut lines = text.lines().enumerate();
    let (_, first) = lines.next().ok_or_else(|| ResultsError::Csv {
        line: 1,
        message: "missing header".to_string(),
    })?;

    let with_run = if first == header(true) {
        true
    } else if first == header(false) {
        false
    } else {
        return Err(ResultsError::Csv {
            line: 1,
            message: format!("unexpected header '{}'", first),
        });
    };
    let expected_fields = if with_run { 5 } else { 4 };

    let mut rows = Vec::new();
    for (i, line) in lines {
        let line_no = i + 1;
        if line.trim().is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split(',').collect();
        if fields.len() != expected_fields {
            return Err(ResultsError::Csv {
                line: line_no,
                message: format!("expected {} fields, got {}", expected_fields, fields.len()),
            });
        }

        let run = if with_run {
            parse_run(fields[4], line_no)?
        } else {
            None
        };

        rows.push(SimulationRow {
            year: fields[0].trim().parse().map_err(|e| ResultsError::Csv {
                line: line_no,
                message: format!("bad year '{}': {}", fields[0], e),
            })?,
            co2: parse_value(fields[1], line_no)?,
            temp: parse_value(fields[2], line_no)?,
            slr: parse_value(fields[3], line_no)?,
            run,
        });
    }

    Ok(SimulationTable::from_rows(rows))
}

fn parse_value(field: &str, line: usize) -> ResultsResult<f64> {
    let field = field.trim();
    if field.is_empty() {
        return Ok(f64::NAN);
    }
    field.parse().map_err(|e| ResultsError::Csv {
        line,
        message: format!("bad number '{}': {}", field, e),
    })
}

fn parse_run(field: &str, line: usize) -> ResultsResult<Option<RunIndex>> {
    let field = field.trim();
    if field.is_empty() {
        return Ok(None);
    }
    let index: u32 = field.parse().map_err(|e| ResultsError::Csv {
        line,
        message: format!("bad run index '{}': {}", field, e),
    })?;
    RunIndex::from_index(index)
        .map(Some)
        .ok_or_else(|| ResultsError::Csv {
            line,
            message: format!("run index {} out of range", index),
        })
}
