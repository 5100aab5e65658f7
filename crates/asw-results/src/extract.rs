//! Fixed-position decoding of solver reports.
//!
//! The solver writes human-readable reports with a fixed layout. Values are
//! located by 0-based line index and 0-based whitespace token index. These
//! offsets are tied to the solver's report format and must not be adjusted
//! independently of it.

use std::path::Path;

use asw_core::{Case, ModeMetrics, PolarMetrics};

use crate::types::{ModeRow, ModeTable, PolarRow, PolarTable};
use crate::{ResultsError, ResultsResult};

/// Location of one scalar in a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub name: &'static str,
    pub row: usize,
    pub token: usize,
}

pub const CL: Field = Field {
    name: "Cl",
    row: 23,
    token: 2,
};
pub const CD: Field = Field {
    name: "Cd",
    row: 24,
    token: 2,
};
pub const CLB: Field = Field {
    name: "Clb",
    row: 38,
    token: 8,
};
pub const CLP: Field = Field {
    name: "Clp",
    row: 46,
    token: 5,
};
pub const SPIRAL: Field = Field {
    name: "spiral",
    row: 52,
    token: 6,
};

/// Eigenmode report row holding the dutch-roll eigenvalue pair.
pub const DUTCH_ROW: usize = 3;
/// Eigenmode report row holding the roll-mode eigenvalue.
pub const ROLL_ROW: usize = 5;

fn read_report(path: &Path) -> ResultsResult<String> {
    std::fs::read_to_string(path).map_err(|e| ResultsError::ResultFileRead {
        path: path.to_path_buf(),
        source: e,
    })
}

fn line<'a>(lines: &[&'a str], row: usize, path: &Path) -> ResultsResult<&'a str> {
    lines.get(row).copied().ok_or_else(|| ResultsError::ResultFormat {
        path: path.to_path_buf(),
        row,
        token: None,
        message: format!("report has only {} lines", lines.len()),
    })
}

fn number(token: &str, row: usize, index: usize, path: &Path) -> ResultsResult<f64> {
    token.parse().map_err(|_| ResultsError::ResultFormat {
        path: path.to_path_buf(),
        row,
        token: Some(index),
        message: format!("token {} ('{}') is not a number", index + 1, token),
    })
}

fn scalar(lines: &[&str], field: Field, path: &Path) -> ResultsResult<f64> {
    let text = line(lines, field.row, path)?;
    let token = text
        .split_whitespace()
        .nth(field.token)
        .ok_or_else(|| ResultsError::ResultFormat {
            path: path.to_path_buf(),
            row: field.row,
            token: Some(field.token),
            message: format!("missing token {} for {}", field.token + 1, field.name),
        })?;
    number(token, field.row, field.token, path)
}

/// All tokens after the first on `row`, as numbers.
fn trailing(lines: &[&str], row: usize, path: &Path) -> ResultsResult<Vec<f64>> {
    let text = line(lines, row, path)?;
    text.split_whitespace()
        .enumerate()
        .skip(1)
        .map(|(index, token)| number(token, row, index, path))
        .collect()
}

/// Decode a stability-derivative report. `path` is only used in errors.
pub fn decode_polars(text: &str, path: &Path) -> ResultsResult<PolarMetrics> {
    let lines: Vec<&str> = text.lines().collect();
    Ok(PolarMetrics {
        cl: scalar(&lines, CL, path)?,
        cd: scalar(&lines, CD, path)?,
        clb: scalar(&lines, CLB, path)?,
        clp: scalar(&lines, CLP, path)?,
        spiral: scalar(&lines, SPIRAL, path)?,
    })
}

/// Decode an eigenmode report. `path` is only used in errors.
pub fn decode_modes(text: &str, path: &Path) -> ResultsResult<ModeMetrics> {
    let lines: Vec<&str> = text.lines().collect();
    Ok(ModeMetrics {
        dutch: trailing(&lines, DUTCH_ROW, path)?,
        roll: trailing(&lines, ROLL_ROW, path)?,
    })
}

pub fn read_polars(path: &Path) -> ResultsResult<PolarMetrics> {
    decode_polars(&read_report(path)?, path)
}

pub fn read_modes(path: &Path) -> ResultsResult<ModeMetrics> {
    decode_modes(&read_report(path)?, path)
}

/// Decode every case's polar report, in case order, and build the table.
///
/// Result paths on the cases are relative to `workdir`. The first failing
/// case aborts collection.
pub fn collect_polars(workdir: &Path, cases: &mut [Case]) -> ResultsResult<PolarTable> {
    let mut rows = Vec::with_capacity(cases.len());
    for case in cases.iter_mut() {
        let relative = case
            .polars_file
            .as_ref()
            .ok_or_else(|| ResultsError::MissingResultPath {
                alpha: case.label(),
                what: "polars",
            })?;
        let metrics = read_polars(&workdir.join(relative))?;
        tracing::debug!(alpha = case.alpha, cl = metrics.cl, cd = metrics.cd, "decoded polars");
        case.polars = Some(metrics);
        rows.push(PolarRow {
            alpha: case.alpha,
            cl: metrics.cl,
            cd: metrics.cd,
            clb: metrics.clb,
            clp: metrics.clp,
            spiral: metrics.spiral,
        });
    }
    Ok(PolarTable { rows })
}

/// Decode every case's eigenmode report, in case order, and build the table.
pub fn collect_modes(workdir: &Path, cases: &mut [Case]) -> ResultsResult<ModeTable> {
    let mut rows = Vec::with_capacity(cases.len());
    for case in cases.iter_mut() {
        let relative = case
            .modes_file
            .as_ref()
            .ok_or_else(|| ResultsError::MissingResultPath {
                alpha: case.label(),
                what: "modes",
            })?;
        let metrics = read_modes(&workdir.join(relative))?;
        tracing::debug!(alpha = case.alpha, "decoded modes");
        rows.push(ModeRow {
            alpha: case.alpha,
            dutch: metrics.dutch.clone(),
            roll: metrics.roll.clone(),
        });
        case.modes = Some(metrics);
    }
    Ok(ModeTable { rows })
}
