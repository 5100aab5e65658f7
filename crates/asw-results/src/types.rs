//! Result table types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One row of the polars table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PolarRow {
    /// Angle of attack in degrees
    pub alpha: f64,
    pub cl: f64,
    pub cd: f64,
    pub clb: f64,
    pub clp: f64,
    pub spiral: f64,
}

/// One row of the modes table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModeRow {
    pub alpha: f64,
    pub dutch: Vec<f64>,
    pub roll: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PolarTable {
    pub rows: Vec<PolarRow>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ModeTable {
    pub rows: Vec<ModeRow>,
}

/// Tables produced by a sweep. A table is present only if its analysis
/// was requested.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SweepResult {
    pub polars: Option<PolarTable>,
    pub modes: Option<ModeTable>,
}

impl PolarTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn alphas(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.alpha).collect()
    }
}

impl ModeTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn alphas(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.alpha).collect()
    }
}

fn tuple(values: &[f64]) -> String {
    let inner: Vec<String> = values.iter().map(|v| format!("{}", v)).collect();
    format!("({})", inner.join(", "))
}

impl fmt::Display for PolarTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:>12} {:>12} {:>12} {:>12} {:>12} {:>12}",
            "Alpha (deg)", "Cl", "Cd", "Clb", "Clp", "spiral"
        )?;
        for row in &self.rows {
            writeln!(
                f,
                "{:>12.3} {:>12.5} {:>12.5} {:>12.5} {:>12.5} {:>12.5}",
                row.alpha, row.cl, row.cd, row.clb, row.clp, row.spiral
            )?;
        }
        Ok(())
    }
}

impl fmt::Display for ModeTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:>12}  {:<28}  {:<28}", "alpha", "dutch", "roll")?;
        for row in &self.rows {
            writeln!(
                f,
                "{:>12.3}  {:<28}  {:<28}",
                row.alpha,
                tuple(&row.dutch),
                tuple(&row.roll)
            )?;
        }
        Ok(())
    }
}
