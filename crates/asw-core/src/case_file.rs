//! Solver case-definition files.
//!
//! Two templates are supported: the aero case written once per sweep
//! sample, and the reduced stability case (cg and mass only) written to a
//! fixed path for a single reference run.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use crate::case::{CASES_DIR, Case, case_file_path};
use crate::config::MassProperties;
use crate::error::{CoreError, CoreResult};

/// Air density written into every aero case, kg/m^3.
pub const AIR_DENSITY: f64 = 1.225;
/// Gravitational acceleration written into every aero case, m/s^2.
pub const GRAVITY: f64 = 0.98;
/// File name of the stability reference case.
pub const STABILITY_CASE_FILE: &str = "tail.case";

const SEPARATOR: &str = "---------------------------------------------";

/// Parameters recovered from an aero case file.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AeroCaseParameters {
    pub alpha: f64,
    pub mass: MassProperties,
    pub velocity: f64,
    pub density: f64,
    pub gravity: f64,
}

fn header() -> String {
    format!("\n{}\nRun case  1:\n\n", SEPARATOR)
}

fn num(value: f64) -> String {
    format!("{:?}", value)
}

fn push_cg_and_mass(out: &mut String, mass: &MassProperties) {
    let _ = writeln!(out, "X_cg={} Lunit", num(mass.x_cg));
    let _ = writeln!(out, "Y_cg={} Lunit", num(mass.y_cg));
    let _ = writeln!(out, "Z_cg={} Lunit", num(mass.z_cg));
    let _ = writeln!(out, "mass={} kg", num(mass.mass));
}

/// Render the aero case template for one sweep case.
pub fn render_aero_case(case: &Case) -> String {
    let mut out = header();
    let _ = writeln!(out, "alpha -> alpha = {}", num(case.alpha));
    push_cg_and_mass(&mut out, &case.mass);
    let _ = writeln!(out, "Ixx={} kg-m^2", num(case.mass.ixx));
    let _ = writeln!(out, "Iyy={} kg-m^2", num(case.mass.iyy));
    let _ = writeln!(out, "Izz={} kg-m^2", num(case.mass.izz));
    let _ = writeln!(out, "velocity={} m/s", num(case.velocity));
    let _ = writeln!(out, "density={} kg-m^3", AIR_DENSITY);
    let _ = writeln!(out, "grav.acc.={} m/s^2", GRAVITY);
    out
}

/// Render the reduced stability case template.
pub fn render_stability_case(mass: &MassProperties) -> String {
    let mut out = header();
    push_cg_and_mass(&mut out, mass);
    out
}

fn write_file(workdir: &Path, relative: &Path, content: &str) -> CoreResult<()> {
    let full = workdir.join(relative);
    std::fs::write(&full, content).map_err(|e| CoreError::CaseFileWrite {
        path: full,
        source: e,
    })
}

/// Write the aero case for `case` under `workdir` and record its path.
///
/// The recorded path is relative to `workdir`, which is also the solver's
/// working directory.
pub fn write_aero_case(workdir: &Path, case: &mut Case) -> CoreResult<()> {
    let relative = case_file_path(case.alpha);
    write_file(workdir, &relative, &render_aero_case(case))?;
    case.case_file = Some(relative);
    Ok(())
}

/// Write the stability reference case and return its relative path.
pub fn write_stability_case(workdir: &Path, mass: &MassProperties) -> CoreResult<PathBuf> {
    let relative = Path::new(CASES_DIR).join(STABILITY_CASE_FILE);
    write_file(workdir, &relative, &render_stability_case(mass))?;
    Ok(relative)
}

/// Parse an aero case file back into its parameters.
pub fn parse_aero_case(text: &str) -> CoreResult<AeroCaseParameters> {
    let mut alpha = None;
    let mut values: [Option<f64>; 10] = [None; 10];
    const KEYS: [&str; 10] = [
        "X_cg", "Y_cg", "Z_cg", "mass", "Ixx", "Iyy", "Izz", "velocity", "density", "grav.acc.",
    ];

    for line in text.lines() {
        let line = line.trim();
        if let Some(rest) = line.strip_prefix("alpha -> alpha =") {
            alpha = Some(parse_value("alpha", rest)?);
            continue;
        }
        let Some((key, rest)) = line.split_once('=') else {
            continue;
        };
        if let Some(slot) = KEYS.iter().position(|k| *k == key.trim()) {
            values[slot] = Some(parse_value(KEYS[slot], rest)?);
        }
    }

    let get = |slot: usize| {
        values[slot].ok_or_else(|| CoreError::CaseFileFormat {
            message: format!("missing {}", KEYS[slot]),
        })
    };

    Ok(AeroCaseParameters {
        alpha: alpha.ok_or_else(|| CoreError::CaseFileFormat {
            message: "missing alpha".to_string(),
        })?,
        mass: MassProperties {
            x_cg: get(0)?,
            y_cg: get(1)?,
            z_cg: get(2)?,
            mass: get(3)?,
            ixx: get(4)?,
            iyy: get(5)?,
            izz: get(6)?,
        },
        velocity: get(7)?,
        density: get(8)?,
        gravity: get(9)?,
    })
}

fn parse_value(key: &str, rest: &str) -> CoreResult<f64> {
    let token = rest.split_whitespace().next().unwrap_or("");
    token.parse().map_err(|_| CoreError::CaseFileFormat {
        message: format!("invalid value '{}' for {}", token, key),
    })
}
