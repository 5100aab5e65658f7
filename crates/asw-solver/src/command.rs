//! Command scripts for the solver's interactive menu grammar.
//!
//! A script loads the geometry and case, sets the mass unit, executes the
//! operating point, then optionally writes the eigenmode report and the
//! stability-derivative report. Every line, including the blank lines that
//! pop the solver back out of sub-menus, is significant.

use std::path::{Path, PathBuf};

use asw_core::{Case, Geometry, RESULTS_DIR, result_stem};

use crate::error::{SolverError, SolverResult};

/// Extension of the eigenmode report.
pub const MODES_EXTENSION: &str = "eig";
/// Extension of the stability-derivative report.
pub const POLARS_EXTENSION: &str = "polars";

/// Relative path of the eigenmode report for a geometry and alpha.
pub fn modes_file_path(geometry: &Geometry, alpha: f64) -> PathBuf {
    result_path(geometry, alpha, MODES_EXTENSION)
}

/// Relative path of the stability-derivative report for a geometry and alpha.
pub fn polars_file_path(geometry: &Geometry, alpha: f64) -> PathBuf {
    result_path(geometry, alpha, POLARS_EXTENSION)
}

fn result_path(geometry: &Geometry, alpha: f64, extension: &str) -> PathBuf {
    Path::new(RESULTS_DIR).join(format!("{}.{}", result_stem(&geometry.name, alpha), extension))
}

/// Build the command script for `case` and record its result paths.
///
/// Fails without touching the case if it requests no analysis or has no
/// case file yet.
pub fn prepare_case(case: &mut Case, geometry: &Geometry, units: &str) -> SolverResult<String> {
    if case.analyses.is_empty() {
        return Err(SolverError::CaseDefinition {
            alpha: case.label(),
        });
    }
    let case_file = case
        .case_file
        .as_ref()
        .ok_or_else(|| SolverError::MissingCaseFile {
            alpha: case.label(),
        })?;

    let mut script = String::new();
    script.push_str(&format!("load {}\n", geometry.file.display()));
    script.push_str(&format!("case {}\n", case_file.display()));
    script.push_str(&format!("mass {}\n", units));
    script.push_str("oper\no\nv\n\nx\n");

    if case.analyses.modes {
        let path = modes_file_path(geometry, case.alpha);
        script.push_str("\nmode\nN\nW\n");
        script.push_str(&format!("{}\n\n", path.display()));
        case.modes_file = Some(path);
    }
    if case.analyses.polars {
        let path = polars_file_path(geometry, case.alpha);
        script.push_str("oper\nx\nst\n");
        script.push_str(&format!("{}\n", path.display()));
        case.polars_file = Some(path);
    }

    Ok(script)
}

#[cfg(test)]
mod tests {
    use super::*;
    use asw_core::{AnalysisRequest, MassProperties};

    fn case(polars: bool, modes: bool) -> Case {
        let mut case = Case::new(
            1,
            2.0,
            MassProperties {
                mass: 1.0,
                x_cg: 0.1,
                y_cg: 0.0,
                z_cg: 0.0,
                ixx: 0.1,
                iyy: 0.1,
                izz: 0.1,
            },
            10.0,
            AnalysisRequest { polars, modes },
        );
        case.case_file = Some(PathBuf::from("cases/2.0deg.case"));
        case
    }

    fn geometry() -> Geometry {
        Geometry::new("aria3", "aria3.avl")
    }

    #[test]
    fn polars_only_script() {
        let mut case = case(true, false);
        let script = prepare_case(&mut case, &geometry(), "Lunit").unwrap();
        let expected_path = Path::new("results").join("aria3-2.0deg.polars");
        assert_eq!(
            script,
            format!(
                "load aria3.avl\ncase cases/2.0deg.case\nmass Lunit\noper\no\nv\n\nx\noper\nx\nst\n{}\n",
                expected_path.display()
            )
        );
        assert_eq!(case.polars_file, Some(expected_path));
        assert!(case.modes_file.is_none());
    }

    #[test]
    fn modes_only_script() {
        let mut case = case(false, true);
        let script = prepare_case(&mut case, &geometry(), "Lunit").unwrap();
        let expected_path = Path::new("results").join("aria3-2.0deg.eig");
        assert!(script.ends_with(&format!(
            "x\n\nmode\nN\nW\n{}\n\n",
            expected_path.display()
        )));
        assert!(!script.contains("\nst\n"));
        assert_eq!(case.modes_file, Some(expected_path));
        assert!(case.polars_file.is_none());
    }

    #[test]
    fn modes_block_precedes_polars_block() {
        let mut case = case(true, true);
        let script = prepare_case(&mut case, &geometry(), "kg").unwrap();
        let mode_at = script.find("\nmode\n").unwrap();
        let st_at = script.find("\nst\n").unwrap();
        assert!(mode_at < st_at);
        assert!(script.contains("mass kg\n"));
        assert!(case.modes_file.is_some());
        assert!(case.polars_file.is_some());
    }

    #[test]
    fn no_analysis_fails_fast() {
        let mut case = case(false, false);
        let err = prepare_case(&mut case, &geometry(), "Lunit").unwrap_err();
        assert!(matches!(err, SolverError::CaseDefinition { .. }));
        assert!(case.polars_file.is_none());
        assert!(case.modes_file.is_none());
    }

    #[test]
    fn unwritten_case_file_rejected() {
        let mut case = case(true, false);
        case.case_file = None;
        let err = prepare_case(&mut case, &geometry(), "Lunit").unwrap_err();
        assert!(matches!(err, SolverError::MissingCaseFile { .. }));
    }
}
