//! Sweep cases: one operating point per sampled angle of attack.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::config::{AnalysisRequest, MassProperties, SweepConfig};
use crate::error::{CoreError, CoreResult};

/// Directory (relative to the sweep working directory) holding case files.
pub const CASES_DIR: &str = "cases";
/// Directory (relative to the sweep working directory) holding solver output.
pub const RESULTS_DIR: &str = "results";

/// Geometry model handed to the solver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Geometry {
    /// Short name used to derive result file names
    pub name: String,
    /// Geometry file path, as the solver should see it
    pub file: PathBuf,
}

impl Geometry {
    pub fn new(name: impl Into<String>, file: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            file: file.into(),
        }
    }
}

/// Decoded stability-derivative report values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolarMetrics {
    pub cl: f64,
    pub cd: f64,
    /// Roll moment due to sideslip
    pub clb: f64,
    /// Roll moment due to roll rate
    pub clp: f64,
    /// Spiral stability indicator
    pub spiral: f64,
}

/// Decoded eigenmode report values.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ModeMetrics {
    pub dutch: Vec<f64>,
    pub roll: Vec<f64>,
}

/// Format an alpha value the way it appears in file names and case files.
///
/// Uses the shortest representation that round-trips (`2.0`, `2.5`,
/// `0.30000000000000004`). Non-integer increments can therefore produce
/// long names; paths are still unique for distinct values.
pub fn format_alpha(alpha: f64) -> String {
    format!("{:?}", alpha)
}

/// Case file path for a given alpha, relative to the working directory.
pub fn case_file_path(alpha: f64) -> PathBuf {
    Path::new(CASES_DIR).join(format!("{}deg.case", format_alpha(alpha)))
}

/// Result file path stem (no extension) for a given geometry and alpha.
pub fn result_stem(geometry_name: &str, alpha: f64) -> String {
    format!("{}-{}deg", geometry_name, format_alpha(alpha))
}

/// One sampled operating point of the sweep.
#[derive(Debug, Clone, PartialEq)]
pub struct Case {
    /// Position in the sweep
    pub index: usize,
    /// Angle of attack in degrees
    pub alpha: f64,
    pub mass: MassProperties,
    pub velocity: f64,
    pub analyses: AnalysisRequest,
    /// Set by the write phase
    pub case_file: Option<PathBuf>,
    /// Set when the command script is built
    pub polars_file: Option<PathBuf>,
    pub modes_file: Option<PathBuf>,
    /// Set by result extraction
    pub polars: Option<PolarMetrics>,
    pub modes: Option<ModeMetrics>,
}

impl Case {
    pub fn new(
        index: usize,
        alpha: f64,
        mass: MassProperties,
        velocity: f64,
        analyses: AnalysisRequest,
    ) -> Self {
        Self {
            index,
            alpha,
            mass,
            velocity,
            analyses,
            case_file: None,
            polars_file: None,
            modes_file: None,
            polars: None,
            modes: None,
        }
    }

    /// Alpha as used in paths and logs.
    pub fn label(&self) -> String {
        format_alpha(self.alpha)
    }

    /// Fails if the case requests no analysis at all.
    pub fn require_analyses(&self) -> CoreResult<()> {
        if self.analyses.is_empty() {
            return Err(CoreError::CaseDefinition {
                alpha: self.label(),
            });
        }
        Ok(())
    }
}

/// Derive the ordered case list for a sweep.
pub fn derive_cases(config: &SweepConfig) -> CoreResult<Vec<Case>> {
    config.alpha.check_count()?;
    let alphas = config.alpha.samples();
    if alphas.is_empty() {
        return Err(CoreError::config(
            "alpha1",
            format!(
                "range {} to {} by {} yields no cases",
                config.alpha.start, config.alpha.end, config.alpha.increment
            ),
        ));
    }

    let mut seen = HashSet::with_capacity(alphas.len());
    let mut cases = Vec::with_capacity(alphas.len());
    for (index, alpha) in alphas.into_iter().enumerate() {
        let formatted = format_alpha(alpha);
        if !seen.insert(formatted.clone()) {
            return Err(CoreError::DuplicateAlpha { formatted });
        }
        cases.push(Case::new(
            index,
            alpha,
            config.mass,
            config.velocity,
            config.analyses,
        ));
    }

    tracing::debug!(count = cases.len(), "derived sweep cases");
    Ok(cases)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AlphaRange;

    fn config(start: f64, end: f64, increment: f64) -> SweepConfig {
        SweepConfig {
            mass: MassProperties {
                mass: 1.8,
                x_cg: 0.1,
                y_cg: 0.0,
                z_cg: 0.02,
                ixx: 0.1,
                iyy: 0.2,
                izz: 0.3,
            },
            velocity: 12.0,
            alpha: AlphaRange {
                start,
                end,
                increment,
            },
            workers: 2,
            units: "Lunit".to_string(),
            analyses: AnalysisRequest {
                polars: true,
                modes: true,
            },
        }
    }

    #[test]
    fn inclusive_range() {
        let cases = derive_cases(&config(0.0, 10.0, 2.0)).unwrap();
        let alphas: Vec<f64> = cases.iter().map(|c| c.alpha).collect();
        assert_eq!(alphas, vec![0.0, 2.0, 4.0, 6.0, 8.0, 10.0]);
    }

    #[test]
    fn truncated_range_drops_partial_step() {
        let cases = derive_cases(&config(0.0, 5.0, 2.0)).unwrap();
        let alphas: Vec<f64> = cases.iter().map(|c| c.alpha).collect();
        assert_eq!(alphas, vec![0.0, 2.0, 4.0]);
    }

    #[test]
    fn cases_inherit_configuration() {
        let cfg = config(-2.0, 2.0, 1.0);
        let cases = derive_cases(&cfg).unwrap();
        assert_eq!(cases.len(), 5);
        for (i, case) in cases.iter().enumerate() {
            assert_eq!(case.index, i);
            assert_eq!(case.mass, cfg.mass);
            assert_eq!(case.velocity, cfg.velocity);
            assert_eq!(case.analyses, cfg.analyses);
            assert!(case.case_file.is_none());
        }
    }

    #[test]
    fn empty_range_is_configuration_error() {
        let err = derive_cases(&config(5.0, 0.0, 1.0)).unwrap_err();
        assert!(matches!(err, CoreError::Configuration { .. }));
    }

    #[test]
    fn paths_follow_formatted_alpha() {
        assert_eq!(case_file_path(2.0), Path::new("cases").join("2.0deg.case"));
        assert_eq!(result_stem("aria3", -1.5), "aria3--1.5deg");
    }

    #[test]
    fn case_without_analyses_rejected() {
        let mut cfg = config(0.0, 1.0, 1.0);
        cfg.analyses = AnalysisRequest::default();
        let cases = derive_cases(&cfg).unwrap();
        let err = cases[0].require_analyses().unwrap_err();
        assert!(matches!(err, CoreError::CaseDefinition { .. }));
    }
}
