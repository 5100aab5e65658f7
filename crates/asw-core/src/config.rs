//! Sweep configuration loading.
//!
//! The configuration file is line oriented. Blank lines and lines starting
//! with `#` are ignored; every remaining line carries one parameter as its
//! second whitespace-separated token, in a fixed order:
//!
//! ```text
//! mass, Xcg, Ycg, Zcg, Ixx, Iyy, Izz, velocity,
//! alpha0, alpha1, increment, workers, units, polars (Y/N), modes (Y/N)
//! ```
//!
//! The first token of each line is a free-form label and is never checked,
//! so parameters are matched by position only.

use std::path::Path;

use crate::error::{CoreError, CoreResult};

/// Parameter names in the order they must appear in the file.
pub const PARAMETERS: [&str; 15] = [
    "mass",
    "Xcg",
    "Ycg",
    "Zcg",
    "Ixx",
    "Iyy",
    "Izz",
    "velocity",
    "alpha0",
    "alpha1",
    "increment",
    "workers",
    "units",
    "polars",
    "modes",
];

/// Mass, centre of gravity and inertia of the aircraft being analysed.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MassProperties {
    /// Mass in kg
    pub mass: f64,
    /// Centre of gravity, in the geometry length unit
    pub x_cg: f64,
    pub y_cg: f64,
    pub z_cg: f64,
    /// Moments of inertia in kg-m^2
    pub ixx: f64,
    pub iyy: f64,
    pub izz: f64,
}

/// Upper bound on the number of samples a sweep may request.
pub const MAX_CASES: usize = 10_000;

/// Angle-of-attack sweep range in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AlphaRange {
    pub start: f64,
    pub end: f64,
    pub increment: f64,
}

impl AlphaRange {
    /// Number of samples in the sweep.
    ///
    /// Computed as `floor(1 + (end - start) / increment)`. The final point is
    /// kept or dropped depending on the floating remainder; this truncation
    /// is intentional and must not be replaced by rounding.
    pub fn count(&self) -> usize {
        let raw = 1.0 + (self.end - self.start) / self.increment;
        if raw.is_finite() && raw >= 1.0 {
            raw.trunc() as usize
        } else {
            0
        }
    }

    /// Sampled alpha values: `start + i * increment` for `i in 0..count()`.
    pub fn samples(&self) -> Vec<f64> {
        (0..self.count())
            .map(|i| self.start + i as f64 * self.increment)
            .collect()
    }

    /// Rejects ranges with more than [`MAX_CASES`] samples.
    pub fn check_count(&self) -> CoreResult<()> {
        let count = self.count();
        if count > MAX_CASES {
            return Err(CoreError::config(
                "increment",
                format!(
                    "range {} to {} by {} yields {} cases, limit is {}",
                    self.start, self.end, self.increment, count, MAX_CASES
                ),
            ));
        }
        Ok(())
    }
}

/// Which solver analyses each case requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnalysisRequest {
    /// Stability-derivative report (`.polars`)
    pub polars: bool,
    /// Eigenmode report (`.eig`)
    pub modes: bool,
}

impl AnalysisRequest {
    pub fn is_empty(&self) -> bool {
        !self.polars && !self.modes
    }
}

/// Fully parsed sweep configuration. Every field is required.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SweepConfig {
    pub mass: MassProperties,
    /// Freestream velocity in m/s
    pub velocity: f64,
    pub alpha: AlphaRange,
    /// Size of the worker pool used for both sweep phases
    pub workers: usize,
    /// Unit label passed to the solver's `mass` command
    pub units: String,
    pub analyses: AnalysisRequest,
}

/// Load and parse a sweep configuration file.
pub fn load_config(path: &Path) -> CoreResult<SweepConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| CoreError::ConfigFileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    let config = parse_config(&content)?;
    tracing::debug!(path = %path.display(), "loaded sweep configuration");
    Ok(config)
}

/// Parse configuration text.
pub fn parse_config(text: &str) -> CoreResult<SweepConfig> {
    let mut fields = Fields::new(text);

    let mass = MassProperties {
        mass: fields.real("mass")?,
        x_cg: fields.real("Xcg")?,
        y_cg: fields.real("Ycg")?,
        z_cg: fields.real("Zcg")?,
        ixx: fields.real("Ixx")?,
        iyy: fields.real("Iyy")?,
        izz: fields.real("Izz")?,
    };
    let velocity = fields.real("velocity")?;
    let alpha = AlphaRange {
        start: fields.real("alpha0")?,
        end: fields.real("alpha1")?,
        increment: fields.real("increment")?,
    };
    let workers = fields.count("workers")?;
    let units = fields.token("units")?.to_string();
    let analyses = AnalysisRequest {
        polars: fields.flag("polars")?,
        modes: fields.flag("modes")?,
    };

    if alpha.increment <= 0.0 {
        return Err(CoreError::config(
            "increment",
            format!("must be positive, got {}", alpha.increment),
        ));
    }
    alpha.check_count()?;
    if workers == 0 {
        return Err(CoreError::config("workers", "must be at least 1"));
    }

    Ok(SweepConfig {
        mass,
        velocity,
        alpha,
        workers,
        units,
        analyses,
    })
}

/// Cursor over the significant lines of a configuration file.
struct Fields<'a> {
    lines: Vec<&'a str>,
    next: usize,
}

impl<'a> Fields<'a> {
    fn new(text: &'a str) -> Self {
        let lines = text
            .lines()
            .filter(|line| !line.starts_with('#') && !line.trim().is_empty())
            .collect();
        Self { lines, next: 0 }
    }

    fn token(&mut self, parameter: &'static str) -> CoreResult<&'a str> {
        let index = self.next;
        self.next += 1;

        let line: &'a str = self.lines.get(index).copied().ok_or_else(|| {
            CoreError::config(
                parameter,
                format!(
                    "missing (expected {} parameters, found {})",
                    PARAMETERS.len(),
                    self.lines.len()
                ),
            )
        })?;

        line.split_whitespace().nth(1).ok_or_else(|| {
            CoreError::config(
                parameter,
                format!("no value assigned on line '{}'", line.trim()),
            )
        })
    }

    fn real(&mut self, parameter: &'static str) -> CoreResult<f64> {
        let token = self.token(parameter)?;
        let value: f64 = token
            .parse()
            .map_err(|e| CoreError::config(parameter, format!("'{}' is not a number: {}", token, e)))?;
        if !value.is_finite() {
            return Err(CoreError::config(
                parameter,
                format!("'{}' is not finite", token),
            ));
        }
        Ok(value)
    }

    fn count(&mut self, parameter: &'static str) -> CoreResult<usize> {
        let token = self.token(parameter)?;
        token.parse().map_err(|e| {
            CoreError::config(parameter, format!("'{}' is not a whole number: {}", token, e))
        })
    }

    fn flag(&mut self, parameter: &'static str) -> CoreResult<bool> {
        let token = self.token(parameter)?;
        match token {
            "Y" | "y" => Ok(true),
            "N" | "n" => Ok(false),
            other => Err(CoreError::config(
                parameter,
                format!("expected Y or N, got '{}'", other),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
# aircraft
mass      2.5
Xcg       0.12

Ycg       0.0
Zcg       0.01
Ixx       0.2
Iyy       0.3
Izz       0.45
# flight condition
velocity  15.0
alpha0    0.0
alpha1    10.0
increment 2.0
threads   4
units     Lunit
polars    Y
modes     N
";

    #[test]
    fn parses_all_parameters_in_order() {
        let config = parse_config(SAMPLE).unwrap();
        assert_eq!(config.mass.mass, 2.5);
        assert_eq!(config.mass.x_cg, 0.12);
        assert_eq!(config.mass.z_cg, 0.01);
        assert_eq!(config.mass.izz, 0.45);
        assert_eq!(config.velocity, 15.0);
        assert_eq!(config.alpha.end, 10.0);
        assert_eq!(config.alpha.increment, 2.0);
        assert_eq!(config.workers, 4);
        assert_eq!(config.units, "Lunit");
        assert!(config.analyses.polars);
        assert!(!config.analyses.modes);
    }

    #[test]
    fn missing_trailing_line_is_fatal() {
        let truncated: String = SAMPLE.lines().take(17).collect::<Vec<_>>().join("\n");
        let err = parse_config(&truncated).unwrap_err();
        match err {
            CoreError::Configuration { parameter, .. } => assert_eq!(parameter, "modes"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn line_without_value_is_fatal() {
        let text = SAMPLE.replace("Iyy       0.3", "Iyy");
        let err = parse_config(&text).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Configuration {
                parameter: "Iyy",
                ..
            }
        ));
    }

    #[test]
    fn unparseable_number_is_fatal() {
        let text = SAMPLE.replace("velocity  15.0", "velocity  fast");
        let err = parse_config(&text).unwrap_err();
        assert!(err.to_string().contains("velocity"));
    }

    #[test]
    fn non_positive_increment_rejected() {
        let text = SAMPLE.replace("increment 2.0", "increment 0.0");
        assert!(parse_config(&text).is_err());
    }

    #[test]
    fn tiny_increment_rejected_before_sampling() {
        let text = SAMPLE.replace("increment 2.0", "increment 1e-300");
        let err = parse_config(&text).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Configuration {
                parameter: "increment",
                ..
            }
        ));

        let text = SAMPLE.replace("increment 2.0", "increment 1e-9");
        assert!(parse_config(&text).is_err());
    }

    #[test]
    fn range_at_case_limit_accepted() {
        let text = SAMPLE
            .replace("alpha1    10.0", &format!("alpha1    {}", MAX_CASES - 1))
            .replace("increment 2.0", "increment 1.0");
        let config = parse_config(&text).unwrap();
        assert_eq!(config.alpha.count(), MAX_CASES);
    }

    #[test]
    fn zero_workers_rejected() {
        let text = SAMPLE.replace("threads   4", "threads   0");
        assert!(parse_config(&text).is_err());
    }

    #[test]
    fn flag_must_be_y_or_n() {
        let text = SAMPLE.replace("polars    Y", "polars    yes");
        let err = parse_config(&text).unwrap_err();
        assert!(err.to_string().contains("polars"));
    }

    #[test]
    fn alpha_count_truncates() {
        let range = AlphaRange {
            start: 0.0,
            end: 5.0,
            increment: 2.0,
        };
        assert_eq!(range.count(), 3);
        assert_eq!(range.samples(), vec![0.0, 2.0, 4.0]);
    }

    #[test]
    fn reversed_range_is_empty() {
        let range = AlphaRange {
            start: 5.0,
            end: 0.0,
            increment: 1.0,
        };
        assert_eq!(range.count(), 0);
    }
}
