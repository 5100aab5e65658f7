//! asw-core: sweep definition for aerosweep.
//!
//! Contains:
//! - config (positional sweep configuration file)
//! - case (case-set derivation and per-case path naming)
//! - case_file (solver case-definition templates)
//! - error (shared error types)

pub mod case;
pub mod case_file;
pub mod config;
pub mod error;

pub use case::{
    CASES_DIR, Case, Geometry, ModeMetrics, PolarMetrics, RESULTS_DIR, case_file_path,
    derive_cases, format_alpha, result_stem,
};
pub use case_file::{
    AeroCaseParameters, parse_aero_case, render_aero_case, render_stability_case,
    write_aero_case, write_stability_case,
};
pub use config::{
    AlphaRange, AnalysisRequest, MAX_CASES, MassProperties, SweepConfig, load_config,
    parse_config,
};
pub use error::{CoreError, CoreResult};
