//! asw-solver: command protocol and process driver for the external
//! aerodynamic solver.

pub mod command;
pub mod driver;
pub mod error;

pub use command::{
    MODES_EXTENSION, POLARS_EXTENSION, modes_file_path, polars_file_path, prepare_case,
};
pub use driver::{ProcessSolver, Solver, SolverExit};
pub use error::{SolverError, SolverResult};
