//! Solver invocation.
//!
//! The solver is treated as a request/response capability: a command script
//! goes in, an exit status comes out. Results are never read from the
//! process output; they are written by the solver to files named in the
//! script and decoded separately.

use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::error::{SolverError, SolverResult};

/// Exit status reported by a solver invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolverExit {
    /// Process exit code, `None` if terminated by a signal
    pub code: Option<i32>,
}

impl SolverExit {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Anything that can run a command script to completion.
///
/// Implementations must not keep state between calls: each invocation is
/// independent even when made from the same worker thread.
pub trait Solver: Sync {
    fn invoke(&self, script: &str) -> SolverResult<SolverExit>;
}

/// Runs the external solver executable, one fresh process per invocation.
#[derive(Debug, Clone)]
pub struct ProcessSolver {
    executable: PathBuf,
    workdir: PathBuf,
}

impl ProcessSolver {
    /// `workdir` becomes the process's current directory, so relative paths
    /// in scripts resolve against it.
    pub fn new(executable: impl Into<PathBuf>, workdir: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
            workdir: workdir.into(),
        }
    }

    pub fn executable(&self) -> &Path {
        &self.executable
    }

    pub fn workdir(&self) -> &Path {
        &self.workdir
    }
}

impl Solver for ProcessSolver {
    fn invoke(&self, script: &str) -> SolverResult<SolverExit> {
        let mut child = Command::new(&self.executable)
            .current_dir(&self.workdir)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| SolverError::Spawn {
                executable: self.executable.clone(),
                source: e,
            })?;

        // Dropping the handle closes stdin and lets the solver reach EOF.
        if let Some(mut stdin) = child.stdin.take() {
            match stdin.write_all(script.as_bytes()) {
                Ok(()) => {}
                // Solver quit before reading everything; its exit status tells the rest.
                Err(e) if e.kind() == ErrorKind::BrokenPipe => {}
                Err(e) => {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(SolverError::Communicate {
                        what: "writing command script",
                        source: e,
                    });
                }
            }
        }

        let status = child.wait().map_err(|e| SolverError::Communicate {
            what: "waiting for solver exit",
            source: e,
        })?;

        Ok(SolverExit {
            code: status.code(),
        })
    }
}
