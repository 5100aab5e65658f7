//! Sweep working-directory bootstrap.

use std::fs;
use std::path::Path;

use asw_core::{CASES_DIR, RESULTS_DIR};

use crate::error::{AppError, AppResult};

/// Remove and recreate `cases/` and `results/` under `workdir`.
///
/// Anything left over from a previous sweep is discarded so stale reports
/// can never be read back as results of this one.
pub fn prepare_workspace(workdir: &Path) -> AppResult<()> {
    for name in [CASES_DIR, RESULTS_DIR] {
        let dir = workdir.join(name);
        if dir.is_dir() {
            fs::remove_dir_all(&dir).map_err(|e| AppError::Workspace {
                path: dir.clone(),
                source: e,
            })?;
        }
        fs::create_dir_all(&dir).map_err(|e| AppError::Workspace {
            path: dir.clone(),
            source: e,
        })?;
    }
    tracing::debug!(workdir = %workdir.display(), "prepared sweep directories");
    Ok(())
}

/// Create `cases/` under `workdir` if it does not exist, keeping its contents.
pub fn ensure_cases_dir(workdir: &Path) -> AppResult<()> {
    let dir = workdir.join(CASES_DIR);
    fs::create_dir_all(&dir).map_err(|e| AppError::Workspace {
        path: dir,
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stale_files_are_removed() {
        let dir = std::env::temp_dir().join("asw_app_workspace_stale");
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(dir.join(RESULTS_DIR)).unwrap();
        fs::write(dir.join(RESULTS_DIR).join("old.polars"), "stale").unwrap();

        prepare_workspace(&dir).unwrap();

        assert!(dir.join(CASES_DIR).is_dir());
        assert!(dir.join(RESULTS_DIR).is_dir());
        assert!(!dir.join(RESULTS_DIR).join("old.polars").exists());
    }

    #[test]
    fn ensure_cases_dir_keeps_contents() {
        let dir = std::env::temp_dir().join("asw_app_workspace_keep");
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(dir.join(CASES_DIR)).unwrap();
        fs::write(dir.join(CASES_DIR).join("0.0deg.case"), "kept").unwrap();

        ensure_cases_dir(&dir).unwrap();

        assert!(dir.join(CASES_DIR).join("0.0deg.case").exists());
    }
}
