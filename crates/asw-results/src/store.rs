//! Sweep table storage API.

use crate::types::{ModeTable, PolarTable, SweepResult};
use crate::{ResultsError, ResultsResult};
use asw_core::SweepConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const MANIFEST_FILE: &str = "manifest.json";
const POLARS_FILE: &str = "polars.json";
const MODES_FILE: &str = "modes.json";

/// Description of a completed sweep, stored next to its tables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepManifest {
    pub geometry: String,
    pub geometry_file: String,
    pub timestamp: String,
    pub case_count: usize,
    pub config: SweepConfig,
}

impl SweepManifest {
    pub fn new(
        geometry: impl Into<String>,
        geometry_file: impl Into<String>,
        case_count: usize,
        config: SweepConfig,
    ) -> Self {
        Self {
            geometry: geometry.into(),
            geometry_file: geometry_file.into(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            case_count,
            config,
        }
    }
}

#[derive(Clone)]
pub struct TableStore {
    root_dir: PathBuf,
}

impl TableStore {
    pub fn new(root_dir: PathBuf) -> ResultsResult<Self> {
        if !root_dir.exists() {
            fs::create_dir_all(&root_dir)?;
        }
        Ok(Self { root_dir })
    }

    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    pub fn has_tables(&self) -> bool {
        self.root_dir.join(MANIFEST_FILE).exists()
    }

    /// Write the manifest and whichever tables are present. Tables that are
    /// absent from `result` are removed from the store.
    pub fn save(&self, manifest: &SweepManifest, result: &SweepResult) -> ResultsResult<()> {
        let manifest_json = serde_json::to_string_pretty(manifest)?;
        fs::write(self.root_dir.join(MANIFEST_FILE), manifest_json)?;

        self.save_table(POLARS_FILE, result.polars.as_ref())?;
        self.save_table(MODES_FILE, result.modes.as_ref())?;
        Ok(())
    }

    fn save_table<T: Serialize>(&self, file: &str, table: Option<&T>) -> ResultsResult<()> {
        let path = self.root_dir.join(file);
        match table {
            Some(table) => fs::write(path, serde_json::to_string_pretty(table)?)?,
            None => {
                if path.exists() {
                    fs::remove_file(path)?;
                }
            }
        }
        Ok(())
    }

    pub fn load_manifest(&self) -> ResultsResult<SweepManifest> {
        let path = self.root_dir.join(MANIFEST_FILE);
        if !path.exists() {
            return Err(ResultsError::TablesNotFound {
                path: self.root_dir.clone(),
            });
        }
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn load(&self) -> ResultsResult<(SweepManifest, SweepResult)> {
        let manifest = self.load_manifest()?;
        let polars: Option<PolarTable> = self.load_table(POLARS_FILE)?;
        let modes: Option<ModeTable> = self.load_table(MODES_FILE)?;
        Ok((manifest, SweepResult { polars, modes }))
    }

    fn load_table<T: for<'de> Deserialize<'de>>(&self, file: &str) -> ResultsResult<Option<T>> {
        let path = self.root_dir.join(file);
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path)?;
        Ok(Some(serde_json::from_str(&content)?))
    }
}
