//! On-disk run cache.
//!
//! One directory per run id under the store root, holding `manifest.json`
//! and `table.csv`. A run counts as stored only when both files exist.

use crate::csv::{parse_csv, write_csv_file};
use crate::types::RunManifest;
use crate::{ResultsError, ResultsResult};
use cc_model::SimulationTable;
use std::fs;
use std::path::{Path, PathBuf};

const MANIFEST_FILE: &str = "manifest.json";
const TABLE_FILE: &str = "table.csv";

#[derive(Debug, Clone)]
pub struct RunStore {
    root_dir: PathBuf,
}

impl RunStore {
    /// Open a store, creating its root directory on first use.
    pub fn new(root_dir: PathBuf) -> ResultsResult<Self> {
        fs::create_dir_all(&root_dir)?;
        Ok(Self { root_dir })
    }

    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    fn entry(&self, run_id: &str, file: &str) -> PathBuf {
        self.root_dir.join(run_id).join(file)
    }

    /// Read one file of a stored run, mapping absence to `RunNotFound`.
    fn read_entry(&self, run_id: &str, file: &str) -> ResultsResult<String> {
        let path = self.entry(run_id, file);
        if !path.is_file() {
            return Err(ResultsError::RunNotFound {
                run_id: run_id.to_string(),
            });
        }
        Ok(fs::read_to_string(path)?)
    }

    pub fn has_run(&self, run_id: &str) -> bool {
        [MANIFEST_FILE, TABLE_FILE]
            .iter()
            .all(|file| self.entry(run_id, file).is_file())
    }

    /// Write the table first so a readable manifest implies a complete run.
    ///
    /// Manifests with NaN or infinite parameters are refused, since they
    /// could not be read back.
    pub fn save_run(&self, manifest: &RunManifest, table: &SimulationTable) -> ResultsResult<()> {
        if !manifest.is_persistable() {
            return Err(ResultsError::NotPersistable {
                run_id: manifest.run_id.clone(),
            });
        }
        fs::create_dir_all(self.root_dir.join(&manifest.run_id))?;
        write_csv_file(table, &self.entry(&manifest.run_id, TABLE_FILE))?;
        fs::write(
            self.entry(&manifest.run_id, MANIFEST_FILE),
            serde_json::to_string_pretty(manifest)?,
        )?;
        Ok(())
    }

    pub fn load_manifest(&self, run_id: &str) -> ResultsResult<RunManifest> {
        let text = self.read_entry(run_id, MANIFEST_FILE)?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn load_table(&self, run_id: &str) -> ResultsResult<SimulationTable> {
        parse_csv(&self.read_entry(run_id, TABLE_FILE)?)
    }

    /// All readable manifests, oldest first. Unreadable entries are skipped.
    pub fn list_runs(&self) -> ResultsResult<Vec<RunManifest>> {
        let mut runs: Vec<RunManifest> = fs::read_dir(&self.root_dir)?
            .filter_map(Result::ok)
            .filter(|entry| entry.path().is_dir())
            .filter_map(|entry| {
                let run_id = entry.file_name().to_string_lossy().into_owned();
                self.load_manifest(&run_id).ok()
            })
            .collect();

        runs.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
        Ok(runs)
    }

    /// Stored manifests for one scenario name.
    pub fn list_runs_for(&self, scenario_name: &str) -> ResultsResult<Vec<RunManifest>> {
        let mut runs = self.list_runs()?;
        runs.retain(|m| m.scenario_name == scenario_name);
        Ok(runs)
    }

    /// Remove a run; removing an absent run is not an error.
    pub fn delete_run(&self, run_id: &str) -> ResultsResult<()> {
        match fs::remove_dir_all(self.root_dir.join(run_id)) {
            Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}
