//! File-per-schedule JSON store.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use automail_core::AutoMailSchedule;
use automail_rules::normalize_schedule;

use crate::{Result, ScheduleStore, StoreError};

/// Outcome of loading a single schedule file during a directory scan.
#[derive(Debug)]
pub enum LoadOutcome {
    Loaded { path: PathBuf, id: String },
    Skipped { path: PathBuf, reason: String },
    Failed { path: PathBuf, error: String },
}

/// Filesystem-backed schedule store.
///
/// One `<id>.json` file per schedule under the data directory, written
/// atomically (`.tmp` then rename), mirrored in memory behind an `RwLock`.
/// Concurrent writes to the same id are last-writer-wins.
pub struct JsonScheduleStore {
    dir: PathBuf,
    schedules: Arc<RwLock<HashMap<String, AutoMailSchedule>>>,
}

impl JsonScheduleStore {
    /// Create a store over the given directory, creating it if missing.
    pub fn new(dir: PathBuf) -> Self {
        if !dir.exists() {
            if let Err(e) = fs::create_dir_all(&dir) {
                warn!(path = %dir.display(), error = %e, "failed to create schedules directory");
            }
        }
        Self {
            dir,
            schedules: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Scan the data directory and load every schedule file into memory.
    ///
    /// Dotfiles (including leftover `.tmp` files) and non-JSON files are
    /// skipped. Parse failures are reported per file and do not abort the
    /// scan.
    pub fn load_all(&self) -> Result<Vec<LoadOutcome>> {
        let mut outcomes = Vec::new();

        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.is_dir() {
                continue;
            }

            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                if name.starts_with('.') {
                    outcomes.push(LoadOutcome::Skipped {
                        path,
                        reason: "dotfile".to_string(),
                    });
                    continue;
                }
            }

            let is_json = path
                .extension()
                .and_then(|e| e.to_str())
                .map(|e| e == "json")
                .unwrap_or(false);
            if !is_json {
                outcomes.push(LoadOutcome::Skipped {
                    path,
                    reason: "not a JSON file".to_string(),
                });
                continue;
            }

            match self.load_file(&path) {
                Ok(schedule) => {
                    // load_file guarantees the id is present
                    let id = schedule.id.clone().unwrap_or_default();
                    info!(schedule_id = %id, path = %path.display(), "loaded schedule");
                    self.schedules
                        .write()
                        .expect("schedules lock poisoned")
                        .insert(id.clone(), schedule);
                    outcomes.push(LoadOutcome::Loaded { path, id });
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "failed to load schedule file");
                    outcomes.push(LoadOutcome::Failed {
                        path,
                        error: e.to_string(),
                    });
                }
            }
        }

        Ok(outcomes)
    }

    /// Parse a single JSON file into a schedule; the id must be present.
    fn load_file(&self, path: &Path) -> Result<AutoMailSchedule> {
        let contents = fs::read_to_string(path)?;
        let schedule: AutoMailSchedule = serde_json::from_str(&contents)?;
        match &schedule.id {
            Some(id) if !id.is_empty() => Ok(schedule),
            _ => Err(StoreError::Storage(format!(
                "schedule file {} has no id",
                path.display()
            ))),
        }
    }

    /// Atomically write a schedule file (`.tmp` first, then rename).
    fn write_file(&self, id: &str, schedule: &AutoMailSchedule) -> Result<()> {
        let final_path = self.dir.join(format!("{}.json", id));
        let tmp_path = self.dir.join(format!(".{}.tmp", id));

        let json = serde_json::to_string_pretty(schedule)?;
        fs::write(&tmp_path, json)?;
        fs::rename(&tmp_path, &final_path)?;
        Ok(())
    }

    /// Re-run the normalizer on the record's draft projection.
    ///
    /// Callers are supposed to persist normalizer output only; this catches
    /// hand-built or tampered records before they reach disk.
    fn revalidate(schedule: &AutoMailSchedule) -> Result<()> {
        normalize_schedule(&schedule.to_draft())?;
        Ok(())
    }
}

impl ScheduleStore for JsonScheduleStore {
    fn list(&self) -> Result<Vec<AutoMailSchedule>> {
        let guard = self.schedules.read().expect("schedules lock poisoned");
        Ok(guard.values().cloned().collect())
    }

    fn get(&self, id: &str) -> Result<AutoMailSchedule> {
        let guard = self.schedules.read().expect("schedules lock poisoned");
        guard
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    fn upsert(&self, mut schedule: AutoMailSchedule) -> Result<AutoMailSchedule> {
        Self::revalidate(&schedule)?;

        let id = schedule
            .id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        let now = Utc::now();

        let mut guard = self.schedules.write().expect("schedules lock poisoned");
        schedule.id = Some(id.clone());
        schedule.created_at = guard
            .get(&id)
            .and_then(|existing| existing.created_at)
            .or(Some(now));
        schedule.updated_at = Some(now);

        self.write_file(&id, &schedule)?;
        guard.insert(id.clone(), schedule.clone());
        info!(schedule_id = %id, "persisted schedule");
        Ok(schedule)
    }

    fn update(&self, id: &str, mut schedule: AutoMailSchedule) -> Result<AutoMailSchedule> {
        Self::revalidate(&schedule)?;

        let mut guard = self.schedules.write().expect("schedules lock poisoned");
        let existing = guard
            .get(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        schedule.id = Some(id.to_string());
        schedule.created_at = existing.created_at;
        schedule.updated_at = Some(Utc::now());

        self.write_file(id, &schedule)?;
        guard.insert(id.to_string(), schedule.clone());
        info!(schedule_id = %id, "replaced schedule");
        Ok(schedule)
    }

    fn delete(&self, id: &str) -> Result<()> {
        let path = self.dir.join(format!("{}.json", id));
        if !path.exists() {
            return Err(StoreError::NotFound(id.to_string()));
        }
        fs::remove_file(&path)?;
        self.schedules
            .write()
            .expect("schedules lock poisoned")
            .remove(id);
        info!(schedule_id = %id, "deleted schedule");
        Ok(())
    }
}
