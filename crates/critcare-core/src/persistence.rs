//! Save/Load functionality for persisting simulation state
//!
//! Snapshots are plain JSON so exported sessions can be read and edited by
//! hand. A [`SimulationLibrary`] keeps several named snapshots in one file.

use std::collections::BTreeMap;
use std::io::{Read, Write};

use chrono::{DateTime, Utc};
use log::warn;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use critcare_logic::patient::PatientState;

use crate::intervention::Intervention;

/// Version number for the snapshot format (increment when format changes)
pub const SNAPSHOT_VERSION: u32 = 1;

fn current_version() -> u32 {
    SNAPSHOT_VERSION
}

/// Error type for persistence operations
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("snapshot version mismatch: expected {expected}, found {found}")]
    VersionMismatch { expected: u32, found: u32 },
    #[error("simulation name must not be empty")]
    EmptyName,
    #[error("no saved simulation with id {0}")]
    NotFound(String),
}

/// Everything needed to resume a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationSnapshot {
    /// Missing in hand-written files; read as the current version.
    #[serde(default = "current_version")]
    pub version: u32,
    pub patient_state: PatientState,
    #[serde(default)]
    pub interventions: Vec<Intervention>,
    /// Simulated seconds.
    #[serde(default)]
    pub time_elapsed: f64,
    pub exported_at: DateTime<Utc>,
}

impl SimulationSnapshot {
    /// Write pretty-printed JSON.
    pub fn export_json<W: Write>(&self, writer: W) -> Result<(), PersistError> {
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Read a snapshot, rejecting versions newer than this build understands.
    pub fn import_json<R: Read>(reader: R) -> Result<Self, PersistError> {
        let snapshot: Self = serde_json::from_reader(reader)?;
        check_version(snapshot.version)?;
        Ok(snapshot)
    }
}

fn check_version(found: u32) -> Result<(), PersistError> {
    if found > SNAPSHOT_VERSION {
        return Err(PersistError::VersionMismatch {
            expected: SNAPSHOT_VERSION,
            found,
        });
    }
    if found < SNAPSHOT_VERSION {
        warn!(
            "Reading snapshot version {} with version {} reader",
            found, SNAPSHOT_VERSION
        );
    }
    Ok(())
}

/// A named save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedSimulation {
    pub id: String,
    pub name: String,
    pub snapshot: SimulationSnapshot,
}

/// Listing entry for a save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedSummary {
    pub id: String,
    pub name: String,
    pub timestamp: DateTime<Utc>,
}

/// Named saves keyed by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationLibrary {
    #[serde(default = "current_version")]
    version: u32,
    #[serde(default)]
    simulations: BTreeMap<String, SavedSimulation>,
}

impl Default for SimulationLibrary {
    fn default() -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            simulations: BTreeMap::new(),
        }
    }
}

impl SimulationLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a snapshot under `name` and return its new id.
    ///
    /// The id is `sim-<export millis>`, suffixed when that is already taken.
    pub fn save(
        &mut self,
        name: &str,
        snapshot: SimulationSnapshot,
    ) -> Result<String, PersistError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(PersistError::EmptyName);
        }

        let base = format!("sim-{}", snapshot.exported_at.timestamp_millis());
        let mut id = base.clone();
        let mut n = 1;
        while self.simulations.contains_key(&id) {
            n += 1;
            id = format!("{}-{}", base, n);
        }

        self.simulations.insert(
            id.clone(),
            SavedSimulation {
                id: id.clone(),
                name: name.to_string(),
                snapshot,
            },
        );
        Ok(id)
    }

    /// Replace the snapshot of an existing save, keeping its name.
    pub fn overwrite(
        &mut self,
        id: &str,
        snapshot: SimulationSnapshot,
    ) -> Result<(), PersistError> {
        let saved = self
            .simulations
            .get_mut(id)
            .ok_or_else(|| PersistError::NotFound(id.to_string()))?;
        saved.snapshot = snapshot;
        Ok(())
    }

    pub fn load(&self, id: &str) -> Result<&SavedSimulation, PersistError> {
        self.simulations
            .get(id)
            .ok_or_else(|| PersistError::NotFound(id.to_string()))
    }

    /// Summaries, oldest first.
    pub fn list(&self) -> Vec<SavedSummary> {
        let mut out: Vec<SavedSummary> = self
            .simulations
            .values()
            .map(|s| SavedSummary {
                id: s.id.clone(),
                name: s.name.clone(),
                timestamp: s.snapshot.exported_at,
            })
            .collect();
        out.sort_by(|a, b| a.timestamp.cmp(&b.timestamp).then_with(|| a.id.cmp(&b.id)));
        out
    }

    pub fn delete(&mut self, id: &str) -> Result<SavedSimulation, PersistError> {
        self.simulations
            .remove(id)
            .ok_or_else(|| PersistError::NotFound(id.to_string()))
    }

    pub fn clear(&mut self) {
        self.simulations.clear();
    }

    pub fn len(&self) -> usize {
        self.simulations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.simulations.is_empty()
    }

    pub fn write_json<W: Write>(&self, writer: W) -> Result<(), PersistError> {
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    pub fn read_json<R: Read>(reader: R) -> Result<Self, PersistError> {
        let library: Self = serde_json::from_reader(reader)?;
        check_version(library.version)?;
        for saved in library.simulations.values() {
            check_version(saved.snapshot.version)?;
        }
        Ok(library)
    }
}
