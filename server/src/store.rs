use std::fs::File;
use std::path::PathBuf;

use model::fleet::Fleet;
use model::json_serialisation::{fleet_snapshot_to_json, load_fleet_snapshot_from_json};

/// The durable storage slot for the fleet snapshot.
///
/// `load` returns `None` both for a missing slot and for a corrupt one (a
/// corrupt snapshot is logged and discarded); the caller falls back to the
/// fixture fleet. Writers must treat read-mutate-write as one unit.
pub trait SnapshotStore {
    fn load(&self) -> Option<Fleet>;
    fn save(&mut self, fleet: &Fleet) -> Result<(), std::io::Error>;
}

/// A single named JSON file holding the snapshot array.
pub struct FileSnapshotStore {
    path: PathBuf,
}

impl FileSnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> FileSnapshotStore {
        FileSnapshotStore { path: path.into() }
    }
}

impl SnapshotStore for FileSnapshotStore {
    fn load(&self) -> Option<Fleet> {
        let raw = std::fs::read_to_string(&self.path).ok()?; // absent slot
        let value: serde_json::Value = match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(error) => {
                eprintln!(
                    "discarding corrupt fleet snapshot {}: {}",
                    self.path.display(),
                    error
                );
                return None;
            }
        };
        match load_fleet_snapshot_from_json(value) {
            Ok(fleet) => Some(fleet),
            Err(error) => {
                eprintln!(
                    "discarding corrupt fleet snapshot {}: {}",
                    self.path.display(),
                    error
                );
                None
            }
        }
    }

    fn save(&mut self, fleet: &Fleet) -> Result<(), std::io::Error> {
        let file = File::create(&self.path)?;
        serde_json::to_writer_pretty(file, &fleet_snapshot_to_json(fleet))?;
        Ok(())
    }
}

/// Keeps the snapshot in its wire form in memory; used by tests.
#[derive(Default)]
pub struct InMemorySnapshotStore {
    slot: Option<serde_json::Value>,
}

impl InMemorySnapshotStore {
    pub fn new() -> InMemorySnapshotStore {
        InMemorySnapshotStore { slot: None }
    }

    pub fn slot(&self) -> Option<&serde_json::Value> {
        self.slot.as_ref()
    }
}

impl SnapshotStore for InMemorySnapshotStore {
    fn load(&self) -> Option<Fleet> {
        let value = self.slot.clone()?;
        load_fleet_snapshot_from_json(value).ok()
    }

    fn save(&mut self, fleet: &Fleet) -> Result<(), std::io::Error> {
        self.slot = Some(fleet_snapshot_to_json(fleet));
        Ok(())
    }
}
