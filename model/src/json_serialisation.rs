use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::base_types::{Status, TrainsetIdx};
use crate::fleet::Fleet;
use crate::trainsets::Trainset;


type Integer = u32;

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct JsonTrainset {
    id: u16,
    code: String,
    #[serde(rename = "fitnessOK")]
    fitness_ok: bool,
    #[serde(rename = "telecomOK")]
    telecom_ok: bool,
    #[serde(rename = "signallingOK")]
    signalling_ok: bool,
    maximo_open_jobs: Integer,
    branding_priority: Integer,
    mileage_km: f64,
    cleaning_ready: bool,
    bay_index: Integer,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    override_status: Option<Status>,
}

#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("fleet snapshot does not match the expected schema: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("fleet snapshot contains duplicate trainset id {0}")]
    DuplicateId(TrainsetIdx),
}

/// Reads a fleet snapshot (the single persisted JSON array of trainsets plus
/// their override statuses). A malformed snapshot is an error for the caller
/// to recover from, never a panic.
pub fn load_fleet_snapshot_from_json(input: serde_json::Value) -> Result<Fleet, SnapshotError> {
    let records: Vec<JsonTrainset> = serde_json::from_value(input)?;

    let mut seen: HashSet<TrainsetIdx> = HashSet::new();
    let mut trainsets = Vec::with_capacity(records.len());
    let mut overrides: HashMap<TrainsetIdx, Status> = HashMap::new();
    for record in records {
        let idx = TrainsetIdx(record.id);
        if !seen.insert(idx) {
            return Err(SnapshotError::DuplicateId(idx));
        }
        if let Some(status) = record.override_status {
            overrides.insert(idx, status);
        }
        trainsets.push(Trainset::new(
            idx,
            record.code,
            record.fitness_ok,
            record.telecom_ok,
            record.signalling_ok,
            record.maximo_open_jobs,
            record.branding_priority,
            record.mileage_km,
            record.cleaning_ready,
            record.bay_index,
        ));
    }
    Ok(Fleet::new(trainsets, overrides))
}

/// Writes a fleet to its snapshot wire form. Manual ranks and computed
/// scores/statuses are deliberately not part of the snapshot.
pub fn fleet_snapshot_to_json(fleet: &Fleet) -> serde_json::Value {
    let records: Vec<JsonTrainset> = fleet
        .iter()
        .map(|idx| {
            let trainset = fleet.get(idx).unwrap();
            JsonTrainset {
                id: idx.0,
                code: trainset.code().to_string(),
                fitness_ok: trainset.fitness_ok(),
                telecom_ok: trainset.telecom_ok(),
                signalling_ok: trainset.signalling_ok(),
                maximo_open_jobs: trainset.maximo_open_jobs(),
                branding_priority: trainset.branding_priority(),
                mileage_km: trainset.mileage_km(),
                cleaning_ready: trainset.cleaning_ready(),
                bay_index: trainset.bay_index(),
                override_status: fleet.override_status(idx),
            }
        })
        .collect();
    serde_json::to_value(records).expect("fleet snapshot is always serialisable")
}
