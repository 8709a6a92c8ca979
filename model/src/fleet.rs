use std::collections::HashMap;

use rand::Rng;

use crate::base_types::{Status, TrainsetIdx};
use crate::trainsets::{ObjectiveChange, Trainset};

const CODE_PREFIX: &str = "KMRL";

/// Trainset id whose fitness sensor is stuck in the failed state in the
/// randomized fixture.
const SENSOR_FAILURE_ID: TrainsetIdx = TrainsetIdx(7);

/// The durable fleet snapshot: all trainsets keyed by id plus the
/// override-status layer.
///
/// A fleet is thought to be immutable. Whenever a modification is applied, a
/// copy of the fleet is created; the previous snapshot stays valid.
#[derive(Debug, Clone, PartialEq)]
pub struct Fleet {
    trainsets: HashMap<TrainsetIdx, Trainset>,
    ids_sorted: Vec<TrainsetIdx>,
    overrides: HashMap<TrainsetIdx, Status>,
}

/// Result of an objective-change request.
///
/// `Rejected` is a business-rule outcome (the proposed value was not
/// strictly greater than the current one), not a fault.
#[derive(Debug, Clone, PartialEq)]
pub enum ObjectiveChangeOutcome {
    Applied(Fleet),
    Rejected,
    UnknownTrainset,
}

impl Fleet {
    pub fn new(trainsets: Vec<Trainset>, overrides: HashMap<TrainsetIdx, Status>) -> Fleet {
        let mut ids_sorted: Vec<TrainsetIdx> = trainsets.iter().map(|ts| ts.idx()).collect();
        ids_sorted.sort();
        Fleet {
            trainsets: trainsets.into_iter().map(|ts| (ts.idx(), ts)).collect(),
            ids_sorted,
            overrides,
        }
    }

    /// The deterministic fixture fleet: ids `1..=count`, attributes derived
    /// from the index by fixed modular patterns (e.g. every 7th trainset
    /// lacks fitness clearance).
    pub fn standard(count: usize) -> Fleet {
        let trainsets = (0..count)
            .map(|i| {
                Trainset::new(
                    TrainsetIdx((i + 1) as u16),
                    format!("{}-{:02}", CODE_PREFIX, i + 1),
                    i % 7 != 0,
                    i % 5 != 0,
                    i % 11 != 0,
                    ((i * 3) % 5) as u32,
                    (30 + (i * 17) % 70) as u32,
                    (150 + (i * 13) % 160) as f64,
                    i % 4 != 0,
                    (i % 12) as u32,
                )
            })
            .collect();
        Fleet::new(trainsets, HashMap::new())
    }

    /// The live-telemetry fixture variant: independent draws within the
    /// depot's observed ranges, with one trainset forced into a persistent
    /// fitness-sensor failure.
    pub fn randomized<R: Rng>(count: usize, rng: &mut R) -> Fleet {
        let trainsets = (0..count)
            .map(|i| {
                let idx = TrainsetIdx((i + 1) as u16);
                let fitness_ok = idx != SENSOR_FAILURE_ID && rng.gen_bool(0.9);
                Trainset::new(
                    idx,
                    format!("{}-{:02}", CODE_PREFIX, i + 1),
                    fitness_ok,
                    rng.gen_bool(0.9),
                    rng.gen_bool(0.95),
                    rng.gen_range(0..4),
                    rng.gen_range(30..100),
                    rng.gen_range(150.0..310.0),
                    rng.gen_bool(0.8),
                    rng.gen_range(0..12),
                )
            })
            .collect();
        Fleet::new(trainsets, HashMap::new())
    }

    pub fn size(&self) -> usize {
        self.ids_sorted.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = TrainsetIdx> + '_ {
        self.ids_sorted.iter().copied()
    }

    pub fn get(&self, idx: TrainsetIdx) -> Option<&Trainset> {
        self.trainsets.get(&idx)
    }

    pub fn override_status(&self, idx: TrainsetIdx) -> Option<Status> {
        self.overrides.get(&idx).copied()
    }

    /// Sets or clears the override status of one trainset, returning the
    /// modified copy.
    pub fn set_override_status(&self, idx: TrainsetIdx, status: Option<Status>) -> Fleet {
        let mut fleet = self.clone();
        match status {
            Some(status) => {
                fleet.overrides.insert(idx, status);
            }
            None => {
                fleet.overrides.remove(&idx);
            }
        }
        fleet
    }

    /// Replaces the whole override layer (used by the crowd simulator).
    pub fn with_overrides(&self, overrides: HashMap<TrainsetIdx, Status>) -> Fleet {
        let mut fleet = self.clone();
        fleet.overrides = overrides;
        fleet
    }

    /// Applies an objective-change request under the strictly-greater rule.
    pub fn apply_objective_change(
        &self,
        idx: TrainsetIdx,
        change: ObjectiveChange,
    ) -> ObjectiveChangeOutcome {
        let trainset = match self.get(idx) {
            Some(trainset) => trainset,
            None => return ObjectiveChangeOutcome::UnknownTrainset,
        };
        if !trainset.change_is_increase(change) {
            return ObjectiveChangeOutcome::Rejected;
        }
        let mut fleet = self.clone();
        fleet
            .trainsets
            .get_mut(&idx)
            .unwrap()
            .apply_change(change);
        ObjectiveChangeOutcome::Applied(fleet)
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::{Fleet, ObjectiveChangeOutcome, SENSOR_FAILURE_ID};
    use crate::base_types::{Status, TrainsetIdx};
    use crate::trainsets::ObjectiveChange;

    #[test]
    fn standard_fleet_has_stable_ids_and_codes() {
        let fleet = Fleet::standard(25);

        assert_eq!(fleet.size(), 25);
        let ids: Vec<_> = fleet.iter().collect();
        assert_eq!(ids.first(), Some(&TrainsetIdx(1)));
        assert_eq!(ids.last(), Some(&TrainsetIdx(25)));
        assert_eq!(fleet.get(TrainsetIdx(1)).unwrap().code(), "KMRL-01");
        assert_eq!(fleet.get(TrainsetIdx(25)).unwrap().code(), "KMRL-25");
    }

    #[test]
    fn standard_fleet_follows_modular_patterns() {
        let fleet = Fleet::standard(25);

        // every 7th trainset (0-based index) lacks fitness clearance
        assert!(!fleet.get(TrainsetIdx(1)).unwrap().fitness_ok());
        assert!(!fleet.get(TrainsetIdx(8)).unwrap().fitness_ok());
        assert!(fleet.get(TrainsetIdx(2)).unwrap().fitness_ok());
        // index 3 -> (3 * 3) % 5 = 4 open jobs
        assert_eq!(fleet.get(TrainsetIdx(4)).unwrap().maximo_open_jobs(), 4);
    }

    #[test]
    fn randomized_fleet_keeps_the_failed_sensor() {
        let mut rng = StdRng::seed_from_u64(42);

        let fleet = Fleet::randomized(25, &mut rng);

        assert_eq!(fleet.size(), 25);
        assert!(!fleet.get(SENSOR_FAILURE_ID).unwrap().fitness_ok());
    }

    #[test]
    fn objective_change_is_rejected_if_not_strictly_greater() {
        let fleet = Fleet::standard(25);
        let idx = TrainsetIdx(5); // index 4 -> (4 * 3) % 5 = 2 open jobs
        assert_eq!(fleet.get(idx).unwrap().maximo_open_jobs(), 2);

        let lowered = fleet.apply_objective_change(idx, ObjectiveChange::OpenJobs(1));
        let unchanged = fleet.apply_objective_change(idx, ObjectiveChange::OpenJobs(2));
        let raised = fleet.apply_objective_change(idx, ObjectiveChange::OpenJobs(3));

        assert_eq!(lowered, ObjectiveChangeOutcome::Rejected);
        assert_eq!(unchanged, ObjectiveChangeOutcome::Rejected);
        match raised {
            ObjectiveChangeOutcome::Applied(new_fleet) => {
                assert_eq!(new_fleet.get(idx).unwrap().maximo_open_jobs(), 3);
                // the original snapshot is untouched
                assert_eq!(fleet.get(idx).unwrap().maximo_open_jobs(), 2);
            }
            other => panic!("expected Applied, got {:?}", other),
        }
    }

    #[test]
    fn objective_change_to_unknown_trainset() {
        let fleet = Fleet::standard(3);

        let outcome = fleet.apply_objective_change(TrainsetIdx(99), ObjectiveChange::Cleaning(true));

        assert_eq!(outcome, ObjectiveChangeOutcome::UnknownTrainset);
    }

    #[test]
    fn override_layer_is_copy_on_write() {
        let fleet = Fleet::standard(5);

        let with_override = fleet.set_override_status(TrainsetIdx(2), Some(Status::Ibl));
        let cleared = with_override.set_override_status(TrainsetIdx(2), None);

        assert_eq!(fleet.override_status(TrainsetIdx(2)), None);
        assert_eq!(
            with_override.override_status(TrainsetIdx(2)),
            Some(Status::Ibl)
        );
        assert_eq!(cleared.override_status(TrainsetIdx(2)), None);
    }
}
