pub mod store;

use std::sync::Arc;
use std::time as stdtime;

use gethostname::gethostname;
use rapid_time::{DateTime, Duration};
use serde::Deserialize;
use tokio::sync::broadcast;

use model::base_types::{Rank, Status, TrainsetIdx};
use model::config::Config;
use model::fleet::{Fleet, ObjectiveChangeOutcome};
use model::trainsets::ObjectiveChange;
use model::weights::Weights;
use ranking::json_serialisation::plan_to_json;
use ranking::{CrowdLevel, InductionPlan};

use store::SnapshotStore;

/// Event broadcast after every persisted snapshot write. Observers of the
/// same snapshot re-read and recompute on reception.
pub const FLEET_UPDATED: &str = "fleet-updated";

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct PlanRequest {
    #[serde(default)]
    pub weights: Option<Weights>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase", tag = "action")]
pub enum OverrideRequest {
    /// Sets or clears the manual rank. A missing, empty, or non-numeric rank
    /// value counts as "absent" and reverts the row to automatic ordering.
    #[serde(rename_all = "camelCase")]
    SetManualRank {
        id: u16,
        #[serde(default)]
        rank: Option<serde_json::Value>,
    },
    #[serde(rename_all = "camelCase")]
    SetOverrideStatus {
        id: u16,
        #[serde(default)]
        status: Option<Status>,
    },
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ObjectiveChangeRequest {
    pub id: u16,
    #[serde(flatten)]
    pub change: JsonObjectiveChange,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase", tag = "objective", content = "value")]
pub enum JsonObjectiveChange {
    Fitness(bool),
    Telecom(bool),
    Signalling(bool),
    Cleaning(bool),
    BrandingPriority(u32),
    OpenJobs(u32),
}

impl From<JsonObjectiveChange> for ObjectiveChange {
    fn from(change: JsonObjectiveChange) -> ObjectiveChange {
        match change {
            JsonObjectiveChange::Fitness(new) => ObjectiveChange::Fitness(new),
            JsonObjectiveChange::Telecom(new) => ObjectiveChange::Telecom(new),
            JsonObjectiveChange::Signalling(new) => ObjectiveChange::Signalling(new),
            JsonObjectiveChange::Cleaning(new) => ObjectiveChange::Cleaning(new),
            JsonObjectiveChange::BrandingPriority(new) => ObjectiveChange::BrandingPriority(new),
            JsonObjectiveChange::OpenJobs(new) => ObjectiveChange::OpenJobs(new),
        }
    }
}

#[derive(Deserialize, Debug)]
pub struct SimulateRequest {
    pub crowd: String,
}

/// The engine behind the HTTP surface: the current plan, the injected
/// snapshot store, and the fleet-updated broadcast.
///
/// Every mutation re-ranks the full fleet before the result is returned;
/// mutations that change the durable snapshot persist it and notify
/// observers. The surrounding router serialises access, so read-mutate-write
/// stays one unit.
pub struct Planner {
    plan: InductionPlan,
    store: Box<dyn SnapshotStore + Send>,
    fleet_updated: broadcast::Sender<&'static str>,
}

impl Planner {
    pub fn initialize(store: Box<dyn SnapshotStore + Send>, config: Config) -> Planner {
        let fleet = store.load().unwrap_or_else(|| {
            println!(
                "no usable fleet snapshot, starting from the standard fixture fleet ({} trainsets)",
                config.default_fleet_size
            );
            Fleet::standard(config.default_fleet_size)
        });
        let plan = InductionPlan::rank(fleet, Weights::default(), Arc::new(config));
        let (fleet_updated, _) = broadcast::channel(16);
        Planner {
            plan,
            store,
            fleet_updated,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<&'static str> {
        self.fleet_updated.subscribe()
    }

    pub fn current_plan(&self) -> &InductionPlan {
        &self.plan
    }

    /// Re-ranks under the requested weights (if any) and returns the plan.
    pub fn plan(&mut self, request: PlanRequest) -> serde_json::Value {
        let start_time = stdtime::Instant::now();
        if let Some(weights) = request.weights {
            self.plan = self.plan.with_weights(weights);
        }
        create_output_json(&self.plan, start_time.elapsed())
    }

    /// Applies a manual-rank or override-status mutation and re-ranks.
    ///
    /// Manual ranks are session-local, so only override-status changes touch
    /// the durable snapshot.
    pub fn apply_override(&mut self, request: OverrideRequest) -> serde_json::Value {
        let start_time = stdtime::Instant::now();
        match request {
            OverrideRequest::SetManualRank { id, rank } => {
                self.plan = self.plan.set_manual_rank(TrainsetIdx(id), lenient_rank(rank));
            }
            OverrideRequest::SetOverrideStatus { id, status } => {
                self.plan = self.plan.set_override_status(TrainsetIdx(id), status);
                self.persist_and_notify();
            }
        }
        create_output_json(&self.plan, start_time.elapsed())
    }

    /// Applies an objective-change request under the strictly-greater rule
    /// and reports the outcome alongside the (possibly re-ranked) plan.
    pub fn apply_objective_change(&mut self, request: ObjectiveChangeRequest) -> serde_json::Value {
        let start_time = stdtime::Instant::now();
        let outcome = self
            .plan
            .fleet()
            .apply_objective_change(TrainsetIdx(request.id), request.change.into());
        let applied = match outcome {
            ObjectiveChangeOutcome::Applied(fleet) => {
                self.plan = self.plan.with_fleet(fleet);
                self.persist_and_notify();
                true
            }
            ObjectiveChangeOutcome::Rejected | ObjectiveChangeOutcome::UnknownTrainset => false,
        };
        let mut output = create_output_json(&self.plan, start_time.elapsed());
        output["applied"] = serde_json::json!(applied);
        output
    }

    /// Runs the crowd what-if scenario, persists the resulting override
    /// layer and returns the redistributed plan.
    pub fn simulate_crowd(&mut self, request: SimulateRequest) -> serde_json::Value {
        let start_time = stdtime::Instant::now();
        let level = CrowdLevel::from_token(&request.crowd);
        self.plan = self.plan.apply_crowd_scenario(level);
        self.persist_and_notify();
        create_output_json(&self.plan, start_time.elapsed())
    }

    fn persist_and_notify(&mut self) {
        if let Err(error) = self.store.save(self.plan.fleet()) {
            eprintln!("failed to persist fleet snapshot: {}", error);
        } else {
            // a send without live receivers is fine
            let _ = self.fleet_updated.send(FLEET_UPDATED);
        }
    }
}

fn lenient_rank(value: Option<serde_json::Value>) -> Option<Rank> {
    match value? {
        serde_json::Value::Number(number) => number.as_u64().map(|n| n as Rank),
        serde_json::Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

pub fn create_output_json(plan: &InductionPlan, runtime: stdtime::Duration) -> serde_json::Value {
    let today = DateTime::new("1970-01-01T00:00:00")
        + Duration::from_seconds(
            stdtime::SystemTime::now()
                .duration_since(stdtime::UNIX_EPOCH)
                .unwrap()
                .as_secs(),
        );
    serde_json::json!({
        "info": {
            "runningTime": format!("{:0.2}sec", runtime.as_secs_f32()),
            "timestamp(UTC)": today.as_iso(),
            "hostname": gethostname().into_string().unwrap_or("unknown".to_string()),
        },
        "weights": serde_json::to_value(plan.weights().normalised()).unwrap(),
        "summary": {
            "revenue": plan.number_with_status(Status::Revenue),
            "standby": plan.number_with_status(Status::Standby),
            "ibl": plan.number_with_status(Status::Ibl),
        },
        "plan": plan_to_json(plan),
    })
}

#[cfg(test)]
mod tests {
    use model::base_types::{Status, TrainsetIdx};
    use model::config::Config;

    use crate::store::InMemorySnapshotStore;
    use crate::{
        JsonObjectiveChange, ObjectiveChangeRequest, OverrideRequest, PlanRequest, Planner,
        SimulateRequest,
    };

    fn planner() -> Planner {
        Planner::initialize(Box::new(InMemorySnapshotStore::new()), Config::default())
    }

    #[test]
    fn empty_store_falls_back_to_the_fixture_fleet() {
        let mut planner = planner();

        let output = planner.plan(PlanRequest { weights: None });

        assert_eq!(output["plan"].as_array().unwrap().len(), 25);
        assert_eq!(output["summary"]["revenue"], 17);
        assert_eq!(output["summary"]["standby"], 3);
        assert_eq!(output["summary"]["ibl"], 5);
    }

    #[test]
    fn override_status_is_persisted_and_broadcast() {
        let mut planner = planner();
        let mut fleet_updates = planner.subscribe();

        planner.apply_override(OverrideRequest::SetOverrideStatus {
            id: 3,
            status: Some(Status::Ibl),
        });

        assert_eq!(fleet_updates.try_recv().unwrap(), crate::FLEET_UPDATED);
        assert_eq!(
            planner
                .current_plan()
                .fleet()
                .override_status(TrainsetIdx(3)),
            Some(Status::Ibl)
        );
    }

    #[test]
    fn manual_rank_mutations_stay_session_local() {
        let mut planner = planner();
        let mut fleet_updates = planner.subscribe();

        let output = planner.apply_override(OverrideRequest::SetManualRank {
            id: 12,
            rank: Some(serde_json::json!(1)),
        });

        assert_eq!(output["plan"][0]["id"], 12);
        // nothing durable changed, so observers are not notified
        assert!(fleet_updates.try_recv().is_err());
    }

    #[test]
    fn non_numeric_manual_rank_reverts_to_automatic_ordering() {
        let mut planner = planner();
        planner.apply_override(OverrideRequest::SetManualRank {
            id: 12,
            rank: Some(serde_json::json!(1)),
        });

        let output = planner.apply_override(OverrideRequest::SetManualRank {
            id: 12,
            rank: Some(serde_json::json!("")),
        });

        assert_ne!(output["plan"][0]["id"], 12);
    }

    #[test]
    fn rejected_objective_change_reports_without_mutating() {
        let mut planner = planner();
        // trainset 2 starts with 3 open jobs
        let output = planner.apply_objective_change(ObjectiveChangeRequest {
            id: 2,
            change: JsonObjectiveChange::OpenJobs(1),
        });

        assert_eq!(output["applied"], false);
        assert_eq!(
            planner
                .current_plan()
                .fleet()
                .get(TrainsetIdx(2))
                .unwrap()
                .maximo_open_jobs(),
            3
        );
    }

    #[test]
    fn accepted_objective_change_is_persisted() {
        let mut planner = planner();
        let mut fleet_updates = planner.subscribe();

        let output = planner.apply_objective_change(ObjectiveChangeRequest {
            id: 2,
            change: JsonObjectiveChange::OpenJobs(5),
        });

        assert_eq!(output["applied"], true);
        assert!(fleet_updates.try_recv().is_ok());
        assert_eq!(
            planner
                .current_plan()
                .fleet()
                .get(TrainsetIdx(2))
                .unwrap()
                .maximo_open_jobs(),
            5
        );
    }

    #[test]
    fn crowd_simulation_persists_the_override_layer() {
        let mut planner = planner();
        let mut fleet_updates = planner.subscribe();

        let output = planner.simulate_crowd(SimulateRequest {
            crowd: "very-high".to_string(),
        });

        assert_eq!(output["summary"]["revenue"], 20);
        assert_eq!(output["summary"]["standby"], 0);
        assert_eq!(output["summary"]["ibl"], 5);
        assert!(fleet_updates.try_recv().is_ok());
    }

    #[test]
    fn restart_resumes_from_the_persisted_snapshot() {
        let mut planner = planner();
        planner.apply_override(OverrideRequest::SetOverrideStatus {
            id: 1,
            status: Some(Status::Revenue),
        });
        let Planner { store, .. } = planner;

        let resumed = Planner::initialize(store, Config::default());

        assert_eq!(
            resumed
                .current_plan()
                .fleet()
                .override_status(TrainsetIdx(1)),
            Some(Status::Revenue)
        );
    }
}
