use serde::{Deserialize, Serialize};

use model::base_types::{Rank, Score, Status};

use crate::objectives::Objectives;
use crate::InductionPlan;

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct JsonRow {
    rank: usize,
    id: u16,
    code: String,
    status: Status,
    score: Score,
    objectives: JsonObjectives,
    #[serde(skip_serializing_if = "Option::is_none")]
    manual_rank: Option<Rank>,
    #[serde(skip_serializing_if = "Option::is_none")]
    override_status: Option<Status>,
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct JsonObjectives {
    readiness: Score,
    reliability: Score,
    cost: Score,
    branding: Score,
    shunting: Score,
}

pub fn write_plan_to_json(plan: &InductionPlan, path: &str) -> Result<(), std::io::Error> {
    let file = std::fs::File::create(path)?;
    serde_json::to_writer_pretty(file, &plan_to_json(plan))?;
    Ok(())
}

/// The ranked induction list in wire form, one record per row in rank order.
pub fn plan_to_json(plan: &InductionPlan) -> serde_json::Value {
    let rows: Vec<JsonRow> = plan
        .rows()
        .enumerate()
        .map(|(position, row)| {
            let objectives = Objectives::of(row.trainset());
            JsonRow {
                rank: position + 1,
                id: row.idx().0,
                code: row.trainset().code().to_string(),
                status: row.status(),
                score: row.score(),
                objectives: JsonObjectives {
                    readiness: objectives.readiness,
                    reliability: objectives.reliability,
                    cost: objectives.cost,
                    branding: objectives.branding,
                    shunting: objectives.shunting,
                },
                manual_rank: row.manual_rank(),
                override_status: row.override_status(),
            }
        })
        .collect();
    serde_json::to_value(rows).expect("induction plan is always serialisable")
}
