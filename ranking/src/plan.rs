pub(crate) mod crowd;

use std::cmp::Ordering;
use std::sync::Arc;

use im::HashMap;
use im::Vector;
use itertools::Itertools;

use model::base_types::{Rank, Status, TrainsetIdx};
use model::config::Config;
use model::fleet::Fleet;
use model::weights::Weights;

use crate::objectives::composite_score;
use crate::row::Row;

/// The ranked, status-assigned induction list for one fleet snapshot under
/// one weight vector.
///
/// A plan is an immutable object. Every modification (manual rank, override
/// status, weight change, fleet change, crowd scenario) returns a fresh plan
/// that was re-ranked from scratch over the full fleet; a partially updated
/// plan is never observable.
#[derive(Clone)]
pub struct InductionPlan {
    fleet: Fleet,

    // session-local; never persisted with the fleet snapshot
    manual_ranks: HashMap<TrainsetIdx, Rank>,

    weights: Weights,
    config: Arc<Config>,

    // derived, kept consistent with the fields above at all times
    rows: Vector<Row>,
}

impl InductionPlan {
    pub fn rank(fleet: Fleet, weights: Weights, config: Arc<Config>) -> InductionPlan {
        InductionPlan::build(fleet, HashMap::new(), weights, config)
    }

    /// The full ranking pass: score, stable-sort, assign positional status,
    /// apply overrides.
    fn build(
        fleet: Fleet,
        manual_ranks: HashMap<TrainsetIdx, Rank>,
        weights: Weights,
        config: Arc<Config>,
    ) -> InductionPlan {
        let rows: Vector<Row> = fleet
            .iter()
            .map(|idx| {
                let trainset = fleet.get(idx).unwrap();
                let (score, _) = composite_score(trainset, &weights);
                (
                    trainset.clone(),
                    score,
                    manual_ranks.get(&idx).copied(),
                    fleet.override_status(idx),
                )
            })
            // manually ranked rows first (ascending); everything else by
            // score descending
            .sorted_by(|a, b| {
                let rank_a = a.2.unwrap_or(Rank::MAX);
                let rank_b = b.2.unwrap_or(Rank::MAX);
                rank_a
                    .cmp(&rank_b)
                    .then_with(|| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal))
            })
            .enumerate()
            .map(|(position, (trainset, score, manual_rank, override_status))| {
                let computed = if position < config.revenue_quota {
                    Status::Revenue
                } else if position < config.standby_cutoff {
                    Status::Standby
                } else {
                    Status::Ibl
                };
                // an override replaces the computed status but never moves the row
                let status = override_status.unwrap_or(computed);
                Row::new(trainset, score, status, manual_rank, override_status)
            })
            .collect();
        InductionPlan {
            fleet,
            manual_ranks,
            weights,
            config,
            rows,
        }
    }

    fn rebuild(&self, fleet: Fleet, manual_ranks: HashMap<TrainsetIdx, Rank>) -> InductionPlan {
        InductionPlan::build(fleet, manual_ranks, self.weights, self.config.clone())
    }

    pub fn rows(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter()
    }

    pub fn size(&self) -> usize {
        self.rows.len()
    }

    pub fn fleet(&self) -> &Fleet {
        &self.fleet
    }

    pub fn weights(&self) -> Weights {
        self.weights
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn get_row(&self, idx: TrainsetIdx) -> Option<&Row> {
        self.rows.iter().find(|row| row.idx() == idx)
    }

    /// 1-based position in the ranked order.
    pub fn rank_of(&self, idx: TrainsetIdx) -> Option<usize> {
        self.rows
            .iter()
            .position(|row| row.idx() == idx)
            .map(|position| position + 1)
    }

    pub fn number_with_status(&self, status: Status) -> usize {
        self.rows.iter().filter(|row| row.status() == status).count()
    }

    /// Sets or clears the manual rank of one trainset and re-ranks.
    ///
    /// Range validation is the caller's concern; an absent rank reverts the
    /// row to automatic score-based ordering.
    pub fn set_manual_rank(&self, idx: TrainsetIdx, rank: Option<Rank>) -> InductionPlan {
        let mut manual_ranks = self.manual_ranks.clone();
        match rank {
            Some(rank) => {
                manual_ranks.insert(idx, rank);
            }
            None => {
                manual_ranks.remove(&idx);
            }
        }
        self.rebuild(self.fleet.clone(), manual_ranks)
    }

    /// Sets or clears the override status of one trainset and re-ranks.
    pub fn set_override_status(&self, idx: TrainsetIdx, status: Option<Status>) -> InductionPlan {
        self.rebuild(
            self.fleet.set_override_status(idx, status),
            self.manual_ranks.clone(),
        )
    }

    /// Re-ranks under new weights, keeping manual ranks and overrides.
    pub fn with_weights(&self, weights: Weights) -> InductionPlan {
        InductionPlan::build(
            self.fleet.clone(),
            self.manual_ranks.clone(),
            weights,
            self.config.clone(),
        )
    }

    /// Re-ranks over a new fleet snapshot (e.g. after an accepted objective
    /// change), keeping the session's manual ranks.
    pub fn with_fleet(&self, fleet: Fleet) -> InductionPlan {
        self.rebuild(fleet, self.manual_ranks.clone())
    }
}
