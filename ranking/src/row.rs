use std::fmt;

use model::base_types::{Rank, Score, Status, TrainsetIdx};
use model::trainsets::Trainset;

/// One line of the ranked induction list: a trainset snapshot joined with
/// its composite score and assigned status.
///
/// Rows are ephemeral; they are rebuilt from the fleet on every ranking
/// pass. Only the manual rank and the override status carry over, and those
/// live in the plan and the fleet respectively.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    trainset: Trainset,
    score: Score,
    status: Status,
    manual_rank: Option<Rank>,
    override_status: Option<Status>,
}

impl Row {
    pub(crate) fn new(
        trainset: Trainset,
        score: Score,
        status: Status,
        manual_rank: Option<Rank>,
        override_status: Option<Status>,
    ) -> Row {
        Row {
            trainset,
            score,
            status,
            manual_rank,
            override_status,
        }
    }

    pub fn idx(&self) -> TrainsetIdx {
        self.trainset.idx()
    }

    pub fn trainset(&self) -> &Trainset {
        &self.trainset
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn manual_rank(&self) -> Option<Rank> {
        self.manual_rank
    }

    pub fn override_status(&self) -> Option<Status> {
        self.override_status
    }
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}({}, score {:.1})",
            self.trainset.code(),
            self.status,
            self.score
        )
    }
}
