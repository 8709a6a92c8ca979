use std::collections::HashMap;
use std::fmt;

use model::base_types::{Status, TrainsetIdx};

use super::InductionPlan;

/// Named demand level for the crowd what-if scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrowdLevel {
    VeryLow,
    Low,
    Normal,
    High,
    VeryHigh,
}

impl CrowdLevel {
    /// Fraction of the currently active (Revenue + Standby) rows that should
    /// run revenue service at this demand level.
    pub fn revenue_fraction(self) -> f64 {
        match self {
            CrowdLevel::VeryLow => 0.18,
            CrowdLevel::Low => 0.36,
            CrowdLevel::Normal => 0.60,
            CrowdLevel::High => 0.80,
            CrowdLevel::VeryHigh => 1.00,
        }
    }

    /// Parses the UI token. Unknown tokens fall back to `Normal`.
    pub fn from_token(token: &str) -> CrowdLevel {
        match token {
            "very-low" => CrowdLevel::VeryLow,
            "low" => CrowdLevel::Low,
            "normal" => CrowdLevel::Normal,
            "high" => CrowdLevel::High,
            "very-high" => CrowdLevel::VeryHigh,
            _ => CrowdLevel::Normal,
        }
    }
}

impl fmt::Display for CrowdLevel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let token = match self {
            CrowdLevel::VeryLow => "very-low",
            CrowdLevel::Low => "low",
            CrowdLevel::Normal => "normal",
            CrowdLevel::High => "high",
            CrowdLevel::VeryHigh => "very-high",
        };
        write!(f, "{}", token)
    }
}

impl InductionPlan {
    /// Redistributes the override layer so that the active subset matches
    /// the demand level, holding the current rank order fixed.
    ///
    /// Walking the ranked order, the first `round(active * fraction)` active
    /// rows get override Revenue, the next `active - desired` get override
    /// Standby, and every other row's override is cleared (reverting it to
    /// its computed status). Manual ranks and trainset fields are untouched.
    /// An empty active subset is a no-op.
    pub fn apply_crowd_scenario(&self, level: CrowdLevel) -> InductionPlan {
        let active = self
            .rows
            .iter()
            .filter(|row| matches!(row.status(), Status::Revenue | Status::Standby))
            .count();
        if active == 0 {
            return self.clone();
        }
        let desired_revenue = (active as f64 * level.revenue_fraction()).round() as usize;

        let mut overrides: HashMap<TrainsetIdx, Status> = HashMap::new();
        let mut revenue_assigned = 0;
        let mut standby_assigned = 0;
        for row in self.rows.iter() {
            match row.status() {
                Status::Revenue | Status::Standby => {
                    if revenue_assigned < desired_revenue {
                        overrides.insert(row.idx(), Status::Revenue);
                        revenue_assigned += 1;
                    } else if standby_assigned < active - desired_revenue {
                        overrides.insert(row.idx(), Status::Standby);
                        standby_assigned += 1;
                    }
                }
                // computed status stays IBL once the override is cleared
                Status::Ibl => {}
            }
        }
        self.with_fleet(self.fleet.with_overrides(overrides))
    }
}
