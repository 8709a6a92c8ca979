use derive_more::Display;
use derive_more::From;
use serde::{Deserialize, Serialize};

pub type Idx = u16;

#[derive(Display, From, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TrainsetIdx(pub Idx);

pub type JobCount = u32;
pub type BayIndex = u32;
pub type BrandingPriority = u32; // 0-100
pub type Kilometers = f64;
pub type Score = f64;
pub type Rank = u32; // manual rank, 1-based

/// Operational status of a trainset for the night's induction list.
///
/// IBL ("inspection bay line") means withdrawn to maintenance.
#[derive(Serialize, Deserialize, Display, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Revenue,
    Standby,
    #[serde(rename = "IBL")]
    #[display(fmt = "IBL")]
    Ibl,
}
