pub mod json_serialisation;
pub mod objectives;
mod plan;
mod row;
#[cfg(test)]
mod test_utilities;

pub use plan::crowd::CrowdLevel;
pub use plan::InductionPlan;
pub use row::Row;
