pub mod base_types;
pub mod config;
pub mod fleet;
pub mod json_serialisation;
pub mod trainsets;
pub mod weights;
