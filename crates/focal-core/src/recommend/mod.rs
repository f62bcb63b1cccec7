//! Context-driven focus/break duration recommendations.

mod context;
mod gate;

pub use context::{EnergyLevel, TaskType, TimeOfDay};
pub use gate::{recommend, Recommendation, RecommendationGate};
