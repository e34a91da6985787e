mod constants;
mod model;
mod options;
pub mod plan;
mod selection;
mod split;
mod stats;
mod types;
mod validate;

pub use constants::*;
pub use model::*;
pub use options::*;
pub use plan::{ImpositionPlan, SheetSidePlan, plan_booklet};
pub use split::*;
pub use stats::calculate_statistics;
pub use types::*;
pub use validate::*;
