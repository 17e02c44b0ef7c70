//! Carbon reduction targets, initiatives and their financial analysis.

pub mod financial;
pub mod initiative;
pub mod target;

pub use financial::{financial_impact, FinancialImpact};
pub use initiative::{InitiativeStatus, ReductionInitiative};
pub use target::{progress_to_target, CarbonTarget, TargetProgress, TargetStatus};
