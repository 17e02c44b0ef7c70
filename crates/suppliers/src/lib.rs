//! Supply-chain domain: suppliers, their reported emissions, chain-wide
//! reduction targets and the visibility dashboard.

pub mod chain;
pub mod dashboard;
pub mod supplier;

pub use chain::{
    FlowDirection, SupplyChainEmission, SupplyChainTarget, VerificationLevel,
};
pub use dashboard::{supply_chain_dashboard, ScoreDistribution, SupplierSummary, SupplyChainDashboard};
pub use supplier::{PartnershipLevel, Supplier, VerificationStatus};
