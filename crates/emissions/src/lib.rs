//! Emissions domain: sources, records, the emission-factor calculator and
//! reporting aggregations.
//!
//! Everything here is deterministic domain logic — no IO, no HTTP, no
//! storage. The API layer feeds tenant-scoped record sets in and renders
//! the results out.

pub mod calculator;
pub mod record;
pub mod source;
pub mod summary;

pub use calculator::{
    carbon_cost, electricity, fuel, industry_benchmark, office, reduction_value, travel,
    Calculation, CarbonCost, FuelKind, FuelUnit, GridRegion, IndustryBenchmark, OfficeUsage,
    ReductionValue, TravelMode, Trip, DEFAULT_CARBON_PRICE_USD_PER_TONNE,
};
pub use record::{ActivityData, EmissionRecord};
pub use source::{default_sources_for_industry, EmissionSource, SourceCategory};
pub use summary::{
    summarize, top_sources, trend, EmissionSummary, MonthlyEmissions, ScopeTotals, SourceTotal,
};
