//! Deterministic analytics behind the platform's "AI" surface:
//! statistical emissions forecasting and rule-based reduction
//! recommendations.
//!
//! Natural-language query handling is deliberately absent — it is a thin
//! call to an external model service and out of scope here. What this crate
//! keeps is the numeric fallback path the platform relies on regardless of
//! any model availability.

pub mod forecast;
pub mod recommend;

pub use forecast::{forecast_emissions, EmissionForecast, ScopeForecast};
pub use recommend::{recommend_initiatives, Recommendation};
