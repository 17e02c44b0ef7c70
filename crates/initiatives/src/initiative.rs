//! Carbon reduction initiatives.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use climabill_core::{DomainError, DomainResult, InitiativeId, TenantId};

/// Delivery status of an initiative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum InitiativeStatus {
    #[default]
    Planned,
    InProgress,
    Completed,
}

/// A concrete decarbonization project with a cost/benefit profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReductionInitiative {
    pub id: InitiativeId,
    pub tenant_id: TenantId,
    pub name: String,
    pub description: String,
    pub implementation_cost_usd: f64,
    pub annual_savings_usd: f64,
    pub annual_co2e_reduction_kg: f64,
    /// Derived server-side from savings/cost; client-supplied figures are
    /// never trusted.
    pub roi_percentage: f64,
    pub implementation_date: DateTime<Utc>,
    pub status: InitiativeStatus,
    pub created_at: DateTime<Utc>,
}

impl ReductionInitiative {
    pub fn new(
        tenant_id: TenantId,
        name: &str,
        description: &str,
        implementation_cost_usd: f64,
        annual_savings_usd: f64,
        annual_co2e_reduction_kg: f64,
        implementation_date: DateTime<Utc>,
        status: InitiativeStatus,
        created_at: DateTime<Utc>,
    ) -> DomainResult<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::validation("initiative name cannot be empty"));
        }
        for (label, value) in [
            ("implementation cost", implementation_cost_usd),
            ("annual savings", annual_savings_usd),
            ("annual co2e reduction", annual_co2e_reduction_kg),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(DomainError::validation(format!(
                    "{label} must be non-negative"
                )));
            }
        }

        let roi_percentage = if implementation_cost_usd > 0.0 {
            annual_savings_usd / implementation_cost_usd * 100.0
        } else {
            0.0
        };

        Ok(Self {
            id: InitiativeId::new(),
            tenant_id,
            name: name.to_string(),
            description: description.trim().to_string(),
            implementation_cost_usd,
            annual_savings_usd,
            annual_co2e_reduction_kg,
            roi_percentage,
            implementation_date,
            status,
            created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roi_is_derived_not_supplied() {
        let init = ReductionInitiative::new(
            TenantId::new(),
            "LED retrofit",
            "Swap fluorescent tubes for LED",
            15_000.0,
            3_500.0,
            12_000.0,
            Utc::now(),
            InitiativeStatus::Planned,
            Utc::now(),
        )
        .unwrap();
        assert!((init.roi_percentage - 23.333333333333332).abs() < 1e-9);
    }

    #[test]
    fn zero_cost_means_zero_roi_not_infinity() {
        let init = ReductionInitiative::new(
            TenantId::new(),
            "Policy change",
            "",
            0.0,
            5_000.0,
            1_000.0,
            Utc::now(),
            InitiativeStatus::Completed,
            Utc::now(),
        )
        .unwrap();
        assert_eq!(init.roi_percentage, 0.0);
    }

    #[test]
    fn negative_figures_rejected() {
        let err = ReductionInitiative::new(
            TenantId::new(),
            "Bad",
            "",
            -1.0,
            0.0,
            0.0,
            Utc::now(),
            InitiativeStatus::Planned,
            Utc::now(),
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }
}
