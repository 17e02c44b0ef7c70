//! Carbon reduction targets and progress evaluation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use climabill_core::{DomainError, DomainResult, EmissionScope, TargetId, TenantId};

/// Lifecycle status of a target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TargetStatus {
    #[default]
    Active,
    Achieved,
    Revised,
}

/// A commitment to reduce emissions by a percentage of a baseline year's
/// footprint by a target year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarbonTarget {
    pub id: TargetId,
    pub tenant_id: TenantId,
    pub name: String,
    pub baseline_year: i32,
    pub target_year: i32,
    pub baseline_emissions_kg: f64,
    pub reduction_percentage: f64,
    pub scope_coverage: Vec<EmissionScope>,
    pub status: TargetStatus,
    pub created_at: DateTime<Utc>,
}

impl CarbonTarget {
    pub fn new(
        tenant_id: TenantId,
        name: &str,
        baseline_year: i32,
        target_year: i32,
        baseline_emissions_kg: f64,
        reduction_percentage: f64,
        scope_coverage: Vec<EmissionScope>,
        created_at: DateTime<Utc>,
    ) -> DomainResult<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::validation("target name cannot be empty"));
        }
        if target_year <= baseline_year {
            return Err(DomainError::validation(
                "target year must come after the baseline year",
            ));
        }
        if !(0.0..=100.0).contains(&reduction_percentage) || reduction_percentage == 0.0 {
            return Err(DomainError::validation(
                "reduction percentage must be in (0, 100]",
            ));
        }
        if !baseline_emissions_kg.is_finite() || baseline_emissions_kg <= 0.0 {
            return Err(DomainError::validation(
                "baseline emissions must be positive",
            ));
        }
        if scope_coverage.is_empty() {
            return Err(DomainError::validation(
                "a target must cover at least one scope",
            ));
        }

        Ok(Self {
            id: TargetId::new(),
            tenant_id,
            name: name.to_string(),
            baseline_year,
            target_year,
            baseline_emissions_kg,
            reduction_percentage,
            scope_coverage,
            status: TargetStatus::Active,
            created_at,
        })
    }

    /// Emissions level the target commits to.
    pub fn target_emissions_kg(&self) -> f64 {
        self.baseline_emissions_kg * (1.0 - self.reduction_percentage / 100.0)
    }
}

/// Progress of one target against current emissions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetProgress {
    pub target_id: TargetId,
    pub target_name: String,
    pub baseline_emissions_kg: f64,
    pub target_emissions_kg: f64,
    pub current_emissions_kg: f64,
    /// Share of the committed reduction achieved so far, clamped to 0..=100.
    pub progress_percentage: f64,
    pub target_year: i32,
    /// Whether achieved progress is at least the pro-rata share of elapsed
    /// time between baseline and target year.
    pub on_track: bool,
}

/// Evaluate progress for a target given the tenant's current-year emissions.
pub fn progress_to_target(
    target: &CarbonTarget,
    current_emissions_kg: f64,
    current_year: i32,
) -> TargetProgress {
    let target_emissions = target.target_emissions_kg();
    let committed_reduction = target.baseline_emissions_kg - target_emissions;

    let progress = if committed_reduction > 0.0 {
        (target.baseline_emissions_kg - current_emissions_kg) / committed_reduction * 100.0
    } else {
        0.0
    };
    let progress = progress.clamp(0.0, 100.0);

    let elapsed_share = (current_year - target.baseline_year) as f64
        / (target.target_year - target.baseline_year) as f64
        * 100.0;

    TargetProgress {
        target_id: target.id,
        target_name: target.name.clone(),
        baseline_emissions_kg: target.baseline_emissions_kg,
        target_emissions_kg: target_emissions,
        current_emissions_kg,
        progress_percentage: progress,
        target_year: target.target_year,
        on_track: progress >= elapsed_share,
    }
}
