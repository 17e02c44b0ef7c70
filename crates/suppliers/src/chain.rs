//! Supply-chain emission entries and chain-wide targets.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use climabill_core::{
    ChainRecordId, ChainTargetId, DataQuality, DomainError, DomainResult, EmissionScope,
    SupplierId, TenantId,
};

/// Direction of the emission flow relative to the tenant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowDirection {
    Upstream,
    Downstream,
}

/// Who vouches for a supply-chain figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum VerificationLevel {
    #[default]
    SupplierReported,
    ThirdPartyVerified,
}

/// An emissions figure attributed to a supplier relationship.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplyChainEmission {
    pub id: ChainRecordId,
    pub tenant_id: TenantId,
    pub supplier_id: SupplierId,
    pub direction: FlowDirection,
    pub scope: EmissionScope,
    pub co2e_kg: f64,
    pub activity_description: String,
    pub period_start: DateTime<Utc>,
    pub period_end: DateTime<Utc>,
    pub data_quality: DataQuality,
    pub verification_level: VerificationLevel,
    pub created_at: DateTime<Utc>,
}

impl SupplyChainEmission {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        tenant_id: TenantId,
        supplier_id: SupplierId,
        direction: FlowDirection,
        scope: EmissionScope,
        co2e_kg: f64,
        activity_description: &str,
        period_start: DateTime<Utc>,
        period_end: DateTime<Utc>,
        data_quality: DataQuality,
        verification_level: VerificationLevel,
        created_at: DateTime<Utc>,
    ) -> DomainResult<Self> {
        if period_end <= period_start {
            return Err(DomainError::validation(
                "reporting period must end after it starts",
            ));
        }
        if !co2e_kg.is_finite() || co2e_kg < 0.0 {
            return Err(DomainError::validation("co2e must be non-negative"));
        }

        Ok(Self {
            id: ChainRecordId::new(),
            tenant_id,
            supplier_id,
            direction,
            scope,
            co2e_kg,
            activity_description: activity_description.trim().to_string(),
            period_start,
            period_end,
            data_quality,
            verification_level,
            created_at,
        })
    }
}

/// A chain-wide reduction target with participating suppliers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplyChainTarget {
    pub id: ChainTargetId,
    pub tenant_id: TenantId,
    pub name: String,
    pub baseline_year: i32,
    pub target_year: i32,
    pub reduction_percentage: f64,
    pub scope_coverage: Vec<EmissionScope>,
    pub participating_suppliers: Vec<SupplierId>,
    pub progress_percentage: f64,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl SupplyChainTarget {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        tenant_id: TenantId,
        name: &str,
        baseline_year: i32,
        target_year: i32,
        reduction_percentage: f64,
        scope_coverage: Vec<EmissionScope>,
        participating_suppliers: Vec<SupplierId>,
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
        if !(0.0..=100.0).contains(&reduction_percentage) {
            return Err(DomainError::validation(
                "reduction percentage must be between 0 and 100",
            ));
        }

        Ok(Self {
            id: ChainTargetId::new(),
            tenant_id,
            name: name.to_string(),
            baseline_year,
            target_year,
            reduction_percentage,
            scope_coverage,
            participating_suppliers,
            progress_percentage: 0.0,
            status: "active".to_string(),
            created_at,
        })
    }
}
