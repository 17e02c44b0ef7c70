//! The tenant record — the unit of data isolation.
//!
//! A tenant is a company account: every domain record carries a `TenantId`
//! foreign key, and the request authorizer resolves exactly one tenant per
//! authenticated call. The tenant record itself doubles as the company
//! profile addressed by `/api/companies/{company_id}`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::id::TenantId;
use crate::types::{ComplianceStandard, Industry, PlanTier};

/// Profile attributes of a tenant, as supplied at registration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TenantProfile {
    pub name: String,
    /// URL-safe short name, e.g. "alpha-tech".
    pub domain: String,
    pub industry: Industry,
    pub employee_count: u32,
    pub annual_revenue_usd: f64,
    pub headquarters_location: String,
    pub plan: PlanTier,
    pub compliance_standards: Vec<ComplianceStandard>,
}

/// A company account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tenant {
    pub id: TenantId,
    pub name: String,
    pub domain: String,
    pub plan: PlanTier,
    pub industry: Industry,
    pub employee_count: u32,
    pub annual_revenue_usd: f64,
    pub headquarters_location: String,
    pub compliance_standards: Vec<ComplianceStandard>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl Tenant {
    /// Create a tenant from a validated profile.
    pub fn new(profile: TenantProfile, created_at: DateTime<Utc>) -> DomainResult<Self> {
        let name = profile.name.trim();
        if name.is_empty() {
            return Err(DomainError::validation("company name cannot be empty"));
        }

        let domain = profile.domain.trim().to_ascii_lowercase();
        if domain.is_empty() {
            return Err(DomainError::validation("company domain cannot be empty"));
        }
        if !domain
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-')
        {
            return Err(DomainError::validation(
                "company domain may only contain letters, digits and dashes",
            ));
        }

        if profile.employee_count == 0 {
            return Err(DomainError::validation("employee count must be positive"));
        }
        if !profile.annual_revenue_usd.is_finite() || profile.annual_revenue_usd < 0.0 {
            return Err(DomainError::validation("annual revenue must be non-negative"));
        }

        Ok(Self {
            id: TenantId::new(),
            name: name.to_string(),
            domain,
            plan: profile.plan,
            industry: profile.industry,
            employee_count: profile.employee_count,
            annual_revenue_usd: profile.annual_revenue_usd,
            headquarters_location: profile.headquarters_location.trim().to_string(),
            compliance_standards: profile.compliance_standards,
            is_active: true,
            created_at,
        })
    }
}
