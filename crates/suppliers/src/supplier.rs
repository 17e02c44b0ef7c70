//! Supplier records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use climabill_core::{DomainError, DomainResult, SupplierId, TenantId};

/// Verification state of a supplier's carbon data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum VerificationStatus {
    #[default]
    Pending,
    Verified,
    Flagged,
}

/// Commercial relationship depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PartnershipLevel {
    #[default]
    Basic,
    Preferred,
    Strategic,
}

/// A supplier in a tenant's value chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Supplier {
    pub id: SupplierId,
    pub tenant_id: TenantId,
    pub name: String,
    pub industry: String,
    pub location: String,
    pub contact_email: String,
    pub annual_revenue_usd: f64,
    pub employee_count: u32,
    /// 0–100; higher is cleaner.
    pub carbon_score: f64,
    pub verification_status: VerificationStatus,
    pub partnership_level: PartnershipLevel,
    pub created_at: DateTime<Utc>,
}

impl Supplier {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        tenant_id: TenantId,
        name: &str,
        industry: &str,
        location: &str,
        contact_email: &str,
        annual_revenue_usd: f64,
        employee_count: u32,
        carbon_score: f64,
        partnership_level: PartnershipLevel,
        created_at: DateTime<Utc>,
    ) -> DomainResult<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::validation("supplier name cannot be empty"));
        }
        let contact_email = contact_email.trim().to_ascii_lowercase();
        if contact_email.is_empty() || !contact_email.contains('@') {
            return Err(DomainError::validation("invalid contact email"));
        }
        if !(0.0..=100.0).contains(&carbon_score) {
            return Err(DomainError::validation(
                "carbon score must be between 0 and 100",
            ));
        }
        if !annual_revenue_usd.is_finite() || annual_revenue_usd < 0.0 {
            return Err(DomainError::validation("annual revenue must be non-negative"));
        }

        Ok(Self {
            id: SupplierId::new(),
            tenant_id,
            name: name.to_string(),
            industry: industry.trim().to_string(),
            location: location.trim().to_string(),
            contact_email,
            annual_revenue_usd,
            employee_count,
            carbon_score,
            verification_status: VerificationStatus::Pending,
            partnership_level,
            created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_supplier_starts_pending() {
        let s = Supplier::new(
            TenantId::new(),
            "Green Steel Co",
            "manufacturing",
            "Sweden",
            "ops@greensteel.example",
            4_000_000.0,
            85,
            72.0,
            PartnershipLevel::Preferred,
            Utc::now(),
        )
        .unwrap();
        assert_eq!(s.verification_status, VerificationStatus::Pending);
    }

    #[test]
    fn score_out_of_range_rejected() {
        let err = Supplier::new(
            TenantId::new(),
            "X",
            "",
            "",
            "a@b.c",
            0.0,
            1,
            120.0,
            PartnershipLevel::Basic,
            Utc::now(),
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn email_is_normalized() {
        let s = Supplier::new(
            TenantId::new(),
            "X",
            "",
            "",
            " Ops@Example.COM ",
            0.0,
            1,
            50.0,
            PartnershipLevel::Basic,
            Utc::now(),
        )
        .unwrap();
        assert_eq!(s.contact_email, "ops@example.com");
    }
}
