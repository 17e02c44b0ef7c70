//! Tenant-owned carbon certificates and retirement.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use climabill_core::{CertificateId, DomainError, DomainResult, TenantId};

use crate::listing::Purchase;

/// Whether a certificate's credits are still in circulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RetirementStatus {
    #[default]
    Active,
    Retired,
}

/// Proof of a credit purchase, owned by a tenant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarbonCertificate {
    pub id: CertificateId,
    /// Human-facing certificate code, e.g. "CERT-018f3a…".
    pub certificate_code: String,
    pub listing_id: String,
    pub project_name: String,
    pub tenant_id: TenantId,
    pub credits_amount: f64,
    pub purchase_price: f64,
    pub purchase_date: DateTime<Utc>,
    pub ledger_reference: String,
    pub retirement_status: RetirementStatus,
    pub retirement_date: Option<DateTime<Utc>>,
    pub retirement_reason: Option<String>,
}

impl CarbonCertificate {
    /// Issue a certificate for a completed purchase.
    pub fn issue(tenant_id: TenantId, purchase: &Purchase, at: DateTime<Utc>) -> Self {
        Self {
            id: CertificateId::new(),
            certificate_code: format!("CERT-{}", Uuid::now_v7().simple()),
            listing_id: purchase.listing_id.clone(),
            project_name: purchase.project_name.clone(),
            tenant_id,
            credits_amount: purchase.credits_purchased,
            purchase_price: purchase.total_cost,
            purchase_date: at,
            ledger_reference: purchase.ledger_reference.clone(),
            retirement_status: RetirementStatus::Active,
            retirement_date: None,
            retirement_reason: None,
        }
    }

    /// Permanently retire the certificate's credits.
    ///
    /// Retirement is one-way; a retired certificate cannot be retired again
    /// or brought back.
    pub fn retire(&mut self, reason: &str, at: DateTime<Utc>) -> DomainResult<()> {
        if self.retirement_status == RetirementStatus::Retired {
            return Err(DomainError::invariant("certificate already retired"));
        }
        let reason = reason.trim();
        if reason.is_empty() {
            return Err(DomainError::validation("retirement reason cannot be empty"));
        }

        self.retirement_status = RetirementStatus::Retired;
        self.retirement_date = Some(at);
        self.retirement_reason = Some(reason.to_string());
        Ok(())
    }
}

/// Authenticity answer for a certificate code.
///
/// This is the certificate's public face: validity and retirement state,
/// never the owning tenant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationReport {
    pub certificate_code: String,
    pub valid: bool,
    pub retired: bool,
    pub project_name: Option<String>,
    pub credits_amount: Option<f64>,
    pub ledger_reference: Option<String>,
}

/// Build a verification report for a lookup result.
pub fn verify_certificate(code: &str, found: Option<&CarbonCertificate>) -> VerificationReport {
    match found {
        Some(cert) => VerificationReport {
            certificate_code: code.to_string(),
            valid: true,
            retired: cert.retirement_status == RetirementStatus::Retired,
            project_name: Some(cert.project_name.clone()),
            credits_amount: Some(cert.credits_amount),
            ledger_reference: Some(cert.ledger_reference.clone()),
        },
        None => VerificationReport {
            certificate_code: code.to_string(),
            valid: false,
            retired: false,
            project_name: None,
            credits_amount: None,
            ledger_reference: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::ListingCatalog;

    fn certificate() -> CarbonCertificate {
        let mut catalog = ListingCatalog::seed();
        let purchase = catalog.purchase("LIST-002", 50.0).unwrap();
        CarbonCertificate::issue(TenantId::new(), &purchase, Utc::now())
    }

    #[test]
    fn issue_carries_purchase_details() {
        let cert = certificate();
        assert_eq!(cert.credits_amount, 50.0);
        assert!(cert.certificate_code.starts_with("CERT-"));
        assert_eq!(cert.retirement_status, RetirementStatus::Active);
    }

    #[test]
    fn retire_is_one_way() {
        let mut cert = certificate();
        cert.retire("2026 offsetting", Utc::now()).unwrap();
        assert_eq!(cert.retirement_status, RetirementStatus::Retired);
        assert!(cert.retirement_date.is_some());

        let err = cert.retire("again", Utc::now()).unwrap_err();
        assert!(matches!(err, DomainError::InvariantViolation(_)));
    }

    #[test]
    fn retire_requires_reason() {
        let mut cert = certificate();
        assert!(cert.retire("  ", Utc::now()).is_err());
    }

    #[test]
    fn verification_reveals_no_owner() {
        let cert = certificate();
        let report = verify_certificate(&cert.certificate_code, Some(&cert));
        assert!(report.valid);
        let json = serde_json::to_value(&report).unwrap();
        assert!(json.get("tenant_id").is_none());
    }

    #[test]
    fn unknown_code_is_invalid() {
        let report = verify_certificate("CERT-missing", None);
        assert!(!report.valid);
        assert!(report.project_name.is_none());
    }
}
