//! Supply-chain visibility dashboard aggregation.

use serde::{Deserialize, Serialize};

use climabill_core::SupplierId;

use crate::chain::SupplyChainEmission;
use crate::supplier::{Supplier, VerificationStatus};

/// Supplier counts per carbon-score band.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreDistribution {
    /// 0–25
    pub critical: usize,
    /// 26–50
    pub poor: usize,
    /// 51–75
    pub fair: usize,
    /// 76–100
    pub good: usize,
}

/// Slim supplier projection for dashboard lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplierSummary {
    pub id: SupplierId,
    pub name: String,
    pub industry: String,
    pub carbon_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplyChainDashboard {
    pub total_suppliers: usize,
    pub verified_suppliers: usize,
    /// Percentage of suppliers with verified data.
    pub verification_rate: f64,
    pub average_carbon_score: f64,
    pub total_chain_emissions_kg: f64,
    pub score_distribution: ScoreDistribution,
    /// Best five suppliers by carbon score.
    pub top_performers: Vec<SupplierSummary>,
    /// Suppliers scoring below 50.
    pub needs_attention: Vec<SupplierSummary>,
}

fn summary(s: &Supplier) -> SupplierSummary {
    SupplierSummary {
        id: s.id,
        name: s.name.clone(),
        industry: s.industry.clone(),
        carbon_score: s.carbon_score,
    }
}

/// Fold a tenant's suppliers and chain emissions into the dashboard view.
pub fn supply_chain_dashboard(
    suppliers: &[Supplier],
    emissions: &[SupplyChainEmission],
) -> SupplyChainDashboard {
    let total = suppliers.len();
    let verified = suppliers
        .iter()
        .filter(|s| s.verification_status == VerificationStatus::Verified)
        .count();

    let mut distribution = ScoreDistribution::default();
    for s in suppliers {
        match s.carbon_score {
            score if score <= 25.0 => distribution.critical += 1,
            score if score <= 50.0 => distribution.poor += 1,
            score if score <= 75.0 => distribution.fair += 1,
            _ => distribution.good += 1,
        }
    }

    let average_score = if total > 0 {
        suppliers.iter().map(|s| s.carbon_score).sum::<f64>() / total as f64
    } else {
        0.0
    };

    let mut by_score: Vec<&Supplier> = suppliers.iter().collect();
    by_score.sort_by(|a, b| {
        b.carbon_score
            .partial_cmp(&a.carbon_score)
            .unwrap_or(core::cmp::Ordering::Equal)
    });

    SupplyChainDashboard {
        total_suppliers: total,
        verified_suppliers: verified,
        verification_rate: if total > 0 {
            verified as f64 / total as f64 * 100.0
        } else {
            0.0
        },
        average_carbon_score: average_score,
        total_chain_emissions_kg: emissions.iter().map(|e| e.co2e_kg).sum(),
        score_distribution: distribution,
        top_performers: by_score.into_iter().take(5).map(summary).collect(),
        needs_attention: suppliers
            .iter()
            .filter(|s| s.carbon_score < 50.0)
            .map(summary)
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    use climabill_core::{DataQuality, EmissionScope, TenantId};

    use crate::chain::{FlowDirection, VerificationLevel};
    use crate::supplier::PartnershipLevel;

    fn supplier(tenant: TenantId, name: &str, score: f64, verified: bool) -> Supplier {
        let mut s = Supplier::new(
            tenant,
            name,
            "logistics",
            "NL",
            "ops@example.com",
            1_000_000.0,
            50,
            score,
            PartnershipLevel::Basic,
            Utc::now(),
        )
        .unwrap();
        if verified {
            s.verification_status = VerificationStatus::Verified;
        }
        s
    }

    fn emission(tenant: TenantId, supplier: &Supplier, kg: f64) -> SupplyChainEmission {
        SupplyChainEmission::new(
            tenant,
            supplier.id,
            FlowDirection::Upstream,
            EmissionScope::Scope3,
            kg,
            "freight",
            Utc::now() - chrono::Duration::days(30),
            Utc::now(),
            DataQuality::Estimated,
            VerificationLevel::SupplierReported,
            Utc::now(),
        )
        .unwrap()
    }

    #[test]
    fn dashboard_aggregates() {
        let tenant = TenantId::new();
        let a = supplier(tenant, "A", 90.0, true);
        let b = supplier(tenant, "B", 40.0, false);
        let c = supplier(tenant, "C", 20.0, true);
        let emissions = vec![emission(tenant, &a, 100.0), emission(tenant, &b, 400.0)];

        let dash = supply_chain_dashboard(&[a, b, c], &emissions);

        assert_eq!(dash.total_suppliers, 3);
        assert_eq!(dash.verified_suppliers, 2);
        assert!((dash.verification_rate - 66.66666666666667).abs() < 1e-9);
        assert!((dash.average_carbon_score - 50.0).abs() < 1e-9);
        assert!((dash.total_chain_emissions_kg - 500.0).abs() < 1e-9);
        assert_eq!(dash.score_distribution.critical, 1);
        assert_eq!(dash.score_distribution.poor, 1);
        assert_eq!(dash.score_distribution.good, 1);
        assert_eq!(dash.top_performers.first().unwrap().name, "A");
        assert_eq!(dash.needs_attention.len(), 2);
    }

    #[test]
    fn empty_chain_is_zeroes() {
        let dash = supply_chain_dashboard(&[], &[]);
        assert_eq!(dash.total_suppliers, 0);
        assert_eq!(dash.verification_rate, 0.0);
        assert_eq!(dash.average_carbon_score, 0.0);
    }
}
