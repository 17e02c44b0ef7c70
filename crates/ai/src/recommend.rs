//! Rule-based reduction recommendations.

use serde::{Deserialize, Serialize};

use climabill_core::Industry;
use climabill_emissions::ScopeTotals;

/// A suggested reduction initiative with its cost/benefit profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub name: String,
    pub description: String,
    pub implementation_cost_usd: f64,
    pub annual_savings_usd: f64,
    pub annual_co2e_reduction_kg: f64,
    pub payback_period_months: u32,
    /// "low" | "medium" | "high"
    pub difficulty: String,
    /// 1–10; higher means act sooner.
    pub priority_score: u8,
}

fn base_recommendations() -> Vec<Recommendation> {
    vec![
        Recommendation {
            name: "LED Lighting Upgrade".to_string(),
            description: "Replace fluorescent and incandescent lighting with LED alternatives"
                .to_string(),
            implementation_cost_usd: 15_000.0,
            annual_savings_usd: 3_500.0,
            annual_co2e_reduction_kg: 12_000.0,
            payback_period_months: 51,
            difficulty: "low".to_string(),
            priority_score: 8,
        },
        Recommendation {
            name: "Remote Work Policy".to_string(),
            description: "Hybrid remote work to reduce commuting emissions".to_string(),
            implementation_cost_usd: 5_000.0,
            annual_savings_usd: 8_000.0,
            annual_co2e_reduction_kg: 25_000.0,
            payback_period_months: 8,
            difficulty: "medium".to_string(),
            priority_score: 9,
        },
        Recommendation {
            name: "Renewable Energy Contract".to_string(),
            description: "Move electricity supply to a certified green tariff".to_string(),
            implementation_cost_usd: 2_000.0,
            annual_savings_usd: 0.0,
            annual_co2e_reduction_kg: 40_000.0,
            payback_period_months: 0,
            difficulty: "low".to_string(),
            priority_score: 9,
        },
    ]
}

/// Recommendations tailored to the tenant's industry and scope profile,
/// ordered by priority.
pub fn recommend_initiatives(industry: Industry, totals: &ScopeTotals) -> Vec<Recommendation> {
    let mut recs = base_recommendations();

    // Scope 3 dominating the footprint: travel policy beats facility work.
    if totals.scope_3 > totals.scope_1 + totals.scope_2 {
        recs.push(Recommendation {
            name: "Travel Policy Review".to_string(),
            description: "Shift short-haul flights to rail and tighten trip approval".to_string(),
            implementation_cost_usd: 1_000.0,
            annual_savings_usd: 12_000.0,
            annual_co2e_reduction_kg: 18_000.0,
            payback_period_months: 1,
            difficulty: "low".to_string(),
            priority_score: 10,
        });
    }

    match industry {
        Industry::Manufacturing => recs.push(Recommendation {
            name: "Process Heat Recovery".to_string(),
            description: "Capture waste heat from production lines for space heating".to_string(),
            implementation_cost_usd: 80_000.0,
            annual_savings_usd: 22_000.0,
            annual_co2e_reduction_kg: 95_000.0,
            payback_period_months: 44,
            difficulty: "high".to_string(),
            priority_score: 7,
        }),
        Industry::Saas | Industry::Fintech => recs.push(Recommendation {
            name: "Cloud Region Optimization".to_string(),
            description: "Move workloads to low-carbon cloud regions".to_string(),
            implementation_cost_usd: 3_000.0,
            annual_savings_usd: 1_500.0,
            annual_co2e_reduction_kg: 8_000.0,
            payback_period_months: 24,
            difficulty: "medium".to_string(),
            priority_score: 6,
        }),
        _ => {}
    }

    recs.sort_by(|a, b| b.priority_score.cmp(&a.priority_score));
    recs
}

#[cfg(test)]
mod tests {
    use super::*;
    use climabill_core::EmissionScope;

    fn totals(s1: f64, s2: f64, s3: f64) -> ScopeTotals {
        let mut t = ScopeTotals::default();
        t.add(EmissionScope::Scope1, s1);
        t.add(EmissionScope::Scope2, s2);
        t.add(EmissionScope::Scope3, s3);
        t
    }

    #[test]
    fn sorted_by_priority() {
        let recs = recommend_initiatives(Industry::Consulting, &totals(10.0, 10.0, 10.0));
        assert!(recs.windows(2).all(|w| w[0].priority_score >= w[1].priority_score));
    }

    #[test]
    fn scope3_heavy_footprint_gets_travel_policy() {
        let recs = recommend_initiatives(Industry::Consulting, &totals(10.0, 10.0, 1000.0));
        assert!(recs.iter().any(|r| r.name == "Travel Policy Review"));
        assert_eq!(recs[0].name, "Travel Policy Review");
    }

    #[test]
    fn industry_specific_entries() {
        let recs = recommend_initiatives(Industry::Manufacturing, &totals(10.0, 0.0, 0.0));
        assert!(recs.iter().any(|r| r.name == "Process Heat Recovery"));

        let recs = recommend_initiatives(Industry::Saas, &totals(10.0, 0.0, 0.0));
        assert!(recs.iter().any(|r| r.name == "Cloud Region Optimization"));
    }
}
