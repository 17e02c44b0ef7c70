//! Per-standard compliance report generation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use climabill_core::ComplianceStandard;
use climabill_emissions::ScopeTotals;
use climabill_initiatives::{CarbonTarget, InitiativeStatus, ReductionInitiative};

use crate::standards::requirements;

/// A target as disclosed in a report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetDisclosure {
    pub name: String,
    pub baseline_year: i32,
    pub target_year: i32,
    pub reduction_percentage: f64,
    pub on_track: bool,
}

/// Narrative section of a report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSection {
    pub title: String,
    pub detail: String,
}

/// Transition-plan roll-up disclosed under CSRD/SEC.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitionPlan {
    pub initiative_count: usize,
    pub total_investment_usd: f64,
    pub expected_annual_reduction_kg: f64,
    pub completed: usize,
    pub in_progress: usize,
}

/// A generated compliance report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceReport {
    pub standard: ComplianceStandard,
    pub report_type: String,
    pub company_name: String,
    pub reporting_year: i32,
    pub generated_at: DateTime<Utc>,
    pub scope_breakdown: ScopeTotals,
    pub total_emissions_kg: f64,
    pub emissions_intensity_per_employee: f64,
    pub is_material: bool,
    pub materiality_threshold_kg: f64,
    pub verification_status: String,
    pub climate_targets: Vec<TargetDisclosure>,
    pub transition_plan: TransitionPlan,
    pub sections: Vec<ReportSection>,
    pub recommendations: Vec<String>,
}

fn target_disclosures(
    targets: &[CarbonTarget],
    total_emissions_kg: f64,
    year: i32,
) -> Vec<TargetDisclosure> {
    targets
        .iter()
        .filter(|t| t.target_year >= year)
        .map(|t| {
            let years_total = (t.target_year - t.baseline_year).max(1) as f64;
            let required_annual =
                t.baseline_emissions_kg * (t.reduction_percentage / 100.0) / years_total;
            let elapsed = (year - t.baseline_year).max(0) as f64;
            let on_track =
                (t.baseline_emissions_kg - total_emissions_kg) >= required_annual * elapsed;

            TargetDisclosure {
                name: t.name.clone(),
                baseline_year: t.baseline_year,
                target_year: t.target_year,
                reduction_percentage: t.reduction_percentage,
                on_track,
            }
        })
        .collect()
}

fn transition_plan(initiatives: &[ReductionInitiative]) -> TransitionPlan {
    TransitionPlan {
        initiative_count: initiatives.len(),
        total_investment_usd: initiatives.iter().map(|i| i.implementation_cost_usd).sum(),
        expected_annual_reduction_kg: initiatives
            .iter()
            .map(|i| i.annual_co2e_reduction_kg)
            .sum(),
        completed: initiatives
            .iter()
            .filter(|i| i.status == InitiativeStatus::Completed)
            .count(),
        in_progress: initiatives
            .iter()
            .filter(|i| i.status == InitiativeStatus::InProgress)
            .count(),
    }
}

fn sections_for(standard: ComplianceStandard) -> Vec<ReportSection> {
    let specs: &[(&str, &str)] = match standard {
        ComplianceStandard::EuCsrd => &[
            (
                "Double Materiality",
                "Impact and financial materiality assessed across own operations and the value chain.",
            ),
            (
                "Biodiversity Impact",
                "No material biodiversity impact identified in the reporting period.",
            ),
        ],
        ComplianceStandard::SecClimate => &[
            (
                "Physical Risk",
                "Extreme weather events affecting operations; mitigated through business continuity planning.",
            ),
            (
                "Transition Risk",
                "Carbon pricing and regulatory changes; mitigated through reduction initiatives and renewable energy adoption.",
            ),
        ],
        ComplianceStandard::GhgProtocol => &[
            (
                "Organizational Boundary",
                "Operational control consolidation; all controlled facilities included.",
            ),
            (
                "Methodology",
                "Emission-factor based calculation over measured and estimated activity data.",
            ),
            ("Data Quality", "Uncertainty assessed at ±15%; internal verification completed."),
        ],
        ComplianceStandard::Tcfd => &[
            ("Governance", "Board-level oversight of climate-related risks and opportunities."),
            (
                "Strategy",
                "Scenario analysis across 1.5°C, 2°C and current-policies pathways.",
            ),
            (
                "Risk Management",
                "Annual climate risk assessment integrated into enterprise risk management.",
            ),
        ],
    };

    specs
        .iter()
        .map(|(title, detail)| ReportSection {
            title: (*title).to_string(),
            detail: (*detail).to_string(),
        })
        .collect()
}

fn recommendations_for(
    standard: ComplianceStandard,
    total_emissions_kg: f64,
    threshold_kg: f64,
) -> Vec<String> {
    let mut recs = Vec::new();

    if threshold_kg > 0.0 && total_emissions_kg > threshold_kg {
        recs.push(
            "Implement additional reduction initiatives to move below the materiality threshold"
                .to_string(),
        );
    }

    match standard {
        ComplianceStandard::EuCsrd => recs.extend([
            "Ensure third-party verification of emission data".to_string(),
            "Develop a transition plan with interim targets".to_string(),
        ]),
        ComplianceStandard::SecClimate => recs.extend([
            "Conduct scenario analysis for climate-related risks".to_string(),
            "Assess Scope 3 emissions for materiality".to_string(),
        ]),
        ComplianceStandard::GhgProtocol | ComplianceStandard::Tcfd => {}
    }

    recs
}

/// Generate a report for one standard over a tenant's yearly figures.
#[allow(clippy::too_many_arguments)]
pub fn generate_report(
    standard: ComplianceStandard,
    company_name: &str,
    employee_count: u32,
    scope_breakdown: ScopeTotals,
    targets: &[CarbonTarget],
    initiatives: &[ReductionInitiative],
    year: i32,
    generated_at: DateTime<Utc>,
) -> ComplianceReport {
    let reqs = requirements(standard);
    let total = scope_breakdown.total();
    let is_material = reqs.materiality_threshold_kg > 0.0 && total > reqs.materiality_threshold_kg;

    ComplianceReport {
        standard,
        report_type: format!("{} Report", reqs.name),
        company_name: company_name.to_string(),
        reporting_year: year,
        generated_at,
        total_emissions_kg: total,
        emissions_intensity_per_employee: if employee_count > 0 {
            total / employee_count as f64
        } else {
            0.0
        },
        is_material,
        materiality_threshold_kg: reqs.materiality_threshold_kg,
        verification_status: if reqs.verification_required {
            "Third-party verification required".to_string()
        } else {
            "Self-reported".to_string()
        },
        climate_targets: target_disclosures(targets, total, year),
        transition_plan: transition_plan(initiatives),
        sections: sections_for(standard),
        recommendations: recommendations_for(standard, total, reqs.materiality_threshold_kg),
        scope_breakdown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use climabill_core::{EmissionScope, TenantId};

    fn totals(s1: f64, s2: f64, s3: f64) -> ScopeTotals {
        let mut t = ScopeTotals::default();
        t.add(EmissionScope::Scope1, s1);
        t.add(EmissionScope::Scope2, s2);
        t.add(EmissionScope::Scope3, s3);
        t
    }

    #[test]
    fn materiality_follows_threshold() {
        let report = generate_report(
            ComplianceStandard::EuCsrd,
            "Alpha Tech",
            100,
            totals(30_000.0, 20_000.0, 0.0),
            &[],
            &[],
            2026,
            Utc::now(),
        );
        assert!(report.is_material);
        assert!((report.emissions_intensity_per_employee - 500.0).abs() < 1e-9);
        assert!(report
            .recommendations
            .iter()
            .any(|r| r.contains("materiality threshold")));
    }

    #[test]
    fn tcfd_is_never_material_by_threshold() {
        let report = generate_report(
            ComplianceStandard::Tcfd,
            "Alpha Tech",
            100,
            totals(1e9, 0.0, 0.0),
            &[],
            &[],
            2026,
            Utc::now(),
        );
        assert!(!report.is_material);
    }

    #[test]
    fn target_on_track_is_pro_rata() {
        let target = CarbonTarget::new(
            TenantId::new(),
            "Cut 50% by 2030",
            2024,
            2030,
            60_000.0,
            50.0,
            vec![EmissionScope::Scope2],
            Utc::now(),
        )
        .unwrap();

        // Required reduction: 5k/year. Two years in, emissions down 20k: on track.
        let report = generate_report(
            ComplianceStandard::EuCsrd,
            "Alpha Tech",
            50,
            totals(0.0, 40_000.0, 0.0),
            core::slice::from_ref(&target),
            &[],
            2026,
            Utc::now(),
        );
        assert_eq!(report.climate_targets.len(), 1);
        assert!(report.climate_targets[0].on_track);

        // Emissions unchanged: behind.
        let report = generate_report(
            ComplianceStandard::EuCsrd,
            "Alpha Tech",
            50,
            totals(0.0, 60_000.0, 0.0),
            core::slice::from_ref(&target),
            &[],
            2026,
            Utc::now(),
        );
        assert!(!report.climate_targets[0].on_track);
    }

    #[test]
    fn expired_targets_are_not_disclosed() {
        let target = CarbonTarget::new(
            TenantId::new(),
            "Old target",
            2018,
            2020,
            10_000.0,
            10.0,
            vec![EmissionScope::Scope1],
            Utc::now(),
        )
        .unwrap();
        let report = generate_report(
            ComplianceStandard::GhgProtocol,
            "Alpha Tech",
            10,
            totals(1000.0, 0.0, 0.0),
            &[target],
            &[],
            2026,
            Utc::now(),
        );
        assert!(report.climate_targets.is_empty());
    }
}
