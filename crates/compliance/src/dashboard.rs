//! Compliance status dashboard across a tenant's chosen standards.

use serde::{Deserialize, Serialize};

use climabill_core::ComplianceStandard;

use crate::standards::{next_deadline, requirements};

/// Status of one standard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardStatus {
    pub standard: ComplianceStandard,
    pub name: String,
    /// "compliant" | "attention_needed"
    pub status: String,
    pub total_emissions_kg: f64,
    pub materiality_threshold_kg: f64,
    pub reporting_deadline: String,
    pub verification_required: bool,
    pub next_deadline: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceDashboard {
    pub company_name: String,
    pub overall_status: String,
    pub total_emissions_kg: f64,
    pub standards: Vec<StandardStatus>,
}

/// Evaluate every standard a tenant reports under against its current-year
/// emissions. A standard with no threshold is always compliant at this
/// level; the detail lives in its generated report.
pub fn compliance_dashboard(
    company_name: &str,
    standards: &[ComplianceStandard],
    total_emissions_kg: f64,
    current_year: i32,
) -> ComplianceDashboard {
    let statuses: Vec<StandardStatus> = standards
        .iter()
        .map(|&standard| {
            let reqs = requirements(standard);
            let compliant = reqs.materiality_threshold_kg == 0.0
                || total_emissions_kg <= reqs.materiality_threshold_kg;

            StandardStatus {
                standard,
                name: reqs.name.to_string(),
                status: if compliant {
                    "compliant".to_string()
                } else {
                    "attention_needed".to_string()
                },
                total_emissions_kg,
                materiality_threshold_kg: reqs.materiality_threshold_kg,
                reporting_deadline: reqs.reporting_deadline.to_string(),
                verification_required: reqs.verification_required,
                next_deadline: next_deadline(standard, current_year),
            }
        })
        .collect();

    let overall = if statuses.iter().all(|s| s.status == "compliant") {
        "compliant"
    } else {
        "attention_needed"
    };

    ComplianceDashboard {
        company_name: company_name.to_string(),
        overall_status: overall.to_string(),
        total_emissions_kg,
        standards: statuses,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn over_threshold_needs_attention() {
        let dash = compliance_dashboard(
            "Alpha Tech",
            &[ComplianceStandard::GhgProtocol, ComplianceStandard::Tcfd],
            30_000.0,
            2026,
        );
        assert_eq!(dash.overall_status, "attention_needed");
        let ghg = dash
            .standards
            .iter()
            .find(|s| s.standard == ComplianceStandard::GhgProtocol)
            .unwrap();
        assert_eq!(ghg.status, "attention_needed");
        let tcfd = dash
            .standards
            .iter()
            .find(|s| s.standard == ComplianceStandard::Tcfd)
            .unwrap();
        assert_eq!(tcfd.status, "compliant");
    }

    #[test]
    fn no_standards_is_trivially_compliant() {
        let dash = compliance_dashboard("Alpha Tech", &[], 1e9, 2026);
        assert_eq!(dash.overall_status, "compliant");
        assert!(dash.standards.is_empty());
    }
}
