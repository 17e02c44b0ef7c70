//! The compliance standards catalog and per-standard requirements.

use serde::{Deserialize, Serialize};

use climabill_core::ComplianceStandard;

/// Catalog entry describing a standard to end users.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardInfo {
    pub code: ComplianceStandard,
    pub name: String,
    pub description: String,
    pub deadline: String,
}

/// Machine-facing requirements used by report generation.
#[derive(Debug, Clone, PartialEq)]
pub struct StandardRequirements {
    pub name: &'static str,
    pub mandatory_disclosures: &'static [&'static str],
    pub reporting_deadline: &'static str,
    /// kg CO2e above which emissions are material under the standard.
    /// Zero means no threshold.
    pub materiality_threshold_kg: f64,
    pub verification_required: bool,
}

pub fn requirements(standard: ComplianceStandard) -> StandardRequirements {
    match standard {
        ComplianceStandard::EuCsrd => StandardRequirements {
            name: "EU Corporate Sustainability Reporting Directive",
            mandatory_disclosures: &[
                "Scope 1, 2, 3 emissions",
                "Carbon reduction targets",
                "Climate risk assessment",
                "Transition plan",
                "Biodiversity impact",
            ],
            reporting_deadline: "Annual by April 30",
            materiality_threshold_kg: 40_000.0,
            verification_required: true,
        },
        ComplianceStandard::SecClimate => StandardRequirements {
            name: "SEC Climate Disclosure Rules",
            mandatory_disclosures: &[
                "Climate-related risks",
                "Scope 1 and 2 emissions",
                "Climate targets and goals",
                "Transition activities",
            ],
            reporting_deadline: "Annual with 10-K filing",
            materiality_threshold_kg: 50_000.0,
            verification_required: false,
        },
        ComplianceStandard::GhgProtocol => StandardRequirements {
            name: "GHG Protocol Corporate Standard",
            mandatory_disclosures: &[
                "Scope 1 emissions",
                "Scope 2 emissions",
                "Emission factors used",
                "Methodologies applied",
            ],
            reporting_deadline: "Annual",
            materiality_threshold_kg: 25_000.0,
            verification_required: false,
        },
        ComplianceStandard::Tcfd => StandardRequirements {
            name: "Task Force on Climate-related Financial Disclosures",
            mandatory_disclosures: &[
                "Climate governance",
                "Climate strategy",
                "Climate risk management",
                "Metrics and targets",
            ],
            reporting_deadline: "Annual",
            materiality_threshold_kg: 0.0,
            verification_required: false,
        },
    }
}

/// The user-facing catalog of supported standards.
pub fn standards_catalog() -> Vec<StandardInfo> {
    vec![
        StandardInfo {
            code: ComplianceStandard::EuCsrd,
            name: "EU Corporate Sustainability Reporting Directive".to_string(),
            description: "Mandatory sustainability reporting for large EU companies".to_string(),
            deadline: "Annual by April 30".to_string(),
        },
        StandardInfo {
            code: ComplianceStandard::SecClimate,
            name: "SEC Climate Disclosure Rules".to_string(),
            description: "Climate-related financial risk disclosures for US public companies"
                .to_string(),
            deadline: "Annual with 10-K filing".to_string(),
        },
        StandardInfo {
            code: ComplianceStandard::GhgProtocol,
            name: "GHG Protocol Corporate Standard".to_string(),
            description: "Global standard for corporate greenhouse gas accounting".to_string(),
            deadline: "Annual".to_string(),
        },
        StandardInfo {
            code: ComplianceStandard::Tcfd,
            name: "TCFD Recommendations".to_string(),
            description: "Climate-related financial disclosures framework".to_string(),
            deadline: "Annual".to_string(),
        },
    ]
}

/// Next reporting deadline for a standard, relative to `current_year`.
pub fn next_deadline(standard: ComplianceStandard, current_year: i32) -> String {
    match standard {
        ComplianceStandard::EuCsrd => format!("April 30, {}", current_year + 1),
        ComplianceStandard::SecClimate => format!("March 31, {}", current_year + 1),
        ComplianceStandard::GhgProtocol | ComplianceStandard::Tcfd => {
            format!("December 31, {}", current_year)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_covers_every_standard() {
        let catalog = standards_catalog();
        assert_eq!(catalog.len(), ComplianceStandard::ALL.len());
        for std in ComplianceStandard::ALL {
            assert!(catalog.iter().any(|s| s.code == std));
        }
    }

    #[test]
    fn tcfd_has_no_threshold() {
        assert_eq!(requirements(ComplianceStandard::Tcfd).materiality_threshold_kg, 0.0);
    }

    #[test]
    fn deadlines_roll_over_the_year() {
        assert_eq!(next_deadline(ComplianceStandard::EuCsrd, 2026), "April 30, 2027");
        assert_eq!(
            next_deadline(ComplianceStandard::GhgProtocol, 2026),
            "December 31, 2026"
        );
    }
}
