//! Shared domain enums.
//!
//! These are the closed vocabularies that cross crate boundaries: the GHG
//! Protocol scope classification, the industry taxonomy used for emission
//! defaults and benchmarking, subscription plans, and the compliance
//! standards a tenant can opt into.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// GHG Protocol emission scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmissionScope {
    /// Direct emissions from owned or controlled sources.
    #[serde(rename = "scope_1")]
    Scope1,
    /// Indirect emissions from purchased energy.
    #[serde(rename = "scope_2")]
    Scope2,
    /// All other indirect emissions in the value chain.
    #[serde(rename = "scope_3")]
    Scope3,
}

impl EmissionScope {
    pub const ALL: [EmissionScope; 3] = [Self::Scope1, Self::Scope2, Self::Scope3];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Scope1 => "scope_1",
            Self::Scope2 => "scope_2",
            Self::Scope3 => "scope_3",
        }
    }
}

impl core::fmt::Display for EmissionScope {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Industry classification for a tenant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Industry {
    Saas,
    Fintech,
    Ecommerce,
    Manufacturing,
    Healthcare,
    Consulting,
}

impl Industry {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Saas => "saas",
            Self::Fintech => "fintech",
            Self::Ecommerce => "ecommerce",
            Self::Manufacturing => "manufacturing",
            Self::Healthcare => "healthcare",
            Self::Consulting => "consulting",
        }
    }
}

impl FromStr for Industry {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "saas" => Ok(Self::Saas),
            "fintech" => Ok(Self::Fintech),
            "ecommerce" => Ok(Self::Ecommerce),
            "manufacturing" => Ok(Self::Manufacturing),
            "healthcare" => Ok(Self::Healthcare),
            "consulting" => Ok(Self::Consulting),
            other => Err(DomainError::validation(format!("unknown industry: {other}"))),
        }
    }
}

impl core::fmt::Display for Industry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Subscription plan tier for a tenant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PlanTier {
    Starter,
    #[default]
    Professional,
    Enterprise,
}

/// Compliance standard a tenant reports under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplianceStandard {
    EuCsrd,
    SecClimate,
    GhgProtocol,
    Tcfd,
}

impl ComplianceStandard {
    pub const ALL: [ComplianceStandard; 4] =
        [Self::EuCsrd, Self::SecClimate, Self::GhgProtocol, Self::Tcfd];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EuCsrd => "eu_csrd",
            Self::SecClimate => "sec_climate",
            Self::GhgProtocol => "ghg_protocol",
            Self::Tcfd => "tcfd",
        }
    }
}

impl FromStr for ComplianceStandard {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "eu_csrd" => Ok(Self::EuCsrd),
            "sec_climate" => Ok(Self::SecClimate),
            "ghg_protocol" => Ok(Self::GhgProtocol),
            "tcfd" => Ok(Self::Tcfd),
            other => Err(DomainError::validation(format!(
                "unknown compliance standard: {other}"
            ))),
        }
    }
}

impl core::fmt::Display for ComplianceStandard {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Provenance quality of an emissions figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DataQuality {
    #[default]
    Estimated,
    Measured,
    Calculated,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scope_serializes_snake_case() {
        let json = serde_json::to_string(&EmissionScope::Scope2).unwrap();
        assert_eq!(json, "\"scope_2\"");
    }

    #[test]
    fn standard_round_trips_through_str() {
        for std in ComplianceStandard::ALL {
            assert_eq!(std.as_str().parse::<ComplianceStandard>().unwrap(), std);
        }
    }

    #[test]
    fn unknown_industry_is_a_validation_error() {
        let err = "mining".parse::<Industry>().unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }
}
