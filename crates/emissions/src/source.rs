//! Emission sources — the registry entries that records attach to.

use serde::{Deserialize, Serialize};

use climabill_core::{DomainError, DomainResult, EmissionScope, Industry, SourceId, TenantId};

/// Activity category of an emission source.
///
/// This is the closed vocabulary the activity payload is keyed by; anything
/// that does not fit the first three buckets is `Other` and must carry a
/// measured or externally calculated figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceCategory {
    Electricity,
    Fuel,
    Travel,
    Other,
}

impl SourceCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Electricity => "electricity",
            Self::Fuel => "fuel",
            Self::Travel => "travel",
            Self::Other => "other",
        }
    }
}

impl core::fmt::Display for SourceCategory {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named emission source within a tenant (e.g. "Office Electricity").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmissionSource {
    pub id: SourceId,
    pub tenant_id: TenantId,
    pub name: String,
    pub category: SourceCategory,
    pub scope: EmissionScope,
    pub description: Option<String>,
}

impl EmissionSource {
    pub fn new(
        tenant_id: TenantId,
        name: &str,
        category: SourceCategory,
        scope: EmissionScope,
        description: Option<String>,
    ) -> DomainResult<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::validation("source name cannot be empty"));
        }

        Ok(Self {
            id: SourceId::new(),
            tenant_id,
            name: name.to_string(),
            category,
            scope,
            description,
        })
    }
}

/// Default emission sources seeded for a newly registered tenant.
///
/// Office-based industries get the knowledge-work set; manufacturing gets a
/// production-oriented set.
pub fn default_sources_for_industry(
    tenant_id: TenantId,
    industry: Industry,
) -> Vec<EmissionSource> {
    let specs: &[(&str, SourceCategory, EmissionScope)] = match industry {
        Industry::Manufacturing => &[
            ("Production Electricity", SourceCategory::Electricity, EmissionScope::Scope2),
            ("Industrial Processes", SourceCategory::Fuel, EmissionScope::Scope1),
            ("Raw Materials", SourceCategory::Other, EmissionScope::Scope3),
            ("Logistics", SourceCategory::Travel, EmissionScope::Scope3),
            ("Waste Management", SourceCategory::Other, EmissionScope::Scope3),
        ],
        _ => &[
            ("Office Electricity", SourceCategory::Electricity, EmissionScope::Scope2),
            ("Office Heating", SourceCategory::Fuel, EmissionScope::Scope1),
            ("Business Travel", SourceCategory::Travel, EmissionScope::Scope3),
            ("Employee Commuting", SourceCategory::Travel, EmissionScope::Scope3),
            ("Cloud Services", SourceCategory::Other, EmissionScope::Scope3),
        ],
    };

    specs
        .iter()
        .map(|(name, category, scope)| EmissionSource {
            id: SourceId::new(),
            tenant_id,
            name: (*name).to_string(),
            category: *category,
            scope: *scope,
            description: None,
        })
        .collect()
}
