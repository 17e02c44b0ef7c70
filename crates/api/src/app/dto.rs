//! Request/response DTOs and JSON mapping helpers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use climabill_auth::UserAccount;
use climabill_core::{
    ComplianceStandard, DataQuality, Industry, PlanTier, SourceId, Tenant, TenantProfile,
};
use climabill_emissions::{
    ActivityData, FuelKind, FuelUnit, GridRegion, SourceCategory, Trip,
};

// -------------------------
// Auth
// -------------------------

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub company: CompanyRequest,
}

#[derive(Debug, Deserialize)]
pub struct CompanyRequest {
    pub name: String,
    /// Defaults to a slug of the company name.
    pub domain: Option<String>,
    pub industry: Industry,
    pub employee_count: u32,
    pub annual_revenue_usd: f64,
    pub headquarters_location: String,
    pub plan: Option<PlanTier>,
    #[serde(default)]
    pub compliance_standards: Vec<ComplianceStandard>,
}

impl CompanyRequest {
    pub fn into_profile(self) -> TenantProfile {
        let domain = match self.domain {
            Some(domain) => domain,
            None => slugify(&self.name),
        };

        TenantProfile {
            name: self.name,
            domain,
            industry: self.industry,
            employee_count: self.employee_count,
            annual_revenue_usd: self.annual_revenue_usd,
            headquarters_location: self.headquarters_location,
            plan: self.plan.unwrap_or_default(),
            compliance_standards: self.compliance_standards,
        }
    }
}

fn slugify(name: &str) -> String {
    name.trim()
        .to_ascii_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct UserDto {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: climabill_auth::Role,
}

impl UserDto {
    pub fn from_account(user: &UserAccount) -> Self {
        Self {
            id: user.id.to_string(),
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            role: user.role,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TenantDto {
    pub id: String,
    pub name: String,
    pub domain: String,
    pub plan: PlanTier,
    pub industry: Industry,
    pub employee_count: u32,
    pub annual_revenue_usd: f64,
    pub headquarters_location: String,
    pub compliance_standards: Vec<ComplianceStandard>,
    pub created_at: DateTime<Utc>,
}

impl TenantDto {
    pub fn from_tenant(tenant: &Tenant) -> Self {
        Self {
            id: tenant.id.to_string(),
            name: tenant.name.clone(),
            domain: tenant.domain.clone(),
            plan: tenant.plan,
            industry: tenant.industry,
            employee_count: tenant.employee_count,
            annual_revenue_usd: tenant.annual_revenue_usd,
            headquarters_location: tenant.headquarters_location.clone(),
            compliance_standards: tenant.compliance_standards.clone(),
            created_at: tenant.created_at,
        }
    }
}

// -------------------------
// Emissions
// -------------------------

#[derive(Debug, Deserialize)]
pub struct CreateSourceRequest {
    pub name: String,
    pub category: SourceCategory,
    pub scope: climabill_core::EmissionScope,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateEmissionRecordRequest {
    pub source_id: SourceId,
    pub period_start: DateTime<Utc>,
    pub period_end: DateTime<Utc>,
    pub activity: ActivityData,
    /// Measured figure; when absent the calculator derives one.
    pub co2e_kg: Option<f64>,
    pub emission_factor: Option<f64>,
    pub data_quality: Option<DataQuality>,
}

#[derive(Debug, Deserialize)]
pub struct SummaryQuery {
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub struct TrendQuery {
    pub months: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct TopSourcesQuery {
    pub limit: Option<usize>,
}

// -------------------------
// Targets & initiatives
// -------------------------

#[derive(Debug, Deserialize)]
pub struct CreateTargetRequest {
    pub name: String,
    pub baseline_year: i32,
    pub target_year: i32,
    pub baseline_emissions_kg: f64,
    pub reduction_percentage: f64,
    pub scope_coverage: Vec<climabill_core::EmissionScope>,
}

#[derive(Debug, Deserialize)]
pub struct CreateInitiativeRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub implementation_cost_usd: f64,
    pub annual_savings_usd: f64,
    pub annual_co2e_reduction_kg: f64,
    pub implementation_date: DateTime<Utc>,
    pub status: Option<climabill_initiatives::InitiativeStatus>,
}

// -------------------------
// Suppliers / supply chain
// -------------------------

#[derive(Debug, Deserialize)]
pub struct CreateSupplierRequest {
    pub name: String,
    #[serde(default)]
    pub industry: String,
    #[serde(default)]
    pub location: String,
    pub contact_email: String,
    #[serde(default)]
    pub annual_revenue_usd: f64,
    #[serde(default)]
    pub employee_count: u32,
    #[serde(default)]
    pub carbon_score: f64,
    pub partnership_level: Option<climabill_suppliers::PartnershipLevel>,
}

#[derive(Debug, Deserialize)]
pub struct CreateChainEmissionRequest {
    pub supplier_id: climabill_core::SupplierId,
    pub direction: climabill_suppliers::FlowDirection,
    pub scope: climabill_core::EmissionScope,
    pub co2e_kg: f64,
    #[serde(default)]
    pub activity_description: String,
    pub period_start: DateTime<Utc>,
    pub period_end: DateTime<Utc>,
    pub data_quality: Option<DataQuality>,
    pub verification_level: Option<climabill_suppliers::VerificationLevel>,
}

#[derive(Debug, Deserialize)]
pub struct CreateChainTargetRequest {
    pub name: String,
    pub baseline_year: i32,
    pub target_year: i32,
    pub reduction_percentage: f64,
    #[serde(default)]
    pub scope_coverage: Vec<climabill_core::EmissionScope>,
    #[serde(default)]
    pub participating_suppliers: Vec<climabill_core::SupplierId>,
}

// -------------------------
// Marketplace
// -------------------------

#[derive(Debug, Deserialize)]
pub struct PurchaseRequest {
    pub listing_id: String,
    pub credits_amount: f64,
}

#[derive(Debug, Deserialize)]
pub struct RetireRequest {
    pub certificate_code: String,
    pub reason: String,
}

// -------------------------
// Calculators
// -------------------------

#[derive(Debug, Deserialize)]
pub struct ElectricityCalcRequest {
    pub kwh_consumed: f64,
    #[serde(default)]
    pub region: GridRegion,
    /// 0–100, as a percentage.
    #[serde(default)]
    pub renewable_percentage: f64,
}

#[derive(Debug, Deserialize)]
pub struct FuelCalcRequest {
    pub fuel_type: FuelKind,
    pub quantity: f64,
    #[serde(default)]
    pub unit: FuelUnit,
}

#[derive(Debug, Deserialize)]
pub struct TravelCalcRequest {
    pub trips: Vec<Trip>,
}

#[derive(Debug, Deserialize)]
pub struct BenchmarkQuery {
    pub employee_count: u32,
}

#[derive(Debug, Deserialize)]
pub struct ForecastQuery {
    pub horizon_months: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct ReportQuery {
    pub year: Option<i32>,
}
