//! Emission-factor calculation engine.
//!
//! Factor values follow the EPA/DEFRA figures the platform has always used
//! (kg CO2e per unit). All functions are pure; callers supply quantities and
//! get a [`Calculation`] back with the effective factor recorded for audit.

use serde::{Deserialize, Serialize};

use climabill_core::{DomainError, DomainResult, EmissionScope, Industry};

/// Default carbon price used for cost valuation (USD per tonne CO2e).
pub const DEFAULT_CARBON_PRICE_USD_PER_TONNE: f64 = 50.0;

/// Result of a factor-based calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Calculation {
    pub co2e_kg: f64,
    pub scope: EmissionScope,
    /// Effective factor applied, in kg CO2e per input unit.
    pub emission_factor: f64,
}

/// Electricity grid mix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum GridRegion {
    #[default]
    UsAverage,
    Renewable,
    Coal,
    NaturalGas,
}

impl GridRegion {
    /// kg CO2e per kWh.
    pub fn factor(&self) -> f64 {
        match self {
            Self::UsAverage => 0.385,
            Self::Renewable => 0.012,
            Self::Coal => 0.820,
            Self::NaturalGas => 0.350,
        }
    }
}

/// Combustible fuel kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FuelKind {
    NaturalGas,
    Gasoline,
    Diesel,
    JetFuel,
}

/// Unit a fuel quantity is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FuelUnit {
    #[default]
    Liters,
    KilowattHours,
}

/// Transport mode for a business trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TravelMode {
    /// Factor selected by distance band (short/medium/long haul).
    Flight,
    CarPetrol,
    CarDiesel,
    CarElectric,
    Train,
    Bus,
}

/// One leg of business travel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trip {
    pub mode: TravelMode,
    pub distance_km: f64,
    /// Emissions are attributed per passenger; defaults to 1.
    #[serde(default = "default_passengers")]
    pub passengers: u32,
}

fn default_passengers() -> u32 {
    1
}

/// Office consumables for a reporting period.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OfficeUsage {
    pub paper_kg: Option<f64>,
    pub waste_kg: Option<f64>,
    /// Fraction of waste recycled, 0..=1. Defaults to 0.3 when waste is set.
    pub recycling_rate: Option<f64>,
    pub water_m3: Option<f64>,
}

/// Scope 2 emissions from electricity consumption.
///
/// `renewable_fraction` (0..=1) blends the grid factor with the renewable
/// factor, matching a partial green-power purchase agreement.
pub fn electricity(
    kwh: f64,
    region: GridRegion,
    renewable_fraction: f64,
) -> DomainResult<Calculation> {
    if !(0.0..=1.0).contains(&renewable_fraction) {
        return Err(DomainError::validation(
            "renewable fraction must be between 0 and 1",
        ));
    }
    if !kwh.is_finite() || kwh < 0.0 {
        return Err(DomainError::validation("kwh must be non-negative"));
    }

    let effective = region.factor() * (1.0 - renewable_fraction)
        + GridRegion::Renewable.factor() * renewable_fraction;

    Ok(Calculation {
        co2e_kg: kwh * effective,
        scope: EmissionScope::Scope2,
        emission_factor: effective,
    })
}

/// Scope 1 emissions from fuel combustion.
pub fn fuel(kind: FuelKind, quantity: f64, unit: FuelUnit) -> DomainResult<Calculation> {
    if !quantity.is_finite() || quantity < 0.0 {
        return Err(DomainError::validation("fuel quantity must be non-negative"));
    }

    let factor = match (kind, unit) {
        (FuelKind::NaturalGas, FuelUnit::KilowattHours) => 0.185,
        (FuelKind::NaturalGas, FuelUnit::Liters) => {
            return Err(DomainError::validation(
                "natural gas is metered in kilowatt hours",
            ));
        }
        (FuelKind::Gasoline, FuelUnit::Liters) => 2.31,
        (FuelKind::Diesel, FuelUnit::Liters) => 2.68,
        (FuelKind::JetFuel, FuelUnit::Liters) => 2.52,
        (_, FuelUnit::KilowattHours) => {
            return Err(DomainError::validation(
                "liquid fuels are metered in liters",
            ));
        }
    };

    Ok(Calculation {
        co2e_kg: quantity * factor,
        scope: EmissionScope::Scope1,
        emission_factor: factor,
    })
}

fn travel_factor(mode: TravelMode, distance_km: f64) -> f64 {
    match mode {
        TravelMode::Flight => {
            if distance_km < 500.0 {
                0.158
            } else if distance_km < 1500.0 {
                0.102
            } else {
                0.089
            }
        }
        TravelMode::CarPetrol => 0.168,
        TravelMode::CarDiesel => 0.165,
        TravelMode::CarElectric => 0.047,
        TravelMode::Train => 0.033,
        TravelMode::Bus => 0.082,
    }
}

/// Scope 3 emissions from business travel, attributed per passenger.
pub fn travel(trips: &[Trip]) -> DomainResult<Calculation> {
    let mut total = 0.0;
    for trip in trips {
        if !trip.distance_km.is_finite() || trip.distance_km < 0.0 {
            return Err(DomainError::validation("trip distance must be non-negative"));
        }
        let passengers = trip.passengers.max(1) as f64;
        total += trip.distance_km * travel_factor(trip.mode, trip.distance_km) / passengers;
    }

    let factor = if trips.is_empty() {
        0.0
    } else {
        total / trips.iter().map(|t| t.distance_km).sum::<f64>().max(f64::EPSILON)
    };

    Ok(Calculation {
        co2e_kg: total,
        scope: EmissionScope::Scope3,
        emission_factor: factor,
    })
}

/// Scope 3 emissions from office operations (paper, waste, water).
pub fn office(usage: &OfficeUsage) -> DomainResult<Calculation> {
    let mut total = 0.0;

    if let Some(paper_kg) = usage.paper_kg {
        total += paper_kg * 0.9;
    }

    if let Some(waste_kg) = usage.waste_kg {
        let recycling = usage.recycling_rate.unwrap_or(0.3);
        if !(0.0..=1.0).contains(&recycling) {
            return Err(DomainError::validation(
                "recycling rate must be between 0 and 1",
            ));
        }
        total += waste_kg * (1.0 - recycling) * 0.94 + waste_kg * recycling * 0.21;
    }

    if let Some(water_m3) = usage.water_m3 {
        total += water_m3 * 0.149;
    }

    Ok(Calculation {
        co2e_kg: total,
        scope: EmissionScope::Scope3,
        emission_factor: 0.0,
    })
}

/// Annual benchmark for an industry, scaled by headcount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndustryBenchmark {
    pub industry: Industry,
    pub benchmark_tonnes_per_employee: f64,
    pub total_benchmark_tonnes: f64,
    pub employee_count: u32,
}

pub fn industry_benchmark(industry: Industry, employee_count: u32) -> IndustryBenchmark {
    let per_employee = match industry {
        Industry::Saas => 4.2,
        Industry::Fintech => 5.8,
        Industry::Ecommerce => 6.5,
        Industry::Manufacturing => 15.3,
        Industry::Healthcare => 8.7,
        Industry::Consulting => 3.9,
    };

    IndustryBenchmark {
        industry,
        benchmark_tonnes_per_employee: per_employee,
        total_benchmark_tonnes: per_employee * employee_count as f64,
        employee_count,
    }
}

/// Cost of emissions at a given carbon price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarbonCost {
    pub co2e_tonnes: f64,
    pub carbon_price_per_tonne: f64,
    pub total_carbon_cost: f64,
}

pub fn carbon_cost(co2e_kg: f64, price_per_tonne: f64) -> CarbonCost {
    let tonnes = co2e_kg / 1000.0;
    CarbonCost {
        co2e_tonnes: tonnes,
        carbon_price_per_tonne: price_per_tonne,
        total_carbon_cost: tonnes * price_per_tonne,
    }
}

/// Financial value of a carbon reduction: avoided carbon cost plus any
/// direct energy savings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReductionValue {
    pub co2e_reduction_tonnes: f64,
    pub carbon_value: f64,
    pub energy_cost_savings: f64,
    pub total_financial_value: f64,
}

pub fn reduction_value(
    reduction_kg: f64,
    energy_cost_savings: f64,
    price_per_tonne: f64,
) -> ReductionValue {
    let cost = carbon_cost(reduction_kg, price_per_tonne);
    ReductionValue {
        co2e_reduction_tonnes: cost.co2e_tonnes,
        carbon_value: cost.total_carbon_cost,
        energy_cost_savings,
        total_financial_value: cost.total_carbon_cost + energy_cost_savings,
    }
}
