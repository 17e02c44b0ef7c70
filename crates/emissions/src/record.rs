//! Emission records and the tagged activity-data payload.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use climabill_core::{DataQuality, DomainError, DomainResult, RecordId, SourceId, TenantId};

use crate::calculator::{self, Calculation, FuelKind, FuelUnit, GridRegion, Trip};
use crate::source::SourceCategory;

/// Activity payload of an emission record, keyed by source category.
///
/// A closed union instead of an open map: each variant carries exactly the
/// fields its calculation needs, and `Other` is the only escape hatch — it
/// requires an externally supplied co2e figure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ActivityData {
    Electricity {
        kwh: f64,
        #[serde(default)]
        grid_region: GridRegion,
        #[serde(default)]
        renewable_fraction: f64,
    },
    Fuel {
        fuel: FuelKind,
        quantity: f64,
        #[serde(default)]
        unit: FuelUnit,
    },
    Travel {
        trips: Vec<Trip>,
    },
    Other {
        description: String,
        quantity: f64,
        unit: String,
    },
}

impl ActivityData {
    pub fn category(&self) -> SourceCategory {
        match self {
            Self::Electricity { .. } => SourceCategory::Electricity,
            Self::Fuel { .. } => SourceCategory::Fuel,
            Self::Travel { .. } => SourceCategory::Travel,
            Self::Other { .. } => SourceCategory::Other,
        }
    }

    /// Run the calculator for this payload. `Other` activities cannot be
    /// derived and return `None`.
    pub fn calculate(&self) -> DomainResult<Option<Calculation>> {
        match self {
            Self::Electricity {
                kwh,
                grid_region,
                renewable_fraction,
            } => calculator::electricity(*kwh, *grid_region, *renewable_fraction).map(Some),
            Self::Fuel { fuel, quantity, unit } => {
                calculator::fuel(*fuel, *quantity, *unit).map(Some)
            }
            Self::Travel { trips } => calculator::travel(trips).map(Some),
            Self::Other { .. } => Ok(None),
        }
    }
}

/// A tenant-owned emissions measurement over a reporting period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmissionRecord {
    pub id: RecordId,
    pub tenant_id: TenantId,
    pub source_id: SourceId,
    pub period_start: DateTime<Utc>,
    pub period_end: DateTime<Utc>,
    pub co2e_kg: f64,
    pub activity: ActivityData,
    pub emission_factor: f64,
    pub data_quality: DataQuality,
    pub created_at: DateTime<Utc>,
}

impl EmissionRecord {
    /// Build a record from an activity payload.
    ///
    /// When the caller supplies a measured `co2e_kg` it wins (quality
    /// defaults to `Measured`); otherwise the figure is derived from the
    /// payload (quality `Calculated`). An `Other` payload without a measured
    /// figure is rejected — there is nothing to derive it from.
    pub fn from_activity(
        tenant_id: TenantId,
        source_id: SourceId,
        period_start: DateTime<Utc>,
        period_end: DateTime<Utc>,
        activity: ActivityData,
        measured_co2e_kg: Option<f64>,
        measured_factor: Option<f64>,
        data_quality: Option<DataQuality>,
        created_at: DateTime<Utc>,
    ) -> DomainResult<Self> {
        if period_end <= period_start {
            return Err(DomainError::validation(
                "reporting period must end after it starts",
            ));
        }

        if let Some(kg) = measured_co2e_kg {
            if !kg.is_finite() || kg < 0.0 {
                return Err(DomainError::validation("co2e must be non-negative"));
            }
        }

        let (co2e_kg, emission_factor, quality) = match (measured_co2e_kg, activity.calculate()?) {
            (Some(kg), _) => (
                kg,
                measured_factor.unwrap_or(0.0),
                data_quality.unwrap_or(DataQuality::Measured),
            ),
            (None, Some(calc)) => (
                calc.co2e_kg,
                calc.emission_factor,
                data_quality.unwrap_or(DataQuality::Calculated),
            ),
            (None, None) => {
                return Err(DomainError::validation(
                    "a co2e figure is required for 'other' activity data",
                ));
            }
        };

        Ok(Self {
            id: RecordId::new(),
            tenant_id,
            source_id,
            period_start,
            period_end,
            co2e_kg,
            activity,
            emission_factor,
            data_quality: quality,
            created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn period() -> (DateTime<Utc>, DateTime<Utc>) {
        (
            Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2026, 1, 31, 0, 0, 0).unwrap(),
        )
    }

    #[test]
    fn derives_co2e_from_electricity_payload() {
        let (start, end) = period();
        let record = EmissionRecord::from_activity(
            TenantId::new(),
            SourceId::new(),
            start,
            end,
            ActivityData::Electricity {
                kwh: 1000.0,
                grid_region: GridRegion::UsAverage,
                renewable_fraction: 0.0,
            },
            None,
            None,
            None,
            Utc::now(),
        )
        .unwrap();

        assert!((record.co2e_kg - 385.0).abs() < 1e-9);
        assert_eq!(record.data_quality, DataQuality::Calculated);
    }

    #[test]
    fn measured_figure_wins_over_derivation() {
        let (start, end) = period();
        let record = EmissionRecord::from_activity(
            TenantId::new(),
            SourceId::new(),
            start,
            end,
            ActivityData::Electricity {
                kwh: 1000.0,
                grid_region: GridRegion::UsAverage,
                renewable_fraction: 0.0,
            },
            Some(410.5),
            Some(0.41),
            None,
            Utc::now(),
        )
        .unwrap();

        assert_eq!(record.co2e_kg, 410.5);
        assert_eq!(record.data_quality, DataQuality::Measured);
    }

    #[test]
    fn other_without_measurement_rejected() {
        let (start, end) = period();
        let err = EmissionRecord::from_activity(
            TenantId::new(),
            SourceId::new(),
            start,
            end,
            ActivityData::Other {
                description: "refrigerant top-up".to_string(),
                quantity: 3.0,
                unit: "kg".to_string(),
            },
            None,
            None,
            None,
            Utc::now(),
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn inverted_period_rejected() {
        let (start, end) = period();
        let err = EmissionRecord::from_activity(
            TenantId::new(),
            SourceId::new(),
            end,
            start,
            ActivityData::Travel { trips: vec![] },
            None,
            None,
            None,
            Utc::now(),
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn activity_serde_is_tagged() {
        let activity = ActivityData::Fuel {
            fuel: FuelKind::Diesel,
            quantity: 50.0,
            unit: FuelUnit::Liters,
        };
        let json = serde_json::to_value(&activity).unwrap();
        assert_eq!(json["kind"], "fuel");
        assert_eq!(json["fuel"], "diesel");

        let back: ActivityData = serde_json::from_value(json).unwrap();
        assert_eq!(back, activity);
    }
}
