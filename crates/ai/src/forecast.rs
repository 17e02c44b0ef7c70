//! Statistical emissions forecasting.
//!
//! Per-scope mean/deviation over monthly history, projected across the
//! horizon with a ±1σ confidence band. Simple and explainable — forecasts
//! feed planning views, not billing.

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

use climabill_core::{DomainError, DomainResult, EmissionScope, SourceId};
use climabill_emissions::{EmissionRecord, EmissionSource};

/// Forecast for one scope over the horizon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScopeForecast {
    pub scope: EmissionScope,
    pub predicted_kg: f64,
    pub lower_kg: f64,
    pub upper_kg: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmissionForecast {
    pub generated_at: DateTime<Utc>,
    pub horizon_months: u32,
    pub by_scope: Vec<ScopeForecast>,
    pub total_predicted_kg: f64,
    pub assumptions: Vec<String>,
}

fn monthly_scope_series(
    records: &[EmissionRecord],
    sources: &[EmissionSource],
) -> BTreeMap<(i32, u32), [f64; 3]> {
    let scope_of: std::collections::HashMap<SourceId, EmissionScope> =
        sources.iter().map(|s| (s.id, s.scope)).collect();

    let mut months: BTreeMap<(i32, u32), [f64; 3]> = BTreeMap::new();
    for record in records {
        let scope = scope_of
            .get(&record.source_id)
            .copied()
            .unwrap_or(EmissionScope::Scope3);
        let key = (record.period_start.year(), record.period_start.month());
        let bucket = months.entry(key).or_insert([0.0; 3]);
        match scope {
            EmissionScope::Scope1 => bucket[0] += record.co2e_kg,
            EmissionScope::Scope2 => bucket[1] += record.co2e_kg,
            EmissionScope::Scope3 => bucket[2] += record.co2e_kg,
        }
    }
    months
}

fn mean_and_stddev(values: &[f64]) -> (f64, f64) {
    if values.is_empty() {
        return (0.0, 0.0);
    }
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    let variance =
        values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
    (mean, variance.sqrt())
}

/// Project the monthly history `horizon_months` forward.
pub fn forecast_emissions(
    records: &[EmissionRecord],
    sources: &[EmissionSource],
    horizon_months: u32,
    generated_at: DateTime<Utc>,
) -> DomainResult<EmissionForecast> {
    if horizon_months == 0 || horizon_months > 60 {
        return Err(DomainError::validation(
            "forecast horizon must be between 1 and 60 months",
        ));
    }

    let months = monthly_scope_series(records, sources);
    let horizon = horizon_months as f64;

    let by_scope: Vec<ScopeForecast> = EmissionScope::ALL
        .iter()
        .enumerate()
        .map(|(i, &scope)| {
            let series: Vec<f64> = months.values().map(|bucket| bucket[i]).collect();
            let (mean, stddev) = mean_and_stddev(&series);

            ScopeForecast {
                scope,
                predicted_kg: mean * horizon,
                lower_kg: ((mean - stddev) * horizon).max(0.0),
                upper_kg: (mean + stddev) * horizon,
            }
        })
        .collect();

    let total = by_scope.iter().map(|s| s.predicted_kg).sum();

    Ok(EmissionForecast {
        generated_at,
        horizon_months,
        by_scope,
        total_predicted_kg: total,
        assumptions: vec![
            "Statistical forecast based on historical monthly totals".to_string(),
            "Assumes current business operations continue".to_string(),
        ],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    use climabill_core::{DataQuality, TenantId};
    use climabill_emissions::{ActivityData, SourceCategory};

    fn fixture(kgs: &[f64]) -> (Vec<EmissionRecord>, Vec<EmissionSource>) {
        let tenant = TenantId::new();
        let source = EmissionSource::new(
            tenant,
            "Grid",
            SourceCategory::Electricity,
            EmissionScope::Scope2,
            None,
        )
        .unwrap();

        let records = kgs
            .iter()
            .enumerate()
            .map(|(i, &kg)| {
                let month = i as u32 + 1;
                EmissionRecord::from_activity(
                    tenant,
                    source.id,
                    Utc.with_ymd_and_hms(2026, month, 1, 0, 0, 0).unwrap(),
                    Utc.with_ymd_and_hms(2026, month, 28, 0, 0, 0).unwrap(),
                    ActivityData::Other {
                        description: "t".to_string(),
                        quantity: 1.0,
                        unit: "u".to_string(),
                    },
                    Some(kg),
                    None,
                    Some(DataQuality::Measured),
                    Utc::now(),
                )
                .unwrap()
            })
            .collect();

        (records, vec![source])
    }

    #[test]
    fn flat_history_projects_linearly() {
        let (records, sources) = fixture(&[100.0, 100.0, 100.0]);
        let forecast = forecast_emissions(&records, &sources, 12, Utc::now()).unwrap();

        let scope2 = forecast
            .by_scope
            .iter()
            .find(|s| s.scope == EmissionScope::Scope2)
            .unwrap();
        assert!((scope2.predicted_kg - 1200.0).abs() < 1e-9);
        // Zero variance: the band collapses to the point estimate.
        assert!((scope2.lower_kg - 1200.0).abs() < 1e-9);
        assert!((scope2.upper_kg - 1200.0).abs() < 1e-9);
    }

    #[test]
    fn variance_widens_the_band() {
        let (records, sources) = fixture(&[50.0, 150.0]);
        let forecast = forecast_emissions(&records, &sources, 6, Utc::now()).unwrap();

        let scope2 = forecast
            .by_scope
            .iter()
            .find(|s| s.scope == EmissionScope::Scope2)
            .unwrap();
        assert!((scope2.predicted_kg - 600.0).abs() < 1e-9);
        assert!(scope2.lower_kg < scope2.predicted_kg);
        assert!(scope2.upper_kg > scope2.predicted_kg);
    }

    #[test]
    fn empty_history_forecasts_zero() {
        let forecast = forecast_emissions(&[], &[], 12, Utc::now()).unwrap();
        assert_eq!(forecast.total_predicted_kg, 0.0);
        assert!(forecast.by_scope.iter().all(|s| s.upper_kg == 0.0));
    }

    #[test]
    fn horizon_is_bounded() {
        assert!(forecast_emissions(&[], &[], 0, Utc::now()).is_err());
        assert!(forecast_emissions(&[], &[], 61, Utc::now()).is_err());
    }
}
