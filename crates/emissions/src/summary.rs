//! Reporting aggregations over tenant record sets.
//!
//! These are pure folds over already-tenant-scoped slices; the API layer is
//! responsible for fetching records through a store parameterized by the
//! authorizer-resolved tenant id.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Datelike, Months, Utc};
use serde::{Deserialize, Serialize};

use climabill_core::{EmissionScope, SourceId};

use crate::record::EmissionRecord;
use crate::source::{EmissionSource, SourceCategory};

/// Per-scope totals in kg CO2e.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScopeTotals {
    pub scope_1: f64,
    pub scope_2: f64,
    pub scope_3: f64,
}

impl ScopeTotals {
    pub fn add(&mut self, scope: EmissionScope, kg: f64) {
        match scope {
            EmissionScope::Scope1 => self.scope_1 += kg,
            EmissionScope::Scope2 => self.scope_2 += kg,
            EmissionScope::Scope3 => self.scope_3 += kg,
        }
    }

    pub fn get(&self, scope: EmissionScope) -> f64 {
        match scope {
            EmissionScope::Scope1 => self.scope_1,
            EmissionScope::Scope2 => self.scope_2,
            EmissionScope::Scope3 => self.scope_3,
        }
    }

    pub fn total(&self) -> f64 {
        self.scope_1 + self.scope_2 + self.scope_3
    }
}

/// Emissions summary over a reporting window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmissionSummary {
    pub period_start: DateTime<Utc>,
    pub period_end: DateTime<Utc>,
    pub total_co2e_kg: f64,
    pub scope_breakdown: ScopeTotals,
    /// Totals per source category, keyed by the category's wire name.
    pub category_breakdown: BTreeMap<String, f64>,
    pub record_count: usize,
}

/// One month in a trend series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyEmissions {
    pub year: i32,
    pub month: u32,
    pub total_co2e_kg: f64,
    pub record_count: usize,
}

/// A source ranked by total emissions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceTotal {
    pub source_id: SourceId,
    pub name: String,
    pub category: SourceCategory,
    pub scope: EmissionScope,
    pub total_co2e_kg: f64,
    pub record_count: usize,
}

fn scope_index(sources: &[EmissionSource]) -> HashMap<SourceId, &EmissionSource> {
    sources.iter().map(|s| (s.id, s)).collect()
}

/// Summarize records whose period overlaps the window.
///
/// Records referencing an unknown source keep their kg in the total but
/// fall into the `other` category bucket with scope 3 — a record must never
/// silently vanish from the books.
pub fn summarize(
    records: &[EmissionRecord],
    sources: &[EmissionSource],
    window_start: DateTime<Utc>,
    window_end: DateTime<Utc>,
) -> EmissionSummary {
    let index = scope_index(sources);

    let mut scope_breakdown = ScopeTotals::default();
    let mut category_breakdown: BTreeMap<String, f64> = BTreeMap::new();
    let mut record_count = 0;

    for record in records {
        if record.period_end < window_start || record.period_start > window_end {
            continue;
        }
        record_count += 1;

        let (scope, category) = match index.get(&record.source_id) {
            Some(source) => (source.scope, source.category),
            None => (EmissionScope::Scope3, SourceCategory::Other),
        };

        scope_breakdown.add(scope, record.co2e_kg);
        *category_breakdown
            .entry(category.as_str().to_string())
            .or_insert(0.0) += record.co2e_kg;
    }

    EmissionSummary {
        period_start: window_start,
        period_end: window_end,
        total_co2e_kg: scope_breakdown.total(),
        scope_breakdown,
        category_breakdown,
        record_count,
    }
}

/// Month-bucketed totals for the trailing `months` months, oldest first.
/// Months with no records are present with zero totals so charts keep a
/// continuous axis.
pub fn trend(records: &[EmissionRecord], months: u32, now: DateTime<Utc>) -> Vec<MonthlyEmissions> {
    let months = months.clamp(1, 120);
    let window_start = now - Months::new(months);

    let mut buckets: BTreeMap<(i32, u32), (f64, usize)> = BTreeMap::new();
    for offset in (0..months).rev() {
        let point = now - Months::new(offset);
        buckets.insert((point.year(), point.month()), (0.0, 0));
    }

    for record in records {
        if record.period_start < window_start || record.period_start > now {
            continue;
        }
        let key = (record.period_start.year(), record.period_start.month());
        if let Some((kg, count)) = buckets.get_mut(&key) {
            *kg += record.co2e_kg;
            *count += 1;
        }
    }

    buckets
        .into_iter()
        .map(|((year, month), (total_co2e_kg, record_count))| MonthlyEmissions {
            year,
            month,
            total_co2e_kg,
            record_count,
        })
        .collect()
}

/// Sources ranked by total emissions, highest first, truncated to `limit`.
pub fn top_sources(
    records: &[EmissionRecord],
    sources: &[EmissionSource],
    limit: usize,
) -> Vec<SourceTotal> {
    let mut totals: HashMap<SourceId, (f64, usize)> = HashMap::new();
    for record in records {
        let entry = totals.entry(record.source_id).or_insert((0.0, 0));
        entry.0 += record.co2e_kg;
        entry.1 += 1;
    }

    let index = scope_index(sources);
    let mut ranked: Vec<SourceTotal> = totals
        .into_iter()
        .filter_map(|(source_id, (total_co2e_kg, record_count))| {
            index.get(&source_id).map(|source| SourceTotal {
                source_id,
                name: source.name.clone(),
                category: source.category,
                scope: source.scope,
                total_co2e_kg,
                record_count,
            })
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.total_co2e_kg
            .partial_cmp(&a.total_co2e_kg)
            .unwrap_or(core::cmp::Ordering::Equal)
    });
    ranked.truncate(limit);
    ranked
}
