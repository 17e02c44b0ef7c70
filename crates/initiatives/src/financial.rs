//! Financial impact of the initiative portfolio.

use serde::{Deserialize, Serialize};

use climabill_emissions::{carbon_cost, reduction_value, DEFAULT_CARBON_PRICE_USD_PER_TONNE};

use crate::initiative::ReductionInitiative;

/// Payback figure reported when a portfolio has no savings at all; keeps the
/// JSON surface free of infinities.
const PAYBACK_CAP_YEARS: f64 = 999.0;

/// Portfolio-level financial summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialImpact {
    pub total_carbon_investment_usd: f64,
    pub annual_cost_savings_usd: f64,
    pub annual_co2e_reduction_kg: f64,
    pub current_annual_carbon_cost_usd: f64,
    pub annual_roi_percentage: f64,
    pub payback_period_years: f64,
    pub carbon_reduction_value_usd: f64,
}

/// Fold the initiative portfolio and current emissions into one summary.
pub fn financial_impact(
    initiatives: &[ReductionInitiative],
    current_annual_emissions_kg: f64,
) -> FinancialImpact {
    let total_investment: f64 = initiatives.iter().map(|i| i.implementation_cost_usd).sum();
    let annual_savings: f64 = initiatives.iter().map(|i| i.annual_savings_usd).sum();
    let annual_reduction: f64 = initiatives
        .iter()
        .map(|i| i.annual_co2e_reduction_kg)
        .sum();

    let current_cost = carbon_cost(
        current_annual_emissions_kg,
        DEFAULT_CARBON_PRICE_USD_PER_TONNE,
    );

    let annual_roi = if total_investment > 0.0 {
        annual_savings / total_investment * 100.0
    } else {
        0.0
    };

    let payback = if annual_savings > 0.0 {
        (total_investment / annual_savings).min(PAYBACK_CAP_YEARS)
    } else {
        PAYBACK_CAP_YEARS
    };

    let reduction = reduction_value(annual_reduction, 0.0, DEFAULT_CARBON_PRICE_USD_PER_TONNE);

    FinancialImpact {
        total_carbon_investment_usd: total_investment,
        annual_cost_savings_usd: annual_savings,
        annual_co2e_reduction_kg: annual_reduction,
        current_annual_carbon_cost_usd: current_cost.total_carbon_cost,
        annual_roi_percentage: annual_roi,
        payback_period_years: payback,
        carbon_reduction_value_usd: reduction.total_financial_value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    use climabill_core::TenantId;

    use crate::initiative::InitiativeStatus;

    fn initiative(cost: f64, savings: f64, reduction_kg: f64) -> ReductionInitiative {
        ReductionInitiative::new(
            TenantId::new(),
            "Test",
            "",
            cost,
            savings,
            reduction_kg,
            Utc::now(),
            InitiativeStatus::Planned,
            Utc::now(),
        )
        .unwrap()
    }

    #[test]
    fn sums_roi_and_payback() {
        let portfolio = vec![
            initiative(10_000.0, 2_000.0, 5_000.0),
            initiative(20_000.0, 10_000.0, 15_000.0),
        ];
        let impact = financial_impact(&portfolio, 200_000.0);

        assert!((impact.total_carbon_investment_usd - 30_000.0).abs() < 1e-9);
        assert!((impact.annual_cost_savings_usd - 12_000.0).abs() < 1e-9);
        assert!((impact.annual_roi_percentage - 40.0).abs() < 1e-9);
        assert!((impact.payback_period_years - 2.5).abs() < 1e-9);
        // 200 tonnes at $50/tonne.
        assert!((impact.current_annual_carbon_cost_usd - 10_000.0).abs() < 1e-9);
    }

    #[test]
    fn no_savings_caps_payback() {
        let portfolio = vec![initiative(10_000.0, 0.0, 5_000.0)];
        let impact = financial_impact(&portfolio, 0.0);
        assert_eq!(impact.payback_period_years, 999.0);
        assert_eq!(impact.annual_roi_percentage, 0.0);
    }

    #[test]
    fn empty_portfolio_is_all_zeroes() {
        let impact = financial_impact(&[], 50_000.0);
        assert_eq!(impact.total_carbon_investment_usd, 0.0);
        assert_eq!(impact.annual_co2e_reduction_kg, 0.0);
        assert!((impact.current_annual_carbon_cost_usd - 2_500.0).abs() < 1e-9);
    }
}
