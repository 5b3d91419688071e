use super::money::{percent_to_fraction, round_cents};
use super::types::{
    CompoundInputs, CompoundResult, GrowthYear, RetirementInputs, RetirementResult, RetirementYear,
};

/// Horizon cap for year-by-year projections.
pub const MAX_PROJECTION_YEARS: u32 = 150;

pub fn calculate_compound_interest(inputs: &CompoundInputs) -> CompoundResult {
    let years = inputs.years.min(MAX_PROJECTION_YEARS);
    let annual_contribution = inputs.monthly_contribution * 12.0;
    let total_contributions = inputs.principal + annual_contribution * years as f64;

    if inputs.annual_rate <= 0.0 || years == 0 {
        return CompoundResult {
            future_value: total_contributions,
            total_contributions,
            total_interest: 0.0,
            yearly_breakdown: Vec::new(),
        };
    }

    let periods = inputs.frequency.periods_per_year();
    let rate_per_period = percent_to_fraction(inputs.annual_rate) / periods as f64;
    let contribution_per_period = annual_contribution / periods as f64;

    let mut balance = inputs.principal;
    let mut yearly_breakdown = Vec::with_capacity(years as usize);
    for year in 1..=years {
        balance = grow_one_year(balance, rate_per_period, contribution_per_period, periods);
        let contributions = inputs.principal + annual_contribution * year as f64;
        yearly_breakdown.push(GrowthYear {
            year,
            contributions,
            interest: (balance - contributions).max(0.0),
            balance: round_cents(balance),
        });
    }

    CompoundResult {
        future_value: balance,
        total_contributions,
        total_interest: balance - total_contributions,
        yearly_breakdown,
    }
}

pub fn calculate_retirement(inputs: &RetirementInputs) -> RetirementResult {
    let withdrawal = percent_to_fraction(inputs.withdrawal_rate.max(0.0)) / 12.0;

    if inputs.retirement_age <= inputs.current_age {
        return RetirementResult {
            years_to_retirement: 0,
            projected_balance: inputs.current_savings,
            inflation_adjusted_balance: inputs.current_savings,
            total_contributions: inputs.current_savings,
            total_growth: 0.0,
            monthly_retirement_income: inputs.current_savings * withdrawal,
            inflation_adjusted_monthly_income: inputs.current_savings * withdrawal,
            yearly_projection: Vec::new(),
        };
    }

    let years = (inputs.retirement_age - inputs.current_age).min(MAX_PROJECTION_YEARS);
    let monthly_rate = percent_to_fraction(inputs.annual_return) / 12.0;
    let inflation = 1.0 + percent_to_fraction(inputs.inflation_rate);
    let annual_contribution = inputs.monthly_contribution * 12.0;

    let mut balance = inputs.current_savings;
    let mut yearly_projection = Vec::with_capacity(years as usize);
    for year in 1..=years {
        balance = grow_one_year(balance, monthly_rate, inputs.monthly_contribution, 12);
        yearly_projection.push(RetirementYear {
            age: inputs.current_age + year,
            year,
            balance: round_cents(balance),
            inflation_adjusted: round_cents(balance / inflation.powi(year as i32)),
            contributions: round_cents(inputs.current_savings + annual_contribution * year as f64),
        });
    }

    let total_contributions = inputs.current_savings + annual_contribution * years as f64;
    let inflation_adjusted_balance = balance / inflation.powi(years as i32);

    RetirementResult {
        years_to_retirement: years,
        projected_balance: balance,
        inflation_adjusted_balance,
        total_contributions,
        total_growth: (balance - total_contributions).max(0.0),
        monthly_retirement_income: balance * withdrawal,
        inflation_adjusted_monthly_income: inflation_adjusted_balance * withdrawal,
        yearly_projection,
    }
}

fn grow_one_year(mut balance: f64, rate_per_period: f64, contribution: f64, periods: u32) -> f64 {
    for _ in 0..periods {
        balance = balance * (1.0 + rate_per_period) + contribution;
    }
    balance
}
