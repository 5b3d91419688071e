use super::money::{format_dollars, percent_to_fraction};
use super::types::{
    BracketTax, FederalTaxInputs, FederalTaxResult, FilingStatus, SelfEmploymentInputs,
    SelfEmploymentResult, TakeHomeInputs, TakeHomeResult, TaxBracket,
};

pub const SE_TAXABLE_SHARE: f64 = 0.9235;
pub const SOCIAL_SECURITY_WAGE_BASE: f64 = 168_600.0;
pub const SE_SOCIAL_SECURITY_RATE: f64 = 0.124;
pub const SE_MEDICARE_RATE: f64 = 0.029;
pub const EMPLOYEE_SOCIAL_SECURITY_RATE: f64 = 0.062;
pub const EMPLOYEE_MEDICARE_RATE: f64 = 0.0145;
pub const ADDITIONAL_MEDICARE_RATE: f64 = 0.009;
/// Net self-employment income above which the surtax applies, for every filing status.
pub const SE_ADDITIONAL_MEDICARE_THRESHOLD: f64 = 200_000.0;

const fn bracket(min: f64, max: f64, rate: f64) -> TaxBracket {
    TaxBracket { min, max, rate }
}

const SINGLE_BRACKETS: [TaxBracket; 7] = [
    bracket(0.0, 11_600.0, 0.10),
    bracket(11_600.0, 47_150.0, 0.12),
    bracket(47_150.0, 100_525.0, 0.22),
    bracket(100_525.0, 191_950.0, 0.24),
    bracket(191_950.0, 243_725.0, 0.32),
    bracket(243_725.0, 609_350.0, 0.35),
    bracket(609_350.0, f64::INFINITY, 0.37),
];

const MARRIED_JOINTLY_BRACKETS: [TaxBracket; 7] = [
    bracket(0.0, 23_200.0, 0.10),
    bracket(23_200.0, 94_300.0, 0.12),
    bracket(94_300.0, 201_050.0, 0.22),
    bracket(201_050.0, 383_900.0, 0.24),
    bracket(383_900.0, 487_450.0, 0.32),
    bracket(487_450.0, 731_200.0, 0.35),
    bracket(731_200.0, f64::INFINITY, 0.37),
];

const MARRIED_SEPARATELY_BRACKETS: [TaxBracket; 7] = [
    bracket(0.0, 11_600.0, 0.10),
    bracket(11_600.0, 47_150.0, 0.12),
    bracket(47_150.0, 100_525.0, 0.22),
    bracket(100_525.0, 191_950.0, 0.24),
    bracket(191_950.0, 243_725.0, 0.32),
    bracket(243_725.0, 365_600.0, 0.35),
    bracket(365_600.0, f64::INFINITY, 0.37),
];

const HEAD_OF_HOUSEHOLD_BRACKETS: [TaxBracket; 7] = [
    bracket(0.0, 16_550.0, 0.10),
    bracket(16_550.0, 63_100.0, 0.12),
    bracket(63_100.0, 100_500.0, 0.22),
    bracket(100_500.0, 191_950.0, 0.24),
    bracket(191_950.0, 243_700.0, 0.32),
    bracket(243_700.0, 609_350.0, 0.35),
    bracket(609_350.0, f64::INFINITY, 0.37),
];

impl FilingStatus {
    pub fn standard_deduction(self) -> f64 {
        match self {
            FilingStatus::Single | FilingStatus::MarriedSeparately => 14_600.0,
            FilingStatus::MarriedJointly => 29_200.0,
            FilingStatus::HeadOfHousehold => 21_900.0,
        }
    }

    pub fn brackets(self) -> &'static [TaxBracket] {
        match self {
            FilingStatus::Single => &SINGLE_BRACKETS,
            FilingStatus::MarriedJointly => &MARRIED_JOINTLY_BRACKETS,
            FilingStatus::MarriedSeparately => &MARRIED_SEPARATELY_BRACKETS,
            FilingStatus::HeadOfHousehold => &HEAD_OF_HOUSEHOLD_BRACKETS,
        }
    }

    /// Wage threshold for the 0.9% employee surtax.
    pub fn additional_medicare_threshold(self) -> f64 {
        match self {
            FilingStatus::Single | FilingStatus::HeadOfHousehold => 200_000.0,
            FilingStatus::MarriedJointly => 250_000.0,
            FilingStatus::MarriedSeparately => 125_000.0,
        }
    }
}

pub fn calculate_federal_tax(inputs: &FederalTaxInputs) -> FederalTaxResult {
    let status = inputs.filing_status;
    let deduction = inputs
        .deduction
        .unwrap_or_else(|| status.standard_deduction())
        .max(0.0);
    let taxable_income = (inputs.income - deduction).max(0.0);

    let mut federal_tax = 0.0;
    let mut marginal_rate = 0.0;
    let mut bracket_breakdown = Vec::new();

    for band in status.brackets() {
        if taxable_income <= band.min {
            break;
        }
        let portion = taxable_income.min(band.max) - band.min;
        let tax = portion * band.rate;
        federal_tax += tax;
        marginal_rate = band.rate;
        if tax > 0.0 {
            bracket_breakdown.push(BracketTax {
                bracket: bracket_label(band),
                tax,
                rate: band.rate,
            });
        }
    }

    FederalTaxResult {
        taxable_income,
        deduction,
        federal_tax,
        effective_rate: if inputs.income > 0.0 {
            federal_tax / inputs.income
        } else {
            0.0
        },
        marginal_rate,
        bracket_breakdown,
    }
}

/// Filing status only feeds the income tax estimate; the SE tax itself is status-independent.
pub fn calculate_self_employment_tax(inputs: &SelfEmploymentInputs) -> SelfEmploymentResult {
    let net = inputs.net_income;
    if net <= 0.0 {
        return SelfEmploymentResult::default();
    }

    let se_taxable_income = net * SE_TAXABLE_SHARE;
    let social_security_tax = se_taxable_income.min(SOCIAL_SECURITY_WAGE_BASE) * SE_SOCIAL_SECURITY_RATE;
    let medicare_tax = se_taxable_income * SE_MEDICARE_RATE;
    // Threshold compares net income, cap uses SE-taxable income.
    let additional_medicare_tax = (net - SE_ADDITIONAL_MEDICARE_THRESHOLD)
        .max(0.0)
        .min(se_taxable_income)
        * ADDITIONAL_MEDICARE_RATE;

    let se_tax = social_security_tax + medicare_tax + additional_medicare_tax;
    let deductible_half = se_tax / 2.0;

    let estimated_income_tax = calculate_federal_tax(&FederalTaxInputs {
        income: net - deductible_half,
        filing_status: inputs.filing_status,
        deduction: None,
    })
    .federal_tax;
    let total_tax = se_tax + estimated_income_tax;

    SelfEmploymentResult {
        se_taxable_income,
        social_security_tax,
        medicare_tax,
        additional_medicare_tax,
        se_tax,
        deductible_half,
        estimated_income_tax,
        total_tax,
        quarterly_payment: total_tax / 4.0,
        effective_rate: total_tax / net,
    }
}

pub fn calculate_take_home_pay(inputs: &TakeHomeInputs) -> TakeHomeResult {
    let gross = inputs.gross_salary;
    if gross <= 0.0 {
        return TakeHomeResult::default();
    }

    let pre_tax_deductions = inputs.pre_tax_deductions.clamp(0.0, gross);
    let adjusted_gross = gross - pre_tax_deductions;

    let federal = calculate_federal_tax(&FederalTaxInputs {
        income: adjusted_gross,
        filing_status: inputs.filing_status,
        deduction: None,
    });
    let social_security_tax = gross.min(SOCIAL_SECURITY_WAGE_BASE) * EMPLOYEE_SOCIAL_SECURITY_RATE;
    let medicare_tax = gross * EMPLOYEE_MEDICARE_RATE
        + (gross - inputs.filing_status.additional_medicare_threshold()).max(0.0)
            * ADDITIONAL_MEDICARE_RATE;
    let state_tax = adjusted_gross * percent_to_fraction(inputs.state_tax_rate.clamp(0.0, 100.0));

    let total_tax = federal.federal_tax + social_security_tax + medicare_tax + state_tax;
    let net_annual = adjusted_gross - total_tax;

    TakeHomeResult {
        gross_salary: gross,
        pre_tax_deductions,
        federal_tax: federal.federal_tax,
        social_security_tax,
        medicare_tax,
        state_tax,
        total_tax,
        net_annual,
        net_monthly: net_annual / 12.0,
        net_per_paycheck: net_annual / inputs.pay_frequency.periods_per_year() as f64,
        effective_tax_rate: total_tax / gross,
        marginal_rate: federal.marginal_rate,
    }
}

fn bracket_label(band: &TaxBracket) -> String {
    if band.max.is_finite() {
        format!("{} - {}", format_dollars(band.min), format_dollars(band.max))
    } else {
        format!("{}+", format_dollars(band.min))
    }
}
