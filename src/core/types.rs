use std::collections::BTreeMap;

use serde::Serialize;

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CompoundingFrequency {
    Daily,
    #[default]
    Monthly,
    Quarterly,
    Annually,
}

impl CompoundingFrequency {
    pub fn periods_per_year(self) -> u32 {
        match self {
            CompoundingFrequency::Daily => 365,
            CompoundingFrequency::Monthly => 12,
            CompoundingFrequency::Quarterly => 4,
            CompoundingFrequency::Annually => 1,
        }
    }

    /// Unrecognised names compound monthly.
    pub fn parse_or_default(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "daily" => CompoundingFrequency::Daily,
            "monthly" => CompoundingFrequency::Monthly,
            "quarterly" => CompoundingFrequency::Quarterly,
            "annually" | "yearly" => CompoundingFrequency::Annually,
            _ => CompoundingFrequency::default(),
        }
    }
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PayoffMethod {
    #[default]
    Avalanche,
    Snowball,
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FilingStatus {
    #[default]
    Single,
    MarriedJointly,
    MarriedSeparately,
    HeadOfHousehold,
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PayFrequency {
    Weekly,
    #[default]
    Biweekly,
    SemiMonthly,
    Monthly,
}

impl PayFrequency {
    pub fn periods_per_year(self) -> u32 {
        match self {
            PayFrequency::Weekly => 52,
            PayFrequency::Biweekly => 26,
            PayFrequency::SemiMonthly => 24,
            PayFrequency::Monthly => 12,
        }
    }
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SalaryBasis {
    #[default]
    Annual,
    Hourly,
}

/// One progressive band. `rate` is a fraction; the top band has `max = f64::INFINITY`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TaxBracket {
    pub min: f64,
    pub max: f64,
    pub rate: f64,
}

// ---------------------------------------------------------------------------
// Amortization
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct MortgageInputs {
    pub home_price: f64,
    pub down_payment: f64,
    pub annual_rate: f64,
    pub term_years: u32,
    pub property_tax_annual: f64,
    pub insurance_annual: f64,
    pub hoa_monthly: f64,
}

#[derive(Debug, Clone)]
pub struct LoanInputs {
    pub principal: f64,
    pub annual_rate: f64,
    pub term_months: u32,
}

#[derive(Debug, Clone)]
pub struct StudentLoanInputs {
    pub balance: f64,
    pub annual_rate: f64,
    pub term_years: u32,
    pub extra_monthly_payment: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyAmortizationEntry {
    pub month: u32,
    pub payment: f64,
    pub principal: f64,
    pub interest: f64,
    pub balance: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearlyAmortizationEntry {
    pub year: u32,
    pub payment: f64,
    pub principal: f64,
    pub interest: f64,
    pub balance: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MortgageResult {
    pub loan_amount: f64,
    pub down_payment: f64,
    pub monthly_payment: f64,
    pub total_monthly_payment: f64,
    pub total_interest: f64,
    pub total_cost: f64,
    pub amortization_schedule: Vec<YearlyAmortizationEntry>,
    pub monthly_schedule: Vec<MonthlyAmortizationEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanResult {
    pub monthly_payment: f64,
    pub total_interest: f64,
    pub total_cost: f64,
    pub amortization_schedule: Vec<YearlyAmortizationEntry>,
    pub monthly_schedule: Vec<MonthlyAmortizationEntry>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RepaymentPlan {
    pub monthly_payment: f64,
    pub months: u32,
    pub total_interest: f64,
    pub total_paid: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentLoanResult {
    pub standard: RepaymentPlan,
    pub accelerated: RepaymentPlan,
    pub months_saved: u32,
    pub interest_saved: f64,
    pub balance_schedule: Vec<YearlyAmortizationEntry>,
}

// ---------------------------------------------------------------------------
// Growth
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct CompoundInputs {
    pub principal: f64,
    pub monthly_contribution: f64,
    pub annual_rate: f64,
    pub years: u32,
    pub frequency: CompoundingFrequency,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GrowthYear {
    pub year: u32,
    pub contributions: f64,
    pub interest: f64,
    pub balance: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompoundResult {
    pub future_value: f64,
    pub total_contributions: f64,
    pub total_interest: f64,
    pub yearly_breakdown: Vec<GrowthYear>,
}

#[derive(Debug, Clone)]
pub struct RetirementInputs {
    pub current_age: u32,
    pub retirement_age: u32,
    pub current_savings: f64,
    pub monthly_contribution: f64,
    pub annual_return: f64,
    pub inflation_rate: f64,
    pub withdrawal_rate: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RetirementYear {
    pub age: u32,
    pub year: u32,
    pub balance: f64,
    pub inflation_adjusted: f64,
    pub contributions: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RetirementResult {
    pub years_to_retirement: u32,
    pub projected_balance: f64,
    pub inflation_adjusted_balance: f64,
    pub total_contributions: f64,
    pub total_growth: f64,
    pub monthly_retirement_income: f64,
    pub inflation_adjusted_monthly_income: f64,
    pub yearly_projection: Vec<RetirementYear>,
}

// ---------------------------------------------------------------------------
// Debt payoff
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Debt {
    pub name: String,
    pub balance: f64,
    pub rate: f64,
    pub min_payment: f64,
}

#[derive(Debug, Clone)]
pub struct DebtPayoffInputs {
    pub debts: Vec<Debt>,
    pub extra_payment: f64,
    pub method: PayoffMethod,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PayoffEvent {
    pub name: String,
    pub month: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceSnapshot {
    pub month: u32,
    pub balances: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DebtPayoffResult {
    pub method: PayoffMethod,
    pub months_to_payoff: u32,
    pub total_interest: f64,
    pub total_paid: f64,
    pub hit_month_cap: bool,
    pub payoff_order: Vec<PayoffEvent>,
    pub monthly_schedule: Vec<BalanceSnapshot>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PayoffComparison {
    pub avalanche: DebtPayoffResult,
    pub snowball: DebtPayoffResult,
    pub interest_saved: f64,
    pub months_saved: i64,
}

// ---------------------------------------------------------------------------
// Tax
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct FederalTaxInputs {
    pub income: f64,
    pub filing_status: FilingStatus,
    pub deduction: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BracketTax {
    pub bracket: String,
    pub tax: f64,
    pub rate: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FederalTaxResult {
    pub taxable_income: f64,
    pub deduction: f64,
    pub federal_tax: f64,
    pub effective_rate: f64,
    pub marginal_rate: f64,
    pub bracket_breakdown: Vec<BracketTax>,
}

#[derive(Debug, Clone)]
pub struct SelfEmploymentInputs {
    pub net_income: f64,
    pub filing_status: FilingStatus,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelfEmploymentResult {
    pub se_taxable_income: f64,
    pub social_security_tax: f64,
    pub medicare_tax: f64,
    pub additional_medicare_tax: f64,
    pub se_tax: f64,
    pub deductible_half: f64,
    pub estimated_income_tax: f64,
    pub total_tax: f64,
    pub quarterly_payment: f64,
    pub effective_rate: f64,
}

#[derive(Debug, Clone)]
pub struct TakeHomeInputs {
    pub gross_salary: f64,
    pub filing_status: FilingStatus,
    pub pre_tax_deductions: f64,
    pub state_tax_rate: f64,
    pub pay_frequency: PayFrequency,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TakeHomeResult {
    pub gross_salary: f64,
    pub pre_tax_deductions: f64,
    pub federal_tax: f64,
    pub social_security_tax: f64,
    pub medicare_tax: f64,
    pub state_tax: f64,
    pub total_tax: f64,
    pub net_annual: f64,
    pub net_monthly: f64,
    pub net_per_paycheck: f64,
    pub effective_tax_rate: f64,
    pub marginal_rate: f64,
}

// ---------------------------------------------------------------------------
// Wages
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct SalaryInputs {
    pub amount: f64,
    pub basis: SalaryBasis,
    pub hours_per_week: f64,
    pub weeks_per_year: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalaryResult {
    pub hourly: f64,
    pub daily: f64,
    pub weekly: f64,
    pub biweekly: f64,
    pub monthly: f64,
    pub annual: f64,
}

#[derive(Debug, Clone)]
pub struct OvertimeInputs {
    pub hourly_rate: f64,
    pub regular_hours: f64,
    pub overtime_hours: f64,
    pub multiplier: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OvertimeResult {
    pub regular_pay: f64,
    pub overtime_rate: f64,
    pub overtime_pay: f64,
    pub total_pay: f64,
}

#[derive(Debug, Clone)]
pub struct TipInputs {
    pub bill_amount: f64,
    pub tip_percent: f64,
    pub number_of_people: i64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TipResult {
    pub tip_amount: f64,
    pub total_amount: f64,
    pub tip_per_person: f64,
    pub total_per_person: f64,
    pub number_of_people: u32,
}

#[derive(Debug, Clone)]
pub struct WageGapInputs {
    pub salary: f64,
    pub comparison_ratio: f64,
    pub years: u32,
    pub annual_raise: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WageGapYear {
    pub year: u32,
    pub salary: f64,
    pub comparison_salary: f64,
    pub gap: f64,
    pub cumulative_gap: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WageGapResult {
    pub comparison_salary: f64,
    pub annual_gap: f64,
    pub monthly_gap: f64,
    pub cents_on_dollar: f64,
    pub career_gap: f64,
    pub yearly_breakdown: Vec<WageGapYear>,
}
