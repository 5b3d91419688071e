mod amortization;
mod debt;
mod growth;
mod money;
mod tax;
mod types;
mod wages;

pub use amortization::{
    MAX_TERM_MONTHS, calculate_loan, calculate_mortgage, calculate_student_loan,
};
pub use debt::{MAX_PAYOFF_MONTHS, compare_payoff_methods, simulate_debt_payoff};
pub use growth::{MAX_PROJECTION_YEARS, calculate_compound_interest, calculate_retirement};
pub use tax::{
    SE_TAXABLE_SHARE, SOCIAL_SECURITY_WAGE_BASE, calculate_federal_tax,
    calculate_self_employment_tax, calculate_take_home_pay,
};
pub use types::{
    BalanceSnapshot, BracketTax, CompoundInputs, CompoundResult, CompoundingFrequency, Debt,
    DebtPayoffInputs, DebtPayoffResult, FederalTaxInputs, FederalTaxResult, FilingStatus,
    GrowthYear, LoanInputs, LoanResult, MonthlyAmortizationEntry, MortgageInputs, MortgageResult,
    OvertimeInputs, OvertimeResult, PayFrequency, PayoffComparison, PayoffEvent, PayoffMethod,
    RepaymentPlan, RetirementInputs, RetirementResult, RetirementYear, SalaryBasis, SalaryInputs,
    SalaryResult, SelfEmploymentInputs, SelfEmploymentResult, StudentLoanInputs,
    StudentLoanResult, TakeHomeInputs, TakeHomeResult, TaxBracket, TipInputs, TipResult,
    WageGapInputs, WageGapResult, WageGapYear, YearlyAmortizationEntry,
};
pub use wages::{calculate_overtime, calculate_wage_gap, convert_salary, split_tip};
