use super::money::{PAID_OFF_EPSILON, percent_to_fraction, round_cents};
use super::types::{
    LoanInputs, LoanResult, MonthlyAmortizationEntry, MortgageInputs, MortgageResult,
    RepaymentPlan, StudentLoanInputs, StudentLoanResult, YearlyAmortizationEntry,
};

/// Longest schedule any loan kernel builds: fifty years of payments.
pub const MAX_TERM_MONTHS: u32 = 600;

struct Schedule {
    monthly: Vec<MonthlyAmortizationEntry>,
    yearly: Vec<YearlyAmortizationEntry>,
}

/// Sums monthly cash flows into yearly rows.
#[derive(Default)]
struct YearRollup {
    year: u32,
    months_in_year: u32,
    payment: f64,
    principal: f64,
    interest: f64,
    rows: Vec<YearlyAmortizationEntry>,
}

impl YearRollup {
    fn push_month(&mut self, payment: f64, principal: f64, interest: f64, balance: f64) {
        self.payment += payment;
        self.principal += principal;
        self.interest += interest;
        self.months_in_year += 1;
        if self.months_in_year == 12 {
            self.flush(balance);
        }
    }

    fn flush(&mut self, balance: f64) {
        if self.months_in_year == 0 {
            return;
        }
        self.year += 1;
        self.rows.push(YearlyAmortizationEntry {
            year: self.year,
            payment: round_cents(self.payment),
            principal: round_cents(self.principal),
            interest: round_cents(self.interest),
            balance: round_cents(balance),
        });
        self.payment = 0.0;
        self.principal = 0.0;
        self.interest = 0.0;
        self.months_in_year = 0;
    }

    fn finish(mut self, balance: f64) -> Vec<YearlyAmortizationEntry> {
        self.flush(balance);
        self.rows
    }
}

pub fn calculate_mortgage(inputs: &MortgageInputs) -> MortgageResult {
    let loan_amount = (inputs.home_price - inputs.down_payment).max(0.0);
    let months = term_in_months(inputs.term_years);
    if loan_amount <= 0.0 || inputs.annual_rate <= 0.0 || months == 0 {
        return MortgageResult::default();
    }

    let monthly_rate = percent_to_fraction(inputs.annual_rate) / 12.0;
    let monthly_payment = annuity_payment(loan_amount, monthly_rate, months);
    let schedule = build_schedule(loan_amount, monthly_rate, monthly_payment, months);

    let total_cost = monthly_payment * months as f64;
    let escrow = inputs.property_tax_annual.max(0.0) / 12.0
        + inputs.insurance_annual.max(0.0) / 12.0
        + inputs.hoa_monthly.max(0.0);

    MortgageResult {
        loan_amount,
        down_payment: inputs.down_payment,
        monthly_payment,
        total_monthly_payment: monthly_payment + escrow,
        total_interest: total_cost - loan_amount,
        total_cost,
        amortization_schedule: schedule.yearly,
        monthly_schedule: schedule.monthly,
    }
}

pub fn calculate_loan(inputs: &LoanInputs) -> LoanResult {
    let months = inputs.term_months.min(MAX_TERM_MONTHS);
    if inputs.principal <= 0.0 || inputs.annual_rate < 0.0 || months == 0 {
        return LoanResult::default();
    }

    let monthly_rate = percent_to_fraction(inputs.annual_rate) / 12.0;
    let monthly_payment = annuity_payment(inputs.principal, monthly_rate, months);
    let schedule = build_schedule(inputs.principal, monthly_rate, monthly_payment, months);
    let total_cost = monthly_payment * months as f64;

    LoanResult {
        monthly_payment,
        total_interest: total_cost - inputs.principal,
        total_cost,
        amortization_schedule: schedule.yearly,
        monthly_schedule: schedule.monthly,
    }
}

pub fn calculate_student_loan(inputs: &StudentLoanInputs) -> StudentLoanResult {
    let months = term_in_months(inputs.term_years);
    if inputs.balance <= 0.0 || inputs.annual_rate < 0.0 || months == 0 {
        return StudentLoanResult::default();
    }

    let monthly_rate = percent_to_fraction(inputs.annual_rate) / 12.0;
    let required = annuity_payment(inputs.balance, monthly_rate, months);
    let standard_paid = required * months as f64;
    let standard = RepaymentPlan {
        monthly_payment: required,
        months,
        total_interest: standard_paid - inputs.balance,
        total_paid: standard_paid,
    };

    let accelerated_payment = required + inputs.extra_monthly_payment.max(0.0);
    let mut balance = inputs.balance;
    let mut month = 0u32;
    let mut total_interest = 0.0;
    let mut total_paid = 0.0;
    let mut rollup = YearRollup::default();

    while balance > PAID_OFF_EPSILON && month < months {
        month += 1;
        let interest = balance * monthly_rate;
        let payment = accelerated_payment.min(balance + interest);
        balance = (balance + interest - payment).max(0.0);
        total_interest += interest;
        total_paid += payment;
        rollup.push_month(payment, payment - interest, interest, balance);
    }

    let accelerated = RepaymentPlan {
        monthly_payment: accelerated_payment,
        months: month,
        total_interest,
        total_paid,
    };

    StudentLoanResult {
        standard,
        accelerated,
        months_saved: months - month,
        interest_saved: (standard.total_interest - total_interest).max(0.0),
        balance_schedule: rollup.finish(balance),
    }
}

fn term_in_months(years: u32) -> u32 {
    years.saturating_mul(12).min(MAX_TERM_MONTHS)
}

/// Level payment for `principal` over `months`; a zero rate divides evenly.
pub(crate) fn annuity_payment(principal: f64, monthly_rate: f64, months: u32) -> f64 {
    if months == 0 {
        return 0.0;
    }
    let n = months as f64;
    if monthly_rate == 0.0 {
        return principal / n;
    }
    let growth = (1.0 + monthly_rate).powf(n);
    principal * monthly_rate * growth / (growth - 1.0)
}

fn build_schedule(principal: f64, monthly_rate: f64, payment: f64, months: u32) -> Schedule {
    let mut monthly = Vec::with_capacity(months as usize);
    let mut rollup = YearRollup::default();
    let mut balance = principal;

    for month in 1..=months {
        let interest = balance * monthly_rate;
        let principal_part = payment - interest;
        balance = (balance - principal_part).max(0.0);

        let entry = MonthlyAmortizationEntry {
            month,
            payment: round_cents(payment),
            principal: round_cents(principal_part),
            interest: round_cents(interest),
            balance: round_cents(balance),
        };
        rollup.push_month(entry.payment, entry.principal, entry.interest, entry.balance);
        monthly.push(entry);
    }

    Schedule {
        monthly,
        yearly: rollup.finish(balance),
    }
}
