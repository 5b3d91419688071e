use super::growth::MAX_PROJECTION_YEARS;
use super::money::{percent_to_fraction, round_cents};
use super::types::{
    OvertimeInputs, OvertimeResult, SalaryBasis, SalaryInputs, SalaryResult, TipInputs, TipResult,
    WageGapInputs, WageGapResult, WageGapYear,
};

const WORK_DAYS_PER_WEEK: f64 = 5.0;

pub fn convert_salary(inputs: &SalaryInputs) -> SalaryResult {
    if inputs.amount <= 0.0 || inputs.hours_per_week <= 0.0 || inputs.weeks_per_year <= 0.0 {
        return SalaryResult::default();
    }

    let hours_per_year = inputs.hours_per_week * inputs.weeks_per_year;
    let annual = match inputs.basis {
        SalaryBasis::Annual => inputs.amount,
        SalaryBasis::Hourly => inputs.amount * hours_per_year,
    };
    let hourly = annual / hours_per_year;
    let weekly = hourly * inputs.hours_per_week;

    SalaryResult {
        hourly,
        daily: weekly / WORK_DAYS_PER_WEEK,
        weekly,
        biweekly: weekly * 2.0,
        monthly: annual / 12.0,
        annual,
    }
}

pub fn calculate_overtime(inputs: &OvertimeInputs) -> OvertimeResult {
    if inputs.hourly_rate <= 0.0
        || inputs.multiplier <= 0.0
        || inputs.regular_hours < 0.0
        || inputs.overtime_hours < 0.0
    {
        return OvertimeResult::default();
    }

    let regular_pay = inputs.hourly_rate * inputs.regular_hours;
    let overtime_rate = inputs.hourly_rate * inputs.multiplier;
    let overtime_pay = overtime_rate * inputs.overtime_hours;

    OvertimeResult {
        regular_pay,
        overtime_rate,
        overtime_pay,
        total_pay: regular_pay + overtime_pay,
    }
}

pub fn split_tip(inputs: &TipInputs) -> TipResult {
    let people = inputs.number_of_people.clamp(1, u32::MAX as i64) as u32;
    if inputs.bill_amount < 0.0 || inputs.tip_percent < 0.0 {
        return TipResult {
            number_of_people: people,
            ..TipResult::default()
        };
    }

    let tip_amount = inputs.bill_amount * percent_to_fraction(inputs.tip_percent);
    let total_amount = inputs.bill_amount + tip_amount;

    TipResult {
        tip_amount,
        total_amount,
        tip_per_person: tip_amount / people as f64,
        total_per_person: total_amount / people as f64,
        number_of_people: people,
    }
}

pub fn calculate_wage_gap(inputs: &WageGapInputs) -> WageGapResult {
    if inputs.salary <= 0.0 || inputs.comparison_ratio <= 0.0 {
        return WageGapResult::default();
    }

    let ratio = percent_to_fraction(inputs.comparison_ratio);
    let comparison_salary = inputs.salary * ratio;
    let annual_gap = inputs.salary - comparison_salary;
    let raise = 1.0 + percent_to_fraction(inputs.annual_raise);

    let years = inputs.years.min(MAX_PROJECTION_YEARS);
    let mut career_gap = 0.0;
    let mut yearly_breakdown = Vec::with_capacity(years as usize);
    for year in 1..=years {
        let salary = inputs.salary * raise.powi(year as i32 - 1);
        let comparison = salary * ratio;
        let gap = salary - comparison;
        career_gap += gap;
        yearly_breakdown.push(WageGapYear {
            year,
            salary: round_cents(salary),
            comparison_salary: round_cents(comparison),
            gap: round_cents(gap),
            cumulative_gap: round_cents(career_gap),
        });
    }

    WageGapResult {
        comparison_salary,
        annual_gap,
        monthly_gap: annual_gap / 12.0,
        cents_on_dollar: ratio * 100.0,
        career_gap,
        yearly_breakdown,
    }
}
