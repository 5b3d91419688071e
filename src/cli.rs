use clap::{Args, Parser, Subcommand, ValueEnum};
use std::net::IpAddr;
use thiserror::Error;
use tracing::debug;

use crate::api::ServerConfig;
use crate::core::{
    CompoundInputs, CompoundingFrequency, Debt, DebtPayoffInputs, FederalTaxInputs, FilingStatus,
    LoanInputs, MortgageInputs, OvertimeInputs, PayFrequency, PayoffMethod, RetirementInputs,
    SalaryBasis, SalaryInputs, SelfEmploymentInputs, StudentLoanInputs, TakeHomeInputs,
    TipInputs, WageGapInputs, calculate_compound_interest, calculate_federal_tax, calculate_loan,
    calculate_mortgage, calculate_overtime, calculate_retirement, calculate_self_employment_tax,
    calculate_student_loan, calculate_take_home_pay, calculate_wage_gap, compare_payoff_methods,
    convert_salary, simulate_debt_payoff, split_tip,
};

#[derive(Debug, Error)]
pub enum CliError {
    #[error("--debt expects name:balance:rate:min-payment, got {0:?}")]
    DebtFormat(String),
    #[error("--debt {field} is not a number: {value:?}")]
    DebtNumber { field: &'static str, value: String },
    #[error("failed to encode result as JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(
    name = "fincalc",
    about = "Consumer financial calculators: loans, growth, debt payoff, tax and pay"
)]
pub struct Cli {
    #[arg(
        long,
        global = true,
        env = "FINCALC_LOG",
        default_value = "info",
        help = "Log filter used when RUST_LOG is unset"
    )]
    pub log_level: String,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP JSON API
    Serve(ServeArgs),
    #[command(flatten)]
    Calculate(Calculation),
}

#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    #[arg(long, env = "FINCALC_HOST", default_value = "0.0.0.0")]
    pub host: IpAddr,
    #[arg(long, env = "FINCALC_PORT", default_value_t = 8080)]
    pub port: u16,
}

impl ServeArgs {
    pub fn server_config(&self) -> ServerConfig {
        ServerConfig {
            host: self.host,
            port: self.port,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Calculation {
    /// Mortgage payment and amortization schedule
    Mortgage(MortgageArgs),
    /// Fixed-term loan payment and schedule
    Loan(LoanArgs),
    /// Student loan repayment with optional extra payments
    StudentLoan(StudentLoanArgs),
    /// Compound interest projection
    Compound(CompoundArgs),
    /// Retirement savings projection
    Retirement(RetirementArgs),
    /// Multi-debt payoff simulation
    DebtPayoff(DebtPayoffArgs),
    /// Federal income tax by bracket
    FederalTax(FederalTaxArgs),
    /// Self-employment tax
    SeTax(SelfEmploymentArgs),
    /// Take-home pay after taxes
    TakeHome(TakeHomeArgs),
    /// Salary and hourly conversion
    Salary(SalaryArgs),
    /// Overtime pay
    Overtime(OvertimeArgs),
    /// Tip and bill splitting
    Tip(TipArgs),
    /// Pay gap over a career
    WageGap(WageGapArgs),
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum CliFilingStatus {
    Single,
    MarriedJointly,
    MarriedSeparately,
    HeadOfHousehold,
}

impl From<CliFilingStatus> for FilingStatus {
    fn from(value: CliFilingStatus) -> Self {
        match value {
            CliFilingStatus::Single => FilingStatus::Single,
            CliFilingStatus::MarriedJointly => FilingStatus::MarriedJointly,
            CliFilingStatus::MarriedSeparately => FilingStatus::MarriedSeparately,
            CliFilingStatus::HeadOfHousehold => FilingStatus::HeadOfHousehold,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum CliPayoffMethod {
    Avalanche,
    Snowball,
    /// Run both methods and report the difference
    Compare,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum CliFrequency {
    Daily,
    Monthly,
    Quarterly,
    Annually,
}

impl From<CliFrequency> for CompoundingFrequency {
    fn from(value: CliFrequency) -> Self {
        match value {
            CliFrequency::Daily => CompoundingFrequency::Daily,
            CliFrequency::Monthly => CompoundingFrequency::Monthly,
            CliFrequency::Quarterly => CompoundingFrequency::Quarterly,
            CliFrequency::Annually => CompoundingFrequency::Annually,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum CliPayFrequency {
    Weekly,
    Biweekly,
    SemiMonthly,
    Monthly,
}

impl From<CliPayFrequency> for PayFrequency {
    fn from(value: CliPayFrequency) -> Self {
        match value {
            CliPayFrequency::Weekly => PayFrequency::Weekly,
            CliPayFrequency::Biweekly => PayFrequency::Biweekly,
            CliPayFrequency::SemiMonthly => PayFrequency::SemiMonthly,
            CliPayFrequency::Monthly => PayFrequency::Monthly,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum CliSalaryBasis {
    Annual,
    Hourly,
}

impl From<CliSalaryBasis> for SalaryBasis {
    fn from(value: CliSalaryBasis) -> Self {
        match value {
            CliSalaryBasis::Annual => SalaryBasis::Annual,
            CliSalaryBasis::Hourly => SalaryBasis::Hourly,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct MortgageArgs {
    #[arg(long, default_value_t = 400_000.0)]
    pub home_price: f64,
    #[arg(long, default_value_t = 80_000.0)]
    pub down_payment: f64,
    #[arg(long, default_value_t = 7.0, help = "Annual interest rate in percent")]
    pub rate: f64,
    #[arg(
        long,
        default_value_t = 30,
        value_parser = clap::value_parser!(u32).range(0..=50)
    )]
    pub term_years: u32,
    #[arg(long, default_value_t = 0.0, help = "Annual property tax")]
    pub property_tax: f64,
    #[arg(long, default_value_t = 0.0, help = "Annual homeowner's insurance")]
    pub insurance: f64,
    #[arg(long, default_value_t = 0.0, help = "Monthly HOA dues")]
    pub hoa: f64,
}

#[derive(Args, Debug, Clone)]
pub struct LoanArgs {
    #[arg(long)]
    pub principal: f64,
    #[arg(long, default_value_t = 8.0, help = "Annual interest rate in percent")]
    pub rate: f64,
    #[arg(
        long,
        default_value_t = 60,
        value_parser = clap::value_parser!(u32).range(0..=600)
    )]
    pub term_months: u32,
}

#[derive(Args, Debug, Clone)]
pub struct StudentLoanArgs {
    #[arg(long)]
    pub balance: f64,
    #[arg(long, default_value_t = 5.5, help = "Annual interest rate in percent")]
    pub rate: f64,
    #[arg(
        long,
        default_value_t = 10,
        value_parser = clap::value_parser!(u32).range(0..=50)
    )]
    pub term_years: u32,
    #[arg(long, default_value_t = 0.0)]
    pub extra_payment: f64,
}

#[derive(Args, Debug, Clone)]
pub struct CompoundArgs {
    #[arg(long, default_value_t = 10_000.0)]
    pub principal: f64,
    #[arg(long, default_value_t = 0.0)]
    pub monthly_contribution: f64,
    #[arg(long, default_value_t = 7.0, help = "Annual rate in percent")]
    pub rate: f64,
    #[arg(
        long,
        default_value_t = 10,
        value_parser = clap::value_parser!(u32).range(0..=150)
    )]
    pub years: u32,
    #[arg(long, value_enum, default_value_t = CliFrequency::Monthly)]
    pub frequency: CliFrequency,
}

#[derive(Args, Debug, Clone)]
pub struct RetirementArgs {
    #[arg(
        long,
        value_parser = clap::value_parser!(u32).range(0..=150)
    )]
    pub current_age: u32,
    #[arg(
        long,
        default_value_t = 65,
        value_parser = clap::value_parser!(u32).range(0..=150)
    )]
    pub retirement_age: u32,
    #[arg(long, default_value_t = 0.0)]
    pub current_savings: f64,
    #[arg(long, default_value_t = 0.0)]
    pub monthly_contribution: f64,
    #[arg(long, default_value_t = 7.0, help = "Expected annual return in percent")]
    pub annual_return: f64,
    #[arg(long, default_value_t = 3.0, help = "Expected annual inflation in percent")]
    pub inflation: f64,
    #[arg(
        long,
        default_value_t = 4.0,
        help = "Safe withdrawal rate in percent used for retirement income"
    )]
    pub withdrawal_rate: f64,
}

#[derive(Args, Debug, Clone)]
pub struct DebtPayoffArgs {
    #[arg(
        long = "debt",
        value_parser = parse_debt,
        help = "Debt as name:balance:rate:min-payment, repeatable"
    )]
    pub debts: Vec<Debt>,
    #[arg(long, default_value_t = 0.0)]
    pub extra_payment: f64,
    #[arg(long, value_enum, default_value_t = CliPayoffMethod::Avalanche)]
    pub method: CliPayoffMethod,
}

#[derive(Args, Debug, Clone)]
pub struct FederalTaxArgs {
    #[arg(long)]
    pub income: f64,
    #[arg(long, value_enum, default_value_t = CliFilingStatus::Single)]
    pub filing_status: CliFilingStatus,
    #[arg(long, help = "Itemized deduction; defaults to the standard deduction")]
    pub deduction: Option<f64>,
}

#[derive(Args, Debug, Clone)]
pub struct SelfEmploymentArgs {
    #[arg(long)]
    pub net_income: f64,
    #[arg(long, value_enum, default_value_t = CliFilingStatus::Single)]
    pub filing_status: CliFilingStatus,
}

#[derive(Args, Debug, Clone)]
pub struct TakeHomeArgs {
    #[arg(long)]
    pub gross_salary: f64,
    #[arg(long, value_enum, default_value_t = CliFilingStatus::Single)]
    pub filing_status: CliFilingStatus,
    #[arg(long, default_value_t = 0.0, help = "Annual 401(k), HSA and other pre-tax deductions")]
    pub pre_tax_deductions: f64,
    #[arg(long, default_value_t = 0.0, help = "Flat state income tax rate in percent")]
    pub state_tax_rate: f64,
    #[arg(long, value_enum, default_value_t = CliPayFrequency::Biweekly)]
    pub pay_frequency: CliPayFrequency,
}

#[derive(Args, Debug, Clone)]
pub struct SalaryArgs {
    #[arg(long)]
    pub amount: f64,
    #[arg(long, value_enum, default_value_t = CliSalaryBasis::Annual)]
    pub basis: CliSalaryBasis,
    #[arg(long, default_value_t = 40.0)]
    pub hours_per_week: f64,
    #[arg(long, default_value_t = 52.0)]
    pub weeks_per_year: f64,
}

#[derive(Args, Debug, Clone)]
pub struct OvertimeArgs {
    #[arg(long)]
    pub hourly_rate: f64,
    #[arg(long, default_value_t = 40.0)]
    pub regular_hours: f64,
    #[arg(long, default_value_t = 0.0)]
    pub overtime_hours: f64,
    #[arg(long, default_value_t = 1.5)]
    pub multiplier: f64,
}

#[derive(Args, Debug, Clone)]
pub struct TipArgs {
    #[arg(long)]
    pub bill: f64,
    #[arg(long, default_value_t = 18.0, help = "Tip in percent of the bill")]
    pub tip_percent: f64,
    #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
    pub people: i64,
}

#[derive(Args, Debug, Clone)]
pub struct WageGapArgs {
    #[arg(long)]
    pub salary: f64,
    #[arg(
        long,
        default_value_t = 84.0,
        help = "Comparison earnings in percent of salary (cents on the dollar)"
    )]
    pub comparison_ratio: f64,
    #[arg(
        long,
        default_value_t = 30,
        value_parser = clap::value_parser!(u32).range(0..=150)
    )]
    pub years: u32,
    #[arg(long, default_value_t = 0.0, help = "Annual raise in percent")]
    pub annual_raise: f64,
}

fn parse_debt(raw: &str) -> Result<Debt, CliError> {
    let parts: Vec<&str> = raw.split(':').collect();
    let [name, balance, rate, min_payment] = parts.as_slice() else {
        return Err(CliError::DebtFormat(raw.to_string()));
    };
    if name.trim().is_empty() {
        return Err(CliError::DebtFormat(raw.to_string()));
    }

    let number = |field: &'static str, value: &str| {
        value
            .trim()
            .parse::<f64>()
            .map_err(|_| CliError::DebtNumber {
                field,
                value: value.to_string(),
            })
    };

    Ok(Debt {
        name: name.trim().to_string(),
        balance: number("balance", *balance)?,
        rate: number("rate", *rate)?,
        min_payment: number("min-payment", *min_payment)?,
    })
}

/// Runs one calculator and renders its result as pretty JSON.
pub fn render(calculation: &Calculation) -> Result<String, CliError> {
    debug!(?calculation, "running calculation");
    let json = match calculation {
        Calculation::Mortgage(args) => serde_json::to_string_pretty(&calculate_mortgage(
            &MortgageInputs {
                home_price: args.home_price,
                down_payment: args.down_payment,
                annual_rate: args.rate,
                term_years: args.term_years,
                property_tax_annual: args.property_tax,
                insurance_annual: args.insurance,
                hoa_monthly: args.hoa,
            },
        ))?,
        Calculation::Loan(args) => serde_json::to_string_pretty(&calculate_loan(&LoanInputs {
            principal: args.principal,
            annual_rate: args.rate,
            term_months: args.term_months,
        }))?,
        Calculation::StudentLoan(args) => {
            serde_json::to_string_pretty(&calculate_student_loan(&StudentLoanInputs {
                balance: args.balance,
                annual_rate: args.rate,
                term_years: args.term_years,
                extra_monthly_payment: args.extra_payment,
            }))?
        }
        Calculation::Compound(args) => {
            serde_json::to_string_pretty(&calculate_compound_interest(&CompoundInputs {
                principal: args.principal,
                monthly_contribution: args.monthly_contribution,
                annual_rate: args.rate,
                years: args.years,
                frequency: args.frequency.into(),
            }))?
        }
        Calculation::Retirement(args) => {
            serde_json::to_string_pretty(&calculate_retirement(&RetirementInputs {
                current_age: args.current_age,
                retirement_age: args.retirement_age,
                current_savings: args.current_savings,
                monthly_contribution: args.monthly_contribution,
                annual_return: args.annual_return,
                inflation_rate: args.inflation,
                withdrawal_rate: args.withdrawal_rate,
            }))?
        }
        Calculation::DebtPayoff(args) => {
            let method = match args.method {
                CliPayoffMethod::Avalanche => PayoffMethod::Avalanche,
                CliPayoffMethod::Snowball => PayoffMethod::Snowball,
                CliPayoffMethod::Compare => {
                    return Ok(serde_json::to_string_pretty(&compare_payoff_methods(
                        &args.debts,
                        args.extra_payment,
                    ))?);
                }
            };
            serde_json::to_string_pretty(&simulate_debt_payoff(&DebtPayoffInputs {
                debts: args.debts.clone(),
                extra_payment: args.extra_payment,
                method,
            }))?
        }
        Calculation::FederalTax(args) => {
            serde_json::to_string_pretty(&calculate_federal_tax(&FederalTaxInputs {
                income: args.income,
                filing_status: args.filing_status.into(),
                deduction: args.deduction,
            }))?
        }
        Calculation::SeTax(args) => {
            serde_json::to_string_pretty(&calculate_self_employment_tax(&SelfEmploymentInputs {
                net_income: args.net_income,
                filing_status: args.filing_status.into(),
            }))?
        }
        Calculation::TakeHome(args) => {
            serde_json::to_string_pretty(&calculate_take_home_pay(&TakeHomeInputs {
                gross_salary: args.gross_salary,
                filing_status: args.filing_status.into(),
                pre_tax_deductions: args.pre_tax_deductions,
                state_tax_rate: args.state_tax_rate,
                pay_frequency: args.pay_frequency.into(),
            }))?
        }
        Calculation::Salary(args) => serde_json::to_string_pretty(&convert_salary(&SalaryInputs {
            amount: args.amount,
            basis: args.basis.into(),
            hours_per_week: args.hours_per_week,
            weeks_per_year: args.weeks_per_year,
        }))?,
        Calculation::Overtime(args) => {
            serde_json::to_string_pretty(&calculate_overtime(&OvertimeInputs {
                hourly_rate: args.hourly_rate,
                regular_hours: args.regular_hours,
                overtime_hours: args.overtime_hours,
                multiplier: args.multiplier,
            }))?
        }
        Calculation::Tip(args) => serde_json::to_string_pretty(&split_tip(&TipInputs {
            bill_amount: args.bill,
            tip_percent: args.tip_percent,
            number_of_people: args.people,
        }))?,
        Calculation::WageGap(args) => {
            serde_json::to_string_pretty(&calculate_wage_gap(&WageGapInputs {
                salary: args.salary,
                comparison_ratio: args.comparison_ratio,
                years: args.years,
                annual_raise: args.annual_raise,
            }))?
        }
    };
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("fincalc").chain(args.iter().copied()))
            .expect("arguments should parse")
    }

    #[test]
    fn command_tree_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_debt_reads_all_fields() {
        let debt = parse_debt("CreditCard:8500:22.99:250").expect("valid debt");
        assert_eq!(debt.name, "CreditCard");
        assert_eq!(debt.balance, 8_500.0);
        assert_eq!(debt.rate, 22.99);
        assert_eq!(debt.min_payment, 250.0);
    }

    #[test]
    fn parse_debt_rejects_malformed_input() {
        assert!(matches!(
            parse_debt("CreditCard:8500:22.99"),
            Err(CliError::DebtFormat(_))
        ));
        assert!(matches!(
            parse_debt(":8500:22.99:250"),
            Err(CliError::DebtFormat(_))
        ));
        let err = parse_debt("Card:lots:22.99:250").expect_err("balance must be numeric");
        assert!(err.to_string().contains("balance"));
    }

    #[test]
    fn serve_reads_host_and_port() {
        let cli = parse(&["serve", "--host", "127.0.0.1", "--port", "9000"]);
        let Command::Serve(args) = cli.command else {
            panic!("expected serve command");
        };
        let config = args.server_config();
        assert_eq!(config.port, 9000);
        assert_eq!(config.host.to_string(), "127.0.0.1");
    }

    #[test]
    fn debt_payoff_accepts_repeated_debts() {
        let cli = parse(&[
            "debt-payoff",
            "--debt",
            "CreditCard:8500:22.99:250",
            "--debt",
            "CarLoan:15000:6.5:350",
            "--extra-payment",
            "500",
            "--method",
            "snowball",
        ]);
        let Command::Calculate(Calculation::DebtPayoff(args)) = &cli.command else {
            panic!("expected debt-payoff command");
        };
        assert_eq!(args.debts.len(), 2);
        assert_eq!(args.method, CliPayoffMethod::Snowball);

        let json = render(&Calculation::DebtPayoff(args.clone())).expect("renders");
        assert!(json.contains("\"monthsToPayoff\""));
        assert!(json.contains("\"method\": \"snowball\""));
    }

    #[test]
    fn compare_method_renders_both_strategies() {
        let cli = parse(&[
            "debt-payoff",
            "--debt",
            "Card:6000:24:150",
            "--debt",
            "Store:1000:4:50",
            "--extra-payment",
            "200",
            "--method",
            "compare",
        ]);
        let Command::Calculate(calculation) = &cli.command else {
            panic!("expected a calculation");
        };
        let json = render(calculation).expect("renders");
        assert!(json.contains("\"avalanche\""));
        assert!(json.contains("\"snowball\""));
        assert!(json.contains("\"interestSaved\""));
    }

    #[test]
    fn federal_tax_renders_reference_case() {
        let cli = parse(&["federal-tax", "--income", "75000"]);
        let Command::Calculate(calculation) = &cli.command else {
            panic!("expected a calculation");
        };
        let json = render(calculation).expect("renders");
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
        assert_eq!(value["taxableIncome"], 60_400.0);
        assert_eq!(value["bracketBreakdown"].as_array().map(Vec::len), Some(3));
    }

    #[test]
    fn oversized_counts_are_rejected() {
        let cases: [&[&str]; 4] = [
            &["mortgage", "--term-years", "4000000000"],
            &["loan", "--principal", "1000", "--term-months", "601"],
            &["compound", "--years", "151"],
            &["wage-gap", "--salary", "60000", "--years", "200"],
        ];
        for args in cases {
            let parsed =
                Cli::try_parse_from(std::iter::once("fincalc").chain(args.iter().copied()));
            assert!(parsed.is_err(), "{args:?} should be rejected");
        }

        let cli = parse(&["compound", "--years", "150"]);
        assert!(matches!(
            cli.command,
            Command::Calculate(Calculation::Compound(CompoundArgs { years: 150, .. }))
        ));
    }

    #[test]
    fn tip_accepts_non_positive_people() {
        let cli = parse(&["tip", "--bill", "100", "--people", "-3"]);
        let Command::Calculate(calculation) = &cli.command else {
            panic!("expected a calculation");
        };
        let json = render(calculation).expect("renders");
        assert!(json.contains("\"numberOfPeople\": 1"));
    }
}
