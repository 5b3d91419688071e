use axum::{
    Router,
    extract::{
        Json, Query,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use thiserror::Error;
use tokio::net::TcpListener;
use tracing::{debug, info};

use crate::core::{
    CompoundInputs, CompoundingFrequency, Debt, DebtPayoffInputs, FederalTaxInputs, FilingStatus,
    LoanInputs, MortgageInputs, OvertimeInputs, PayFrequency, PayoffMethod, RetirementInputs,
    SalaryBasis, SalaryInputs, SelfEmploymentInputs, StudentLoanInputs, TakeHomeInputs,
    TipInputs, WageGapInputs, calculate_compound_interest, calculate_federal_tax, calculate_loan,
    calculate_mortgage, calculate_overtime, calculate_retirement, calculate_self_employment_tax,
    calculate_student_loan, calculate_take_home_pay, calculate_wage_gap, compare_payoff_methods,
    convert_salary, simulate_debt_payoff, split_tip,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 8080,
        }
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid JSON payload: {0}")]
    InvalidJson(#[from] JsonRejection),
    #[error("Invalid query string: {0}")]
    InvalidQuery(#[from] QueryRejection),
    #[error("Not found")]
    NotFound,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidJson(_) | ApiError::InvalidQuery(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        debug!(error = %self, "request rejected");
        error_response(self.status(), &self.to_string())
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
enum ApiFilingStatus {
    Single,
    #[serde(alias = "marriedJointly", alias = "married_jointly", alias = "mfj")]
    MarriedJointly,
    #[serde(alias = "marriedSeparately", alias = "married_separately", alias = "mfs")]
    MarriedSeparately,
    #[serde(alias = "headOfHousehold", alias = "head_of_household", alias = "hoh")]
    HeadOfHousehold,
}

impl From<ApiFilingStatus> for FilingStatus {
    fn from(value: ApiFilingStatus) -> Self {
        match value {
            ApiFilingStatus::Single => FilingStatus::Single,
            ApiFilingStatus::MarriedJointly => FilingStatus::MarriedJointly,
            ApiFilingStatus::MarriedSeparately => FilingStatus::MarriedSeparately,
            ApiFilingStatus::HeadOfHousehold => FilingStatus::HeadOfHousehold,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
enum ApiPayoffMethod {
    Avalanche,
    Snowball,
}

impl From<ApiPayoffMethod> for PayoffMethod {
    fn from(value: ApiPayoffMethod) -> Self {
        match value {
            ApiPayoffMethod::Avalanche => PayoffMethod::Avalanche,
            ApiPayoffMethod::Snowball => PayoffMethod::Snowball,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
enum ApiPayFrequency {
    Weekly,
    #[serde(alias = "bi-weekly")]
    Biweekly,
    #[serde(alias = "semiMonthly", alias = "semi_monthly", alias = "semimonthly")]
    SemiMonthly,
    Monthly,
}

impl From<ApiPayFrequency> for PayFrequency {
    fn from(value: ApiPayFrequency) -> Self {
        match value {
            ApiPayFrequency::Weekly => PayFrequency::Weekly,
            ApiPayFrequency::Biweekly => PayFrequency::Biweekly,
            ApiPayFrequency::SemiMonthly => PayFrequency::SemiMonthly,
            ApiPayFrequency::Monthly => PayFrequency::Monthly,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
enum ApiSalaryBasis {
    #[serde(alias = "salary", alias = "yearly")]
    Annual,
    Hourly,
}

impl From<ApiSalaryBasis> for SalaryBasis {
    fn from(value: ApiSalaryBasis) -> Self {
        match value {
            ApiSalaryBasis::Annual => SalaryBasis::Annual,
            ApiSalaryBasis::Hourly => SalaryBasis::Hourly,
        }
    }
}

/// Whole periods from a form number; negatives and NaN become zero.
fn whole_count(value: f64) -> u32 {
    if value.is_nan() || value <= 0.0 {
        0
    } else {
        value.min(u32::MAX as f64) as u32
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct MortgagePayload {
    home_price: Option<f64>,
    down_payment: Option<f64>,
    annual_rate: Option<f64>,
    term_years: Option<f64>,
    property_tax_annual: Option<f64>,
    insurance_annual: Option<f64>,
    hoa_monthly: Option<f64>,
}

impl From<MortgagePayload> for MortgageInputs {
    fn from(p: MortgagePayload) -> Self {
        MortgageInputs {
            home_price: p.home_price.unwrap_or(400_000.0),
            down_payment: p.down_payment.unwrap_or(80_000.0),
            annual_rate: p.annual_rate.unwrap_or(7.0),
            term_years: whole_count(p.term_years.unwrap_or(30.0)),
            property_tax_annual: p.property_tax_annual.unwrap_or(0.0),
            insurance_annual: p.insurance_annual.unwrap_or(0.0),
            hoa_monthly: p.hoa_monthly.unwrap_or(0.0),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct LoanPayload {
    principal: Option<f64>,
    annual_rate: Option<f64>,
    term_months: Option<f64>,
}

impl From<LoanPayload> for LoanInputs {
    fn from(p: LoanPayload) -> Self {
        LoanInputs {
            principal: p.principal.unwrap_or(25_000.0),
            annual_rate: p.annual_rate.unwrap_or(8.0),
            term_months: whole_count(p.term_months.unwrap_or(60.0)),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct StudentLoanPayload {
    balance: Option<f64>,
    annual_rate: Option<f64>,
    term_years: Option<f64>,
    extra_monthly_payment: Option<f64>,
}

impl From<StudentLoanPayload> for StudentLoanInputs {
    fn from(p: StudentLoanPayload) -> Self {
        StudentLoanInputs {
            balance: p.balance.unwrap_or(35_000.0),
            annual_rate: p.annual_rate.unwrap_or(5.5),
            term_years: whole_count(p.term_years.unwrap_or(10.0)),
            extra_monthly_payment: p.extra_monthly_payment.unwrap_or(0.0),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct CompoundPayload {
    principal: Option<f64>,
    monthly_contribution: Option<f64>,
    annual_rate: Option<f64>,
    years: Option<f64>,
    frequency: Option<String>,
}

impl From<CompoundPayload> for CompoundInputs {
    fn from(p: CompoundPayload) -> Self {
        CompoundInputs {
            principal: p.principal.unwrap_or(10_000.0),
            monthly_contribution: p.monthly_contribution.unwrap_or(500.0),
            annual_rate: p.annual_rate.unwrap_or(7.0),
            years: whole_count(p.years.unwrap_or(20.0)),
            frequency: p
                .frequency
                .as_deref()
                .map(CompoundingFrequency::parse_or_default)
                .unwrap_or_default(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RetirementPayload {
    current_age: Option<f64>,
    retirement_age: Option<f64>,
    current_savings: Option<f64>,
    monthly_contribution: Option<f64>,
    annual_return: Option<f64>,
    inflation_rate: Option<f64>,
    withdrawal_rate: Option<f64>,
}

impl From<RetirementPayload> for RetirementInputs {
    fn from(p: RetirementPayload) -> Self {
        RetirementInputs {
            current_age: whole_count(p.current_age.unwrap_or(30.0)),
            retirement_age: whole_count(p.retirement_age.unwrap_or(65.0)),
            current_savings: p.current_savings.unwrap_or(50_000.0),
            monthly_contribution: p.monthly_contribution.unwrap_or(1_000.0),
            annual_return: p.annual_return.unwrap_or(7.0),
            inflation_rate: p.inflation_rate.unwrap_or(3.0),
            withdrawal_rate: p.withdrawal_rate.unwrap_or(4.0),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct DebtPayload {
    name: Option<String>,
    balance: Option<f64>,
    rate: Option<f64>,
    min_payment: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct DebtPayoffPayload {
    debts: Option<Vec<DebtPayload>>,
    extra_payment: Option<f64>,
    method: Option<ApiPayoffMethod>,
}

impl DebtPayoffPayload {
    fn into_parts(self) -> (Vec<Debt>, f64, PayoffMethod) {
        let debts = self
            .debts
            .unwrap_or_default()
            .into_iter()
            .enumerate()
            .map(|(idx, d)| Debt {
                name: d.name.unwrap_or_else(|| format!("Debt {}", idx + 1)),
                balance: d.balance.unwrap_or(0.0),
                rate: d.rate.unwrap_or(0.0),
                min_payment: d.min_payment.unwrap_or(0.0),
            })
            .collect();
        (
            debts,
            self.extra_payment.unwrap_or(0.0),
            self.method.map(Into::into).unwrap_or_default(),
        )
    }
}

impl From<DebtPayoffPayload> for DebtPayoffInputs {
    fn from(p: DebtPayoffPayload) -> Self {
        let (debts, extra_payment, method) = p.into_parts();
        DebtPayoffInputs {
            debts,
            extra_payment,
            method,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct FederalTaxPayload {
    income: Option<f64>,
    filing_status: Option<ApiFilingStatus>,
    deduction: Option<f64>,
}

impl From<FederalTaxPayload> for FederalTaxInputs {
    fn from(p: FederalTaxPayload) -> Self {
        FederalTaxInputs {
            income: p.income.unwrap_or(75_000.0),
            filing_status: p.filing_status.map(Into::into).unwrap_or_default(),
            deduction: p.deduction,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct SelfEmploymentPayload {
    net_income: Option<f64>,
    filing_status: Option<ApiFilingStatus>,
}

impl From<SelfEmploymentPayload> for SelfEmploymentInputs {
    fn from(p: SelfEmploymentPayload) -> Self {
        SelfEmploymentInputs {
            net_income: p.net_income.unwrap_or(100_000.0),
            filing_status: p.filing_status.map(Into::into).unwrap_or_default(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct TakeHomePayload {
    gross_salary: Option<f64>,
    filing_status: Option<ApiFilingStatus>,
    pre_tax_deductions: Option<f64>,
    state_tax_rate: Option<f64>,
    pay_frequency: Option<ApiPayFrequency>,
}

impl From<TakeHomePayload> for TakeHomeInputs {
    fn from(p: TakeHomePayload) -> Self {
        TakeHomeInputs {
            gross_salary: p.gross_salary.unwrap_or(75_000.0),
            filing_status: p.filing_status.map(Into::into).unwrap_or_default(),
            pre_tax_deductions: p.pre_tax_deductions.unwrap_or(0.0),
            state_tax_rate: p.state_tax_rate.unwrap_or(5.0),
            pay_frequency: p.pay_frequency.map(Into::into).unwrap_or_default(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct SalaryPayload {
    amount: Option<f64>,
    basis: Option<ApiSalaryBasis>,
    hours_per_week: Option<f64>,
    weeks_per_year: Option<f64>,
}

impl From<SalaryPayload> for SalaryInputs {
    fn from(p: SalaryPayload) -> Self {
        SalaryInputs {
            amount: p.amount.unwrap_or(60_000.0),
            basis: p.basis.map(Into::into).unwrap_or_default(),
            hours_per_week: p.hours_per_week.unwrap_or(40.0),
            weeks_per_year: p.weeks_per_year.unwrap_or(52.0),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct OvertimePayload {
    hourly_rate: Option<f64>,
    regular_hours: Option<f64>,
    overtime_hours: Option<f64>,
    multiplier: Option<f64>,
}

impl From<OvertimePayload> for OvertimeInputs {
    fn from(p: OvertimePayload) -> Self {
        OvertimeInputs {
            hourly_rate: p.hourly_rate.unwrap_or(25.0),
            regular_hours: p.regular_hours.unwrap_or(40.0),
            overtime_hours: p.overtime_hours.unwrap_or(0.0),
            multiplier: p.multiplier.unwrap_or(1.5),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct TipPayload {
    bill_amount: Option<f64>,
    tip_percent: Option<f64>,
    number_of_people: Option<i64>,
}

impl From<TipPayload> for TipInputs {
    fn from(p: TipPayload) -> Self {
        TipInputs {
            bill_amount: p.bill_amount.unwrap_or(0.0),
            tip_percent: p.tip_percent.unwrap_or(18.0),
            number_of_people: p.number_of_people.unwrap_or(1),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct WageGapPayload {
    salary: Option<f64>,
    comparison_ratio: Option<f64>,
    years: Option<f64>,
    annual_raise: Option<f64>,
}

impl From<WageGapPayload> for WageGapInputs {
    fn from(p: WageGapPayload) -> Self {
        WageGapInputs {
            salary: p.salary.unwrap_or(60_000.0),
            comparison_ratio: p.comparison_ratio.unwrap_or(84.0),
            years: whole_count(p.years.unwrap_or(30.0)),
            annual_raise: p.annual_raise.unwrap_or(0.0),
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
}

pub fn router() -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/api/mortgage", get(mortgage_get).post(mortgage_post))
        .route("/api/loan", post(loan_handler))
        .route("/api/student-loan", post(student_loan_handler))
        .route(
            "/api/compound-interest",
            get(compound_get).post(compound_post),
        )
        .route("/api/retirement", post(retirement_handler))
        .route("/api/debt-payoff", post(debt_payoff_handler))
        .route("/api/debt-payoff/compare", post(debt_compare_handler))
        .route("/api/federal-tax", get(federal_tax_get).post(federal_tax_post))
        .route(
            "/api/self-employment-tax",
            get(self_employment_get).post(self_employment_post),
        )
        .route("/api/take-home-pay", post(take_home_handler))
        .route("/api/salary", get(salary_get).post(salary_post))
        .route("/api/overtime", post(overtime_handler))
        .route("/api/tip-split", get(tip_get).post(tip_post))
        .route("/api/wage-gap", post(wage_gap_handler))
        .fallback(not_found_handler)
}

pub async fn run_http_server(config: &ServerConfig) -> std::io::Result<()> {
    let addr = SocketAddr::new(config.host, config.port);
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "fincalc HTTP API listening");
    info!("Local access: http://127.0.0.1:{}/health", config.port);

    axum::serve(listener, router()).await
}

type JsonBody<T> = Result<Json<T>, JsonRejection>;
type QueryParams<T> = Result<Query<T>, QueryRejection>;
type ApiResult = Result<Response, ApiError>;

async fn health_handler() -> Response {
    json_response(StatusCode::OK, HealthResponse { status: "ok" })
}

async fn not_found_handler() -> ApiError {
    ApiError::NotFound
}

async fn mortgage_get(params: QueryParams<MortgagePayload>) -> ApiResult {
    let Query(payload) = params?;
    Ok(calculate("mortgage", payload, calculate_mortgage))
}

async fn mortgage_post(body: JsonBody<MortgagePayload>) -> ApiResult {
    let Json(payload) = body?;
    Ok(calculate("mortgage", payload, calculate_mortgage))
}

async fn loan_handler(body: JsonBody<LoanPayload>) -> ApiResult {
    let Json(payload) = body?;
    Ok(calculate("loan", payload, calculate_loan))
}

async fn student_loan_handler(body: JsonBody<StudentLoanPayload>) -> ApiResult {
    let Json(payload) = body?;
    Ok(calculate("student-loan", payload, calculate_student_loan))
}

async fn compound_get(params: QueryParams<CompoundPayload>) -> ApiResult {
    let Query(payload) = params?;
    Ok(calculate("compound-interest", payload, calculate_compound_interest))
}

async fn compound_post(body: JsonBody<CompoundPayload>) -> ApiResult {
    let Json(payload) = body?;
    Ok(calculate("compound-interest", payload, calculate_compound_interest))
}

async fn retirement_handler(body: JsonBody<RetirementPayload>) -> ApiResult {
    let Json(payload) = body?;
    Ok(calculate("retirement", payload, calculate_retirement))
}

async fn debt_payoff_handler(body: JsonBody<DebtPayoffPayload>) -> ApiResult {
    let Json(payload) = body?;
    Ok(calculate("debt-payoff", payload, simulate_debt_payoff))
}

async fn debt_compare_handler(body: JsonBody<DebtPayoffPayload>) -> ApiResult {
    let Json(payload) = body?;
    let (debts, extra_payment, _) = payload.into_parts();
    let comparison = compare_payoff_methods(&debts, extra_payment);
    debug!(
        calculator = "debt-payoff-compare",
        debts = debts.len(),
        interest_saved = comparison.interest_saved,
        "calculation complete"
    );
    Ok(json_response(StatusCode::OK, comparison))
}

async fn federal_tax_get(params: QueryParams<FederalTaxPayload>) -> ApiResult {
    let Query(payload) = params?;
    Ok(calculate("federal-tax", payload, calculate_federal_tax))
}

async fn federal_tax_post(body: JsonBody<FederalTaxPayload>) -> ApiResult {
    let Json(payload) = body?;
    Ok(calculate("federal-tax", payload, calculate_federal_tax))
}

async fn self_employment_get(params: QueryParams<SelfEmploymentPayload>) -> ApiResult {
    let Query(payload) = params?;
    Ok(calculate("self-employment-tax", payload, calculate_self_employment_tax))
}

async fn self_employment_post(body: JsonBody<SelfEmploymentPayload>) -> ApiResult {
    let Json(payload) = body?;
    Ok(calculate("self-employment-tax", payload, calculate_self_employment_tax))
}

async fn take_home_handler(body: JsonBody<TakeHomePayload>) -> ApiResult {
    let Json(payload) = body?;
    Ok(calculate("take-home-pay", payload, calculate_take_home_pay))
}

async fn salary_get(params: QueryParams<SalaryPayload>) -> ApiResult {
    let Query(payload) = params?;
    Ok(calculate("salary", payload, convert_salary))
}

async fn salary_post(body: JsonBody<SalaryPayload>) -> ApiResult {
    let Json(payload) = body?;
    Ok(calculate("salary", payload, convert_salary))
}

async fn overtime_handler(body: JsonBody<OvertimePayload>) -> ApiResult {
    let Json(payload) = body?;
    Ok(calculate("overtime", payload, calculate_overtime))
}

async fn tip_get(params: QueryParams<TipPayload>) -> ApiResult {
    let Query(payload) = params?;
    Ok(calculate("tip-split", payload, split_tip))
}

async fn tip_post(body: JsonBody<TipPayload>) -> ApiResult {
    let Json(payload) = body?;
    Ok(calculate("tip-split", payload, split_tip))
}

async fn wage_gap_handler(body: JsonBody<WageGapPayload>) -> ApiResult {
    let Json(payload) = body?;
    Ok(calculate("wage-gap", payload, calculate_wage_gap))
}

fn calculate<P, I, R>(calculator: &'static str, payload: P, kernel: fn(&I) -> R) -> Response
where
    P: Into<I>,
    R: Serialize,
{
    let inputs: I = payload.into();
    let result = kernel(&inputs);
    debug!(calculator, "calculation complete");
    json_response(StatusCode::OK, result)
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        header::HeaderValue::from_static("no-store"),
    );
    response
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{
        DebtPayoffResult, FederalTaxResult, MAX_PROJECTION_YEARS, MAX_TERM_MONTHS, MortgageResult,
        TipResult, calculate_mortgage,
    };

    const EPS: f64 = 1e-6;

    fn assert_approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= EPS,
            "expected {expected}, got {actual}"
        );
    }

    fn inputs_from_json<P, I>(json: &str) -> I
    where
        P: for<'de> Deserialize<'de> + Into<I>,
    {
        serde_json::from_str::<P>(json)
            .expect("json should parse")
            .into()
    }

    #[test]
    fn empty_mortgage_payload_uses_form_defaults() {
        let inputs: MortgageInputs = inputs_from_json::<MortgagePayload, _>("{}");
        assert_approx(inputs.home_price, 400_000.0);
        assert_approx(inputs.down_payment, 80_000.0);
        assert_eq!(inputs.term_years, 30);

        let result: MortgageResult = calculate_mortgage(&inputs);
        assert_approx(result.loan_amount, 320_000.0);
    }

    #[test]
    fn negative_terms_become_zero_instead_of_failing() {
        let inputs: MortgageInputs =
            inputs_from_json::<MortgagePayload, _>(r#"{"termYears": -5, "annualRate": 6.5}"#);
        assert_eq!(inputs.term_years, 0);
        assert_eq!(calculate_mortgage(&inputs), MortgageResult::default());
    }

    #[test]
    fn debt_payload_parses_web_keys() {
        let json = r#"{
          "debts": [
            {"name": "CreditCard", "balance": 8500, "rate": 22.99, "minPayment": 250},
            {"balance": 15000, "rate": 6.5, "minPayment": 350}
          ],
          "extraPayment": 500,
          "method": "snowball"
        }"#;
        let inputs: DebtPayoffInputs = inputs_from_json::<DebtPayoffPayload, _>(json);
        assert_eq!(inputs.debts.len(), 2);
        assert_eq!(inputs.debts[0].name, "CreditCard");
        assert_eq!(inputs.debts[1].name, "Debt 2");
        assert_approx(inputs.debts[0].min_payment, 250.0);
        assert_approx(inputs.extra_payment, 500.0);
        assert_eq!(inputs.method, PayoffMethod::Snowball);
    }

    #[test]
    fn filing_status_accepts_aliases() {
        for (raw, expected) in [
            ("single", FilingStatus::Single),
            ("married-jointly", FilingStatus::MarriedJointly),
            ("marriedJointly", FilingStatus::MarriedJointly),
            ("mfs", FilingStatus::MarriedSeparately),
            ("head_of_household", FilingStatus::HeadOfHousehold),
        ] {
            let json = format!(r#"{{"income": 90000, "filingStatus": "{raw}"}}"#);
            let inputs: FederalTaxInputs = inputs_from_json::<FederalTaxPayload, _>(&json);
            assert_eq!(inputs.filing_status, expected);
        }
    }

    #[test]
    fn unknown_compounding_frequency_falls_back_to_monthly() {
        let inputs: CompoundInputs =
            inputs_from_json::<CompoundPayload, _>(r#"{"frequency": "fortnightly"}"#);
        assert_eq!(inputs.frequency, CompoundingFrequency::Monthly);

        let inputs: CompoundInputs =
            inputs_from_json::<CompoundPayload, _>(r#"{"frequency": "Quarterly"}"#);
        assert_eq!(inputs.frequency, CompoundingFrequency::Quarterly);
    }

    #[test]
    fn huge_counts_are_bounded_before_calculation() {
        let inputs: CompoundInputs =
            inputs_from_json::<CompoundPayload, _>(r#"{"years": 4e9, "annualRate": 7}"#);
        let result = calculate_compound_interest(&inputs);
        assert_eq!(result.yearly_breakdown.len(), MAX_PROJECTION_YEARS as usize);

        let inputs: MortgageInputs = inputs_from_json::<MortgagePayload, _>(r#"{"termYears": 1e12}"#);
        assert_eq!(inputs.term_years, u32::MAX);
        let result = calculate_mortgage(&inputs);
        assert_eq!(result.monthly_schedule.len(), MAX_TERM_MONTHS as usize);

        let inputs: RetirementInputs =
            inputs_from_json::<RetirementPayload, _>(r#"{"retirementAge": 4e9}"#);
        let result = calculate_retirement(&inputs);
        assert_eq!(result.yearly_projection.len(), MAX_PROJECTION_YEARS as usize);

        let response = calculate(
            "wage-gap",
            WageGapPayload {
                years: Some(4e9),
                ..WageGapPayload::default()
            },
            calculate_wage_gap,
        );
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[test]
    fn tip_payload_keeps_non_positive_people() {
        let inputs: TipInputs =
            inputs_from_json::<TipPayload, _>(r#"{"billAmount": 80, "numberOfPeople": -2}"#);
        assert_eq!(inputs.number_of_people, -2);
        let result: TipResult = split_tip(&inputs);
        assert_eq!(result.number_of_people, 1);
    }

    #[test]
    fn result_serialization_uses_camel_case_fields() {
        let result: FederalTaxResult = calculate_federal_tax(&FederalTaxInputs {
            income: 75_000.0,
            filing_status: FilingStatus::Single,
            deduction: None,
        });
        let json = serde_json::to_string(&result).expect("result should serialize");
        assert!(json.contains("\"taxableIncome\""));
        assert!(json.contains("\"marginalRate\""));
        assert!(json.contains("\"bracketBreakdown\""));

        let payoff: DebtPayoffResult = simulate_debt_payoff(&DebtPayoffInputs {
            debts: vec![Debt {
                name: "Card".to_string(),
                balance: 1_000.0,
                rate: 20.0,
                min_payment: 100.0,
            }],
            extra_payment: 0.0,
            method: PayoffMethod::Avalanche,
        });
        let json = serde_json::to_string(&payoff).expect("result should serialize");
        assert!(json.contains("\"monthsToPayoff\""));
        assert!(json.contains("\"payoffOrder\""));
        assert!(json.contains("\"monthlySchedule\""));
        assert!(json.contains("\"method\":\"avalanche\""));
    }

    #[test]
    fn calculation_responses_are_not_cached() {
        let response = calculate("tip-split", TipPayload::default(), split_tip);
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CACHE_CONTROL).unwrap(),
            "no-store"
        );
    }

    #[test]
    fn not_found_error_maps_to_404() {
        let response = ApiError::NotFound.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn default_server_config_listens_on_all_interfaces() {
        let config = ServerConfig::default();
        assert_eq!(config.port, 8080);
        assert!(config.host.is_unspecified());
    }
}
