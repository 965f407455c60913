use napi::Result as NapiResult;
use napi_derive::napi;
use rust_decimal::Decimal;
use serde::Deserialize;

use fincalc_core::lending::{self, AmortizationEngine};
use fincalc_core::time_value::{self, CompoundingFrequency};
use fincalc_core::{returns, FinCalcError, Money, Percent, Years};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

fn parse<'a, T: Deserialize<'a>>(input_json: &'a str) -> NapiResult<T> {
    serde_json::from_str(input_json)
        .map_err(FinCalcError::from)
        .map_err(to_napi_error)
}

fn respond(value: &impl serde::Serialize) -> NapiResult<String> {
    serde_json::to_string(value)
        .map_err(FinCalcError::from)
        .map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Lending
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct LoanRequest {
    annual_interest_rate: Percent,
    term_years: u32,
    loan_amount: Money,
}

impl LoanRequest {
    fn engine(&self) -> NapiResult<AmortizationEngine> {
        AmortizationEngine::new(self.annual_interest_rate, self.term_years).map_err(to_napi_error)
    }
}

#[napi]
pub fn monthly_payment(input_json: String) -> NapiResult<String> {
    let req: LoanRequest = parse(&input_json)?;
    let payment = req.engine()?.monthly_payment(req.loan_amount).map_err(to_napi_error)?;
    respond(&payment)
}

#[napi]
pub fn amortization_schedule(input_json: String) -> NapiResult<String> {
    let req: LoanRequest = parse(&input_json)?;
    let schedule = req
        .engine()?
        .amortization_schedule(req.loan_amount)
        .map_err(to_napi_error)?;
    respond(&schedule)
}

#[napi]
pub fn total_interest(input_json: String) -> NapiResult<String> {
    let req: LoanRequest = parse(&input_json)?;
    let total = req.engine()?.total_interest(req.loan_amount).map_err(to_napi_error)?;
    respond(&total)
}

#[derive(Deserialize)]
struct LtvRequest {
    loan_amount: Money,
    property_value: Money,
}

#[napi]
pub fn loan_to_value_ratio(input_json: String) -> NapiResult<String> {
    let req: LtvRequest = parse(&input_json)?;
    let ltv = lending::amortization::loan_to_value_ratio(req.loan_amount, req.property_value)
        .map_err(to_napi_error)?;
    respond(&ltv)
}

#[napi]
pub fn analyze_loan(input_json: String) -> NapiResult<String> {
    let input = lending::LoanInput::from_json(&input_json).map_err(to_napi_error)?;
    let output = lending::analyze_loan(&input).map_err(to_napi_error)?;
    respond(&output)
}

// ---------------------------------------------------------------------------
// Time value
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct FutureValueRequest {
    principal: Money,
    rate: Percent,
    time_years: Years,
    #[serde(default)]
    compounding_frequency: Option<String>,
    #[serde(default)]
    annual_contribution: Option<Money>,
}

#[napi]
pub fn future_value(input_json: String) -> NapiResult<String> {
    let req: FutureValueRequest = parse(&input_json)?;
    let frequency: CompoundingFrequency = match req.compounding_frequency.as_deref() {
        Some(name) => name.parse().map_err(to_napi_error)?,
        None => CompoundingFrequency::default(),
    };
    let value = match req.annual_contribution {
        Some(contribution) if frequency == CompoundingFrequency::Annual => {
            time_value::future_value_with_contributions(
                req.principal,
                req.rate,
                req.time_years,
                contribution,
            )
        }
        Some(_) => {
            return Err(to_napi_error(
                "annual_contribution is only supported with annual compounding",
            ))
        }
        None => time_value::future_value(req.principal, req.rate, req.time_years, frequency),
    }
    .map_err(to_napi_error)?;
    respond(&value)
}

#[derive(Deserialize)]
struct InflationRequest {
    present_value: Money,
    inflation_rate: Percent,
    years: Years,
}

#[napi]
pub fn inflation_adjusted_value(input_json: String) -> NapiResult<String> {
    let req: InflationRequest = parse(&input_json)?;
    let value =
        time_value::inflation_adjusted_value(req.present_value, req.inflation_rate, req.years)
            .map_err(to_napi_error)?;
    respond(&value)
}

#[derive(Deserialize)]
struct PresentValueRequest {
    future_value: Money,
    rate: Percent,
    years: Years,
}

#[napi]
pub fn present_value(input_json: String) -> NapiResult<String> {
    let req: PresentValueRequest = parse(&input_json)?;
    let value = time_value::present_value(req.future_value, req.rate, req.years)
        .map_err(to_napi_error)?;
    respond(&value)
}

// ---------------------------------------------------------------------------
// Returns
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct RoiRequest {
    initial_investment: Money,
    final_value: Money,
}

#[napi]
pub fn return_on_investment(input_json: String) -> NapiResult<String> {
    let req: RoiRequest = parse(&input_json)?;
    let roi = returns::return_on_investment(req.initial_investment, req.final_value)
        .map_err(to_napi_error)?;
    respond(&roi)
}

#[derive(Deserialize)]
struct IrrRequest {
    initial_investment: Money,
    cash_flows: Vec<Decimal>,
}

#[napi]
pub fn approximate_irr(input_json: String) -> NapiResult<String> {
    let req: IrrRequest = parse(&input_json)?;
    let irr = returns::approximate_irr(req.initial_investment, &req.cash_flows)
        .map_err(to_napi_error)?;
    respond(&irr)
}
