use clap::Args;
use rust_decimal::Decimal;
use serde_json::{json, Value};

use fincalc_core::lending::{self, AmortizationEngine, LoanInput};

use crate::input;

/// Rate, term and principal shared by the per-loan commands
#[derive(Args)]
pub struct LoanArgs {
    /// Annual interest rate as a percentage (e.g. 6.5 for 6.5%)
    #[arg(long, allow_hyphen_values = true)]
    pub rate: Decimal,

    /// Loan term in whole years
    #[arg(long)]
    pub years: u32,

    /// Loan principal
    #[arg(long, allow_hyphen_values = true)]
    pub amount: Decimal,
}

impl LoanArgs {
    fn engine(&self) -> Result<AmortizationEngine, Box<dyn std::error::Error>> {
        Ok(AmortizationEngine::new(self.rate, self.years)?)
    }
}

/// Arguments for loan-to-value
#[derive(Args)]
pub struct LtvArgs {
    /// Loan principal
    #[arg(long, allow_hyphen_values = true)]
    pub amount: Decimal,

    /// Appraised property value
    #[arg(long, allow_hyphen_values = true)]
    pub property_value: Decimal,
}

/// Arguments for the full loan analysis
#[derive(Args)]
pub struct AnalyzeArgs {
    /// Path to JSON input file
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_payment(args: LoanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let payment = args.engine()?.monthly_payment(args.amount)?;
    Ok(json!({
        "monthly_payment": payment.round_dp(2),
        "monthly_payment_exact": payment,
        "term_months": args.years * 12,
    }))
}

pub fn run_schedule(args: LoanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let schedule = args.engine()?.amortization_schedule(args.amount)?;
    Ok(serde_json::to_value(schedule)?)
}

pub fn run_total_interest(args: LoanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let total = args.engine()?.total_interest(args.amount)?;
    Ok(json!({
        "total_interest": total.round_dp(2),
        "total_paid": (total + args.amount).round_dp(2),
    }))
}

pub fn run_ltv(args: LtvArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let ltv = lending::amortization::loan_to_value_ratio(args.amount, args.property_value)?;
    Ok(json!({ "loan_to_value": ltv }))
}

pub fn run_analyze(args: AnalyzeArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let loan: LoanInput = input::read_request(args.input.as_deref(), "loan analysis")?;
    let result = lending::analyze_loan(&loan)?;
    Ok(serde_json::to_value(result)?)
}
