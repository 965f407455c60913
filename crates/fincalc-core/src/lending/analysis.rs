use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::amortization::{AmortizationEngine, AmortizationSchedule};
use crate::types::{with_metadata, ComputationOutput, Money, Percent};
use crate::FinCalcResult;

/// Conventional threshold above which lenders usually require mortgage insurance.
const HIGH_LTV_THRESHOLD: Decimal = dec!(80);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanInput {
    pub loan_amount: Money,
    /// Annual rate as a percentage.
    pub annual_interest_rate: Percent,
    pub term_years: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_value: Option<Money>,
}

impl LoanInput {
    /// Parse a JSON request, reporting malformed documents as
    /// `SerializationError`.
    pub fn from_json(json: &str) -> FinCalcResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanAnalysis {
    /// Level payment rounded to cents.
    pub monthly_payment: Money,
    /// Lifetime interest from the unrounded payment formula.
    pub total_interest: Money,
    /// Sum of the schedule's rounded interest column.
    pub schedule_interest: Money,
    /// Sum of the schedule's rounded payment column.
    pub total_paid: Money,
    pub term_months: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loan_to_value: Option<Percent>,
    pub schedule: AmortizationSchedule,
}

/// Payment, schedule and totals for one loan.
pub fn analyze_loan(input: &LoanInput) -> FinCalcResult<ComputationOutput<LoanAnalysis>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let engine = AmortizationEngine::new(input.annual_interest_rate, input.term_years)?;

    let monthly_payment = engine.monthly_payment(input.loan_amount)?;
    let schedule = engine.amortization_schedule(input.loan_amount)?;
    let total_interest = engine.total_interest(input.loan_amount)?;

    let schedule_interest: Money = schedule.iter().map(|row| row.interest_paid).sum();
    let total_paid: Money = schedule.iter().map(|row| row.payment_amount).sum();

    if (schedule_interest - total_interest).abs() > dec!(0.01) {
        warnings.push(format!(
            "Schedule interest {} differs from formula interest {} due to per-row rounding",
            schedule_interest,
            total_interest.round_dp(2)
        ));
    }

    let loan_to_value = match input.property_value {
        Some(value) => {
            let ltv = engine.loan_to_value_ratio(input.loan_amount, value)?;
            if ltv > HIGH_LTV_THRESHOLD {
                warnings.push(format!(
                    "LTV {}% exceeds {}%; mortgage insurance is typically required",
                    ltv.round_dp(2),
                    HIGH_LTV_THRESHOLD
                ));
            }
            Some(ltv)
        }
        None => None,
    };

    if input.annual_interest_rate.is_zero() {
        warnings.push("Zero interest rate: principal repaid in equal instalments".into());
    }

    let analysis = LoanAnalysis {
        monthly_payment: monthly_payment.round_dp(2),
        total_interest,
        schedule_interest,
        total_paid,
        term_months: engine.terms().term_months(),
        loan_to_value,
        schedule,
    };

    tracing::debug!(
        loan_amount = %input.loan_amount,
        warnings = warnings.len(),
        "loan analysis complete"
    );

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Level-payment amortization (monthly compounding, banker's rounding to cents)",
        input,
        warnings,
        elapsed,
        analysis,
    ))
}
