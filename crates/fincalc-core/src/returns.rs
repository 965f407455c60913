//! Simple investment return measures, reported as percentages rounded to cents.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::arith;
use crate::error::FinCalcError;
use crate::types::{Money, Percent};
use crate::FinCalcResult;

/// Return on investment: `(final - initial) / initial * 100`.
pub fn return_on_investment(
    initial_investment: Money,
    final_value: Money,
) -> FinCalcResult<Percent> {
    if initial_investment <= Decimal::ZERO {
        return Err(FinCalcError::invalid(
            "initial_investment",
            "Initial investment must be greater than zero",
        ));
    }
    let profit = arith::sub(final_value, initial_investment, "final_value")?;
    let ratio = arith::div(profit, initial_investment, "initial_investment")?;
    Ok(arith::mul(ratio, dec!(100), "initial_investment")?.round_dp(2))
}

/// Average annual return on the capital outlay, as a rough IRR proxy.
///
/// Assumes one cash flow per year and ignores timing, so it overstates
/// the true IRR when cash flows are back-loaded. `initial_investment` is
/// the outflow and must be negative.
pub fn approximate_irr(initial_investment: Money, cash_flows: &[Money]) -> FinCalcResult<Percent> {
    if cash_flows.is_empty() {
        return Err(FinCalcError::invalid(
            "cash_flows",
            "At least one cash flow is required",
        ));
    }
    if initial_investment >= Decimal::ZERO {
        return Err(FinCalcError::invalid(
            "initial_investment",
            "Initial investment must be negative (an outflow)",
        ));
    }

    let inflows = cash_flows
        .iter()
        .try_fold(Decimal::ZERO, |acc, cf| arith::add(acc, *cf, "cash_flows"))?;
    let years = Decimal::from(cash_flows.len() as u64);
    let net = arith::add(inflows, initial_investment, "cash_flows")?;
    let ratio = arith::div(net / years, initial_investment.abs(), "initial_investment")?;

    Ok(arith::mul(ratio, dec!(100), "initial_investment")?.round_dp(2))
}
