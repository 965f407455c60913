//! Overflow-checked Decimal arithmetic. Every helper names the input a
//! failure is blamed on, so range errors surface as `InvalidInput`.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;

use crate::error::FinCalcError;
use crate::FinCalcResult;

fn out_of_range(field: &str) -> FinCalcError {
    FinCalcError::invalid(field, "result exceeds representable Decimal range")
}

pub(crate) fn add(a: Decimal, b: Decimal, field: &str) -> FinCalcResult<Decimal> {
    a.checked_add(b).ok_or_else(|| out_of_range(field))
}

pub(crate) fn sub(a: Decimal, b: Decimal, field: &str) -> FinCalcResult<Decimal> {
    a.checked_sub(b).ok_or_else(|| out_of_range(field))
}

pub(crate) fn mul(a: Decimal, b: Decimal, field: &str) -> FinCalcResult<Decimal> {
    a.checked_mul(b).ok_or_else(|| out_of_range(field))
}

/// Callers guarantee a non-zero divisor; `None` here means overflow.
pub(crate) fn div(a: Decimal, b: Decimal, field: &str) -> FinCalcResult<Decimal> {
    a.checked_div(b).ok_or_else(|| out_of_range(field))
}

/// Raise `base` to `exponent`, using exact integer powers whenever the
/// exponent is whole.
pub(crate) fn pow(base: Decimal, exponent: Decimal, field: &str) -> FinCalcResult<Decimal> {
    let result = if exponent.fract().is_zero() {
        exponent.to_u64().and_then(|n| base.checked_powu(n))
    } else {
        base.checked_powd(exponent)
    };
    result.ok_or_else(|| out_of_range(field))
}
