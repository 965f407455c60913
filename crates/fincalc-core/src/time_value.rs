use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::arith;
use crate::error::FinCalcError;
use crate::types::{Money, Percent, Years};
use crate::FinCalcResult;

const HUNDRED: Decimal = dec!(100);

/// How often interest is credited within a year.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompoundingFrequency {
    #[default]
    Annual,
    Semiannual,
    Quarterly,
    Monthly,
    Daily,
}

impl CompoundingFrequency {
    pub const ALL: [CompoundingFrequency; 5] = [
        CompoundingFrequency::Annual,
        CompoundingFrequency::Semiannual,
        CompoundingFrequency::Quarterly,
        CompoundingFrequency::Monthly,
        CompoundingFrequency::Daily,
    ];

    pub fn periods_per_year(self) -> u32 {
        match self {
            CompoundingFrequency::Annual => 1,
            CompoundingFrequency::Semiannual => 2,
            CompoundingFrequency::Quarterly => 4,
            CompoundingFrequency::Monthly => 12,
            CompoundingFrequency::Daily => 365,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CompoundingFrequency::Annual => "annual",
            CompoundingFrequency::Semiannual => "semiannual",
            CompoundingFrequency::Quarterly => "quarterly",
            CompoundingFrequency::Monthly => "monthly",
            CompoundingFrequency::Daily => "daily",
        }
    }

    fn valid_names() -> String {
        Self::ALL
            .iter()
            .map(|f| f.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for CompoundingFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CompoundingFrequency {
    type Err = FinCalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|f| f.as_str() == wanted)
            .ok_or_else(|| {
                FinCalcError::invalid(
                    "compounding_frequency",
                    format!(
                        "unknown frequency '{s}', must be one of: {}",
                        Self::valid_names()
                    ),
                )
            })
    }
}

fn require_non_negative(value: Decimal, field: &str, label: &str) -> FinCalcResult<()> {
    if value < Decimal::ZERO {
        return Err(FinCalcError::invalid(
            field,
            format!("{label} cannot be negative"),
        ));
    }
    Ok(())
}

/// `(1 + rate)^-years`. Shrinks toward zero for large exponents, so
/// discounting never leaves Decimal range.
fn discount_factor(rate: Decimal, years: Years, field: &str) -> FinCalcResult<Decimal> {
    arith::pow(Decimal::ONE / (Decimal::ONE + rate), years, field)
}

/// Future value of a lump sum under periodic compounding.
///
/// `rate` is an annual percentage; the balance grows as
/// `principal * (1 + rate / 100 / n) ^ (n * time_years)` with `n` periods
/// per year.
pub fn future_value(
    principal: Money,
    rate: Percent,
    time_years: Years,
    frequency: CompoundingFrequency,
) -> FinCalcResult<Money> {
    require_non_negative(principal, "principal", "Principal")?;
    require_non_negative(rate, "rate", "Interest rate")?;
    require_non_negative(time_years, "time_years", "Time")?;

    let n = Decimal::from(frequency.periods_per_year());
    let period_rate = rate / HUNDRED / n;
    let periods = arith::mul(n, time_years, "time_years")?;
    let factor = arith::pow(Decimal::ONE + period_rate, periods, "rate")?;

    tracing::debug!(%principal, %rate, %time_years, %frequency, %factor, "future value");
    arith::mul(principal, factor, "principal")
}

/// Today's purchasing power of `present_value` after `years` of inflation.
pub fn inflation_adjusted_value(
    present_value: Money,
    inflation_rate: Percent,
    years: Years,
) -> FinCalcResult<Money> {
    require_non_negative(present_value, "present_value", "Present value")?;
    require_non_negative(inflation_rate, "inflation_rate", "Inflation rate")?;
    require_non_negative(years, "years", "Number of years")?;

    let discount = discount_factor(inflation_rate / HUNDRED, years, "inflation_rate")?;
    Ok(present_value * discount)
}

/// Future value with a fixed contribution at the end of every year, annual
/// compounding, rounded to cents.
pub fn future_value_with_contributions(
    principal: Money,
    rate: Percent,
    years: Years,
    annual_contribution: Money,
) -> FinCalcResult<Money> {
    require_non_negative(principal, "principal", "Principal")?;
    require_non_negative(rate, "rate", "Interest rate")?;
    require_non_negative(years, "years", "Number of years")?;
    require_non_negative(annual_contribution, "annual_contribution", "Contribution")?;

    let r = rate / HUNDRED;
    let factor = arith::pow(Decimal::ONE + r, years, "rate")?;
    let grown_principal = arith::mul(principal, factor, "principal")?;

    let grown_contributions = if annual_contribution.is_zero() {
        Decimal::ZERO
    } else if r.is_zero() {
        arith::mul(annual_contribution, years, "annual_contribution")?
    } else {
        let annuity = arith::div(factor - Decimal::ONE, r, "rate")?;
        arith::mul(annual_contribution, annuity, "annual_contribution")?
    };

    let total = arith::add(grown_principal, grown_contributions, "annual_contribution")?;
    Ok(total.round_dp(2))
}

/// Discount a future amount back to today at an annual rate, rounded to cents.
pub fn present_value(future_value: Money, rate: Percent, years: Years) -> FinCalcResult<Money> {
    if future_value <= Decimal::ZERO {
        return Err(FinCalcError::invalid(
            "future_value",
            "Future value must be greater than zero",
        ));
    }
    require_non_negative(rate, "rate", "Discount rate")?;
    require_non_negative(years, "years", "Number of years")?;

    let discount = discount_factor(rate / HUNDRED, years, "rate")?;
    Ok((future_value * discount).round_dp(2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_future_value_annual() {
        let result =
            future_value(dec!(1000), dec!(5), dec!(10), CompoundingFrequency::Annual).unwrap();
        // 1000 * 1.05^10 = 1628.894626777...
        assert_eq!(result.round_dp(2), dec!(1628.89));
    }

    #[test]
    fn test_future_value_more_frequent_compounding_grows_more() {
        let mut last = Decimal::ZERO;
        for freq in CompoundingFrequency::ALL {
            let fv = future_value(dec!(1000), dec!(5), dec!(10), freq).unwrap();
            assert!(fv > last, "{freq} should beat the previous frequency");
            last = fv;
        }
        assert_eq!(last.round_dp(2), dec!(1648.66));
    }

    #[test]
    fn test_future_value_zero_time_is_principal() {
        let fv = future_value(dec!(2500), dec!(7), dec!(0), CompoundingFrequency::Monthly).unwrap();
        assert_eq!(fv, dec!(2500));
    }

    #[test]
    fn test_future_value_fractional_years() {
        let fv =
            future_value(dec!(1000), dec!(10), dec!(0.5), CompoundingFrequency::Annual).unwrap();
        // 1000 * sqrt(1.1) = 1048.808848...
        assert!((fv - dec!(1048.81)).abs() < dec!(0.01), "got {fv}");
    }

    #[test]
    fn test_future_value_rejects_negatives() {
        let f = CompoundingFrequency::Annual;
        let err = future_value(dec!(-1), dec!(5), dec!(1), f).unwrap_err();
        assert_eq!(err.field(), Some("principal"));
        let err = future_value(dec!(1), dec!(-5), dec!(1), f).unwrap_err();
        assert_eq!(err.field(), Some("rate"));
        let err = future_value(dec!(1), dec!(5), dec!(-1), f).unwrap_err();
        assert_eq!(err.field(), Some("time_years"));
    }

    #[test]
    fn test_frequency_parse_and_default() {
        assert_eq!(
            "Quarterly".parse::<CompoundingFrequency>().unwrap(),
            CompoundingFrequency::Quarterly
        );
        assert_eq!(CompoundingFrequency::default(), CompoundingFrequency::Annual);
        assert_eq!(CompoundingFrequency::Daily.periods_per_year(), 365);
    }

    #[test]
    fn test_frequency_unknown_lists_valid_options() {
        let err = "weekly".parse::<CompoundingFrequency>().unwrap_err();
        let msg = err.to_string();
        for name in ["annual", "semiannual", "quarterly", "monthly", "daily"] {
            assert!(msg.contains(name), "missing {name} in {msg}");
        }
    }

    #[test]
    fn test_inflation_adjusted_value() {
        let v = inflation_adjusted_value(dec!(1000), dec!(3), dec!(10)).unwrap();
        assert_eq!(v.round_dp(2), dec!(744.09));
    }

    #[test]
    fn test_inflation_adjusted_zero_rate_unchanged() {
        let v = inflation_adjusted_value(dec!(1000), dec!(0), dec!(30)).unwrap();
        assert_eq!(v, dec!(1000));
    }

    #[test]
    fn test_inflation_adjusted_rejects_negative_years() {
        let err = inflation_adjusted_value(dec!(1000), dec!(3), dec!(-1)).unwrap_err();
        assert_eq!(err.field(), Some("years"));
    }

    #[test]
    fn test_future_value_with_contributions() {
        // 1000 * 1.05^10 + 100 * (1.05^10 - 1) / 0.05 = 1628.89 + 1257.79
        let v = future_value_with_contributions(dec!(1000), dec!(5), dec!(10), dec!(100)).unwrap();
        assert_eq!(v, dec!(2886.68));
    }

    #[test]
    fn test_future_value_with_contributions_zero_rate() {
        let v = future_value_with_contributions(dec!(1000), dec!(0), dec!(10), dec!(100)).unwrap();
        assert_eq!(v, dec!(2000));
    }

    #[test]
    fn test_present_value() {
        let v = present_value(dec!(1628.89), dec!(5), dec!(10)).unwrap();
        assert_eq!(v, dec!(1000.00));
    }

    #[test]
    fn test_present_value_requires_positive_future_value() {
        assert!(present_value(dec!(0), dec!(5), dec!(10)).is_err());
    }

    #[test]
    fn test_future_value_overflow_is_invalid_input() {
        let big = dec!(70000000000000000000000000000);
        let err = future_value(big, dec!(20), dec!(1), CompoundingFrequency::Annual).unwrap_err();
        assert_eq!(err.field(), Some("principal"));
    }

    #[test]
    fn test_future_value_with_contributions_overflow_is_invalid_input() {
        let big = dec!(70000000000000000000000000000);
        let err = future_value_with_contributions(big, dec!(20), dec!(1), dec!(0)).unwrap_err();
        assert_eq!(err.field(), Some("principal"));
        let err = future_value_with_contributions(dec!(0), dec!(0), dec!(2), big).unwrap_err();
        assert_eq!(err.field(), Some("annual_contribution"));
    }

    #[test]
    fn test_long_horizon_discounting_tends_to_zero() {
        let v = inflation_adjusted_value(dec!(1000), dec!(50), dec!(1000)).unwrap();
        assert!(v >= Decimal::ZERO && v < dec!(0.01), "got {v}");
        let pv = present_value(dec!(1000), dec!(50), dec!(1000)).unwrap();
        assert_eq!(pv, Decimal::ZERO);
    }
}
