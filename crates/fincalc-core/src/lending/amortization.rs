//! Level-payment amortization for fixed-rate loans with monthly periods.
//!
//! The schedule walks the balance forward month by month. Each row's
//! interest accrues on the previous row's balance, so rows must be built in
//! order. The final row pays off whatever balance remains, absorbing any
//! drift, so the loan always closes at exactly zero. Reported amounts are
//! rounded to cents with banker's rounding (`Decimal::round_dp`).

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::arith;
use crate::error::FinCalcError;
use crate::types::{Money, Percent};
use crate::FinCalcResult;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

const MONTHS_PER_YEAR: u32 = 12;

/// Balances smaller than a cent are treated as paid off.
const BALANCE_EPSILON: Decimal = dec!(0.01);

/// Decimal places for reported amounts.
const CENTS: u32 = 2;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Rate and term of a loan, with the monthly figures derived once.
///
/// Deserialising reads only the rate and term and re-derives the rest, so
/// stored terms are validated exactly like freshly built ones.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "LoanTermsInput")]
pub struct LoanTerms {
    annual_interest_rate: Percent,
    term_years: u32,
    monthly_interest_rate: Decimal,
    term_months: u32,
}

#[derive(Deserialize)]
struct LoanTermsInput {
    annual_interest_rate: Percent,
    term_years: u32,
}

impl TryFrom<LoanTermsInput> for LoanTerms {
    type Error = FinCalcError;

    fn try_from(input: LoanTermsInput) -> Result<Self, Self::Error> {
        LoanTerms::new(input.annual_interest_rate, input.term_years)
    }
}

impl LoanTerms {
    pub fn new(annual_interest_rate: Percent, term_years: u32) -> FinCalcResult<Self> {
        if annual_interest_rate < Decimal::ZERO {
            return Err(FinCalcError::invalid(
                "interest_rate",
                "Interest rate cannot be negative",
            ));
        }
        if term_years == 0 {
            return Err(FinCalcError::invalid(
                "loan_term_years",
                "Loan term must be greater than zero",
            ));
        }
        let term_months = term_years.checked_mul(MONTHS_PER_YEAR).ok_or_else(|| {
            FinCalcError::invalid("loan_term_years", "Loan term is too long")
        })?;

        Ok(Self {
            annual_interest_rate,
            term_years,
            monthly_interest_rate: annual_interest_rate
                / dec!(100)
                / Decimal::from(MONTHS_PER_YEAR),
            term_months,
        })
    }

    pub fn annual_interest_rate(&self) -> Percent {
        self.annual_interest_rate
    }

    pub fn term_years(&self) -> u32 {
        self.term_years
    }

    /// Periodic rate as a decimal fraction (6% a year = 0.005).
    pub fn monthly_interest_rate(&self) -> Decimal {
        self.monthly_interest_rate
    }

    pub fn term_months(&self) -> u32 {
        self.term_months
    }
}

/// One row of an amortization table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRecord {
    /// 1-based month number.
    pub payment_number: u32,
    pub payment_amount: Money,
    pub principal_paid: Money,
    pub interest_paid: Money,
    /// Balance after this payment.
    pub remaining_balance: Money,
}

pub type AmortizationSchedule = Vec<PaymentRecord>;

/// Computes payments and schedules for a fixed set of loan terms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmortizationEngine {
    terms: LoanTerms,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

impl AmortizationEngine {
    /// `interest_rate` is the annual percentage (5.5 for 5.5%).
    pub fn new(interest_rate: Percent, loan_term_years: u32) -> FinCalcResult<Self> {
        let terms = LoanTerms::new(interest_rate, loan_term_years)?;
        tracing::debug!(
            rate = %terms.annual_interest_rate,
            months = terms.term_months,
            "amortization engine configured"
        );
        Ok(Self { terms })
    }

    pub fn terms(&self) -> &LoanTerms {
        &self.terms
    }

    /// Level monthly payment, unrounded.
    ///
    /// A zero rate repays principal in equal instalments; otherwise the
    /// annuity formula `P * r / (1 - (1+r)^-n)` applies. Working from the
    /// discount factor keeps high rates and long terms in range: the factor
    /// shrinks toward zero and the payment toward `P * r`.
    pub fn monthly_payment(&self, loan_amount: Money) -> FinCalcResult<Money> {
        validate_loan_amount(loan_amount)?;

        let r = self.terms.monthly_interest_rate;
        let n = Decimal::from(self.terms.term_months);

        if r.is_zero() {
            return Ok(loan_amount / n);
        }

        let discount = arith::pow(Decimal::ONE / (Decimal::ONE + r), n, "interest_rate")?;
        let annuity = Decimal::ONE - discount;
        if annuity.is_zero() {
            // Rate so small that (1+r)^-n rounds to 1 at 28 digits.
            return Ok(loan_amount / n);
        }
        let interest_only = arith::mul(loan_amount, r, "loan_amount")?;
        arith::div(interest_only, annuity, "loan_amount")
    }

    /// Month-by-month schedule with cents-rounded amounts.
    pub fn amortization_schedule(
        &self,
        loan_amount: Money,
    ) -> FinCalcResult<AmortizationSchedule> {
        validate_loan_amount(loan_amount)?;

        let payment = self.monthly_payment(loan_amount)?;
        let r = self.terms.monthly_interest_rate;
        let term_months = self.terms.term_months;

        let mut balance = loan_amount;
        let mut schedule = Vec::with_capacity(term_months as usize);

        for month in 1..=term_months {
            let interest = arith::mul(balance, r, "loan_amount")?;
            let (principal, payment_amount) = if month == term_months {
                (balance, arith::add(balance, interest, "loan_amount")?)
            } else {
                (payment - interest, payment)
            };

            balance -= principal;
            if balance.abs() < BALANCE_EPSILON {
                balance = Decimal::ZERO;
            }

            schedule.push(PaymentRecord {
                payment_number: month,
                payment_amount: payment_amount.round_dp(CENTS),
                principal_paid: principal.round_dp(CENTS),
                interest_paid: interest.round_dp(CENTS),
                remaining_balance: balance.round_dp(CENTS),
            });
        }

        tracing::debug!(
            %loan_amount,
            rows = schedule.len(),
            "amortization schedule generated"
        );
        Ok(schedule)
    }

    /// Lifetime interest from the unrounded level payment.
    ///
    /// This can differ by a few cents from summing `interest_paid` over the
    /// schedule, which works from rounded rows.
    pub fn total_interest(&self, loan_amount: Money) -> FinCalcResult<Money> {
        validate_loan_amount(loan_amount)?;

        let payment = self.monthly_payment(loan_amount)?;
        let total_paid = arith::mul(
            payment,
            Decimal::from(self.terms.term_months),
            "loan_amount",
        )?;
        Ok(total_paid - loan_amount)
    }

    /// Loan-to-value as a percentage.
    pub fn loan_to_value_ratio(
        &self,
        loan_amount: Money,
        property_value: Money,
    ) -> FinCalcResult<Percent> {
        loan_to_value_ratio(loan_amount, property_value)
    }
}

/// Loan-to-value as a percentage, unrounded.
pub fn loan_to_value_ratio(loan_amount: Money, property_value: Money) -> FinCalcResult<Percent> {
    validate_loan_amount(loan_amount)?;
    if property_value <= Decimal::ZERO {
        return Err(FinCalcError::invalid(
            "property_value",
            "Property value must be greater than zero",
        ));
    }
    let ratio = arith::div(loan_amount, property_value, "property_value")?;
    arith::mul(ratio, dec!(100), "property_value")
}

fn validate_loan_amount(loan_amount: Money) -> FinCalcResult<()> {
    if loan_amount <= Decimal::ZERO {
        return Err(FinCalcError::invalid(
            "loan_amount",
            "Loan amount must be greater than zero",
        ));
    }
    Ok(())
}


// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn engine(rate: Decimal, years: u32) -> AmortizationEngine {
        AmortizationEngine::new(rate, years).unwrap()
    }

    #[test]
    fn test_terms_derive_monthly_figures() {
        let terms = LoanTerms::new(dec!(6), 30).unwrap();
        assert_eq!(terms.monthly_interest_rate(), dec!(0.005));
        assert_eq!(terms.term_months(), 360);
        assert_eq!(terms.term_years(), 30);
        assert_eq!(terms.annual_interest_rate(), dec!(6));
    }

    #[test]
    fn test_negative_rate_rejected() {
        let err = AmortizationEngine::new(dec!(-1), 10).unwrap_err();
        assert_eq!(err.field(), Some("interest_rate"));
    }

    #[test]
    fn test_zero_term_rejected() {
        let err = AmortizationEngine::new(dec!(5), 0).unwrap_err();
        assert_eq!(err.field(), Some("loan_term_years"));
    }

    #[test]
    fn test_zero_rate_payment_is_straight_line() {
        let e = engine(dec!(0), 10);
        assert_eq!(e.monthly_payment(dec!(12000)).unwrap(), dec!(100));
    }

    #[test]
    fn test_annuity_payment() {
        // 200k at 6.5% over 30y: 1264.136...
        let p = engine(dec!(6.5), 30).monthly_payment(dec!(200000)).unwrap();
        assert_eq!(p.round_dp(2), dec!(1264.14));
    }

    #[test]
    fn test_payment_rejects_non_positive_loan() {
        let e = engine(dec!(5), 10);
        assert!(e.monthly_payment(dec!(0)).is_err());
        assert!(e.monthly_payment(dec!(-100)).is_err());
    }

    #[test]
    fn test_schedule_first_and_last_rows() {
        let schedule = engine(dec!(6), 1).amortization_schedule(dec!(1200)).unwrap();
        assert_eq!(schedule.len(), 12);
        assert_eq!(
            schedule[0],
            PaymentRecord {
                payment_number: 1,
                payment_amount: dec!(103.28),
                principal_paid: dec!(97.28),
                interest_paid: dec!(6.00),
                remaining_balance: dec!(1102.72),
            }
        );
        let last = schedule.last().unwrap();
        assert_eq!(last.payment_number, 12);
        assert_eq!(last.remaining_balance, Decimal::ZERO);
        assert_eq!(last.interest_paid, dec!(0.51));
    }

    #[test]
    fn test_schedule_zero_rate_has_no_interest() {
        let schedule = engine(dec!(0), 10).amortization_schedule(dec!(12000)).unwrap();
        assert_eq!(schedule.len(), 120);
        assert!(schedule.iter().all(|row| row.interest_paid.is_zero()));
        assert!(schedule.iter().all(|row| row.principal_paid == dec!(100)));
        assert_eq!(schedule[0].remaining_balance, dec!(11900));
    }

    #[test]
    fn test_schedule_rejects_non_positive_loan() {
        let err = engine(dec!(5), 10).amortization_schedule(dec!(0)).unwrap_err();
        assert_eq!(err.field(), Some("loan_amount"));
    }

    #[test]
    fn test_total_interest_uses_unrounded_payment() {
        let e = engine(dec!(6), 1);
        let total = e.total_interest(dec!(1200)).unwrap();
        // 103.2797156... * 12 - 1200
        assert_eq!(total.round_dp(4), dec!(39.3566));

        let schedule_total: Decimal = e
            .amortization_schedule(dec!(1200))
            .unwrap()
            .iter()
            .map(|row| row.interest_paid)
            .sum();
        assert_eq!(schedule_total, dec!(39.33));
    }

    #[test]
    fn test_total_interest_zero_rate() {
        let total = engine(dec!(0), 5).total_interest(dec!(6000)).unwrap();
        assert!(total.is_zero());
    }

    #[test]
    fn test_loan_to_value() {
        let e = engine(dec!(5), 30);
        assert_eq!(e.loan_to_value_ratio(dec!(50000), dec!(200000)).unwrap(), dec!(25));
    }

    #[test]
    fn test_loan_to_value_checks_loan_first() {
        let err = loan_to_value_ratio(dec!(0), dec!(0)).unwrap_err();
        assert_eq!(err.field(), Some("loan_amount"));
        let err = loan_to_value_ratio(dec!(100), dec!(0)).unwrap_err();
        assert_eq!(err.field(), Some("property_value"));
    }

    #[test]
    fn test_high_rate_long_term_payment_tends_to_interest_only() {
        // 300% a year is 25% a month; (1.25)^-360 vanishes at 28 digits.
        let e = engine(dec!(300), 30);
        let payment = e.monthly_payment(dec!(100000)).unwrap();
        assert!((payment - dec!(25000)).abs() < dec!(0.01), "got {payment}");

        let schedule = e.amortization_schedule(dec!(100000)).unwrap();
        assert_eq!(schedule.len(), 360);
        assert_eq!(schedule[0].interest_paid, dec!(25000));
        assert_eq!(schedule.last().unwrap().remaining_balance, Decimal::ZERO);
        let principal: Decimal = schedule.iter().map(|row| row.principal_paid).sum();
        assert!((principal - dec!(100000)).abs() <= dec!(0.01));
    }

    #[test]
    fn test_extreme_rate_still_prices() {
        let payment = engine(dec!(1000000), 50).monthly_payment(dec!(1000)).unwrap();
        assert_eq!(payment.round_dp(2), dec!(833333.33));
    }

    #[test]
    fn test_total_interest_overflow_is_invalid_input() {
        let err = engine(dec!(6), 30)
            .total_interest(dec!(70000000000000000000000000000))
            .unwrap_err();
        assert_eq!(err.field(), Some("loan_amount"));
    }

    #[test]
    fn test_schedule_overflow_is_invalid_input() {
        // 200% a month: the first month's interest exceeds Decimal::MAX.
        let err = engine(dec!(2400), 1)
            .amortization_schedule(dec!(70000000000000000000000000000))
            .unwrap_err();
        assert_eq!(err.field(), Some("loan_amount"));
    }

    #[test]
    fn test_loan_to_value_overflow_is_invalid_input() {
        let err = loan_to_value_ratio(dec!(1000000000000000000000000000), dec!(0.001))
            .unwrap_err();
        assert_eq!(err.field(), Some("property_value"));
    }

    #[test]
    fn test_terms_deserialize_through_validation() {
        let json = r#"{"annual_interest_rate":"5","term_years":0,
            "monthly_interest_rate":"0","term_months":0}"#;
        let err = serde_json::from_str::<LoanTerms>(json).unwrap_err();
        assert!(err.to_string().contains("loan_term_years"), "{err}");
    }

    #[test]
    fn test_terms_deserialize_rederives_monthly_figures() {
        let json = r#"{"annual_interest_rate":"6","term_years":2,
            "monthly_interest_rate":"9","term_months":1}"#;
        let terms: LoanTerms = serde_json::from_str(json).unwrap();
        assert_eq!(terms, LoanTerms::new(dec!(6), 2).unwrap());
        assert_eq!(terms.monthly_interest_rate(), dec!(0.005));
        assert_eq!(terms.term_months(), 24);
    }
}
