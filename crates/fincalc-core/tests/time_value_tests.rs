use fincalc_core::time_value::{self, CompoundingFrequency};
use fincalc_core::FinCalcError;
use rust_decimal_macros::dec;

// ===========================================================================
// Time-value of money tests
// ===========================================================================

#[test]
fn test_future_value_reference() {
    let fv = time_value::future_value(dec!(1000), dec!(5), dec!(10), CompoundingFrequency::Annual)
        .unwrap();
    assert!((fv - dec!(1628.89)).abs() < dec!(0.01), "got {}", fv);
}

#[test]
fn test_future_value_by_frequency() {
    let expected = [
        (CompoundingFrequency::Semiannual, dec!(1638.62)),
        (CompoundingFrequency::Quarterly, dec!(1643.62)),
        (CompoundingFrequency::Monthly, dec!(1647.01)),
        (CompoundingFrequency::Daily, dec!(1648.66)),
    ];
    for (freq, want) in expected {
        let fv = time_value::future_value(dec!(1000), dec!(5), dec!(10), freq).unwrap();
        assert_eq!(fv.round_dp(2), want, "{}", freq);
    }
}

#[test]
fn test_weekly_frequency_rejected_with_valid_set() {
    match "weekly".parse::<CompoundingFrequency>() {
        Err(FinCalcError::InvalidInput { field, reason }) => {
            assert_eq!(field, "compounding_frequency");
            assert!(reason.contains("annual, semiannual, quarterly, monthly, daily"));
        }
        other => panic!("expected InvalidInput, got {:?}", other),
    }
}

#[test]
fn test_frequency_serde_names() {
    let f: CompoundingFrequency = serde_json::from_str("\"semiannual\"").unwrap();
    assert_eq!(f, CompoundingFrequency::Semiannual);
    assert_eq!(serde_json::to_string(&CompoundingFrequency::Daily).unwrap(), "\"daily\"");
}

#[test]
fn test_inflation_adjusted_reference() {
    let v = time_value::inflation_adjusted_value(dec!(1000), dec!(3), dec!(10)).unwrap();
    assert!((v - dec!(744.09)).abs() < dec!(0.01), "got {}", v);
}

#[test]
fn test_inflation_adjusted_rejects_negative_inputs() {
    assert!(time_value::inflation_adjusted_value(dec!(-1), dec!(3), dec!(10)).is_err());
    assert!(time_value::inflation_adjusted_value(dec!(1000), dec!(-3), dec!(10)).is_err());
    assert!(time_value::inflation_adjusted_value(dec!(1000), dec!(3), dec!(-10)).is_err());
}

#[test]
fn test_present_value_inverts_future_value() {
    let fv = time_value::future_value(dec!(5000), dec!(4), dec!(8), CompoundingFrequency::Annual)
        .unwrap();
    let pv = time_value::present_value(fv, dec!(4), dec!(8)).unwrap();
    assert_eq!(pv, dec!(5000));
}
