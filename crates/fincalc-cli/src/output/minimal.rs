use serde_json::Value;

use super::{cell, result_of};

/// Fields worth printing on their own, most specific first.
const PRIORITY_KEYS: [&str; 10] = [
    "monthly_payment",
    "total_interest",
    "loan_to_value",
    "future_value",
    "adjusted_value",
    "present_value",
    "roi",
    "approximate_irr",
    "remaining_balance",
    "payment_amount",
];

/// Print just the headline number from the output.
pub fn print_minimal(value: &Value) {
    let result = result_of(value);

    if let Value::Object(map) = result {
        for key in PRIORITY_KEYS {
            if let Some(val) = map.get(key).filter(|v| !v.is_null()) {
                println!("{}", cell(val));
                return;
            }
        }

        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, cell(val));
            return;
        }
    }

    // A bare schedule: report the final row's balance.
    if let Value::Array(rows) = result {
        if let Some(last) = rows.last() {
            print_minimal(last);
            return;
        }
    }

    println!("{}", cell(result));
}
