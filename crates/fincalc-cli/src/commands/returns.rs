use clap::Args;
use rust_decimal::Decimal;
use serde_json::{json, Value};

use fincalc_core::returns;

/// Arguments for return on investment
#[derive(Args)]
pub struct RoiArgs {
    /// Amount originally invested
    #[arg(long)]
    pub initial: Decimal,

    /// Value of the investment today
    #[arg(long = "final", allow_hyphen_values = true)]
    pub final_value: Decimal,
}

/// Arguments for the average-return IRR approximation
#[derive(Args)]
pub struct IrrArgs {
    /// Initial outlay, entered as a negative number (e.g. -1000)
    #[arg(long, allow_hyphen_values = true)]
    pub initial: Decimal,

    /// Comma-separated annual cash flows (e.g. "400,400,400")
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    pub cash_flows: Vec<Decimal>,
}

pub fn run_roi(args: RoiArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let roi = returns::return_on_investment(args.initial, args.final_value)?;
    Ok(json!({ "roi": roi }))
}

pub fn run_irr(args: IrrArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let irr = returns::approximate_irr(args.initial, &args.cash_flows)?;
    Ok(json!({
        "approximate_irr": irr,
        "periods": args.cash_flows.len(),
    }))
}
