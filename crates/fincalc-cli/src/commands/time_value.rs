use clap::Args;
use rust_decimal::Decimal;
use serde_json::{json, Value};

use fincalc_core::time_value::{self, CompoundingFrequency};

/// Arguments for compound growth of a lump sum
#[derive(Args)]
pub struct FutureValueArgs {
    /// Amount invested today
    #[arg(long, allow_hyphen_values = true)]
    pub principal: Decimal,

    /// Annual interest rate as a percentage
    #[arg(long, allow_hyphen_values = true)]
    pub rate: Decimal,

    /// Investment horizon in years (fractions allowed)
    #[arg(long, allow_hyphen_values = true)]
    pub years: Decimal,

    /// Compounding frequency: annual, semiannual, quarterly, monthly, daily
    #[arg(long, default_value = "annual")]
    pub frequency: String,

    /// Fixed contribution added at the end of every year (annual compounding only)
    #[arg(long)]
    pub contribution: Option<Decimal>,
}

/// Arguments for inflation adjustment
#[derive(Args)]
pub struct InflationArgs {
    /// Nominal amount
    #[arg(long, allow_hyphen_values = true)]
    pub value: Decimal,

    /// Annual inflation rate as a percentage
    #[arg(long, allow_hyphen_values = true)]
    pub rate: Decimal,

    /// Number of years
    #[arg(long, allow_hyphen_values = true)]
    pub years: Decimal,
}

/// Arguments for discounting a future amount
#[derive(Args)]
pub struct PresentValueArgs {
    /// Amount received in the future
    #[arg(long, allow_hyphen_values = true)]
    pub future_value: Decimal,

    /// Annual discount rate as a percentage
    #[arg(long, allow_hyphen_values = true)]
    pub rate: Decimal,

    /// Number of years
    #[arg(long, allow_hyphen_values = true)]
    pub years: Decimal,
}

pub fn run_future_value(args: FutureValueArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let frequency: CompoundingFrequency = args.frequency.parse()?;

    let future_value = match args.contribution {
        Some(contribution) => {
            if frequency != CompoundingFrequency::Annual {
                return Err("--contribution is only supported with annual compounding".into());
            }
            time_value::future_value_with_contributions(
                args.principal,
                args.rate,
                args.years,
                contribution,
            )?
        }
        None => time_value::future_value(args.principal, args.rate, args.years, frequency)?,
    };

    Ok(json!({
        "future_value": future_value.round_dp(2),
        "frequency": frequency,
        "periods_per_year": frequency.periods_per_year(),
    }))
}

pub fn run_inflation_adjust(args: InflationArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let adjusted = time_value::inflation_adjusted_value(args.value, args.rate, args.years)?;
    Ok(json!({
        "adjusted_value": adjusted.round_dp(2),
        "purchasing_power_lost": (args.value - adjusted).round_dp(2),
    }))
}

pub fn run_present_value(args: PresentValueArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let pv = time_value::present_value(args.future_value, args.rate, args.years)?;
    Ok(json!({ "present_value": pv }))
}
