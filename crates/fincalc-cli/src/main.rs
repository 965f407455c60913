mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::EnvFilter;

use commands::lending::{AnalyzeArgs, LoanArgs, LtvArgs};
use commands::returns::{IrrArgs, RoiArgs};
use commands::time_value::{FutureValueArgs, InflationArgs, PresentValueArgs};

/// Loan amortization and time-value calculations
#[derive(Parser)]
#[command(
    name = "fincalc",
    version,
    about = "Loan amortization and time-value calculations",
    long_about = "A CLI for fixed-rate loan amortization, compound growth and \
                  inflation adjustment with decimal precision. Amounts are \
                  rounded to cents with banker's rounding."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Log calculation steps to stderr (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Level monthly payment for a fixed-rate loan
    Payment(LoanArgs),
    /// Month-by-month amortization schedule
    Schedule(LoanArgs),
    /// Total interest over the life of the loan
    TotalInterest(LoanArgs),
    /// Loan-to-value ratio as a percentage
    Ltv(LtvArgs),
    /// Full loan analysis from a JSON request
    Loan(AnalyzeArgs),
    /// Future value of a lump sum with compound interest
    FutureValue(FutureValueArgs),
    /// Deflate a nominal amount to today's purchasing power
    InflationAdjust(InflationArgs),
    /// Present value of a future amount
    PresentValue(PresentValueArgs),
    /// Return on investment
    Roi(RoiArgs),
    /// Average-return approximation of IRR
    Irr(IrrArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Payment(args) => commands::lending::run_payment(args),
        Commands::Schedule(args) => commands::lending::run_schedule(args),
        Commands::TotalInterest(args) => commands::lending::run_total_interest(args),
        Commands::Ltv(args) => commands::lending::run_ltv(args),
        Commands::Loan(args) => commands::lending::run_analyze(args),
        Commands::FutureValue(args) => commands::time_value::run_future_value(args),
        Commands::InflationAdjust(args) => commands::time_value::run_inflation_adjust(args),
        Commands::PresentValue(args) => commands::time_value::run_present_value(args),
        Commands::Roi(args) => commands::returns::run_roi(args),
        Commands::Irr(args) => commands::returns::run_irr(args),
        Commands::Version => {
            println!("fincalc {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            tracing::debug!(error = %e, "command failed");
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
