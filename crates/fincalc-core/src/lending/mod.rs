//! Fixed-rate loan analytics: level-payment amortization, total interest
//! and loan-to-value, plus a combined analysis entry point for callers that
//! want everything in one envelope.

pub mod amortization;
pub mod analysis;

pub use amortization::{AmortizationEngine, AmortizationSchedule, LoanTerms, PaymentRecord};
pub use analysis::{analyze_loan, LoanAnalysis, LoanInput};
