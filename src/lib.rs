//! `loan_amortization` is a Rust library for calculating loan amortization schedules.
//!
//! It answers the three questions a borrower usually asks about a fixed-rate loan:
//! - **What is my monthly payment?** The level payment that pays the loan off over a chosen
//!   term, and how much extra monthly payments would save on top of it.
//! - **How long until it is paid off?** The schedule produced by a payment the borrower
//!   chooses, rejected up front if it does not even cover the interest.
//! - **How much do extra payments save?** Interest and time saved compared with paying only
//!   the contractual amount.
//!
//! All amounts are `rust_decimal::Decimal`. Schedules are computed with unrounded running
//! totals; each `PaymentRecord` reports amounts rounded to cents.
//!
//! ## Usage
//!
//! Add `loan_amortization` to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! loan_amortization = "0.1.0"
//! rust_decimal = "1.39.0"
//! rust_decimal_macros = "1.39.0"
//! ```
//!
//! Then, use `run_scenario` to compare the contractual schedule with an accelerated one:
//!
//! ```rust
//! use loan_amortization::{run_scenario, CalculationMode, LoanParameters, YearMonth};
//! use rust_decimal_macros::dec;
//!
//! fn main() {
//!     let params = LoanParameters::new(
//!         dec!(250_000),
//!         dec!(5.5),
//!         360,
//!         YearMonth { year: 2025, month: 1 },
//!     );
//!     let mode = CalculationMode::SavingsComparison { extra_payment: dec!(200) };
//!
//!     match run_scenario(&params, &mode) {
//!         Ok(outcome) => {
//!             println!("Monthly payment: {:.2}", outcome.base_payment);
//!             println!("Paid off after:  {} months", outcome.metrics.payoff_months);
//!             println!("Interest saved:  {:.2}", outcome.metrics.interest_saved);
//!             println!("Months saved:    {}", outcome.metrics.time_saved_months);
//!         }
//!         Err(e) => {
//!             eprintln!("Error calculating loan: {}", e);
//!         }
//!     }
//! }
//! ```

pub mod config;
pub mod error;
pub mod metrics;
pub mod payment;
pub mod presets;
pub mod scenario;
pub mod schedule;
pub mod types;

pub use config::EngineConfig;
pub use error::LoanError;
pub use metrics::{compare, payment_breakdown, summarize, Metrics, PaymentBreakdown, PayoffDuration};
pub use payment::{level_payment, minimum_payment, monthly_rate, suggested_payment, validate_payment};
pub use presets::LoanKind;
pub use scenario::{run_scenario, CalculationMode, ScenarioComparator, ScenarioOutcome};
pub use schedule::{amortization_schedule, AmortizationEngine};
pub use types::*;

/// Result type of every fallible calculation in this crate.
pub type LoanResult<T> = Result<T, LoanError>;
