use rust_decimal::Decimal;
use thiserror::Error;

/// Errors returned by the payment solver, the amortization engine and the scenario runner.
///
/// Calculations are all-or-nothing: when one of these is returned no partial schedule exists.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LoanError {
    #[error("Invalid input: {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error(
        "Insufficient payment: {payment} does not cover the {interest} of interest accrued in period {period}"
    )]
    InsufficientPayment {
        period: u32,
        payment: Decimal,
        interest: Decimal,
    },

    #[error("Term exceeded: loan not paid off after {max_periods} periods (balance left: {remaining_balance})")]
    TermExceeded {
        max_periods: u32,
        remaining_balance: Decimal,
    },
}

impl LoanError {
    pub(crate) fn invalid(field: &str, reason: impl Into<String>) -> Self {
        LoanError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn overflow(field: &str) -> Self {
        LoanError::invalid(field, "Amount exceeds the supported decimal range")
    }
}
