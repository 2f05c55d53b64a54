//! Closed-form payment solving: level payments for a term, and the interest-only floor a
//! payment has to clear for the loan to amortize at all.

use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;

use crate::types::{validate_principal, validate_rate, Money, Rate};
use crate::{LoanError, LoanResult};

/// Minimum payment reported for interest-free loans, where any positive payment amortizes.
pub const ZERO_RATE_MINIMUM_PAYMENT: Money = dec!(1);

/// Term, in months, used by `suggested_payment` as the slowest reasonable payoff.
const SUGGESTED_PAYOFF_MONTHS: Decimal = dec!(360);

/// Converts an annual percentage rate into the simple monthly rate used for every period.
///
/// `5.5` (percent per year) becomes `0.055 / 12`.
pub fn monthly_rate(annual_rate_percent: Rate) -> Rate {
    annual_rate_percent / dec!(100) / dec!(12)
}

/// Calculates the level monthly payment that pays off `principal` in exactly `term_months`.
///
/// With a monthly rate `r` the payment is `P * r / (1 - (1 + r)^-n)`. An interest-free loan is
/// amortized straight-line: `P / n`.
///
/// The result is unrounded so that feeding it back into the amortization engine pays the loan
/// off in `term_months` periods.
///
/// # Arguments
///
/// * `principal` - The amount borrowed.
/// * `annual_rate_percent` - The annual interest rate as a percentage (e.g., 5.5 for 5.5%).
/// * `term_months` - The number of monthly payments.
///
/// # Errors
///
/// Returns `InvalidInput` if the principal is not positive, the rate is negative, the term is
/// zero, or compounding over the term or the payment itself leaves the decimal range.
pub fn level_payment(
    principal: Money,
    annual_rate_percent: Rate,
    term_months: u32,
) -> LoanResult<Money> {
    validate_principal(principal)?;
    validate_rate(annual_rate_percent)?;
    if term_months == 0 {
        return Err(LoanError::invalid(
            "term_months",
            "Loan term must be at least one month",
        ));
    }

    let rate = monthly_rate(annual_rate_percent);
    let term = Decimal::from(term_months);
    if rate.is_zero() {
        return Ok(principal / term);
    }

    let growth = (Decimal::ONE + rate)
        .checked_powu(u64::from(term_months))
        .ok_or_else(|| {
            LoanError::invalid(
                "term_months",
                format!("Compounding {annual_rate_percent}% over {term_months} months overflows"),
            )
        })?;
    let discount = Decimal::ONE / growth;

    // Rates below decimal precision leave the growth factor at exactly one.
    if discount == Decimal::ONE {
        return Ok(principal / term);
    }

    principal
        .checked_mul(rate)
        .and_then(|interest| interest.checked_div(Decimal::ONE - discount))
        .ok_or_else(|| LoanError::overflow("principal"))
}

/// The interest accrued on `principal` in the first period: the payment a borrower must
/// exceed for the balance to go down.
///
/// An interest-free loan reports `ZERO_RATE_MINIMUM_PAYMENT`, a nominal floor; in that case
/// any positive payment amortizes and `validate_payment` only asks for a positive amount.
///
/// # Errors
///
/// Returns `InvalidInput` for a non-positive principal, a negative rate, or an interest
/// amount outside the decimal range.
pub fn minimum_payment(principal: Money, annual_rate_percent: Rate) -> LoanResult<Money> {
    validate_principal(principal)?;
    validate_rate(annual_rate_percent)?;

    let rate = monthly_rate(annual_rate_percent);
    if rate.is_zero() {
        return Ok(ZERO_RATE_MINIMUM_PAYMENT);
    }
    principal
        .checked_mul(rate)
        .ok_or_else(|| LoanError::overflow("principal"))
}

/// Rejects a proposed monthly payment that would never pay the loan off.
///
/// # Errors
///
/// Returns `InsufficientPayment` when `payment` does not exceed `minimum_payment` (or is not
/// positive for an interest-free loan), and `InvalidInput` for invalid loan terms.
pub fn validate_payment(
    principal: Money,
    annual_rate_percent: Rate,
    payment: Money,
) -> LoanResult<()> {
    let minimum = minimum_payment(principal, annual_rate_percent)?;
    let floor = if monthly_rate(annual_rate_percent).is_zero() {
        Decimal::ZERO
    } else {
        minimum
    };

    if payment <= floor {
        log::warn!("rejecting monthly payment {payment}: interest-only floor is {floor}");
        return Err(LoanError::InsufficientPayment {
            period: 1,
            payment,
            interest: floor,
        });
    }
    Ok(())
}

/// A comfortable starting point for a borrower choosing their own payment: half again the
/// interest-only payment, but never slower than a 30-year straight-line payoff.
///
/// # Errors
///
/// Returns `InvalidInput` for a non-positive principal or a negative rate.
pub fn suggested_payment(principal: Money, annual_rate_percent: Rate) -> LoanResult<Money> {
    let minimum = minimum_payment(principal, annual_rate_percent)?;
    let padded = minimum
        .checked_mul(dec!(1.5))
        .ok_or_else(|| LoanError::overflow("principal"))?;
    Ok(padded.max(principal / SUGGESTED_PAYOFF_MONTHS))
}
