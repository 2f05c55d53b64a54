use std::fmt;

use chrono::{Datelike, Local, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{LoanError, LoanResult};

/// Monetary amounts. Always a `Decimal`, never a float.
pub type Money = Decimal;

/// Interest rates. Annual rates are percentages (5.5 for 5.5%), monthly rates are fractions.
pub type Rate = Decimal;

const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// A calendar month, the granularity of every schedule date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct YearMonth {
    pub year: i32,
    /// 1 = January, 12 = December.
    pub month: u32,
}

impl YearMonth {
    /// # Errors
    ///
    /// Returns `InvalidInput` if `month` is outside `1..=12`.
    pub fn new(year: i32, month: u32) -> LoanResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(LoanError::invalid(
                "month",
                format!("Month must be between 1 and 12, got {month}"),
            ));
        }
        Ok(YearMonth { year, month })
    }

    /// The month containing today's local date.
    pub fn current() -> Self {
        YearMonth::from_date(&Local::now().date_naive())
    }

    pub fn from_date(date: &impl Datelike) -> Self {
        YearMonth {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Advances by `months` whole months, carrying into the year on wrap. The year saturates
    /// at `i32::MAX`.
    pub fn plus_months(self, months: u32) -> Self {
        let zero_based = i64::from(self.month) - 1 + i64::from(months);
        YearMonth {
            year: self.year.saturating_add(zero_based.div_euclid(12) as i32),
            month: zero_based.rem_euclid(12) as u32 + 1,
        }
    }

    /// First day of the month, `None` if the year is outside chrono's range.
    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }
}

impl From<NaiveDate> for YearMonth {
    fn from(date: NaiveDate) -> Self {
        YearMonth::from_date(&date)
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = MONTH_ABBREVIATIONS
            .get(self.month.wrapping_sub(1) as usize)
            .copied()
            .unwrap_or("???");
        write!(f, "{} {}", name, self.year)
    }
}

/// The loan being amortized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanParameters {
    /// Amount borrowed.
    pub principal: Money,
    /// Annual interest rate as a percentage (e.g., 5.5 for 5.5%). Zero means interest-free.
    pub annual_rate_percent: Rate,
    /// Contractual term. Only consulted when a level payment has to be derived.
    pub term_months: u32,
    /// Month anchoring the schedule; the first payment falls one month later.
    pub start: YearMonth,
}

impl LoanParameters {
    pub fn new(
        principal: Money,
        annual_rate_percent: Rate,
        term_months: u32,
        start: YearMonth,
    ) -> Self {
        LoanParameters {
            principal,
            annual_rate_percent,
            term_months,
            start,
        }
    }

    /// Checks principal and rate. The term is checked by the payment solver, which is the
    /// only consumer of it.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a non-positive principal or a negative rate.
    pub fn validate(&self) -> LoanResult<()> {
        validate_principal(self.principal)?;
        validate_rate(self.annual_rate_percent)
    }
}

/// What the borrower pays every month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentPlan {
    /// Contractual monthly payment.
    pub base_payment: Money,
    /// Additional principal-only contribution per month.
    pub extra_payment: Money,
}

impl PaymentPlan {
    pub fn new(base_payment: Money, extra_payment: Money) -> Self {
        PaymentPlan {
            base_payment,
            extra_payment,
        }
    }

    pub fn without_extra(base_payment: Money) -> Self {
        PaymentPlan::new(base_payment, Decimal::ZERO)
    }

    /// Amount leaving the borrower's pocket in a regular (non-final) period.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the sum leaves the decimal range.
    pub fn monthly_total(&self) -> LoanResult<Money> {
        self.base_payment
            .checked_add(self.extra_payment)
            .ok_or_else(|| LoanError::overflow("extra_payment"))
    }

    /// # Errors
    ///
    /// Returns `InvalidInput` for a non-positive base payment or a negative extra payment.
    pub fn validate(&self) -> LoanResult<()> {
        if self.base_payment <= Decimal::ZERO {
            return Err(LoanError::invalid(
                "base_payment",
                "Monthly payment must be positive",
            ));
        }
        validate_extra_payment(self.extra_payment)
    }
}

/// One row of an amortization schedule. Amounts are rounded for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRecord {
    /// 1-based position in the schedule.
    pub period_index: u32,
    pub period_date: YearMonth,
    /// Interest plus principal actually paid this period. Smaller than the plan on the final row.
    pub total_paid: Money,
    pub interest_portion: Money,
    pub principal_portion: Money,
    pub remaining_balance: Money,
}

/// A complete amortization schedule, in chronological order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    pub records: Vec<PaymentRecord>,
    /// Unrounded sum of the interest accrued over the whole schedule.
    pub total_interest: Money,
    /// Unrounded sum of the principal repaid. Equals the loan principal once paid off.
    pub total_principal: Money,
}

impl Schedule {
    pub fn period_count(&self) -> u32 {
        self.records.len() as u32
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PaymentRecord> {
        self.records.iter()
    }

    pub fn last(&self) -> Option<&PaymentRecord> {
        self.records.last()
    }

    pub fn final_balance(&self) -> Money {
        self.last()
            .map(|record| record.remaining_balance)
            .unwrap_or_default()
    }

    /// Everything the borrower paid over the life of the loan, unrounded.
    pub fn total_paid(&self) -> Money {
        self.total_principal + self.total_interest
    }
}

impl<'a> IntoIterator for &'a Schedule {
    type Item = &'a PaymentRecord;
    type IntoIter = std::slice::Iter<'a, PaymentRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

pub(crate) fn validate_principal(principal: Money) -> LoanResult<()> {
    if principal <= Decimal::ZERO {
        return Err(LoanError::invalid(
            "principal",
            "Loan amount must be positive",
        ));
    }
    Ok(())
}

pub(crate) fn validate_rate(annual_rate_percent: Rate) -> LoanResult<()> {
    if annual_rate_percent < Decimal::ZERO {
        return Err(LoanError::invalid(
            "annual_rate_percent",
            "Interest rate cannot be negative",
        ));
    }
    Ok(())
}

pub(crate) fn validate_extra_payment(extra_payment: Money) -> LoanResult<()> {
    if extra_payment < Decimal::ZERO {
        return Err(LoanError::invalid(
            "extra_payment",
            "Extra payment cannot be negative",
        ));
    }
    Ok(())
}
