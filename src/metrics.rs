//! Summary figures derived from one schedule, or from an accelerated schedule measured
//! against its baseline.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::{Money, PaymentPlan, Schedule};

/// A month count split into whole years and leftover months.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayoffDuration {
    pub years: u32,
    pub months: u32,
}

impl PayoffDuration {
    pub fn from_months(total_months: u32) -> Self {
        PayoffDuration {
            years: total_months / 12,
            months: total_months % 12,
        }
    }

    pub fn total_months(&self) -> u32 {
        self.years * 12 + self.months
    }
}

/// Summary of a schedule, optionally relative to a baseline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    /// Number of payments until the balance reached zero.
    pub payoff_months: u32,
    /// Unrounded interest paid over the whole schedule.
    pub total_interest: Money,
    /// Principal plus interest.
    pub total_paid: Money,
    /// Baseline interest minus actual interest. Zero without a baseline.
    pub interest_saved: Money,
    /// Baseline periods minus actual periods. Negative if the actual schedule is slower.
    pub time_saved_months: i64,
    /// Period count of the baseline, when there is one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub baseline_months: Option<u32>,
}

impl Metrics {
    pub fn payoff_duration(&self) -> PayoffDuration {
        PayoffDuration::from_months(self.payoff_months)
    }

    /// Time saved as years and months; zero when the actual schedule is not faster.
    pub fn time_saved(&self) -> PayoffDuration {
        PayoffDuration::from_months(u32::try_from(self.time_saved_months).unwrap_or(0))
    }

    /// Time saved as a percentage of the baseline term, rounded to two places.
    pub fn time_saved_percent(&self) -> Option<Decimal> {
        match self.baseline_months {
            Some(baseline) if baseline > 0 => Some(
                (Decimal::from(self.time_saved_months) * dec!(100) / Decimal::from(baseline))
                    .round_dp(2),
            ),
            _ => None,
        }
    }
}

/// Metrics of a single schedule; the savings fields are zero.
pub fn summarize(schedule: &Schedule) -> Metrics {
    Metrics {
        payoff_months: schedule.period_count(),
        total_interest: schedule.total_interest,
        total_paid: schedule.total_paid(),
        interest_saved: Decimal::ZERO,
        time_saved_months: 0,
        baseline_months: None,
    }
}

/// Metrics of `actual` with the interest and time it saves over `baseline`.
///
/// For the same loan, a schedule with a larger extra payment never costs more interest and
/// never takes longer, so both savings are non-negative in that setting.
pub fn compare(baseline: &Schedule, actual: &Schedule) -> Metrics {
    Metrics {
        interest_saved: baseline.total_interest - actual.total_interest,
        time_saved_months: i64::from(baseline.period_count()) - i64::from(actual.period_count()),
        baseline_months: Some(baseline.period_count()),
        ..summarize(actual)
    }
}

/// How the cost of a loan and its monthly outlay split up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentBreakdown {
    pub principal: Money,
    pub total_interest: Money,
    /// Share of everything paid that went to principal, in percent.
    pub principal_share_percent: Decimal,
    /// Share of everything paid that went to interest, in percent.
    pub interest_share_percent: Decimal,
    pub base_payment: Money,
    pub extra_payment: Money,
}

pub fn payment_breakdown(schedule: &Schedule, plan: &PaymentPlan) -> PaymentBreakdown {
    let total = schedule.total_paid();
    let (principal_share, interest_share) = if total.is_zero() {
        (Decimal::ZERO, Decimal::ZERO)
    } else {
        let principal_share = (schedule.total_principal / total * dec!(100)).round_dp(2);
        (principal_share, dec!(100) - principal_share)
    };

    PaymentBreakdown {
        principal: schedule.total_principal,
        total_interest: schedule.total_interest,
        principal_share_percent: principal_share,
        interest_share_percent: interest_share,
        base_payment: plan.base_payment,
        extra_payment: plan.extra_payment,
    }
}
