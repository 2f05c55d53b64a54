//! The month-by-month amortization loop.

use rust_decimal::Decimal;

use crate::config::EngineConfig;
use crate::payment::monthly_rate;
use crate::types::{LoanParameters, PaymentPlan, PaymentRecord, Schedule};
use crate::{LoanError, LoanResult};

/// Generates amortization schedules under a fixed `EngineConfig`.
///
/// The engine holds no state between calls, so one instance can serve any number of
/// concurrent calculations.
#[derive(Debug, Clone, Default)]
pub struct AmortizationEngine {
    config: EngineConfig,
}

impl AmortizationEngine {
    pub fn new() -> Self {
        AmortizationEngine::default()
    }

    /// # Errors
    ///
    /// Returns `InvalidInput` if the configuration fails `EngineConfig::validate`.
    pub fn with_config(config: EngineConfig) -> LoanResult<Self> {
        config.validate()?;
        Ok(AmortizationEngine { config })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Amortizes `params.principal` with `plan` until the balance reaches zero.
    ///
    /// Each period accrues `balance * r` of interest and applies the rest of
    /// `base_payment + extra_payment` to principal. The final period is clamped to the
    /// remaining balance, so its `total_paid` is interest plus whatever was left and is usually
    /// smaller than the regular payment. Running totals are kept unrounded; only the
    /// reported record amounts are rounded to `display_decimals`.
    ///
    /// # Arguments
    ///
    /// * `params` - The loan. `term_months` is ignored; the plan drives the payoff.
    /// * `plan` - The monthly payment and the extra principal contribution.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for invalid parameters or plan, `InsufficientPayment` when the
    /// payment does not exceed the interest accruing on the balance, and `TermExceeded` when
    /// the loan is still open after `max_periods` periods.
    pub fn generate(&self, params: &LoanParameters, plan: &PaymentPlan) -> LoanResult<Schedule> {
        params.validate()?;
        plan.validate()?;

        let rate = monthly_rate(params.annual_rate_percent);
        let payment = plan.monthly_total()?;
        let decimals = self.config.display_decimals;
        let tolerance = self.config.balance_tolerance;

        let mut balance = params.principal;
        let mut total_interest = Decimal::ZERO;
        let mut total_principal = Decimal::ZERO;
        let mut records = Vec::new();
        let mut period: u32 = 0;

        while balance > Decimal::ZERO {
            if period >= self.config.max_periods {
                log::warn!(
                    "loan of {} still owes {} after {} periods",
                    params.principal,
                    balance.round_dp(decimals),
                    period
                );
                return Err(LoanError::TermExceeded {
                    max_periods: self.config.max_periods,
                    remaining_balance: balance.round_dp(decimals),
                });
            }

            let interest = balance
                .checked_mul(rate)
                .ok_or_else(|| LoanError::overflow("principal"))?;
            // On the first period this is the interest-only check on the initial balance.
            if payment <= interest {
                log::warn!(
                    "payment {payment} does not cover interest {} in period {}",
                    interest.round_dp(decimals),
                    period + 1
                );
                return Err(LoanError::InsufficientPayment {
                    period: period + 1,
                    payment,
                    interest: interest.round_dp(decimals),
                });
            }

            let mut principal_portion = payment - interest;
            let mut paid = payment;
            if principal_portion >= balance - tolerance {
                principal_portion = balance;
                paid = interest
                    .checked_add(principal_portion)
                    .ok_or_else(|| LoanError::overflow("principal"))?;
            }

            let opening = balance.round_dp(decimals);
            balance -= principal_portion;
            period += 1;
            total_interest = total_interest
                .checked_add(interest)
                .ok_or_else(|| LoanError::overflow("total_interest"))?;
            total_principal += principal_portion;
            let closing = balance.round_dp(decimals);

            records.push(PaymentRecord {
                period_index: period,
                period_date: params.start.plus_months(period),
                total_paid: paid.round_dp(decimals),
                interest_portion: interest.round_dp(decimals),
                // Difference of rounded balances, so the column sums back to the principal.
                principal_portion: opening - closing,
                remaining_balance: closing,
            });
        }

        if total_principal.checked_add(total_interest).is_none() {
            return Err(LoanError::overflow("total_interest"));
        }

        log::debug!(
            "amortized {} at {}% over {} periods, total interest {}",
            params.principal,
            params.annual_rate_percent,
            period,
            total_interest.round_dp(decimals)
        );

        Ok(Schedule {
            records,
            total_interest,
            total_principal,
        })
    }
}

/// Generates a schedule with the default engine configuration.
///
/// # Errors
///
/// See `AmortizationEngine::generate`.
pub fn amortization_schedule(params: &LoanParameters, plan: &PaymentPlan) -> LoanResult<Schedule> {
    AmortizationEngine::default().generate(params, plan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::YearMonth;
    use rust_decimal_macros::dec;

    fn loan(principal: Decimal, rate: Decimal) -> LoanParameters {
        LoanParameters::new(principal, rate, 360, YearMonth { year: 2024, month: 1 })
    }

    #[test]
    fn test_overpayment_pays_off_in_one_period() {
        let schedule =
            amortization_schedule(&loan(dec!(1000), dec!(5)), &PaymentPlan::without_extra(dec!(10000)))
                .unwrap();

        assert_eq!(schedule.period_count(), 1);
        let record = &schedule.records[0];
        assert_eq!(record.period_index, 1);
        assert_eq!(record.interest_portion, dec!(4.17));
        assert_eq!(record.principal_portion, dec!(1000.00));
        assert_eq!(record.total_paid, dec!(1004.17));
        assert_eq!(record.remaining_balance, dec!(0));
        assert_eq!(record.period_date, YearMonth { year: 2024, month: 2 });
    }

    #[test]
    fn test_zero_rate_straight_line() {
        let schedule =
            amortization_schedule(&loan(dec!(100000), dec!(0)), &PaymentPlan::without_extra(dec!(1000)))
                .unwrap();

        assert_eq!(schedule.period_count(), 100);
        assert_eq!(schedule.total_interest, dec!(0));
        assert_eq!(schedule.final_balance(), dec!(0));
        assert!(schedule.iter().all(|r| r.interest_portion.is_zero()));
        assert!(schedule.iter().all(|r| r.total_paid == dec!(1000)));
    }

    #[test]
    fn test_final_period_is_clamped() {
        // 1000 at 0% with 300/month: 300, 300, 300, then 100.
        let schedule =
            amortization_schedule(&loan(dec!(1000), dec!(0)), &PaymentPlan::without_extra(dec!(300)))
                .unwrap();

        assert_eq!(schedule.period_count(), 4);
        let last = schedule.last().unwrap();
        assert_eq!(last.total_paid, dec!(100));
        assert_eq!(last.principal_portion, dec!(100));
        assert_eq!(last.remaining_balance, dec!(0));
        assert_eq!(schedule.total_paid(), dec!(1000));
    }

    #[test]
    fn test_repeating_fraction_leaves_no_trailing_record() {
        // 100000 / 3 never divides evenly in decimal.
        let payment = dec!(100000) / dec!(3);
        let schedule =
            amortization_schedule(&loan(dec!(100000), dec!(0)), &PaymentPlan::without_extra(payment))
                .unwrap();

        assert_eq!(schedule.period_count(), 3);
        assert_eq!(schedule.total_principal, dec!(100000));
        assert_eq!(schedule.final_balance(), dec!(0));
    }

    #[test]
    fn test_extra_payment_goes_to_principal() {
        let params = loan(dec!(12000), dec!(12));
        let schedule = amortization_schedule(&params, &PaymentPlan::new(dec!(1000), dec!(500))).unwrap();
        let first = &schedule.records[0];

        // 1% of 12000 = 120 interest, 1380 to principal.
        assert_eq!(first.interest_portion, dec!(120.00));
        assert_eq!(first.principal_portion, dec!(1380.00));
        assert_eq!(first.total_paid, dec!(1500.00));
        assert_eq!(first.remaining_balance, dec!(10620.00));
    }

    #[test]
    fn test_reported_principal_sums_to_loan() {
        let params = loan(dec!(250000), dec!(5.5));
        let payment = crate::payment::level_payment(dec!(250000), dec!(5.5), 360).unwrap();
        let schedule = amortization_schedule(&params, &PaymentPlan::new(payment, dec!(200))).unwrap();

        let reported: Decimal = schedule.iter().map(|r| r.principal_portion).sum();
        assert_eq!(reported, dec!(250000));
        for record in &schedule {
            assert!(record.principal_portion > dec!(0));
        }
    }

    #[test]
    fn test_amounts_outside_decimal_range_are_rejected() {
        let huge = PaymentPlan::new(Decimal::MAX, Decimal::MAX);
        assert!(matches!(
            amortization_schedule(&loan(dec!(1000), dec!(5)), &huge),
            Err(LoanError::InvalidInput { .. })
        ));

        let result = amortization_schedule(
            &loan(Decimal::MAX, dec!(1200000)),
            &PaymentPlan::without_extra(dec!(100)),
        );
        assert!(matches!(
            result,
            Err(LoanError::InvalidInput { field, .. }) if field == "principal"
        ));
    }

    #[test]
    fn test_interest_only_payment_rejected() {
        let result =
            amortization_schedule(&loan(dec!(50000), dec!(6)), &PaymentPlan::without_extra(dec!(250)));

        assert_eq!(
            result,
            Err(LoanError::InsufficientPayment {
                period: 1,
                payment: dec!(250),
                interest: dec!(250.00),
            })
        );
    }

    #[test]
    fn test_extra_payment_rescues_insufficient_base() {
        let result =
            amortization_schedule(&loan(dec!(50000), dec!(6)), &PaymentPlan::new(dec!(250), dec!(50)));
        assert!(result.is_ok());
    }

    #[test]
    fn test_ceiling_reports_term_exceeded() {
        // Barely above interest-only: would take roughly 170 years.
        let result =
            amortization_schedule(&loan(dec!(50000), dec!(6)), &PaymentPlan::without_extra(dec!(250.01)));

        match result {
            Err(LoanError::TermExceeded {
                max_periods,
                remaining_balance,
            }) => {
                assert_eq!(max_periods, 1200);
                assert!(remaining_balance > dec!(0));
            }
            other => panic!("expected TermExceeded, got {other:?}"),
        }
    }

    #[test]
    fn test_configured_ceiling() {
        let engine = AmortizationEngine::with_config(EngineConfig {
            max_periods: 12,
            ..EngineConfig::default()
        })
        .unwrap();
        let params = loan(dec!(12000), dec!(0));

        assert_eq!(
            engine
                .generate(&params, &PaymentPlan::without_extra(dec!(1000)))
                .unwrap()
                .period_count(),
            12
        );
        assert!(matches!(
            engine.generate(&params, &PaymentPlan::without_extra(dec!(999))),
            Err(LoanError::TermExceeded { max_periods: 12, .. })
        ));
    }

    #[test]
    fn test_invalid_inputs_rejected() {
        let plan = PaymentPlan::without_extra(dec!(100));
        assert!(matches!(
            amortization_schedule(&loan(dec!(0), dec!(5)), &plan),
            Err(LoanError::InvalidInput { .. })
        ));
        assert!(matches!(
            amortization_schedule(&loan(dec!(1000), dec!(-2)), &plan),
            Err(LoanError::InvalidInput { .. })
        ));
        assert!(matches!(
            amortization_schedule(&loan(dec!(1000), dec!(5)), &PaymentPlan::new(dec!(100), dec!(-1))),
            Err(LoanError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = EngineConfig {
            display_decimals: 11,
            ..EngineConfig::default()
        };
        assert!(AmortizationEngine::with_config(config).is_err());
    }

    #[test]
    fn test_dates_advance_across_year_end() {
        let params = LoanParameters::new(dec!(3000), dec!(0), 3, YearMonth { year: 2024, month: 11 });
        let schedule = amortization_schedule(&params, &PaymentPlan::without_extra(dec!(1000))).unwrap();
        let dates: Vec<_> = schedule.iter().map(|r| r.period_date.to_string()).collect();

        assert_eq!(dates, vec!["Dec 2024", "Jan 2025", "Feb 2025"]);
    }
}
