//! The three calculation modes, each a composition of the payment solver, the amortization
//! engine and the metrics.

use serde::{Deserialize, Serialize};

use crate::metrics::{compare, summarize, Metrics};
use crate::payment::{level_payment, validate_payment};
use crate::schedule::AmortizationEngine;
use crate::types::{validate_extra_payment, LoanParameters, Money, PaymentPlan, Schedule};
use crate::{LoanError, LoanResult};

/// What the caller wants calculated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum CalculationMode {
    /// Derive the level payment from the loan term, then pay `extra_payment` on top of it.
    PaymentFromTerm { extra_payment: Money },
    /// The borrower chooses the payment; find out how long payoff takes.
    TermFromPayment { plan: PaymentPlan },
    /// Level payment for the term, with and without `extra_payment`, reported as savings.
    SavingsComparison { extra_payment: Money },
}

/// Result of one calculation mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioOutcome {
    pub mode: CalculationMode,
    /// Contractual monthly payment, either derived from the term or given by the caller.
    pub base_payment: Money,
    /// Schedule without extra payments. Absent for `TermFromPayment`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub baseline: Option<Schedule>,
    pub actual: Schedule,
    pub metrics: Metrics,
}

/// Runs calculation modes on top of an `AmortizationEngine`.
#[derive(Debug, Clone, Default)]
pub struct ScenarioComparator {
    engine: AmortizationEngine,
}

impl ScenarioComparator {
    pub fn new(engine: AmortizationEngine) -> Self {
        ScenarioComparator { engine }
    }

    pub fn engine(&self) -> &AmortizationEngine {
        &self.engine
    }

    /// Runs `mode` for the loan described by `params`.
    ///
    /// Same inputs always give the same outcome; nothing is shared between calls.
    ///
    /// # Errors
    ///
    /// Propagates `InvalidInput`, `InsufficientPayment` and `TermExceeded` from the payment
    /// solver and the engine. No partial outcome is returned.
    pub fn run(&self, params: &LoanParameters, mode: &CalculationMode) -> LoanResult<ScenarioOutcome> {
        log::debug!("running {mode:?} for principal {}", params.principal);

        match mode {
            CalculationMode::PaymentFromTerm { extra_payment }
            | CalculationMode::SavingsComparison { extra_payment } => {
                self.against_level_payment(params, mode, *extra_payment)
            }
            CalculationMode::TermFromPayment { plan } => {
                plan.validate()?;
                params.validate()?;
                validate_payment(params.principal, params.annual_rate_percent, plan.monthly_total()?)?;

                let actual = self.engine.generate(params, plan)?;
                Ok(ScenarioOutcome {
                    mode: mode.clone(),
                    base_payment: plan.base_payment,
                    baseline: None,
                    metrics: summarize(&actual),
                    actual,
                })
            }
        }
    }

    // Both schedules share the level payment for `params.term_months`; only the extra differs.
    fn against_level_payment(
        &self,
        params: &LoanParameters,
        mode: &CalculationMode,
        extra_payment: Money,
    ) -> LoanResult<ScenarioOutcome> {
        validate_extra_payment(extra_payment)?;
        let max_periods = self.engine.config().max_periods;
        if params.term_months > max_periods {
            return Err(LoanError::invalid(
                "term_months",
                format!(
                    "Loan term of {} months is longer than the {max_periods}-period limit",
                    params.term_months
                ),
            ));
        }
        let base_payment = level_payment(
            params.principal,
            params.annual_rate_percent,
            params.term_months,
        )?;

        let baseline = self
            .engine
            .generate(params, &PaymentPlan::without_extra(base_payment))?;
        let actual = self
            .engine
            .generate(params, &PaymentPlan::new(base_payment, extra_payment))?;

        Ok(ScenarioOutcome {
            mode: mode.clone(),
            base_payment,
            metrics: compare(&baseline, &actual),
            baseline: Some(baseline),
            actual,
        })
    }
}

/// Runs `mode` with the default engine configuration.
///
/// # Errors
///
/// See `ScenarioComparator::run`.
pub fn run_scenario(params: &LoanParameters, mode: &CalculationMode) -> LoanResult<ScenarioOutcome> {
    ScenarioComparator::default().run(params, mode)
}
