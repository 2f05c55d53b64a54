use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::{LoanError, LoanResult};

/// Hard ceiling on the number of periods a schedule may contain (100 years of monthly payments).
pub const DEFAULT_MAX_PERIODS: u32 = 1200;

/// Balance below which a loan is considered paid off.
pub const DEFAULT_BALANCE_TOLERANCE: Decimal = dec!(0.000001);

/// Decimal places of the amounts reported on each `PaymentRecord`.
pub const DEFAULT_DISPLAY_DECIMALS: u32 = 2;

/// Tunables of the amortization engine.
///
/// Every field has a default, so a partial JSON document such as `{"max_periods": 600}`
/// deserializes into a complete configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Iteration ceiling. Reaching it without payoff fails with `TermExceeded`.
    pub max_periods: u32,
    /// Residual balance treated as zero when deciding the final period.
    pub balance_tolerance: Decimal,
    /// Rounding applied to the amounts of each produced record.
    pub display_decimals: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            max_periods: DEFAULT_MAX_PERIODS,
            balance_tolerance: DEFAULT_BALANCE_TOLERANCE,
            display_decimals: DEFAULT_DISPLAY_DECIMALS,
        }
    }
}

impl EngineConfig {
    /// Checks that the configuration describes a terminating engine.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a zero ceiling, a negative tolerance or more than ten
    /// display decimals.
    pub fn validate(&self) -> LoanResult<()> {
        if self.max_periods == 0 {
            return Err(LoanError::invalid(
                "max_periods",
                "Iteration ceiling must be at least one period",
            ));
        }
        if self.balance_tolerance < Decimal::ZERO {
            return Err(LoanError::invalid(
                "balance_tolerance",
                "Balance tolerance cannot be negative",
            ));
        }
        if self.display_decimals > 10 {
            return Err(LoanError::invalid(
                "display_decimals",
                "At most 10 decimal places are supported",
            ));
        }
        Ok(())
    }
}
