use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::{LoanParameters, Money, Rate, YearMonth};
use crate::{LoanError, LoanResult};

/// Common loan products with typical starting terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoanKind {
    Mortgage,
    Auto,
    Personal,
    Education,
}

impl LoanKind {
    pub const ALL: [LoanKind; 4] = [
        LoanKind::Mortgage,
        LoanKind::Auto,
        LoanKind::Personal,
        LoanKind::Education,
    ];

    pub fn default_principal(self) -> Money {
        match self {
            LoanKind::Mortgage => dec!(250000),
            LoanKind::Auto => dec!(30000),
            LoanKind::Personal => dec!(15000),
            LoanKind::Education => dec!(50000),
        }
    }

    /// Annual rate in percent.
    pub fn default_rate(self) -> Rate {
        match self {
            LoanKind::Mortgage => dec!(5.5),
            LoanKind::Auto => dec!(7.5),
            LoanKind::Personal => dec!(10.5),
            LoanKind::Education => dec!(6.0),
        }
    }

    pub fn default_term_years(self) -> u32 {
        match self {
            LoanKind::Mortgage => 30,
            LoanKind::Auto => 5,
            LoanKind::Personal | LoanKind::Education => 3,
        }
    }

    pub fn max_term_years(self) -> u32 {
        match self {
            LoanKind::Mortgage => 40,
            LoanKind::Auto => 10,
            LoanKind::Personal | LoanKind::Education => 7,
        }
    }

    /// Typical parameters for this kind of loan, first payment one month after `start`.
    pub fn default_parameters(self, start: YearMonth) -> LoanParameters {
        LoanParameters::new(
            self.default_principal(),
            self.default_rate(),
            self.default_term_years() * 12,
            start,
        )
    }

    /// # Errors
    ///
    /// Returns `InvalidInput` if `term_months` is zero or longer than this product allows.
    pub fn validate_term(self, term_months: u32) -> LoanResult<()> {
        let max_months = self.max_term_years() * 12;
        if term_months == 0 || term_months > max_months {
            return Err(LoanError::invalid(
                "term_months",
                format!("{self:?} loans run between 1 and {max_months} months, got {term_months}"),
            ));
        }
        Ok(())
    }
}
