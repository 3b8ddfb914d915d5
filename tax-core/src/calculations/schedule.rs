//! Progressive rate schedule.
//!
//! A schedule is an ordered list of [`TaxBracket`]s covering every income
//! from zero upwards. Each tier only taxes the marginal amount above its
//! lower threshold; the tax owed on everything below that threshold is
//! carried in `base_tax`, so computing the tax is a single lookup.
//!
//! # Standard schedule
//!
//! | Taxable income      | Tax                                  |
//! |---------------------|--------------------------------------|
//! | up to 10,000        | 9% of the amount                     |
//! | 10,000 – 20,000     | 900 + 22% of the excess over 10,000  |
//! | 20,000 – 30,000     | 3,100 + 28% of the excess over 20,000|
//! | over 30,000         | 5,900 + 36% of the excess over 30,000|
//!
//! Thresholds belong to the lower tier.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use tax_core::calculations::TaxSchedule;
//!
//! let schedule = TaxSchedule::standard();
//!
//! assert_eq!(schedule.tax_on(dec!(15000)), dec!(2000.00));
//! assert_eq!(schedule.tax_on(dec!(40000)), dec!(9500.00));
//! ```

use rust_decimal::Decimal;
use thiserror::Error;

use crate::TaxBracket;

/// Reasons a bracket table cannot be used as a schedule.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("schedule has no brackets")]
    Empty,

    #[error("first bracket must start at 0, got {0}")]
    FirstBracketNotAtZero(Decimal),

    #[error("bracket {index} has rate {rate}; rates must be between 0 and 1")]
    InvalidRate { index: usize, rate: Decimal },

    #[error("bracket {index} has an empty income range")]
    EmptyRange { index: usize },

    #[error("bracket {index} does not start where the previous bracket ends")]
    Gap { index: usize },

    #[error("bracket {index} is unbounded but is not the last bracket")]
    UnboundedBeforeEnd { index: usize },

    #[error("last bracket must be unbounded")]
    BoundedTopBracket,

    #[error("bracket {index} has base tax {found}, expected {expected}")]
    Discontinuous {
        index: usize,
        expected: Decimal,
        found: Decimal,
    },
}

/// A validated progressive schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxSchedule {
    brackets: Vec<TaxBracket>,
}

impl TaxSchedule {
    /// Builds a schedule from brackets sorted by `min_income`.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError`] unless the brackets start at zero, are
    /// contiguous, end in a single unbounded tier, use rates in `[0, 1]`,
    /// and each `base_tax` equals the tax accumulated by the tiers below.
    pub fn new(brackets: Vec<TaxBracket>) -> Result<Self, ScheduleError> {
        let first = brackets.first().ok_or(ScheduleError::Empty)?;
        if first.min_income != Decimal::ZERO {
            return Err(ScheduleError::FirstBracketNotAtZero(first.min_income));
        }

        let last_index = brackets.len() - 1;
        let mut expected_base = Decimal::ZERO;
        let mut previous_max = Some(Decimal::ZERO);

        for (index, bracket) in brackets.iter().enumerate() {
            if bracket.tax_rate < Decimal::ZERO || bracket.tax_rate > Decimal::ONE {
                return Err(ScheduleError::InvalidRate {
                    index,
                    rate: bracket.tax_rate,
                });
            }
            if previous_max != Some(bracket.min_income) {
                return Err(ScheduleError::Gap { index });
            }
            match bracket.max_income {
                Some(max) if max <= bracket.min_income => {
                    return Err(ScheduleError::EmptyRange { index });
                }
                Some(_) if index == last_index => return Err(ScheduleError::BoundedTopBracket),
                None if index != last_index => {
                    return Err(ScheduleError::UnboundedBeforeEnd { index });
                }
                _ => {}
            }
            if bracket.base_tax != expected_base {
                return Err(ScheduleError::Discontinuous {
                    index,
                    expected: expected_base,
                    found: bracket.base_tax,
                });
            }

            previous_max = bracket.max_income;
            if let Some(ceiling) = bracket.tax_at_ceiling() {
                expected_base = ceiling;
            }
        }

        Ok(Self { brackets })
    }

    /// The fixed four-tier schedule (9%, 22%, 28%, 36%).
    pub fn standard() -> Self {
        Self {
            brackets: vec![
                bracket(0, Some(10_000), 9, 0),
                bracket(10_000, Some(20_000), 22, 900),
                bracket(20_000, Some(30_000), 28, 3_100),
                bracket(30_000, None, 36, 5_900),
            ],
        }
    }

    pub fn brackets(&self) -> &[TaxBracket] {
        &self.brackets
    }

    /// Tax owed on `taxable_income`: the tier's base tax plus the marginal
    /// income above its threshold at the tier's rate. Not rounded.
    pub fn tax_on(
        &self,
        taxable_income: Decimal,
    ) -> Decimal {
        if taxable_income <= Decimal::ZERO {
            return Decimal::ZERO;
        }

        // A validated schedule always has a matching tier.
        let Some(bracket) = self
            .brackets
            .iter()
            .find(|b| b.contains(taxable_income))
            .or_else(|| self.brackets.last())
        else {
            return Decimal::ZERO;
        };

        let marginal_income = taxable_income - bracket.min_income;
        bracket.base_tax + marginal_income * bracket.tax_rate
    }
}

impl Default for TaxSchedule {
    fn default() -> Self {
        Self::standard()
    }
}

fn bracket(
    min_income: i64,
    max_income: Option<i64>,
    rate_percent: i64,
    base_tax: i64,
) -> TaxBracket {
    TaxBracket {
        min_income: Decimal::from(min_income),
        max_income: max_income.map(Decimal::from),
        tax_rate: Decimal::new(rate_percent, 2),
        base_tax: Decimal::from(base_tax),
    }
}
