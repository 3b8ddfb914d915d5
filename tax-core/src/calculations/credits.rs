//! Dependent-based tax credit.
//!
//! Anyone not filing as single, and anyone claiming at least one dependent,
//! gets the base credit. Dependents add to it from a scale table; past the
//! end of the table each further dependent adds a flat amount on top of the
//! table's last entry.
//!
//! | Dependents | Standard credit      |
//! |------------|----------------------|
//! | 0          | 777 (0 when single)  |
//! | 1          | 777 + 33             |
//! | 2          | 777 + 123            |
//! | 3          | 777 + 243            |
//! | 4          | 777 + 563            |
//! | n ≥ 5      | 777 + 563 + 220 × (n − 4) |

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::FilingStatus;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditSchedule {
    /// Credit granted to every eligible return.
    pub base_credit: Decimal,

    /// Additional credit for 1, 2, … dependents, indexed by `dependents - 1`.
    pub dependent_scale: Vec<Decimal>,

    /// Added per dependent beyond the end of `dependent_scale`.
    pub extra_per_dependent: Decimal,
}

impl CreditSchedule {
    pub fn standard() -> Self {
        Self {
            base_credit: Decimal::from(777),
            dependent_scale: [33, 123, 243, 563].into_iter().map(Decimal::from).collect(),
            extra_per_dependent: Decimal::from(220),
        }
    }

    /// Credit for a return with the given status and dependents.
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use tax_core::FilingStatus;
    /// use tax_core::calculations::CreditSchedule;
    ///
    /// let credits = CreditSchedule::standard();
    ///
    /// assert_eq!(credits.credit_for(FilingStatus::Single, 0), dec!(0));
    /// assert_eq!(credits.credit_for(FilingStatus::MarriedJoint, 0), dec!(777));
    /// assert_eq!(credits.credit_for(FilingStatus::Single, 6), dec!(1780));
    /// ```
    pub fn credit_for(
        &self,
        filing_status: FilingStatus,
        dependents: u32,
    ) -> Decimal {
        if filing_status.is_single() && dependents == 0 {
            return Decimal::ZERO;
        }

        let mut credit = self.base_credit;
        if dependents == 0 {
            return credit;
        }

        let dependents = dependents as usize;
        let table_len = self.dependent_scale.len();
        if let Some(step) = self.dependent_scale.get(dependents - 1) {
            credit += *step;
        } else {
            let top = self.dependent_scale.last().copied().unwrap_or(Decimal::ZERO);
            credit += top + self.extra_per_dependent * Decimal::from(dependents - table_len);
        }
        credit
    }
}

impl Default for CreditSchedule {
    fn default() -> Self {
        Self::standard()
    }
}
