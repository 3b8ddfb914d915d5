use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One tier of a progressive rate schedule.
///
/// Income above `min_income` and up to `max_income` (inclusive) is taxed at
/// `tax_rate`; `base_tax` is the tax already owed on everything below
/// `min_income`. A `max_income` of `None` marks the open-ended top tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub min_income: Decimal,
    pub max_income: Option<Decimal>,
    pub tax_rate: Decimal,
    pub base_tax: Decimal,
}

impl TaxBracket {
    /// Whether `income` falls in this tier. The lower bound is exclusive and
    /// the upper bound inclusive, so a threshold belongs to the lower tier.
    pub fn contains(
        &self,
        income: Decimal,
    ) -> bool {
        income > self.min_income && self.max_income.is_none_or(|max| income <= max)
    }

    /// Tax accumulated once income reaches the top of this tier.
    /// `None` for the open-ended tier.
    pub fn tax_at_ceiling(&self) -> Option<Decimal> {
        self.max_income
            .map(|max| self.base_tax + (max - self.min_income) * self.tax_rate)
    }
}
