use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Outcome of a calculation, one field per computed line.
///
/// Amounts are serialized as JSON numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxResult {
    #[serde(with = "rust_decimal::serde::float")]
    pub total_income: Decimal,

    #[serde(with = "rust_decimal::serde::float")]
    pub deductions: Decimal,

    /// Never negative.
    #[serde(with = "rust_decimal::serde::float")]
    pub taxable_income: Decimal,

    #[serde(with = "rust_decimal::serde::float")]
    pub gross_tax: Decimal,

    #[serde(with = "rust_decimal::serde::float")]
    pub tax_withheld: Decimal,

    #[serde(with = "rust_decimal::serde::float")]
    pub tax_credit: Decimal,

    /// Never negative; overpayment is not refunded.
    #[serde(with = "rust_decimal::serde::float")]
    pub net_tax_due: Decimal,
}
