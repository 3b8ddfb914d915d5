use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::FilingStatus;

/// Validated financial inputs for one calculation.
///
/// Built by [`crate::validation::parse_tax_input`]; every amount is
/// non-negative and defaults to zero when the caller omitted it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxInput {
    pub filing_status: FilingStatus,

    // Income
    pub employment_income: Decimal,
    pub pension_income: Decimal,
    pub business_profits: Decimal,
    pub rental_income: Decimal,

    // Deductible expenses
    pub education_expenses: Decimal,
    pub business_expenses: Decimal,

    pub tax_withheld: Decimal,
    pub dependents: u32,
}

impl TaxInput {
    /// A zero-valued input for the given status.
    pub fn new(filing_status: FilingStatus) -> Self {
        Self {
            filing_status,
            employment_income: Decimal::ZERO,
            pension_income: Decimal::ZERO,
            business_profits: Decimal::ZERO,
            rental_income: Decimal::ZERO,
            education_expenses: Decimal::ZERO,
            business_expenses: Decimal::ZERO,
            tax_withheld: Decimal::ZERO,
            dependents: 0,
        }
    }

    /// The fields as `(wire name, rendered value)` pairs, in request order.
    pub fn prompt_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("filingStatus", self.filing_status.to_string()),
            ("employmentIncome", self.employment_income.normalize().to_string()),
            ("pensionIncome", self.pension_income.normalize().to_string()),
            ("businessProfits", self.business_profits.normalize().to_string()),
            ("rentalIncome", self.rental_income.normalize().to_string()),
            ("educationExpenses", self.education_expenses.normalize().to_string()),
            ("businessExpenses", self.business_expenses.normalize().to_string()),
            ("taxWithheld", self.tax_withheld.normalize().to_string()),
            ("dependents", self.dependents.to_string()),
        ]
    }
}

/// Inputs for the advisory endpoint: the tax fields plus free-text comments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvisoryInput {
    #[serde(flatten)]
    pub tax: TaxInput,
    pub user_comments: String,
}
