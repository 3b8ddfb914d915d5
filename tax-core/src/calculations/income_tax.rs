//! Income tax calculation.
//!
//! | Line            | Description |
//! |-----------------|-------------|
//! | total income    | employment + pension + business profits + rental |
//! | deductions      | education expenses + business expenses |
//! | taxable income  | total income − deductions (minimum 0) |
//! | gross tax       | taxable income through the [`TaxSchedule`] |
//! | tax withheld    | carried through from the input |
//! | tax credit      | from the [`CreditSchedule`] |
//! | net tax due     | gross tax − withheld − credit (minimum 0) |
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use tax_core::calculations::IncomeTaxCalculator;
//! use tax_core::{FilingStatus, TaxInput};
//!
//! let mut input = TaxInput::new(FilingStatus::MarriedJoint);
//! input.employment_income = dec!(25000);
//! input.tax_withheld = dec!(500);
//! input.dependents = 2;
//!
//! let result = IncomeTaxCalculator::standard().calculate(&input);
//!
//! assert_eq!(result.gross_tax, dec!(4500.00));
//! assert_eq!(result.tax_credit, dec!(900));
//! assert_eq!(result.net_tax_due, dec!(3100.00));
//! ```

use rust_decimal::Decimal;
use tracing::debug;

use crate::calculations::common::non_negative;
use crate::calculations::{CreditSchedule, TaxSchedule};
use crate::{TaxInput, TaxResult};

/// Runs a [`TaxInput`] through a rate schedule and a credit schedule.
///
/// Stateless once built; one instance can serve any number of requests.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IncomeTaxCalculator {
    schedule: TaxSchedule,
    credits: CreditSchedule,
}

impl IncomeTaxCalculator {
    pub fn new(
        schedule: TaxSchedule,
        credits: CreditSchedule,
    ) -> Self {
        Self { schedule, credits }
    }

    /// Calculator using the fixed standard schedules.
    pub fn standard() -> Self {
        Self::new(TaxSchedule::standard(), CreditSchedule::standard())
    }

    pub fn schedule(&self) -> &TaxSchedule {
        &self.schedule
    }

    pub fn credits(&self) -> &CreditSchedule {
        &self.credits
    }

    /// Computes every line of the result. Total over validated input.
    pub fn calculate(
        &self,
        input: &TaxInput,
    ) -> TaxResult {
        let total_income = self.total_income(input);
        let deductions = self.deductions(input);
        let taxable_income = self.taxable_income(total_income, deductions);
        let gross_tax = self.schedule.tax_on(taxable_income);
        let tax_withheld = input.tax_withheld;
        let tax_credit = self.credits.credit_for(input.filing_status, input.dependents);
        let net_tax_due = self.net_tax_due(gross_tax, tax_withheld, tax_credit);

        debug!(
            filing_status = %input.filing_status,
            dependents = input.dependents,
            %total_income,
            %deductions,
            %taxable_income,
            %gross_tax,
            %tax_credit,
            %net_tax_due,
            "calculated income tax"
        );

        TaxResult {
            total_income,
            deductions,
            taxable_income,
            gross_tax,
            tax_withheld,
            tax_credit,
            net_tax_due,
        }
    }

    fn total_income(
        &self,
        input: &TaxInput,
    ) -> Decimal {
        input.employment_income
            + input.pension_income
            + input.business_profits
            + input.rental_income
    }

    fn deductions(
        &self,
        input: &TaxInput,
    ) -> Decimal {
        input.education_expenses + input.business_expenses
    }

    fn taxable_income(
        &self,
        total_income: Decimal,
        deductions: Decimal,
    ) -> Decimal {
        non_negative(total_income - deductions)
    }

    fn net_tax_due(
        &self,
        gross_tax: Decimal,
        tax_withheld: Decimal,
        tax_credit: Decimal,
    ) -> Decimal {
        non_negative(gross_tax - tax_withheld - tax_credit)
    }
}
