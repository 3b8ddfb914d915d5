use std::sync::Arc;

use tax_advisor::TaxAdvisor;
use tax_core::IncomeTaxCalculator;

/// Shared, read-only handles cloned into every request.
#[derive(Clone)]
pub struct AppState {
    pub calculator: Arc<IncomeTaxCalculator>,
    pub advisor: Arc<TaxAdvisor>,
}

impl AppState {
    pub fn new(
        calculator: IncomeTaxCalculator,
        advisor: TaxAdvisor,
    ) -> Self {
        Self {
            calculator: Arc::new(calculator),
            advisor: Arc::new(advisor),
        }
    }
}
