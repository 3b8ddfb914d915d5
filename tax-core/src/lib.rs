pub mod calculations;
pub mod models;
pub mod validation;

pub use calculations::{CreditSchedule, IncomeTaxCalculator, TaxSchedule};
pub use models::*;
pub use validation::{ValidationError, parse_advisory_input, parse_tax_input};
