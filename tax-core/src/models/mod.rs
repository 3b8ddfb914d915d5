mod filing_status;
mod tax_bracket;
mod tax_input;
mod tax_result;

pub use filing_status::FilingStatus;
pub use tax_bracket::TaxBracket;
pub use tax_input::{AdvisoryInput, TaxInput};
pub use tax_result::TaxResult;
