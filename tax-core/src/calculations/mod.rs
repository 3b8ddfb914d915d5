//! Income tax calculation: the progressive rate schedule, the
//! dependent-based credit schedule, and the calculator combining them.

pub mod common;
pub mod credits;
pub mod income_tax;
pub mod schedule;

pub use credits::CreditSchedule;
pub use income_tax::IncomeTaxCalculator;
pub use schedule::{ScheduleError, TaxSchedule};
