//! Request validation.
//!
//! Turns the raw JSON object of a request into a typed [`TaxInput`] or
//! [`AdvisoryInput`]. Optional amounts default to zero, `dependents` to 0
//! and `userComments` to the empty string; `filingStatus` is required.
//! Numbers may arrive as JSON numbers or numeric strings. Keys that are not
//! part of the schema are ignored.

use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::{AdvisoryInput, FilingStatus, TaxInput};

/// Wire names of the request fields.
pub mod fields {
    pub const FILING_STATUS: &str = "filingStatus";
    pub const EMPLOYMENT_INCOME: &str = "employmentIncome";
    pub const PENSION_INCOME: &str = "pensionIncome";
    pub const BUSINESS_PROFITS: &str = "businessProfits";
    pub const RENTAL_INCOME: &str = "rentalIncome";
    pub const EDUCATION_EXPENSES: &str = "educationExpenses";
    pub const BUSINESS_EXPENSES: &str = "businessExpenses";
    pub const TAX_WITHHELD: &str = "taxWithheld";
    pub const DEPENDENTS: &str = "dependents";
    pub const USER_COMMENTS: &str = "userComments";
}

/// Largest accepted monetary amount per field.
pub const MAX_AMOUNT: Decimal = dec!(1_000_000_000_000);

/// Why a request was rejected before any calculation ran.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("malformed request body: {0}")]
    MalformedBody(String),

    #[error("request body must be a JSON object")]
    NotAnObject,

    #[error("{field} is required")]
    MissingField { field: &'static str },

    #[error("{field} must be one of {allowed}, got {value}")]
    InvalidChoice {
        field: &'static str,
        value: String,
        allowed: String,
    },

    #[error("{field} must be a number, got {value}")]
    InvalidNumber { field: &'static str, value: String },

    #[error("{field} must be a whole number, got {value}")]
    InvalidInteger { field: &'static str, value: String },

    #[error("{field} must not be negative, got {value}")]
    NegativeAmount { field: &'static str, value: String },

    #[error("{field} must not exceed {limit}, got {value}")]
    AmountTooLarge {
        field: &'static str,
        value: String,
        limit: Decimal,
    },

    #[error("{field} must be a string")]
    InvalidText { field: &'static str },
}

/// Parses a request body into its JSON object. An empty body counts as an
/// empty object, so the missing required field is what gets reported.
pub fn parse_body(body: &[u8]) -> Result<Map<String, Value>, ValidationError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Map::new());
    }

    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(ValidationError::NotAnObject),
        Err(e) => Err(ValidationError::MalformedBody(e.to_string())),
    }
}

/// Validates the calculator schema.
pub fn parse_tax_input(request: &Map<String, Value>) -> Result<TaxInput, ValidationError> {
    Ok(TaxInput {
        filing_status: filing_status(request)?,
        employment_income: amount(request, fields::EMPLOYMENT_INCOME)?,
        pension_income: amount(request, fields::PENSION_INCOME)?,
        business_profits: amount(request, fields::BUSINESS_PROFITS)?,
        rental_income: amount(request, fields::RENTAL_INCOME)?,
        education_expenses: amount(request, fields::EDUCATION_EXPENSES)?,
        business_expenses: amount(request, fields::BUSINESS_EXPENSES)?,
        tax_withheld: amount(request, fields::TAX_WITHHELD)?,
        dependents: count(request, fields::DEPENDENTS)?,
    })
}

/// Validates the advisory schema: the calculator fields plus `userComments`.
pub fn parse_advisory_input(
    request: &Map<String, Value>,
) -> Result<AdvisoryInput, ValidationError> {
    Ok(AdvisoryInput {
        tax: parse_tax_input(request)?,
        user_comments: text(request, fields::USER_COMMENTS)?,
    })
}

fn present<'a>(
    request: &'a Map<String, Value>,
    field: &str,
) -> Option<&'a Value> {
    request.get(field).filter(|v| !v.is_null())
}

fn describe(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn filing_status(request: &Map<String, Value>) -> Result<FilingStatus, ValidationError> {
    let field = fields::FILING_STATUS;
    let value = present(request, field).ok_or(ValidationError::MissingField { field })?;

    value
        .as_str()
        .and_then(FilingStatus::parse)
        .ok_or_else(|| ValidationError::InvalidChoice {
            field,
            value: describe(value),
            allowed: FilingStatus::ALL
                .iter()
                .map(FilingStatus::as_str)
                .collect::<Vec<_>>()
                .join(", "),
        })
}

fn amount(
    request: &Map<String, Value>,
    field: &'static str,
) -> Result<Decimal, ValidationError> {
    let Some(value) = present(request, field) else {
        return Ok(Decimal::ZERO);
    };

    let invalid = || ValidationError::InvalidNumber {
        field,
        value: describe(value),
    };
    let text = match value {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().to_string(),
        _ => return Err(invalid()),
    };
    let parsed = match Decimal::from_str(&text).or_else(|_| Decimal::from_scientific_lossy(&text)) {
        Ok(parsed) => parsed,
        Err(_) => outside_decimal_range(&text).ok_or_else(invalid)?,
    };

    if parsed < Decimal::ZERO {
        return Err(ValidationError::NegativeAmount {
            field,
            value: describe(value),
        });
    }
    if parsed > MAX_AMOUNT {
        return Err(ValidationError::AmountTooLarge {
            field,
            value: describe(value),
            limit: MAX_AMOUNT,
        });
    }
    Ok(parsed)
}

/// Finite numbers `Decimal` cannot parse: magnitudes below its smallest
/// step (1e-28) read as zero, magnitudes past [`MAX_AMOUNT`] saturate with
/// their sign so the range checks report them.
fn outside_decimal_range(text: &str) -> Option<Decimal> {
    let float = text.parse::<f64>().ok().filter(|f| f.is_finite())?;

    if float.abs() < 1e-28 {
        Some(Decimal::ZERO)
    } else if float > 1e12 {
        Some(Decimal::MAX)
    } else if float < -1e12 {
        Some(Decimal::MIN)
    } else {
        None
    }
}

fn count(
    request: &Map<String, Value>,
    field: &'static str,
) -> Result<u32, ValidationError> {
    let Some(value) = present(request, field) else {
        return Ok(0);
    };

    let invalid = || ValidationError::InvalidInteger {
        field,
        value: describe(value),
    };
    let negative = || ValidationError::NegativeAmount {
        field,
        value: describe(value),
    };

    let whole: i128 = match value {
        Value::Number(n) => {
            if let Some(u) = n.as_u64() {
                i128::from(u)
            } else if let Some(i) = n.as_i64() {
                i128::from(i)
            } else {
                let f = n.as_f64().ok_or_else(invalid)?;
                if f < 0.0 {
                    return Err(negative());
                }
                if f.fract() != 0.0 || f > f64::from(u32::MAX) {
                    return Err(invalid());
                }
                f as i128
            }
        }
        Value::String(s) => s.trim().parse::<i128>().map_err(|_| invalid())?,
        _ => return Err(invalid()),
    };

    if whole < 0 {
        return Err(negative());
    }
    u32::try_from(whole).map_err(|_| invalid())
}

fn text(
    request: &Map<String, Value>,
    field: &'static str,
) -> Result<String, ValidationError> {
    match present(request, field) {
        None => Ok(String::new()),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(ValidationError::InvalidText { field }),
    }
}
