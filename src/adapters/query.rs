//! Pre-validation of raw query values before a [`CardValidationRequest`] exists.

use crate::domain::model::{CardNumber, CardValidationRequest};
use crate::utils::error::{ErrorKind, Violation};
use serde::Deserialize;
use std::fmt::Display;
use std::str::FromStr;

pub const CARD_NUMBER_MAX_LENGTH: usize = 16;
pub const MIN_EXPIRY_YEAR: i32 = 1900;

/// Query string exactly as received. Every field is optional text so that
/// shape errors are reported by [`pre_validate`] instead of the extractor.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCardQuery {
    #[serde(rename = "cardNumber")]
    pub card_number: Option<String>,
    #[serde(rename = "expiryYear")]
    pub expiry_year: Option<String>,
    #[serde(rename = "expiryMonth")]
    pub expiry_month: Option<String>,
}

/// Blank input counts as missing. The value is returned untrimmed, so padding
/// fails the numeric checks instead of slipping past the length limit.
fn required<'a>(field: &'static str, value: &'a Option<String>) -> Result<&'a str, Violation> {
    match value.as_deref() {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(Violation::malformed(field, format!("{} should not be empty", field))),
    }
}

fn integer<T: FromStr>(field: &'static str, value: &str) -> Result<T, Violation> {
    value
        .parse()
        .map_err(|_| Violation::malformed(field, format!("{} must be an integer number", field)))
}

fn at_least<T: PartialOrd + Display>(field: &'static str, value: T, min: T) -> Result<T, Violation> {
    if value < min {
        return Err(Violation::malformed(
            field,
            format!("{} must not be less than {}", field, min),
        ));
    }
    Ok(value)
}

fn at_most<T: PartialOrd + Display>(field: &'static str, value: T, max: T) -> Result<T, Violation> {
    if value > max {
        return Err(Violation::malformed(
            field,
            format!("{} must not be greater than {}", field, max),
        ));
    }
    Ok(value)
}

fn card_number(raw: &RawCardQuery) -> Result<CardNumber, Violation> {
    let value = required("cardNumber", &raw.card_number)?;
    if !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Violation::malformed("cardNumber", "cardNumber must be a number string"));
    }
    if value.len() > CARD_NUMBER_MAX_LENGTH {
        return Err(Violation {
            field: "cardNumber",
            kind: ErrorKind::WrongLength,
            message: format!(
                "cardNumber must be shorter than or equal to {} characters",
                CARD_NUMBER_MAX_LENGTH
            ),
        });
    }
    CardNumber::parse(value)
        .map_err(|_| Violation::malformed("cardNumber", "cardNumber must be a number string"))
}

fn expiry_year(raw: &RawCardQuery) -> Result<i32, Violation> {
    let value = required("expiryYear", &raw.expiry_year)?;
    at_least("expiryYear", integer("expiryYear", value)?, MIN_EXPIRY_YEAR)
}

fn expiry_month(raw: &RawCardQuery) -> Result<u32, Violation> {
    let value = required("expiryMonth", &raw.expiry_month)?;
    let month: i64 = integer("expiryMonth", value)?;
    let month = at_most("expiryMonth", at_least("expiryMonth", month, 1)?, 12)?;
    Ok(month as u32)
}

/// Checks shape, type and range of every field. On failure all violations
/// are returned in field order (cardNumber, expiryYear, expiryMonth).
pub fn pre_validate(raw: &RawCardQuery) -> Result<CardValidationRequest, Vec<Violation>> {
    let number = card_number(raw);
    let year = expiry_year(raw);
    let month = expiry_month(raw);

    match (number, year, month) {
        (Ok(number), Ok(year), Ok(month)) => {
            CardValidationRequest::new(number, year, month).map_err(|e| {
                vec![Violation::malformed("expiryMonth", e.to_string())]
            })
        }
        (number, year, month) => Err([number.err(), year.err(), month.err()]
            .into_iter()
            .flatten()
            .collect()),
    }
}
