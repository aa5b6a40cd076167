use crate::utils::error::{CardError, Result, Violation};
use std::fmt;

/// A card number made of ASCII digits only. May be empty; the length rule
/// belongs to the validator, not to construction.
#[derive(Clone, PartialEq, Eq)]
pub struct CardNumber(String);

impl CardNumber {
    pub fn parse(raw: &str) -> Result<Self> {
        if !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(
                Violation::malformed("cardNumber", "cardNumber must contain only digits").into(),
            );
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn digit_count(&self) -> usize {
        self.0.len()
    }

    /// Last four digits, for logging.
    pub fn masked(&self) -> String {
        let tail = &self.0[self.0.len().saturating_sub(4)..];
        format!("****{}", tail)
    }
}

// Keep full card numbers out of `{:?}` output.
impl fmt::Debug for CardNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CardNumber").field(&self.masked()).finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardValidationRequest {
    card_number: CardNumber,
    expiry_year: i32,
    expiry_month: u32,
}

impl CardValidationRequest {
    pub fn new(card_number: CardNumber, expiry_year: i32, expiry_month: u32) -> Result<Self> {
        if !(1..=12).contains(&expiry_month) {
            return Err(CardError::InvalidInput(Violation::malformed(
                "expiryMonth",
                "expiryMonth must be between 1 and 12",
            )));
        }
        Ok(Self {
            card_number,
            expiry_year,
            expiry_month,
        })
    }

    pub fn card_number(&self) -> &CardNumber {
        &self.card_number
    }

    pub fn expiry_year(&self) -> i32 {
        self.expiry_year
    }

    pub fn expiry_month(&self) -> u32 {
        self.expiry_month
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidReason {
    WrongLength,
    Expired,
    LuhnFailed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationOutcome {
    Valid,
    Invalid(InvalidReason),
}

impl ValidationOutcome {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationOutcome::Valid)
    }

    pub fn into_result(self) -> Result<()> {
        match self {
            ValidationOutcome::Valid => Ok(()),
            ValidationOutcome::Invalid(InvalidReason::WrongLength) => Err(CardError::WrongLength),
            ValidationOutcome::Invalid(InvalidReason::Expired) => Err(CardError::Expired),
            ValidationOutcome::Invalid(InvalidReason::LuhnFailed) => Err(CardError::LuhnFailed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::ErrorKind;

    #[test]
    fn test_card_number_rejects_non_digits() {
        assert!(CardNumber::parse("4111111111111111").is_ok());
        assert!(CardNumber::parse("").is_ok());

        let err = CardNumber::parse("4111-1111").unwrap_err();
        assert_eq!(err.kind(), Some(ErrorKind::MalformedInput));
        assert!(CardNumber::parse("4111 1111").is_err());
        assert!(CardNumber::parse("４１１１").is_err());
    }

    #[test]
    fn test_card_number_debug_is_masked() {
        let number = CardNumber::parse("4111111111111111").unwrap();
        let printed = format!("{:?}", number);
        assert!(printed.contains("****1111"));
        assert!(!printed.contains("4111111111111111"));

        assert_eq!(CardNumber::parse("12").unwrap().masked(), "****12");
    }

    #[test]
    fn test_request_rejects_month_out_of_range() {
        let number = CardNumber::parse("4111111111111111").unwrap();
        assert!(CardValidationRequest::new(number.clone(), 2030, 0).is_err());
        assert!(CardValidationRequest::new(number.clone(), 2030, 13).is_err());
        assert!(CardValidationRequest::new(number, 2030, 12).is_ok());
    }

    #[test]
    fn test_outcome_into_result() {
        assert!(ValidationOutcome::Valid.into_result().is_ok());
        let err = ValidationOutcome::Invalid(InvalidReason::Expired)
            .into_result()
            .unwrap_err();
        assert!(matches!(err, CardError::Expired));
    }
}
