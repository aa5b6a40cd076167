use crate::core::{CardValidationRequest, Clock, InvalidReason, ValidationOutcome};
use chrono::{Datelike, NaiveDate};

/// Digit counts accepted for card numbers (Amex 15, Visa 13/16, Mastercard 16).
pub const SUPPORTED_LENGTHS: [usize; 3] = [13, 15, 16];

pub fn has_supported_length(digits: &str) -> bool {
    SUPPORTED_LENGTHS.contains(&digits.len())
}

/// A card is expired once its expiry month lies strictly before the month of
/// `today`. Months are 1-based and the current month still counts as valid.
pub fn is_expired(expiry_year: i32, expiry_month: u32, today: NaiveDate) -> bool {
    let (year, month) = (today.year(), today.month());
    expiry_year < year || (expiry_year == year && expiry_month < month)
}

/// Luhn checksum over `digits` read left to right. Digits at even positions
/// (0, 2, 4, ...) are doubled regardless of total length.
///
/// Non-digit bytes make the checksum fail.
pub fn luhn_checksum_passes(digits: &str) -> bool {
    let mut sum = 0u32;
    for (index, byte) in digits.bytes().enumerate() {
        if !byte.is_ascii_digit() {
            return false;
        }
        let digit = u32::from(byte - b'0');
        sum += if index % 2 == 0 {
            let doubled = digit * 2;
            if doubled > 9 {
                doubled - 9
            } else {
                doubled
            }
        } else {
            digit
        };
    }
    sum % 10 == 0
}

/// Validates card attributes in a fixed order (length, expiry, Luhn) and
/// stops at the first failing step.
pub struct CardValidator<C: Clock> {
    clock: C,
}

impl<C: Clock> CardValidator<C> {
    pub fn new(clock: C) -> Self {
        Self { clock }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn validate(&self, request: &CardValidationRequest) -> ValidationOutcome {
        let digits = request.card_number().as_str();

        if !has_supported_length(digits) {
            tracing::debug!(
                card = ?request.card_number(),
                digits = request.card_number().digit_count(),
                "rejected: wrong length"
            );
            return ValidationOutcome::Invalid(InvalidReason::WrongLength);
        }

        let today = self.clock.today();
        if is_expired(request.expiry_year(), request.expiry_month(), today) {
            tracing::debug!(
                card = ?request.card_number(),
                expiry_year = request.expiry_year(),
                expiry_month = request.expiry_month(),
                %today,
                "rejected: expired"
            );
            return ValidationOutcome::Invalid(InvalidReason::Expired);
        }

        if !luhn_checksum_passes(digits) {
            tracing::debug!(card = ?request.card_number(), "rejected: luhn checksum");
            return ValidationOutcome::Invalid(InvalidReason::LuhnFailed);
        }

        ValidationOutcome::Valid
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::clock::FixedClock;
    use crate::domain::model::CardNumber;

    fn validator() -> CardValidator<FixedClock> {
        CardValidator::new(FixedClock::from_ymd(2026, 10, 18).unwrap())
    }

    fn request(number: &str, year: i32, month: u32) -> CardValidationRequest {
        CardValidationRequest::new(CardNumber::parse(number).unwrap(), year, month).unwrap()
    }

    #[test]
    fn test_luhn_reference_vectors() {
        assert!(luhn_checksum_passes("4111111111111111"));
        assert!(!luhn_checksum_passes("4111111111111112"));
        assert!(luhn_checksum_passes("0000000000000000"));
        assert!(!luhn_checksum_passes("1111111111111111"));
        assert!(luhn_checksum_passes("5555555555554444"));
        assert!(luhn_checksum_passes("4012888888881881"));
    }

    #[test]
    fn test_luhn_doubles_left_even_positions_for_odd_lengths() {
        // Even-from-left parity diverges from right-anchored Luhn on odd lengths.
        assert!(luhn_checksum_passes("4222222222220"));
        assert!(luhn_checksum_passes("340000000000000"));
        assert!(!luhn_checksum_passes("378282246310005"));
        assert!(!luhn_checksum_passes("4222222222222"));
    }

    #[test]
    fn test_luhn_rejects_non_digits() {
        assert!(!luhn_checksum_passes("4111a11111111111"));
    }

    #[test]
    fn test_valid_card() {
        let v = validator();
        assert_eq!(v.validate(&request("4111111111111111", 2027, 12)), ValidationOutcome::Valid);
        assert_eq!(v.validate(&request("4000000000001", 2027, 1)), ValidationOutcome::Valid);
        assert_eq!(v.validate(&request("340000000000000", 2030, 6)), ValidationOutcome::Valid);
    }

    #[test]
    fn test_wrong_length_for_every_unsupported_count() {
        let v = validator();
        for count in 0..=24usize {
            // All-zero strings pass Luhn, so only length can reject them.
            let number = "0".repeat(count);
            let outcome = v.validate(&request(&number, 2030, 1));
            if SUPPORTED_LENGTHS.contains(&count) {
                assert_eq!(outcome, ValidationOutcome::Valid, "count {}", count);
            } else {
                assert_eq!(
                    outcome,
                    ValidationOutcome::Invalid(InvalidReason::WrongLength),
                    "count {}",
                    count
                );
            }
        }
    }

    #[test]
    fn test_length_checked_before_expiry_and_luhn() {
        let v = validator();
        assert_eq!(
            v.validate(&request("411111111111", 1999, 1)),
            ValidationOutcome::Invalid(InvalidReason::WrongLength)
        );
    }

    #[test]
    fn test_expiry_checked_before_luhn() {
        let v = validator();
        assert_eq!(
            v.validate(&request("4111111111111112", 2025, 12)),
            ValidationOutcome::Invalid(InvalidReason::Expired)
        );
    }

    #[test]
    fn test_luhn_failure() {
        let v = validator();
        assert_eq!(
            v.validate(&request("4111111111111112", 2027, 12)),
            ValidationOutcome::Invalid(InvalidReason::LuhnFailed)
        );
        assert_eq!(
            v.validate(&request("1111111111111111", 2027, 12)),
            ValidationOutcome::Invalid(InvalidReason::LuhnFailed)
        );
    }

    #[test]
    fn test_expiry_boundaries() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        assert!(is_expired(2025, 12, today));
        assert!(is_expired(2026, 9, today));
        assert!(!is_expired(2026, 10, today));
        assert!(!is_expired(2026, 11, today));
        assert!(!is_expired(2027, 1, today));
    }

    #[test]
    fn test_current_month_is_valid_with_one_based_months() {
        // Regression: a 0-based current month compared against the 1-based
        // expiry month let last month's cards through.
        for month in 1..=12 {
            let today = NaiveDate::from_ymd_opt(2026, month, 1).unwrap();
            assert!(!is_expired(2026, month, today), "month {}", month);
            if month > 1 {
                assert!(is_expired(2026, month - 1, today), "month {}", month);
            }
        }

        let january = CardValidator::new(FixedClock::from_ymd(2026, 1, 31).unwrap());
        assert_eq!(
            january.validate(&request("4111111111111111", 2026, 1)),
            ValidationOutcome::Valid
        );
        assert_eq!(
            january.validate(&request("4111111111111111", 2025, 12)),
            ValidationOutcome::Invalid(InvalidReason::Expired)
        );
    }
}
