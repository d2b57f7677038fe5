// LedSlot - core/auth.rs
//
// Sign-in input handling: phone number formatting and one-time code entry.
// There is no verification backend; these only shape and check input.

use crate::util::constants::{OTP_LENGTH, PHONE_DIGITS};

/// Digits of a phone input, capped at ten.
pub fn phone_digits(input: &str) -> String {
    input
        .chars()
        .filter(char::is_ascii_digit)
        .take(PHONE_DIGITS)
        .collect()
}

/// Format phone input progressively as the user types.
///
/// `"512"` -> `"512"`, `"5125"` -> `"(512) 5"`, `"5125550123"` -> `"(512) 555-0123"`.
pub fn format_phone(input: &str) -> String {
    let d = phone_digits(input);
    match d.len() {
        0..=3 => d,
        4..=6 => format!("({}) {}", &d[..3], &d[3..]),
        _ => format!("({}) {}-{}", &d[..3], &d[3..6], &d[6..]),
    }
}

/// The continue button is enabled once ten digits are present.
pub fn is_valid_phone(input: &str) -> bool {
    phone_digits(input).len() == PHONE_DIGITS
}

/// Six single-digit cells of a one-time verification code.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OtpEntry {
    cells: [Option<u8>; OTP_LENGTH],
}

impl OtpEntry {
    /// Type into a cell. Non-digit input is ignored and returns false;
    /// the last digit typed wins; empty input clears the cell.
    pub fn enter(&mut self, index: usize, value: &str) -> bool {
        if index >= OTP_LENGTH || !value.chars().all(|c| c.is_ascii_digit()) {
            return false;
        }
        self.cells[index] = value
            .chars()
            .last()
            .and_then(|c| c.to_digit(10))
            .map(|d| d as u8);
        true
    }

    /// Cell focus moves back on backspace only when the current cell is empty.
    pub fn backspace_target(&self, index: usize) -> Option<usize> {
        if index > 0 && index < OTP_LENGTH && self.cells[index].is_none() {
            Some(index - 1)
        } else {
            None
        }
    }

    pub fn is_complete(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// The entered code, once all cells are filled.
    pub fn code(&self) -> Option<String> {
        if !self.is_complete() {
            return None;
        }
        Some(
            self.cells
                .iter()
                .flatten()
                .map(|d| char::from(b'0' + d))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_phone_progressive() {
        assert_eq!(format_phone(""), "");
        assert_eq!(format_phone("512"), "512");
        assert_eq!(format_phone("5125"), "(512) 5");
        assert_eq!(format_phone("512555"), "(512) 555");
        assert_eq!(format_phone("5125550"), "(512) 555-0");
        assert_eq!(format_phone("5125550123"), "(512) 555-0123");
    }

    #[test]
    fn test_format_phone_ignores_noise_and_extra_digits() {
        assert_eq!(format_phone("(512) 555-0123 99"), "(512) 555-0123");
        assert!(is_valid_phone("+512.555.0123"));
        assert!(!is_valid_phone("555-0123"));
    }

    #[test]
    fn test_otp_entry() {
        let mut otp = OtpEntry::default();
        assert!(!otp.enter(0, "a"));
        for (i, d) in ["1", "2", "3", "4", "5"].iter().enumerate() {
            assert!(otp.enter(i, d));
        }
        assert!(!otp.is_complete());
        assert_eq!(otp.code(), None);
        assert_eq!(otp.backspace_target(5), Some(4));
        assert!(otp.enter(5, "89"));
        assert_eq!(otp.code().as_deref(), Some("123459"));
        assert_eq!(otp.backspace_target(5), None);
        assert!(!otp.enter(6, "1"));
    }

    #[test]
    fn test_otp_clear_cell() {
        let mut otp = OtpEntry::default();
        otp.enter(2, "7");
        otp.enter(2, "");
        assert_eq!(otp, OtpEntry::default());
    }
}
