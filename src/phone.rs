//! `PhoneNumber` — a value object with a documented string form.
//!
//! The string form is `XXX-YYY-ZZZZ`: a three-digit area code, a three-digit prefix and
//! a four-digit line number, each zero padded. [`Display`](fmt::Display) always
//! produces it and [`FromStr`] accepts exactly it, so the two round-trip. Everything
//! the string carries is also available through accessors.

use core::fmt;
use core::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::error::PhoneNumberError;

/// A North American phone number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PhoneNumber {
    area_code: u16,
    prefix: u16,
    line_number: u16,
}

impl PhoneNumber {
    /// Largest accepted area code.
    pub const MAX_AREA_CODE: u16 = 999;
    /// Largest accepted prefix.
    pub const MAX_PREFIX: u16 = 999;
    /// Largest accepted line number.
    pub const MAX_LINE_NUMBER: u16 = 9999;

    /// Builds a phone number from its components.
    ///
    /// # Errors
    /// Returns [`PhoneNumberError::OutOfRange`] if a component exceeds its maximum.
    pub fn new(area_code: u16, prefix: u16, line_number: u16) -> Result<Self, PhoneNumberError> {
        Ok(Self {
            area_code: range_check(area_code, Self::MAX_AREA_CODE, "area code")?,
            prefix: range_check(prefix, Self::MAX_PREFIX, "prefix")?,
            line_number: range_check(line_number, Self::MAX_LINE_NUMBER, "line number")?,
        })
    }

    /// Returns the area code.
    #[inline]
    pub fn area_code(&self) -> u16 {
        self.area_code
    }

    /// Returns the prefix.
    #[inline]
    pub fn prefix(&self) -> u16 {
        self.prefix
    }

    /// Returns the line number.
    #[inline]
    pub fn line_number(&self) -> u16 {
        self.line_number
    }
}

fn range_check(value: u16, max: u16, field: &'static str) -> Result<u16, PhoneNumberError> {
    if value > max {
        return Err(PhoneNumberError::OutOfRange { field, value, max });
    }
    Ok(value)
}

/// Formats as `XXX-YYY-ZZZZ`, e.g. `707-867-5309` or `012-003-0004`.
impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:03}-{:03}-{:04}", self.area_code, self.prefix, self.line_number)
    }
}

impl FromStr for PhoneNumber {
    type Err = PhoneNumberError;

    /// Parses the `XXX-YYY-ZZZZ` form. Surrounding whitespace, signs, missing padding
    /// and any other separator are rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || PhoneNumberError::InvalidFormat { input: s.to_owned() };

        let bytes = s.as_bytes();
        if bytes.len() != 12 || bytes[3] != b'-' || bytes[7] != b'-' {
            return Err(invalid());
        }

        // Bytes 3 and 7 are ASCII, so every slice below starts and ends on a char boundary.
        let field = |digits: &str| -> Result<u16, PhoneNumberError> {
            if !digits.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid());
            }
            digits.parse().map_err(|_| invalid())
        };

        Self::new(field(&s[..3])?, field(&s[4..7])?, field(&s[8..])?)
    }
}

impl Serialize for PhoneNumber {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PhoneNumber {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}
