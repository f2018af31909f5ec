//! Error types for string conversion and configuration.

use core::fmt;

/// The error type for building or parsing a [`PhoneNumber`](crate::PhoneNumber).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhoneNumberError {
    /// The input does not match the documented `XXX-YYY-ZZZZ` format.
    InvalidFormat {
        /// The rejected input.
        input: String,
    },
    /// A numeric component exceeds its maximum.
    OutOfRange {
        /// Component name (`"area code"`, `"prefix"` or `"line number"`).
        field: &'static str,
        /// The rejected value.
        value: u16,
        /// Largest accepted value.
        max: u16,
    },
}

impl fmt::Display for PhoneNumberError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFormat { input } => {
                write!(f, "invalid phone number {input:?}: expected XXX-YYY-ZZZZ")
            }
            Self::OutOfRange { field, value, max } => {
                write!(f, "{field} {value} out of range (max {max})")
            }
        }
    }
}

impl std::error::Error for PhoneNumberError {}

/// The error type for loading a [`TableConfig`](crate::TableConfig).
#[derive(Debug)]
pub enum ConfigError {
    /// The input is not valid JSON or does not have the expected shape.
    Parse(serde_json::Error),
    /// A table needs at least one bucket.
    ZeroBuckets,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "malformed table config: {err}"),
            Self::ZeroBuckets => f.write_str("bucket count must be non-zero"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            Self::ZeroBuckets => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_display_messages() {
        let err = PhoneNumberError::OutOfRange { field: "prefix", value: 1000, max: 999 };
        assert_eq!(err.to_string(), "prefix 1000 out of range (max 999)");

        let err = PhoneNumberError::InvalidFormat { input: "867".into() };
        assert_eq!(err.to_string(), "invalid phone number \"867\": expected XXX-YYY-ZZZZ");

        assert_eq!(ConfigError::ZeroBuckets.to_string(), "bucket count must be non-zero");
    }

    #[test]
    fn test_config_error_source() {
        let json_err = serde_json::from_str::<u32>("not json").unwrap_err();
        let err = ConfigError::from(json_err);
        assert!(err.source().is_some());
        assert!(ConfigError::ZeroBuckets.source().is_none());
    }
}
