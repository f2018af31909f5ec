//! Table configuration loaded from JSON.
//!
//! Every way of obtaining a [`TableConfig`] validates it, including plain serde
//! deserialization, so [`ChainedTable::with_config`](crate::ChainedTable::with_config)
//! never sees a zero bucket count.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::table::DEFAULT_BUCKETS;

/// Layout settings for a [`ChainedTable`](crate::ChainedTable).
///
/// ```
/// use chaincopy::TableConfig;
///
/// let config = TableConfig::from_json(r#"{ "buckets": 64 }"#).unwrap();
/// assert_eq!(config.buckets(), 64);
/// assert_eq!(TableConfig::from_json("{}").unwrap(), TableConfig::default());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTableConfig")]
pub struct TableConfig {
    buckets: usize,
}

#[derive(Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawTableConfig {
    buckets: usize,
}

impl Default for RawTableConfig {
    fn default() -> Self {
        Self { buckets: DEFAULT_BUCKETS }
    }
}

impl TryFrom<RawTableConfig> for TableConfig {
    type Error = ConfigError;

    fn try_from(raw: RawTableConfig) -> Result<Self, Self::Error> {
        Self::new(raw.buckets)
    }
}

impl TableConfig {
    /// Creates a configuration with `buckets` buckets.
    ///
    /// # Errors
    /// Returns [`ConfigError::ZeroBuckets`] if `buckets` is 0.
    pub fn new(buckets: usize) -> Result<Self, ConfigError> {
        if buckets == 0 {
            return Err(ConfigError::ZeroBuckets);
        }
        Ok(Self { buckets })
    }

    /// Parses a JSON object such as `{ "buckets": 32 }`. Missing fields take their
    /// defaults; unknown fields are rejected.
    ///
    /// # Errors
    /// Returns [`ConfigError::Parse`] for malformed JSON, unknown fields or a zero
    /// bucket count.
    pub fn from_json(input: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(input)?)
    }

    /// Returns the bucket count.
    #[inline]
    pub fn buckets(&self) -> usize {
        self.buckets
    }
}

impl Default for TableConfig {
    fn default() -> Self {
        Self { buckets: DEFAULT_BUCKETS }
    }
}
