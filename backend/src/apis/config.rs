use std::path::Path;

use merkle_distributor::merkle_tree::parse_amount;
use num_bigint::BigUint;
use serde::{de::Error as _, Deserialize, Deserializer};

use crate::Result;

/// Slack allowed when a pool is split by integer division and rounds down.
pub const DEFAULT_TOLERANCE: u32 = 1000;

/// Reconciliation settings for one snapshot, usually read from a TOML file.
///
/// ```toml
/// expected_total = "2700000000000000000000000"
/// tolerance = "1000"
/// allocation_ceiling = "0x023bbf4b14c2e7ff800000"
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SnapshotConfig {
    #[serde(default, deserialize_with = "optional_amount")]
    pub expected_total: Option<BigUint>,
    #[serde(default = "default_tolerance", deserialize_with = "amount")]
    pub tolerance: BigUint,
    #[serde(default, deserialize_with = "optional_amount")]
    pub allocation_ceiling: Option<BigUint>,
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        SnapshotConfig {
            expected_total: None,
            tolerance: default_tolerance(),
            allocation_ceiling: None,
        }
    }
}

impl SnapshotConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml(&raw)
    }

    pub fn from_toml(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    /// Applies command-line values on top of the file.
    pub fn with_overrides(
        mut self,
        expected_total: Option<BigUint>,
        tolerance: Option<BigUint>,
    ) -> Self {
        if expected_total.is_some() {
            self.expected_total = expected_total;
        }
        if let Some(tolerance) = tolerance {
            self.tolerance = tolerance;
        }
        self
    }
}

fn default_tolerance() -> BigUint {
    BigUint::from(DEFAULT_TOLERANCE)
}

// TOML integers stop at i64, so amounts are written as strings.
fn amount<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<BigUint, D::Error> {
    let raw = String::deserialize(deserializer)?;
    parse_amount(&raw).map_err(D::Error::custom)
}

fn optional_amount<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Option<BigUint>, D::Error> {
    amount(deserializer).map(Some)
}
