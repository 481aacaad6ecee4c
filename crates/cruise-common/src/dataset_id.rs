//! Dataset identifiers ("expocodes").
//!
//! An expocode is the platform (NODC) code followed by the cruise start date,
//! e.g. `33RO20030604`. The leading characters identify the ship or mooring
//! that made the measurements.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CrossoverError, CrossoverResult};

/// Minimum length of a dataset ID after trimming.
pub const MIN_DATASET_ID_LENGTH: usize = 12;

/// Maximum length of a dataset ID after trimming.
pub const MAX_DATASET_ID_LENGTH: usize = 14;

/// Number of leading characters that name the measuring platform.
pub const DEFAULT_PLATFORM_PREFIX_LEN: usize = 4;

/// A validated, uppercase dataset ID.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DatasetId(String);

impl DatasetId {
    /// Validate and standardize a dataset ID.
    ///
    /// Surrounding whitespace is removed and letters are uppercased. Anything
    /// other than ASCII letters, digits, and hyphens is rejected.
    pub fn parse(raw: &str) -> CrossoverResult<Self> {
        let clean = raw.trim();
        if clean.is_empty() {
            return Err(CrossoverError::invalid_dataset_id(raw, "no dataset ID given"));
        }
        let len = clean.chars().count();
        if len < MIN_DATASET_ID_LENGTH {
            return Err(CrossoverError::invalid_dataset_id(raw, "dataset ID too short"));
        }
        if len > MAX_DATASET_ID_LENGTH {
            return Err(CrossoverError::invalid_dataset_id(raw, "dataset ID too long"));
        }
        if !clean
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-')
        {
            return Err(CrossoverError::invalid_dataset_id(
                raw,
                "invalid characters in the dataset ID",
            ));
        }
        Ok(Self(clean.to_ascii_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Leading platform code of this ID (the whole ID if shorter than `len`).
    pub fn platform_code(&self, len: usize) -> &str {
        // Validated IDs are pure ASCII so byte slicing is safe.
        &self.0[..len.min(self.0.len())]
    }

    /// True when both IDs were measured by the same platform.
    pub fn same_platform(&self, other: &DatasetId, prefix_len: usize) -> bool {
        self.platform_code(prefix_len) == other.platform_code(prefix_len)
    }
}

impl fmt::Display for DatasetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for DatasetId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for DatasetId {
    type Error = CrossoverError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<DatasetId> for String {
    fn from(id: DatasetId) -> Self {
        id.0
    }
}

impl std::str::FromStr for DatasetId {
    type Err = CrossoverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
