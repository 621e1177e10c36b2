use std::{fmt, str::FromStr};

use crate::error::ModelError;

/// Visual novel identifier in its canonical `v<digits>` form.
///
/// Bare numbers (`"17"`) are accepted and normalized, which is what title
/// tags such as `[vndbid-17]` carry.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub struct VnId(String);

impl VnId {
    pub fn parse(raw: &str) -> Result<Self, ModelError> {
        let trimmed = raw.trim();
        let digits = trimmed
            .strip_prefix('v')
            .or_else(|| trimmed.strip_prefix('V'))
            .unwrap_or(trimmed);

        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ModelError::InvalidId(raw.to_string()));
        }

        // "v007" and "v7" name the same entry
        let digits = digits.trim_start_matches('0');
        if digits.is_empty() {
            return Err(ModelError::InvalidId(raw.to_string()));
        }

        Ok(VnId(format!("v{digits}")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric part of the identifier.
    pub fn number(&self) -> u64 {
        self.0[1..].parse().unwrap_or_default()
    }
}

impl FromStr for VnId {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        VnId::parse(s)
    }
}

impl TryFrom<String> for VnId {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        VnId::parse(&value)
    }
}

impl From<VnId> for String {
    fn from(id: VnId) -> Self {
        id.0
    }
}

impl AsRef<str> for VnId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
