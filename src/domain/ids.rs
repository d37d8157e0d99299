//! Domain identifier and key types
//!
//! Newtype wrappers keep store-assigned admission ids and reporting-month keys
//! from being mixed up with the free-form strings around them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Live admission identifier, assigned by the external store
///
/// # Examples
///
/// ```
/// use wardlens::domain::ids::AdmissionId;
/// use std::str::FromStr;
///
/// let id = AdmissionId::from_str("9b2f6c1e-3d0a-4c55-8d7e-0f1a2b3c4d5e").unwrap();
/// assert_eq!(id.as_str(), "9b2f6c1e-3d0a-4c55-8d7e-0f1a2b3c4d5e");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AdmissionId(String);

impl AdmissionId {
    /// Creates a new AdmissionId, rejecting blank values
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err("Admission ID cannot be empty".to_string());
        }
        Ok(Self(id))
    }

    /// Generates a fresh random id
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Returns the admission ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AdmissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for AdmissionId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for AdmissionId {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<AdmissionId> for String {
    fn from(id: AdmissionId) -> Self {
        id.0
    }
}

impl AsRef<str> for AdmissionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Reporting month key, e.g. `2024-03-01`
///
/// Historical rows carry the key verbatim; live admissions derive it from
/// their creation timestamp. Grouping is by the raw key, display by
/// [`MonthKey::label`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MonthKey(String);

impl MonthKey {
    /// Wraps a raw key as found in the dataset
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// First-of-month key for a timestamp
    pub fn from_timestamp(timestamp: &DateTime<Utc>) -> Self {
        Self(format!("{}-01", timestamp.format("%Y-%m")))
    }

    /// Returns the raw key
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `MM/YY` label
    ///
    /// Missing character ranges render as empty strings, so short keys yield
    /// a partial label instead of failing.
    ///
    /// ```
    /// use wardlens::domain::ids::MonthKey;
    ///
    /// assert_eq!(MonthKey::new("2024-03-01").label(), "03/24");
    /// ```
    pub fn label(&self) -> String {
        format!("{}/{}", char_slice(&self.0, 5, 7), char_slice(&self.0, 2, 4))
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn char_slice(s: &str, start: usize, end: usize) -> String {
    s.chars().skip(start).take(end.saturating_sub(start)).collect()
}
