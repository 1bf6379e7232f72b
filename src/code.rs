//! Catalog code module.
//!
//! Provides the `Code` type, the interned string key used for every
//! catalog record (stats, properties, items, affixes, treasure classes).

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Borrow;
use std::sync::Arc;

/// Interned string identifier for catalog records.
///
/// Uses `Arc<str>` so that cloning a code into stats, breakdowns and
/// items never copies the string itself.
///
/// # Examples
///
/// ```rust
/// use lootstat::Code;
///
/// let strength = Code::new("strength");
/// let again: Code = "strength".into();
///
/// assert_eq!(strength, again);
/// assert_eq!(strength.as_str(), "strength");
/// ```
#[derive(Debug, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Code(Arc<str>);

impl Serialize for Code {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.as_ref().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Code {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Code::from(s))
    }
}

/// Suffix that marks a gold drop with a multiplier (`gld,mul=1280`).
const GOLD_WITH_MULTIPLIER: &str = "gld,mul=";
const GOLD: &str = "gld";

impl Code {
    /// Create a new `Code` from a string slice.
    pub fn new(s: &str) -> Self {
        Self(Arc::from(s))
    }

    /// Get the string representation of this code.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` for the empty code (an unused record slot).
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Split a dynamic treasure code into its alphabetic and numeric parts.
    ///
    /// Digits are removed to form the alphabetic part and collected to form
    /// the numeric part. A code without digits has a level of 0. The gold
    /// multiplier form collapses onto the plain gold code.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lootstat::Code;
    ///
    /// assert_eq!(Code::new("armo33").split_level(), ("armo".to_string(), 33));
    /// assert_eq!(Code::new("weap6").split_level(), ("weap".to_string(), 6));
    /// assert_eq!(Code::new("gld,mul=1280").split_level(), ("gld".to_string(), 1280));
    /// assert_eq!(Code::new("rin").split_level(), ("rin".to_string(), 0));
    /// ```
    pub fn split_level(&self) -> (String, i32) {
        let (digits, letters): (String, String) =
            self.0.chars().partition(|c| c.is_ascii_digit());

        let level = digits.parse::<i32>().unwrap_or(0);
        let base = if letters == GOLD_WITH_MULTIPLIER {
            GOLD.to_string()
        } else {
            letters
        };

        (base, level)
    }
}

impl Borrow<str> for Code {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Code {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Code {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Code {
    fn from(s: String) -> Self {
        Self(Arc::from(s))
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
