//! core::types
//!
//! Strong types for core domain concepts.
//!
//! # Types
//!
//! - [`StageTag`] - Validated identifier for one translation stage
//! - [`NameFormat`] - How a protocol version encodes display names
//!
//! # Validation
//!
//! These types enforce validity at construction time. Invalid values
//! cannot be represented, preventing entire classes of bugs.
//!
//! # Examples
//!
//! ```
//! use keepsake::core::types::StageTag;
//!
//! let tag = StageTag::new("vb|1.12to1.11").unwrap();
//! assert_eq!(tag.as_str(), "vb|1.12to1.11");
//!
//! assert!(StageTag::new("").is_err());
//! assert!(StageTag::new(" padded ").is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from type validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid stage tag: {0}")]
    InvalidStageTag(String),
}

/// Maximum stage tag length in bytes.
///
/// Backup slot keys embed the tag verbatim; a bound keeps keys readable in
/// dumps and bounded on the wire.
pub const MAX_STAGE_TAG_LEN: usize = 64;

/// A validated identifier for one translation stage.
///
/// The tag prefixes every backup slot key a stage writes, so it must be
/// deterministic for a stage and distinct between stages stacked in the
/// same pipeline. Callers supply it explicitly at construction; nothing is
/// derived from runtime type identity.
///
/// Rules:
/// - Cannot be empty
/// - Cannot exceed [`MAX_STAGE_TAG_LEN`] bytes
/// - Cannot contain control characters
/// - Cannot start or end with whitespace
///
/// `|` is allowed: slot keys are matched whole, so the separator needs no
/// escaping.
///
/// # Example
///
/// ```
/// use keepsake::core::types::StageTag;
///
/// let tag = StageTag::new("vb|1.13to1.12").unwrap();
/// assert_eq!(tag.to_string(), "vb|1.13to1.12");
///
/// assert!(StageTag::new("has\ncontrol").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StageTag(String);

impl StageTag {
    /// Create a new validated stage tag.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidStageTag` if the value violates the rules
    /// above.
    pub fn new(tag: impl Into<String>) -> Result<Self, TypeError> {
        let tag = tag.into();
        Self::validate(&tag)?;
        Ok(Self(tag))
    }

    fn validate(tag: &str) -> Result<(), TypeError> {
        if tag.is_empty() {
            return Err(TypeError::InvalidStageTag(
                "stage tag cannot be empty".into(),
            ));
        }

        if tag.len() > MAX_STAGE_TAG_LEN {
            return Err(TypeError::InvalidStageTag(format!(
                "stage tag cannot exceed {MAX_STAGE_TAG_LEN} bytes"
            )));
        }

        if tag.chars().any(|c| c.is_control()) {
            return Err(TypeError::InvalidStageTag(
                "stage tag cannot contain control characters".into(),
            ));
        }

        if tag.starts_with(char::is_whitespace) || tag.ends_with(char::is_whitespace) {
            return Err(TypeError::InvalidStageTag(
                "stage tag cannot start or end with whitespace".into(),
            ));
        }

        Ok(())
    }

    /// Get the stage tag as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for StageTag {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<StageTag> for String {
    fn from(tag: StageTag) -> Self {
        tag.0
    }
}

impl AsRef<str> for StageTag {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for StageTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How a protocol version encodes display names.
///
/// Newer versions carry names as JSON text components; older ones carry
/// plain strings. The backup engine records this so forward-direction
/// callers can encode replacement names to match.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NameFormat {
    /// Plain text names.
    #[default]
    Plain,
    /// JSON text-component names, e.g. `{"text":"Iron Sword"}`.
    Json,
}
