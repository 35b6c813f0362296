//! Stable identifiers for overridable components.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::registry::RegistryError;

/// Separator used to join a composite widget's name with one of its parts.
pub const PART_SEPARATOR: char = '_';

/// The key under which a widget (or one of its sub-parts) is registered.
///
/// Every widget module owns exactly one name, and composite widgets derive
/// names for their parts with [`ComponentName::part`]. Names are compared
/// verbatim.
///
/// Uniqueness is a caller contract: two unrelated widgets sharing a name will
/// share overrides. Use [`RegistrationPolicy::RejectDuplicates`] to surface
/// such collisions at registration time.
///
/// [`RegistrationPolicy::RejectDuplicates`]: crate::RegistrationPolicy::RejectDuplicates
///
/// # Example
///
/// ```rust
/// use molecules::ComponentName;
///
/// let card = ComponentName::new("Card").unwrap();
/// assert_eq!(card.part("Header").as_str(), "Card_Header");
/// assert!(ComponentName::new("  ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ComponentName(String);

impl ComponentName {
    /// Validates and wraps a name.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::InvalidName`] for empty names and names with
    /// leading or trailing whitespace.
    pub fn new(name: impl Into<String>) -> Result<Self, RegistryError> {
        let name = name.into();
        if name.is_empty() || name.trim() != name {
            return Err(RegistryError::InvalidName { name });
        }
        Ok(Self(name))
    }

    /// Builds the compound name of a sub-part, e.g. `Card` + `Media` is `Card_Media`.
    pub fn part(&self, part: &str) -> Self {
        Self(format!("{}{}{}", self.0, PART_SEPARATOR, part))
    }

    /// Returns the raw name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ComponentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ComponentName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ComponentName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ComponentName {
    type Error = RegistryError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for ComponentName {
    type Error = RegistryError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ComponentName> for String {
    fn from(name: ComponentName) -> Self {
        name.0
    }
}
