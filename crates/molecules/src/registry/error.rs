//! Registration errors.

use std::fmt;

/// Which of the two registry tables an operation touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableKind {
    /// Component implementation overrides.
    Components,
    /// Style definition overrides.
    Styles,
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableKind::Components => f.write_str("components"),
            TableKind::Styles => f.write_str("styles"),
        }
    }
}

/// Error returned when a registration is refused.
///
/// Lookups never produce errors: a missing name resolves to the fallback.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// The name is empty or has surrounding whitespace.
    #[error("invalid component name {name:?}: names must be non-empty and trimmed")]
    InvalidName { name: String },

    /// A different value is already registered under this name and the
    /// registry rejects duplicates.
    ///
    /// This usually means two unrelated widgets share a name.
    #[error("'{name}' is already registered in the {table} table")]
    Duplicate { table: TableKind, name: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_name_display() {
        let err = RegistryError::InvalidName {
            name: " Card".to_string(),
        };
        assert!(err.to_string().contains("\" Card\""));
    }

    #[test]
    fn test_duplicate_display() {
        let err = RegistryError::Duplicate {
            table: TableKind::Styles,
            name: "Card_Header".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("Card_Header"));
        assert!(msg.contains("styles"));
    }
}
