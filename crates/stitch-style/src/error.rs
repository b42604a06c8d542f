//! Error types for inline style handling.

use thiserror::Error;

/// Errors raised while reading inline style declarations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum StyleError {
    /// A declaration has no `:` separating property and value.
    #[error("malformed style declaration '{declaration}': expected 'property: value'")]
    MalformedDeclaration {
        /// The offending declaration text.
        declaration: String,
    },

    /// A declaration names no property.
    #[error("style declaration '{declaration}' has an empty property name")]
    EmptyProperty {
        /// The offending declaration text.
        declaration: String,
    },
}

impl StyleError {
    /// Creates a malformed declaration error.
    #[must_use]
    pub fn malformed(declaration: impl Into<String>) -> Self {
        Self::MalformedDeclaration {
            declaration: declaration.into(),
        }
    }

    /// Creates an empty property error.
    #[must_use]
    pub fn empty_property(declaration: impl Into<String>) -> Self {
        Self::EmptyProperty {
            declaration: declaration.into(),
        }
    }
}
