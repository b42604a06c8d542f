//! Error taxonomy for transformations.
//!
//! Every failure maps to an [`ErrorKind`], which travels on the wire so the
//! calling service can decide whether to retry with another locator
//! strategy. Failures never touch the caller's source text.

use serde::{Deserialize, Serialize};
use stitch_syntax::SyntaxError;
use strum::{Display, EnumString};
use thiserror::Error;

/// Serialisable category of an [`EngineError`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase", ascii_case_insensitive)]
pub enum ErrorKind {
    /// The source text is malformed.
    ParseError,
    /// The locator found no element under the strategies tried.
    NodeNotFound,
    /// The target holds content that cannot be edited as a literal.
    NotEditable,
    /// The edit targets the stable-id attribute.
    ProtectedAttribute,
    /// The operation does not apply to the target.
    InvalidOperation,
    /// Neither printer produced valid output.
    PrintError,
    /// A bug or unexpected internal state.
    Internal,
}

/// Errors from locating and editing nodes.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EngineError {
    /// The source text is malformed.
    #[error("parse error: {message}")]
    Parse {
        /// Description including the location of the first problem.
        message: String,
    },

    /// No node matched.
    #[error("node not found: {message}")]
    NodeNotFound {
        /// Which strategies were tried and why they failed.
        message: String,
    },

    /// The target's content is not a literal.
    #[error("node is not editable: {message}")]
    NotEditable {
        /// What made the node uneditable.
        message: String,
    },

    /// The edit targets the stable-id attribute.
    #[error("cannot modify protected attribute '{attribute}'")]
    ProtectedAttribute {
        /// The protected attribute name.
        attribute: String,
    },

    /// The operation does not apply to the target.
    #[error("invalid operation: {message}")]
    InvalidOperation {
        /// Why the operation was rejected.
        message: String,
    },

    /// The edited tree could not be printed.
    #[error("print error: {message}")]
    Print {
        /// Description of the failure.
        message: String,
    },

    /// A bug or unexpected internal state.
    #[error("internal error: {message}")]
    Internal {
        /// Description of the failure.
        message: String,
    },
}

impl EngineError {
    /// Creates a node-not-found error.
    #[must_use]
    pub fn node_not_found(message: impl Into<String>) -> Self {
        Self::NodeNotFound {
            message: message.into(),
        }
    }

    /// Creates a not-editable error.
    #[must_use]
    pub fn not_editable(message: impl Into<String>) -> Self {
        Self::NotEditable {
            message: message.into(),
        }
    }

    /// Creates a protected-attribute error.
    #[must_use]
    pub fn protected_attribute(attribute: impl Into<String>) -> Self {
        Self::ProtectedAttribute {
            attribute: attribute.into(),
        }
    }

    /// Creates an invalid-operation error.
    #[must_use]
    pub fn invalid_operation(message: impl Into<String>) -> Self {
        Self::InvalidOperation {
            message: message.into(),
        }
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Returns the wire category of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Parse { .. } => ErrorKind::ParseError,
            Self::NodeNotFound { .. } => ErrorKind::NodeNotFound,
            Self::NotEditable { .. } => ErrorKind::NotEditable,
            Self::ProtectedAttribute { .. } => ErrorKind::ProtectedAttribute,
            Self::InvalidOperation { .. } => ErrorKind::InvalidOperation,
            Self::Print { .. } => ErrorKind::PrintError,
            Self::Internal { .. } => ErrorKind::Internal,
        }
    }
}

impl From<SyntaxError> for EngineError {
    fn from(err: SyntaxError) -> Self {
        let message = err.to_string();
        match err {
            SyntaxError::ParseError { .. } => Self::Parse { message },
            SyntaxError::InvalidSnippet { .. } => Self::InvalidOperation { message },
            SyntaxError::PrintError { .. } => Self::Print { message },
            _ => Self::Internal { message },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(EngineError::node_not_found("x"), "nodeNotFound")]
    #[case(EngineError::protected_attribute("data-stitch-id"), "protectedAttribute")]
    #[case(EngineError::invalid_operation("x"), "invalidOperation")]
    fn kinds_serialise_in_camel_case(#[case] err: EngineError, #[case] expected: &str) {
        let json = serde_json::to_string(&err.kind()).expect("json");
        assert_eq!(json, format!("\"{expected}\""));
        assert_eq!(err.kind().to_string(), expected);
    }

    #[test]
    fn protected_attribute_message_names_the_attribute() {
        let err = EngineError::protected_attribute("data-stitch-id");
        assert_eq!(
            err.to_string(),
            "cannot modify protected attribute 'data-stitch-id'"
        );
    }

    #[test]
    fn snippet_errors_become_invalid_operations() {
        let err = EngineError::from(SyntaxError::invalid_snippet("bad"));
        assert_eq!(err.kind(), ErrorKind::InvalidOperation);
    }
}
