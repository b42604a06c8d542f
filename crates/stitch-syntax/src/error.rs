//! Error types for parsing, traversal and printing operations.
//!
//! This module provides structured error types for all operations in the
//! `stitch-syntax` crate. Malformed input is an expected condition (files are
//! edited concurrently and generated incrementally), so parse failures carry
//! enough location detail to be surfaced verbatim to a user.

use thiserror::Error;

use crate::language::SupportedLanguage;

/// Errors from syntactic operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SyntaxError {
    /// Failed to initialise the Tree-sitter parser for a language.
    #[error("failed to initialise parser for {language}: {message}")]
    ParserInitError {
        /// The language that failed to initialise.
        language: SupportedLanguage,
        /// Description of the failure.
        message: String,
    },

    /// Source text is malformed.
    #[error("failed to parse {language} at {line}:{column}: {message}")]
    ParseError {
        /// The language that failed to parse.
        language: SupportedLanguage,
        /// One-based line of the first problem (zero when unknown).
        line: u32,
        /// One-based column of the first problem (zero when unknown).
        column: u32,
        /// Description of the failure.
        message: String,
    },

    /// A markup snippet supplied for insertion is not valid markup.
    #[error("invalid markup snippet: {message}")]
    InvalidSnippet {
        /// Description of the problem.
        message: String,
    },

    /// A tree edit addressed a path that does not exist.
    #[error("invalid tree path {path}: {message}")]
    InvalidPath {
        /// The rendered path.
        path: String,
        /// Description of the problem.
        message: String,
    },

    /// A traversal recorded edits that could not be applied.
    #[error("traversal failed: {message}")]
    VisitError {
        /// Description of the failure.
        message: String,
    },

    /// Neither printer produced parseable output.
    #[error("failed to print {language} source: {message}")]
    PrintError {
        /// The language being printed.
        language: SupportedLanguage,
        /// Description of the failure.
        message: String,
    },

    /// Internal error indicating a bug or system failure.
    #[error("internal error: {message}")]
    InternalError {
        /// Description of the internal error.
        message: String,
    },
}

impl SyntaxError {
    /// Creates a parser initialisation error.
    #[must_use]
    pub fn parser_init(language: SupportedLanguage, message: impl Into<String>) -> Self {
        Self::ParserInitError {
            language,
            message: message.into(),
        }
    }

    /// Creates a parse error without location information.
    #[must_use]
    pub fn parse(language: SupportedLanguage, message: impl Into<String>) -> Self {
        Self::ParseError {
            language,
            line: 0,
            column: 0,
            message: message.into(),
        }
    }

    /// Creates a parse error at a one-based location.
    #[must_use]
    pub fn parse_at(
        language: SupportedLanguage,
        line: u32,
        column: u32,
        message: impl Into<String>,
    ) -> Self {
        Self::ParseError {
            language,
            line,
            column,
            message: message.into(),
        }
    }

    /// Creates an invalid snippet error.
    #[must_use]
    pub fn invalid_snippet(message: impl Into<String>) -> Self {
        Self::InvalidSnippet {
            message: message.into(),
        }
    }

    /// Creates an invalid path error.
    #[must_use]
    pub fn invalid_path(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidPath {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates a traversal error.
    #[must_use]
    pub fn visit(message: impl Into<String>) -> Self {
        Self::VisitError {
            message: message.into(),
        }
    }

    /// Creates a print error.
    #[must_use]
    pub fn print(language: SupportedLanguage, message: impl Into<String>) -> Self {
        Self::PrintError {
            language,
            message: message.into(),
        }
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::InternalError {
            message: message.into(),
        }
    }

    /// Returns whether this error reports malformed source text.
    #[must_use]
    pub const fn is_parse_error(&self) -> bool {
        matches!(self, Self::ParseError { .. } | Self::InvalidSnippet { .. })
    }
}
