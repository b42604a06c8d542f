//! Printing owned trees back to source text.
//!
//! The primary printer is lossless: it concatenates every node's trivia and
//! text, so untouched regions come back byte-identical. Every printed result
//! is re-parsed before it is returned. If the lossless output does not
//! parse (an edit produced a shape the grammar rejects), the structural
//! [`pretty_print`] fallback is tried and validated the same way.

mod pretty;

use std::fmt;

use tracing::{debug, warn};

use crate::error::SyntaxError;
use crate::parser::Parser;
use crate::tree::SourceTree;

pub use pretty::pretty_print;

const PRINT_TARGET: &str = "stitch_syntax::printer";

/// Which printer produced a rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrinterKind {
    /// The trivia-preserving printer.
    Lossless,
    /// The structural fallback printer.
    Fallback,
}

impl fmt::Display for PrinterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Lossless => "lossless",
            Self::Fallback => "fallback",
        })
    }
}

/// Validated output of [`render_checked`].
#[derive(Debug, Clone)]
pub struct Rendered {
    /// The printed source text.
    pub text: String,
    /// The tree re-parsed from `text`.
    pub tree: SourceTree,
    /// The printer that produced `text`.
    pub printer: PrinterKind,
}

/// Prints `tree` losslessly without validation.
#[must_use]
pub fn print_tree(tree: &SourceTree) -> String {
    tree.to_source()
}

/// Prints `tree` and proves the output parses.
///
/// # Errors
///
/// Returns [`SyntaxError::PrintError`] when neither printer yields text that
/// parses, or a parser initialisation error.
pub fn render_checked(tree: &SourceTree) -> Result<Rendered, SyntaxError> {
    let language = tree.language();
    let mut parser = Parser::new(language)?;

    let primary = print_tree(tree);
    let primary_err = match parser.parse_tree(&primary) {
        Ok(reparsed) => {
            debug!(target: PRINT_TARGET, bytes = primary.len(), "printed losslessly");
            return Ok(Rendered {
                text: primary,
                tree: reparsed,
                printer: PrinterKind::Lossless,
            });
        }
        Err(err) => err,
    };

    warn!(
        target: PRINT_TARGET,
        error = %primary_err,
        "lossless output does not parse; using fallback printer"
    );
    let fallback = pretty_print(tree);
    match parser.parse_tree(&fallback) {
        Ok(reparsed) => Ok(Rendered {
            text: fallback,
            tree: reparsed,
            printer: PrinterKind::Fallback,
        }),
        Err(fallback_err) => Err(SyntaxError::print(
            language,
            format!("output does not parse ({primary_err}); fallback also failed ({fallback_err})"),
        )),
    }
}
