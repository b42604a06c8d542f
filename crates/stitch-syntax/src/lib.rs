//! Tree-sitter powered source trees for markup-in-code files.
//!
//! This crate turns TSX/JSX/TypeScript source into owned, editable trees and
//! back again:
//!
//! - **Parsing** via [`Parser`] and the injectable [`ParseCache`], which
//!   reject malformed input with a located [`SyntaxError::ParseError`]
//! - **Owned trees** ([`SourceTree`], [`Node`]) that keep every byte of
//!   trivia, so untouched code prints byte-identically
//! - **Traversal** via [`traverse`], [`collect`] and [`find`], with
//!   enter/exit hooks, stop/skip control and path-addressed replace/remove
//!   edits
//! - **Printing** via [`render_checked`], which validates output by
//!   re-parsing and falls back to the structural [`pretty_print`]
//!
//! # Supported Languages
//!
//! - TSX, used for `.tsx`, `.jsx`, `.js`, `.mjs`, `.cjs` and for file ids
//!   without a recognised extension
//! - TypeScript (`.ts`, `.mts`, `.cts`)
//!
//! # Example
//!
//! ```
//! use stitch_syntax::{ParseCache, render_checked};
//!
//! let cache = ParseCache::new();
//! let tree = cache.parse("const App = () => <p>Hi</p>;\n", "App.tsx")?;
//! let rendered = render_checked(&tree)?;
//! assert_eq!(rendered.text, "const App = () => <p>Hi</p>;\n");
//! # Ok::<(), stitch_syntax::SyntaxError>(())
//! ```

mod cache;
mod error;
mod language;
mod parser;
mod position;
mod printer;
mod snippet;
mod tree;
mod visit;

pub use cache::{CacheStats, ParseCache};
pub use error::SyntaxError;
pub use language::SupportedLanguage;
pub use parser::{ParseResult, Parser, SyntaxErrorInfo, parse_source};
pub use position::{LineIndex, utf16_prefix_bytes};
pub use printer::{PrinterKind, Rendered, pretty_print, print_tree, render_checked};
pub use snippet::{is_blank_text, parse_markup_snippet, parse_single_element};
pub use tree::{
    MAX_TREE_DEPTH, Node, NodeKind, NodePath, SourceTree, Span, escape_js_string,
    js_string_literal, jsx_attribute, jsx_attribute_value, jsx_closing_element,
    jsx_element_from_self_closing, jsx_expression, jsx_text, jsx_visible_text,
    jsx_wrapper_element, literal_quote, object_literal, static_string_value, unescape_js_string,
};
pub use visit::{
    Completion, DEFAULT_MAX_DEPTH, Edit, EditScript, NodeRef, Traversal, TraversalLimits,
    VisitContext, Visitor, VisitorTable, collect, find, rewrite, traverse,
};

#[cfg(test)]
mod tests;
