//! Locate-and-edit engine for markup embedded in TSX/JSX source files.
//!
//! A browser overlay reports what the user clicked (a position, the text
//! they saw, the element's class list or an embedded stable id) and what
//! they want changed. [`TransformEngine`] finds the element in the source,
//! applies the edit to its syntax tree and prints the file back, keeping
//! every untouched byte as it was.
//!
//! - **Locating** tries position, text, id and class hints in that order;
//!   text edits that match no markup fall back to string literals in data
//!   arrays and objects
//! - **Editing** covers text, class and inline style, single attributes,
//!   and structural edits (remove, insert, replace, wrap, unwrap)
//! - **Batches** apply edits sequentially so later hints see earlier output
//!
//! ```
//! use stitch_engine::{LocatorCriteria, Operation, TransformEngine, TransformRequest};
//!
//! let engine = TransformEngine::default();
//! let result = engine.transform(&TransformRequest {
//!     source_text: "const A = () => <h1>Hello</h1>;\n".to_owned(),
//!     file_path: "A.tsx".to_owned(),
//!     locator: LocatorCriteria::text("Hello"),
//!     operation: Operation::Text { text: "Welcome".to_owned() },
//! });
//! assert_eq!(
//!     result.new_source_text.as_deref(),
//!     Some("const A = () => <h1>Welcome</h1>;\n")
//! );
//! ```

mod config;
mod data_source;
pub mod defaults;
mod element;
mod engine;
mod error;
mod locator;
mod mutate;
mod request;

pub use config::{ConfigError, DataSourceConfig, EngineConfig, PositionConfig, TextConfig};
pub use engine::TransformEngine;
pub use error::{EngineError, ErrorKind};
pub use request::{
    AttributeValue, BatchEdit, BatchTransformRequest, BatchTransformResult, ChangeKind,
    ChangeRecord, ClassHint, IdHint, InsertPosition, LocatorCriteria, NodeInfo, Operation,
    PositionHint, Strategy, StyleOp, TextHint, TransformRequest, TransformResult,
};

#[cfg(test)]
mod tests;
