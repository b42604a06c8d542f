//! Request and result contract.
//!
//! These types are what the HTTP layer receives from the browser overlay
//! and sends back. Field names are camelCase on the wire.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::{EngineError, ErrorKind};

/// Identifies an element by its stable id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IdHint {
    /// The id alone; the first element carrying it is chosen.
    Plain(String),
    /// The id and which of the elements sharing it to choose.
    Instance {
        /// The stable id.
        id: String,
        /// Zero-based index among elements sharing the id.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        instance: Option<usize>,
    },
}

impl IdHint {
    /// Returns the id.
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Plain(id) | Self::Instance { id, .. } => id,
        }
    }

    /// Returns the requested instance, defaulting to the first.
    #[must_use]
    pub fn instance(&self) -> usize {
        match self {
            Self::Plain(_) => 0,
            Self::Instance { instance, .. } => instance.unwrap_or_default(),
        }
    }
}

/// A click position: one-based line, zero-based UTF-16 column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionHint {
    /// One-based line.
    pub line: u32,
    /// Zero-based column in UTF-16 code units.
    pub column: u32,
}

/// Rendered text of the element to find.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextHint {
    /// The text as the user saw it before editing.
    pub original: String,
    /// Only consider elements with this name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag_name_filter: Option<String>,
}

/// Current class attribute of the element to find.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassHint {
    /// The full class attribute value.
    pub value: String,
    /// Only consider elements with this name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag_name_filter: Option<String>,
}

/// Hints for finding the target element.
///
/// Any subset may be present. They are tried in the order position, text,
/// id, class name; the first that resolves wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocatorCriteria {
    /// Stable-id hint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub by_id: Option<IdHint>,
    /// Position hint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub by_position: Option<PositionHint>,
    /// Text hint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub by_text: Option<TextHint>,
    /// Class hint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub by_class_name: Option<ClassHint>,
}

impl LocatorCriteria {
    /// Locates by stable id.
    #[must_use]
    pub fn id(id: impl Into<String>) -> Self {
        Self {
            by_id: Some(IdHint::Plain(id.into())),
            ..Self::default()
        }
    }

    /// Locates by position.
    #[must_use]
    pub fn position(line: u32, column: u32) -> Self {
        Self {
            by_position: Some(PositionHint { line, column }),
            ..Self::default()
        }
    }

    /// Locates by rendered text.
    #[must_use]
    pub fn text(original: impl Into<String>) -> Self {
        Self {
            by_text: Some(TextHint {
                original: original.into(),
                tag_name_filter: None,
            }),
            ..Self::default()
        }
    }

    /// Locates by class attribute value.
    #[must_use]
    pub fn class_name(value: impl Into<String>) -> Self {
        Self {
            by_class_name: Some(ClassHint {
                value: value.into(),
                tag_name_filter: None,
            }),
            ..Self::default()
        }
    }

    /// Returns whether no hint is present.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.by_id.is_none()
            && self.by_position.is_none()
            && self.by_text.is_none()
            && self.by_class_name.is_none()
    }
}

/// Where a snippet is inserted relative to the target.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum InsertPosition {
    /// As the previous sibling.
    Before,
    /// As the next sibling.
    After,
    /// As the first child.
    FirstChild,
    /// As the last child.
    LastChild,
}

/// Value written by an attribute operation. JSON `null` removes the
/// attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    /// A string value.
    Text(String),
    /// `true` writes a presence-only attribute; `false` removes it.
    Flag(bool),
}

/// Class and inline-style changes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StyleOp {
    /// Replaces the whole class list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    /// Classes merged into the list; conflicting classes are replaced.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub add_classes: Vec<String>,
    /// Classes removed from the list.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub remove_classes: Vec<String>,
    /// Inline style properties; an empty value removes the property.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub style: BTreeMap<String, String>,
}

/// An edit to apply to the located node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Operation {
    /// Replace the element's text.
    Text {
        /// The new text.
        text: String,
    },
    /// Edit classes and inline style.
    Style(StyleOp),
    /// Set or remove one attribute.
    Attribute {
        /// Attribute name.
        name: String,
        /// New value; absent or `null` removes the attribute.
        #[serde(default)]
        value: Option<AttributeValue>,
    },
    /// Remove the element.
    Remove,
    /// Insert markup next to or inside the element.
    #[serde(rename_all = "camelCase")]
    Insert {
        /// Markup to insert.
        markup_snippet: String,
        /// Where to insert it.
        position: InsertPosition,
    },
    /// Replace the element with other markup.
    Replace {
        /// Markup holding exactly one element.
        markup: String,
    },
    /// Wrap the element in a new element.
    Wrap {
        /// Name of the wrapper element.
        element: String,
        /// Attributes of the wrapper.
        #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
        attributes: BTreeMap<String, String>,
    },
    /// Replace the element with its children.
    Unwrap,
}

impl Operation {
    /// Returns the wire name of the operation.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Text { .. } => "text",
            Self::Style(_) => "style",
            Self::Attribute { .. } => "attribute",
            Self::Remove => "remove",
            Self::Insert { .. } => "insert",
            Self::Replace { .. } => "replace",
            Self::Wrap { .. } => "wrap",
            Self::Unwrap => "unwrap",
        }
    }
}

/// One edit of one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformRequest {
    /// Current content of the file.
    pub source_text: String,
    /// File identifier; its extension selects the grammar.
    pub file_path: String,
    /// How to find the target.
    pub locator: LocatorCriteria,
    /// What to do to it.
    pub operation: Operation,
}

/// Which locator strategy resolved the target.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum Strategy {
    /// Click position.
    Position,
    /// Rendered text.
    Text,
    /// Stable id.
    Id,
    /// Class attribute value.
    ClassName,
    /// String literal in a data source, for text edits.
    DataSource,
}

/// Kind of a recorded change.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ChangeKind {
    /// Something was created.
    Add,
    /// Something was changed in place.
    Modify,
    /// Something was deleted.
    Remove,
}

/// One change made by a transformation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeRecord {
    /// What happened.
    pub kind: ChangeKind,
    /// Node path as `/i/j/k`, with `@name` for attribute changes.
    pub path: String,
    /// Previous value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_value: Option<String>,
    /// New value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_value: Option<String>,
}

impl ChangeRecord {
    /// Records an addition.
    #[must_use]
    pub fn add(path: impl Into<String>, new_value: impl Into<String>) -> Self {
        Self {
            kind: ChangeKind::Add,
            path: path.into(),
            old_value: None,
            new_value: Some(new_value.into()),
        }
    }

    /// Records an in-place change.
    #[must_use]
    pub fn modify(
        path: impl Into<String>,
        old_value: impl Into<String>,
        new_value: impl Into<String>,
    ) -> Self {
        Self {
            kind: ChangeKind::Modify,
            path: path.into(),
            old_value: Some(old_value.into()),
            new_value: Some(new_value.into()),
        }
    }

    /// Records a removal.
    #[must_use]
    pub fn remove(path: impl Into<String>, old_value: impl Into<String>) -> Self {
        Self {
            kind: ChangeKind::Remove,
            path: path.into(),
            old_value: Some(old_value.into()),
            new_value: None,
        }
    }
}

/// Outcome of one transformation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformResult {
    /// Whether the edit was applied.
    pub success: bool,
    /// The edited file, on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_source_text: Option<String>,
    /// Failure message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Failure category.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<ErrorKind>,
    /// Changes made, in order.
    #[serde(default)]
    pub changes: Vec<ChangeRecord>,
    /// Strategy that found the target.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strategy: Option<Strategy>,
}

impl TransformResult {
    /// Builds a successful result.
    #[must_use]
    pub const fn succeeded(
        new_source_text: String,
        changes: Vec<ChangeRecord>,
        strategy: Strategy,
    ) -> Self {
        Self {
            success: true,
            new_source_text: Some(new_source_text),
            error: None,
            error_kind: None,
            changes,
            strategy: Some(strategy),
        }
    }

    /// Builds a failed result.
    #[must_use]
    pub fn failed(error: &EngineError) -> Self {
        Self {
            success: false,
            new_source_text: None,
            error: Some(error.to_string()),
            error_kind: Some(error.kind()),
            changes: Vec::new(),
            strategy: None,
        }
    }
}

/// One edit within a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchEdit {
    /// How to find the target.
    pub locator: LocatorCriteria,
    /// What to do to it.
    pub operation: Operation,
}

/// A sequence of edits to one file, applied in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchTransformRequest {
    /// Content of the file before the first edit.
    pub source_text: String,
    /// File identifier.
    pub file_path: String,
    /// Edits in application order.
    pub edits: Vec<BatchEdit>,
}

/// Outcome of a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchTransformResult {
    /// Whether every edit was applied.
    pub success: bool,
    /// Output of the last successful edit, or the input if none succeeded.
    pub new_source_text: String,
    /// One result per attempted edit.
    pub results: Vec<TransformResult>,
    /// Index of the edit that failed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failed_at: Option<usize>,
}

/// A selectable element, as listed by [`crate::TransformEngine::find_nodes`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeInfo {
    /// Node path as `/i/j/k`.
    pub path: String,
    /// Stable id, when the element carries one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stable_id: Option<String>,
    /// Element name, e.g. `div` or `Card.Header`.
    pub element_name: String,
    /// Attribute values; presence-only attributes read `true` and
    /// expressions keep their source text.
    pub attributes: BTreeMap<String, String>,
    /// Whitespace-normalised direct text.
    pub text: String,
    /// Number of content children.
    pub child_count: usize,
    /// One-based line of the element start.
    pub line: u32,
    /// Zero-based UTF-16 column of the element start.
    pub column: u32,
    /// Depth in the syntax tree; the root is zero.
    pub depth: usize,
}
