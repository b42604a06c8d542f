//! Inline style declarations and property-name casing.

use std::str::FromStr;

use crate::error::StyleError;

/// One `property: value` pair with a kebab-case property name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Declaration {
    /// Property name in kebab-case, e.g. `background-color`.
    pub property: String,
    /// Value with surrounding whitespace removed.
    pub value: String,
}

impl Declaration {
    /// Creates a declaration, normalising the property name to kebab-case.
    #[must_use]
    pub fn new(property: &str, value: &str) -> Self {
        Self {
            property: to_kebab_case(property.trim()),
            value: value.trim().to_owned(),
        }
    }

    /// Returns the property name in camelCase, as used by object styles.
    #[must_use]
    pub fn camel_property(&self) -> String {
        to_camel_case(&self.property)
    }
}

impl FromStr for Declaration {
    type Err = StyleError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let (property, value) = text
            .split_once(':')
            .ok_or_else(|| StyleError::malformed(text.trim()))?;
        if property.trim().is_empty() {
            return Err(StyleError::empty_property(text.trim()));
        }
        Ok(Self::new(property, value))
    }
}

/// Parses a `style="..."` attribute value.
///
/// Semicolons inside parentheses or quotes (for example in `url(...)`) do not
/// end a declaration. Empty declarations are skipped.
///
/// # Errors
///
/// Returns [`StyleError`] for a declaration without a `:` or without a
/// property name.
pub fn parse_inline_style(text: &str) -> Result<Vec<Declaration>, StyleError> {
    split_declarations(text)
        .into_iter()
        .filter(|part| !part.trim().is_empty())
        .map(str::parse)
        .collect()
}

fn split_declarations(text: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0_usize;
    let mut quote: Option<char> = None;
    let mut start = 0;
    for (index, ch) in text.char_indices() {
        match (quote, ch) {
            (Some(open), c) if c == open => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(ch),
            (None, '(') => depth = depth.saturating_add(1),
            (None, ')') => depth = depth.saturating_sub(1),
            (None, ';') if depth == 0 => {
                parts.push(text.get(start..index).unwrap_or_default());
                start = index.saturating_add(1);
            }
            _ => {}
        }
    }
    parts.push(text.get(start..).unwrap_or_default());
    parts
}

/// Converts a CSS property name to its camelCase object key.
///
/// Custom properties (`--gap`) are returned unchanged and vendor prefixes
/// become capitalised (`-webkit-line-clamp` to `WebkitLineClamp`).
#[must_use]
pub fn to_camel_case(property: &str) -> String {
    if property.starts_with("--") {
        return property.to_owned();
    }
    let vendor = property.starts_with('-');
    let mut out = String::with_capacity(property.len());
    for (index, part) in property.trim_start_matches('-').split('-').enumerate() {
        if index == 0 && !vendor {
            out.push_str(part);
        } else {
            let mut chars = part.chars();
            if let Some(first) = chars.next() {
                out.extend(first.to_uppercase());
                out.push_str(chars.as_str());
            }
        }
    }
    out
}

/// Converts a camelCase object key to its CSS property name.
///
/// Names that already contain a hyphen are lower-cased and returned.
#[must_use]
pub fn to_kebab_case(property: &str) -> String {
    if property.contains('-') {
        return property.to_ascii_lowercase();
    }
    let mut out = String::with_capacity(property.len().saturating_add(4));
    // Vendor keys start upper-case (`WebkitTransition`), which yields the
    // leading hyphen.
    for ch in property.chars() {
        if ch.is_ascii_uppercase() {
            out.push('-');
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}
