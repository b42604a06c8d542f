//! Ordered class-list tokens.

use std::fmt;

/// Class tokens in source order.
///
/// Duplicates are allowed so callers can observe and remove them; see
/// [`crate::deduplicate`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ClassList {
    tokens: Vec<String>,
}

impl ClassList {
    /// Creates an empty list.
    #[must_use]
    pub const fn new() -> Self {
        Self { tokens: Vec::new() }
    }

    /// Splits a class attribute value on whitespace.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        value.split_whitespace().collect()
    }

    /// Returns the tokens in order.
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.tokens
    }

    /// Returns an iterator over the tokens.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str)
    }

    /// Returns the number of tokens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Returns whether the list has no tokens.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Returns whether `class` is present.
    #[must_use]
    pub fn contains(&self, class: &str) -> bool {
        self.tokens.iter().any(|token| token == class)
    }

    /// Appends `class`.
    pub fn push(&mut self, class: impl Into<String>) {
        self.tokens.push(class.into());
    }

    /// Removes every occurrence of `class`. Returns whether any was present.
    pub fn remove(&mut self, class: &str) -> bool {
        let before = self.tokens.len();
        self.tokens.retain(|token| token != class);
        self.tokens.len() != before
    }

    /// Keeps only tokens for which `keep` returns `true`.
    pub fn retain(&mut self, mut keep: impl FnMut(&str) -> bool) {
        self.tokens.retain(|token| keep(token));
    }

    /// Consumes the list, returning its tokens.
    #[must_use]
    pub fn into_vec(self) -> Vec<String> {
        self.tokens
    }
}

impl fmt::Display for ClassList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tokens.join(" "))
    }
}

impl<S: Into<String>> FromIterator<S> for ClassList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            tokens: iter.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_splits_on_any_whitespace() {
        let list = ClassList::parse("  flex\n\tp-4  text-sm ");
        assert_eq!(list.as_slice(), ["flex", "p-4", "text-sm"]);
        assert_eq!(list.to_string(), "flex p-4 text-sm");
    }

    #[test]
    fn remove_drops_every_occurrence() {
        let mut list = ClassList::parse("a b a");
        assert!(list.remove("a"));
        assert!(!list.remove("a"));
        assert_eq!(list.as_slice(), ["b"]);
    }
}
