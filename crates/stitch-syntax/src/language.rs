//! Grammar selection by file identifier.

use std::fmt;
use std::path::Path;

/// Source dialects the engine can parse.
///
/// `.tsx`, `.jsx` and plain JavaScript files all use the TSX grammar, which
/// accepts markup alongside optional type annotations. `.ts` files get the
/// TypeScript grammar since `<T>expr` casts there are not markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SupportedLanguage {
    /// Script with embedded markup.
    #[default]
    Tsx,
    /// TypeScript without markup.
    TypeScript,
}

impl SupportedLanguage {
    /// Maps a file extension, case-insensitively.
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "tsx" | "jsx" | "js" | "mjs" | "cjs" => Some(Self::Tsx),
            "ts" | "mts" | "cts" => Some(Self::TypeScript),
            _ => None,
        }
    }

    /// Picks the grammar for a caller-supplied file identifier.
    ///
    /// Identifiers need not be real paths; anything without a known
    /// extension is treated as markup-bearing.
    #[must_use]
    pub fn for_file_id(file_id: &str) -> Self {
        Path::new(file_id)
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
            .unwrap_or_default()
    }

    /// The Tree-sitter grammar for this dialect.
    #[must_use]
    pub fn tree_sitter_language(self) -> tree_sitter::Language {
        match self {
            Self::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
            Self::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
        }
    }
}

impl fmt::Display for SupportedLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Tsx => "tsx",
            Self::TypeScript => "typescript",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("tsx", Some(SupportedLanguage::Tsx))]
    #[case("JSX", Some(SupportedLanguage::Tsx))]
    #[case("cjs", Some(SupportedLanguage::Tsx))]
    #[case("mts", Some(SupportedLanguage::TypeScript))]
    #[case("css", None)]
    fn extensions_select_a_grammar(
        #[case] ext: &str,
        #[case] expected: Option<SupportedLanguage>,
    ) {
        assert_eq!(SupportedLanguage::from_extension(ext), expected);
    }

    #[rstest]
    #[case("src/App.tsx", SupportedLanguage::Tsx)]
    #[case("src/util.ts", SupportedLanguage::TypeScript)]
    #[case("file-42", SupportedLanguage::Tsx)]
    #[case("styles.css", SupportedLanguage::Tsx)]
    fn file_ids_default_to_markup_dialect(
        #[case] file_id: &str,
        #[case] expected: SupportedLanguage,
    ) {
        assert_eq!(SupportedLanguage::for_file_id(file_id), expected);
    }
}
