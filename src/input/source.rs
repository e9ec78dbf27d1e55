//! Source file kinds.

use std::path::Path;

/// Languages a dictionary literal can be embedded in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceLanguage {
    /// A plain script file, parsed directly.
    JavaScript,
    /// A markup document whose inline `<script>` blocks are parsed.
    Html,
}

impl SourceLanguage {
    /// Infers the language from the file extension (case-insensitive).
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "js" | "mjs" | "cjs" => Some(Self::JavaScript),
            "htm" | "html" => Some(Self::Html),
            _ => None,
        }
    }

    /// Grammar used to parse files of this language.
    #[must_use]
    pub fn tree_sitter_language(&self) -> tree_sitter::Language {
        match self {
            Self::JavaScript => tree_sitter_javascript::LANGUAGE.into(),
            Self::Html => tree_sitter_html::LANGUAGE.into(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::expect_used, clippy::panic)]
mod tests {
    use rstest::*;

    use super::*;

    #[rstest]
    #[case::js("widget.js", Some(SourceLanguage::JavaScript))]
    #[case::upper_js("WIDGET.JS", Some(SourceLanguage::JavaScript))]
    #[case::mjs("lib/words.mjs", Some(SourceLanguage::JavaScript))]
    #[case::htm("admin/index.htm", Some(SourceLanguage::Html))]
    #[case::html("www/tab.HTML", Some(SourceLanguage::Html))]
    #[case::multiple_dots("words.min.js", Some(SourceLanguage::JavaScript))]
    #[case::json("i18n/words-en.json", None)]
    #[case::no_ext("Makefile", None)]
    #[case::typescript("widget.ts", None)]
    fn test_from_path(#[case] path: &str, #[case] expected: Option<SourceLanguage>) {
        assert_eq!(SourceLanguage::from_path(Path::new(path)), expected);
    }
}
