//! Syntax analysis: finding dictionary literals in scripts and markup.
pub mod locator;
pub mod markup;
mod query_loader;
pub mod types;

pub use locator::DictionaryLocator;
pub use markup::ScriptExtractor;
use tree_sitter::QueryCursor;
pub use types::{
    LiteralMatch,
    LocateError,
    ScriptBlock,
};

use crate::input::SourceLanguage;
use crate::types::SourcePosition;

/// Locates every dictionary literal in a file, with document-absolute spans.
///
/// Scripts are searched directly. Markup documents are searched block by
/// block; a block that fails to parse is logged and skipped, and the spans
/// of the remaining blocks are shifted by the block's offset.
///
/// # Errors
/// Returns `LocateError` if the file as a whole cannot be parsed.
pub fn locate_dictionaries(
    text: &str,
    language: SourceLanguage,
    identifiers: &[String],
) -> Result<Vec<LiteralMatch>, LocateError> {
    match language {
        SourceLanguage::JavaScript => {
            let locator = DictionaryLocator::parse(text)?;
            let mut cursor = QueryCursor::new();
            Ok(locator.matches(&mut cursor, identifiers).collect())
        }
        SourceLanguage::Html => {
            let extractor = ScriptExtractor::parse(text)?;
            let mut cursor = QueryCursor::new();
            let mut found = Vec::new();

            for block in extractor.blocks(&mut cursor) {
                let locator = match DictionaryLocator::parse(block.text) {
                    Ok(locator) => locator,
                    Err(e) => {
                        tracing::warn!(
                            "Skipping script block at {}: {e}",
                            SourcePosition::at_offset(text, block.offset)
                        );
                        continue;
                    }
                };
                let mut script_cursor = QueryCursor::new();
                found.extend(
                    locator
                        .matches(&mut script_cursor, identifiers)
                        .map(|literal| literal.shifted(block.offset)),
                );
            }

            Ok(found)
        }
    }
}
