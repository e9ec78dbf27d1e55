//! Extracts inline script blocks from markup documents.

use tree_sitter::{
    Query,
    QueryCursor,
    StreamingIterator,
    Tree,
};

use super::locator::parse_tree;
use super::query_loader::{
    load_query,
    query_name,
};
use super::types::{
    CaptureName,
    LocateError,
    ScriptBlock,
};
use crate::input::SourceLanguage;

/// A parsed markup document.
///
/// Markup parsing is error tolerant; malformed documents still yield the
/// script elements that could be recognised.
#[derive(Debug)]
pub struct ScriptExtractor<'s> {
    /// Text of the document.
    source: &'s str,
    /// Syntax tree of `source`.
    tree: Tree,
    /// Cached script query.
    query: &'static Query,
}

impl<'s> ScriptExtractor<'s> {
    /// Parses a whole markup document.
    pub fn parse(source: &'s str) -> Result<Self, LocateError> {
        let query = load_query(SourceLanguage::Html)
            .ok_or(LocateError::QueryUnavailable { name: query_name(SourceLanguage::Html) })?;
        let tree = parse_tree(source, SourceLanguage::Html)?;

        Ok(Self { source, tree, query })
    }

    /// Yields the text of every `<script>` element, depth first, with the
    /// byte offset at which the text starts in the document.
    pub fn blocks<'a>(
        &'a self,
        cursor: &'a mut QueryCursor,
    ) -> impl Iterator<Item = ScriptBlock<'s>> + 'a {
        let source = self.source;
        let query = self.query;
        let mut matches = cursor.matches(query, self.tree.root_node(), source.as_bytes());

        std::iter::from_fn(move || {
            while let Some(match_) = matches.next() {
                let cap_names = query.capture_names();
                for capture in match_.captures {
                    let is_script_text = cap_names
                        .get(capture.index as usize)
                        .and_then(|name| name.parse::<CaptureName>().ok())
                        == Some(CaptureName::ScriptText);
                    if !is_script_text {
                        continue;
                    }

                    let offset = capture.node.start_byte();
                    if let Some(text) = source.get(offset..capture.node.end_byte()) {
                        return Some(ScriptBlock { text, offset });
                    }
                }
            }
            None
        })
    }
}
