//! Locates dictionary literals in script source using Tree-sitter.

use tree_sitter::{
    Node,
    Query,
    QueryCursor,
    QueryMatch,
    StreamingIterator,
    Tree,
};

use super::query_loader::{
    load_query,
    query_name,
};
use super::types::{
    CaptureName,
    LiteralMatch,
    LocateError,
};
use crate::input::SourceLanguage;
use crate::types::{
    ByteSpan,
    SourcePosition,
};

/// Extracts text content from a tree-sitter node
fn extract_node_text<'a>(node: Node<'_>, source_bytes: &'a [u8]) -> Option<&'a str> {
    node.utf8_text(source_bytes).ok()
}

/// Finds the start of the first `ERROR` or `MISSING` node in a tree with errors.
fn first_error_offset(root: Node<'_>) -> usize {
    let mut cursor = root.walk();
    loop {
        let node = cursor.node();
        if node.is_error() || node.is_missing() {
            return node.start_byte();
        }
        if node.has_error() && cursor.goto_first_child() {
            continue;
        }
        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return root.start_byte();
            }
        }
    }
}

/// Parses `source` as `language`.
pub(super) fn parse_tree(source: &str, language: SourceLanguage) -> Result<Tree, LocateError> {
    let mut parser = tree_sitter::Parser::new();
    parser.set_language(&language.tree_sitter_language()).map_err(LocateError::LanguageSetup)?;
    parser.parse(source, None).ok_or(LocateError::ParseFailed)
}

/// A parsed script, ready to be searched for dictionary literals.
#[derive(Debug)]
pub struct DictionaryLocator<'s> {
    /// Text of the script.
    source: &'s str,
    /// Syntax tree of `source`.
    tree: Tree,
    /// Cached dictionary query.
    query: &'static Query,
}

impl<'s> DictionaryLocator<'s> {
    /// Parses a whole script.
    ///
    /// # Errors
    /// Returns `LocateError::Syntax` if the script does not parse cleanly; a
    /// file with syntax errors is rejected as a whole.
    pub fn parse(source: &'s str) -> Result<Self, LocateError> {
        let query = load_query(SourceLanguage::JavaScript)
            .ok_or(LocateError::QueryUnavailable { name: query_name(SourceLanguage::JavaScript) })?;
        let tree = parse_tree(source, SourceLanguage::JavaScript)?;

        let root = tree.root_node();
        if root.has_error() {
            let position = SourcePosition::at_offset(source, first_error_offset(root));
            return Err(LocateError::Syntax { position });
        }

        Ok(Self { source, tree, query })
    }

    /// Yields every literal assigned to one of `identifiers`, in source order.
    ///
    /// The sequence is produced lazily from `cursor` and cannot be restarted.
    pub fn matches<'a>(
        &'a self,
        cursor: &'a mut QueryCursor,
        identifiers: &'a [String],
    ) -> impl Iterator<Item = LiteralMatch> + 'a {
        let source_bytes = self.source.as_bytes();
        let query = self.query;
        let mut matches = cursor.matches(query, self.tree.root_node(), source_bytes);

        std::iter::from_fn(move || {
            while let Some(match_) = matches.next() {
                if let Some(literal) = literal_from_match(query, match_, source_bytes, identifiers)
                {
                    return Some(literal);
                }
            }
            None
        })
    }
}

/// Builds a `LiteralMatch` from one query match, if it names a dictionary identifier.
fn literal_from_match(
    query: &Query,
    match_: &QueryMatch<'_, '_>,
    source_bytes: &[u8],
    identifiers: &[String],
) -> Option<LiteralMatch> {
    let cap_names = query.capture_names();
    let mut identifier = None;
    let mut statement = None;
    let mut value = None;

    for capture in match_.captures {
        let Some(cap_name) = cap_names.get(capture.index as usize) else {
            continue;
        };
        let Ok(capture_name) = cap_name.parse::<CaptureName>() else {
            continue;
        };

        match capture_name {
            CaptureName::DictionaryName => {
                identifier = extract_node_text(capture.node, source_bytes);
            }
            CaptureName::DictionaryStatement => {
                statement = Some(ByteSpan::from_node(&capture.node));
            }
            CaptureName::DictionaryValue => {
                value = Some(ByteSpan::from_node(&capture.node));
            }
            CaptureName::ScriptText => {}
        }
    }

    let identifier = identifier?;
    if !identifiers.iter().any(|name| name == identifier) {
        return None;
    }

    Some(LiteralMatch { identifier: identifier.to_string(), statement: statement?, value: value? })
}
