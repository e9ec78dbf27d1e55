//! Load Tree-sitter queries from files.

use std::sync::OnceLock;

use tree_sitter::Query;

use crate::input::SourceLanguage;

/// A bundled query file.
struct QueryFile {
    /// Query source.
    content: &'static str,
    /// Name used in log messages.
    name: &'static str,
}

/// Finds dictionary assignments in scripts.
const DICTIONARY_QUERY: QueryFile = QueryFile {
    content: include_str!("../../queries/javascript/dictionary.scm"),
    name: "dictionary",
};

/// Finds inline script text in markup.
const SCRIPT_QUERY: QueryFile =
    QueryFile { content: include_str!("../../queries/html/script.scm"), name: "script" };

/// Compiled once per process.
static DICTIONARY_QUERY_CACHE: OnceLock<Option<Query>> = OnceLock::new();
/// Compiled once per process.
static SCRIPT_QUERY_CACHE: OnceLock<Option<Query>> = OnceLock::new();

/// Compiles a bundled query, logging why it failed if it does.
fn parse_query(language: SourceLanguage, query_file: &QueryFile) -> Option<Query> {
    Query::new(&language.tree_sitter_language(), query_file.content)
        .map_err(|e| tracing::error!("Failed to parse {} query: {e:?}", query_file.name))
        .ok()
}

/// Name of the query used for `language`, for error reporting.
#[must_use]
pub const fn query_name(language: SourceLanguage) -> &'static str {
    match language {
        SourceLanguage::JavaScript => DICTIONARY_QUERY.name,
        SourceLanguage::Html => SCRIPT_QUERY.name,
    }
}

/// Loads the cached query for a language. Queries are parsed once per language.
///
/// Scripts get the dictionary query, markup documents the inline-script query.
#[must_use]
pub fn load_query(language: SourceLanguage) -> Option<&'static Query> {
    match language {
        SourceLanguage::JavaScript => DICTIONARY_QUERY_CACHE
            .get_or_init(|| parse_query(SourceLanguage::JavaScript, &DICTIONARY_QUERY))
            .as_ref(),
        SourceLanguage::Html => SCRIPT_QUERY_CACHE
            .get_or_init(|| parse_query(SourceLanguage::Html, &SCRIPT_QUERY))
            .as_ref(),
    }
}
