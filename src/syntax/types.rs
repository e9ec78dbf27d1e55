//! Types for the syntax module

use std::str::FromStr;

use thiserror::Error;

use crate::types::{
    ByteSpan,
    SourcePosition,
};

/// Capture names used by the tree-sitter queries in `queries/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaptureName {
    /// The whole assignment statement or variable declarator
    DictionaryStatement,
    /// The assigned identifier (e.g., `systemDictionary`)
    DictionaryName,
    /// The assigned expression
    DictionaryValue,
    /// Raw text of an inline `<script>` element
    ScriptText,
}

impl CaptureName {
    /// Capture name as written in the query files.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DictionaryStatement => "dictionary.statement",
            Self::DictionaryName => "dictionary.name",
            Self::DictionaryValue => "dictionary.value",
            Self::ScriptText => "script.text",
        }
    }
}

/// Error converting a string into a `CaptureName`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseCaptureNameError;

impl FromStr for CaptureName {
    type Err = ParseCaptureNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dictionary.statement" => Ok(Self::DictionaryStatement),
            "dictionary.name" => Ok(Self::DictionaryName),
            "dictionary.value" => Ok(Self::DictionaryValue),
            "script.text" => Ok(Self::ScriptText),
            _ => Err(ParseCaptureNameError),
        }
    }
}

/// A located dictionary literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiteralMatch {
    /// The identifier the literal is assigned to.
    pub identifier: String,
    /// The whole statement or declarator; its line gives the indentation.
    pub statement: ByteSpan,
    /// The right-hand side / initializer expression.
    pub value: ByteSpan,
}

impl LiteralMatch {
    /// Translates script-relative spans into document-absolute ones.
    #[must_use]
    pub fn shifted(self, offset: usize) -> Self {
        Self {
            identifier: self.identifier,
            statement: self.statement.shifted(offset),
            value: self.value.shifted(offset),
        }
    }
}

/// Text of an inline script and where it starts in its document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptBlock<'a> {
    /// Raw script text.
    pub text: &'a str,
    /// Byte offset of `text` in the document.
    pub offset: usize,
}

/// Errors that may occur while locating dictionary literals
#[derive(Error, Debug)]
pub enum LocateError {
    /// Error when failing to set the language for the parser
    #[error("Failed to set language for parser: {0}")]
    LanguageSetup(#[from] tree_sitter::LanguageError),
    /// Error when failing to compile a bundled query
    #[error("Failed to load {name} query")]
    QueryUnavailable {
        /// Name of the query
        name: &'static str,
    },
    /// Error when tree-sitter produced no tree
    #[error("Failed to parse source code")]
    ParseFailed,
    /// The source contains syntax errors
    #[error("Syntax error at {position}")]
    Syntax {
        /// Start of the first erroneous node
        position: SourcePosition,
    },
}
