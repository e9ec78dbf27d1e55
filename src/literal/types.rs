//! Types for the literal module

use thiserror::Error;

use crate::types::ByteSpan;

/// Errors raised when a located literal cannot be evaluated as static data
#[derive(Error, Debug)]
pub enum EvaluationError {
    /// The span does not lie on character boundaries inside the source
    #[error("Literal span {span} is outside the source ({len} bytes)")]
    OutOfBounds {
        /// The rejected span
        span: ByteSpan,
        /// Length of the source in bytes
        len: usize,
    },
    /// Error when failing to set the language for the parser
    #[error("Failed to set language for parser: {0}")]
    LanguageSetup(#[from] tree_sitter::LanguageError),
    /// Error when tree-sitter produced no tree
    #[error("Failed to parse literal")]
    ParseFailed,
    /// The text is not syntactically valid
    #[error("Literal contains syntax errors")]
    Syntax,
    /// The text is not exactly one expression
    #[error("Literal is not a single self-contained expression")]
    NotAnExpression,
    /// The expression needs more than plain literal syntax
    #[error("Unsupported {kind} in literal: `{text}`")]
    Unsupported {
        /// Syntax node kind
        kind: String,
        /// Start of the offending text
        text: String,
    },
    /// The expression refers to a binding
    #[error("Literal refers to identifier `{name}`")]
    UnboundIdentifier {
        /// The identifier as written
        name: String,
    },
    /// A numeric literal that does not fit a JSON number
    #[error("Invalid number `{text}`")]
    InvalidNumber {
        /// The literal as written
        text: String,
    },
    /// A malformed escape sequence in a string
    #[error("Invalid escape sequence `{text}`")]
    InvalidEscape {
        /// The escape as written
        text: String,
    },
    /// Objects and arrays nest deeper than the evaluator follows
    #[error("Literal is nested too deeply")]
    TooDeep,
}
