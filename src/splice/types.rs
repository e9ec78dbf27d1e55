//! Types for the splice module

use serde_json::Value;
use thiserror::Error;

use crate::types::ByteSpan;

/// New content for one literal span of a file.
#[derive(Debug, Clone, PartialEq)]
pub struct Replacement {
    /// Span of the literal being replaced
    pub span: ByteSpan,
    /// Whitespace that preceded the statement holding the literal
    pub indent: String,
    /// Data to serialize into the span
    pub value: Value,
}

/// Errors that leave the text unmodified
#[derive(Error, Debug)]
pub enum SpliceError {
    /// A span does not lie on character boundaries inside the text
    #[error("Replacement span {span} is outside the text ({len} bytes)")]
    OutOfBounds {
        /// The rejected span
        span: ByteSpan,
        /// Length of the text in bytes
        len: usize,
    },
    /// Two replacements claim the same bytes
    #[error("Replacement spans {first} and {second} overlap")]
    Overlap {
        /// The span that starts earlier
        first: ByteSpan,
        /// The span that ends later
        second: ByteSpan,
    },
    /// A value could not be rendered as JSON
    #[error("Failed to serialize replacement: {0}")]
    Serialize(#[from] serde_json::Error),
}
