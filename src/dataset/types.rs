//! Types for the dataset module

use std::collections::BTreeMap;

use serde_json::{
    Map,
    Value,
};
use thiserror::Error;

/// Translations of one locale, keyed by qualified key.
pub type LocaleEntries = Map<String, Value>;

/// Translations of one file: local key → locale → translation.
pub type FileTranslations = BTreeMap<String, Map<String, Value>>;

/// Errors raised while reading, shaping or writing datasets.
#[derive(Error, Debug)]
pub enum DatasetError {
    /// The file could not be read or written.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// The file is not valid JSON.
    #[error("Syntax error: {0}")]
    Syntax(String),
    /// A dataset or literal is not a JSON object.
    #[error("Expected a JSON object, found {found}")]
    NotAnObject {
        /// Kind of the value that was found instead.
        found: &'static str,
    },
    /// Entries could not be rendered.
    #[error("Failed to serialize dataset: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Describes the JSON type of `value` for error messages.
pub(super) const fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
