//! Settings and configuration errors.

use serde::Deserialize;
use thiserror::Error;

/// A single rejected setting.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "includePatterns[0]")
    pub field_path: String,
    /// What is wrong with the value.
    pub message: String,
}

impl ValidationError {
    /// Creates an error for the setting at `field_path`.
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

/// Errors raised while loading `.ioblate.json`.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// One or more settings failed validation.
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    /// The file exists but could not be read.
    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    /// The file is not valid JSON with comments.
    #[error("Failed to parse configuration: {0}")]
    SyntaxError(String),

    /// The document does not match the settings schema.
    #[error("Invalid configuration: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Numbered list of validation errors, one per line.
fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

/// When markup documents are scanned during `load`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum MarkupScan {
    /// Only when no script file contained a dictionary literal.
    #[default]
    Fallback,
    /// After the scripts, on every run.
    Always,
    /// Not at all.
    Never,
}

/// Workspace settings, read from `.ioblate.json` in camelCase.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Script files searched for dictionary literals.
    pub include_patterns: Vec<String>,
    /// Markup files whose inline scripts are searched.
    pub markup_patterns: Vec<String>,
    /// Paths skipped for both scripts and markup.
    pub exclude_patterns: Vec<String>,

    /// When markup documents are scanned during `load`.
    pub markup_scan: MarkupScan,

    /// Directory (relative to the workspace root) holding `words-<locale>.json`.
    pub output_dir: String,

    /// Variable names whose assigned object literal is the dictionary.
    pub identifiers: Vec<String>,

    /// Indent width of regenerated literals.
    pub indent_width: usize,

    /// Encoding label used for files that are not valid UTF-8.
    pub fallback_encoding: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            include_patterns: vec!["**/*.js".to_string()],
            markup_patterns: vec!["**/*.htm".to_string(), "**/*.html".to_string()],
            exclude_patterns: vec!["node_modules/**".to_string()],
            markup_scan: MarkupScan::default(),
            output_dir: "i18n".to_string(),
            identifiers: vec!["systemDictionary".to_string(), "_systemDictionary".to_string()],
            indent_width: 2,
            fallback_encoding: "windows-1251".to_string(),
        }
    }
}

/// Largest accepted `indentWidth`.
const MAX_INDENT_WIDTH: usize = 8;

/// Returns true if `name` is a plain JavaScript identifier (ASCII subset).
fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

impl Settings {
    /// # Errors
    /// - Required field is empty
    /// - Invalid glob pattern
    /// - Invalid identifier, indent width or encoding label
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.include_patterns.is_empty() {
            errors.push(ValidationError::new(
                "includePatterns",
                "At least one pattern is required. Example: [\"**/*.js\"]",
            ));
        }

        for (field, patterns) in [
            ("includePatterns", &self.include_patterns),
            ("markupPatterns", &self.markup_patterns),
            ("excludePatterns", &self.exclude_patterns),
        ] {
            for (index, pattern) in patterns.iter().enumerate() {
                if let Err(e) = globset::Glob::new(pattern) {
                    errors.push(ValidationError::new(
                        format!("{field}[{index}]"),
                        format!("Invalid glob pattern '{pattern}': {e}"),
                    ));
                }
            }
        }

        if self.output_dir.trim().is_empty() {
            errors.push(ValidationError::new(
                "outputDir",
                "The directory cannot be empty. Example: \"i18n\"",
            ));
        }

        if self.identifiers.is_empty() {
            errors.push(ValidationError::new(
                "identifiers",
                "At least one identifier is required. Example: [\"systemDictionary\"]",
            ));
        }

        for (index, name) in self.identifiers.iter().enumerate() {
            if !is_identifier(name) {
                errors.push(ValidationError::new(
                    format!("identifiers[{index}]"),
                    format!("'{name}' is not a valid JavaScript identifier"),
                ));
            }
        }

        if !(1..=MAX_INDENT_WIDTH).contains(&self.indent_width) {
            errors.push(ValidationError::new(
                "indentWidth",
                format!("Must be between 1 and {MAX_INDENT_WIDTH}, got {}", self.indent_width),
            ));
        }

        if encoding_rs::Encoding::for_label(self.fallback_encoding.as_bytes()).is_none() {
            errors.push(ValidationError::new(
                "fallbackEncoding",
                format!("Unknown encoding label '{}'", self.fallback_encoding),
            ));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}
