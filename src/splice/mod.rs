//! Writing literal values back into source text.
pub mod types;

use serde::Serialize;
use serde_json::Value;
use serde_json::ser::{
    PrettyFormatter,
    Serializer,
};
pub use types::{
    Replacement,
    SpliceError,
};

use crate::types::ByteSpan;

/// Returns the leading run of spaces and tabs of the line containing `offset`.
///
/// Only the part of the line before `offset` is considered. A statement
/// that follows other code on its line gets the indentation of that line.
#[must_use]
pub fn line_indent(text: &str, offset: usize) -> String {
    let before = text.get(..offset).unwrap_or(text);
    let line_start = before.rfind('\n').map_or(0, |newline| newline + 1);
    let line = before.get(line_start..).unwrap_or_default();
    let code = line.trim_start_matches([' ', '\t']);
    line.get(..line.len() - code.len()).unwrap_or_default().to_string()
}

/// Pretty-prints `value` with `indent_width` spaces per level.
///
/// # Errors
/// Returns `SpliceError::Serialize` if the value cannot be serialized.
pub fn serialize_value(value: &Value, indent_width: usize) -> Result<String, SpliceError> {
    let indent = " ".repeat(indent_width);
    let mut out = Vec::new();
    let formatter = PrettyFormatter::with_indent(indent.as_bytes());
    let mut serializer = Serializer::with_formatter(&mut out, formatter);
    value.serialize(&mut serializer)?;

    // serde_json only emits valid UTF-8
    Ok(String::from_utf8_lossy(&out).into_owned())
}

/// Puts `indent` after every line break so continuation lines line up with
/// the statement.
fn reflow(serialized: &str, indent: &str) -> String {
    if indent.is_empty() {
        return serialized.to_string();
    }
    serialized.replace('\n', &format!("\n{indent}"))
}

/// Applies `replacements` to `original`.
///
/// Replacements are applied by descending end offset so the spans of the
/// ones still pending stay valid. The input order does not matter.
///
/// # Errors
/// Returns `SpliceError` if a span lies outside `original`, two spans
/// overlap, or a value fails to serialize. The text is not partially
/// modified in that case.
pub fn splice(
    original: &str,
    replacements: &[Replacement],
    indent_width: usize,
) -> Result<String, SpliceError> {
    let mut ordered: Vec<&Replacement> = replacements.iter().collect();
    ordered.sort_by(|a, b| b.span.end.cmp(&a.span.end).then(b.span.start.cmp(&a.span.start)));

    let mut previous: Option<ByteSpan> = None;
    for replacement in &ordered {
        let span = replacement.span;
        if span.start > span.end || original.get(span.start..span.end).is_none() {
            return Err(SpliceError::OutOfBounds { span, len: original.len() });
        }
        if let Some(later) = previous.filter(|later| span.end > later.start) {
            return Err(SpliceError::Overlap { first: span, second: later });
        }
        previous = Some(span);
    }

    let mut content = original.to_string();
    for replacement in ordered {
        let serialized = serialize_value(&replacement.value, indent_width)?;
        let text = reflow(&serialized, &replacement.indent);
        content.replace_range(replacement.span.start..replacement.span.end, &text);
    }

    Ok(content)
}
