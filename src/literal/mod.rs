//! Literal evaluation: turning a located dictionary literal into data.
//!
//! Only literal syntax is understood. Anything that would need a binding or
//! a computation is rejected instead of being run.
mod evaluator;
mod string;
pub mod types;

pub use evaluator::evaluate_expression;
use serde_json::Value;
pub use types::EvaluationError;

use crate::types::ByteSpan;

/// Evaluates the literal at `span` in `source`.
///
/// # Errors
/// Returns `EvaluationError::OutOfBounds` for a span outside `source`, and
/// any error of [`evaluate_expression`] for the text it covers.
pub fn evaluate(source: &str, span: ByteSpan) -> Result<Value, EvaluationError> {
    let text = span
        .slice(source)
        .ok_or(EvaluationError::OutOfBounds { span, len: source.len() })?;
    evaluate_expression(text)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    use super::*;
    use crate::input::SourceLanguage;
    use crate::syntax::locate_dictionaries;

    #[rstest]
    fn test_evaluate_located_literal() {
        let source = "var systemDictionary = {\n  'Save': {'en': 'Save', 'de': 'Speichern'}\n};\n";
        let identifiers = vec!["systemDictionary".to_string()];
        let found =
            locate_dictionaries(source, SourceLanguage::JavaScript, &identifiers).unwrap();

        let value = evaluate(source, found.first().unwrap().value).unwrap();

        assert_eq!(value, json!({"Save": {"en": "Save", "de": "Speichern"}}));
    }

    #[rstest]
    #[case::past_end(ByteSpan::new(0, 100))]
    #[case::inside_character(ByteSpan::new(1, 3))]
    fn test_span_out_of_bounds(#[case] span: ByteSpan) {
        assert!(matches!(evaluate("ä{}", span), Err(EvaluationError::OutOfBounds { .. })));
    }

    #[rstest]
    fn test_serialized_value_evaluates_to_itself() {
        let value = json!({
            "Hello": {"en": "Hello \"world\"", "ru": "Привет\nмир", "emoji": "😀"},
            "Count": {"en": 3, "list": [1.5, true, null]},
        });
        let text = serde_json::to_string_pretty(&value).unwrap();

        assert_eq!(evaluate_expression(&text).unwrap(), value);
    }
}
