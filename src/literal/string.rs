//! Decoding of JavaScript string and template literal contents.

use tree_sitter::Node;

use super::types::EvaluationError;

/// Code units of a string under construction.
///
/// JavaScript strings are UTF-16; escapes such as `\uD83D\uDE00` only form a
/// character once both halves are present.
#[derive(Debug, Default)]
struct Utf16Buffer {
    /// Code units decoded so far.
    units: Vec<u16>,
}

impl Utf16Buffer {
    /// Appends literal text.
    fn push_str(&mut self, text: &str) {
        self.units.extend(text.encode_utf16());
    }

    /// Appends one character.
    fn push_char(&mut self, c: char) {
        let mut buffer = [0u16; 2];
        self.units.extend_from_slice(c.encode_utf16(&mut buffer));
    }

    /// Appends a code point, keeping surrogate halves as single units.
    ///
    /// Returns false if `code_point` is not a valid code point.
    fn push_code_point(&mut self, code_point: u32) -> bool {
        if let Ok(unit) = u16::try_from(code_point) {
            self.units.push(unit);
            return true;
        }
        char::from_u32(code_point).map(|c| self.push_char(c)).is_some()
    }

    /// Lone surrogates become U+FFFD.
    fn finish(self) -> String {
        String::from_utf16_lossy(&self.units)
    }
}

/// Error for the escape `text`.
fn invalid_escape(text: &str) -> EvaluationError {
    EvaluationError::InvalidEscape { text: text.to_string() }
}

/// Parses the hex digits of the escape `text`.
fn parse_hex(digits: &str, text: &str) -> Result<u32, EvaluationError> {
    u32::from_str_radix(digits, 16).map_err(|_| invalid_escape(text))
}

/// Appends the value of one escape sequence (including its backslash).
fn decode_escape(text: &str, out: &mut Utf16Buffer) -> Result<(), EvaluationError> {
    let body = text.strip_prefix('\\').ok_or_else(|| invalid_escape(text))?;
    let mut chars = body.chars();
    let first = chars.next().ok_or_else(|| invalid_escape(text))?;

    let decoded = match first {
        'n' => '\n',
        't' => '\t',
        'r' if body.len() == 1 => '\r',
        'b' => '\u{8}',
        'f' => '\u{c}',
        'v' => '\u{b}',
        // line continuation
        '\r' | '\n' | '\u{2028}' | '\u{2029}' => return Ok(()),
        '0'..='7' => {
            let code = u32::from_str_radix(body, 8).map_err(|_| invalid_escape(text))?;
            if !out.push_code_point(code) {
                return Err(invalid_escape(text));
            }
            return Ok(());
        }
        'x' => {
            let code = parse_hex(chars.as_str(), text)?;
            if !out.push_code_point(code) {
                return Err(invalid_escape(text));
            }
            return Ok(());
        }
        'u' => {
            let rest = chars.as_str();
            let digits = rest
                .strip_prefix('{')
                .and_then(|braced| braced.strip_suffix('}'))
                .unwrap_or(rest);
            let code = parse_hex(digits, text)?;
            if !out.push_code_point(code) {
                return Err(invalid_escape(text));
            }
            return Ok(());
        }
        other => other,
    };

    out.push_char(decoded);
    Ok(())
}

/// Decodes the contents of a `string` or substitution-free `template_string` node.
pub(super) fn decode_string(node: Node<'_>, source: &[u8]) -> Result<String, EvaluationError> {
    let mut cursor = node.walk();
    let children: Vec<Node<'_>> = node.children(&mut cursor).collect();
    let inner = children.get(1..children.len().saturating_sub(1)).unwrap_or_default();

    let mut out = Utf16Buffer::default();
    for child in inner {
        let text = child.utf8_text(source).map_err(|_| EvaluationError::ParseFailed)?;
        match child.kind() {
            "string_fragment" => out.push_str(text),
            "escape_sequence" => decode_escape(text, &mut out)?,
            kind if text.starts_with('\\') && kind != "template_substitution" => {
                decode_escape(text, &mut out)?;
            }
            kind => {
                return Err(EvaluationError::Unsupported {
                    kind: kind.to_string(),
                    text: text.to_string(),
                });
            }
        }
    }

    Ok(out.finish())
}
