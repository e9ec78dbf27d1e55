//! Evaluates a literal expression into a JSON value without executing code.

use serde_json::{
    Map,
    Number,
    Value,
};
use tree_sitter::{
    Node,
    Parser,
};

use super::string::decode_string;
use super::types::EvaluationError;

/// Nesting limit for objects and arrays.
const MAX_DEPTH: usize = 128;

/// Returns the only named child of `node`, ignoring comments.
fn single_named_child(node: Node<'_>) -> Result<Node<'_>, EvaluationError> {
    let mut cursor = node.walk();
    let mut children = node.named_children(&mut cursor).filter(|child| child.kind() != "comment");
    match (children.next(), children.next()) {
        (Some(child), None) => Ok(child),
        _ => Err(EvaluationError::NotAnExpression),
    }
}

/// Parses `text` as a single parenthesized expression and evaluates it.
///
/// # Errors
/// Returns `EvaluationError` if the text is not one expression made only of
/// literal syntax.
pub fn evaluate_expression(text: &str) -> Result<Value, EvaluationError> {
    let wrapped = format!("({text}\n)");

    let mut parser = Parser::new();
    parser.set_language(&tree_sitter_javascript::LANGUAGE.into())?;
    let tree = parser.parse(&wrapped, None).ok_or(EvaluationError::ParseFailed)?;

    let root = tree.root_node();
    if root.has_error() {
        return Err(EvaluationError::Syntax);
    }

    let statement = single_named_child(root)?;
    if statement.kind() != "expression_statement" {
        return Err(EvaluationError::NotAnExpression);
    }
    let parenthesized = single_named_child(statement)?;
    if parenthesized.kind() != "parenthesized_expression" {
        return Err(EvaluationError::NotAnExpression);
    }
    let expression = single_named_child(parenthesized)?;

    Evaluator { source: wrapped.as_bytes() }.value(expression, 0)
}

/// Walks an expression tree and converts it into JSON data.
#[derive(Debug)]
struct Evaluator<'s> {
    /// Text the tree was parsed from.
    source: &'s [u8],
}

impl Evaluator<'_> {
    /// Source text of `node`.
    fn text(&self, node: Node<'_>) -> Result<&str, EvaluationError> {
        node.utf8_text(self.source).map_err(|_| EvaluationError::ParseFailed)
    }

    /// Error for a node outside the literal subset, quoting its start.
    fn unsupported(&self, node: Node<'_>) -> EvaluationError {
        /// Characters quoted in the error.
        const SNIPPET_LIMIT: usize = 40;
        let text = self.text(node).unwrap_or_default();
        let snippet: String = text.chars().take(SNIPPET_LIMIT).collect();
        EvaluationError::Unsupported { kind: node.kind().to_string(), text: snippet }
    }

    /// Required field `name` of `node`.
    fn field<'t>(&self, node: Node<'t>, name: &str) -> Result<Node<'t>, EvaluationError> {
        node.child_by_field_name(name).ok_or_else(|| self.unsupported(node))
    }

    /// Converts any supported expression node.
    fn value(&self, node: Node<'_>, depth: usize) -> Result<Value, EvaluationError> {
        if depth > MAX_DEPTH {
            return Err(EvaluationError::TooDeep);
        }

        match node.kind() {
            "object" => self.object(node, depth),
            "array" => self.array(node, depth),
            "string" | "template_string" => Ok(Value::String(decode_string(node, self.source)?)),
            "number" => Ok(Value::Number(parse_number(self.text(node)?, false)?)),
            "unary_expression" => self.signed_number(node),
            "true" => Ok(Value::Bool(true)),
            "false" => Ok(Value::Bool(false)),
            "null" => Ok(Value::Null),
            "parenthesized_expression" => self.value(single_named_child(node)?, depth + 1),
            "identifier" | "undefined" => {
                Err(EvaluationError::UnboundIdentifier { name: self.text(node)?.to_string() })
            }
            _ => Err(self.unsupported(node)),
        }
    }

    /// Converts an object literal. Duplicate keys keep the last value.
    fn object(&self, node: Node<'_>, depth: usize) -> Result<Value, EvaluationError> {
        let mut map = Map::new();
        let mut cursor = node.walk();

        for child in node.named_children(&mut cursor) {
            match child.kind() {
                "comment" => {}
                "pair" => {
                    let key = self.property_key(self.field(child, "key")?)?;
                    let value = self.value(self.field(child, "value")?, depth + 1)?;
                    // a repeated key keeps its first position and the last value
                    map.insert(key, value);
                }
                _ => return Err(self.unsupported(child)),
            }
        }

        Ok(Value::Object(map))
    }

    /// Converts an array literal. Holes are rejected.
    fn array(&self, node: Node<'_>, depth: usize) -> Result<Value, EvaluationError> {
        let mut items = Vec::new();
        let mut cursor = node.walk();

        for child in node.children(&mut cursor) {
            match child.kind() {
                "[" | "]" | "comment" => {}
                // two commas in a row leave a hole
                "," => {
                    if child.prev_sibling().is_some_and(|prev| prev.kind() == "," || prev.kind() == "[")
                    {
                        return Err(self.unsupported(node));
                    }
                }
                _ => items.push(self.value(child, depth + 1)?),
            }
        }

        Ok(Value::Array(items))
    }

    /// Name of an object property as JavaScript would spell it.
    fn property_key(&self, node: Node<'_>) -> Result<String, EvaluationError> {
        match node.kind() {
            "property_identifier" => Ok(self.text(node)?.to_string()),
            "string" => decode_string(node, self.source),
            "number" => Ok(number_key(&parse_number(self.text(node)?, false)?)),
            _ => Err(self.unsupported(node)),
        }
    }

    /// A number with a leading `+` or `-`.
    fn signed_number(&self, node: Node<'_>) -> Result<Value, EvaluationError> {
        let operator = self.text(self.field(node, "operator")?)?;
        let argument = self.field(node, "argument")?;
        if argument.kind() != "number" {
            return Err(self.unsupported(node));
        }

        let negative = match operator {
            "-" => true,
            "+" => false,
            _ => return Err(self.unsupported(node)),
        };
        Ok(Value::Number(parse_number(self.text(argument)?, negative)?))
    }
}

/// Property name of a numeric key. Integral floats lose their fraction.
fn number_key(number: &Number) -> String {
    match number.as_f64() {
        Some(float) if number.is_f64() => format!("{float}"),
        _ => number.to_string(),
    }
}

/// Converts the text of a numeric literal.
///
/// Integers stay exact when they fit in `i64`; everything else goes through
/// `f64`.
fn parse_number(text: &str, negative: bool) -> Result<Number, EvaluationError> {
    let invalid = || EvaluationError::InvalidNumber { text: text.to_string() };
    let cleaned: String = text.chars().filter(|c| *c != '_').collect();
    let sign = if negative { "-" } else { "" };

    if cleaned.ends_with('n') {
        return Err(EvaluationError::Unsupported {
            kind: "bigint".to_string(),
            text: text.to_string(),
        });
    }

    let prefixed = [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)]
        .into_iter()
        .find_map(|(prefix, radix)| cleaned.strip_prefix(prefix).map(|digits| (digits, radix)));
    let legacy_octal = (cleaned.len() > 1
        && cleaned.starts_with('0')
        && cleaned.bytes().all(|b| (b'0'..=b'7').contains(&b)))
    .then_some((cleaned.get(1..).unwrap_or_default(), 8));

    if let Some((digits, radix)) = prefixed.or(legacy_octal) {
        return i64::from_str_radix(&format!("{sign}{digits}"), radix)
            .map(Number::from)
            .map_err(|_| invalid());
    }

    let signed = format!("{sign}{cleaned}");
    if let Ok(integer) = signed.parse::<i64>() {
        return Ok(Number::from(integer));
    }
    signed.parse::<f64>().ok().and_then(Number::from_f64).ok_or_else(invalid)
}
