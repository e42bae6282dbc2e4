/// Constant expression parsing
///
/// Covers the forms that may appear in constant initializers and annotation element
/// values: string, character, integer, boolean and floating point literals, names of
/// other constants, parenthesized expressions, unary minus and negation, and `+`
/// concatenation/addition.
use crate::extractors::base::{BaseExtractor, ConstantExpr, ConstantValue};
use tree_sitter::Node;

/// Parse a constant expression node; names are kept for later resolution
pub(super) fn constant_expr(base: &BaseExtractor, node: Node) -> Option<ConstantExpr> {
    let literal = |value: ConstantValue| Some(ConstantExpr::Literal(value));

    match node.kind() {
        "string_literal" => literal(ConstantValue::String(string_value(&base.get_node_text(&node)))),
        "character_literal" => {
            let text = base.get_node_text(&node);
            let inner = text.strip_prefix('\'')?.strip_suffix('\'')?;
            literal(ConstantValue::Character(unescape_java(inner).chars().next()?))
        }
        "true" => literal(ConstantValue::Boolean(true)),
        "false" => literal(ConstantValue::Boolean(false)),
        "decimal_integer_literal"
        | "hex_integer_literal"
        | "octal_integer_literal"
        | "binary_integer_literal" => literal(ConstantValue::Integer(parse_integer(
            &base.get_node_text(&node),
        )?)),
        "decimal_floating_point_literal" | "hex_floating_point_literal" => {
            literal(ConstantValue::Float(base.get_node_text(&node)))
        }
        "identifier" | "field_access" | "scoped_identifier" => {
            let name: String = base.get_node_text(&node).split_whitespace().collect();
            Some(ConstantExpr::Name(name))
        }
        "parenthesized_expression" => constant_expr(base, node.named_child(0)?),
        "unary_expression" => {
            let operator = node.child_by_field_name("operator")?;
            let operand = constant_expr(base, node.child_by_field_name("operand")?)?;
            match base.get_node_text(&operator).as_str() {
                "-" => Some(ConstantExpr::Negate(Box::new(operand))),
                "+" => Some(operand),
                "!" => Some(ConstantExpr::Not(Box::new(operand))),
                _ => None,
            }
        }
        "binary_expression" => {
            let operator = node.child_by_field_name("operator")?;
            if base.get_node_text(&operator) != "+" {
                return None;
            }
            let left = constant_expr(base, node.child_by_field_name("left")?)?;
            let right = constant_expr(base, node.child_by_field_name("right")?)?;
            Some(ConstantExpr::Add(Box::new(left), Box::new(right)))
        }
        _ => None,
    }
}

/// Value of a string literal or text block as written in the source
pub(super) fn string_value(literal: &str) -> String {
    if let Some(block) = literal
        .strip_prefix("\"\"\"")
        .and_then(|rest| rest.strip_suffix("\"\"\""))
    {
        return unescape_java(&strip_text_block_indent(block));
    }

    let inner = literal
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .unwrap_or(literal);
    unescape_java(inner)
}

fn strip_text_block_indent(block: &str) -> String {
    // The content starts after the line terminator that follows the opening delimiter
    let body = block.split_once('\n').map(|(_, rest)| rest).unwrap_or(block);
    let indent = body
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.len() - line.trim_start().len())
        .min()
        .unwrap_or(0);

    body.lines()
        .map(|line| line.get(indent..).unwrap_or("").trim_end())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Resolve Java escape sequences
pub(crate) fn unescape_java(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => result.push('\n'),
            Some('t') => result.push('\t'),
            Some('r') => result.push('\r'),
            Some('b') => result.push('\u{8}'),
            Some('f') => result.push('\u{c}'),
            Some('s') => result.push(' '),
            Some('u') => {
                while chars.peek() == Some(&'u') {
                    chars.next();
                }
                let hex: String = chars.by_ref().take(4).collect();
                match u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
                    Some(decoded) => result.push(decoded),
                    None => {
                        result.push_str("\\u");
                        result.push_str(&hex);
                    }
                }
            }
            Some(d @ '0'..='7') => {
                let mut value = d.to_digit(8).unwrap_or(0);
                let max_digits = if d <= '3' { 2 } else { 1 };
                for _ in 0..max_digits {
                    match chars.peek().and_then(|c| c.to_digit(8)) {
                        Some(digit) => {
                            value = value * 8 + digit;
                            chars.next();
                        }
                        None => break,
                    }
                }
                if let Some(decoded) = char::from_u32(value) {
                    result.push(decoded);
                }
            }
            Some(other) => result.push(other),
            None => result.push('\\'),
        }
    }

    result
}

fn parse_integer(text: &str) -> Option<i64> {
    let cleaned: String = text
        .trim_end_matches(['l', 'L'])
        .chars()
        .filter(|c| *c != '_')
        .collect();

    if let Some(hex) = cleaned
        .strip_prefix("0x")
        .or_else(|| cleaned.strip_prefix("0X"))
    {
        return i64::from_str_radix(hex, 16).ok();
    }
    if let Some(bin) = cleaned
        .strip_prefix("0b")
        .or_else(|| cleaned.strip_prefix("0B"))
    {
        return i64::from_str_radix(bin, 2).ok();
    }
    if cleaned.len() > 1 && cleaned.starts_with('0') {
        return i64::from_str_radix(&cleaned[1..], 8).ok();
    }
    cleaned.parse().ok()
}
