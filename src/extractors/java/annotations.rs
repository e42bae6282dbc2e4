/// Annotation extraction
use crate::extractors::base::{Annotation, BaseExtractor, ConstantExpr, ConstantValue, ElementValue};
use tree_sitter::Node;

use super::{helpers, literals};

/// Extract the annotations in the `modifiers` child of a declaration
pub(super) fn extract_annotations(base: &BaseExtractor, node: Node) -> Vec<Annotation> {
    let Some(modifiers_node) = helpers::modifiers_node(node) else {
        return Vec::new();
    };

    modifiers_node
        .children(&mut modifiers_node.walk())
        .filter(|c| matches!(c.kind(), "annotation" | "marker_annotation"))
        .filter_map(|c| extract_annotation(base, c))
        .collect()
}

/// Extract one `@Name`, `@Name(value)` or `@Name(key = value, ...)` node
pub(super) fn extract_annotation(base: &BaseExtractor, node: Node) -> Option<Annotation> {
    let name = base.get_field_text(&node, "name")?;
    let mut elements = Vec::new();

    if let Some(arguments) = node.child_by_field_name("arguments") {
        for argument in arguments.named_children(&mut arguments.walk()) {
            if argument.kind().ends_with("comment") {
                continue;
            }
            if argument.kind() == "element_value_pair" {
                let key = base.get_field_text(&argument, "key");
                let value = argument.child_by_field_name("value");
                if let (Some(key), Some(value)) = (key, value) {
                    elements.push((key, element_value(base, value)));
                }
            } else {
                elements.push(("value".to_string(), element_value(base, argument)));
            }
        }
    }

    Some(Annotation {
        name,
        elements,
        position: base.create_position(&node),
    })
}

/// Convert an element value node
pub(super) fn element_value(base: &BaseExtractor, node: Node) -> ElementValue {
    let expression = literals::constant_expr(base, node);
    if let Some(constant) = expression.as_ref().and_then(|e| e.literal_value()) {
        return ElementValue::Constant(constant);
    }

    match node.kind() {
        "class_literal" => {
            let type_text = node
                .named_child(0)
                .map(|t| base.get_node_text(&t))
                .unwrap_or_default();
            ElementValue::Class(helpers::erase_type_arguments(&type_text))
        }
        "element_value_array_initializer" => ElementValue::Array(
            node.named_children(&mut node.walk())
                .filter(|c| !c.kind().ends_with("comment"))
                .map(|c| element_value(base, c))
                .collect(),
        ),
        _ => match expression {
            Some(ConstantExpr::Name(name)) => ElementValue::Name(name),
            Some(expression) => ElementValue::Expression(expression),
            None => ElementValue::Other(base.get_node_text(&node)),
        },
    }
}

/// Typed accessors for annotation element values
impl Annotation {
    /// A string element; other constants are rendered as text
    pub fn string_element(&self, name: &str) -> Option<String> {
        self.element(name).and_then(|v| v.as_text())
    }

    pub fn bool_element(&self, name: &str) -> Option<bool> {
        match self.element(name)? {
            ElementValue::Constant(ConstantValue::Boolean(b)) => Some(*b),
            ElementValue::Constant(ConstantValue::String(s)) => s.parse().ok(),
            _ => None,
        }
    }

    /// A `String[]` element; a single value counts as a one-element array
    pub fn string_array_element(&self, name: &str) -> Option<Vec<String>> {
        match self.element(name)? {
            ElementValue::Array(values) => Some(values.iter().filter_map(|v| v.as_text()).collect()),
            single => single.as_text().map(|s| vec![s]),
        }
    }

    /// A `Class` element, as the type name written before `.class`
    pub fn class_element(&self, name: &str) -> Option<&str> {
        match self.element(name)? {
            ElementValue::Class(type_name) => Some(type_name),
            _ => None,
        }
    }
}
