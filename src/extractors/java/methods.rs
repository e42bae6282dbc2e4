/// Method and constructor extraction
use crate::extractors::base::{MethodDecl, ParameterDecl};
use crate::extractors::java::JavaExtractor;
use tree_sitter::Node;

use super::{annotations, helpers, literals};

/// Extract method declaration from a node
pub(super) fn extract_method(extractor: &JavaExtractor, node: Node) -> Option<MethodDecl> {
    let base = extractor.base();
    let name = base.get_field_text(&node, "name")?;
    let return_type = base
        .get_field_text(&node, "type")
        .map(|t| helpers::erase_type_arguments(&t));

    Some(MethodDecl {
        name,
        modifiers: helpers::extract_modifiers(base, node),
        annotations: annotations::extract_annotations(base, node),
        parameters: extract_parameters(extractor, node),
        return_type: Some(return_type.unwrap_or_else(|| "void".to_string())),
        doc_comment: base.find_doc_comment(&node),
        body_string_literals: extract_body_string_literals(extractor, node),
        position: base.create_position(&node),
    })
}

/// Extract constructor declaration from a node
pub(super) fn extract_constructor(extractor: &JavaExtractor, node: Node) -> Option<MethodDecl> {
    let base = extractor.base();
    let name = base.get_field_text(&node, "name")?;

    Some(MethodDecl {
        name,
        modifiers: helpers::extract_modifiers(base, node),
        annotations: annotations::extract_annotations(base, node),
        parameters: extract_parameters(extractor, node),
        return_type: None,
        doc_comment: base.find_doc_comment(&node),
        body_string_literals: extract_body_string_literals(extractor, node),
        position: base.create_position(&node),
    })
}

fn extract_parameters(extractor: &JavaExtractor, node: Node) -> Vec<ParameterDecl> {
    let base = extractor.base();
    let Some(param_list) = node.child_by_field_name("parameters") else {
        return Vec::new();
    };

    param_list
        .named_children(&mut param_list.walk())
        .filter(|p| matches!(p.kind(), "formal_parameter" | "spread_parameter"))
        .map(|p| {
            let type_name = p
                .child_by_field_name("type")
                .or_else(|| {
                    p.named_children(&mut p.walk())
                        .find(|c| !matches!(c.kind(), "modifiers" | "variable_declarator"))
                })
                .map(|t| helpers::erase_type_arguments(&base.get_node_text(&t)))
                .unwrap_or_default();
            let name = base
                .get_field_text(&p, "name")
                .or_else(|| {
                    base.find_child_by_type(&p, "variable_declarator")
                        .and_then(|d| base.get_field_text(&d, "name"))
                })
                .unwrap_or_default();
            let type_name = if p.kind() == "spread_parameter" {
                format!("{}...", type_name)
            } else {
                type_name
            };
            ParameterDecl { type_name, name }
        })
        .collect()
}

/// String literals of the body, e.g. the values returned by `getOptions()`
fn extract_body_string_literals(extractor: &JavaExtractor, node: Node) -> Vec<String> {
    let base = extractor.base();
    let Some(body) = node.child_by_field_name("body") else {
        return Vec::new();
    };

    base.find_nodes_by_type(&body, "string_literal")
        .iter()
        .map(|literal| literals::string_value(&base.get_node_text(literal)))
        .collect()
}
