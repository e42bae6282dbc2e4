/// Field and enum constant extraction
use crate::extractors::base::{EnumConstantDecl, FieldDecl};
use crate::extractors::java::JavaExtractor;
use tree_sitter::Node;

use super::{annotations, helpers, literals};

/// Extract a field declaration; one record per variable declarator
///
/// Fields declared in interfaces are implicitly `static final`.
pub(super) fn extract_fields(
    extractor: &JavaExtractor,
    node: Node,
    in_interface: bool,
) -> Vec<FieldDecl> {
    let base = extractor.base();
    let modifiers = helpers::extract_modifiers(base, node);
    let annotations = annotations::extract_annotations(base, node);
    let doc_comment = base.find_doc_comment(&node);

    let field_type = base
        .get_field_text(&node, "type")
        .unwrap_or_else(|| "unknown".to_string());

    // Only compile-time constants carry a constant value
    let is_constant = in_interface
        || (modifiers.iter().any(|m| m == "static") && modifiers.iter().any(|m| m == "final"));

    node.children_by_field_name("declarator", &mut node.walk())
        .filter_map(|declarator| {
            let name = base.get_field_text(&declarator, "name")?;
            let initializer = if is_constant {
                declarator
                    .child_by_field_name("value")
                    .and_then(|value| literals::constant_expr(base, value))
            } else {
                None
            };
            let constant_value = initializer.as_ref().and_then(|e| e.literal_value());
            let initializer = initializer.filter(|_| constant_value.is_none());

            Some(FieldDecl {
                name,
                type_name: field_type.clone(),
                modifiers: modifiers.clone(),
                annotations: annotations.clone(),
                constant_value,
                initializer,
                doc_comment: doc_comment
                    .clone()
                    .or_else(|| base.create_doc_comment(&declarator)),
                position: base.create_position(&declarator),
            })
        })
        .collect()
}

/// Extract an enum constant
pub(super) fn extract_enum_constant(
    extractor: &JavaExtractor,
    node: Node,
) -> Option<EnumConstantDecl> {
    let base = extractor.base();
    let name = base.get_field_text(&node, "name")?;

    Some(EnumConstantDecl {
        name,
        annotations: annotations::extract_annotations(base, node),
        doc_comment: base.find_doc_comment(&node),
        position: base.create_position(&node),
    })
}
