/// Helper functions for Java extraction
/// Handles modifiers, supertypes, and type name normalization
use crate::extractors::base::BaseExtractor;
use tree_sitter::Node;

const TYPE_KINDS: &[&str] = &["type_identifier", "generic_type", "scoped_type_identifier"];

/// The `modifiers` child of a declaration (keywords and annotations)
pub(super) fn modifiers_node<'a>(node: Node<'a>) -> Option<Node<'a>> {
    node.children(&mut node.walk())
        .find(|c| c.kind() == "modifiers")
}

/// Extract the modifier keywords of a Java node (public, private, static, final, etc.)
///
/// Annotations are part of the `modifiers` node too; they are skipped here.
pub(super) fn extract_modifiers(base: &BaseExtractor, node: Node) -> Vec<String> {
    modifiers_node(node)
        .map(|modifiers_node| {
            modifiers_node
                .children(&mut modifiers_node.walk())
                .filter(|c| !matches!(c.kind(), "annotation" | "marker_annotation"))
                .filter(|c| !c.kind().ends_with("comment"))
                .map(|c| base.get_node_text(&c))
                .collect()
        })
        .unwrap_or_default()
}

/// Extract superclass from a class declaration node
pub(super) fn extract_superclass(base: &BaseExtractor, node: Node) -> Option<String> {
    let superclass_node = node
        .children(&mut node.walk())
        .find(|c| c.kind() == "superclass")?;

    let type_node = superclass_node
        .children(&mut superclass_node.walk())
        .find(|c| TYPE_KINDS.contains(&c.kind()))?;

    Some(erase_type_arguments(&base.get_node_text(&type_node)))
}

/// Extract implemented interfaces from a class/enum/record
pub(super) fn extract_implemented_interfaces(base: &BaseExtractor, node: Node) -> Vec<String> {
    type_list_of(base, node, "super_interfaces")
}

/// Extract extended interfaces from an interface declaration
pub(super) fn extract_extended_interfaces(base: &BaseExtractor, node: Node) -> Vec<String> {
    type_list_of(base, node, "extends_interfaces")
}

fn type_list_of(base: &BaseExtractor, node: Node, clause_kind: &str) -> Vec<String> {
    let clause_node = node
        .children(&mut node.walk())
        .find(|c| c.kind() == clause_kind);

    if let Some(clause_node) = clause_node {
        if let Some(type_list_node) = clause_node
            .children(&mut clause_node.walk())
            .find(|c| c.kind() == "type_list")
        {
            return type_list_node
                .children(&mut type_list_node.walk())
                .filter(|c| TYPE_KINDS.contains(&c.kind()))
                .map(|c| erase_type_arguments(&base.get_node_text(&c)))
                .collect();
        }
    }

    Vec::new()
}

/// Remove type arguments and whitespace: `Map<String, List<X>>` -> `Map`
pub(crate) fn erase_type_arguments(type_name: &str) -> String {
    let mut result = String::with_capacity(type_name.len());
    let mut depth = 0usize;
    for c in type_name.chars() {
        match c {
            '<' => depth += 1,
            '>' => depth = depth.saturating_sub(1),
            c if depth == 0 && !c.is_whitespace() => result.push(c),
            _ => {}
        }
    }
    result
}
