/// Import and package declaration extraction
use crate::extractors::base::ImportDecl;
use crate::extractors::java::JavaExtractor;
use tree_sitter::Node;

const NAME_KINDS: &[&str] = &["scoped_identifier", "identifier"];

/// Extract the package name of a compilation unit (empty for the default package)
pub(super) fn extract_package(extractor: &JavaExtractor, root: Node) -> String {
    root.children(&mut root.walk())
        .find(|c| c.kind() == "package_declaration")
        .and_then(|package_node| {
            extractor
                .base()
                .find_child_by_types(&package_node, NAME_KINDS)
        })
        .map(|name_node| extractor.base().get_node_text(&name_node))
        .unwrap_or_default()
}

/// Extract all import declarations of a compilation unit
pub(super) fn extract_imports(extractor: &JavaExtractor, root: Node) -> Vec<ImportDecl> {
    root.children(&mut root.walk())
        .filter(|c| c.kind() == "import_declaration")
        .filter_map(|node| extract_import(extractor, node))
        .collect()
}

/// Extract import declaration from a node
fn extract_import(extractor: &JavaExtractor, node: Node) -> Option<ImportDecl> {
    let base = extractor.base();
    let name_node = base.find_child_by_types(&node, NAME_KINDS)?;

    Some(ImportDecl {
        path: base.get_node_text(&name_node),
        is_static: base.has_child_of_type(&node, "static"),
        on_demand: base.has_child_of_type(&node, "asterisk"),
    })
}
