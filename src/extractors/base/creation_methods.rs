// Position and declaration-record creation methods

use tree_sitter::Node;

use super::extractor::BaseExtractor;
use super::types::SourcePosition;

impl BaseExtractor {
    /// Create the source position of a node (1-based line and column)
    pub fn create_position(&self, node: &Node) -> SourcePosition {
        let start = node.start_position();
        SourcePosition {
            file_path: self.file_path.clone(),
            line: (start.row + 1) as u32,
            column: (start.column + 1) as u32,
        }
    }

    /// Doc comment of a declaration, or of its enclosing declaration when the node is
    /// the declarator inside a field declaration
    pub fn create_doc_comment(&self, node: &Node) -> Option<String> {
        self.find_doc_comment(node).or_else(|| {
            node.parent()
                .filter(|parent| {
                    matches!(parent.kind(), "field_declaration" | "constant_declaration")
                })
                .and_then(|parent| self.find_doc_comment(&parent))
        })
    }
}
