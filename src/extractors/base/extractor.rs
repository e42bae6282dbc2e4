// BaseExtractor implementation
//
// Holds the source text of one file and provides node-text and doc-comment access
// shared by the Java extraction modules.

use tracing::debug;
use tree_sitter::Node;

/// Base implementation for language extractors
pub struct BaseExtractor {
    pub language: String,
    pub file_path: String,
    pub content: String,
}

impl BaseExtractor {
    pub fn new(language: String, file_path: String, content: String) -> Self {
        debug!("BaseExtractor for {} file '{}'", language, file_path);

        Self {
            language,
            file_path,
            content,
        }
    }

    /// Get text from a tree-sitter node
    pub fn get_node_text(&self, node: &Node) -> String {
        let start_byte = node.start_byte();
        let end_byte = node.end_byte();

        // Use byte slice but handle UTF-8 boundaries properly
        let content_bytes = self.content.as_bytes();
        if start_byte < content_bytes.len() && end_byte <= content_bytes.len() {
            String::from_utf8_lossy(&content_bytes[start_byte..end_byte]).to_string()
        } else {
            String::new()
        }
    }

    /// Find the doc comment (`/** ... */`) attached to a declaration node
    ///
    /// Walks the preceding siblings; line comments and plain block comments between the
    /// doc comment and the declaration are skipped. Returns the comment text with the
    /// delimiters and leading asterisks stripped.
    pub fn find_doc_comment(&self, node: &Node) -> Option<String> {
        let mut current = node.prev_sibling();
        while let Some(sibling) = current {
            match sibling.kind() {
                "block_comment" => {
                    let comment_text = self.get_node_text(&sibling);
                    if comment_text.starts_with("/**") && comment_text != "/**/" {
                        return Some(strip_comment_delimiters(&comment_text));
                    }
                }
                "line_comment" => {}
                _ => break,
            }
            current = sibling.prev_sibling();
        }
        None
    }
}

/// Strip `/**`, `*/` and the leading ` * ` of every line from a doc comment
pub fn strip_comment_delimiters(comment: &str) -> String {
    let inner = comment
        .trim()
        .trim_start_matches("/**")
        .trim_end_matches("*/");

    let lines: Vec<&str> = inner
        .lines()
        .map(|line| {
            let trimmed = line.trim_start();
            let without_stars = if trimmed.starts_with('*') {
                trimmed.trim_start_matches('*')
            } else {
                line
            };
            without_stars.strip_prefix(' ').unwrap_or(without_stars)
        })
        .collect();

    lines.join("\n").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_comment_delimiters() {
        let comment = "/**\n     * First line.\n     *   indented\n     */";
        assert_eq!(strip_comment_delimiters(comment), "First line.\n  indented");
    }

    #[test]
    fn test_strip_single_line_comment() {
        assert_eq!(strip_comment_delimiters("/** Short. */"), "Short.");
    }
}
