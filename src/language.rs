//! Language Support - tree-sitter configuration for Java sources
//!
//! The doclet only reads Java compilation units; everything grammar-specific lives here.

use anyhow::Result;

/// Get the tree-sitter language for a language name
pub fn get_tree_sitter_language(language: &str) -> Result<tree_sitter::Language> {
    match language {
        "java" => Ok(tree_sitter_java::LANGUAGE.into()),
        _ => Err(anyhow::anyhow!(
            "Unsupported language: '{}'. Supported languages: java",
            language
        )),
    }
}

/// Detect language from file extension
///
/// Returns the language name that can be passed to `get_tree_sitter_language()`.
pub fn detect_language_from_extension(extension: &str) -> Option<&'static str> {
    match extension {
        "java" => Some("java"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_language_from_extension() {
        assert_eq!(detect_language_from_extension("java"), Some("java"));
        assert_eq!(detect_language_from_extension("kt"), None);
    }

    #[test]
    fn test_unsupported_language() {
        assert!(get_tree_sitter_language("java").is_ok());
        let err = get_tree_sitter_language("cobol").unwrap_err();
        assert!(err.to_string().contains("Unsupported language: 'cobol'"));
    }
}
