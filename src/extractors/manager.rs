//! ExtractorManager - Public API for declaration extraction
//!
//! Handles source discovery and file parsing, and delegates to the Java extractor.
//! The resulting compilation units are collected into a [`DeclarationIndex`].

use crate::extractors::base::CompilationUnit;
use crate::extractors::index::DeclarationIndex;
use crate::extractors::java::JavaExtractor;
use crate::language::{detect_language_from_extension, get_tree_sitter_language};
use crate::utils::to_relative_unix_style;
use anyhow::Context;
use std::path::{Path, PathBuf};
use tree_sitter::Parser;

/// Manager for source parsing
pub struct ExtractorManager {
    // No state needed; a parser is created per file
}

impl Default for ExtractorManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ExtractorManager {
    pub fn new() -> Self {
        Self {}
    }

    /// Extract the declarations of one source file
    pub fn extract_unit(
        &self,
        file_path: &str,
        content: &str,
    ) -> Result<CompilationUnit, anyhow::Error> {
        let language = self.get_language_from_extension(file_path)?;

        let mut parser = Parser::new();
        let tree_sitter_language = get_tree_sitter_language(language)?;

        parser.set_language(&tree_sitter_language).map_err(|e| {
            anyhow::anyhow!("Failed to set parser language for {}: {}", language, e)
        })?;

        let tree = parser
            .parse(content, None)
            .ok_or_else(|| anyhow::anyhow!("Failed to parse file: {}", file_path))?;

        if tree.root_node().has_error() {
            tracing::warn!("{}: source contains syntax errors", file_path);
        }

        let extractor = JavaExtractor::new(file_path.to_string(), content.to_string());
        let unit = extractor.extract_unit(&tree);

        tracing::debug!(
            "Extracted {} type declarations from {} file: {}",
            unit.classes.len(),
            language,
            file_path
        );
        Ok(unit)
    }

    /// All `.java` files below the source roots, sorted per root
    pub fn discover_sources(&self, roots: &[PathBuf]) -> Result<Vec<(PathBuf, PathBuf)>, anyhow::Error> {
        let mut sources = Vec::new();

        for root in roots {
            let pattern = root.join("**").join("*.java");
            let pattern = pattern
                .to_str()
                .with_context(|| format!("Source root '{}' is not valid UTF-8", root.display()))?;

            let mut files: Vec<PathBuf> = glob::glob(pattern)
                .with_context(|| format!("Invalid source root '{}'", root.display()))?
                .filter_map(|entry| match entry {
                    Ok(path) => Some(path),
                    Err(e) => {
                        tracing::warn!("Skipping unreadable path: {}", e);
                        None
                    }
                })
                .filter(|path| path.is_file())
                .collect();
            files.sort();

            tracing::debug!("Found {} source files below {}", files.len(), root.display());
            sources.extend(files.into_iter().map(|file| (root.clone(), file)));
        }

        Ok(sources)
    }

    /// Parse every source file below the roots and index the declarations
    ///
    /// A file that cannot be read or parsed is reported and skipped.
    pub fn load_index(&self, roots: &[PathBuf]) -> Result<DeclarationIndex, anyhow::Error> {
        let mut index = DeclarationIndex::new();

        for (root, file) in self.discover_sources(roots)? {
            match self.load_file(&root, &file) {
                Ok(unit) => index.add_unit(unit),
                Err(e) => tracing::warn!("Skipping {}: {:#}", file.display(), e),
            }
        }
        if index.is_empty() {
            tracing::warn!("No Java types found below the source roots");
        }
        index.resolve_constants();

        tracing::info!(
            "Indexed {} types in {} packages",
            index.len(),
            index.packages().count()
        );
        Ok(index)
    }

    fn load_file(&self, root: &Path, file: &Path) -> Result<CompilationUnit, anyhow::Error> {
        let content = std::fs::read_to_string(file)
            .with_context(|| format!("Failed to read {}", file.display()))?;
        let display_path =
            to_relative_unix_style(file, root).unwrap_or_else(|_| file.display().to_string());
        self.extract_unit(&display_path, &content)
    }

    fn get_language_from_extension(&self, file_path: &str) -> Result<&'static str, anyhow::Error> {
        let extension = Path::new(file_path)
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| anyhow::anyhow!("No file extension found for: {}", file_path))?;

        detect_language_from_extension(extension)
            .ok_or_else(|| anyhow::anyhow!("Unsupported file extension: {}", extension))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_unsupported_extension() {
        let manager = ExtractorManager::new();
        let err = manager.extract_unit("Foo.kt", "class Foo").unwrap_err();
        assert!(err.to_string().contains("Unsupported file extension: kt"));
    }

    #[test]
    fn test_load_index_from_source_root() {
        let temp_dir = TempDir::new().unwrap();
        let package_dir = temp_dir.path().join("com").join("acme");
        fs::create_dir_all(&package_dir).unwrap();
        fs::write(
            package_dir.join("A.java"),
            "package com.acme;\npublic class A { public static class Inner {} }\n",
        )
        .unwrap();
        fs::write(package_dir.join("B.java"), "package com.acme;\ninterface B {}\n").unwrap();
        fs::write(package_dir.join("notes.txt"), "not java").unwrap();

        let manager = ExtractorManager::new();
        let index = manager
            .load_index(&[temp_dir.path().to_path_buf()])
            .unwrap();

        assert_eq!(index.len(), 3);
        assert!(index.get("com.acme.A.Inner").is_some());
        let a = index.get("com.acme.A").unwrap();
        assert_eq!(a.position.file_path, "com/acme/A.java");
        assert_eq!(a.position.line, 2);
    }
}
