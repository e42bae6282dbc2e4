//! Java declaration extraction
//!
//! Parses Java compilation units with tree-sitter and builds the declaration model
//! the doclet works on.
//!
//! # Architecture
//!
//! - `base` - declaration types and the shared `BaseExtractor`
//! - `java` - the Java extractor
//! - `manager` - `ExtractorManager` public API (source discovery, parsing)
//! - `index` - `DeclarationIndex`, name resolution over all parsed types

pub mod base;
pub mod index;
pub mod java;
pub mod manager;

// Re-export the public API
pub use base::{
    Annotation, ClassDecl, CompilationUnit, ConstantExpr, ConstantValue, ElementValue, EnumConstantDecl,
    FieldDecl, ImportDecl, MethodDecl, ParameterDecl, SourcePosition, TypeKind,
};
pub use index::DeclarationIndex;
pub use manager::ExtractorManager;
