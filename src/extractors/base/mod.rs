// Base extractor types
//
// - types.rs: declaration model (ClassDecl, MethodDecl, FieldDecl, Annotation, ...)
// - extractor.rs: BaseExtractor (node text, doc comments)
// - tree_methods.rs: tree navigation helpers
// - creation_methods.rs: positions and doc comment lookup for declarators

pub mod creation_methods;
pub mod extractor;
pub mod tree_methods;
pub mod types;

// Re-export key types for external use
pub use extractor::{strip_comment_delimiters, BaseExtractor};
pub use types::{
    find_annotation, Annotation, ClassDecl, CompilationUnit, ConstantExpr, ConstantValue, ElementValue,
    EnumConstantDecl, FieldDecl, ImportDecl, MethodDecl, ParameterDecl, SourcePosition, TypeKind,
};
