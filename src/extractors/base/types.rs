// Declaration types for the Java extractor
//
// The data structures produced by parsing one compilation unit: classes with their
// methods, fields, enum constants, annotations and doc comments.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Location of a declaration in its source file
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct SourcePosition {
    /// File path, relative Unix-style when the source root is known
    pub file_path: String,
    /// Line number (1-based)
    pub line: u32,
    /// Column number (1-based)
    pub column: u32,
}

impl fmt::Display for SourcePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file_path, self.line, self.column)
    }
}

/// Kind of a type declaration
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
    Class,
    Interface,
    Enum,
    AnnotationType,
    Record,
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeKind::Class => write!(f, "class"),
            TypeKind::Interface => write!(f, "interface"),
            TypeKind::Enum => write!(f, "enum"),
            TypeKind::AnnotationType => write!(f, "@interface"),
            TypeKind::Record => write!(f, "record"),
        }
    }
}

/// Compile-time constant value of a field or expression
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum ConstantValue {
    String(String),
    Integer(i64),
    Boolean(bool),
    Character(char),
    /// Floating point literal, kept as written
    Float(String),
}

impl ConstantValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ConstantValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// The Java type name of the constant
    pub fn type_name(&self) -> &'static str {
        match self {
            ConstantValue::String(_) => "String",
            ConstantValue::Integer(_) => "int",
            ConstantValue::Boolean(_) => "boolean",
            ConstantValue::Character(_) => "char",
            ConstantValue::Float(_) => "double",
        }
    }
}

impl fmt::Display for ConstantValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstantValue::String(s) => write!(f, "{}", s),
            ConstantValue::Integer(i) => write!(f, "{}", i),
            ConstantValue::Boolean(b) => write!(f, "{}", b),
            ConstantValue::Character(c) => write!(f, "{}", c),
            ConstantValue::Float(s) => write!(f, "{}", s),
        }
    }
}

/// A constant expression as written, with names still unresolved
///
/// Fields and annotation elements that refer to other constants keep their
/// expression until the whole source tree is indexed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum ConstantExpr {
    Literal(ConstantValue),
    /// `NAME`, `Type.NAME` or `a.b.Type.NAME`
    Name(String),
    Negate(Box<ConstantExpr>),
    Not(Box<ConstantExpr>),
    /// `+`, numeric addition or string concatenation
    Add(Box<ConstantExpr>, Box<ConstantExpr>),
}

impl ConstantExpr {
    /// Evaluate the expression, looking up names through `lookup`
    pub fn fold(&self, lookup: &mut dyn FnMut(&str) -> Option<ConstantValue>) -> Option<ConstantValue> {
        match self {
            ConstantExpr::Literal(value) => Some(value.clone()),
            ConstantExpr::Name(name) => lookup(name),
            ConstantExpr::Negate(operand) => match operand.fold(lookup)? {
                ConstantValue::Integer(i) => i.checked_neg().map(ConstantValue::Integer),
                _ => None,
            },
            ConstantExpr::Not(operand) => match operand.fold(lookup)? {
                ConstantValue::Boolean(b) => Some(ConstantValue::Boolean(!b)),
                _ => None,
            },
            ConstantExpr::Add(left, right) => {
                match (left.fold(lookup)?, right.fold(lookup)?) {
                    (ConstantValue::Integer(l), ConstantValue::Integer(r)) => {
                        l.checked_add(r).map(ConstantValue::Integer)
                    }
                    (l @ ConstantValue::String(_), r) | (l, r @ ConstantValue::String(_)) => {
                        Some(ConstantValue::String(format!("{}{}", l, r)))
                    }
                    _ => None,
                }
            }
        }
    }

    /// The value, if it does not depend on any name
    pub fn literal_value(&self) -> Option<ConstantValue> {
        self.fold(&mut |_| None)
    }
}

/// Value of an annotation element
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum ElementValue {
    /// A constant expression (literal, or a concatenation of literals)
    Constant(ConstantValue),
    /// `Foo.class`; the type name as written
    Class(String),
    /// A name such as `SomeEnum.VALUE` or `CONSTANT`; names of constant fields are
    /// replaced by their value once the index is complete
    Name(String),
    /// A constant expression that refers to other constants, e.g. `PREFIX + ".x"`
    Expression(ConstantExpr),
    /// `{ a, b, c }`
    Array(Vec<ElementValue>),
    /// Anything else (nested annotations, complex expressions), as written
    Other(String),
}

impl ElementValue {
    /// Scalar text of the value: constants are rendered, names and classes as written
    pub fn as_text(&self) -> Option<String> {
        match self {
            ElementValue::Constant(c) => Some(c.to_string()),
            ElementValue::Class(name) | ElementValue::Name(name) => Some(name.clone()),
            ElementValue::Array(_) | ElementValue::Expression(_) | ElementValue::Other(_) => None,
        }
    }
}

/// An annotation on a declaration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Annotation {
    /// Annotation type name as written, simple or qualified
    pub name: String,
    /// Element-value pairs in source order; a single unnamed value is stored as `value`
    pub elements: Vec<(String, ElementValue)>,
    pub position: SourcePosition,
}

impl Annotation {
    /// Last segment of the annotation type name
    pub fn simple_name(&self) -> &str {
        self.name.rsplit('.').next().unwrap_or(&self.name)
    }

    pub fn element(&self, name: &str) -> Option<&ElementValue> {
        self.elements
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }
}

/// Import declaration of a compilation unit
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ImportDecl {
    /// Imported name without the trailing `.*`
    pub path: String,
    pub is_static: bool,
    /// `import a.b.*;`
    pub on_demand: bool,
}

/// A formal parameter of a method
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ParameterDecl {
    pub type_name: String,
    pub name: String,
}

/// A method or constructor declaration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MethodDecl {
    pub name: String,
    pub modifiers: Vec<String>,
    pub annotations: Vec<Annotation>,
    pub parameters: Vec<ParameterDecl>,
    /// `None` for constructors
    pub return_type: Option<String>,
    /// Doc comment text with the comment delimiters stripped
    pub doc_comment: Option<String>,
    /// String literals of the method body, in source order
    pub body_string_literals: Vec<String>,
    pub position: SourcePosition,
}

impl MethodDecl {
    pub fn is_constructor(&self) -> bool {
        self.return_type.is_none()
    }

    /// Signature as used in `{@link Foo#bar(int, String)}` references
    pub fn signature(&self) -> String {
        let params: Vec<&str> = self
            .parameters
            .iter()
            .map(|p| p.type_name.as_str())
            .collect();
        format!("{}({})", self.name, params.join(","))
    }
}

/// A field declaration (one per declarator)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldDecl {
    pub name: String,
    pub type_name: String,
    pub modifiers: Vec<String>,
    pub annotations: Vec<Annotation>,
    /// Present for `static final` (or interface) fields with a constant initializer
    pub constant_value: Option<ConstantValue>,
    /// Initializer of a `static final` field that refers to other constants
    pub initializer: Option<ConstantExpr>,
    pub doc_comment: Option<String>,
    pub position: SourcePosition,
}

/// An enum constant
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EnumConstantDecl {
    pub name: String,
    pub annotations: Vec<Annotation>,
    pub doc_comment: Option<String>,
    pub position: SourcePosition,
}

/// A class, interface, enum, annotation type or record declaration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClassDecl {
    /// Simple name
    pub name: String,
    /// Canonical name, e.g. `com.acme.Outer.Inner`
    pub qualified_name: String,
    pub package: String,
    pub kind: TypeKind,
    pub modifiers: Vec<String>,
    pub annotations: Vec<Annotation>,
    /// `extends` clause of a class, type arguments erased
    pub superclass: Option<String>,
    /// `implements` clause, or `extends` clause of an interface, type arguments erased
    pub interfaces: Vec<String>,
    pub methods: Vec<MethodDecl>,
    pub fields: Vec<FieldDecl>,
    pub enum_constants: Vec<EnumConstantDecl>,
    /// Qualified names of the member types
    pub member_types: Vec<String>,
    /// Qualified name of the enclosing type of a member type
    pub enclosing: Option<String>,
    /// Imports of the compilation unit
    pub imports: Vec<ImportDecl>,
    pub doc_comment: Option<String>,
    pub position: SourcePosition,
}

impl ClassDecl {
    /// Name relative to the package, e.g. `Outer.Inner`
    pub fn package_relative_name(&self) -> &str {
        if self.package.is_empty() {
            &self.qualified_name
        } else {
            self.qualified_name
                .strip_prefix(&self.package)
                .and_then(|rest| rest.strip_prefix('.'))
                .unwrap_or(&self.qualified_name)
        }
    }

    /// Binary name, e.g. `com.acme.Outer$Inner`
    pub fn binary_name(&self) -> String {
        let relative = self.package_relative_name().replace('.', "$");
        if self.package.is_empty() {
            relative
        } else {
            format!("{}.{}", self.package, relative)
        }
    }

    pub fn is_abstract(&self) -> bool {
        matches!(self.kind, TypeKind::Interface | TypeKind::AnnotationType)
            || self.modifiers.iter().any(|m| m == "abstract")
    }

    pub fn is_enum(&self) -> bool {
        self.kind == TypeKind::Enum
    }

    pub fn annotation(&self, simple_name: &str) -> Option<&Annotation> {
        find_annotation(&self.annotations, simple_name)
    }

    pub fn field(&self, name: &str) -> Option<&FieldDecl> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Find an annotation by its simple type name
pub fn find_annotation<'a>(annotations: &'a [Annotation], simple_name: &str) -> Option<&'a Annotation> {
    annotations.iter().find(|a| a.simple_name() == simple_name)
}

/// Everything extracted from one `.java` file
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CompilationUnit {
    pub file_path: String,
    pub package: String,
    pub imports: Vec<ImportDecl>,
    /// All type declarations, member types included, in source order
    pub classes: Vec<ClassDecl>,
}
