/// Class, interface, enum, annotation type and record extraction
use crate::extractors::base::{
    ClassDecl, EnumConstantDecl, FieldDecl, ImportDecl, MethodDecl, TypeKind,
};
use crate::extractors::java::JavaExtractor;
use tree_sitter::Node;

use super::{annotations, fields, helpers, methods};

/// Declaration node kinds that introduce a type
pub(super) const TYPE_DECLARATION_KINDS: &[&str] = &[
    "class_declaration",
    "interface_declaration",
    "enum_declaration",
    "annotation_type_declaration",
    "record_declaration",
];

/// Scope in which a type declaration appears
pub(super) struct TypeScope<'a> {
    pub package: &'a str,
    pub imports: &'a [ImportDecl],
    /// Qualified name of the enclosing type, for member types
    pub enclosing: Option<&'a str>,
}

/// Extract a type declaration and, recursively, its member types
///
/// The type is appended to `classes` before its member types. Returns the qualified
/// name of the extracted type.
pub(super) fn extract_type(
    extractor: &JavaExtractor,
    node: Node,
    scope: &TypeScope,
    classes: &mut Vec<ClassDecl>,
) -> Option<String> {
    let base = extractor.base();
    let kind = type_kind(node.kind())?;
    let name = base.get_field_text(&node, "name")?;

    let qualified_name = match (scope.enclosing, scope.package) {
        (Some(enclosing), _) => format!("{}.{}", enclosing, name),
        (None, "") => name.clone(),
        (None, package) => format!("{}.{}", package, name),
    };

    let (superclass, interfaces) = match kind {
        TypeKind::Interface => (None, helpers::extract_extended_interfaces(base, node)),
        TypeKind::Class => (
            helpers::extract_superclass(base, node),
            helpers::extract_implemented_interfaces(base, node),
        ),
        _ => (None, helpers::extract_implemented_interfaces(base, node)),
    };

    let index = classes.len();
    classes.push(ClassDecl {
        name,
        qualified_name: qualified_name.clone(),
        package: scope.package.to_string(),
        kind,
        modifiers: helpers::extract_modifiers(base, node),
        annotations: annotations::extract_annotations(base, node),
        superclass,
        interfaces,
        methods: Vec::new(),
        fields: Vec::new(),
        enum_constants: Vec::new(),
        member_types: Vec::new(),
        enclosing: scope.enclosing.map(str::to_string),
        imports: scope.imports.to_vec(),
        doc_comment: base.find_doc_comment(&node),
        position: base.create_position(&node),
    });

    let mut members = Members::default();
    if let Some(body) = node.child_by_field_name("body") {
        let member_scope = TypeScope {
            package: scope.package,
            imports: scope.imports,
            enclosing: Some(qualified_name.as_str()),
        };
        let in_interface = matches!(kind, TypeKind::Interface | TypeKind::AnnotationType);
        collect_members(extractor, body, &member_scope, in_interface, classes, &mut members);
    }

    let class = &mut classes[index];
    class.methods = members.methods;
    class.fields = members.fields;
    class.enum_constants = members.enum_constants;
    class.member_types = members.member_types;

    Some(qualified_name)
}

#[derive(Default)]
struct Members {
    methods: Vec<MethodDecl>,
    fields: Vec<FieldDecl>,
    enum_constants: Vec<EnumConstantDecl>,
    member_types: Vec<String>,
}

fn collect_members(
    extractor: &JavaExtractor,
    body: Node,
    scope: &TypeScope,
    in_interface: bool,
    classes: &mut Vec<ClassDecl>,
    members: &mut Members,
) {
    for child in body.named_children(&mut body.walk()) {
        match child.kind() {
            "method_declaration" => members.methods.extend(methods::extract_method(extractor, child)),
            "constructor_declaration" | "compact_constructor_declaration" => members
                .methods
                .extend(methods::extract_constructor(extractor, child)),
            "field_declaration" | "constant_declaration" => members
                .fields
                .extend(fields::extract_fields(extractor, child, in_interface)),
            "enum_constant" => members
                .enum_constants
                .extend(fields::extract_enum_constant(extractor, child)),
            // Fields, methods and member types after the constants of an enum
            "enum_body_declarations" => {
                collect_members(extractor, child, scope, in_interface, classes, members)
            }
            kind if TYPE_DECLARATION_KINDS.contains(&kind) => {
                if let Some(member) = extract_type(extractor, child, scope, classes) {
                    members.member_types.push(member);
                }
            }
            _ => {}
        }
    }
}

fn type_kind(node_kind: &str) -> Option<TypeKind> {
    match node_kind {
        "class_declaration" => Some(TypeKind::Class),
        "interface_declaration" => Some(TypeKind::Interface),
        "enum_declaration" => Some(TypeKind::Enum),
        "annotation_type_declaration" => Some(TypeKind::AnnotationType),
        "record_declaration" => Some(TypeKind::Record),
        _ => None,
    }
}
