/// Java extractor for building the declaration model of a compilation unit
///
/// This module is organized into focused sub-modules:
/// - helpers: Shared utility functions (modifiers, supertypes, type names)
/// - classes: Class, interface, enum, annotation type and record extraction
/// - methods: Method and constructor extraction
/// - fields: Field and enum constant extraction
/// - annotations: Annotation and element value extraction
/// - literals: Constant expression evaluation
/// - imports_packages: Import and package declaration extraction
mod annotations;
mod classes;
mod fields;
mod helpers;
mod imports_packages;
mod literals;
mod methods;

use crate::extractors::base::{BaseExtractor, CompilationUnit};
use tree_sitter::Tree;

pub(crate) use helpers::erase_type_arguments;
pub(crate) use literals::unescape_java;

/// Java extractor for one source file
pub struct JavaExtractor {
    base: BaseExtractor,
}

impl JavaExtractor {
    pub fn new(file_path: String, content: String) -> Self {
        Self {
            base: BaseExtractor::new("java".to_string(), file_path, content),
        }
    }

    /// Extract the package, imports and all type declarations of the file
    pub fn extract_unit(&self, tree: &Tree) -> CompilationUnit {
        let root = tree.root_node();
        let package = imports_packages::extract_package(self, root);
        let imports = imports_packages::extract_imports(self, root);

        let mut classes = Vec::new();
        let scope = classes::TypeScope {
            package: &package,
            imports: &imports,
            enclosing: None,
        };
        for child in root.named_children(&mut root.walk()) {
            if classes::TYPE_DECLARATION_KINDS.contains(&child.kind()) {
                classes::extract_type(self, child, &scope, &mut classes);
            }
        }

        CompilationUnit {
            file_path: self.base.file_path.clone(),
            package,
            imports,
            classes,
        }
    }

    pub(crate) fn base(&self) -> &BaseExtractor {
        &self.base
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::base::{ConstantValue, ElementValue, TypeKind};
    use tree_sitter::Parser;

    fn extract(source: &str) -> CompilationUnit {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_java::LANGUAGE.into())
            .expect("java grammar");
        let tree = parser.parse(source, None).expect("parse");
        JavaExtractor::new("Test.java".to_string(), source.to_string()).extract_unit(&tree)
    }

    #[test]
    fn test_extract_class_with_annotations_and_doc() {
        let unit = extract(
            r#"
package com.acme.checks;

import com.puppycrawl.tools.checkstyle.api.AbstractCheck;
import de.unkrig.csdoclet.annotation.*;

/**
 * Checks something.
 * <p>More.</p>
 */
@Rule(group = "%Coding.group", groupName = "Coding Problems", name = "My check", parent = "TreeWalker")
public class MyCheck extends AbstractCheck implements java.io.Serializable {

    /** Message key. */
    @Message("Bad thing {0}")
    public static final String MESSAGE_KEY_BAD = "my.bad";

    private int count = 3;

    /**
     * Whether to be strict.
     */
    @BooleanRuleProperty(defaultValue = false)
    public void setStrict(boolean strict) {}

    public MyCheck() {}
}
"#,
        );

        assert_eq!(unit.package, "com.acme.checks");
        assert_eq!(unit.imports.len(), 2);
        assert!(unit.imports[1].on_demand);
        assert_eq!(unit.imports[1].path, "de.unkrig.csdoclet.annotation");

        let class = &unit.classes[0];
        assert_eq!(class.qualified_name, "com.acme.checks.MyCheck");
        assert_eq!(class.kind, TypeKind::Class);
        assert_eq!(class.superclass.as_deref(), Some("AbstractCheck"));
        assert_eq!(class.interfaces, vec!["java.io.Serializable"]);
        assert_eq!(class.doc_comment.as_deref(), Some("Checks something.\n<p>More.</p>"));

        let rule = class.annotation("Rule").expect("@Rule");
        assert_eq!(rule.string_element("group").as_deref(), Some("%Coding.group"));
        assert_eq!(rule.string_element("parent").as_deref(), Some("TreeWalker"));

        let key = class.field("MESSAGE_KEY_BAD").expect("field");
        assert_eq!(
            key.constant_value,
            Some(ConstantValue::String("my.bad".to_string()))
        );
        assert_eq!(key.doc_comment.as_deref(), Some("Message key."));
        assert_eq!(
            key.annotations[0].element("value"),
            Some(&ElementValue::Constant(ConstantValue::String(
                "Bad thing {0}".to_string()
            )))
        );
        assert_eq!(class.field("count").and_then(|f| f.constant_value.clone()), None);

        let setter = class.methods.iter().find(|m| m.name == "setStrict").expect("setter");
        assert_eq!(setter.signature(), "setStrict(boolean)");
        assert_eq!(setter.doc_comment.as_deref(), Some("Whether to be strict."));
        assert_eq!(setter.annotations[0].bool_element("defaultValue"), Some(false));
        assert!(class.methods.iter().any(|m| m.is_constructor()));
    }

    #[test]
    fn test_extract_enum_and_member_types() {
        let unit = extract(
            r#"
package p;

public class Outer {
    /** The modes. */
    public enum Mode {
        /** Fast. */
        FAST,
        /** Slow. */
        SLOW;

        private int x;
    }

    interface Keys {
        String KEY = "k" + 1;
    }
}
"#,
        );

        let names: Vec<&str> = unit.classes.iter().map(|c| c.qualified_name.as_str()).collect();
        assert_eq!(names, vec!["p.Outer", "p.Outer.Mode", "p.Outer.Keys"]);

        let outer = &unit.classes[0];
        assert_eq!(outer.member_types, vec!["p.Outer.Mode", "p.Outer.Keys"]);

        let mode = &unit.classes[1];
        assert!(mode.is_enum());
        assert_eq!(mode.binary_name(), "p.Outer$Mode");
        assert_eq!(mode.enclosing.as_deref(), Some("p.Outer"));
        let constants: Vec<_> = mode
            .enum_constants
            .iter()
            .map(|c| (c.name.as_str(), c.doc_comment.as_deref()))
            .collect();
        assert_eq!(constants, vec![("FAST", Some("Fast.")), ("SLOW", Some("Slow."))]);
        assert_eq!(mode.fields.len(), 1);

        let keys = &unit.classes[2];
        assert_eq!(
            keys.field("KEY").and_then(|f| f.constant_value.clone()),
            Some(ConstantValue::String("k1".to_string()))
        );
    }

    #[test]
    fn test_extract_get_options_literals() {
        let unit = extract(
            r#"
public class Provider implements IOptionProvider {
    @Override
    public java.util.List<String> getOptions() {
        return java.util.Arrays.asList("alpha", "beta");
    }
}
"#,
        );

        let provider = &unit.classes[0];
        assert_eq!(provider.qualified_name, "Provider");
        assert_eq!(provider.interfaces, vec!["IOptionProvider"]);
        let get_options = &provider.methods[0];
        assert_eq!(get_options.return_type.as_deref(), Some("java.util.List"));
        assert_eq!(get_options.body_string_literals, vec!["alpha", "beta"]);
    }

    #[test]
    fn test_annotation_arrays_and_class_literals() {
        let unit = extract(
            r#"
@Rule(quickfixes = { "a.Fix", "b.Fix" }, hasSeverity = false)
class R {
    @SingleSelectRuleProperty(optionProvider = Mode.class, defaultValue = "fast")
    public void setMode(String mode) {}

    @MultiCheckRuleProperty(valueOptions = "x")
    public void setTokens(String tokens) {}
}
"#,
        );

        let class = &unit.classes[0];
        let rule = class.annotation("Rule").expect("@Rule");
        assert_eq!(
            rule.string_array_element("quickfixes"),
            Some(vec!["a.Fix".to_string(), "b.Fix".to_string()])
        );
        assert_eq!(rule.bool_element("hasSeverity"), Some(false));

        let select = &class.methods[0].annotations[0];
        assert_eq!(select.class_element("optionProvider"), Some("Mode"));
        let multi = &class.methods[1].annotations[0];
        assert_eq!(multi.string_array_element("valueOptions"), Some(vec!["x".to_string()]));
    }
}
