//! Rule extraction from `@Rule`-annotated classes

use crate::doc::{DocContext, Skip};
use crate::extractors::base::{Annotation, ClassDecl, ConstantValue, FieldDecl};
use crate::model::extraction::ModelContext;
use crate::model::{properties, Family, Rule};
use std::collections::BTreeMap;

/// Build the rule of a class annotated with `@Rule`
pub fn build_rule<'a>(cx: &ModelContext<'a>, class: &'a ClassDecl) -> Result<Rule, Skip> {
    let position = &class.position;
    let Some(annotation) = class.annotation("Rule") else {
        return Err(cx.reporter.skip(
            Some(position),
            format!("\"{}\" lacks the '@Rule' annotation", class.qualified_name),
        ));
    };

    let family = rule_family(cx, class)?;

    let required = |element: &str| {
        annotation.string_element(element).ok_or_else(|| {
            cx.reporter.skip(
                Some(position),
                format!("'@{}' lacks the '{}' element", annotation.name, element),
            )
        })
    };
    let group = required("group")?;
    let group_name = required("groupName")?;
    let name = required("name")?;
    let parent = required("parent")?;

    let descriptions = cx
        .html
        .descriptions(class.doc_comment.as_deref(), &DocContext::of_class(class));

    Ok(Rule {
        internal_name: class.qualified_name.clone(),
        simple_name: class.name.clone(),
        position: position.clone(),
        family,
        group,
        group_name,
        name,
        parent,
        short_description: descriptions.short,
        long_description: descriptions.long,
        properties: properties::build_properties(cx, class),
        quickfix_class_names: quickfix_references(cx, class, annotation),
        has_severity: annotation.bool_element("hasSeverity"),
        messages: collect_messages(cx, class),
    })
}

/// `@Rule(quickfixes = ...)`, as strings or class literals
///
/// Names of indexed classes are qualified; anything else is kept as written and left to
/// the linker to report.
fn quickfix_references(
    cx: &ModelContext<'_>,
    class: &ClassDecl,
    annotation: &Annotation,
) -> Option<Vec<String>> {
    let names = annotation.string_array_element("quickfixes")?;
    Some(
        names
            .into_iter()
            .map(|name| match cx.index.resolve_class(class, &name) {
                Some(quickfix) => quickfix.qualified_name.clone(),
                None => name,
            })
            .collect(),
    )
}

/// Check markers are tested first
fn rule_family(cx: &ModelContext<'_>, class: &ClassDecl) -> Result<Family, Skip> {
    if cx.index.is_subclass_of_any(class, &cx.config.check_base_types) {
        Ok(Family::Check)
    } else if cx.index.is_subclass_of_any(class, &cx.config.filter_base_types) {
        Ok(Family::Filter)
    } else {
        Err(cx.reporter.skip(
            Some(&class.position),
            format!(
                "Rule \"{}\" cannot be identified as a check or a filter",
                class.qualified_name
            ),
        ))
    }
}

/// The `@Message` constants of the class and its superclasses
///
/// The chain is walked from the top-most superclass down; the first definition of a key
/// wins, and a redefinition with a different text is reported.
pub fn collect_messages<'a>(
    cx: &ModelContext<'a>,
    class: &'a ClassDecl,
) -> BTreeMap<String, String> {
    let mut messages = BTreeMap::new();

    for owner in cx.index.superclass_chain(class).into_iter().rev() {
        for field in &owner.fields {
            let Some(annotation) = field.annotations.iter().find(|a| a.simple_name() == "Message")
            else {
                continue;
            };

            let Ok((key, text)) = message_of(cx, field, annotation) else {
                continue;
            };

            match messages.get(&key) {
                None => {
                    messages.insert(key, text);
                }
                Some(previous) if *previous == text => {}
                Some(previous) => cx.reporter.error(
                    Some(&field.position),
                    format!(
                        "Inconsistent redefinition of message \"{}\": Previously \"{}\", now \"{}\"",
                        key, previous, text
                    ),
                ),
            }
        }
    }

    messages
}

/// Message key and default text of an `@Message` constant
fn message_of(
    cx: &ModelContext<'_>,
    field: &FieldDecl,
    annotation: &Annotation,
) -> Result<(String, String), Skip> {
    let position = Some(&field.position);

    let key = match &field.constant_value {
        None => {
            return Err(cx.reporter.skip(
                position,
                format!(
                    "Field '{}' has a '@{}' annotation, but not a constant value",
                    field.name,
                    annotation.simple_name()
                ),
            ))
        }
        Some(ConstantValue::String(key)) => key.clone(),
        Some(_) => {
            return Err(cx.reporter.skip(
                position,
                format!("Constant '{}' must have type 'String'", field.name),
            ))
        }
    };

    let text = annotation
        .string_element("value")
        .ok_or_else(|| cx.reporter.skip(position, "Message lacks a default text"))?;

    Ok((key, text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::test_support::{index_of, with_context, ANNOTATIONS};

    fn rule_source(package: &str, class: &str, extends: &str, body: &str) -> String {
        format!(
            "package {package};\n{ANNOTATIONS}\
             /**\n * Documents {class}. More.\n */\n\
             @Rule(group = \"%Coding.group\", groupName = \"Coding Problems\", name = \"{class} name\", parent = \"TreeWalker\", quickfixes = {{ \"p.Fix\" }}, hasSeverity = false)\n\
             public class {class} extends {extends} {{\n{body}\n}}\n"
        )
    }

    #[test]
    fn test_build_check_rule() {
        let source = rule_source(
            "p",
            "MyCheck",
            "com.puppycrawl.tools.checkstyle.api.AbstractCheck",
            "    @BooleanRuleProperty public void setStrict(boolean s) {}",
        );
        let index = index_of(&[("p/MyCheck.java", source.as_str())]);

        with_context(&index, |cx, reporter| {
            let rule = build_rule(cx, cx.index.get("p.MyCheck").unwrap()).unwrap();
            assert_eq!(rule.family_singular(), "check");
            assert_eq!(rule.family_plural(), "checks");
            assert_eq!(rule.group, "%Coding.group");
            assert_eq!(rule.group_name, "Coding Problems");
            assert_eq!(rule.name, "MyCheck name");
            assert_eq!(rule.parent, "TreeWalker");
            assert_eq!(rule.internal_name, "p.MyCheck");
            assert_eq!(rule.simple_name, "MyCheck");
            assert_eq!(rule.short_description, "Documents MyCheck.");
            assert_eq!(rule.quickfix_class_names, Some(vec!["p.Fix".to_string()]));
            assert_eq!(rule.has_severity, Some(false));
            assert_eq!(rule.properties.len(), 1);
            assert_eq!(reporter.error_count(), 0);
        });
    }

    #[test]
    fn test_filter_and_unclassified_rules() {
        let filter = rule_source("p", "MyFilter", "com.puppycrawl.tools.checkstyle.api.Filter", "");
        let neither = rule_source("p", "Stray", "Object", "");
        let index = index_of(&[
            ("p/MyFilter.java", filter.as_str()),
            ("p/Stray.java", neither.as_str()),
        ]);

        with_context(&index, |cx, reporter| {
            let rule = build_rule(cx, cx.index.get("p.MyFilter").unwrap()).unwrap();
            assert_eq!(rule.family, Family::Filter);

            assert!(build_rule(cx, cx.index.get("p.Stray").unwrap()).is_err());
            assert_eq!(
                reporter.errors(),
                vec!["Rule \"p.Stray\" cannot be identified as a check or a filter"]
            );
        });
    }

    #[test]
    fn test_missing_required_element() {
        let source = format!(
            "package p;\n{ANNOTATIONS}@Rule(group = \"g\", groupName = \"G\", parent = \"TreeWalker\")\n\
             public class NoName extends com.puppycrawl.tools.checkstyle.api.AbstractCheck {{}}\n"
        );
        let index = index_of(&[("p/NoName.java", source.as_str())]);

        with_context(&index, |cx, reporter| {
            assert_eq!(build_rule(cx, cx.index.get("p.NoName").unwrap()).err(), Some(Skip));
            assert_eq!(reporter.errors(), vec!["'@Rule' lacks the 'name' element"]);
        });
    }

    #[test]
    fn test_messages_over_ancestor_chain() {
        let base = format!(
            "package p;\n{ANNOTATIONS}\
             public abstract class Base extends com.puppycrawl.tools.checkstyle.api.AbstractCheck {{\n\
                 @Message(\"v1\") public static final String MESSAGE_KEY_K = \"K\";\n\
                 @Message(\"same\") public static final String MESSAGE_KEY_S = \"S\";\n\
             }}\n"
        );
        let sub = rule_source("p", "Sub", "Base", "");
        let sub2 = rule_source(
            "p",
            "Sub2",
            "Base",
            "    @Message(\"v2\") public static final String MESSAGE_KEY_K2 = \"K\";\n\
                 @Message(\"same\") public static final String MESSAGE_KEY_S2 = \"S\";\n\
                 @Message(\"own\") public static final String MESSAGE_KEY_OWN = \"own.key\";",
        );
        let index = index_of(&[
            ("p/Base.java", base.as_str()),
            ("p/Sub.java", sub.as_str()),
            ("p/Sub2.java", sub2.as_str()),
        ]);

        with_context(&index, |cx, reporter| {
            let sub = build_rule(cx, cx.index.get("p.Sub").unwrap()).unwrap();
            assert_eq!(sub.messages.get("K").map(String::as_str), Some("v1"));
            assert_eq!(reporter.error_count(), 0);

            let sub2 = build_rule(cx, cx.index.get("p.Sub2").unwrap()).unwrap();
            assert_eq!(sub2.messages.get("K").map(String::as_str), Some("v1"));
            assert_eq!(sub2.messages.get("S").map(String::as_str), Some("same"));
            assert_eq!(sub2.messages.get("own.key").map(String::as_str), Some("own"));
            assert_eq!(
                reporter.errors(),
                vec!["Inconsistent redefinition of message \"K\": Previously \"v1\", now \"v2\""]
            );
        });
    }

    #[test]
    fn test_message_keys_from_constant_expressions() {
        let base = "package p;\n\
                    public abstract class Base extends com.puppycrawl.tools.checkstyle.api.AbstractCheck {\n\
                        protected static final String PREFIX = \"my.check\";\n\
                    }\n";
        let source = rule_source(
            "p",
            "Keyed",
            "Base",
            "    private static final String BAD = PREFIX + \".bad\";\n\
                 @Message(\"Bad\") public static final String MESSAGE_KEY_BAD = BAD;\n\
                 @Message(\"Worse\") public static final String MESSAGE_KEY_WORSE = BAD + \".\" + 2;",
        );
        let index = index_of(&[("p/Base.java", base), ("p/Keyed.java", source.as_str())]);

        with_context(&index, |cx, reporter| {
            let rule = build_rule(cx, cx.index.get("p.Keyed").unwrap()).unwrap();
            assert_eq!(rule.messages.get("my.check.bad").map(String::as_str), Some("Bad"));
            assert_eq!(rule.messages.get("my.check.bad.2").map(String::as_str), Some("Worse"));
            assert_eq!(reporter.error_count(), 0);
        });
    }

    #[test]
    fn test_invalid_message_fields() {
        let source = rule_source(
            "p",
            "Bad",
            "com.puppycrawl.tools.checkstyle.api.AbstractCheck",
            "    @Message(\"x\") public String notConstant = \"a\";\n\
                 @Message(\"y\") public static final int NUMBER = 1;\n\
                 @Message public static final String NO_TEXT = \"k\";",
        );
        let index = index_of(&[("p/Bad.java", source.as_str())]);

        with_context(&index, |cx, reporter| {
            let rule = build_rule(cx, cx.index.get("p.Bad").unwrap()).unwrap();
            assert!(rule.messages.is_empty());
            assert_eq!(
                reporter.errors(),
                vec![
                    "Field 'notConstant' has a '@Message' annotation, but not a constant value",
                    "Constant 'NUMBER' must have type 'String'",
                    "Message lacks a default text",
                ]
            );
        });
    }
}
