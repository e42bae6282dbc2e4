//! Doc comment to HTML conversion
//!
//! Expands the inline tags of a doc comment (`{@code}`, `{@literal}`, `{@value}`,
//! `{@link}`, `{@linkplain}`, `{@docRoot}`) and resolves `where#what` references against
//! the declaration index.

use crate::doc::comment::Javadoc;
use crate::doc::diagnostics::{Reporter, Skip};
use crate::doc::links::{DocTarget, LinkMaker};
use crate::extractors::base::{ClassDecl, SourcePosition};
use crate::extractors::index::DeclarationIndex;
use crate::extractors::java::erase_type_arguments;
use once_cell::sync::Lazy;
use regex::Regex;

static DOC_TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{@([^\s}]+)(?:\s+([^\s}][^}]*))?\}").expect("valid regex")
});

static LINE_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*\n\s*").expect("valid regex"));

static CODE_ELEMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<code>(.*?)</code>").expect("valid regex"));

static MARKUP: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<\s*\w.*>").expect("valid regex"));

/// The declaration a piece of documentation belongs to
#[derive(Debug, Clone, Copy)]
pub struct DocContext<'a> {
    /// References without a class part resolve against this class
    pub class: &'a ClassDecl,
    /// Where diagnostics are reported
    pub position: &'a SourcePosition,
}

impl<'a> DocContext<'a> {
    pub fn of_class(class: &'a ClassDecl) -> Self {
        Self {
            class,
            position: &class.position,
        }
    }

    pub fn at(class: &'a ClassDecl, position: &'a SourcePosition) -> Self {
        Self { class, position }
    }
}

/// Short and long description of a declaration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Descriptions {
    pub short: String,
    pub long: String,
}

pub struct Html<'a> {
    index: &'a DeclarationIndex,
    links: &'a LinkMaker<'a>,
    reporter: &'a Reporter,
}

impl<'a> Html<'a> {
    pub fn new(index: &'a DeclarationIndex, links: &'a LinkMaker<'a>, reporter: &'a Reporter) -> Self {
        Self {
            index,
            links,
            reporter,
        }
    }

    /// Expand the inline tags of doc comment text
    pub fn from_javadoc(&self, text: &str, context: &DocContext<'a>) -> String {
        self.expand(text, context, true)
    }

    /// First sentence and full main description of a doc comment, as HTML
    ///
    /// Problems are reported once, for the full description.
    pub fn descriptions(&self, doc_comment: Option<&str>, context: &DocContext<'a>) -> Descriptions {
        let javadoc = Javadoc::parse(doc_comment.unwrap_or(""));
        Descriptions {
            short: self.expand(javadoc.first_sentence(), context, false),
            long: self.expand(&javadoc.body, context, true),
        }
    }

    /// Text of a block tag that may appear at most once, line breaks collapsed
    pub fn optional_tag(
        &self,
        doc_comment: Option<&str>,
        tag_name: &str,
        context: &DocContext<'a>,
    ) -> Result<Option<String>, Skip> {
        let javadoc = Javadoc::parse(doc_comment.unwrap_or(""));
        let tags: Vec<_> = javadoc.tags(tag_name).collect();

        match tags.as_slice() {
            [] => Ok(None),
            [tag] => {
                let text = LINE_BREAK.replace_all(&tag.text, " ");
                Ok(Some(self.from_javadoc(&text, context)))
            }
            _ => Err(self.reporter.skip(
                Some(context.position),
                format!("'@{}' must appear at most once", tag_name),
            )),
        }
    }

    fn expand(&self, text: &str, context: &DocContext<'a>, report: bool) -> String {
        let muted = Reporter::muted();
        let reporter = if report { self.reporter } else { &muted };
        let mut result = String::with_capacity(text.len());
        let mut last = 0;

        for caps in DOC_TAG.captures_iter(text) {
            let Some(whole) = caps.get(0) else {
                continue;
            };
            result.push_str(&text[last..whole.start()]);
            last = whole.end();

            let tag = caps.get(1).map_or("", |m| m.as_str());
            let argument = caps.get(2).map(|m| m.as_str().trim_end());
            result.push_str(&self.expand_inline_tag(tag, argument, whole.as_str(), context, reporter));
        }

        result.push_str(&text[last..]);
        result
    }

    fn expand_inline_tag(
        &self,
        tag: &str,
        argument: Option<&str>,
        literal: &str,
        context: &DocContext<'a>,
        reporter: &Reporter,
    ) -> String {
        match tag {
            "code" => format!("<code>{}</code>", escape_html(argument.unwrap_or(""))),
            "literal" => escape_html(argument.unwrap_or("")),
            "docRoot" => ".".to_string(),
            "value" => {
                let reference = argument.unwrap_or("");
                self.constant_value(reference, context, reporter)
                    .unwrap_or_else(|Skip| escape_html(reference))
            }
            "link" | "linkplain" => {
                let Some(argument) = argument else {
                    reporter.error(
                        Some(context.position),
                        format!("'{}' lacks a reference", literal),
                    );
                    return literal.to_string();
                };
                self.link(argument, tag == "linkplain", context, reporter)
            }
            _ => {
                reporter.error(
                    Some(context.position),
                    format!("Inline tag '{{@{}}}' is not supported", tag),
                );
                literal.to_string()
            }
        }
    }

    fn constant_value(
        &self,
        reference: &str,
        context: &DocContext<'a>,
        reporter: &Reporter,
    ) -> Result<String, Skip> {
        match self.resolve(reference, context, reporter)? {
            DocTarget::Field(_, field) => field
                .constant_value
                .as_ref()
                .map(|value| escape_html(&value.to_string()))
                .ok_or_else(|| {
                    reporter.skip(
                        Some(context.position),
                        format!("Field '{}' does not have a constant value", reference),
                    )
                }),
            _ => Err(reporter.skip(
                Some(context.position),
                format!("'{}' does not designate a field", reference),
            )),
        }
    }

    fn link(
        &self,
        argument: &str,
        plain: bool,
        context: &DocContext<'a>,
        reporter: &Reporter,
    ) -> String {
        let (reference, label) = split_reference(argument);

        let target = match self.resolve(reference, context, reporter) {
            Ok(target) => target,
            Err(Skip) => return escape_html(label.unwrap_or(reference)),
        };

        let label = label
            .map(str::to_string)
            .unwrap_or_else(|| escape_html(&target.label(context.class)));
        let label = if plain {
            label
        } else {
            format!("<code>{}</code>", label)
        };

        match self.links.make_link(&target) {
            Some(href) => format!("<a href=\"{}\">{}</a>", href, label),
            None => label,
        }
    }

    /// Resolve a `where#what` reference
    ///
    /// `where` may be empty (the context class), a member type, a qualified class name,
    /// a class visible through the imports or the package, or a package.
    pub fn find_doc(&self, context: &DocContext<'a>, reference: &str) -> Result<DocTarget<'a>, Skip> {
        self.resolve(reference, context, self.reporter)
    }

    fn resolve(
        &self,
        reference: &str,
        context: &DocContext<'a>,
        reporter: &Reporter,
    ) -> Result<DocTarget<'a>, Skip> {
        let (where_part, what) = match reference.split_once('#') {
            Some((where_part, what)) => (where_part.trim(), Some(what.trim())),
            None => (reference.trim(), None),
        };

        let class = if where_part.is_empty() {
            context.class
        } else if let Some(class) = self.index.resolve_class(context.class, where_part) {
            class
        } else if let Some(package) = self.index.packages().find(|p| *p == where_part) {
            if what.is_some() {
                return Err(reporter.skip(Some(context.position), "Cannot use '#' on package"));
            }
            return Ok(DocTarget::Package(package));
        } else {
            return Err(reporter.skip(
                Some(context.position),
                format!("Class '{}' not found", where_part),
            ));
        };

        let Some(what) = what else {
            return Ok(DocTarget::Class(class));
        };

        self.find_member(class, what).ok_or_else(|| {
            let where_name = if where_part.is_empty() {
                class.qualified_name.as_str()
            } else {
                where_part
            };
            reporter.skip(
                Some(context.position),
                format!("Cannot find '{}' in '{}'", what, where_name),
            )
        })
    }

    /// Field, enum constant or method of a class or its superclasses
    fn find_member(&self, class: &'a ClassDecl, what: &str) -> Option<DocTarget<'a>> {
        let signature = what
            .split_once('(')
            .map(|(name, params)| (name.trim(), normalize_parameters(params.trim_end_matches(')'))));

        for owner in self.index.superclass_chain(class) {
            let target = match &signature {
                Some((name, params)) => owner
                    .methods
                    .iter()
                    .find(|m| {
                        m.name == *name
                            && normalize_parameters(
                                &m.parameters
                                    .iter()
                                    .map(|p| p.type_name.as_str())
                                    .collect::<Vec<_>>()
                                    .join(","),
                            ) == *params
                    })
                    .map(|m| DocTarget::Method(owner, m)),
                None => owner
                    .fields
                    .iter()
                    .find(|f| f.name == what)
                    .map(|f| DocTarget::Field(owner, f))
                    .or_else(|| {
                        owner
                            .enum_constants
                            .iter()
                            .find(|c| c.name == what)
                            .map(|c| DocTarget::EnumConstant(owner, c))
                    })
                    .or_else(|| {
                        owner
                            .methods
                            .iter()
                            .find(|m| m.name == what)
                            .map(|m| DocTarget::Method(owner, m))
                    }),
            };
            if target.is_some() {
                return target;
            }
        }

        None
    }
}

/// Split `Foo#bar(int, String) the label` into reference and optional label
fn split_reference(argument: &str) -> (&str, Option<&str>) {
    let mut depth = 0usize;
    for (i, c) in argument.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            c if c.is_whitespace() && depth == 0 => {
                let label = argument[i..].trim();
                return (&argument[..i], (!label.is_empty()).then_some(label));
            }
            _ => {}
        }
    }
    (argument, None)
}

/// `java.lang.String, List<X>` -> `String,List`
fn normalize_parameters(params: &str) -> String {
    params
        .split(',')
        .map(|p| erase_type_arguments(p.trim()))
        .map(|p| p.rsplit('.').next().unwrap_or("").to_string())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(",")
}

/// Convert HTML to plain text; `<code>` elements are unwrapped, any other markup is
/// reported
pub fn html_to_plain_text(html: &str, reporter: &Reporter, position: Option<&SourcePosition>) -> String {
    let text = CODE_ELEMENT.replace_all(html, "$1");

    if MARKUP.is_match(&text) {
        reporter.warning(
            position,
            format!("'{}' cannot be reasonably converted to plain text", html),
        );
    }

    unescape_html(&text)
}

pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn unescape_html(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::manager::ExtractorManager;

    const QUICKFIX_MARKER: &str = "net.sf.eclipsecs.ui.quickfixes.ICheckstyleMarkerResolution";

    fn index_of(sources: &[(&str, &str)]) -> DeclarationIndex {
        let manager = ExtractorManager::new();
        let mut index = DeclarationIndex::new();
        for (path, content) in sources {
            index.add_unit(manager.extract_unit(path, content).unwrap());
        }
        index.resolve_constants();
        index
    }

    fn sample_index() -> DeclarationIndex {
        index_of(&[
            (
                "p/MyCheck.java",
                r#"
package p;

import com.puppycrawl.tools.checkstyle.api.AbstractCheck;

@Rule(group = "g", groupName = "G", name = "My", parent = "TreeWalker")
public class MyCheck extends AbstractCheck {
    public static final int LIMIT = 80;
    public String notConstant = "x";
    public void setLimit(int limit, java.util.List<String> names) {}
}
"#,
            ),
            (
                "p/MyFix.java",
                r#"
package p;

public class MyFix implements net.sf.eclipsecs.ui.quickfixes.ICheckstyleMarkerResolution {}
"#,
            ),
        ])
    }

    fn with_html<R>(
        index: &DeclarationIndex,
        f: impl for<'x> FnOnce(&Html<'x>, &DocContext<'x>, &Reporter) -> R,
    ) -> R {
        let checks = vec!["com.puppycrawl.tools.checkstyle.api.AbstractCheck".to_string()];
        let filters = vec!["com.puppycrawl.tools.checkstyle.api.Filter".to_string()];
        let quickfixes = vec![QUICKFIX_MARKER.to_string()];
        let links = LinkMaker::new(index, &checks, &filters, &quickfixes);
        let reporter = Reporter::new();
        let html = Html::new(index, &links, &reporter);
        let class = index.get("p.MyCheck").unwrap();
        let context = DocContext::of_class(class);
        f(&html, &context, &reporter)
    }

    #[test]
    fn test_code_literal_and_value() {
        let index = sample_index();
        with_html(&index, |html, context, reporter| {
            assert_eq!(
                html.from_javadoc("Use {@code a < b} or {@literal x&y}; max {@value #LIMIT}.", context),
                "Use <code>a &lt; b</code> or x&amp;y; max 80."
            );
            assert_eq!(reporter.error_count(), 0);

            html.from_javadoc("{@value #notConstant} {@value #setLimit}", context);
            assert_eq!(
                reporter.errors(),
                vec![
                    "Field '#notConstant' does not have a constant value",
                    "'#setLimit' does not designate a field"
                ]
            );
        });
    }

    #[test]
    fn test_links() {
        let index = sample_index();
        with_html(&index, |html, context, reporter| {
            assert_eq!(
                html.from_javadoc("See {@link MyFix}.", context),
                "See <a href=\"quickfixes/MyFix.html\"><code>MyFix</code></a>."
            );
            assert_eq!(
                html.from_javadoc("{@linkplain p.MyCheck the check}", context),
                "<a href=\"checks/MyCheck.html\">the check</a>"
            );
            assert_eq!(
                html.from_javadoc("{@link #setLimit(int, List)}", context),
                "<code>setLimit()</code>"
            );
            assert_eq!(html.from_javadoc("{@link Missing label}", context), "label");
            assert_eq!(reporter.errors(), vec!["Class 'Missing' not found"]);
        });
    }

    #[test]
    fn test_unsupported_inline_tag_passes_through() {
        let index = sample_index();
        with_html(&index, |html, context, reporter| {
            assert_eq!(html.from_javadoc("a {@foo bar} b", context), "a {@foo bar} b");
            assert_eq!(reporter.errors(), vec!["Inline tag '{@foo}' is not supported"]);
        });
    }

    #[test]
    fn test_descriptions_report_once() {
        let index = sample_index();
        with_html(&index, |html, context, reporter| {
            let descriptions =
                html.descriptions(Some("Checks {@bad}. More text.\n\n@since 1"), context);
            assert_eq!(descriptions.short, "Checks {@bad}.");
            assert_eq!(descriptions.long, "Checks {@bad}. More text.");
            assert_eq!(reporter.error_count(), 1);
        });
    }

    #[test]
    fn test_optional_tag() {
        let index = sample_index();
        with_html(&index, |html, context, reporter| {
            assert_eq!(
                html.optional_tag(Some("Text.\n@cs-label Fix\n   the {@code x}"), "cs-label", context),
                Ok(Some("Fix the <code>x</code>".to_string()))
            );
            assert_eq!(html.optional_tag(Some("Text."), "cs-label", context), Ok(None));
            assert_eq!(
                html.optional_tag(Some("@cs-label A\n@cs-label B"), "cs-label", context),
                Err(Skip)
            );
            assert_eq!(reporter.errors(), vec!["'@cs-label' must appear at most once"]);
        });
    }

    #[test]
    fn test_find_doc_on_package() {
        let index = sample_index();
        with_html(&index, |html, context, reporter| {
            assert!(matches!(html.find_doc(context, "p"), Ok(DocTarget::Package("p"))));
            assert!(html.find_doc(context, "p#x").is_err());
            assert!(matches!(
                html.find_doc(context, "#LIMIT"),
                Ok(DocTarget::Field(_, field)) if field.name == "LIMIT"
            ));
            assert_eq!(reporter.errors(), vec!["Cannot use '#' on package"]);
        });
    }

    #[test]
    fn test_html_to_plain_text() {
        let reporter = Reporter::new();
        assert_eq!(
            html_to_plain_text("Use <code>a &lt; b</code> here", &reporter, None),
            "Use a < b here"
        );
        assert_eq!(reporter.warning_count(), 0);

        html_to_plain_text("With <b>bold</b>", &reporter, None);
        assert_eq!(
            reporter.warnings(),
            vec!["'With <b>bold</b>' cannot be reasonably converted to plain text"]
        );
    }
}
