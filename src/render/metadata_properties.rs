//! `checkstyle-metadata.properties`, the texts referenced by `checkstyle-metadata.xml`

use crate::doc::{html_to_plain_text, Reporter};
use crate::model::{Model, Rule};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{BTreeMap, HashMap};
use std::fmt::Write;

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Names of the groups that CheckStyle itself localizes
static STANDARD_GROUPS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("Annotation.group", "Annotations"),
        ("Javadoc.group", "Javadoc Comments"),
        ("Naming.group", "Naming Conventions"),
        ("Headers.group", "Headers"),
        ("Imports.group", "Imports"),
        ("Sizes.group", "Size Violations"),
        ("Whitespace.group", "Whitespace"),
        ("Regexp.group", "Regexp"),
        ("Modifiers.group", "Modifiers"),
        ("Blocks.group", "Blocks"),
        ("Coding.group", "Coding Problems"),
        ("Design.group", "Class Design"),
        ("Duplicates.group", "Duplicates"),
        ("Metrics.group", "Metrics"),
        ("Miscellaneous.group", "Miscellaneous"),
        ("Other.group", "Other"),
        ("Filters.group", "Filters"),
    ])
});

/// Render the metadata texts of `rules`
pub fn render(model: &Model, rules: &[Rule], reporter: &Reporter) -> String {
    let mut out = String::new();
    out.push_str(
        "\n# This file was generated by the CheckStyle doclet; see http://cs-doclet.unkrig.de\n\n# Rule groups:\n",
    );

    for (group, name) in localized_groups(rules, reporter) {
        let _ = writeln!(out, "{:<16} = {}", group, name);
    }

    out.push_str("\n# Custom checks, in alphabetical order.\n");

    for rule in rules {
        let _ = write!(
            out,
            "\n# --------------- {name} ---------------\n\n{simple}.name = {name}\n{simple}.desc =\\\n",
            name = rule.name,
            simple = rule.simple_name
        );

        let mut description = rule.long_description.clone();
        if let Some(quickfixes) = model.quickfixes_of(rule).filter(|q| !q.is_empty()) {
            description.push_str("\n\n<h4>Quickfixes:</h4>\n<dl>\n");
            for quickfix in quickfixes {
                let _ = write!(
                    description,
                    "  <dt>{}\n  <dd>{}\n",
                    quickfix.label, quickfix.short_description
                );
            }
            description.push_str("</dl>");
        }
        push_property_value(&mut out, &description);

        for property in &rule.properties {
            let text = html_to_plain_text(
                &property.short_description,
                reporter,
                Some(&property.position),
            );
            let text = WHITESPACE.replace_all(&text, " ");
            let _ = writeln!(
                out,
                "{:<40} = {}",
                format!("{}.{}", rule.simple_name, property.name),
                text
            );
        }
    }

    out
}

/// Localized groups (`%Key`) and their names, sorted by key
fn localized_groups<'r>(rules: &'r [Rule], reporter: &Reporter) -> BTreeMap<&'r str, &'r str> {
    let mut groups: BTreeMap<&str, &str> = BTreeMap::new();

    for rule in rules {
        let Some(group) = rule.group.strip_prefix('%') else {
            continue;
        };
        let name = rule.group_name.as_str();

        match groups.get(group) {
            Some(previous) if *previous != name => {
                reporter.error(
                    Some(&rule.position),
                    format!(
                        "Non-equal redefinition of name of group '{}': Previously '{}', now '{}'",
                        group, previous, name
                    ),
                );
                continue;
            }
            Some(_) => continue,
            None => {}
        }

        if let Some(standard) = STANDARD_GROUPS.get(group).filter(|s| **s != name) {
            reporter.warning(
                Some(&rule.position),
                format!("Group name differs from CS's standard group name '{}'", standard),
            );
        }
        groups.insert(group, name);
    }

    groups
}

/// A multi-line value in continuation-line format
///
/// Each line is indented with a tab; a leading space is escaped so that it survives.
fn push_property_value(out: &mut String, text: &str) {
    let lines: Vec<String> = text
        .lines()
        .map(|line| {
            if line.starts_with(' ') {
                format!("\t\\{}", line)
            } else {
                format!("\t{}", line)
            }
        })
        .collect();
    out.push_str(&lines.join("\\n\\\n"));
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::test_support::{index_of, with_context, ANNOTATIONS};
    use crate::model::{extract, link};

    fn rule(class: &str, group: &str, group_name: &str, extra: &str, body: &str) -> String {
        format!(
            "package p;\n{ANNOTATIONS}/**\n * Checks {class}.\n *  Indented.\n */\n\
             @Rule(group = \"{group}\", groupName = \"{group_name}\", name = \"{class} rule\", parent = \"TreeWalker\"{extra})\n\
             public class {class} extends com.puppycrawl.tools.checkstyle.api.AbstractCheck {{\n{body}\n}}\n"
        )
    }

    #[test]
    fn test_render_metadata_properties() {
        let a = rule(
            "ACheck",
            "%Coding.group",
            "Coding Problems",
            ", quickfixes = AFix.class",
            "    /** The {@code max}\n     *  value. */\n    @IntegerRuleProperty public void setMax(int max) {}",
        );
        let b = rule("BCheck", "%My.group", "Mine", "", "");
        let fix = "package p;\n/**\n * Fixes it.\n *\n * @cs-label Fix A\n */\n\
                   public class AFix implements net.sf.eclipsecs.ui.quickfixes.ICheckstyleMarkerResolution {}\n";
        let index = index_of(&[
            ("p/ACheck.java", a.as_str()),
            ("p/BCheck.java", b.as_str()),
            ("p/AFix.java", fix),
        ]);

        let text = with_context(&index, |cx, reporter| {
            let model = link(extract(cx, &["p".to_string()]), reporter);
            let text = render(&model, &model.packages()[0].rules, reporter);
            assert_eq!(reporter.error_count(), 0);
            assert_eq!(reporter.warning_count(), 0);
            text
        });

        let header = format!(
            "\n# This file was generated by the CheckStyle doclet; see http://cs-doclet.unkrig.de\n\n\
             # Rule groups:\n{:<16} = Coding Problems\n{:<16} = Mine\n\n\
             # Custom checks, in alphabetical order.\n",
            "Coding.group", "My.group"
        );
        assert!(text.starts_with(&header));
        assert!(text.contains(
            "\n# --------------- ACheck rule ---------------\n\n\
             ACheck.name = ACheck rule\n\
             ACheck.desc =\\\n\
             \tChecks ACheck.\\n\\\n\
             \t\\ Indented.\\n\\\n\
             \t\\n\\\n\
             \t<h4>Quickfixes:</h4>\\n\\\n\
             \t<dl>\\n\\\n\
             \t\\  <dt>Fix A\\n\\\n\
             \t\\  <dd>Fixes it.\\n\\\n\
             \t</dl>\n"
        ));
        assert!(text.contains(&format!("{:<40} = The max value.\n", "ACheck.max")));
        assert!(text.contains("BCheck.desc =\\\n\tChecks BCheck.\\n\\\n\t\\ Indented.\n"));
    }

    #[test]
    fn test_group_diagnostics() {
        let a = rule("ACheck", "%Coding.group", "Coding", "", "");
        let b = rule("BCheck", "%Coding.group", "Other name", "", "");
        let c = rule("CCheck", "Unlocalized", "Whatever", "", "");
        let index = index_of(&[
            ("p/ACheck.java", a.as_str()),
            ("p/BCheck.java", b.as_str()),
            ("p/CCheck.java", c.as_str()),
        ]);

        with_context(&index, |cx, reporter| {
            let model = link(extract(cx, &["p".to_string()]), reporter);
            let text = render(&model, &model.packages()[0].rules, reporter);

            assert!(text.contains(&format!("{:<16} = Coding\n", "Coding.group")));
            assert!(!text.contains("Unlocalized"));
            assert_eq!(
                reporter.warnings(),
                vec!["Group name differs from CS's standard group name 'Coding Problems'"]
            );
            assert_eq!(
                reporter.errors(),
                vec!["Non-equal redefinition of name of group 'Coding.group': Previously 'Coding', now 'Other name'"]
            );
        });
    }
}
