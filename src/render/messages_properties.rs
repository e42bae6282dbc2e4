//! `messages.properties`, the default texts of the rule messages of one package

use crate::doc::Reporter;
use crate::model::Rule;
use std::collections::BTreeMap;
use std::fmt::Write;

pub fn render(rules: &[Rule], reporter: &Reporter) -> String {
    let mut out = String::from(
        "\n# This file was generated by the CS doclet; see http://cs-contrib.unkrig.de\n\n\
         # Custom check messages, in alphabetical order.\n",
    );

    let mut messages: BTreeMap<&str, &str> = BTreeMap::new();
    for rule in rules {
        for (key, text) in &rule.messages {
            match messages.get(key.as_str()) {
                None => {
                    messages.insert(key.as_str(), text.as_str());
                }
                Some(previous) if *previous == text.as_str() => {}
                Some(previous) => reporter.error(
                    Some(&rule.position),
                    format!(
                        "Rule \"{}\" redefines message \"{}\" inconsistently; previously \"{}\", now \"{}\"",
                        rule.name, key, previous, text
                    ),
                ),
            }
        }
    }

    for (key, text) in messages {
        let _ = writeln!(out, "{:<32} = {}", key, text);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::test_support::{index_of, with_context, ANNOTATIONS};
    use crate::model::{extract, link};

    fn rule(class: &str, messages: &str) -> String {
        format!(
            "package p;\n{ANNOTATIONS}\
             @Rule(group = \"g\", groupName = \"G\", name = \"{class}\", parent = \"TreeWalker\")\n\
             public class {class} extends com.puppycrawl.tools.checkstyle.api.AbstractCheck {{\n{messages}\n}}\n"
        )
    }

    #[test]
    fn test_render_messages() {
        let a = rule(
            "A",
            "@Message(\"Zed\") public static final String Z = \"z.key\";\n\
             @Message(\"Hello {0}\") public static final String H = \"hello\";",
        );
        let b = rule(
            "B",
            "@Message(\"Hello {0}\") public static final String H = \"hello\";\n\
             @Message(\"Zed!\") public static final String Z = \"z.key\";",
        );
        let index = index_of(&[("p/A.java", a.as_str()), ("p/B.java", b.as_str())]);

        with_context(&index, |cx, reporter| {
            let model = link(extract(cx, &["p".to_string()]), reporter);
            let text = render(&model.packages()[0].rules, reporter);

            let expected = format!(
                "\n# This file was generated by the CS doclet; see http://cs-contrib.unkrig.de\n\n\
                 # Custom check messages, in alphabetical order.\n\
                 {:<32} = Hello {{0}}\n{:<32} = Zed\n",
                "hello", "z.key"
            );
            assert_eq!(text, expected);
            assert_eq!(
                reporter.errors(),
                vec!["Rule \"B\" redefines message \"z.key\" inconsistently; previously \"Zed\", now \"Zed!\""]
            );
        });
    }
}
