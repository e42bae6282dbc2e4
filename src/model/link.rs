//! Linking phase
//!
//! Resolves the quickfix references of all extracted rules against the quickfixes of all
//! extracted packages. Both directions of the relation are only available on [`Model`].

use crate::doc::Reporter;
use crate::error::Result;
use crate::model::extraction::{Extraction, PackageExtraction};
use crate::model::{OptionProvider, Quickfix, Rule};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;
use tracing::debug;

/// The linked rule model of a run
#[derive(Debug)]
pub struct Model {
    packages: Vec<PackageExtraction>,
    /// Ordered by label
    quickfixes: Vec<Quickfix>,
    option_providers: Vec<Rc<OptionProvider>>,
    /// Rule internal name to the indices of its resolved quickfixes
    rule_quickfixes: HashMap<String, Vec<usize>>,
    /// Per quickfix, the internal names of the rules offering it
    quickfix_rules: Vec<Vec<String>>,
}

/// Resolve the quickfix references of every rule in `extraction`
///
/// References to classes that are not quickfixes are reported as warnings and dropped.
pub fn link(extraction: Extraction, reporter: &Reporter) -> Model {
    let Extraction {
        packages,
        option_providers,
    } = extraction;

    let mut registry: BTreeMap<String, Quickfix> = BTreeMap::new();
    for quickfix in packages.iter().flat_map(|p| &p.quickfixes) {
        registry
            .entry(quickfix.class_name.clone())
            .or_insert_with(|| quickfix.clone());
    }
    let mut quickfixes: Vec<Quickfix> = registry.into_values().collect();
    quickfixes.sort_by(|a, b| {
        a.label
            .cmp(&b.label)
            .then_with(|| a.class_name.cmp(&b.class_name))
    });

    let positions: HashMap<&str, usize> = quickfixes
        .iter()
        .enumerate()
        .map(|(i, q)| (q.class_name.as_str(), i))
        .collect();

    let mut rule_quickfixes = HashMap::new();
    let mut quickfix_rules = vec![Vec::new(); quickfixes.len()];

    for rule in packages.iter().flat_map(|p| &p.rules) {
        let Some(names) = &rule.quickfix_class_names else {
            continue;
        };

        let mut resolved = Vec::with_capacity(names.len());
        for name in names {
            match positions.get(name.as_str()) {
                Some(&i) => {
                    resolved.push(i);
                    if !quickfix_rules[i].contains(&rule.internal_name) {
                        quickfix_rules[i].push(rule.internal_name.clone());
                    }
                }
                None => reporter.warning(
                    Some(&rule.position),
                    format!(
                        "{} \"{}\" refers to non-existent quickfix class \"{}\"",
                        rule.family, rule.name, name
                    ),
                ),
            }
        }
        rule_quickfixes.insert(rule.internal_name.clone(), resolved);
    }

    debug!(
        "Linked {} rules and {} quickfixes",
        packages.iter().map(|p| p.rules.len()).sum::<usize>(),
        quickfixes.len()
    );

    Model {
        packages,
        quickfixes,
        option_providers,
        rule_quickfixes,
        quickfix_rules,
    }
}

impl Model {
    pub fn packages(&self) -> &[PackageExtraction] {
        &self.packages
    }

    /// All rules, package by package
    pub fn rules(&self) -> impl Iterator<Item = &Rule> {
        self.packages.iter().flat_map(|p| &p.rules)
    }

    pub fn rule(&self, internal_name: &str) -> Option<&Rule> {
        self.rules().find(|r| r.internal_name == internal_name)
    }

    /// All quickfixes, ordered by label
    pub fn quickfixes(&self) -> &[Quickfix] {
        &self.quickfixes
    }

    /// Class-backed option providers, ordered by class name
    pub fn option_providers(&self) -> &[Rc<OptionProvider>] {
        &self.option_providers
    }

    /// The quickfixes a rule offers, in declaration order; `None` if it declares none
    pub fn quickfixes_of(&self, rule: &Rule) -> Option<Vec<&Quickfix>> {
        rule.quickfix_class_names.as_ref()?;
        let resolved = self.rule_quickfixes.get(&rule.internal_name)?;
        Some(resolved.iter().map(|&i| &self.quickfixes[i]).collect())
    }

    /// The rules offering a quickfix
    pub fn rules_of(&self, quickfix: &Quickfix) -> Vec<&Rule> {
        self.quickfixes
            .iter()
            .position(|q| q.class_name == quickfix.class_name)
            .map(|i| {
                self.quickfix_rules[i]
                    .iter()
                    .filter_map(|name| self.rule(name))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// The linked model as pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        let dump = ModelDump {
            packages: self
                .packages
                .iter()
                .map(|package| PackageDump {
                    name: &package.name,
                    rules: package
                        .rules
                        .iter()
                        .map(|rule| RuleDump {
                            rule,
                            quickfixes: self.quickfixes_of(rule).map(|quickfixes| {
                                quickfixes.iter().map(|q| q.class_name.as_str()).collect()
                            }),
                        })
                        .collect(),
                })
                .collect(),
            quickfixes: self
                .quickfixes
                .iter()
                .map(|quickfix| QuickfixDump {
                    quickfix,
                    rules: self
                        .rules_of(quickfix)
                        .iter()
                        .map(|r| r.internal_name.as_str())
                        .collect(),
                })
                .collect(),
            option_providers: &self.option_providers,
        };
        Ok(serde_json::to_string_pretty(&dump)?)
    }
}

#[derive(Serialize)]
struct ModelDump<'m> {
    packages: Vec<PackageDump<'m>>,
    quickfixes: Vec<QuickfixDump<'m>>,
    option_providers: &'m [Rc<OptionProvider>],
}

#[derive(Serialize)]
struct PackageDump<'m> {
    name: &'m str,
    rules: Vec<RuleDump<'m>>,
}

#[derive(Serialize)]
struct RuleDump<'m> {
    #[serde(flatten)]
    rule: &'m Rule,
    /// Resolved quickfix class names
    quickfixes: Option<Vec<&'m str>>,
}

#[derive(Serialize)]
struct QuickfixDump<'m> {
    #[serde(flatten)]
    quickfix: &'m Quickfix,
    rules: Vec<&'m str>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::extract;
    use crate::model::test_support::{index_of, with_context, ANNOTATIONS};

    fn sources() -> Vec<(String, String)> {
        let rule = |name: &str, quickfixes: &str| {
            format!(
                "package p;\n{ANNOTATIONS}\
                 @Rule(group = \"g\", groupName = \"G\", name = \"{name}\", parent = \"TreeWalker\"{quickfixes})\n\
                 public class {name} extends com.puppycrawl.tools.checkstyle.api.AbstractCheck {{}}\n"
            )
        };
        let fix = |name: &str, label: &str| {
            format!(
                "package q;\n/**\n * Fixes.\n *\n * @cs-label {label}\n */\n\
                 public class {name} implements net.sf.eclipsecs.ui.quickfixes.ICheckstyleMarkerResolution {{}}\n"
            )
        };
        vec![
            (
                "p/R1.java".to_string(),
                rule("R1", ", quickfixes = { q.Q.class, \"q.Gone\", q.Other.class }"),
            ),
            ("p/R2.java".to_string(), rule("R2", "")),
            ("q/Q.java".to_string(), fix("Q", "Zap it")),
            ("q/Other.java".to_string(), fix("Other", "Add it")),
        ]
    }

    #[test]
    fn test_link_quickfixes_both_ways() {
        let sources = sources();
        let borrowed: Vec<(&str, &str)> = sources
            .iter()
            .map(|(path, content)| (path.as_str(), content.as_str()))
            .collect();
        let index = index_of(&borrowed);

        with_context(&index, |cx, reporter| {
            let extraction = extract(cx, &["p".to_string(), "q".to_string()]);
            let model = link(extraction, reporter);

            let labels: Vec<&str> = model.quickfixes().iter().map(|q| q.label.as_str()).collect();
            assert_eq!(labels, vec!["Add it", "Zap it"]);

            let r1 = model.rule("p.R1").unwrap();
            let offered: Vec<&str> = model
                .quickfixes_of(r1)
                .unwrap()
                .iter()
                .map(|q| q.class_name.as_str())
                .collect();
            assert_eq!(offered, vec!["q.Q", "q.Other"]);

            let r2 = model.rule("p.R2").unwrap();
            assert!(model.quickfixes_of(r2).is_none());

            let q = &model.quickfixes()[1];
            let offering: Vec<&str> = model
                .rules_of(q)
                .iter()
                .map(|r| r.internal_name.as_str())
                .collect();
            assert_eq!(offering, vec!["p.R1"]);

            assert_eq!(
                reporter.warnings(),
                vec!["check \"R1\" refers to non-existent quickfix class \"q.Gone\""]
            );
            assert_eq!(reporter.error_count(), 0);
        });
    }

    #[test]
    fn test_model_json() {
        let sources = sources();
        let borrowed: Vec<(&str, &str)> = sources
            .iter()
            .map(|(path, content)| (path.as_str(), content.as_str()))
            .collect();
        let index = index_of(&borrowed);

        with_context(&index, |cx, reporter| {
            let model = link(extract(cx, &["p".to_string(), "q".to_string()]), reporter);
            let json: serde_json::Value = serde_json::from_str(&model.to_json().unwrap()).unwrap();

            assert_eq!(json["packages"][0]["name"], "p");
            assert_eq!(json["packages"][0]["rules"][0]["internal_name"], "p.R1");
            assert_eq!(json["packages"][0]["rules"][0]["family"], "check");
            assert_eq!(json["packages"][0]["rules"][0]["quickfixes"][1], "q.Other");
            assert_eq!(json["quickfixes"][1]["rules"][0], "p.R1");
        });
    }
}
