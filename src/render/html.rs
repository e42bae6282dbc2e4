//! HTML documentation
//!
//! Pages live in one directory per kind (`checks/`, `filters/`, `quickfixes/`,
//! `option-providers/`) below the output root, next to `overview-summary.html`.
//! Links are written relative to the output root and rebased per page.

use crate::config::DocletConfig;
use crate::doc::escape_html;
use crate::model::{Family, Model, OptionProvider, Quickfix, Rule, RuleProperty};
use crate::render::{capitalize, property_nav, Markup};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt::Write;
use std::path::PathBuf;

/// A rendered page and its path relative to the output root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub path: PathBuf,
    pub content: String,
}

/// Render every page of the model
pub fn render_pages(model: &Model, config: &DocletConfig) -> Vec<Page> {
    let mut pages = Vec::new();

    for family in [Family::Check, Family::Filter] {
        for rule in model.rules().filter(|r| r.family == family) {
            pages.push(Page {
                path: rule_page_path(rule),
                content: rule_page(model, rule, config),
            });
        }
    }

    for quickfix in model.quickfixes() {
        pages.push(Page {
            path: PathBuf::from("quickfixes").join(format!("{}.html", quickfix.simple_name)),
            content: quickfix_page(model, quickfix, config),
        });
    }

    for provider in model.option_providers() {
        if let Some(class_name) = &provider.class_name {
            pages.push(Page {
                path: PathBuf::from("option-providers").join(format!("{}.html", class_name)),
                content: option_provider_page(provider, config),
            });
        }
    }

    pages.push(Page {
        path: PathBuf::from("overview-summary.html"),
        content: overview_page(model, config),
    });

    pages
}

fn rule_page_path(rule: &Rule) -> PathBuf {
    PathBuf::from(rule.family_plural()).join(format!("{}.html", rule.simple_name))
}

/// Prefix of the output root as seen from a page one directory below it
const PARENT: &str = "../";

static LINK_ATTRIBUTE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)\b(href|src)="([^"]*)""#).expect("valid regex"));

/// Prefix every root-relative `href` and `src` in `html` with `root`
fn rebase_links<'h>(html: &'h str, root: &str) -> Cow<'h, str> {
    if root.is_empty() {
        return Cow::Borrowed(html);
    }
    LINK_ATTRIBUTE.replace_all(html, |caps: &Captures| {
        let target = &caps[2];
        if target.is_empty() || target.starts_with('#') || target.starts_with('/') || target.contains(':') {
            caps[0].to_string()
        } else {
            format!("{}=\"{}{}\"", &caps[1], root, target)
        }
    })
}

fn document(config: &DocletConfig, title: &str, root: &str, body: &str) -> String {
    let window_title = match &config.window_title {
        Some(window_title) => format!("{} ({})", title, window_title),
        None => title.to_string(),
    };
    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         <head>\n\
         <meta charset=\"UTF-8\">\n\
         <title>{}</title>\n\
         </head>\n\
         <body>\n\
         {}\
         </body>\n\
         </html>\n",
        escape_html(&window_title),
        rebase_links(body, root)
    )
}

fn rule_page(model: &Model, rule: &Rule, config: &DocletConfig) -> String {
    let family = capitalize(rule.family_singular());
    let title = format!("{} \"{}\"", family, rule.name);

    let mut body = String::new();
    let _ = write!(
        body,
        "<h1 class=\"title\">{}</h1>\n<div class=\"description\">\n{}\n</div>\n",
        escape_html(&title),
        rule.long_description
    );

    if !rule.properties.is_empty() {
        body.push_str(
            "<h2><a name=\"property_summary\">Property Summary</a></h2>\n\
             <table class=\"memberSummary\">\n<tr><th>Name</th><th>Description</th></tr>\n",
        );
        for property in &rule.properties {
            let _ = writeln!(
                body,
                "<tr><td><a href=\"#property_{name}\">{name}</a></td><td>{}</td></tr>",
                property.short_description,
                name = property.name
            );
        }
        body.push_str("</table>\n<h2><a name=\"property_detail\">Property Detail</a></h2>\n");
        for property in &rule.properties {
            property_detail(&mut body, property);
        }
    }

    if let Some(quickfixes) = model.quickfixes_of(rule).filter(|q| !q.is_empty()) {
        body.push_str("<h2>Quickfixes</h2>\n<dl>\n");
        for quickfix in quickfixes {
            let _ = write!(
                body,
                "  <dt><a href=\"quickfixes/{}.html\">{}</a></dt>\n  <dd>{}</dd>\n",
                quickfix.simple_name,
                escape_html(&quickfix.label),
                quickfix.short_description
            );
        }
        body.push_str("</dl>\n");
    }

    document(config, &title, PARENT, &body)
}

fn property_detail(body: &mut String, property: &RuleProperty) {
    let _ = write!(
        body,
        "<a name=\"property_{}\"></a>\n<h4>{}</h4>\n<div class=\"block\">{}</div>\n",
        property.name,
        property_nav(property, Markup::Html),
        property.long_description
    );

    let Some(provider) = &property.option_provider else {
        return;
    };
    if let Some(class_name) = &provider.class_name {
        let _ = writeln!(
            body,
            "<p>Values are provided by <a href=\"option-providers/{}.html\">{}</a>.</p>",
            class_name,
            escape_html(provider.name.as_deref().unwrap_or(class_name))
        );
    }
    if provider.value_options.iter().any(|v| v.short_description.is_some()) {
        body.push_str("<dl>\n");
        for option in &provider.value_options {
            let _ = write!(
                body,
                "  <dt><code>{}</code></dt>\n  <dd>{}</dd>\n",
                option.name,
                option.short_description.as_deref().unwrap_or("")
            );
        }
        body.push_str("</dl>\n");
    }
}

fn quickfix_page(model: &Model, quickfix: &Quickfix, config: &DocletConfig) -> String {
    let title = format!("Quickfix \"{}\"", quickfix.label);

    let mut body = String::new();
    let _ = write!(
        body,
        "<h1 class=\"title\">{}</h1>\n<div class=\"description\">\n{}\n",
        escape_html(&title),
        quickfix.long_description
    );

    let rules = model.rules_of(quickfix);
    if !rules.is_empty() {
        body.push_str("<h3>Checks offering this quickfixes:</h3>\n<dl>\n");
        for rule in rules {
            let _ = write!(
                body,
                "  <dt><a href=\"{}\">{}</a></dt>\n  <dd>{}</dd>\n",
                rule_page_path(rule).to_string_lossy().replace('\\', "/"),
                escape_html(&rule.name),
                rule.short_description
            );
        }
        body.push_str("</dl>\n");
    }
    body.push_str("</div>\n");

    document(config, &title, PARENT, &body)
}

fn option_provider_page(provider: &OptionProvider, config: &DocletConfig) -> String {
    let name = provider
        .name
        .as_deref()
        .or(provider.class_name.as_deref())
        .unwrap_or_default();
    let title = format!("Option Provider \"{}\"", name);

    let mut body = String::new();
    let _ = write!(
        body,
        "<h1 class=\"title\">{}</h1>\n<div class=\"description\">\n{}\n</div>\n",
        escape_html(&title),
        provider.long_description.as_deref().unwrap_or("")
    );

    body.push_str(
        "<h2>Constant Summary</h2>\n<table class=\"memberSummary\">\n\
         <tr><th>Name</th><th>Description</th></tr>\n",
    );
    for option in &provider.value_options {
        let _ = writeln!(
            body,
            "<tr><td><code>{}</code></td><td>{}</td></tr>",
            option.name,
            option.short_description.as_deref().unwrap_or("")
        );
    }
    body.push_str("</table>\n");

    document(config, &title, PARENT, &body)
}

fn overview_page(model: &Model, config: &DocletConfig) -> String {
    let mut body = String::new();
    if let Some(doc_title) = &config.doc_title {
        let _ = writeln!(body, "<h1 class=\"title\">{}</h1>", escape_html(doc_title));
    }

    let mut by_family: BTreeMap<&str, Vec<&Rule>> = BTreeMap::new();
    for rule in model.rules() {
        by_family.entry(rule.family_plural()).or_default().push(rule);
    }

    for (family, mut rules) in by_family {
        rules.sort_by(|a, b| a.name.cmp(&b.name));
        let _ = write!(
            body,
            "<h2><a name=\"{family}\">{}</a></h2>\n<table class=\"overviewSummary\" summary=\"{family}\">\n\
             <tr><th>Name</th><th>Description</th></tr>\n",
            capitalize(family),
        );
        for rule in rules {
            let _ = writeln!(
                body,
                "<tr><td><a href=\"{}/{}.html\">{}</a></td><td>{}</td></tr>",
                family,
                rule.simple_name,
                escape_html(&rule.name),
                rule.short_description
            );
        }
        body.push_str("</table>\n");
    }

    body.push_str(
        "<h2><a name=\"quickfixes\">Quickfixes</a></h2>\n\
         <table class=\"overviewSummary\" summary=\"Quickfixes for the checks.\">\n\
         <tr><th>Name</th><th>Description</th></tr>\n",
    );
    for quickfix in model.quickfixes() {
        let _ = writeln!(
            body,
            "<tr><td><a href=\"quickfixes/{}.html\">{}</a></td><td>{}</td></tr>",
            quickfix.simple_name,
            escape_html(&quickfix.label),
            quickfix.short_description
        );
    }
    body.push_str("</table>\n");

    document(config, "Overview", "", &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::test_support::{index_of, with_context, ANNOTATIONS};
    use crate::model::{extract, link};

    fn sample_pages() -> (Vec<Page>, Vec<String>) {
        let check = |class: &str, name: &str, doc: &str, extra: &str| {
            format!(
                r#"package p;
{ANNOTATIONS}
/** {doc} */
@Rule(group = "g", groupName = "G", name = "{name}", parent = "TreeWalker"{extra})
public class {class} extends com.puppycrawl.tools.checkstyle.api.AbstractCheck {{
    /** The mode. */
    @SingleSelectRuleProperty(optionProvider = Mode.class, defaultValue = "off")
    public void setMode(String mode) {{}}
}}
"#
            )
        };
        let b = check("BCheck", "Beta", "Checks BCheck.", ", quickfixes = Fix.class");
        let a = check("ACheck", "Alpha", "Unlike {@link BCheck}, checks ACheck.", "");
        let filter = format!(
            "package p;\n{ANNOTATIONS}/** Filters. */\n\
             @Rule(group = \"g\", groupName = \"G\", name = \"Sieve\", parent = \"Checker\")\n\
             public class Sieve implements com.puppycrawl.tools.checkstyle.api.Filter {{}}\n"
        );
        let index = index_of(&[
            ("p/BCheck.java", b.as_str()),
            ("p/ACheck.java", a.as_str()),
            ("p/Sieve.java", filter.as_str()),
            (
                "p/Mode.java",
                "package p;\n/** Modes. */\npublic enum Mode {\n    /** Enabled. */\n    ON,\n    /** Disabled. */\n    OFF\n}\n",
            ),
            (
                "p/Fix.java",
                "package p;\n/**\n * Fixes.\n *\n * @cs-label Fix it\n */\n\
                 public class Fix implements net.sf.eclipsecs.ui.quickfixes.ICheckstyleMarkerResolution {}\n",
            ),
        ]);

        with_context(&index, |cx, reporter| {
            let model = link(extract(cx, &["p".to_string()]), reporter);
            let config = DocletConfig {
                window_title: Some("My checks".to_string()),
                doc_title: Some("All my checks".to_string()),
                ..DocletConfig::default()
            };
            (render_pages(&model, &config), reporter.errors())
        })
    }

    fn page<'p>(pages: &'p [Page], path: &str) -> &'p str {
        &pages
            .iter()
            .find(|p| p.path == PathBuf::from(path))
            .unwrap_or_else(|| panic!("no page {}", path))
            .content
    }

    #[test]
    fn test_page_set() {
        let (pages, errors) = sample_pages();
        assert!(errors.is_empty(), "{:?}", errors);

        let paths: Vec<String> = pages
            .iter()
            .map(|p| p.path.to_string_lossy().replace('\\', "/"))
            .collect();
        assert_eq!(
            paths,
            vec![
                "checks/ACheck.html",
                "checks/BCheck.html",
                "filters/Sieve.html",
                "quickfixes/Fix.html",
                "option-providers/p.Mode.html",
                "overview-summary.html",
            ]
        );
    }

    #[test]
    fn test_rule_page() {
        let (pages, _) = sample_pages();
        let content = page(&pages, "checks/BCheck.html");

        assert!(content.contains("<title>Check &quot;Beta&quot; (My checks)</title>"));
        assert!(content.contains("<a href=\"#property_mode\">mode</a></td><td>The mode.</td>"));
        assert!(content.contains("<h4>mode = \"on | <u>off</u>\"</h4>"));
        assert!(content.contains("<a href=\"../option-providers/p.Mode.html\">p.Mode</a>"));
        assert!(content.contains("<dt><code>on</code></dt>\n  <dd>Enabled.</dd>"));
        assert!(content.contains("<a href=\"../quickfixes/Fix.html\">Fix it</a>"));
    }

    #[test]
    fn test_quickfix_and_provider_pages() {
        let (pages, _) = sample_pages();

        let quickfix = page(&pages, "quickfixes/Fix.html");
        assert!(quickfix.contains("<h3>Checks offering this quickfixes:</h3>"));
        assert!(quickfix.contains("<a href=\"../checks/BCheck.html\">Beta</a>"));
        assert!(!quickfix.contains("ACheck"));

        let provider = page(&pages, "option-providers/p.Mode.html");
        assert!(provider.contains("Option Provider &quot;p.Mode&quot;"));
        assert!(provider.contains("<tr><td><code>off</code></td><td>Disabled.</td></tr>"));
    }

    #[test]
    fn test_overview_page() {
        let (pages, _) = sample_pages();
        let overview = page(&pages, "overview-summary.html");

        assert!(overview.contains("<h1 class=\"title\">All my checks</h1>"));
        let alpha = overview.find("checks/ACheck.html").unwrap();
        let beta = overview.find("checks/BCheck.html").unwrap();
        let sieve = overview.find("filters/Sieve.html").unwrap();
        let fix = overview.find("quickfixes/Fix.html").unwrap();
        assert!(alpha < beta && beta < sieve && sieve < fix);
        assert!(overview.contains("<a name=\"filters\">Filters</a>"));
    }

    #[test]
    fn test_links_are_relative_to_each_page() {
        let (pages, _) = sample_pages();
        let linked = "<a href=\"checks/BCheck.html\"><code>BCheck</code></a>";

        let overview = page(&pages, "overview-summary.html");
        assert!(overview.contains(&format!("<td>Unlike {}, checks ACheck.</td>", linked)));

        let rule = page(&pages, "checks/ACheck.html");
        assert!(rule.contains("<a href=\"../checks/BCheck.html\"><code>BCheck</code></a>"));
        assert!(rule.contains("<a href=\"#property_mode\">mode</a>"));
    }

    #[test]
    fn test_rebase_links() {
        let html = r##"<a href="checks/A.html">A</a> <img src="img/x.png"> <a href="https://x.org">x</a> <a href="#top">t</a>"##;
        assert_eq!(
            rebase_links(html, "../"),
            r##"<a href="../checks/A.html">A</a> <img src="../img/x.png"> <a href="https://x.org">x</a> <a href="#top">t</a>"##
        );
        assert_eq!(rebase_links(html, ""), html);
    }
}
