//! MediaWiki pages, one per rule

use crate::model::{Model, Rule};
use crate::render::{property_nav, Markup};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::fmt::Write;

static PRE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<pre>\n?(.*?)</pre>").expect("valid regex"));
static ORDERED_LIST: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<ol>(.*?)</ol>").expect("valid regex"));
static UNORDERED_LIST: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<ul>(.*?)</ul>").expect("valid regex"));
static LIST_ITEM_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)</?li>").expect("valid regex"));
static HEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<h([1-6])>(.*?)</h[1-6]>").expect("valid regex"));
static BOLD: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)</?(?:b|strong)>").expect("valid regex"));
static ITALIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)</?(?:i|em)>").expect("valid regex"));
static PARAGRAPH: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\s*</?p>\s*").expect("valid regex"));
static ANCHOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?is)<a\s+href\s*=\s*"([^"]*)"[^>]*>(.*?)</a>"#).expect("valid regex")
});
static BLANK_LINES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").expect("valid regex"));

/// Convert the HTML of a doc comment to MediaWiki markup
pub fn html_to_mediawiki(html: &str) -> String {
    let text = PRE.replace_all(html, |caps: &Captures| {
        let lines: Vec<String> = caps[1].lines().map(|line| format!(" {}", line)).collect();
        format!("\n{}\n", lines.join("\n"))
    });
    let text = ORDERED_LIST.replace_all(&text, |caps: &Captures| list_items(&caps[1], '#'));
    let text = UNORDERED_LIST.replace_all(&text, |caps: &Captures| list_items(&caps[1], '*'));
    let text = HEADING.replace_all(&text, |caps: &Captures| {
        let marks = "=".repeat(caps[1].parse::<usize>().unwrap_or(2));
        format!("\n{} {} {}\n", marks, caps[2].trim(), marks)
    });
    let text = ANCHOR.replace_all(&text, |caps: &Captures| {
        let href = &caps[1];
        if href.starts_with("http://") || href.starts_with("https://") {
            format!("[{} {}]", href, &caps[2])
        } else {
            caps[2].to_string()
        }
    });
    let text = BOLD.replace_all(&text, "'''");
    let text = ITALIC.replace_all(&text, "''");
    let text = PARAGRAPH.replace_all(&text, "\n\n");
    let text = BLANK_LINES.replace_all(&text, "\n\n");
    text.trim().to_string()
}

fn list_items(items: &str, bullet: char) -> String {
    let mut out = String::from("\n");
    for item in LIST_ITEM_TAG.split(items).map(str::trim) {
        if !item.is_empty() {
            let _ = writeln!(out, "{} {}", bullet, item);
        }
    }
    out
}

/// Render the wiki page of a rule
pub fn render(model: &Model, rule: &Rule) -> String {
    let mut out = String::from(
        "<!-- This file was generated by the CS doclet; see http://cs-contrib.unkrig.de -->\n",
    );

    out.push_str(&html_to_mediawiki(&rule.long_description));
    out.push_str("\n\n");

    for (i, property) in rule.properties.iter().enumerate() {
        if i == 0 {
            out.push_str("== Properties ==\n\nDefault values appear <u>underlined</u>.\n\n");
        }
        let _ = write!(
            out,
            "<dl>\n<dt>{}\n<dd>{}\n</dl>\n\n",
            property_nav(property, Markup::Mediawiki),
            html_to_mediawiki(&property.long_description)
        );
    }

    if let Some(quickfixes) = model.quickfixes_of(rule).filter(|q| !q.is_empty()) {
        out.push_str("== Quickfixes ==\n\n<dl>\n");
        for quickfix in quickfixes {
            let _ = write!(
                out,
                "\n<dt>{}\n<dd>{}\n",
                quickfix.label, quickfix.short_description
            );
        }
        out.push_str("</dl>\n");
    }

    out
}
