//! Doc comment structure: main description, first sentence and block tags

use once_cell::sync::Lazy;
use regex::Regex;

/// HTML elements that end the first sentence of a description
static BLOCK_ELEMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^<\s*/?\s*(?:p|pre|h[1-6]|table|ul|ol|dl|hr|div|blockquote)\b")
        .expect("valid regex")
});

/// A block tag such as `@cs-label Fix it`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockTag {
    /// Tag name without the `@`
    pub name: String,
    pub text: String,
}

/// A parsed doc comment (delimiters already stripped)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Javadoc {
    pub body: String,
    pub tags: Vec<BlockTag>,
}

impl Javadoc {
    pub fn parse(text: &str) -> Self {
        let mut body_lines = Vec::new();
        let mut tags: Vec<BlockTag> = Vec::new();

        for line in text.lines() {
            let trimmed = line.trim_start();
            let tag_start = trimmed
                .strip_prefix('@')
                .filter(|rest| rest.starts_with(|c: char| c.is_ascii_alphabetic()));

            match (tag_start, tags.last_mut()) {
                (Some(rest), _) => {
                    let (name, text) = rest
                        .split_once(char::is_whitespace)
                        .unwrap_or((rest, ""));
                    tags.push(BlockTag {
                        name: name.to_string(),
                        text: text.trim().to_string(),
                    });
                }
                (None, Some(tag)) => {
                    if !tag.text.is_empty() {
                        tag.text.push('\n');
                    }
                    tag.text.push_str(line);
                }
                (None, None) => body_lines.push(line),
            }
        }

        for tag in &mut tags {
            tag.text = tag.text.trim_end().to_string();
        }

        Self {
            body: body_lines.join("\n").trim().to_string(),
            tags,
        }
    }

    pub fn tags<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a BlockTag> + 'a {
        self.tags.iter().filter(move |t| t.name == name)
    }

    pub fn first_sentence(&self) -> &str {
        first_sentence(&self.body)
    }
}

/// The first sentence of a description
///
/// The sentence ends at the first period followed by whitespace, or before the first
/// block-level HTML element. Periods inside inline tags do not count.
pub fn first_sentence(text: &str) -> &str {
    let mut depth = 0usize;
    let mut chars = text.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        match c {
            '{' if text[i + 1..].starts_with('@') => depth += 1,
            '}' if depth > 0 => depth -= 1,
            '.' if depth == 0 => {
                if chars.peek().map_or(true, |(_, next)| next.is_whitespace()) {
                    return &text[..=i];
                }
            }
            '<' if depth == 0 && i > 0 && BLOCK_ELEMENT.is_match(&text[i..]) => {
                return text[..i].trim_end();
            }
            _ => {}
        }
    }

    text.trim_end()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_body_and_tags() {
        let doc = Javadoc::parse(
            "Does things.\nMore text.\n\n@cs-label Fix\n   everything\n@cs-name Other\n@since 1.0",
        );

        assert_eq!(doc.body, "Does things.\nMore text.");
        let labels: Vec<&str> = doc.tags("cs-label").map(|t| t.text.as_str()).collect();
        assert_eq!(labels, vec!["Fix\n   everything"]);
        assert_eq!(doc.tags("cs-name").count(), 1);
        assert_eq!(doc.tags.len(), 3);
    }

    #[test]
    fn test_first_sentence() {
        assert_eq!(first_sentence("One. Two."), "One.");
        assert_eq!(first_sentence("Use {@code a.b. c} here. Then"), "Use {@code a.b. c} here.");
        assert_eq!(first_sentence("Version 1.2 is fine"), "Version 1.2 is fine");
        assert_eq!(first_sentence("Intro<p>Details</p>"), "Intro");
        assert_eq!(first_sentence("Ends with period."), "Ends with period.");
    }
}
