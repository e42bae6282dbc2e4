//! Renderers of the linked model
//!
//! - `metadata_xml` - eclipse-cs `checkstyle-metadata.xml`
//! - `metadata_properties` - eclipse-cs `checkstyle-metadata.properties`
//! - `messages_properties` - CheckStyle `messages.properties`
//! - `mediawiki` - one wiki page per rule
//! - `html` - rule, quickfix and option provider pages plus an overview

pub mod html;
pub mod mediawiki;
pub mod messages_properties;
pub mod metadata_properties;
pub mod metadata_xml;

use crate::doc::escape_html;
use crate::model::{Datatype, RuleProperty};
use std::collections::HashSet;

const REGEX_DOC_URL: &str = "http://docs.oracle.com/javase/8/docs/api/java/util/regex/Pattern.html#sum";

/// Markup flavor of a property headline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Markup {
    Mediawiki,
    Html,
}

/// The permissible values of a select property; `None` when it has no option provider
pub fn value_options(property: &RuleProperty) -> Option<Vec<&str>> {
    property
        .option_provider
        .as_ref()
        .map(|provider| provider.value_option_names())
}

/// Join `values` with `glue`, underlining those contained in `defaults`
pub fn cat_values(values: &[&str], defaults: &[&str], glue: &str) -> String {
    let defaults: HashSet<&str> = defaults.iter().copied().collect();
    values
        .iter()
        .map(|value| {
            if defaults.contains(value) {
                format!("<u>{}</u>", value)
            } else {
                value.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(glue)
}

/// Headline of a property: its name, its values or datatype, and its default
///
/// `min = "<i>Integer</i>" (optional; default value is 3)`. Values and defaults are
/// HTML-escaped for [`Markup::Html`].
pub fn property_nav(property: &RuleProperty, markup: Markup) -> String {
    let default = property.effective_default().map(|d| markup_text(d, markup));
    let mut nav = format!("{} = ", property.name);

    match property.datatype {
        Datatype::Boolean => {
            let defaults: Vec<&str> = default.as_deref().into_iter().collect();
            nav += &quoted_values(&["true", "false"], &defaults, " | ", markup);
        }
        Datatype::SingleSelect => match value_options(property) {
            Some(options) => {
                let defaults: Vec<&str> = default.as_deref().into_iter().collect();
                nav += &quoted_values(&options, &defaults, " | ", markup);
            }
            None => nav += "???",
        },
        Datatype::MultiCheck => match value_options(property) {
            Some(options) => {
                let defaults: Vec<&str> = default
                    .as_deref()
                    .map(|d| d.split(',').collect())
                    .unwrap_or_default();
                nav += &quoted_values(&options, &defaults, ", ", markup);
            }
            None => nav += "???",
        },
        Datatype::Regex => {
            nav += &match markup {
                Markup::Mediawiki => format!("\"''[{} {}]''\"", REGEX_DOC_URL, property.datatype),
                Markup::Html => format!(
                    "\"<i><a href=\"{}\">{}</a></i>\"",
                    REGEX_DOC_URL, property.datatype
                ),
            };
            if let Some(default) = &default {
                nav += &format!(" (optional; default value is \"{}\")", default);
            }
        }
        Datatype::File | Datatype::Hidden | Datatype::Integer | Datatype::String => {
            nav += &format!("\"<i>{}</i>\"", property.datatype);
            match &default {
                Some(default) => nav += &format!(" (optional; default value is {})", default),
                None => nav += " (mandatory)",
            }
        }
    }

    nav
}

fn markup_text(value: &str, markup: Markup) -> String {
    match markup {
        Markup::Html => escape_html(value),
        Markup::Mediawiki => value.to_string(),
    }
}

/// `"a | <u>b</u>"`; `defaults` are already in markup text
fn quoted_values(values: &[&str], defaults: &[&str], glue: &str, markup: Markup) -> String {
    let values: Vec<String> = values.iter().map(|v| markup_text(v, markup)).collect();
    let values: Vec<&str> = values.iter().map(String::as_str).collect();
    format!("\"{}\"", cat_values(&values, defaults, glue))
}

/// `check` -> `Check`
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    //! Property fixtures for the renderer tests

    use crate::extractors::base::SourcePosition;
    use crate::model::{Datatype, OptionOrigin, OptionProvider, RuleProperty, ValueOption};
    use std::rc::Rc;

    pub fn position() -> SourcePosition {
        SourcePosition {
            file_path: "p/MyCheck.java".to_string(),
            line: 7,
            column: 5,
        }
    }

    pub fn property(name: &str, datatype: Datatype, default: Option<&str>) -> RuleProperty {
        RuleProperty {
            name: name.to_string(),
            position: position(),
            short_description: format!("The {}.", name),
            long_description: format!("The {}. In detail.", name),
            datatype,
            option_provider: None,
            default_value: default.map(str::to_string),
            override_default_value: None,
        }
    }

    pub fn literal_provider(values: &[&str]) -> Rc<OptionProvider> {
        Rc::new(OptionProvider {
            name: None,
            class_name: None,
            short_description: None,
            long_description: None,
            value_options: values.iter().map(|v| ValueOption::plain(*v)).collect(),
            origin: OptionOrigin::Literal,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::{literal_provider, property};
    use super::*;

    #[test]
    fn test_cat_values() {
        assert_eq!(cat_values(&["a", "b", "c"], &["b"], " | "), "a | <u>b</u> | c");
        assert_eq!(cat_values(&["a", "b"], &[], ", "), "a, b");
    }

    #[test]
    fn test_property_nav() {
        let boolean = property("strict", Datatype::Boolean, Some("false"));
        assert_eq!(
            property_nav(&boolean, Markup::Mediawiki),
            "strict = \"true | <u>false</u>\""
        );

        let integer = property("max", Datatype::Integer, None);
        assert_eq!(
            property_nav(&integer, Markup::Html),
            "max = \"<i>Integer</i>\" (mandatory)"
        );

        let string = property("fmt", Datatype::String, Some("x"));
        assert_eq!(
            property_nav(&string, Markup::Html),
            "fmt = \"<i>String</i>\" (optional; default value is x)"
        );

        let regex = property("pattern", Datatype::Regex, Some("^a$"));
        assert_eq!(
            property_nav(&regex, Markup::Mediawiki),
            "pattern = \"''[http://docs.oracle.com/javase/8/docs/api/java/util/regex/Pattern.html#sum Regex]''\" \
             (optional; default value is \"^a$\")"
        );

        let mut multi = property("tokens", Datatype::MultiCheck, Some("a,c"));
        multi.option_provider = Some(literal_provider(&["a", "b", "c"]));
        assert_eq!(
            property_nav(&multi, Markup::Mediawiki),
            "tokens = \"<u>a</u>, b, <u>c</u>\""
        );
    }

    #[test]
    fn test_property_nav_escapes_html() {
        let regex = property("pattern", Datatype::Regex, Some("<a&b>"));
        assert!(property_nav(&regex, Markup::Html)
            .ends_with(" (optional; default value is \"&lt;a&amp;b&gt;\")"));
        assert!(property_nav(&regex, Markup::Mediawiki)
            .ends_with(" (optional; default value is \"<a&b>\")"));

        let mut single = property("op", Datatype::SingleSelect, Some("<"));
        single.option_provider = Some(literal_provider(&["<", ">="]));
        assert_eq!(
            property_nav(&single, Markup::Html),
            "op = \"<u>&lt;</u> | &gt;=\""
        );
    }

    #[test]
    fn test_select_without_options() {
        let single = property("mode", Datatype::SingleSelect, None);
        assert_eq!(property_nav(&single, Markup::Html), "mode = ???");
        assert_eq!(value_options(&single), None);
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("check"), "Check");
        assert_eq!(capitalize(""), "");
    }
}
