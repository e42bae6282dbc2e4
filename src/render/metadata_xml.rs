//! `checkstyle-metadata.xml`, the eclipse-cs description of the rules of one package
//!
//! All human-readable texts are `%key` references into `checkstyle-metadata.properties`.

use crate::error::{DocletError, Result};
use crate::model::{Model, Rule, RuleProperty};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

const DOCTYPE: &str = "checkstyle-metadata PUBLIC \
    \"-//eclipse-cs//DTD Check Metadata 1.1//EN\" \
    \"http://eclipse-cs.sourceforge.net/dtds/checkstyle-metadata_1_1.dtd\"";

fn write_error(e: impl std::fmt::Display) -> DocletError {
    DocletError::Xml(e.to_string())
}

/// Render the metadata document for `rules`
pub fn render(model: &Model, rules: &[Rule]) -> Result<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 4);

    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(write_error)?;
    writer
        .write_event(Event::DocType(BytesText::from_escaped(DOCTYPE)))
        .map_err(write_error)?;
    writer
        .write_event(Event::Start(BytesStart::new("checkstyle-metadata")))
        .map_err(write_error)?;

    for rule in rules {
        write_rule(&mut writer, model, rule)?;
    }

    writer
        .write_event(Event::End(BytesEnd::new("checkstyle-metadata")))
        .map_err(write_error)?;

    let mut bytes = writer.into_inner();
    bytes.push(b'\n');
    String::from_utf8(bytes).map_err(write_error)
}

fn write_rule(writer: &mut Writer<Vec<u8>>, model: &Model, rule: &Rule) -> Result<()> {
    let simple = &rule.simple_name;

    writer
        .write_event(Event::Comment(BytesText::new(&format!(" {} ", simple))))
        .map_err(write_error)?;

    let mut group = BytesStart::new("rule-group-metadata");
    group.push_attribute(("name", rule.group.as_str()));
    group.push_attribute(("priority", "999"));
    writer.write_event(Event::Start(group)).map_err(write_error)?;

    let mut metadata = BytesStart::new("rule-metadata");
    metadata.push_attribute(("internal-name", rule.internal_name.as_str()));
    metadata.push_attribute(("parent", rule.parent.as_str()));
    if let Some(has_severity) = rule.has_severity {
        metadata.push_attribute(("hasSeverity", if has_severity { "true" } else { "false" }));
    }
    metadata.push_attribute(("name", format!("%{}.name", simple).as_str()));
    writer.write_event(Event::Start(metadata)).map_err(write_error)?;

    let mut alternative = BytesStart::new("alternative-name");
    alternative.push_attribute(("internal-name", rule.internal_name.as_str()));
    writer.write_event(Event::Empty(alternative)).map_err(write_error)?;

    write_text_element(writer, "description", &format!("%{}.desc", simple))?;

    for property in &rule.properties {
        write_property(writer, simple, property)?;
    }

    if let Some(quickfixes) = model.quickfixes_of(rule) {
        for quickfix in quickfixes {
            let mut element = BytesStart::new("quickfix");
            element.push_attribute(("classname", quickfix.class_name.as_str()));
            writer.write_event(Event::Empty(element)).map_err(write_error)?;
        }
    }

    for key in rule.messages.keys() {
        let mut element = BytesStart::new("message-key");
        element.push_attribute(("key", key.as_str()));
        writer.write_event(Event::Empty(element)).map_err(write_error)?;
    }

    writer
        .write_event(Event::End(BytesEnd::new("rule-metadata")))
        .map_err(write_error)?;
    writer
        .write_event(Event::End(BytesEnd::new("rule-group-metadata")))
        .map_err(write_error)?;
    Ok(())
}

fn write_property(writer: &mut Writer<Vec<u8>>, simple: &str, property: &RuleProperty) -> Result<()> {
    let mut element = BytesStart::new("property-metadata");
    element.push_attribute(("name", property.name.as_str()));
    element.push_attribute(("datatype", property.datatype.as_str()));
    if let Some(default) = &property.default_value {
        element.push_attribute(("default-value", default.as_str()));
    }
    if let Some(default) = &property.override_default_value {
        element.push_attribute(("override-default-value", default.as_str()));
    }
    writer.write_event(Event::Start(element)).map_err(write_error)?;

    write_text_element(writer, "description", &format!("%{}.{}", simple, property.name))?;

    if let Some(provider) = &property.option_provider {
        match &provider.class_name {
            Some(class_name) => {
                let mut enumeration = BytesStart::new("enumeration");
                enumeration.push_attribute(("option-provider", class_name.as_str()));
                writer.write_event(Event::Empty(enumeration)).map_err(write_error)?;
            }
            None => {
                writer
                    .write_event(Event::Start(BytesStart::new("enumeration")))
                    .map_err(write_error)?;
                for option in &provider.value_options {
                    let mut value = BytesStart::new("property-value-option");
                    value.push_attribute(("value", option.name.as_str()));
                    writer.write_event(Event::Empty(value)).map_err(write_error)?;
                }
                writer
                    .write_event(Event::End(BytesEnd::new("enumeration")))
                    .map_err(write_error)?;
            }
        }
    }

    writer
        .write_event(Event::End(BytesEnd::new("property-metadata")))
        .map_err(write_error)?;
    Ok(())
}

fn write_text_element(writer: &mut Writer<Vec<u8>>, name: &str, text: &str) -> Result<()> {
    writer
        .write_event(Event::Start(BytesStart::new(name)))
        .map_err(write_error)?;
    writer
        .write_event(Event::Text(BytesText::new(text)))
        .map_err(write_error)?;
    writer
        .write_event(Event::End(BytesEnd::new(name)))
        .map_err(write_error)?;
    Ok(())
}
