//! Rule properties
//!
//! A setter becomes a property by carrying one of the eight `...RuleProperty`
//! annotations; the annotation type determines the datatype.

use crate::doc::{DocContext, Skip};
use crate::extractors::base::{Annotation, ClassDecl, MethodDecl};
use crate::model::extraction::ModelContext;
use crate::model::RuleProperty;
use serde::Serialize;
use std::fmt;

/// Datatype of a property, as named in the eclipse-cs metadata DTD
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Datatype {
    Boolean,
    File,
    Hidden,
    Integer,
    MultiCheck,
    Regex,
    SingleSelect,
    String,
}

impl Datatype {
    /// In the order in which conflicting annotations are resolved
    pub const ALL: [Datatype; 8] = [
        Datatype::Boolean,
        Datatype::File,
        Datatype::Hidden,
        Datatype::Integer,
        Datatype::MultiCheck,
        Datatype::Regex,
        Datatype::SingleSelect,
        Datatype::String,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Datatype::Boolean => "Boolean",
            Datatype::File => "File",
            Datatype::Hidden => "Hidden",
            Datatype::Integer => "Integer",
            Datatype::MultiCheck => "MultiCheck",
            Datatype::Regex => "Regex",
            Datatype::SingleSelect => "SingleSelect",
            Datatype::String => "String",
        }
    }

    /// Simple name of the annotation type that declares a property of this datatype
    pub fn annotation_name(self) -> String {
        format!("{}RuleProperty", self.as_str())
    }

    pub fn from_annotation_name(simple_name: &str) -> Option<Self> {
        let prefix = simple_name.strip_suffix("RuleProperty")?;
        Self::ALL.into_iter().find(|d| d.as_str() == prefix)
    }

    /// Whether the values are chosen from an option provider
    pub fn is_select(self) -> bool {
        matches!(self, Datatype::SingleSelect | Datatype::MultiCheck)
    }
}

impl fmt::Display for Datatype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The property annotations of a method, parsed once
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyKind<'a> {
    /// Not a property
    None,
    Single(Datatype, &'a Annotation),
    /// More than one property annotation; the first in [`Datatype::ALL`] order is kept
    Conflicting {
        kept: (Datatype, &'a Annotation),
        all: Vec<&'a Annotation>,
    },
}

impl<'a> PropertyKind<'a> {
    pub fn parse(annotations: &'a [Annotation]) -> Self {
        let mut found: Vec<(Datatype, &'a Annotation)> = Datatype::ALL
            .into_iter()
            .filter_map(|datatype| {
                annotations
                    .iter()
                    .find(|a| a.simple_name() == datatype.annotation_name())
                    .map(|a| (datatype, a))
            })
            .collect();

        match found.len() {
            0 => PropertyKind::None,
            1 => {
                let (datatype, annotation) = found.remove(0);
                PropertyKind::Single(datatype, annotation)
            }
            _ => PropertyKind::Conflicting {
                kept: found[0],
                all: found.iter().map(|(_, a)| *a).collect(),
            },
        }
    }
}

/// The properties declared by the setters of a class, in declaration order
///
/// A property that cannot be built is reported and left out.
pub fn build_properties<'a>(cx: &ModelContext<'a>, class: &'a ClassDecl) -> Vec<RuleProperty> {
    let mut properties = Vec::new();

    for method in class.methods.iter().filter(|m| !m.is_constructor()) {
        let (datatype, annotation) = match PropertyKind::parse(&method.annotations) {
            PropertyKind::None => continue,
            PropertyKind::Single(datatype, annotation) => (datatype, annotation),
            PropertyKind::Conflicting { kept, all } => {
                let names: Vec<String> = all.iter().map(|a| format!("\"@{}\"", a.name)).collect();
                cx.reporter.error(
                    Some(&method.position),
                    format!("{} are mutually exclusive", names.join(" and ")),
                );
                kept
            }
        };

        if let Ok(property) = build_property(cx, class, method, datatype, annotation) {
            properties.push(property);
        }
    }

    properties
}

fn build_property<'a>(
    cx: &ModelContext<'a>,
    class: &'a ClassDecl,
    method: &'a MethodDecl,
    datatype: Datatype,
    annotation: &Annotation,
) -> Result<RuleProperty, Skip> {
    let context = DocContext::at(class, &method.position);

    let name = match annotation.string_element("name") {
        Some(name) => name,
        None => property_name_of_setter(&method.name).ok_or_else(|| {
            cx.reporter
                .skip(Some(&method.position), "Cannot determine property name")
        })?,
    };

    let descriptions = cx.html.descriptions(method.doc_comment.as_deref(), &context);
    let option_provider = cx.option_providers.resolve(cx, &context, annotation)?;
    if datatype.is_select() && option_provider.is_none() {
        cx.reporter.error(
            Some(&method.position),
            "Both option provider and value options are missing",
        );
    }

    Ok(RuleProperty {
        name,
        position: method.position.clone(),
        short_description: descriptions.short,
        long_description: descriptions.long,
        datatype,
        option_provider,
        default_value: annotation.string_element("defaultValue"),
        override_default_value: annotation.string_element("overrideDefaultValue"),
    })
}

/// `setMaxLength` -> `maxLength`
pub fn property_name_of_setter(method_name: &str) -> Option<String> {
    let rest = method_name.strip_prefix("set")?;
    let mut chars = rest.chars();
    let first = chars.next().filter(char::is_ascii_uppercase)?;
    Some(first.to_ascii_lowercase().to_string() + chars.as_str())
}
