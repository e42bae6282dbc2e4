//! The rule model
//!
//! Extraction builds [`Rule`], [`Quickfix`] and [`OptionProvider`] records per package;
//! [`link`] then resolves the references between rules and quickfixes and yields the
//! [`Model`] the renderers work on.

pub mod extraction;
pub mod link;
pub mod option_providers;
pub mod properties;
pub mod quickfixes;
pub mod rules;

use crate::extractors::base::SourcePosition;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

pub use extraction::{extract, Extraction, ModelContext, PackageExtraction};
pub use link::{link, Model};
pub use option_providers::{
    ConfiguredOptions, GetOptionsLiterals, OptionProviderResolver, OptionsCapability,
};
pub use properties::{Datatype, PropertyKind};

/// Check or filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Family {
    Check,
    Filter,
}

impl Family {
    pub fn singular(self) -> &'static str {
        match self {
            Family::Check => "check",
            Family::Filter => "filter",
        }
    }

    pub fn plural(self) -> &'static str {
        match self {
            Family::Check => "checks",
            Family::Filter => "filters",
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.singular())
    }
}

/// A documented check or filter
#[derive(Debug, Clone, Serialize)]
pub struct Rule {
    /// Qualified name of the rule class
    pub internal_name: String,
    pub simple_name: String,
    pub position: SourcePosition,
    pub family: Family,
    pub group: String,
    pub group_name: String,
    pub name: String,
    pub parent: String,
    pub short_description: String,
    pub long_description: String,
    pub properties: Vec<RuleProperty>,
    /// Class names from `@Rule(quickfixes = ...)`, resolved by [`link`]
    pub quickfix_class_names: Option<Vec<String>>,
    pub has_severity: Option<bool>,
    /// Message key to default text
    pub messages: BTreeMap<String, String>,
}

impl Rule {
    pub fn family_singular(&self) -> &'static str {
        self.family.singular()
    }

    pub fn family_plural(&self) -> &'static str {
        self.family.plural()
    }
}

/// A configurable property of a rule
#[derive(Debug, Clone, Serialize)]
pub struct RuleProperty {
    pub name: String,
    pub position: SourcePosition,
    pub short_description: String,
    pub long_description: String,
    pub datatype: Datatype,
    pub option_provider: Option<Rc<OptionProvider>>,
    pub default_value: Option<String>,
    pub override_default_value: Option<String>,
}

impl RuleProperty {
    /// The value that applies when the property is not configured
    pub fn effective_default(&self) -> Option<&str> {
        self.default_value
            .as_deref()
            .or(self.override_default_value.as_deref())
    }
}

/// Where the values of an option provider come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionOrigin {
    /// Constants of an enum
    Enum,
    /// A provider class, through an [`OptionsCapability`]
    Capability,
    /// A `valueOptions = {...}` literal list
    Literal,
}

/// The permissible values of a property
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptionProvider {
    /// `@cs-name` of the provider class, or its qualified name; `None` for literal lists
    pub name: Option<String>,
    /// Binary class name (`$` for member types); `None` for literal lists
    pub class_name: Option<String>,
    pub short_description: Option<String>,
    pub long_description: Option<String>,
    pub value_options: Vec<ValueOption>,
    pub origin: OptionOrigin,
}

impl OptionProvider {
    pub fn value_option_names(&self) -> Vec<&str> {
        self.value_options.iter().map(|v| v.name.as_str()).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValueOption {
    pub name: String,
    pub short_description: Option<String>,
    pub long_description: Option<String>,
}

impl ValueOption {
    pub fn plain(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            short_description: None,
            long_description: None,
        }
    }
}

/// An automated fix offered by rules
#[derive(Debug, Clone, Serialize)]
pub struct Quickfix {
    /// Qualified class name
    pub class_name: String,
    pub simple_name: String,
    pub position: SourcePosition,
    /// `@cs-label` of the class, or its qualified name
    pub label: String,
    pub short_description: String,
    pub long_description: String,
}
