//! Option provider resolution
//!
//! A property's permissible values come from `valueOptions = {...}`, from the constants
//! of an enum named by `optionProvider = X.class`, or from a provider class. The values
//! of a provider class are obtained through an [`OptionsCapability`] instead of loading
//! and running the class.

use crate::doc::{DocContext, Skip};
use crate::extractors::base::{Annotation, ClassDecl, SourcePosition};
use crate::model::extraction::ModelContext;
use crate::model::{OptionOrigin, OptionProvider, ValueOption};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

/// Supplies the option values of a provider class
pub trait OptionsCapability {
    fn options(&self, provider: &ClassDecl) -> Option<Vec<String>>;
}

/// Values listed in the configuration, by qualified or binary class name
pub struct ConfiguredOptions<'a> {
    options: &'a BTreeMap<String, Vec<String>>,
}

impl<'a> ConfiguredOptions<'a> {
    pub fn new(options: &'a BTreeMap<String, Vec<String>>) -> Self {
        Self { options }
    }
}

impl OptionsCapability for ConfiguredOptions<'_> {
    fn options(&self, provider: &ClassDecl) -> Option<Vec<String>> {
        self.options
            .get(&provider.qualified_name)
            .or_else(|| self.options.get(&provider.binary_name()))
            .cloned()
    }
}

/// The string literals of a no-argument `getOptions()` method
pub struct GetOptionsLiterals;

impl OptionsCapability for GetOptionsLiterals {
    fn options(&self, provider: &ClassDecl) -> Option<Vec<String>> {
        provider
            .methods
            .iter()
            .find(|m| m.name == "getOptions" && m.parameters.is_empty() && !m.is_constructor())
            .map(|m| m.body_string_literals.clone())
            .filter(|literals| !literals.is_empty())
    }
}

/// The first capability that knows the class wins
impl<A: OptionsCapability, B: OptionsCapability> OptionsCapability for (A, B) {
    fn options(&self, provider: &ClassDecl) -> Option<Vec<String>> {
        self.0
            .options(provider)
            .or_else(|| self.1.options(provider))
    }
}

/// The capabilities used by the doclet
pub type DefaultCapabilities<'a> = (ConfiguredOptions<'a>, GetOptionsLiterals);

/// Resolves and caches option providers
///
/// Class-backed providers are created once per class and shared by all properties that
/// use them.
pub struct OptionProviderResolver<C> {
    capability: C,
    cache: RefCell<BTreeMap<String, Rc<OptionProvider>>>,
}

impl<C: OptionsCapability> OptionProviderResolver<C> {
    pub fn new(capability: C) -> Self {
        Self {
            capability,
            cache: RefCell::new(BTreeMap::new()),
        }
    }

    /// The option provider of a property annotation, if it declares one
    pub fn resolve<'a>(
        &self,
        cx: &ModelContext<'a>,
        context: &DocContext<'a>,
        annotation: &Annotation,
    ) -> Result<Option<Rc<OptionProvider>>, Skip> {
        let provider_class = annotation.class_element("optionProvider");
        let value_options = annotation.string_array_element("valueOptions");

        match (provider_class, value_options) {
            (None, None) => Ok(None),
            (None, Some(values)) => Ok(Some(Rc::new(OptionProvider {
                name: None,
                class_name: None,
                short_description: None,
                long_description: None,
                value_options: values.into_iter().map(ValueOption::plain).collect(),
                origin: OptionOrigin::Literal,
            }))),
            (Some(_), Some(_)) => Err(cx.reporter.skip(
                Some(context.position),
                "\"optionProvider\" and \"valueOptions\" are mutually exclusive",
            )),
            (Some(class_name), None) => {
                let Some(class) = cx.index.resolve_class(context.class, class_name) else {
                    return Err(cx.reporter.skip(
                        Some(context.position),
                        format!("Option provider class '{}' not found", class_name),
                    ));
                };
                self.provider_for_class(cx, class, context.position).map(Some)
            }
        }
    }

    /// The shared provider for a class
    pub fn provider_for_class<'a>(
        &self,
        cx: &ModelContext<'a>,
        class: &'a ClassDecl,
        position: &SourcePosition,
    ) -> Result<Rc<OptionProvider>, Skip> {
        let class_name = class.binary_name();
        if let Some(cached) = self.cache.borrow().get(&class_name) {
            return Ok(Rc::clone(cached));
        }

        let interface = &cx.config.option_provider_interface;
        let (origin, value_options) = if class.is_enum() {
            let options = class
                .enum_constants
                .iter()
                .map(|constant| {
                    let descriptions = constant.doc_comment.as_deref().map(|doc| {
                        cx.html
                            .descriptions(Some(doc), &DocContext::at(class, &constant.position))
                    });
                    ValueOption {
                        name: constant.name.to_lowercase(),
                        short_description: descriptions.as_ref().map(|d| d.short.clone()),
                        long_description: descriptions.map(|d| d.long),
                    }
                })
                .collect();
            (OptionOrigin::Enum, options)
        } else if cx
            .index
            .is_subclass_of_any(class, std::slice::from_ref(interface))
        {
            let Some(values) = self.capability.options(class) else {
                return Err(cx.reporter.skip(
                    Some(position),
                    format!(
                        "Cannot determine the options of '{}'; list them under \
                         [option_providers] in the configuration, or return string \
                         literals from 'getOptions()'",
                        class.qualified_name
                    ),
                ));
            };
            (
                OptionOrigin::Capability,
                values.into_iter().map(ValueOption::plain).collect(),
            )
        } else {
            return Err(cx.reporter.skip(
                Some(position),
                format!(
                    "Option provider class '{}' must either extend 'Enum' or implement \"{}\"",
                    class.qualified_name, interface
                ),
            ));
        };

        let context = DocContext::of_class(class);
        let descriptions = cx.html.descriptions(class.doc_comment.as_deref(), &context);
        let name = match cx
            .html
            .optional_tag(class.doc_comment.as_deref(), "cs-name", &context)
        {
            Ok(Some(name)) => name,
            Ok(None) => class.qualified_name.clone(),
            Err(Skip) => "???".to_string(),
        };

        let provider = Rc::new(OptionProvider {
            name: Some(name),
            class_name: Some(class_name.clone()),
            short_description: Some(descriptions.short),
            long_description: Some(descriptions.long),
            value_options,
            origin,
        });
        self.cache
            .borrow_mut()
            .insert(class_name, Rc::clone(&provider));
        Ok(provider)
    }

    /// All class-backed providers resolved so far, ordered by class name
    pub fn registry(&self) -> Vec<Rc<OptionProvider>> {
        self.cache.borrow().values().cloned().collect()
    }
}
