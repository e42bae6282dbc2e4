//! Per-package extraction of rules and quickfixes

use crate::config::DocletConfig;
use crate::doc::{Html, Reporter};
use crate::extractors::index::DeclarationIndex;
use crate::model::option_providers::{
    ConfiguredOptions, DefaultCapabilities, GetOptionsLiterals, OptionProviderResolver,
};
use crate::model::{quickfixes, rules, OptionProvider, Quickfix, Rule};
use std::rc::Rc;
use tracing::debug;

/// Everything the model builders share during one run
pub struct ModelContext<'a> {
    pub index: &'a DeclarationIndex,
    pub html: &'a Html<'a>,
    pub reporter: &'a Reporter,
    pub config: &'a DocletConfig,
    pub option_providers: OptionProviderResolver<DefaultCapabilities<'a>>,
}

impl<'a> ModelContext<'a> {
    pub fn new(
        index: &'a DeclarationIndex,
        html: &'a Html<'a>,
        reporter: &'a Reporter,
        config: &'a DocletConfig,
    ) -> Self {
        let capabilities = (
            ConfiguredOptions::new(&config.option_providers),
            GetOptionsLiterals,
        );
        Self {
            index,
            html,
            reporter,
            config,
            option_providers: OptionProviderResolver::new(capabilities),
        }
    }
}

/// Rules and quickfixes declared in one package, in class name order
#[derive(Debug, Clone)]
pub struct PackageExtraction {
    pub name: String,
    pub rules: Vec<Rule>,
    pub quickfixes: Vec<Quickfix>,
}

/// Result of the extraction phase; quickfix references are still unresolved
#[derive(Debug, Clone)]
pub struct Extraction {
    pub packages: Vec<PackageExtraction>,
    /// Class-backed option providers, by class name
    pub option_providers: Vec<Rc<OptionProvider>>,
}

/// Extract the given packages, in the given order
///
/// A package that is not part of the sources is reported and left out.
pub fn extract(cx: &ModelContext<'_>, packages: &[String]) -> Extraction {
    let mut extracted = Vec::with_capacity(packages.len());

    for package in packages {
        if !cx.index.has_package(package) {
            cx.reporter
                .error(None, format!("Package \"{}\" not found in the sources", package));
            continue;
        }
        extracted.push(extract_package(cx, package));
    }

    Extraction {
        packages: extracted,
        option_providers: cx.option_providers.registry(),
    }
}

fn extract_package(cx: &ModelContext<'_>, package: &str) -> PackageExtraction {
    let mut rules = Vec::new();
    let mut quickfixes = Vec::new();

    for class in cx.index.classes_in_package(package) {
        if class.annotation("Rule").is_some() {
            if let Ok(rule) = rules::build_rule(cx, class) {
                rules.push(rule);
            }
        }
        if quickfixes::is_quickfix(cx, class) {
            if let Ok(quickfix) = quickfixes::build_quickfix(cx, class) {
                quickfixes.push(quickfix);
            }
        }
    }

    debug!(
        "Package {}: {} rules, {} quickfixes",
        package,
        rules.len(),
        quickfixes.len()
    );

    PackageExtraction {
        name: package.to_string(),
        rules,
        quickfixes,
    }
}
