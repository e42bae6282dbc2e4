//! Doclet configuration
//!
//! Read from `csdoclet.toml` when present; every setting has a default, so an empty or
//! missing file yields the stock CheckStyle / eclipse-cs setup:
//!
//! ```toml
//! check_base_types = ["com.puppycrawl.tools.checkstyle.api.AbstractCheck"]
//! window_title = "My checks"
//!
//! [option_providers]
//! "com.acme.SeverityOptions" = ["low", "high"]
//! ```

use crate::error::{DocletError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

pub const DEFAULT_CONFIG_FILE: &str = "csdoclet.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DocletConfig {
    /// A rule class extending one of these is a check
    pub check_base_types: Vec<String>,
    /// A rule class extending one of these is a filter
    pub filter_base_types: Vec<String>,
    /// Concrete classes implementing one of these are quickfixes
    pub quickfix_base_types: Vec<String>,
    /// Interface of option provider classes
    pub option_provider_interface: String,
    /// Option values of provider classes, by qualified class name
    pub option_providers: BTreeMap<String, Vec<String>>,
    pub window_title: Option<String>,
    pub doc_title: Option<String>,
}

impl Default for DocletConfig {
    fn default() -> Self {
        Self {
            check_base_types: vec![
                "com.puppycrawl.tools.checkstyle.api.AbstractCheck".to_string(),
                "com.puppycrawl.tools.checkstyle.api.Check".to_string(),
            ],
            filter_base_types: vec![
                "com.puppycrawl.tools.checkstyle.TreeWalkerFilter".to_string(),
                "com.puppycrawl.tools.checkstyle.api.Filter".to_string(),
            ],
            quickfix_base_types: vec![
                "net.sf.eclipsecs.ui.quickfixes.ICheckstyleMarkerResolution".to_string(),
            ],
            option_provider_interface: "net.sf.eclipsecs.core.config.meta.IOptionProvider"
                .to_string(),
            option_providers: BTreeMap::new(),
            window_title: None,
            doc_title: None,
        }
    }
}

impl DocletConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| DocletError::io(path, e))?;
        Self::parse(&text).map_err(|source| DocletError::Config {
            path: path.to_path_buf(),
            source: Box::new(source),
        })
    }

    pub fn parse(text: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Load `path`, or `csdoclet.toml` in the working directory if it exists, or
    /// fall back to the defaults
    pub fn discover(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.is_file() {
                    Self::load(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Fatal configuration problems
    pub fn validate(&self) -> Result<()> {
        if self.check_base_types.is_empty() {
            return Err(DocletError::MissingBaseTypes { family: "checks" });
        }
        if self.filter_base_types.is_empty() {
            return Err(DocletError::MissingBaseTypes { family: "filters" });
        }
        if self.quickfix_base_types.is_empty() {
            return Err(DocletError::MissingBaseTypes {
                family: "quickfixes",
            });
        }
        if self.option_provider_interface.trim().is_empty() {
            return Err(DocletError::MissingOptionProviderInterface);
        }
        Ok(())
    }
}
