//! One doclet run: index the sources, build and link the model, write the artifacts

use crate::config::DocletConfig;
use crate::doc::{Html, LinkMaker, Reporter};
use crate::error::Result;
use crate::extractors::manager::ExtractorManager;
use crate::model::{extract, link, Model, ModelContext};
use crate::output::{print_to_file, Encoding};
use crate::render::{html, mediawiki, messages_properties, metadata_properties, metadata_xml};
use crate::utils::paths::package_dir;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// What to read and where to write
#[derive(Debug, Clone, Default)]
pub struct GeneratorOptions {
    pub source_roots: Vec<PathBuf>,
    /// Packages to document; all indexed packages when empty
    pub packages: Vec<String>,
    pub metadata_dir: Option<PathBuf>,
    pub messages_dir: Option<PathBuf>,
    pub mediawiki_dir: Option<PathBuf>,
    pub html_dir: Option<PathBuf>,
    pub dump_model: Option<PathBuf>,
}

impl GeneratorOptions {
    fn has_output(&self) -> bool {
        self.metadata_dir.is_some()
            || self.messages_dir.is_some()
            || self.mediawiki_dir.is_some()
            || self.html_dir.is_some()
            || self.dump_model.is_some()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub packages: usize,
    pub rules: usize,
    pub quickfixes: usize,
    pub option_providers: usize,
    pub files_written: usize,
    pub errors: usize,
    pub warnings: usize,
}

pub struct Generator {
    config: DocletConfig,
    options: GeneratorOptions,
    manager: ExtractorManager,
}

impl Generator {
    pub fn new(config: DocletConfig, options: GeneratorOptions) -> Self {
        Self {
            config,
            options,
            manager: ExtractorManager::new(),
        }
    }

    /// Run the doclet
    ///
    /// Problems in the documented sources are reported as diagnostics and counted in the
    /// summary; only configuration and output failures are returned as errors.
    pub fn run(&self) -> Result<RunSummary> {
        self.config.validate()?;

        let index = self.manager.load_index(&self.options.source_roots)?;
        let packages = self.packages(index.packages());

        let reporter = Reporter::new();
        let links = LinkMaker::new(
            &index,
            &self.config.check_base_types,
            &self.config.filter_base_types,
            &self.config.quickfix_base_types,
        );
        let html = Html::new(&index, &links, &reporter);
        let cx = ModelContext::new(&index, &html, &reporter, &self.config);

        let model = link(extract(&cx, &packages), &reporter);
        info!(
            "Documenting {} rules and {} quickfixes in {} packages",
            model.rules().count(),
            model.quickfixes().len(),
            model.packages().len()
        );

        let files_written = self.write_all(&model, &reporter)?;

        Ok(RunSummary {
            packages: model.packages().len(),
            rules: model.rules().count(),
            quickfixes: model.quickfixes().len(),
            option_providers: model.option_providers().len(),
            files_written,
            errors: reporter.error_count(),
            warnings: reporter.warning_count(),
        })
    }

    /// The requested packages without duplicates, or every indexed package
    fn packages<'i>(&self, indexed: impl Iterator<Item = &'i str>) -> Vec<String> {
        if self.options.packages.is_empty() {
            return indexed.map(str::to_string).collect();
        }
        let mut packages: Vec<String> = Vec::with_capacity(self.options.packages.len());
        for package in &self.options.packages {
            if !packages.contains(package) {
                packages.push(package.clone());
            }
        }
        packages
    }

    fn write_all(&self, model: &Model, reporter: &Reporter) -> Result<usize> {
        if !self.options.has_output() {
            warn!("No output directory given; nothing to be done");
            return Ok(0);
        }

        let mut written = 0;
        let mut write = |path: PathBuf, encoding: Encoding, text: String| -> Result<()> {
            debug!("Writing {}", path.display());
            print_to_file(&path, encoding, |out| {
                out.push_str(&text);
                Ok(())
            })?;
            written += 1;
            Ok(())
        };

        for package in model.packages() {
            if let Some(dir) = &self.options.metadata_dir {
                let dir = package_dir(dir, &package.name);
                write(
                    dir.join("checkstyle-metadata.xml"),
                    Encoding::Utf8,
                    metadata_xml::render(model, &package.rules)?,
                )?;
                write(
                    dir.join("checkstyle-metadata.properties"),
                    Encoding::Latin1,
                    metadata_properties::render(model, &package.rules, reporter),
                )?;
            }
            if let Some(dir) = &self.options.messages_dir {
                write(
                    package_dir(dir, &package.name).join("messages.properties"),
                    Encoding::Latin1,
                    messages_properties::render(&package.rules, reporter),
                )?;
            }
        }

        if let Some(dir) = &self.options.mediawiki_dir {
            for rule in model.rules() {
                write(
                    dir.join(rule.family_plural())
                        .join(format!("{}.wiki", rule.simple_name)),
                    Encoding::Utf8,
                    mediawiki::render(model, rule),
                )?;
            }
        }

        if let Some(dir) = &self.options.html_dir {
            for page in html::render_pages(model, &self.config) {
                write(dir.join(&page.path), Encoding::Utf8, page.content)?;
            }
        }

        if let Some(path) = &self.options.dump_model {
            write(path.clone(), Encoding::Utf8, model.to_json()?)?;
        }

        info!("Wrote {} files", written);
        Ok(written)
    }
}

/// Convenience for a run over a single source root
pub fn generate(source_root: &Path, options: GeneratorOptions) -> Result<RunSummary> {
    let options = GeneratorOptions {
        source_roots: vec![source_root.to_path_buf()],
        ..options
    };
    Generator::new(DocletConfig::default(), options).run()
}
