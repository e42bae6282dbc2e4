//! Command line via `clap`

use crate::config::DocletConfig;
use crate::error::Result;
use crate::generator::GeneratorOptions;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "csdoclet",
    version,
    about = "Generate eclipse-cs metadata and documentation for CheckStyle extensions",
    long_about = "Parses the Java sources of CheckStyle checks, filters and quickfixes and generates \
                  checkstyle-metadata.xml/.properties, messages.properties, MediaWiki and HTML pages.\n\n\
                  Configuration precedence: CLI > csdoclet.toml > defaults.",
    after_help = "Examples:\n  csdoclet -s src/main/java --metadata-dir target/classes com.acme.checks\n  \
                  csdoclet -s src --html-dir target/site --doc-title \"Acme checks\""
)]
/// Top-level options
pub struct Cli {
    /// Packages to document (default: all packages found)
    pub packages: Vec<String>,

    #[arg(short = 's', long = "source-root", required = true, help = "Root directory of Java sources; repeatable")]
    pub source_roots: Vec<PathBuf>,

    #[arg(long, help = "Configuration file (default: ./csdoclet.toml if present)")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Output root of checkstyle-metadata.xml and checkstyle-metadata.properties")]
    pub metadata_dir: Option<PathBuf>,

    #[arg(long, help = "Output root of messages.properties")]
    pub messages_dir: Option<PathBuf>,

    #[arg(long, help = "Output directory of the MediaWiki pages")]
    pub mediawiki_dir: Option<PathBuf>,

    #[arg(long, help = "Output directory of the HTML pages")]
    pub html_dir: Option<PathBuf>,

    #[arg(long, help = "Write the linked model as JSON to this file")]
    pub dump_model: Option<PathBuf>,

    #[arg(long, help = "Browser window title of the HTML pages")]
    pub window_title: Option<String>,

    #[arg(long, help = "Title of the HTML overview page")]
    pub doc_title: Option<String>,

    #[arg(short, long, action = clap::ArgAction::SetTrue, help = "Log debug output (overridden by RUST_LOG)")]
    pub verbose: bool,
}

impl Cli {
    /// The configuration file (or defaults) with the command line titles applied
    pub fn load_config(&self) -> Result<DocletConfig> {
        let mut config = DocletConfig::discover(self.config.as_deref())?;
        if let Some(title) = &self.window_title {
            config.window_title = Some(title.clone());
        }
        if let Some(title) = &self.doc_title {
            config.doc_title = Some(title.clone());
        }
        Ok(config)
    }

    pub fn generator_options(&self) -> GeneratorOptions {
        GeneratorOptions {
            source_roots: self.source_roots.clone(),
            packages: self.packages.clone(),
            metadata_dir: self.metadata_dir.clone(),
            messages_dir: self.messages_dir.clone(),
            mediawiki_dir: self.mediawiki_dir.clone(),
            html_dir: self.html_dir.clone(),
            dump_model: self.dump_model.clone(),
        }
    }
}
