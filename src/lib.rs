// csdoclet - eclipse-cs metadata and documentation for CheckStyle extensions
//
// Java sources are parsed with tree-sitter into a declaration index; the model layer
// turns annotated rule, quickfix and option provider classes into a linked model,
// which the renderers write out.

pub mod cli;
pub mod config;
pub mod doc;
pub mod error;
pub mod extractors;
pub mod generator;
pub mod language;
pub mod model;
pub mod output;
pub mod render;
pub mod utils;

pub use config::DocletConfig;
pub use error::{DocletError, Result};
pub use generator::{generate, Generator, GeneratorOptions, RunSummary};
pub use model::Model;
