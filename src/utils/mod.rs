// Utilities Module
//
// Helper functions shared by the extractors, the model and the renderers.

pub mod paths;

pub use paths::{package_dir, simple_name, to_relative_unix_style};
