//! Doc comment processing
//!
//! - `comment` - doc comment structure (first sentence, block tags)
//! - `diagnostics` - `Reporter`, `Diagnostic` and the `Skip` signal
//! - `html` - inline tag expansion and reference resolution
//! - `links` - hrefs between generated pages

pub mod comment;
pub mod diagnostics;
pub mod html;
pub mod links;

pub use comment::{first_sentence, BlockTag, Javadoc};
pub use diagnostics::{Diagnostic, Reporter, Severity, Skip};
pub use html::{escape_html, html_to_plain_text, Descriptions, DocContext, Html};
pub use links::{DocTarget, LinkMaker};
