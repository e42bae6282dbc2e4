//! Diagnostics collected during a run
//!
//! Every problem found in the input is reported through a [`Reporter`], which logs it and
//! keeps it for the run summary. A per-item builder that gives up on its item returns
//! [`Skip`] after reporting why.

use crate::extractors::base::SourcePosition;
use serde::Serialize;
use std::cell::RefCell;
use std::fmt;
use tracing::{error, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// A reported problem, attributed to a source position when one is known
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub position: Option<SourcePosition>,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.position {
            Some(position) => write!(f, "{}: {}: {}", position, self.severity, self.message),
            None => write!(f, "{}: {}", self.severity, self.message),
        }
    }
}

/// "Abandon this item": the problem has already been reported
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Skip;

/// Collects and logs diagnostics
#[derive(Debug, Default)]
pub struct Reporter {
    diagnostics: RefCell<Vec<Diagnostic>>,
    muted: bool,
}

impl Reporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// A reporter that drops everything, for output that is derived a second time
    pub fn muted() -> Self {
        Self {
            diagnostics: RefCell::default(),
            muted: true,
        }
    }

    pub fn error(&self, position: Option<&SourcePosition>, message: impl Into<String>) {
        self.report(Severity::Error, position, message.into());
    }

    pub fn warning(&self, position: Option<&SourcePosition>, message: impl Into<String>) {
        self.report(Severity::Warning, position, message.into());
    }

    /// Report an error and return the signal to abandon the current item
    pub fn skip(&self, position: Option<&SourcePosition>, message: impl Into<String>) -> Skip {
        self.error(position, message);
        Skip
    }

    fn report(&self, severity: Severity, position: Option<&SourcePosition>, message: String) {
        if self.muted {
            return;
        }
        let diagnostic = Diagnostic {
            severity,
            position: position.cloned(),
            message,
        };
        match severity {
            Severity::Error => error!("{}", diagnostic),
            Severity::Warning => warn!("{}", diagnostic),
        }
        self.diagnostics.borrow_mut().push(diagnostic);
    }

    pub fn error_count(&self) -> usize {
        self.count(Severity::Error)
    }

    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    fn count(&self, severity: Severity) -> usize {
        self.diagnostics
            .borrow()
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }

    /// Snapshot of everything reported so far
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics.borrow().clone()
    }

    /// Messages of the reported errors, in reporting order
    pub fn errors(&self) -> Vec<String> {
        self.messages(Severity::Error)
    }

    pub fn warnings(&self) -> Vec<String> {
        self.messages(Severity::Warning)
    }

    fn messages(&self, severity: Severity) -> Vec<String> {
        self.diagnostics
            .borrow()
            .iter()
            .filter(|d| d.severity == severity)
            .map(|d| d.message.clone())
            .collect()
    }
}
