//! Error adapter for converting SwatchError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error type
//! and miette's rich diagnostic formatting used in the CLI.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan};

use swatch::SwatchError;

/// Adapter giving a [`SwatchError`] a diagnostic code and, where one
/// applies, a hint for the operator.
pub struct ErrorAdapter<'a>(pub &'a SwatchError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            SwatchError::Io(_) => "swatch::io",
            SwatchError::Store(_) => "swatch::store",
            SwatchError::Catalog(_) => "swatch::catalog",
            SwatchError::Document(_) => "swatch::document",
            SwatchError::Config(_) => "swatch::config",
            SwatchError::MissingCollection(_) => "swatch::missing_collection",
            SwatchError::MissingMode { .. } => "swatch::missing_mode",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match &self.0 {
            SwatchError::Store(_) => {
                "nothing was rolled back; fix the document and run the same command again"
            }
            SwatchError::MissingCollection(_) => {
                "run `swatch define` first, or set `rebind.collection` in the config"
            }
            SwatchError::MissingMode { .. } => "check `rebind.canonical_mode` or `css.default_mode`",
            _ => return None,
        };
        Some(Box::new(help))
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}
