//! Error types for Swatch operations.
//!
//! This module provides the main error type [`SwatchError`]. Every variant is
//! fatal for the run that raises it: the engine does not roll back partial
//! work, and recovery is a re-run of the (idempotent) whole operation.
//! Conditions local to one token or one node are not errors at all; see
//! [`crate::resolve`] and [`crate::report::SkippedNode`].

use std::io;

use thiserror::Error;

use crate::{catalog::CatalogError, store::StoreError};

/// The main error type for Swatch operations.
#[derive(Debug, Error)]
pub enum SwatchError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Variable store error: {0}")]
    Store(#[from] StoreError),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Document error: {0}")]
    Document(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("No collection named `{0}`")]
    MissingCollection(String),

    #[error("Collection `{collection}` has no mode named `{mode}`")]
    MissingMode { collection: String, mode: String },
}
