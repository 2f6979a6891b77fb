//! CLI logic for the Swatch token tool.
//!
//! This module loads configuration and documents, runs the requested
//! [`TokenSync`] phase and prints the operator report.

pub mod error_adapter;

mod args;
mod config;

pub use args::{Args, Command};

use std::fs;

use log::info;

use swatch::{SwatchError, TokenSync, document::Document, store::MemoryStore};

/// Run the Swatch CLI application
///
/// # Errors
///
/// Returns `SwatchError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Malformed documents
/// - Store failures during definition
/// - A configured collection or mode that does not exist
pub fn run(args: &Args) -> Result<(), SwatchError> {
    let app_config = config::load_config(args.config.as_ref())?;
    let sync = TokenSync::new(app_config);

    match &args.command {
        Command::Sync { document, output } => {
            let mut doc = load_document(document)?;
            let report = sync.sync(&mut doc)?;
            save_document(&doc, output.as_deref().unwrap_or(document))?;

            println!("{report}");
            for skipped in &report.rebind.skipped {
                println!(
                    "  skipped {} ({}): {}",
                    skipped.node_name, skipped.node_id, skipped.reason
                );
            }
        }
        Command::Define { document, output } => {
            let mut doc = load_document(document)?;
            let report = sync.define(doc.store_mut())?;
            save_document(&doc, output.as_deref().unwrap_or(document))?;

            println!("{report}");
        }
        Command::Css { document } => {
            let sheet = match document {
                Some(path) => sync.stylesheet(load_document(path)?.store())?,
                None => {
                    let mut store = MemoryStore::new();
                    sync.define(&mut store)?;
                    sync.stylesheet(&store)?
                }
            };
            print!("{sheet}");
        }
        Command::Check => {
            let catalog = sync.catalog();
            catalog.validate()?;
            for collection in catalog.collections() {
                println!(
                    "{}: {} tokens, modes {}",
                    collection.name,
                    collection.tokens.len(),
                    collection.modes.join(", ")
                );
            }
            println!("✓ {} tokens valid.", catalog.token_count());
        }
    }

    Ok(())
}

fn load_document(path: &str) -> Result<Document, SwatchError> {
    info!(path; "Loading document");
    let source = fs::read_to_string(path)?;
    Document::from_json(&source)
}

fn save_document(document: &Document, path: &str) -> Result<(), SwatchError> {
    fs::write(path, document.to_json()?)?;
    info!(path; "Document written");
    Ok(())
}
