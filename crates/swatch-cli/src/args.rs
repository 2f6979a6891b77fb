//! Command-line argument definitions for the Swatch CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Global flags select the configuration file and logging
//! verbosity; the [`Command`] picks the operation.

use clap::{Parser, Subcommand};

/// Command-line arguments for the Swatch token tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Path to configuration file (TOML)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,
}

/// Operations on a design document.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Define tokens, then bind matching paints on the current page
    Sync {
        /// Path to the document (JSON)
        document: String,

        /// Where to write the updated document; defaults to the input path
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Create or update the token collections only
    Define {
        /// Path to the document (JSON)
        document: String,

        /// Where to write the updated document; defaults to the input path
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Print the color collection as CSS custom properties
    Css {
        /// Read tokens from this document instead of the built-in catalogue
        #[arg(long)]
        document: Option<String>,
    },

    /// Validate the built-in catalogue and print its size
    Check,
}
