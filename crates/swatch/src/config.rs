//! Configuration types for Swatch runs.
//!
//! All types implement [`serde::Deserialize`] so the CLI can load them from
//! a TOML file; every field has a default, so an empty file (or no file at
//! all) gives the stoll.studio setup.
//!
//! - [`AppConfig`] - Top-level configuration combining both sections.
//! - [`RebindConfig`] - Which collection and mode drive color matching.
//! - [`CssConfig`] - How the stylesheet mirror is rendered.
//!
//! # Example
//!
//! ```
//! # use swatch::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.rebind().collection(), "stoll.studio Colors");
//! assert_eq!(config.rebind().max_alias_depth(), 5);
//! ```

use serde::Deserialize;

use crate::{catalog::COLORS_COLLECTION, resolve::DEFAULT_MAX_ALIAS_DEPTH};

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AppConfig {
    /// Rebinding section.
    #[serde(default)]
    rebind: RebindConfig,

    /// Stylesheet section.
    #[serde(default)]
    css: CssConfig,
}

impl AppConfig {
    pub fn new(rebind: RebindConfig, css: CssConfig) -> Self {
        Self { rebind, css }
    }

    pub fn rebind(&self) -> &RebindConfig {
        &self.rebind
    }

    pub fn css(&self) -> &CssConfig {
        &self.css
    }
}

/// Settings for the color index and the rebinding walk.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RebindConfig {
    /// Name of the collection whose color tokens are indexed.
    #[serde(default = "default_collection")]
    collection: String,

    /// Mode whose values are matched against paints. `None` means the
    /// collection's first mode.
    #[serde(default)]
    canonical_mode: Option<String>,

    /// Alias hops followed before a token counts as unresolvable.
    #[serde(default = "default_max_alias_depth")]
    max_alias_depth: usize,
}

fn default_collection() -> String {
    COLORS_COLLECTION.to_string()
}

fn default_max_alias_depth() -> usize {
    DEFAULT_MAX_ALIAS_DEPTH
}

impl Default for RebindConfig {
    fn default() -> Self {
        Self {
            collection: default_collection(),
            canonical_mode: None,
            max_alias_depth: default_max_alias_depth(),
        }
    }
}

impl RebindConfig {
    pub fn new(collection: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            ..Self::default()
        }
    }

    /// Matches against `mode` instead of the first mode.
    pub fn with_canonical_mode(mut self, mode: impl Into<String>) -> Self {
        self.canonical_mode = Some(mode.into());
        self
    }

    pub fn with_max_alias_depth(mut self, max_alias_depth: usize) -> Self {
        self.max_alias_depth = max_alias_depth;
        self
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    pub fn canonical_mode(&self) -> Option<&str> {
        self.canonical_mode.as_deref()
    }

    pub fn max_alias_depth(&self) -> usize {
        self.max_alias_depth
    }
}

/// Settings for the stylesheet mirror.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CssConfig {
    /// Mode rendered under `:root`. `None` means the collection's first mode.
    #[serde(default)]
    default_mode: Option<String>,

    /// Attribute selecting the other modes, as in `[data-theme="dark"]`.
    #[serde(default = "default_selector_attribute")]
    selector_attribute: String,
}

fn default_selector_attribute() -> String {
    "data-theme".to_string()
}

impl Default for CssConfig {
    fn default() -> Self {
        Self {
            default_mode: None,
            selector_attribute: default_selector_attribute(),
        }
    }
}

impl CssConfig {
    pub fn with_default_mode(mut self, mode: impl Into<String>) -> Self {
        self.default_mode = Some(mode.into());
        self
    }

    pub fn with_selector_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.selector_attribute = attribute.into();
        self
    }

    pub fn default_mode(&self) -> Option<&str> {
        self.default_mode.as_deref()
    }

    pub fn selector_attribute(&self) -> &str {
        &self.selector_attribute
    }
}
