//! Swatch - design-token definition and color rebinding.
//!
//! Swatch keeps a multi-mode token graph (base → semantic → component) in a
//! design document's variable store, then walks the document and replaces
//! hand-set paint colors with references into that graph, so a whole page can
//! switch theme by switching mode.
//!
//! Both phases are idempotent: re-running them on their own output changes
//! nothing.

pub mod catalog;
pub mod collection;
pub mod config;
pub mod css;
pub mod document;
pub mod index;
pub mod rebind;
pub mod report;
pub mod resolve;
pub mod store;
pub mod upsert;

mod error;

pub use swatch_core::{color, identifier, paint, value};

pub use error::SwatchError;

use log::{info, warn};

use catalog::Catalog;
use config::AppConfig;
use document::Document;
use identifier::Name;
use index::ColorIndex;
use rebind::Rebinder;
use report::{DefinitionReport, RebindReport, SyncReport};
use resolve::AliasResolver;
use store::{VariableCollection, VariableStore};

/// Runs the token pipeline: definition, then rebinding.
///
/// # Examples
///
/// ```
/// use swatch::{
///     TokenSync,
///     color::Color,
///     document::{Document, Node, NodeKind, Page, PaintSlot},
///     paint::SolidPaint,
/// };
///
/// let mut document = Document::new();
/// document.add_page(Page::new(
///     "Home",
///     vec![Node::new("1:1", "Sticky bar", NodeKind::Rectangle)
///         .with_fills(vec![SolidPaint::new(Color::new("#ffff00").unwrap(), 1.0).into()])],
/// ));
///
/// let sync = TokenSync::default();
/// let report = sync.sync(&mut document).unwrap();
/// assert_eq!(report.rebind.newly_bound(), 1);
///
/// // Already bound on the second run.
/// let report = sync.sync(&mut document).unwrap();
/// assert!(report.definition.is_unchanged());
/// assert_eq!(report.rebind.already_bound(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct TokenSync {
    config: AppConfig,
    catalog: Catalog,
}

impl TokenSync {
    /// Creates a pipeline for the standard catalogue.
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            catalog: Catalog::standard(),
        }
    }

    /// Replaces the catalogue that [`TokenSync::define`] materializes.
    pub fn with_catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Creates or updates every collection, mode and token of the catalogue.
    ///
    /// # Errors
    ///
    /// Returns [`SwatchError::Catalog`] for an invalid catalogue and
    /// propagates store failures. Nothing is rolled back; re-run to recover.
    pub fn define<S: VariableStore>(&self, store: &mut S) -> Result<DefinitionReport, SwatchError> {
        info!(collections = self.catalog.collections().len(); "Defining tokens");
        self.catalog.apply(store)
    }

    /// Builds the color index from the configured collection and mode.
    ///
    /// # Errors
    ///
    /// Returns [`SwatchError::MissingCollection`] or
    /// [`SwatchError::MissingMode`] if the configured names are not in the
    /// store.
    pub fn build_index<S: VariableStore>(&self, store: &S) -> Result<ColorIndex, SwatchError> {
        let rebind = self.config.rebind();
        let collection = self.color_collection(store)?;
        let mode = match rebind.canonical_mode() {
            Some(mode) => collection
                .mode_by_name(Name::new(mode))
                .ok_or_else(|| SwatchError::MissingMode {
                    collection: rebind.collection().to_string(),
                    mode: mode.to_string(),
                })?
                .mode_id(),
            None => collection.default_mode_id(),
        };

        let resolver =
            AliasResolver::new(store, mode).with_max_depth(rebind.max_alias_depth());
        let index = ColorIndex::build(&resolver, collection.id());
        info!(
            collection = rebind.collection(),
            mode = mode.to_string(),
            entries = index.len();
            "Color index ready"
        );
        Ok(index)
    }

    /// Binds the current page's literal paints to matching tokens.
    ///
    /// A document without pages yields an empty report.
    ///
    /// # Errors
    ///
    /// Fails only if the index cannot be built; see
    /// [`TokenSync::build_index`]. Non-editable nodes are reported, not
    /// raised.
    pub fn rebind(&self, document: &mut Document) -> Result<RebindReport, SwatchError> {
        let index = self.build_index(document.store())?;
        let Some(page) = document.current_page_mut() else {
            warn!("Document has no current page, nothing to rebind");
            return Ok(RebindReport::default());
        };
        Ok(Rebinder::new(&index).rebind_page(page))
    }

    /// Defines tokens in the document's store, then rebinds its current page.
    ///
    /// # Errors
    ///
    /// See [`TokenSync::define`] and [`TokenSync::rebind`].
    pub fn sync(&self, document: &mut Document) -> Result<SyncReport, SwatchError> {
        let definition = self.define(document.store_mut())?;
        let rebind = self.rebind(document)?;
        Ok(SyncReport { definition, rebind })
    }

    /// Renders the configured color collection as a stylesheet.
    ///
    /// # Errors
    ///
    /// See [`css::render_stylesheet`].
    pub fn stylesheet<S: VariableStore>(&self, store: &S) -> Result<String, SwatchError> {
        let collection = self.color_collection(store)?;
        css::render_stylesheet(store, collection, self.config.css())
    }

    fn color_collection<'s, S: VariableStore>(
        &self,
        store: &'s S,
    ) -> Result<&'s VariableCollection, SwatchError> {
        let name = self.config.rebind().collection();
        store
            .collection_by_name(Name::new(name))
            .ok_or_else(|| SwatchError::MissingCollection(name.to_string()))
    }
}
