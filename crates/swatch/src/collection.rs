//! Collection and mode lookup.
//!
//! [`get_or_create_collection`] finds a collection by name, or creates it, and
//! maps every requested mode name to a mode id. It is safe to call any number
//! of times: existing collections and modes are reused, and only the missing
//! pieces are added, so a run that stopped halfway can simply be repeated.

use indexmap::IndexMap;
use log::{debug, info};

use swatch_core::identifier::{CollectionId, ModeId, Name};

use crate::{
    catalog::CatalogError,
    error::SwatchError,
    report::DefinitionReport,
    store::{StoreError, VariableStore},
};

/// A collection handle plus the id of each requested mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionModes {
    collection: CollectionId,
    modes: IndexMap<Name, ModeId>,
}

impl CollectionModes {
    pub fn collection(&self) -> CollectionId {
        self.collection
    }

    /// Id of the mode called `name`, if it was requested.
    pub fn mode(&self, name: Name) -> Option<ModeId> {
        self.modes.get(&name).copied()
    }

    /// Mode ids in the order the names were requested.
    pub fn mode_ids(&self) -> impl Iterator<Item = ModeId> + '_ {
        self.modes.values().copied()
    }

    pub fn len(&self) -> usize {
        self.modes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modes.is_empty()
    }
}

/// Finds or creates the collection `name` with the modes `mode_names`.
///
/// - Existing collection: each requested mode is reused by name, or appended
///   if missing.
/// - New collection: the host seeds one default mode; it is renamed to
///   `mode_names[0]` and the remaining names are appended in order.
///
/// The result always holds exactly one id per requested name.
///
/// # Errors
///
/// Returns a [`CatalogError`] if `mode_names` is empty or repeats a name,
/// and propagates any [`StoreError`].
pub fn get_or_create_collection<S: VariableStore>(
    store: &mut S,
    name: Name,
    mode_names: &[Name],
    report: &mut DefinitionReport,
) -> Result<CollectionModes, SwatchError> {
    let Some((&first_mode, other_modes)) = mode_names.split_first() else {
        return Err(CatalogError::NoModes {
            collection: name.to_string(),
        }
        .into());
    };
    for (i, mode) in mode_names.iter().enumerate() {
        if mode_names[..i].contains(mode) {
            return Err(CatalogError::DuplicateMode {
                collection: name.to_string(),
                mode: mode.to_string(),
            }
            .into());
        }
    }

    let mut modes = IndexMap::with_capacity(mode_names.len());

    if let Some(collection) = store.collection_by_name(name).map(|c| c.id()) {
        debug!(collection = name.to_string(); "Reusing existing collection");

        for &mode_name in mode_names {
            let existing = store
                .collection(collection)
                .and_then(|c| c.mode_by_name(mode_name))
                .map(|mode| mode.mode_id());

            let mode_id = match existing {
                Some(mode_id) => mode_id,
                None => {
                    info!(collection = name.to_string(), mode = mode_name.to_string(); "Adding missing mode");
                    let mode_id = store.add_mode(collection, mode_name)?;
                    report.modes_created += 1;
                    mode_id
                }
            };
            modes.insert(mode_name, mode_id);
        }

        return Ok(CollectionModes { collection, modes });
    }

    info!(collection = name.to_string(), modes = mode_names.len(); "Creating collection");
    let collection = store.create_collection(name)?;
    report.collections_created += 1;

    let (default_mode, seeded_name) = store
        .collection(collection)
        .ok_or(StoreError::UnknownCollection(collection))?
        .modes()
        .first()
        .map(|mode| (mode.mode_id(), mode.name()))
        .ok_or(StoreError::UnknownCollection(collection))?;
    if seeded_name != first_mode {
        store.rename_mode(collection, default_mode, first_mode)?;
        report.modes_renamed += 1;
    }
    modes.insert(first_mode, default_mode);

    for &mode_name in other_modes {
        let mode_id = store.add_mode(collection, mode_name)?;
        report.modes_created += 1;
        modes.insert(mode_name, mode_id);
    }

    Ok(CollectionModes { collection, modes })
}
