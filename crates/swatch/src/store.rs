//! Variable store: collections, modes and tokens.
//!
//! [`VariableStore`] is the seam to the host tool's variable API. The engine
//! only ever talks to the host through this trait, so the same definition and
//! rebinding code runs against the live host or against [`MemoryStore`], the
//! serializable in-memory implementation used by the CLI and the tests.
//!
//! The store enforces the data model invariants: collection names are unique
//! in the store, mode and token names are unique in their collection, and
//! every stored value (or alias target) matches its token's type.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use swatch_core::{
    identifier::{CollectionId, ModeId, Name, VariableId},
    value::{VariableType, VariableValue},
};

/// Name the host gives the single mode seeded into every new collection.
pub const DEFAULT_MODE_NAME: &str = "Mode 1";

/// Errors raised by a [`VariableStore`].
///
/// These mirror the validation failures of the host API and are fatal for
/// the run that triggers them.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    #[error("unknown collection {0}")]
    UnknownCollection(CollectionId),

    #[error("unknown mode {mode} in collection {collection}")]
    UnknownMode {
        collection: CollectionId,
        mode: ModeId,
    },

    #[error("unknown variable {0}")]
    UnknownVariable(VariableId),

    #[error("a collection named `{0}` already exists")]
    DuplicateCollection(Name),

    #[error("collection `{collection}` already has a mode named `{mode}`")]
    DuplicateMode { collection: Name, mode: Name },

    #[error("collection `{collection}` already has a variable named `{variable}`")]
    DuplicateVariable { collection: Name, variable: Name },

    #[error("variable `{variable}` has type {expected}, got a {found} value")]
    TypeMismatch {
        variable: Name,
        expected: VariableType,
        found: VariableType,
    },
}

/// A named variant within a collection, e.g. the `Dark` theme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mode {
    mode_id: ModeId,
    name: Name,
}

impl Mode {
    pub fn mode_id(&self) -> ModeId {
        self.mode_id
    }

    pub fn name(&self) -> Name {
        self.name
    }
}

/// A named group of tokens sharing one set of modes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableCollection {
    id: CollectionId,
    name: Name,
    modes: Vec<Mode>,
    default_mode_id: ModeId,
    #[serde(default)]
    variable_ids: Vec<VariableId>,
}

impl VariableCollection {
    pub fn id(&self) -> CollectionId {
        self.id
    }

    pub fn name(&self) -> Name {
        self.name
    }

    /// Modes in creation order.
    pub fn modes(&self) -> &[Mode] {
        &self.modes
    }

    /// The mode seeded when the collection was created.
    pub fn default_mode_id(&self) -> ModeId {
        self.default_mode_id
    }

    /// Tokens in creation order.
    pub fn variable_ids(&self) -> &[VariableId] {
        &self.variable_ids
    }

    /// Finds a mode by its display name.
    pub fn mode_by_name(&self, name: Name) -> Option<&Mode> {
        self.modes.iter().find(|mode| mode.name == name)
    }

    /// Returns `true` if `mode` belongs to this collection.
    pub fn has_mode(&self, mode: ModeId) -> bool {
        self.modes.iter().any(|m| m.mode_id == mode)
    }
}

/// A token: a named, typed value with one entry per mode of its collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variable {
    id: VariableId,
    name: Name,
    variable_collection_id: CollectionId,
    resolved_type: VariableType,
    #[serde(default)]
    description: String,
    #[serde(default)]
    values_by_mode: IndexMap<ModeId, VariableValue>,
}

impl Variable {
    pub fn id(&self) -> VariableId {
        self.id
    }

    pub fn name(&self) -> Name {
        self.name
    }

    pub fn collection_id(&self) -> CollectionId {
        self.variable_collection_id
    }

    pub fn resolved_type(&self) -> VariableType {
        self.resolved_type
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// The value stored for `mode`, if one has been set.
    pub fn value_for_mode(&self, mode: ModeId) -> Option<&VariableValue> {
        self.values_by_mode.get(&mode)
    }

    /// All stored values, in the order they were first set.
    pub fn values_by_mode(&self) -> impl Iterator<Item = (ModeId, &VariableValue)> {
        self.values_by_mode.iter().map(|(mode, value)| (*mode, value))
    }
}

/// The host tool's variable API.
///
/// Implementations must keep ids stable: an id handed out once keeps
/// referring to the same collection, mode or variable for the life of the
/// document, across renames and value updates.
pub trait VariableStore {
    /// All collections in creation order.
    fn collections(&self) -> impl Iterator<Item = &VariableCollection>;

    fn collection(&self, id: CollectionId) -> Option<&VariableCollection>;

    /// Finds a collection by display name.
    fn collection_by_name(&self, name: Name) -> Option<&VariableCollection> {
        self.collections().find(|collection| collection.name() == name)
    }

    /// Creates an empty collection seeded with one default mode named
    /// [`DEFAULT_MODE_NAME`].
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuplicateCollection`] if the name is taken.
    fn create_collection(&mut self, name: Name) -> Result<CollectionId, StoreError>;

    /// Appends a mode to a collection and returns its id.
    fn add_mode(&mut self, collection: CollectionId, name: Name) -> Result<ModeId, StoreError>;

    /// Renames a mode, keeping its id.
    fn rename_mode(
        &mut self,
        collection: CollectionId,
        mode: ModeId,
        name: Name,
    ) -> Result<(), StoreError>;

    fn variable(&self, id: VariableId) -> Option<&Variable>;

    /// Tokens of a collection in creation order.
    fn variables_in(&self, collection: CollectionId) -> impl Iterator<Item = &Variable> {
        self.collection(collection)
            .into_iter()
            .flat_map(|collection| collection.variable_ids().iter())
            .filter_map(move |id| self.variable(*id))
    }

    /// Creates a token with no values in `collection`.
    fn create_variable(
        &mut self,
        name: Name,
        collection: CollectionId,
        resolved_type: VariableType,
    ) -> Result<VariableId, StoreError>;

    /// Sets the value of a token for one mode of its collection.
    ///
    /// # Errors
    ///
    /// Fails if the mode does not belong to the token's collection, if a
    /// literal has the wrong type, or if an alias target is missing or has a
    /// different type.
    fn set_value_for_mode(
        &mut self,
        variable: VariableId,
        mode: ModeId,
        value: VariableValue,
    ) -> Result<(), StoreError>;

    fn set_description(&mut self, variable: VariableId, description: &str)
    -> Result<(), StoreError>;
}

/// Serializable in-memory [`VariableStore`].
///
/// Ids are drawn from one counter shared by collections, modes and
/// variables, so every id in a store is distinct.
///
/// # Examples
///
/// ```
/// use swatch::store::{MemoryStore, VariableStore};
/// use swatch_core::identifier::Name;
///
/// let mut store = MemoryStore::new();
/// let id = store.create_collection(Name::new("Colors")).unwrap();
/// let collection = store.collection(id).unwrap();
/// assert_eq!(collection.modes().len(), 1);
/// assert_eq!(collection.modes()[0].name(), "Mode 1");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryStore {
    #[serde(default)]
    collections: IndexMap<CollectionId, VariableCollection>,
    #[serde(default)]
    variables: IndexMap<VariableId, Variable>,
    /// Next raw id to hand out. Zero means "not tracked yet" (for example a
    /// hand-written document) and is recomputed from the contents.
    #[serde(default)]
    next_id: u32,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of variables across all collections.
    pub fn variable_count(&self) -> usize {
        self.variables.len()
    }

    fn allocate(&mut self) -> u32 {
        if self.next_id == 0 {
            let highest = self
                .collections
                .values()
                .flat_map(|collection| {
                    std::iter::once(collection.id.raw())
                        .chain(collection.modes.iter().map(|mode| mode.mode_id.raw()))
                })
                .chain(self.variables.keys().map(|id| id.raw()))
                .max()
                .unwrap_or(0);
            self.next_id = highest + 1;
        }
        let raw = self.next_id;
        self.next_id += 1;
        raw
    }

    fn collection_mut(&mut self, id: CollectionId) -> Result<&mut VariableCollection, StoreError> {
        self.collections
            .get_mut(&id)
            .ok_or(StoreError::UnknownCollection(id))
    }

    fn check_alias_target(&self, variable: &Variable, target: VariableId) -> Result<(), StoreError> {
        let target = self
            .variables
            .get(&target)
            .ok_or(StoreError::UnknownVariable(target))?;
        if target.resolved_type != variable.resolved_type {
            return Err(StoreError::TypeMismatch {
                variable: variable.name,
                expected: variable.resolved_type,
                found: target.resolved_type,
            });
        }
        Ok(())
    }
}

impl VariableStore for MemoryStore {
    fn collections(&self) -> impl Iterator<Item = &VariableCollection> {
        self.collections.values()
    }

    fn collection(&self, id: CollectionId) -> Option<&VariableCollection> {
        self.collections.get(&id)
    }

    fn create_collection(&mut self, name: Name) -> Result<CollectionId, StoreError> {
        if self.collection_by_name(name).is_some() {
            return Err(StoreError::DuplicateCollection(name));
        }

        let id = CollectionId::new(self.allocate());
        let default_mode_id = ModeId::new(self.allocate());
        self.collections.insert(
            id,
            VariableCollection {
                id,
                name,
                modes: vec![Mode {
                    mode_id: default_mode_id,
                    name: Name::new(DEFAULT_MODE_NAME),
                }],
                default_mode_id,
                variable_ids: Vec::new(),
            },
        );
        Ok(id)
    }

    fn add_mode(&mut self, collection: CollectionId, name: Name) -> Result<ModeId, StoreError> {
        let mode_id = ModeId::new(self.allocate());
        let target = self.collection_mut(collection)?;
        if target.mode_by_name(name).is_some() {
            return Err(StoreError::DuplicateMode {
                collection: target.name,
                mode: name,
            });
        }
        target.modes.push(Mode { mode_id, name });
        Ok(mode_id)
    }

    fn rename_mode(
        &mut self,
        collection: CollectionId,
        mode: ModeId,
        name: Name,
    ) -> Result<(), StoreError> {
        let target = self.collection_mut(collection)?;
        if let Some(existing) = target.mode_by_name(name) {
            if existing.mode_id == mode {
                return Ok(());
            }
            return Err(StoreError::DuplicateMode {
                collection: target.name,
                mode: name,
            });
        }
        let entry = target
            .modes
            .iter_mut()
            .find(|m| m.mode_id == mode)
            .ok_or(StoreError::UnknownMode { collection, mode })?;
        entry.name = name;
        Ok(())
    }

    fn variable(&self, id: VariableId) -> Option<&Variable> {
        self.variables.get(&id)
    }

    fn create_variable(
        &mut self,
        name: Name,
        collection: CollectionId,
        resolved_type: VariableType,
    ) -> Result<VariableId, StoreError> {
        let owner = self
            .collections
            .get(&collection)
            .ok_or(StoreError::UnknownCollection(collection))?;
        if self.variables_in(collection).any(|v| v.name == name) {
            return Err(StoreError::DuplicateVariable {
                collection: owner.name,
                variable: name,
            });
        }

        let id = VariableId::new(self.allocate());
        self.variables.insert(
            id,
            Variable {
                id,
                name,
                variable_collection_id: collection,
                resolved_type,
                description: String::new(),
                values_by_mode: IndexMap::new(),
            },
        );
        self.collection_mut(collection)?.variable_ids.push(id);
        Ok(id)
    }

    fn set_value_for_mode(
        &mut self,
        variable: VariableId,
        mode: ModeId,
        value: VariableValue,
    ) -> Result<(), StoreError> {
        let current = self
            .variables
            .get(&variable)
            .ok_or(StoreError::UnknownVariable(variable))?;

        let collection = current.variable_collection_id;
        if !self
            .collections
            .get(&collection)
            .is_some_and(|c| c.has_mode(mode))
        {
            return Err(StoreError::UnknownMode { collection, mode });
        }

        match &value {
            VariableValue::Literal(literal) => {
                if literal.variable_type() != current.resolved_type {
                    return Err(StoreError::TypeMismatch {
                        variable: current.name,
                        expected: current.resolved_type,
                        found: literal.variable_type(),
                    });
                }
            }
            VariableValue::Alias(target) => self.check_alias_target(current, *target)?,
        }

        if let Some(entry) = self.variables.get_mut(&variable) {
            entry.values_by_mode.insert(mode, value);
        }
        Ok(())
    }

    fn set_description(
        &mut self,
        variable: VariableId,
        description: &str,
    ) -> Result<(), StoreError> {
        let entry = self
            .variables
            .get_mut(&variable)
            .ok_or(StoreError::UnknownVariable(variable))?;
        entry.description = description.to_string();
        Ok(())
    }
}
