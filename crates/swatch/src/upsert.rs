//! Idempotent token upsert.
//!
//! [`upsert_variable`] finds a token by exact name within a collection, or
//! creates it, then writes the per-mode values it was given. Modes missing
//! from the update are left alone, so a token can be filled in over several
//! calls.

use log::debug;

use swatch_core::{
    identifier::{CollectionId, ModeId, Name, VariableId},
    value::{VariableType, VariableValue},
};

use crate::{error::SwatchError, report::DefinitionReport, store::VariableStore};

/// The desired state of one token.
///
/// # Examples
///
/// ```
/// use swatch::upsert::VariableUpdate;
/// use swatch_core::{color::Color, identifier::{ModeId, Name}, value::VariableType};
///
/// let update = VariableUpdate::new(Name::new("global/black"), VariableType::Color)
///     .with_value(ModeId::new(2), Color::BLACK.into())
///     .with_description("Pure black");
/// assert_eq!(update.values().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct VariableUpdate<'a> {
    name: Name,
    resolved_type: VariableType,
    values: Vec<(ModeId, VariableValue)>,
    description: Option<&'a str>,
}

impl<'a> VariableUpdate<'a> {
    pub fn new(name: Name, resolved_type: VariableType) -> Self {
        Self {
            name,
            resolved_type,
            values: Vec::new(),
            description: None,
        }
    }

    /// Adds the value for one mode.
    pub fn with_value(mut self, mode: ModeId, value: VariableValue) -> Self {
        self.values.push((mode, value));
        self
    }

    /// Sets the description, replacing whatever the token had.
    pub fn with_description(mut self, description: &'a str) -> Self {
        self.description = Some(description);
        self
    }

    pub fn name(&self) -> Name {
        self.name
    }

    pub fn resolved_type(&self) -> VariableType {
        self.resolved_type
    }

    pub fn values(&self) -> &[(ModeId, VariableValue)] {
        &self.values
    }

    pub fn description(&self) -> Option<&'a str> {
        self.description
    }
}

/// Creates or updates the token `update.name()` in `collection`.
///
/// Looks the token up by exact name; creates it with `update`'s type only if
/// no token of that name exists, so no call sequence produces duplicates.
/// Then every listed mode value is written and the description, if given,
/// overwrites the old one. `report` counts what actually changed.
///
/// Returns the token's id, which stays valid as an alias target.
///
/// # Errors
///
/// Propagates [`crate::store::StoreError`]s, for example a value whose type
/// does not match an existing token of the same name.
pub fn upsert_variable<S: VariableStore>(
    store: &mut S,
    collection: CollectionId,
    update: &VariableUpdate<'_>,
    report: &mut DefinitionReport,
) -> Result<VariableId, SwatchError> {
    let existing = store
        .variables_in(collection)
        .find(|variable| variable.name() == update.name)
        .map(|variable| variable.id());

    let id = match existing {
        Some(id) => id,
        None => {
            let id = store.create_variable(update.name, collection, update.resolved_type)?;
            report.variables_created += 1;
            debug!(variable = update.name.to_string(), id = id.to_string(); "Created variable");
            id
        }
    };

    for (mode, value) in &update.values {
        let unchanged = store
            .variable(id)
            .and_then(|variable| variable.value_for_mode(*mode))
            .is_some_and(|current| current == value);
        store.set_value_for_mode(id, *mode, value.clone())?;
        if !unchanged {
            report.values_changed += 1;
        }
    }

    if let Some(description) = update.description {
        let unchanged = store
            .variable(id)
            .is_some_and(|variable| variable.description() == description);
        store.set_description(id, description)?;
        if !unchanged {
            report.descriptions_changed += 1;
        }
    }

    Ok(id)
}
