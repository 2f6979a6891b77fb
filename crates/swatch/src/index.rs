//! Reverse color index: quantized color → token.
//!
//! Every color token of a collection is resolved in the canonical mode and
//! keyed by [`ColorKey`]. Tokens are inserted in tier order (base, then
//! semantic, then component), keeping declaration order within a tier, and a
//! later insertion replaces an earlier one with the same key. A fill that
//! matches both a primitive and a meaningful token therefore binds to the
//! meaningful one, and two tokens of the same tier resolve in favour of the
//! one declared last. Every replacement is kept as an [`IndexCollision`].

use std::collections::HashMap;

use log::debug;

use swatch_core::{
    color::ColorKey,
    identifier::{CollectionId, VariableId},
    value::{Literal, VariableType},
};

use crate::{catalog::Tier, resolve::AliasResolver, store::VariableStore};

/// Two tokens that resolved to the same key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexCollision {
    pub key: ColorKey,
    /// The token that held the key before.
    pub displaced: VariableId,
    /// The token the key maps to now.
    pub winner: VariableId,
}

/// Lookup table from quantized colors to the token that should bind them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColorIndex {
    entries: HashMap<ColorKey, VariableId>,
    collisions: Vec<IndexCollision>,
}

impl ColorIndex {
    /// Indexes every color token of `collection` by its value in the
    /// resolver's mode.
    ///
    /// Tokens whose value cannot be resolved are left out.
    pub fn build<S: VariableStore>(resolver: &AliasResolver<'_, S>, collection: CollectionId) -> Self {
        let mut tokens: Vec<_> = resolver
            .store()
            .variables_in(collection)
            .filter(|variable| variable.resolved_type() == VariableType::Color)
            .collect();
        // Stable, so declaration order survives within a tier.
        tokens.sort_by_key(|variable| Tier::of_name(variable.name()));

        let mut index = Self::default();
        for variable in tokens {
            let Some(color) = resolver.resolve(variable).and_then(Literal::as_color) else {
                debug!(variable = variable.name().to_string(); "Skipping unresolved token");
                continue;
            };
            index.insert(color.key(), variable.id());
        }

        debug!(
            entries = index.len(),
            collisions = index.collisions.len();
            "Color index built"
        );
        index
    }

    fn insert(&mut self, key: ColorKey, winner: VariableId) {
        if let Some(displaced) = self.entries.insert(key, winner) {
            debug!(
                key = key.to_string(),
                displaced = displaced.to_string(),
                winner = winner.to_string();
                "Color index collision"
            );
            self.collisions.push(IndexCollision {
                key,
                displaced,
                winner,
            });
        }
    }

    /// The token bound to paints of this color, if any.
    pub fn get(&self, key: ColorKey) -> Option<VariableId> {
        self.entries.get(&key).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Every key that more than one token resolved to, in insertion order.
    pub fn collisions(&self) -> &[IndexCollision] {
        &self.collisions
    }
}
