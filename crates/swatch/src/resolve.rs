//! Alias resolution for one canonical mode.
//!
//! A token's value in a mode is either a literal or an alias to another
//! token. [`AliasResolver`] follows alias hops until it reaches a literal.
//! A chain that runs deeper than the configured bound, loops, or points at a
//! missing token (or at one without a value in the mode) resolves to `None`.
//! That is never an error: the token simply cannot be matched.

use swatch_core::{
    identifier::{ModeId, VariableId},
    value::{Literal, VariableValue},
};

use crate::store::{Variable, VariableStore};

/// Default bound on alias hops.
pub const DEFAULT_MAX_ALIAS_DEPTH: usize = 5;

/// Resolves token values in one mode, following aliases.
///
/// # Examples
///
/// ```
/// use swatch::{resolve::AliasResolver, store::{MemoryStore, VariableStore}};
/// use swatch_core::{color::Color, identifier::Name, value::{Literal, VariableType, VariableValue}};
///
/// let mut store = MemoryStore::new();
/// let colors = store.create_collection(Name::new("Colors")).unwrap();
/// let mode = store.collection(colors).unwrap().default_mode_id();
///
/// let base = store.create_variable(Name::new("base/accent"), colors, VariableType::Color).unwrap();
/// store.set_value_for_mode(base, mode, Color::WHITE.into()).unwrap();
/// let bar = store.create_variable(Name::new("component/bar"), colors, VariableType::Color).unwrap();
/// store.set_value_for_mode(bar, mode, VariableValue::Alias(base)).unwrap();
///
/// let resolver = AliasResolver::new(&store, mode);
/// assert_eq!(resolver.resolve_id(bar), Some(&Literal::Color(Color::WHITE)));
/// ```
#[derive(Debug)]
pub struct AliasResolver<'a, S> {
    store: &'a S,
    mode: ModeId,
    max_depth: usize,
}

impl<'a, S: VariableStore> AliasResolver<'a, S> {
    pub fn new(store: &'a S, mode: ModeId) -> Self {
        Self {
            store,
            mode,
            max_depth: DEFAULT_MAX_ALIAS_DEPTH,
        }
    }

    /// Sets the maximum number of alias hops followed.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn store(&self) -> &'a S {
        self.store
    }

    pub fn mode(&self) -> ModeId {
        self.mode
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// The literal `variable` resolves to in the resolver's mode.
    pub fn resolve(&self, variable: &'a Variable) -> Option<&'a Literal> {
        self.resolve_at(variable, 0)
    }

    /// Same as [`AliasResolver::resolve`], starting from an id.
    pub fn resolve_id(&self, id: VariableId) -> Option<&'a Literal> {
        self.resolve(self.store.variable(id)?)
    }

    /// Resolves `variable` reached after `depth` alias hops.
    ///
    /// A chain of `k` aliases ending in a literal resolves when
    /// `k <= max_depth`.
    pub fn resolve_at(&self, variable: &'a Variable, depth: usize) -> Option<&'a Literal> {
        if depth > self.max_depth {
            return None;
        }
        match variable.value_for_mode(self.mode)? {
            VariableValue::Literal(literal) => Some(literal),
            VariableValue::Alias(target) => {
                let target = self.store.variable(*target)?;
                self.resolve_at(target, depth + 1)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use swatch_core::{
        color::Color,
        identifier::{CollectionId, Name},
        value::VariableType,
    };

    use super::*;
    use crate::store::MemoryStore;

    struct Fixture {
        store: MemoryStore,
        collection: CollectionId,
        mode: ModeId,
    }

    impl Fixture {
        fn new() -> Self {
            let mut store = MemoryStore::new();
            let collection = store.create_collection(Name::new("Colors")).unwrap();
            let mode = store.collection(collection).unwrap().default_mode_id();
            Self {
                store,
                collection,
                mode,
            }
        }

        fn token(&mut self, name: &str, value: VariableValue) -> VariableId {
            let id = self
                .store
                .create_variable(Name::new(name), self.collection, VariableType::Color)
                .unwrap();
            self.store.set_value_for_mode(id, self.mode, value).unwrap();
            id
        }

        /// A literal followed by `hops` aliases, each pointing at the previous
        /// token. Returns the id at the head of the chain.
        fn chain(&mut self, hops: usize, color: Color) -> VariableId {
            let mut id = self.token("base/literal", color.into());
            for hop in 0..hops {
                id = self.token(&format!("semantic/hop-{hop}"), VariableValue::Alias(id));
            }
            id
        }

        fn resolver(&self) -> AliasResolver<'_, MemoryStore> {
            AliasResolver::new(&self.store, self.mode)
        }
    }

    #[test]
    fn test_literal_resolves_to_itself() {
        let mut fixture = Fixture::new();
        let id = fixture.chain(0, Color::BLACK);
        assert_eq!(
            fixture.resolver().resolve_id(id),
            Some(&Literal::Color(Color::BLACK))
        );
    }

    #[test]
    fn test_chains_up_to_bound_resolve() {
        for hops in 1..=DEFAULT_MAX_ALIAS_DEPTH {
            let mut fixture = Fixture::new();
            let head = fixture.chain(hops, Color::WHITE);
            assert_eq!(
                fixture.resolver().resolve_id(head),
                Some(&Literal::Color(Color::WHITE)),
                "chain of {hops} aliases"
            );
        }
    }

    #[test]
    fn test_chain_past_bound_is_unresolved() {
        let mut fixture = Fixture::new();
        let head = fixture.chain(DEFAULT_MAX_ALIAS_DEPTH + 1, Color::WHITE);
        assert_eq!(fixture.resolver().resolve_id(head), None);
    }

    #[test]
    fn test_custom_depth() {
        let mut fixture = Fixture::new();
        let head = fixture.chain(2, Color::WHITE);
        assert_eq!(fixture.resolver().with_max_depth(1).resolve_id(head), None);
        assert!(fixture.resolver().with_max_depth(2).resolve_id(head).is_some());
    }

    #[test]
    fn test_cycle_is_unresolved() {
        let mut fixture = Fixture::new();
        let a = fixture.token("semantic/a", Color::BLACK.into());
        let b = fixture.token("semantic/b", VariableValue::Alias(a));
        fixture
            .store
            .set_value_for_mode(a, fixture.mode, VariableValue::Alias(b))
            .unwrap();

        assert_eq!(fixture.resolver().resolve_id(a), None);
        assert_eq!(fixture.resolver().resolve_id(b), None);
    }

    #[test]
    fn test_missing_mode_value_is_unresolved() {
        let mut fixture = Fixture::new();
        let empty = fixture
            .store
            .create_variable(Name::new("base/empty"), fixture.collection, VariableType::Color)
            .unwrap();
        let alias = fixture.token("semantic/to-empty", VariableValue::Alias(empty));

        assert_eq!(fixture.resolver().resolve_id(empty), None);
        assert_eq!(fixture.resolver().resolve_id(alias), None);
    }

    #[test]
    fn test_unknown_id_is_unresolved() {
        let fixture = Fixture::new();
        assert_eq!(fixture.resolver().resolve_id(VariableId::new(999)), None);
    }

    #[test]
    fn test_other_mode_is_independent() {
        let mut fixture = Fixture::new();
        let dark = fixture
            .store
            .add_mode(fixture.collection, Name::new("Dark"))
            .unwrap();
        let id = fixture.chain(0, Color::BLACK);
        fixture
            .store
            .set_value_for_mode(id, dark, Color::WHITE.into())
            .unwrap();

        let resolver = AliasResolver::new(&fixture.store, dark);
        assert_eq!(resolver.resolve_id(id), Some(&Literal::Color(Color::WHITE)));
    }
}
