//! Declarative token catalogue.
//!
//! The token graph is described as data: a [`Catalog`] holds
//! [`CollectionDef`]s, each listing its mode names and a table of
//! [`TokenDef`] rows. A row gives one [`ValueDef`] per mode, in mode order,
//! and each of those is either a literal or a [`ValueDef::Ref`] naming an
//! earlier token of the same collection.
//!
//! # Tiers
//!
//! Token names carry their tier in the first path segment
//! (see [`Tier::of`]):
//!
//! - **Base** tokens hold literals only.
//! - **Semantic** tokens alias base tokens, or override single modes with a
//!   literal where the base palette has no match.
//! - **Component** tokens alias base or semantic tokens, again per mode.
//!
//! [`Catalog::validate`] checks these rules without touching a store, and
//! [`Catalog::apply`] interprets the rows through
//! [`get_or_create_collection`] and [`upsert_variable`].

/// Declares a [`TokenDef`] row:
/// `token!(Color "base/color-primary" => [hex("#313131"), ...], "description")`.
///
/// Expands to a struct literal so the value slice lives in static memory.
macro_rules! token {
    ($ty:ident $name:literal => [$($value:expr),+ $(,)?] $(, $description:literal)? $(,)?) => {
        $crate::catalog::TokenDef {
            name: $name,
            resolved_type: ::swatch_core::value::VariableType::$ty,
            values: &[$($value),+],
            description: token!(@description $($description)?),
        }
    };
    (@description) => {
        None
    };
    (@description $description:literal) => {
        Some($description)
    };
}

mod standard;

pub use standard::{
    COLORS, COLORS_COLLECTION, SPACING, SPACING_COLLECTION, TYPOGRAPHY, TYPOGRAPHY_COLLECTION,
};

use std::collections::HashMap;

use log::{debug, info};
use thiserror::Error;

use swatch_core::{
    color::{Color, ParseColorError},
    identifier::{Name, VariableId},
    value::{Literal, VariableType, VariableValue},
};

use crate::{
    collection::get_or_create_collection,
    error::SwatchError,
    report::DefinitionReport,
    store::VariableStore,
    upsert::{VariableUpdate, upsert_variable},
};

/// Errors found in a catalogue before (or while) it is applied.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CatalogError {
    #[error("collection `{collection}` declares no modes")]
    NoModes { collection: String },

    #[error("collection `{0}` is declared twice")]
    DuplicateCollection(String),

    #[error("collection `{collection}` declares mode `{mode}` twice")]
    DuplicateMode { collection: String, mode: String },

    #[error("collection `{collection}` declares token `{token}` twice")]
    DuplicateToken { collection: String, token: String },

    #[error("token `{token}` has {found} values, its collection has {expected} modes")]
    ValueCount {
        token: String,
        expected: usize,
        found: usize,
    },

    #[error("token `{token}` is {expected} but its `{mode}` value is {found}")]
    TypeMismatch {
        token: String,
        mode: String,
        expected: VariableType,
        found: VariableType,
    },

    #[error("base token `{token}` aliases `{target}`; base tokens must be literal")]
    BaseAlias { token: String, target: String },

    #[error("token `{token}` aliases `{target}`, which is not declared before it")]
    UnresolvedAlias { token: String, target: String },

    #[error("token `{token}` aliases `{target}` of a different type")]
    AliasTypeMismatch { token: String, target: String },

    #[error("token `{token}`: {source}")]
    InvalidColor {
        token: String,
        source: ParseColorError,
    },
}

/// Position of a token in the base → semantic → component hierarchy.
///
/// Ordering follows the hierarchy, which is also the precedence used when
/// two tokens resolve to the same color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tier {
    Base,
    Semantic,
    Component,
}

impl Tier {
    /// Tier of a token name: `semantic/...` and `component/...` name their
    /// tier, everything else (`base/...`, `global/...`, spacing and
    /// typography names) is base.
    ///
    /// ```
    /// use swatch::catalog::Tier;
    ///
    /// assert_eq!(Tier::of("semantic/color-link"), Tier::Semantic);
    /// assert_eq!(Tier::of("global/black"), Tier::Base);
    /// ```
    pub fn of(name: &str) -> Self {
        match name.split('/').next() {
            Some("semantic") => Self::Semantic,
            Some("component") => Self::Component,
            _ => Self::Base,
        }
    }

    /// Same as [`Tier::of`] for an interned name.
    pub fn of_name(name: Name) -> Self {
        Self::of(&name.root())
    }
}

/// A literal value in a catalogue row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LiteralDef {
    /// CSS color string, e.g. `#313131` or `#ccc`.
    Hex(&'static str),
    /// 8-bit channels plus alpha, e.g. `rgba(255, 255, 255, 0.75)`.
    Rgba(u8, u8, u8, f32),
    Float(f64),
    Text(&'static str),
}

impl LiteralDef {
    /// The token type this literal can be stored under.
    pub fn variable_type(&self) -> VariableType {
        match self {
            Self::Hex(_) | Self::Rgba(..) => VariableType::Color,
            Self::Float(_) => VariableType::Float,
            Self::Text(_) => VariableType::String,
        }
    }

    /// Builds the literal.
    ///
    /// # Errors
    ///
    /// Fails if a [`LiteralDef::Hex`] string is not a valid color.
    pub fn to_literal(&self) -> Result<Literal, ParseColorError> {
        Ok(match *self {
            Self::Hex(value) => Literal::Color(Color::new(value)?),
            Self::Rgba(r, g, b, a) => Literal::Color(Color::from_rgba8(r, g, b, a)),
            Self::Float(value) => Literal::Float(value),
            Self::Text(value) => Literal::String(value.to_string()),
        })
    }
}

/// One per-mode value in a catalogue row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ValueDef {
    Literal(LiteralDef),
    /// Alias to an earlier token of the same collection, by name.
    Ref(&'static str),
}

/// Color literal from a CSS color string.
pub const fn hex(value: &'static str) -> ValueDef {
    ValueDef::Literal(LiteralDef::Hex(value))
}

/// Color literal from 8-bit channels and an alpha.
pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> ValueDef {
    ValueDef::Literal(LiteralDef::Rgba(r, g, b, a))
}

/// Number literal.
pub const fn float(value: f64) -> ValueDef {
    ValueDef::Literal(LiteralDef::Float(value))
}

/// String literal.
pub const fn text(value: &'static str) -> ValueDef {
    ValueDef::Literal(LiteralDef::Text(value))
}

/// Alias to the token named `target`.
pub const fn alias(target: &'static str) -> ValueDef {
    ValueDef::Ref(target)
}

/// One catalogue row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TokenDef {
    pub name: &'static str,
    pub resolved_type: VariableType,
    /// One value per mode of the owning collection, in mode order.
    pub values: &'static [ValueDef],
    pub description: Option<&'static str>,
}

impl TokenDef {
    pub fn tier(&self) -> Tier {
        Tier::of(self.name)
    }
}

/// A collection: its name, its modes in order, and its token rows in
/// declaration order (base rows first, then semantic, then component).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollectionDef {
    pub name: &'static str,
    pub modes: &'static [&'static str],
    pub tokens: &'static [TokenDef],
}

impl CollectionDef {
    pub fn token(&self, name: &str) -> Option<&TokenDef> {
        self.tokens.iter().find(|token| token.name == name)
    }

    fn validate(&self) -> Result<(), CatalogError> {
        if self.modes.is_empty() {
            return Err(CatalogError::NoModes {
                collection: self.name.to_string(),
            });
        }
        for (i, mode) in self.modes.iter().enumerate() {
            if self.modes[..i].contains(mode) {
                return Err(CatalogError::DuplicateMode {
                    collection: self.name.to_string(),
                    mode: mode.to_string(),
                });
            }
        }

        let mut declared: HashMap<&str, VariableType> = HashMap::new();
        for token in self.tokens {
            if declared.contains_key(token.name) {
                return Err(CatalogError::DuplicateToken {
                    collection: self.name.to_string(),
                    token: token.name.to_string(),
                });
            }
            if token.values.len() != self.modes.len() {
                return Err(CatalogError::ValueCount {
                    token: token.name.to_string(),
                    expected: self.modes.len(),
                    found: token.values.len(),
                });
            }

            for (mode, value) in self.modes.iter().zip(token.values) {
                match *value {
                    ValueDef::Ref(target) => {
                        if token.tier() == Tier::Base {
                            return Err(CatalogError::BaseAlias {
                                token: token.name.to_string(),
                                target: target.to_string(),
                            });
                        }
                        match declared.get(target) {
                            None => {
                                return Err(CatalogError::UnresolvedAlias {
                                    token: token.name.to_string(),
                                    target: target.to_string(),
                                });
                            }
                            Some(&target_type) if target_type != token.resolved_type => {
                                return Err(CatalogError::AliasTypeMismatch {
                                    token: token.name.to_string(),
                                    target: target.to_string(),
                                });
                            }
                            Some(_) => {}
                        }
                    }
                    ValueDef::Literal(literal) => {
                        if literal.variable_type() != token.resolved_type {
                            return Err(CatalogError::TypeMismatch {
                                token: token.name.to_string(),
                                mode: mode.to_string(),
                                expected: token.resolved_type,
                                found: literal.variable_type(),
                            });
                        }
                        literal
                            .to_literal()
                            .map_err(|source| CatalogError::InvalidColor {
                                token: token.name.to_string(),
                                source,
                            })?;
                    }
                }
            }

            declared.insert(token.name, token.resolved_type);
        }
        Ok(())
    }
}

/// The full set of collections to materialize.
///
/// # Examples
///
/// ```
/// use swatch::{catalog::Catalog, store::{MemoryStore, VariableStore}};
///
/// let catalog = Catalog::standard();
/// catalog.validate().unwrap();
///
/// let mut store = MemoryStore::new();
/// let first = catalog.apply(&mut store).unwrap();
/// assert_eq!(first.collections_created, 3);
///
/// // Re-running changes nothing.
/// let second = catalog.apply(&mut store).unwrap();
/// assert!(second.is_unchanged());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    collections: Vec<CollectionDef>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::standard()
    }
}

impl Catalog {
    pub fn new(collections: Vec<CollectionDef>) -> Self {
        Self { collections }
    }

    /// The stoll.studio catalogue: colors, spacing and typography.
    pub fn standard() -> Self {
        Self::new(vec![COLORS, SPACING, TYPOGRAPHY])
    }

    pub fn collections(&self) -> &[CollectionDef] {
        &self.collections
    }

    pub fn collection(&self, name: &str) -> Option<&CollectionDef> {
        self.collections.iter().find(|def| def.name == name)
    }

    /// Total number of token rows.
    pub fn token_count(&self) -> usize {
        self.collections.iter().map(|def| def.tokens.len()).sum()
    }

    /// Checks every structural rule of the catalogue.
    ///
    /// # Errors
    ///
    /// Returns the first [`CatalogError`] found, in declaration order.
    pub fn validate(&self) -> Result<(), CatalogError> {
        for (i, def) in self.collections.iter().enumerate() {
            if self.collections[..i].iter().any(|other| other.name == def.name) {
                return Err(CatalogError::DuplicateCollection(def.name.to_string()));
            }
            def.validate()?;
        }
        Ok(())
    }

    /// Materializes the catalogue in `store`.
    ///
    /// Validates first, so an invalid catalogue never writes anything. Each
    /// collection is then found or created and every row upserted in
    /// declaration order; references resolve to the ids of rows already
    /// upserted. Safe to re-run: a second run on the resulting store reports
    /// no changes.
    ///
    /// # Errors
    ///
    /// Returns [`SwatchError::Catalog`] for an invalid catalogue and
    /// propagates store failures.
    pub fn apply<S: VariableStore>(&self, store: &mut S) -> Result<DefinitionReport, SwatchError> {
        self.validate()?;

        let mut report = DefinitionReport::default();
        for def in &self.collections {
            let mode_names: Vec<Name> = def.modes.iter().map(|mode| Name::new(mode)).collect();
            let modes = get_or_create_collection(store, Name::new(def.name), &mode_names, &mut report)?;

            let mut declared: HashMap<&str, VariableId> = HashMap::with_capacity(def.tokens.len());
            for token in def.tokens {
                let mut update = VariableUpdate::new(Name::new(token.name), token.resolved_type);
                for (mode, value) in modes.mode_ids().zip(token.values) {
                    update = update.with_value(mode, resolve_value(token, value, &declared)?);
                }
                if let Some(description) = token.description {
                    update = update.with_description(description);
                }

                let id = upsert_variable(store, modes.collection(), &update, &mut report)?;
                declared.insert(token.name, id);
            }

            debug!(collection = def.name, tokens = def.tokens.len(); "Collection defined");
        }

        info!(
            collections_created = report.collections_created,
            variables_created = report.variables_created,
            values_changed = report.values_changed;
            "Token definition complete"
        );
        Ok(report)
    }
}

fn resolve_value(
    token: &TokenDef,
    value: &ValueDef,
    declared: &HashMap<&str, VariableId>,
) -> Result<VariableValue, CatalogError> {
    match *value {
        ValueDef::Ref(target) => declared
            .get(target)
            .map(|id| VariableValue::Alias(*id))
            .ok_or_else(|| CatalogError::UnresolvedAlias {
                token: token.name.to_string(),
                target: target.to_string(),
            }),
        ValueDef::Literal(literal) => literal
            .to_literal()
            .map(VariableValue::Literal)
            .map_err(|source| CatalogError::InvalidColor {
                token: token.name.to_string(),
                source,
            }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::store::MemoryStore;

    fn single(tokens: &'static [TokenDef]) -> Catalog {
        Catalog::new(vec![CollectionDef {
            name: "Test",
            modes: &["One", "Two"],
            tokens,
        }])
    }

    #[test]
    fn test_tier_of() {
        assert_eq!(Tier::of("base/color-primary"), Tier::Base);
        assert_eq!(Tier::of("semantic/color-divider"), Tier::Semantic);
        assert_eq!(Tier::of("component/color-skip-link-bg"), Tier::Component);
        assert_eq!(Tier::of("font/size/h1"), Tier::Base);
        assert_eq!(Tier::of_name(Name::new("component/x")), Tier::Component);
        assert!(Tier::Base < Tier::Semantic && Tier::Semantic < Tier::Component);
    }

    #[test]
    fn test_standard_catalog_is_valid() {
        Catalog::standard().validate().unwrap();
    }

    #[test]
    fn test_standard_catalog_token_counts() {
        let catalog = Catalog::standard();
        assert_eq!(catalog.collection(COLORS_COLLECTION).unwrap().tokens.len(), 31);
        assert_eq!(catalog.collection(SPACING_COLLECTION).unwrap().tokens.len(), 7);
        assert_eq!(catalog.collection(TYPOGRAPHY_COLLECTION).unwrap().tokens.len(), 15);
        assert_eq!(catalog.token_count(), 53);
    }

    #[test]
    fn test_base_tokens_are_literal() {
        for def in Catalog::standard().collections() {
            for token in def.tokens.iter().filter(|t| t.tier() == Tier::Base) {
                assert!(
                    token.values.iter().all(|v| !matches!(v, ValueDef::Ref(_))),
                    "{} aliases another token",
                    token.name
                );
            }
        }
    }

    #[test]
    fn test_sticky_bar_cross_references() {
        let bar = COLORS.token("component/color-sticky-bar-bg").unwrap();
        assert_eq!(
            bar.values,
            &[
                alias("base/color-accent-1"),
                alias("base/color-accent-2"),
                alias("base/color-accent-1"),
                alias("base/color-primary"),
            ]
        );
    }

    #[test]
    fn test_divider_mixes_literal_and_alias() {
        let divider = COLORS.token("semantic/color-divider").unwrap();
        assert_eq!(divider.values[0], hex("#cccccc"));
        assert!(divider.values[1..]
            .iter()
            .all(|v| *v == alias("base/color-border-secondary")));
    }

    #[test]
    fn test_terminal_weights_normalized() {
        let typography = Catalog::standard();
        let typography = typography.collection(TYPOGRAPHY_COLLECTION).unwrap();
        for token in typography.tokens.iter().filter(|t| t.name.starts_with("font/weight/")) {
            assert_eq!(token.values[1], float(400.0), "{}", token.name);
        }
    }

    #[test]
    fn test_rejects_base_alias() {
        static TOKENS: [TokenDef; 2] = [
            token!(Color "base/a" => [hex("#fff"), hex("#000")]),
            token!(Color "base/b" => [alias("base/a"), hex("#000")]),
        ];
        let err = single(&TOKENS).validate().unwrap_err();
        assert!(matches!(err, CatalogError::BaseAlias { .. }));
    }

    #[test]
    fn test_rejects_forward_reference() {
        static TOKENS: [TokenDef; 2] = [
            token!(Color "semantic/a" => [alias("base/b"), alias("base/b")]),
            token!(Color "base/b" => [hex("#fff"), hex("#000")]),
        ];
        let err = single(&TOKENS).validate().unwrap_err();
        assert_eq!(
            err,
            CatalogError::UnresolvedAlias {
                token: "semantic/a".to_string(),
                target: "base/b".to_string(),
            }
        );
    }

    #[test]
    fn test_rejects_wrong_value_count() {
        static TOKENS: [TokenDef; 1] = [token!(Float "xs" => [float(5.0)])];
        let err = single(&TOKENS).validate().unwrap_err();
        assert!(matches!(
            err,
            CatalogError::ValueCount {
                expected: 2,
                found: 1,
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_literal_type_mismatch() {
        static TOKENS: [TokenDef; 1] = [token!(Float "xs" => [float(5.0), text("five")])];
        let err = single(&TOKENS).validate().unwrap_err();
        assert!(matches!(
            err,
            CatalogError::TypeMismatch {
                found: VariableType::String,
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_alias_type_mismatch() {
        static TOKENS: [TokenDef; 2] = [
            token!(Float "base/size" => [float(1.0), float(2.0)]),
            token!(Color "semantic/tint" => [alias("base/size"), hex("#fff")]),
        ];
        let err = single(&TOKENS).validate().unwrap_err();
        assert!(matches!(err, CatalogError::AliasTypeMismatch { .. }));
    }

    #[test]
    fn test_rejects_invalid_color() {
        static TOKENS: [TokenDef; 1] = [token!(Color "base/bad" => [hex("#12"), hex("#fff")])];
        let err = single(&TOKENS).validate().unwrap_err();
        assert!(matches!(err, CatalogError::InvalidColor { .. }));
    }

    #[test]
    fn test_rejects_duplicate_token_and_collection() {
        static TOKENS: [TokenDef; 2] = [
            token!(Float "xs" => [float(5.0), float(5.0)]),
            token!(Float "xs" => [float(6.0), float(6.0)]),
        ];
        assert!(matches!(
            single(&TOKENS).validate().unwrap_err(),
            CatalogError::DuplicateToken { .. }
        ));

        let twice = Catalog::new(vec![SPACING, SPACING]);
        assert_eq!(
            twice.validate().unwrap_err(),
            CatalogError::DuplicateCollection(SPACING_COLLECTION.to_string())
        );
    }

    #[test]
    fn test_invalid_catalog_writes_nothing() {
        static TOKENS: [TokenDef; 1] = [token!(Float "xs" => [float(5.0)])];
        let mut store = MemoryStore::new();
        let err = single(&TOKENS).apply(&mut store).unwrap_err();
        assert!(matches!(err, SwatchError::Catalog(_)));
        assert_eq!(store.collections().count(), 0);
    }

    #[test]
    fn test_apply_resolves_references_to_ids() {
        static TOKENS: [TokenDef; 2] = [
            token!(Color "base/a" => [hex("#fff"), hex("#000")]),
            token!(Color "semantic/b" => [alias("base/a"), hex("#111")], "B"),
        ];
        let mut store = MemoryStore::new();
        single(&TOKENS).apply(&mut store).unwrap();

        let collection = store.collection_by_name(Name::new("Test")).unwrap();
        let one = collection.mode_by_name(Name::new("One")).unwrap().mode_id();
        let ids = collection.variable_ids().to_vec();
        let b = store.variable(ids[1]).unwrap();

        assert_eq!(b.value_for_mode(one), Some(&VariableValue::Alias(ids[0])));
        assert_eq!(b.description(), "B");
    }
}
