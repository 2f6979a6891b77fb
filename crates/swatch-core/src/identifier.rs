//! Identifiers for tokens, collections and modes
//!
//! This module provides two families of identifiers:
//!
//! - [`Name`]: an interned display name. Token names are `/`-separated paths
//!   (`base/color-primary`, `font/size/h1`) and [`Name`] offers helpers to
//!   split them.
//! - [`CollectionId`], [`ModeId`] and [`VariableId`]: opaque handles assigned
//!   by the variable store. They are stable across re-runs and are what an
//!   alias or a paint binding points at.

use std::{
    fmt,
    sync::{Mutex, OnceLock},
};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use string_interner::{DefaultStringInterner, DefaultSymbol};

/// Separator between the segments of a token path.
pub const PATH_SEPARATOR: char = '/';

/// Global string interner for names.
///
/// # Thread Safety
///
/// This uses `Mutex` for thread-safe access to the string interner.
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

fn interner() -> std::sync::MutexGuard<'static, DefaultStringInterner> {
    INTERNER
        .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
        .lock()
        .expect("Failed to acquire interner lock")
}

/// Interned token, collection or mode name.
///
/// Equality and hashing are symbol comparisons, which keeps the by-name
/// lookups done on every upsert cheap.
///
/// # Examples
///
/// ```
/// use swatch_core::identifier::Name;
///
/// let name = Name::new("base/color-primary");
/// assert_eq!(name, "base/color-primary");
/// assert_eq!(name.root(), "base");
/// assert_eq!(name.leaf(), "color-primary");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Name(DefaultSymbol);

impl Name {
    /// Creates a `Name` from &str.
    pub fn new(name: &str) -> Self {
        Self(interner().get_or_intern(name))
    }

    /// Runs `f` with the string form of this name.
    fn with_str<R>(&self, f: impl FnOnce(&str) -> R) -> R {
        let interner = interner();
        let value = interner
            .resolve(self.0)
            .expect("Symbol should exist in interner");
        f(value)
    }

    /// First path segment, or the whole name when it has no separator.
    pub fn root(&self) -> String {
        self.with_str(|value| {
            value
                .split(PATH_SEPARATOR)
                .next()
                .unwrap_or(value)
                .to_string()
        })
    }

    /// Last path segment, or the whole name when it has no separator.
    pub fn leaf(&self) -> String {
        self.with_str(|value| {
            value
                .rsplit(PATH_SEPARATOR)
                .next()
                .unwrap_or(value)
                .to_string()
        })
    }

    /// Number of path segments.
    pub fn depth(&self) -> usize {
        self.with_str(|value| value.split(PATH_SEPARATOR).count())
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.with_str(|value| f.write_str(value))
    }
}

impl From<&str> for Name {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl PartialEq<str> for Name {
    /// Allows direct comparison with string slices: `name == "string"`
    fn eq(&self, other: &str) -> bool {
        self.with_str(|value| value == other)
    }
}

impl PartialEq<&str> for Name {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl Serialize for Name {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.with_str(|value| serializer.serialize_str(value))
    }
}

impl<'de> Deserialize<'de> for Name {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Ok(Self::new(&value))
    }
}

macro_rules! host_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(u32);

        impl $name {
            /// Wraps a raw store-assigned number.
            pub const fn new(raw: u32) -> Self {
                Self(raw)
            }

            /// Returns the raw store-assigned number.
            pub const fn raw(self) -> u32 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, ":{}"), self.0)
            }
        }
    };
}

host_id!(
    /// Handle of a variable collection.
    CollectionId,
    "VariableCollectionId"
);

host_id!(
    /// Handle of a mode within a collection.
    ///
    /// A mode keeps its handle when it is renamed, which is what lets a
    /// re-run find the modes it created earlier.
    ModeId,
    "ModeId"
);

host_id!(
    /// Handle of a variable (token). Alias values and paint bindings refer
    /// to variables through this handle.
    VariableId,
    "VariableID"
);
