//! Token value types.
//!
//! A token stores one [`VariableValue`] per mode of its collection. A value is
//! either a concrete [`Literal`] or an alias pointing at another token, whose
//! own value is substituted when the alias is read.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{color::Color, identifier::VariableId};

/// The data type of a token. Every value stored on a token, and every
/// token an alias points at, must have this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VariableType {
    Color,
    Float,
    String,
}

impl fmt::Display for VariableType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Color => "COLOR",
            Self::Float => "FLOAT",
            Self::String => "STRING",
        };
        f.write_str(name)
    }
}

/// A concrete token value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Literal {
    Color(Color),
    Float(f64),
    String(String),
}

impl Literal {
    /// The [`VariableType`] this literal can be stored under.
    pub fn variable_type(&self) -> VariableType {
        match self {
            Self::Color(_) => VariableType::Color,
            Self::Float(_) => VariableType::Float,
            Self::String(_) => VariableType::String,
        }
    }

    /// Returns the color if this is a color literal.
    pub fn as_color(&self) -> Option<Color> {
        match self {
            Self::Color(color) => Some(*color),
            _ => None,
        }
    }
}

impl From<Color> for Literal {
    fn from(color: Color) -> Self {
        Self::Color(color)
    }
}

impl From<f64> for Literal {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for Literal {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

/// A per-mode token value: a literal, or an alias to another token.
///
/// Serialized adjacently tagged:
///
/// ```
/// use swatch_core::{identifier::VariableId, value::VariableValue};
///
/// let alias = VariableValue::Alias(VariableId::new(3));
/// let json = serde_json::to_string(&alias).unwrap();
/// assert_eq!(json, r#"{"type":"alias","value":3}"#);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum VariableValue {
    Literal(Literal),
    Alias(VariableId),
}

impl VariableValue {
    /// Returns the alias target, if this value is an alias.
    pub fn alias_target(&self) -> Option<VariableId> {
        match self {
            Self::Alias(id) => Some(*id),
            Self::Literal(_) => None,
        }
    }
}

impl From<Literal> for VariableValue {
    fn from(literal: Literal) -> Self {
        Self::Literal(literal)
    }
}

impl From<Color> for VariableValue {
    fn from(color: Color) -> Self {
        Self::Literal(Literal::Color(color))
    }
}

impl From<VariableId> for VariableValue {
    fn from(target: VariableId) -> Self {
        Self::Alias(target)
    }
}
