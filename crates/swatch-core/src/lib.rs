//! Swatch Core Types and Definitions
//!
//! This crate provides the foundational value types shared by the Swatch
//! token engine and its command-line front end. It includes:
//!
//! - **Identifiers**: Interned token, collection and mode names ([`identifier::Name`])
//!   and typed host handles ([`identifier::VariableId`] and friends)
//! - **Colors**: RGBA colors with CSS parsing and 8-bit match keys ([`color::Color`])
//! - **Values**: Literal and alias token values ([`value::VariableValue`])
//! - **Paints**: Fill and stroke layers on visual nodes ([`paint::Paint`])

pub mod color;
pub mod identifier;
pub mod paint;
pub mod value;
