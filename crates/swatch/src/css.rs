//! Stylesheet mirror export.
//!
//! Renders a collection as CSS custom properties, one rule per mode: the
//! default mode under `:root`, every other mode under an attribute selector
//! such as `[data-theme="dark"]`. Aliases stay aliases (`var(--target)`), so
//! the rendered sheet has the same shape as the token graph and can be
//! diffed against the site's hand-written theme stylesheet.
//!
//! ```css
//! :root {
//!   --color-accent-1: #ffff00;
//!   --color-sticky-bar-bg: var(--color-accent-1);
//! }
//!
//! [data-theme="dark"] {
//!   --color-accent-1: #ffff00;
//!   --color-sticky-bar-bg: var(--color-accent-2);
//! }
//! ```

use std::fmt::Write as _;

use log::{debug, warn};

use swatch_core::{
    identifier::{ModeId, Name},
    value::{Literal, VariableValue},
};

use crate::{
    config::CssConfig,
    error::SwatchError,
    store::{VariableCollection, VariableStore},
};

/// Custom property name for a token, without the leading `--`.
///
/// The tier prefix is dropped (`base/color-primary` → `color-primary`);
/// `global/*` tokens get a `color-` prefix (`global/black` → `color-black`).
pub fn property_name(name: Name) -> String {
    let leaf = name.leaf();
    if name.root() == "global" && name.depth() > 1 {
        format!("color-{leaf}")
    } else {
        leaf
    }
}

/// Renders `collection` as a stylesheet.
///
/// # Errors
///
/// Returns [`SwatchError::MissingMode`] if the configured default mode does
/// not exist in the collection.
pub fn render_stylesheet<S: VariableStore>(
    store: &S,
    collection: &VariableCollection,
    config: &CssConfig,
) -> Result<String, SwatchError> {
    let default_mode = match config.default_mode() {
        Some(mode) => collection
            .mode_by_name(Name::new(mode))
            .ok_or_else(|| SwatchError::MissingMode {
                collection: collection.name().to_string(),
                mode: mode.to_string(),
            })?
            .mode_id(),
        None => collection.default_mode_id(),
    };

    let mut rules = vec![(":root".to_string(), default_mode)];
    rules.extend(
        collection
            .modes()
            .iter()
            .filter(|mode| mode.mode_id() != default_mode)
            .map(|mode| {
                let selector = format!(
                    "[{}=\"{}\"]",
                    config.selector_attribute(),
                    mode.name().to_string().to_lowercase()
                );
                (selector, mode.mode_id())
            }),
    );

    let mut sheet = String::new();
    for (i, (selector, mode)) in rules.iter().enumerate() {
        if i > 0 {
            sheet.push('\n');
        }
        render_rule(&mut sheet, store, collection, selector, *mode);
    }

    debug!(
        collection = collection.name().to_string(),
        rules = rules.len();
        "Stylesheet rendered"
    );
    Ok(sheet)
}

fn render_rule<S: VariableStore>(
    sheet: &mut String,
    store: &S,
    collection: &VariableCollection,
    selector: &str,
    mode: ModeId,
) {
    // Writing into a String cannot fail.
    let _ = writeln!(sheet, "{selector} {{");
    for variable in store.variables_in(collection.id()) {
        let Some(value) = variable.value_for_mode(mode) else {
            continue;
        };
        let rendered = match value {
            VariableValue::Literal(literal) => render_literal(literal),
            VariableValue::Alias(target) => match store.variable(*target) {
                Some(target) => format!("var(--{})", property_name(target.name())),
                None => {
                    warn!(variable = variable.name().to_string(); "Alias target missing");
                    continue;
                }
            },
        };
        let _ = writeln!(sheet, "  --{}: {rendered};", property_name(variable.name()));
    }
    sheet.push_str("}\n");
}

fn render_literal(literal: &Literal) -> String {
    match literal {
        Literal::Color(color) => color.to_string(),
        Literal::Float(value) => value.to_string(),
        Literal::String(value) => format!("\"{value}\""),
    }
}
