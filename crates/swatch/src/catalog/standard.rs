//! The stoll.studio token catalogue.
//!
//! Color values mirror the site's theme stylesheet: wherever a theme
//! variable is defined as `var(--base-token)` the row aliases that base
//! token, and wherever it is a hardcoded value (or a pre-computed
//! `color-mix()`) the row holds a literal for that mode only.

use super::{CollectionDef, alias, float, hex, rgba, text};

pub const COLORS_COLLECTION: &str = "stoll.studio Colors";
pub const SPACING_COLLECTION: &str = "stoll.studio Spacing";
pub const TYPOGRAPHY_COLLECTION: &str = "stoll.studio Typography";

const BLACK: &str = "#000000";
const WHITE: &str = "#ffffff";

/// Colors, modes `Light`, `Dark`, `Vibrant`, `Terminal`.
pub const COLORS: CollectionDef = CollectionDef {
    name: COLORS_COLLECTION,
    modes: &["Light", "Dark", "Vibrant", "Terminal"],
    tokens: &[
        // Global
        token!(Color "global/black" => [hex(BLACK), hex(BLACK), hex(BLACK), hex(BLACK)],
            "Pure black — never overridden. Form message text, most sticky bar text."),
        token!(Color "global/white" => [hex(WHITE), hex(WHITE), hex(WHITE), hex(WHITE)],
            "Pure white — never overridden."),
        // Base: text
        token!(Color "base/color-primary" =>
            [hex("#313131"), hex("#ffffff"), hex("#ffffff"), hex("#00FF41")],
            "Main headings, strong text"),
        token!(Color "base/color-secondary" =>
            [hex("#515151"), hex("#e0e0e0"), rgba(255, 255, 255, 0.75), hex("#00D936")],
            "Body text, paragraphs"),
        token!(Color "base/color-tertiary" =>
            [hex("#7a7a7a"), hex("#b0b0b0"), rgba(255, 255, 255, 0.6), hex("#00B32D")],
            "Muted text, bullets"),
        token!(Color "base/color-quaternary" =>
            [hex("#9a9a9a"), hex("#808080"), rgba(255, 255, 255, 0.45), hex("#009926")],
            "Dates, very muted elements"),
        token!(Color "base/color-light" =>
            [hex("#c0c0c0"), hex("#606060"), rgba(255, 255, 255, 0.3), hex("#007A1F")],
            "Taglines, very light text"),
        // Base: accents
        token!(Color "base/color-accent-1" =>
            [hex("#ffff00"), hex("#ffff00"), hex("#FF0080"), hex("#FFFF00")],
            "Primary accent: Yellow (light/dark/terminal) | Pink (vibrant)."),
        token!(Color "base/color-accent-2" =>
            [hex("#ff0000"), hex("#5dade2"), hex("#D4FF00"), hex("#00FFFF")],
            "Secondary accent: Red (light) | Blue (dark) | Lime (vibrant) | Cyan (terminal, reserved)."),
        // Base: surfaces
        token!(Color "base/color-surface" =>
            [hex("#ffffff"), hex("#1a1a1a"), hex("#3D38F5"), hex("#000000")],
            "Main background"),
        token!(Color "base/color-surface-emphasized" =>
            [hex("#f5f5f5"), hex("#2a2a2a"), hex("#312CDB"), hex("#0A0A0A")],
            "Table headers, cards"),
        token!(Color "base/color-surface-secondary" =>
            [hex("#f9f9f9"), hex("#242424"), hex("#4942F7"), hex("#050505")],
            "Code blocks, blockquotes"),
        // Base: borders
        token!(Color "base/color-border" =>
            [hex("#eeeeee"), hex("#333333"), rgba(255, 255, 255, 0.15), rgba(0, 255, 65, 0.15)],
            "Primary borders"),
        token!(Color "base/color-border-secondary" =>
            [hex("#e5e5e5"), hex("#444444"), rgba(255, 255, 255, 0.2), rgba(0, 255, 65, 0.2)],
            "Secondary borders"),
        // Base: state
        token!(Color "base/color-info" =>
            [hex("#268bd2"), hex("#5dade2"), hex("#69A0FF"), hex("#00BFFF")],
            "Informational blue"),
        token!(Color "base/color-success" =>
            [hex("#27ae60"), hex("#2ecc71"), hex("#00FF33"), hex("#00FF41")],
            "Success states. NOTE: In terminal this equals color-primary — form messages must use global/black text, not color-primary."),
        token!(Color "base/color-error" =>
            [hex("#e74c3c"), hex("#e74c3c"), hex("#FF3366"), hex("#FF0000")],
            "Error states"),
        token!(Color "base/color-warning" =>
            [hex("#f39c12"), hex("#f39c12"), hex("#FFB800"), hex("#FFFF00")],
            "Warning states"),
        // Semantic
        // Light keeps the stylesheet's hardcoded #ccc, darker than border-secondary.
        token!(Color "semantic/color-divider" => [
                hex("#cccccc"),
                alias("base/color-border-secondary"),
                alias("base/color-border-secondary"),
                alias("base/color-border-secondary"),
            ],
            "Structural dividers: hr, two-col borders, table rows. Light: intentionally hardcoded #ccc (darker than border-secondary #e5e5e5 for structural weight)."),
        token!(Color "semantic/color-link" => [
                alias("base/color-info"),
                alias("base/color-info"),
                alias("base/color-accent-2"),
                alias("base/color-primary"),
            ],
            "Links and interactive elements."),
        // Pre-computed color-mix() results; no alias can express them.
        token!(Color "semantic/color-link-hover" =>
            [hex("#1f6fa8"), hex("#7fc4ed"), hex("#E5FF33"), hex("#66FF99")],
            "Link hover state. Pre-computed from CSS color-mix()/hardcoded values — Figma has no color-mix()."),
        token!(Color "semantic/color-bullet" => [
                alias("base/color-tertiary"),
                alias("base/color-tertiary"),
                rgba(255, 255, 255, 0.4),
                rgba(0, 255, 65, 0.4),
            ],
            "Custom list bullet ⚬ character."),
        token!(Color "semantic/color-code" => [
                alias("base/color-accent-2"),
                alias("base/color-accent-2"),
                alias("base/color-accent-1"),
                alias("base/color-accent-1"),
            ],
            "Inline code text color (not code block background)."),
        token!(Color "semantic/color-meta" => [
                alias("base/color-tertiary"),
                alias("base/color-tertiary"),
                rgba(255, 255, 255, 0.5),
                rgba(0, 255, 65, 0.5),
            ],
            "Meta text: figure captions, project meta labels."),
        token!(Color "semantic/color-meta-secondary" => [
                alias("base/color-quaternary"),
                alias("base/color-quaternary"),
                rgba(255, 255, 255, 0.6),
                rgba(0, 255, 65, 0.6),
            ],
            "Secondary meta: project subtitles, credits."),
        // Component
        // Dark switches to accent-2 and Terminal to primary; both are intentional.
        token!(Color "component/color-sticky-bar-bg" => [
                alias("base/color-accent-1"),
                alias("base/color-accent-2"),
                alias("base/color-accent-1"),
                alias("base/color-primary"),
            ],
            "Sticky bar background. Dark uses accent-2 (blue), not accent-1. Terminal uses color-primary (green), not accent-1."),
        token!(Color "component/color-sticky-bar-text" => [
                alias("global/black"),
                alias("global/black"),
                alias("global/white"),
                alias("global/black"),
            ],
            "Sticky bar text. Vibrant is the only theme with white text on the bar."),
        token!(Color "component/color-blockquote-bg" => [
                alias("base/color-surface-secondary"),
                alias("base/color-surface-secondary"),
                alias("base/color-surface-secondary"),
                alias("base/color-surface-secondary"),
            ],
            "Blockquote background — always surface-secondary."),
        token!(Color "component/color-blockquote-border" => [
                alias("base/color-accent-1"),
                alias("base/color-accent-1"),
                alias("base/color-accent-1"),
                alias("base/color-accent-1"),
            ],
            "Blockquote 4px left border — always accent-1 (yellow in light/dark/terminal, pink in vibrant)."),
        token!(Color "component/color-skip-link-bg" => [
                alias("global/black"),
                alias("global/black"),
                alias("base/color-accent-1"),
                alias("base/color-accent-1"),
            ],
            "Skip link background."),
        token!(Color "component/color-skip-link-text" => [
                alias("global/white"),
                alias("global/white"),
                alias("global/white"),
                alias("global/black"),
            ],
            "Skip link text."),
    ],
};

/// Spacing scale in pixels, single mode `Default`.
pub const SPACING: CollectionDef = CollectionDef {
    name: SPACING_COLLECTION,
    modes: &["Default"],
    tokens: &[
        token!(Float "xs" => [float(5.0)], "0.25rem — tight spacing, table cells"),
        token!(Float "sm" => [float(10.0)], "0.5rem — small gaps, heading margins"),
        token!(Float "md" => [float(20.0)], "1rem — standard spacing, paragraphs"),
        token!(Float "lg" => [float(30.0)], "1.5rem — section spacing, figures"),
        token!(Float "xl" => [float(40.0)], "2rem — large spacing"),
        token!(Float "2xl" => [float(50.0)], "2.5rem — section dividers (two-col margin-bottom)"),
        token!(Float "3xl" => [float(60.0)], "3rem — masthead margin"),
    ],
};

/// Typography, modes `Standard` and `Terminal`. Terminal swaps the primary
/// family for the monospace one and flattens every weight to 400.
pub const TYPOGRAPHY: CollectionDef = CollectionDef {
    name: TYPOGRAPHY_COLLECTION,
    modes: &["Standard", "Terminal"],
    tokens: &[
        token!(String "font/family/primary" => [text("Hanken Grotesk"), text("IBM Plex Mono")],
            "Primary typeface. Terminal overrides to IBM Plex Mono everywhere."),
        token!(String "font/family/monospace" => [text("IBM Plex Mono"), text("IBM Plex Mono")],
            "Monospace — code blocks, navigation links."),
        token!(Float "font/size/h1" => [float(40.0), float(40.0)]),
        token!(Float "font/size/h2" => [float(26.0), float(26.0)], "1.3rem"),
        token!(Float "font/size/h3" => [float(25.0), float(25.0)], "1.25rem"),
        token!(Float "font/size/body" => [float(20.0), float(20.0)]),
        token!(Float "font/size/masthead" => [float(30.0), float(30.0)], "1.5rem"),
        token!(Float "font/size/small" => [float(16.0), float(16.0)], "0.8rem — meta, captions"),
        token!(Float "font/size/nav" => [float(20.0), float(20.0)]),
        token!(Float "font/weight/light" => [float(300.0), float(400.0)],
            "Terminal normalizes all weights to 400 for authentic terminal aesthetic."),
        token!(Float "font/weight/regular" => [float(400.0), float(400.0)]),
        token!(Float "font/weight/medium" => [float(500.0), float(400.0)],
            "Navigation links. Terminal: 400."),
        token!(Float "font/weight/semibold" => [float(600.0), float(400.0)],
            "Headings, bold text. Terminal: 400 — no weight hierarchy."),
        token!(Float "font/line-height/tight" => [float(1.25), float(1.25)], "Headings"),
        token!(Float "font/line-height/normal" => [float(1.5), float(1.5)], "Body text"),
    ],
};
