//! Fill and stroke paint definitions.
//!
//! A visual node owns ordered lists of [`Paint`] layers for its fills and its
//! strokes. Only [`Paint::Solid`] layers carry a single color, so only they
//! can have their color bound to a color token. Every other layer is carried
//! through a load/save round trip untouched: fields the model does not name
//! are kept in an `extra` map, and paint types it does not know at all are
//! kept verbatim as [`Paint::Other`].
//!
//! # Serialized form
//!
//! Paints are tagged by `type`, matching the host's paint objects:
//!
//! ```json
//! { "type": "SOLID", "color": { "r": 1, "g": 1, "b": 0 }, "opacity": 1,
//!   "boundColor": 12 }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{
    color::{Color, ColorKey},
    identifier::VariableId,
};

/// How a paint layer blends with the layers below it.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BlendMode {
    #[default]
    Normal,
    Multiply,
    Screen,
    Overlay,
    Darken,
    Lighten,
}

/// A single fill or stroke layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "PaintRepr", into = "PaintRepr")]
pub enum Paint {
    Solid(SolidPaint),
    GradientLinear(GradientPaint),
    GradientRadial(GradientPaint),
    GradientAngular(GradientPaint),
    GradientDiamond(GradientPaint),
    Image(ImagePaint),
    /// A layer this model does not understand (video, pattern, or a known
    /// type in an unexpected shape), kept as raw JSON.
    Other(Value),
}

/// Paint types with a typed model, tagged by `type`.
#[derive(Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
enum KnownPaint {
    Solid(SolidPaint),
    GradientLinear(GradientPaint),
    GradientRadial(GradientPaint),
    GradientAngular(GradientPaint),
    GradientDiamond(GradientPaint),
    Image(ImagePaint),
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum PaintRepr {
    Known(KnownPaint),
    Other(Value),
}

impl From<PaintRepr> for Paint {
    fn from(repr: PaintRepr) -> Self {
        match repr {
            PaintRepr::Known(KnownPaint::Solid(paint)) => Self::Solid(paint),
            PaintRepr::Known(KnownPaint::GradientLinear(paint)) => Self::GradientLinear(paint),
            PaintRepr::Known(KnownPaint::GradientRadial(paint)) => Self::GradientRadial(paint),
            PaintRepr::Known(KnownPaint::GradientAngular(paint)) => Self::GradientAngular(paint),
            PaintRepr::Known(KnownPaint::GradientDiamond(paint)) => Self::GradientDiamond(paint),
            PaintRepr::Known(KnownPaint::Image(paint)) => Self::Image(paint),
            PaintRepr::Other(value) => Self::Other(value),
        }
    }
}

impl From<Paint> for PaintRepr {
    fn from(paint: Paint) -> Self {
        match paint {
            Paint::Solid(paint) => Self::Known(KnownPaint::Solid(paint)),
            Paint::GradientLinear(paint) => Self::Known(KnownPaint::GradientLinear(paint)),
            Paint::GradientRadial(paint) => Self::Known(KnownPaint::GradientRadial(paint)),
            Paint::GradientAngular(paint) => Self::Known(KnownPaint::GradientAngular(paint)),
            Paint::GradientDiamond(paint) => Self::Known(KnownPaint::GradientDiamond(paint)),
            Paint::Image(paint) => Self::Known(KnownPaint::Image(paint)),
            Paint::Other(value) => Self::Other(value),
        }
    }
}

impl Paint {
    /// Returns the solid layer, if this is one.
    pub fn as_solid(&self) -> Option<&SolidPaint> {
        match self {
            Self::Solid(solid) => Some(solid),
            _ => None,
        }
    }
}

impl From<SolidPaint> for Paint {
    fn from(solid: SolidPaint) -> Self {
        Self::Solid(solid)
    }
}

/// A single-color paint layer.
///
/// The layer's transparency lives in `opacity`; the alpha channel of
/// `color` is not used for matching.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolidPaint {
    color: Color,
    #[serde(default = "full_opacity")]
    opacity: f32,
    #[serde(default = "visible")]
    visible: bool,
    #[serde(default)]
    blend_mode: BlendMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    bound_color: Option<VariableId>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

fn full_opacity() -> f32 {
    1.0
}

fn visible() -> bool {
    true
}

impl SolidPaint {
    /// Creates a visible, normally blended, unbound solid paint.
    pub fn new(color: Color, opacity: f32) -> Self {
        Self {
            color: color.with_alpha(1.0),
            opacity,
            visible: true,
            blend_mode: BlendMode::Normal,
            bound_color: None,
            extra: Map::new(),
        }
    }

    /// Sets visibility, returning the modified paint.
    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// Sets the blend mode, returning the modified paint.
    pub fn with_blend_mode(mut self, blend_mode: BlendMode) -> Self {
        self.blend_mode = blend_mode;
        self
    }

    /// Returns an equivalent paint whose color is bound to `variable`.
    ///
    /// Every other attribute is preserved, including fields this model does
    /// not name.
    pub fn with_bound_color(&self, variable: VariableId) -> Self {
        Self {
            bound_color: Some(variable),
            ..self.clone()
        }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    pub fn blend_mode(&self) -> BlendMode {
        self.blend_mode
    }

    /// Host fields this model does not name, such as `boundVariables`.
    pub fn extra(&self) -> &Map<String, Value> {
        &self.extra
    }

    /// The token this paint's color is bound to, if any.
    pub fn bound_color(&self) -> Option<VariableId> {
        self.bound_color
    }

    /// Match key built from the literal color and the layer opacity.
    pub fn key(&self) -> ColorKey {
        ColorKey::from_channels(
            self.color.red(),
            self.color.green(),
            self.color.blue(),
            self.opacity,
        )
    }
}

/// One color stop of a gradient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorStop {
    pub position: f32,
    pub color: Color,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A gradient layer. Never bound; carried through unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradientPaint {
    pub gradient_stops: Vec<ColorStop>,
    #[serde(default = "full_opacity")]
    pub opacity: f32,
    /// Unmodeled fields such as `gradientTransform`.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// An image layer. Never bound; carried through unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImagePaint {
    pub image_hash: String,
    #[serde(default)]
    pub scale_mode: String,
    #[serde(default = "full_opacity")]
    pub opacity: f32,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
