//! Fill and stroke attributes carried by paths and the drawing context.

use kurbo::{Cap, Join, Stroke};
use peniko::{Color, Fill};
use serde::{Deserialize, Serialize};

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }

    pub fn white() -> Self {
        Self::new(255, 255, 255, 255)
    }
}

impl From<Color> for SerializableColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Line end style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CapStyle {
    #[default]
    Butt,
    Round,
    Square,
}

impl From<CapStyle> for Cap {
    fn from(cap: CapStyle) -> Self {
        match cap {
            CapStyle::Butt => Cap::Butt,
            CapStyle::Round => Cap::Round,
            CapStyle::Square => Cap::Square,
        }
    }
}

/// Corner style where two segments meet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JoinStyle {
    #[default]
    Miter,
    Round,
    Bevel,
}

impl From<JoinStyle> for Join {
    fn from(join: JoinStyle) -> Self {
        match join {
            JoinStyle::Miter => Join::Miter,
            JoinStyle::Round => Join::Round,
            JoinStyle::Bevel => Join::Bevel,
        }
    }
}

/// Rule deciding which points are inside a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FillRule {
    #[default]
    NonZero,
    EvenOdd,
}

impl FillRule {
    /// Whether a winding number counts as inside under this rule.
    pub fn is_inside(self, winding: i32) -> bool {
        match self {
            FillRule::NonZero => winding != 0,
            FillRule::EvenOdd => winding % 2 != 0,
        }
    }
}

impl From<FillRule> for Fill {
    fn from(rule: FillRule) -> Self {
        match rule {
            FillRule::NonZero => Fill::NonZero,
            FillRule::EvenOdd => Fill::EvenOdd,
        }
    }
}

/// Fill and stroke attributes for a path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PenStyle {
    /// Fill color (None = no fill).
    pub fill: Option<SerializableColor>,
    /// Stroke color (None = no stroke).
    pub stroke: Option<SerializableColor>,
    pub stroke_width: f64,
    #[serde(default)]
    pub cap: CapStyle,
    #[serde(default)]
    pub join: JoinStyle,
    /// Dash lengths, alternating on/off. Empty = solid.
    #[serde(default)]
    pub dash: Vec<f64>,
    #[serde(default)]
    pub fill_rule: FillRule,
}

impl Default for PenStyle {
    fn default() -> Self {
        Self {
            fill: Some(SerializableColor::black()),
            stroke: None,
            stroke_width: 1.0,
            cap: CapStyle::default(),
            join: JoinStyle::default(),
            dash: Vec::new(),
            fill_rule: FillRule::default(),
        }
    }
}

impl PenStyle {
    /// Fill color as a peniko Color.
    pub fn fill_color(&self) -> Option<Color> {
        self.fill.map(Color::from)
    }

    /// Stroke color as a peniko Color.
    pub fn stroke_color(&self) -> Option<Color> {
        self.stroke.map(Color::from)
    }

    /// Stroke geometry for the rendering surface.
    pub fn to_stroke(&self) -> Stroke {
        let stroke = Stroke::new(self.stroke_width)
            .with_caps(self.cap.into())
            .with_join(self.join.into());
        if self.dash.is_empty() {
            stroke
        } else {
            stroke.with_dashes(0.0, self.dash.iter().copied())
        }
    }
}

/// Per-path overrides of the style inherited from a context.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleOverrides {
    pub fill: Option<Option<SerializableColor>>,
    pub stroke: Option<Option<SerializableColor>>,
    pub stroke_width: Option<f64>,
    pub cap: Option<CapStyle>,
    pub join: Option<JoinStyle>,
    pub dash: Option<Vec<f64>>,
    pub fill_rule: Option<FillRule>,
}

impl StyleOverrides {
    /// Merge these overrides over `base`.
    pub fn apply(&self, base: &PenStyle) -> PenStyle {
        PenStyle {
            fill: self.fill.unwrap_or(base.fill),
            stroke: self.stroke.unwrap_or(base.stroke),
            stroke_width: self.stroke_width.unwrap_or(base.stroke_width),
            cap: self.cap.unwrap_or(base.cap),
            join: self.join.unwrap_or(base.join),
            dash: self.dash.clone().unwrap_or_else(|| base.dash.clone()),
            fill_rule: self.fill_rule.unwrap_or(base.fill_rule),
        }
    }
}
