//! Plotkit Core Library
//!
//! Bezier paths, affine transforms and path boolean operations for a creative-coding
//! drawing context. Rendering is left to a [`Surface`] that receives finished paths.

pub mod bezier;
pub mod context;
pub mod curve;
pub mod error;
pub mod geometry;
pub mod pathmath;
pub mod settings;
pub mod style;
pub mod transform;

pub use bezier::{ArcRange, ArrowStyle, Bezier, Points, Radius};
pub use context::{
    BezierOptions, Context, PaintRequest, PathScope, RecordingSurface, Surface, TransformScope,
};
pub use curve::{Command, Curve, PathItem};
pub use error::{PathError, PathResult};
pub use geometry::{AngleMode, Point, PointExt, Region, Size, CM, INCH, MM};
pub use pathmath::boolean::BooleanOp;
pub use settings::{Settings, DEFAULT_FLATNESS, DEFAULT_SUBDIVISIONS};
pub use style::{CapStyle, FillRule, JoinStyle, PenStyle, SerializableColor, StyleOverrides};
pub use transform::{ContextSnapshot, ScopeExit, Transform, TransformMode, Transformable};
