//! Affine transforms with scope-exit rollback.
//!
//! A [`Transform`] wraps a kurbo [`Affine`]. Mutators build a new elementary
//! transform and *prepend* it to the receiver, so the newest operation is applied to
//! a point first (local space, then world space).

use crate::error::PathError;
use crate::geometry::{AngleMode, Point};
use kurbo::{Affine, Vec2};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Pivot used when a path's transform is resolved for drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransformMode {
    /// Transform around the centre of the path's bounds.
    #[default]
    Center,
    /// Transform around the coordinate origin.
    Corner,
}

impl FromStr for TransformMode {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "center" => Ok(TransformMode::Center),
            "corner" => Ok(TransformMode::Corner),
            other => Err(PathError::UnknownMode(other.to_string())),
        }
    }
}

impl fmt::Display for TransformMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TransformMode::Center => "center",
            TransformMode::Corner => "corner",
        })
    }
}

/// Context attributes recorded before a mode-switching mutation.
///
/// Only the fields that are `Some` are written back when the scope ends.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContextSnapshot {
    pub transform: Option<Affine>,
    pub transform_mode: Option<TransformMode>,
    pub angle_mode: Option<AngleMode>,
}

impl ContextSnapshot {
    /// Snapshot holding only a prior transform.
    pub fn transform(prior: Affine) -> Self {
        Self {
            transform: Some(prior),
            ..Self::default()
        }
    }
}

/// How the owning context is put back when a transform's scope ends.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ScopeExit {
    /// Prepend the inverse matrix to undo the composition.
    #[default]
    Invert,
    /// The mutation was already applied to the context on creation; write the
    /// recorded attributes back verbatim.
    Restore(ContextSnapshot),
}

/// A 2x3 affine matrix `(a, b, c, d, tx, ty)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    affine: Affine,
    #[serde(skip)]
    exit: ScopeExit,
}

impl Transform {
    /// The identity transform.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a transform from its six coefficients.
    pub fn from_matrix(matrix: [f64; 6]) -> Self {
        Self::from(Affine::new(matrix))
    }

    /// The six coefficients `(a, b, c, d, tx, ty)`.
    pub fn matrix(&self) -> [f64; 6] {
        self.affine.as_coeffs()
    }

    /// Iterate the coefficients in `(a, b, c, d, tx, ty)` order.
    pub fn coefficients(&self) -> impl Iterator<Item = f64> {
        self.matrix().into_iter()
    }

    pub fn set_matrix(&mut self, matrix: [f64; 6]) {
        self.affine = Affine::new(matrix);
    }

    /// The underlying kurbo affine.
    pub fn affine(&self) -> Affine {
        self.affine
    }

    /// How this transform's scope is undone.
    pub fn exit(&self) -> &ScopeExit {
        &self.exit
    }

    /// Tag this transform so its scope restores `snapshot` instead of inverting.
    pub fn with_rollback(mut self, snapshot: ContextSnapshot) -> Self {
        self.exit = ScopeExit::Restore(snapshot);
        self
    }

    /// Algebraic inverse. Singular matrices are not guarded and yield non-finite
    /// coefficients.
    pub fn inverse(&self) -> Transform {
        Transform::from(self.affine.inverse())
    }

    /// Apply `other` before this transform.
    pub fn prepend(&mut self, other: &Transform) {
        self.affine = self.affine * other.affine;
    }

    /// Apply `other` after this transform.
    pub fn append(&mut self, other: &Transform) {
        self.affine = other.affine * self.affine;
    }

    fn push(&mut self, step: Affine) -> Transform {
        let xf = Transform::from(step);
        self.prepend(&xf);
        xf
    }

    /// Rotate by `degrees`. Returns the elementary transform that was prepended.
    pub fn rotate(&mut self, degrees: f64) -> Transform {
        self.push(Affine::rotate(degrees.to_radians()))
    }

    pub fn rotate_radians(&mut self, radians: f64) -> Transform {
        self.push(Affine::rotate(radians))
    }

    pub fn translate(&mut self, dx: f64, dy: f64) -> Transform {
        self.push(Affine::translate(Vec2::new(dx, dy)))
    }

    pub fn scale(&mut self, sx: f64, sy: f64) -> Transform {
        self.push(Affine::scale_non_uniform(sx, sy))
    }

    pub fn scale_uniform(&mut self, s: f64) -> Transform {
        self.push(Affine::scale(s))
    }

    /// Skew by the given angles (degrees) along each axis.
    pub fn skew(&mut self, x: f64, y: f64) -> Transform {
        let (x, y) = (x.to_radians(), y.to_radians());
        self.push(Affine::new([1.0, y.tan(), -x.tan(), 1.0, 0.0, 0.0]))
    }

    /// Map a point or a path through this transform.
    pub fn apply<T: Transformable>(&self, item: &T) -> T {
        item.transformed(self.affine)
    }

    pub fn apply_point(&self, point: Point) -> Point {
        self.affine * point
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::from(Affine::IDENTITY)
    }
}

impl From<Affine> for Transform {
    fn from(affine: Affine) -> Self {
        Self {
            affine,
            exit: ScopeExit::Invert,
        }
    }
}

impl From<[f64; 6]> for Transform {
    fn from(matrix: [f64; 6]) -> Self {
        Self::from_matrix(matrix)
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, tx, ty] = self.matrix();
        write!(
            f,
            "Transform([{a:.3}, {b:.3}, {c:.3}, {d:.3}, {tx:.3}, {ty:.3}])"
        )
    }
}

/// Values that can be mapped through an affine transform.
pub trait Transformable {
    /// Return a transformed copy.
    fn transformed(&self, affine: Affine) -> Self;
}

impl Transformable for Point {
    fn transformed(&self, affine: Affine) -> Self {
        affine * *self
    }
}
