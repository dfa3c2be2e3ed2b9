//! Path elements.

use crate::geometry::Point;
use kurbo::{Affine, PathEl};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Tag identifying a [`Curve`]'s kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    MoveTo,
    LineTo,
    CurveTo,
    Close,
}

/// A single path command and its points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Curve {
    MoveTo(Point),
    LineTo(Point),
    CurveTo {
        ctrl1: Point,
        ctrl2: Point,
        end: Point,
    },
    Close,
}

impl Curve {
    pub fn command(&self) -> Command {
        match self {
            Curve::MoveTo(_) => Command::MoveTo,
            Curve::LineTo(_) => Command::LineTo,
            Curve::CurveTo { .. } => Command::CurveTo,
            Curve::Close => Command::Close,
        }
    }

    /// On-curve endpoint. `Close` reports the origin.
    pub fn end(&self) -> Point {
        match *self {
            Curve::MoveTo(p) | Curve::LineTo(p) => p,
            Curve::CurveTo { end, .. } => end,
            Curve::Close => Point::ZERO,
        }
    }

    /// First control point; equal to the endpoint for moves and lines.
    pub fn ctrl1(&self) -> Point {
        match *self {
            Curve::CurveTo { ctrl1, .. } => ctrl1,
            other => other.end(),
        }
    }

    /// Second control point; equal to the endpoint for moves and lines.
    pub fn ctrl2(&self) -> Point {
        match *self {
            Curve::CurveTo { ctrl2, .. } => ctrl2,
            other => other.end(),
        }
    }

    pub fn x(&self) -> f64 {
        self.end().x
    }

    pub fn y(&self) -> f64 {
        self.end().y
    }

    /// Map every point of the element through `affine`.
    pub fn transformed(&self, affine: Affine) -> Curve {
        match *self {
            Curve::MoveTo(p) => Curve::MoveTo(affine * p),
            Curve::LineTo(p) => Curve::LineTo(affine * p),
            Curve::CurveTo { ctrl1, ctrl2, end } => Curve::CurveTo {
                ctrl1: affine * ctrl1,
                ctrl2: affine * ctrl2,
                end: affine * end,
            },
            Curve::Close => Curve::Close,
        }
    }
}

impl From<Curve> for PathEl {
    fn from(curve: Curve) -> Self {
        match curve {
            Curve::MoveTo(p) => PathEl::MoveTo(p),
            Curve::LineTo(p) => PathEl::LineTo(p),
            Curve::CurveTo { ctrl1, ctrl2, end } => PathEl::CurveTo(ctrl1, ctrl2, end),
            Curve::Close => PathEl::ClosePath,
        }
    }
}

impl fmt::Display for Curve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Curve::MoveTo(p) => write!(f, "Curve(MOVETO, (({:.3}, {:.3}),))", p.x, p.y),
            Curve::LineTo(p) => write!(f, "Curve(LINETO, (({:.3}, {:.3}),))", p.x, p.y),
            Curve::CurveTo { ctrl1, ctrl2, end } => write!(
                f,
                "Curve(CURVETO, (({:.3}, {:.3}), ({:.3}, {:.3}), ({:.3}, {:.3})))",
                ctrl1.x, ctrl1.y, ctrl2.x, ctrl2.y, end.x, end.y
            ),
            Curve::Close => f.write_str("Curve(CLOSE)"),
        }
    }
}

/// Anything that can be fed to [`Bezier::extend`](crate::Bezier::extend).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathItem {
    /// A bare point: moves on an empty path, draws a line otherwise.
    Point(Point),
    Curve(Curve),
}

impl From<Point> for PathItem {
    fn from(p: Point) -> Self {
        PathItem::Point(p)
    }
}

impl From<(f64, f64)> for PathItem {
    fn from(p: (f64, f64)) -> Self {
        PathItem::Point(p.into())
    }
}

impl From<Curve> for PathItem {
    fn from(c: Curve) -> Self {
        PathItem::Curve(c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_controls_match_endpoint() {
        let c = Curve::LineTo(Point::new(3.0, 4.0));
        assert_eq!(c.ctrl1(), c.end());
        assert_eq!(c.ctrl2(), c.end());
        assert_eq!(c.command(), Command::LineTo);
    }

    #[test]
    fn test_close_is_zeroed() {
        let c = Curve::Close;
        assert_eq!(c.end(), Point::ZERO);
        assert_eq!(c.ctrl1(), Point::ZERO);
        assert_eq!(c.ctrl2(), Point::ZERO);
    }

    #[test]
    fn test_equality_compares_controls() {
        let a = Curve::CurveTo {
            ctrl1: Point::new(0.0, 1.0),
            ctrl2: Point::new(1.0, 1.0),
            end: Point::new(1.0, 0.0),
        };
        let b = Curve::CurveTo {
            ctrl1: Point::new(0.0, 2.0),
            ctrl2: Point::new(1.0, 1.0),
            end: Point::new(1.0, 0.0),
        };
        assert_ne!(a, b);
        assert_eq!(a, a);
        assert_ne!(Curve::MoveTo(Point::ZERO), Curve::LineTo(Point::ZERO));
    }

    #[test]
    fn test_transformed() {
        let c = Curve::MoveTo(Point::new(1.0, 2.0));
        let moved = c.transformed(Affine::translate((10.0, 0.0)));
        assert_eq!(moved, Curve::MoveTo(Point::new(11.0, 2.0)));
        assert_eq!(Curve::Close.transformed(Affine::scale(3.0)), Curve::Close);
    }

    #[test]
    fn test_display() {
        assert_eq!(Curve::Close.to_string(), "Curve(CLOSE)");
        assert_eq!(
            Curve::LineTo(Point::new(1.0, 2.0)).to_string(),
            "Curve(LINETO, ((1.000, 2.000),))"
        );
    }
}
