//! Geometry primitives: points, sizes, regions and the trig helpers behind them.
//!
//! `Point` and `Size` are kurbo's value types. The polar helpers work in degrees,
//! measured with `atan2` in the path's own (y-down) coordinate space.

use crate::error::PathError;
use kurbo::Rect;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub use kurbo::{Point, Size};

/// Points per inch.
pub const INCH: f64 = 72.0;
/// Points per centimetre.
pub const CM: f64 = 28.3465;
/// Points per millimetre.
pub const MM: f64 = 2.8346;

/// Angle from `(x0, y0)` to `(x1, y1)` in degrees.
pub fn angle(x0: f64, y0: f64, x1: f64, y1: f64) -> f64 {
    (y1 - y0).atan2(x1 - x0).to_degrees()
}

/// Straight-line distance between two coordinates.
pub fn distance(x0: f64, y0: f64, x1: f64, y1: f64) -> f64 {
    (x1 - x0).hypot(y1 - y0)
}

/// Point at `distance` from `(x0, y0)` in the direction `angle` (degrees).
pub fn coordinates(x0: f64, y0: f64, distance: f64, angle: f64) -> Point {
    let rad = angle.to_radians();
    Point::new(x0 + rad.cos() * distance, y0 + rad.sin() * distance)
}

/// Reflect `(x1, y1)` through `(x0, y0)`.
///
/// `d` scales the reflected distance and `a` is added to the angle, so the defaults
/// `d = 1.0, a = 180.0` give the point mirrored through the origin point.
pub fn reflect(x0: f64, y0: f64, x1: f64, y1: f64, d: f64, a: f64) -> Point {
    let d = d * distance(x0, y0, x1, y1);
    let a = a + angle(x0, y0, x1, y1);
    coordinates(x0, y0, d, a)
}

/// Polar helpers on [`Point`].
pub trait PointExt {
    /// Angle towards `other`, in degrees.
    fn angle_to(&self, other: Point) -> f64;

    /// Distance to `other`.
    fn distance_to(&self, other: Point) -> f64;

    /// Reflect `other` through this point (see [`reflect`]).
    fn reflect(&self, other: Point, d: f64, a: f64) -> Point;

    /// Point at `distance` along `angle` degrees from this point.
    fn coordinates(&self, distance: f64, angle: f64) -> Point;
}

impl PointExt for Point {
    fn angle_to(&self, other: Point) -> f64 {
        angle(self.x, self.y, other.x, other.y)
    }

    fn distance_to(&self, other: Point) -> f64 {
        distance(self.x, self.y, other.x, other.y)
    }

    fn reflect(&self, other: Point, d: f64, a: f64) -> Point {
        reflect(self.x, self.y, other.x, other.y, d, a)
    }

    fn coordinates(&self, distance: f64, angle: f64) -> Point {
        coordinates(self.x, self.y, distance, angle)
    }
}

/// Axis-aligned box described by its origin and size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub origin: Point,
    pub size: Size,
}

impl Region {
    /// Create a region from explicit coordinates.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            origin: Point::new(x, y),
            size: Size::new(width, height),
        }
    }

    pub fn from_origin_size(origin: Point, size: Size) -> Self {
        Self { origin, size }
    }

    pub fn x(&self) -> f64 {
        self.origin.x
    }

    pub fn y(&self) -> f64 {
        self.origin.y
    }

    pub fn width(&self) -> f64 {
        self.size.width
    }

    pub fn height(&self) -> f64 {
        self.size.height
    }

    /// Centre of the region.
    pub fn center(&self) -> Point {
        Point::new(
            self.origin.x + self.size.width / 2.0,
            self.origin.y + self.size.height / 2.0,
        )
    }

    /// Convert to a kurbo rect.
    pub fn to_rect(&self) -> Rect {
        Rect::from_origin_size(self.origin, self.size)
    }

    /// Smallest region covering both.
    pub fn union(&self, other: &Region) -> Region {
        self.to_rect().union(other.to_rect()).into()
    }
}

impl From<Rect> for Region {
    fn from(rect: Rect) -> Self {
        let rect = rect.abs();
        Self::new(rect.x0, rect.y0, rect.width(), rect.height())
    }
}

impl From<(Point, Size)> for Region {
    fn from((origin, size): (Point, Size)) -> Self {
        Self::from_origin_size(origin, size)
    }
}

/// Unit used to interpret rotation amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AngleMode {
    #[default]
    Degrees,
    Radians,
    /// Fraction of a full turn (1.0 = 360 degrees).
    Percent,
}

impl AngleMode {
    /// Convert an amount in this unit to degrees.
    pub fn to_degrees(self, value: f64) -> f64 {
        match self {
            AngleMode::Degrees => value,
            AngleMode::Radians => value.to_degrees(),
            AngleMode::Percent => value * 360.0,
        }
    }
}

impl FromStr for AngleMode {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "degrees" => Ok(AngleMode::Degrees),
            "radians" => Ok(AngleMode::Radians),
            "percent" => Ok(AngleMode::Percent),
            other => Err(PathError::UnknownMode(other.to_string())),
        }
    }
}

impl fmt::Display for AngleMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AngleMode::Degrees => "degrees",
            AngleMode::Radians => "radians",
            AngleMode::Percent => "percent",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_angle_and_distance() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(10.0, 10.0);
        assert!((a.angle_to(b) - 45.0).abs() < 1e-9);
        assert!((a.distance_to(Point::new(3.0, 4.0)) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_coordinates() {
        let p = Point::ZERO.coordinates(10.0, 90.0);
        assert!(p.x.abs() < 1e-9);
        assert!((p.y - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_reflect_through_origin() {
        let center = Point::new(5.0, 5.0);
        let p = center.reflect(Point::new(10.0, 5.0), 1.0, 180.0);
        assert!(p.x.abs() < 1e-9);
        assert!((p.y - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_reflect_scaled() {
        let p = reflect(0.0, 0.0, 2.0, 0.0, 0.5, 180.0);
        assert!((p.x + 1.0).abs() < 1e-9);
        assert!(p.y.abs() < 1e-9);
    }

    #[test]
    fn test_degenerate_angle_is_not_an_error() {
        // atan2(0, 0) is defined as 0
        assert_eq!(angle(1.0, 1.0, 1.0, 1.0), 0.0);
        assert!(distance(0.0, f64::NAN, 1.0, 1.0).is_nan());
    }

    #[test]
    fn test_region_accessors() {
        let r = Region::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(r.x(), 1.0);
        assert_eq!(r.y(), 2.0);
        assert_eq!(r.width(), 3.0);
        assert_eq!(r.height(), 4.0);
        assert_eq!(r.center(), Point::new(2.5, 4.0));
        assert_eq!(Region::from(r.to_rect()), r);
        assert_eq!(Region::default(), Region::new(0.0, 0.0, 0.0, 0.0));
    }

    #[test]
    fn test_region_union() {
        let a = Region::new(0.0, 0.0, 10.0, 10.0);
        let b = Region::new(20.0, 5.0, 5.0, 10.0);
        assert_eq!(a.union(&b), Region::new(0.0, 0.0, 25.0, 15.0));
    }

    #[test]
    fn test_angle_mode() {
        assert_eq!(AngleMode::Percent.to_degrees(0.25), 90.0);
        assert!((AngleMode::Radians.to_degrees(std::f64::consts::PI) - 180.0).abs() < 1e-9);
        assert_eq!("radians".parse::<AngleMode>(), Ok(AngleMode::Radians));
        assert!("gradians".parse::<AngleMode>().is_err());
    }
}
