//! Shape helpers that append whole outlines to a [`Bezier`].

use super::Bezier;
use crate::curve::Curve;
use crate::error::{PathError, PathResult};
use crate::geometry::{angle, distance, Point};
use kurbo::{Affine, Vec2};
use std::f64::consts::{FRAC_PI_2, PI, TAU};
use std::fmt;
use std::str::FromStr;

/// Handle length of a quarter-circle cubic, relative to its radius.
const KAPPA: f64 = 0.5522847498;

/// Corner radius of a rounded rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Radius {
    /// Same radius on both axes.
    Uniform(f64),
    /// Separate horizontal and vertical radii.
    Axes(f64, f64),
}

impl Radius {
    pub fn radii(self) -> (f64, f64) {
        match self {
            Radius::Uniform(r) => (r, r),
            Radius::Axes(rx, ry) => (rx, ry),
        }
    }
}

impl From<f64> for Radius {
    fn from(r: f64) -> Self {
        Radius::Uniform(r)
    }
}

impl From<(f64, f64)> for Radius {
    fn from((rx, ry): (f64, f64)) -> Self {
        Radius::Axes(rx, ry)
    }
}

impl TryFrom<&[f64]> for Radius {
    type Error = PathError;

    fn try_from(values: &[f64]) -> Result<Self, Self::Error> {
        match *values {
            [r] => Ok(Radius::Uniform(r)),
            [rx, ry] => Ok(Radius::Axes(rx, ry)),
            _ => Err(PathError::InvalidRadius),
        }
    }
}

/// Angular extent of an arc, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ArcRange {
    /// From 0 to the given angle.
    Sweep(f64),
    /// From the first angle to the second.
    Span(f64, f64),
}

impl ArcRange {
    pub fn angles(self) -> (f64, f64) {
        match self {
            ArcRange::Sweep(end) => (0.0, end),
            ArcRange::Span(start, end) => (start, end),
        }
    }
}

impl From<f64> for ArcRange {
    fn from(end: f64) -> Self {
        ArcRange::Sweep(end)
    }
}

impl From<(f64, f64)> for ArcRange {
    fn from((start, end): (f64, f64)) -> Self {
        ArcRange::Span(start, end)
    }
}

/// Outline style for [`Bezier::arrow`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArrowStyle {
    #[default]
    Normal,
    FortyFive,
}

impl FromStr for ArrowStyle {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "normal" => Ok(ArrowStyle::Normal),
            "fortyfive" => Ok(ArrowStyle::FortyFive),
            _ => Err(PathError::UnknownArrowStyle(s.to_string())),
        }
    }
}

impl fmt::Display for ArrowStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ArrowStyle::Normal => "normal",
            ArrowStyle::FortyFive => "fortyfive",
        })
    }
}

/// Sweep in degrees from `start` to `end`, wrapped forward and capped at a full turn.
fn sweep(start: f64, end: f64) -> f64 {
    let raw = end - start;
    if raw > 360.0 {
        360.0
    } else if raw < 0.0 {
        raw.rem_euclid(360.0)
    } else {
        raw
    }
}

/// Cubic approximation of a circular arc, starting with a move to its first point.
///
/// Angles are in degrees in y-down space: with `ccw == false` they grow clockwise on
/// screen, with `ccw == true` they are measured and swept counter-clockwise.
fn arc_curves(center: Point, radius: f64, start: f64, end: f64, ccw: bool) -> Vec<Curve> {
    let sweep = sweep(start, end).to_radians();
    let (theta0, delta) = if ccw {
        (-start.to_radians(), -sweep)
    } else {
        (start.to_radians(), sweep)
    };
    let on_circle = |theta: f64| center + Vec2::from_angle(theta) * radius;
    let tangent = |theta: f64| Vec2::new(-theta.sin(), theta.cos()) * radius;

    let pieces = (sweep / FRAC_PI_2).ceil().max(0.0) as usize;
    let mut out = Vec::with_capacity(pieces + 1);
    out.push(Curve::MoveTo(on_circle(theta0)));
    if pieces == 0 {
        return out;
    }
    let step = delta / pieces as f64;
    let k = 4.0 / 3.0 * (step / 4.0).tan();
    for i in 0..pieces {
        let a0 = theta0 + step * i as f64;
        let a1 = a0 + step;
        let p0 = on_circle(a0);
        let p3 = on_circle(a1);
        out.push(Curve::CurveTo {
            ctrl1: p0 + tangent(a0) * k,
            ctrl2: p3 - tangent(a1) * k,
            end: p3,
        });
    }
    out
}

fn polyline(points: &[Point], close: bool) -> Vec<Curve> {
    let mut out: Vec<Curve> = points
        .iter()
        .enumerate()
        .map(|(i, &p)| if i == 0 { Curve::MoveTo(p) } else { Curve::LineTo(p) })
        .collect();
    if close {
        out.push(Curve::Close);
    }
    out
}

fn transformed(curves: Vec<Curve>, affine: Affine) -> impl Iterator<Item = Curve> {
    curves.into_iter().map(move |c| c.transformed(affine))
}

impl Bezier {
    /// Append a rectangle, optionally with rounded corners.
    ///
    /// Radii are clamped to half the rectangle's extent on each axis; a zero radius
    /// draws square corners.
    pub fn rect(&mut self, x: f64, y: f64, width: f64, height: f64, radius: Option<Radius>) {
        let (rx, ry) = radius.map(Radius::radii).unwrap_or((0.0, 0.0));
        let rx = rx.min(width.abs() / 2.0);
        let ry = ry.min(height.abs() / 2.0);
        if rx <= 0.0 || ry <= 0.0 {
            let corners = [
                Point::new(x, y),
                Point::new(x + width, y),
                Point::new(x + width, y + height),
                Point::new(x, y + height),
            ];
            self.extend(polyline(&corners, true));
            return;
        }

        let (kx, ky) = (rx * KAPPA, ry * KAPPA);
        let (right, bottom) = (x + width, y + height);
        let corner = |ctrl1: (f64, f64), ctrl2: (f64, f64), end: (f64, f64)| Curve::CurveTo {
            ctrl1: ctrl1.into(),
            ctrl2: ctrl2.into(),
            end: end.into(),
        };
        self.extend([
            Curve::MoveTo(Point::new(x + rx, y)),
            Curve::LineTo(Point::new(right - rx, y)),
            corner((right - rx + kx, y), (right, y + ry - ky), (right, y + ry)),
            Curve::LineTo(Point::new(right, bottom - ry)),
            corner((right, bottom - ry + ky), (right - rx + kx, bottom), (right - rx, bottom)),
            Curve::LineTo(Point::new(x + rx, bottom)),
            corner((x + rx - kx, bottom), (x, bottom - ry + ky), (x, bottom - ry)),
            Curve::LineTo(Point::new(x, y + ry)),
            corner((x, y + ry - ky), (x + rx - kx, y), (x + rx, y)),
            Curve::Close,
        ]);
    }

    /// Append an ellipse inscribed in the given box, or an elliptical arc when a
    /// range is given.
    pub fn oval(
        &mut self,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        range: Option<ArcRange>,
        ccw: bool,
    ) {
        let (start, end, close) = match range {
            Some(range) => {
                let (start, end) = range.angles();
                (start, end, false)
            }
            None => (0.0, 360.0, true),
        };
        let unit = arc_curves(Point::new(0.5, 0.5), 0.5, start, end, ccw);
        let fit = Affine::translate((x, y)) * Affine::scale_non_uniform(width, height);
        self.extend(transformed(unit, fit));
        if close {
            self.close_path();
        }
    }

    /// Alias for [`Bezier::oval`].
    pub fn ellipse(
        &mut self,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        range: Option<ArcRange>,
        ccw: bool,
    ) {
        self.oval(x, y, width, height, range, ccw);
    }

    /// Append a line from `(x1, y1)` to `(x2, y2)`.
    ///
    /// A non-zero `arc` bows the line into a half-ellipse whose depth is `arc` times
    /// the line's length; the sign picks the side.
    pub fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, arc: f64) {
        if arc == 0.0 {
            self.move_to(x1, y1);
            self.line_to(x2, y2);
            return;
        }
        let k = KAPPA / 2.0;
        let unit = vec![
            Curve::MoveTo(Point::new(0.0, 0.0)),
            Curve::CurveTo {
                ctrl1: Point::new(0.0, -k),
                ctrl2: Point::new(0.5 - k, -0.5),
                end: Point::new(0.5, -0.5),
            },
            Curve::CurveTo {
                ctrl1: Point::new(0.5 + k, -0.5),
                ctrl2: Point::new(1.0, -k),
                end: Point::new(1.0, 0.0),
            },
        ];
        let dist = distance(x1, y1, x2, y2);
        let fit = Affine::translate((x1, y1))
            * Affine::rotate(angle(x1, y1, x2, y2).to_radians())
            * Affine::scale_non_uniform(dist, dist * arc);
        self.extend(transformed(unit, fit));
    }

    /// Append a regular polygon resting on a flat edge (or on a point for odd counts).
    pub fn poly(&mut self, x: f64, y: f64, radius: f64, sides: usize) -> PathResult<()> {
        if sides < 3 {
            return Err(PathError::TooFewSides(sides));
        }
        let n = sides as f64;
        let theta = FRAC_PI_2 + if sides % 2 == 1 { 0.0 } else { PI / n };
        let vertices: Vec<Point> = (0..sides)
            .map(|i| {
                let a = TAU * i as f64 / n - theta;
                Point::new(radius * a.cos() + x, radius * a.sin() + y)
            })
            .collect();
        self.extend(polyline(&vertices, true));
        Ok(())
    }

    /// Append a star with `points` tips.
    ///
    /// Without an explicit `inner` radius the inner vertices sit on the lines joining
    /// alternate tips, giving a regular star.
    pub fn star(
        &mut self,
        x: f64,
        y: f64,
        points: usize,
        outer: f64,
        inner: Option<f64>,
    ) -> PathResult<()> {
        if points == 0 {
            return Err(PathError::TooFewPoints(points));
        }
        let p = points as f64;
        let inner = inner.unwrap_or_else(|| outer * (TAU / p).cos() / (PI / p).cos());
        let vertices: Vec<Point> = (0..2 * points)
            .map(|i| {
                let a = i as f64 * PI / p;
                let r = if i % 2 == 1 { inner } else { outer };
                Point::new(x + r * a.sin(), y - r * a.cos())
            })
            .collect();
        self.extend(polyline(&vertices, true));
        Ok(())
    }

    /// Append a circular arc around `(x, y)`, or a full circle without a range.
    ///
    /// A ranged arc continues the current subpath with a line to its first point, or
    /// starts one if the path is empty.
    pub fn arc(&mut self, x: f64, y: f64, radius: f64, range: Option<ArcRange>, ccw: bool) {
        let Some(range) = range else {
            self.oval(x - radius, y - radius, radius * 2.0, radius * 2.0, None, ccw);
            return;
        };
        let (start, end) = range.angles();
        let mut curves = arc_curves(Point::new(x, y), radius, start, end, ccw);
        if !self.is_empty() {
            curves[0] = Curve::LineTo(curves[0].end());
        }
        self.extend(curves);
    }

    /// Append an arrow whose tip is at `(x, y)`, pointing right.
    pub fn arrow(&mut self, x: f64, y: f64, width: f64, style: ArrowStyle) {
        let p = Point::new;
        match style {
            ArrowStyle::Normal => {
                let head = width * 0.4;
                let tail = width * 0.2;
                let outline = [
                    p(x, y),
                    p(x - head, y + head),
                    p(x - head, y + tail),
                    p(x - width, y + tail),
                    p(x - width, y - tail),
                    p(x - head, y - tail),
                    p(x - head, y - head),
                    p(x, y),
                ];
                self.extend(polyline(&outline, true));
            }
            ArrowStyle::FortyFive => {
                let head = 0.3;
                let tail = 1.0 + head;
                let outline = [
                    p(x, y),
                    p(x, y + width * (1.0 - head)),
                    p(x - width * head, y + width),
                    p(x - width * head, y + width * tail * 0.4),
                    p(x - width * tail * 0.6, y + width),
                    p(x - width, y + width * tail * 0.6),
                    p(x - width * tail * 0.4, y + width * head),
                    p(x - width, y + width * head),
                    p(x - width * (1.0 - head), y),
                    p(x, y),
                ];
                self.extend(polyline(&outline, false));
            }
        }
    }
}
