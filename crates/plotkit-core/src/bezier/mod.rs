//! Mutable Bezier paths.
//!
//! A [`Bezier`] is an ordered list of [`Curve`] elements plus the style and transform
//! it inherited from the context that created it. Geometric queries delegate to
//! [`crate::pathmath`]; relative segment lengths are cached until the next mutation.

mod shapes;

pub use shapes::{ArcRange, ArrowStyle, Radius};

use crate::curve::{Curve, PathItem};
use crate::error::{PathError, PathResult};
use crate::geometry::{Point, Region};
use crate::pathmath::{self, boolean, Segment};
use crate::settings::{DEFAULT_FLATNESS, DEFAULT_SUBDIVISIONS};
use crate::style::PenStyle;
use crate::transform::{Transform, TransformMode, Transformable};
use kurbo::{Affine, BezPath, PathEl};
use serde::{Deserialize, Serialize};
use std::sync::RwLock;

/// Tolerance used to flatten curves for containment tests.
const CONTAINS_FLATNESS: f64 = 0.05;

fn default_subdivisions() -> usize {
    DEFAULT_SUBDIVISIONS
}

/// A path made of move, line, curve and close elements.
#[derive(Debug, Serialize, Deserialize)]
pub struct Bezier {
    elements: Vec<Curve>,
    /// Fill and stroke used when the path is drawn.
    #[serde(default)]
    pub style: PenStyle,
    /// Transform inherited from the context at creation.
    #[serde(default)]
    pub transform: Transform,
    #[serde(default)]
    pub transform_mode: TransformMode,
    /// Close the path when its authoring scope ends.
    #[serde(default)]
    pub autoclose: bool,
    /// Draw the path when its authoring scope ends.
    #[serde(default)]
    pub autodraw: bool,
    /// Linear pieces per curve when measuring lengths.
    #[serde(default = "default_subdivisions")]
    pub subdivisions: usize,
    #[serde(default)]
    finished: bool,
    /// Relative segment lengths, keyed by the subdivision count. `None` = dirty.
    #[serde(skip)]
    segment_cache: RwLock<Option<(usize, Vec<f64>)>>,
}

impl Clone for Bezier {
    fn clone(&self) -> Self {
        Self {
            elements: self.elements.clone(),
            style: self.style.clone(),
            transform: self.transform.clone(),
            transform_mode: self.transform_mode,
            autoclose: self.autoclose,
            autodraw: self.autodraw,
            subdivisions: self.subdivisions,
            finished: self.finished,
            segment_cache: RwLock::new(self.segment_cache.read().ok().and_then(|g| g.clone())),
        }
    }
}

impl PartialEq for Bezier {
    fn eq(&self, other: &Self) -> bool {
        self.elements == other.elements
            && self.style == other.style
            && self.transform == other.transform
            && self.transform_mode == other.transform_mode
    }
}

impl Default for Bezier {
    fn default() -> Self {
        Self::new()
    }
}

impl Bezier {
    /// Create an empty path with default style.
    pub fn new() -> Self {
        Self {
            elements: Vec::new(),
            style: PenStyle::default(),
            transform: Transform::new(),
            transform_mode: TransformMode::default(),
            autoclose: false,
            autodraw: false,
            subdivisions: DEFAULT_SUBDIVISIONS,
            finished: false,
            segment_cache: RwLock::new(None),
        }
    }

    /// Wrap an existing element list.
    pub fn from_elements(elements: Vec<Curve>) -> Self {
        Self {
            elements,
            ..Self::new()
        }
    }

    /// Build a path from points and curves (see [`Bezier::extend`]).
    pub fn from_items<I>(items: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<PathItem>,
    {
        let mut path = Self::new();
        path.extend(items);
        path
    }

    pub fn with_style(mut self, style: PenStyle) -> Self {
        self.style = style;
        self
    }

    pub fn elements(&self) -> &[Curve] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Curve> {
        self.elements.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Curve> {
        self.elements.iter()
    }

    /// Whether the path's authoring scope has ended.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub(crate) fn finish(&mut self) {
        self.finished = true;
    }

    /// Drop the cached segment lengths.
    pub fn invalidate(&self) {
        if let Ok(mut cache) = self.segment_cache.write() {
            *cache = None;
        }
    }

    fn push(&mut self, curve: Curve) {
        self.elements.push(curve);
        self.invalidate();
    }

    fn ensure_started(&mut self) {
        if self.elements.is_empty() {
            self.elements.push(Curve::MoveTo(Point::ZERO));
        }
    }

    pub fn move_to(&mut self, x: f64, y: f64) {
        self.push(Curve::MoveTo(Point::new(x, y)));
    }

    /// Draw a line to `(x, y)`. An empty path first moves to the origin.
    pub fn line_to(&mut self, x: f64, y: f64) {
        self.ensure_started();
        self.push(Curve::LineTo(Point::new(x, y)));
    }

    /// Draw a cubic curve. An empty path first moves to the origin.
    pub fn curve_to(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, x3: f64, y3: f64) {
        self.ensure_started();
        self.push(Curve::CurveTo {
            ctrl1: Point::new(x1, y1),
            ctrl2: Point::new(x2, y2),
            end: Point::new(x3, y3),
        });
    }

    pub fn close_path(&mut self) {
        self.push(Curve::Close);
    }

    /// Append points and curves. A bare point moves when the path is empty and draws a
    /// line otherwise; curves go through [`Bezier::append`].
    pub fn extend<I>(&mut self, items: I)
    where
        I: IntoIterator,
        I::Item: Into<PathItem>,
    {
        for item in items {
            match item.into() {
                PathItem::Point(p) if self.elements.is_empty() => self.move_to(p.x, p.y),
                PathItem::Point(p) => self.line_to(p.x, p.y),
                PathItem::Curve(c) => self.append(c),
            }
        }
    }

    /// Append a single element through the matching primitive, so a line or curve on
    /// an empty path still starts with a move to the origin.
    pub fn append(&mut self, curve: Curve) {
        match curve {
            Curve::MoveTo(p) => self.move_to(p.x, p.y),
            Curve::LineTo(p) => self.line_to(p.x, p.y),
            Curve::CurveTo { ctrl1, ctrl2, end } => {
                self.curve_to(ctrl1.x, ctrl1.y, ctrl2.x, ctrl2.y, end.x, end.y)
            }
            Curve::Close => self.close_path(),
        }
    }

    /// Map every element through `affine` in place.
    pub fn apply_transform(&mut self, affine: Affine) {
        for el in &mut self.elements {
            *el = el.transformed(affine);
        }
        self.invalidate();
    }

    /// Export as a kurbo path; every subpath starts with a move.
    pub fn to_bez_path(&self) -> BezPath {
        pathmath::to_bez_path(&self.elements)
    }

    /// Bounding box of the path. An empty path has a zero region.
    pub fn bounds(&self) -> Region {
        pathmath::bounds(&self.elements)
            .map(Region::from)
            .unwrap_or_default()
    }

    /// Whether `(x, y)` lies inside the path under its fill rule.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        let polys = boolean::flatten(&self.elements, CONTAINS_FLATNESS);
        let winding = boolean::winding(&polys, Point::new(x, y));
        self.style.fill_rule.is_inside(winding)
    }

    /// Segment lengths with curves measured in `n` pieces.
    ///
    /// Relative tables are cached until the path changes; absolute lengths are
    /// recomputed every call.
    pub fn segment_lengths(&self, relative: bool, n: usize) -> Vec<f64> {
        if !relative {
            return pathmath::segment_lengths(&self.elements, false, n);
        }
        if let Some(cached) = self.cached_lengths(n) {
            return cached;
        }
        let lengths = pathmath::segment_lengths(&self.elements, true, n);
        if let Ok(mut cache) = self.segment_cache.write() {
            *cache = Some((n, lengths.clone()));
        }
        lengths
    }

    fn cached_lengths(&self, n: usize) -> Option<Vec<f64>> {
        let cache = self.segment_cache.read().ok()?;
        match cache.as_ref() {
            Some((key, lengths)) if *key == n => Some(lengths.clone()),
            _ => None,
        }
    }

    fn relative_lengths(&self) -> Vec<f64> {
        self.segment_lengths(true, self.subdivisions)
    }

    /// Total path length.
    pub fn length(&self) -> f64 {
        pathmath::length(&self.elements, self.subdivisions)
    }

    /// Point at parameter `t` in `[0, 1]`, spaced by arc length.
    pub fn point(&self, t: f64) -> PathResult<Point> {
        pathmath::point(&self.elements, t, &self.relative_lengths())
    }

    /// Element at parameter `t`: a line-to, or a curve-to carrying the split handles.
    pub fn element_at(&self, t: f64) -> PathResult<Curve> {
        pathmath::element_at(&self.elements, t, &self.relative_lengths())
    }

    /// `amount` points evenly spaced from `t = 0` to `t = 1` inclusive.
    ///
    /// The iterator is lazy and can be cloned to walk the points again.
    pub fn points(&self, amount: usize) -> PathResult<Points> {
        if self.elements.is_empty() {
            return Err(PathError::EmptyPath);
        }
        Ok(Points {
            segments: pathmath::segments(&self.elements),
            relative: self.relative_lengths(),
            first: pathmath::first_point(&self.elements),
            amount,
            index: 0,
        })
    }

    /// Insert an on-curve point at `t` without changing the path's shape.
    pub fn add_point(&mut self, t: f64) {
        let relative = self.relative_lengths();
        match pathmath::insert_point(&self.elements, t, &relative) {
            Some(elements) => {
                self.elements = elements;
                self.invalidate();
            }
            None => log::warn!("add_point({}) on a path without length, ignored", t),
        }
    }

    /// Move and rescale the path to the given position and size.
    ///
    /// Omitted coordinates keep the current origin and an omitted dimension leaves
    /// its axis unscaled. With both dimensions and `stretch == false` the aspect
    /// ratio is kept by scaling with the smaller ratio.
    pub fn fit(
        &mut self,
        x: Option<f64>,
        y: Option<f64>,
        width: Option<f64>,
        height: Option<f64>,
        stretch: bool,
    ) {
        let bounds = self.bounds();
        let (px, py) = (bounds.x(), bounds.y());
        let ratio = |target: Option<f64>, extent: f64| match target {
            Some(_) if extent == 0.0 => {
                log::warn!("fit() on a path with zero extent, axis left unscaled");
                None
            }
            Some(target) => Some(target / extent),
            None => None,
        };
        let (sx, sy) = match (ratio(width, bounds.width()), ratio(height, bounds.height())) {
            (Some(sx), Some(sy)) if !stretch => {
                let s = sx.min(sy);
                (s, s)
            }
            (sx, sy) => (sx.unwrap_or(1.0), sy.unwrap_or(1.0)),
        };
        let affine = Affine::translate((x.unwrap_or(px), y.unwrap_or(py)))
            * Affine::scale_non_uniform(sx, sy)
            * Affine::translate((-px, -py));
        self.apply_transform(affine);
    }

    /// Split into one path per subpath, each carrying this path's style.
    pub fn contours(&self) -> Vec<Bezier> {
        pathmath::contours(&self.elements)
            .into_iter()
            .map(|elements| self.derive(elements))
            .collect()
    }

    /// A new path with this path's style, transform and flags.
    fn derive(&self, elements: Vec<Curve>) -> Bezier {
        Bezier {
            elements,
            style: self.style.clone(),
            transform: self.transform.clone(),
            transform_mode: self.transform_mode,
            autoclose: self.autoclose,
            autodraw: false,
            subdivisions: self.subdivisions,
            finished: false,
            segment_cache: RwLock::new(None),
        }
    }

    fn combine(&self, op: boolean::BooleanOp, other: &Bezier, flatness: f64) -> Bezier {
        let a = boolean::Operand::new(&self.elements, self.style.fill_rule);
        let b = boolean::Operand::new(&other.elements, other.style.fill_rule);
        self.derive(boolean::combine(op, a, b, flatness))
    }

    /// Region covered by either path.
    pub fn union(&self, other: &Bezier, flatness: f64) -> Bezier {
        self.combine(boolean::BooleanOp::Union, other, flatness)
    }

    /// Region covered by both paths.
    pub fn intersect(&self, other: &Bezier, flatness: f64) -> Bezier {
        self.combine(boolean::BooleanOp::Intersect, other, flatness)
    }

    /// Region covered by this path but not `other`.
    pub fn difference(&self, other: &Bezier, flatness: f64) -> Bezier {
        self.combine(boolean::BooleanOp::Difference, other, flatness)
    }

    /// Region covered by exactly one of the paths.
    pub fn xor(&self, other: &Bezier, flatness: f64) -> Bezier {
        self.combine(boolean::BooleanOp::Xor, other, flatness)
    }

    /// Whether the two filled regions overlap or touch.
    pub fn intersects(&self, other: &Bezier) -> bool {
        boolean::intersects(
            boolean::Operand::new(&self.elements, self.style.fill_rule),
            boolean::Operand::new(&other.elements, other.style.fill_rule),
            DEFAULT_FLATNESS,
        )
    }

    /// The inherited transform as drawn: pivoted on the bounds' centre in
    /// [`TransformMode::Center`], applied as-is in [`TransformMode::Corner`].
    pub fn resolved_transform(&self) -> Affine {
        let matrix = self.transform.affine();
        match self.transform_mode {
            TransformMode::Corner => matrix,
            TransformMode::Center => {
                let c = self.bounds().center().to_vec2();
                Affine::translate(c) * matrix * Affine::translate(-c)
            }
        }
    }
}

impl Transformable for Bezier {
    fn transformed(&self, affine: Affine) -> Self {
        let mut path = self.clone();
        path.apply_transform(affine);
        path
    }
}

impl<'a> IntoIterator for &'a Bezier {
    type Item = &'a Curve;
    type IntoIter = std::slice::Iter<'a, Curve>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

impl From<Vec<Curve>> for Bezier {
    fn from(elements: Vec<Curve>) -> Self {
        Self::from_elements(elements)
    }
}

impl From<&BezPath> for Bezier {
    /// Quadratic segments are raised to cubics.
    fn from(path: &BezPath) -> Self {
        let mut elements = Vec::with_capacity(path.elements().len());
        let mut current = Point::ZERO;
        let mut start = Point::ZERO;
        for el in path.elements() {
            let curve = match *el {
                PathEl::MoveTo(p) => {
                    start = p;
                    Curve::MoveTo(p)
                }
                PathEl::LineTo(p) => Curve::LineTo(p),
                PathEl::QuadTo(q, end) => Curve::CurveTo {
                    ctrl1: current.lerp(q, 2.0 / 3.0),
                    ctrl2: end.lerp(q, 2.0 / 3.0),
                    end,
                },
                PathEl::CurveTo(ctrl1, ctrl2, end) => Curve::CurveTo { ctrl1, ctrl2, end },
                PathEl::ClosePath => Curve::Close,
            };
            current = match curve {
                Curve::Close => start,
                other => other.end(),
            };
            elements.push(curve);
        }
        Self::from_elements(elements)
    }
}

impl From<BezPath> for Bezier {
    fn from(path: BezPath) -> Self {
        Self::from(&path)
    }
}

/// Evenly spaced points along a path, from [`Bezier::points`].
#[derive(Debug, Clone)]
pub struct Points {
    segments: Vec<Segment>,
    relative: Vec<f64>,
    first: Point,
    amount: usize,
    index: usize,
}

impl Points {
    fn at(&self, index: usize) -> Point {
        let t = if self.amount > 1 {
            index as f64 / (self.amount - 1) as f64
        } else {
            0.0
        };
        match pathmath::locate(&self.relative, t) {
            Some((i, local)) => self.segments[i].eval(local),
            None => self.first,
        }
    }
}

impl Iterator for Points {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        if self.index >= self.amount {
            return None;
        }
        let p = self.at(self.index);
        self.index += 1;
        Some(p)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.amount - self.index;
        (left, Some(left))
    }
}

impl ExactSizeIterator for Points {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::FillRule;

    fn straight() -> Bezier {
        let mut path = Bezier::new();
        path.move_to(0.0, 0.0);
        path.line_to(10.0, 0.0);
        path
    }

    fn square(x: f64, y: f64, size: f64) -> Bezier {
        let mut path = Bezier::new();
        path.move_to(x, y);
        path.line_to(x + size, y);
        path.line_to(x + size, y + size);
        path.line_to(x, y + size);
        path.close_path();
        path
    }

    #[test]
    fn test_one_element_per_primitive() {
        let mut path = Bezier::new();
        path.move_to(0.0, 0.0);
        path.line_to(1.0, 1.0);
        path.curve_to(1.0, 2.0, 2.0, 2.0, 3.0, 1.0);
        path.close_path();
        assert_eq!(path.len(), 4);
        assert_eq!(path.get(3), Some(&Curve::Close));
    }

    #[test]
    fn test_line_to_on_empty_moves_to_origin() {
        let mut path = Bezier::new();
        path.line_to(5.0, 5.0);
        assert_eq!(
            path.elements(),
            &[Curve::MoveTo(Point::ZERO), Curve::LineTo(Point::new(5.0, 5.0))]
        );
        let mut path = Bezier::new();
        path.curve_to(0.0, 1.0, 1.0, 1.0, 1.0, 0.0);
        assert_eq!(path.len(), 2);
    }

    #[test]
    fn test_append_on_empty_moves_to_origin() {
        let mut path = Bezier::new();
        path.append(Curve::LineTo(Point::new(5.0, 5.0)));
        assert_eq!(
            path.elements(),
            &[Curve::MoveTo(Point::ZERO), Curve::LineTo(Point::new(5.0, 5.0))]
        );
        assert!((path.length() - 50f64.sqrt()).abs() < 1e-9);

        let mut path = Bezier::new();
        path.extend([Curve::LineTo(Point::new(3.0, 4.0))]);
        assert_eq!(path.len(), 2);
        assert!((path.length() - 5.0).abs() < 1e-9);

        let mut path = Bezier::new();
        path.append(Curve::CurveTo {
            ctrl1: Point::new(0.0, 1.0),
            ctrl2: Point::new(1.0, 1.0),
            end: Point::new(1.0, 0.0),
        });
        assert_eq!(path.elements()[0], Curve::MoveTo(Point::ZERO));
        assert_eq!(path.len(), 2);
    }

    #[test]
    fn test_extend_points_and_curves() {
        let mut path = Bezier::new();
        path.extend([(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)]);
        path.extend([Curve::Close]);
        assert_eq!(path.elements()[0], Curve::MoveTo(Point::ZERO));
        assert_eq!(path.elements()[2], Curve::LineTo(Point::new(10.0, 10.0)));
        assert_eq!(path.len(), 4);
        let copy = Bezier::from_items(path.iter().copied());
        assert_eq!(copy.elements(), path.elements());
    }

    #[test]
    fn test_empty_path_queries() {
        let path = Bezier::new();
        assert_eq!(path.bounds(), Region::default());
        assert_eq!(path.length(), 0.0);
        assert_eq!(path.point(0.5), Err(PathError::EmptyPath));
        assert!(matches!(path.points(3), Err(PathError::EmptyPath)));
        assert!(!path.contains(0.0, 0.0));
    }

    #[test]
    fn test_length_and_endpoints() {
        let path = straight();
        assert!((path.length() - 10.0).abs() < 1e-9);
        assert_eq!(path.point(0.0), Ok(Point::new(0.0, 0.0)));
        assert_eq!(path.point(1.0), Ok(Point::new(10.0, 0.0)));
    }

    #[test]
    fn test_points_even_spacing() {
        let path = straight();
        let xs: Vec<f64> = path.points(4).unwrap().map(|p| p.x).collect();
        assert_eq!(xs.len(), 4);
        for (x, expected) in xs.iter().zip([0.0, 10.0 / 3.0, 20.0 / 3.0, 10.0]) {
            assert!((x - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn test_points_single_and_restartable() {
        let path = straight();
        let one: Vec<Point> = path.points(1).unwrap().collect();
        assert_eq!(one, vec![Point::new(0.0, 0.0)]);
        let points = path.points(3).unwrap();
        assert_eq!(points.len(), 3);
        let again = points.clone();
        assert_eq!(points.collect::<Vec<_>>(), again.collect::<Vec<_>>());
        assert_eq!(path.points(0).unwrap().count(), 0);
    }

    #[test]
    fn test_segment_cache_invalidated_by_mutation() {
        let mut path = straight();
        assert_eq!(path.segment_lengths(true, 10), vec![1.0]);
        assert!(path.cached_lengths(10).is_some());
        assert!(path.cached_lengths(20).is_none());
        path.line_to(10.0, 10.0);
        assert!(path.cached_lengths(10).is_none());
        assert_eq!(path.segment_lengths(true, 10), vec![0.5, 0.5]);
        assert_eq!(path.segment_lengths(false, 10), vec![10.0, 10.0]);
    }

    #[test]
    fn test_clone_keeps_cache() {
        let path = straight();
        path.segment_lengths(true, 10);
        let copy = path.clone();
        assert_eq!(copy.cached_lengths(10), Some(vec![1.0]));
        assert_eq!(copy, path);
    }

    #[test]
    fn test_add_point() {
        let mut path = straight();
        path.add_point(0.25);
        assert_eq!(path.len(), 3);
        assert_eq!(path.elements()[1], Curve::LineTo(Point::new(2.5, 0.0)));
        assert!((path.length() - 10.0).abs() < 1e-9);

        // zero-length paths are left alone
        let mut dot = Bezier::new();
        dot.move_to(1.0, 1.0);
        dot.add_point(0.5);
        assert_eq!(dot.len(), 1);
    }

    #[test]
    fn test_contains_honours_fill_rule() {
        let mut path = square(0.0, 0.0, 30.0);
        path.extend(square(10.0, 10.0, 10.0).iter().copied());
        assert!(path.contains(15.0, 15.0));
        assert!(path.contains(5.0, 5.0));
        path.style.fill_rule = FillRule::EvenOdd;
        assert!(!path.contains(15.0, 15.0));
        assert!(path.contains(5.0, 5.0));
        assert!(!path.contains(40.0, 5.0));
    }

    #[test]
    fn test_fit_keeps_aspect() {
        let mut path = square(10.0, 10.0, 10.0);
        path.fit(Some(0.0), Some(0.0), Some(100.0), Some(50.0), false);
        assert_eq!(path.bounds(), Region::new(0.0, 0.0, 50.0, 50.0));
    }

    #[test]
    fn test_fit_stretch() {
        let mut path = square(10.0, 10.0, 10.0);
        path.fit(Some(0.0), Some(0.0), Some(100.0), Some(50.0), true);
        assert_eq!(path.bounds(), Region::new(0.0, 0.0, 100.0, 50.0));
    }

    #[test]
    fn test_fit_single_dimension() {
        let mut path = square(10.0, 10.0, 10.0);
        path.fit(None, Some(0.0), Some(40.0), None, false);
        assert_eq!(path.bounds(), Region::new(10.0, 0.0, 40.0, 10.0));
    }

    #[test]
    fn test_fit_zero_extent_axis() {
        let mut path = straight();
        path.fit(None, None, Some(20.0), Some(20.0), false);
        assert_eq!(path.bounds(), Region::new(0.0, 0.0, 20.0, 0.0));
    }

    #[test]
    fn test_contours_keep_style() {
        let mut path = square(0.0, 0.0, 10.0);
        path.extend(square(20.0, 0.0, 10.0).iter().copied());
        path.style.stroke_width = 7.0;
        let parts = path.contours();
        assert_eq!(parts.len(), 2);
        assert!(parts.iter().all(|p| p.style.stroke_width == 7.0));
        assert_eq!(parts[1].bounds(), Region::new(20.0, 0.0, 10.0, 10.0));
    }

    #[test]
    fn test_disjoint_union() {
        let a = square(0.0, 0.0, 10.0);
        let b = square(20.0, 0.0, 10.0);
        let union = a.union(&b, DEFAULT_FLATNESS);
        assert_eq!(union.bounds(), a.bounds().union(&b.bounds()));
        assert!(!a.intersects(&b));
        assert!(a.intersect(&b, DEFAULT_FLATNESS).is_empty());
    }

    #[test]
    fn test_overlapping_booleans() {
        let a = square(0.0, 0.0, 10.0);
        let b = square(5.0, 5.0, 10.0);
        assert!(a.intersects(&b));
        assert_eq!(a.union(&b, 0.6).bounds(), Region::new(0.0, 0.0, 15.0, 15.0));
        assert_eq!(a.intersect(&b, 0.6).bounds(), Region::new(5.0, 5.0, 5.0, 5.0));
        let diff = a.difference(&b, 0.6);
        assert!(diff.contains(2.0, 2.0));
        assert!(!diff.contains(7.0, 7.0));
        let xor = a.xor(&b, 0.6);
        assert!(xor.contains(12.0, 12.0));
        assert!(!xor.contains(7.0, 7.0));
    }

    #[test]
    fn test_resolved_transform_center() {
        let mut path = square(0.0, 0.0, 10.0);
        path.transform.rotate(90.0);
        let m = path.resolved_transform();
        // the centre is a fixed point
        let c = m * Point::new(5.0, 5.0);
        assert!((c.x - 5.0).abs() < 1e-9 && (c.y - 5.0).abs() < 1e-9);
        path.transform_mode = TransformMode::Corner;
        let o = path.resolved_transform() * Point::new(0.0, 0.0);
        assert!(o.x.abs() < 1e-9 && o.y.abs() < 1e-9);
    }

    #[test]
    fn test_transformable() {
        let path = straight();
        let mut t = Transform::new();
        t.translate(0.0, 5.0);
        let moved = t.apply(&path);
        assert_eq!(moved.point(1.0), Ok(Point::new(10.0, 5.0)));
        assert_eq!(path.point(1.0), Ok(Point::new(10.0, 0.0)));
    }

    #[test]
    fn test_from_bez_path_raises_quads() {
        let mut bez = BezPath::new();
        bez.move_to((0.0, 0.0));
        bez.quad_to((5.0, 10.0), (10.0, 0.0));
        bez.close_path();
        let path = Bezier::from(&bez);
        assert_eq!(path.len(), 3);
        match path.elements()[1] {
            Curve::CurveTo { ctrl1, ctrl2, end } => {
                assert!((ctrl1.y - 20.0 / 3.0).abs() < 1e-9);
                assert!((ctrl2.x - 20.0 / 3.0).abs() < 1e-9);
                assert_eq!(end, Point::new(10.0, 0.0));
            }
            other => panic!("expected a curve, got {:?}", other),
        }
        assert_eq!(path.to_bez_path().elements().len(), 3);
    }

    #[test]
    fn test_serde_roundtrip() {
        let mut path = square(0.0, 0.0, 10.0);
        path.style.stroke_width = 3.0;
        path.transform.translate(4.0, 2.0);
        let json = serde_json::to_string(&path).unwrap();
        let back: Bezier = serde_json::from_str(&json).unwrap();
        assert_eq!(back, path);
        assert_eq!(back.subdivisions, DEFAULT_SUBDIVISIONS);
    }
}
