//! Path math: arc lengths, parameter lookup, point insertion and contour splitting.
//!
//! Everything here is a pure function over a slice of [`Curve`] elements. Element
//! `i >= 1` of a path produces segment `i - 1`, running from the current point to the
//! element's endpoint. A close segment runs back to the subpath start.

pub mod boolean;

use crate::curve::Curve;
use crate::error::{PathError, PathResult};
use crate::geometry::Point;
use kurbo::{BezPath, CubicBez, ParamCurve, ParamCurveExtrema, PathEl, Rect};

/// One drawable (or jumping) piece of a path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Segment {
    /// A move: zero length, lands on `to`.
    Jump { to: Point },
    Line { from: Point, to: Point, closing: bool },
    Cubic(CubicBez),
}

impl Segment {
    /// Approximate arc length using `n` linear pieces for cubics.
    pub(crate) fn length(&self, n: usize) -> f64 {
        match *self {
            Segment::Jump { .. } => 0.0,
            Segment::Line { from, to, .. } => from.distance(to),
            Segment::Cubic(c) => {
                let n = n.max(1);
                let mut prev = c.p0;
                let mut total = 0.0;
                for i in 1..=n {
                    let p = c.eval(i as f64 / n as f64);
                    total += prev.distance(p);
                    prev = p;
                }
                total
            }
        }
    }

    pub(crate) fn eval(&self, t: f64) -> Point {
        match *self {
            Segment::Jump { to } => to,
            Segment::Line { to, .. } if t >= 1.0 => to,
            Segment::Line { from, to, .. } => from.lerp(to, t),
            Segment::Cubic(c) => c.eval(t),
        }
    }
}

/// Build the segment list for a path.
pub(crate) fn segments(elements: &[Curve]) -> Vec<Segment> {
    let mut out = Vec::with_capacity(elements.len().saturating_sub(1));
    let mut current = Point::ZERO;
    let mut start = Point::ZERO;
    for (i, el) in elements.iter().enumerate() {
        if i == 0 {
            if !matches!(el, Curve::Close) {
                current = el.end();
                start = current;
            }
            continue;
        }
        match *el {
            Curve::MoveTo(p) => {
                out.push(Segment::Jump { to: p });
                current = p;
                start = p;
            }
            Curve::LineTo(p) => {
                out.push(Segment::Line {
                    from: current,
                    to: p,
                    closing: false,
                });
                current = p;
            }
            Curve::CurveTo { ctrl1, ctrl2, end } => {
                out.push(Segment::Cubic(CubicBez::new(current, ctrl1, ctrl2, end)));
                current = end;
            }
            Curve::Close => {
                out.push(Segment::Line {
                    from: current,
                    to: start,
                    closing: true,
                });
                current = start;
            }
        }
    }
    out
}

/// Convert elements to a kurbo path.
///
/// The output is normalised so every subpath opens with a move: drawing after a close
/// (or on a path that never moved) first moves to the current subpath start.
pub fn to_bez_path(elements: &[Curve]) -> BezPath {
    let mut path = BezPath::new();
    let mut start = Point::ZERO;
    let mut open = false;
    for el in elements {
        match *el {
            Curve::MoveTo(p) => {
                path.push(PathEl::MoveTo(p));
                start = p;
                open = true;
            }
            Curve::Close => {
                if open {
                    path.push(PathEl::ClosePath);
                    open = false;
                }
            }
            other => {
                if !open {
                    path.push(PathEl::MoveTo(start));
                    open = true;
                }
                path.push(other.into());
            }
        }
    }
    path
}

/// Length of every segment, subdividing curves into `n` pieces.
///
/// With `relative` set each length is a fraction of the total; a zero-length path
/// yields all zeros.
pub fn segment_lengths(elements: &[Curve], relative: bool, n: usize) -> Vec<f64> {
    let lengths: Vec<f64> = segments(elements).iter().map(|s| s.length(n)).collect();
    if !relative {
        return lengths;
    }
    let total: f64 = lengths.iter().sum();
    if total > 0.0 {
        lengths.iter().map(|l| l / total).collect()
    } else {
        vec![0.0; lengths.len()]
    }
}

/// Total length of a path.
pub fn length(elements: &[Curve], n: usize) -> f64 {
    segment_lengths(elements, false, n).iter().sum()
}

/// Tight bounds of the drawn segments, with curve extrema included.
///
/// A path that never draws is bounded by its move points; an empty path has none.
pub fn bounds(elements: &[Curve]) -> Option<Rect> {
    let drawn = segments(elements)
        .into_iter()
        .filter_map(|seg| match seg {
            Segment::Jump { .. } => None,
            Segment::Line { from, to, .. } => Some(Rect::from_points(from, to)),
            Segment::Cubic(c) => Some(ParamCurveExtrema::bounding_box(&c)),
        })
        .reduce(|a, b| a.union(b));
    drawn.or_else(|| {
        elements
            .iter()
            .filter(|el| !matches!(el, Curve::Close))
            .map(|el| Rect::from_points(el.end(), el.end()))
            .reduce(|a, b| a.union(b))
    })
}

/// Find the segment holding global parameter `t` and the local parameter within it.
///
/// Zero-length segments are never selected. Returns `None` when the path has no
/// length at all.
pub(crate) fn locate(relative: &[f64], t: f64) -> Option<(usize, f64)> {
    let last = relative.iter().rposition(|&l| l > 0.0)?;
    let mut t = t.clamp(0.0, 1.0);
    if t >= 1.0 {
        return Some((last, 1.0));
    }
    for (i, &l) in relative.iter().enumerate() {
        if l <= 0.0 {
            continue;
        }
        if t <= l || i == last {
            return Some((i, (t / l).clamp(0.0, 1.0)));
        }
        t -= l;
    }
    None
}

pub(crate) fn first_point(elements: &[Curve]) -> Point {
    elements.first().map(Curve::end).unwrap_or(Point::ZERO)
}

/// Coordinate at global parameter `t`, given the path's relative segment lengths.
pub fn point(elements: &[Curve], t: f64, relative: &[f64]) -> PathResult<Point> {
    if elements.is_empty() {
        return Err(PathError::EmptyPath);
    }
    let segs = segments(elements);
    match locate(relative, t) {
        Some((i, local)) => Ok(segs[i].eval(local)),
        None => {
            log::warn!("point({}) on a path without length, using its first point", t);
            Ok(first_point(elements))
        }
    }
}

/// Element describing the path at `t`: a line-to for straight pieces, or a curve-to
/// whose control points are the split handles either side of the point.
pub fn element_at(elements: &[Curve], t: f64, relative: &[f64]) -> PathResult<Curve> {
    if elements.is_empty() {
        return Err(PathError::EmptyPath);
    }
    let segs = segments(elements);
    let Some((i, local)) = locate(relative, t) else {
        return Ok(Curve::LineTo(first_point(elements)));
    };
    Ok(match segs[i] {
        Segment::Cubic(c) => {
            let left = c.subsegment(0.0..local);
            let right = c.subsegment(local..1.0);
            Curve::CurveTo {
                ctrl1: left.p2,
                ctrl2: right.p1,
                end: left.p3,
            }
        }
        seg => Curve::LineTo(seg.eval(local)),
    })
}

/// Return a copy of the path with an on-curve point inserted at `t`.
///
/// Lines are split in two, curves are subdivided so the shape is unchanged, and a
/// closing segment gains a line-to before the close. Returns `None` when the path has
/// no length to split.
pub fn insert_point(elements: &[Curve], t: f64, relative: &[f64]) -> Option<Vec<Curve>> {
    let segs = segments(elements);
    let (i, local) = locate(relative, t)?;
    let target = i + 1;

    let mut out = Vec::with_capacity(elements.len() + 1);
    out.extend_from_slice(&elements[..target]);
    match segs[i] {
        Segment::Cubic(c) => {
            let left = c.subsegment(0.0..local);
            let right = c.subsegment(local..1.0);
            out.push(Curve::CurveTo {
                ctrl1: left.p1,
                ctrl2: left.p2,
                end: left.p3,
            });
            out.push(Curve::CurveTo {
                ctrl1: right.p1,
                ctrl2: right.p2,
                end: c.p3,
            });
        }
        Segment::Line { closing, .. } => {
            out.push(Curve::LineTo(segs[i].eval(local)));
            if closing {
                out.push(Curve::Close);
            } else {
                out.push(elements[target]);
            }
        }
        Segment::Jump { .. } => out.push(elements[target]),
    }
    out.extend_from_slice(&elements[target + 1..]);
    Some(out)
}

/// Split a path into its subpaths. Subpaths consisting of a lone move are dropped.
pub fn contours(elements: &[Curve]) -> Vec<Vec<Curve>> {
    let mut out = Vec::new();
    let mut current: Vec<Curve> = Vec::new();
    let mut drawn = false;
    for el in elements {
        match el {
            Curve::MoveTo(_) => {
                if drawn {
                    out.push(std::mem::take(&mut current));
                }
                current.clear();
                drawn = false;
            }
            Curve::LineTo(_) | Curve::CurveTo { .. } => drawn = true,
            Curve::Close => {}
        }
        current.push(*el);
    }
    if drawn {
        out.push(current);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Vec<Curve> {
        vec![
            Curve::MoveTo(Point::new(0.0, 0.0)),
            Curve::LineTo(Point::new(10.0, 0.0)),
            Curve::LineTo(Point::new(10.0, 10.0)),
            Curve::LineTo(Point::new(0.0, 10.0)),
            Curve::Close,
        ]
    }

    #[test]
    fn test_segment_per_element_after_first() {
        let segs = segments(&square());
        assert_eq!(segs.len(), 4);
        assert!(matches!(segs[3], Segment::Line { closing: true, .. }));
    }

    #[test]
    fn test_segment_lengths() {
        let lengths = segment_lengths(&square(), false, 10);
        assert_eq!(lengths, vec![10.0, 10.0, 10.0, 10.0]);
        let relative = segment_lengths(&square(), true, 10);
        assert_eq!(relative, vec![0.25, 0.25, 0.25, 0.25]);
        assert_eq!(length(&square(), 10), 40.0);
    }

    #[test]
    fn test_move_contributes_zero() {
        let path = vec![
            Curve::MoveTo(Point::new(0.0, 0.0)),
            Curve::LineTo(Point::new(5.0, 0.0)),
            Curve::MoveTo(Point::new(100.0, 100.0)),
            Curve::LineTo(Point::new(100.0, 105.0)),
        ];
        assert_eq!(segment_lengths(&path, false, 10), vec![5.0, 0.0, 5.0]);
    }

    #[test]
    fn test_close_resets_current_point() {
        let mut path = square();
        path.push(Curve::LineTo(Point::new(0.0, -5.0)));
        let lengths = segment_lengths(&path, false, 10);
        assert_eq!(lengths[4], 5.0);
    }

    #[test]
    fn test_zero_length_relative() {
        let path = vec![Curve::MoveTo(Point::new(1.0, 1.0)), Curve::LineTo(Point::new(1.0, 1.0))];
        assert_eq!(segment_lengths(&path, true, 10), vec![0.0]);
        let rel = segment_lengths(&path, true, 10);
        assert_eq!(point(&path, 0.5, &rel), Ok(Point::new(1.0, 1.0)));
    }

    #[test]
    fn test_curve_length_of_straight_cubic() {
        let path = vec![
            Curve::MoveTo(Point::new(0.0, 0.0)),
            Curve::CurveTo {
                ctrl1: Point::new(10.0 / 3.0, 0.0),
                ctrl2: Point::new(20.0 / 3.0, 0.0),
                end: Point::new(10.0, 0.0),
            },
        ];
        assert!((length(&path, 10) - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_locate() {
        let rel = [0.25, 0.25, 0.25, 0.25];
        assert_eq!(locate(&rel, 0.0), Some((0, 0.0)));
        assert_eq!(locate(&rel, 0.5), Some((1, 1.0)));
        assert_eq!(locate(&rel, 1.0), Some((3, 1.0)));
        assert_eq!(locate(&[0.0, 0.0], 0.5), None);
        // zero-length segments are skipped
        assert_eq!(locate(&[0.0, 1.0, 0.0], 0.0), Some((1, 0.0)));
        assert_eq!(locate(&[0.0, 1.0, 0.0], 1.0), Some((1, 1.0)));
    }

    #[test]
    fn test_point_walks_the_outline() {
        let path = square();
        let rel = segment_lengths(&path, true, 10);
        assert_eq!(point(&path, 0.0, &rel), Ok(Point::new(0.0, 0.0)));
        assert_eq!(point(&path, 0.125, &rel), Ok(Point::new(5.0, 0.0)));
        assert_eq!(point(&path, 0.5, &rel), Ok(Point::new(10.0, 10.0)));
        assert_eq!(point(&path, 1.0, &rel), Ok(Point::new(0.0, 0.0)));
    }

    #[test]
    fn test_point_on_empty_path() {
        assert_eq!(point(&[], 0.5, &[]), Err(PathError::EmptyPath));
        assert_eq!(element_at(&[], 0.5, &[]), Err(PathError::EmptyPath));
    }

    #[test]
    fn test_insert_point_on_line() {
        let path = square();
        let rel = segment_lengths(&path, true, 10);
        let inserted = insert_point(&path, 0.125, &rel).unwrap();
        assert_eq!(inserted.len(), path.len() + 1);
        assert_eq!(inserted[1], Curve::LineTo(Point::new(5.0, 0.0)));
        assert_eq!(inserted[2], Curve::LineTo(Point::new(10.0, 0.0)));
    }

    #[test]
    fn test_insert_point_on_close() {
        let path = square();
        let rel = segment_lengths(&path, true, 10);
        let inserted = insert_point(&path, 0.875, &rel).unwrap();
        assert_eq!(inserted.len(), 6);
        assert_eq!(inserted[4], Curve::LineTo(Point::new(0.0, 5.0)));
        assert_eq!(inserted[5], Curve::Close);
    }

    #[test]
    fn test_insert_point_on_curve_keeps_shape() {
        let path = vec![
            Curve::MoveTo(Point::new(0.0, 0.0)),
            Curve::CurveTo {
                ctrl1: Point::new(0.0, 10.0),
                ctrl2: Point::new(10.0, 10.0),
                end: Point::new(10.0, 0.0),
            },
        ];
        let rel = segment_lengths(&path, true, 10);
        let inserted = insert_point(&path, 0.5, &rel).unwrap();
        assert_eq!(inserted.len(), 3);
        // the new on-curve point sits where the unsplit curve was evaluated
        let mid = point(&path, 0.5, &rel).unwrap();
        assert!(inserted[1].end().distance(mid) < 1e-9);
        assert_eq!(inserted[2].end(), Point::new(10.0, 0.0));
        // symmetric curve splits at its apex
        assert!((inserted[1].end().x - 5.0).abs() < 1e-9);
        assert!((inserted[1].end().y - 7.5).abs() < 1e-9);
    }

    #[test]
    fn test_element_at_curve_returns_handles() {
        let path = vec![
            Curve::MoveTo(Point::new(0.0, 0.0)),
            Curve::CurveTo {
                ctrl1: Point::new(0.0, 10.0),
                ctrl2: Point::new(10.0, 10.0),
                end: Point::new(10.0, 0.0),
            },
        ];
        let rel = segment_lengths(&path, true, 10);
        let el = element_at(&path, 0.5, &rel).unwrap();
        match el {
            Curve::CurveTo { ctrl1, ctrl2, end } => {
                assert!((ctrl1.y - end.y).abs() < 1e-9);
                assert!((ctrl2.y - end.y).abs() < 1e-9);
                assert!(ctrl1.x < end.x && end.x < ctrl2.x);
            }
            other => panic!("expected a curve element, got {:?}", other),
        }
    }

    #[test]
    fn test_to_bez_path_reopens_after_close() {
        let mut path = square();
        path.push(Curve::LineTo(Point::new(0.0, -5.0)));
        let bez = to_bez_path(&path);
        let els = bez.elements();
        assert_eq!(els.len(), 7);
        assert_eq!(els[5], PathEl::MoveTo(Point::new(0.0, 0.0)));
        assert_eq!(els[6], PathEl::LineTo(Point::new(0.0, -5.0)));
    }

    #[test]
    fn test_bounds() {
        assert_eq!(bounds(&[]), None);
        assert_eq!(bounds(&square()), Some(Rect::new(0.0, 0.0, 10.0, 10.0)));
        let lone = [Curve::MoveTo(Point::new(3.0, 4.0))];
        assert_eq!(bounds(&lone), Some(Rect::new(3.0, 4.0, 3.0, 4.0)));
        // control points of a curve lie outside its extrema
        let arch = [
            Curve::MoveTo(Point::new(0.0, 0.0)),
            Curve::CurveTo {
                ctrl1: Point::new(0.0, 10.0),
                ctrl2: Point::new(10.0, 10.0),
                end: Point::new(10.0, 0.0),
            },
        ];
        let b = bounds(&arch).unwrap();
        assert!((b.y1 - 7.5).abs() < 1e-9);
    }

    #[test]
    fn test_contours() {
        let mut path = square();
        path.push(Curve::MoveTo(Point::new(50.0, 50.0)));
        path.push(Curve::MoveTo(Point::new(20.0, 20.0)));
        path.push(Curve::LineTo(Point::new(30.0, 20.0)));
        let parts = contours(&path);
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0], square());
        assert_eq!(parts[1][0], Curve::MoveTo(Point::new(20.0, 20.0)));
        assert_eq!(parts[1].len(), 2);
    }
}
