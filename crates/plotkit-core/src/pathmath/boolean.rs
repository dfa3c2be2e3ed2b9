//! Boolean operations on paths.
//!
//! Both operands are flattened to polygons. Every edge is split wherever it meets
//! another edge, each piece is classified by sampling the region just left and right
//! of it against both operands, and the pieces that separate "in the result" from
//! "outside" are chained back into closed contours. Output contours keep the result
//! region on their left, so holes run opposite to their outer contour and the path
//! reads the same under either fill rule.

use super::to_bez_path;
use crate::curve::Curve;
use crate::geometry::Point;
use crate::style::FillRule;
use kurbo::{PathEl, Rect, Vec2};
use std::collections::{HashMap, HashSet};
use std::f64::consts::TAU;

/// Smallest flattening tolerance accepted.
const MIN_FLATNESS: f64 = 1e-4;
/// Parametric slack when deciding whether a crossing is interior to an edge.
const PARAM_EPS: f64 = 1e-9;

/// Which region a boolean combination keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BooleanOp {
    Union,
    Intersect,
    Difference,
    Xor,
}

impl BooleanOp {
    fn keep(self, in_a: bool, in_b: bool) -> bool {
        match self {
            BooleanOp::Union => in_a || in_b,
            BooleanOp::Intersect => in_a && in_b,
            BooleanOp::Difference => in_a && !in_b,
            BooleanOp::Xor => in_a != in_b,
        }
    }
}

/// One side of a boolean operation.
#[derive(Debug, Clone, Copy)]
pub struct Operand<'a> {
    pub elements: &'a [Curve],
    pub fill_rule: FillRule,
}

impl<'a> Operand<'a> {
    pub fn new(elements: &'a [Curve], fill_rule: FillRule) -> Self {
        Self { elements, fill_rule }
    }
}

pub(crate) type Polygon = Vec<Point>;

/// Flatten a path into closed polygons (open subpaths are closed implicitly).
pub fn flatten(elements: &[Curve], flatness: f64) -> Vec<Polygon> {
    fn finish(polys: &mut Vec<Polygon>, current: &mut Polygon) {
        let mut poly = std::mem::take(current);
        poly.dedup();
        while poly.len() > 1 && poly.first() == poly.last() {
            poly.pop();
        }
        if poly.len() >= 3 {
            polys.push(poly);
        }
    }

    let mut polys = Vec::new();
    let mut current = Vec::new();
    kurbo::flatten(
        to_bez_path(elements),
        flatness.max(MIN_FLATNESS),
        |el| match el {
            PathEl::MoveTo(p) => {
                finish(&mut polys, &mut current);
                current.push(p);
            }
            PathEl::LineTo(p) => current.push(p),
            PathEl::ClosePath => finish(&mut polys, &mut current),
            PathEl::QuadTo(..) | PathEl::CurveTo(..) => {}
        },
    );
    finish(&mut polys, &mut current);
    polys
}

fn cross(a: Vec2, b: Vec2) -> f64 {
    a.x * b.y - a.y * b.x
}

/// Winding number of `p` against a set of closed polygons.
pub(crate) fn winding(polys: &[Polygon], p: Point) -> i32 {
    let mut w = 0;
    for poly in polys {
        for (i, &a) in poly.iter().enumerate() {
            let b = poly[(i + 1) % poly.len()];
            let side = cross(b - a, p - a);
            if a.y <= p.y {
                if b.y > p.y && side > 0.0 {
                    w += 1;
                }
            } else if b.y <= p.y && side < 0.0 {
                w -= 1;
            }
        }
    }
    w
}

fn polygon_bounds(polys: &[Polygon]) -> Option<Rect> {
    polys
        .iter()
        .flatten()
        .map(|&p| Rect::from_points(p, p))
        .reduce(|a, b| a.union(b))
}

fn edges(polys: &[Polygon]) -> impl Iterator<Item = (Point, Point)> + '_ {
    polys.iter().flat_map(|poly| {
        (0..poly.len()).map(move |i| (poly[i], poly[(i + 1) % poly.len()]))
    })
}

/// Record where edges `e` and `f` meet as cut points on each.
///
/// Crossings landing on an endpoint reuse that endpoint exactly, so both edges are
/// cut at bit-identical coordinates.
fn intersect_edges(
    e: (Point, Point),
    f: (Point, Point),
    cuts_e: &mut Vec<(f64, Point)>,
    cuts_f: &mut Vec<(f64, Point)>,
) {
    let (p, q) = (e.0, f.0);
    let (r, s) = (e.1 - e.0, f.1 - f.0);
    let rr = r.hypot2();
    let ss = s.hypot2();
    if rr == 0.0 || ss == 0.0 {
        return;
    }
    let interior = |t: f64| t > PARAM_EPS && t < 1.0 - PARAM_EPS;
    let within = |t: f64| (-PARAM_EPS..=1.0 + PARAM_EPS).contains(&t);
    let denom = cross(r, s);

    if denom.abs() <= 1e-12 * (rr * ss).sqrt() {
        // parallel: only collinear overlaps produce cuts
        if cross(q - p, r).abs() > 1e-9 * rr.sqrt() * (1.0 + (q - p).hypot()) {
            return;
        }
        for x in [f.0, f.1] {
            let t = (x - p).dot(r) / rr;
            if interior(t) {
                cuts_e.push((t, x));
            }
        }
        for x in [e.0, e.1] {
            let u = (x - q).dot(s) / ss;
            if interior(u) {
                cuts_f.push((u, x));
            }
        }
        return;
    }

    let t = cross(q - p, s) / denom;
    let u = cross(q - p, r) / denom;
    if !within(t) || !within(u) {
        return;
    }
    let at = if t <= PARAM_EPS {
        e.0
    } else if t >= 1.0 - PARAM_EPS {
        e.1
    } else if u <= PARAM_EPS {
        f.0
    } else if u >= 1.0 - PARAM_EPS {
        f.1
    } else {
        p + r * t
    };
    if interior(t) {
        cuts_e.push((t, at));
    }
    if interior(u) {
        cuts_f.push((u, at));
    }
}

/// Interns points, merging any that fall within `eps` of an existing vertex.
struct VertexPool {
    eps: f64,
    points: Vec<Point>,
    grid: HashMap<(i64, i64), Vec<usize>>,
}

impl VertexPool {
    fn new(eps: f64) -> Self {
        Self {
            eps,
            points: Vec::new(),
            grid: HashMap::new(),
        }
    }

    fn cell(&self, p: Point) -> (i64, i64) {
        ((p.x / self.eps).floor() as i64, (p.y / self.eps).floor() as i64)
    }

    fn intern(&mut self, p: Point) -> usize {
        let (cx, cy) = self.cell(p);
        for dx in -1..=1 {
            for dy in -1..=1 {
                if let Some(ids) = self.grid.get(&(cx + dx, cy + dy)) {
                    for &id in ids {
                        if self.points[id].distance(p) <= self.eps {
                            return id;
                        }
                    }
                }
            }
        }
        let id = self.points.len();
        self.points.push(p);
        self.grid.entry((cx, cy)).or_default().push(id);
        id
    }
}

/// Split every edge at all of its crossings; returns vertex-id pairs.
fn split_edges(all: &[(Point, Point)], pool: &mut VertexPool) -> Vec<(usize, usize)> {
    let mut cuts: Vec<Vec<(f64, Point)>> = vec![Vec::new(); all.len()];
    for i in 0..all.len() {
        for j in i + 1..all.len() {
            let (head, tail) = cuts.split_at_mut(j);
            intersect_edges(all[i], all[j], &mut head[i], &mut tail[0]);
        }
    }

    let mut pieces = Vec::new();
    for (edge, mut edge_cuts) in all.iter().zip(cuts) {
        edge_cuts.sort_by(|a, b| a.0.total_cmp(&b.0));
        let mut prev = pool.intern(edge.0);
        for (_, p) in edge_cuts {
            let id = pool.intern(p);
            if id != prev {
                pieces.push((prev, id));
                prev = id;
            }
        }
        let last = pool.intern(edge.1);
        if last != prev {
            pieces.push((prev, last));
        }
    }
    pieces
}

/// Walk directed edges into closed loops, turning as tightly left as possible at
/// shared vertices so touching regions come out as separate contours.
fn chain(edges: &[(usize, usize)], points: &[Point]) -> Vec<Polygon> {
    let mut outgoing: HashMap<usize, Vec<usize>> = HashMap::new();
    for (i, &(from, _)) in edges.iter().enumerate() {
        outgoing.entry(from).or_default().push(i);
    }
    let mut used = vec![false; edges.len()];
    let mut loops = Vec::new();

    for first in 0..edges.len() {
        if used[first] {
            continue;
        }
        used[first] = true;
        let origin = edges[first].0;
        let mut ring = vec![points[origin]];
        let mut current = first;
        loop {
            let (from, at) = edges[current];
            if at == origin {
                break;
            }
            let back = points[from] - points[at];
            let back_angle = back.y.atan2(back.x);
            let next = outgoing.get(&at).and_then(|candidates| {
                candidates
                    .iter()
                    .copied()
                    .filter(|&c| !used[c])
                    .map(|c| {
                        let d = points[edges[c].1] - points[at];
                        let mut turn = (back_angle - d.y.atan2(d.x)).rem_euclid(TAU);
                        if turn <= f64::EPSILON {
                            turn = TAU;
                        }
                        (c, turn)
                    })
                    .min_by(|a, b| a.1.total_cmp(&b.1))
                    .map(|(c, _)| c)
            });
            let Some(next) = next else {
                log::debug!("dropping open chain of {} points", ring.len());
                ring.clear();
                break;
            };
            ring.push(points[at]);
            used[next] = true;
            current = next;
        }
        simplify(&mut ring);
        if ring.len() >= 3 {
            loops.push(ring);
        }
    }
    loops
}

/// Drop vertices lying on a straight run between their neighbours.
fn simplify(ring: &mut Polygon) {
    let mut changed = true;
    while changed && ring.len() >= 3 {
        changed = false;
        let n = ring.len();
        for i in 0..n {
            let prev = ring[(i + n - 1) % n];
            let cur = ring[i];
            let next = ring[(i + 1) % n];
            let (a, b) = (cur - prev, next - cur);
            let scale = a.hypot() * b.hypot();
            if cross(a, b).abs() <= 1e-9 * scale && a.dot(b) > 0.0 {
                ring.remove(i);
                changed = true;
                break;
            }
        }
    }
}

/// Combine two paths, returning the outline of the resulting region.
pub fn combine(op: BooleanOp, a: Operand<'_>, b: Operand<'_>, flatness: f64) -> Vec<Curve> {
    let polys_a = flatten(a.elements, flatness);
    let polys_b = flatten(b.elements, flatness);
    let Some(bounds) = polygon_bounds(&polys_a)
        .into_iter()
        .chain(polygon_bounds(&polys_b))
        .reduce(|x, y| x.union(y))
    else {
        return Vec::new();
    };
    let scale = bounds
        .x0
        .abs()
        .max(bounds.x1.abs())
        .max(bounds.y0.abs())
        .max(bounds.y1.abs())
        .max(bounds.width())
        .max(bounds.height())
        .max(1.0);

    let all: Vec<(Point, Point)> = edges(&polys_a).chain(edges(&polys_b)).collect();
    let mut pool = VertexPool::new(scale * 1e-10);
    let pieces = split_edges(&all, &mut pool);

    let offset = scale * 1e-7;
    let inside = |p: Point| {
        let in_a = a.fill_rule.is_inside(winding(&polys_a, p));
        let in_b = b.fill_rule.is_inside(winding(&polys_b, p));
        op.keep(in_a, in_b)
    };

    let mut seen = HashSet::new();
    let mut kept = Vec::new();
    for (from, to) in pieces {
        let (p, q) = (pool.points[from], pool.points[to]);
        let d = q - p;
        let len = d.hypot();
        if len == 0.0 {
            continue;
        }
        let normal = Vec2::new(-d.y, d.x) / len * offset;
        let mid = p.midpoint(q);
        let left = inside(mid + normal);
        let right = inside(mid - normal);
        if left == right {
            continue;
        }
        let directed = if left { (from, to) } else { (to, from) };
        if seen.insert(directed) {
            kept.push(directed);
        }
    }

    let loops = chain(&kept, &pool.points);
    log::debug!(
        "{:?}: {} + {} polygons -> {} contours",
        op,
        polys_a.len(),
        polys_b.len(),
        loops.len()
    );

    let mut out = Vec::new();
    for ring in loops {
        out.push(Curve::MoveTo(ring[0]));
        out.extend(ring[1..].iter().map(|&p| Curve::LineTo(p)));
        out.push(Curve::Close);
    }
    out
}

/// Whether the filled regions of two paths overlap or touch.
pub fn intersects(a: Operand<'_>, b: Operand<'_>, flatness: f64) -> bool {
    let polys_a = flatten(a.elements, flatness);
    let polys_b = flatten(b.elements, flatness);
    let (Some(bounds_a), Some(bounds_b)) = (polygon_bounds(&polys_a), polygon_bounds(&polys_b))
    else {
        return false;
    };
    if bounds_a.x1 < bounds_b.x0
        || bounds_b.x1 < bounds_a.x0
        || bounds_a.y1 < bounds_b.y0
        || bounds_b.y1 < bounds_a.y0
    {
        return false;
    }

    let mut scratch_e = Vec::new();
    let mut scratch_f = Vec::new();
    for e in edges(&polys_a) {
        for f in edges(&polys_b) {
            if segments_touch(e, f, &mut scratch_e, &mut scratch_f) {
                return true;
            }
        }
    }

    polys_a
        .iter()
        .flatten()
        .any(|&p| b.fill_rule.is_inside(winding(&polys_b, p)))
        || polys_b
            .iter()
            .flatten()
            .any(|&p| a.fill_rule.is_inside(winding(&polys_a, p)))
}

fn segments_touch(
    e: (Point, Point),
    f: (Point, Point),
    scratch_e: &mut Vec<(f64, Point)>,
    scratch_f: &mut Vec<(f64, Point)>,
) -> bool {
    if e.0 == f.0 || e.0 == f.1 || e.1 == f.0 || e.1 == f.1 {
        return true;
    }
    scratch_e.clear();
    scratch_f.clear();
    intersect_edges(e, f, scratch_e, scratch_f);
    !scratch_e.is_empty() || !scratch_f.is_empty()
}
