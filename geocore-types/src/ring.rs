use crate::config::IndexStrategy;
use crate::index::RectIndex;
use crate::{Error, Point, Rect, Segment, ShapeError};
use std::sync::Arc;

/// Storage shared by [`Ring`] and [`Line`](crate::Line): a contiguous
/// point sequence, its cached bounding rect, per-edge bounding rects
/// (the index's leaves), and the index itself. Memory size is fixed
/// for the value's lifetime — nothing here is mutated after
/// construction.
#[derive(Debug, Clone)]
pub(crate) struct PointSeq {
    points: Arc<[Point]>,
    rect: Rect,
    edge_rects: Arc<[Rect]>,
    // `RectIndex`'s `Natural`/`Ystripes` variants own nested `Vec`s
    // internally; Arc-wrapping here is what makes cloning a `Ring`
    // (and therefore `Line`/`Polygon`/`GeometryValue`) an O(1)
    // reference-count bump instead of a deep copy of the index.
    index: Arc<RectIndex>,
    convex: bool,
    clockwise: bool,
}

impl PointSeq {
    fn edges_from(points: &[Point]) -> Vec<Segment> {
        points
            .windows(2)
            .map(|w| Segment::new(w[0], w[1]))
            .collect()
    }

    fn build(points: Vec<Point>, strategy: IndexStrategy, compute_ring_metrics: bool) -> Self {
        let rect = points
            .iter()
            .fold(Rect::NONE, |acc, p| acc.expand_point(*p));
        let edge_rects: Vec<Rect> = Self::edges_from(&points).iter().map(Segment::rect).collect();
        let index = Arc::new(RectIndex::build(&edge_rects, strategy));
        let (convex, clockwise) = if compute_ring_metrics {
            ring_metrics(&points)
        } else {
            (false, false)
        };
        PointSeq {
            points: points.into(),
            rect,
            edge_rects: edge_rects.into(),
            index,
            convex,
            clockwise,
        }
    }

    #[inline]
    pub(crate) fn points_slice(&self) -> &[Point] {
        &self.points
    }

    #[inline]
    fn num_points(&self) -> usize {
        self.points.len()
    }

    #[inline]
    fn num_segments(&self) -> usize {
        self.points.len().saturating_sub(1)
    }

    #[inline]
    fn point_at(&self, i: usize) -> Point {
        self.points[i]
    }

    #[inline]
    fn segment_at(&self, i: usize) -> Segment {
        Segment::new(self.points[i], self.points[i + 1])
    }

    fn search(&self, query: &Rect, mut visit: impl FnMut(Segment, usize) -> bool) -> bool {
        self.index.search(&self.edge_rects, query, |i| visit(self.segment_at(i), i))
    }
}

/// Cached convexity + winding, computed once via the shoelace
/// cross-product sign (`orient2d`-equivalent, kept local rather than
/// pulled in from the algorithm crate since it is purely a
/// construction-time cached property).
fn ring_metrics(points: &[Point]) -> (bool, bool) {
    // points is closed: points[0] == points[len - 1].
    let n = points.len().saturating_sub(1);
    if n < 3 {
        return (false, false);
    }
    let mut signed_area2 = 0.0;
    for i in 0..n {
        let a = points[i];
        let b = points[i + 1];
        signed_area2 += a.x * b.y - b.x * a.y;
    }
    let clockwise = signed_area2 < 0.0;

    let mut convex = true;
    let mut sign = 0.0_f64;
    for i in 0..n {
        let prev = points[(i + n - 1) % n];
        let cur = points[i];
        let next = points[(i + 1) % n];
        let cross = (cur.x - prev.x) * (next.y - cur.y) - (cur.y - prev.y) * (next.x - cur.x);
        if cross == 0.0 {
            continue;
        }
        if sign == 0.0 {
            sign = cross;
        } else if sign.signum() != cross.signum() {
            convex = false;
            break;
        }
    }
    (convex, clockwise)
}

fn close_points(mut points: Vec<Point>) -> Vec<Point> {
    match (points.first(), points.last()) {
        (Some(first), Some(last)) if first != last => {
            let first = *first;
            points.push(first);
        }
        _ => {}
    }
    points
}

/// A closed planar polyline, immutable after construction.
///
/// If the caller's point sequence is not already closed, construction
/// implicitly closes it by repeating the first point. The bounding
/// rect, convexity flag, and winding flag are all computed once here
/// and cached for the ring's lifetime. Cloning is a reference-count
/// bump (`Arc`), so sharing a `Ring` across readers is free.
#[derive(Debug, Clone)]
pub struct Ring {
    inner: PointSeq,
}

impl Ring {
    /// Builds a ring using the process-wide default index strategy.
    pub fn new(points: Vec<Point>) -> Result<Ring, Error> {
        Ring::new_indexed(points, crate::config::get_default_index())
    }

    /// Builds a ring with an explicit index strategy, implicitly
    /// closing the point sequence and validating that at least 3
    /// distinct positions remain.
    pub fn new_indexed(points: Vec<Point>, strategy: IndexStrategy) -> Result<Ring, Error> {
        let closed = close_points(points);
        let distinct = closed.len().saturating_sub(1);
        if distinct < 3 {
            return Err(Error::Shape(ShapeError::RingTooShort { len: distinct }));
        }
        Ok(Ring {
            inner: PointSeq::build(closed, strategy, true),
        })
    }

    /// An empty ring: zero points, no index. Used internally to back
    /// [`crate::GeometryValue::Empty`]; not reachable through
    /// [`Ring::new`], which rejects point sequences this short.
    pub fn empty() -> Ring {
        Ring {
            inner: PointSeq::build(Vec::new(), IndexStrategy::None, false),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.inner.num_points() == 0
    }

    pub fn num_points(&self) -> usize {
        self.inner.num_points()
    }

    pub fn num_segments(&self) -> usize {
        self.inner.num_segments()
    }

    pub fn point_at(&self, i: usize) -> Point {
        self.inner.point_at(i)
    }

    pub fn segment_at(&self, i: usize) -> Segment {
        self.inner.segment_at(i)
    }

    pub fn rect(&self) -> Rect {
        self.inner.rect
    }

    pub fn convex(&self) -> bool {
        self.inner.convex
    }

    pub fn clockwise(&self) -> bool {
        self.inner.clockwise
    }

    /// Invokes `visit(segment, index)` for every edge whose bounding
    /// rect intersects `query`. See [`RectIndex::search`] for the
    /// equivalence guarantee across strategies.
    pub fn search(&self, query: &Rect, visit: impl FnMut(Segment, usize) -> bool) -> bool {
        self.inner.search(query, visit)
    }

    /// Signed polygon area via the shoelace formula, always reported
    /// non-negative (winding is queried separately via [`Ring::clockwise`]).
    pub fn area(&self) -> f64 {
        let n = self.num_segments();
        if n == 0 {
            return 0.0;
        }
        let mut acc = 0.0;
        for i in 0..n {
            let a = self.point_at(i);
            let b = self.point_at(i + 1);
            acc += a.x * b.y - b.x * a.y;
        }
        (acc / 2.0).abs()
    }

    pub fn perimeter(&self) -> f64 {
        (0..self.num_segments()).map(|i| self.segment_at(i).length()).sum()
    }

    /// `4*pi*area / perimeter^2`, in `[0, 1]`, `1` for a perfect disk.
    pub fn polsby_popper_score(&self) -> f64 {
        let perimeter = self.perimeter();
        if perimeter == 0.0 {
            return 0.0;
        }
        4.0 * std::f64::consts::PI * self.area() / (perimeter * perimeter)
    }
}

impl PartialEq for Ring {
    fn eq(&self, other: &Self) -> bool {
        self.inner.points.as_ref() == other.inner.points.as_ref()
    }
}

impl std::fmt::Display for Ring {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ring(")?;
        for (i, p) in self.inner.points_slice().iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{p}")?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::config::ContextGuard;

    fn square() -> Vec<Point> {
        vec![
            Point::new(0.0, 0.0),
            Point::new(4.0, 0.0),
            Point::new(4.0, 4.0),
            Point::new(0.0, 4.0),
        ]
    }

    #[test]
    fn implicit_closure() {
        let ring = Ring::new(square()).unwrap();
        assert_eq!(ring.num_points(), 5);
        assert_eq!(ring.point_at(0), ring.point_at(4));
    }

    #[test]
    fn too_short_is_an_error() {
        let err = Ring::new(vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)]).unwrap_err();
        assert!(matches!(err, Error::Shape(ShapeError::RingTooShort { .. })));
    }

    #[test]
    fn square_is_convex_with_known_area() {
        let ring = Ring::new(square()).unwrap();
        assert!(ring.convex());
        assert_eq!(ring.area(), 16.0);
        assert_eq!(ring.perimeter(), 16.0);
    }

    #[test]
    fn winding_direction_detected() {
        let ccw = Ring::new(square()).unwrap();
        let mut reversed = square();
        reversed.reverse();
        let cw = Ring::new(reversed).unwrap();
        assert_ne!(ccw.clockwise(), cw.clockwise());
    }

    #[test]
    fn concave_l_is_not_convex() {
        let l_shape = vec![
            Point::new(0.0, 0.0),
            Point::new(4.0, 0.0),
            Point::new(4.0, 3.0),
            Point::new(3.0, 4.0),
            Point::new(1.0, 4.0),
            Point::new(0.0, 3.0),
        ];
        let ring = Ring::new(l_shape).unwrap();
        assert!(!ring.convex());
    }

    #[test]
    fn display_lists_points_in_order() {
        let ring = Ring::new(square()).unwrap();
        assert_eq!(ring.to_string(), "ring((0, 0), (4, 0), (4, 4), (0, 4), (0, 0))");
    }

    #[test]
    fn clone_shares_the_index_instead_of_deep_copying_it() {
        let _guard = ContextGuard::capture();
        let many_points: Vec<Point> = (0..64)
            .map(|i| {
                let theta = 2.0 * std::f64::consts::PI * (i as f64) / 64.0;
                Point::new(theta.cos(), theta.sin())
            })
            .collect();
        let ring = Ring::new_indexed(many_points, IndexStrategy::Natural { spread: None }).unwrap();
        let cloned = ring.clone();
        assert!(Arc::ptr_eq(&ring.inner.index, &cloned.inner.index));
    }

    #[test]
    fn index_strategy_does_not_change_reported_rect() {
        let _guard = ContextGuard::capture();
        for strategy in [
            IndexStrategy::None,
            IndexStrategy::Natural { spread: Some(2) },
            IndexStrategy::Ystripes { spread: None },
        ] {
            let ring = Ring::new_indexed(square(), strategy).unwrap();
            assert_eq!(ring.rect(), Rect::new(Point::new(0.0, 0.0), Point::new(4.0, 4.0)));
        }
    }
}
