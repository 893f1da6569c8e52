use geocore_types::{Line, Point, Ring, Segment};

use super::raycast::{raycast, RaycastResult};
use super::segment_intersect::segments_intersect;

/// Point-in-ring by parity, consulting only the edges the ring's
/// index reports for a query rect spanning from `p` out to the ring's
/// bounding rect in the ray's cast direction (rightward, matching
/// [`raycast`]'s `cross_x > point.x` test) at `p`'s height — any edge
/// that could register `In` or `On` for `p` has its bounding rect
/// overlapping this span; a degenerate point rect would instead only
/// match edges whose bounding box happens to straddle `p` on both
/// axes. If any reported edge classifies the point as `On`, the
/// result is decided immediately by `allow_on_edge`; otherwise hit iff
/// the number of `In` classifications is odd.
pub fn contains_point(ring: &Ring, p: Point, allow_on_edge: bool) -> bool {
    let max_x = ring.rect().max.x.max(p.x);
    let query = geocore_types::Rect::new(p, Point::new(max_x, p.y));
    let mut in_count = 0usize;
    let mut on_edge = false;

    ring.search(&query, |seg, _i| {
        match raycast(seg, p) {
            RaycastResult::On => {
                on_edge = true;
                false
            }
            RaycastResult::In => {
                in_count += 1;
                true
            }
            RaycastResult::Out => true,
        }
    });

    if on_edge {
        return allow_on_edge;
    }
    in_count % 2 == 1
}

/// True if `s` intersects any edge of `ring`; `allow_on_edge = false`
/// excludes intersections that are pure edge-touches (the segment
/// only grazes the boundary, with both of its own endpoints outside).
/// Also true if either endpoint of `s` lies strictly inside the ring.
pub fn intersects_segment(ring: &Ring, s: Segment, allow_on_edge: bool) -> bool {
    if contains_point(ring, s.a, false) || contains_point(ring, s.b, false) {
        return true;
    }

    let mut hit = false;
    ring.search(&s.rect(), |edge, _i| {
        if segments_intersect(s, edge) {
            if allow_on_edge || !touches_only(s, edge) {
                hit = true;
                return false;
            }
        }
        true
    });
    hit
}

/// True iff `s` and `edge` meet only at a shared endpoint or a
/// collinear overlap that does not cross — i.e. `s` does not pass
/// from one side of `edge`'s line to the other.
fn touches_only(s: Segment, edge: Segment) -> bool {
    let orient = |a: Point, b: Point, c: Point| (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x);
    let d1 = orient(edge.a, edge.b, s.a);
    let d2 = orient(edge.a, edge.b, s.b);
    // A proper crossing puts the two endpoints on strictly opposite sides.
    !(d1 > 0.0 && d2 < 0.0) && !(d1 < 0.0 && d2 > 0.0)
}

/// `s` is contained iff both endpoints are covered by the ring and no
/// edge is crossed; with `allow_on_edge = false` the segment must
/// additionally not lie along any edge.
pub fn contains_segment(ring: &Ring, s: Segment, allow_on_edge: bool) -> bool {
    if !contains_point(ring, s.a, true) || !contains_point(ring, s.b, true) {
        return false;
    }

    let mut ok = true;
    ring.search(&s.rect(), |edge, _i| {
        if segments_intersect(s, edge) {
            if !touches_only(s, edge) {
                ok = false;
                return false;
            }
            if !allow_on_edge && super::raycast::on_segment(edge.a, edge.b, s.a) && super::raycast::on_segment(edge.a, edge.b, s.b) {
                ok = false;
                return false;
            }
        }
        true
    });
    ok
}

/// Iterates `line`'s edges, short-circuiting on the first that is
/// intersected by `ring`, under `allow_on_edge`.
pub fn intersects_line(ring: &Ring, line: &Line, allow_on_edge: bool) -> bool {
    (0..line.num_segments()).any(|i| intersects_segment(ring, line.segment_at(i), allow_on_edge))
}

/// True iff every edge of `line` is contained by `ring`.
pub fn contains_line(ring: &Ring, line: &Line, allow_on_edge: bool) -> bool {
    (0..line.num_segments()).all(|i| contains_segment(ring, line.segment_at(i), allow_on_edge))
}

/// True iff every edge of `inner` is contained by `outer`.
pub fn contains_ring(outer: &Ring, inner: &Ring, allow_on_edge: bool) -> bool {
    (0..inner.num_segments()).all(|i| contains_segment(outer, inner.segment_at(i), allow_on_edge))
}

/// True iff any edge of `a` intersects `b`, short-circuiting.
pub fn intersects_ring(a: &Ring, b: &Ring, allow_on_edge: bool) -> bool {
    (0..a.num_segments()).any(|i| intersects_segment(b, a.segment_at(i), allow_on_edge))
}

/// Joint traversal of both rings' indices: for every pair of edges
/// `(edge_a, edge_b)` whose bounding rects intersect, invokes
/// `visit(edge_a, edge_b, index_a, index_b)`. Composable into
/// predicates and distance queries that need the actual pairs rather
/// than a single accumulated boolean.
///
/// Implemented as a search of `a` driven by `b`'s per-edge rects,
/// since both rings already expose `search(rect, visit)` against
/// their own index; there is no shared joint-index structure to
/// descend, so this is the nested form of the dual-tree join.
pub fn ring_ring_search(a: &Ring, b: &Ring, mut visit: impl FnMut(Segment, Segment, usize, usize) -> bool) -> bool {
    let mut cont = true;
    'outer: for i in 0..b.num_segments() {
        let edge_b = b.segment_at(i);
        let ok = a.search(&edge_b.rect(), |edge_a, idx_a| visit(edge_a, edge_b, idx_a, i));
        if !ok {
            cont = false;
            break 'outer;
        }
    }
    cont
}

#[cfg(test)]
mod test {
    use super::*;

    fn octagon() -> Ring {
        Ring::new(vec![
            Point::new(3.0, 0.0),
            Point::new(7.0, 0.0),
            Point::new(10.0, 3.0),
            Point::new(10.0, 7.0),
            Point::new(7.0, 10.0),
            Point::new(3.0, 10.0),
            Point::new(0.0, 7.0),
            Point::new(0.0, 3.0),
        ])
        .unwrap()
    }

    fn concave_l() -> Ring {
        Ring::new(vec![
            Point::new(0.0, 0.0),
            Point::new(4.0, 0.0),
            Point::new(4.0, 3.0),
            Point::new(3.0, 4.0),
            Point::new(1.0, 4.0),
            Point::new(0.0, 3.0),
        ])
        .unwrap()
    }

    #[test]
    fn octagon_pip_scenarios() {
        let ring = octagon();
        assert!(contains_point(&ring, Point::new(5.0, 5.0), true));
        assert!(contains_point(&ring, Point::new(5.0, 5.0), false));
        assert!(!contains_point(&ring, Point::new(0.0, 0.0), true));
        assert!(!contains_point(&ring, Point::new(0.0, 0.0), false));
        assert!(contains_point(&ring, Point::new(0.0, 5.0), true));
        assert!(!contains_point(&ring, Point::new(0.0, 5.0), false));
    }

    #[test]
    fn concave_l_intersects_and_contains_segment() {
        let ring = concave_l();
        let s = Segment::new(Point::new(2.0, 2.0), Point::new(2.0, 5.0));
        assert!(intersects_segment(&ring, s, true));
        assert!(!contains_segment(&ring, s, false));
    }

    #[test]
    fn on_edge_agreement_off_boundary() {
        let ring = octagon();
        let p = Point::new(5.0, 5.0);
        assert_eq!(contains_point(&ring, p, true), contains_point(&ring, p, false));
    }
}
