use geocore_types::{Line, Point, Polygon};

use super::ring_ops::{contains_line, contains_point, contains_ring};

/// A point is covered by the polygon iff covered by the exterior ring
/// (edges count as covered) and not strictly interior to any hole
/// (edges of a hole count as still-covered by the polygon).
pub fn polygon_covers_point(polygon: &Polygon, p: Point) -> bool {
    if !contains_point(polygon.exterior(), p, true) {
        return false;
    }
    !polygon.holes().iter().any(|hole| contains_point(hole, p, false))
}

/// `exterior.intersects_line(l, allow_on_edge = true)` and no hole
/// fully contains `l` with `allow_on_edge = false` (a line entirely
/// swallowed by a hole does not intersect the polygon).
pub fn polygon_intersects_line(polygon: &Polygon, line: &Line) -> bool {
    if !super::ring_ops::intersects_line(polygon.exterior(), line, true) {
        return false;
    }
    !polygon.holes().iter().any(|hole| contains_line(hole, line, false))
}

/// A point is strictly contained iff interior to the exterior ring
/// and not covered by any hole. Unlike [`polygon_covers_point`], a
/// point sitting exactly on the exterior's boundary does not count.
pub fn polygon_contains_point(polygon: &Polygon, p: Point) -> bool {
    if !contains_point(polygon.exterior(), p, false) {
        return false;
    }
    !polygon.holes().iter().any(|hole| contains_point(hole, p, false))
}

/// `covers` variant of [`polygon_intersects_line`]: every point of
/// `line`, not merely some point, must lie within the polygon.
/// `allow_on_edge` threads through to the exterior containment check
/// (`true` for the covers predicate, `false` for the stricter
/// contains predicate); hole exclusion is always strict, mirroring
/// [`polygon_covers_point`].
pub fn polygon_covers_line(polygon: &Polygon, line: &Line, allow_on_edge: bool) -> bool {
    if !contains_line(polygon.exterior(), line, allow_on_edge) {
        return false;
    }
    !polygon.holes().iter().any(|hole| super::ring_ops::intersects_line(hole, line, false))
}

/// `covers` variant of [`polygon_intersects_polygon`]: `q`'s exterior
/// must lie entirely within `p`'s exterior, and not be swallowed by
/// any of `p`'s holes.
pub fn polygon_covers_polygon(p: &Polygon, q: &Polygon, allow_on_edge: bool) -> bool {
    if !contains_ring(p.exterior(), q.exterior(), allow_on_edge) {
        return false;
    }
    !p.holes().iter().any(|hole| super::ring_ops::intersects_ring(hole, q.exterior(), false))
}

/// Symmetric check: `p` intersects `q` iff either's exterior
/// intersects the other's exterior and neither polygon is fully
/// swallowed by a hole of the other.
pub fn polygon_intersects_polygon(p: &Polygon, q: &Polygon) -> bool {
    let exteriors_meet = super::ring_ops::intersects_ring(p.exterior(), q.exterior(), true);
    if !exteriors_meet {
        // Still possible one polygon sits wholly inside the other
        // (no edge crossing at all): check a representative vertex.
        let p_in_q = contains_point(q.exterior(), p.exterior().point_at(0), true)
            && !q.holes().iter().any(|h| contains_point(h, p.exterior().point_at(0), false));
        let q_in_p = contains_point(p.exterior(), q.exterior().point_at(0), true)
            && !p.holes().iter().any(|h| contains_point(h, q.exterior().point_at(0), false));
        return p_in_q || q_in_p;
    }
    let p_swallowed_by_hole_of_q = q
        .holes()
        .iter()
        .any(|h| super::ring_ops::contains_ring(h, p.exterior(), false));
    let q_swallowed_by_hole_of_p = p
        .holes()
        .iter()
        .any(|h| super::ring_ops::contains_ring(h, q.exterior(), false));
    !p_swallowed_by_hole_of_q && !q_swallowed_by_hole_of_p
}

#[cfg(test)]
mod test {
    use super::*;
    use geocore_types::Ring;

    fn square(min: f64, max: f64) -> Ring {
        Ring::new(vec![
            Point::new(min, min),
            Point::new(max, min),
            Point::new(max, max),
            Point::new(min, max),
        ])
        .unwrap()
    }

    #[test]
    fn polygon_with_hole_covers_point_scenarios() {
        let exterior = square(0.0, 10.0);
        let hole = square(4.0, 6.0);
        let polygon = Polygon::new(exterior, vec![hole]).unwrap();
        assert!(!polygon_covers_point(&polygon, Point::new(5.0, 5.0)));
        assert!(polygon_covers_point(&polygon, Point::new(3.0, 5.0)));
    }

    #[test]
    fn disjoint_polygons_do_not_intersect() {
        let a = Polygon::new(square(0.0, 1.0), vec![]).unwrap();
        let b = Polygon::new(square(10.0, 11.0), vec![]).unwrap();
        assert!(!polygon_intersects_polygon(&a, &b));
    }

    #[test]
    fn nested_polygon_without_hole_intersects() {
        let outer = Polygon::new(square(0.0, 10.0), vec![]).unwrap();
        let inner = Polygon::new(square(2.0, 4.0), vec![]).unwrap();
        assert!(polygon_intersects_polygon(&outer, &inner));
    }
}
