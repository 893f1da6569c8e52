use geocore_types::{GeometryValue, Line, Point};

use super::intersects::point_on_line;
use super::{as_shape, Shape};
use crate::algorithm::polygon_ops::{polygon_covers_line, polygon_covers_point, polygon_covers_polygon};

fn is_multi(g: &GeometryValue) -> bool {
    matches!(
        g,
        GeometryValue::MultiPoint(_)
            | GeometryValue::MultiLineString(_)
            | GeometryValue::MultiPolygon(_)
            | GeometryValue::GeometryCollection(_)
    )
}

/// Every point of `b` lies on `a` (edges count as lying on a line —
/// a line has no interior/boundary distinction to thread an
/// `allow_on_edge` flag through).
fn line_covers_line(a: &Line, b: &Line) -> bool {
    (0..b.num_points()).all(|i| point_on_line(a, b.point_at(i)))
}

/// `covers(a, b)`: no point of `b` lies outside `a`. Multi-/
/// collection-kind `b` decomposes to "every child covered"; a
/// multi-/collection-kind `a` decomposes to "some child covers" (a
/// conservative approximation — this does not attempt to compose
/// coverage across several pieces of `a` to jointly cover a `b` that
/// straddles more than one of them, since the ring/polygon primitives
/// operate on single rings).
pub fn covers(a: &GeometryValue, b: &GeometryValue) -> bool {
    if a.is_error() || b.is_error() {
        return false;
    }
    if b.is_empty() {
        return !a.is_empty();
    }
    if a.is_empty() {
        return false;
    }

    if is_multi(b) {
        return (0..b.num_geometries())
            .filter_map(|i| b.geometry_at(i))
            .all(|child| covers(a, &child));
    }
    if is_multi(a) {
        return (0..a.num_geometries())
            .filter_map(|i| a.geometry_at(i))
            .any(|child| covers(&child, b));
    }

    match (as_shape(a), as_shape(b)) {
        (Some(Shape::Point(p)), Some(Shape::Point(q))) => p == q,
        (Some(Shape::Line(l)), Some(Shape::Point(p))) => point_on_line(l, p),
        (Some(Shape::Polygon(poly)), Some(Shape::Point(p))) => polygon_covers_point(poly, p),
        (Some(Shape::Line(l1)), Some(Shape::Line(l2))) => line_covers_line(l1, l2),
        (Some(Shape::Polygon(poly)), Some(Shape::Line(l))) => polygon_covers_line(poly, l, true),
        (Some(Shape::Polygon(p1)), Some(Shape::Polygon(p2))) => polygon_covers_polygon(p1, p2, true),
        _ => false,
    }
}

/// `covered_by(a, b) ⇔ covers(b, a)` (spec §4.6).
pub fn covered_by(a: &GeometryValue, b: &GeometryValue) -> bool {
    covers(b, a)
}

#[cfg(test)]
mod test {
    use super::*;
    use geocore_types::{new_geom_point, new_geom_polygon, Ring};

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
    fn polygon_covers_point_on_its_own_edge() {
        let poly = new_geom_polygon(square(0.0, 10.0), vec![]);
        let edge_point = new_geom_point(Point::new(0.0, 5.0));
        assert!(covers(&poly, &edge_point));
        assert!(covered_by(&edge_point, &poly));
    }
}
