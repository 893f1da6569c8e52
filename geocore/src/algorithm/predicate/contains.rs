use geocore_types::GeometryValue;

use super::covers::covers;
use super::intersects::point_on_line;
use super::{as_shape, Shape};
use crate::algorithm::polygon_ops::{polygon_contains_point, polygon_covers_line, polygon_covers_polygon};

fn is_multi(g: &GeometryValue) -> bool {
    matches!(
        g,
        GeometryValue::MultiPoint(_)
            | GeometryValue::MultiLineString(_)
            | GeometryValue::MultiPolygon(_)
            | GeometryValue::GeometryCollection(_)
    )
}

/// `contains(a, b)`: the strict counterpart of [`covers`] — boundary
/// contact between `a` and `b` is not enough; `b` must sit in `a`'s
/// interior wherever a polygon operand makes that distinction
/// meaningful (point-in-polygon, line-in-polygon, polygon-in-polygon).
/// Pairs with no interior/boundary distinction (point-point,
/// line-line) fall back to the same check [`covers`] uses, since
/// there is nothing stricter to ask for.
pub fn contains(a: &GeometryValue, b: &GeometryValue) -> bool {
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
            .all(|child| contains(a, &child));
    }
    if is_multi(a) {
        return (0..a.num_geometries())
            .filter_map(|i| a.geometry_at(i))
            .any(|child| contains(&child, b));
    }

    match (as_shape(a), as_shape(b)) {
        (Some(Shape::Point(p)), Some(Shape::Point(q))) => p == q,
        (Some(Shape::Line(l)), Some(Shape::Point(p))) => point_on_line(l, p),
        (Some(Shape::Polygon(poly)), Some(Shape::Point(p))) => polygon_contains_point(poly, p),
        (Some(Shape::Line(l1)), Some(Shape::Line(l2))) => {
            (0..l2.num_points()).all(|i| point_on_line(l1, l2.point_at(i)))
        }
        (Some(Shape::Polygon(poly)), Some(Shape::Line(l))) => polygon_covers_line(poly, l, false),
        (Some(Shape::Polygon(p1)), Some(Shape::Polygon(p2))) => polygon_covers_polygon(p1, p2, false),
        _ => covers(a, b),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use geocore_types::{new_geom_point, new_geom_polygon, Point, Ring};

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
    fn polygon_does_not_strictly_contain_its_own_edge() {
        let poly = new_geom_polygon(square(0.0, 10.0), vec![]);
        let edge_point = new_geom_point(Point::new(0.0, 5.0));
        assert!(!contains(&poly, &edge_point));

        let interior_point = new_geom_point(Point::new(5.0, 5.0));
        assert!(contains(&poly, &interior_point));
    }
}
