use geocore_types::GeometryValue;

use super::intersects::intersects;
use super::{as_shape, Shape};
use crate::algorithm::polygon_ops::polygon_contains_point;
use crate::algorithm::ring_ops::{intersects_line, intersects_ring};
use crate::algorithm::segment_intersect::segments_intersect;

fn is_multi(g: &GeometryValue) -> bool {
    matches!(
        g,
        GeometryValue::MultiPoint(_)
            | GeometryValue::MultiLineString(_)
            | GeometryValue::MultiPolygon(_)
            | GeometryValue::GeometryCollection(_)
    )
}

/// True iff some segment of `a` properly crosses some segment of `b`
/// — both endpoints of one segment strictly on opposite sides of the
/// other's line — as opposed to merely sharing an endpoint or lying
/// collinear. Used to tell a transversal crossing (interior overlap)
/// apart from a boundary-only touch.
fn lines_cross_properly(a: &geocore_types::Line, b: &geocore_types::Line) -> bool {
    let orient = |p: geocore_types::Point, q: geocore_types::Point, r: geocore_types::Point| {
        (q.x - p.x) * (r.y - p.y) - (q.y - p.y) * (r.x - p.x)
    };
    (0..a.num_segments()).any(|i| {
        let sa = a.segment_at(i);
        (0..b.num_segments()).any(|j| {
            let sb = b.segment_at(j);
            if !segments_intersect(sa, sb) {
                return false;
            }
            let d1 = orient(sb.a, sb.b, sa.a);
            let d2 = orient(sb.a, sb.b, sa.b);
            (d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0)
        })
    })
}

/// Whether `a` and `b` overlap through their interiors rather than
/// merely touching along a boundary. `touches` below is defined as
/// "they intersect and this is false".
fn interiors_overlap(a: &GeometryValue, b: &GeometryValue) -> bool {
    if is_multi(a) {
        return (0..a.num_geometries())
            .filter_map(|i| a.geometry_at(i))
            .any(|child| interiors_overlap(&child, b));
    }
    if is_multi(b) {
        return (0..b.num_geometries())
            .filter_map(|i| b.geometry_at(i))
            .any(|child| interiors_overlap(a, &child));
    }

    match (as_shape(a), as_shape(b)) {
        (Some(Shape::Point(_)), Some(Shape::Point(_))) => false,
        (Some(Shape::Point(_)), Some(Shape::Line(_))) | (Some(Shape::Line(_)), Some(Shape::Point(_))) => false,
        (Some(Shape::Point(p)), Some(Shape::Polygon(poly))) | (Some(Shape::Polygon(poly)), Some(Shape::Point(p))) => {
            polygon_contains_point(poly, p)
        }
        (Some(Shape::Line(l1)), Some(Shape::Line(l2))) => lines_cross_properly(l1, l2),
        (Some(Shape::Line(l)), Some(Shape::Polygon(poly))) | (Some(Shape::Polygon(poly)), Some(Shape::Line(l))) => {
            intersects_line(poly.exterior(), l, false)
        }
        (Some(Shape::Polygon(p1)), Some(Shape::Polygon(p2))) => intersects_ring(p1.exterior(), p2.exterior(), false),
        _ => false,
    }
}

/// `touches(a, b)`: they intersect and their interiors do not (spec
/// §4.6). For ring/line pairs this means touching exactly on shared
/// boundary points — an endpoint, an edge-touch, or a polygon
/// boundary — never a transversal crossing or areal overlap.
pub fn touches(a: &GeometryValue, b: &GeometryValue) -> bool {
    if !intersects(a, b) {
        return false;
    }
    !interiors_overlap(a, b)
}

#[cfg(test)]
mod test {
    use super::*;
    use geocore_types::{new_geom_linestring, new_geom_point, new_geom_polygon, Point, Ring};

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
    fn point_on_polygon_boundary_touches() {
        let poly = new_geom_polygon(square(0.0, 10.0), vec![]);
        let edge = new_geom_point(Point::new(0.0, 5.0));
        assert!(touches(&poly, &edge));

        let interior = new_geom_point(Point::new(5.0, 5.0));
        assert!(!touches(&poly, &interior));
    }

    #[test]
    fn crossing_lines_do_not_touch() {
        let a = new_geom_linestring(vec![Point::new(0.0, 0.0), Point::new(4.0, 4.0)]);
        let b = new_geom_linestring(vec![Point::new(0.0, 4.0), Point::new(4.0, 0.0)]);
        assert!(!touches(&a, &b));
    }

    #[test]
    fn t_touching_lines_touch() {
        let a = new_geom_linestring(vec![Point::new(0.0, 0.0), Point::new(4.0, 0.0)]);
        let b = new_geom_linestring(vec![Point::new(2.0, 0.0), Point::new(2.0, 4.0)]);
        assert!(touches(&a, &b));
    }
}
