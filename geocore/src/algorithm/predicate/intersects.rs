use geocore_types::{GeometryValue, Line, Point};

use super::{as_shape, Shape};
use crate::algorithm::polygon_ops::{polygon_covers_point, polygon_intersects_line, polygon_intersects_polygon};
use crate::algorithm::raycast::on_segment;
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

/// True iff the closed segments of `line` pass through `p` anywhere
/// along their length.
pub(crate) fn point_on_line(line: &Line, p: Point) -> bool {
    (0..line.num_segments()).any(|i| {
        let s = line.segment_at(i);
        on_segment(s.a, s.b, p)
    })
}

/// True iff any segment of `a` intersects any segment of `b`.
pub(crate) fn lines_intersect(a: &Line, b: &Line) -> bool {
    (0..a.num_segments()).any(|i| {
        let sa = a.segment_at(i);
        (0..b.num_segments()).any(|j| segments_intersect(sa, b.segment_at(j)))
    })
}

/// `intersects(a, b) = intersects(b, a)`; symmetric by construction
/// since every case below is dispatched on an unordered pair of
/// shapes. Error and Empty operands always produce `false` (spec
/// §4.6: "every predicate treats an Error or Empty operand as
/// producing false… never propagating the error").
pub fn intersects(a: &GeometryValue, b: &GeometryValue) -> bool {
    if a.is_error() || b.is_error() {
        return false;
    }
    if a.is_empty() || b.is_empty() {
        return false;
    }

    if is_multi(a) {
        return (0..a.num_geometries())
            .filter_map(|i| a.geometry_at(i))
            .any(|child| intersects(&child, b));
    }
    if is_multi(b) {
        return (0..b.num_geometries())
            .filter_map(|i| b.geometry_at(i))
            .any(|child| intersects(a, &child));
    }

    match (as_shape(a), as_shape(b)) {
        (Some(Shape::Point(p)), Some(Shape::Point(q))) => p == q,
        (Some(Shape::Point(p)), Some(Shape::Line(l))) | (Some(Shape::Line(l)), Some(Shape::Point(p))) => point_on_line(l, p),
        (Some(Shape::Point(p)), Some(Shape::Polygon(poly))) | (Some(Shape::Polygon(poly)), Some(Shape::Point(p))) => {
            polygon_covers_point(poly, p)
        }
        (Some(Shape::Line(l1)), Some(Shape::Line(l2))) => lines_intersect(l1, l2),
        (Some(Shape::Line(l)), Some(Shape::Polygon(poly))) | (Some(Shape::Polygon(poly)), Some(Shape::Line(l))) => {
            polygon_intersects_line(poly, l)
        }
        (Some(Shape::Polygon(p1)), Some(Shape::Polygon(p2))) => polygon_intersects_polygon(p1, p2),
        _ => false,
    }
}
