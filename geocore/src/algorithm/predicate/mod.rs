//! Predicate dispatch (§4.6): each predicate takes a pair of
//! [`GeometryValue`]s, dispatches on their variants, and reduces to
//! the ring/line/polygon primitives in [`crate::algorithm::ring_ops`]
//! and [`crate::algorithm::polygon_ops`]. Error and Empty operands
//! always fall through to the conservative default named in each
//! function's doc comment; no predicate here ever propagates an
//! `Error`.

mod contains;
mod covers;
mod disjoint;
mod equals;
mod intersects;
mod touches;
mod within;

pub use contains::contains;
pub use covers::{covered_by, covers};
pub use disjoint::disjoint;
pub use equals::equals;
pub use intersects::intersects;
pub use touches::touches;
pub use within::within;

use geocore_types::GeometryValue;

/// `crosses` and `overlaps` are left as stubs (spec §9, open question):
/// every variant pair is unsupported and returns `false`. They are
/// named here, rather than omitted, so call sites that enumerate all
/// seven predicates compile against a complete set.
pub fn crosses(_a: &GeometryValue, _b: &GeometryValue) -> bool {
    false
}

pub fn overlaps(_a: &GeometryValue, _b: &GeometryValue) -> bool {
    false
}

/// Every base (non-multi, non-collection) geometry reduced to either a
/// ring-shaped boundary (`Polygon`/closed `LineString` used as a ring)
/// or left as a point/open line, for the predicates that treat "the
/// interior test" uniformly. Used internally by the dispatch modules;
/// not part of the public predicate surface.
pub(crate) enum Shape<'a> {
    Point(geocore_types::Point),
    Line(&'a geocore_types::Line),
    Polygon(&'a geocore_types::Polygon),
}

pub(crate) fn as_shape(g: &GeometryValue) -> Option<Shape<'_>> {
    match g {
        GeometryValue::Point(p) => Some(Shape::Point(p.point)),
        GeometryValue::LineString(l) => Some(Shape::Line(&l.line)),
        GeometryValue::Polygon(p) => Some(Shape::Polygon(&p.polygon)),
        _ => None,
    }
}
