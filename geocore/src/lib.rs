//! `geocore` layers the predicate engine and spatial-search algorithms
//! on top of [`geocore_types`]'s value model, the way the teacher's
//! `geo` crate layers algorithms on top of `geo-types`.
//!
//! ## Layout
//!
//! - [`algorithm::raycast`], [`algorithm::segment_intersect`],
//!   [`algorithm::segment_rect`] — the primitive kernel (§4.1):
//!   point-in-segment, segment-segment intersection, segment-rect
//!   clipping.
//! - [`algorithm::ring_ops`] — ring-level predicates parameterized by
//!   `allow_on_edge` (§4.3), built on the primitives plus
//!   [`Ring::search`](geocore_types::Ring::search).
//! - [`algorithm::polygon_ops`] — polygon predicates reducing to ring
//!   operations over the exterior and holes (§4.4).
//! - [`algorithm::predicate`] — the full `covers`/`intersects`/
//!   `contains`/`touches`/`equals`/`disjoint`/`within` dispatch over
//!   [`GeometryValue`](geocore_types::GeometryValue) pairs (§4.6).
//! - [`algorithm::nearest`] — best-first nearest-segment traversal
//!   (§4.7).
//!
//! `geocore_types::circle` (re-exported from `geocore_types` through
//! this crate's dependency, not duplicated here) builds the ring;
//! this crate only supplies the predicates and search that operate on
//! it once built.

pub mod algorithm;

pub use algorithm::nearest::nearest_segment;
pub use algorithm::polygon_ops::{
    polygon_contains_point, polygon_covers_line, polygon_covers_point, polygon_covers_polygon, polygon_intersects_line,
    polygon_intersects_polygon,
};
pub use algorithm::predicate::{contains, covered_by, covers, crosses, disjoint, equals, intersects, overlaps, touches, within};
pub use algorithm::raycast::{raycast, RaycastResult};
pub use algorithm::ring_ops::{
    contains_line, contains_point, contains_ring, contains_segment, intersects_line, intersects_ring, intersects_segment,
    ring_ring_search,
};
pub use algorithm::segment_intersect::segments_intersect;
pub use algorithm::segment_rect::{segment_covers_rect, segment_intersects_rect};

#[cfg(test)]
mod tests {
    use super::*;
    use geocore_types::{new_geom_point, new_geom_polygon, Point, Ring};

    #[test]
    fn predicate_pairs_agree_with_their_symmetric_counterparts() {
        let square = Ring::new(vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
        ])
        .unwrap();
        let poly = new_geom_polygon(square, vec![]);
        let inside = new_geom_point(Point::new(5.0, 5.0));

        assert_eq!(intersects(&poly, &inside), intersects(&inside, &poly));
        assert_eq!(covers(&poly, &inside), covered_by(&inside, &poly));
        assert_eq!(contains(&poly, &inside), within(&inside, &poly));
    }
}
