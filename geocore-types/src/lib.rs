//! `geocore-types` defines the planar geometry value types for the
//! `geocore` ecosystem: [`Point`], [`Rect`], [`Segment`], [`Ring`],
//! [`Line`], [`Polygon`], and the tagged-variant [`GeometryValue`],
//! plus the ring spatial index that backs their point-in-polygon and
//! segment-intersection queries.
//!
//! In most cases you only need this crate if you are a crate author
//! building on top of these types; [`geocore`](https://docs.rs/geocore/)
//! re-exports them and layers the predicate engine and nearest-segment
//! search on top.
//!
//! ## Geometries
//!
//! - **[`Ring`]**: a closed planar polyline, with a cached bounding
//!   rect, convexity flag, winding flag, and an optional spatial
//!   index over its edges.
//! - **[`Line`]**: an open planar polyline sharing `Ring`'s storage.
//! - **[`Polygon`]**: one exterior `Ring` plus zero or more hole
//!   `Ring`s.
//! - **[`GeometryValue`]**: a tagged union over the above, their
//!   multi- and collection-kinds, and the `Empty`/`Error` sentinels.
//!
//! ## Coordinates
//!
//! Every coordinate is `f64`. There is no generic scalar type: unlike
//! some geometry crates, this one does not need to support `f32` or
//! integer coordinate storage, so the whole stack is written directly
//! against `f64`.
//!
//! ## Ownership
//!
//! Every value here is immutable after construction. `Point`, `Rect`,
//! and `Segment` are `Copy`. `Ring`, `Line`, `Polygon`, and
//! `GeometryValue` are internally reference-counted (`Arc`, so clone
//! is sound to share across threads of readers) — cloning is a
//! pointer bump; [`GeometryValue::copy`] is the deep-copy counterpart.

mod construct;
mod error;
mod line;
mod point;
mod polygon;
mod rect;
mod ring;
mod segment;

pub mod config;
pub mod geometry;
pub mod index;

pub use config::IndexStrategy;
pub use construct::*;
pub use error::{Error, ShapeError};
pub use geometry::{GeometryKind, GeometryValue};
pub use line::Line;
pub use point::Point;
pub use polygon::Polygon;
pub use rect::Rect;
pub use ring::Ring;
pub use segment::Segment;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fullrect_invariant_on_a_plain_square() {
        let ring = Ring::new(vec![
            Point::new(0.0, 0.0),
            Point::new(4.0, 0.0),
            Point::new(4.0, 4.0),
            Point::new(0.0, 4.0),
        ])
        .unwrap();
        let g = new_geom_polygon(ring, vec![]);
        let (min, max, dims) = g.fullrect();
        assert_eq!(dims, 2);
        assert_eq!(min, [0.0, 0.0, 0.0, 0.0]);
        assert_eq!(max, [4.0, 4.0, 0.0, 0.0]);
    }
}
