//! The algorithm layer (§4.1, §4.3, §4.4, §4.6, §4.7): primitives,
//! ring/polygon predicate compositions, the predicate-engine dispatch,
//! and the nearest-segment iterator. Everything here is pure
//! computation over [`geocore_types`] values — no storage, no
//! indexing strategy decisions (those stay in `geocore-types`).

pub mod nearest;
pub mod polygon_ops;
pub mod predicate;
pub mod raycast;
pub mod ring_ops;
pub mod segment_intersect;
pub mod segment_rect;
