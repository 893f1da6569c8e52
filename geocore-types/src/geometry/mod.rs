//! The tagged-variant geometry value (§4.5) and the second-level
//! index its multi- and collection kinds carry.

mod multi;
mod value;

pub use multi::{GeometryCollectionData, MultiIndex, MultiLineStringData, MultiPointData, MultiPolygonData};
pub use value::{FeatureMeta, GeometryKind, GeometryValue, LineStringData, PointData, PolygonData};

/// Child count above which a multi-geometry or collection builds a
/// [`MultiIndex`] over its children's bounding rects, rather than
/// relying on a linear scan of `num_geometries()` children.
pub const MULTI_INDEX_THRESHOLD: usize = 8;
