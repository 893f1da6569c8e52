use super::multi::{search_children, GeometryCollectionData, MultiLineStringData, MultiPointData, MultiPolygonData};
use crate::{Error, Line, Point, Polygon, Rect};
use std::sync::Arc;

/// GeoJSON's "is this node a Feature / FeatureCollection, and what
/// foreign members did it carry" round-trip payload. The payload
/// itself is an opaque string — parsing and re-serializing it is a
/// serialization-layer concern outside this crate; this type only
/// carries it through construction, cloning, and copying intact.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FeatureMeta {
    pub extra_json: Option<String>,
    pub is_feature: bool,
    pub is_featurecollection: bool,
}

/// The tag carried by [`GeometryValue::Empty`] and returned by
/// [`GeometryValue::typeof_`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryKind {
    Point,
    LineString,
    Polygon,
    MultiPoint,
    MultiLineString,
    MultiPolygon,
    GeometryCollection,
}

#[derive(Debug, Clone)]
pub struct PointData {
    pub point: Point,
    pub z: Option<f64>,
    pub m: Option<f64>,
    pub meta: Option<Arc<FeatureMeta>>,
}

#[derive(Debug, Clone)]
pub struct LineStringData {
    pub line: Line,
    pub z: Option<Arc<[f64]>>,
    pub m: Option<Arc<[f64]>>,
    pub meta: Option<Arc<FeatureMeta>>,
}

#[derive(Debug, Clone)]
pub struct PolygonData {
    pub polygon: Polygon,
    pub z: Option<Arc<[f64]>>,
    pub m: Option<Arc<[f64]>>,
    pub meta: Option<Arc<FeatureMeta>>,
}

/// Tagged union over every geometry kind this crate models, plus the
/// two sentinels ([`GeometryValue::Empty`], [`GeometryValue::Error`])
/// that let every constructor return a proper value instead of
/// panicking or returning null.
///
/// Cloning any variant is a pointer bump (heap-backed variants are
/// `Arc`-wrapped); see [`GeometryValue::copy`] for the deep-copy
/// counterpart.
#[derive(Debug, Clone)]
pub enum GeometryValue {
    Point(PointData),
    LineString(LineStringData),
    Polygon(PolygonData),
    MultiPoint(Arc<MultiPointData>),
    MultiLineString(Arc<MultiLineStringData>),
    MultiPolygon(Arc<MultiPolygonData>),
    GeometryCollection(Arc<GeometryCollectionData>),
    /// A typed empty value of any of the kinds above.
    Empty(GeometryKind),
    /// Produced only by parsers; every query on this value returns a
    /// conservative false/zero rather than propagating the error.
    Error(Error),
}

impl GeometryValue {
    pub fn typeof_(&self) -> Option<GeometryKind> {
        match self {
            GeometryValue::Point(_) => Some(GeometryKind::Point),
            GeometryValue::LineString(_) => Some(GeometryKind::LineString),
            GeometryValue::Polygon(_) => Some(GeometryKind::Polygon),
            GeometryValue::MultiPoint(_) => Some(GeometryKind::MultiPoint),
            GeometryValue::MultiLineString(_) => Some(GeometryKind::MultiLineString),
            GeometryValue::MultiPolygon(_) => Some(GeometryKind::MultiPolygon),
            GeometryValue::GeometryCollection(_) => Some(GeometryKind::GeometryCollection),
            GeometryValue::Empty(kind) => Some(*kind),
            GeometryValue::Error(_) => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            GeometryValue::Empty(_) => true,
            GeometryValue::Error(_) => true,
            GeometryValue::Point(_) => false,
            GeometryValue::LineString(p) => p.line.is_empty(),
            GeometryValue::Polygon(p) => p.polygon.exterior().is_empty(),
            GeometryValue::MultiPoint(p) => p.points.is_empty(),
            GeometryValue::MultiLineString(p) => p.lines.is_empty(),
            GeometryValue::MultiPolygon(p) => p.polygons.is_empty(),
            GeometryValue::GeometryCollection(p) => p.children.is_empty(),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, GeometryValue::Error(_))
    }

    /// The overall bounding rect: for multi-/collection-kinds, the
    /// union of children's rects. `Rect::NONE` for `Empty`/`Error`.
    pub fn rect(&self) -> Rect {
        match self {
            GeometryValue::Point(p) => Rect::from_point(p.point),
            GeometryValue::LineString(p) => p.line.rect(),
            GeometryValue::Polygon(p) => p.polygon.rect(),
            GeometryValue::MultiPoint(p) => p.rect,
            GeometryValue::MultiLineString(p) => p.rect,
            GeometryValue::MultiPolygon(p) => p.rect,
            GeometryValue::GeometryCollection(p) => p.rect,
            GeometryValue::Empty(_) | GeometryValue::Error(_) => Rect::NONE,
        }
    }

    /// `2`, `3`, or `4`: whether `z` and/or `m` are present.
    pub fn dims(&self) -> u8 {
        2 + self.z().is_some() as u8 + self.m().is_some() as u8
    }

    pub fn z(&self) -> Option<&[f64]> {
        match self {
            GeometryValue::Point(p) => p.z.as_ref().map(std::slice::from_ref),
            GeometryValue::LineString(p) => p.z.as_deref(),
            GeometryValue::Polygon(p) => p.z.as_deref(),
            GeometryValue::MultiPoint(p) => p.z.as_deref(),
            GeometryValue::MultiLineString(p) => p.z.as_deref(),
            GeometryValue::MultiPolygon(p) => p.z.as_deref(),
            GeometryValue::GeometryCollection(_) | GeometryValue::Empty(_) | GeometryValue::Error(_) => None,
        }
    }

    pub fn m(&self) -> Option<&[f64]> {
        match self {
            GeometryValue::Point(p) => p.m.as_ref().map(std::slice::from_ref),
            GeometryValue::LineString(p) => p.m.as_deref(),
            GeometryValue::Polygon(p) => p.m.as_deref(),
            GeometryValue::MultiPoint(p) => p.m.as_deref(),
            GeometryValue::MultiLineString(p) => p.m.as_deref(),
            GeometryValue::MultiPolygon(p) => p.m.as_deref(),
            GeometryValue::GeometryCollection(_) | GeometryValue::Empty(_) | GeometryValue::Error(_) => None,
        }
    }

    /// `z` followed by `m`, packed into one array the way the FFI
    /// surface's `extra_coords` does.
    pub fn extra_coords(&self) -> Vec<f64> {
        let mut out = Vec::new();
        if let Some(z) = self.z() {
            out.extend_from_slice(z);
        }
        if let Some(m) = self.m() {
            out.extend_from_slice(m);
        }
        out
    }

    /// The componentwise min/max over every coordinate stored,
    /// including `z`/`m` when present, plus the dimensionality that
    /// produced it. Unused trailing slots in the `[f64; 4]` arrays are
    /// `0.0`.
    pub fn fullrect(&self) -> ([f64; 4], [f64; 4], u8) {
        let rect = self.rect();
        let mut min = [rect.min.x, rect.min.y, 0.0, 0.0];
        let mut max = [rect.max.x, rect.max.y, 0.0, 0.0];
        if let Some(z) = self.z() {
            if let (Some(&lo), Some(&hi)) = (
                z.iter().min_by(|a, b| a.partial_cmp(b).unwrap()),
                z.iter().max_by(|a, b| a.partial_cmp(b).unwrap()),
            ) {
                min[2] = lo;
                max[2] = hi;
            }
        }
        if let Some(m) = self.m() {
            if let (Some(&lo), Some(&hi)) = (
                m.iter().min_by(|a, b| a.partial_cmp(b).unwrap()),
                m.iter().max_by(|a, b| a.partial_cmp(b).unwrap()),
            ) {
                min[3] = lo;
                max[3] = hi;
            }
        }
        (min, max, self.dims())
    }

    pub fn num_geometries(&self) -> usize {
        match self {
            GeometryValue::MultiPoint(p) => p.points.len(),
            GeometryValue::MultiLineString(p) => p.lines.len(),
            GeometryValue::MultiPolygon(p) => p.polygons.len(),
            GeometryValue::GeometryCollection(p) => p.children.len(),
            GeometryValue::Point(_) | GeometryValue::LineString(_) | GeometryValue::Polygon(_) => 1,
            GeometryValue::Empty(_) | GeometryValue::Error(_) => 0,
        }
    }

    pub fn geometry_at(&self, i: usize) -> Option<GeometryValue> {
        match self {
            GeometryValue::MultiPoint(p) => p.geometry_at(i),
            GeometryValue::MultiLineString(p) => p.geometry_at(i),
            GeometryValue::MultiPolygon(p) => p.geometry_at(i),
            GeometryValue::GeometryCollection(p) => p.geometry_at(i),
            GeometryValue::Point(_) | GeometryValue::LineString(_) | GeometryValue::Polygon(_) => {
                (i == 0).then(|| self.clone())
            }
            GeometryValue::Empty(_) | GeometryValue::Error(_) => None,
        }
    }

    /// Invokes `visit(child_index)` for every child of a multi- or
    /// collection-kind geometry whose rect intersects `query`, using
    /// the second-level [`super::MultiIndex`] when one was built.
    /// Non-multi kinds call `visit(0)` once if their own rect
    /// intersects, matching "treat a scalar as a one-element multi".
    pub fn search_geom(&self, query: &Rect, visit: impl FnMut(usize) -> bool) -> bool {
        match self {
            GeometryValue::MultiPoint(p) => {
                let rects: Vec<Rect> = p.points.iter().map(|pt| Rect::from_point(*pt)).collect();
                search_children(&rects, None, query, visit)
            }
            GeometryValue::MultiLineString(p) => search_children(&p.rects(), p.index.as_ref(), query, visit),
            GeometryValue::MultiPolygon(p) => search_children(&p.rects(), p.index.as_ref(), query, visit),
            GeometryValue::GeometryCollection(p) => search_children(&p.rects(), p.index.as_ref(), query, visit),
            _ => {
                let mut visit = visit;
                if self.rect().intersects_rect(query) {
                    visit(0);
                }
                true
            }
        }
    }

    fn meta(&self) -> Option<&FeatureMeta> {
        match self {
            GeometryValue::Point(p) => p.meta.as_deref(),
            GeometryValue::LineString(p) => p.meta.as_deref(),
            GeometryValue::Polygon(p) => p.meta.as_deref(),
            GeometryValue::MultiPoint(p) => p.meta.as_deref(),
            GeometryValue::MultiLineString(p) => p.meta.as_deref(),
            GeometryValue::MultiPolygon(p) => p.meta.as_deref(),
            GeometryValue::GeometryCollection(p) => p.meta.as_deref(),
            GeometryValue::Empty(_) | GeometryValue::Error(_) => None,
        }
    }

    pub fn is_feature(&self) -> bool {
        self.meta().is_some_and(|m| m.is_feature)
    }

    pub fn is_featurecollection(&self) -> bool {
        self.meta().is_some_and(|m| m.is_featurecollection)
    }

    /// A rough size estimate used to probe the allocator hook before a
    /// deep copy; not exact, just proportional to the work involved.
    fn approx_size_bytes(&self) -> usize {
        let per_geom = 64;
        (self.num_geometries().max(1)) * per_geom
    }

    /// Deep-copies this value so the result has independent ownership
    /// (as opposed to `Clone`, which bumps a reference count). Returns
    /// `GeometryValue::Error(Error::NoMemory)` if the allocator hook
    /// reports pressure instead of performing the copy.
    pub fn copy(&self) -> GeometryValue {
        if !crate::config::try_reserve(self.approx_size_bytes()) {
            return GeometryValue::Error(Error::NoMemory);
        }
        match self {
            GeometryValue::MultiPoint(p) => GeometryValue::MultiPoint(Arc::new(MultiPointData {
                points: p.points.clone(),
                rect: p.rect,
                z: p.z.clone(),
                m: p.m.clone(),
                meta: p.meta.clone(),
            })),
            GeometryValue::MultiLineString(p) => GeometryValue::MultiLineString(Arc::new(MultiLineStringData {
                lines: p.lines.clone(),
                rect: p.rect,
                index: p.index.clone(),
                z: p.z.clone(),
                m: p.m.clone(),
                meta: p.meta.clone(),
            })),
            GeometryValue::MultiPolygon(p) => GeometryValue::MultiPolygon(Arc::new(MultiPolygonData {
                polygons: p.polygons.clone(),
                rect: p.rect,
                index: p.index.clone(),
                z: p.z.clone(),
                m: p.m.clone(),
                meta: p.meta.clone(),
            })),
            GeometryValue::GeometryCollection(p) => {
                let children: Vec<GeometryValue> = p.children.iter().map(GeometryValue::copy).collect();
                if children.iter().any(GeometryValue::is_error) {
                    return GeometryValue::Error(Error::NoMemory);
                }
                GeometryValue::GeometryCollection(Arc::new(GeometryCollectionData {
                    children,
                    rect: p.rect,
                    index: p.index.clone(),
                    meta: p.meta.clone(),
                }))
            }
            other => other.clone(),
        }
    }
}

impl std::fmt::Display for GeometryValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GeometryValue::Point(p) => write!(f, "point {}", p.point),
            GeometryValue::LineString(p) => write!(f, "{}", p.line),
            GeometryValue::Polygon(p) => write!(f, "{}", p.polygon),
            GeometryValue::MultiPoint(p) => write!(f, "multipoint({} point(s))", p.points.len()),
            GeometryValue::MultiLineString(p) => write!(f, "multilinestring({} line(s))", p.lines.len()),
            GeometryValue::MultiPolygon(p) => write!(f, "multipolygon({} polygon(s))", p.polygons.len()),
            GeometryValue::GeometryCollection(p) => write!(f, "geometrycollection({} child(ren))", p.children.len()),
            GeometryValue::Empty(kind) => write!(f, "empty {kind:?}"),
            GeometryValue::Error(e) => write!(f, "error: {e}"),
        }
    }
}

/// Mirrors `geo_types`'s `TryFrom<Geometry<T>> for Point<T>`: on a kind
/// mismatch the original value is handed back rather than discarded,
/// so a failed narrowing never loses the caller's geometry.
impl From<Point> for GeometryValue {
    fn from(p: Point) -> Self {
        crate::construct::new_geom_point(p)
    }
}

impl TryFrom<GeometryValue> for Point {
    type Error = GeometryValue;

    fn try_from(g: GeometryValue) -> Result<Point, GeometryValue> {
        match g {
            GeometryValue::Point(p) => Ok(p.point),
            other => Err(other),
        }
    }
}

impl From<Line> for GeometryValue {
    fn from(line: Line) -> Self {
        GeometryValue::LineString(LineStringData { line, z: None, m: None, meta: None })
    }
}

impl TryFrom<GeometryValue> for Line {
    type Error = GeometryValue;

    fn try_from(g: GeometryValue) -> Result<Line, GeometryValue> {
        match g {
            GeometryValue::LineString(p) => Ok(p.line),
            other => Err(other),
        }
    }
}

impl From<Polygon> for GeometryValue {
    fn from(polygon: Polygon) -> Self {
        GeometryValue::Polygon(PolygonData { polygon, z: None, m: None, meta: None })
    }
}

impl TryFrom<GeometryValue> for Polygon {
    type Error = GeometryValue;

    fn try_from(g: GeometryValue) -> Result<Polygon, GeometryValue> {
        match g {
            GeometryValue::Polygon(p) => Ok(p.polygon),
            other => Err(other),
        }
    }
}

impl PartialEq for GeometryValue {
    /// Structural equality at the point-sequence level: per-component
    /// ordering within an unordered set (e.g. `MultiPoint`) is
    /// preserved as stored, never reordered to compare.
    fn eq(&self, other: &Self) -> bool {
        use GeometryValue::*;
        match (self, other) {
            (Point(a), Point(b)) => a.point == b.point && a.z == b.z && a.m == b.m,
            (LineString(a), LineString(b)) => a.line == b.line,
            (Polygon(a), Polygon(b)) => a.polygon == b.polygon,
            (MultiPoint(a), MultiPoint(b)) => a.points == b.points,
            (MultiLineString(a), MultiLineString(b)) => a.lines == b.lines,
            (MultiPolygon(a), MultiPolygon(b)) => a.polygons == b.polygons,
            (GeometryCollection(a), GeometryCollection(b)) => a.children == b.children,
            (Empty(a), Empty(b)) => a == b,
            (Error(_), Error(_)) => false,
            _ => false,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::Ring;

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
    fn point_fullrect_has_zero_z_m_slots() {
        let g = GeometryValue::Point(PointData {
            point: Point::new(1.0, 2.0),
            z: None,
            m: None,
            meta: None,
        });
        let (min, max, dims) = g.fullrect();
        assert_eq!(dims, 2);
        assert_eq!(min, [1.0, 2.0, 0.0, 0.0]);
        assert_eq!(max, [1.0, 2.0, 0.0, 0.0]);
    }

    #[test]
    fn copy_is_independent_of_clone() {
        let poly = Polygon::new(square(0.0, 10.0), vec![]).unwrap();
        let g = GeometryValue::Polygon(PolygonData {
            polygon: poly,
            z: None,
            m: None,
            meta: None,
        });
        let cloned = g.clone();
        let copied = g.copy();
        assert_eq!(g, cloned);
        assert_eq!(g, copied);
    }

    #[test]
    fn point_round_trips_through_geometry_value() {
        let p = Point::new(1.0, 2.0);
        let g: GeometryValue = p.into();
        let back: Point = g.try_into().unwrap();
        assert_eq!(p, back);
    }

    #[test]
    fn narrowing_the_wrong_kind_hands_the_value_back() {
        let g: GeometryValue = Point::new(1.0, 2.0).into();
        let err = Polygon::try_from(g).unwrap_err();
        assert!(matches!(err, GeometryValue::Point(_)));
    }

    #[test]
    fn display_is_non_empty_for_every_kind() {
        let values = [
            GeometryValue::Point(PointData { point: Point::new(0.0, 0.0), z: None, m: None, meta: None }),
            GeometryValue::Empty(GeometryKind::Polygon),
            GeometryValue::Error(Error::NoMemory),
        ];
        for v in values {
            assert!(!v.to_string().is_empty());
        }
    }

    #[test]
    fn error_operand_reports_conservative_defaults() {
        let g = GeometryValue::Error(Error::NoMemory);
        assert!(g.is_empty());
        assert_eq!(g.rect(), Rect::NONE);
        assert_eq!(g.num_geometries(), 0);
        assert_eq!(g.typeof_(), None);
    }
}
