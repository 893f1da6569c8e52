use super::{FeatureMeta, GeometryValue, MULTI_INDEX_THRESHOLD};
use crate::config::IndexStrategy;
use crate::index::RectIndex;
use crate::{Line, Point, Polygon, Rect};
use std::sync::Arc;

/// Second-level hierarchical index over a multi-geometry's children's
/// bounding rects. Built automatically once the child count exceeds
/// [`MULTI_INDEX_THRESHOLD`]; reuses the same [`RectIndex`] machinery
/// the ring index is built from; this spec keeps a separate name for
/// it only because it indexes whole-geometry rects, not ring edges.
#[derive(Debug, Clone)]
pub struct MultiIndex {
    index: RectIndex,
}

impl MultiIndex {
    /// Builds an index over `rects` if there are enough of them to be
    /// worth it, else returns `None`.
    pub fn build_if_worthwhile(rects: &[Rect], strategy: IndexStrategy) -> Option<MultiIndex> {
        if rects.len() <= MULTI_INDEX_THRESHOLD {
            return None;
        }
        Some(MultiIndex {
            index: RectIndex::build(rects, strategy),
        })
    }

    /// Invokes `visit(child_index)` for every child whose rect may
    /// intersect `query`.
    pub fn search(&self, rects: &[Rect], query: &Rect, visit: impl FnMut(usize) -> bool) -> bool {
        self.index.search(rects, query, visit)
    }
}

/// Enumerates children whose rect intersects `query`, using `index`
/// when present and falling back to a linear scan of `rects`
/// otherwise. Shared by every multi-/collection-kind `search_geom`.
pub(crate) fn search_children(
    rects: &[Rect],
    index: Option<&MultiIndex>,
    query: &Rect,
    mut visit: impl FnMut(usize) -> bool,
) -> bool {
    match index {
        Some(idx) => idx.search(rects, query, visit),
        None => {
            for (i, r) in rects.iter().enumerate() {
                if r.intersects_rect(query) && !visit(i) {
                    return false;
                }
            }
            true
        }
    }
}

fn union_rects(rects: impl Iterator<Item = Rect>) -> Rect {
    rects.fold(Rect::NONE, |acc, r| acc.expand(&r))
}

#[derive(Debug)]
pub struct MultiPointData {
    pub points: Vec<Point>,
    pub rect: Rect,
    pub z: Option<Arc<[f64]>>,
    pub m: Option<Arc<[f64]>>,
    pub meta: Option<Arc<FeatureMeta>>,
}

impl MultiPointData {
    pub fn new(points: Vec<Point>, z: Option<Vec<f64>>, m: Option<Vec<f64>>) -> MultiPointData {
        let rect = union_rects(points.iter().map(|p| Rect::from_point(*p)));
        MultiPointData {
            points,
            rect,
            z: z.map(Into::into),
            m: m.map(Into::into),
            meta: None,
        }
    }

    pub fn geometry_at(&self, i: usize) -> Option<GeometryValue> {
        self.points.get(i).map(|p| {
            GeometryValue::Point(super::value::PointData {
                point: *p,
                z: self.z.as_ref().and_then(|z| z.get(i)).copied(),
                m: self.m.as_ref().and_then(|m| m.get(i)).copied(),
                meta: None,
            })
        })
    }
}

#[derive(Debug)]
pub struct MultiLineStringData {
    pub lines: Vec<Line>,
    pub rect: Rect,
    pub index: Option<MultiIndex>,
    pub z: Option<Arc<[f64]>>,
    pub m: Option<Arc<[f64]>>,
    pub meta: Option<Arc<FeatureMeta>>,
}

impl MultiLineStringData {
    pub fn new(lines: Vec<Line>, strategy: IndexStrategy, z: Option<Vec<f64>>, m: Option<Vec<f64>>) -> MultiLineStringData {
        let rects: Vec<Rect> = lines.iter().map(Line::rect).collect();
        let rect = union_rects(rects.iter().copied());
        let index = MultiIndex::build_if_worthwhile(&rects, strategy);
        MultiLineStringData {
            lines,
            rect,
            index,
            z: z.map(Into::into),
            m: m.map(Into::into),
            meta: None,
        }
    }

    pub fn rects(&self) -> Vec<Rect> {
        self.lines.iter().map(Line::rect).collect()
    }

    pub fn geometry_at(&self, i: usize) -> Option<GeometryValue> {
        self.lines.get(i).map(|l| {
            GeometryValue::LineString(super::value::LineStringData {
                line: l.clone(),
                z: None,
                m: None,
                meta: None,
            })
        })
    }
}

#[derive(Debug)]
pub struct MultiPolygonData {
    pub polygons: Vec<Polygon>,
    pub rect: Rect,
    pub index: Option<MultiIndex>,
    pub z: Option<Arc<[f64]>>,
    pub m: Option<Arc<[f64]>>,
    pub meta: Option<Arc<FeatureMeta>>,
}

impl MultiPolygonData {
    pub fn new(polygons: Vec<Polygon>, strategy: IndexStrategy, z: Option<Vec<f64>>, m: Option<Vec<f64>>) -> MultiPolygonData {
        let rects: Vec<Rect> = polygons.iter().map(Polygon::rect).collect();
        let rect = union_rects(rects.iter().copied());
        let index = MultiIndex::build_if_worthwhile(&rects, strategy);
        MultiPolygonData {
            polygons,
            rect,
            index,
            z: z.map(Into::into),
            m: m.map(Into::into),
            meta: None,
        }
    }

    pub fn rects(&self) -> Vec<Rect> {
        self.polygons.iter().map(Polygon::rect).collect()
    }

    pub fn geometry_at(&self, i: usize) -> Option<GeometryValue> {
        self.polygons.get(i).map(|p| {
            GeometryValue::Polygon(super::value::PolygonData {
                polygon: p.clone(),
                z: None,
                m: None,
                meta: None,
            })
        })
    }
}

#[derive(Debug)]
pub struct GeometryCollectionData {
    pub children: Vec<GeometryValue>,
    pub rect: Rect,
    pub index: Option<MultiIndex>,
    pub meta: Option<Arc<FeatureMeta>>,
}

impl GeometryCollectionData {
    pub fn new(children: Vec<GeometryValue>, strategy: IndexStrategy) -> GeometryCollectionData {
        let rects: Vec<Rect> = children.iter().map(GeometryValue::rect).collect();
        let rect = union_rects(rects.iter().copied());
        let index = MultiIndex::build_if_worthwhile(&rects, strategy);
        GeometryCollectionData {
            children,
            rect,
            index,
            meta: None,
        }
    }

    pub fn rects(&self) -> Vec<Rect> {
        self.children.iter().map(GeometryValue::rect).collect()
    }

    pub fn geometry_at(&self, i: usize) -> Option<GeometryValue> {
        self.children.get(i).cloned()
    }
}
