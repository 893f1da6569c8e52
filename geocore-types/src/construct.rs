//! The `new_geom_*` construction surface (spec §6). Thin wrappers
//! around the lower-level `Ring`/`Line`/`Polygon` builders that attach
//! `z`/`m` and fold any `Result::Err` into `GeometryValue::Error`
//! rather than handing the caller a `Result` — every constructor here
//! returns a proper value, never a propagated error.

use crate::config::IndexStrategy;
use crate::geometry::{GeometryCollectionData, GeometryKind, LineStringData, MultiLineStringData, MultiPointData, MultiPolygonData, PointData, PolygonData};
use crate::{Error, GeometryValue, Line, Point, Polygon, Ring, ShapeError};

fn dims_ok(len: usize, z: &Option<Vec<f64>>, m: &Option<Vec<f64>>) -> Result<(), Error> {
    if let Some(z) = z {
        if z.len() != len {
            return Err(Error::Shape(ShapeError::DimsMismatch { expected: len, found: z.len() }));
        }
    }
    if let Some(m) = m {
        if m.len() != len {
            return Err(Error::Shape(ShapeError::DimsMismatch { expected: len, found: m.len() }));
        }
    }
    Ok(())
}

pub fn new_geom_point(p: Point) -> GeometryValue {
    GeometryValue::Point(PointData { point: p, z: None, m: None, meta: None })
}

pub fn new_geom_point_zm(p: Point, z: Option<f64>, m: Option<f64>) -> GeometryValue {
    GeometryValue::Point(PointData { point: p, z, m, meta: None })
}

pub fn new_geom_linestring(points: Vec<Point>) -> GeometryValue {
    new_geom_linestring_zm(points, None, None)
}

pub fn new_geom_linestring_zm(points: Vec<Point>, z: Option<Vec<f64>>, m: Option<Vec<f64>>) -> GeometryValue {
    let len = points.len();
    if let Err(e) = dims_ok(len, &z, &m) {
        return GeometryValue::Error(e);
    }
    match Line::new(points) {
        Ok(line) => GeometryValue::LineString(LineStringData {
            line,
            z: z.map(Into::into),
            m: m.map(Into::into),
            meta: None,
        }),
        Err(e) => GeometryValue::Error(e),
    }
}

pub fn new_geom_polygon(exterior: Ring, holes: Vec<Ring>) -> GeometryValue {
    new_geom_polygon_zm(exterior, holes, None, None)
}

pub fn new_geom_polygon_zm(exterior: Ring, holes: Vec<Ring>, z: Option<Vec<f64>>, m: Option<Vec<f64>>) -> GeometryValue {
    let total_points = exterior.num_points() + holes.iter().map(Ring::num_points).sum::<usize>();
    if let Err(e) = dims_ok(total_points, &z, &m) {
        return GeometryValue::Error(e);
    }
    match Polygon::new(exterior, holes) {
        Ok(polygon) => GeometryValue::Polygon(PolygonData {
            polygon,
            z: z.map(Into::into),
            m: m.map(Into::into),
            meta: None,
        }),
        Err(e) => GeometryValue::Error(e),
    }
}

pub fn new_geom_multipoint(points: Vec<Point>) -> GeometryValue {
    new_geom_multipoint_zm(points, None, None)
}

pub fn new_geom_multipoint_zm(points: Vec<Point>, z: Option<Vec<f64>>, m: Option<Vec<f64>>) -> GeometryValue {
    if let Err(e) = dims_ok(points.len(), &z, &m) {
        return GeometryValue::Error(e);
    }
    GeometryValue::MultiPoint(std::sync::Arc::new(MultiPointData::new(points, z, m)))
}

pub fn new_geom_multilinestring(lines: Vec<Line>) -> GeometryValue {
    new_geom_multilinestring_zm(lines, None, None)
}

pub fn new_geom_multilinestring_zm(lines: Vec<Line>, z: Option<Vec<f64>>, m: Option<Vec<f64>>) -> GeometryValue {
    let total_points: usize = lines.iter().map(Line::num_points).sum();
    if let Err(e) = dims_ok(total_points, &z, &m) {
        return GeometryValue::Error(e);
    }
    GeometryValue::MultiLineString(std::sync::Arc::new(MultiLineStringData::new(
        lines,
        crate::config::get_default_index(),
        z,
        m,
    )))
}

pub fn new_geom_multipolygon(polygons: Vec<Polygon>) -> GeometryValue {
    new_geom_multipolygon_zm(polygons, None, None)
}

pub fn new_geom_multipolygon_zm(polygons: Vec<Polygon>, z: Option<Vec<f64>>, m: Option<Vec<f64>>) -> GeometryValue {
    let total_points: usize = polygons
        .iter()
        .map(|p| p.exterior().num_points() + p.holes().iter().map(Ring::num_points).sum::<usize>())
        .sum();
    if let Err(e) = dims_ok(total_points, &z, &m) {
        return GeometryValue::Error(e);
    }
    GeometryValue::MultiPolygon(std::sync::Arc::new(MultiPolygonData::new(
        polygons,
        crate::config::get_default_index(),
        z,
        m,
    )))
}

/// Builds a `GeometryCollection`, rejecting nesting deeper than
/// [`crate::config::MAX_COLLECTION_DEPTH`] (spec §7: "Depth
/// exceeded").
pub fn new_geom_geometrycollection(children: Vec<GeometryValue>) -> GeometryValue {
    if collection_depth(&children) > crate::config::MAX_COLLECTION_DEPTH {
        return GeometryValue::Error(Error::DepthExceeded {
            max: crate::config::MAX_COLLECTION_DEPTH,
        });
    }
    GeometryValue::GeometryCollection(std::sync::Arc::new(GeometryCollectionData::new(
        children,
        crate::config::get_default_index(),
    )))
}

fn collection_depth(children: &[GeometryValue]) -> u32 {
    children
        .iter()
        .map(|c| match c {
            GeometryValue::GeometryCollection(inner) => 1 + collection_depth(&inner.children),
            _ => 1,
        })
        .max()
        .unwrap_or(0)
}

pub fn new_geom_point_empty() -> GeometryValue {
    GeometryValue::Empty(GeometryKind::Point)
}
pub fn new_geom_linestring_empty() -> GeometryValue {
    GeometryValue::Empty(GeometryKind::LineString)
}
pub fn new_geom_polygon_empty() -> GeometryValue {
    GeometryValue::Empty(GeometryKind::Polygon)
}
pub fn new_geom_multipoint_empty() -> GeometryValue {
    GeometryValue::Empty(GeometryKind::MultiPoint)
}
pub fn new_geom_multilinestring_empty() -> GeometryValue {
    GeometryValue::Empty(GeometryKind::MultiLineString)
}
pub fn new_geom_multipolygon_empty() -> GeometryValue {
    GeometryValue::Empty(GeometryKind::MultiPolygon)
}
pub fn new_geom_geometrycollection_empty() -> GeometryValue {
    GeometryValue::Empty(GeometryKind::GeometryCollection)
}

/// `Ring::new`/`Ring::new_indexed` re-exported under the External
/// Interfaces names.
pub fn new_ring(points: Vec<Point>) -> Result<Ring, Error> {
    Ring::new(points)
}

pub fn new_ring_indexed(points: Vec<Point>, strategy: IndexStrategy) -> Result<Ring, Error> {
    Ring::new_indexed(points, strategy)
}

pub fn new_line(points: Vec<Point>) -> Result<Line, Error> {
    Line::new(points)
}

pub fn new_polygon(exterior: Ring, holes: Vec<Ring>) -> Result<Polygon, Error> {
    Polygon::new(exterior, holes)
}

/// Approximates a circle of `radius` around `center` with `steps`
/// points, evenly spaced by angle.
pub fn circle(center: Point, radius: f64, steps: usize, strategy: IndexStrategy) -> Result<Ring, Error> {
    let steps = steps.max(3);
    let points: Vec<Point> = (0..steps)
        .map(|i| {
            let theta = 2.0 * std::f64::consts::PI * (i as f64) / (steps as f64);
            Point::new(center.x + radius * theta.cos(), center.y + radius * theta.sin())
        })
        .collect();
    Ring::new_indexed(points, strategy)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn dims_mismatch_is_an_error() {
        let g = new_geom_linestring_zm(
            vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)],
            Some(vec![1.0]),
            None,
        );
        assert!(matches!(g, GeometryValue::Error(Error::Shape(ShapeError::DimsMismatch { .. }))));
    }

    #[test]
    fn depth_exceeded_is_reported() {
        let mut inner = new_geom_point_empty();
        let mut saw_depth_error = false;
        for _ in 0..=crate::config::MAX_COLLECTION_DEPTH {
            inner = new_geom_geometrycollection(vec![inner]);
            if matches!(inner, GeometryValue::Error(Error::DepthExceeded { .. })) {
                saw_depth_error = true;
                break;
            }
        }
        assert!(saw_depth_error);
    }

    #[test]
    fn circle_approximates_unit_disk() {
        let ring = circle(Point::new(0.0, 0.0), 1.0, 64, IndexStrategy::Natural { spread: None }).unwrap();
        let rect = ring.rect();
        assert!((rect.width() - 2.0).abs() < 0.01);
        assert!((rect.height() - 2.0).abs() < 0.01);
        assert!(ring.polsby_popper_score() > 0.97);
    }
}
