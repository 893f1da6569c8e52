use crate::config::IndexStrategy;
use crate::ring::PointSeq;
use crate::{Error, Point, Rect, Segment, ShapeError};

/// An open planar polyline.
///
/// Representation is identical to [`Ring`](crate::Ring) — the same
/// contiguous point storage and the same index machinery — except the
/// first and last points are not forced to coincide, and the
/// convexity/winding flags a ring caches are meaningless here (there
/// is no interior) and simply unused.
#[derive(Debug, Clone)]
pub struct Line {
    inner: PointSeq,
}

impl Line {
    pub fn new(points: Vec<Point>) -> Result<Line, Error> {
        Line::new_indexed(points, crate::config::get_default_index())
    }

    pub fn new_indexed(points: Vec<Point>, strategy: IndexStrategy) -> Result<Line, Error> {
        if points.len() < 2 {
            return Err(Error::Shape(ShapeError::LineTooShort { len: points.len() }));
        }
        Ok(Line {
            inner: PointSeq::build(points, strategy, false),
        })
    }

    pub fn empty() -> Line {
        Line {
            inner: PointSeq::build(Vec::new(), IndexStrategy::None, false),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.inner.num_points() == 0
    }

    pub fn num_points(&self) -> usize {
        self.inner.num_points()
    }

    pub fn num_segments(&self) -> usize {
        self.inner.num_segments()
    }

    pub fn point_at(&self, i: usize) -> Point {
        self.inner.point_at(i)
    }

    pub fn segment_at(&self, i: usize) -> Segment {
        self.inner.segment_at(i)
    }

    pub fn rect(&self) -> Rect {
        self.inner.rect
    }

    pub fn start_point(&self) -> Option<Point> {
        (!self.is_empty()).then(|| self.point_at(0))
    }

    pub fn end_point(&self) -> Option<Point> {
        (!self.is_empty()).then(|| self.point_at(self.num_points() - 1))
    }

    pub fn search(&self, query: &Rect, visit: impl FnMut(Segment, usize) -> bool) -> bool {
        self.inner.search(query, visit)
    }

    pub fn length(&self) -> f64 {
        (0..self.num_segments()).map(|i| self.segment_at(i).length()).sum()
    }
}

impl PartialEq for Line {
    fn eq(&self, other: &Self) -> bool {
        self.inner.points_slice() == other.inner.points_slice()
    }
}

impl std::fmt::Display for Line {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line(")?;
        for (i, p) in self.inner.points_slice().iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{p}")?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn open_sequence_is_not_closed() {
        let line = Line::new(vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0), Point::new(2.0, 0.0)]).unwrap();
        assert_ne!(line.start_point(), line.end_point());
        assert_eq!(line.num_segments(), 2);
    }

    #[test]
    fn too_short_is_an_error() {
        let err = Line::new(vec![Point::new(0.0, 0.0)]).unwrap_err();
        assert!(matches!(err, Error::Shape(ShapeError::LineTooShort { .. })));
    }

    #[test]
    fn display_lists_points_in_order() {
        let line = Line::new(vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)]).unwrap();
        assert_eq!(line.to_string(), "line((0, 0), (1, 1))");
    }
}
