use geocore_types::{Rect, Segment};

use super::raycast::on_segment;

/// True iff both corners of `rect` lie on `segment` — only possible
/// for a degenerate (point) rect, or an axis-aligned segment running
/// exactly along one of the rect's edges.
pub fn segment_covers_rect(segment: Segment, rect: &Rect) -> bool {
    (0..4).all(|i| on_segment(segment.a, segment.b, rect.point_at(i)))
}

/// True iff `segment` intersects `rect`, via Liang-Barsky clipping of
/// the segment's parameter range against the rect's four half-planes.
pub fn segment_intersects_rect(segment: Segment, rect: &Rect) -> bool {
    if rect.covers_point(&segment.a) || rect.covers_point(&segment.b) {
        return true;
    }

    let dx = segment.b.x - segment.a.x;
    let dy = segment.b.y - segment.a.y;
    let mut t_min = 0.0_f64;
    let mut t_max = 1.0_f64;

    let clips = [
        (-dx, segment.a.x - rect.min.x),
        (dx, rect.max.x - segment.a.x),
        (-dy, segment.a.y - rect.min.y),
        (dy, rect.max.y - segment.a.y),
    ];

    for (p, q) in clips {
        if p == 0.0 {
            if q < 0.0 {
                return false;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t_max {
                return false;
            }
            if r > t_min {
                t_min = r;
            }
        } else {
            if r < t_min {
                return false;
            }
            if r < t_max {
                t_max = r;
            }
        }
    }
    t_min <= t_max
}

#[cfg(test)]
mod test {
    use super::*;
    use geocore_types::Point;

    #[test]
    fn edge_aligned_segment_covers_rect() {
        let seg = Segment::new(Point::new(0.0, 0.0), Point::new(0.0, 4.0));
        let rect = Rect::new(Point::new(0.0, 1.0), Point::new(0.0, 3.0));
        assert!(segment_covers_rect(seg, &rect));
    }

    #[test]
    fn diagonal_through_rect_intersects() {
        let seg = Segment::new(Point::new(-1.0, -1.0), Point::new(5.0, 5.0));
        let rect = Rect::new(Point::new(0.0, 0.0), Point::new(2.0, 2.0));
        assert!(segment_intersects_rect(seg, &rect));
    }

    #[test]
    fn segment_missing_rect_does_not_intersect() {
        let seg = Segment::new(Point::new(10.0, 10.0), Point::new(20.0, 20.0));
        let rect = Rect::new(Point::new(0.0, 0.0), Point::new(2.0, 2.0));
        assert!(!segment_intersects_rect(seg, &rect));
    }
}
