use geocore_types::{Point, Segment};

use super::raycast::on_segment;

/// True iff the closed segments share any point: a proper crossing, a
/// shared endpoint, a T-touch, or collinear overlap. Handles all 24
/// reflected configurations of the orientation test.
pub fn segments_intersect(a: Segment, b: Segment) -> bool {
    let (p1, p2) = (a.a, a.b);
    let (p3, p4) = (b.a, b.b);

    let d1 = orientation(p3, p4, p1);
    let d2 = orientation(p3, p4, p2);
    let d3 = orientation(p1, p2, p3);
    let d4 = orientation(p1, p2, p4);

    if ((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0)) && ((d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0)) {
        return true;
    }

    if d1 == 0.0 && on_segment(p3, p4, p1) {
        return true;
    }
    if d2 == 0.0 && on_segment(p3, p4, p2) {
        return true;
    }
    if d3 == 0.0 && on_segment(p1, p2, p3) {
        return true;
    }
    if d4 == 0.0 && on_segment(p1, p2, p4) {
        return true;
    }
    false
}

/// Signed area of the triangle `(a, b, c)`, twice over: positive if
/// `c` is left of the directed line `a -> b`, negative if right, zero
/// if collinear.
fn orientation(a: Point, b: Point, c: Point) -> f64 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn proper_crossing() {
        let a = Segment::new(Point::new(0.0, 0.0), Point::new(4.0, 4.0));
        let b = Segment::new(Point::new(0.0, 4.0), Point::new(4.0, 0.0));
        assert!(segments_intersect(a, b));
    }

    #[test]
    fn disjoint_segments() {
        let a = Segment::new(Point::new(0.0, 0.0), Point::new(1.0, 0.0));
        let b = Segment::new(Point::new(2.0, 2.0), Point::new(3.0, 3.0));
        assert!(!segments_intersect(a, b));
    }

    #[test]
    fn t_touch_counts() {
        let a = Segment::new(Point::new(0.0, 0.0), Point::new(4.0, 0.0));
        let b = Segment::new(Point::new(2.0, 0.0), Point::new(2.0, 4.0));
        assert!(segments_intersect(a, b));
    }

    #[test]
    fn collinear_overlap_counts() {
        let a = Segment::new(Point::new(0.0, 0.0), Point::new(4.0, 0.0));
        let b = Segment::new(Point::new(2.0, 0.0), Point::new(6.0, 0.0));
        assert!(segments_intersect(a, b));
    }

    #[test]
    fn collinear_disjoint_does_not_count() {
        let a = Segment::new(Point::new(0.0, 0.0), Point::new(2.0, 0.0));
        let b = Segment::new(Point::new(3.0, 0.0), Point::new(5.0, 0.0));
        assert!(!segments_intersect(a, b));
    }

    #[test]
    fn shared_endpoint_counts() {
        let a = Segment::new(Point::new(0.0, 0.0), Point::new(2.0, 2.0));
        let b = Segment::new(Point::new(2.0, 2.0), Point::new(4.0, 0.0));
        assert!(segments_intersect(a, b));
    }
}
