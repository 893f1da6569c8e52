use std::cmp::Ordering;
use std::collections::BinaryHeap;

use geocore_types::{Ring, Segment};

/// One entry in the best-first queue: either an index node (ordered
/// by its rect's distance to the query) or a leaf edge (ordered by
/// its own `seg_dist`). Both share one priority space so the smallest
/// lower bound overall is always expanded next, which is what makes
/// the traversal emit leaves in non-decreasing `seg_dist` order.
struct QueueItem {
    key: f64,
    leaf: Option<(Segment, usize)>,
}

impl PartialEq for QueueItem {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}
impl Eq for QueueItem {}
impl PartialOrd for QueueItem {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for QueueItem {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap; reverse so the smallest key pops first.
        other.key.partial_cmp(&self.key).unwrap_or(Ordering::Equal)
    }
}

/// Visits `ring`'s edges in non-decreasing order of `seg_dist`, using
/// the ring's own `search` to prune by rect distance first. This is a
/// simplified best-first traversal: since the ring's index exposes
/// only a flat edge enumeration (not the internal tree levels), the
/// "index node" granularity collapses to one entry per edge and the
/// bound used is `rect_dist` of that edge's own bounding rect — still
/// a valid lower bound on `seg_dist`, since every point of a segment
/// lies within its own rect.
///
/// `visit(seg, dist, index)` may return `false` to stop early.
/// Returns `true` on normal completion (queue drained or visitor
/// requested stop), `false` only if the queue itself could not be
/// grown (out of memory).
pub fn nearest_segment(
    ring: &Ring,
    rect_dist: impl Fn(&geocore_types::Rect) -> f64,
    seg_dist: impl Fn(Segment) -> f64,
    mut visit: impl FnMut(Segment, f64, usize) -> bool,
) -> bool {
    let mut heap: BinaryHeap<QueueItem> = BinaryHeap::new();

    let full = ring.rect();
    if !geocore_types::config::allocator_probe(std::mem::size_of::<QueueItem>()) {
        return false;
    }
    heap.push(QueueItem {
        key: rect_dist(&full),
        leaf: None,
    });

    // The "node" entry above stands for the whole ring; expanding it
    // enqueues every edge directly, since there is no intermediate
    // level exposed through `Ring::search`.
    let mut expanded_root = false;

    while let Some(item) = heap.pop() {
        match item.leaf {
            None if !expanded_root => {
                expanded_root = true;
                let mut ok = true;
                ring.search(&full, |seg, idx| {
                    if !geocore_types::config::allocator_probe(std::mem::size_of::<QueueItem>()) {
                        ok = false;
                        return false;
                    }
                    heap.push(QueueItem {
                        key: seg_dist(seg),
                        leaf: Some((seg, idx)),
                    });
                    true
                });
                if !ok {
                    return false;
                }
            }
            None => unreachable!("root expanded at most once"),
            Some((seg, idx)) => {
                if !visit(seg, item.key, idx) {
                    return true;
                }
            }
        }
    }
    true
}

#[cfg(test)]
mod test {
    use super::*;
    use geocore_types::Point;

    fn arizona_outline() -> Ring {
        // A coarse but non-convex approximation, enough edges to
        // exercise best-first ordering without a real dataset.
        let pts = [
            (-114.8, 37.0),
            (-110.0, 37.0),
            (-109.0, 31.3),
            (-111.0, 31.3),
            (-112.6, 32.5),
            (-114.6, 32.7),
            (-114.7, 34.7),
        ];
        Ring::new(pts.into_iter().map(|(x, y)| Point::new(x, y)).collect()).unwrap()
    }

    #[test]
    fn emits_segments_in_monotonic_distance_order() {
        let ring = arizona_outline();
        // Well outside the shape, south and east of it.
        let target = Point::new(-105.0, 28.0);

        let mut seen = Vec::new();
        nearest_segment(
            &ring,
            |r| r.distance_rect(&geocore_types::Rect::from_point(target)),
            |s| segment_point_distance(s, target),
            |seg, dist, idx| {
                seen.push((idx, dist));
                let _ = seg;
                seen.len() < ring.num_segments()
            },
        );

        assert_eq!(seen.len(), ring.num_segments());
        let mut last = f64::NEG_INFINITY;
        let mut indices = std::collections::HashSet::new();
        for (idx, dist) in &seen {
            assert!(*dist >= last - 1e-9);
            last = *dist;
            assert!(indices.insert(*idx));
        }
    }

    fn segment_point_distance(s: Segment, p: Point) -> f64 {
        let (a, b) = (s.a, s.b);
        let dx = b.x - a.x;
        let dy = b.y - a.y;
        let len2 = dx * dx + dy * dy;
        if len2 == 0.0 {
            return a.distance(&p);
        }
        let t = (((p.x - a.x) * dx + (p.y - a.y) * dy) / len2).clamp(0.0, 1.0);
        let proj = Point::new(a.x + t * dx, a.y + t * dy);
        proj.distance(&p)
    }
}
