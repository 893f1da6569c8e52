use crate::Rect;

/// Sequential-edge R-tree, built bottom-up once at construction.
///
/// `n` leaf rects are partitioned into consecutive groups of `spread`;
/// each group's bounding rect becomes a level-0 node. Grouping repeats
/// on the level-0 rects to build level 1, and so on until a single
/// root rect remains. This mirrors an R-tree restricted to sequential
/// (never re-balanced) leaves, which is exactly right for a ring's
/// edges: they never move after construction.
#[derive(Debug, Clone)]
pub struct HierarchicalIndex {
    /// `levels[0]` groups the raw leaves; each subsequent level groups
    /// the rects of the level below. `levels.last()` always has
    /// exactly one rect: the root.
    levels: Vec<Vec<Rect>>,
    spread: usize,
    len: usize,
}

impl HierarchicalIndex {
    pub fn build(rects: &[Rect], spread: usize) -> Self {
        let spread = spread.max(2);
        let mut levels = Vec::new();
        let mut current = group(rects, spread);
        levels.push(current.clone());
        while current.len() > 1 {
            current = group(&current, spread);
            levels.push(current);
        }
        HierarchicalIndex {
            levels,
            spread,
            len: rects.len(),
        }
    }

    pub fn num_levels(&self) -> usize {
        self.levels.len()
    }

    pub fn root_rect(&self) -> Rect {
        self.levels
            .last()
            .and_then(|top| top.first())
            .copied()
            .unwrap_or(Rect::NONE)
    }

    /// Descends level-by-level, pruning any branch whose group rect
    /// does not intersect `query`, and performs an exact test against
    /// `rects[leaf]` before invoking `visit` — so the reported set
    /// matches a linear scan's exactly, regardless of branching.
    pub fn search(&self, rects: &[Rect], query: &Rect, mut visit: impl FnMut(usize) -> bool) -> bool {
        if self.levels.is_empty() {
            return true;
        }
        let top = self.levels.len() - 1;
        self.search_level(top, 0, rects, query, &mut visit)
    }

    fn search_level(
        &self,
        level: usize,
        node: usize,
        rects: &[Rect],
        query: &Rect,
        visit: &mut impl FnMut(usize) -> bool,
    ) -> bool {
        let Some(rect) = self.levels[level].get(node) else {
            return true;
        };
        if !rect.intersects_rect(query) {
            return true;
        }
        if level == 0 {
            let start = node * self.spread;
            let end = (start + self.spread).min(self.len);
            for leaf in start..end {
                if rects[leaf].intersects_rect(query) && !visit(leaf) {
                    return false;
                }
            }
            return true;
        }
        let child_count = self.levels[level - 1].len();
        let start = node * self.spread;
        let end = (start + self.spread).min(child_count);
        for child in start..end {
            if !self.search_level(level - 1, child, rects, query, visit) {
                return false;
            }
        }
        true
    }
}

fn group(rects: &[Rect], spread: usize) -> Vec<Rect> {
    rects
        .chunks(spread)
        .map(|chunk| chunk.iter().fold(Rect::NONE, |acc, r| acc.expand(r)))
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::Point;

    fn rects_of(n: usize) -> Vec<Rect> {
        (0..n)
            .map(|i| Rect::from_point(Point::new(i as f64, 0.0)))
            .collect()
    }

    #[test]
    fn search_finds_everything_a_linear_scan_would() {
        let rects = rects_of(300);
        let idx = HierarchicalIndex::build(&rects, 16);
        let query = Rect::new(Point::new(50.0, -1.0), Point::new(75.0, 1.0));

        let mut expected: Vec<usize> = (0..rects.len())
            .filter(|&i| rects[i].intersects_rect(&query))
            .collect();
        let mut got = Vec::new();
        idx.search(&rects, &query, |i| {
            got.push(i);
            true
        });
        got.sort_unstable();
        expected.sort_unstable();
        assert_eq!(got, expected);
    }

    #[test]
    fn visit_returning_false_stops_early() {
        let rects = rects_of(300);
        let idx = HierarchicalIndex::build(&rects, 16);
        let query = Rect::new(Point::new(-1.0, -1.0), Point::new(299.0, 1.0));
        let mut seen = 0;
        let completed = idx.search(&rects, &query, |_| {
            seen += 1;
            seen < 5
        });
        assert!(!completed);
        assert_eq!(seen, 5);
    }

    #[test]
    fn root_rect_covers_everything() {
        let rects = rects_of(50);
        let idx = HierarchicalIndex::build(&rects, 4);
        let root = idx.root_rect();
        for r in &rects {
            assert!(root.covers_rect(r));
        }
    }
}
