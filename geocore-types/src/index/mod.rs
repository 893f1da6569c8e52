//! The two ring index strategies (§4.2) plus the generic hierarchical
//! builder they (and the multi-geometry index, §4.5) share.
//!
//! Both strategies answer the same question — "which of these `n`
//! rects might intersect a query rect?" — over a fixed, immutable set
//! of rects built once at construction time. [`HierarchicalIndex`] is
//! the "natural" strategy; it is generic over what the leaves
//! represent (ring edges or multi-geometry children) so it is reused
//! by [`crate::geometry::MultiIndex`] without duplicating the
//! grouping algorithm.

mod natural;
mod ystripes;

pub use natural::HierarchicalIndex;
pub use ystripes::YstripesIndex;

use crate::config::IndexStrategy;
use crate::Rect;

/// A built index over a fixed slice of rects, or the absence of one.
/// `None` falls back to a full linear scan in every search.
#[derive(Debug, Clone)]
pub enum RectIndex {
    None,
    Natural(HierarchicalIndex),
    Ystripes(YstripesIndex),
}

impl RectIndex {
    /// Rings/multi-geometries below this many items skip indexing
    /// even when a strategy was requested: the index's own bookkeeping
    /// would cost more than a linear scan ever could.
    pub const MIN_INDEXED_LEN: usize = 8;

    /// Builds the requested strategy over `rects`, falling back to
    /// [`RectIndex::None`] when there are too few items to bother, or
    /// when the allocator hook reports memory pressure (spec §7:
    /// "callers fall back to the un-indexed strategy automatically
    /// when memory pressure is detected during construction").
    pub fn build(rects: &[Rect], strategy: IndexStrategy) -> RectIndex {
        if rects.len() < Self::MIN_INDEXED_LEN {
            return RectIndex::None;
        }
        let estimated_bytes = rects.len() * std::mem::size_of::<Rect>() * 2;
        if !crate::config::try_reserve(estimated_bytes) {
            log::warn!(
                "index construction over {} rects skipped: allocator reported pressure",
                rects.len()
            );
            return RectIndex::None;
        }
        match strategy {
            IndexStrategy::None => RectIndex::None,
            IndexStrategy::Natural { .. } => {
                RectIndex::Natural(HierarchicalIndex::build(rects, strategy.resolved_spread() as usize))
            }
            IndexStrategy::Ystripes { .. } => RectIndex::Ystripes(YstripesIndex::build(rects)),
        }
    }

    /// Invokes `visit(leaf_index)` for every leaf whose rect may
    /// intersect `query`; a superset of the true hits, per the
    /// equivalence invariant of §4.2. `visit` returning `false`
    /// terminates the search early; the return value mirrors that
    /// (`false` if terminated early, `true` on full completion).
    pub fn search(&self, rects: &[Rect], query: &Rect, mut visit: impl FnMut(usize) -> bool) -> bool {
        match self {
            RectIndex::None => {
                for (i, r) in rects.iter().enumerate() {
                    if r.intersects_rect(query) && !visit(i) {
                        return false;
                    }
                }
                true
            }
            RectIndex::Natural(idx) => idx.search(query, visit),
            RectIndex::Ystripes(idx) => idx.search(rects, query, visit),
        }
    }
}
