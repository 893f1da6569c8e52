//! Process-wide state `S`: the default index strategy, the index
//! spread, the allocator triplet, and the "print floats as fixed"
//! flag. Readable/writable at any time from a single setup thread;
//! tests save and restore it with [`ContextGuard`] rather than
//! mutating it permanently.
//!
//! A target that prefers per-context state over process globals can
//! wrap [`Context`] in a handle of its own; the surface semantics
//! (what each setter/getter means) are unchanged either way.

use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU8, Ordering};
use std::sync::OnceLock;

/// Smallest index spread accepted by [`set_index_spread`]; requests
/// below this are clamped up.
pub const SPREAD_MIN: u32 = 2;
/// Largest index spread accepted by [`set_index_spread`]; requests
/// above this are clamped down.
pub const SPREAD_MAX: u32 = 4096;
/// Default branching factor for the natural hierarchical ring index.
pub const SPREAD_DEFAULT: u32 = 16;
/// Maximum `GeometryCollection` nesting depth (compile-time constant
/// in the source this is ported from; kept as a constant here too).
pub const MAX_COLLECTION_DEPTH: u32 = 1024;

/// Which ring index strategy to build, and at what spread.
///
/// The "composed form" of the external tag surface (spec §6: "a small
/// integer... combining a strategy with an override spread in the
/// upper bits") is implemented by [`IndexStrategy::to_tag`] /
/// [`IndexStrategy::from_tag`]; idiomatic Rust call sites should
/// prefer this enum directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexStrategy {
    /// Skip index construction; `search` falls back to a linear scan.
    None,
    /// Hierarchical bounding-rect index over consecutive edge groups.
    /// `spread` of `None` means "use the process default".
    Natural { spread: Option<u32> },
    /// Horizontal-stripe bucket index keyed by y-coordinate.
    Ystripes { spread: Option<u32> },
}

impl IndexStrategy {
    const TAG_NONE: u32 = 0;
    const TAG_NATURAL: u32 = 1;
    const TAG_YSTRIPES: u32 = 2;
    const TAG_BITS: u32 = 2;
    const TAG_MASK: u32 = 0b11;

    /// Packs the strategy and an optional spread override into a
    /// single integer, matching the FFI-facing "composed form".
    pub fn to_tag(self) -> u32 {
        let (base, spread) = match self {
            IndexStrategy::None => (Self::TAG_NONE, 0),
            IndexStrategy::Natural { spread } => (Self::TAG_NATURAL, spread.unwrap_or(0)),
            IndexStrategy::Ystripes { spread } => (Self::TAG_YSTRIPES, spread.unwrap_or(0)),
        };
        base | (spread << Self::TAG_BITS)
    }

    /// Extracts `(strategy, spread_or_default)` from a packed tag.
    pub fn from_tag(tag: u32) -> IndexStrategy {
        let base = tag & Self::TAG_MASK;
        let raw_spread = tag >> Self::TAG_BITS;
        let spread = if raw_spread == 0 {
            None
        } else {
            Some(raw_spread.clamp(SPREAD_MIN, SPREAD_MAX))
        };
        match base {
            Self::TAG_NATURAL => IndexStrategy::Natural { spread },
            Self::TAG_YSTRIPES => IndexStrategy::Ystripes { spread },
            _ => IndexStrategy::None,
        }
    }

    /// Resolves `spread`, falling back to the process default when
    /// this strategy did not request an override.
    pub fn resolved_spread(self) -> u32 {
        match self {
            IndexStrategy::Natural { spread: Some(s) } | IndexStrategy::Ystripes { spread: Some(s) } => {
                s.clamp(SPREAD_MIN, SPREAD_MAX)
            }
            _ => get_index_spread(),
        }
    }
}

impl Default for IndexStrategy {
    fn default() -> Self {
        IndexStrategy::Natural { spread: None }
    }
}

/// The allocate/reallocate/free triplet. Defaults to routing through
/// the system allocator (`Vec`/`Box`); a caller may install hooks that
/// simulate allocation pressure so constructors can be tested for
/// graceful degradation (spec §7: "Index construction may fail only
/// with no-memory; callers fall back to the un-indexed strategy
/// automatically").
#[derive(Clone, Copy)]
pub struct AllocatorHooks {
    /// Returns `true` if an allocation of `size` bytes would succeed.
    /// The default hook always returns `true`; fault-injection tests
    /// install a hook that returns `false` after a budget is spent.
    pub try_reserve: fn(size: usize) -> bool,
}

impl Default for AllocatorHooks {
    fn default() -> Self {
        AllocatorHooks {
            try_reserve: |_size| true,
        }
    }
}

impl std::fmt::Debug for AllocatorHooks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AllocatorHooks").finish_non_exhaustive()
    }
}

struct GlobalState {
    default_index: AtomicU8,
    default_spread_override: AtomicU32,
    index_spread: AtomicU32,
    print_fixed_floats: AtomicBool,
    allocator: std::sync::RwLock<AllocatorHooks>,
}

fn state() -> &'static GlobalState {
    static STATE: OnceLock<GlobalState> = OnceLock::new();
    STATE.get_or_init(|| GlobalState {
        default_index: AtomicU8::new(IndexStrategy::TAG_NATURAL as u8),
        default_spread_override: AtomicU32::new(0),
        index_spread: AtomicU32::new(SPREAD_DEFAULT),
        print_fixed_floats: AtomicBool::new(false),
        allocator: std::sync::RwLock::new(AllocatorHooks::default()),
    })
}

/// Sets the process-wide default index strategy used by constructors
/// that do not explicitly request one (`new_ring`, as opposed to
/// `new_ring_indexed`).
pub fn set_default_index(strategy: IndexStrategy) {
    let s = state();
    let (tag, spread) = match strategy {
        IndexStrategy::None => (IndexStrategy::TAG_NONE, 0),
        IndexStrategy::Natural { spread } => (IndexStrategy::TAG_NATURAL, spread.unwrap_or(0)),
        IndexStrategy::Ystripes { spread } => (IndexStrategy::TAG_YSTRIPES, spread.unwrap_or(0)),
    };
    s.default_index.store(tag as u8, Ordering::SeqCst);
    s.default_spread_override.store(spread, Ordering::SeqCst);
    log::debug!("default index strategy set to {strategy:?}");
}

/// Reads the process-wide default index strategy.
pub fn get_default_index() -> IndexStrategy {
    let s = state();
    let tag = s.default_index.load(Ordering::SeqCst) as u32;
    let spread = s.default_spread_override.load(Ordering::SeqCst);
    match tag {
        t if t == IndexStrategy::TAG_NONE => IndexStrategy::None,
        t if t == IndexStrategy::TAG_NATURAL => IndexStrategy::Natural {
            spread: (spread != 0).then_some(spread),
        },
        t if t == IndexStrategy::TAG_YSTRIPES => IndexStrategy::Ystripes {
            spread: (spread != 0).then_some(spread),
        },
        _ => IndexStrategy::None,
    }
}

/// Sets the process-wide default branching factor, clamped to
/// `[SPREAD_MIN, SPREAD_MAX]`.
pub fn set_index_spread(n: u32) {
    let clamped = n.clamp(SPREAD_MIN, SPREAD_MAX);
    if clamped != n {
        log::warn!("index spread {n} clamped to {clamped}");
    }
    state().index_spread.store(clamped, Ordering::SeqCst);
}

/// Reads the process-wide default branching factor.
pub fn get_index_spread() -> u32 {
    state().index_spread.load(Ordering::SeqCst)
}

/// Sets whether float-to-string conversions (an external collaborator;
/// this crate only stores the flag) should prefer fixed-point
/// notation over scientific notation.
pub fn set_print_fixed_floats(enabled: bool) {
    state().print_fixed_floats.store(enabled, Ordering::SeqCst);
}

pub fn get_print_fixed_floats() -> bool {
    state().print_fixed_floats.load(Ordering::SeqCst)
}

/// Installs the allocate/reallocate/free hook triplet. Only
/// `try_reserve` is modeled here: the rest of the crate is ordinary
/// safe Rust backed by the global allocator, so "realloc"/"free" have
/// no separate observable hook beyond whether a reservation is
/// permitted to proceed.
pub fn set_allocator(hooks: AllocatorHooks) {
    *state().allocator.write().expect("allocator lock poisoned") = hooks;
}

pub(crate) fn try_reserve(size: usize) -> bool {
    let hook = state().allocator.read().expect("allocator lock poisoned").try_reserve;
    hook(size)
}

/// Public entry point for the same allocator probe, for algorithm
/// code outside this crate (e.g. `geocore`'s nearest-segment queue)
/// that needs to honor injected allocation pressure mid-traversal.
pub fn allocator_probe(size: usize) -> bool {
    try_reserve(size)
}

/// RAII guard that snapshots process-wide state on creation and
/// restores it on drop, so tests can freely call the `set_*` functions
/// above without leaking configuration into later tests.
#[must_use]
pub struct ContextGuard {
    default_index: IndexStrategy,
    index_spread: u32,
    print_fixed_floats: bool,
    allocator: AllocatorHooks,
}

impl ContextGuard {
    pub fn capture() -> Self {
        ContextGuard {
            default_index: get_default_index(),
            index_spread: get_index_spread(),
            print_fixed_floats: get_print_fixed_floats(),
            allocator: *state().allocator.read().expect("allocator lock poisoned"),
        }
    }
}

impl Drop for ContextGuard {
    fn drop(&mut self) {
        set_default_index(self.default_index);
        set_index_spread(self.index_spread);
        set_print_fixed_floats(self.print_fixed_floats);
        set_allocator(self.allocator);
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn tag_round_trips() {
        for strategy in [
            IndexStrategy::None,
            IndexStrategy::Natural { spread: None },
            IndexStrategy::Natural { spread: Some(32) },
            IndexStrategy::Ystripes { spread: Some(64) },
        ] {
            let tag = strategy.to_tag();
            assert_eq!(IndexStrategy::from_tag(tag), strategy);
        }
    }

    #[test]
    fn spread_override_is_clamped_on_decode() {
        let tag = IndexStrategy::Natural { spread: Some(999_999) }.to_tag();
        assert_eq!(
            IndexStrategy::from_tag(tag),
            IndexStrategy::Natural { spread: Some(SPREAD_MAX) }
        );
    }

    #[test]
    fn guard_restores_previous_state() {
        let before = get_index_spread();
        {
            let _guard = ContextGuard::capture();
            set_index_spread(2);
            assert_eq!(get_index_spread(), 2);
        }
        assert_eq!(get_index_spread(), before);
    }
}
