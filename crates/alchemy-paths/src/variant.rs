//! Deterministic search variants.
//!
//! A [`Variant`] re-orders a search without randomness so that every
//! alternative path is reproducible from its index alone. Index 0 is the
//! canonical ordering used by single-result queries.

use alchemy_core::ElementId;

/// Parameters that perturb one search run, derived from a variant index.
///
/// | Knob | Rule |
/// |---|---|
/// | basic seed order | rotated left by `index` modulo the basic count |
/// | recipe candidates | [`permute`](Self::permute) |
/// | depth ceiling (DFS) | raised by `index mod 5` |
/// | half-round order (bidirectional) | backward first when `index` is odd |
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Variant {
    index: usize,
}

impl Variant {
    /// The canonical, unperturbed ordering.
    pub const BASE: Self = Self { index: 0 };

    #[inline]
    pub const fn new(index: usize) -> Self {
        Self { index }
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.index
    }

    /// Basic seeds rotated left by `index mod len`.
    pub fn seed_order(self, basics: &[ElementId]) -> Vec<ElementId> {
        let mut seeds = basics.to_vec();
        let n = seeds.len();
        if n > 0 {
            seeds.rotate_left(self.index % n);
        }
        seeds
    }

    /// Re-order candidates in place.
    ///
    /// For `n` items the slice is rotated left by `index mod n`, then
    /// reversed when `(index / n)` is odd, so consecutive indices walk
    /// through `2n` distinct orderings before repeating.
    pub fn permute<T>(self, items: &mut [T]) {
        let n = items.len();
        if n < 2 {
            return;
        }
        items.rotate_left(self.index % n);
        if (self.index / n) % 2 == 1 {
            items.reverse();
        }
    }

    /// Extra depth allowed on top of the depth-bounded engine's ceiling.
    #[inline]
    pub const fn depth_slack(self) -> u32 {
        (self.index % 5) as u32
    }

    /// Whether the bidirectional engine runs its backward half first.
    #[inline]
    pub const fn backward_first(self) -> bool {
        self.index % 2 == 1
    }
}
