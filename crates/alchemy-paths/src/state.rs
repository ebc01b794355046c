use alchemy_core::{ElementId, RecipeId};

/// Backpointer: how a discovered element was reached.
///
/// For forward searches `parent` is the ingredient being expanded when the
/// element was produced; for the backward half of bidirectional search it is
/// the element the recipe produces, one step closer to the target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Step {
    pub(crate) parent: ElementId,
    pub(crate) recipe: RecipeId,
}

// ---------------------------------------------------------------------------
// SearchState
// ---------------------------------------------------------------------------

/// Private working state of one search run: visited marks, backpointers and
/// the distinct-visit tally.
///
/// Marks are stamped with a generation counter so that [`reset`](Self::reset)
/// invalidates every mark and backpointer in O(1). The distinct-visit tally
/// survives resets.
pub(crate) struct SearchState {
    marks: Vec<u32>,
    generation: u32,
    steps: Vec<Option<Step>>,
    seen: Vec<bool>,
    distinct: usize,
    // scratch buffer for candidate queries
    pub(crate) cbuf: Vec<RecipeId>,
}

impl SearchState {
    /// Create state sized for a source with `len` elements.
    pub(crate) fn new(len: usize) -> Self {
        Self {
            marks: vec![0; len],
            generation: 1,
            steps: vec![None; len],
            seen: vec![false; len],
            distinct: 0,
            cbuf: Vec::with_capacity(16),
        }
    }

    /// Forget all marks and backpointers, keeping the distinct-visit tally.
    pub(crate) fn reset(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        if self.generation == 0 {
            // Wrapped: stale stamps could collide, so clear them for real.
            self.marks.iter_mut().for_each(|m| *m = 0);
            self.generation = 1;
        }
    }

    #[inline]
    pub(crate) fn is_marked(&self, id: ElementId) -> bool {
        self.marks[id.index()] == self.generation
    }

    /// Mark `id` as visited. Returns `false` if it already was.
    #[inline]
    pub(crate) fn mark(&mut self, id: ElementId) -> bool {
        let i = id.index();
        if self.marks[i] == self.generation {
            return false;
        }
        self.marks[i] = self.generation;
        self.steps[i] = None;
        if !self.seen[i] {
            self.seen[i] = true;
            self.distinct += 1;
        }
        true
    }

    /// Un-mark `id`, dropping its backpointer.
    #[inline]
    pub(crate) fn unmark(&mut self, id: ElementId) {
        let i = id.index();
        self.marks[i] = 0;
        self.steps[i] = None;
    }

    #[inline]
    pub(crate) fn set_step(&mut self, id: ElementId, step: Step) {
        self.steps[id.index()] = Some(step);
    }

    /// Backpointer of a currently marked element.
    #[inline]
    pub(crate) fn step(&self, id: ElementId) -> Option<Step> {
        if self.is_marked(id) {
            self.steps[id.index()]
        } else {
            None
        }
    }

    /// Whether `id` was marked at any point during the run.
    #[inline]
    pub(crate) fn was_seen(&self, id: ElementId) -> bool {
        self.seen[id.index()]
    }

    /// Number of distinct elements marked during the run.
    #[inline]
    pub(crate) fn visited_count(&self) -> usize {
        self.distinct
    }
}
