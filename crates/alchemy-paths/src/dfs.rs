use std::time::Instant;

use alchemy_core::{Catalog, ElementId, RecipeId};

use crate::Algorithm;
use crate::error::SearchError;
use crate::reconstruct::assemble_path;
use crate::result::SearchResult;
use crate::state::{SearchState, Step};
use crate::traits::{PathFinder, Query, RecipeSource, forward_candidates};
use crate::variant::Variant;

/// One level of the explicit descent stack.
struct Frame {
    element: ElementId,
    candidates: Vec<RecipeId>,
    next: usize,
    depth: u32,
}

/// Depth-bounded depth-first search.
///
/// Each basic is tried in turn as the root of a single descent chain. A
/// recipe is usable when its other ingredient is basic or already on the
/// chain, so the chain itself is a complete derivation and its length bounds
/// the returned path. Depth is capped at twice the target's tier.
pub struct DepthFirst<'a, S: RecipeSource = Catalog> {
    source: &'a S,
}

impl<'a, S: RecipeSource> DepthFirst<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self { source }
    }

    /// Maximum chain length for `query` under `variant`.
    pub(crate) fn ceiling(query: Query, variant: Variant) -> u32 {
        let tier = u32::try_from(query.target_tier).unwrap_or(0);
        tier.saturating_mul(2).saturating_add(variant.depth_slack())
    }

    fn frame(
        &self,
        element: ElementId,
        depth: u32,
        query: Query,
        variant: Variant,
        spare: &mut Vec<Vec<RecipeId>>,
    ) -> Frame {
        let mut candidates = spare.pop().unwrap_or_default();
        candidates.clear();
        forward_candidates(self.source, element, query.target_tier, &mut candidates);
        variant.permute(&mut candidates);
        Frame {
            element,
            candidates,
            next: 0,
            depth,
        }
    }

    /// Descend from `seed`. Returns whether the target was reached; on
    /// success the chain is left marked in `state`.
    fn descend(
        &self,
        seed: ElementId,
        query: Query,
        variant: Variant,
        ceiling: u32,
        state: &mut SearchState,
    ) -> bool {
        let source = self.source;
        let mut spare: Vec<Vec<RecipeId>> = Vec::new();
        state.mark(seed);
        let mut stack = vec![self.frame(seed, 0, query, variant, &mut spare)];

        while let Some(top) = stack.last_mut() {
            if top.element == query.target {
                return true;
            }
            if top.depth >= ceiling || top.next >= top.candidates.len() {
                // Dead end: step back so the parent can try its next recipe.
                if let Some(frame) = stack.pop() {
                    if !stack.is_empty() {
                        state.unmark(frame.element);
                    }
                    spare.push(frame.candidates);
                }
                continue;
            }

            let rid = top.candidates[top.next];
            top.next += 1;
            let (current, depth) = (top.element, top.depth);

            let recipe = source.recipe(rid);
            let co = recipe.co_ingredient(current);
            if !source.is_basic(co) && !state.is_marked(co) {
                continue;
            }
            let result = recipe.result;
            if !state.mark(result) {
                continue;
            }
            state.set_step(
                result,
                Step {
                    parent: current,
                    recipe: rid,
                },
            );
            log::trace!(
                "dfs: {} -> {} at depth {}",
                source.name(current),
                source.name(result),
                depth + 1
            );
            let frame = self.frame(result, depth + 1, query, variant, &mut spare);
            stack.push(frame);
        }
        false
    }
}

impl<S: RecipeSource> PathFinder for DepthFirst<'_, S> {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Dfs
    }

    fn source(&self) -> &dyn RecipeSource {
        self.source
    }

    fn find_variant(&self, target: &str, variant: Variant) -> Result<SearchResult, SearchError> {
        let query = Query::resolve(self.source, target)?;
        let start = Instant::now();
        let mut state = SearchState::new(self.source.element_count());

        let found = if self.source.is_basic(query.target) {
            state.mark(query.target);
            true
        } else {
            let ceiling = Self::ceiling(query, variant);
            let mut found = false;
            for seed in variant.seed_order(self.source.basic_ids()) {
                state.reset();
                if self.descend(seed, query, variant, ceiling, &mut state) {
                    found = true;
                    break;
                }
            }
            found
        };

        if !found {
            log::debug!(
                "dfs: {} unreachable after {} visits",
                target,
                state.visited_count()
            );
            return Err(SearchError::NoPathFound(target.to_string()));
        }

        let path =
            assemble_path(self.source, query.target, |id| state.step(id).map(|s| s.recipe));
        let elapsed = start.elapsed();
        log::debug!(
            "dfs: {} in {} steps, {} visited, {:?}",
            target,
            path.len(),
            state.visited_count(),
            elapsed
        );
        Ok(SearchResult::assemble(
            self.source,
            Algorithm::Dfs,
            query.target,
            &path,
            state.visited_count(),
            elapsed,
        ))
    }
}
