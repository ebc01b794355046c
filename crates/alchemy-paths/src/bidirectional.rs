use std::collections::HashMap;
use std::time::Instant;

use alchemy_core::{Catalog, ElementId, RecipeId};

use crate::Algorithm;
use crate::error::SearchError;
use crate::reconstruct::assemble_path;
use crate::result::SearchResult;
use crate::state::{SearchState, Step};
use crate::traits::{PathFinder, Query, RecipeSource, forward_candidates, recipe_is_tier_valid};
use crate::variant::Variant;

/// Meet-in-the-middle search.
///
/// A forward frontier grows from the basics while a backward frontier
/// decomposes the target into ingredients. The two halves advance one full
/// level at a time, alternating, until some backward-discovered element is
/// derivable forward and the rest of its backward chain can be joined.
pub struct Bidirectional<'a, S: RecipeSource = Catalog> {
    source: &'a S,
}

/// Both halves of a finished run.
pub(crate) struct Meeting {
    pub(crate) forward: SearchState,
    pub(crate) backward: SearchState,
    pub(crate) point: Option<ElementId>,
}

impl Meeting {
    /// Distinct elements visited by either half.
    pub(crate) fn visited_count(&self, len: usize) -> usize {
        (0..len as u32)
            .map(ElementId)
            .filter(|&id| self.forward.was_seen(id) || self.backward.was_seen(id))
            .count()
    }
}

impl<'a, S: RecipeSource> Bidirectional<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self { source }
    }

    /// Advance the forward frontier by one level.
    fn forward_level(
        &self,
        query: Query,
        variant: Variant,
        state: &mut SearchState,
        level: &mut Vec<ElementId>,
        next: &mut Vec<ElementId>,
    ) {
        let source = self.source;
        let mut cbuf = std::mem::take(&mut state.cbuf);
        next.clear();
        for &current in level.iter() {
            cbuf.clear();
            forward_candidates(source, current, query.target_tier, &mut cbuf);
            variant.permute(&mut cbuf);
            for &rid in cbuf.iter() {
                let recipe = source.recipe(rid);
                if !state.is_marked(recipe.co_ingredient(current)) {
                    continue;
                }
                if state.mark(recipe.result) {
                    state.set_step(
                        recipe.result,
                        Step {
                            parent: current,
                            recipe: rid,
                        },
                    );
                    next.push(recipe.result);
                }
            }
        }
        state.cbuf = cbuf;
        std::mem::swap(level, next);
    }

    /// Advance the backward frontier by one level, recording every newly
    /// reached ingredient in `order`.
    fn backward_level(
        &self,
        variant: Variant,
        state: &mut SearchState,
        level: &mut Vec<ElementId>,
        next: &mut Vec<ElementId>,
        order: &mut Vec<ElementId>,
    ) {
        let source = self.source;
        let mut cbuf = std::mem::take(&mut state.cbuf);
        next.clear();
        for &current in level.iter() {
            cbuf.clear();
            cbuf.extend(
                source
                    .recipes_with_result(current)
                    .iter()
                    .copied()
                    .filter(|&rid| recipe_is_tier_valid(source, source.recipe(rid))),
            );
            variant.permute(&mut cbuf);
            for &rid in cbuf.iter() {
                let mut ingredients = source.recipe(rid).ingredients;
                if variant.backward_first() {
                    ingredients.reverse();
                }
                for ing in ingredients {
                    if state.mark(ing) {
                        state.set_step(
                            ing,
                            Step {
                                parent: current,
                                recipe: rid,
                            },
                        );
                        order.push(ing);
                        next.push(ing);
                    }
                }
            }
        }
        state.cbuf = cbuf;
        std::mem::swap(level, next);
    }

    /// Whether every recipe on the backward chain from `id` to the target
    /// has its other ingredient derivable forward.
    fn joinable(
        &self,
        forward: &SearchState,
        backward: &SearchState,
        id: ElementId,
        target: ElementId,
    ) -> bool {
        let mut current = id;
        while current != target {
            let Some(step) = backward.step(current) else {
                return false;
            };
            let recipe = self.source.recipe(step.recipe);
            if !forward.is_marked(recipe.co_ingredient(current)) {
                return false;
            }
            current = step.parent;
        }
        true
    }

    /// First joinable meeting point in backward discovery order.
    ///
    /// A basic is only chosen when no produced element joins, so a meeting
    /// always lands on a recipe result when one is available.
    fn scan(
        &self,
        forward: &SearchState,
        backward: &SearchState,
        order: &[ElementId],
        target: ElementId,
    ) -> Option<ElementId> {
        let mut basic = None;
        for &id in order {
            if !forward.is_marked(id) || !self.joinable(forward, backward, id, target) {
                continue;
            }
            if !self.source.is_basic(id) {
                return Some(id);
            }
            basic = basic.or(Some(id));
        }
        basic
    }

    /// Run both halves until they meet or both frontiers are exhausted.
    pub(crate) fn meet(&self, query: Query, variant: Variant) -> Meeting {
        let source = self.source;
        let n = source.element_count();
        let mut forward = SearchState::new(n);
        let mut backward = SearchState::new(n);

        let mut fwd_level = Vec::new();
        for seed in variant.seed_order(source.basic_ids()) {
            if forward.mark(seed) {
                fwd_level.push(seed);
            }
        }
        backward.mark(query.target);
        let mut bwd_level = vec![query.target];
        let mut order = vec![query.target];
        let mut next = Vec::new();

        let mut point = self.scan(&forward, &backward, &order, query.target);
        let mut round = 0;
        'search: while point.is_none() && !(fwd_level.is_empty() && bwd_level.is_empty()) {
            round += 1;
            let backward_first = variant.backward_first();
            for run_backward in [backward_first, !backward_first] {
                if run_backward {
                    if bwd_level.is_empty() {
                        continue;
                    }
                    self.backward_level(
                        variant,
                        &mut backward,
                        &mut bwd_level,
                        &mut next,
                        &mut order,
                    );
                } else {
                    if fwd_level.is_empty() {
                        continue;
                    }
                    self.forward_level(query, variant, &mut forward, &mut fwd_level, &mut next);
                }
                point = self.scan(&forward, &backward, &order, query.target);
                if point.is_some() {
                    break 'search;
                }
            }
            log::trace!(
                "bid: round {round}, frontiers {}/{}",
                fwd_level.len(),
                bwd_level.len()
            );
        }

        Meeting {
            forward,
            backward,
            point,
        }
    }
}

impl<S: RecipeSource> PathFinder for Bidirectional<'_, S> {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Bidirectional
    }

    fn source(&self) -> &dyn RecipeSource {
        self.source
    }

    fn find_variant(&self, target: &str, variant: Variant) -> Result<SearchResult, SearchError> {
        let source = self.source;
        let query = Query::resolve(source, target)?;
        let start = Instant::now();
        let meeting = self.meet(query, variant);
        let visited = meeting.visited_count(source.element_count());

        let Some(point) = meeting.point else {
            log::debug!("bid: {target} unreachable after {visited} visits");
            return Err(SearchError::NoPathFound(target.to_string()));
        };

        // The backward chain overrides forward backpointers on its nodes.
        let mut chain: HashMap<ElementId, RecipeId> = HashMap::new();
        let mut current = point;
        while current != query.target {
            let Some(step) = meeting.backward.step(current) else {
                break;
            };
            chain.insert(step.parent, step.recipe);
            current = step.parent;
        }
        let path = assemble_path(source, query.target, |id| {
            chain
                .get(&id)
                .copied()
                .or_else(|| meeting.forward.step(id).map(|s| s.recipe))
        });

        let elapsed = start.elapsed();
        log::debug!(
            "bid: {} via {} in {} steps, {} visited, {:?}",
            target,
            source.name(point),
            path.len(),
            visited,
            elapsed
        );
        let mut result = SearchResult::assemble(
            source,
            Algorithm::Bidirectional,
            query.target,
            &path,
            visited,
            elapsed,
        );
        result.meeting_point = Some(source.name(point).to_string());
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bfs::BreadthFirst;
    use crate::reconstruct::validate_path;
    use crate::testing::{diamond, elements, scenario};

    #[test]
    fn scenario_meets_and_builds_two_steps() {
        let c = scenario();
        let bid = Bidirectional::new(&c);
        for i in 0..4 {
            let r = bid.find_variant("D", Variant::new(i)).unwrap();
            let point = r.meeting_point.clone().unwrap();
            assert!(point == "C" || point == "D", "variant {i}: {point}");
            assert_eq!(r.len(), 2);
            assert!(validate_path(&c, "D", &r.path).is_ok());
        }
    }

    #[test]
    fn meeting_prefers_produced_elements() {
        let c = scenario();
        let bid = Bidirectional::new(&c);
        let q = Query::resolve(&c, "D").unwrap();
        // Candidates reversed: forward tries A + C before C exists, so D is
        // not reached in the first round while basic A already joins.
        let m = bid.meet(q, Variant::new(2));
        let point = m.point.unwrap();
        assert_eq!(c.name(point), "C");
        assert!(m.forward.is_marked(c.id_of("A").unwrap()));

        let r = bid.find_variant("D", Variant::new(2)).unwrap();
        assert_eq!(r.meeting_point.as_deref(), Some("C"));
        assert_eq!(r.len(), 2);
    }

    #[test]
    fn meeting_point_seen_by_both_halves() {
        let c = elements();
        let bid = Bidirectional::new(&c);
        for name in ["Stone", "Rain", "Wall", "House"] {
            for i in 0..6 {
                let q = Query::resolve(&c, name).unwrap();
                let m = bid.meet(q, Variant::new(i));
                let point = m.point.unwrap();
                assert!(m.forward.is_marked(point));
                assert!(m.backward.is_marked(point));
                assert!(bid.joinable(&m.forward, &m.backward, point, q.target));
            }
        }
    }

    #[test]
    fn paths_are_valid() {
        let c = elements();
        let bid = Bidirectional::new(&c);
        for name in ["Dust", "Steam", "Stone", "Brick", "Cloud", "Rain", "Wall", "House"] {
            let r = bid.find_shortest_path(name).unwrap();
            assert!(validate_path(&c, name, &r.path).is_ok(), "{name}");
            assert!(r.meeting_point.is_some());
        }
        let d = diamond();
        let r = Bidirectional::new(&d).find_shortest_path("Top").unwrap();
        assert!(validate_path(&d, "Top", &r.path).is_ok());
    }

    #[test]
    fn visited_is_union_of_both_halves() {
        let c = scenario();
        let bid = Bidirectional::new(&c);
        let q = Query::resolve(&c, "D").unwrap();
        let m = bid.meet(q, Variant::BASE);
        // Forward reaches everything in one round; backward only has D.
        assert_eq!(m.visited_count(c.len()), 4);
        let r = bid.find_shortest_path("D").unwrap();
        assert_eq!(r.visited, 4);
    }

    #[test]
    fn not_shorter_than_bfs_here() {
        let c = elements();
        let bfs = BreadthFirst::new(&c);
        let bid = Bidirectional::new(&c);
        for name in ["Stone", "Brick", "Cloud", "Rain"] {
            let b = bfs.find_shortest_path(name).unwrap();
            let m = bid.find_shortest_path(name).unwrap();
            assert!(b.len() <= m.len(), "{name}");
        }
    }

    #[test]
    fn idempotent() {
        let c = elements();
        let bid = Bidirectional::new(&c);
        let a = bid.find_shortest_path("House").unwrap();
        let b = bid.find_shortest_path("House").unwrap();
        assert_eq!(a.path, b.path);
        assert_eq!(a.meeting_point, b.meeting_point);
        assert_eq!(a.visited, b.visited);
    }

    #[test]
    fn basic_target_and_errors() {
        let c = elements();
        let bid = Bidirectional::new(&c);
        let r = bid.find_shortest_path("Air").unwrap();
        assert!(r.is_empty());
        assert_eq!(r.meeting_point.as_deref(), Some("Air"));
        assert!(r.visited >= 1);
        assert_eq!(
            bid.find_shortest_path("Ghost").unwrap_err(),
            SearchError::NoPathFound("Ghost".into())
        );
        assert_eq!(
            bid.find_shortest_path("Nope").unwrap_err(),
            SearchError::ElementNotFound("Nope".into())
        );
    }
}
