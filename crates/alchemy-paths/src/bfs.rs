use std::collections::VecDeque;
use std::time::Instant;

use alchemy_core::{Catalog, RecipeId};

use crate::Algorithm;
use crate::error::SearchError;
use crate::fewest::fewest_recipes;
use crate::reconstruct::assemble_path;
use crate::result::SearchResult;
use crate::state::{SearchState, Step};
use crate::traits::{PathFinder, Query, RecipeSource, forward_candidates};
use crate::variant::Variant;

/// Breadth-first search from the basics toward a target.
///
/// The frontier advances one recipe level at a time, so the first time the
/// target is reached its derivation uses the fewest levels. Fewest levels is
/// not fewest recipes once ingredients are shared, so the reached target's
/// derivation is then replaced by the smallest one over its ancestors when
/// that is strictly shorter.
pub struct BreadthFirst<'a, S: RecipeSource = Catalog> {
    source: &'a S,
}

impl<'a, S: RecipeSource> BreadthFirst<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self { source }
    }

    /// Run the search, leaving marks and backpointers in `state`.
    ///
    /// Returns whether the target was reached.
    pub(crate) fn run(&self, query: Query, variant: Variant, state: &mut SearchState) -> bool {
        let source = self.source;
        let mut queue: VecDeque<_> = VecDeque::new();
        for seed in variant.seed_order(source.basic_ids()) {
            if state.mark(seed) {
                queue.push_back(seed);
            }
        }
        if state.is_marked(query.target) {
            return true;
        }

        let mut cbuf = std::mem::take(&mut state.cbuf);
        let found = 'search: loop {
            let Some(current) = queue.pop_front() else {
                break 'search false;
            };
            cbuf.clear();
            forward_candidates(source, current, query.target_tier, &mut cbuf);
            variant.permute(&mut cbuf);
            log::trace!("bfs: expand {} ({} candidates)", source.name(current), cbuf.len());

            for &rid in cbuf.iter() {
                let recipe = source.recipe(rid);
                // Both ingredients must already be derivable.
                if !state.is_marked(recipe.co_ingredient(current)) {
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
                if result == query.target {
                    break 'search true;
                }
                queue.push_back(result);
            }
        };
        state.cbuf = cbuf;
        found
    }
}

impl<S: RecipeSource> PathFinder for BreadthFirst<'_, S> {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Bfs
    }

    fn source(&self) -> &dyn RecipeSource {
        self.source
    }

    fn find_variant(&self, target: &str, variant: Variant) -> Result<SearchResult, SearchError> {
        let query = Query::resolve(self.source, target)?;
        let start = Instant::now();
        let mut state = SearchState::new(self.source.element_count());

        if !self.run(query, variant, &mut state) {
            log::debug!(
                "bfs: {} unreachable after {} visits",
                target,
                state.visited_count()
            );
            return Err(SearchError::NoPathFound(target.to_string()));
        }

        let mut path: Vec<RecipeId> =
            assemble_path(self.source, query.target, |id| state.step(id).map(|s| s.recipe));
        if let Some(fewer) = fewest_recipes(self.source, query.target, variant) {
            if fewer.len() < path.len() {
                log::trace!("bfs: {} shortened from {} to {}", target, path.len(), fewer.len());
                path = fewer;
            }
        }
        let elapsed = start.elapsed();
        log::debug!(
            "bfs: {} in {} steps, {} visited, {:?}",
            target,
            path.len(),
            state.visited_count(),
            elapsed
        );
        Ok(SearchResult::assemble(
            self.source,
            Algorithm::Bfs,
            query.target,
            &path,
            state.visited_count(),
            elapsed,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reconstruct::validate_path;
    use crate::testing::{diamond, elements, scenario};

    fn texts(r: &SearchResult) -> Vec<String> {
        r.path.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn scenario_builds_both_steps() {
        let c = scenario();
        let r = BreadthFirst::new(&c).find_shortest_path("D").unwrap();
        assert_eq!(texts(&r), ["A + B -> C", "A + C -> D"]);
        assert_eq!(r.visited, 4);
        assert_eq!(r.algorithm, Algorithm::Bfs);
        assert_eq!(r.meeting_point, None);
    }

    #[test]
    fn waits_for_co_ingredient() {
        let c = elements();
        let r = BreadthFirst::new(&c).find_shortest_path("Brick").unwrap();
        assert_eq!(texts(&r), ["Water + Earth -> Mud", "Mud + Fire -> Brick"]);
        assert_eq!(r.visited, 12);
        assert!(validate_path(&c, "Brick", &r.path).is_ok());
    }

    #[test]
    fn joins_independent_branches() {
        let c = diamond();
        let r = BreadthFirst::new(&c).find_shortest_path("Top").unwrap();
        assert_eq!(r.len(), 3);
        assert_eq!(r.path[2].to_string(), "L + R -> Top");
        assert!(validate_path(&c, "Top", &r.path).is_ok());
    }

    #[test]
    fn shares_ingredients_across_branches() {
        // The frontier makes Y from Q first, but Y from P reuses X's P.
        let c = Catalog::builder()
            .basic("A")
            .basic("B")
            .element("P", 1, [("A", "B")])
            .element("Q", 1, [("A", "B")])
            .element("X", 2, [("P", "A")])
            .element("Y", 2, [("Q", "A"), ("P", "B")])
            .element("T", 3, [("X", "Y")])
            .build()
            .unwrap();
        let r = BreadthFirst::new(&c).find_shortest_path("T").unwrap();
        assert_eq!(r.len(), 4, "{:?}", texts(&r));
        assert!(r.path.iter().all(|s| s.result != "Q"));
        assert!(validate_path(&c, "T", &r.path).is_ok());
        assert_eq!(r.visited, 7);
    }

    #[test]
    fn deep_target_is_valid() {
        let c = elements();
        let r = BreadthFirst::new(&c).find_shortest_path("House").unwrap();
        assert!(validate_path(&c, "House", &r.path).is_ok());
        assert_eq!(r.path.last().unwrap().result, "House");
        assert_eq!(r.tree.target, "House");
    }

    #[test]
    fn basic_target_has_empty_path() {
        let c = elements();
        let r = BreadthFirst::new(&c).find_shortest_path("Fire").unwrap();
        assert!(r.is_empty());
        assert_eq!(r.visited, 4);
        assert_eq!(r.tree.nodes.len(), 1);
    }

    #[test]
    fn errors() {
        let c = elements();
        let bfs = BreadthFirst::new(&c);
        assert_eq!(
            bfs.find_shortest_path("Unobtainium").unwrap_err(),
            SearchError::ElementNotFound("Unobtainium".into())
        );
        assert_eq!(
            bfs.find_shortest_path("Ghost").unwrap_err(),
            SearchError::NoPathFound("Ghost".into())
        );

        let empty = Catalog::builder().element("X", 1, [("Y", "Z")]).build().unwrap();
        assert_eq!(
            BreadthFirst::new(&empty).find_shortest_path("X").unwrap_err(),
            SearchError::NoBasicElements
        );
    }

    #[test]
    fn repeated_queries_agree() {
        let c = elements();
        let bfs = BreadthFirst::new(&c);
        let a = bfs.find_shortest_path("Rain").unwrap();
        let b = bfs.find_shortest_path("Rain").unwrap();
        assert_eq!(a.path, b.path);
        assert_eq!(a.visited, b.visited);
    }

    #[test]
    fn variants_stay_valid() {
        let c = elements();
        let bfs = BreadthFirst::new(&c);
        for i in 0..12 {
            let r = bfs.find_variant("Wall", Variant::new(i)).unwrap();
            assert!(validate_path(&c, "Wall", &r.path).is_ok(), "variant {i}");
        }
    }
}
