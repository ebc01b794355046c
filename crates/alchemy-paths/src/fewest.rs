//! Smallest complete derivation of a target.
//!
//! A derivation picks one producing recipe for the target and, transitively,
//! for every non-basic ingredient it needs; its size is the number of
//! distinct recipes picked. Shared ingredients are made once, so choosing
//! the cheapest recipe per element is not enough. The search here first
//! builds that greedy answer, then runs a bounded branch-and-bound over the
//! target's ancestors to improve on it.

use std::collections::HashMap;

use alchemy_core::{ElementId, RecipeId};

use crate::reconstruct::assemble_path;
use crate::traits::{RecipeSource, recipe_is_tier_valid};
use crate::variant::Variant;

/// Branch-and-bound expansions allowed per query before the best derivation
/// found so far is returned.
pub(crate) const EXPANSION_BUDGET: usize = 1 << 16;

/// One usable recipe: its id and the local indices of its ingredients.
#[derive(Clone, Copy, Debug)]
struct Choice {
    recipe: RecipeId,
    ingredients: [usize; 2],
}

/// An ancestor of the target. Local indices follow ascending tier, so every
/// ingredient of a choice has a smaller index than its result.
#[derive(Debug)]
struct Node {
    id: ElementId,
    basic: bool,
    choices: Vec<Choice>,
}

// ---------------------------------------------------------------------------
// Ancestor graph
// ---------------------------------------------------------------------------

/// Collect the target's ancestors along tier-valid recipes, ordered by tier.
fn ancestors<S: RecipeSource + ?Sized>(source: &S, target: ElementId) -> Vec<Node> {
    let mut seen = vec![false; source.element_count()];
    let mut ids = Vec::new();
    let mut stack = vec![target];
    seen[target.index()] = true;
    while let Some(current) = stack.pop() {
        ids.push(current);
        if source.is_basic(current) {
            continue;
        }
        for &rid in source.recipes_with_result(current) {
            let recipe = source.recipe(rid);
            if !recipe_is_tier_valid(source, recipe) {
                continue;
            }
            for ing in recipe.ingredients {
                if !seen[ing.index()] {
                    seen[ing.index()] = true;
                    stack.push(ing);
                }
            }
        }
    }
    ids.sort_by_key(|&id| (source.tier_of(id), id));
    ids.into_iter()
        .map(|id| Node {
            id,
            basic: source.is_basic(id),
            choices: Vec::new(),
        })
        .collect()
}

/// Sorted union of two sorted index sets plus `extra`.
fn merged(a: &[usize], b: &[usize], extra: usize) -> Vec<usize> {
    let mut out = Vec::with_capacity(a.len() + b.len() + 1);
    out.extend_from_slice(a);
    out.extend_from_slice(b);
    out.push(extra);
    out.sort_unstable();
    out.dedup();
    out
}

// ---------------------------------------------------------------------------
// Branch and bound
// ---------------------------------------------------------------------------

/// Undo-by-trail search state. `needed` is kept sorted, so its last entry is
/// always the highest-tier element still waiting for a producer, and every
/// element below it is still unassigned.
struct Search<'n> {
    nodes: &'n [Node],
    /// Fewest distinct recipes any derivation of a node can use.
    floor: &'n [usize],
    needed: Vec<usize>,
    pending: Vec<bool>,
    trail: Vec<usize>,
    producer: Vec<Option<RecipeId>>,
    used: usize,
    best: Vec<Option<RecipeId>>,
    best_len: usize,
    budget: usize,
}

impl Search<'_> {
    fn require(&mut self, i: usize) {
        if self.nodes[i].basic || self.pending[i] {
            return;
        }
        if let Err(pos) = self.needed.binary_search(&i) {
            self.needed.insert(pos, i);
        }
        self.pending[i] = true;
        self.trail.push(i);
    }

    fn rewind(&mut self, mark: usize) {
        while self.trail.len() > mark {
            let Some(i) = self.trail.pop() else {
                break;
            };
            if let Ok(pos) = self.needed.binary_search(&i) {
                self.needed.remove(pos);
            }
            self.pending[i] = false;
        }
    }

    /// Recipes still to be picked, at least.
    fn remaining(&self) -> usize {
        let deepest = self.needed.iter().map(|&i| self.floor[i]).max().unwrap_or(0);
        deepest.max(self.needed.len())
    }

    fn descend(&mut self) {
        let Some(x) = self.needed.pop() else {
            if self.used < self.best_len {
                self.best_len = self.used;
                self.best.clone_from(&self.producer);
            }
            return;
        };

        let nodes = self.nodes;
        for choice in &nodes[x].choices {
            if self.budget == 0 {
                break;
            }
            self.budget -= 1;
            let mark = self.trail.len();
            for ing in choice.ingredients {
                self.require(ing);
            }
            if self.used + 1 + self.remaining() < self.best_len {
                self.producer[x] = Some(choice.recipe);
                self.used += 1;
                self.descend();
                self.used -= 1;
                self.producer[x] = None;
            }
            self.rewind(mark);
        }

        // x was the largest entry, so pushing keeps `needed` sorted.
        self.needed.push(x);
    }
}

/// The fewest-recipe derivation of `target`, or `None` if it cannot be
/// derived at all.
///
/// `variant` re-orders the choices tried at each element. The result is
/// exact unless [`EXPANSION_BUDGET`] runs out, in which case it is the best
/// derivation seen, never larger than the greedy one.
pub(crate) fn fewest_recipes<S: RecipeSource + ?Sized>(
    source: &S,
    target: ElementId,
    variant: Variant,
) -> Option<Vec<RecipeId>> {
    let mut nodes = ancestors(source, target);
    let local: HashMap<ElementId, usize> =
        nodes.iter().enumerate().map(|(i, n)| (n.id, i)).collect();

    // Greedy pass in tier order: each element takes the choice whose
    // ingredients' greedy derivations overlap into the smallest set.
    let mut sets: Vec<Option<Vec<usize>>> = Vec::with_capacity(nodes.len());
    let mut greedy: Vec<Option<Choice>> = Vec::with_capacity(nodes.len());
    let mut floor: Vec<usize> = Vec::with_capacity(nodes.len());
    for i in 0..nodes.len() {
        if nodes[i].basic {
            sets.push(Some(Vec::new()));
            greedy.push(None);
            floor.push(0);
            continue;
        }
        let mut scored: Vec<(usize, Choice)> = Vec::new();
        let mut cheapest: Option<(Vec<usize>, Choice)> = None;
        let mut depth = usize::MAX;
        for &rid in source.recipes_with_result(nodes[i].id) {
            let recipe = source.recipe(rid);
            if !recipe_is_tier_valid(source, recipe) {
                continue;
            }
            let [a, b] = recipe.ingredients;
            let (Some(&la), Some(&lb)) = (local.get(&a), local.get(&b)) else {
                continue;
            };
            let (Some(Some(sa)), Some(Some(sb))) = (sets.get(la), sets.get(lb)) else {
                continue;
            };
            let set = merged(sa, sb, i);
            let choice = Choice {
                recipe: rid,
                ingredients: [la, lb],
            };
            depth = depth.min(1 + floor[la].max(floor[lb]));
            scored.push((set.len(), choice));
            if cheapest.as_ref().is_none_or(|(best, _)| set.len() < best.len()) {
                cheapest = Some((set, choice));
            }
        }
        scored.sort_by_key(|&(size, _)| size);
        let mut choices: Vec<Choice> = scored.into_iter().map(|(_, c)| c).collect();
        variant.permute(&mut choices);
        nodes[i].choices = choices;
        floor.push(if depth == usize::MAX { 0 } else { depth });
        match cheapest {
            Some((set, choice)) => {
                sets.push(Some(set));
                greedy.push(Some(choice));
            }
            None => {
                sets.push(None);
                greedy.push(None);
            }
        }
    }

    let root = *local.get(&target)?;
    let bound = sets[root].as_ref()?.len();

    // Seed the incumbent with the greedy derivation.
    let mut best = vec![None; nodes.len()];
    let mut stack = vec![root];
    while let Some(i) = stack.pop() {
        if best[i].is_some() {
            continue;
        }
        if let Some(choice) = greedy[i] {
            best[i] = Some(choice.recipe);
            stack.extend(choice.ingredients);
        }
    }

    let mut search = Search {
        nodes: &nodes,
        floor: &floor,
        needed: Vec::new(),
        pending: vec![false; nodes.len()],
        trail: Vec::new(),
        producer: vec![None; nodes.len()],
        used: 0,
        best,
        best_len: bound,
        budget: EXPANSION_BUDGET,
    };
    search.require(root);
    search.descend();
    if search.budget == 0 {
        log::debug!(
            "fewest: budget spent on {}, keeping {} recipes",
            source.name(target),
            search.best_len
        );
    }

    let producers: HashMap<ElementId, RecipeId> = search
        .best
        .iter()
        .enumerate()
        .filter_map(|(i, r)| r.map(|r| (nodes[i].id, r)))
        .collect();
    Some(assemble_path(source, target, |id| producers.get(&id).copied()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alchemy_core::Catalog;

    use crate::reconstruct::{named_path, validate_path};
    use crate::testing::{diamond, elements, scenario};

    /// Greedy takes Y from Q because Q's recipe is listed first, but sharing
    /// P between X and Y saves a recipe.
    fn shared() -> Catalog {
        Catalog::builder()
            .basic("A")
            .basic("B")
            .element("P", 1, [("A", "B")])
            .element("Q", 1, [("A", "B")])
            .element("X", 2, [("P", "A")])
            .element("Y", 2, [("Q", "A"), ("P", "B")])
            .element("T", 3, [("X", "Y")])
            .build()
            .unwrap()
    }

    fn fewest(c: &Catalog, name: &str, variant: Variant) -> Option<Vec<String>> {
        let id = c.id_of(name).unwrap();
        let path = fewest_recipes(c, id, variant)?;
        let named = named_path(c, &path);
        assert!(validate_path(c, name, &named).is_ok(), "{name}: {named:?}");
        Some(named.iter().map(ToString::to_string).collect())
    }

    #[test]
    fn shared_ingredient_beats_greedy() {
        let c = shared();
        for i in 0..6 {
            let path = fewest(&c, "T", Variant::new(i)).unwrap();
            assert_eq!(path.len(), 4, "variant {i}: {path:?}");
            assert!(path.iter().all(|s| !s.ends_with("-> Q")), "variant {i}: {path:?}");
        }
    }

    #[test]
    fn small_fixtures() {
        assert_eq!(fewest(&scenario(), "D", Variant::BASE).unwrap().len(), 2);
        assert_eq!(fewest(&diamond(), "Top", Variant::BASE).unwrap().len(), 3);
        let c = elements();
        assert_eq!(fewest(&c, "Brick", Variant::BASE).unwrap().len(), 2);
        assert_eq!(fewest(&c, "Rain", Variant::BASE).unwrap().len(), 3);
    }

    #[test]
    fn basic_and_underivable_targets() {
        let c = elements();
        assert_eq!(fewest(&c, "Air", Variant::BASE), Some(Vec::new()));
        assert_eq!(fewest(&c, "Ghost", Variant::BASE), None);
        assert_eq!(fewest(&c, "Void", Variant::BASE), None);
    }

    #[test]
    fn ancestors_are_tier_ordered() {
        let c = elements();
        let rain = c.id_of("Rain").unwrap();
        let nodes = ancestors(&c, rain);
        let ids: Vec<&str> = nodes.iter().map(|n| c.name(n.id)).collect();
        assert_eq!(ids.last(), Some(&"Rain"));
        assert!(nodes.windows(2).all(|w| c.tier_of(w[0].id) <= c.tier_of(w[1].id)));
        // Energy and the Earth branches never feed Rain.
        assert!(!ids.contains(&"Energy") && !ids.contains(&"Earth"));
    }
}
