//! Turning backpointers into recipe sequences.

use std::collections::HashSet;

use alchemy_core::{ElementId, NamedRecipe, RecipeId};

use crate::error::PathDefect;
use crate::traits::{RecipeSource, recipe_is_tier_valid};

/// Walk back from `target` over `producer` and return the recipes in
/// basic -> target order.
///
/// `producer` maps an element to the recipe that produced it, or `None` for
/// basics and anything the search never derived. Each recipe is emitted
/// after the recipes of its ingredients (first ingredient first), so every
/// non-basic ingredient is made before it is consumed. When one ingredient
/// of every step is basic this is exactly "follow the backpointers and
/// prepend".
pub fn assemble_path<S, F>(source: &S, target: ElementId, producer: F) -> Vec<RecipeId>
where
    S: RecipeSource + ?Sized,
    F: Fn(ElementId) -> Option<RecipeId>,
{
    let n = source.element_count();
    let mut done = vec![false; n];
    let mut open = vec![false; n];
    let mut path = Vec::new();
    let mut stack = vec![(target, false)];

    while let Some((id, expanded)) = stack.pop() {
        let i = id.index();
        if done[i] {
            continue;
        }
        let Some(rid) = producer(id) else {
            done[i] = true;
            continue;
        };
        if expanded {
            done[i] = true;
            path.push(rid);
            continue;
        }
        if open[i] {
            // Only reachable through a cyclic producer map.
            continue;
        }
        open[i] = true;
        stack.push((id, true));
        let recipe = source.recipe(rid);
        for &ing in recipe.ingredients.iter().rev() {
            if !done[ing.index()] {
                stack.push((ing, false));
            }
        }
    }
    path
}

/// Resolve recipe ids to names.
pub fn named_path<S: RecipeSource + ?Sized>(source: &S, path: &[RecipeId]) -> Vec<NamedRecipe> {
    path.iter()
        .map(|&rid| {
            let r = source.recipe(rid);
            NamedRecipe::new(
                source.name(r.ingredients[0]),
                source.name(r.ingredients[1]),
                source.name(r.result),
            )
        })
        .collect()
}

/// Check that a named path is a usable recipe sequence for `target`.
///
/// Every recipe must be tier-valid, every non-basic ingredient must be
/// produced by an earlier step, and the last step must produce `target`
/// (an empty path is valid only for a basic target).
pub fn validate_path<S: RecipeSource + ?Sized>(
    source: &S,
    target: &str,
    path: &[NamedRecipe],
) -> Result<(), PathDefect> {
    let resolve = |name: &str| {
        source
            .lookup(name)
            .ok_or_else(|| PathDefect::UnknownElement(name.to_string()))
    };
    let target_id = resolve(target)?;

    let mut made: HashSet<ElementId> = HashSet::new();
    for step in path {
        let result = resolve(step.result.as_str())?;
        let first = resolve(step.ingredients[0].as_str())?;
        let second = resolve(step.ingredients[1].as_str())?;
        let recipe = alchemy_core::Recipe {
            ingredients: [first, second],
            result,
        };
        if !recipe_is_tier_valid(source, &recipe) {
            return Err(PathDefect::TierViolation(step.to_string()));
        }
        for (id, name) in [(first, &step.ingredients[0]), (second, &step.ingredients[1])] {
            if !source.is_basic(id) && !made.contains(&id) {
                return Err(PathDefect::MissingIngredient {
                    ingredient: name.clone(),
                    recipe: step.to_string(),
                });
            }
        }
        made.insert(result);
    }

    let reached = match path.last() {
        Some(last) => last.result == target,
        None => source.is_basic(target_id),
    };
    if reached {
        Ok(())
    } else {
        Err(PathDefect::WrongTarget(target.to_string()))
    }
}
