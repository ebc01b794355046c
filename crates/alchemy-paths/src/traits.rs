use alchemy_core::{Catalog, ElementId, Recipe, RecipeId};

use crate::Algorithm;
use crate::error::SearchError;
use crate::multipath::{MultiPath, PathSet};
use crate::result::SearchResult;
use crate::variant::Variant;

/// Read contract the engines need from a recipe catalog.
///
/// Ids handed out by a source are only ever passed back to the same source.
pub trait RecipeSource: Sync {
    /// Number of elements; every id is below this.
    fn element_count(&self) -> usize;
    /// Resolve a name to an id.
    fn lookup(&self, name: &str) -> Option<ElementId>;
    fn name(&self, id: ElementId) -> &str;
    /// Tier of an element, or a negative sentinel if unknown.
    fn tier_of(&self, id: ElementId) -> i32;
    fn is_basic(&self, id: ElementId) -> bool;
    /// Basic ids in the source's documented, deterministic order.
    fn basic_ids(&self) -> &[ElementId];
    fn recipe(&self, id: RecipeId) -> &Recipe;
    fn recipes_with_ingredient(&self, id: ElementId) -> &[RecipeId];
    fn recipes_with_result(&self, id: ElementId) -> &[RecipeId];
    /// Opaque display-image reference, passed through to display trees.
    fn image_ref(&self, _id: ElementId) -> Option<&str> {
        None
    }
}

impl RecipeSource for Catalog {
    #[inline]
    fn element_count(&self) -> usize {
        self.len()
    }

    #[inline]
    fn lookup(&self, name: &str) -> Option<ElementId> {
        self.id_of(name)
    }

    #[inline]
    fn name(&self, id: ElementId) -> &str {
        Catalog::name(self, id)
    }

    #[inline]
    fn tier_of(&self, id: ElementId) -> i32 {
        Catalog::tier_of(self, id)
    }

    #[inline]
    fn is_basic(&self, id: ElementId) -> bool {
        Catalog::is_basic(self, id)
    }

    #[inline]
    fn basic_ids(&self) -> &[ElementId] {
        Catalog::basic_ids(self)
    }

    #[inline]
    fn recipe(&self, id: RecipeId) -> &Recipe {
        Catalog::recipe(self, id)
    }

    #[inline]
    fn recipes_with_ingredient(&self, id: ElementId) -> &[RecipeId] {
        Catalog::recipes_with_ingredient(self, id)
    }

    #[inline]
    fn recipes_with_result(&self, id: ElementId) -> &[RecipeId] {
        Catalog::recipes_with_result(self, id)
    }

    fn image_ref(&self, id: ElementId) -> Option<&str> {
        self.element(id).and_then(|e| e.image_url())
    }
}

/// A search engine answering recipe-path queries.
pub trait PathFinder: Sync {
    fn algorithm(&self) -> Algorithm;

    /// The catalog this finder searches.
    fn source(&self) -> &dyn RecipeSource;

    /// Run one search with the seed and candidate ordering of `variant`.
    fn find_variant(&self, target: &str, variant: Variant) -> Result<SearchResult, SearchError>;

    /// Run the canonical search for `target`.
    fn find_shortest_path(&self, target: &str) -> Result<SearchResult, SearchError> {
        self.find_variant(target, Variant::BASE)
    }

    /// Collect up to `k` distinct paths with the default orchestrator
    /// settings.
    fn find_multiple_paths(&self, target: &str, k: usize) -> Result<PathSet, SearchError> {
        MultiPath::new(self).find(target, k)
    }
}

// ---------------------------------------------------------------------------
// Query resolution and candidate filtering shared by the engines
// ---------------------------------------------------------------------------

/// A validated search target.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Query {
    pub(crate) target: ElementId,
    pub(crate) target_tier: i32,
}

impl Query {
    /// Check that `target` exists and that there is something to search
    /// from.
    pub(crate) fn resolve<S: RecipeSource + ?Sized>(
        source: &S,
        target: &str,
    ) -> Result<Self, SearchError> {
        let id = source
            .lookup(target)
            .ok_or_else(|| SearchError::ElementNotFound(target.to_string()))?;
        if source.basic_ids().is_empty() {
            return Err(SearchError::NoBasicElements);
        }
        Ok(Self {
            target: id,
            target_tier: source.tier_of(id),
        })
    }
}

/// Whether both ingredients sit on a strictly lower, known tier than the
/// result. Every recipe a search uses must satisfy this.
#[inline]
pub fn recipe_is_tier_valid<S: RecipeSource + ?Sized>(source: &S, recipe: &Recipe) -> bool {
    let rt = source.tier_of(recipe.result);
    recipe.ingredients.iter().all(|&i| {
        let t = source.tier_of(i);
        t >= 0 && t < rt
    })
}

/// Append the forward candidates of `current` into `buf`. The caller clears
/// `buf` before calling.
///
/// A recipe qualifies when its result climbs above `current`'s tier, it is
/// tier-valid, and its result does not exceed `ceiling` (the target's
/// tier). Ingredient availability is left to the engine.
pub(crate) fn forward_candidates<S: RecipeSource + ?Sized>(
    source: &S,
    current: ElementId,
    ceiling: i32,
    buf: &mut Vec<RecipeId>,
) {
    let current_tier = source.tier_of(current);
    for &rid in source.recipes_with_ingredient(current) {
        let recipe = source.recipe(rid);
        let rt = source.tier_of(recipe.result);
        if rt <= current_tier || rt > ceiling {
            continue;
        }
        if recipe_is_tier_valid(source, recipe) {
            buf.push(rid);
        }
    }
}
