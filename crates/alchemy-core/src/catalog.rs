//! The read-only [`Catalog`] index.
//!
//! A `Catalog` is built once (from tier groups or a [`CatalogBuilder`]) and
//! never mutated afterwards, so a single instance can be shared by
//! reference across any number of concurrent searches.

use std::collections::HashMap;

use crate::element::{Element, ElementId};
use crate::error::CatalogError;
use crate::ingest::RawElement;
use crate::recipe::{NamedRecipe, Recipe, RecipeId};

/// Sentinel tier returned for elements absent from the catalog.
pub const UNKNOWN_TIER: i32 = -1;

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// Lookup structure over elements, recipes, tiers and the basic set.
///
/// Recipes are indexed both by ingredient and by result so that forward and
/// backward expansion never scan the full recipe list.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    elements: Vec<Element>,
    names: HashMap<String, ElementId>,
    recipes: Vec<Recipe>,
    basics: Vec<ElementId>,
    by_ingredient: Vec<Vec<RecipeId>>,
    by_result: Vec<Vec<RecipeId>>,
}

impl Catalog {
    /// Start building a catalog programmatically.
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::default()
    }

    /// Number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// All elements in insertion order.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.elements.iter()
    }

    #[inline]
    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id.index())
    }

    pub fn element_by_name(&self, name: &str) -> Option<&Element> {
        self.id_of(name).and_then(|id| self.element(id))
    }

    /// Resolve a name to its interned id.
    #[inline]
    pub fn id_of(&self, name: &str) -> Option<ElementId> {
        self.names.get(name).copied()
    }

    /// Name of an element.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not produced by this catalog.
    #[inline]
    pub fn name(&self, id: ElementId) -> &str {
        &self.elements[id.index()].name
    }

    /// Tier of an element, or [`UNKNOWN_TIER`] if absent.
    #[inline]
    pub fn tier_of(&self, id: ElementId) -> i32 {
        match self.elements.get(id.index()) {
            Some(e) => i32::try_from(e.tier).unwrap_or(i32::MAX),
            None => UNKNOWN_TIER,
        }
    }

    /// Tier of an element by name, or [`UNKNOWN_TIER`] if absent.
    pub fn tier_of_name(&self, name: &str) -> i32 {
        match self.id_of(name) {
            Some(id) => self.tier_of(id),
            None => UNKNOWN_TIER,
        }
    }

    /// Whether the element is basic (tier 0). Unknown ids are not basic.
    #[inline]
    pub fn is_basic(&self, id: ElementId) -> bool {
        self.elements.get(id.index()).is_some_and(Element::is_basic)
    }

    /// Basic element ids in catalog insertion order.
    ///
    /// This order seeds every search and is the order that search variants
    /// rotate, so it is stable for a given input.
    #[inline]
    pub fn basic_ids(&self) -> &[ElementId] {
        &self.basics
    }

    /// Basic elements in catalog insertion order.
    pub fn basic_elements(&self) -> impl Iterator<Item = &Element> {
        self.basics.iter().map(|&id| &self.elements[id.index()])
    }

    /// The flat recipe list, including recipes that violate the tier
    /// invariant.
    #[inline]
    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    /// # Panics
    ///
    /// Panics if `id` was not produced by this catalog.
    #[inline]
    pub fn recipe(&self, id: RecipeId) -> &Recipe {
        &self.recipes[id.index()]
    }

    /// Recipes in which `id` is an ingredient, in recipe order.
    ///
    /// A self-pair recipe is listed once.
    #[inline]
    pub fn recipes_with_ingredient(&self, id: ElementId) -> &[RecipeId] {
        self.by_ingredient
            .get(id.index())
            .map_or(&[][..], Vec::as_slice)
    }

    /// Recipes producing `id`, in recipe order.
    #[inline]
    pub fn recipes_with_result(&self, id: ElementId) -> &[RecipeId] {
        self.by_result.get(id.index()).map_or(&[][..], Vec::as_slice)
    }

    /// Resolve a recipe to element names.
    pub fn named(&self, id: RecipeId) -> NamedRecipe {
        let r = self.recipe(id);
        NamedRecipe::new(
            self.name(r.ingredients[0]),
            self.name(r.ingredients[1]),
            self.name(r.result),
        )
    }
}

// ---------------------------------------------------------------------------
// CatalogBuilder
// ---------------------------------------------------------------------------

/// Incremental catalog construction.
///
/// Elements may reference ingredients declared later; names are resolved
/// in [`build`](Self::build).
#[derive(Clone, Debug, Default)]
pub struct CatalogBuilder {
    entries: Vec<(u32, RawElement)>,
}

impl CatalogBuilder {
    /// Add a basic (tier-0) element.
    pub fn basic(self, name: impl Into<String>) -> Self {
        self.raw(0, RawElement::new(name))
    }

    /// Add an element at `tier` with the given ingredient pairs.
    pub fn element<'r>(
        self,
        name: impl Into<String>,
        tier: u32,
        recipes: impl IntoIterator<Item = (&'r str, &'r str)>,
    ) -> Self {
        let mut raw = RawElement::new(name);
        for (a, b) in recipes {
            raw = raw.with_recipe(a, b);
        }
        self.raw(tier, raw)
    }

    /// Add an element exactly as declared by the ingestion source.
    pub fn raw(mut self, tier: u32, raw: RawElement) -> Self {
        self.entries.push((tier, raw));
        self
    }

    /// Intern every element, then resolve and index recipes.
    ///
    /// Fails on a repeated name or a tier above `i32::MAX`.
    ///
    /// Recipe declarations that are not pairs or that name an unknown
    /// ingredient are skipped with a warning. Tier-violating recipes are
    /// kept; searches filter them when they are considered.
    pub fn build(self) -> Result<Catalog, CatalogError> {
        let mut catalog = Catalog::default();
        let mut declared = Vec::with_capacity(self.entries.len());

        for (tier, raw) in self.entries {
            if catalog.names.contains_key(&raw.name) {
                return Err(CatalogError::DuplicateElement(raw.name));
            }
            if i32::try_from(tier).is_err() {
                return Err(CatalogError::TierOutOfRange {
                    name: raw.name,
                    tier,
                });
            }
            let id = ElementId(catalog.elements.len() as u32);
            catalog.names.insert(raw.name.clone(), id);
            if tier == 0 {
                catalog.basics.push(id);
            }
            catalog.elements.push(Element {
                id,
                name: raw.name,
                tier,
                recipes: Vec::new(),
                image_url: raw.image_url,
            });
            declared.push(raw.recipes);
        }

        let n = catalog.elements.len();
        catalog.by_ingredient = vec![Vec::new(); n];
        catalog.by_result = vec![Vec::new(); n];

        for (i, pairs) in declared.into_iter().enumerate() {
            let result = ElementId(i as u32);
            for pair in pairs {
                let [a, b] = pair.as_slice() else {
                    log::warn!(
                        "catalog: skipping {}-ingredient recipe for {}",
                        pair.len(),
                        catalog.name(result)
                    );
                    continue;
                };
                let (Some(a), Some(b)) = (catalog.id_of(a), catalog.id_of(b)) else {
                    log::warn!(
                        "catalog: skipping recipe {a} + {b} for {}: unknown ingredient",
                        catalog.name(result)
                    );
                    continue;
                };
                let rid = RecipeId(catalog.recipes.len() as u32);
                catalog.recipes.push(Recipe {
                    ingredients: [a, b],
                    result,
                });
                catalog.elements[i].recipes.push(rid);
                catalog.by_result[i].push(rid);
                catalog.by_ingredient[a.index()].push(rid);
                if b != a {
                    catalog.by_ingredient[b.index()].push(rid);
                }
            }
        }

        log::debug!(
            "catalog: loaded {} elements with {} recipes ({} basic)",
            catalog.elements.len(),
            catalog.recipes.len(),
            catalog.basics.len()
        );
        Ok(catalog)
    }
}
