//! Recipes: an ingredient pair combining into a result.

use std::fmt;

use crate::element::ElementId;

/// Index of a recipe in the catalog's flat recipe list.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RecipeId(pub u32);

impl RecipeId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Two ingredients combining into a result, by id.
///
/// The pair is stored in declaration order; combination itself is
/// unordered.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Recipe {
    pub ingredients: [ElementId; 2],
    pub result: ElementId,
}

impl Recipe {
    /// Whether `id` is one of the two ingredients.
    #[inline]
    pub fn uses(&self, id: ElementId) -> bool {
        self.ingredients[0] == id || self.ingredients[1] == id
    }

    /// The ingredient paired with `id`.
    ///
    /// For a self-pair (`X + X`) this is `id` itself. If `id` is not an
    /// ingredient the first ingredient is returned.
    #[inline]
    pub fn co_ingredient(&self, id: ElementId) -> ElementId {
        if self.ingredients[0] == id {
            self.ingredients[1]
        } else {
            self.ingredients[0]
        }
    }

    /// Whether both ingredients are the same element.
    #[inline]
    pub fn is_self_pair(&self) -> bool {
        self.ingredients[0] == self.ingredients[1]
    }
}

/// A recipe resolved to element names, as handed to external callers.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NamedRecipe {
    pub ingredients: [String; 2],
    pub result: String,
}

impl NamedRecipe {
    pub fn new(
        first: impl Into<String>,
        second: impl Into<String>,
        result: impl Into<String>,
    ) -> Self {
        Self {
            ingredients: [first.into(), second.into()],
            result: result.into(),
        }
    }

    /// Ingredients in lexicographic order, independent of declaration order.
    pub fn sorted_ingredients(&self) -> [&str; 2] {
        let [a, b] = &self.ingredients;
        if a <= b { [a, b] } else { [b, a] }
    }
}

impl fmt::Display for NamedRecipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} + {} -> {}",
            self.ingredients[0], self.ingredients[1], self.result
        )
    }
}
