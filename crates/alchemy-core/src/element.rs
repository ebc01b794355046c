//! The [`Element`] type and its interned [`ElementId`].

use std::fmt;

use crate::recipe::RecipeId;

/// Dense index of an element inside a [`Catalog`](crate::Catalog).
///
/// Ids are assigned in catalog insertion order, so they double as indices
/// into per-search scratch arrays.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ElementId(pub u32);

impl ElementId {
    /// The id as a `usize` index.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// An element of the catalog.
///
/// Constructed once when the catalog is built and immutable afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Element {
    pub(crate) id: ElementId,
    pub(crate) name: String,
    pub(crate) tier: u32,
    pub(crate) recipes: Vec<RecipeId>,
    pub(crate) image_url: Option<String>,
}

impl Element {
    #[inline]
    pub fn id(&self) -> ElementId {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Distance class of the element; 0 means basic.
    #[inline]
    pub fn tier(&self) -> u32 {
        self.tier
    }

    /// Whether this is a basic (tier-0) element.
    #[inline]
    pub fn is_basic(&self) -> bool {
        self.tier == 0
    }

    /// Recipes declared for this element, in declaration order.
    ///
    /// These are the raw declarations: some may violate the tier invariant
    /// and are only filtered when a search considers them.
    #[inline]
    pub fn recipes(&self) -> &[RecipeId] {
        &self.recipes
    }

    /// Opaque display-image reference carried through from ingestion.
    #[inline]
    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }
}
