//! Tier-grouped ingestion format.
//!
//! The catalog arrives from the scraping step as a list of tier groups,
//! each holding the elements of one tier with their declared recipes:
//!
//! ```json
//! [
//!   { "tierNum": 0, "elements": [ { "name": "Air", "recipes": [], "imageUrl": "air.svg" } ] },
//!   { "tierNum": 1, "elements": [ { "name": "Dust", "recipes": [["Air", "Earth"]] } ] }
//! ]
//! ```

use crate::catalog::{Catalog, CatalogBuilder};
use crate::error::CatalogError;

/// An element as declared by the ingestion source, before interning.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RawElement {
    pub name: String,
    /// Ingredient-name lists; only two-ingredient entries become recipes.
    #[cfg_attr(feature = "serde", serde(default))]
    pub recipes: Vec<Vec<String>>,
    #[cfg_attr(
        feature = "serde",
        serde(rename = "imageUrl", default, skip_serializing_if = "Option::is_none")
    )]
    pub image_url: Option<String>,
}

impl RawElement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Add a two-ingredient recipe (builder).
    pub fn with_recipe(mut self, first: impl Into<String>, second: impl Into<String>) -> Self {
        self.recipes.push(vec![first.into(), second.into()]);
        self
    }

    /// Set the display-image reference (builder).
    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }
}

/// All elements of one tier.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TierGroup {
    #[cfg_attr(feature = "serde", serde(rename = "tierNum"))]
    pub tier: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub elements: Vec<RawElement>,
}

impl Catalog {
    /// Build a catalog from tier groups.
    ///
    /// Insertion order is group order, then element order within a group;
    /// it determines element ids and the order of [`basic_ids`](Catalog::basic_ids).
    pub fn from_groups(groups: impl IntoIterator<Item = TierGroup>) -> Result<Self, CatalogError> {
        let mut builder = CatalogBuilder::default();
        for group in groups {
            for raw in group.elements {
                builder = builder.raw(group.tier, raw);
            }
        }
        builder.build()
    }

    /// Parse the tier-grouped JSON produced by the scraper.
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let groups: Vec<TierGroup> = serde_json::from_str(json)?;
        Self::from_groups(groups)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_preserve_insertion_order() {
        let groups = vec![
            TierGroup {
                tier: 0,
                elements: vec![RawElement::new("Water"), RawElement::new("Fire")],
            },
            TierGroup {
                tier: 1,
                elements: vec![RawElement::new("Steam").with_recipe("Water", "Fire")],
            },
            TierGroup {
                tier: 0,
                elements: vec![RawElement::new("Air")],
            },
        ];
        let catalog = Catalog::from_groups(groups).unwrap();
        let basics: Vec<&str> = catalog.basic_elements().map(|e| e.name()).collect();
        assert_eq!(basics, ["Water", "Fire", "Air"]);
        assert_eq!(catalog.tier_of_name("Steam"), 1);
    }

    #[test]
    fn image_reference_is_kept() {
        let groups = vec![TierGroup {
            tier: 0,
            elements: vec![RawElement::new("Earth").with_image("earth.svg")],
        }];
        let catalog = Catalog::from_groups(groups).unwrap();
        let earth = catalog.element_by_name("Earth").unwrap();
        assert_eq!(earth.image_url(), Some("earth.svg"));
    }
}
