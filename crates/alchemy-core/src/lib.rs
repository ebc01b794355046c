//! **alchemy-core**: element and recipe catalog (core types).
//!
//! This crate provides the foundational types shared by the path-finding
//! engines: interned element and recipe identifiers, the tier-grouped
//! ingestion format, and the read-only [`Catalog`] index built once and
//! shared by every search.

pub mod catalog;
pub mod element;
pub mod error;
pub mod ingest;
pub mod recipe;

pub use catalog::{Catalog, CatalogBuilder, UNKNOWN_TIER};
pub use element::{Element, ElementId};
pub use error::CatalogError;
pub use ingest::{RawElement, TierGroup};
pub use recipe::{NamedRecipe, Recipe, RecipeId};
