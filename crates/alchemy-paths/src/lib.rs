//! Recipe path-finding over tiered combination graphs.
//!
//! Given a [`RecipeSource`] (usually an [`alchemy_core::Catalog`]), the
//! engines in this crate find a sequence of pairwise combinations that turns
//! the basic elements into a requested target:
//!
//! - **Breadth-first** search ([`BreadthFirst`]), level-minimal paths
//! - **Depth-bounded** search ([`DepthFirst`]), single descent chains capped
//!   at twice the target's tier
//! - **Bidirectional** search ([`Bidirectional`]), forward from the basics
//!   and backward from the target until the halves join
//!
//! Every engine implements [`PathFinder`]. Single queries go through
//! [`PathFinder::find_shortest_path`]; [`PathFinder::find_multiple_paths`]
//! runs deterministic [`Variant`]s of the same engine on a small thread pool
//! and keeps the distinct results (see [`MultiPath`]).
//!
//! Recipes are only ever used when both ingredients sit on a lower tier than
//! the result, whatever the catalog declares.
//!
//! # Engines
//!
//! | Engine | Frontier | Path guarantee |
//! |---|---|---|
//! | [`BreadthFirst`] | FIFO, one recipe level at a time | fewest levels |
//! | [`DepthFirst`] | explicit frame stack | length <= 2 x target tier |
//! | [`Bidirectional`] | two level-synchronous frontiers | valid, not minimal |

mod algorithm;
mod bfs;
mod bidirectional;
mod config;
mod dfs;
mod error;
mod fewest;
mod multipath;
mod reconstruct;
mod result;
mod state;
mod traits;
mod tree;
mod variant;

#[cfg(test)]
mod properties;
#[cfg(test)]
mod testing;

pub use algorithm::{Algorithm, ParseAlgorithmError};
pub use bfs::BreadthFirst;
pub use bidirectional::Bidirectional;
pub use config::MultiPathConfig;
pub use dfs::DepthFirst;
pub use error::{PathDefect, SearchError};
pub use multipath::{MultiPath, PathSet};
pub use reconstruct::{assemble_path, named_path, validate_path};
pub use result::{SearchResult, path_signature};
pub use traits::{PathFinder, RecipeSource, recipe_is_tier_valid};
pub use tree::{DisplayTree, NodeKind, TreeEdge, TreeNode};
pub use variant::Variant;
