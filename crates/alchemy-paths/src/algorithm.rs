use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::bfs::BreadthFirst;
use crate::bidirectional::Bidirectional;
use crate::dfs::DepthFirst;
use crate::traits::{PathFinder, RecipeSource};

/// The available search engines.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Algorithm {
    #[default]
    Bfs,
    Dfs,
    Bidirectional,
}

impl Algorithm {
    pub const ALL: [Algorithm; 3] = [Algorithm::Bfs, Algorithm::Dfs, Algorithm::Bidirectional];

    /// Wrap `source` in the engine this variant names.
    pub fn finder<'a, S: RecipeSource>(self, source: &'a S) -> Box<dyn PathFinder + 'a> {
        match self {
            Algorithm::Bfs => Box::new(BreadthFirst::new(source)),
            Algorithm::Dfs => Box::new(DepthFirst::new(source)),
            Algorithm::Bidirectional => Box::new(Bidirectional::new(source)),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Algorithm::Bfs => "BFS",
            Algorithm::Dfs => "DFS",
            Algorithm::Bidirectional => "BID",
        };
        f.write_str(s)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown algorithm {0:?}, expected BFS, DFS or BID")]
pub struct ParseAlgorithmError(String);

impl FromStr for Algorithm {
    type Err = ParseAlgorithmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bfs" => Ok(Algorithm::Bfs),
            "dfs" => Ok(Algorithm::Dfs),
            "bid" | "bidirectional" => Ok(Algorithm::Bidirectional),
            _ => Err(ParseAlgorithmError(s.to_string())),
        }
    }
}
