use thiserror::Error;

/// Terminal outcomes of a single search attempt.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SearchError {
    /// The target is not in the catalog.
    #[error("element not found: {0}")]
    ElementNotFound(String),
    /// The catalog has no tier-0 elements to start from.
    #[error("no basic elements found")]
    NoBasicElements,
    /// The search space was exhausted without reaching the target.
    #[error("no path found to {0}")]
    NoPathFound(String),
}

/// Why a recipe path fails validation.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PathDefect {
    #[error("unknown element {0}")]
    UnknownElement(String),
    #[error("recipe {0} does not climb tiers")]
    TierViolation(String),
    #[error("recipe {recipe} uses {ingredient} before it is produced")]
    MissingIngredient { ingredient: String, recipe: String },
    #[error("path does not end at {0}")]
    WrongTarget(String),
}
