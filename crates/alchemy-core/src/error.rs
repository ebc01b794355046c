use thiserror::Error;

/// Errors raised while building a [`Catalog`](crate::Catalog).
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Two elements share the same name.
    #[error("catalog: duplicate element {0:?}")]
    DuplicateElement(String),
    /// A tier too large to compare against the signed tier sentinel.
    #[error("catalog: tier {tier} of {name:?} is out of range")]
    TierOutOfRange { name: String, tier: u32 },
    /// The tier-grouped JSON could not be parsed.
    #[cfg(feature = "serde")]
    #[error("catalog: invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}
