use std::time::Duration;

use alchemy_core::{ElementId, NamedRecipe, RecipeId};

use crate::Algorithm;
use crate::reconstruct::named_path;
use crate::traits::RecipeSource;
use crate::tree::DisplayTree;

/// Outcome of one successful search.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchResult {
    pub algorithm: Algorithm,
    pub target: String,
    /// Recipes in basic -> target order.
    pub path: Vec<NamedRecipe>,
    /// Distinct elements marked during the run.
    pub visited: usize,
    pub elapsed: Duration,
    pub tree: DisplayTree,
    /// Variant index, set for results collected by a multi-path query.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub variant: Option<usize>,
    /// Element where the two halves of a bidirectional search joined.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub meeting_point: Option<String>,
}

impl SearchResult {
    pub(crate) fn assemble<S: RecipeSource + ?Sized>(
        source: &S,
        algorithm: Algorithm,
        target: ElementId,
        path: &[RecipeId],
        visited: usize,
        elapsed: Duration,
    ) -> Self {
        Self {
            algorithm,
            target: source.name(target).to_string(),
            path: named_path(source, path),
            visited,
            elapsed,
            tree: DisplayTree::build(source, target, path),
            variant: None,
            meeting_point: None,
        }
    }

    /// Number of recipes in the path.
    #[inline]
    pub fn len(&self) -> usize {
        self.path.len()
    }

    /// True for a basic target.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    /// Duplicate-detection key of the path; see [`path_signature`].
    pub fn signature(&self) -> String {
        path_signature(&self.path)
    }
}

/// Canonical key of a recipe path.
///
/// Each step is written `result=a+b` with its ingredients sorted, and steps
/// are joined by `;` in path order. Two paths share a signature exactly when
/// they use the same recipes in the same order, regardless of how each
/// recipe's ingredients were listed.
pub fn path_signature(path: &[NamedRecipe]) -> String {
    let mut sig = String::new();
    for (i, step) in path.iter().enumerate() {
        if i > 0 {
            sig.push(';');
        }
        let [a, b] = step.sorted_ingredients();
        sig.push_str(&step.result);
        sig.push('=');
        sig.push_str(a);
        sig.push('+');
        sig.push_str(b);
    }
    sig
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::scenario;

    #[test]
    fn signature_ignores_ingredient_order() {
        let a = [NamedRecipe::new("A", "B", "C"), NamedRecipe::new("C", "A", "D")];
        let b = [NamedRecipe::new("B", "A", "C"), NamedRecipe::new("A", "C", "D")];
        assert_eq!(path_signature(&a), "C=A+B;D=A+C");
        assert_eq!(path_signature(&a), path_signature(&b));
    }

    #[test]
    fn signature_keeps_step_order() {
        let a = [NamedRecipe::new("A", "B", "L"), NamedRecipe::new("B", "B", "R")];
        let b = [NamedRecipe::new("B", "B", "R"), NamedRecipe::new("A", "B", "L")];
        assert_ne!(path_signature(&a), path_signature(&b));
        assert_eq!(path_signature(&[]), "");
    }

    #[test]
    fn assemble_names_path_and_tree() {
        let c = scenario();
        let d = c.id_of("D").unwrap();
        let r = SearchResult::assemble(
            &c,
            Algorithm::Bfs,
            d,
            &[RecipeId(0), RecipeId(1)],
            4,
            Duration::from_millis(1),
        );
        assert_eq!(r.target, "D");
        assert_eq!(r.len(), 2);
        assert_eq!(r.path[1].to_string(), "A + C -> D");
        assert_eq!(r.tree.nodes.len(), 4);
        assert_eq!(r.signature(), "C=A+B;D=A+C");
        assert_eq!(r.variant, None);
        assert_eq!(r.meeting_point, None);
    }
}
