//! Display tree handed to the external renderer.
//!
//! The tree is rooted at the target; each produced element points to the two
//! ingredients of the recipe that made it, down to basics. Nodes are listed
//! once even when an ingredient is shared between branches.

use std::collections::HashMap;

use alchemy_core::{ElementId, RecipeId};

use crate::traits::RecipeSource;

/// Role of a node in the display tree.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum NodeKind {
    Target,
    Basic,
    Ingredient,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TreeNode {
    pub id: String,
    pub label: String,
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: NodeKind,
    pub tier: i32,
    #[cfg_attr(
        feature = "serde",
        serde(rename = "imageUrl", default, skip_serializing_if = "Option::is_none")
    )]
    pub image_url: Option<String>,
}

/// Edge from an ingredient to the element it helps produce.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TreeEdge {
    pub id: String,
    pub source: String,
    pub target: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DisplayTree {
    pub target: String,
    pub nodes: Vec<TreeNode>,
    pub edges: Vec<TreeEdge>,
}

impl DisplayTree {
    /// Build the tree for `target` from a basic -> target recipe path.
    ///
    /// Expansion stops at basics and at elements the path does not produce.
    pub fn build<S: RecipeSource + ?Sized>(
        source: &S,
        target: ElementId,
        path: &[RecipeId],
    ) -> Self {
        let by_result: HashMap<ElementId, RecipeId> = path
            .iter()
            .map(|&rid| (source.recipe(rid).result, rid))
            .collect();

        let node = |id: ElementId, kind: NodeKind| TreeNode {
            id: source.name(id).to_string(),
            label: source.name(id).to_string(),
            kind,
            tier: source.tier_of(id),
            image_url: source.image_ref(id).map(str::to_string),
        };

        let mut tree = DisplayTree {
            target: source.name(target).to_string(),
            nodes: vec![node(target, NodeKind::Target)],
            edges: Vec::new(),
        };
        let mut listed = vec![false; source.element_count()];
        let mut expanded = vec![false; source.element_count()];
        listed[target.index()] = true;

        let mut stack = vec![target];
        while let Some(current) = stack.pop() {
            if expanded[current.index()] || source.is_basic(current) {
                continue;
            }
            expanded[current.index()] = true;
            let Some(&rid) = by_result.get(&current) else {
                continue;
            };
            let recipe = source.recipe(rid);
            for &ing in &recipe.ingredients {
                if !listed[ing.index()] {
                    listed[ing.index()] = true;
                    let kind = if source.is_basic(ing) {
                        NodeKind::Basic
                    } else {
                        NodeKind::Ingredient
                    };
                    tree.nodes.push(node(ing, kind));
                }
                let (from, to) = (source.name(ing), source.name(current));
                let id = format!("{from}-{to}");
                if !tree.edges.iter().any(|e| e.id == id) {
                    tree.edges.push(TreeEdge {
                        id,
                        source: from.to_string(),
                        target: to.to_string(),
                    });
                }
            }
            for &ing in recipe.ingredients.iter().rev() {
                stack.push(ing);
            }
        }
        tree
    }

    pub fn node(&self, id: &str) -> Option<&TreeNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Ingredient names feeding into `id`.
    pub fn children(&self, id: &str) -> Vec<&str> {
        self.edges
            .iter()
            .filter(|e| e.target == id)
            .map(|e| e.source.as_str())
            .collect()
    }
}
