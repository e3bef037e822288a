//! Menu hierarchy resolver
//!
//! The menu table is a self-referential tree (`parent_id` defines a forest).
//! One snapshot's rows are loaded into an adjacency map and ancestor chains
//! are resolved on demand, one walk per affected menu - never for the whole
//! tree. The walk is iterative with a visited set, so a corrupt parent chain
//! fails with `CyclicHierarchy` instead of spinning.

use crate::error::{AppError, Result};
use crate::records::{MenuNode, MenuTreeNode};
use std::collections::{HashMap, HashSet};

/// Adjacency view over one snapshot's menu rows, keyed by node id.
#[derive(Debug, Clone, Default)]
pub struct MenuTree {
    nodes: HashMap<i32, MenuNode>,
}

impl MenuTree {
    pub fn from_nodes(nodes: Vec<MenuNode>) -> Self {
        Self {
            nodes: nodes.into_iter().map(|n| (n.id, n)).collect(),
        }
    }

    /// Resolve a node's ancestor chain into a display path.
    ///
    /// Walks parent references from the node up to its root, accumulating
    /// names, and returns the node together with its `->`-joined path and
    /// depth (number of path segments, so a root menu has depth 1). A parent
    /// reference to a missing node ends the walk at the last known ancestor
    /// rather than failing: the path exists for display, and a pruned parent
    /// row must not hide the node itself.
    pub fn resolve_path(&self, node_id: i32) -> Result<MenuTreeNode> {
        let node = self
            .nodes
            .get(&node_id)
            .ok_or(AppError::NotFound(node_id))?;

        let mut segments = vec![node.name.as_str()];
        let mut visited = HashSet::from([node_id]);
        let mut parent = node.parent_id;

        while let Some(pid) = parent {
            if !visited.insert(pid) {
                return Err(AppError::CyclicHierarchy(node_id));
            }
            match self.nodes.get(&pid) {
                Some(ancestor) => {
                    segments.push(ancestor.name.as_str());
                    parent = ancestor.parent_id;
                }
                None => break,
            }
        }

        segments.reverse();
        Ok(MenuTreeNode {
            id: node.id,
            parent_id: node.parent_id,
            name: node.name.clone(),
            depth: segments.len() as u32,
            hierarchy_path: segments.join("->"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn node(id: i32, parent_id: Option<i32>, name: &str) -> MenuNode {
        MenuNode {
            id,
            parent_id,
            name: name.to_string(),
        }
    }

    fn sample_tree() -> MenuTree {
        MenuTree::from_nodes(vec![
            node(1, None, "Root"),
            node(2, Some(1), "Sales"),
            node(3, Some(2), "Orders"),
            node(4, Some(1), "Inventory"),
        ])
    }

    #[test]
    fn test_resolve_leaf_path() {
        let resolved = sample_tree().resolve_path(3).unwrap();
        assert_eq!(resolved.hierarchy_path, "Root->Sales->Orders");
        assert_eq!(resolved.depth, 3);
        assert_eq!(resolved.parent_id, Some(2));
        assert_eq!(resolved.name, "Orders");
    }

    #[test]
    fn test_resolve_root_path() {
        let resolved = sample_tree().resolve_path(1).unwrap();
        assert_eq!(resolved.hierarchy_path, "Root");
        assert_eq!(resolved.depth, 1);
        assert_eq!(resolved.parent_id, None);
    }

    #[test]
    fn test_unknown_node_is_not_found() {
        let err = sample_tree().resolve_path(99).unwrap_err();
        assert!(matches!(err, AppError::NotFound(99)));
    }

    #[test]
    fn test_cycle_is_detected() {
        let tree = MenuTree::from_nodes(vec![
            node(1, Some(2), "a"),
            node(2, Some(1), "b"),
        ]);
        let err = tree.resolve_path(1).unwrap_err();
        assert!(matches!(err, AppError::CyclicHierarchy(1)));
    }

    #[test]
    fn test_dangling_parent_ends_walk() {
        let tree = MenuTree::from_nodes(vec![node(5, Some(42), "Orphan")]);
        let resolved = tree.resolve_path(5).unwrap();
        assert_eq!(resolved.hierarchy_path, "Orphan");
        assert_eq!(resolved.depth, 1);
    }
}
