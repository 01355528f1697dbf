//! Tree assembler: rebuilds a navigable tree from the flat node collection.
//!
//! Two phases: index the whole collection by parent id once, then attach
//! children starting from the requested node. No per-node lookups against
//! the store, so assembly is O(n) regardless of depth or fan-out.

use std::collections::{HashMap, HashSet};

use tracing::{debug, instrument, warn};

use crate::domain::entities::{Node, NodeId, NodeKind};
use crate::domain::error::DomainError;
use crate::domain::tree::NodeTree;

/// Result type for tree operations.
pub type TreeResult<T> = Result<T, DomainError>;

/// Map from parent id to direct children, in input order.
///
/// The `None` bucket holds parentless nodes (normally exactly the root).
#[derive(Debug, Default, Clone)]
pub struct ParentIndex {
    children: HashMap<Option<NodeId>, Vec<NodeId>>,
}

impl ParentIndex {
    pub fn build(nodes: &[Node]) -> Self {
        let mut children: HashMap<Option<NodeId>, Vec<NodeId>> = HashMap::new();
        for node in nodes {
            children.entry(node.parent_id).or_default().push(node.id);
        }
        Self { children }
    }

    pub fn children_of(&self, parent: Option<NodeId>) -> &[NodeId] {
        self.children
            .get(&parent)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn roots(&self) -> &[NodeId] {
        self.children_of(None)
    }

    /// Every transitive descendant of `id`, excluding `id` itself.
    pub fn descendants(&self, id: NodeId) -> TreeResult<HashSet<NodeId>> {
        let mut found = HashSet::new();
        let mut stack = vec![id];

        while let Some(current) = stack.pop() {
            for &child in self.children_of(Some(current)) {
                if child == id || !found.insert(child) {
                    return Err(DomainError::CycleDetected(child));
                }
                stack.push(child);
            }
        }

        Ok(found)
    }
}

/// Builds `NodeTree`s from a flat collection of nodes carrying parent ids.
pub struct TreeAssembler {
    index: ParentIndex,
    nodes: HashMap<NodeId, Node>,
}

impl TreeAssembler {
    /// Index the collection. Its order must reflect creation order.
    pub fn new(nodes: Vec<Node>) -> Self {
        let index = ParentIndex::build(&nodes);
        let nodes = nodes.into_iter().map(|n| (n.id, n)).collect();
        Self { index, nodes }
    }

    /// Locate the start node: the given id, or the unique parentless node.
    pub fn find_start(&self, start: Option<NodeId>) -> TreeResult<NodeId> {
        match start {
            Some(id) if self.nodes.contains_key(&id) => Ok(id),
            Some(id) => Err(DomainError::NotFound(id)),
            None => match self.index.roots() {
                [] => Err(DomainError::RootNotFound),
                [root] => Ok(*root),
                roots => Err(DomainError::validation(format!(
                    "expected exactly one root node, found {}",
                    roots.len()
                ))),
            },
        }
    }

    /// Assemble the subtree rooted at `start` (or at the true root).
    #[instrument(level = "debug", skip(self), fields(nodes = self.nodes.len()))]
    pub fn assemble(mut self, start: Option<NodeId>) -> TreeResult<NodeTree> {
        let root = self.find_start(start)?;
        let mut attached = HashMap::new();
        let mut visited = HashSet::new();
        let mut stack = vec![root];

        while let Some(current) = stack.pop() {
            if !visited.insert(current) {
                return Err(DomainError::CycleDetected(current));
            }
            let Some(mut node) = self.nodes.remove(&current) else {
                // parent index and node map come from the same collection
                continue;
            };

            let child_ids = self.index.children_of(Some(current));
            match &mut node.kind {
                NodeKind::Directory { children } => {
                    *children = child_ids.to_vec();
                    stack.extend(child_ids.iter().rev().copied());
                }
                NodeKind::Word { .. } | NodeKind::Image { .. } | NodeKind::Text { .. } => {
                    if !child_ids.is_empty() {
                        warn!(
                            "ignoring {} child node(s) attached to file {}",
                            child_ids.len(),
                            current
                        );
                    }
                }
            }

            attached.insert(current, node);
        }

        debug!("assembled {} node(s) under {}", attached.len(), root);
        Ok(NodeTree::new(root, attached))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::FileSpec;

    fn text(name: &str, size: f64, parent: NodeId) -> Node {
        Node::file(name, size, Some(parent), FileSpec::Text { encoding: "UTF-8".into() })
    }

    #[test]
    fn given_flat_nodes_when_assembling_then_children_keep_input_order() {
        let root = Node::directory("Root", None);
        let a = text("a.txt", 1.0, root.id);
        let b = text("b.txt", 2.0, root.id);
        let c = text("c.txt", 3.0, root.id);
        let ids = vec![a.id, b.id, c.id];

        let tree = TreeAssembler::new(vec![root.clone(), a, b, c])
            .assemble(None)
            .unwrap();

        assert_eq!(tree.root().children(), ids.as_slice());
        assert_eq!(tree.total_size(), 6.0);
    }

    #[test]
    fn given_unordered_input_when_assembling_then_child_before_parent_is_fine() {
        let root = Node::directory("Root", None);
        let sub = Node::directory("sub", Some(root.id));
        let leaf = text("leaf.txt", 4.0, sub.id);

        let tree = TreeAssembler::new(vec![leaf, sub.clone(), root])
            .assemble(None)
            .unwrap();

        assert_eq!(tree.len(), 3);
        assert_eq!(tree.total_size_of(&sub.id), Some(4.0));
    }

    #[test]
    fn given_unknown_start_when_assembling_then_not_found() {
        let root = Node::directory("Root", None);
        let missing = NodeId::new();
        let err = TreeAssembler::new(vec![root]).assemble(Some(missing)).unwrap_err();
        assert_eq!(err, DomainError::NotFound(missing));
    }

    #[test]
    fn given_empty_collection_when_assembling_root_then_root_not_found() {
        let err = TreeAssembler::new(vec![]).assemble(None).unwrap_err();
        assert_eq!(err, DomainError::RootNotFound);
    }

    #[test]
    fn given_two_parentless_nodes_when_assembling_root_then_validation_error() {
        let err = TreeAssembler::new(vec![Node::directory("a", None), Node::directory("b", None)])
            .assemble(None)
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn given_parent_cycle_when_assembling_then_cycle_detected() {
        let mut a = Node::directory("a", None);
        let b = Node::directory("b", Some(a.id));
        a.parent_id = Some(b.id);
        let start = a.id;

        let err = TreeAssembler::new(vec![a, b]).assemble(Some(start)).unwrap_err();
        assert!(matches!(err, DomainError::CycleDetected(_)));
    }

    #[test]
    fn given_nested_dirs_when_collecting_descendants_then_includes_all_levels() {
        let root = Node::directory("Root", None);
        let sub = Node::directory("sub", Some(root.id));
        let deep = Node::directory("deep", Some(sub.id));
        let leaf = text("leaf.txt", 1.0, deep.id);
        let sibling = text("other.txt", 1.0, root.id);
        let nodes = vec![root, sub.clone(), deep.clone(), leaf.clone(), sibling.clone()];

        let descendants = ParentIndex::build(&nodes).descendants(sub.id).unwrap();

        assert_eq!(descendants, HashSet::from([deep.id, leaf.id]));
        assert!(!descendants.contains(&sibling.id));
    }
}
