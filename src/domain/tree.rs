//! Assembled, request-scoped view of a (sub)tree.

use std::collections::HashMap;

use tracing::instrument;

use crate::domain::entities::{Node, NodeId};

/// Owned parent-to-children view produced by tree assembly.
///
/// Holds only the nodes reachable from `root`. Directory `children` lists
/// are populated; navigation goes by id through `nodes`.
#[derive(Debug, Clone)]
pub struct NodeTree {
    nodes: HashMap<NodeId, Node>,
    root: NodeId,
}

impl NodeTree {
    pub(crate) fn new(root: NodeId, nodes: HashMap<NodeId, Node>) -> Self {
        Self { nodes, root }
    }

    pub fn root_id(&self) -> NodeId {
        self.root
    }

    pub fn root(&self) -> &Node {
        // invariant: assembly always inserts the start node
        &self.nodes[&self.root]
    }

    pub fn get(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Direct children of `node` in creation order.
    pub fn children<'a>(&'a self, node: &'a Node) -> impl Iterator<Item = &'a Node> + 'a {
        node.children().iter().filter_map(move |id| self.nodes.get(id))
    }

    /// Aggregate size of the node with `id`, or None if it is not in this tree.
    pub fn total_size_of(&self, id: &NodeId) -> Option<f64> {
        self.get(id)
            .map(|node| node.total_size(&|child: &NodeId| self.nodes.get(child)))
    }

    pub fn total_size(&self) -> f64 {
        self.root().total_size(&|child: &NodeId| self.nodes.get(child))
    }

    /// Pre-order, left-to-right iteration starting at the root.
    #[instrument(level = "trace", skip(self))]
    pub fn iter(&self) -> TreeIterator<'_> {
        TreeIterator::new(self)
    }

    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        self.calculate_depth(self.root())
    }

    fn calculate_depth(&self, node: &Node) -> usize {
        1 + self
            .children(node)
            .map(|child| self.calculate_depth(child))
            .max()
            .unwrap_or(0)
    }

    pub fn into_nodes(self) -> HashMap<NodeId, Node> {
        self.nodes
    }
}

pub struct TreeIterator<'a> {
    tree: &'a NodeTree,
    stack: Vec<NodeId>,
}

impl<'a> TreeIterator<'a> {
    fn new(tree: &'a NodeTree) -> Self {
        Self {
            tree,
            stack: vec![tree.root],
        }
    }
}

impl<'a> Iterator for TreeIterator<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current) = self.stack.pop() {
            if let Some(node) = self.tree.get(&current) {
                // reversed so the first child is popped next
                self.stack.extend(node.children().iter().rev().copied());
                return Some(node);
            }
        }
        None
    }
}
