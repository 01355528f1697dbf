//! I/O boundary traits for testability
//!
//! The node store is the only persistence seam. Services depend on
//! `Arc<dyn NodeStore>` so tests can swap the file-backed store for the
//! in-memory one.

use std::collections::HashSet;
use std::io;

use parking_lot::RwLock;

use crate::domain::{Node, NodeId};
use crate::infrastructure::record::detached;

/// Flat collection of node records keyed by id.
///
/// Nodes come back in insertion order with empty directory children;
/// hierarchy lives in `parent_id` only.
pub trait NodeStore: Send + Sync {
    /// Every stored node, in insertion order.
    fn load_all_nodes(&self) -> io::Result<Vec<Node>>;

    /// Append a new node.
    fn insert(&self, node: &Node) -> io::Result<()>;

    /// Replace the stored node with the same id.
    ///
    /// Fails with `ErrorKind::NotFound` when no such node exists.
    fn update(&self, node: &Node) -> io::Result<()>;

    /// Remove all listed ids in one step. Returns how many were present.
    fn remove_by_ids(&self, ids: &HashSet<NodeId>) -> io::Result<usize>;
}

pub(crate) fn missing_node(id: NodeId) -> io::Error {
    io::Error::new(io::ErrorKind::NotFound, format!("node {} not in store", id))
}

pub(crate) fn duplicate_node(id: NodeId) -> io::Error {
    io::Error::new(io::ErrorKind::AlreadyExists, format!("node {} already stored", id))
}

// ============================================================
// IMPLEMENTATIONS
// ============================================================

/// Process-local store, used by tests.
#[derive(Debug, Default)]
pub struct InMemoryNodeStore {
    nodes: RwLock<Vec<Node>>,
}

impl InMemoryNodeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with `nodes`, in the given order.
    pub fn with_nodes(nodes: impl IntoIterator<Item = Node>) -> Self {
        Self {
            nodes: RwLock::new(nodes.into_iter().map(|n| detached(&n)).collect()),
        }
    }
}

impl NodeStore for InMemoryNodeStore {
    fn load_all_nodes(&self) -> io::Result<Vec<Node>> {
        Ok(self.nodes.read().clone())
    }

    fn insert(&self, node: &Node) -> io::Result<()> {
        let mut nodes = self.nodes.write();
        if nodes.iter().any(|n| n.id == node.id) {
            return Err(duplicate_node(node.id));
        }
        nodes.push(detached(node));
        Ok(())
    }

    fn update(&self, node: &Node) -> io::Result<()> {
        let mut nodes = self.nodes.write();
        let slot = nodes
            .iter_mut()
            .find(|n| n.id == node.id)
            .ok_or_else(|| missing_node(node.id))?;
        *slot = detached(node);
        Ok(())
    }

    fn remove_by_ids(&self, ids: &HashSet<NodeId>) -> io::Result<usize> {
        let mut nodes = self.nodes.write();
        let before = nodes.len();
        nodes.retain(|n| !ids.contains(&n.id));
        Ok(before - nodes.len())
    }
}
