//! Read-side service
//!
//! Every call loads the flat collection once, assembles the requested
//! (sub)tree and runs one recursive pass over it. Nothing is cached.

use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::{ApplicationResult, IoResultExt};
use crate::domain::{
    self, DomainError, Element, Node, NodeId, NodeTree, SearchResult, TreeAssembler,
};
use crate::infrastructure::traits::NodeStore;

/// Aggregate size of a subtree together with the traversal that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct SizeReport {
    pub id: NodeId,
    pub name: String,
    /// Kilobytes.
    pub total_size: f64,
    pub traverse_log: Vec<String>,
}

/// Read operations over the node hierarchy.
pub struct QueryService {
    store: Arc<dyn NodeStore>,
}

impl QueryService {
    /// Create a new query service.
    pub fn new(store: Arc<dyn NodeStore>) -> Self {
        Self { store }
    }

    fn assembler(&self) -> ApplicationResult<TreeAssembler> {
        let nodes = self.store.load_all_nodes().with_context("load nodes")?;
        debug!("loaded {} node(s)", nodes.len());
        Ok(TreeAssembler::new(nodes))
    }

    /// Assembled tree rooted at `root_id`, or at the true root when None.
    #[instrument(level = "debug", skip(self))]
    pub fn get_tree(&self, root_id: Option<NodeId>) -> ApplicationResult<NodeTree> {
        Ok(self.assembler()?.assemble(root_id)?)
    }

    /// Single node with its direct children populated.
    #[instrument(level = "debug", skip(self))]
    pub fn get_node(&self, id: NodeId) -> ApplicationResult<Node> {
        let tree = self.get_tree(Some(id))?;
        let mut nodes = tree.into_nodes();
        Ok(nodes.remove(&id).ok_or(DomainError::NotFound(id))?)
    }

    /// Aggregate size in KB of the node and everything below it.
    #[instrument(level = "debug", skip(self))]
    pub fn get_total_size(&self, id: NodeId) -> ApplicationResult<f64> {
        let tree = self.get_tree(Some(id))?;
        let total = tree.total_size();
        debug!("get_total_size: {} -> {}KB", id, total);
        Ok(total)
    }

    /// Files below the root whose extension matches, case-insensitively.
    ///
    /// An empty store yields an empty result rather than an error.
    #[instrument(level = "debug", skip(self))]
    pub fn search_by_extension(&self, extension: &str) -> ApplicationResult<SearchResult> {
        if extension.trim().trim_start_matches('.').is_empty() {
            return Err(DomainError::validation("extension must not be empty").into());
        }
        let tree = match self.get_tree(None) {
            Ok(tree) => tree,
            Err(e) if matches!(e.as_domain(), Some(DomainError::RootNotFound)) => {
                debug!("search_by_extension: empty store");
                return Ok(SearchResult::empty(extension));
            }
            Err(e) => return Err(e),
        };
        let result = domain::search_by_extension(&tree, extension);
        debug!("search_by_extension: {} match(es)", result.count);
        Ok(result)
    }

    /// `Visiting: a -> b` lines in pre-order, starting at `id`.
    #[instrument(level = "debug", skip(self))]
    pub fn get_traversal_log(&self, id: NodeId) -> ApplicationResult<Vec<String>> {
        let tree = self.get_tree(Some(id))?;
        Ok(domain::traversal_log(&tree))
    }

    /// Labeled element tree mirroring the subtree at `id`.
    #[instrument(level = "debug", skip(self))]
    pub fn get_serialized_structure(&self, id: NodeId) -> ApplicationResult<Element> {
        let tree = self.get_tree(Some(id))?;
        Ok(domain::serialize(&tree))
    }

    /// Box-drawing rendering of the subtree at `id`, or of the whole tree.
    #[instrument(level = "debug", skip(self))]
    pub fn get_rendered_text(&self, id: Option<NodeId>) -> ApplicationResult<String> {
        let tree = self.get_tree(id)?;
        Ok(domain::render(&tree))
    }

    /// Total size plus traversal log, computed from one assembled subtree.
    #[instrument(level = "debug", skip(self))]
    pub fn get_size_report(&self, id: NodeId) -> ApplicationResult<SizeReport> {
        let tree = self.get_tree(Some(id))?;
        let root = tree.root();
        Ok(SizeReport {
            id,
            name: root.name.clone(),
            total_size: tree.total_size(),
            traverse_log: domain::traversal_log(&tree),
        })
    }
}
