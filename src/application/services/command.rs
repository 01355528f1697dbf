//! Mutation engine
//!
//! Writes go straight to the flat store. Delete enumerates the subtree from
//! a fresh parent index and removes it in one bulk call.

use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::application::sample::{sample_hierarchy, Sample};
use crate::application::{ApplicationResult, IoResultExt};
use crate::domain::{CreateFile, DomainError, Node, NodeId, ParentIndex};
use crate::infrastructure::traits::NodeStore;

/// Create, rename and delete operations.
pub struct CommandService {
    store: Arc<dyn NodeStore>,
}

impl CommandService {
    /// Create a new command service.
    pub fn new(store: Arc<dyn NodeStore>) -> Self {
        Self { store }
    }

    fn load(&self) -> ApplicationResult<Vec<Node>> {
        self.store.load_all_nodes().with_context("load nodes")
    }

    /// New empty directory under `parent_id`, or the root when None.
    #[instrument(level = "debug", skip(self))]
    pub fn create_directory(
        &self,
        name: &str,
        parent_id: Option<NodeId>,
    ) -> ApplicationResult<Node> {
        validate_name(name)?;
        validate_placement(&self.load()?, parent_id)?;

        let node = Node::directory(name, parent_id);
        self.store.insert(&node).with_context("insert directory")?;
        info!("created directory '{}' ({})", node.name, node.id);
        Ok(node)
    }

    /// New typed file as described by `request`.
    #[instrument(level = "debug", skip(self), fields(name = %request.name))]
    pub fn create_file(&self, request: CreateFile) -> ApplicationResult<Node> {
        validate_name(&request.name)?;
        validate_size(request.size)?;
        validate_placement(&self.load()?, request.parent_id)?;

        let node = Node::file(request.name, request.size, request.parent_id, request.spec);
        self.store.insert(&node).with_context("insert file")?;
        info!("created {} '{}' ({})", node.kind_label(), node.name, node.id);
        Ok(node)
    }

    /// Change the name only. Id, parent, kind and attributes stay as they are.
    #[instrument(level = "debug", skip(self))]
    pub fn rename(&self, id: NodeId, new_name: &str) -> ApplicationResult<Node> {
        validate_name(new_name)?;
        let mut node = self
            .load()?
            .into_iter()
            .find(|n| n.id == id)
            .ok_or(DomainError::NotFound(id))?;

        debug!("rename: '{}' -> '{}'", node.name, new_name);
        node.name = new_name.to_string();
        self.store.update(&node).with_context("update node")?;
        Ok(node)
    }

    /// Remove the node and every descendant.
    ///
    /// Returns false, leaving the store untouched, when `id` does not exist.
    #[instrument(level = "debug", skip(self))]
    pub fn delete(&self, id: NodeId) -> ApplicationResult<bool> {
        let nodes = self.load()?;
        if !nodes.iter().any(|n| n.id == id) {
            debug!("delete: {} not found", id);
            return Ok(false);
        }

        let mut doomed = ParentIndex::build(&nodes).descendants(id)?;
        doomed.insert(id);

        let removed = self
            .store
            .remove_by_ids(&doomed)
            .with_context("remove nodes")?;
        info!("deleted {} node(s) under {}", removed, id);
        Ok(true)
    }

    /// Plant the sample hierarchy into an empty store.
    ///
    /// Returns the number of nodes created; 0 when the store already has data.
    #[instrument(level = "debug", skip(self))]
    pub fn seed_sample(&self) -> ApplicationResult<usize> {
        if !self.load()?.is_empty() {
            info!("store not empty, skipping sample data");
            return Ok(0);
        }
        let sample = sample_hierarchy();
        self.plant(&sample, None)?;
        let created = sample.count();
        info!("seeded {} sample node(s)", created);
        Ok(created)
    }

    fn plant(&self, sample: &Sample, parent_id: Option<NodeId>) -> ApplicationResult<()> {
        match sample {
            Sample::Directory { name, children } => {
                let dir = self.create_directory(name, parent_id)?;
                for child in children {
                    self.plant(child, Some(dir.id))?;
                }
            }
            Sample::File { name, size, spec } => {
                self.create_file(CreateFile {
                    name: name.to_string(),
                    size: *size,
                    parent_id,
                    spec: spec.clone(),
                })?;
            }
        }
        Ok(())
    }
}

fn validate_name(name: &str) -> Result<(), DomainError> {
    if name.trim().is_empty() {
        return Err(DomainError::validation("name must not be blank"));
    }
    Ok(())
}

fn validate_size(size: f64) -> Result<(), DomainError> {
    if !size.is_finite() || size < 0.0 {
        return Err(DomainError::validation(format!(
            "size must be a non-negative number of KB, got {}",
            size
        )));
    }
    Ok(())
}

/// A parent must exist and be a directory; without one, no root may exist yet.
fn validate_placement(nodes: &[Node], parent_id: Option<NodeId>) -> Result<(), DomainError> {
    match parent_id {
        Some(pid) => {
            let parent = nodes
                .iter()
                .find(|n| n.id == pid)
                .ok_or(DomainError::NotFound(pid))?;
            if !parent.is_directory() {
                return Err(DomainError::validation(format!(
                    "parent '{}' is a {}, not a directory",
                    parent.name,
                    parent.kind_label()
                )));
            }
        }
        None => {
            if let Some(root) = nodes.iter().find(|n| n.is_root()) {
                return Err(DomainError::validation(format!(
                    "root '{}' already exists; pass a parent",
                    root.name
                )));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_negative_or_nan_size_when_validating_then_rejected() {
        assert!(validate_size(-1.0).is_err());
        assert!(validate_size(f64::NAN).is_err());
        assert!(validate_size(f64::INFINITY).is_err());
        assert!(validate_size(0.0).is_ok());
    }

    #[test]
    fn given_blank_name_when_validating_then_rejected() {
        assert!(validate_name("   ").is_err());
        assert!(validate_name("a").is_ok());
    }
}
