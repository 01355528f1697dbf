//! File-backed node store: one TOML document with a `[[nodes]]` array.
//!
//! Every mutation is read-modify-write of the whole file, written through a
//! temp file in the same directory and renamed into place.

use std::collections::HashSet;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::{debug, trace};

use crate::domain::{Node, NodeId};
use crate::infrastructure::record::NodeRecord;
use crate::infrastructure::traits::{duplicate_node, missing_node, NodeStore};

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreDocument {
    #[serde(default)]
    nodes: Vec<NodeRecord>,
}

/// TOML file store. A missing file reads as an empty store.
#[derive(Debug)]
pub struct TomlNodeStore {
    path: PathBuf,
    /// Serializes read-modify-write cycles within this process.
    lock: Mutex<()>,
}

impl TomlNodeStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_document(&self) -> io::Result<StoreDocument> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                trace!("store file {} absent, starting empty", self.path.display());
                return Ok(StoreDocument::default());
            }
            Err(e) => return Err(e),
        };
        toml::from_str(&content).map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("{}: {}", self.path.display(), e),
            )
        })
    }

    fn write_document(&self, document: &StoreDocument) -> io::Result<()> {
        let content = toml::to_string_pretty(document)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        let dir = match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;

        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(content.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;

        debug!(
            "wrote {} node records to {}",
            document.nodes.len(),
            self.path.display()
        );
        Ok(())
    }

    fn modify<T>(&self, f: impl FnOnce(&mut StoreDocument) -> io::Result<T>) -> io::Result<T> {
        let _guard = self.lock.lock();
        let mut document = self.read_document()?;
        let result = f(&mut document)?;
        self.write_document(&document)?;
        Ok(result)
    }
}

impl NodeStore for TomlNodeStore {
    fn load_all_nodes(&self) -> io::Result<Vec<Node>> {
        let _guard = self.lock.lock();
        self.read_document()?
            .nodes
            .into_iter()
            .map(|record| {
                Node::try_from(record).map_err(|e| {
                    io::Error::new(
                        io::ErrorKind::InvalidData,
                        format!("{}: {}", self.path.display(), e),
                    )
                })
            })
            .collect()
    }

    fn insert(&self, node: &Node) -> io::Result<()> {
        self.modify(|document| {
            if document.nodes.iter().any(|r| r.id == node.id) {
                return Err(duplicate_node(node.id));
            }
            document.nodes.push(NodeRecord::from(node));
            Ok(())
        })
    }

    fn update(&self, node: &Node) -> io::Result<()> {
        self.modify(|document| {
            let slot = document
                .nodes
                .iter_mut()
                .find(|r| r.id == node.id)
                .ok_or_else(|| missing_node(node.id))?;
            *slot = NodeRecord::from(node);
            Ok(())
        })
    }

    fn remove_by_ids(&self, ids: &HashSet<NodeId>) -> io::Result<usize> {
        self.modify(|document| {
            let before = document.nodes.len();
            document.nodes.retain(|r| !ids.contains(&r.id));
            Ok(before - document.nodes.len())
        })
    }
}
