//! Domain entities: core data structures

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::error::DomainError;

/// Stable identifier of a node, assigned once at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(Uuid);

impl NodeId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for NodeId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for NodeId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim())
            .map(Self)
            .map_err(|e| DomainError::validation(format!("invalid node id '{}': {}", s, e)))
    }
}

/// Kind-specific part of a node.
///
/// Every recursive algorithm matches on this exhaustively, so a new kind
/// does not compile until each of them handles it.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Children in creation order; filled in by tree assembly only.
    Directory { children: Vec<NodeId> },
    Word { pages: u32 },
    Image { width: u32, height: u32 },
    Text { encoding: String },
}

impl NodeKind {
    /// Discriminator used by the persisted flat record.
    pub fn tag(&self) -> &'static str {
        match self {
            NodeKind::Directory { .. } => "Directory",
            NodeKind::Word { .. } => "WordFile",
            NodeKind::Image { .. } => "ImageFile",
            NodeKind::Text { .. } => "TextFile",
        }
    }

    pub fn empty_directory() -> Self {
        NodeKind::Directory {
            children: Vec::new(),
        }
    }
}

/// A single entry in the hierarchy.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: NodeId,
    pub name: String,
    /// Own size in KB. For directories this is overhead only, not the aggregate.
    pub size: f64,
    pub created_at: DateTime<Utc>,
    /// None exactly for the root.
    pub parent_id: Option<NodeId>,
    pub kind: NodeKind,
}

impl Node {
    /// New directory with zero size and the current timestamp.
    pub fn directory(name: impl Into<String>, parent_id: Option<NodeId>) -> Self {
        Self {
            id: NodeId::new(),
            name: name.into(),
            size: 0.0,
            created_at: Utc::now(),
            parent_id,
            kind: NodeKind::empty_directory(),
        }
    }

    /// New file of the kind described by `spec`.
    pub fn file(
        name: impl Into<String>,
        size: f64,
        parent_id: Option<NodeId>,
        spec: FileSpec,
    ) -> Self {
        Self {
            id: NodeId::new(),
            name: name.into(),
            size,
            created_at: Utc::now(),
            parent_id,
            kind: spec.into_kind(),
        }
    }

    pub fn is_directory(&self) -> bool {
        matches!(self.kind, NodeKind::Directory { .. })
    }

    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    pub fn kind_label(&self) -> &'static str {
        self.kind.tag()
    }

    /// Child ids for directories, empty for files.
    pub fn children(&self) -> &[NodeId] {
        match &self.kind {
            NodeKind::Directory { children } => children,
            NodeKind::Word { .. } | NodeKind::Image { .. } | NodeKind::Text { .. } => &[],
        }
    }

    pub fn extension(&self) -> String {
        extension(&self.name)
    }

    /// Human-readable kind attributes plus size, e.g. `pages: 15, size: 500KB`.
    /// None for directories.
    pub fn attribute_summary(&self) -> Option<String> {
        match &self.kind {
            NodeKind::Directory { .. } => None,
            NodeKind::Word { pages } => Some(format!("pages: {}, size: {}KB", pages, self.size)),
            NodeKind::Image { width, height } => Some(format!(
                "resolution: {}x{}, size: {}KB",
                width, height, self.size
            )),
            NodeKind::Text { encoding } => {
                Some(format!("encoding: {}, size: {}KB", encoding, self.size))
            }
        }
    }

    /// Own size for files; own size plus every child's total for directories.
    ///
    /// `resolve` maps a child id to its node. Recomputed on every call.
    pub fn total_size<'a, F>(&'a self, resolve: &F) -> f64
    where
        F: Fn(&NodeId) -> Option<&'a Node>,
    {
        match &self.kind {
            NodeKind::Directory { children } => {
                self.size
                    + children
                        .iter()
                        .filter_map(resolve)
                        .map(|child| child.total_size(resolve))
                        .sum::<f64>()
            }
            NodeKind::Word { .. } | NodeKind::Image { .. } | NodeKind::Text { .. } => self.size,
        }
    }
}

/// Extension of `name` including the leading dot, or "" when there is none.
///
/// `report.final.docx` → `.docx`, `Makefile` → ``.
pub fn extension(name: &str) -> String {
    match name.rfind('.') {
        Some(pos) => name[pos..].to_string(),
        None => String::new(),
    }
}

/// Case-insensitive extension comparison; the query may omit the leading dot.
pub fn extension_matches(name: &str, query: &str) -> bool {
    let ext = extension(name);
    if ext.is_empty() {
        return false;
    }
    let query = query.trim();
    let query = if query.starts_with('.') {
        query.to_string()
    } else {
        format!(".{}", query)
    };
    ext.to_lowercase() == query.to_lowercase()
}

/// Kind-specific attributes of a file creation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileSpec {
    Word { pages: u32 },
    Image { width: u32, height: u32 },
    Text { encoding: String },
}

/// Loose, optional attribute bag as it arrives from a caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileAttrs {
    pub pages: Option<u32>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub encoding: Option<String>,
}

impl FileSpec {
    /// Resolve a discriminated request (`word`, `image`, `text`) into a spec.
    ///
    /// Unknown tags fail with `UnsupportedKind`; a known tag missing one of
    /// its required attributes fails with `Validation`.
    pub fn from_tag(tag: &str, attrs: &FileAttrs) -> Result<Self, DomainError> {
        let missing =
            |attr: &str| DomainError::validation(format!("{} file requires '{}'", tag, attr));

        match tag.trim().to_ascii_lowercase().as_str() {
            "word" | "wordfile" => Ok(FileSpec::Word {
                pages: attrs.pages.ok_or_else(|| missing("pages"))?,
            }),
            "image" | "imagefile" => Ok(FileSpec::Image {
                width: attrs.width.ok_or_else(|| missing("width"))?,
                height: attrs.height.ok_or_else(|| missing("height"))?,
            }),
            "text" | "textfile" => Ok(FileSpec::Text {
                encoding: attrs
                    .encoding
                    .clone()
                    .filter(|e| !e.trim().is_empty())
                    .ok_or_else(|| missing("encoding"))?,
            }),
            other => Err(DomainError::UnsupportedKind(other.to_string())),
        }
    }

    fn into_kind(self) -> NodeKind {
        match self {
            FileSpec::Word { pages } => NodeKind::Word { pages },
            FileSpec::Image { width, height } => NodeKind::Image { width, height },
            FileSpec::Text { encoding } => NodeKind::Text { encoding },
        }
    }
}

/// Request to create a typed file.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateFile {
    pub name: String,
    pub size: f64,
    pub parent_id: Option<NodeId>,
    pub spec: FileSpec,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_name_with_dots_when_extension_then_returns_last_suffix() {
        assert_eq!(extension("report.final.docx"), ".docx");
        assert_eq!(extension("Photo.PNG"), ".PNG");
        assert_eq!(extension("Makefile"), "");
    }

    #[test]
    fn given_mixed_case_query_when_matching_then_ignores_case() {
        assert!(extension_matches("a.txt", ".TXT"));
        assert!(extension_matches("a.TXT", "txt"));
        assert!(!extension_matches("a.txt", ".md"));
        assert!(!extension_matches("README", ".txt"));
    }

    #[test]
    fn given_file_when_total_size_then_returns_own_size() {
        let file = Node::file("a.txt", 3.5, None, FileSpec::Text { encoding: "UTF-8".into() });
        assert_eq!(file.total_size(&|_| None), 3.5);
    }

    #[test]
    fn given_unknown_tag_when_from_tag_then_unsupported_kind() {
        let err = FileSpec::from_tag("video", &FileAttrs::default()).unwrap_err();
        assert_eq!(err, DomainError::UnsupportedKind("video".into()));
    }

    #[test]
    fn given_image_without_height_when_from_tag_then_validation_error() {
        let attrs = FileAttrs {
            width: Some(10),
            ..Default::default()
        };
        let err = FileSpec::from_tag("image", &attrs).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn given_id_string_when_parsing_then_round_trips() {
        let id = NodeId::new();
        let parsed: NodeId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
        assert!("not-a-uuid".parse::<NodeId>().is_err());
    }
}
