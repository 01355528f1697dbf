//! Flat persisted form of a node (one record per node, kind discriminator
//! plus optional kind columns).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, Node, NodeId, NodeKind};

/// Persisted node. Never carries children; only the parent id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub id: NodeId,
    pub name: String,
    pub size: f64,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<NodeId>,
    /// `Directory`, `WordFile`, `ImageFile` or `TextFile`
    pub item_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pages: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encoding: Option<String>,
}

impl From<&Node> for NodeRecord {
    fn from(node: &Node) -> Self {
        let mut record = NodeRecord {
            id: node.id,
            name: node.name.clone(),
            size: node.size,
            created_at: node.created_at,
            parent_id: node.parent_id,
            item_type: node.kind.tag().to_string(),
            pages: None,
            width: None,
            height: None,
            encoding: None,
        };
        match &node.kind {
            NodeKind::Directory { .. } => {}
            NodeKind::Word { pages } => record.pages = Some(*pages),
            NodeKind::Image { width, height } => {
                record.width = Some(*width);
                record.height = Some(*height);
            }
            NodeKind::Text { encoding } => record.encoding = Some(encoding.clone()),
        }
        record
    }
}

impl TryFrom<NodeRecord> for Node {
    type Error = DomainError;

    fn try_from(record: NodeRecord) -> Result<Self, Self::Error> {
        let missing = |column: &str| {
            DomainError::validation(format!(
                "{} record {} has no '{}'",
                record.item_type, record.id, column
            ))
        };

        let kind = match record.item_type.as_str() {
            "Directory" => NodeKind::empty_directory(),
            "WordFile" => NodeKind::Word {
                pages: record.pages.ok_or_else(|| missing("pages"))?,
            },
            "ImageFile" => NodeKind::Image {
                width: record.width.ok_or_else(|| missing("width"))?,
                height: record.height.ok_or_else(|| missing("height"))?,
            },
            "TextFile" => NodeKind::Text {
                encoding: record.encoding.clone().ok_or_else(|| missing("encoding"))?,
            },
            other => return Err(DomainError::UnsupportedKind(other.to_string())),
        };

        Ok(Node {
            id: record.id,
            name: record.name,
            size: record.size,
            created_at: record.created_at,
            parent_id: record.parent_id,
            kind,
        })
    }
}

/// Copy of `node` as the store keeps it: directory children cleared.
pub fn detached(node: &Node) -> Node {
    let mut node = node.clone();
    if let NodeKind::Directory { children } = &mut node.kind {
        children.clear();
    }
    node
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FileSpec;

    #[test]
    fn given_image_node_when_recording_then_only_image_columns_set() {
        let node = Node::file("a.png", 1.0, None, FileSpec::Image { width: 2, height: 3 });
        let record = NodeRecord::from(&node);
        assert_eq!(record.item_type, "ImageFile");
        assert_eq!((record.width, record.height), (Some(2), Some(3)));
        assert_eq!(record.pages, None);
        assert_eq!(record.encoding, None);
        assert_eq!(Node::try_from(record).unwrap(), node);
    }

    #[test]
    fn given_unknown_discriminator_when_loading_then_unsupported_kind() {
        let mut record = NodeRecord::from(&Node::directory("d", None));
        record.item_type = "VideoFile".into();
        assert_eq!(
            Node::try_from(record).unwrap_err(),
            DomainError::UnsupportedKind("VideoFile".into())
        );
    }

    #[test]
    fn given_word_record_without_pages_when_loading_then_validation_error() {
        let mut record = NodeRecord::from(&Node::file("a.docx", 1.0, None, FileSpec::Word { pages: 1 }));
        record.pages = None;
        assert!(matches!(Node::try_from(record), Err(DomainError::Validation(_))));
    }
}
