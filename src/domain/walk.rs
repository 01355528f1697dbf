//! Depth-first read-only passes: extension search and traversal log.

use crate::domain::entities::{extension_matches, Node, NodeId, NodeKind};
use crate::domain::tree::NodeTree;

const SEARCH_SEPARATOR: &str = "/";
const TRAVERSE_SEPARATOR: &str = " -> ";

/// Files matching an extension query.
///
/// `paths` and `ids` are parallel: both in pre-order, one entry per match.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchResult {
    pub extension: String,
    pub paths: Vec<String>,
    pub ids: Vec<NodeId>,
    pub count: usize,
}

impl SearchResult {
    pub fn empty(extension: &str) -> Self {
        Self {
            extension: extension.to_string(),
            ..Default::default()
        }
    }
}

/// Search files below (and including) the tree's root by extension.
///
/// Paths start at the root's name and join names with `/`.
pub fn search_by_extension(tree: &NodeTree, extension: &str) -> SearchResult {
    let mut paths = Vec::new();
    collect_matching_paths(tree, tree.root(), None, extension, &mut paths);

    let ids: Vec<NodeId> = tree
        .iter()
        .filter(|node| !node.is_directory() && extension_matches(&node.name, extension))
        .map(|node| node.id)
        .collect();

    SearchResult {
        extension: extension.to_string(),
        count: paths.len(),
        paths,
        ids,
    }
}

fn collect_matching_paths(
    tree: &NodeTree,
    node: &Node,
    parent_path: Option<&str>,
    extension: &str,
    out: &mut Vec<String>,
) {
    let path = join_path(parent_path, &node.name, SEARCH_SEPARATOR);
    match &node.kind {
        NodeKind::Directory { .. } => {
            for child in tree.children(node) {
                collect_matching_paths(tree, child, Some(&path), extension, out);
            }
        }
        NodeKind::Word { .. } | NodeKind::Image { .. } | NodeKind::Text { .. } => {
            if extension_matches(&node.name, extension) {
                out.push(path);
            }
        }
    }
}

/// Pre-order visit log: one `Visiting: a -> b -> c` line per node.
pub fn traversal_log(tree: &NodeTree) -> Vec<String> {
    let mut log = Vec::with_capacity(tree.len());
    visit(tree, tree.root(), None, &mut log);
    log
}

fn visit(tree: &NodeTree, node: &Node, parent_path: Option<&str>, log: &mut Vec<String>) {
    let path = join_path(parent_path, &node.name, TRAVERSE_SEPARATOR);
    log.push(format!("Visiting: {}", path));
    match &node.kind {
        NodeKind::Directory { .. } => {
            for child in tree.children(node) {
                visit(tree, child, Some(&path), log);
            }
        }
        NodeKind::Word { .. } | NodeKind::Image { .. } | NodeKind::Text { .. } => {}
    }
}

fn join_path(parent: Option<&str>, name: &str, separator: &str) -> String {
    match parent {
        Some(parent) => format!("{}{}{}", parent, separator, name),
        None => name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::builder::TreeAssembler;
    use crate::domain::entities::FileSpec;

    fn sample() -> NodeTree {
        let root = Node::directory("Root", None);
        let docs = Node::directory("docs", Some(root.id));
        let doc = Node::file("a.DOCX", 10.0, Some(docs.id), FileSpec::Word { pages: 1 });
        let notes = Node::file("notes.txt", 1.0, Some(root.id), FileSpec::Text { encoding: "UTF-8".into() });
        TreeAssembler::new(vec![root, docs, doc, notes])
            .assemble(None)
            .unwrap()
    }

    #[test]
    fn given_tree_when_searching_case_insensitive_then_finds_file() {
        let result = search_by_extension(&sample(), ".docx");
        assert_eq!(result.paths, vec!["Root/docs/a.DOCX".to_string()]);
        assert_eq!(result.ids.len(), 1);
        assert_eq!(result.count, 1);
    }

    #[test]
    fn given_tree_when_searching_unknown_extension_then_empty() {
        let result = search_by_extension(&sample(), ".pdf");
        assert!(result.paths.is_empty());
        assert!(result.ids.is_empty());
        assert_eq!(result.count, 0);
    }

    #[test]
    fn given_tree_when_traversing_then_logs_pre_order() {
        let log = traversal_log(&sample());
        assert_eq!(
            log,
            vec![
                "Visiting: Root",
                "Visiting: Root -> docs",
                "Visiting: Root -> docs -> a.DOCX",
                "Visiting: Root -> notes.txt",
            ]
        );
    }
}
