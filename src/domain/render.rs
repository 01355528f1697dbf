//! Indented box-drawing rendering of an assembled tree.

use termtree::Tree;

use crate::domain::entities::{Node, NodeKind};
use crate::domain::tree::NodeTree;

/// Connector of the starting node, which renders as a last child.
const START_CONNECTOR: &str = "└── ";
/// Continuation under a last child.
const START_INDENT: &str = "    ";

/// Render one line per node, pre-order.
///
/// ```text
/// └── Root [Directory]
///     ├── docs [Directory]
///     │   └── a.docx [Word] (pages: 3, size: 10KB)
///     └── notes.txt [Text] (encoding: UTF-8, size: 1KB)
/// ```
pub fn render(tree: &NodeTree) -> String {
    let rendered = display_tree(tree, tree.root()).to_string();
    rendered
        .lines()
        .enumerate()
        .map(|(i, line)| {
            let prefix = if i == 0 { START_CONNECTOR } else { START_INDENT };
            format!("{}{}", prefix, line)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn display_tree(tree: &NodeTree, node: &Node) -> Tree<String> {
    let leaves: Vec<Tree<String>> = tree
        .children(node)
        .map(|child| display_tree(tree, child))
        .collect();
    Tree::new(node_line(node)).with_leaves(leaves)
}

/// Single-line label of a node without any connector.
pub fn node_line(node: &Node) -> String {
    let tag = match &node.kind {
        NodeKind::Directory { .. } => return format!("{} [Directory]", node.name),
        NodeKind::Word { .. } => "Word",
        NodeKind::Image { .. } => "Image",
        NodeKind::Text { .. } => "Text",
    };
    match node.attribute_summary() {
        Some(summary) => format!("{} [{}] ({})", node.name, tag, summary),
        None => format!("{} [{}]", node.name, tag),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::builder::TreeAssembler;
    use crate::domain::entities::FileSpec;

    #[test]
    fn given_nested_tree_when_rendering_then_connectors_stay_aligned() {
        let root = Node::directory("Root", None);
        let docs = Node::directory("docs", Some(root.id));
        let doc = Node::file("a.docx", 10.0, Some(docs.id), FileSpec::Word { pages: 3 });
        let img = Node::file(
            "b.png",
            20.0,
            Some(docs.id),
            FileSpec::Image { width: 4, height: 3 },
        );
        let notes = Node::file(
            "notes.txt",
            0.5,
            Some(root.id),
            FileSpec::Text { encoding: "UTF-8".into() },
        );
        let tree = TreeAssembler::new(vec![root, docs, doc, img, notes])
            .assemble(None)
            .unwrap();

        let expected = [
            "└── Root [Directory]",
            "    ├── docs [Directory]",
            "    │   ├── a.docx [Word] (pages: 3, size: 10KB)",
            "    │   └── b.png [Image] (resolution: 4x3, size: 20KB)",
            "    └── notes.txt [Text] (encoding: UTF-8, size: 0.5KB)",
        ]
        .join("\n");
        assert_eq!(render(&tree), expected);
    }

    #[test]
    fn given_single_file_subtree_when_rendering_then_one_line() {
        let root = Node::directory("Root", None);
        let file = Node::file("x.txt", 1.0, Some(root.id), FileSpec::Text { encoding: "ASCII".into() });
        let id = file.id;
        let tree = TreeAssembler::new(vec![root, file]).assemble(Some(id)).unwrap();

        assert_eq!(render(&tree), "└── x.txt [Text] (encoding: ASCII, size: 1KB)");
    }
}
