//! Tests for tree assembly from flat, parent-linked nodes

use rstest::rstest;

use nodetree::domain::{FileSpec, Node, NodeId, NodeKind, TreeAssembler};

fn txt(name: &str, size: f64, parent: &Node) -> Node {
    Node::file(
        name,
        size,
        Some(parent.id),
        FileSpec::Text {
            encoding: "UTF-8".into(),
        },
    )
}

/// Chain of directories `d0/d1/.../d{depth-1}` with a 1KB file in each.
fn chain(depth: usize) -> Vec<Node> {
    let mut nodes = vec![Node::directory("d0", None)];
    for level in 1..depth {
        let dir = Node::directory(format!("d{}", level), Some(nodes[nodes.len() - 1].id));
        nodes.push(dir);
    }
    let dirs = nodes.clone();
    for dir in &dirs {
        nodes.push(txt("f.txt", 1.0, dir));
    }
    nodes
}

#[rstest]
#[case(1)]
#[case(5)]
#[case(200)]
fn given_deep_chain_when_assembling_then_every_level_attached(#[case] depth: usize) {
    let nodes = chain(depth);
    let total = nodes.len();

    let tree = TreeAssembler::new(nodes).assemble(None).unwrap();

    assert_eq!(tree.len(), total);
    assert_eq!(tree.total_size(), depth as f64);
    assert_eq!(tree.iter().count(), total);
    assert_eq!(tree.depth(), depth + 1);
}

#[test]
fn given_directory_sizes_when_total_size_then_includes_own_overhead() {
    let mut root = Node::directory("Root", None);
    root.size = 4.0;
    let mut sub = Node::directory("sub", Some(root.id));
    sub.size = 2.0;
    let file = txt("a.txt", 1.0, &sub);
    let sub_id = sub.id;

    let tree = TreeAssembler::new(vec![root, sub, file]).assemble(None).unwrap();

    assert_eq!(tree.total_size(), 7.0);
    assert_eq!(tree.total_size_of(&sub_id), Some(3.0));
}

#[test]
fn given_empty_directory_when_total_size_then_own_size() {
    let root = Node::directory("Root", None);

    let tree = TreeAssembler::new(vec![root]).assemble(None).unwrap();

    assert_eq!(tree.total_size(), 0.0);
    assert!(tree.root().children().is_empty());
}

#[test]
fn given_file_with_orphan_children_when_assembling_then_children_ignored() {
    let root = Node::directory("Root", None);
    let file = txt("a.txt", 1.0, &root);
    let stray = txt("stray.txt", 5.0, &file);

    let tree = TreeAssembler::new(vec![root, file, stray]).assemble(None).unwrap();

    assert_eq!(tree.len(), 2);
    assert_eq!(tree.total_size(), 1.0);
}

#[test]
fn given_directory_stored_with_stale_children_when_assembling_then_index_wins() {
    let root = Node::directory("Root", None);
    let child = txt("a.txt", 1.0, &root);
    let mut stale = root.clone();
    stale.kind = NodeKind::Directory {
        children: vec![NodeId::new()],
    };

    let tree = TreeAssembler::new(vec![stale, child.clone()])
        .assemble(None)
        .unwrap();

    assert_eq!(tree.root().children(), &[child.id]);
}
