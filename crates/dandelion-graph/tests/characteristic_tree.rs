use dandelion_core::{CodePair, DandelionError, NodeId};
use dandelion_graph::CharacteristicTree;

fn node(raw: u32) -> NodeId {
    NodeId::from_raw(raw)
}

/// 0 <- 3 <- 2 <- 1, plus 0 <- 4.
fn chain() -> CharacteristicTree {
    let mut tree = CharacteristicTree::new(4);
    tree.attach(node(3), node(0), -1).unwrap();
    tree.attach(node(4), node(0), -1).unwrap();
    tree.attach(node(2), node(3), 2).unwrap();
    tree.attach(node(1), node(2), 1).unwrap();
    tree
}

#[test]
fn levels_follow_attachment_order() {
    let tree = chain();
    assert_eq!(tree.level(node(0)).unwrap(), Some(0));
    assert_eq!(tree.level(node(3)).unwrap(), Some(1));
    assert_eq!(tree.level(node(1)).unwrap(), Some(3));
}

#[test]
fn path_interior_excludes_endpoints() {
    let tree = chain();
    assert_eq!(tree.path_interior(node(1)).unwrap(), vec![node(2), node(3)]);
    assert!(tree.path_interior(node(4)).unwrap().is_empty());
}

#[test]
fn swap_exchanges_parent_and_label() {
    let mut tree = chain();
    tree.swap_parents(node(1), node(3)).unwrap();
    assert_eq!(tree.pair(node(1)).unwrap(), CodePair::ROOT);
    assert_eq!(tree.pair(node(3)).unwrap(), CodePair(2, 1));
    assert!(tree.path_interior(node(1)).unwrap().is_empty());
}

#[test]
fn detached_cycles_are_reported() {
    let mut tree = chain();
    tree.swap_parents(node(1), node(3)).unwrap();
    let err = tree.path_interior(node(2)).unwrap_err();
    assert!(matches!(err, DandelionError::Graph(info) if info.code == "cyclic-path"));
}

#[test]
fn unattached_nodes_have_no_pair() {
    let tree = CharacteristicTree::new(2);
    let err = tree.pair(node(1)).unwrap_err();
    assert!(matches!(err, DandelionError::Graph(info) if info.code == "unattached-node"));
}

#[test]
fn children_are_listed_per_parent() {
    let tree = chain();
    let children = tree.children();
    assert_eq!(children[0], vec![node(3), node(4)]);
    assert_eq!(children[3], vec![node(2)]);
    assert!(children[1].is_empty());
}

#[test]
fn cliques_are_stored_sorted() {
    let mut tree = chain();
    tree.set_clique(node(2), vec![node(7), node(5), node(6)]).unwrap();
    assert_eq!(tree.clique(node(2)).unwrap(), &[node(5), node(6), node(7)]);
}
