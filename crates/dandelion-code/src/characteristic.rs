use dandelion_core::errors::{DandelionError, ErrorInfo};
use dandelion_core::{NodeId, ROOT_EDGE_LABEL};
use dandelion_graph::CharacteristicTree;
use tracing::debug;

use crate::params::CodecParams;
use crate::prune::Pruning;

/// Builds the characteristic tree from the elimination order and cliques.
///
/// Nodes are attached in reverse elimination order. A node whose clique is the
/// root set `R` hangs below the synthetic root with label `-1`; any other node
/// hangs below the deepest member `w` of its clique, labeled with the 1-based
/// position in `K_w` of the single node of `K_w` missing from its own clique.
pub fn build_characteristic_tree(
    pruning: &Pruning,
    params: &CodecParams,
) -> Result<CharacteristicTree, DandelionError> {
    let root_set = params.root_set();
    let mut tree = CharacteristicTree::new(params.tree_size());
    let mut root_children = 0usize;

    for node in pruning.order().iter().rev().copied() {
        let kv = pruning
            .record(node)
            .map(|record| record.kv.clone())
            .ok_or_else(|| {
                clique_error("missing-clique", "eliminated node has no recorded clique", node)
            })?;
        if kv == root_set {
            tree.attach(node, tree.root(), ROOT_EDGE_LABEL)?;
            root_children += 1;
        } else {
            let parent = deepest_member(&tree, &kv, params, node)?;
            let label = edge_label(tree.clique(parent)?, &kv, node)?;
            tree.attach(node, parent, label)?;
        }
        tree.set_clique(node, kv)?;
    }

    debug!(nodes = tree.size(), root_children, "built characteristic tree");
    Ok(tree)
}

/// Returns the first clique member with the greatest level. Root set members
/// count as level 0.
fn deepest_member(
    tree: &CharacteristicTree,
    kv: &[NodeId],
    params: &CodecParams,
    node: NodeId,
) -> Result<NodeId, DandelionError> {
    let mut best: Option<(NodeId, usize)> = None;
    for member in kv.iter().copied() {
        let level = if params.is_tree_node(member) {
            tree.level(member)?.ok_or_else(|| {
                clique_error("unplaced-member", "clique member is not in the tree yet", node)
                    .with_context("member", member)
            })?
        } else {
            0
        };
        if best.map_or(true, |(_, deepest)| level > deepest) {
            best = Some((member, level));
        }
    }
    match best {
        Some((member, level)) if level > 0 => Ok(member),
        _ => Err(clique_error(
            "no-tree-parent",
            "clique lies inside the root set but differs from it",
            node,
        )),
    }
}

fn edge_label(
    parent_clique: &[NodeId],
    kv: &[NodeId],
    node: NodeId,
) -> Result<i32, DandelionError> {
    let missing: Vec<usize> = parent_clique
        .iter()
        .enumerate()
        .filter(|(_, member)| kv.binary_search(member).is_err())
        .map(|(idx, _)| idx + 1)
        .collect();
    match missing.as_slice() {
        [position] => Ok(*position as i32),
        _ => Err(clique_error(
            "clique-difference",
            "parent clique must differ from the child clique in exactly one node",
            node,
        )
        .with_context("differences", missing.len())),
    }
}

fn clique_error(code: &str, message: &str, node: NodeId) -> DandelionError {
    DandelionError::InvalidCliqueStructure(ErrorInfo::new(code, message).with_context("node", node))
}
