use std::collections::VecDeque;

use dandelion_core::errors::{DandelionError, ErrorInfo};
use dandelion_core::{CodePair, KTreeCode, NodeId, ROOT_EDGE_LABEL};
use dandelion_graph::{node_index, CharacteristicTree, KTree};
use tracing::debug;

use crate::params::CodecParams;
use crate::relabel::{distinguished_node, Relabeling};
use crate::validate::{validate_code, validate_root_set};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Visit {
    New,
    OnWalk,
    Done,
}

/// Rebuilds the labeled k-tree described by a complete code.
///
/// Decoding mirrors the encoder stage by stage. The leaves of the
/// characteristic tree are the nodes never named as a parent; the one with
/// the largest original label is the relabeled maximum leaf, which together
/// with `x` receives the pair `(0, -1)`. The cycles of the resulting
/// functional graph are then spliced back into the path from `x` to the root
/// in decreasing order of their maxima, and the cliques are recomputed top
/// down from the edge labels.
pub fn decode_ktree(input: &KTreeCode) -> Result<KTree, DandelionError> {
    let params = CodecParams::new(input.n, input.k)?;
    validate_root_set(&input.q, &params)?;
    validate_code(&input.code, &params)?;

    let relabeling = Relabeling::for_root_set(&input.q, &params)?;
    let x = distinguished_node(&input.q, &relabeling, &params)?;
    let max_leaf = relabeled_max_leaf(&input.code, x, &relabeling, &params)?;

    let mut tree = CharacteristicTree::new(params.tree_size());
    let mut pairs = input.code.iter().copied();
    for node in tree.node_ids().collect::<Vec<_>>() {
        let pair = if node == x || node == max_leaf {
            CodePair::ROOT
        } else {
            pairs.next().ok_or_else(|| short_code(&params))?
        };
        tree.set_pair(node, pair)?;
    }

    let segments = cycle_segments(&tree)?;
    splice_cycles(&mut tree, x, &segments)?;
    assign_cliques(&mut tree, &params)?;

    let mut graph = KTree::with_nodes(params.n());
    let root_set = params.root_set();
    for (idx, a) in root_set.iter().enumerate() {
        for b in &root_set[idx + 1..] {
            graph.add_edge(*a, *b)?;
        }
    }
    for node in tree.node_ids() {
        for member in tree.clique(node)? {
            graph.add_edge(node, *member)?;
        }
    }

    debug!(
        n = params.n(),
        k = params.k(),
        x = x.as_raw(),
        cycles = segments.len(),
        "decoded dandelion code"
    );
    graph.relabel(relabeling.inverse())
}

/// Returns the leaf whose original label is largest. Leaves are the tree nodes
/// that no pair names as parent. `x` carries the smallest original label of
/// all tree nodes and a code always leaves at least two leaves, so the result
/// never equals `x`.
fn relabeled_max_leaf(
    code: &[CodePair],
    x: NodeId,
    relabeling: &Relabeling,
    params: &CodecParams,
) -> Result<NodeId, DandelionError> {
    let mut has_child = vec![false; params.tree_size() + 1];
    for pair in code {
        has_child[node_index(pair.parent())] = true;
    }
    (1..=params.tree_size())
        .filter(|idx| !has_child[*idx])
        .map(|idx| NodeId::from_raw(idx as u32))
        .max_by_key(|node| relabeling.original(*node))
        .ok_or_else(|| {
            DandelionError::InvalidCodeShape(
                ErrorInfo::new("no-leaf", "every tree node is named as a parent")
                    .with_context("x", x),
            )
        })
}

fn parent_of(tree: &CharacteristicTree, node: NodeId) -> Result<NodeId, DandelionError> {
    tree.parent(node)?.ok_or_else(|| {
        DandelionError::InvalidCodeShape(
            ErrorInfo::new("unassigned-node", "node received no pair").with_context("node", node),
        )
    })
}

/// Finds every cycle of the parent map and returns, for each, the walk from
/// the parent of its maximum back to that maximum. Segments come sorted by
/// maximum, largest first.
fn cycle_segments(tree: &CharacteristicTree) -> Result<Vec<Vec<NodeId>>, DandelionError> {
    let mut state = vec![Visit::New; tree.size() + 1];
    state[0] = Visit::Done;
    let mut segments = Vec::new();

    for start in tree.node_ids() {
        let mut walk = Vec::new();
        let mut current = start;
        while state[node_index(current)] == Visit::New {
            state[node_index(current)] = Visit::OnWalk;
            walk.push(current);
            current = parent_of(tree, current)?;
        }
        if state[node_index(current)] == Visit::OnWalk {
            let entry = walk.iter().position(|node| *node == current).unwrap_or(0);
            if let Some(max) = walk[entry..].iter().copied().max() {
                let mut segment = Vec::new();
                let mut cursor = parent_of(tree, max)?;
                loop {
                    segment.push(cursor);
                    if cursor == max {
                        break;
                    }
                    cursor = parent_of(tree, cursor)?;
                }
                segments.push(segment);
            }
        }
        for node in walk {
            state[node_index(node)] = Visit::Done;
        }
    }

    segments.sort_by(|a, b| b.last().cmp(&a.last()));
    Ok(segments)
}

/// Reattaches `x -> seg_1 -> ... -> seg_t -> root`. Each maximum hands its
/// label to its predecessor on the restored path.
fn splice_cycles(
    tree: &mut CharacteristicTree,
    x: NodeId,
    segments: &[Vec<NodeId>],
) -> Result<(), DandelionError> {
    let heads: Vec<NodeId> = segments.iter().filter_map(|seg| seg.first().copied()).collect();
    let maxima: Vec<NodeId> = segments.iter().filter_map(|seg| seg.last().copied()).collect();
    let labels = maxima
        .iter()
        .map(|max| tree.pair(*max).map(|pair| pair.label()))
        .collect::<Result<Vec<_>, _>>()?;

    let mut previous = x;
    for (idx, max) in maxima.iter().enumerate() {
        tree.set_pair(previous, CodePair::new(heads[idx], labels[idx]))?;
        previous = *max;
    }
    if !maxima.is_empty() {
        tree.set_pair(previous, CodePair::ROOT)?;
    }
    Ok(())
}

/// Recomputes every clique breadth first from the root. Children of the root
/// get `R`; any other child of `w` with label `l` gets `K_w` with its `l`-th
/// member replaced by `w`.
fn assign_cliques(
    tree: &mut CharacteristicTree,
    params: &CodecParams,
) -> Result<(), DandelionError> {
    let children = tree.children();
    let mut queue = VecDeque::from([tree.root()]);
    let mut reached = 0usize;

    while let Some(parent) = queue.pop_front() {
        for child in &children[node_index(parent)] {
            let label = tree.pair(*child)?.label();
            let clique = if parent.is_root() {
                if label != ROOT_EDGE_LABEL {
                    return Err(shape_error("root-label", "root edges carry label -1", *child));
                }
                params.root_set()
            } else {
                let parent_clique = tree.clique(parent)?;
                let dropped = usize::try_from(label - 1)
                    .ok()
                    .and_then(|idx| parent_clique.get(idx).copied())
                    .ok_or_else(|| {
                        shape_error("label-out-of-range", "label exceeds the clique", *child)
                    })?;
                let mut clique: Vec<NodeId> = parent_clique
                    .iter()
                    .copied()
                    .filter(|member| *member != dropped)
                    .collect();
                clique.push(parent);
                clique
            };
            tree.set_clique(*child, clique)?;
            reached += 1;
            queue.push_back(*child);
        }
    }

    if reached != tree.size() {
        return Err(DandelionError::InvalidCodeShape(
            ErrorInfo::new("unreachable-nodes", "decoded parent map is not a tree")
                .with_context("reached", reached)
                .with_context("expected", tree.size()),
        ));
    }
    Ok(())
}

fn shape_error(code: &str, message: &str, node: NodeId) -> DandelionError {
    DandelionError::InvalidCodeShape(ErrorInfo::new(code, message).with_context("node", node))
}

fn short_code(params: &CodecParams) -> DandelionError {
    DandelionError::InvalidCodeLength(
        ErrorInfo::new("code-length", "code ran out of pairs")
            .with_context("expected", params.code_len()),
    )
}
