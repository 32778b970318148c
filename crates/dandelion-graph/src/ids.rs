use std::collections::BTreeSet;

use dandelion_core::NodeId;

/// Converts a [`NodeId`] into its index within label-indexed arrays.
pub fn node_index(id: NodeId) -> usize {
    id.as_raw() as usize
}

/// Creates a [`NodeId`] from a label-indexed array position.
pub fn make_node(index: usize) -> NodeId {
    NodeId::from_raw(index as u32)
}

/// Returns the nodes sorted ascending with duplicates removed.
pub fn canonicalize_nodes(nodes: &[NodeId]) -> Vec<NodeId> {
    let set: BTreeSet<NodeId> = nodes.iter().copied().collect();
    set.into_iter().collect()
}

/// Orders an undirected edge as `(smaller, larger)`.
pub(crate) fn ordered_edge(a: NodeId, b: NodeId) -> (NodeId, NodeId) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}
