use dandelion_core::UndirectedGraph;
use sha2::{Digest, Sha256};

/// Computes the canonical structural hash of a labeled graph.
///
/// The digest covers the node labels and the sorted edge list, so two graphs
/// hash equal exactly when they are identical as labeled graphs.
pub fn canonical_hash<G: UndirectedGraph + ?Sized>(graph: &G) -> String {
    let mut hasher = Sha256::new();
    hasher.update(b"ktree");

    let nodes: Vec<_> = graph.nodes().collect();
    hasher.update((nodes.len() as u64).to_le_bytes());
    for node in &nodes {
        hasher.update(node.as_raw().to_le_bytes());
    }

    let mut edges: Vec<_> = graph.edges().collect();
    edges.sort();
    hasher.update((edges.len() as u64).to_le_bytes());
    for (a, b) in edges {
        hasher.update(a.as_raw().to_le_bytes());
        hasher.update(b.as_raw().to_le_bytes());
    }

    format!("{:x}", hasher.finalize())
}
