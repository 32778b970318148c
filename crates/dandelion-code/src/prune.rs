use dandelion_core::errors::{DandelionError, ErrorInfo};
use dandelion_core::{NodeId, UndirectedGraph};
use dandelion_graph::{make_node, node_index, KTree};
use tracing::debug;

use crate::params::CodecParams;

/// Adjacent clique recorded when a node was eliminated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PruneRecord {
    /// Sorted unchecked neighbours at elimination time; always `k` nodes.
    pub kv: Vec<NodeId>,
}

/// Outcome of degree-k elimination on a Renyi k-tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pruning {
    records: Vec<Option<PruneRecord>>,
    order: Vec<NodeId>,
}

impl Pruning {
    /// Nodes in the order they were eliminated.
    pub fn order(&self) -> &[NodeId] {
        &self.order
    }

    /// Clique recorded for an eliminated node.
    pub fn record(&self, node: NodeId) -> Option<&PruneRecord> {
        self.records.get(node_index(node)).and_then(Option::as_ref)
    }

    /// Eliminated nodes in ascending order.
    pub fn nodes(&self) -> Vec<NodeId> {
        let mut nodes = self.order.clone();
        nodes.sort_unstable();
        nodes
    }
}

struct Frame {
    neighbours: Vec<NodeId>,
    cursor: usize,
}

struct Eliminator<'a> {
    graph: &'a KTree,
    k: usize,
    checked: Vec<bool>,
    residual: Vec<usize>,
    records: Vec<Option<PruneRecord>>,
    order: Vec<NodeId>,
}

impl<'a> Eliminator<'a> {
    fn new(graph: &'a KTree, params: &CodecParams) -> Result<Self, DandelionError> {
        let max_label = graph.max_node().map_or(0, |node| node_index(node));
        if graph.node_count() != params.n() || max_label > params.n() {
            return Err(DandelionError::InvalidKTreeShape(
                ErrorInfo::new("label-range", "graph nodes must be exactly the labels 1..=n")
                    .with_context("n", params.n())
                    .with_context("nodes", graph.node_count())
                    .with_context("max_label", max_label),
            ));
        }
        let slots = params.n() + 1;
        let mut residual = vec![0; slots];
        for raw in 1..=params.n() {
            residual[raw] = graph.adjacent(make_node(raw))?.len();
        }
        Ok(Self {
            graph,
            k: params.k(),
            checked: vec![false; slots],
            residual,
            records: vec![None; slots],
            order: Vec::with_capacity(params.tree_size()),
        })
    }

    fn eligible(&self, node: NodeId) -> bool {
        let idx = node_index(node);
        !self.checked[idx] && self.residual[idx] == self.k
    }

    fn eliminate(&mut self, node: NodeId) -> Result<Vec<NodeId>, DandelionError> {
        let neighbours: Vec<NodeId> = self.graph.adjacent(node)?.iter().copied().collect();
        let kv: Vec<NodeId> = neighbours
            .iter()
            .copied()
            .filter(|neighbour| !self.checked[node_index(*neighbour)])
            .collect();
        for neighbour in &kv {
            self.residual[node_index(*neighbour)] -= 1;
        }
        self.checked[node_index(node)] = true;
        self.records[node_index(node)] = Some(PruneRecord { kv });
        self.order.push(node);
        Ok(neighbours)
    }

    /// Eliminates `start`, then depth-first every neighbour below `start` that
    /// has become eligible, in ascending neighbour order. The bound stays at
    /// the scan position for the whole cascade.
    fn cascade(&mut self, start: NodeId) -> Result<(), DandelionError> {
        let neighbours = self.eliminate(start)?;
        let mut stack = vec![Frame {
            neighbours,
            cursor: 0,
        }];
        while let Some(frame) = stack.last_mut() {
            if frame.cursor == frame.neighbours.len() {
                stack.pop();
                continue;
            }
            let candidate = frame.neighbours[frame.cursor];
            frame.cursor += 1;
            if candidate < start && self.eligible(candidate) {
                let neighbours = self.eliminate(candidate)?;
                stack.push(Frame {
                    neighbours,
                    cursor: 0,
                });
            }
        }
        Ok(())
    }
}

/// Eliminates the nodes `1..=n-k` of a Renyi k-tree in degree-k order.
///
/// The scan visits labels in increasing order; each elimination immediately
/// cascades into already scanned neighbours whose residual degree dropped to
/// `k`.
/// The cascade order is part of the code, so it is reproduced exactly.
/// The graph is only read; all bookkeeping lives in the returned value.
pub fn prune_renyi_ktree(graph: &KTree, params: &CodecParams) -> Result<Pruning, DandelionError> {
    let mut eliminator = Eliminator::new(graph, params)?;
    for raw in 1..=params.tree_size() {
        let node = make_node(raw);
        if eliminator.eligible(node) {
            eliminator.cascade(node)?;
        }
    }

    if eliminator.order.len() != params.tree_size() {
        return Err(DandelionError::PruningStalled(
            ErrorInfo::new("pruning-stalled", "degree-k elimination did not reach the root set")
                .with_context("eliminated", eliminator.order.len())
                .with_context("expected", params.tree_size())
                .with_hint("the input is not a k-tree for the given (n, k)"),
        ));
    }
    debug!(
        eliminated = eliminator.order.len(),
        first = eliminator.order.first().map(|node| node.as_raw()),
        "pruned Renyi k-tree"
    );

    Ok(Pruning {
        records: eliminator.records,
        order: eliminator.order,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(raw: u32) -> NodeId {
        NodeId::from_raw(raw)
    }

    #[test]
    fn cascade_walks_down_a_path() {
        // Path 5 - 1 - 2 - 3 - 4 rooted at R = {5}: only 4 starts as a leaf and
        // each elimination frees the next smaller label.
        let graph = KTree::from_edges([(5, 1), (1, 2), (2, 3), (3, 4)]).unwrap();
        let params = CodecParams::new(5, 1).unwrap();
        let pruning = prune_renyi_ktree(&graph, &params).unwrap();
        assert_eq!(pruning.order(), &[node(4), node(3), node(2), node(1)]);
        assert_eq!(pruning.record(node(1)).unwrap().kv, vec![node(5)]);
        assert_eq!(pruning.record(node(3)).unwrap().kv, vec![node(2)]);
    }

    #[test]
    fn scan_resumes_after_cascade() {
        // 1 - 3 - 2 - 4: the scan removes 1, skips 2, removes 3 and the cascade
        // then picks up 2.
        let graph = KTree::from_edges([(1, 3), (3, 2), (2, 4)]).unwrap();
        let params = CodecParams::new(4, 1).unwrap();
        let pruning = prune_renyi_ktree(&graph, &params).unwrap();
        assert_eq!(pruning.order(), &[node(1), node(3), node(2)]);
        assert_eq!(pruning.nodes(), vec![node(1), node(2), node(3)]);
    }

    #[test]
    fn cascade_reaches_back_to_skipped_labels() {
        // 3 - 1 - 2 - 4: 2 is skipped by the scan, becomes a leaf once 1 goes
        // and is removed inside the cascade started at 3 although 2 > 1.
        let graph = KTree::from_edges([(3, 1), (1, 2), (2, 4)]).unwrap();
        let params = CodecParams::new(4, 1).unwrap();
        let pruning = prune_renyi_ktree(&graph, &params).unwrap();
        assert_eq!(pruning.order(), &[node(3), node(1), node(2)]);
        assert_eq!(pruning.record(node(2)).unwrap().kv, vec![node(4)]);
    }

    #[test]
    fn labels_beyond_n_are_rejected() {
        // Node 6 hangs off a path meant to hold n = 5 nodes.
        let graph = KTree::from_edges([(1, 6), (6, 2), (2, 3), (3, 4), (4, 5)]).unwrap();
        let params = CodecParams::new(5, 1).unwrap();
        let err = prune_renyi_ktree(&graph, &params).unwrap_err();
        assert!(matches!(err, DandelionError::InvalidKTreeShape(_)));
        assert_eq!(err.info().context.get("max_label").map(String::as_str), Some("6"));

        // Right node count, but label 7 replaces label 5.
        let shifted = KTree::from_edges([(1, 2), (2, 3), (3, 4), (4, 7)]).unwrap();
        let err = prune_renyi_ktree(&shifted, &params).unwrap_err();
        assert!(matches!(err, DandelionError::InvalidKTreeShape(_)));
    }

    #[test]
    fn non_ktrees_stall() {
        // A 4-cycle has no degree-1 node at all.
        let graph = KTree::from_edges([(1, 2), (2, 3), (3, 4), (4, 1)]).unwrap();
        let params = CodecParams::new(4, 1).unwrap();
        let err = prune_renyi_ktree(&graph, &params).unwrap_err();
        assert!(matches!(err, DandelionError::PruningStalled(_)));
    }
}
