use std::collections::{BTreeMap, BTreeSet};

use dandelion_core::{DandelionError, ErrorInfo, NodeId, UndirectedGraph};

use crate::ids::{canonicalize_nodes, ordered_edge};

/// Undirected simple graph holding a labeled k-tree.
///
/// Neighbour sets are kept ordered so iteration is deterministic. The type does
/// not enforce the k-tree clique invariants; it only rejects self-loops and
/// references to unknown nodes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct KTree {
    adjacency: BTreeMap<NodeId, BTreeSet<NodeId>>,
    edge_count: usize,
}

impl KTree {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an edgeless graph on the nodes `1..=n`.
    pub fn with_nodes(n: usize) -> Self {
        let mut graph = Self::new();
        for raw in 1..=n {
            graph.add_node(NodeId::from_raw(raw as u32));
        }
        graph
    }

    /// Builds a graph from raw edge pairs, adding endpoints as needed.
    pub fn from_edges<I>(edges: I) -> Result<Self, DandelionError>
    where
        I: IntoIterator<Item = (u32, u32)>,
    {
        let mut graph = Self::new();
        for (a, b) in edges {
            let (a, b) = (NodeId::from_raw(a), NodeId::from_raw(b));
            graph.add_node(a);
            graph.add_node(b);
            graph.add_edge(a, b)?;
        }
        Ok(graph)
    }

    /// Copies any graph exposing the read-only capabilities into an owned value.
    pub fn copy_of<G: UndirectedGraph + ?Sized>(graph: &G) -> Result<Self, DandelionError> {
        let mut copy = Self::new();
        for node in graph.nodes() {
            copy.add_node(node);
        }
        for (a, b) in graph.edges() {
            copy.add_edge(a, b)?;
        }
        Ok(copy)
    }

    /// Adds an isolated node. Returns `false` when it already existed.
    pub fn add_node(&mut self, node: NodeId) -> bool {
        if self.adjacency.contains_key(&node) {
            return false;
        }
        self.adjacency.insert(node, BTreeSet::new());
        true
    }

    /// Adds an undirected edge between two existing nodes.
    ///
    /// Returns `false` when the edge was already present.
    pub fn add_edge(&mut self, a: NodeId, b: NodeId) -> Result<bool, DandelionError> {
        if a == b {
            return Err(
                graph_error("self-loop", "k-trees are simple graphs").with_context("node", a),
            );
        }
        self.adjacent(a)?;
        self.adjacent(b)?;
        let inserted = self
            .adjacency
            .get_mut(&a)
            .map(|set| set.insert(b))
            .unwrap_or(false);
        if let Some(set) = self.adjacency.get_mut(&b) {
            set.insert(a);
        }
        if inserted {
            self.edge_count += 1;
        }
        Ok(inserted)
    }

    /// Returns whether the two nodes are adjacent.
    pub fn has_edge(&self, a: NodeId, b: NodeId) -> bool {
        self.adjacency
            .get(&a)
            .map(|set| set.contains(&b))
            .unwrap_or(false)
    }

    /// Returns the ordered neighbour set of a node.
    pub fn adjacent(&self, node: NodeId) -> Result<&BTreeSet<NodeId>, DandelionError> {
        self.adjacency.get(&node).ok_or_else(|| {
            graph_error("unknown-node", "node does not exist").with_context("node", node)
        })
    }

    /// Returns the largest node label, if any.
    pub fn max_node(&self) -> Option<NodeId> {
        self.adjacency.keys().next_back().copied()
    }

    /// Returns all edges as `(smaller, larger)` pairs in ascending order.
    pub fn edge_list(&self) -> Vec<(NodeId, NodeId)> {
        let mut edges = Vec::with_capacity(self.edge_count);
        for (node, neighbours) in &self.adjacency {
            for neighbour in neighbours.range(*node..) {
                if neighbour != node {
                    edges.push((*node, *neighbour));
                }
            }
        }
        edges
    }

    /// Returns a new graph with every node `v` renamed to `mapping[v]`.
    ///
    /// Nodes missing from the mapping keep their label. The resulting labels
    /// must be pairwise distinct, otherwise the mapping is not a bijection and
    /// the call fails. `self` is left untouched.
    pub fn relabel(&self, mapping: &BTreeMap<NodeId, NodeId>) -> Result<KTree, DandelionError> {
        for source in mapping.keys() {
            self.adjacent(*source)?;
        }
        let image = |node: NodeId| mapping.get(&node).copied().unwrap_or(node);
        let targets: Vec<NodeId> = self.adjacency.keys().map(|node| image(*node)).collect();
        if canonicalize_nodes(&targets).len() != targets.len() {
            return Err(graph_error(
                "non-bijective-relabel",
                "relabeling maps two nodes to the same label",
            )
            .with_context("nodes", targets.len()));
        }

        let mut relabeled = KTree::new();
        for target in targets {
            relabeled.add_node(target);
        }
        for (a, b) in self.edge_list() {
            let (a, b) = ordered_edge(image(a), image(b));
            relabeled.add_edge(a, b)?;
        }
        Ok(relabeled)
    }
}

impl UndirectedGraph for KTree {
    fn nodes(&self) -> Box<dyn ExactSizeIterator<Item = NodeId> + '_> {
        Box::new(self.adjacency.keys().copied())
    }

    fn edges(&self) -> Box<dyn Iterator<Item = (NodeId, NodeId)> + '_> {
        Box::new(self.edge_list().into_iter())
    }

    fn contains_node(&self, node: NodeId) -> bool {
        self.adjacency.contains_key(&node)
    }

    fn degree(&self, node: NodeId) -> Result<usize, DandelionError> {
        Ok(self.adjacent(node)?.len())
    }

    fn neighbors(&self, node: NodeId) -> Result<Vec<NodeId>, DandelionError> {
        Ok(self.adjacent(node)?.iter().copied().collect())
    }

    fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    fn edge_count(&self) -> usize {
        self.edge_count
    }
}

pub(crate) fn graph_error(code: impl Into<String>, message: impl Into<String>) -> DandelionError {
    DandelionError::Graph(ErrorInfo::new(code, message))
}
