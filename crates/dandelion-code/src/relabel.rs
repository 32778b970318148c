use std::collections::BTreeMap;

use dandelion_core::errors::{DandelionError, ErrorInfo};
use dandelion_core::{NodeId, UndirectedGraph};
use dandelion_graph::KTree;
use tracing::debug;

use crate::params::CodecParams;

/// Bijective relabeling `phi` sending the root set `Q` onto `R = {n-k+1..n}`.
///
/// Nodes of `Q` map onto `R` in sorted order. Every node of `R \ Q` closes its
/// permutation cycle by mapping to the end of the chain that leads into it;
/// all remaining nodes are fixed points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relabeling {
    forward: BTreeMap<NodeId, NodeId>,
    inverse: BTreeMap<NodeId, NodeId>,
}

impl Relabeling {
    /// Builds the relabeling for a sorted root set of exactly `k` nodes.
    pub fn for_root_set(q: &[NodeId], params: &CodecParams) -> Result<Self, DandelionError> {
        let root_set = params.root_set();
        if q.len() != root_set.len() {
            return Err(DandelionError::InvalidKTreeShape(
                ErrorInfo::new("root-set-size", "root set must contain exactly k nodes")
                    .with_context("expected", root_set.len())
                    .with_context("actual", q.len()),
            ));
        }

        let mut forward = BTreeMap::new();
        let mut preimage = BTreeMap::new();
        for (source, target) in q.iter().zip(&root_set) {
            forward.insert(*source, *target);
            preimage.insert(*target, *source);
        }

        let mut closers = Vec::new();
        for closer in &root_set {
            if forward.contains_key(closer) {
                continue;
            }
            let mut end = *closer;
            while let Some(previous) = preimage.get(&end) {
                end = *previous;
            }
            closers.push((*closer, end));
        }
        forward.extend(closers);

        let inverse = forward.iter().map(|(from, to)| (*to, *from)).collect();
        Ok(Self { forward, inverse })
    }

    /// Returns `phi(node)`.
    pub fn apply(&self, node: NodeId) -> NodeId {
        self.forward.get(&node).copied().unwrap_or(node)
    }

    /// Returns `phi^-1(node)`, the label the node had before relabeling.
    pub fn original(&self, node: NodeId) -> NodeId {
        self.inverse.get(&node).copied().unwrap_or(node)
    }

    /// Returns the non-identity part of `phi`.
    pub fn forward(&self) -> &BTreeMap<NodeId, NodeId> {
        &self.forward
    }

    /// Returns the non-identity part of `phi^-1`.
    pub fn inverse(&self) -> &BTreeMap<NodeId, NodeId> {
        &self.inverse
    }
}

/// Relabeled copy of a k-tree rooted at `R`, with the data needed to undo it.
#[derive(Debug, Clone)]
pub struct RenyiKTree {
    graph: KTree,
    q: Vec<NodeId>,
    max_leaf: NodeId,
    relabeling: Relabeling,
}

impl RenyiKTree {
    /// Relabeled graph.
    pub fn graph(&self) -> &KTree {
        &self.graph
    }

    /// Sorted neighbourhood `Q` of the maximum degree-k node, original labels.
    pub fn root_set(&self) -> &[NodeId] {
        &self.q
    }

    /// Maximum degree-k node `l_m`, original label.
    pub fn max_leaf(&self) -> NodeId {
        self.max_leaf
    }

    /// The relabeling `phi` used to build the graph.
    pub fn relabeling(&self) -> &Relabeling {
        &self.relabeling
    }

    /// Label the node carried in the caller's k-tree.
    pub fn old_label(&self, node: NodeId) -> NodeId {
        self.relabeling.original(node)
    }
}

/// Returns the largest node whose degree equals `k`.
pub fn find_max_leaf<G: UndirectedGraph + ?Sized>(
    ktree: &G,
    params: &CodecParams,
) -> Result<NodeId, DandelionError> {
    let mut best = None;
    for node in ktree.nodes() {
        if ktree.degree(node)? == params.k() {
            best = Some(node);
        }
    }
    best.ok_or_else(|| {
        DandelionError::DegreeKNodeNotFound(
            ErrorInfo::new("no-degree-k-node", "k-tree has no node of degree k")
                .with_context("k", params.k()),
        )
    })
}

/// Relabels a k-tree into its Renyi form and returns it together with `Q`.
///
/// The caller's graph is only read.
pub fn relabel_ktree<G: UndirectedGraph + ?Sized>(
    ktree: &G,
    params: &CodecParams,
) -> Result<RenyiKTree, DandelionError> {
    let max_leaf = find_max_leaf(ktree, params)?;
    let q = ktree.neighbors(max_leaf)?;
    if q.len() != params.k() {
        return Err(DandelionError::InvalidKTreeShape(
            ErrorInfo::new("root-set-size", "neighbourhood of the maximum leaf is not a k-set")
                .with_context("leaf", max_leaf)
                .with_context("size", q.len()),
        ));
    }

    let relabeling = Relabeling::for_root_set(&q, params)?;
    let graph = KTree::copy_of(ktree)?.relabel(relabeling.forward())?;
    debug!(
        n = params.n(),
        k = params.k(),
        max_leaf = max_leaf.as_raw(),
        cycle_closers = relabeling.forward().len() - q.len(),
        "relabeled k-tree into Renyi form"
    );

    Ok(RenyiKTree {
        graph,
        q,
        max_leaf,
        relabeling,
    })
}

/// Picks the distinguished node `x = phi(q)`, `q` the smallest label outside `Q`.
pub fn distinguished_node(
    q: &[NodeId],
    relabeling: &Relabeling,
    params: &CodecParams,
) -> Result<NodeId, DandelionError> {
    let smallest = (1..=params.n())
        .map(|raw| NodeId::from_raw(raw as u32))
        .find(|node| q.binary_search(node).is_err())
        .ok_or_else(|| {
            DandelionError::InvalidKTreeShape(ErrorInfo::new(
                "no-free-node",
                "every node belongs to the root set",
            ))
        })?;
    let x = relabeling.apply(smallest);
    if !params.is_tree_node(x) {
        return Err(DandelionError::InvalidKTreeShape(
            ErrorInfo::new("root-distinguished", "distinguished node landed in the root set")
                .with_context("node", x),
        ));
    }
    Ok(x)
}
