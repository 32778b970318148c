use dandelion_core::errors::{DandelionError, ErrorInfo};
use dandelion_core::NodeId;
use serde::{Deserialize, Serialize};

/// Size parameters of a k-tree code: `n` nodes, clique parameter `k`.
///
/// Constructed explicitly for every codec call; there is no shared default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CodecParams {
    n: usize,
    k: usize,
}

impl CodecParams {
    /// Validates and creates the parameter pair.
    ///
    /// Requires `k >= 1` and `n >= k + 2`, the smallest size with a
    /// non-negative code length.
    pub fn new(n: usize, k: usize) -> Result<Self, DandelionError> {
        if k == 0 {
            return Err(DandelionError::InvalidParameters(
                ErrorInfo::new("zero-k", "k must be at least 1").with_context("n", n),
            ));
        }
        if n < k + 2 {
            return Err(DandelionError::InvalidParameters(
                ErrorInfo::new("too-few-nodes", "a codable k-tree needs at least k + 2 nodes")
                    .with_context("n", n)
                    .with_context("k", k),
            ));
        }
        if u32::try_from(n).is_err() {
            return Err(DandelionError::InvalidParameters(
                ErrorInfo::new("too-many-nodes", "node labels must fit in 32 bits")
                    .with_context("n", n),
            ));
        }
        Ok(Self { n, k })
    }

    /// Number of nodes of the k-tree.
    pub fn n(&self) -> usize {
        self.n
    }

    /// Clique parameter.
    pub fn k(&self) -> usize {
        self.k
    }

    /// Number of pairs in a code, `n - k - 2`.
    pub fn code_len(&self) -> usize {
        self.n - self.k - 2
    }

    /// Number of non-root nodes of the characteristic tree, `n - k`.
    pub fn tree_size(&self) -> usize {
        self.n - self.k
    }

    /// Canonical root set `R = {n - k + 1, ..., n}`.
    pub fn root_set(&self) -> Vec<NodeId> {
        (self.tree_size() + 1..=self.n)
            .map(|raw| NodeId::from_raw(raw as u32))
            .collect()
    }

    /// Returns whether the node is one of the labels `1..=n`.
    pub fn contains(&self, node: NodeId) -> bool {
        let raw = node.as_raw() as usize;
        raw >= 1 && raw <= self.n
    }

    /// Returns whether the node is a non-root characteristic tree node, `1..=n-k`.
    pub fn is_tree_node(&self, node: NodeId) -> bool {
        let raw = node.as_raw() as usize;
        raw >= 1 && raw <= self.tree_size()
    }
}
