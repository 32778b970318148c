use std::fmt;

use serde::{Deserialize, Serialize};

use crate::NodeId;

/// Edge label carried by a direct attachment to the synthetic root.
pub const ROOT_EDGE_LABEL: i32 = -1;

/// One `(parent, edge label)` entry of a generalized Dandelion code.
///
/// Serializes as a two element array, e.g. `[8, 3]` or `[0, -1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CodePair(pub u32, pub i32);

impl CodePair {
    /// Pair of a node hanging directly below the synthetic root.
    pub const ROOT: CodePair = CodePair(0, ROOT_EDGE_LABEL);

    /// Creates a pair from a parent node and an edge label.
    pub fn new(parent: NodeId, label: i32) -> Self {
        Self(parent.as_raw(), label)
    }

    /// Returns the parent node.
    pub fn parent(&self) -> NodeId {
        NodeId::from_raw(self.0)
    }

    /// Returns the edge label (`-1` for root attachments, `1..=k` otherwise).
    pub fn label(&self) -> i32 {
        self.1
    }

    /// Returns whether the pair attaches its node to the synthetic root.
    pub fn is_root_attachment(&self) -> bool {
        self.0 == 0
    }
}

impl From<(u32, i32)> for CodePair {
    fn from((parent, label): (u32, i32)) -> Self {
        Self(parent, label)
    }
}

impl fmt::Display for CodePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.0, self.1)
    }
}

/// Ordered pair sequence of length `n - k - 2`.
pub type Code = Vec<CodePair>;

/// Complete code of a labeled k-tree: the root set `Q` together with the pairs.
///
/// The pairs alone do not determine the k-tree; `q` (the neighbourhood of the
/// maximum degree-k node) selects the relabeling used by both directions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KTreeCode {
    /// Number of nodes of the k-tree.
    pub n: usize,
    /// Clique parameter of the k-tree.
    pub k: usize,
    /// Sorted neighbourhood of the maximum degree-k node.
    pub q: Vec<NodeId>,
    /// Generalized Dandelion pairs.
    pub code: Code,
}
