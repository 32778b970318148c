#![deny(missing_docs)]
#![doc = "Core identifiers, code types and graph contracts shared by the dandelion crates."]

use std::fmt;
use std::iter::ExactSizeIterator;

use serde::{Deserialize, Serialize};

pub mod errors;
pub mod provenance;
pub mod rng;
mod types;

pub use errors::{DandelionError, ErrorInfo};
pub use provenance::SchemaVersion;
pub use rng::{derive_substream_seed, RngHandle};
pub use types::{Code, CodePair, KTreeCode, ROOT_EDGE_LABEL};

/// Integer label of a node in a k-tree or characteristic tree.
///
/// k-tree nodes are labeled `1..=n`. Label `0` is reserved for the synthetic
/// root of a characteristic tree.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct NodeId(u32);

impl NodeId {
    /// Synthetic root of every characteristic tree.
    pub const ROOT: NodeId = NodeId(0);

    /// Creates a new identifier from its raw integer representation.
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw integer representation of the identifier.
    pub const fn as_raw(&self) -> u32 {
        self.0
    }

    /// Returns whether this is the synthetic root label.
    pub const fn is_root(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for NodeId {
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}

/// Read-only capabilities the codec needs from an undirected graph.
///
/// Implementations must report neighbours in ascending label order so that
/// every stage of the pipeline is deterministic.
pub trait UndirectedGraph {
    /// Returns an iterator over all node identifiers in ascending order.
    fn nodes(&self) -> Box<dyn ExactSizeIterator<Item = NodeId> + '_>;

    /// Returns every edge once as `(smaller, larger)` in ascending order.
    fn edges(&self) -> Box<dyn Iterator<Item = (NodeId, NodeId)> + '_>;

    /// Returns whether the node belongs to the graph.
    fn contains_node(&self, node: NodeId) -> bool;

    /// Returns the number of neighbours of the node.
    fn degree(&self, node: NodeId) -> Result<usize, DandelionError>;

    /// Returns the neighbours of the node in ascending order.
    fn neighbors(&self, node: NodeId) -> Result<Vec<NodeId>, DandelionError>;

    /// Returns the number of nodes.
    fn node_count(&self) -> usize {
        self.nodes().len()
    }

    /// Returns the number of edges.
    fn edge_count(&self) -> usize {
        self.edges().count()
    }
}
