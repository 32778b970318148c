use dandelion_core::errors::{DandelionError, ErrorInfo};
use dandelion_core::provenance::SchemaVersion;
use dandelion_core::{NodeId, UndirectedGraph};
use serde::{Deserialize, Serialize};

use crate::ktree::KTree;

/// Serializes the k-tree to a compact binary representation using `bincode`.
pub fn ktree_to_bytes(graph: &KTree) -> Result<Vec<u8>, DandelionError> {
    let serializable = SerializableKTree::from_graph(graph);
    bincode::serialize(&serializable)
        .map_err(|err| DandelionError::Serde(ErrorInfo::new("serialize-bytes", err.to_string())))
}

/// Restores a k-tree from its binary representation.
pub fn ktree_from_bytes(bytes: &[u8]) -> Result<KTree, DandelionError> {
    let serializable: SerializableKTree = bincode::deserialize(bytes).map_err(|err| {
        DandelionError::Serde(ErrorInfo::new("deserialize-bytes", err.to_string()))
    })?;
    serializable.into_graph()
}

/// Serializes the k-tree to a JSON document `{"schema_version", "nodes", "edges"}`.
pub fn ktree_to_json(graph: &KTree) -> Result<String, DandelionError> {
    let serializable = SerializableKTree::from_graph(graph);
    serde_json::to_string_pretty(&serializable)
        .map_err(|err| DandelionError::Serde(ErrorInfo::new("serialize-json", err.to_string())))
}

/// Restores a k-tree from a JSON document.
///
/// `schema_version` and `nodes` are optional; a bare `{"edges": [[1, 2], ...]}`
/// document is accepted.
pub fn ktree_from_json(json: &str) -> Result<KTree, DandelionError> {
    let serializable: SerializableKTree = serde_json::from_str(json).map_err(|err| {
        DandelionError::Serde(ErrorInfo::new("deserialize-json", err.to_string()))
    })?;
    serializable.into_graph()
}

#[derive(Debug, Serialize, Deserialize)]
struct SerializableKTree {
    #[serde(default)]
    schema_version: SchemaVersion,
    #[serde(default)]
    nodes: Vec<u32>,
    edges: Vec<(u32, u32)>,
}

impl SerializableKTree {
    fn from_graph(graph: &KTree) -> Self {
        Self {
            schema_version: SchemaVersion::default(),
            nodes: graph.nodes().map(|node| node.as_raw()).collect(),
            edges: graph
                .edge_list()
                .into_iter()
                .map(|(a, b)| (a.as_raw(), b.as_raw()))
                .collect(),
        }
    }

    fn into_graph(self) -> Result<KTree, DandelionError> {
        if !self.schema_version.is_compatible_with(&SchemaVersion::default()) {
            return Err(DandelionError::Serde(
                ErrorInfo::new("schema-mismatch", "unsupported k-tree schema version")
                    .with_context("major", self.schema_version.major),
            ));
        }
        let mut graph = KTree::from_edges(self.edges)?;
        for raw in self.nodes {
            graph.add_node(NodeId::from_raw(raw));
        }
        Ok(graph)
    }
}
