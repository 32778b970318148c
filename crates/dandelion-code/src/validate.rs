use dandelion_core::errors::{DandelionError, ErrorInfo};
use dandelion_core::{CodePair, NodeId, UndirectedGraph, ROOT_EDGE_LABEL};
use serde_json::Value;

use crate::params::CodecParams;

/// Checks a typed code against `(n, k)`: length `n - k - 2` and every pair
/// either `(0, -1)` or `(p, l)` with `1 <= p <= n - k` and `1 <= l <= k`.
pub fn validate_code(code: &[CodePair], params: &CodecParams) -> Result<bool, DandelionError> {
    check_length(code.len(), params)?;
    for (idx, pair) in code.iter().enumerate() {
        if !pair_in_alphabet(pair, params) {
            return Err(DandelionError::InvalidCodeShape(
                ErrorInfo::new("pair-out-of-range", "pair is not in the code alphabet")
                    .with_context("index", idx)
                    .with_context("pair", pair)
                    .with_hint("pairs are (0, -1) or (1..=n-k, 1..=k)"),
            ));
        }
    }
    Ok(true)
}

/// Checks an untyped code: an array of two-element integer arrays, with
/// length `n - k - 2` when parameters are given.
pub fn validate_code_value(
    value: &Value,
    params: Option<&CodecParams>,
) -> Result<bool, DandelionError> {
    let elements = value.as_array().ok_or_else(|| {
        DandelionError::InvalidCodeShape(ErrorInfo::new("not-a-sequence", "code must be an array"))
    })?;
    for (idx, element) in elements.iter().enumerate() {
        let is_pair = element
            .as_array()
            .map(|items| items.len() == 2 && items.iter().all(is_integer))
            .unwrap_or(false);
        if !is_pair {
            return Err(DandelionError::InvalidCodeShape(
                ErrorInfo::new("element-not-pair", "code element is not an integer pair")
                    .with_context("index", idx)
                    .with_context("element", element),
            ));
        }
    }
    if let Some(params) = params {
        check_length(elements.len(), params)?;
    }
    Ok(true)
}

/// Parses an untyped code into pairs after [`validate_code_value`] accepted it.
pub fn code_from_value(
    value: &Value,
    params: &CodecParams,
) -> Result<Vec<CodePair>, DandelionError> {
    validate_code_value(value, Some(params))?;
    let code: Vec<CodePair> = serde_json::from_value(value.clone()).map_err(|err| {
        DandelionError::InvalidCodeShape(ErrorInfo::new("pair-out-of-range", err.to_string()))
    })?;
    validate_code(&code, params)?;
    Ok(code)
}

/// Checks the minimal shape of a k-tree: non-empty, nodes labeled exactly
/// `1..=n`. The k-tree clique structure itself is not verified.
pub fn validate_ktree<G: UndirectedGraph + ?Sized>(graph: &G) -> Result<bool, DandelionError> {
    let count = graph.node_count();
    if count == 0 {
        return Err(DandelionError::NotAGraph(ErrorInfo::new(
            "empty-graph",
            "k-tree must have at least one node",
        )));
    }
    for (idx, node) in graph.nodes().enumerate() {
        if node.as_raw() as usize != idx + 1 {
            return Err(DandelionError::NotAGraph(
                ErrorInfo::new("non-contiguous-labels", "nodes must be labeled 1..=n")
                    .with_context("node", node)
                    .with_context("expected", idx + 1),
            ));
        }
    }
    for (a, b) in graph.edges() {
        if a == b {
            return Err(DandelionError::NotAGraph(
                ErrorInfo::new("self-loop", "k-trees are simple graphs").with_context("node", a),
            ));
        }
    }
    Ok(true)
}

/// Checks that an untyped value is a graph document
/// `{"edges": [[u, v], ...], "nodes": [..]?}` with positive integer labels.
pub fn validate_ktree_value(value: &Value) -> Result<bool, DandelionError> {
    let object = value.as_object().ok_or_else(|| {
        not_a_graph("not-an-object", "graph document must be a JSON object")
    })?;
    let edges = object
        .get("edges")
        .and_then(Value::as_array)
        .ok_or_else(|| not_a_graph("missing-edges", "graph document needs an edges array"))?;
    for (idx, edge) in edges.iter().enumerate() {
        let valid = edge
            .as_array()
            .map(|ends| ends.len() == 2 && ends.iter().all(is_node_label))
            .unwrap_or(false);
        if !valid {
            return Err(not_a_graph("bad-edge", "edge must be a pair of node labels")
                .with_context("index", idx));
        }
    }
    if let Some(nodes) = object.get("nodes") {
        let valid = nodes
            .as_array()
            .map(|labels| labels.iter().all(is_node_label))
            .unwrap_or(false);
        if !valid {
            return Err(not_a_graph("bad-nodes", "nodes must be an array of node labels"));
        }
    }
    Ok(true)
}

/// Checks a root set: `k` strictly increasing labels within `1..=n`.
pub fn validate_root_set(q: &[NodeId], params: &CodecParams) -> Result<bool, DandelionError> {
    let sorted = q.windows(2).all(|pair| pair[0] < pair[1]);
    if q.len() != params.k() || !sorted || !q.iter().all(|node| params.contains(*node)) {
        return Err(DandelionError::InvalidCodeShape(
            ErrorInfo::new("bad-root-set", "root set must be k sorted distinct labels in 1..=n")
                .with_context("size", q.len())
                .with_context("k", params.k()),
        ));
    }
    Ok(true)
}

fn check_length(len: usize, params: &CodecParams) -> Result<(), DandelionError> {
    if len != params.code_len() {
        return Err(DandelionError::InvalidCodeLength(
            ErrorInfo::new("code-length", "code must contain n - k - 2 pairs")
                .with_context("expected", params.code_len())
                .with_context("actual", len),
        ));
    }
    Ok(())
}

fn pair_in_alphabet(pair: &CodePair, params: &CodecParams) -> bool {
    if pair.is_root_attachment() {
        return pair.label() == ROOT_EDGE_LABEL;
    }
    params.is_tree_node(pair.parent()) && pair.label() >= 1 && pair.label() as usize <= params.k()
}

fn is_integer(value: &Value) -> bool {
    value.is_i64() || value.is_u64()
}

fn is_node_label(value: &Value) -> bool {
    value.as_u64().map_or(false, |raw| raw >= 1 && raw <= u32::MAX as u64)
}

fn not_a_graph(code: &str, message: &str) -> DandelionError {
    DandelionError::NotAGraph(ErrorInfo::new(code, message))
}
