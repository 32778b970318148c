#![deny(missing_docs)]
#![doc = "Generalized Dandelion code: linear-time bijective coding of labeled k-trees."]

/// Characteristic tree construction from an elimination order.
pub mod characteristic;
/// Per-instance codec value.
pub mod codec;
/// Inverse transform from a complete code back to a k-tree.
pub mod decode;
/// Cycle-swapping code generation.
pub mod generate;
/// Validated `(n, k)` parameters.
pub mod params;
/// Degree-k elimination.
pub mod prune;
/// Relabeling into Renyi form.
pub mod relabel;
/// Serialization routines for JSON and binary round-trips.
pub mod serde;
/// Shape checks for codes and k-trees.
pub mod validate;

use dandelion_core::{Code, DandelionError, ErrorInfo, KTreeCode, UndirectedGraph};
use dandelion_graph::KTree;
use tracing::trace;

pub use characteristic::build_characteristic_tree;
pub use codec::Dandelion;
pub use generate::generate_code;
pub use params::CodecParams;
pub use prune::{prune_renyi_ktree, PruneRecord, Pruning};
pub use relabel::{distinguished_node, find_max_leaf, relabel_ktree, Relabeling, RenyiKTree};
pub use self::serde::{from_bytes, from_json, to_bytes, to_json};
pub use validate::{
    code_from_value, validate_code, validate_code_value, validate_ktree, validate_ktree_value,
    validate_root_set,
};

/// Encodes a labeled k-tree on `n` nodes into its `n - k - 2` pairs.
///
/// The input graph is not modified. Use [`encode_with_root_set`] when the
/// result must be decodable.
pub fn encode<G: UndirectedGraph + ?Sized>(
    ktree: &G,
    n: usize,
    k: usize,
) -> Result<Code, DandelionError> {
    encode_with_root_set(ktree, n, k).map(|full| full.code)
}

/// Encodes a labeled k-tree into its complete code `(Q, S)`.
pub fn encode_with_root_set<G: UndirectedGraph + ?Sized>(
    ktree: &G,
    n: usize,
    k: usize,
) -> Result<KTreeCode, DandelionError> {
    let params = CodecParams::new(n, k)?;
    validate_ktree(ktree)?;
    if ktree.node_count() != n {
        return Err(DandelionError::InvalidKTreeShape(
            ErrorInfo::new("node-count", "k-tree size differs from n")
                .with_context("expected", n)
                .with_context("actual", ktree.node_count()),
        ));
    }

    let renyi = relabel_ktree(ktree, &params)?;
    let pruning = prune_renyi_ktree(renyi.graph(), &params)?;
    let tree = build_characteristic_tree(&pruning, &params)?;
    let x = distinguished_node(renyi.root_set(), renyi.relabeling(), &params)?;
    let dropped = renyi.relabeling().apply(renyi.max_leaf());
    let code = generate_code(tree, x, dropped, &params)?;

    trace!(n, k, pairs = code.len(), "encoded k-tree");
    Ok(KTreeCode {
        n,
        k,
        q: renyi.root_set().to_vec(),
        code,
    })
}

/// Decodes a complete code back into its labeled k-tree.
pub fn decode(code: &KTreeCode) -> Result<KTree, DandelionError> {
    let ktree = decode::decode_ktree(code)?;
    trace!(n = code.n, k = code.k, edges = ktree.edge_count(), "decoded k-tree");
    Ok(ktree)
}
