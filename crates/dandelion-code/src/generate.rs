use dandelion_core::errors::{DandelionError, ErrorInfo};
use dandelion_core::{Code, NodeId};
use dandelion_graph::CharacteristicTree;
use tracing::debug;

use crate::params::CodecParams;

/// Turns a characteristic tree into its generalized Dandelion pairs.
///
/// The tree is taken by value and used as scratch space. While the path from
/// `x` to the root has interior nodes, `x` swaps parent edges with the largest
/// of them; each swap splits the path prefix up to that node off into a cycle.
/// Afterwards the pair of every node except `x` and `dropped` is emitted in
/// ascending node order. `dropped` is the relabeled maximum leaf, whose pair
/// is always `(0, -1)`.
pub fn generate_code(
    mut tree: CharacteristicTree,
    x: NodeId,
    dropped: NodeId,
    params: &CodecParams,
) -> Result<Code, DandelionError> {
    let mut swaps = 0usize;
    loop {
        let interior = tree.path_interior(x)?;
        let Some(w) = interior.iter().copied().max() else {
            break;
        };
        tree.swap_parents(x, w)?;
        swaps += 1;
    }

    let code = tree
        .node_ids()
        .filter(|node| *node != x && *node != dropped)
        .map(|node| tree.pair(node))
        .collect::<Result<Code, _>>()?;

    if code.len() != params.code_len() {
        return Err(DandelionError::CodeLengthMismatch(
            ErrorInfo::new("code-length-mismatch", "generated code has the wrong length")
                .with_context("expected", params.code_len())
                .with_context("actual", code.len())
                .with_context("x", x)
                .with_context("dropped", dropped),
        ));
    }
    debug!(x = x.as_raw(), swaps, pairs = code.len(), "generated dandelion code");
    Ok(code)
}
