use dandelion_core::errors::{DandelionError, ErrorInfo};
use dandelion_core::rng::RngHandle;
use dandelion_core::NodeId;

use crate::ktree::KTree;

/// Generates a uniformly relabeled random k-tree on the nodes `1..=n`.
///
/// The construction starts from a `(k + 1)`-clique and attaches every further
/// node to a k-clique chosen uniformly among those created so far. Node labels
/// are a random permutation, so every label can end up anywhere in the tree.
pub fn gen_random_ktree(n: usize, k: usize, rng: &mut RngHandle) -> Result<KTree, DandelionError> {
    if k == 0 || n < k + 1 {
        return Err(DandelionError::InvalidParameters(
            ErrorInfo::new("ktree-size", "a k-tree needs k >= 1 and at least k + 1 nodes")
                .with_context("n", n)
                .with_context("k", k),
        ));
    }

    let mut labels: Vec<NodeId> = (1..=n).map(|raw| NodeId::from_raw(raw as u32)).collect();
    rng.shuffle(&mut labels);

    let mut graph = KTree::with_nodes(n);
    let seed_clique = &labels[..=k];
    for (idx, a) in seed_clique.iter().enumerate() {
        for b in &seed_clique[idx + 1..] {
            graph.add_edge(*a, *b)?;
        }
    }

    let mut cliques: Vec<Vec<NodeId>> = (0..=k)
        .map(|skip| {
            seed_clique
                .iter()
                .enumerate()
                .filter(|(idx, _)| *idx != skip)
                .map(|(_, node)| *node)
                .collect()
        })
        .collect();

    for node in labels.iter().skip(k + 1).copied() {
        let chosen = cliques[rng.draw_index(cliques.len())].clone();
        for member in &chosen {
            graph.add_edge(node, *member)?;
        }
        for skip in 0..chosen.len() {
            let mut clique = chosen.clone();
            clique[skip] = node;
            cliques.push(clique);
        }
    }

    Ok(graph)
}

/// Generates `count` random k-trees, tree `i` drawn from substream `i` of `master_seed`.
pub fn gen_random_ktrees(
    n: usize,
    k: usize,
    count: usize,
    master_seed: u64,
) -> Result<Vec<KTree>, DandelionError> {
    (0..count)
        .map(|idx| {
            let mut rng = RngHandle::for_substream(master_seed, idx as u64);
            gen_random_ktree(n, k, &mut rng)
        })
        .collect()
}
