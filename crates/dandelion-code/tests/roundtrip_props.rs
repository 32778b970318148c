use dandelion_code::{decode, encode, encode_with_root_set, validate_code, CodecParams};
use dandelion_core::rng::RngHandle;
use dandelion_core::{CodePair, KTreeCode, NodeId, UndirectedGraph};
use dandelion_graph::{canonical_hash, gen_random_ktree, gen_random_ktrees};
use proptest::prelude::*;

fn pair_strategy(tree_size: u32, k: i32) -> impl Strategy<Value = CodePair> {
    prop_oneof![
        1 => Just(CodePair::ROOT),
        4 => (1..=tree_size, 1..=k).prop_map(|(parent, label)| CodePair(parent, label)),
    ]
}

fn full_code_strategy() -> impl Strategy<Value = KTreeCode> {
    (1usize..4, 0usize..7).prop_flat_map(|(k, extra)| {
        let n = k + 2 + extra;
        let tree_size = (n - k) as u32;
        (
            proptest::sample::subsequence((1..=n as u32).collect::<Vec<_>>(), k),
            proptest::collection::vec(pair_strategy(tree_size, k as i32), n - k - 2),
        )
            .prop_map(move |(q, code)| KTreeCode {
                n,
                k,
                q: q.into_iter().map(NodeId::from_raw).collect(),
                code,
            })
    })
}

proptest! {
    #[test]
    fn random_ktrees_survive_a_round_trip(
        seed in any::<u64>(),
        k in 1usize..5,
        extra in 0usize..20
    ) {
        let n = k + 2 + extra;
        let mut rng = RngHandle::from_seed(seed);
        let graph = gen_random_ktree(n, k, &mut rng).unwrap();
        let before = canonical_hash(&graph);

        let full = encode_with_root_set(&graph, n, k).unwrap();
        prop_assert_eq!(full.code.len(), n - k - 2);
        prop_assert!(validate_code(&full.code, &CodecParams::new(n, k).unwrap()).unwrap());
        prop_assert_eq!(canonical_hash(&graph), before.clone());

        let restored = decode(&full).unwrap();
        prop_assert_eq!(restored.edge_count(), graph.edge_count());
        prop_assert_eq!(canonical_hash(&restored), before);
    }

    #[test]
    fn every_code_decodes_to_a_ktree_with_the_same_code(full in full_code_strategy()) {
        let graph = decode(&full).unwrap();
        let k = full.k;
        let n = full.n;
        prop_assert_eq!(graph.node_count(), n);
        prop_assert_eq!(graph.edge_count(), k * (k - 1) / 2 + (n - k) * k);
        prop_assert_eq!(encode_with_root_set(&graph, n, k).unwrap(), full);
    }
}

#[test]
fn encoding_is_deterministic_across_batches() {
    let first = gen_random_ktrees(30, 3, 5, 2024).unwrap();
    let second = gen_random_ktrees(30, 3, 5, 2024).unwrap();
    for (a, b) in first.iter().zip(&second) {
        assert_eq!(encode(a, 30, 3).unwrap(), encode(b, 30, 3).unwrap());
    }
}

#[test]
fn smallest_ktrees_have_empty_codes() {
    let mut rng = RngHandle::from_seed(3);
    let graph = gen_random_ktree(4, 2, &mut rng).unwrap();
    let full = encode_with_root_set(&graph, 4, 2).unwrap();
    assert!(full.code.is_empty());
    assert_eq!(full.q.len(), 2);
    assert_eq!(canonical_hash(&decode(&full).unwrap()), canonical_hash(&graph));
}

#[test]
fn trees_are_one_trees() {
    // Path 1 - 2 - 3 - 4 - 5: l_m = 5, Q = {4}, x = 1.
    let path = dandelion_graph::KTree::from_edges([(1, 2), (2, 3), (3, 4), (4, 5)]).unwrap();
    let full = encode_with_root_set(&path, 5, 1).unwrap();
    assert_eq!(full.q, vec![NodeId::from_raw(4)]);
    assert_eq!(full.code.len(), 2);
    assert_eq!(decode(&full).unwrap(), path);
}
