#![deny(missing_docs)]

//! Graph structures backing the generalized Dandelion codec: labeled k-trees,
//! characteristic trees, hashing, serialization and random k-tree sampling.

mod generators;
mod hash;
mod ids;
mod ktree;
mod serialization;
mod tree;

pub use generators::{gen_random_ktree, gen_random_ktrees};
pub use hash::canonical_hash;
pub use ids::{canonicalize_nodes, make_node, node_index};
pub use ktree::KTree;
pub use serialization::{ktree_from_bytes, ktree_from_json, ktree_to_bytes, ktree_to_json};
pub use tree::{CharacteristicTree, TreeNode};
