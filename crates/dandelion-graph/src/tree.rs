use dandelion_core::{CodePair, DandelionError, NodeId};

use crate::ids::{make_node, node_index};
use crate::ktree::graph_error;

/// Per-node record of a [`CharacteristicTree`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TreeNode {
    parent: Option<NodeId>,
    label: i32,
    level: Option<usize>,
    clique: Vec<NodeId>,
}

impl TreeNode {
    /// Parent of the node, `None` while unattached (and always for the root).
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Label of the parent edge (`-1` below the root, `1..=k` otherwise).
    pub fn label(&self) -> i32 {
        self.label
    }

    /// Depth assigned when the parent edge was added.
    pub fn level(&self) -> Option<usize> {
        self.level
    }

    /// Sorted adjacent clique recorded for the node.
    pub fn clique(&self) -> &[NodeId] {
        &self.clique
    }
}

/// Rooted tree on the labels `0..=size` with labeled parent edges.
///
/// Nodes live in an arena indexed by label; label `0` is the synthetic root.
/// Edge swaps exchange `(parent, label)` records between two nodes, which may
/// temporarily detach cycles from the root. Levels describe the tree as it
/// was built and are not updated by swaps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacteristicTree {
    nodes: Vec<TreeNode>,
}

impl CharacteristicTree {
    /// Creates a tree holding only the root and `size` unattached nodes.
    pub fn new(size: usize) -> Self {
        let mut nodes = vec![TreeNode::default(); size + 1];
        nodes[0].level = Some(0);
        Self { nodes }
    }

    /// Returns the synthetic root.
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Returns the number of non-root nodes.
    pub fn size(&self) -> usize {
        self.nodes.len() - 1
    }

    /// Returns whether the label belongs to the tree (root included).
    pub fn contains(&self, node: NodeId) -> bool {
        node_index(node) < self.nodes.len()
    }

    /// Iterates over the non-root nodes in ascending order.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (1..self.nodes.len()).map(make_node)
    }

    /// Returns the record of a node.
    pub fn node(&self, node: NodeId) -> Result<&TreeNode, DandelionError> {
        self.nodes.get(node_index(node)).ok_or_else(|| {
            graph_error("unknown-tree-node", "node is not part of the characteristic tree")
                .with_context("node", node)
        })
    }

    fn node_mut(&mut self, node: NodeId) -> Result<&mut TreeNode, DandelionError> {
        self.nodes.get_mut(node_index(node)).ok_or_else(|| {
            graph_error("unknown-tree-node", "node is not part of the characteristic tree")
                .with_context("node", node)
        })
    }

    /// Records the adjacent clique of a node; the clique is stored sorted.
    pub fn set_clique(
        &mut self,
        node: NodeId,
        mut clique: Vec<NodeId>,
    ) -> Result<(), DandelionError> {
        clique.sort_unstable();
        self.node_mut(node)?.clique = clique;
        Ok(())
    }

    /// Returns the sorted adjacent clique of a node.
    pub fn clique(&self, node: NodeId) -> Result<&[NodeId], DandelionError> {
        Ok(self.node(node)?.clique())
    }

    /// Returns the parent of a node.
    pub fn parent(&self, node: NodeId) -> Result<Option<NodeId>, DandelionError> {
        Ok(self.node(node)?.parent)
    }

    /// Returns the level of a node, `None` while unattached.
    pub fn level(&self, node: NodeId) -> Result<Option<usize>, DandelionError> {
        Ok(self.node(node)?.level)
    }

    /// Attaches `node` below `parent` with the given edge label.
    ///
    /// The node's level becomes one more than the parent's level, when known.
    pub fn attach(
        &mut self,
        node: NodeId,
        parent: NodeId,
        label: i32,
    ) -> Result<(), DandelionError> {
        if node.is_root() {
            return Err(graph_error("root-attach", "the root has no parent edge"));
        }
        let parent_level = self.node(parent)?.level;
        let record = self.node_mut(node)?;
        record.parent = Some(parent);
        record.label = label;
        record.level = parent_level.map(|level| level + 1);
        Ok(())
    }

    /// Returns the `(parent, label)` pair of an attached node.
    pub fn pair(&self, node: NodeId) -> Result<CodePair, DandelionError> {
        let record = self.node(node)?;
        let parent = record.parent.ok_or_else(|| {
            graph_error("unattached-node", "node has no parent edge").with_context("node", node)
        })?;
        Ok(CodePair::new(parent, record.label))
    }

    /// Returns the nodes strictly between `node` and the root, nearest first.
    ///
    /// Fails when the parent chain is broken or never reaches the root.
    pub fn path_interior(&self, node: NodeId) -> Result<Vec<NodeId>, DandelionError> {
        let mut interior = Vec::new();
        let mut current = self.pair(node)?.parent();
        while !current.is_root() {
            if interior.len() >= self.size() {
                return Err(
                    graph_error("cyclic-path", "parent chain does not reach the root")
                        .with_context("node", node),
                );
            }
            interior.push(current);
            current = self.pair(current)?.parent();
        }
        Ok(interior)
    }

    /// Exchanges the parent edges of two nodes, labels included.
    pub fn swap_parents(&mut self, a: NodeId, b: NodeId) -> Result<(), DandelionError> {
        let first = self.pair(a)?;
        let second = self.pair(b)?;
        let record_a = self.node_mut(a)?;
        record_a.parent = Some(second.parent());
        record_a.label = second.label();
        let record_b = self.node_mut(b)?;
        record_b.parent = Some(first.parent());
        record_b.label = first.label();
        Ok(())
    }

    /// Overwrites the parent edge of a node without touching levels.
    pub fn set_pair(&mut self, node: NodeId, pair: CodePair) -> Result<(), DandelionError> {
        if node.is_root() {
            return Err(graph_error("root-attach", "the root has no parent edge"));
        }
        self.node(pair.parent())?;
        let record = self.node_mut(node)?;
        record.parent = Some(pair.parent());
        record.label = pair.label();
        Ok(())
    }

    /// Returns the children of every node, indexed by label, in ascending order.
    pub fn children(&self) -> Vec<Vec<NodeId>> {
        let mut children = vec![Vec::new(); self.nodes.len()];
        for node in self.node_ids() {
            if let Some(parent) = self.nodes[node_index(node)].parent {
                if let Some(slot) = children.get_mut(node_index(parent)) {
                    slot.push(node);
                }
            }
        }
        children
    }
}
