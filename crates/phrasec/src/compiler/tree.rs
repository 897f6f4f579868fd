use crate::nodes::{Construct, PhraseNode};

/// Index of a node in a [`PhraseTree`], assigned in pre-order.
pub type NodeId = usize;

/// A phrase flattened into a pre-order arena.
///
/// Axes, tokens and aliases are keyed by [`NodeId`] so every pass agrees on
/// node identity without comparing node contents.
pub(crate) struct PhraseTree<'a> {
    pub root: &'a Construct,
    pub nodes: Vec<TreeNode<'a>>,
    /// Direct children of the root.
    pub top: Vec<NodeId>,
}

pub(crate) struct TreeNode<'a> {
    pub node: &'a PhraseNode,
    /// Direct children; only fragments have any.
    pub children: Vec<NodeId>,
}

impl<'a> PhraseTree<'a> {
    pub fn build(root: &'a Construct) -> PhraseTree<'a> {
        let mut tree = PhraseTree {
            root,
            nodes: Vec::new(),
            top: Vec::new(),
        };
        tree.top = tree.push_all(&root.children);
        tree
    }

    fn push_all(&mut self, nodes: &'a [PhraseNode]) -> Vec<NodeId> {
        nodes.iter().map(|node| self.push(node)).collect()
    }

    fn push(&mut self, node: &'a PhraseNode) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(TreeNode {
            node,
            children: Vec::new(),
        });
        if let PhraseNode::ImplicitParam(fragment) = node {
            let children = self.push_all(&fragment.children);
            self.nodes[id].children = children;
        }
        id
    }

    pub fn node(&self, id: NodeId) -> &'a PhraseNode {
        self.nodes[id].node
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id].children
    }

    /// All nodes with their ids, in pre-order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &'a PhraseNode)> + '_ {
        self.nodes.iter().enumerate().map(|(id, entry)| (id, entry.node))
    }

    /// Fragment node ids, in pre-order.
    pub fn fragments(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.iter()
            .filter(|(_, node)| matches!(node, PhraseNode::ImplicitParam(_)))
            .map(|(id, _)| id)
    }

    pub fn has_fragments(&self) -> bool {
        self.fragments().next().is_some()
    }
}
