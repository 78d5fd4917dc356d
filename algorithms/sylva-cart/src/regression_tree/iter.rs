use std::collections::VecDeque;
use std::iter::Iterator;

use super::node::{NodeArena, NodeId, TreeNode};

/// Level-order (BFT) iterator of nodes in a regression tree
///
/// Yields the depth of every node together with the node, children from left to right.
pub struct NodeIter<'a, F> {
    arena: &'a NodeArena<F>,
    queue: VecDeque<(usize, NodeId)>,
}

impl<'a, F> NodeIter<'a, F> {
    pub fn new(arena: &'a NodeArena<F>, root: NodeId) -> Self {
        let mut queue = VecDeque::new();
        queue.push_back((0, root));

        NodeIter { arena, queue }
    }
}

impl<'a, F> Iterator for NodeIter<'a, F> {
    type Item = (usize, &'a TreeNode<F>);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, id) = self.queue.pop_front()?;
        let node = self.arena.get(id);
        self.queue
            .extend(node.children().iter().map(|child| (depth + 1, *child)));

        Some((depth, node))
    }
}
