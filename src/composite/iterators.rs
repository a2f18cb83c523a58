/*! Depth-first traversal of a [ComponentTree] with arena allocation */
use super::tree::{ArenaNode, Component, ComponentTree, NodeId};

/// Pre-order, depth-first iterator over a subtree. Yields each node together
/// with its distance to the subtree's root.
pub struct DepthFirstIterator<'a> {
    tree: &'a ComponentTree,
    stack: Vec<std::slice::Iter<'a, NodeId>>,
    root: Option<NodeId>,
}

impl<'a> DepthFirstIterator<'a> {
    /// `root` must be a valid index into `tree` (checked by [ComponentTree::iter_depth])
    pub(super) fn new(tree: &'a ComponentTree, root: NodeId) -> Self {
        let stack = Vec::with_capacity(tree.max_depth);
        DepthFirstIterator {
            tree,
            stack,
            root: Some(root),
        }
    }
}

impl<'a> Iterator for DepthFirstIterator<'a> {
    type Item = (usize, &'a ArenaNode);

    fn next(&mut self) -> Option<Self::Item> {
        let tree = self.tree;
        if let Some(root) = self.root.take() {
            let node = tree.nodes.get(root.index)?;
            self.stack.push(node.children().iter());
            return Some((0, node));
        }
        while let Some(last) = self.stack.last_mut() {
            if let Some(child_ref) = last.next() {
                let depth = self.stack.len();
                let node = tree.nodes.get(child_ref.index)?;
                self.stack.push(node.children().iter());
                return Some((depth, node));
            }
            self.stack.pop();
        }
        None
    }
}

impl std::iter::FusedIterator for DepthFirstIterator<'_> {}

#[cfg(test)]
mod tests {

    use crate::composite::*;
    use itertools::Itertools;

    #[test_log::test]
    fn test_depth_first_order() {
        // Layout of the tree, numbers give the order of insertion
        //     0
        //    / \
        //  1    5
        // | \   |
        // 2  4  6
        // |
        // 3
        let mut tree = ComponentTree::new();
        let root = tree.composite();
        let first = tree.composite();
        let third = tree.composite();
        let second = tree.composite();
        let fourth = tree.leaf("fourth");
        let fifth = tree.leaf("fifth");
        let sixth = tree.leaf("sixth");

        tree.add(root, first).unwrap();
        tree.add(root, second).unwrap();
        tree.add(first, third).unwrap();
        tree.add(first, fourth).unwrap();
        tree.add(third, fifth).unwrap();
        tree.add(second, sixth).unwrap();

        let result = tree.iter_depth(root).unwrap().map(|(_, n)| n.id()).collect_vec();
        assert_eq!(result, &[root, first, third, fifth, fourth, second, sixth]);

        let depths = tree.iter_depth(root).unwrap().map(|(d, _)| d).collect_vec();
        assert_eq!(depths, &[0, 1, 2, 3, 2, 1, 2]);

        // Subtree traversal starts at depth 0 again
        let result = tree.iter_depth(first).unwrap().map(|(d, n)| (d, n.id())).collect_vec();
        assert_eq!(result, &[(0, first), (1, third), (2, fifth), (1, fourth)]);
    }

    #[test_log::test]
    fn test_exhausted_iterator_stays_exhausted() {
        let mut tree = ComponentTree::new();
        let leaf = tree.leaf("Leaf");
        let mut iter = tree.iter_depth(leaf).unwrap();
        assert!(iter.next().is_some());
        assert!(iter.next().is_none());
        assert!(iter.next().is_none());
    }
}
