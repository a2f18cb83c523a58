//! Visiting a [ComponentTree]. The traversal is done by the tree, the visitor only
//! needs one callback per node variant. Adding an operation over the tree means
//! adding a visitor, the tree's code stays untouched.

use super::tree::{Component, ComponentTree, NodeId, NodeKind};
use crate::PatternError;

/// One callback per node variant of the composite tree. Both are invoked in
/// depth-first, pre-order sequence together with the node's depth.
pub trait TreeVisitor {
    fn visit_leaf(&mut self, id: NodeId, label: &str, depth: usize);
    fn visit_composite(&mut self, id: NodeId, children: &[NodeId], depth: usize);
}

impl ComponentTree {
    /// Lets `visitor` visit every node below (and including) `root`
    pub fn accept<V: TreeVisitor>(&self, root: NodeId, visitor: &mut V) -> Result<(), PatternError> {
        for (depth, node) in self.iter_depth(root)? {
            match node.kind() {
                NodeKind::Leaf { label } => visitor.visit_leaf(node.id(), label, depth),
                NodeKind::Composite { children } => visitor.visit_composite(node.id(), children, depth),
            }
        }
        Ok(())
    }
}

/// Collects the leaf labels in traversal order
#[derive(Debug, Default)]
pub struct LeafCollector {
    pub labels: Vec<String>,
}

impl TreeVisitor for LeafCollector {
    fn visit_leaf(&mut self, _id: NodeId, label: &str, _depth: usize) {
        self.labels.push(label.to_string());
    }

    fn visit_composite(&mut self, _id: NodeId, _children: &[NodeId], _depth: usize) {}
}

/// Shape statistics of a (sub-)tree
#[derive(Debug, Default, PartialEq, Eq)]
pub struct DepthProfile {
    pub leaves: usize,
    pub composites: usize,
    /// Largest distance from the root
    pub max_depth: usize,
    /// Composites without children
    pub empty_composites: usize,
}

impl TreeVisitor for DepthProfile {
    fn visit_leaf(&mut self, _id: NodeId, _label: &str, depth: usize) {
        self.leaves += 1;
        self.max_depth = self.max_depth.max(depth);
    }

    fn visit_composite(&mut self, _id: NodeId, children: &[NodeId], depth: usize) {
        self.composites += 1;
        self.max_depth = self.max_depth.max(depth);
        if children.is_empty() {
            self.empty_composites += 1;
        }
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test_log::test]
    fn test_visitors_do_not_share_state() {
        let mut tree = ComponentTree::new();
        let root = tree.composite();
        let branch = tree.composite();
        let empty = tree.composite();
        let a = tree.leaf("A");
        let b = tree.leaf("B");
        tree.add(root, a).unwrap();
        tree.add(root, branch).unwrap();
        tree.add(branch, b).unwrap();
        tree.add(branch, empty).unwrap();

        let mut collector = LeafCollector::default();
        let mut profile = DepthProfile::default();
        tree.accept(root, &mut collector).unwrap();
        tree.accept(root, &mut profile).unwrap();

        assert_eq!(collector.labels, &["A", "B"]);
        assert_eq!(
            profile,
            DepthProfile {
                leaves: 2,
                composites: 3,
                max_depth: 2,
                empty_composites: 1
            }
        );

        // A second pass with a fresh visitor starts from scratch
        let mut collector = LeafCollector::default();
        tree.accept(branch, &mut collector).unwrap();
        assert_eq!(collector.labels, &["B"]);
    }
}
