//! # Composite
//!
//! Composes nodes into part-whole hierarchies such that leaves and containers
//! ("composites") are handled through one interface, [Component].
//!
//! The nodes live in the arena of a [ComponentTree] and refer to each other by
//! [NodeId]. A container exclusively owns its direct children, a child knows its
//! container through a non-owning backreference.
//!
//! Child management (`add`/`remove`) is only defined for composites. Calling it on a
//! leaf is reported as [crate::PatternError::UnsupportedOperation]. Clients are
//! expected to ask [ComponentTree::is_composite] first.

pub mod iterators;
pub mod tree;
pub mod visiting;

pub use iterators::DepthFirstIterator;
pub use tree::{ArenaNode, Component, ComponentTree, NodeId, NodeKind, SEPARATOR};
pub use visiting::{DepthProfile, LeafCollector, TreeVisitor};

use crate::PatternError;

/// Client code that works with any component through the uniform interface
fn client_code(tree: &ComponentTree, component: NodeId) -> Result<String, PatternError> {
    Ok(format!("RESULT: {}", tree.operation(component)?))
}

/// Client code that manages children without knowing the concrete variant
fn client_code_add(tree: &mut ComponentTree, first: NodeId, second: NodeId) -> Result<String, PatternError> {
    if tree.is_composite(first)? {
        tree.add(first, second)?;
    }
    client_code(tree, first)
}

/// Runs the composite example and returns the lines to print
pub fn demo() -> Result<Vec<String>, PatternError> {
    let mut lines = vec![];
    let mut tree = ComponentTree::with_capacity(8);

    let simple = tree.leaf("Leaf");
    lines.push("Client: I've got a simple component:".to_string());
    lines.push(client_code(&tree, simple)?);

    let root = tree.composite();
    let branch1 = tree.composite();
    let branch2 = tree.composite();
    for _ in 0..2 {
        let leaf = tree.leaf("Leaf");
        tree.add(branch1, leaf)?;
    }
    let leaf = tree.leaf("Leaf");
    tree.add(branch2, leaf)?;
    tree.add(root, branch1)?;
    tree.add(root, branch2)?;

    lines.push("Client: Now I've got a composite tree:".to_string());
    lines.push(client_code(&tree, root)?);

    lines.push("Client: I don't need to check the components classes even when managing the tree:".to_string());
    lines.push(client_code_add(&mut tree, root, simple)?);

    lines.push("Client: The tree's outline:".to_string());
    lines.extend(tree.render(root)?.lines().map(String::from));
    Ok(lines)
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test_log::test]
    fn test_demo() {
        let lines = demo().unwrap();
        assert_eq!(lines[1], "RESULT: Leaf");
        assert_eq!(lines[3], "RESULT: Branch(Branch(Leaf+Leaf)+Branch(Leaf))");
        assert_eq!(lines[5], "RESULT: Branch(Branch(Leaf+Leaf)+Branch(Leaf)+Leaf)");
    }

    #[test_log::test]
    fn test_client_skips_leaves() {
        let mut tree = ComponentTree::new();
        let first = tree.leaf("First");
        let second = tree.leaf("Second");
        assert_eq!(client_code_add(&mut tree, first, second).unwrap(), "RESULT: First");
        assert_eq!(tree.parent(second).unwrap(), None);
    }
}
