//! Implementation of an [arena allocated](https://en.wikipedia.org/wiki/Region-based_memory_management)
//! part-whole hierarchy. Nodes refer to their children and to their parent by [NodeId],
//! never by an owning pointer, so the tree cannot contain reference cycles.

use super::DepthFirstIterator;
use crate::PatternError;
use core::fmt;
use itertools::Itertools;
use std::sync::atomic::{AtomicU32, Ordering};
use tracing::{debug, trace};
use tracing_attributes::instrument;

/// Separator placed between the results of a composite's children
pub const SEPARATOR: &str = "+";

/// Source of the stamps that tell trees apart
static NEXT_TREE: AtomicU32 = AtomicU32::new(0);

/// Index of a node in the arena of a [ComponentTree], stamped with the tree
/// that created it. Ids of other trees are rejected as unknown.
#[derive(Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Copy, Clone)]
pub struct NodeId {
    pub(crate) tree: u32,
    pub(crate) index: usize,
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.tree, self.index)
    }
}

/// The closed set of node variants
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// End object of the hierarchy. Returns a fixed label.
    Leaf { label: String },
    /// Container that delegates to its ordered children
    Composite { children: Vec<NodeId> },
}

/// Uniform interface shared by leaves and composites
pub trait Component {
    /// Capability probe. Lets clients decide whether `add` is safe to call
    /// without inspecting the concrete variant.
    fn is_composite(&self) -> bool;

    /// Name of the variant, used in error messages
    fn variant(&self) -> &'static str;

    fn id(&self) -> NodeId;

    /// The container currently holding this node, `None` for roots
    fn parent(&self) -> Option<NodeId>;

    /// Direct children in insertion order. Empty for leaves.
    fn children(&self) -> &[NodeId];
}

/// A node structure to be used in the arena of a [ComponentTree]
#[derive(Debug)]
pub struct ArenaNode {
    /// Variant and its data
    pub(super) kind: NodeKind,
    /// Index in the arena allocation
    index: NodeId,
    /// Backreference to the holding container. Kept in sync by [ComponentTree::add]
    /// and [ComponentTree::remove].
    parent_ref: Option<NodeId>,
}

impl ArenaNode {
    fn new(kind: NodeKind, index: NodeId) -> Self {
        ArenaNode {
            kind,
            index,
            parent_ref: None,
        }
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// The label of a leaf
    pub fn label(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Leaf { label } => Some(label),
            NodeKind::Composite { .. } => None,
        }
    }
}

impl Component for ArenaNode {
    fn is_composite(&self) -> bool {
        matches!(self.kind, NodeKind::Composite { .. })
    }

    fn variant(&self) -> &'static str {
        match self.kind {
            NodeKind::Leaf { .. } => "leaf",
            NodeKind::Composite { .. } => "composite",
        }
    }

    fn id(&self) -> NodeId {
        self.index
    }

    fn parent(&self) -> Option<NodeId> {
        self.parent_ref
    }

    fn children(&self) -> &[NodeId] {
        match &self.kind {
            NodeKind::Leaf { .. } => &[],
            NodeKind::Composite { children } => children,
        }
    }
}

impl fmt::Display for ArenaNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            NodeKind::Leaf { label } => write!(f, "Leaf {} ({label})", self.index),
            NodeKind::Composite { children } => {
                write!(f, "Composite {}, children: [{}]", self.index, children.iter().join(", "))
            }
        }
    }
}

/// Part-whole hierarchy that uses arena allocation.
///
/// The tree owns every node it created. Nodes that are not attached to a
/// container are roots and are handed to the client by their [NodeId].
/// Detaching a node with [ComponentTree::remove] turns it back into a root,
/// so it can be re-attached elsewhere.
#[derive(Debug)]
pub struct ComponentTree {
    /// Stamp carried by every [NodeId] of this tree
    stamp: u32,

    /// Memory allocated area for nodes
    pub(super) nodes: Vec<ArenaNode>,

    /// Capacity hint for traversal stacks
    pub(super) max_depth: usize,
}

impl ComponentTree {
    /// Constructor. Preallocates room for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        ComponentTree {
            stamp: NEXT_TREE.fetch_add(1, Ordering::Relaxed),
            nodes: Vec::with_capacity(capacity),
            max_depth: 16,
        }
    }

    pub fn new() -> Self {
        ComponentTree {
            stamp: NEXT_TREE.fetch_add(1, Ordering::Relaxed),
            nodes: vec![],
            max_depth: 16,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Creates a detached leaf
    pub fn leaf(&mut self, label: impl Into<String>) -> NodeId {
        self.push(NodeKind::Leaf { label: label.into() })
    }

    /// Creates a detached, empty composite
    pub fn composite(&mut self) -> NodeId {
        self.push(NodeKind::Composite { children: vec![] })
    }

    fn push(&mut self, kind: NodeKind) -> NodeId {
        let index = NodeId {
            tree: self.stamp,
            index: self.nodes.len(),
        };
        self.nodes.push(ArenaNode::new(kind, index));
        trace!("Created node {}", index);
        index
    }

    pub fn node(&self, id: NodeId) -> Result<&ArenaNode, PatternError> {
        if id.tree != self.stamp {
            return Err(PatternError::UnknownNode(id));
        }
        self.nodes.get(id.index).ok_or(PatternError::UnknownNode(id))
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut ArenaNode, PatternError> {
        if id.tree != self.stamp {
            return Err(PatternError::UnknownNode(id));
        }
        self.nodes.get_mut(id.index).ok_or(PatternError::UnknownNode(id))
    }

    pub fn is_composite(&self, id: NodeId) -> Result<bool, PatternError> {
        Ok(self.node(id)?.is_composite())
    }

    pub fn parent(&self, id: NodeId) -> Result<Option<NodeId>, PatternError> {
        Ok(self.node(id)?.parent())
    }

    pub fn children(&self, id: NodeId) -> Result<&[NodeId], PatternError> {
        Ok(self.node(id)?.children())
    }

    /// Walks the parent references upwards, starting with the parent of `id`
    fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.nodes.get(id.index).and_then(|n| n.parent_ref), move |current| {
            self.nodes.get(current.index).and_then(|n| n.parent_ref)
        })
    }

    /// Appends `child` to the children of `parent` and sets its parent reference.
    ///
    /// Fails if `parent` is a leaf, if `child` is already held by a container
    /// or if `child` is `parent` itself or one of its ancestors.
    #[instrument(skip(self), level = "debug")]
    pub fn add(&mut self, parent: NodeId, child: NodeId) -> Result<(), PatternError> {
        let child_node = self.node(child)?;
        let parent_node = self.node(parent)?;

        if !parent_node.is_composite() {
            return Err(PatternError::UnsupportedOperation {
                operation: "add",
                variant: parent_node.variant(),
            });
        }
        if child_node.parent().is_some() {
            return Err(PatternError::AlreadyAttached(child));
        }
        if parent == child || self.ancestors(parent).contains(&child) {
            return Err(PatternError::CycleDetected { parent, child });
        }

        if let NodeKind::Composite { children } = &mut self.node_mut(parent)?.kind {
            children.push(child);
        }
        self.node_mut(child)?.parent_ref = Some(parent);
        debug!("Attached {} to {}", child, parent);
        Ok(())
    }

    /// Removes `child` from the children of `parent` and clears its parent reference.
    /// The child stays in the arena as a detached root.
    #[instrument(skip(self), level = "debug")]
    pub fn remove(&mut self, parent: NodeId, child: NodeId) -> Result<(), PatternError> {
        self.node(child)?;
        let parent_node = self.node_mut(parent)?;
        let variant = parent_node.variant();

        match &mut parent_node.kind {
            NodeKind::Leaf { .. } => {
                return Err(PatternError::UnsupportedOperation {
                    operation: "remove",
                    variant,
                })
            }
            NodeKind::Composite { children } => {
                let position = children
                    .iter()
                    .position(|c| *c == child)
                    .ok_or(PatternError::NotAChild { parent, child })?;
                children.remove(position);
            }
        }
        self.node_mut(child)?.parent_ref = None;
        debug!("Detached {} from {}", child, parent);
        Ok(())
    }

    /// The result of the node's operation. A leaf returns its label, a composite
    /// wraps the results of all its children (in insertion order, separated by
    /// [SEPARATOR]) in `Branch(...)`.
    ///
    /// The result is written into one buffer while walking the subtree with an
    /// explicit stack, so neither the nesting depth nor the output size is
    /// limited by the call stack.
    pub fn operation(&self, id: NodeId) -> Result<String, PatternError> {
        let children = match &self.node(id)?.kind {
            NodeKind::Leaf { label } => return Ok(label.clone()),
            NodeKind::Composite { children } => children,
        };

        let mut result = String::from("Branch(");
        let mut stack = Vec::with_capacity(self.max_depth);
        stack.push(children.iter().enumerate());

        while let Some(pending) = stack.last_mut() {
            match pending.next() {
                Some((position, child)) => {
                    if position > 0 {
                        result.push_str(SEPARATOR);
                    }
                    match &self.node(*child)?.kind {
                        NodeKind::Leaf { label } => result.push_str(label),
                        NodeKind::Composite { children } => {
                            result.push_str("Branch(");
                            stack.push(children.iter().enumerate());
                        }
                    }
                }
                // All children of the innermost open composite are done
                None => {
                    result.push(')');
                    stack.pop();
                }
            }
        }
        Ok(result)
    }

    /// Depth-first (pre-order) traversal of the subtree starting at `root`
    pub fn iter_depth(&self, root: NodeId) -> Result<DepthFirstIterator<'_>, PatternError> {
        self.node(root)?;
        Ok(DepthFirstIterator::new(self, root))
    }

    /// Labels of all leaves below `root`, left to right
    pub fn leaves(&self, root: NodeId) -> Result<Vec<&str>, PatternError> {
        Ok(self.iter_depth(root)?.filter_map(|(_, node)| node.label()).collect_vec())
    }

    /// Indented outline of the subtree starting at `root`, one node per line
    pub fn render(&self, root: NodeId) -> Result<String, PatternError> {
        Ok(self
            .iter_depth(root)?
            .map(|(depth, node)| {
                let name = node.label().unwrap_or("Branch");
                format!("{}{}", "  ".repeat(depth), name)
            })
            .join("\n"))
    }
}

impl Default for ComponentTree {
    fn default() -> Self {
        Self::new()
    }
}
