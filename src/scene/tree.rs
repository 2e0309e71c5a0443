//! Addressing and traversal of the node tree
//!
//! Ownership is a plain `Vec<Node>` per node, so a node can only ever sit in one
//! child list and the tree cannot contain cycles. What callers can still get
//! wrong (blank titles injected by hand, a `Root` variant nested inside the
//! tree) is reported by [`Node::check_invariants`].

use std::fmt;

use serde::{Deserialize, Serialize};

use super::node::{Node, NodeId};

/// Location of a node as child indices from the tree root
///
/// The empty path is the root itself. Paths are positional: inserting or
/// removing a sibling shifts the paths of everything after it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodePath(Vec<usize>);

impl NodePath {
    pub fn root() -> Self {
        Self(Vec::new())
    }

    pub fn from_indices(indices: impl Into<Vec<usize>>) -> Self {
        Self(indices.into())
    }

    /// Path of the `index`-th child of this node
    pub fn child(&self, index: usize) -> Self {
        let mut indices = self.0.clone();
        indices.push(index);
        Self(indices)
    }

    /// Path of the parent, `None` for the root
    pub fn parent(&self) -> Option<Self> {
        let (_, parent) = self.0.split_last()?;
        Some(Self(parent.to_vec()))
    }

    /// Index within the parent's child list, `None` for the root
    pub fn last(&self) -> Option<usize> {
        self.0.last().copied()
    }

    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    pub fn depth(&self) -> usize {
        self.0.len()
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether `other` lies strictly below this path
    pub fn is_ancestor_of(&self, other: &NodePath) -> bool {
        other.0.len() > self.0.len() && other.0.starts_with(&self.0)
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("/");
        }
        for index in &self.0 {
            write!(f, "/{}", index)?;
        }
        Ok(())
    }
}

/// Pre-order iterator over a subtree, see [`Node::iter_depth_first`]
pub struct DepthFirst<'a> {
    stack: Vec<(NodePath, &'a Node)>,
}

impl<'a> Iterator for DepthFirst<'a> {
    type Item = (NodePath, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        let (path, node) = self.stack.pop()?;
        // Reverse so the first child is popped first.
        for (index, child) in node.children().iter().enumerate().rev() {
            self.stack.push((path.child(index), child));
        }
        Some((path, node))
    }
}

/// A broken tree invariant found by [`Node::check_invariants`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    BlankTitle(NodePath),
    NestedRoot(NodePath),
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvariantViolation::BlankTitle(path) => write!(f, "blank title at {}", path),
            InvariantViolation::NestedRoot(path) => write!(f, "root node nested at {}", path),
        }
    }
}

impl Node {
    /// Resolves `path` relative to this node
    pub fn descendant(&self, path: &NodePath) -> Option<&Node> {
        path.indices()
            .iter()
            .try_fold(self, |node, &index| node.children().get(index))
    }

    /// Resolves `path` relative to this node for mutation
    pub fn descendant_mut(&mut self, path: &NodePath) -> Option<&mut Node> {
        let mut node = self;
        for &index in path.indices() {
            node = node.children_mut().get_mut(index)?;
        }
        Some(node)
    }

    /// Current path of the node with `id`, relative to this node
    pub fn path_of(&self, id: NodeId) -> Option<NodePath> {
        self.iter_depth_first()
            .find(|(_, node)| node.id() == id)
            .map(|(path, _)| path)
    }

    /// Depth-first pre-order walk starting at this node
    ///
    /// A node is yielded before any of its descendants, children in sequence
    /// order. Paths are relative to this node.
    pub fn iter_depth_first(&self) -> DepthFirst<'_> {
        DepthFirst {
            stack: vec![(NodePath::root(), self)],
        }
    }

    /// Number of nodes in this subtree, including this node
    pub fn subtree_len(&self) -> usize {
        1 + self.children().iter().map(Node::subtree_len).sum::<usize>()
    }

    /// Deepest path length below this node (0 for a leaf)
    pub fn height(&self) -> usize {
        self.children()
            .iter()
            .map(|child| child.height() + 1)
            .max()
            .unwrap_or(0)
    }

    /// Collects violations of the tree invariants in this subtree
    ///
    /// Cheap enough for debug builds after bulk edits or loading; the editor
    /// calls it from its refresh path when `debug_assertions` are on.
    pub fn check_invariants(&self) -> Vec<InvariantViolation> {
        self.iter_depth_first()
            .flat_map(|(path, node)| {
                let mut found = Vec::new();
                if node.title().trim().is_empty() {
                    found.push(InvariantViolation::BlankTitle(path.clone()));
                }
                if !path.is_root() && node.kind.is_root() {
                    found.push(InvariantViolation::NestedRoot(path));
                }
                found
            })
            .collect()
    }
}
