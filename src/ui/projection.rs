//! Tree-view projection of the node tree
//!
//! A [`TreeItem`] mirrors one node: it remembers the node's id and where the
//! node was when the item was built, and holds its resolved icon. An item only
//! resolves while the node with its id still sits at its path. Items are never patched; a
//! refresh throws the children away and wraps the current nodes again. Between
//! refreshes the projection may lag behind the tree.

use std::sync::Arc;

use thiserror::Error;

use crate::resources::{Image, ResourceError, ResourceLoader};
use crate::scene::{Node, NodeId, NodePath};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProjectionError {
    #[error("cannot resolve tree icon: {0}")]
    Resource(#[from] ResourceError),

    /// The item's node no longer sits at the recorded path
    #[error("tree item {0} no longer points at its node")]
    Dangling(NodePath),
}

/// One row of the scene tree view
#[derive(Debug, Clone)]
pub struct TreeItem {
    id: NodeId,
    path: NodePath,
    icon: Arc<Image>,
    children: Vec<TreeItem>,
}

impl TreeItem {
    /// Wraps `root` and its whole subtree
    ///
    /// # Errors
    /// [`ProjectionError::Resource`] if any icon key in the subtree is unregistered.
    pub fn build_from(root: &Node, resources: &ResourceLoader) -> Result<Self, ProjectionError> {
        let item = Self::wrap(root, NodePath::root(), resources)?;
        log::debug!("Built tree projection with {} items", item.len());
        Ok(item)
    }

    fn wrap(node: &Node, path: NodePath, resources: &ResourceLoader) -> Result<Self, ProjectionError> {
        let icon = node.tree_icon(resources)?;
        let children = Self::wrap_children(node, &path, resources)?;
        Ok(Self {
            id: node.id(),
            path,
            icon,
            children,
        })
    }

    fn wrap_children(
        node: &Node,
        path: &NodePath,
        resources: &ResourceLoader,
    ) -> Result<Vec<Self>, ProjectionError> {
        node.children()
            .iter()
            .enumerate()
            .map(|(index, child)| Self::wrap(child, path.child(index), resources))
            .collect()
    }

    /// Rebuilds this item's children from the current tree under `root`
    ///
    /// Only this subtree is touched; items elsewhere stay as they were.
    /// On error the existing children are left in place.
    pub fn refresh_children(
        &mut self,
        root: &Node,
        resources: &ResourceLoader,
    ) -> Result<(), ProjectionError> {
        let node = self
            .node(root)
            .ok_or_else(|| ProjectionError::Dangling(self.path.clone()))?;

        self.children = Self::wrap_children(node, &self.path, resources)?;
        log::debug!(
            "Refreshed tree item {} ({} children)",
            self.path,
            self.children.len()
        );
        Ok(())
    }

    /// Id of the node this item stands for
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Path of the node this item stands for
    pub fn path(&self) -> &NodePath {
        &self.path
    }

    pub fn icon(&self) -> &Arc<Image> {
        &self.icon
    }

    pub fn children(&self) -> &[TreeItem] {
        &self.children
    }

    /// Resolves the node behind this item
    ///
    /// `None` once the path is gone or holds a different node (an earlier
    /// sibling was inserted or removed without a refresh).
    pub fn node<'a>(&self, root: &'a Node) -> Option<&'a Node> {
        root.descendant(&self.path)
            .filter(|node| node.id() == self.id)
    }

    /// Finds the item built for `path` within this item's subtree
    pub fn find(&self, path: &NodePath) -> Option<&TreeItem> {
        let relative = path.indices().strip_prefix(self.path.indices())?;
        relative
            .iter()
            .try_fold(self, |item, &index| item.children.get(index))
    }

    pub fn find_mut(&mut self, path: &NodePath) -> Option<&mut TreeItem> {
        let relative = path.indices().strip_prefix(self.path.indices())?.to_vec();
        let mut item = self;
        for index in relative {
            item = item.children.get_mut(index)?;
        }
        Some(item)
    }

    /// Number of items in this subtree, including this one
    pub fn len(&self) -> usize {
        1 + self.children.iter().map(TreeItem::len).sum::<usize>()
    }

    /// Whether this subtree stands for exactly `node`'s subtree
    ///
    /// Compares node ids, child counts and order at every level.
    pub fn mirrors(&self, node: &Node) -> bool {
        self.id == node.id()
            && self.children.len() == node.children().len()
            && self
                .children
                .iter()
                .zip(node.children())
                .all(|(item, child)| item.mirrors(child))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::register_builtin_icons;
    use crate::scene::NodeKind;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn resources() -> ResourceLoader {
        let mut loader = ResourceLoader::new();
        register_builtin_icons(&mut loader);
        loader
    }

    fn random_subtree(rng: &mut StdRng, depth: usize, counter: &mut usize) -> Node {
        *counter += 1;
        let mut node = Node::group(&format!("N{}", counter));
        if depth > 0 {
            for _ in 0..rng.random_range(0..4) {
                let child = random_subtree(rng, depth - 1, counter);
                node.children_mut().push(child);
            }
        }
        node
    }

    /// root -> [A, B -> [C]]
    fn abc_tree() -> Node {
        Node::root("Root")
            .with_child(Node::group("A"))
            .with_child(Node::group("B").with_child(Node::group("C")))
    }

    #[test]
    fn test_build_mirrors_random_trees() {
        let resources = resources();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..25 {
            let mut counter = 0;
            let mut root = Node::root("Root");
            let subtree = random_subtree(&mut rng, 4, &mut counter);
            root.children_mut().push(subtree);

            let item = TreeItem::build_from(&root, &resources).unwrap();
            assert!(item.mirrors(&root));
            assert_eq!(item.len(), root.subtree_len());
        }
    }

    #[test]
    fn test_items_resolve_to_their_nodes() {
        let resources = resources();
        let root = abc_tree();
        let item = TreeItem::build_from(&root, &resources).unwrap();

        for (path, node) in root.iter_depth_first() {
            let found = item.find(&path).unwrap();
            assert_eq!(found.path(), &path);
            assert_eq!(found.node(&root), Some(node));
        }
    }

    #[test]
    fn test_scoped_refresh_leaves_other_items_stale() {
        let resources = resources();
        let mut root = abc_tree();
        let mut item = TreeItem::build_from(&root, &resources).unwrap();

        let b = NodePath::root().child(1);
        let a = NodePath::root().child(0);
        root.descendant_mut(&b)
            .unwrap()
            .children_mut()
            .push(Node::group("D"));
        root.descendant_mut(&a)
            .unwrap()
            .children_mut()
            .push(Node::group("A1"));

        item.find_mut(&b)
            .unwrap()
            .refresh_children(&root, &resources)
            .unwrap();

        let b_item = item.find(&b).unwrap();
        let titles: Vec<_> = b_item
            .children()
            .iter()
            .map(|child| child.node(&root).unwrap().title())
            .collect();
        assert_eq!(titles, ["C", "D"]);
        assert!(b_item.mirrors(root.descendant(&b).unwrap()));

        // A was not refreshed and still shows no children.
        assert!(item.find(&a).unwrap().children().is_empty());
        assert!(!item.mirrors(&root));

        item.refresh_children(&root, &resources).unwrap();
        assert!(item.mirrors(&root));
    }

    #[test]
    fn test_refresh_after_removal() {
        let resources = resources();
        let mut root = abc_tree();
        let mut item = TreeItem::build_from(&root, &resources).unwrap();

        root.children_mut().remove(0);
        item.refresh_children(&root, &resources).unwrap();

        assert_eq!(item.children().len(), 1);
        assert_eq!(item.children()[0].node(&root).unwrap().title(), "B");
        assert!(item.mirrors(&root));
    }

    #[test]
    fn test_missing_icon_fails_build() {
        let resources = resources();
        let root = Node::root("Root").with_child(Node::new("Odd", "image.unknown", NodeKind::Group));

        assert_eq!(
            TreeItem::build_from(&root, &resources).unwrap_err(),
            ProjectionError::Resource(ResourceError::NotFound {
                key: "image.unknown".to_string()
            })
        );
    }

    #[test]
    fn test_refresh_dangling_item() {
        let resources = resources();
        let mut root = abc_tree();
        let mut item = TreeItem::build_from(&root, &resources).unwrap();

        root.children_mut().clear();
        let b = NodePath::root().child(1);
        let err = item
            .find_mut(&b)
            .unwrap()
            .refresh_children(&root, &resources)
            .unwrap_err();
        assert_eq!(err, ProjectionError::Dangling(b));
    }

    #[test]
    fn test_shifted_item_does_not_resolve_to_sibling() {
        let resources = resources();
        let mut root = abc_tree();
        let mut item = TreeItem::build_from(&root, &resources).unwrap();
        let b = NodePath::root().child(1);

        root.children_mut().insert(0, Node::group("X"));
        root.children_mut()[2].children_mut().push(Node::group("D"));

        let b_item = item.find_mut(&b).unwrap();
        assert_eq!(b_item.node(&root), None);
        assert_eq!(
            b_item.refresh_children(&root, &resources).unwrap_err(),
            ProjectionError::Dangling(b.clone())
        );
        // Still the old children, not those of "A".
        assert_eq!(item.find(&b).unwrap().children().len(), 1);
        assert!(!item.mirrors(&root));

        item.refresh_children(&root, &resources).unwrap();
        assert!(item.mirrors(&root));
        let titles: Vec<_> = item
            .find(&NodePath::root().child(2))
            .unwrap()
            .children()
            .iter()
            .map(|child| child.node(&root).unwrap().title())
            .collect();
        assert_eq!(titles, ["C", "D"]);
    }
}
