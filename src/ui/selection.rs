//! Selection bridge between tree-view rows and scene nodes
//!
//! The selection stores which rows were selected (node id and path at the time
//! of selection), nothing else. Every query resolves them against the scene
//! again, so a selection never hands out a node it cached from an earlier
//! event. A node that moved keeps its selection; one that is gone is reported
//! as dangling. Selecting never touches a node.

use thiserror::Error;

use crate::scene::{Node, NodeId, NodePath, Scene};

use super::projection::TreeItem;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("no node is selected")]
    NoSelection,

    /// The selected row's node is gone from the tree
    #[error("selected row {0} no longer points at a node")]
    Dangling(NodePath),
}

/// A selected row: the node's id and its path when it was selected
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedRow {
    pub id: NodeId,
    pub path: NodePath,
}

impl SelectedRow {
    /// Current path of the row's node
    ///
    /// Tries the recorded path first and searches by id if another node sits
    /// there now.
    pub fn resolve(&self, root: &Node) -> Result<NodePath, SelectionError> {
        match root.descendant(&self.path) {
            Some(node) if node.id() == self.id => Ok(self.path.clone()),
            _ => root
                .path_of(self.id)
                .ok_or_else(|| SelectionError::Dangling(self.path.clone())),
        }
    }
}

/// Ordered set of selected tree-view rows
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    rows: Vec<SelectedRow>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the selection with a single row
    pub fn select(&mut self, path: NodePath, id: NodeId) {
        self.rows.clear();
        self.rows.push(SelectedRow { id, path });
    }

    pub fn select_item(&mut self, item: &TreeItem) {
        self.select(item.path().clone(), item.id());
    }

    /// Adds a row (ctrl-click). Already selected nodes are toggled off.
    pub fn extend(&mut self, path: NodePath, id: NodeId) {
        if let Some(pos) = self.rows.iter().position(|row| row.id == id) {
            self.rows.remove(pos);
        } else {
            self.rows.push(SelectedRow { id, path });
        }
    }

    pub fn extend_item(&mut self, item: &TreeItem) {
        self.extend(item.path().clone(), item.id());
    }

    pub fn clear(&mut self) {
        self.rows.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.rows.iter().any(|row| row.id == id)
    }

    pub fn rows(&self) -> &[SelectedRow] {
        &self.rows
    }

    /// First selected row
    pub fn first(&self) -> Result<&SelectedRow, SelectionError> {
        self.rows.first().ok_or(SelectionError::NoSelection)
    }

    /// Current path of the first selected node
    pub fn selected_path(&self, scene: &Scene) -> Result<NodePath, SelectionError> {
        self.first()?.resolve(scene.root())
    }

    /// Node behind the first selected row
    ///
    /// # Errors
    /// [`SelectionError::NoSelection`] if nothing is selected. Callers such as
    /// the property panel check this before acting.
    pub fn get_selected<'s>(&self, scene: &'s Scene) -> Result<&'s Node, SelectionError> {
        let path = self.selected_path(scene)?;
        scene
            .node_at(&path)
            .ok_or(SelectionError::Dangling(path))
    }

    /// Mutable access to the first selected node, for property edits
    pub fn get_selected_mut<'s>(&self, scene: &'s mut Scene) -> Result<&'s mut Node, SelectionError> {
        let path = self.selected_path(scene)?;
        scene
            .node_at_mut(&path)
            .ok_or(SelectionError::Dangling(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::{register_builtin_icons, ResourceLoader};

    fn scene() -> Scene {
        let mut scene = Scene::new("S");
        scene.root_mut().children_mut().push(Node::group("A"));
        scene
            .root_mut()
            .children_mut()
            .push(Node::group("B").with_child(Node::group("C")));
        scene
    }

    fn select_path(selection: &mut Selection, scene: &Scene, path: NodePath) {
        let id = scene.node_at(&path).unwrap().id();
        selection.select(path, id);
    }

    #[test]
    fn test_empty_selection_fails() {
        let scene = scene();
        let selection = Selection::new();
        assert_eq!(
            selection.get_selected(&scene).unwrap_err(),
            SelectionError::NoSelection
        );
    }

    #[test]
    fn test_selected_item_resolves_to_backing_node() {
        let mut resources = ResourceLoader::new();
        register_builtin_icons(&mut resources);

        let scene = scene();
        let projection = TreeItem::build_from(scene.root(), &resources).unwrap();
        let c_item = &projection.children()[1].children()[0];

        let mut selection = Selection::new();
        selection.select_item(c_item);

        let node = selection.get_selected(&scene).unwrap();
        assert_eq!(Some(node), c_item.node(scene.root()));
        assert_eq!(node.title(), "C");
    }

    #[test]
    fn test_first_of_multiple_rows_wins() {
        let scene = scene();
        let mut selection = Selection::new();
        select_path(&mut selection, &scene, NodePath::root().child(1));
        let a = NodePath::root().child(0);
        selection.extend(a.clone(), scene.node_at(&a).unwrap().id());

        assert_eq!(selection.len(), 2);
        assert_eq!(selection.get_selected(&scene).unwrap().title(), "B");

        let b = NodePath::root().child(1);
        selection.extend(b.clone(), scene.node_at(&b).unwrap().id());
        assert_eq!(selection.get_selected(&scene).unwrap().title(), "A");
    }

    #[test]
    fn test_selecting_does_not_mutate_scene() {
        let scene = scene();
        let before = scene.clone();

        let mut selection = Selection::new();
        select_path(&mut selection, &scene, NodePath::root().child(0));
        let _ = selection.get_selected(&scene);
        assert_eq!(scene, before);
    }

    #[test]
    fn test_property_write_through_selection() {
        let mut scene = scene();
        let mut selection = Selection::new();
        select_path(&mut selection, &scene, NodePath::root().child(0));

        assert!(selection.get_selected_mut(&mut scene).unwrap().set_title(" Renamed "));
        assert_eq!(scene.node_at(&NodePath::root().child(0)).unwrap().title(), "Renamed");
    }

    #[test]
    fn test_dangling_selection() {
        let mut scene = scene();
        let mut selection = Selection::new();
        select_path(&mut selection, &scene, NodePath::root().child(1));
        scene.root_mut().children_mut().truncate(1);

        assert_eq!(
            selection.get_selected(&scene).unwrap_err(),
            SelectionError::Dangling(NodePath::root().child(1))
        );
    }

    #[test]
    fn test_selection_follows_node_after_sibling_insert() {
        let mut scene = scene();
        let mut selection = Selection::new();
        select_path(&mut selection, &scene, NodePath::root().child(1));

        scene.root_mut().children_mut().insert(0, Node::group("X"));

        assert_eq!(selection.get_selected(&scene).unwrap().title(), "B");
        assert_eq!(
            selection.selected_path(&scene).unwrap(),
            NodePath::root().child(2)
        );
        assert!(selection.get_selected_mut(&mut scene).unwrap().set_title("B2"));
        assert_eq!(scene.node_at(&NodePath::root().child(2)).unwrap().title(), "B2");
    }

    #[test]
    fn test_replaced_node_is_dangling() {
        let mut scene = scene();
        let mut selection = Selection::new();
        select_path(&mut selection, &scene, NodePath::root().child(0));

        scene.root_mut().children_mut()[0] = Node::group("A");

        assert_eq!(
            selection.get_selected(&scene).unwrap_err(),
            SelectionError::Dangling(NodePath::root().child(0))
        );
    }
}
