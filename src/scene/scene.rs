use std::collections::BTreeMap;

use crate::gfx::Canvas;

use super::kinds::Drawable;
use super::node::Node;
use super::persistence::SceneError;
use super::tree::NodePath;

/// One open scene: a name and the single root node that owns everything else
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    name: String,
    root: Node,
}

impl Scene {
    /// Creates an empty scene whose root carries the scene name
    pub fn new(name: &str) -> Self {
        let root = Node::root(name);
        Self {
            name: root.title().to_string(),
            root,
        }
    }

    /// Wraps an existing tree
    ///
    /// # Errors
    /// [`SceneError::InvalidRoot`] if `root` is not a `Root` variant.
    pub fn from_root(name: &str, root: Node) -> Result<Self, SceneError> {
        if !root.kind.is_root() {
            return Err(SceneError::InvalidRoot {
                found: root.kind.type_name(),
            });
        }
        let name = match name.trim() {
            "" => root.title().to_string(),
            trimmed => trimmed.to_string(),
        };
        Ok(Self { name, root })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Mutable root. Tree projections built from this scene go stale until refreshed.
    pub fn root_mut(&mut self) -> &mut Node {
        &mut self.root
    }

    pub fn into_root(self) -> Node {
        self.root
    }

    pub fn node_at(&self, path: &NodePath) -> Option<&Node> {
        self.root.descendant(path)
    }

    pub fn node_at_mut(&mut self, path: &NodePath) -> Option<&mut Node> {
        self.root.descendant_mut(path)
    }

    /// Visits visible nodes depth-first, pre-order
    ///
    /// An invisible node hides its whole subtree.
    pub fn visit_visible<F>(&self, mut visit: F)
    where
        F: FnMut(&NodePath, &Node),
    {
        fn walk<F: FnMut(&NodePath, &Node)>(node: &Node, path: NodePath, visit: &mut F) {
            if !node.visible {
                return;
            }
            visit(&path, node);
            for (index, child) in node.children().iter().enumerate() {
                walk(child, path.child(index), visit);
            }
        }

        walk(&self.root, NodePath::root(), &mut visit);
    }

    /// Runs one draw pass in tree order (earlier nodes end up underneath)
    ///
    /// Returns the number of nodes drawn.
    pub fn draw(&self, canvas: &mut dyn Canvas) -> usize {
        let mut drawn = 0;
        self.visit_visible(|_, node| {
            node.draw(&mut *canvas);
            drawn += 1;
        });
        drawn
    }

    /// Title for a new child of `parent` that does not collide with its siblings
    ///
    /// Appends `" (1)"`, `" (2)"`, ... until the title is free.
    pub fn unique_child_title(&self, parent: &NodePath, desired: &str) -> String {
        let siblings: Vec<&str> = self
            .node_at(parent)
            .map(|node| node.children().iter().map(Node::title).collect())
            .unwrap_or_default();

        let desired = desired.trim();
        let mut counter = 0;
        let mut candidate = desired.to_string();
        while siblings.contains(&candidate.as_str()) {
            counter += 1;
            candidate = format!("{} ({})", desired, counter);
        }
        candidate
    }

    /// Checks the tree invariants, failing on the first violation
    pub fn validate(&self) -> Result<(), SceneError> {
        match self.root.check_invariants().into_iter().next() {
            Some(violation) => Err(SceneError::Invariant(violation.to_string())),
            None => Ok(()),
        }
    }

    pub fn statistics(&self) -> SceneStatistics {
        let mut per_kind = BTreeMap::new();
        let mut node_count = 0;
        let mut visible_count = 0;
        for (_, node) in self.root.iter_depth_first() {
            node_count += 1;
            *per_kind.entry(node.kind.type_name()).or_insert(0) += 1;
        }
        self.visit_visible(|_, _| visible_count += 1);

        SceneStatistics {
            node_count,
            visible_count,
            max_depth: self.root.height(),
            per_kind,
        }
    }
}

/// Scene statistics for debugging and UI display
#[derive(Debug, Clone, PartialEq)]
pub struct SceneStatistics {
    pub node_count: usize,
    pub visible_count: usize,
    pub max_depth: usize,
    pub per_kind: BTreeMap<&'static str, usize>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::{DrawCommand, RecordingCanvas};
    use crate::scene::kinds::{CircleShape, RectangleShape};
    use cgmath::vec2;

    fn sample_scene() -> Scene {
        let mut scene = Scene::new("Level");
        let root = scene.root_mut();
        root.children_mut().push(
            Node::group("Background").with_child(Node::rectangle(
                "Sky",
                RectangleShape::new(vec2(0.0, 0.0), vec2(100.0, 50.0)),
            )),
        );
        root.children_mut().push(Node::circle(
            "Sun",
            CircleShape::new(vec2(80.0, 10.0), 5.0),
        ));
        scene
    }

    #[test]
    fn test_new_scene_has_root() {
        let scene = Scene::new("Level");
        assert_eq!(scene.name(), "Level");
        assert!(scene.root().kind.is_root());
        assert!(scene.root().is_leaf());
    }

    #[test]
    fn test_from_root_rejects_non_root() {
        let err = Scene::from_root("x", Node::group("G")).unwrap_err();
        assert!(matches!(err, SceneError::InvalidRoot { found: "Group" }));
        assert_eq!(Scene::from_root(" ", Node::root("R")).unwrap().name(), "R");
    }

    #[test]
    fn test_draw_order_follows_tree_order() {
        let scene = sample_scene();
        let mut canvas = RecordingCanvas::new();
        assert_eq!(scene.draw(&mut canvas), 4);

        assert!(matches!(canvas.commands[0], DrawCommand::FillRect { .. }));
        assert!(matches!(canvas.commands[1], DrawCommand::FillCircle { .. }));
    }

    #[test]
    fn test_invisible_node_hides_subtree() {
        let mut scene = sample_scene();
        scene
            .node_at_mut(&NodePath::root().child(0))
            .unwrap()
            .visible = false;

        let mut canvas = RecordingCanvas::new();
        assert_eq!(scene.draw(&mut canvas), 2);
        assert_eq!(canvas.len(), 1);

        let stats = scene.statistics();
        assert_eq!(stats.node_count, 4);
        assert_eq!(stats.visible_count, 2);
    }

    #[test]
    fn test_unique_child_title() {
        let mut scene = sample_scene();
        let root = NodePath::root();
        assert_eq!(scene.unique_child_title(&root, "Moon"), "Moon");
        assert_eq!(scene.unique_child_title(&root, "Sun"), "Sun (1)");

        scene.root_mut().children_mut().push(Node::group("Sun (1)"));
        assert_eq!(scene.unique_child_title(&root, " Sun "), "Sun (2)");
    }

    #[test]
    fn test_statistics() {
        let stats = sample_scene().statistics();
        assert_eq!(stats.node_count, 4);
        assert_eq!(stats.max_depth, 2);
        assert_eq!(stats.per_kind.get("Group"), Some(&1));
        assert_eq!(stats.per_kind.get("Root"), Some(&1));
    }

    #[test]
    fn test_validate() {
        let mut scene = sample_scene();
        assert!(scene.validate().is_ok());
        scene.root_mut().children_mut().push(Node::root("Nested"));
        assert!(matches!(scene.validate(), Err(SceneError::Invariant(_))));
    }
}
