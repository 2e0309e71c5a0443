//! The scene node: the one entity every editor object is built from

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::gfx::Canvas;
use crate::resources::{Image, ResourceError, ResourceLoader};

use super::kinds::{
    Bounds, CircleShape, Drawable, NodeKind, PointLight, RectangleShape, TextLabel,
};

/// Identity of a node, unique within the running process
///
/// Assigned at construction. Cloning or loading a node gives it a fresh id;
/// ids are never written to scene files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

impl NodeId {
    fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A node in the scene tree
///
/// Owns its children exclusively; a node is dropped together with its parent's
/// child list. There is no parent pointer. Anything that needs to address a
/// node from outside uses a [`NodePath`](super::NodePath).
///
/// The title is never blank: the constructor falls back to the variant's
/// default title and [`Node::set_title`] ignores blank input.
///
/// Equality compares content only, never [`NodeId`]s.
#[derive(Debug, Serialize, Deserialize)]
#[serde(from = "NodeRecord")]
pub struct Node {
    #[serde(skip_serializing)]
    id: NodeId,
    title: String,
    icon_key: String,
    pub visible: bool,
    pub kind: NodeKind,
    children: Vec<Node>,
}

/// Unvalidated on-disk form of a [`Node`]
#[derive(Deserialize)]
struct NodeRecord {
    title: String,
    icon_key: String,
    #[serde(default = "visible_by_default")]
    visible: bool,
    kind: NodeKind,
    #[serde(default)]
    children: Vec<Node>,
}

fn visible_by_default() -> bool {
    true
}

impl From<NodeRecord> for Node {
    fn from(record: NodeRecord) -> Self {
        let mut node = Node::new(&record.title, record.icon_key, record.kind);
        node.visible = record.visible;
        node.children = record.children;
        node
    }
}

impl Node {
    /// Creates a node without children
    ///
    /// # Arguments
    /// * `title` - Label shown in the scene tree. Trimmed; a blank title is
    ///   replaced by the variant's default title.
    /// * `icon_key` - Resource key of the tree icon, resolved on demand
    /// * `kind` - Variant data
    pub fn new(title: &str, icon_key: impl Into<String>, kind: NodeKind) -> Self {
        let trimmed = title.trim();
        let title = if trimmed.is_empty() {
            kind.default_title().to_string()
        } else {
            trimmed.to_string()
        };

        Self {
            id: NodeId::next(),
            title,
            icon_key: icon_key.into(),
            visible: true,
            kind,
            children: Vec::new(),
        }
    }

    /// Creates a node using the variant's default icon
    pub fn with_kind(title: &str, kind: NodeKind) -> Self {
        let icon_key = kind.default_icon_key();
        Self::new(title, icon_key, kind)
    }

    pub fn root(title: &str) -> Self {
        Self::with_kind(title, NodeKind::Root)
    }

    pub fn group(title: &str) -> Self {
        Self::with_kind(title, NodeKind::Group)
    }

    pub fn rectangle(title: &str, shape: RectangleShape) -> Self {
        Self::with_kind(title, NodeKind::Rectangle(shape))
    }

    pub fn circle(title: &str, shape: CircleShape) -> Self {
        Self::with_kind(title, NodeKind::Circle(shape))
    }

    pub fn light(title: &str, light: PointLight) -> Self {
        Self::with_kind(title, NodeKind::Light(light))
    }

    pub fn label(title: &str, label: TextLabel) -> Self {
        Self::with_kind(title, NodeKind::Label(label))
    }

    /// Builder pattern: appends a child
    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Current title, never empty
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Sets the title shown in the scene tree
    ///
    /// Leading and trailing whitespace is removed. If nothing is left the call
    /// is a no-op and the previous title stays.
    ///
    /// # Returns
    /// Whether the title was applied
    pub fn set_title(&mut self, candidate: &str) -> bool {
        let trimmed = candidate.trim();
        if trimmed.is_empty() {
            log::debug!("Ignoring blank title for node '{}'", self.title);
            return false;
        }
        self.title = trimmed.to_string();
        true
    }

    pub fn icon_key(&self) -> &str {
        &self.icon_key
    }

    /// Resolves the tree icon through `resources`
    ///
    /// Looked up on every call; the node never caches the image.
    ///
    /// # Errors
    /// [`ResourceError::NotFound`] if the icon key is not registered.
    pub fn tree_icon(&self, resources: &ResourceLoader) -> Result<Arc<Image>, ResourceError> {
        resources.get::<Image>(&self.icon_key)
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Live child list
    ///
    /// The only sanctioned way to add, remove or reorder children. Order is
    /// both draw order and display order. Callers owning a tree projection
    /// must refresh it afterwards.
    pub fn children_mut(&mut self) -> &mut Vec<Node> {
        &mut self.children
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// World-space extent of this node alone (children not included)
    pub fn bounds(&self) -> Option<Bounds> {
        self.kind.bounds()
    }
}

impl Clone for Node {
    fn clone(&self) -> Self {
        Self {
            id: NodeId::next(),
            title: self.title.clone(),
            icon_key: self.icon_key.clone(),
            visible: self.visible,
            kind: self.kind.clone(),
            children: self.children.clone(),
        }
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.title == other.title
            && self.icon_key == other.icon_key
            && self.visible == other.visible
            && self.kind == other.kind
            && self.children == other.children
    }
}

impl Drawable for Node {
    fn draw(&self, canvas: &mut dyn Canvas) {
        self.kind.draw(canvas);
    }

    fn bounds(&self) -> Option<Bounds> {
        self.kind.bounds()
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::register_builtin_icons;
    use cgmath::vec2;

    #[test]
    fn test_set_title_trims() {
        let mut node = Node::light("Light", PointLight::new(vec2(0.0, 0.0), 10.0));
        assert!(node.set_title(" Sun "));
        assert_eq!(node.title(), "Sun");
    }

    #[test]
    fn test_blank_title_is_ignored() {
        let mut node = Node::light("Light", PointLight::new(vec2(0.0, 0.0), 10.0));
        for blank in ["", "  ", "\t", " \n\t "] {
            assert!(!node.set_title(blank));
            assert_eq!(node.title(), "Light");
        }
    }

    #[test]
    fn test_non_blank_titles_roundtrip_trimmed() {
        let mut node = Node::group("Group");
        for candidate in ["a", " padded ", "\tTabbed\t", "inner  space", "Ünïcode ✓"] {
            assert!(node.set_title(candidate));
            assert_eq!(node.title(), candidate.trim());
        }
    }

    #[test]
    fn test_blank_constructor_title_uses_default() {
        let node = Node::group("   ");
        assert_eq!(node.title(), "Group");
        assert_eq!(node.to_string(), "Group");
    }

    #[test]
    fn test_tree_icon_resolution() {
        let mut resources = ResourceLoader::new();
        register_builtin_icons(&mut resources);

        let node = Node::group("Things");
        let icon = node.tree_icon(&resources).unwrap();
        assert_eq!(icon.width, crate::resources::image::TREE_ICON_SIZE);
    }

    #[test]
    fn test_tree_icon_missing_key_propagates() {
        let resources = ResourceLoader::new();
        let node = Node::new("Custom", "image.node.custom", NodeKind::Group);
        assert_eq!(
            node.tree_icon(&resources).unwrap_err(),
            ResourceError::NotFound {
                key: "image.node.custom".to_string()
            }
        );
    }

    #[test]
    fn test_children_mut_is_live() {
        let mut parent = Node::group("Parent");
        parent.children_mut().push(Node::group("A"));
        parent.children_mut().insert(0, Node::group("B"));

        let titles: Vec<_> = parent.children().iter().map(Node::title).collect();
        assert_eq!(titles, ["B", "A"]);

        let removed = parent.children_mut().remove(0);
        assert_eq!(removed.title(), "B");
        assert_eq!(parent.children().len(), 1);
    }

    #[test]
    fn test_deserialize_normalises_title() {
        let json = r#"{"title":"  ","icon_key":"image.node.group","kind":{"type":"group"}}"#;
        let node: Node = serde_json::from_str(json).unwrap();
        assert_eq!(node.title(), "Group");
        assert!(node.visible);
        assert!(node.is_leaf());
    }

    #[test]
    fn test_ids_are_unique_and_ignored_by_equality() {
        let node = Node::group("Group").with_child(Node::group("Child"));
        let copy = node.clone();

        assert_ne!(node.id(), copy.id());
        assert_ne!(node.children()[0].id(), copy.children()[0].id());
        assert_eq!(node, copy);

        let json = serde_json::to_string(&node).unwrap();
        assert!(!json.contains("\"id\""));
        let loaded: Node = serde_json::from_str(&json).unwrap();
        assert_ne!(loaded.id(), node.id());
    }
}
