//! Editor application context
//!
//! [`EditorApp`] owns everything the editor windows share: the open scene, its
//! tree projection, the selection, the viewport and the resource table. It is
//! constructed explicitly and handed to whatever hosts the imgui frame.
//!
//! Every method that changes the tree structure refreshes the affected part
//! of the projection before returning and requests a viewport redraw.

use std::path::Path;

use anyhow::Context;
use imgui::Ui;

use crate::config::EditorConfig;
use crate::error::{EditorError, Result};
use crate::gfx::Viewport;
use crate::logging;
use crate::resources::{register_builtin_icons, ResourceLoader};
use crate::scene::{persistence, Node, NodePath, Scene};
use crate::ui::{
    property_panel, scene_tree_panel, viewport_panel, NodeTreeAction, PanelState, Selection,
    TreeItem,
};

/// A scene together with the tree projection built from it
struct OpenScene {
    scene: Scene,
    node_tree: TreeItem,
}

pub struct EditorApp {
    config: EditorConfig,
    resources: ResourceLoader,
    open: Option<OpenScene>,
    selection: Selection,
    viewport: Viewport,
    panels: PanelState,
}

impl EditorApp {
    /// Creates an editor with the built-in icons registered and no open scene
    pub fn new(config: EditorConfig) -> Self {
        let mut resources = ResourceLoader::new();
        register_builtin_icons(&mut resources);

        Self {
            viewport: config.viewport.to_viewport(),
            config,
            resources,
            open: None,
            selection: Selection::new(),
            panels: PanelState::default(),
        }
    }

    /// Loads the config file, initializes logging and creates the editor
    pub fn from_config_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let config = EditorConfig::load(path)
            .with_context(|| format!("loading editor config from {}", path.display()))?;
        logging::init(&config.log_filter);
        Ok(Self::new(config))
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn resources(&self) -> &ResourceLoader {
        &self.resources
    }

    /// Resource table; refresh the node tree after replacing icons
    pub fn resources_mut(&mut self) -> &mut ResourceLoader {
        &mut self.resources
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn scene(&self) -> Option<&Scene> {
        self.open.as_ref().map(|open| &open.scene)
    }

    /// Last refreshed tree projection of the open scene
    pub fn node_tree(&self) -> Option<&TreeItem> {
        self.open.as_ref().map(|open| &open.node_tree)
    }

    fn open_scene_ref(&self) -> Result<&OpenScene> {
        self.open.as_ref().ok_or(EditorError::NoOpenScene)
    }

    fn open_scene_mut(&mut self) -> Result<&mut OpenScene> {
        self.open.as_mut().ok_or(EditorError::NoOpenScene)
    }

    /// Opens an empty scene named after the configured default
    pub fn new_scene(&mut self) -> Result<()> {
        let scene = Scene::new(&self.config.default_scene_name);
        self.open_scene(scene)
    }

    /// Makes `scene` the open scene, replacing (and closing) the current one
    ///
    /// # Errors
    /// Fails if the projection cannot be built (unregistered icon key); the
    /// previously open scene then stays open.
    pub fn open_scene(&mut self, scene: Scene) -> Result<()> {
        let node_tree = TreeItem::build_from(scene.root(), &self.resources)?;
        if let Some(previous) = self.close_scene() {
            log::debug!("Replaced scene '{}'", previous.name());
        }

        log::info!(
            "Opened scene '{}' ({} nodes)",
            scene.name(),
            scene.root().subtree_len()
        );
        self.open = Some(OpenScene { scene, node_tree });
        self.viewport.request_redraw();
        Ok(())
    }

    /// Closes the open scene and hands it back
    pub fn close_scene(&mut self) -> Option<Scene> {
        let open = self.open.take()?;
        self.selection.clear();
        self.panels.reset_title_buffer();
        self.viewport.request_redraw();
        log::info!("Closed scene '{}'", open.scene.name());
        Some(open.scene)
    }

    pub fn load_scene(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let scene = persistence::load_scene(path)?;
        self.open_scene(scene)
    }

    pub fn save_scene(&self, path: impl AsRef<Path>) -> Result<()> {
        let open = self.open_scene_ref()?;
        persistence::save_scene(&open.scene, path)?;
        Ok(())
    }

    /// Appends `node` to the children of `parent`
    ///
    /// Refreshes the parent's tree item and clears the selection. If the
    /// refresh fails the insertion is undone.
    ///
    /// # Returns
    /// Path of the inserted node
    pub fn add_node(&mut self, parent: &NodePath, node: Node) -> Result<NodePath> {
        if node.kind.is_root() {
            return Err(EditorError::NestedRoot);
        }

        let open = self.open_scene_mut()?;
        let children = open
            .scene
            .node_at_mut(parent)
            .ok_or_else(|| EditorError::InvalidPath(parent.clone()))?
            .children_mut();
        children.push(node);
        let path = parent.child(children.len() - 1);

        if let Err(err) = self.refresh_subtree(parent) {
            if let Some(parent_node) = self
                .open
                .as_mut()
                .and_then(|open| open.scene.node_at_mut(parent))
            {
                parent_node.children_mut().pop();
            }
            return Err(err);
        }

        log::debug!("Added node at {}", path);
        self.selection.clear();
        self.panels.reset_title_buffer();
        self.viewport.request_redraw();
        Ok(path)
    }

    /// Removes the node at `path` together with its subtree
    ///
    /// Refreshes the parent's tree item and clears the selection. If the
    /// refresh fails the node is put back and the error returned.
    pub fn remove_node(&mut self, path: &NodePath) -> Result<Node> {
        let (parent, index) = match (path.parent(), path.last()) {
            (Some(parent), Some(index)) => (parent, index),
            _ => return Err(EditorError::CannotRemoveRoot),
        };

        let open = self.open_scene_mut()?;
        let children = open
            .scene
            .node_at_mut(&parent)
            .ok_or_else(|| EditorError::InvalidPath(path.clone()))?
            .children_mut();
        if index >= children.len() {
            return Err(EditorError::InvalidPath(path.clone()));
        }
        let removed = children.remove(index);

        if let Err(err) = self.refresh_subtree(&parent) {
            if let Some(parent_node) = self
                .open
                .as_mut()
                .and_then(|open| open.scene.node_at_mut(&parent))
            {
                parent_node.children_mut().insert(index, removed);
            }
            return Err(err);
        }

        self.selection.clear();
        self.panels.reset_title_buffer();
        self.viewport.request_redraw();
        log::debug!("Removed '{}' from {}", removed.title(), path);
        Ok(removed)
    }

    /// Renames the first selected node
    ///
    /// # Returns
    /// Whether the title changed; a blank title is ignored
    pub fn rename_selected(&mut self, title: &str) -> Result<bool> {
        let open = self.open.as_mut().ok_or(EditorError::NoOpenScene)?;
        let applied = self.selection.get_selected_mut(&mut open.scene)?.set_title(title);

        if applied {
            self.panels.reset_title_buffer();
            self.viewport.request_redraw();
        } else {
            log::warn!("Ignored blank title for the selected node");
        }
        Ok(applied)
    }

    /// Selects the node at `path`
    pub fn select(&mut self, path: NodePath) -> Result<()> {
        let open = self.open_scene_ref()?;
        let Some(id) = open.scene.node_at(&path).map(Node::id) else {
            return Err(EditorError::InvalidPath(path));
        };
        self.selection.select(path, id);
        self.viewport.request_redraw();
        Ok(())
    }

    /// The first selected node
    pub fn selected_node(&self) -> Result<&Node> {
        let open = self.open_scene_ref()?;
        Ok(self.selection.get_selected(&open.scene)?)
    }

    /// Rebuilds the whole tree projection
    pub fn refresh_node_tree(&mut self) -> Result<()> {
        self.refresh_subtree(&NodePath::root())
    }

    /// Rebuilds the projection below the item for `path`
    ///
    /// If that item is missing from a stale projection or no longer resolves
    /// to its node, the nearest ancestor item that still does is refreshed
    /// instead. A root item that went stale means a full rebuild.
    pub fn refresh_subtree(&mut self, path: &NodePath) -> Result<()> {
        let resources = &self.resources;
        let open = self.open.as_mut().ok_or(EditorError::NoOpenScene)?;
        let root = open.scene.root();

        let mut target = path.clone();
        while !open
            .node_tree
            .find(&target)
            .is_some_and(|item| item.node(root).is_some())
        {
            match target.parent() {
                Some(parent) => target = parent,
                None => break,
            }
        }
        let resolves = open
            .node_tree
            .find(&target)
            .is_some_and(|item| item.node(root).is_some());
        if resolves {
            if let Some(item) = open.node_tree.find_mut(&target) {
                item.refresh_children(root, resources)?;
            }
        } else {
            open.node_tree = TreeItem::build_from(root, resources)?;
        }

        if cfg!(debug_assertions) {
            for violation in open.scene.root().check_invariants() {
                log::warn!("Scene tree invariant violated: {}", violation);
            }
        }
        if target.is_root() {
            debug_assert!(open.node_tree.mirrors(open.scene.root()));
        }

        self.viewport.request_redraw();
        Ok(())
    }

    /// Applies an action requested from the node tree bar
    pub fn apply_action(&mut self, action: NodeTreeAction) -> Result<()> {
        match action {
            NodeTreeAction::Add { parent, kind } => {
                let title = self
                    .open_scene_ref()?
                    .scene
                    .unique_child_title(&parent, kind.default_title());
                let path = self.add_node(&parent, Node::with_kind(&title, kind))?;
                self.select(path)
            }
            NodeTreeAction::Remove(path) => self.remove_node(&path).map(|_| ()),
            NodeTreeAction::Refresh => self.refresh_node_tree(),
        }
    }

    /// Draws all editor panels for the current frame
    pub fn render_ui(&mut self, ui: &Ui) {
        let Some(open) = self.open.as_mut() else {
            ui.window("Grape SDK").build(|| {
                ui.text("No scene open");
            });
            return;
        };

        let action = scene_tree_panel(
            ui,
            &open.scene,
            &open.node_tree,
            &mut self.selection,
            &mut self.panels,
        );
        if property_panel(ui, &mut open.scene, &self.selection, &mut self.panels) {
            self.viewport.request_redraw();
        }
        let picked = viewport_panel(ui, &open.scene, &self.selection, &mut self.viewport);

        if let Some(path) = picked {
            if let Err(err) = self.select(path) {
                log::warn!("Viewport pick failed: {}", err);
            }
        }
        if let Some(action) = action {
            if let Err(err) = self.apply_action(action) {
                log::warn!("Node tree action failed: {}", err);
            }
        }
    }
}

impl Default for EditorApp {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}
