//! # User Interface Module
//!
//! The UI-facing side of the scene tree: a tree-view projection rebuilt on
//! demand, the selection bridge back to the authoritative nodes, and the
//! Dear ImGui panels that show both.
//!
//! ## Key Components
//!
//! - [`TreeItem`] - one tree-view row mirroring a node, with its resolved icon
//! - [`Selection`] - selected rows, resolved to nodes on every query
//! - [`panel`] - scene tree, property and viewport panels
//!
//! ## Refresh protocol
//!
//! The projection does not observe the tree. After a structural change call
//! [`TreeItem::refresh_children`] on the item whose children changed (or on the
//! root item to rebuild everything). Title and property edits need no refresh:
//! rows read labels from the node when drawn.
//!
//! ```no_run
//! use grape_sdk::resources::{register_builtin_icons, ResourceLoader};
//! use grape_sdk::scene::{Node, Scene};
//! use grape_sdk::ui::TreeItem;
//!
//! let mut resources = ResourceLoader::new();
//! register_builtin_icons(&mut resources);
//!
//! let mut scene = Scene::new("Level 1");
//! let mut tree = TreeItem::build_from(scene.root(), &resources).unwrap();
//!
//! scene.root_mut().children_mut().push(Node::group("Props"));
//! tree.refresh_children(scene.root(), &resources).unwrap();
//! ```

pub mod panel;
pub mod projection;
pub mod selection;

// Re-export main types
pub use panel::{property_panel, scene_tree_panel, viewport_panel, NodeTreeAction, PanelState};
pub use projection::{ProjectionError, TreeItem};
pub use selection::{SelectedRow, Selection, SelectionError};
