//! # Scene Module
//!
//! The authoritative scene model: a tree of polymorphic, drawable nodes owned
//! by a single root per open scene.
//!
//! ## Key Components
//!
//! - [`Node`] - title, icon key, visibility, variant data and owned children
//! - [`NodeKind`] - the closed set of variants (root, group, shapes, light, label)
//! - [`Drawable`] - the draw contract every variant fulfils
//! - [`NodePath`] - positional address of a node below a root
//! - [`Scene`] - container holding exactly one root node
//! - [`persistence`] - JSON scene files
//!
//! ## Mutation contract
//!
//! The tree is changed only through [`Node::children_mut`], [`Node::set_title`]
//! and the variant setters. Nothing observes those writes: whoever mutates the
//! tree must refresh the affected tree projection and request a viewport
//! redraw (see [`crate::app::EditorApp`], which does both at every mutation site).
//!
//! ```no_run
//! use grape_sdk::scene::{Node, NodePath, Scene};
//!
//! let mut scene = Scene::new("Level 1");
//! scene.root_mut().children_mut().push(Node::group("Enemies"));
//! assert_eq!(scene.node_at(&NodePath::root().child(0)).unwrap().title(), "Enemies");
//! ```

pub mod kinds;
pub mod node;
pub mod persistence;
#[allow(clippy::module_inception)]
pub mod scene;
pub mod tree;

// Re-export main types
pub use kinds::{Bounds, CircleShape, Drawable, NodeKind, PointLight, RectangleShape, TextLabel};
pub use node::{Node, NodeId};
pub use persistence::{load_scene, save_scene, SceneError};
pub use scene::{Scene, SceneStatistics};
pub use tree::{InvariantViolation, NodePath};
