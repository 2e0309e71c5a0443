//! # Grape SDK Prelude
//!
//! Commonly used types and traits in one import.
//!
//! ```no_run
//! use grape_sdk::prelude::*;
//!
//! fn main() -> anyhow::Result<()> {
//!     let mut app = grape_sdk::default();
//!     app.new_scene()?;
//!
//!     let props = app.add_node(&NodePath::root(), Node::group("Props"))?;
//!     app.add_node(&props, Node::rectangle("Crate", RectangleShape::new(vec2(0.0, 0.0), vec2(32.0, 32.0))))?;
//!     app.select(props)?;
//!
//!     println!("{}", app.selected_node()?.title());
//!     Ok(())
//! }
//! ```

// Re-export core application types
pub use crate::app::EditorApp;
pub use crate::config::EditorConfig;
pub use crate::default;
pub use crate::error::{EditorError, Result};

// Re-export scene types
pub use crate::scene::{
    Bounds, CircleShape, Drawable, Node, NodeId, NodeKind, NodePath, PointLight, RectangleShape, Scene,
    TextLabel,
};

// Re-export graphics and resources
pub use crate::gfx::{Canvas, Color, RecordingCanvas, Viewport};
pub use crate::resources::{Image, ResourceLoader};

// Re-export UI types
pub use crate::ui::{NodeTreeAction, Selection, TreeItem};

// Re-export common external dependencies
pub use cgmath::{vec2, Vector2};
pub use imgui::Ui;
