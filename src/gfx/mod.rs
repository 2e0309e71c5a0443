//! # Graphics Module
//!
//! Everything between a scene node's `draw` call and the screen.
//!
//! - **Canvas** ([`canvas`]) - the drawing context nodes emit commands against
//! - **Viewport** ([`viewport`]) - world/screen mapping, redraw requests, picking
//! - **imgui backend** ([`imgui_canvas`]) - canvas backed by an imgui draw list
//!
//! ## Usage
//!
//! ```no_run
//! use grape_sdk::gfx::{RecordingCanvas, Viewport};
//! use grape_sdk::scene::Scene;
//! use grape_sdk::ui::Selection;
//!
//! let scene = Scene::new("Level 1");
//! let mut viewport = Viewport::default();
//! let mut canvas = RecordingCanvas::new();
//! viewport.render(&scene, &Selection::new(), &mut canvas);
//! ```

pub mod canvas;
pub mod imgui_canvas;
pub mod viewport;

// Re-export commonly used types
pub use canvas::{Canvas, Color, DrawCommand, RecordingCanvas};
pub use imgui_canvas::ImguiCanvas;
pub use viewport::{Viewport, ViewportCanvas};
