// src/lib.rs
//! Grape SDK scene editor core
//!
//! A tree of typed scene nodes, a tree-view projection of it that is refreshed
//! on demand, a selection bridge from view rows back to nodes, and the Dear
//! ImGui panels that put them on screen.

pub mod app;
pub mod config;
pub mod error;
pub mod gfx;
pub mod logging;
pub mod prelude;
pub mod resources;
pub mod scene;
pub mod ui;

// Re-export main types for convenience
pub use app::EditorApp;
pub use error::EditorError;

/// Creates an editor with the default configuration
pub fn default() -> EditorApp {
    EditorApp::default()
}
