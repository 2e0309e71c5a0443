//! # Resource Module
//!
//! Keyed lookup of editor resources. Scene nodes reference their tree icons by
//! key and resolve them here on every request.
//!
//! - [`ResourceLoader`] - typed key/value resource table
//! - [`Image`] - RGBA icon image resolved for scene tree rows

pub mod image;
pub mod loader;

pub use image::{register_builtin_icons, Image};
pub use loader::{ResourceError, ResourceKey, ResourceLoader};
