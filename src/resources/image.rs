//! Icon images used by the scene tree view

use imgui::TextureId;

use crate::gfx::Color;
use crate::scene::kinds::NodeKind;

use super::loader::ResourceLoader;

/// RGBA8 image, optionally uploaded to the imgui renderer
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
    /// Texture the host renderer registered for these pixels. Without one
    /// the tree view draws the average colour as a swatch.
    pub texture_id: Option<TextureId>,
}

impl Image {
    /// Creates an image from raw RGBA8 pixels
    ///
    /// Returns `None` when the pixel buffer does not match the dimensions.
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Option<Self> {
        if pixels.len() != (width as usize) * (height as usize) * 4 {
            return None;
        }

        Some(Self {
            width,
            height,
            pixels,
            texture_id: None,
        })
    }

    /// Creates a single-colour image
    pub fn solid(width: u32, height: u32, color: Color) -> Self {
        let rgba = color.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8);
        let pixels = rgba
            .iter()
            .copied()
            .cycle()
            .take((width as usize) * (height as usize) * 4)
            .collect();

        Self {
            width,
            height,
            pixels,
            texture_id: None,
        }
    }

    /// Builder pattern: attaches the renderer's texture for this image
    pub fn with_texture_id(mut self, texture_id: TextureId) -> Self {
        self.texture_id = Some(texture_id);
        self
    }

    /// Average colour, drawn as the row swatch in the scene tree
    pub fn average_color(&self) -> Color {
        let count = (self.pixels.len() / 4).max(1) as f32;
        let mut sum = [0.0_f32; 4];
        for px in self.pixels.chunks_exact(4) {
            for (acc, channel) in sum.iter_mut().zip(px) {
                *acc += *channel as f32 / 255.0;
            }
        }
        sum.map(|c| c / count)
    }
}

/// Edge length of the generated tree icons
pub const TREE_ICON_SIZE: u32 = 16;

/// Registers a tinted placeholder icon for every built-in node variant
pub fn register_builtin_icons(loader: &mut ResourceLoader) {
    for (key, tint) in [
        (NodeKind::ROOT_ICON, [0.55, 0.75, 0.35, 1.0]),
        (NodeKind::GROUP_ICON, [0.85, 0.70, 0.30, 1.0]),
        (NodeKind::RECTANGLE_ICON, [0.30, 0.55, 0.90, 1.0]),
        (NodeKind::CIRCLE_ICON, [0.35, 0.80, 0.80, 1.0]),
        (NodeKind::LIGHT_ICON, [1.00, 0.90, 0.40, 1.0]),
        (NodeKind::LABEL_ICON, [0.80, 0.80, 0.80, 1.0]),
    ] {
        loader.register(key, Image::solid(TREE_ICON_SIZE, TREE_ICON_SIZE, tint));
    }
    log::debug!("Registered built-in tree icons");
}
