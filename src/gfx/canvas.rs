//! Drawing context handed to scene nodes
//!
//! Nodes only ever see `&mut dyn Canvas`; whether the commands end up in an
//! imgui draw list or in a [`RecordingCanvas`] is the renderer's business.

use cgmath::Vector2;

/// RGBA colour, components in `0.0..=1.0`
pub type Color = [f32; 4];

/// Renderer context a node draws itself onto
pub trait Canvas {
    fn fill_rect(&mut self, min: Vector2<f32>, max: Vector2<f32>, color: Color);

    fn stroke_rect(&mut self, min: Vector2<f32>, max: Vector2<f32>, color: Color, thickness: f32);

    fn fill_circle(&mut self, center: Vector2<f32>, radius: f32, color: Color);

    fn stroke_circle(&mut self, center: Vector2<f32>, radius: f32, color: Color, thickness: f32);

    fn line(&mut self, from: Vector2<f32>, to: Vector2<f32>, color: Color, thickness: f32);

    fn text(&mut self, position: Vector2<f32>, color: Color, text: &str);
}

/// A single recorded drawing command
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    FillRect {
        min: Vector2<f32>,
        max: Vector2<f32>,
        color: Color,
    },
    StrokeRect {
        min: Vector2<f32>,
        max: Vector2<f32>,
        color: Color,
        thickness: f32,
    },
    FillCircle {
        center: Vector2<f32>,
        radius: f32,
        color: Color,
    },
    StrokeCircle {
        center: Vector2<f32>,
        radius: f32,
        color: Color,
        thickness: f32,
    },
    Line {
        from: Vector2<f32>,
        to: Vector2<f32>,
        color: Color,
        thickness: f32,
    },
    Text {
        position: Vector2<f32>,
        color: Color,
        text: String,
    },
}

/// Canvas that stores every command instead of rasterising it
#[derive(Debug, Default, Clone)]
pub struct RecordingCanvas {
    pub commands: Vec<DrawCommand>,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl Canvas for RecordingCanvas {
    fn fill_rect(&mut self, min: Vector2<f32>, max: Vector2<f32>, color: Color) {
        self.commands.push(DrawCommand::FillRect { min, max, color });
    }

    fn stroke_rect(&mut self, min: Vector2<f32>, max: Vector2<f32>, color: Color, thickness: f32) {
        self.commands.push(DrawCommand::StrokeRect {
            min,
            max,
            color,
            thickness,
        });
    }

    fn fill_circle(&mut self, center: Vector2<f32>, radius: f32, color: Color) {
        self.commands.push(DrawCommand::FillCircle {
            center,
            radius,
            color,
        });
    }

    fn stroke_circle(&mut self, center: Vector2<f32>, radius: f32, color: Color, thickness: f32) {
        self.commands.push(DrawCommand::StrokeCircle {
            center,
            radius,
            color,
            thickness,
        });
    }

    fn line(&mut self, from: Vector2<f32>, to: Vector2<f32>, color: Color, thickness: f32) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            color,
            thickness,
        });
    }

    fn text(&mut self, position: Vector2<f32>, color: Color, text: &str) {
        self.commands.push(DrawCommand::Text {
            position,
            color,
            text: text.to_string(),
        });
    }
}
