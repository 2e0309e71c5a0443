//! [`Canvas`] implementation on top of an imgui window draw list

use cgmath::Vector2;
use imgui::DrawListMut;

use super::canvas::{Canvas, Color};

const CIRCLE_SEGMENTS: u32 = 32;

/// Forwards drawing commands to the current imgui window's draw list
pub struct ImguiCanvas<'a> {
    draw_list: &'a DrawListMut<'a>,
}

impl<'a> ImguiCanvas<'a> {
    pub fn new(draw_list: &'a DrawListMut<'a>) -> Self {
        Self { draw_list }
    }
}

fn point(v: Vector2<f32>) -> [f32; 2] {
    [v.x, v.y]
}

impl Canvas for ImguiCanvas<'_> {
    fn fill_rect(&mut self, min: Vector2<f32>, max: Vector2<f32>, color: Color) {
        self.draw_list
            .add_rect(point(min), point(max), color)
            .filled(true)
            .build();
    }

    fn stroke_rect(&mut self, min: Vector2<f32>, max: Vector2<f32>, color: Color, thickness: f32) {
        self.draw_list
            .add_rect(point(min), point(max), color)
            .thickness(thickness)
            .build();
    }

    fn fill_circle(&mut self, center: Vector2<f32>, radius: f32, color: Color) {
        self.draw_list
            .add_circle(point(center), radius, color)
            .num_segments(CIRCLE_SEGMENTS)
            .filled(true)
            .build();
    }

    fn stroke_circle(&mut self, center: Vector2<f32>, radius: f32, color: Color, thickness: f32) {
        self.draw_list
            .add_circle(point(center), radius, color)
            .num_segments(CIRCLE_SEGMENTS)
            .thickness(thickness)
            .build();
    }

    fn line(&mut self, from: Vector2<f32>, to: Vector2<f32>, color: Color, thickness: f32) {
        self.draw_list
            .add_line(point(from), point(to), color)
            .thickness(thickness)
            .build();
    }

    fn text(&mut self, position: Vector2<f32>, color: Color, text: &str) {
        self.draw_list.add_text(point(position), color, text);
    }
}
