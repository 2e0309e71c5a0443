//! Concrete node variants and the drawing contract they fulfil

use cgmath::{vec2, Vector2};
use serde::{Deserialize, Serialize};

use crate::gfx::{Canvas, Color};

/// Something that can put itself on a [`Canvas`]
///
/// `draw` is called once per redraw pass for every visible node. It only emits
/// commands; it never touches the tree (it gets `&self`).
pub trait Drawable {
    fn draw(&self, canvas: &mut dyn Canvas);

    /// World-space extent, if the variant has one
    fn bounds(&self) -> Option<Bounds> {
        None
    }
}

/// Axis-aligned world-space box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Vector2<f32>,
    pub max: Vector2<f32>,
}

impl Bounds {
    pub fn new(min: Vector2<f32>, max: Vector2<f32>) -> Self {
        Self {
            min: vec2(min.x.min(max.x), min.y.min(max.y)),
            max: vec2(min.x.max(max.x), min.y.max(max.y)),
        }
    }

    pub fn around(center: Vector2<f32>, radius: f32) -> Self {
        let r = vec2(radius, radius);
        Self::new(center - r, center + r)
    }

    pub fn contains(&self, point: Vector2<f32>) -> bool {
        point.x >= self.min.x && point.x <= self.max.x && point.y >= self.min.y && point.y <= self.max.y
    }
}

fn clamp_color(color: Color) -> Color {
    color.map(|c| c.clamp(0.0, 1.0))
}

const DEFAULT_SHAPE_COLOR: Color = [0.8, 0.8, 0.8, 1.0];
const OUTLINE_THICKNESS: f32 = 1.0;

/// Axis-aligned rectangle, `position` is the top-left corner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RectangleShape {
    pub position: Vector2<f32>,
    size: Vector2<f32>,
    color: Color,
    pub filled: bool,
}

impl RectangleShape {
    pub fn new(position: Vector2<f32>, size: Vector2<f32>) -> Self {
        Self {
            position,
            size: vec2(size.x.max(0.0), size.y.max(0.0)),
            color: DEFAULT_SHAPE_COLOR,
            filled: true,
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.set_color(color);
        self
    }

    pub fn size(&self) -> Vector2<f32> {
        self.size
    }

    /// Negative components are clamped to zero
    pub fn set_size(&mut self, size: Vector2<f32>) {
        self.size = vec2(size.x.max(0.0), size.y.max(0.0));
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = clamp_color(color);
    }
}

impl Drawable for RectangleShape {
    fn draw(&self, canvas: &mut dyn Canvas) {
        let max = self.position + self.size;
        if self.filled {
            canvas.fill_rect(self.position, max, self.color);
        } else {
            canvas.stroke_rect(self.position, max, self.color, OUTLINE_THICKNESS);
        }
    }

    fn bounds(&self) -> Option<Bounds> {
        Some(Bounds::new(self.position, self.position + self.size))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircleShape {
    pub center: Vector2<f32>,
    radius: f32,
    color: Color,
    pub filled: bool,
}

impl CircleShape {
    pub fn new(center: Vector2<f32>, radius: f32) -> Self {
        Self {
            center,
            radius: radius.max(0.0),
            color: DEFAULT_SHAPE_COLOR,
            filled: true,
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.set_color(color);
        self
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn set_radius(&mut self, radius: f32) {
        self.radius = radius.max(0.0);
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = clamp_color(color);
    }
}

impl Drawable for CircleShape {
    fn draw(&self, canvas: &mut dyn Canvas) {
        if self.filled {
            canvas.fill_circle(self.center, self.radius, self.color);
        } else {
            canvas.stroke_circle(self.center, self.radius, self.color, OUTLINE_THICKNESS);
        }
    }

    fn bounds(&self) -> Option<Bounds> {
        Some(Bounds::around(self.center, self.radius))
    }
}

const LIGHT_BULB_RADIUS: f32 = 4.0;

/// Point light. Draws its bulb, a falloff ring faded by intensity and a
/// radius tick from the bulb to the ring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointLight {
    pub position: Vector2<f32>,
    radius: f32,
    color: Color,
    intensity: f32,
}

impl PointLight {
    pub fn new(position: Vector2<f32>, radius: f32) -> Self {
        Self {
            position,
            radius: radius.max(0.0),
            color: [1.0, 0.95, 0.8, 1.0],
            intensity: 1.0,
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.set_color(color);
        self
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn set_radius(&mut self, radius: f32) {
        self.radius = radius.max(0.0);
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = clamp_color(color);
    }

    pub fn intensity(&self) -> f32 {
        self.intensity
    }

    /// Clamped to `0.0..=1.0`
    pub fn set_intensity(&mut self, intensity: f32) {
        self.intensity = intensity.clamp(0.0, 1.0);
    }
}

impl Drawable for PointLight {
    fn draw(&self, canvas: &mut dyn Canvas) {
        canvas.fill_circle(self.position, LIGHT_BULB_RADIUS, self.color);

        let mut falloff = self.color;
        falloff[3] *= self.intensity;
        canvas.stroke_circle(self.position, self.radius, falloff, OUTLINE_THICKNESS);
        canvas.line(
            self.position,
            self.position + vec2(self.radius, 0.0),
            falloff,
            OUTLINE_THICKNESS,
        );
    }

    fn bounds(&self) -> Option<Bounds> {
        Some(Bounds::around(
            self.position,
            self.radius.max(LIGHT_BULB_RADIUS),
        ))
    }
}

// Rough glyph box used for label bounds; the real font lives in the renderer.
const APPROX_GLYPH_WIDTH: f32 = 7.0;
const APPROX_LINE_HEIGHT: f32 = 13.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextLabel {
    pub position: Vector2<f32>,
    pub text: String,
    color: Color,
}

impl TextLabel {
    pub fn new(position: Vector2<f32>, text: impl Into<String>) -> Self {
        Self {
            position,
            text: text.into(),
            color: [1.0, 1.0, 1.0, 1.0],
        }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = clamp_color(color);
    }
}

impl Drawable for TextLabel {
    fn draw(&self, canvas: &mut dyn Canvas) {
        canvas.text(self.position, self.color, &self.text);
    }

    fn bounds(&self) -> Option<Bounds> {
        let width = self.text.chars().count() as f32 * APPROX_GLYPH_WIDTH;
        Some(Bounds::new(
            self.position,
            self.position + vec2(width, APPROX_LINE_HEIGHT),
        ))
    }
}

/// The closed set of node variants known to the editor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NodeKind {
    /// Top of a scene; never nested
    Root,
    /// Pure container
    Group,
    Rectangle(RectangleShape),
    Circle(CircleShape),
    Light(PointLight),
    Label(TextLabel),
}

impl NodeKind {
    pub const ROOT_ICON: &'static str = "image.node.root";
    pub const GROUP_ICON: &'static str = "image.node.group";
    pub const RECTANGLE_ICON: &'static str = "image.node.rectangle";
    pub const CIRCLE_ICON: &'static str = "image.node.circle";
    pub const LIGHT_ICON: &'static str = "image.node.light";
    pub const LABEL_ICON: &'static str = "image.node.label";

    /// One default-configured instance of every variant
    pub fn defaults() -> Vec<NodeKind> {
        vec![
            NodeKind::Root,
            NodeKind::Group,
            NodeKind::Rectangle(RectangleShape::new(vec2(0.0, 0.0), vec2(64.0, 64.0))),
            NodeKind::Circle(CircleShape::new(vec2(0.0, 0.0), 32.0)),
            NodeKind::Light(PointLight::new(vec2(0.0, 0.0), 128.0)),
            NodeKind::Label(TextLabel::new(vec2(0.0, 0.0), "Text")),
        ]
    }

    /// Variants a user may add below an existing node
    pub fn insertable() -> Vec<NodeKind> {
        Self::defaults()
            .into_iter()
            .filter(|kind| !kind.is_root())
            .collect()
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            NodeKind::Root => "Root",
            NodeKind::Group => "Group",
            NodeKind::Rectangle(_) => "Rectangle",
            NodeKind::Circle(_) => "Circle",
            NodeKind::Light(_) => "Light",
            NodeKind::Label(_) => "Label",
        }
    }

    /// Title used when a node is created without a usable one
    pub fn default_title(&self) -> &'static str {
        self.type_name()
    }

    pub fn default_icon_key(&self) -> &'static str {
        match self {
            NodeKind::Root => Self::ROOT_ICON,
            NodeKind::Group => Self::GROUP_ICON,
            NodeKind::Rectangle(_) => Self::RECTANGLE_ICON,
            NodeKind::Circle(_) => Self::CIRCLE_ICON,
            NodeKind::Light(_) => Self::LIGHT_ICON,
            NodeKind::Label(_) => Self::LABEL_ICON,
        }
    }

    pub fn is_root(&self) -> bool {
        matches!(self, NodeKind::Root)
    }
}

impl Drawable for NodeKind {
    fn draw(&self, canvas: &mut dyn Canvas) {
        match self {
            NodeKind::Root | NodeKind::Group => {}
            NodeKind::Rectangle(shape) => shape.draw(canvas),
            NodeKind::Circle(shape) => shape.draw(canvas),
            NodeKind::Light(light) => light.draw(canvas),
            NodeKind::Label(label) => label.draw(canvas),
        }
    }

    fn bounds(&self) -> Option<Bounds> {
        match self {
            NodeKind::Root | NodeKind::Group => None,
            NodeKind::Rectangle(shape) => shape.bounds(),
            NodeKind::Circle(shape) => shape.bounds(),
            NodeKind::Light(light) => light.bounds(),
            NodeKind::Label(label) => label.bounds(),
        }
    }
}
