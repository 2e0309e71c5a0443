//! Scene viewport: world/screen mapping, redraw requests and picking

use cgmath::{vec2, Vector2};

use crate::scene::{NodePath, Scene};
use crate::ui::selection::Selection;

use super::canvas::{Canvas, Color};

const HIGHLIGHT_COLOR: Color = [1.0, 0.6, 0.1, 1.0];
const HIGHLIGHT_THICKNESS: f32 = 2.0;
const HIGHLIGHT_PADDING: f32 = 3.0;

/// Canvas adapter that maps world coordinates onto the screen
///
/// `screen = origin + world * scale`. Line thickness stays in screen pixels.
pub struct ViewportCanvas<'a> {
    inner: &'a mut dyn Canvas,
    origin: Vector2<f32>,
    scale: f32,
}

impl<'a> ViewportCanvas<'a> {
    pub fn new(inner: &'a mut dyn Canvas, origin: Vector2<f32>, scale: f32) -> Self {
        Self {
            inner,
            origin,
            scale,
        }
    }

    fn map(&self, world: Vector2<f32>) -> Vector2<f32> {
        self.origin + world * self.scale
    }
}

impl Canvas for ViewportCanvas<'_> {
    fn fill_rect(&mut self, min: Vector2<f32>, max: Vector2<f32>, color: Color) {
        let (min, max) = (self.map(min), self.map(max));
        self.inner.fill_rect(min, max, color);
    }

    fn stroke_rect(&mut self, min: Vector2<f32>, max: Vector2<f32>, color: Color, thickness: f32) {
        let (min, max) = (self.map(min), self.map(max));
        self.inner.stroke_rect(min, max, color, thickness);
    }

    fn fill_circle(&mut self, center: Vector2<f32>, radius: f32, color: Color) {
        let center = self.map(center);
        self.inner.fill_circle(center, radius * self.scale, color);
    }

    fn stroke_circle(&mut self, center: Vector2<f32>, radius: f32, color: Color, thickness: f32) {
        let center = self.map(center);
        self.inner
            .stroke_circle(center, radius * self.scale, color, thickness);
    }

    fn line(&mut self, from: Vector2<f32>, to: Vector2<f32>, color: Color, thickness: f32) {
        let (from, to) = (self.map(from), self.map(to));
        self.inner.line(from, to, color, thickness);
    }

    fn text(&mut self, position: Vector2<f32>, color: Color, text: &str) {
        let position = self.map(position);
        self.inner.text(position, color, text);
    }
}

/// 2D viewport onto the open scene
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    origin: Vector2<f32>,
    scale: f32,
    redraw_requested: bool,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(vec2(480.0, 480.0), 1.0)
    }
}

impl Viewport {
    /// Creates a viewport; a non-positive `scale` falls back to `1.0`
    pub fn new(origin: Vector2<f32>, scale: f32) -> Self {
        Self {
            origin,
            scale: if scale > 0.0 { scale } else { 1.0 },
            redraw_requested: true,
        }
    }

    pub fn origin(&self) -> Vector2<f32> {
        self.origin
    }

    pub fn set_origin(&mut self, origin: Vector2<f32>) {
        self.origin = origin;
        self.request_redraw();
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Sets the zoom factor. Non-positive or non-finite values are ignored.
    ///
    /// Returns whether the scale was applied.
    pub fn set_scale(&mut self, scale: f32) -> bool {
        if !(scale.is_finite() && scale > 0.0) {
            log::warn!("Ignoring invalid viewport scale {}", scale);
            return false;
        }
        self.scale = scale;
        self.request_redraw();
        true
    }

    /// Marks the viewport dirty; the next frame runs a draw pass
    pub fn request_redraw(&mut self) {
        self.redraw_requested = true;
    }

    pub fn redraw_requested(&self) -> bool {
        self.redraw_requested
    }

    pub fn world_to_screen(&self, world: Vector2<f32>) -> Vector2<f32> {
        self.origin + world * self.scale
    }

    pub fn screen_to_world(&self, screen: Vector2<f32>) -> Vector2<f32> {
        (screen - self.origin) / self.scale
    }

    /// Runs one draw pass of `scene` onto `target` and outlines the selection
    ///
    /// Returns the number of nodes drawn.
    pub fn render(&mut self, scene: &Scene, selection: &Selection, target: &mut dyn Canvas) -> usize {
        let mut canvas = ViewportCanvas::new(target, self.origin, self.scale);
        let drawn = scene.draw(&mut canvas);

        if let Ok(node) = selection.get_selected(scene) {
            if let Some(bounds) = node.bounds() {
                let pad = vec2(HIGHLIGHT_PADDING, HIGHLIGHT_PADDING) / self.scale;
                canvas.stroke_rect(
                    bounds.min - pad,
                    bounds.max + pad,
                    HIGHLIGHT_COLOR,
                    HIGHLIGHT_THICKNESS,
                );
            }
        }

        self.redraw_requested = false;
        log::debug!("Viewport drew {} nodes", drawn);
        drawn
    }

    /// Finds the top-most visible node under a screen position
    ///
    /// Later nodes in draw order are on top, so the last hit wins.
    pub fn pick(&self, scene: &Scene, screen: Vector2<f32>) -> Option<NodePath> {
        let world = self.screen_to_world(screen);
        let mut hit = None;
        scene.visit_visible(|path, node| {
            if node.bounds().is_some_and(|b| b.contains(world)) {
                hit = Some(path.clone());
            }
        });
        hit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::canvas::{DrawCommand, RecordingCanvas};
    use crate::scene::kinds::{CircleShape, RectangleShape};
    use crate::scene::Node;

    fn scene_with_shapes() -> Scene {
        let mut scene = Scene::new("Test");
        scene.root_mut().children_mut().push(Node::rectangle(
            "Box",
            RectangleShape::new(vec2(0.0, 0.0), vec2(10.0, 10.0)),
        ));
        scene.root_mut().children_mut().push(Node::circle(
            "Ball",
            CircleShape::new(vec2(5.0, 5.0), 2.0),
        ));
        scene
    }

    #[test]
    fn test_viewport_canvas_maps_coordinates() {
        let mut recorder = RecordingCanvas::new();
        {
            let mut canvas = ViewportCanvas::new(&mut recorder, vec2(100.0, 50.0), 2.0);
            canvas.fill_circle(vec2(1.0, 1.0), 3.0, [1.0; 4]);
        }
        assert_eq!(
            recorder.commands[0],
            DrawCommand::FillCircle {
                center: vec2(102.0, 52.0),
                radius: 6.0,
                color: [1.0; 4],
            }
        );
    }

    #[test]
    fn test_render_clears_redraw_request() {
        let scene = scene_with_shapes();
        let mut viewport = Viewport::default();
        assert!(viewport.redraw_requested());

        let mut recorder = RecordingCanvas::new();
        let drawn = viewport.render(&scene, &Selection::new(), &mut recorder);

        assert_eq!(drawn, 3);
        assert!(!viewport.redraw_requested());
        assert!(!recorder.is_empty());
    }

    #[test]
    fn test_render_outlines_selection() {
        let scene = scene_with_shapes();
        let mut viewport = Viewport::new(vec2(0.0, 0.0), 1.0);

        let mut plain = RecordingCanvas::new();
        viewport.render(&scene, &Selection::new(), &mut plain);

        let mut selection = Selection::new();
        let path = NodePath::root().child(0);
        selection.select(path.clone(), scene.node_at(&path).unwrap().id());
        let mut highlighted = RecordingCanvas::new();
        viewport.render(&scene, &selection, &mut highlighted);

        assert_eq!(highlighted.len(), plain.len() + 1);
        assert!(matches!(
            highlighted.commands.last(),
            Some(DrawCommand::StrokeRect { color, .. }) if *color == HIGHLIGHT_COLOR
        ));
    }

    #[test]
    fn test_set_scale_rejects_invalid() {
        let mut viewport = Viewport::default();
        assert!(!viewport.set_scale(0.0));
        assert!(!viewport.set_scale(-2.0));
        assert!(!viewport.set_scale(f32::NAN));
        assert_eq!(viewport.scale(), 1.0);
        assert!(viewport.set_scale(2.5));
        assert_eq!(viewport.scale(), 2.5);
    }

    #[test]
    fn test_screen_world_roundtrip() {
        let viewport = Viewport::new(vec2(10.0, 20.0), 4.0);
        let world = vec2(3.0, -1.5);
        assert_eq!(viewport.screen_to_world(viewport.world_to_screen(world)), world);
    }

    #[test]
    fn test_pick_prefers_topmost() {
        let scene = scene_with_shapes();
        let viewport = Viewport::new(vec2(0.0, 0.0), 1.0);

        // Inside both the box and the ball; the ball is drawn later.
        assert_eq!(
            viewport.pick(&scene, vec2(5.0, 5.0)),
            Some(NodePath::root().child(1))
        );
        assert_eq!(
            viewport.pick(&scene, vec2(1.0, 1.0)),
            Some(NodePath::root().child(0))
        );
        assert_eq!(viewport.pick(&scene, vec2(50.0, 50.0)), None);
    }
}
