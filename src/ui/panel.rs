// src/ui/panel.rs
//! Editor panels
//!
//! Scene tree, node tree bar, property editor and viewport host. Panels read
//! the scene and report what the user asked for; structural changes come back
//! as a [`NodeTreeAction`] so the caller can apply them and refresh the tree
//! projection in one place.

use cgmath::{vec2, Vector2};
use imgui::{Condition, TreeNodeFlags, Ui};

use crate::gfx::{ImguiCanvas, Viewport, ViewportCanvas};
use crate::resources::Image;
use crate::scene::{Node, NodeId, NodeKind, NodePath, Scene};

use super::projection::TreeItem;
use super::selection::Selection;

const ICON_SIZE: f32 = 14.0;

/// Structural edit requested from the node tree bar
#[derive(Debug, Clone, PartialEq)]
pub enum NodeTreeAction {
    /// Append a new node of `kind` to the children of `parent`
    Add { parent: NodePath, kind: NodeKind },
    /// Remove the node at this path together with its subtree
    Remove(NodePath),
    /// Rebuild the whole projection
    Refresh,
}

/// Widget state that lives across frames
#[derive(Debug, Default)]
pub struct PanelState {
    /// Index into [`NodeKind::insertable`] for the "Add" button
    pub add_kind_index: usize,
    title_buffer: String,
    title_buffer_owner: Option<NodeId>,
}

impl PanelState {
    /// Drops the title edit buffer so it is reloaded from the node next frame
    pub fn reset_title_buffer(&mut self) {
        self.title_buffer.clear();
        self.title_buffer_owner = None;
    }
}

/// Scene tree window with the node tree bar underneath
///
/// Clicking a row selects it, ctrl-click adds it to the selection. The tree
/// itself is never modified here.
///
/// # Arguments
/// * `ui` - ImGui UI context
/// * `scene` - Scene the projection was built from
/// * `projection` - Last refreshed tree projection
/// * `selection` - Selection updated by clicks
/// * `state` - Panel widget state
pub fn scene_tree_panel(
    ui: &Ui,
    scene: &Scene,
    projection: &TreeItem,
    selection: &mut Selection,
    state: &mut PanelState,
) -> Option<NodeTreeAction> {
    let display_size = ui.io().display_size;
    if display_size[0] <= 0.0 || display_size[1] <= 0.0 {
        return None;
    }
    let panel_width = (display_size[0] * 0.2).max(260.0);

    ui.window("Scene Nodes")
        .size([panel_width, display_size[1] * 0.5], Condition::FirstUseEver)
        .position([display_size[0] - panel_width - 10.0, 10.0], Condition::FirstUseEver)
        .resizable(true)
        .build(|| {
            ui.child_window("node_tree")
                .size([0.0, -40.0])
                .border(true)
                .build(|| render_tree_item(ui, scene, projection, selection));

            render_node_tree_bar(ui, scene, selection, state)
        })
        .flatten()
}

fn render_tree_item(ui: &Ui, scene: &Scene, item: &TreeItem, selection: &mut Selection) {
    let Some(node) = item.node(scene.root()) else {
        // Stale row: the tree changed and nobody refreshed yet.
        ui.text_disabled(format!("<missing {}>", item.path()));
        return;
    };

    render_icon(ui, item.icon());
    ui.same_line();

    let mut flags = TreeNodeFlags::OPEN_ON_ARROW | TreeNodeFlags::OPEN_ON_DOUBLE_CLICK;
    if item.children().is_empty() {
        flags |= TreeNodeFlags::LEAF;
    }
    if item.path().is_root() {
        flags |= TreeNodeFlags::DEFAULT_OPEN;
    }
    if selection.contains(item.id()) {
        flags |= TreeNodeFlags::SELECTED;
    }

    let label = if node.visible {
        format!("{}##{}", node.title(), item.path())
    } else {
        format!("{} (hidden)##{}", node.title(), item.path())
    };
    let token = ui.tree_node_config(&label).flags(flags).push();

    if ui.is_item_clicked() && !ui.is_item_toggled_open() {
        if ui.io().key_ctrl {
            selection.extend_item(item);
        } else {
            selection.select_item(item);
        }
    }

    if let Some(_token) = token {
        for child in item.children() {
            render_tree_item(ui, scene, child, selection);
        }
    }
}

/// Draws the icon texture in front of the row, or a colour swatch without one
fn render_icon(ui: &Ui, icon: &Image) {
    let [x, y] = ui.cursor_screen_pos();
    let (min, max) = ([x, y + 2.0], [x + ICON_SIZE, y + 2.0 + ICON_SIZE]);
    {
        let draw_list = ui.get_window_draw_list();
        match icon.texture_id {
            Some(texture_id) => draw_list.add_image(texture_id, min, max).build(),
            None => draw_list
                .add_rect(min, max, icon.average_color())
                .filled(true)
                .build(),
        }
    }
    ui.dummy([ICON_SIZE, ICON_SIZE]);
}

fn render_node_tree_bar(
    ui: &Ui,
    scene: &Scene,
    selection: &Selection,
    state: &mut PanelState,
) -> Option<NodeTreeAction> {
    let kinds = NodeKind::insertable();
    let names: Vec<&str> = kinds.iter().map(NodeKind::type_name).collect();
    state.add_kind_index = state.add_kind_index.min(kinds.len().saturating_sub(1));

    let mut action = None;

    ui.set_next_item_width(110.0);
    ui.combo_simple_string("##add_kind", &mut state.add_kind_index, &names);
    ui.same_line();
    if ui.button("Add") {
        let parent = selection
            .selected_path(scene)
            .unwrap_or_else(|_| NodePath::root());
        action = Some(NodeTreeAction::Add {
            parent,
            kind: kinds[state.add_kind_index].clone(),
        });
    }

    ui.same_line();
    let removable = selection
        .selected_path(scene)
        .ok()
        .filter(|path| !path.is_root());
    if ui.button("Remove") {
        match removable {
            Some(path) => action = Some(NodeTreeAction::Remove(path)),
            None => log::warn!("Nothing removable is selected"),
        }
    }

    ui.same_line();
    if ui.button("Refresh") {
        action = Some(NodeTreeAction::Refresh);
    }

    action
}

/// Property editor for the first selected node
///
/// Writes go straight to the node: the title through [`Node::set_title`],
/// variant fields through their setters. Titles are read live by the tree
/// view, so none of these writes needs a projection refresh.
///
/// # Returns
/// True if any property was written (the viewport should redraw)
pub fn property_panel(
    ui: &Ui,
    scene: &mut Scene,
    selection: &Selection,
    state: &mut PanelState,
) -> bool {
    let display_size = ui.io().display_size;
    if display_size[0] <= 0.0 || display_size[1] <= 0.0 {
        return false;
    }
    let panel_width = (display_size[0] * 0.2).max(260.0);

    ui.window("Properties")
        .size([panel_width, display_size[1] * 0.45], Condition::FirstUseEver)
        .position(
            [display_size[0] - panel_width - 10.0, display_size[1] * 0.5 + 20.0],
            Condition::FirstUseEver,
        )
        .resizable(true)
        .build(|| {
            if selection.is_empty() {
                ui.text_disabled("No node selected");
                return false;
            }
            let Ok(path) = selection.selected_path(scene) else {
                ui.text_disabled("Selection is out of date");
                return false;
            };
            let Ok(node) = selection.get_selected_mut(scene) else {
                ui.text_disabled("Selection is out of date");
                return false;
            };

            if state.title_buffer_owner != Some(node.id()) {
                state.title_buffer = node.title().to_string();
                state.title_buffer_owner = Some(node.id());
            }

            ui.text(format!("{} at {}", node.kind.type_name(), path));
            ui.separator();

            let mut changed = render_common_properties(ui, node, state);
            ui.spacing();
            changed |= render_kind_properties(ui, &mut node.kind);
            changed
        })
        .unwrap_or(false)
}

fn render_common_properties(ui: &Ui, node: &mut Node, state: &mut PanelState) -> bool {
    let mut changed = false;

    if ui
        .input_text("Title", &mut state.title_buffer)
        .enter_returns_true(true)
        .build()
    {
        if node.set_title(&state.title_buffer) {
            changed = true;
        } else {
            log::warn!("Rejected blank title for '{}'", node.title());
        }
        state.title_buffer = node.title().to_string();
    }

    changed |= ui.checkbox("Visible in Scene", &mut node.visible);
    ui.text_disabled(format!("Icon: {}", node.icon_key()));
    changed
}

fn edit_vector(ui: &Ui, label: &str, value: &mut Vector2<f32>) -> bool {
    let mut raw: [f32; 2] = (*value).into();
    if ui.input_float2(label, &mut raw).build() {
        *value = vec2(raw[0], raw[1]);
        return true;
    }
    false
}

fn render_kind_properties(ui: &Ui, kind: &mut NodeKind) -> bool {
    let mut changed = false;

    match kind {
        NodeKind::Root | NodeKind::Group => {
            ui.text_disabled("No editable properties");
        }
        NodeKind::Rectangle(shape) => {
            changed |= edit_vector(ui, "Position", &mut shape.position);
            let mut size = shape.size();
            if edit_vector(ui, "Size", &mut size) {
                shape.set_size(size);
                changed = true;
            }
            let mut color = shape.color();
            if ui.color_edit4("Color", &mut color) {
                shape.set_color(color);
                changed = true;
            }
            changed |= ui.checkbox("Filled", &mut shape.filled);
        }
        NodeKind::Circle(shape) => {
            changed |= edit_vector(ui, "Center", &mut shape.center);
            let mut radius = shape.radius();
            if ui.input_float("Radius", &mut radius).build() {
                shape.set_radius(radius);
                changed = true;
            }
            let mut color = shape.color();
            if ui.color_edit4("Color", &mut color) {
                shape.set_color(color);
                changed = true;
            }
            changed |= ui.checkbox("Filled", &mut shape.filled);
        }
        NodeKind::Light(light) => {
            changed |= edit_vector(ui, "Position", &mut light.position);
            let mut radius = light.radius();
            if ui.input_float("Radius", &mut radius).build() {
                light.set_radius(radius);
                changed = true;
            }
            let mut intensity = light.intensity();
            if ui.slider("Intensity", 0.0, 1.0, &mut intensity) {
                light.set_intensity(intensity);
                changed = true;
            }
            let mut color = light.color();
            if ui.color_edit4("Color", &mut color) {
                light.set_color(color);
                changed = true;
            }
        }
        NodeKind::Label(label) => {
            changed |= edit_vector(ui, "Position", &mut label.position);
            changed |= ui.input_text("Text", &mut label.text).build();
            let mut color = label.color();
            if ui.color_edit4("Color", &mut color) {
                label.set_color(color);
                changed = true;
            }
        }
    }

    changed
}

/// Viewport window hosting the scene draw pass
///
/// # Returns
/// Path of the node under a left click, if any
pub fn viewport_panel(
    ui: &Ui,
    scene: &Scene,
    selection: &Selection,
    viewport: &mut Viewport,
) -> Option<NodePath> {
    let display_size = ui.io().display_size;
    if display_size[0] <= 0.0 || display_size[1] <= 0.0 {
        return None;
    }

    ui.window("Viewport")
        .size([display_size[0] * 0.6, display_size[1] * 0.8], Condition::FirstUseEver)
        .position([10.0, 10.0], Condition::FirstUseEver)
        .build(|| {
            let [x, y] = ui.cursor_screen_pos();
            let window_origin = vec2(x, y);
            let avail = ui.content_region_avail();

            {
                let draw_list = ui.get_window_draw_list();
                let mut imgui_canvas = ImguiCanvas::new(&draw_list);
                let mut screen = ViewportCanvas::new(&mut imgui_canvas, window_origin, 1.0);
                viewport.render(scene, selection, &mut screen);
            }

            if ui.invisible_button("viewport_area", [avail[0].max(1.0), avail[1].max(1.0)]) {
                let [mx, my] = ui.io().mouse_pos;
                return viewport.pick(scene, vec2(mx, my) - window_origin);
            }
            None
        })
        .flatten()
}
