// src/renderer.rs
use eframe::egui::{self, Color32, Painter, Pos2, Rect, Shape};
use kurbo::{BezPath, Point};

use crate::canvas::{SketchCanvas, ToolMode};
use crate::config::LINE_WIDTH_PRESETS;
use crate::geometry::{self, to_pos2};
use crate::stroke::Stroke;

/// Transient visual for a gesture in progress. Never stored in history.
#[derive(Debug, Clone, PartialEq)]
pub struct StrokePreview {
    pub path: BezPath,
    pub width: f64,
    pub color: Color32,
}

/// What the tools panel asked for that the host has to handle itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelAction {
    ExportSvg,
    SaveSvg,
}

/// Paints a [`SketchCanvas`] and its controls. Holds no drawing state of
/// its own; everything is derived from the canvas each frame.
#[derive(Debug)]
pub struct Renderer {
    background: Color32,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer {
    pub fn new() -> Self {
        Self {
            background: Color32::WHITE,
        }
    }

    /// Renders the surface, committed strokes, preview and eraser cursor.
    ///
    /// `rect` is the screen area of the canvas; model coordinates are
    /// relative to its top-left corner.
    pub fn render(&self, painter: &Painter, rect: Rect, canvas: &SketchCanvas) {
        painter.rect_filled(rect, 0.0, self.background);

        for stroke in canvas.strokes() {
            painter.add(stroke_shape(stroke, rect.min));
        }

        if let Some(preview) = canvas.preview() {
            painter.add(path_shape(&preview.path, preview.width, preview.color, rect.min));
        }

        if let Some((center, radius)) = canvas.eraser_cursor() {
            painter.circle_stroke(
                offset(center, rect.min),
                radius as f32,
                egui::Stroke::new(1.0, Color32::DARK_RED),
            );
        }
    }

    /// Renders the tools panel
    pub fn render_tools_panel(&self, ui: &mut egui::Ui, canvas: &mut SketchCanvas) -> Option<PanelAction> {
        let mut action = None;

        ui.heading("Tools");
        ui.separator();

        ui.horizontal(|ui| {
            if ui.selectable_label(canvas.mode() == ToolMode::Draw, "🖌 Draw").clicked() {
                canvas.set_mode(ToolMode::Draw);
            }
            if ui.selectable_label(canvas.mode() == ToolMode::Erase, "⌫ Eraser").clicked() {
                canvas.set_mode(ToolMode::Erase);
            }
        });

        ui.separator();

        ui.label("Line width:");
        ui.horizontal(|ui| {
            let current = canvas.config().stroke.width;
            for (name, width) in LINE_WIDTH_PRESETS {
                if ui.selectable_label(current == width, name).clicked() {
                    canvas.set_stroke_width(width);
                }
            }
        });

        ui.horizontal(|ui| {
            ui.label("Color:");
            let mut color = canvas.config().stroke_style().color;
            if egui::color_picker::color_edit_button_srgba(ui, &mut color, egui::color_picker::Alpha::Opaque)
                .changed()
            {
                canvas.set_stroke_color(color);
            }
        });

        ui.separator();

        ui.horizontal(|ui| {
            if ui.add_enabled(canvas.can_undo(), egui::Button::new("Undo")).clicked() {
                canvas.undo();
            }
            if ui.add_enabled(canvas.can_redo(), egui::Button::new("Redo")).clicked() {
                canvas.redo();
            }
            if ui.add_enabled(!canvas.strokes().is_empty(), egui::Button::new("Clear")).clicked() {
                canvas.clear_all();
            }
        });

        let history = canvas.history();
        ui.label(format!("Undo stack size: {}", history.undo_stack().len()));
        ui.label(format!("Redo stack size: {}", history.redo_stack().len()));
        if let Some(last) = history.undo_stack().last() {
            ui.label(format!("Last action: {}", last.label()));
        }

        ui.separator();

        ui.horizontal(|ui| {
            if ui.button("Copy SVG").clicked() {
                action = Some(PanelAction::ExportSvg);
            }
            #[cfg(not(target_arch = "wasm32"))]
            if ui.button("Save SVG").clicked() {
                action = Some(PanelAction::SaveSvg);
            }
        });
        ui.weak("Drop an .svg file on the window to load it");

        action
    }
}

fn offset(point: Point, origin: Pos2) -> Pos2 {
    origin + to_pos2(point).to_vec2()
}

/// Shape for a committed stroke.
pub fn stroke_shape(stroke: &Stroke, origin: Pos2) -> Shape {
    let style = stroke.style();
    path_shape(stroke.path(), style.width, style.color, origin)
}

/// Flattened path, or a dot for a path that never leaves its start point.
pub fn path_shape(path: &BezPath, width: f64, color: Color32, origin: Pos2) -> Shape {
    let points = geometry::flatten_to_screen(path, origin);
    match points.len() {
        0 => Shape::Noop,
        1 => Shape::circle_filled(points[0], width as f32 / 2.0, color),
        _ => Shape::line(points, egui::Stroke::new(width as f32, color)),
    }
}
