use egui::Color32;
use kurbo::Point;

use crate::command::{Command, CommandHistory};
use crate::config::{color_to_hex, DrawingConfig, SurfaceSize};
use crate::document::Document;
use crate::geometry::{self, hit_testing};
use crate::input::{PointerEvent, PointerKind};
use crate::renderer::StrokePreview;
use crate::stroke::{MutableStroke, Stroke, StrokeId, StrokeStyle};
use crate::svg::{self, SvgError};

/// What a pointer gesture does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToolMode {
    #[default]
    Draw,
    Erase,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CanvasState {
    Idle,
    Drawing,
}

/// Gesture in progress. Erase gestures keep their trail for the preview
/// only; their effect is applied as the pointer moves.
#[derive(Debug, Clone)]
enum Gesture {
    Draw(MutableStroke),
    Erase(MutableStroke),
}

/// The drawing session: stroke store, history and the gesture in progress.
///
/// One instance is created per drawing surface and handed to whatever
/// needs it (input translation, rendering, the app shell).
#[derive(Debug, Clone)]
pub struct SketchCanvas {
    config: DrawingConfig,
    document: Document,
    history: CommandHistory,
    mode: ToolMode,
    gesture: Option<Gesture>,
    /// Pointer that owns the current gesture, when driven by pointer events.
    active_pointer: Option<u64>,
}

impl Default for SketchCanvas {
    fn default() -> Self {
        Self::new(DrawingConfig::default())
    }
}

impl SketchCanvas {
    pub fn new(config: DrawingConfig) -> Self {
        Self {
            config,
            document: Document::new(),
            history: CommandHistory::new(),
            mode: ToolMode::Draw,
            gesture: None,
            active_pointer: None,
        }
    }

    pub fn config(&self) -> &DrawingConfig {
        &self.config
    }

    /// Live strokes in paint order.
    pub fn strokes(&self) -> &[Stroke] {
        self.document.strokes()
    }

    pub fn history(&self) -> &CommandHistory {
        &self.history
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn mode(&self) -> ToolMode {
        self.mode
    }

    pub fn state(&self) -> CanvasState {
        if self.gesture.is_some() {
            CanvasState::Drawing
        } else {
            CanvasState::Idle
        }
    }

    pub fn is_drawing(&self) -> bool {
        self.state() == CanvasState::Drawing
    }

    /// Switch between drawing and erasing. A stroke in progress is
    /// committed first.
    pub fn set_mode(&mut self, mode: ToolMode) {
        if mode == self.mode {
            return;
        }
        self.finish_gesture();
        log::debug!("Tool mode {:?} -> {:?}", self.mode, mode);
        self.mode = mode;
    }

    pub fn toggle_eraser(&mut self) {
        let mode = match self.mode {
            ToolMode::Draw => ToolMode::Erase,
            ToolMode::Erase => ToolMode::Draw,
        };
        self.set_mode(mode);
    }

    /// Width for strokes started from now on.
    pub fn set_stroke_width(&mut self, width: f64) {
        if !width.is_finite() || width <= 0.0 {
            log::warn!("Ignoring invalid stroke width {}", width);
            return;
        }
        self.config.stroke.width = width;
    }

    /// Color for strokes started from now on.
    pub fn set_stroke_color(&mut self, color: Color32) {
        self.config.stroke.color = color_to_hex(color);
    }

    pub fn set_eraser_width(&mut self, width: f64) {
        if !width.is_finite() || width <= 0.0 {
            log::warn!("Ignoring invalid eraser width {}", width);
            return;
        }
        self.config.eraser.width = width;
    }

    pub fn set_surface_size(&mut self, width: f64, height: f64) {
        if width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0 {
            self.config.surface = SurfaceSize { width, height };
        }
    }

    // ---------------------------------------------------------------------
    // Stroke capture

    /// Start a stroke at `point`. Ignored while another gesture is in
    /// progress or when the point is not finite.
    pub fn begin_stroke(&mut self, point: Point) {
        if !geometry::is_valid_point(point) {
            log::warn!("Ignoring invalid point {:?} at stroke start", point);
            return;
        }
        if self.gesture.is_some() {
            log::debug!("begin_stroke while a gesture is in progress; ignored");
            return;
        }
        self.gesture = Some(Gesture::Draw(MutableStroke::new(point, self.config.stroke_style())));
    }

    /// Add a point to the stroke in progress.
    pub fn append_point(&mut self, point: Point) {
        if !geometry::is_valid_point(point) {
            log::warn!("Ignoring invalid point {:?}", point);
            return;
        }
        match &mut self.gesture {
            Some(Gesture::Draw(stroke)) => stroke.add_point(point),
            _ => log::debug!("append_point without a stroke in progress; ignored"),
        }
    }

    /// Finish the stroke in progress and commit it.
    ///
    /// Gestures with fewer than two points are dropped without touching the
    /// store or the history.
    pub fn end_stroke(&mut self) -> Option<Stroke> {
        let current = match self.gesture.take() {
            Some(Gesture::Draw(stroke)) => stroke,
            other => {
                self.gesture = other;
                return None;
            }
        };
        self.active_pointer = None;

        if current.points().len() < 2 {
            log::debug!("Discarding stroke with {} point(s)", current.points().len());
            return None;
        }

        let stroke = current.into_stroke(self.config.smoothing);
        let index = self.document.len();
        if !self.apply(Command::AddStroke {
            stroke: stroke.clone(),
            index,
        }) {
            return None;
        }
        log::info!("Committed stroke {} with {} points", stroke.id(), stroke.points().len());
        Some(stroke)
    }

    /// Drop the gesture in progress without committing anything.
    pub fn cancel_stroke(&mut self) {
        if self.gesture.take().is_some() {
            log::debug!("Gesture cancelled");
        }
        self.active_pointer = None;
    }

    // ---------------------------------------------------------------------
    // Erasing

    /// Remove every live stroke touched by an eraser disk at `point`.
    ///
    /// Each removal is recorded separately with the index it had, highest
    /// index first, so undoing them one by one restores the original order.
    /// Returns the removed strokes in their former paint order.
    pub fn erase_at(&mut self, point: Point, radius: f64) -> Vec<Stroke> {
        if !geometry::is_valid_point(point) || !radius.is_finite() || radius <= 0.0 {
            log::warn!("Ignoring erase at {:?} with radius {}", point, radius);
            return Vec::new();
        }

        let mut erased = Vec::new();
        for index in (0..self.document.len()).rev() {
            let Some(stroke) = self
                .document
                .get(index)
                .filter(|stroke| hit_testing::intersects(stroke, point, radius))
                .cloned()
            else {
                continue;
            };
            if self.apply(Command::EraseStroke {
                stroke: stroke.clone(),
                index,
            }) {
                log::info!("Erased stroke {} at index {}", stroke.id(), index);
                erased.push(stroke);
            }
        }
        erased.reverse();
        erased
    }

    fn begin_erase(&mut self, point: Point) {
        if !geometry::is_valid_point(point) {
            log::warn!("Ignoring invalid point {:?} at erase start", point);
            return;
        }
        if self.gesture.is_some() {
            return;
        }
        let trail_style = StrokeStyle {
            width: self.config.eraser.width,
            color: self.config.eraser_preview_color(),
        };
        self.gesture = Some(Gesture::Erase(MutableStroke::new(point, trail_style)));
        self.erase_at(point, self.config.eraser.width);
    }

    fn continue_erase(&mut self, point: Point) {
        if !geometry::is_valid_point(point) {
            log::warn!("Ignoring invalid point {:?}", point);
            return;
        }
        if let Some(Gesture::Erase(trail)) = &mut self.gesture {
            trail.add_point(point);
            self.erase_at(point, self.config.eraser.width);
        }
    }

    /// Finish whatever gesture is in progress: strokes are committed, an
    /// erase gesture simply ends.
    fn finish_gesture(&mut self) {
        match self.gesture {
            Some(Gesture::Draw(_)) => {
                self.end_stroke();
            }
            Some(Gesture::Erase(_)) => self.cancel_stroke(),
            None => {}
        }
        self.active_pointer = None;
    }

    // ---------------------------------------------------------------------
    // Whole-canvas operations

    /// Remove all strokes as one undoable action. A stroke in progress is
    /// committed first. Returns false when there was nothing to clear.
    pub fn clear_all(&mut self) -> bool {
        self.finish_gesture();
        if self.document.is_empty() {
            return false;
        }
        let strokes = self.document.strokes().to_vec();
        let count = strokes.len();
        if !self.apply(Command::ClearCanvas { strokes }) {
            return false;
        }
        log::info!("Cleared {} strokes", count);
        true
    }

    /// Run `command` against the store and record it.
    fn apply(&mut self, command: Command) -> bool {
        let label = command.label();
        match self.history.execute(command, &mut self.document) {
            Ok(()) => true,
            Err(err) => {
                log::error!("{} command failed: {}", label, err);
                false
            }
        }
    }

    /// Start over: no strokes, no history.
    pub fn reset(&mut self) {
        self.cancel_stroke();
        self.document.take_strokes();
        self.history.clear();
    }

    /// Undo the most recent action. Returns false when there was nothing to
    /// undo or the history could not be replayed.
    pub fn undo(&mut self) -> bool {
        match self.history.undo(&mut self.document) {
            Ok(undone) => undone,
            Err(err) => {
                log::error!("Undo failed: {}", err);
                false
            }
        }
    }

    /// Redo the most recently undone action.
    pub fn redo(&mut self) -> bool {
        match self.history.redo(&mut self.document) {
            Ok(redone) => redone,
            Err(err) => {
                log::error!("Redo failed: {}", err);
                false
            }
        }
    }

    // ---------------------------------------------------------------------
    // Vector documents

    /// Serialize the live strokes into an SVG document sized to the surface.
    pub fn export_svg(&self) -> String {
        svg::write_document(self.document.strokes(), self.config.surface)
    }

    /// Replace the store with the strokes of an exported document and clear
    /// the history. On error nothing changes.
    pub fn import_svg(&mut self, source: &str) -> Result<(), SvgError> {
        let parsed = svg::parse_document(source, self.config.stroke_style())?;

        let mut strokes = Vec::with_capacity(parsed.paths.len());
        for (index, svg_path) in parsed.paths.into_iter().enumerate() {
            let points = svg_path.points();
            if points.len() < 2 {
                log::warn!("Skipping path {} with {} point(s)", index, points.len());
                continue;
            }
            strokes.push(Stroke::from_parts(StrokeId::new(), points, svg_path.path, svg_path.style));
        }

        self.reset();
        if let Some(size) = parsed.size {
            self.set_surface_size(size.width, size.height);
        }
        log::info!("Imported {} strokes", strokes.len());
        self.document.replace_strokes(strokes);
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Pointer state machine

    /// Drive the canvas from a normalized pointer event. Returns true when
    /// the visible state may have changed.
    pub fn handle_pointer_event(&mut self, event: PointerEvent) -> bool {
        match event.kind {
            PointerKind::Down => {
                if self.gesture.is_some() {
                    if self.active_pointer != Some(event.pointer_id) {
                        // A second contact while drawing: treat it as a palm and
                        // throw the gesture away.
                        log::debug!("Contact {} during a gesture; rejecting it", event.pointer_id);
                        self.cancel_stroke();
                        return true;
                    }
                    return false;
                }
                if !event.is_primary {
                    return false;
                }
                match self.mode {
                    ToolMode::Draw => self.begin_stroke(event.position),
                    ToolMode::Erase => self.begin_erase(event.position),
                }
                if self.gesture.is_some() {
                    self.active_pointer = Some(event.pointer_id);
                }
                true
            }
            PointerKind::Move => {
                if !self.owns(event.pointer_id) {
                    return false;
                }
                match self.gesture {
                    Some(Gesture::Draw(_)) => self.append_point(event.position),
                    Some(Gesture::Erase(_)) => self.continue_erase(event.position),
                    None => return false,
                }
                true
            }
            PointerKind::Up | PointerKind::Leave | PointerKind::Cancel => {
                if !self.owns(event.pointer_id) {
                    return false;
                }
                self.finish_gesture();
                true
            }
        }
    }

    fn owns(&self, pointer_id: u64) -> bool {
        self.gesture.is_some() && self.active_pointer == Some(pointer_id)
    }

    /// Live visual for the gesture in progress: the raw polyline, drawn a
    /// little wider than the final stroke.
    pub fn preview(&self) -> Option<StrokePreview> {
        match self.gesture.as_ref()? {
            Gesture::Draw(stroke) => Some(StrokePreview {
                path: stroke.preview_path(),
                width: stroke.style().width * 1.3,
                color: self.config.stroke_preview_color(),
            }),
            Gesture::Erase(trail) => Some(StrokePreview {
                path: trail.preview_path(),
                width: trail.style().width * 1.2,
                color: trail.style().color,
            }),
        }
    }

    /// Position and radius of the eraser while erasing.
    pub fn eraser_cursor(&self) -> Option<(Point, f64)> {
        match self.gesture.as_ref()? {
            Gesture::Erase(trail) => Some((trail.last_point()?, self.config.eraser.width)),
            Gesture::Draw(_) => None,
        }
    }
}
