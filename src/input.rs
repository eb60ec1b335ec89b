use egui::{Event, PointerButton, Pos2, Rect, TouchPhase};
use kurbo::Point;

/// Pointer id used for the mouse (and pens reported as a mouse).
pub const MOUSE_POINTER_ID: u64 = 0;

/// Touch ids are offset so they never collide with the mouse.
const TOUCH_POINTER_BASE: u64 = 1;

/// What happened to a pointer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Down,
    Move,
    Up,
    /// The pointer left the drawing surface while pressed.
    Leave,
    /// The platform aborted the contact.
    Cancel,
}

/// A normalized pointer event in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub position: Point,
    pub pointer_id: u64,
    /// False for every contact that arrives while another is already down.
    pub is_primary: bool,
}

impl PointerEvent {
    pub fn new(kind: PointerKind, position: Point, pointer_id: u64, is_primary: bool) -> Self {
        Self {
            kind,
            position,
            pointer_id,
            is_primary,
        }
    }

    /// Event from the primary mouse button.
    pub fn mouse(kind: PointerKind, x: f64, y: f64) -> Self {
        Self::new(kind, Point::new(x, y), MOUSE_POINTER_ID, true)
    }
}

/// Converts raw egui input into [`PointerEvent`]s relative to the canvas.
///
/// egui also reports the first touch as emulated mouse input; those
/// duplicates are dropped while any touch is active.
#[derive(Debug)]
pub struct InputHandler {
    canvas_rect: Rect,
    mouse_down: bool,
    active_touches: Vec<u64>,
}

impl InputHandler {
    pub fn new(canvas_rect: Rect) -> Self {
        Self {
            canvas_rect,
            mouse_down: false,
            active_touches: Vec::new(),
        }
    }

    /// Update the canvas rectangle (e.g. if window is resized)
    pub fn set_canvas_rect(&mut self, rect: Rect) {
        self.canvas_rect = rect;
    }

    fn to_canvas(&self, pos: Pos2) -> Point {
        let local = pos - self.canvas_rect.min;
        Point::new(local.x as f64, local.y as f64)
    }

    /// Process this frame's raw egui input.
    pub fn process_input(&mut self, ctx: &egui::Context) -> Vec<PointerEvent> {
        let events = ctx.input(|input| input.raw.events.clone());
        self.translate(&events)
    }

    pub fn translate(&mut self, events: &[Event]) -> Vec<PointerEvent> {
        let mut out = Vec::new();
        for event in events {
            match event {
                Event::Touch { id, phase, pos, .. } => self.handle_touch(id.0, *phase, *pos, &mut out),
                _ if !self.active_touches.is_empty() => {}
                Event::PointerButton {
                    pos,
                    button: PointerButton::Primary,
                    pressed,
                    ..
                } => {
                    if *pressed {
                        if self.canvas_rect.contains(*pos) {
                            self.mouse_down = true;
                            out.push(self.mouse_event(PointerKind::Down, *pos));
                        }
                    } else if self.mouse_down {
                        self.mouse_down = false;
                        out.push(self.mouse_event(PointerKind::Up, *pos));
                    }
                }
                Event::PointerMoved(pos) if self.mouse_down => {
                    if self.canvas_rect.contains(*pos) {
                        out.push(self.mouse_event(PointerKind::Move, *pos));
                    } else {
                        self.mouse_down = false;
                        out.push(self.mouse_event(PointerKind::Leave, *pos));
                    }
                }
                Event::PointerGone if self.mouse_down => {
                    self.mouse_down = false;
                    out.push(PointerEvent::new(
                        PointerKind::Leave,
                        Point::ZERO,
                        MOUSE_POINTER_ID,
                        true,
                    ));
                }
                _ => {}
            }
        }
        out
    }

    fn mouse_event(&self, kind: PointerKind, pos: Pos2) -> PointerEvent {
        PointerEvent::new(kind, self.to_canvas(pos), MOUSE_POINTER_ID, true)
    }

    fn handle_touch(&mut self, touch_id: u64, phase: TouchPhase, pos: Pos2, out: &mut Vec<PointerEvent>) {
        let pointer_id = TOUCH_POINTER_BASE + touch_id;
        let position = self.to_canvas(pos);
        match phase {
            TouchPhase::Start => {
                if self.active_touches.is_empty() && !self.canvas_rect.contains(pos) {
                    return;
                }
                let is_primary = self.active_touches.is_empty();
                if !self.active_touches.contains(&touch_id) {
                    self.active_touches.push(touch_id);
                }
                out.push(PointerEvent::new(PointerKind::Down, position, pointer_id, is_primary));
            }
            TouchPhase::Move => {
                if let Some(index) = self.active_touches.iter().position(|id| *id == touch_id) {
                    out.push(PointerEvent::new(PointerKind::Move, position, pointer_id, index == 0));
                }
            }
            TouchPhase::End | TouchPhase::Cancel => {
                if let Some(index) = self.active_touches.iter().position(|id| *id == touch_id) {
                    self.active_touches.remove(index);
                    let kind = if phase == TouchPhase::End {
                        PointerKind::Up
                    } else {
                        PointerKind::Cancel
                    };
                    out.push(PointerEvent::new(kind, position, pointer_id, index == 0));
                }
            }
        }
    }
}
