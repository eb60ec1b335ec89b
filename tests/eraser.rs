use kurbo::Point;
use sketch_canvas::{Command, PointerEvent, PointerKind, SketchCanvas, ToolMode};

fn draw(canvas: &mut SketchCanvas, points: &[(f64, f64)]) {
    canvas.begin_stroke(Point::new(points[0].0, points[0].1));
    for &(x, y) in &points[1..] {
        canvas.append_point(Point::new(x, y));
    }
    assert!(canvas.end_stroke().is_some());
}

fn touch(kind: PointerKind, x: f64, y: f64, pointer_id: u64, is_primary: bool) -> PointerEvent {
    PointerEvent::new(kind, Point::new(x, y), pointer_id, is_primary)
}

#[test]
fn test_erase_restores_original_index() {
    let mut canvas = SketchCanvas::default();
    draw(&mut canvas, &[(0.0, 0.0), (5.0, 5.0), (10.0, 10.0)]);
    draw(&mut canvas, &[(200.0, 200.0), (250.0, 220.0)]);
    let first = canvas.strokes()[0].clone();
    let second = canvas.strokes()[1].id();

    let erased = canvas.erase_at(Point::new(5.0, 5.0), 10.0);
    assert_eq!(erased, vec![first.clone()]);
    assert_eq!(canvas.strokes().len(), 1);
    assert_eq!(canvas.strokes()[0].id(), second);
    assert!(matches!(
        canvas.history().undo_stack().last(),
        Some(Command::EraseStroke { index: 0, .. })
    ));

    assert!(canvas.undo());
    assert_eq!(canvas.strokes().len(), 2);
    assert_eq!(canvas.strokes()[0], first);
    assert_eq!(canvas.strokes()[1].id(), second);
}

#[test]
fn test_erase_miss_leaves_history_alone() {
    let mut canvas = SketchCanvas::default();
    draw(&mut canvas, &[(0.0, 0.0), (10.0, 0.0)]);
    canvas.undo();
    canvas.redo();
    canvas.undo();
    assert!(canvas.can_redo());

    assert!(canvas.erase_at(Point::new(500.0, 500.0), 10.0).is_empty());
    assert!(canvas.can_redo());
}

#[test]
fn test_multi_erase_undo_restores_order() {
    let mut canvas = SketchCanvas::default();
    draw(&mut canvas, &[(0.0, 50.0), (100.0, 50.0)]);
    draw(&mut canvas, &[(300.0, 300.0), (350.0, 350.0)]);
    draw(&mut canvas, &[(50.0, 0.0), (50.0, 100.0)]);
    let before: Vec<_> = canvas.strokes().iter().map(|s| s.id()).collect();

    let erased = canvas.erase_at(Point::new(50.0, 50.0), 5.0);
    let erased_ids: Vec<_> = erased.iter().map(|s| s.id()).collect();
    assert_eq!(erased_ids, vec![before[0], before[2]]);
    assert_eq!(canvas.strokes().len(), 1);
    assert_eq!(canvas.history().undo_stack().len(), 5);

    canvas.undo();
    canvas.undo();
    let after: Vec<_> = canvas.strokes().iter().map(|s| s.id()).collect();
    assert_eq!(after, before);

    canvas.redo();
    canvas.redo();
    assert_eq!(canvas.strokes().len(), 1);
    assert_eq!(canvas.strokes()[0].id(), before[1]);
}

#[test]
fn test_erase_gesture_through_pointer_events() {
    let mut canvas = SketchCanvas::default();
    draw(&mut canvas, &[(0.0, 0.0), (100.0, 0.0)]);
    draw(&mut canvas, &[(0.0, 100.0), (100.0, 100.0)]);
    canvas.set_mode(ToolMode::Erase);

    assert!(canvas.handle_pointer_event(PointerEvent::mouse(PointerKind::Down, 50.0, 40.0)));
    assert_eq!(canvas.strokes().len(), 2);
    assert!(canvas.eraser_cursor().is_some());

    canvas.handle_pointer_event(PointerEvent::mouse(PointerKind::Move, 50.0, 95.0));
    assert_eq!(canvas.strokes().len(), 1);

    canvas.handle_pointer_event(PointerEvent::mouse(PointerKind::Move, 50.0, 2.0));
    assert!(canvas.strokes().is_empty());

    canvas.handle_pointer_event(PointerEvent::mouse(PointerKind::Up, 50.0, 2.0));
    assert!(!canvas.is_drawing());
    assert!(canvas.eraser_cursor().is_none());

    canvas.undo();
    canvas.undo();
    assert_eq!(canvas.strokes().len(), 2);
    assert_eq!(canvas.strokes()[0].points()[0], Point::new(0.0, 0.0));
}

#[test]
fn test_second_contact_rejects_stroke() {
    let mut canvas = SketchCanvas::default();
    canvas.handle_pointer_event(touch(PointerKind::Down, 10.0, 10.0, 1, true));
    canvas.handle_pointer_event(touch(PointerKind::Move, 20.0, 20.0, 1, true));
    canvas.handle_pointer_event(touch(PointerKind::Move, 30.0, 30.0, 1, true));
    assert!(canvas.is_drawing());

    // Palm lands
    assert!(canvas.handle_pointer_event(touch(PointerKind::Down, 200.0, 200.0, 2, false)));
    assert!(!canvas.is_drawing());
    assert!(canvas.preview().is_none());

    // The rest of both contacts does nothing
    assert!(!canvas.handle_pointer_event(touch(PointerKind::Move, 40.0, 40.0, 1, true)));
    assert!(!canvas.handle_pointer_event(touch(PointerKind::Up, 40.0, 40.0, 1, true)));
    assert!(!canvas.handle_pointer_event(touch(PointerKind::Up, 200.0, 200.0, 2, false)));

    assert!(canvas.strokes().is_empty());
    assert!(!canvas.can_undo());
}

#[test]
fn test_leave_and_cancel_end_the_gesture() {
    let mut canvas = SketchCanvas::default();
    canvas.handle_pointer_event(PointerEvent::mouse(PointerKind::Down, 0.0, 0.0));
    canvas.handle_pointer_event(PointerEvent::mouse(PointerKind::Move, 10.0, 0.0));
    canvas.handle_pointer_event(PointerEvent::mouse(PointerKind::Leave, 10.0, 0.0));
    assert!(!canvas.is_drawing());
    assert_eq!(canvas.strokes().len(), 1);

    canvas.handle_pointer_event(touch(PointerKind::Down, 0.0, 0.0, 3, true));
    canvas.handle_pointer_event(touch(PointerKind::Cancel, 0.0, 0.0, 3, true));
    assert!(!canvas.is_drawing());
    assert_eq!(canvas.strokes().len(), 1);
}

#[test]
fn test_non_primary_down_while_idle_is_ignored() {
    let mut canvas = SketchCanvas::default();
    assert!(!canvas.handle_pointer_event(touch(PointerKind::Down, 5.0, 5.0, 4, false)));
    assert!(!canvas.is_drawing());
}
