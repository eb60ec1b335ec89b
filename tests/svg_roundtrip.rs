use egui::Color32;
use kurbo::{PathEl, Point};
use sketch_canvas::{SketchCanvas, SvgError};

fn draw(canvas: &mut SketchCanvas, points: &[(f64, f64)]) {
    canvas.begin_stroke(Point::new(points[0].0, points[0].1));
    for &(x, y) in &points[1..] {
        canvas.append_point(Point::new(x, y));
    }
    assert!(canvas.end_stroke().is_some());
}

fn sketch() -> SketchCanvas {
    let mut canvas = SketchCanvas::default();
    canvas.set_surface_size(640.0, 480.0);
    draw(&mut canvas, &[(10.0, 10.0), (33.3, 17.7), (61.0, 12.5), (90.0, 40.0)]);
    canvas.set_stroke_width(7.5);
    canvas.set_stroke_color(Color32::from_rgb(200, 30, 40));
    draw(&mut canvas, &[(100.0, 100.0), (120.0, 130.0)]);
    canvas
}

fn coords(el: &PathEl) -> Vec<f64> {
    let pts: Vec<Point> = match *el {
        PathEl::MoveTo(p) | PathEl::LineTo(p) => vec![p],
        PathEl::QuadTo(a, b) => vec![a, b],
        PathEl::CurveTo(a, b, c) => vec![a, b, c],
        PathEl::ClosePath => vec![],
    };
    pts.into_iter().flat_map(|p| [p.x, p.y]).collect()
}

#[test]
fn test_export_import_export_is_stable() {
    let original = sketch();
    let first = original.export_svg();

    let mut restored = SketchCanvas::default();
    restored.import_svg(&first).expect("exported document should import");
    let second = restored.export_svg();

    assert_eq!(restored.strokes().len(), original.strokes().len());
    assert_eq!(restored.config().surface, original.config().surface);
    for (a, b) in original.strokes().iter().zip(restored.strokes()) {
        assert_eq!(a.style(), b.style());
        assert_eq!(a.points().len(), b.points().len());
        let (ea, eb) = (a.path().elements(), b.path().elements());
        assert_eq!(ea.len(), eb.len());
        for (x, y) in ea.iter().zip(eb) {
            for (u, v) in coords(x).into_iter().zip(coords(y)) {
                assert!((u - v).abs() < 1e-6);
            }
        }
    }
    assert_eq!(first, second);
}

#[test]
fn test_export_skips_erased_strokes() {
    let mut canvas = sketch();
    canvas.erase_at(Point::new(110.0, 115.0), 5.0);
    let svg = canvas.export_svg();
    assert_eq!(svg.matches("<path").count(), 1);
    assert!(svg.contains(r#"width="640" height="480""#));
    assert!(svg.contains(r#"fill="none""#));
    assert!(!svg.contains("#c81e28"));
}

#[test]
fn test_import_resets_history() {
    let source = sketch().export_svg();
    let mut canvas = SketchCanvas::default();
    draw(&mut canvas, &[(0.0, 0.0), (1.0, 1.0)]);

    canvas.import_svg(&source).unwrap();
    assert_eq!(canvas.strokes().len(), 2);
    assert!(!canvas.can_undo());
    assert!(!canvas.can_redo());

    // Imported strokes erase like drawn ones
    assert_eq!(canvas.erase_at(Point::new(10.0, 10.0), 3.0).len(), 1);
    assert!(canvas.undo());
    assert_eq!(canvas.strokes().len(), 2);
}

#[test]
fn test_failed_import_leaves_store_unchanged() {
    let mut canvas = sketch();
    let before = canvas.strokes().to_vec();

    assert_eq!(canvas.import_svg("not a document"), Err(SvgError::MissingRoot));
    assert!(matches!(
        canvas.import_svg(r#"<svg width="10" height="10"><path d="M0 0 L5 5"/><path d="M1 1 K"/></svg>"#),
        Err(SvgError::InvalidPathData { index: 1, .. })
    ));

    assert_eq!(canvas.strokes(), &before[..]);
    assert!(canvas.can_undo());
    assert_eq!(canvas.config().surface.width, 640.0);
}

#[test]
fn test_import_skips_degenerate_paths() {
    let mut canvas = SketchCanvas::default();
    canvas
        .import_svg(r##"<svg width="100" height="100"><path d="M5 5"/><path d="M0 0 L10 10" stroke="#00ff00" stroke-width="2"/></svg>"##)
        .unwrap();
    assert_eq!(canvas.strokes().len(), 1);
    let style = canvas.strokes()[0].style();
    assert_eq!(style.color, Color32::from_rgb(0, 255, 0));
    assert_eq!(style.width, 2.0);
}
