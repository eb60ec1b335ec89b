use super::{CommandError, CommandResult};
use crate::document::Document;
use crate::stroke::{Stroke, StrokeId};

/// An undoable change to the stroke store.
///
/// Every variant owns snapshots of the strokes it touches, so replaying it
/// never depends on what the live store has done to those strokes since.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// A stroke was committed at `index` (always the end of the store at the
    /// time it was drawn).
    AddStroke { stroke: Stroke, index: usize },

    /// A stroke was removed by the eraser from `index`.
    EraseStroke { stroke: Stroke, index: usize },

    /// The whole store was cleared; `strokes` is what it held, in order.
    ClearCanvas { strokes: Vec<Stroke> },
}

impl Command {
    /// Apply the command to the document.
    pub fn execute(&self, document: &mut Document) -> CommandResult {
        match self {
            Command::AddStroke { stroke, index } => insert_at(document, *index, stroke),
            Command::EraseStroke { stroke, index } => remove_at(document, *index, stroke.id()),
            Command::ClearCanvas { .. } => {
                document.take_strokes();
                Ok(())
            }
        }
    }

    /// Apply the inverse of the command to the document.
    pub fn undo(&self, document: &mut Document) -> CommandResult {
        match self {
            Command::AddStroke { stroke, index } => remove_at(document, *index, stroke.id()),
            Command::EraseStroke { stroke, index } => insert_at(document, *index, stroke),
            Command::ClearCanvas { strokes } => {
                if !document.is_empty() {
                    log::warn!(
                        "Restoring {} cleared strokes over {} live strokes",
                        strokes.len(),
                        document.len()
                    );
                }
                document.replace_strokes(strokes.clone());
                Ok(())
            }
        }
    }

    /// Short name for history displays.
    pub fn label(&self) -> &'static str {
        match self {
            Command::AddStroke { .. } => "Draw",
            Command::EraseStroke { .. } => "Erase",
            Command::ClearCanvas { .. } => "Clear",
        }
    }
}

fn insert_at(document: &mut Document, index: usize, stroke: &Stroke) -> CommandResult {
    let len = document.len();
    document
        .insert_stroke(index, stroke.clone())
        .map_err(|_| CommandError::IndexOutOfRange { index, len })
}

/// Remove the stroke with `id`, expected at `index`. Falls back to a search
/// by id when the position does not match.
fn remove_at(document: &mut Document, index: usize, id: StrokeId) -> CommandResult {
    let position = match document.get(index) {
        Some(stroke) if stroke.id() == id => index,
        _ => {
            let found = document.index_of(id).ok_or(CommandError::StrokeNotFound(id))?;
            log::warn!("Stroke {} expected at index {} but found at {}", id, index, found);
            found
        }
    };
    document.remove_stroke(position);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::SmoothingMode;
    use crate::stroke::StrokeStyle;
    use kurbo::Point;

    fn stroke_at(x: f64) -> Stroke {
        Stroke::new(
            vec![Point::new(x, 0.0), Point::new(x, 10.0)],
            StrokeStyle::default(),
            SmoothingMode::Polyline,
        )
    }

    #[test]
    fn test_erase_undo_restores_position() {
        let mut doc = Document::new();
        let (a, b, c) = (stroke_at(0.0), stroke_at(10.0), stroke_at(20.0));
        doc.add_stroke(a.clone());
        doc.add_stroke(b.clone());
        doc.add_stroke(c.clone());

        let cmd = Command::EraseStroke { stroke: b.clone(), index: 1 };
        cmd.execute(&mut doc).unwrap();
        assert_eq!(doc.strokes(), &[a.clone(), c.clone()]);

        cmd.undo(&mut doc).unwrap();
        assert_eq!(doc.strokes(), &[a, b, c]);
    }

    #[test]
    fn test_add_stroke_undo_finds_moved_stroke() {
        let mut doc = Document::new();
        let a = stroke_at(0.0);
        let b = stroke_at(10.0);
        doc.add_stroke(b.clone());
        doc.add_stroke(a.clone());

        // Recorded at index 0 but now sits at index 1
        let cmd = Command::AddStroke { stroke: a, index: 0 };
        cmd.undo(&mut doc).unwrap();
        assert_eq!(doc.strokes(), &[b]);
    }

    #[test]
    fn test_missing_stroke_is_an_error() {
        let mut doc = Document::new();
        let a = stroke_at(0.0);
        let cmd = Command::AddStroke { stroke: a.clone(), index: 0 };
        assert_eq!(cmd.undo(&mut doc), Err(CommandError::StrokeNotFound(a.id())));
    }

    #[test]
    fn test_insert_out_of_range_is_an_error() {
        let mut doc = Document::new();
        let cmd = Command::EraseStroke { stroke: stroke_at(0.0), index: 3 };
        assert_eq!(cmd.undo(&mut doc), Err(CommandError::IndexOutOfRange { index: 3, len: 0 }));
        assert!(doc.is_empty());
    }

    #[test]
    fn test_clear_round_trip() {
        let mut doc = Document::new();
        doc.add_stroke(stroke_at(0.0));
        doc.add_stroke(stroke_at(10.0));
        let before = doc.clone();

        let cmd = Command::ClearCanvas { strokes: before.strokes().to_vec() };
        cmd.execute(&mut doc).unwrap();
        assert!(doc.is_empty());
        cmd.undo(&mut doc).unwrap();
        assert_eq!(doc, before);
    }
}
