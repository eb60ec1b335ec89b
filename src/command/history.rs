use super::{Command, CommandResult};
use crate::document::Document;

/// Manages the history of executed commands for undo/redo functionality
#[derive(Debug, Clone, Default)]
pub struct CommandHistory {
    /// Stack of commands that can be undone
    undo_stack: Vec<Command>,
    /// Stack of commands that can be redone
    redo_stack: Vec<Command>,
}

impl CommandHistory {
    /// Creates a new empty command history
    pub fn new() -> Self {
        Self::default()
    }

    /// Execute a command and add it to the history if successful
    pub fn execute(&mut self, command: Command, document: &mut Document) -> CommandResult {
        command.execute(document)?;
        self.record(command);
        Ok(())
    }

    /// Push a command whose effect is already applied.
    fn record(&mut self, command: Command) {
        log::debug!("Recording {} command", command.label());
        self.undo_stack.push(command);
        self.redo_stack.clear();
    }

    /// Undo the last executed command. Returns `Ok(false)` when there was
    /// nothing to undo.
    ///
    /// On error the command stays on the undo stack and the document is
    /// left as it was.
    pub fn undo(&mut self, document: &mut Document) -> CommandResult<bool> {
        let Some(command) = self.undo_stack.pop() else {
            return Ok(false);
        };
        if let Err(err) = command.undo(document) {
            self.undo_stack.push(command);
            return Err(err);
        }
        self.redo_stack.push(command);
        Ok(true)
    }

    /// Redo the last undone command. Returns `Ok(false)` when there was
    /// nothing to redo.
    pub fn redo(&mut self, document: &mut Document) -> CommandResult<bool> {
        let Some(command) = self.redo_stack.pop() else {
            return Ok(false);
        };
        if let Err(err) = command.execute(document) {
            self.redo_stack.push(command);
            return Err(err);
        }
        self.undo_stack.push(command);
        Ok(true)
    }

    /// Returns true if there are commands that can be undone
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Returns true if there are commands that can be redone
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_stack(&self) -> &[Command] {
        &self.undo_stack
    }

    pub fn redo_stack(&self) -> &[Command] {
        &self.redo_stack
    }

    /// Clear the command history
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::SmoothingMode;
    use crate::stroke::{Stroke, StrokeStyle};
    use kurbo::Point;

    fn add(document: &Document, x: f64) -> Command {
        let stroke = Stroke::new(
            vec![Point::new(x, 0.0), Point::new(x + 5.0, 5.0)],
            StrokeStyle::default(),
            SmoothingMode::Polyline,
        );
        Command::AddStroke { stroke, index: document.len() }
    }

    #[test]
    fn test_empty_history_is_noop() {
        let mut history = CommandHistory::new();
        let mut doc = Document::new();
        assert_eq!(history.undo(&mut doc), Ok(false));
        assert_eq!(history.redo(&mut doc), Ok(false));
        assert!(doc.is_empty());
    }

    #[test]
    fn test_undo_redo_moves_between_stacks() {
        let mut history = CommandHistory::new();
        let mut doc = Document::new();
        let cmd = add(&doc, 0.0);
        history.execute(cmd, &mut doc).unwrap();
        assert_eq!(doc.len(), 1);

        assert_eq!(history.undo(&mut doc), Ok(true));
        assert!(doc.is_empty());
        assert!(!history.can_undo());
        assert!(history.can_redo());

        assert_eq!(history.redo(&mut doc), Ok(true));
        assert_eq!(doc.len(), 1);
        assert!(history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_new_command_clears_redo() {
        let mut history = CommandHistory::new();
        let mut doc = Document::new();
        history.execute(add(&doc, 0.0), &mut doc).unwrap();
        history.undo(&mut doc).unwrap();
        assert!(history.can_redo());

        history.execute(add(&doc, 20.0), &mut doc).unwrap();
        assert!(!history.can_redo());
        assert_eq!(history.undo_stack().len(), 1);
    }

    #[test]
    fn test_failed_undo_keeps_command() {
        let mut history = CommandHistory::new();
        let mut doc = Document::new();
        history.execute(add(&doc, 0.0), &mut doc).unwrap();
        doc.take_strokes();

        assert!(history.undo(&mut doc).is_err());
        assert_eq!(history.undo_stack().len(), 1);
        assert!(history.redo_stack().is_empty());
    }
}
