use crate::stroke::{Stroke, StrokeId};

/// Ordered store of committed strokes. Order is paint order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    strokes: Vec<Stroke>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    pub fn len(&self) -> usize {
        self.strokes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Stroke> {
        self.strokes.get(index)
    }

    pub fn index_of(&self, id: StrokeId) -> Option<usize> {
        self.strokes.iter().position(|s| s.id() == id)
    }

    pub fn add_stroke(&mut self, stroke: Stroke) {
        self.strokes.push(stroke);
    }

    /// Insert at `index`; returns the stroke back if `index > len`.
    pub fn insert_stroke(&mut self, index: usize, stroke: Stroke) -> Result<(), Stroke> {
        if index > self.strokes.len() {
            return Err(stroke);
        }
        self.strokes.insert(index, stroke);
        Ok(())
    }

    pub fn remove_stroke(&mut self, index: usize) -> Option<Stroke> {
        if index < self.strokes.len() {
            Some(self.strokes.remove(index))
        } else {
            None
        }
    }

    /// Remove every stroke, handing them back in order.
    pub fn take_strokes(&mut self) -> Vec<Stroke> {
        std::mem::take(&mut self.strokes)
    }

    pub fn replace_strokes(&mut self, strokes: Vec<Stroke>) {
        self.strokes = strokes;
    }
}
