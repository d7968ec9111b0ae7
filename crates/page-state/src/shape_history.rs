//! Shape annotation history with single-step undo

use plotboard_shared::Shape;
use std::collections::VecDeque;

/// Displayed shape set plus every set reported so far
///
/// Each report is pushed as a snapshot. Undo drops the newest snapshot and
/// shows the one before it, or nothing once the history runs out. With a
/// limit the oldest snapshots are discarded first.
#[derive(Debug, Clone, Default)]
pub struct ShapeHistory {
    current: Vec<Shape>,
    snapshots: VecDeque<Vec<Shape>>,
    limit: Option<usize>,
}

impl ShapeHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bounded(limit: usize) -> Self {
        Self {
            limit: Some(limit.max(1)),
            ..Self::default()
        }
    }

    pub fn with_limit(limit: Option<usize>) -> Self {
        match limit {
            Some(limit) => Self::bounded(limit),
            None => Self::new(),
        }
    }

    /// Show `shapes` and remember them as the newest snapshot
    pub fn record(&mut self, shapes: Vec<Shape>) {
        self.current = shapes.clone();
        self.snapshots.push_back(shapes);

        if let Some(limit) = self.limit {
            while self.snapshots.len() > limit {
                self.snapshots.pop_front();
            }
        }
    }

    /// Step back one snapshot; false when there was nothing to undo
    pub fn undo(&mut self) -> bool {
        if self.snapshots.pop_back().is_none() {
            return false;
        }
        self.current = self.snapshots.back().cloned().unwrap_or_default();
        true
    }

    pub fn current(&self) -> &[Shape] {
        &self.current
    }

    pub fn depth(&self) -> usize {
        self.snapshots.len()
    }

    pub fn can_undo(&self) -> bool {
        !self.snapshots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plotboard_shared::ShapeKind;

    fn line(x: f64) -> Shape {
        Shape::boxed(ShapeKind::Line, x, 0.0, x, 1.0, "#000000")
    }

    #[test]
    fn test_undo_steps_back_one_snapshot() {
        let mut history = ShapeHistory::new();
        history.record(vec![line(0.1)]);
        history.record(vec![line(0.1), line(0.2)]);

        assert!(history.undo());
        assert_eq!(history.current(), &[line(0.1)]);

        assert!(history.undo());
        assert!(history.current().is_empty());

        assert!(!history.undo());
        assert!(history.current().is_empty());
        assert_eq!(history.depth(), 0);
    }

    #[test]
    fn test_identical_reports_are_separate_steps() {
        let mut history = ShapeHistory::new();
        history.record(vec![line(0.1)]);
        history.record(vec![line(0.1)]);
        assert_eq!(history.depth(), 2);

        history.undo();
        assert_eq!(history.current(), &[line(0.1)]);
    }

    #[test]
    fn test_bounded_drops_oldest() {
        let mut history = ShapeHistory::bounded(2);
        history.record(vec![line(0.1)]);
        history.record(vec![line(0.1), line(0.2)]);
        history.record(vec![line(0.1), line(0.2), line(0.3)]);
        assert_eq!(history.depth(), 2);

        history.undo();
        assert_eq!(history.current().len(), 2);
        history.undo();
        assert!(history.current().is_empty());
        assert!(!history.can_undo());
    }
}
