use crate::physics::Position;

/// Which canvas coordinate a graph series follows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

/// Chronological history of visited positions
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Trail {
    points: Vec<Position>,
}

impl Trail {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, p: Position) {
        self.points.push(p);
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[Position] {
        &self.points
    }

    /// `(index, coordinate)` pairs for one axis, index being the tick number
    pub fn series(&self, axis: Axis) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.points.iter().enumerate().map(move |(i, p)| {
            let c = match axis {
                Axis::X => p.x,
                Axis::Y => p.y,
            };
            (i as f64, c)
        })
    }
}
