use super::action::Direction;
use super::grid::Position;

/// Paint used when a cell is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SegmentColor {
    /// The player's snake
    Red,
    /// The robot snake
    Blue,
    /// The goal block
    Green,
}

/// One occupied grid cell of a snake's body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub pos: Position,
    pub color: SegmentColor,
}

impl Segment {
    pub fn new(pos: Position, color: SegmentColor) -> Self {
        Self { pos, color }
    }

    /// Shift one cell in `direction`
    pub fn move_by(&mut self, direction: Direction) {
        self.pos = self.pos.moved_in_direction(direction);
    }

    pub fn same_position(&self, other: &Segment) -> bool {
        self.pos == other.pos
    }

    /// Lower bounds are inclusive, upper bounds exclusive.
    pub fn within_bounds(&self, min_x: i32, min_y: i32, max_x: i32, max_y: i32) -> bool {
        self.pos.x >= min_x && self.pos.y >= min_y && self.pos.x < max_x && self.pos.y < max_y
    }
}
