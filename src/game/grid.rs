use rand::Rng;

use super::action::Direction;

/// A position on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }
}

/// Where a cell sits on the outermost ring of the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edge {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    Top,
    Bottom,
    Left,
    Right,
}

/// The discrete playing field, measured in cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    pub num_cols: usize,
    pub num_rows: usize,
}

impl Grid {
    pub fn new(num_cols: usize, num_rows: usize) -> Self {
        Self { num_cols, num_rows }
    }

    /// Check if a position is within the grid bounds
    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.x < self.num_cols as i32 && pos.y >= 0 && pos.y < self.num_rows as i32
    }

    /// The cell the player's snake starts from
    pub fn center(&self) -> Position {
        Position::new((self.num_cols / 2) as i32, (self.num_rows / 2) as i32)
    }

    /// Draw a cell uniformly from `[offset, dim - 1 - offset]` on each axis,
    /// where `offset` is 1 when the perimeter is excluded.
    ///
    /// An axis too narrow to leave an interior falls back to its full range.
    pub fn random_cell<R: Rng + ?Sized>(&self, rng: &mut R, exclude_perimeter: bool) -> Position {
        let offset = usize::from(exclude_perimeter);
        Position::new(
            Self::random_coord(rng, self.num_cols, offset),
            Self::random_coord(rng, self.num_rows, offset),
        )
    }

    fn random_coord<R: Rng + ?Sized>(rng: &mut R, dim: usize, offset: usize) -> i32 {
        let dim = dim.max(1);
        let offset = if dim > 2 * offset { offset } else { 0 };
        rng.gen_range(offset..dim - offset) as i32
    }

    /// Classify a cell on the perimeter. Interior and out-of-bounds cells
    /// yield `None`.
    pub fn edge_of(&self, pos: Position) -> Option<Edge> {
        if !self.in_bounds(pos) {
            return None;
        }

        let max_x = self.num_cols as i32 - 1;
        let max_y = self.num_rows as i32 - 1;
        let left = pos.x == 0;
        let right = pos.x == max_x;
        let top = pos.y == 0;
        let bottom = pos.y == max_y;

        match (left, right, top, bottom) {
            (true, _, true, _) => Some(Edge::TopLeft),
            (_, true, true, _) => Some(Edge::TopRight),
            (true, _, _, true) => Some(Edge::BottomLeft),
            (_, true, _, true) => Some(Edge::BottomRight),
            (_, _, true, _) => Some(Edge::Top),
            (_, _, _, true) => Some(Edge::Bottom),
            (true, _, _, _) => Some(Edge::Left),
            (_, true, _, _) => Some(Edge::Right),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_position_movement() {
        let pos = Position::new(5, 5);
        assert_eq!(pos.moved_by(1, 0), Position::new(6, 5));
        assert_eq!(pos.moved_by(-1, 0), Position::new(4, 5));
        assert_eq!(pos.moved_in_direction(Direction::Down), Position::new(5, 6));
        assert_eq!(pos.moved_in_direction(Direction::Up), Position::new(5, 4));
    }

    #[test]
    fn test_bounds_checking() {
        let grid = Grid::new(20, 20);

        assert!(grid.in_bounds(Position::new(0, 0)));
        assert!(grid.in_bounds(Position::new(19, 19)));
        assert!(!grid.in_bounds(Position::new(-1, 0)));
        assert!(!grid.in_bounds(Position::new(20, 0)));
        assert!(!grid.in_bounds(Position::new(0, 20)));
    }

    #[test]
    fn test_random_cell_respects_perimeter_exclusion() {
        let grid = Grid::new(8, 12);
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..500 {
            let cell = grid.random_cell(&mut rng, true);
            assert!((1..=6).contains(&cell.x), "x out of interior: {:?}", cell);
            assert!((1..=10).contains(&cell.y), "y out of interior: {:?}", cell);

            let any = grid.random_cell(&mut rng, false);
            assert!(grid.in_bounds(any));
        }
    }

    #[test]
    fn test_random_cell_on_narrow_grid() {
        let grid = Grid::new(2, 1);
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..20 {
            assert!(grid.in_bounds(grid.random_cell(&mut rng, true)));
        }
    }

    #[test]
    fn test_edge_classification() {
        let grid = Grid::new(10, 8);

        assert_eq!(grid.edge_of(Position::new(0, 0)), Some(Edge::TopLeft));
        assert_eq!(grid.edge_of(Position::new(9, 0)), Some(Edge::TopRight));
        assert_eq!(grid.edge_of(Position::new(0, 7)), Some(Edge::BottomLeft));
        assert_eq!(grid.edge_of(Position::new(9, 7)), Some(Edge::BottomRight));
        assert_eq!(grid.edge_of(Position::new(4, 0)), Some(Edge::Top));
        assert_eq!(grid.edge_of(Position::new(4, 7)), Some(Edge::Bottom));
        assert_eq!(grid.edge_of(Position::new(0, 3)), Some(Edge::Left));
        assert_eq!(grid.edge_of(Position::new(9, 3)), Some(Edge::Right));
        assert_eq!(grid.edge_of(Position::new(4, 3)), None);
        assert_eq!(grid.edge_of(Position::new(-1, 3)), None);
    }

    #[test]
    fn test_center() {
        assert_eq!(Grid::new(20, 20).center(), Position::new(10, 10));
        assert_eq!(Grid::new(7, 9).center(), Position::new(3, 4));
    }
}
