use std::collections::VecDeque;

use super::action::Direction;
use super::grid::{Grid, Position};
use super::segment::{Segment, SegmentColor};

/// Heading every snake takes after a reset
pub const DEFAULT_DIRECTION: Direction = Direction::Up;

/// Half-width of the square `is_too_close` checks when no distance is configured
pub const DEFAULT_MIN_SAFE_DISTANCE: i32 = 5;

/// A snake made of grid segments, head first
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    segments: VecDeque<Segment>,
    direction: Direction,
    pending_direction: Direction,
    grow_pending: bool,
    is_autonomous: bool,
    color: SegmentColor,
    initial_length: usize,
}

impl Snake {
    /// Create a player-controlled snake already reset on `grid`
    pub fn new(grid: &Grid, color: SegmentColor, initial_length: usize) -> Self {
        let mut snake = Self {
            segments: VecDeque::new(),
            direction: DEFAULT_DIRECTION,
            pending_direction: DEFAULT_DIRECTION,
            grow_pending: false,
            is_autonomous: false,
            color,
            initial_length: initial_length.max(1),
        };
        snake.reset(grid);
        snake
    }

    /// Create a snake steered by a robot policy instead of input
    pub fn autonomous(grid: &Grid, color: SegmentColor, initial_length: usize) -> Self {
        let mut snake = Self::new(grid, color, initial_length);
        snake.is_autonomous = true;
        snake
    }

    /// Rebuild the body below the grid centre, facing up
    pub fn reset(&mut self, grid: &Grid) {
        self.reset_at(grid.center());
    }

    /// Rebuild the body with its head at `head`, remaining segments stacked below it
    pub fn reset_at(&mut self, head: Position) {
        self.direction = DEFAULT_DIRECTION;
        self.pending_direction = DEFAULT_DIRECTION;
        self.grow_pending = false;
        self.segments = (0..self.initial_length)
            .map(|i| Segment::new(head.moved_by(0, i as i32), self.color))
            .collect();
    }

    pub fn head(&self) -> Position {
        self.segments[0].pos
    }

    pub fn segments(&self) -> impl Iterator<Item = &Segment> {
        self.segments.iter()
    }

    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.segments.iter().map(|s| s.pos)
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Check if the snake is empty (never true once reset)
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn pending_direction(&self) -> Direction {
        self.pending_direction
    }

    pub fn grow_pending(&self) -> bool {
        self.grow_pending
    }

    pub fn is_autonomous(&self) -> bool {
        self.is_autonomous
    }

    /// Directions the snake may turn into from its committed heading
    pub fn allowable_directions(&self) -> [Direction; 2] {
        self.direction.perpendicular()
    }

    /// Queue a turn for the next advance. Anything other than a
    /// perpendicular turn is ignored; returns whether it was accepted.
    pub fn set_direction(&mut self, direction: Direction) -> bool {
        if self.allowable_directions().contains(&direction) {
            self.pending_direction = direction;
            true
        } else {
            false
        }
    }

    /// Move one cell along the pending direction.
    ///
    /// Without pending growth the tail segment is recycled as the new head;
    /// with it a fresh segment is added, so the body gets one longer.
    pub fn advance(&mut self) {
        self.direction = self.pending_direction;

        let previous_head = self.head();
        let mut segment = if self.grow_pending {
            self.grow_pending = false;
            Segment::new(previous_head, self.color)
        } else {
            match self.segments.pop_back() {
                Some(tail) => tail,
                None => Segment::new(previous_head, self.color),
            }
        };

        segment.pos = previous_head;
        segment.move_by(self.direction);
        self.segments.push_front(segment);
    }

    /// True when the head left the grid or ran into the rest of the body
    pub fn collision_detected(&self, grid: &Grid) -> bool {
        let head = &self.segments[0];
        if !head.within_bounds(0, 0, grid.num_cols as i32, grid.num_rows as i32) {
            return true;
        }

        self.segments.iter().skip(1).any(|s| head.same_position(s))
    }

    pub fn ate_goal(&self, goal: Position) -> bool {
        self.head() == goal
    }

    /// Grow by one segment on the next advance
    pub fn request_growth(&mut self) {
        self.grow_pending = true;
    }

    /// Whether any segment lies inside the square of half-width
    /// `min_safe_distance` centred on `cell` (edges included).
    pub fn is_too_close(&self, cell: Position, min_safe_distance: i32) -> bool {
        self.segments.iter().any(|s| {
            (s.pos.x - cell.x).abs() <= min_safe_distance
                && (s.pos.y - cell.y).abs() <= min_safe_distance
        })
    }

    pub fn intersects(&self, cell: Position) -> bool {
        self.segments.iter().any(|s| s.pos == cell)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    fn player(grid: &Grid) -> Snake {
        Snake::new(grid, SegmentColor::Red, 4)
    }

    #[test]
    fn test_reset_stacks_body_below_center() {
        let grid = Grid::new(20, 20);
        let snake = player(&grid);

        let body: Vec<Position> = snake.positions().collect();
        assert_eq!(
            body,
            vec![
                Position::new(10, 10),
                Position::new(10, 11),
                Position::new(10, 12),
                Position::new(10, 13),
            ]
        );
        assert_eq!(snake.direction(), Direction::Up);
        assert_eq!(snake.pending_direction(), Direction::Up);
        assert!(!snake.grow_pending());
        assert!(!snake.is_autonomous());
    }

    #[test]
    fn test_advance_recycles_tail() {
        let grid = Grid::new(20, 20);
        let mut snake = player(&grid);

        snake.advance();

        assert_eq!(snake.head(), Position::new(10, 9));
        assert_eq!(snake.positions().last(), Some(Position::new(10, 12)));
        assert!(!snake.intersects(Position::new(10, 13)));
        assert_eq!(snake.len(), 4);
        assert!(!snake.collision_detected(&grid));
    }

    #[test]
    fn test_growth_adds_exactly_one_segment() {
        let grid = Grid::new(20, 20);
        let mut snake = player(&grid);

        snake.request_growth();
        snake.request_growth();
        snake.advance();
        assert_eq!(snake.len(), 5);
        assert!(!snake.grow_pending());
        assert_eq!(snake.head(), Position::new(10, 9));
        assert_eq!(snake.positions().last(), Some(Position::new(10, 13)));

        snake.advance();
        assert_eq!(snake.len(), 5);
    }

    #[test]
    fn test_reverse_turns_are_ignored() {
        let grid = Grid::new(20, 20);
        let mut snake = player(&grid);

        assert!(!snake.set_direction(Direction::Down));
        assert!(!snake.set_direction(Direction::Up));
        assert_eq!(snake.pending_direction(), Direction::Up);

        assert!(snake.set_direction(Direction::Left));
        // Still judged against the committed heading, not the pending one
        assert!(snake.set_direction(Direction::Right));
        assert!(!snake.set_direction(Direction::Down));
        snake.advance();
        assert_eq!(snake.direction(), Direction::Right);
        assert_eq!(snake.head(), Position::new(11, 10));
    }

    #[test]
    fn test_wall_collision() {
        let grid = Grid::new(20, 20);
        let mut snake = player(&grid);
        snake.reset_at(Position::new(0, 5));
        snake.set_direction(Direction::Left);

        snake.advance();

        assert_eq!(snake.head(), Position::new(-1, 5));
        assert!(snake.collision_detected(&grid));
    }

    #[test]
    fn test_self_collision() {
        let grid = Grid::new(20, 20);
        let mut snake = Snake::new(&grid, SegmentColor::Red, 5);

        // Up, right, down, left loops the head back onto its own body
        snake.advance();
        snake.set_direction(Direction::Right);
        snake.advance();
        snake.set_direction(Direction::Down);
        snake.advance();
        assert!(!snake.collision_detected(&grid));
        snake.set_direction(Direction::Left);
        snake.advance();

        assert!(snake.collision_detected(&grid));
    }

    #[test]
    fn test_ate_goal_and_intersects() {
        let grid = Grid::new(20, 20);
        let snake = player(&grid);

        assert!(snake.ate_goal(Position::new(10, 10)));
        assert!(!snake.ate_goal(Position::new(10, 11)));
        assert!(snake.intersects(Position::new(10, 12)));
        assert!(!snake.intersects(Position::new(11, 12)));
    }

    #[test]
    fn test_is_too_close_uses_inclusive_square() {
        let grid = Grid::new(30, 30);
        let snake = player(&grid);
        // Body spans (15,15)..(15,18)

        assert!(snake.is_too_close(Position::new(20, 15), DEFAULT_MIN_SAFE_DISTANCE));
        assert!(snake.is_too_close(Position::new(10, 23), DEFAULT_MIN_SAFE_DISTANCE));
        assert!(!snake.is_too_close(Position::new(21, 15), DEFAULT_MIN_SAFE_DISTANCE));
        assert!(!snake.is_too_close(Position::new(15, 24), DEFAULT_MIN_SAFE_DISTANCE));
        assert!(!snake.is_too_close(Position::new(17, 15), 1));
    }

    proptest! {
        #[test]
        fn prop_reset_is_in_bounds_and_distinct(cols in 7usize..80, rows in 7usize..80) {
            let grid = Grid::new(cols, rows);
            let snake = player(&grid);

            let cells: HashSet<Position> = snake.positions().collect();
            prop_assert_eq!(cells.len(), snake.len());
            prop_assert!(snake.positions().all(|p| grid.in_bounds(p)));
            prop_assert!(!snake.collision_detected(&grid));
        }

        #[test]
        fn prop_no_reversal_takes_effect(inputs in prop::collection::vec(
            prop::option::of(0usize..4), 1..200
        )) {
            let grid = Grid::new(500, 500);
            let mut snake = player(&grid);

            for input in inputs {
                match input {
                    Some(i) => {
                        snake.set_direction(Direction::ALL[i]);
                    }
                    None => {
                        let before = snake.direction();
                        snake.advance();
                        prop_assert!(!before.is_opposite(snake.direction()));
                    }
                }
            }
        }

        #[test]
        fn prop_collision_matches_definition(
            turns in prop::collection::vec(0usize..4, 1..60),
        ) {
            let grid = Grid::new(12, 12);
            let mut snake = Snake::new(&grid, SegmentColor::Red, 6);

            for t in turns {
                snake.set_direction(Direction::ALL[t]);
                snake.advance();

                let head = snake.head();
                let expected = !grid.in_bounds(head)
                    || snake.positions().skip(1).any(|p| p == head);
                prop_assert_eq!(snake.collision_detected(&grid), expected);
                if expected {
                    break;
                }
            }
        }
    }
}
