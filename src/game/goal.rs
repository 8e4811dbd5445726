use rand::Rng;
use tracing::debug;

use super::grid::{Grid, Position};
use super::snake::{Snake, DEFAULT_MIN_SAFE_DISTANCE};

/// Default cap on candidate draws per placement
pub const DEFAULT_MAX_ATTEMPTS: usize = 5;

/// Outcome of a placement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub cell: Position,
    /// Number of candidates drawn, at most the placer's bound
    pub attempts: usize,
}

/// Randomized placement that keeps clear of a snake when it can.
///
/// Candidates are drawn from the grid interior until one is not too close to
/// the snake. Once `max_attempts` candidates have been drawn the last one is
/// accepted regardless, so placement always terminates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GoalPlacer {
    max_attempts: usize,
    min_safe_distance: i32,
}

impl Default for GoalPlacer {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ATTEMPTS, DEFAULT_MIN_SAFE_DISTANCE)
    }
}

impl GoalPlacer {
    pub fn new(max_attempts: usize, min_safe_distance: i32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            min_safe_distance,
        }
    }

    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    pub fn min_safe_distance(&self) -> i32 {
        self.min_safe_distance
    }

    /// Draw a cell for something that should stay away from `snake`
    pub fn place<R: Rng + ?Sized>(&self, grid: &Grid, snake: &Snake, rng: &mut R) -> Placement {
        let mut cell = grid.random_cell(rng, true);
        let mut attempts = 1;

        while attempts < self.max_attempts && snake.is_too_close(cell, self.min_safe_distance) {
            cell = grid.random_cell(rng, true);
            attempts += 1;
        }

        Placement { cell, attempts }
    }

    /// Move the goal block to a fresh cell
    pub fn relocate<R: Rng + ?Sized>(
        &self,
        goal: &mut Position,
        grid: &Grid,
        snake: &Snake,
        rng: &mut R,
    ) -> Placement {
        let placement = self.place(grid, snake, rng);
        *goal = placement.cell;

        if snake.is_too_close(placement.cell, self.min_safe_distance) {
            debug!(
                cell = ?placement.cell,
                attempts = placement.attempts,
                "goal placed near snake after exhausting attempts"
            );
        }

        placement
    }
}
