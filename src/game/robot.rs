//! Steering for the autonomous snake.
//!
//! The robot wanders by taking a random perpendicular turn whenever its
//! countdown expires, and takes a forced turn from [`FORCED_TURNS`] whenever
//! its head reaches the perimeter heading outward.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::trace;

use super::action::Direction;
use super::grid::{Edge, Grid};
use super::snake::Snake;

use super::action::Direction::{Down, Left, Right, Up};

/// Safe turns for a head on the perimeter moving toward the outside.
///
/// Combinations missing from the table are already moving along or away from
/// the wall and need no forced turn.
pub const FORCED_TURNS: &[(Edge, Direction, &[Direction])] = &[
    (Edge::TopLeft, Up, &[Right]),
    (Edge::TopLeft, Left, &[Down]),
    (Edge::TopRight, Up, &[Left]),
    (Edge::TopRight, Right, &[Down]),
    (Edge::BottomLeft, Down, &[Right]),
    (Edge::BottomLeft, Left, &[Up]),
    (Edge::BottomRight, Down, &[Left]),
    (Edge::BottomRight, Right, &[Up]),
    (Edge::Top, Up, &[Left, Right]),
    (Edge::Bottom, Down, &[Left, Right]),
    (Edge::Left, Left, &[Up, Down]),
    (Edge::Right, Right, &[Up, Down]),
];

/// Look up the forced turns for a head at `edge` moving `heading`
pub fn forced_turns(edge: Edge, heading: Direction) -> Option<&'static [Direction]> {
    FORCED_TURNS
        .iter()
        .find(|(e, d, _)| *e == edge && *d == heading)
        .map(|(_, _, turns)| *turns)
}

/// What the policy did before an advance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Steer {
    /// Turned away from the wall
    Forced(Direction),
    /// Countdown expired, took a random perpendicular turn
    Wander(Direction),
    /// Kept the current heading
    Hold,
}

/// Autonomous direction selection layered over a [`Snake`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RobotPolicy {
    autonomy_counter: u32,
    min_turn_interval: u32,
    max_turn_interval: u32,
}

impl RobotPolicy {
    /// Countdown is reseeded uniformly from `min..=max` after each turn
    pub fn new<R: Rng + ?Sized>(min_turn_interval: u32, max_turn_interval: u32, rng: &mut R) -> Self {
        let min_turn_interval = min_turn_interval.max(1);
        let mut policy = Self {
            autonomy_counter: 0,
            min_turn_interval,
            max_turn_interval: max_turn_interval.max(min_turn_interval),
        };
        policy.reseed(rng);
        policy
    }

    pub fn autonomy_counter(&self) -> u32 {
        self.autonomy_counter
    }

    pub fn reseed<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.autonomy_counter = rng.gen_range(self.min_turn_interval..=self.max_turn_interval);
    }

    /// Pick the pending direction for the coming advance
    pub fn steer<R: Rng + ?Sized>(&mut self, snake: &mut Snake, grid: &Grid, rng: &mut R) -> Steer {
        debug_assert!(snake.is_autonomous(), "robot policy steering a player snake");
        self.autonomy_counter = self.autonomy_counter.saturating_sub(1);

        let heading = snake.direction();
        let forced = grid
            .edge_of(snake.head())
            .and_then(|edge| forced_turns(edge, heading));

        if let Some(turns) = forced {
            if let Some(&turn) = turns.choose(rng) {
                snake.set_direction(turn);
                self.reseed(rng);
                trace!(?heading, ?turn, head = ?snake.head(), "robot forced turn");
                return Steer::Forced(turn);
            }
        }

        if self.autonomy_counter == 0 {
            let head = snake.head();
            let safe: Vec<Direction> = snake
                .allowable_directions()
                .into_iter()
                .filter(|d| grid.in_bounds(head.moved_in_direction(*d)))
                .collect();
            self.reseed(rng);

            if let Some(&turn) = safe.choose(rng) {
                snake.set_direction(turn);
                return Steer::Wander(turn);
            }
        }

        Steer::Hold
    }
}
