use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::ConfigError;
use super::grid::Grid;

/// Smallest playable grid edge
pub const MIN_GRID_SIZE: usize = 7;

/// Largest grid edge the terminal view can lay out
pub const MAX_GRID_SIZE: usize = 1000;

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the game grid
    pub grid_width: usize,
    /// Height of the game grid
    pub grid_height: usize,
    /// Number of segments a snake has after a reset
    pub initial_snake_length: usize,

    // Pace
    /// Ticks per second at the start of a round
    pub default_fps: u32,
    /// Ticks per second added each time a goal is eaten
    pub fps_increment: u32,

    // Robot snake
    /// Score at which the robot snake joins the round
    pub robot_score_threshold: u32,
    /// Fewest advances between robot wander turns
    pub robot_turn_min: u32,
    /// Most advances between robot wander turns
    pub robot_turn_max: u32,

    // Goal placement
    /// Half-width of the square around the goal that should be free of the player
    pub goal_min_distance: i32,
    /// Candidate draws before a placement is accepted as is
    pub goal_max_attempts: usize,

    /// Fixed RNG seed, random when unset
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 20,
            grid_height: 20,
            initial_snake_length: 4,
            default_fps: 10,
            fps_increment: 1,
            robot_score_threshold: 5,
            robot_turn_min: 5,
            robot_turn_max: 10,
            goal_min_distance: 5,
            goal_max_attempts: 5,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    /// Create a large grid
    pub fn large() -> Self {
        Self::new(30, 30)
    }

    /// Load a JSON config file; missing fields take their defaults
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn grid(&self) -> Grid {
        Grid::new(self.grid_width, self.grid_height)
    }

    /// Check that a grid of `width` x `height` can host a freshly reset snake
    pub fn check_grid(&self, width: usize, height: usize) -> Result<(), ConfigError> {
        if width < MIN_GRID_SIZE || height < MIN_GRID_SIZE {
            return Err(ConfigError::GridTooSmall {
                width,
                height,
                min: MIN_GRID_SIZE,
            });
        }
        if width > MAX_GRID_SIZE || height > MAX_GRID_SIZE {
            return Err(ConfigError::GridTooLarge {
                width,
                height,
                max: MAX_GRID_SIZE,
            });
        }
        if height / 2 + self.initial_snake_length > height {
            return Err(ConfigError::SnakeDoesNotFit {
                length: self.initial_snake_length,
                height,
            });
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.initial_snake_length == 0 {
            return Err(invalid("initial_snake_length", "must be at least 1"));
        }
        self.check_grid(self.grid_width, self.grid_height)?;
        if self.default_fps == 0 {
            return Err(invalid("default_fps", "must be at least 1"));
        }
        if self.goal_max_attempts == 0 {
            return Err(invalid("goal_max_attempts", "must be at least 1"));
        }
        if self.goal_min_distance < 0 {
            return Err(invalid("goal_min_distance", "must not be negative"));
        }
        if self.robot_turn_min == 0 || self.robot_turn_min > self.robot_turn_max {
            return Err(invalid(
                "robot_turn_min",
                format!(
                    "need 1 <= robot_turn_min <= robot_turn_max, got {}..{}",
                    self.robot_turn_min, self.robot_turn_max
                ),
            ));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::InvalidValue {
        field,
        reason: reason.into(),
    }
}
