//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! Drawing, persistence and sound are reached through the traits in
//! [`collaborators`], so the same core runs under the terminal front end and in tests.

pub mod action;
pub mod collaborators;
pub mod config;
pub mod engine;
pub mod error;
pub mod goal;
pub mod grid;
pub mod robot;
pub mod segment;
pub mod snake;

// Re-export commonly used types
pub use action::{Action, Direction};
pub use collaborators::{
    Breakpoints, DeviceClass, DisplayProfile, DrawIntent, DrawList, FontSize, HighScoreStore,
    Renderer, Sound, TextPosition,
};
pub use config::GameConfig;
pub use engine::{Crash, Game, Phase, TickEvent};
pub use error::{ConfigError, StoreError};
pub use goal::{GoalPlacer, Placement};
pub use grid::{Edge, Grid, Position};
pub use robot::{RobotPolicy, Steer};
pub use segment::{Segment, SegmentColor};
pub use snake::Snake;
