//! Robo Snake - a terminal Snake game with an autonomous robot snake
//!
//! This library provides:
//! - Core game simulation (game module): snakes, robot steering, goal placement
//!   and the round state machine
//! - TUI rendering (render module) and keyboard input (input module)
//! - High score persistence (store module) and sound (audio module)
//! - The interactive session (modes module)

pub mod audio;
pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
pub mod store;
