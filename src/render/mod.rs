pub mod renderer;

pub use renderer::{grid_for_terminal, TerminalView};
