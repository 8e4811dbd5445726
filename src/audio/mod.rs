//! Sound effects for the terminal front end

use std::io::{self, Write};

use crate::game::Sound;

/// Rings the terminal bell on stderr, the stream the TUI draws to
#[derive(Debug, Default)]
pub struct TerminalBell;

impl TerminalBell {
    pub fn new() -> Self {
        Self
    }

    fn ring(&mut self, times: usize) -> io::Result<()> {
        let mut err = io::stderr().lock();
        for _ in 0..times {
            err.write_all(b"\x07")?;
        }
        err.flush()
    }
}

impl Sound for TerminalBell {
    fn play_eat_sound(&mut self) -> io::Result<()> {
        self.ring(1)
    }

    fn play_game_over_sound(&mut self) -> io::Result<()> {
        self.ring(2)
    }
}

/// No sound at all
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl Sound for Silent {
    fn play_eat_sound(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn play_game_over_sound(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_silent_never_fails() {
        let mut sound = Silent;
        assert!(sound.play_eat_sound().is_ok());
        assert!(sound.play_game_over_sound().is_ok());
    }
}
