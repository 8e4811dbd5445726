use anyhow::{Context, Result};
use crossterm::{
    event::{
        DisableMouseCapture, EnableMouseCapture, Event, EventStream, KeyEventKind, MouseButton,
        MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{stderr, Stderr};
use std::time::Duration;
use tokio::time::{interval, interval_at, Instant, Interval, MissedTickBehavior};
use tracing::{debug, info};

use crate::game::{
    Action, Breakpoints, DisplayProfile, DrawList, Game, GameConfig, HighScoreStore, Phase, Sound,
};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::{grid_for_terminal, TerminalView};

/// How the interactive session sizes its grid and describes its display
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionOptions {
    /// Size the grid to the terminal and follow resizes
    pub fit_terminal: bool,
    /// Use tap wording in messages and accept mouse clicks as taps
    pub touch: bool,
}

pub struct HumanMode {
    game: Game<DrawList>,
    metrics: GameMetrics,
    view: TerminalView,
    input_handler: InputHandler,
    options: SessionOptions,
    /// Terminal size in character cells, for tap zones
    screen: (u16, u16),
    should_quit: bool,
}

impl HumanMode {
    pub fn new(
        config: GameConfig,
        store: Box<dyn HighScoreStore>,
        sound: Box<dyn Sound>,
        options: SessionOptions,
    ) -> Self {
        let mut game = Game::new(config, DrawList::new(), store, sound);
        game.load();

        let mut metrics = GameMetrics::new();
        metrics.observe(game.phase());

        Self {
            game,
            metrics,
            view: TerminalView::new(),
            input_handler: InputHandler::new(),
            options,
            screen: (0, 0),
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        if self.options.touch {
            execute!(stderr, EnableMouseCapture).context("Failed to enable mouse capture")?;
        }
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        let (width, height) = crossterm::terminal::size().context("Failed to read terminal size")?;
        self.apply_terminal_size(width, height);

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        // The tick timer only exists while the round is running and is
        // re-armed whenever the speed changes
        let mut tick_period = self.game.tick_period();
        let mut tick_timer = tick_period.map(tick_interval);

        // Render at 30 FPS (33ms per frame)
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event);
                    }
                }

                // Game logic tick
                _ = next_tick(&mut tick_timer) => {
                    let event = self.game.tick();
                    debug!(?event, "tick");
                }

                // Render frame
                _ = render_timer.tick() => {
                    terminal.draw(|frame| {
                        self.view.render(frame, &self.game, &self.metrics);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            self.metrics.observe(self.game.phase());

            let period = self.game.tick_period();
            if period != tick_period {
                tick_period = period;
                tick_timer = period.map(tick_interval);
            }

            if self.should_quit {
                break;
            }
        }

        info!(
            high_score = self.game.high_score(),
            games_played = self.metrics.games_played,
            "session ended"
        );

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => {
                // Only process key press events, not release
                if key.kind != KeyEventKind::Press {
                    return;
                }

                match self.input_handler.handle_key_event(key) {
                    KeyAction::GameAction(action) => self.game.handle(action),
                    KeyAction::Quit => self.should_quit = true,
                    KeyAction::None => {}
                }
            }
            Event::Mouse(mouse) if self.options.touch => self.handle_tap(mouse),
            Event::Resize(width, height) => self.apply_terminal_size(width, height),
            _ => {}
        }
    }

    fn handle_tap(&mut self, mouse: MouseEvent) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }

        // Tapping anywhere restarts a finished round
        if self.game.phase() == Phase::Over {
            self.game.handle(Action::Restart);
            return;
        }

        let (width, height) = self.screen;
        let tapped = self
            .input_handler
            .handle_tap(mouse.column, mouse.row, width, height);
        if let KeyAction::GameAction(action) = tapped {
            self.game.handle(action);
        }
    }

    fn apply_terminal_size(&mut self, width: u16, height: u16) {
        self.screen = (width, height);
        self.game.set_display(DisplayProfile::detect(
            width,
            self.options.touch,
            Breakpoints::default(),
        ));

        if self.options.fit_terminal {
            let (cols, rows) = grid_for_terminal(width, height);
            if (cols, rows) != (self.game.grid().num_cols, self.game.grid().num_rows) {
                self.game.resize(cols, rows);
            }
        }
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        if self.options.touch {
            execute!(terminal.backend_mut(), DisableMouseCapture)
                .context("Failed to disable mouse capture")?;
        }
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

/// A timer whose first tick is one full period away
fn tick_interval(period: Duration) -> Interval {
    let mut timer = interval_at(Instant::now() + period, period);
    timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
    timer
}

/// Wait for the next tick, or forever while the timer is halted
async fn next_tick(timer: &mut Option<Interval>) {
    match timer {
        Some(timer) => {
            timer.tick().await;
        }
        None => std::future::pending::<()>().await,
    }
}
