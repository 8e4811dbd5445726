use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, warn};

use super::{
    action::{Action, Direction},
    collaborators::{DisplayProfile, FontSize, HighScoreStore, Renderer, Sound, TextPosition},
    config::GameConfig,
    goal::GoalPlacer,
    grid::{Grid, Position},
    robot::RobotPolicy,
    segment::SegmentColor,
    snake::Snake,
};

/// Where the game is in its round lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Preparing the board for a new round
    Loading,
    /// Board drawn, waiting for the first direction
    Ready,
    /// Ticking
    Running,
    Paused,
    /// Round ended, waiting for a restart
    Over,
}

/// What caused a round to end
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Crash {
    /// Player hit a wall or its own body
    Player,
    /// Robot hit a wall or its own body
    Robot,
    /// One snake's head ran into the other snake
    Between,
}

/// Result of a single tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickEvent {
    /// Not running, nothing happened
    Idle,
    Moved,
    AteGoal { score: u32 },
    GameOver { score: u32, crash: Crash, new_high_score: bool },
}

/// The game state machine.
///
/// Owns both snakes, the goal block and the scoring state. Input is applied
/// through [`Game::handle`] between ticks and [`Game::tick`] advances the
/// simulation while the phase is [`Phase::Running`].
pub struct Game<V: Renderer> {
    config: GameConfig,
    grid: Grid,
    player: Snake,
    robot: Snake,
    robot_policy: RobotPolicy,
    robot_enabled: bool,
    goal: Position,
    goal_placer: GoalPlacer,
    phase: Phase,
    score: u32,
    high_score: u32,
    fps: u32,
    display: DisplayProfile,
    renderer: V,
    store: Box<dyn HighScoreStore>,
    sound: Box<dyn Sound>,
    rng: StdRng,
}

impl<V: Renderer> Game<V> {
    /// Create a game in [`Phase::Loading`], reading the stored high score.
    ///
    /// `config` is expected to have passed [`GameConfig::validate`].
    pub fn new(
        config: GameConfig,
        renderer: V,
        mut store: Box<dyn HighScoreStore>,
        sound: Box<dyn Sound>,
    ) -> Self {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let high_score = store.load_high_score().unwrap_or_else(|err| {
            warn!(%err, "could not load high score, starting from 0");
            0
        });

        let grid = config.grid();
        let player = Snake::new(&grid, SegmentColor::Red, config.initial_snake_length);
        let robot = Snake::autonomous(&grid, SegmentColor::Blue, config.initial_snake_length);
        let robot_policy = RobotPolicy::new(config.robot_turn_min, config.robot_turn_max, &mut rng);
        let goal_placer = GoalPlacer::new(config.goal_max_attempts, config.goal_min_distance);
        let fps = config.default_fps;

        Self {
            config,
            grid,
            player,
            robot,
            robot_policy,
            robot_enabled: false,
            goal: grid.center(),
            goal_placer,
            phase: Phase::Loading,
            score: 0,
            high_score,
            fps,
            display: DisplayProfile::default(),
            renderer,
            store,
            sound,
            rng,
        }
    }

    pub fn with_display(mut self, display: DisplayProfile) -> Self {
        self.display = display;
        self
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    /// Current ticks per second
    pub fn fps(&self) -> u32 {
        self.fps
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    pub fn goal(&self) -> Position {
        self.goal
    }

    pub fn player(&self) -> &Snake {
        &self.player
    }

    /// The robot snake, once it has joined the round
    pub fn robot(&self) -> Option<&Snake> {
        self.robot_enabled.then_some(&self.robot)
    }

    pub fn renderer(&self) -> &V {
        &self.renderer
    }

    pub fn display(&self) -> DisplayProfile {
        self.display
    }

    /// Time between ticks, or `None` while the tick timer should be halted
    pub fn tick_period(&self) -> Option<Duration> {
        (self.phase == Phase::Running).then(|| Duration::from_secs_f64(1.0 / f64::from(self.fps)))
    }

    /// Perform the loading step: place the snake and goal, draw the board
    /// and the start message, then wait in [`Phase::Ready`].
    pub fn load(&mut self) {
        if self.phase != Phase::Loading {
            return;
        }

        self.player.reset(&self.grid);
        self.robot.reset(&self.grid);
        let placement = self
            .goal_placer
            .relocate(&mut self.goal, &self.grid, &self.player, &mut self.rng);
        debug!(goal = ?self.goal, attempts = placement.attempts, "goal placed");

        self.redraw(false);
        self.draw_start_message();
        self.set_phase(Phase::Ready);
    }

    /// Abandon the current round and load a new one. The high score is kept.
    pub fn restart(&mut self) {
        self.set_phase(Phase::Loading);
        self.score = 0;
        self.fps = self.config.default_fps;
        self.robot_enabled = false;
        self.load();
    }

    /// Fit the game to a new grid size, restarting the round.
    ///
    /// Sizes that cannot host a snake are ignored; returns whether the grid changed.
    pub fn resize(&mut self, num_cols: usize, num_rows: usize) -> bool {
        if let Err(err) = self.config.check_grid(num_cols, num_rows) {
            warn!(%err, "ignoring resize");
            return false;
        }

        self.grid = Grid::new(num_cols, num_rows);
        info!(num_cols, num_rows, "grid resized");
        self.restart();
        true
    }

    /// Update the device class; the start message is redrawn if showing
    pub fn set_display(&mut self, display: DisplayProfile) {
        self.display = display;
        if self.phase == Phase::Ready {
            self.redraw(false);
            self.draw_start_message();
        }
    }

    pub fn handle(&mut self, action: Action) {
        match action {
            Action::Move(direction) => self.handle_direction(direction),
            Action::Pause => self.handle_pause(),
            Action::Restart => self.handle_restart(),
        }
    }

    /// A direction starts the round from [`Phase::Ready`] unless it points
    /// back along the body, and steers the player while running.
    pub fn handle_direction(&mut self, direction: Direction) {
        match self.phase {
            Phase::Ready => {
                if direction.is_opposite(self.player.direction()) {
                    return;
                }
                self.player.set_direction(direction);
                self.set_phase(Phase::Running);
                self.redraw(true);
            }
            Phase::Running => {
                self.player.set_direction(direction);
            }
            Phase::Loading | Phase::Paused | Phase::Over => {}
        }
    }

    /// Toggle pause; after a round has ended this starts a new one
    pub fn handle_pause(&mut self) {
        match self.phase {
            Phase::Running => {
                self.set_phase(Phase::Paused);
                self.renderer
                    .draw_text("PAUSED", FontSize::Large, TextPosition::Headline);
            }
            Phase::Paused => {
                self.set_phase(Phase::Running);
                self.redraw(true);
            }
            Phase::Over => self.restart(),
            Phase::Loading | Phase::Ready => {}
        }
    }

    pub fn handle_restart(&mut self) {
        self.restart();
    }

    /// Advance the simulation one step
    pub fn tick(&mut self) -> TickEvent {
        if self.phase != Phase::Running {
            return TickEvent::Idle;
        }

        self.player.advance();
        if self.robot_enabled {
            self.robot_policy
                .steer(&mut self.robot, &self.grid, &mut self.rng);
            self.robot.advance();
        }

        if let Some(crash) = self.crash() {
            return self.game_over(crash);
        }

        if self.player.ate_goal(self.goal) {
            return self.goal_eaten();
        }

        self.redraw(true);
        TickEvent::Moved
    }

    fn crash(&self) -> Option<Crash> {
        if self.player.collision_detected(&self.grid) {
            return Some(Crash::Player);
        }
        if !self.robot_enabled {
            return None;
        }
        if self.robot.collision_detected(&self.grid) {
            return Some(Crash::Robot);
        }
        if self.robot.intersects(self.player.head()) || self.player.intersects(self.robot.head()) {
            return Some(Crash::Between);
        }
        None
    }

    fn goal_eaten(&mut self) -> TickEvent {
        self.score += 1;
        if let Err(err) = self.sound.play_eat_sound() {
            debug!(%err, "eat sound failed");
        }

        self.player.request_growth();
        if self.robot_enabled {
            self.robot.request_growth();
        } else if self.score >= self.config.robot_score_threshold {
            self.enable_robot();
        }

        self.fps = self.fps.saturating_add(self.config.fps_increment);

        let placement = self
            .goal_placer
            .relocate(&mut self.goal, &self.grid, &self.player, &mut self.rng);
        debug!(
            score = self.score,
            fps = self.fps,
            goal = ?self.goal,
            attempts = placement.attempts,
            "goal eaten"
        );

        self.redraw(true);
        TickEvent::AteGoal { score: self.score }
    }

    /// Drop the robot in away from the player; it starts moving next tick
    fn enable_robot(&mut self) {
        let head = self.robot_spawn();

        self.robot.reset_at(head);
        self.robot_policy.reseed(&mut self.rng);
        self.robot_enabled = true;
        info!(score = self.score, ?head, "robot snake enabled");
    }

    fn robot_body_len(&self) -> usize {
        self.config.initial_snake_length.min(self.grid.num_rows)
    }

    /// Pick the robot's head cell.
    ///
    /// Random interior draws are clamped so the vertical body fits, and a draw
    /// is only taken if the body and the cell ahead of it miss the player. A
    /// clear draw that is still close to the player is kept as a fallback.
    /// When no draw is clear the grid is scanned for a clear column.
    fn robot_spawn(&mut self) -> Position {
        let max_head_y = (self.grid.num_rows - self.robot_body_len()) as i32;
        let min_distance = self.goal_placer.min_safe_distance();

        let mut near = None;
        let mut last = None;
        for _ in 0..self.goal_placer.max_attempts() {
            let cell = self.grid.random_cell(&mut self.rng, true);
            let head = Position::new(cell.x, cell.y.min(max_head_y));
            last = Some(head);
            if !self.robot_spawn_is_clear(head) {
                continue;
            }
            if !self.player.is_too_close(head, min_distance) {
                return head;
            }
            near = near.or(Some(head));
        }
        if let Some(head) = near {
            return head;
        }

        let scan = (0..self.grid.num_cols as i32)
            .flat_map(|x| (0..=max_head_y).map(move |y| Position::new(x, y)))
            .find(|head| self.robot_spawn_is_clear(*head));
        match scan {
            Some(head) => {
                debug!(?head, "robot spawn found by scanning");
                head
            }
            None => {
                let head = last.unwrap_or_else(|| self.grid.center());
                warn!(?head, "no clear robot spawn, robot overlaps the player");
                head
            }
        }
    }

    fn robot_spawn_is_clear(&self, head: Position) -> bool {
        (-1..self.robot_body_len() as i32).all(|i| !self.player.intersects(head.moved_by(0, i)))
    }

    fn game_over(&mut self, crash: Crash) -> TickEvent {
        let new_high_score = self.score > self.high_score;
        self.set_phase(Phase::Over);
        info!(score = self.score, ?crash, new_high_score, "game over");

        if let Err(err) = self.sound.play_game_over_sound() {
            debug!(%err, "game over sound failed");
        }

        self.redraw(true);
        self.draw_game_over_message(new_high_score);

        if new_high_score {
            self.high_score = self.score;
            if let Err(err) = self.store.save_high_score(self.high_score) {
                warn!(%err, "could not save high score");
            }
        }

        TickEvent::GameOver {
            score: self.score,
            crash,
            new_high_score,
        }
    }

    fn set_phase(&mut self, next: Phase) {
        if self.phase != next {
            debug!(from = ?self.phase, to = ?next, "phase change");
            self.phase = next;
        }
    }

    fn redraw(&mut self, show_goal: bool) {
        self.renderer.clear();

        if show_goal {
            self.renderer.draw_segment(self.goal, SegmentColor::Green);
        }
        for segment in self.player.segments() {
            self.renderer.draw_segment(segment.pos, segment.color);
        }
        if self.robot_enabled {
            for segment in self.robot.segments() {
                self.renderer.draw_segment(segment.pos, segment.color);
            }
        }
    }

    fn draw_start_message(&mut self) {
        if self.display.is_touch() {
            self.renderer.draw_text(
                "To begin, tap on the Right, Left, or Top",
                FontSize::Medium,
                TextPosition::Headline,
            );
        } else {
            self.renderer.draw_text(
                "To begin, press the Right, Left, or Up arrow",
                FontSize::Large,
                TextPosition::Headline,
            );
            self.renderer.draw_text(
                "Press the Space Bar to pause.",
                FontSize::Large,
                TextPosition::BelowHeadline(2),
            );
        }
    }

    fn draw_game_over_message(&mut self, new_high_score: bool) {
        let headline = if new_high_score {
            "NEW HIGH SCORE!"
        } else {
            "GAME OVER!"
        };
        self.renderer
            .draw_text(headline, FontSize::Large, TextPosition::Headline);

        let hint = if self.display.is_touch() {
            "Tap anywhere to restart"
        } else {
            "Press the space bar or R to restart"
        };
        self.renderer
            .draw_text(hint, FontSize::Medium, TextPosition::BelowHeadline(1));
    }
}
