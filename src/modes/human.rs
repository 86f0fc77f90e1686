use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{stderr, Stderr};
use std::time::Duration;
use tokio::{task::JoinHandle, time::interval};
use tracing::{info, warn};

use crate::game::{GameConfig, GameEngine, RandRange};
use crate::input::{ControlFlags, DirectionSlot, InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::{Board, Hud, Renderer};

/// Interactive game: one task samples the keyboard, the loop here steps the engine
pub struct HumanMode {
    config: GameConfig,
    next_seed: Option<u64>,
    engine: GameEngine,
    board: Board,
    metrics: GameMetrics,
    renderer: Renderer,
    game_over: bool,
    direction: DirectionSlot,
    controls: ControlFlags,
}

impl HumanMode {
    /// Set up the first game. With a `seed`, fruit placement is reproducible.
    pub fn new(config: GameConfig, seed: Option<u64>) -> Result<Self> {
        let engine = new_engine(&config, seed)?;
        let board = Board::from_engine(&engine);

        Ok(Self {
            config,
            next_seed: seed.map(|s| s.wrapping_add(1)),
            engine,
            board,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            game_over: false,
            direction: DirectionSlot::new(),
            controls: ControlFlags::new(),
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        let input_task = spawn_input_task(self.direction.clone(), self.controls.clone());

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        input_task.abort();
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut tick_timer = interval(Duration::from_millis(self.config.tick_millis));

        // Render at 30 FPS (33ms per frame)
        let mut render_timer = interval(Duration::from_millis(33));

        loop {
            tokio::select! {
                _ = tick_timer.tick() => {
                    self.tick()?;
                }

                _ = render_timer.tick() => {
                    self.metrics.update();
                    let hud = self.hud();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &self.board, &hud, &self.metrics);
                    }).context("Failed to draw frame")?;
                }

                _ = tokio::signal::ctrl_c() => {
                    self.controls.request_quit();
                }
            }

            if self.controls.should_quit() {
                break;
            }
        }

        Ok(())
    }

    /// One period of the game loop
    ///
    /// Nothing moves until the first direction arrives, and nothing moves after
    /// a fatal step until the player restarts.
    fn tick(&mut self) -> Result<()> {
        if self.controls.take_restart() {
            return self.reset_game();
        }
        if self.game_over {
            return Ok(());
        }
        let Some(direction) = self.direction.load() else {
            return Ok(());
        };

        let outcome = self.engine.step(direction);
        if outcome.is_game_over() {
            info!(
                fruits = self.engine.fruits_eaten(),
                length = self.engine.snake_len(),
                ?outcome,
                "game over"
            );
            self.metrics.on_game_over(self.engine.fruits_eaten(), &outcome);
            self.game_over = true;
        } else {
            self.board.apply(outcome.changes());
        }

        Ok(())
    }

    fn reset_game(&mut self) -> Result<()> {
        self.engine = new_engine(&self.config, self.next_seed)?;
        self.next_seed = self.next_seed.map(|s| s.wrapping_add(1));
        self.board = Board::from_engine(&self.engine);
        self.direction.clear();
        self.game_over = false;
        self.metrics.on_game_start();
        Ok(())
    }

    fn hud(&self) -> Hud {
        Hud {
            fruits_eaten: self.engine.fruits_eaten(),
            snake_len: self.engine.snake_len(),
            waiting: self.direction.load().is_none(),
            game_over: self.game_over,
        }
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

fn new_engine(config: &GameConfig, seed: Option<u64>) -> Result<GameEngine> {
    let rng = seed.map_or_else(RandRange::from_entropy, RandRange::seeded);
    GameEngine::from_config(config, rng).context("Failed to set up game")
}

/// Read terminal events and publish them through the shared slot and flags
fn spawn_input_task(direction: DirectionSlot, controls: ControlFlags) -> JoinHandle<()> {
    tokio::spawn(async move {
        let handler = InputHandler::new();
        let mut events = EventStream::new();

        while let Some(event) = events.next().await {
            let key = match event {
                // Only process key press events, not release
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => key,
                Ok(_) => continue,
                Err(err) => {
                    warn!(%err, "terminal event stream failed");
                    controls.request_quit();
                    break;
                }
            };

            match handler.handle_key_event(key) {
                KeyAction::Steer(d) => direction.store(d),
                KeyAction::Restart => controls.request_restart(),
                KeyAction::Quit => {
                    controls.request_quit();
                    break;
                }
                KeyAction::None => {}
            }
        }
    })
}
