//! Terminal Snake runner (default binary).
//!
//! crossterm supplies input, the framebuffer renderer draws, and
//! `GameLoop` keeps the snake moving at a fixed cadence independent of how
//! often frames are polled.

use std::fs::File;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, MouseButton, MouseEvent, MouseEventKind};
use log::{error, info};
use simplelog::{Config, WriteLogger};

use tui_snake::config::SnakeConfig;
use tui_snake::core::{GameSnapshot, GameState, TickOutcome};
use tui_snake::engine::{GameLoop, TickListener};
use tui_snake::input::{input_event, InputEffect, InputTranslator};
use tui_snake::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use tui_snake::types::FRAME_MS;

fn main() -> Result<()> {
    let config = SnakeConfig::load();
    init_logging(&config);

    if config.reset_high_score {
        config.score_store().clear();
        info!("high score reset from the command line");
        println!("High score reset.");
        return Ok(());
    }

    let mut term = TerminalRenderer::new().with_mouse(config.pointer);
    term.enter()?;

    let result = run(&mut term, &config);

    // Always try to restore terminal state.
    let _ = term.exit();
    if let Err(e) = &result {
        error!("exiting on error: {:#}", e);
    }
    result
}

/// Logs go to a file; stdout is the game screen.
fn init_logging(config: &SnakeConfig) {
    match File::create(&config.log_path) {
        Ok(file) => {
            if let Err(e) = WriteLogger::init(config.log_level, Config::default(), file) {
                eprintln!("tui-snake: logging disabled: {}", e);
            }
        }
        Err(e) => eprintln!(
            "tui-snake: cannot open log file {}: {}",
            config.log_path.display(),
            e
        ),
    }
}

/// Latest snapshot plus the framebuffer it is drawn into.
struct Screen {
    snap: GameSnapshot,
    fb: FrameBuffer,
    dirty: bool,
}

impl Screen {
    fn new(viewport: Viewport) -> Self {
        Self {
            snap: GameSnapshot::default(),
            fb: FrameBuffer::new(viewport.width, viewport.height),
            dirty: true,
        }
    }

    fn refresh(&mut self, game: &GameState) {
        game.snapshot_into(&mut self.snap);
        self.dirty = true;
    }
}

impl TickListener for Screen {
    fn on_tick(&mut self, state: &GameState, outcome: TickOutcome) {
        // Idle ticks on a finished run change nothing on screen.
        if outcome != TickOutcome::Idle {
            self.refresh(state);
        }
    }
}

fn run(term: &mut TerminalRenderer, config: &SnakeConfig) -> Result<()> {
    let view = GameView::default().with_pointer(config.pointer);
    let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
    let mut viewport = Viewport::new(w, h);

    let seed = config.seed_or_clock();
    let mut game = GameState::new(
        view.grid_for_viewport(viewport),
        seed,
        config.score_store(),
    );
    info!(
        "starting on a {}x{} grid, seed {}, tick {}ms",
        game.grid().width(),
        game.grid().height(),
        seed,
        config.tick_ms
    );

    let mut game_loop = GameLoop::new(config.tick_ms);
    let mut translator = InputTranslator::new();
    let mut screen = Screen::new(viewport);
    screen.refresh(&game);

    let clock = Instant::now();
    let now_ms = || clock.elapsed().as_millis() as u64;

    loop {
        if screen.dirty {
            view.render_into(&screen.snap, viewport, &mut screen.fb);
            term.draw_swap(&mut screen.fb)?;
            screen.dirty = false;
        }

        let wait = game_loop.until_next_tick(now_ms()).min(FRAME_MS as u64);
        if event::poll(Duration::from_millis(wait))? {
            let ev = event::read()?;
            match ev {
                Event::Resize(w, h) => {
                    viewport = Viewport::new(w, h);
                    // Takes effect on the next reset.
                    game.resize(view.grid_for_viewport(viewport));
                    term.invalidate();
                    screen.dirty = true;
                }
                Event::Mouse(MouseEvent {
                    kind: MouseEventKind::Down(MouseButton::Left),
                    column,
                    row,
                    ..
                }) if view
                    .restart_button(&screen.snap, viewport)
                    .is_some_and(|button| button.contains(column, row)) =>
                {
                    game.reset();
                    game_loop.rearm();
                    screen.refresh(&game);
                }
                _ => {
                    if let Some(input) = input_event(&ev) {
                        match translator.translate(input, &mut game) {
                            InputEffect::Quit => return Ok(()),
                            InputEffect::Restarted => {
                                game_loop.rearm();
                                screen.refresh(&game);
                            }
                            InputEffect::Turned(_) | InputEffect::None => {}
                        }
                    }
                }
            }
        }

        game_loop.on_frame(now_ms(), &mut game, &mut screen);
    }
}
