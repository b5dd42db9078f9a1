//! Session object owned by the host loop
//!
//! Bundles the game state, pending input, the frame driver and presentation
//! settings. Hosts feed it input events and clock timestamps and get back a
//! [`Frame`] to draw.

use serde::Serialize;

use crate::consts::FRAME_MS;
use crate::driver::FrameDriver;
use crate::renderer::{DrawCommand, scene};
use crate::score_label;
use crate::settings::Settings;
use crate::sim::{self, GameEvent, GamePhase, GameState, TickInput};
use crate::tuning::Tuning;

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Space
    Jump,
    /// R
    Restart,
    Other,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value
    pub fn from_dom(key: &str) -> Self {
        match key {
            " " | "Spacebar" => Key::Jump,
            "r" | "R" => Key::Restart,
            _ => Key::Other,
        }
    }
}

/// Output of one host frame
#[derive(Debug, Clone, Default)]
pub struct Frame {
    /// Draw commands in painter's order
    pub commands: Vec<DrawCommand>,
    /// Everything that happened since the previous frame
    pub events: Vec<GameEvent>,
    /// Simulation ticks run for this frame
    pub ticks: u32,
    /// New text for the score display, when it changed
    pub score_text: Option<String>,
    /// The scene differs from the last redrawn frame
    pub redraw: bool,
}

/// Outcome of a headless run
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub seed: u64,
    pub ticks: u64,
    pub score: u32,
    pub speed: f32,
    pub pairs_spawned: u32,
    pub game_over: bool,
}

pub struct Session {
    pub state: GameState,
    pub settings: Settings,
    input: TickInput,
    driver: FrameDriver,
    /// Events from transitions that happened between frames
    pending: Vec<GameEvent>,
    /// Phase of the last frame flagged for redraw, None once the surface is stale
    drawn: Option<GamePhase>,
}

impl Session {
    pub fn new(seed: u64, tuning: Tuning, settings: Settings, width: f32, height: f32) -> Self {
        let input = TickInput {
            jump: false,
            autopilot: settings.autopilot,
        };
        Self {
            state: GameState::new(seed, tuning, width, height),
            settings,
            input,
            driver: FrameDriver::new(),
            pending: Vec::new(),
            drawn: None,
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    /// Whether the driver is producing ticks
    pub fn is_ticking(&self) -> bool {
        self.driver.is_running()
    }

    /// Start control. Returns false when not in NotStarted.
    pub fn start(&mut self) -> bool {
        match sim::start(&mut self.state) {
            Some(event) => {
                self.input.jump = false;
                self.driver.start();
                self.pending.push(event);
                true
            }
            None => false,
        }
    }

    /// Restart key. Returns false when not in GameOver.
    pub fn restart(&mut self) -> bool {
        match sim::restart(&mut self.state) {
            Some(event) => {
                self.input.jump = false;
                self.driver.start();
                self.pending.push(event);
                true
            }
            None => false,
        }
    }

    /// Queue a jump for the next tick. Ignored unless running.
    pub fn jump(&mut self) {
        if self.state.is_running() {
            self.input.jump = true;
        }
    }

    pub fn set_autopilot(&mut self, on: bool) {
        self.settings.autopilot = on;
        self.input.autopilot = on;
    }

    pub fn handle_key(&mut self, key: Key) {
        match key {
            Key::Jump => self.jump(),
            Key::Restart => {
                self.restart();
            }
            Key::Other => {}
        }
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        sim::resize(&mut self.state, width, height);
        self.invalidate();
    }

    /// Force the next frame to redraw, e.g. after the surface was lost
    pub fn invalidate(&mut self) {
        self.drawn = None;
    }

    /// Advance exactly one tick of `dt_ms` and build the frame
    pub fn tick(&mut self, dt_ms: f32) -> Frame {
        let mut events = std::mem::take(&mut self.pending);
        let ran = self.state.is_running();
        self.step(dt_ms, &mut events);
        self.finish(events, u32::from(ran))
    }

    /// Host animation callback with a monotonic timestamp
    pub fn frame(&mut self, now_ms: f64) -> Frame {
        let mut events = std::mem::take(&mut self.pending);
        let due = self.driver.frame(now_ms);
        let mut ticks = 0;
        while ticks < due && self.state.is_running() {
            self.step(FRAME_MS, &mut events);
            ticks += 1;
        }
        self.finish(events, ticks)
    }

    /// Play with the autopilot until game over or `max_ticks`
    pub fn run_headless(&mut self, max_ticks: u64) -> RunSummary {
        self.set_autopilot(true);
        self.start();
        let mut pairs_spawned = 0;
        while self.state.is_running() && self.state.time_ticks < max_ticks {
            let frame = self.tick(FRAME_MS);
            pairs_spawned += frame
                .events
                .iter()
                .filter(|e| matches!(e, GameEvent::ObstaclesSpawned))
                .count() as u32;
        }
        RunSummary {
            seed: self.state.seed,
            ticks: self.state.time_ticks,
            score: self.state.score,
            speed: self.state.speed,
            pairs_spawned,
            game_over: self.state.phase == GamePhase::GameOver,
        }
    }

    fn step(&mut self, dt_ms: f32, events: &mut Vec<GameEvent>) {
        let tick_events = sim::tick(&mut self.state, &self.input, dt_ms);
        // Jump is one-shot
        self.input.jump = false;
        if tick_events
            .iter()
            .any(|e| matches!(e, GameEvent::GameOver { .. }))
        {
            self.driver.stop();
        }
        events.extend(tick_events);
    }

    fn finish(&mut self, events: Vec<GameEvent>, ticks: u32) -> Frame {
        let redraw = ticks > 0 || !events.is_empty() || self.drawn != Some(self.state.phase);
        if redraw {
            self.drawn = Some(self.state.phase);
        }
        let score_text = events
            .iter()
            .any(|e| {
                matches!(
                    e,
                    GameEvent::Started | GameEvent::Restarted | GameEvent::Scored { .. }
                )
            })
            .then(|| score_label(self.state.score));
        Frame {
            commands: scene::build(&self.state, &self.settings),
            events,
            ticks,
            score_text,
            redraw,
        }
    }
}
