//! Fixed-timestep frame driver
//!
//! The host calls [`FrameDriver::frame`] from its animation callback with a
//! monotonic timestamp. The driver turns wall-clock time into whole
//! simulation ticks of [`FRAME_MS`] each.

use crate::consts::*;

#[derive(Debug, Clone, Default)]
pub struct FrameDriver {
    accumulator_ms: f32,
    last_time_ms: Option<f64>,
    running: bool,
}

impl FrameDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin producing ticks. The first frame after starting runs exactly one tick.
    pub fn start(&mut self) {
        self.accumulator_ms = 0.0;
        self.last_time_ms = None;
        self.running = true;
    }

    /// Stop producing ticks; pending time is discarded
    pub fn stop(&mut self) {
        self.running = false;
        self.accumulator_ms = 0.0;
        self.last_time_ms = None;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Record a host frame at `now_ms` and return how many ticks are due
    pub fn frame(&mut self, now_ms: f64) -> u32 {
        if !self.running {
            return 0;
        }

        // Calculate delta time
        let dt = match self.last_time_ms {
            Some(last) => ((now_ms - last) as f32).clamp(0.0, MAX_FRAME_DELTA_MS),
            None => FRAME_MS,
        };
        self.last_time_ms = Some(now_ms);
        self.accumulator_ms += dt;

        let mut ticks = 0;
        while self.accumulator_ms >= FRAME_MS && ticks < MAX_SUBSTEPS {
            self.accumulator_ms -= FRAME_MS;
            ticks += 1;
        }
        // Drop time we could not catch up on
        if ticks == MAX_SUBSTEPS {
            self.accumulator_ms = 0.0;
        }
        ticks
    }
}
