/// Fixed timestep accumulator.
/// Turns variable frame deltas into a whole number of logic ticks.
pub struct FixedTimestep {
    dt: f32,
    accumulator: f32,
    max_steps: u32,
}

impl FixedTimestep {
    pub fn new(dt: f32) -> Self {
        Self {
            dt,
            accumulator: 0.0,
            max_steps: 10,
        }
    }

    /// Add frame time to the accumulator. Returns the number of fixed steps to run.
    /// A long stall (tab in background) runs at most `max_steps` ticks.
    pub fn accumulate(&mut self, frame_dt: f32) -> u32 {
        self.accumulator += frame_dt.max(0.0);
        self.accumulator = self.accumulator.min(self.dt * self.max_steps as f32);
        let steps = (self.accumulator / self.dt) as u32;
        self.accumulator -= steps as f32 * self.dt;
        steps
    }

    pub fn dt(&self) -> f32 {
        self.dt
    }
}

/// Counts whole seconds out of fractional ticks.
/// Drives the level timer, which only ever shows integer seconds.
#[derive(Debug, Clone, Default)]
pub struct SecondClock {
    fraction: f32,
    running: bool,
}

impl SecondClock {
    /// A clock that starts running immediately.
    pub fn running() -> Self {
        Self {
            fraction: 0.0,
            running: true,
        }
    }

    /// Advance by `dt` seconds. Returns how many whole seconds elapsed.
    /// A paused clock swallows time.
    pub fn advance(&mut self, dt: f32) -> u32 {
        if !self.running {
            return 0;
        }
        self.fraction += dt.max(0.0);
        let whole = self.fraction.floor();
        self.fraction -= whole;
        whole as u32
    }

    pub fn pause(&mut self) {
        self.running = false;
    }

    pub fn resume(&mut self) {
        self.running = true;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}
