use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use crate::config::clamp_frame_rate;

/// Fixed timestep accumulator.
/// Runs game logic at the configured tick rate regardless of frame time.
pub struct FixedTimestep {
    /// The fixed delta time per tick.
    dt: f32,
    /// Accumulated time from variable frame deltas.
    accumulator: f32,
}

impl FixedTimestep {
    pub fn new(dt: f32) -> Self {
        Self {
            dt,
            accumulator: 0.0,
        }
    }

    /// Add frame time to the accumulator. Returns the number of ticks to run.
    pub fn accumulate(&mut self, frame_dt: f32) -> u32 {
        self.accumulator += frame_dt;
        // Cap to prevent spiral of death (max 10 steps per frame)
        self.accumulator = self.accumulator.min(self.dt * 10.0);
        let steps = (self.accumulator / self.dt) as u32;
        self.accumulator -= steps as f32 * self.dt;
        steps
    }

    /// The fixed delta time.
    pub fn dt(&self) -> f32 {
        self.dt
    }
}

/// Sleeps out the rest of each frame so ticks happen at a fixed rate.
///
/// A frame that takes longer than the budget is not made up for: the next
/// frame simply starts late.
#[derive(Debug)]
pub struct FramePacer {
    budget: Duration,
    frame_start: Instant,
    overruns: u64,
}

impl FramePacer {
    /// Pace frames at `frame_rate` per second, clamped to
    /// [`MIN_FRAME_RATE`](crate::config::MIN_FRAME_RATE).
    pub fn new(frame_rate: f32) -> Self {
        let rate = clamp_frame_rate(frame_rate);
        if rate != frame_rate {
            log::warn!("frame rate {frame_rate} clamped to {rate}");
        }
        Self {
            budget: Duration::from_secs_f32(1.0 / rate),
            frame_start: Instant::now(),
            overruns: 0,
        }
    }

    /// Time allotted to one frame.
    pub fn budget(&self) -> Duration {
        self.budget
    }

    /// Number of frames that ran over budget so far.
    pub fn overruns(&self) -> u64 {
        self.overruns
    }

    /// Sleep for whatever is left of the current frame and start the next
    /// one. Returns true when the frame overran its budget.
    pub fn finish_frame(&mut self) -> bool {
        let elapsed = self.frame_start.elapsed();
        let overran = match self.budget.checked_sub(elapsed) {
            Some(rest) if !rest.is_zero() => {
                thread::sleep(rest);
                false
            }
            _ => {
                self.overruns += 1;
                log::debug!(
                    "frame overran by {:?} (budget {:?})",
                    elapsed - self.budget,
                    self.budget
                );
                true
            }
        };
        self.frame_start = Instant::now();
        overran
    }
}

/// Call `frame` once per tick until `quit` is raised, then return the number
/// of frames that ran. `frame` receives the frame index.
pub fn run_frames(pacer: &mut FramePacer, quit: &AtomicBool, mut frame: impl FnMut(u64)) -> u64 {
    let mut count = 0;
    log::info!("frame loop started at {:?} per frame", pacer.budget());
    while !quit.load(Ordering::Acquire) {
        frame(count);
        count += 1;
        pacer.finish_frame();
    }
    log::info!("frame loop stopped after {count} frames");
    count
}
