//=========================================================================
// Frame Pacer
//=========================================================================
//
// Keeps each frame at least as long as the configured budget and measures
// the real time between frame starts.
//
// Architecture:
//   frame_start ──work──> finish_frame() ──sleep(remainder)──> next start
//                                └─> delta = next start - frame_start
//
//=========================================================================

//=== External Dependencies ===============================================

use std::thread;
use std::time::{Duration, Instant};

use log::trace;

//=== FramePacer ==========================================================

#[derive(Debug, Clone)]
pub struct FramePacer {
    budget: Duration,
    frame_start: Instant,
    delta: f32,
}

impl FramePacer {
    /// Starts timing the first frame. Its delta is the budget itself.
    pub fn new(budget: Duration) -> Self {
        Self {
            budget,
            frame_start: Instant::now(),
            delta: budget.as_secs_f32(),
        }
    }

    pub fn budget(&self) -> Duration {
        self.budget
    }

    /// Seconds elapsed between the two most recent frame starts.
    pub fn delta(&self) -> f32 {
        self.delta
    }

    /// Sleeps out the rest of the budget and starts the next frame.
    ///
    /// Returns the new delta. Frames that overrun the budget do not sleep.
    pub fn finish_frame(&mut self) -> f32 {
        let elapsed = self.frame_start.elapsed();
        if elapsed < self.budget {
            thread::sleep(self.budget - elapsed);
        } else if !self.budget.is_zero() {
            trace!("Frame overran budget: {:?} > {:?}", elapsed, self.budget);
        }

        let now = Instant::now();
        self.delta = now.duration_since(self.frame_start).as_secs_f32();
        self.frame_start = now;
        self.delta
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
