use std::time::Duration;

use web_time::Instant;

/// One invocation of the frame callback.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    /// Frames run before this one.
    pub index: u64,
    /// Seconds since the previous tick, 0.0 on the first.
    pub delta: f32,
}

/// How the run loop should wait after an event batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wait {
    Poll,
    Until(Instant),
}

/// Decides when frames are due. A rate of 0 follows the host's native rate:
/// every poll is due and presentation (vsync) does the throttling.
pub struct FramePacer {
    interval: Option<Duration>,
    deadline: Instant,
    last_tick: Option<Instant>,
    frames: u64,
    // A scheduled frame was requested but not run yet
    pending: bool,
}

impl FramePacer {
    pub fn new(fps: u32, now: Instant) -> Self {
        let interval = (fps > 0).then(|| Duration::from_secs_f64(1.0 / fps as f64));
        Self {
            interval,
            deadline: now,
            last_tick: None,
            frames: 0,
            pending: false,
        }
    }

    pub fn is_native(&self) -> bool {
        self.interval.is_none()
    }

    /// Returns whether a frame is due at `now`, advancing the deadline if so.
    pub fn poll(&mut self, now: Instant) -> bool {
        let Some(interval) = self.interval else {
            return true;
        };
        if now < self.deadline {
            return false;
        }

        self.deadline += interval;
        // Fell behind by more than a frame, skip ahead instead of bursting
        if self.deadline <= now {
            self.deadline = now + interval;
        }
        self.pending = true;
        true
    }

    /// Whether a redraw should run the frame callback. At a fixed rate only
    /// redraws following a due `poll` count, once each.
    pub fn take_due(&mut self) -> bool {
        self.is_native() || std::mem::take(&mut self.pending)
    }

    pub fn wait(&self) -> Wait {
        if self.is_native() {
            Wait::Poll
        } else {
            Wait::Until(self.deadline)
        }
    }

    /// Frames ticked so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn tick(&mut self, now: Instant) -> Tick {
        let delta = self
            .last_tick
            .map(|last| now.saturating_duration_since(last).as_secs_f32())
            .unwrap_or(0.0);
        let tick = Tick {
            index: self.frames,
            delta,
        };
        self.last_tick = Some(now);
        self.frames += 1;
        tick
    }
}
