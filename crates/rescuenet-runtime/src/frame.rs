#![forbid(unsafe_code)]

//! Host-driven frame queue for native hosts and tests.
//!
//! [`FrameQueue`] implements [`FrameScheduler`] without a display: callbacks
//! requested during a frame are queued, and the host runs one frame at a time
//! with [`FrameQueue::pump`]. Time comes from a [`TimeSource`]: the
//! [`WallClock`] for real pacing, or a [`ManualClock`] for deterministic
//! stepping.
//!
//! ```
//! use rescuenet_runtime::{CountAnimation, FrameQueue, ManualClock};
//!
//! let clock = ManualClock::new();
//! let frames = FrameQueue::with_clock(clock.clone());
//! let donors = CountAnimation::with_duration(frames.clone(), 100.0, 1000.0);
//!
//! donors.animate();
//! clock.set(500.0);
//! frames.pump();
//! assert_eq!(donors.current_value(), 87.0);
//! ```

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;

use web_time::Instant;

use crate::host::{FrameCallback, FrameScheduler};

/// A monotonic millisecond clock.
pub trait TimeSource {
    fn now_ms(&self) -> f64;
}

/// Milliseconds elapsed since the clock was created.
#[derive(Debug, Clone, Copy)]
pub struct WallClock {
    origin: Instant,
}

impl WallClock {
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for WallClock {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for WallClock {
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

/// A clock that only moves when told to. Clones share the same time.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<f64>>,
}

impl ManualClock {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, ms: f64) {
        self.now.set(ms);
    }

    pub fn advance(&self, ms: f64) {
        self.now.set(self.now.get() + ms);
    }
}

impl TimeSource for ManualClock {
    fn now_ms(&self) -> f64 {
        self.now.get()
    }
}

/// Queue of pending frame callbacks. Clones share the same queue.
pub struct FrameQueue<C: TimeSource = WallClock> {
    clock: C,
    pending: Rc<RefCell<VecDeque<FrameCallback>>>,
    frames: Rc<Cell<u64>>,
}

impl<C: TimeSource + Clone> Clone for FrameQueue<C> {
    fn clone(&self) -> Self {
        Self {
            clock: self.clock.clone(),
            pending: Rc::clone(&self.pending),
            frames: Rc::clone(&self.frames),
        }
    }
}

impl<C: TimeSource> fmt::Debug for FrameQueue<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameQueue")
            .field("pending", &self.pending())
            .field("frames", &self.frames.get())
            .finish()
    }
}

impl FrameQueue<WallClock> {
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(WallClock::new())
    }
}

impl Default for FrameQueue<WallClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: TimeSource> FrameQueue<C> {
    #[must_use]
    pub fn with_clock(clock: C) -> Self {
        Self {
            clock,
            pending: Rc::new(RefCell::new(VecDeque::new())),
            frames: Rc::new(Cell::new(0)),
        }
    }

    /// Run one frame: every callback queued before this call receives the
    /// current clock time. Callbacks requested while the frame runs wait for
    /// the next pump. Returns the number of callbacks run.
    pub fn pump(&self) -> usize {
        let batch: Vec<FrameCallback> = self.pending.borrow_mut().drain(..).collect();
        if batch.is_empty() {
            return 0;
        }
        let timestamp = self.clock.now_ms();
        self.frames.set(self.frames.get() + 1);
        let ran = batch.len();
        for callback in batch {
            callback(timestamp);
        }
        ran
    }

    /// Callbacks waiting for the next frame.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.pending.borrow().len()
    }

    /// Frames that ran at least one callback.
    #[must_use]
    pub fn frames_run(&self) -> u64 {
        self.frames.get()
    }

    /// Drop every pending callback without running it.
    pub fn clear(&self) {
        self.pending.borrow_mut().clear();
    }
}

impl FrameQueue<ManualClock> {
    /// Advance the clock by `frame_ms` and pump until nothing is pending or
    /// the clock passes `until_ms`. Returns the number of frames run.
    pub fn run_until(&self, until_ms: f64, frame_ms: f64) -> usize {
        let mut frames = 0;
        while self.pending() > 0 && self.clock.now_ms() < until_ms {
            self.clock.advance(frame_ms);
            self.pump();
            frames += 1;
        }
        frames
    }

    /// The clock driving this queue.
    #[must_use]
    pub fn clock(&self) -> &ManualClock {
        &self.clock
    }
}

impl<C: TimeSource> FrameScheduler for FrameQueue<C> {
    fn now(&self) -> f64 {
        self.clock.now_ms()
    }

    fn request_frame(&self, callback: FrameCallback) {
        self.pending.borrow_mut().push_back(callback);
    }
}
