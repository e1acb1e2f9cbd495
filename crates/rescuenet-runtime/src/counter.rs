#![forbid(unsafe_code)]

//! Count-up animation for headline numbers ("12,450 donors").
//!
//! A [`CountAnimation`] drives one numeric value from its current value to a
//! target over a fixed duration. Each step runs inside a host frame callback
//! and schedules the next one, so control returns to the host between steps.
//!
//! # Curve
//!
//! ```text
//! progress = clamp((t - t0) / duration, 0, 1)
//! eased    = 1 - (1 - progress)^3
//! value    = floor(start + (target - start) * eased)      while progress < 1
//! value    = target                                       at progress == 1
//! ```
//!
//! The floor undercounts until the last frame, which snaps to the exact
//! target.
//!
//! # Invariants
//!
//! 1. At most one frame chain is in flight per instance; `animate()` while
//!    animating is a no-op.
//! 2. `is_animating()` is true exactly while a chain is in flight.
//! 3. When a chain completes, `current_value() == target_value()` exactly.
//! 4. After [`cancel`](CountAnimation::cancel) or drop, pending frame
//!    callbacks do nothing.

use std::cell::Cell;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::host::FrameScheduler;
use crate::reactive::Observable;

/// Duration used by [`CountAnimation::new`].
pub const DEFAULT_DURATION_MS: f64 = 2000.0;

/// Counter settings.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "config", derive(serde::Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct CounterConfig {
    pub duration_ms: f64,
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            duration_ms: DEFAULT_DURATION_MS,
        }
    }
}

/// Cubic ease-out.
#[must_use]
pub fn ease_out_cubic(progress: f64) -> f64 {
    1.0 - (1.0 - progress).powi(3)
}

/// Displayed value at `progress` (`0..1`) between `start` and `target`.
#[must_use]
pub fn interpolate(start: f64, target: f64, progress: f64) -> f64 {
    (start + (target - start) * ease_out_cubic(progress)).floor()
}

fn progress(elapsed: f64, duration_ms: f64) -> f64 {
    if duration_ms <= 0.0 {
        return 1.0;
    }
    (elapsed / duration_ms).clamp(0.0, 1.0)
}

struct Inner {
    scheduler: Box<dyn FrameScheduler>,
    value: Observable<f64>,
    animating: Observable<bool>,
    target: f64,
    duration_ms: f64,
    /// Bumped on every start and cancel; frames from older runs are inert.
    run: Cell<u64>,
}

#[derive(Clone, Copy)]
struct Run {
    id: u64,
    started_at: f64,
    start_value: f64,
}

/// Animates one number toward a target on host frame callbacks.
pub struct CountAnimation {
    inner: Rc<Inner>,
}

impl fmt::Debug for CountAnimation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CountAnimation")
            .field("current_value", &self.current_value())
            .field("target_value", &self.inner.target)
            .field("duration_ms", &self.inner.duration_ms)
            .field("is_animating", &self.is_animating())
            .finish()
    }
}

impl CountAnimation {
    /// Counter toward `target_value` over [`DEFAULT_DURATION_MS`].
    pub fn new(scheduler: impl FrameScheduler + 'static, target_value: f64) -> Self {
        Self::with_duration(scheduler, target_value, DEFAULT_DURATION_MS)
    }

    /// Counter toward `target_value` over `duration_ms`. A non-positive
    /// duration jumps to the target on the first frame.
    pub fn with_duration(
        scheduler: impl FrameScheduler + 'static,
        target_value: f64,
        duration_ms: f64,
    ) -> Self {
        Self {
            inner: Rc::new(Inner {
                scheduler: Box::new(scheduler),
                value: Observable::new(0.0),
                animating: Observable::new(false),
                target: target_value,
                duration_ms,
                run: Cell::new(0),
            }),
        }
    }

    /// Counter built from a [`CounterConfig`].
    pub fn with_config(
        scheduler: impl FrameScheduler + 'static,
        target_value: f64,
        config: CounterConfig,
    ) -> Self {
        Self::with_duration(scheduler, target_value, config.duration_ms)
    }

    /// Start counting from the current value. No-op while already animating.
    pub fn animate(&self) {
        let inner = &self.inner;
        if inner.animating.get() {
            return;
        }
        let id = inner.run.get() + 1;
        inner.run.set(id);
        let run = Run {
            id,
            started_at: inner.scheduler.now(),
            start_value: inner.value.get(),
        };

        #[cfg(feature = "tracing")]
        tracing::debug!(
            target: "rescuenet::counter",
            run = id,
            from = run.start_value,
            to = inner.target,
            duration_ms = inner.duration_ms,
            "count animation started"
        );

        inner.animating.set(true);
        schedule(inner, run);
    }

    /// Stop an in-flight animation, keeping the last displayed value.
    pub fn cancel(&self) {
        let inner = &self.inner;
        if !inner.animating.get() {
            return;
        }
        inner.run.set(inner.run.get() + 1);
        inner.animating.set(false);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            target: "rescuenet::counter",
            at = inner.value.get(),
            "count animation cancelled"
        );
    }

    #[must_use]
    pub fn current_value(&self) -> f64 {
        self.inner.value.get()
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.inner.animating.get()
    }

    #[must_use]
    pub fn target_value(&self) -> f64 {
        self.inner.target
    }

    #[must_use]
    pub fn duration_ms(&self) -> f64 {
        self.inner.duration_ms
    }

    /// The displayed value, for binding.
    #[must_use]
    pub fn value(&self) -> Observable<f64> {
        self.inner.value.clone()
    }

    /// The animating flag, for binding.
    #[must_use]
    pub fn animating(&self) -> Observable<bool> {
        self.inner.animating.clone()
    }
}

fn schedule(inner: &Rc<Inner>, run: Run) {
    let weak: Weak<Inner> = Rc::downgrade(inner);
    inner.scheduler.request_frame(Box::new(move |timestamp| {
        if let Some(inner) = weak.upgrade() {
            step(&inner, run, timestamp);
        }
    }));
}

fn step(inner: &Rc<Inner>, run: Run, timestamp: f64) {
    if inner.run.get() != run.id {
        return;
    }
    let progress = progress(timestamp - run.started_at, inner.duration_ms);
    if progress < 1.0 {
        inner
            .value
            .set(interpolate(run.start_value, inner.target, progress));
        // A value subscriber may have cancelled this run.
        if inner.run.get() == run.id {
            schedule(inner, run);
        }
    } else {
        inner.value.set(inner.target);
        inner.animating.set(false);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            target: "rescuenet::counter",
            run = run.id,
            value = inner.target,
            "count animation finished"
        );
    }
}

/// Format a counter value with thousands separators (`12450.0` → `"12,450"`).
///
/// Fractions are truncated toward zero; the sign is kept.
#[must_use]
pub fn format_count(value: f64) -> String {
    let truncated = value.trunc();
    let digits = format!("{:.0}", truncated.abs());
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if truncated < 0.0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::{FrameQueue, ManualClock, TimeSource};

    fn counter(target: f64, duration: f64) -> (CountAnimation, FrameQueue<ManualClock>) {
        let frames = FrameQueue::with_clock(ManualClock::new());
        (
            CountAnimation::with_duration(frames.clone(), target, duration),
            frames,
        )
    }

    #[test]
    fn ease_out_endpoints() {
        assert_eq!(ease_out_cubic(0.0), 0.0);
        assert_eq!(ease_out_cubic(1.0), 1.0);
        assert_eq!(ease_out_cubic(0.5), 0.875);
    }

    #[test]
    fn halfway_shows_87_of_100() {
        let (c, frames) = counter(100.0, 1000.0);
        c.animate();
        frames.clock().set(500.0);
        frames.pump();
        assert_eq!(c.current_value(), 87.0);
        assert!(c.is_animating());

        frames.clock().set(1000.0);
        frames.pump();
        assert_eq!(c.current_value(), 100.0);
        assert!(!c.is_animating());
        assert_eq!(frames.pending(), 0);
    }

    #[test]
    fn default_duration_is_two_seconds() {
        let frames = FrameQueue::with_clock(ManualClock::new());
        let c = CountAnimation::new(frames, 10.0);
        assert_eq!(c.duration_ms(), 2000.0);
        assert_eq!(c.target_value(), 10.0);
        assert_eq!(c.current_value(), 0.0);
    }

    #[test]
    fn zero_duration_jumps_on_first_frame() {
        let (c, frames) = counter(250.0, 0.0);
        c.animate();
        assert_eq!(c.current_value(), 0.0);
        frames.pump();
        assert_eq!(c.current_value(), 250.0);
        assert!(!c.is_animating());
    }

    #[test]
    fn negative_duration_jumps_on_first_frame() {
        let (c, frames) = counter(-5.0, -100.0);
        c.animate();
        frames.pump();
        assert_eq!(c.current_value(), -5.0);
    }

    #[test]
    fn second_animate_does_not_start_second_chain() {
        let (c, frames) = counter(100.0, 1000.0);
        c.animate();
        c.animate();
        assert_eq!(frames.pending(), 1);
        frames.clock().set(100.0);
        frames.pump();
        assert_eq!(frames.pending(), 1);
    }

    #[test]
    fn fractional_target_snaps_exactly() {
        let (c, frames) = counter(99.5, 300.0);
        c.animate();
        frames.run_until(10_000.0, 16.0);
        assert_eq!(c.current_value(), 99.5);
    }

    #[test]
    fn negative_target_floors_then_snaps() {
        let (c, frames) = counter(-100.0, 1000.0);
        c.animate();
        frames.clock().set(500.0);
        frames.pump();
        assert_eq!(c.current_value(), -88.0);
        frames.clock().set(2000.0);
        frames.pump();
        assert_eq!(c.current_value(), -100.0);
    }

    #[test]
    fn frame_before_start_time_stays_at_start() {
        let frames = FrameQueue::with_clock(ManualClock::new());
        frames.clock().set(100.0);
        let c = CountAnimation::with_duration(frames.clone(), 50.0, 1000.0);
        c.animate();
        frames.clock().set(90.0);
        frames.pump();
        assert_eq!(c.current_value(), 0.0);
        assert!(c.is_animating());
    }

    #[test]
    fn restart_counts_from_current_value() {
        let (c, frames) = counter(100.0, 1000.0);
        c.animate();
        frames.run_until(5000.0, 50.0);
        assert_eq!(c.current_value(), 100.0);

        // Starting again from the target stays at the target.
        let start = frames.clock().now_ms();
        c.animate();
        frames.clock().set(start + 500.0);
        frames.pump();
        assert_eq!(c.current_value(), 100.0);
    }

    #[test]
    fn cancel_makes_pending_frame_inert() {
        let (c, frames) = counter(100.0, 1000.0);
        c.animate();
        frames.clock().set(500.0);
        frames.pump();
        c.cancel();
        assert!(!c.is_animating());

        frames.clock().set(1000.0);
        frames.pump();
        assert_eq!(c.current_value(), 87.0);
        assert_eq!(frames.pending(), 0);
    }

    #[test]
    fn animate_after_cancel_resumes_from_last_value() {
        let (c, frames) = counter(100.0, 1000.0);
        c.animate();
        frames.clock().set(500.0);
        frames.pump();
        c.cancel();

        c.animate();
        frames.clock().set(1000.0);
        frames.pump();
        // The stale frame from the cancelled run was inert; the new run's
        // first frame sits at its halfway point between 87 and 100.
        assert_eq!(c.current_value(), interpolate(87.0, 100.0, 0.5));
        assert!(c.is_animating());
    }

    #[test]
    fn dropped_counter_leaves_inert_frames() {
        let (c, frames) = counter(100.0, 1000.0);
        let value = c.value();
        c.animate();
        drop(c);
        frames.clock().set(500.0);
        assert_eq!(frames.pump(), 1);
        assert_eq!(value.get(), 0.0);
        assert_eq!(frames.pending(), 0);
    }

    #[test]
    fn value_observable_reports_each_frame() {
        let (c, frames) = counter(100.0, 1000.0);
        let seen = Rc::new(std::cell::RefCell::new(Vec::new()));
        let s = Rc::clone(&seen);
        let _sub = c.value().subscribe(move |v| s.borrow_mut().push(*v));

        c.animate();
        for t in [250.0, 500.0, 1000.0] {
            frames.clock().set(t);
            frames.pump();
        }
        assert_eq!(*seen.borrow(), vec![57.0, 87.0, 100.0]);
    }

    #[test]
    fn independent_counters_do_not_interact() {
        let frames = FrameQueue::with_clock(ManualClock::new());
        let a = CountAnimation::with_duration(frames.clone(), 10.0, 100.0);
        let b = CountAnimation::with_duration(frames.clone(), 1000.0, 400.0);
        a.animate();
        b.animate();
        frames.clock().set(100.0);
        frames.pump();
        assert_eq!(a.current_value(), 10.0);
        assert!(!a.is_animating());
        assert!(b.is_animating());
        assert_eq!(frames.pending(), 1);
    }

    #[test]
    fn format_count_groups_thousands() {
        assert_eq!(format_count(0.0), "0");
        assert_eq!(format_count(999.0), "999");
        assert_eq!(format_count(12_450.0), "12,450");
        assert_eq!(format_count(850_000.0), "850,000");
        assert_eq!(format_count(34_000_000_000.0), "34,000,000,000");
        assert_eq!(format_count(-1234.9), "-1,234");
    }
}
