#![forbid(unsafe_code)]

//! Property tests for the count-up curve.

use proptest::prelude::*;
use rescuenet_runtime::{CountAnimation, FrameQueue, ManualClock};

fn expected(start: f64, target: f64, elapsed: f64, duration: f64) -> f64 {
    let progress = elapsed / duration;
    (start + (target - start) * (1.0 - (1.0 - progress).powi(3))).floor()
}

proptest! {
    #[test]
    fn completes_exactly_at_target(
        target in -1.0e9_f64..1.0e9,
        duration in 1.0_f64..10_000.0,
        overshoot in 0.0_f64..5_000.0,
    ) {
        let clock = ManualClock::new();
        let frames = FrameQueue::with_clock(clock.clone());
        let counter = CountAnimation::with_duration(frames.clone(), target, duration);

        counter.animate();
        clock.set(duration + overshoot);
        frames.pump();

        prop_assert_eq!(counter.current_value(), target);
        prop_assert!(!counter.is_animating());
        prop_assert_eq!(frames.pending(), 0);
    }

    #[test]
    fn intermediate_frames_follow_floored_ease_out(
        target in -100_000.0_f64..100_000.0,
        duration in 1.0_f64..10_000.0,
        fraction in 0.0_f64..1.0,
    ) {
        let elapsed = duration * fraction;
        prop_assume!(elapsed < duration);

        let clock = ManualClock::new();
        let frames = FrameQueue::with_clock(clock.clone());
        let counter = CountAnimation::with_duration(frames.clone(), target, duration);

        counter.animate();
        clock.set(elapsed);
        frames.pump();

        prop_assert_eq!(counter.current_value(), expected(0.0, target, elapsed, duration));
        prop_assert!(counter.is_animating());
    }

    #[test]
    fn repeated_animate_keeps_single_chain(
        calls in 1_usize..10,
        target in 0.0_f64..1.0e6,
    ) {
        let clock = ManualClock::new();
        let frames = FrameQueue::with_clock(clock.clone());
        let counter = CountAnimation::with_duration(frames.clone(), target, 1000.0);

        for _ in 0..calls {
            counter.animate();
        }
        prop_assert_eq!(frames.pending(), 1);

        let mut frames_run = 0;
        while frames.pending() > 0 {
            clock.advance(16.0);
            prop_assert_eq!(frames.pump(), 1);
            frames_run += 1;
        }
        // 1000 ms at 16 ms per frame.
        prop_assert_eq!(frames_run, 63);
        prop_assert_eq!(counter.current_value(), target);
    }

    #[test]
    fn displayed_value_never_decreases_toward_larger_target(
        target in 1.0_f64..1.0e7,
        step in 1.0_f64..200.0,
    ) {
        let clock = ManualClock::new();
        let frames = FrameQueue::with_clock(clock.clone());
        let counter = CountAnimation::with_duration(frames.clone(), target, 2000.0);
        counter.animate();

        let mut last = counter.current_value();
        while frames.pending() > 0 {
            clock.advance(step);
            frames.pump();
            let now = counter.current_value();
            prop_assert!(now >= last);
            prop_assert!(now <= target);
            last = now;
        }
    }
}
