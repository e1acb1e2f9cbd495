#![forbid(unsafe_code)]

//! Presentation runtime for the RescueNet site.
//!
//! Two small animation utilities sit on top of host-provided primitives:
//!
//! - [`RevealTracker`]: one-shot "reveal on scroll" driven by a viewport
//!   intersection notifier.
//! - [`CountAnimation`]: count-up of a number with a cubic ease-out, driven
//!   by a per-frame callback scheduler.
//!
//! Neither utility touches a platform API directly. They talk to the traits in
//! [`host`], which the browser crate implements on top of `web-sys` and which
//! [`sim`] and [`frame`] implement deterministically for native hosts and tests.
//! Values meant for display binding are exposed as [`reactive::Observable`]s.

pub mod counter;
pub mod frame;
pub mod host;
pub mod reactive;
pub mod reveal;
pub mod sim;

pub use counter::{CountAnimation, CounterConfig, DEFAULT_DURATION_MS, format_count};
pub use frame::{FrameQueue, ManualClock, TimeSource, WallClock};
pub use host::{
    FrameCallback, FrameScheduler, IntersectionCallback, IntersectionObserver, IntersectionRecord,
    ObserverOptions, RevealElement, ViewportHost,
};
pub use reactive::{Binding, BindingScope, Observable, Subscription};
pub use reveal::{RevealConfig, RevealState, RevealTracker};
