#![forbid(unsafe_code)]

//! Reactive values for display binding.
//!
//! - [`Observable`]: a shared, version-tracked value that notifies subscribers
//!   when it changes.
//! - [`Subscription`]: RAII guard; dropping it unsubscribes.
//! - [`Binding`]: a read-only view over an observable through a transform
//!   (e.g. a counter's value formatted as `"12,450"`).
//! - [`BindingScope`]: holds the subscriptions of one page so they are all
//!   released when the page goes away.
//!
//! # Invariants
//!
//! 1. The version increments exactly once per `set` that changes the value.
//! 2. Setting a value equal to the current one is a no-op.
//! 3. Subscribers run in registration order, after the new value is stored,
//!    with no internal borrow held (callbacks may read or write the same
//!    observable).
//! 4. A dropped [`Subscription`] is never called again.

pub mod binding;
pub mod observable;

pub use binding::{Binding, BindingScope, bind_mapped};
pub use observable::{Observable, Subscription};
