#![forbid(unsafe_code)]

//! Read bindings from [`Observable`] values to display state.
//!
//! ```
//! use rescuenet_runtime::reactive::{Observable, bind_mapped};
//!
//! let raised = Observable::new(3_750_000.0_f64);
//! let label = bind_mapped(&raised, |v| format!("${v}"));
//! assert_eq!(label.get(), "$3750000");
//! ```
//!
//! A [`BindingScope`] owns the subscriptions of one page. Dropping it (or
//! calling [`BindingScope::clear`]) disconnects every callback it holds.

use std::fmt;
use std::rc::Rc;

use super::observable::{Observable, Subscription};

/// Read-only view of an [`Observable`] passed through a transform.
///
/// The transform runs on every [`get`](Binding::get); nothing is cached, so
/// the view can never go stale.
pub struct Binding<T> {
    eval: Rc<dyn Fn() -> T>,
}

impl<T> Clone for Binding<T> {
    fn clone(&self) -> Self {
        Self {
            eval: Rc::clone(&self.eval),
        }
    }
}

impl<T: fmt::Debug + 'static> fmt::Debug for Binding<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Binding").field(&self.get()).finish()
    }
}

impl<T: 'static> Binding<T> {
    /// Current value of the view.
    #[must_use]
    pub fn get(&self) -> T {
        (self.eval)()
    }
}

/// View of `source` through `map`.
pub fn bind_mapped<S: Clone + PartialEq + 'static, T: 'static>(
    source: &Observable<S>,
    map: impl Fn(&S) -> T + 'static,
) -> Binding<T> {
    let source = source.clone();
    Binding {
        eval: Rc::new(move || source.with(&map)),
    }
}

/// Subscriptions owned by one page or component.
#[derive(Default)]
pub struct BindingScope {
    subscriptions: Vec<Subscription>,
}

impl BindingScope {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to `source` for the lifetime of the scope.
    pub fn subscribe<T: Clone + PartialEq + 'static>(
        &mut self,
        source: &Observable<T>,
        callback: impl Fn(&T) + 'static,
    ) -> &mut Self {
        self.subscriptions.push(source.subscribe(callback));
        self
    }

    /// Push [`bind_mapped`]`(source, map)` into `sink` now and after every
    /// change of `source`, for the lifetime of the scope. Returns the view so
    /// callers can also read it on demand.
    pub fn sync<S: Clone + PartialEq + 'static, T: 'static>(
        &mut self,
        source: &Observable<S>,
        map: impl Fn(&S) -> T + 'static,
        sink: impl Fn(T) + 'static,
    ) -> Binding<T> {
        let view = bind_mapped(source, map);
        sink(view.get());
        let pushed = view.clone();
        self.subscribe(source, move |_| sink(pushed.get()));
        view
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }

    /// Release every held subscription now; the scope stays usable.
    pub fn clear(&mut self) {
        self.subscriptions.clear();
    }
}

impl fmt::Debug for BindingScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BindingScope")
            .field("subscriptions", &self.subscriptions.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn mapped_binding_tracks_source() {
        let goal = Observable::new(60_u8);
        let label = bind_mapped(&goal, |p| format!("{p}% funded"));
        assert_eq!(label.get(), "60% funded");
        goal.set(75);
        assert_eq!(label.get(), "75% funded");
    }

    #[test]
    fn sync_returns_a_live_view() {
        let raised = Observable::new(1_250_000_u64);
        let mut scope = BindingScope::new();
        let view = scope.sync(&raised, |v| v / 1000, |_| {});
        raised.set(1_400_000);
        assert_eq!(view.get(), 1400);
        scope.clear();
        raised.set(1_500_000);
        assert_eq!(view.get(), 1500);
    }

    #[test]
    fn sync_pushes_initial_and_later_values() {
        let obs = Observable::new(1);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut scope = BindingScope::new();
        let s = Rc::clone(&seen);
        scope.sync(&obs, |v| v * 100, move |v| s.borrow_mut().push(v));

        obs.set(2);
        assert_eq!(*seen.borrow(), vec![100, 200]);
        assert_eq!(scope.len(), 1);
    }

    #[test]
    fn dropping_scope_disconnects() {
        let obs = Observable::new(0);
        let seen = Rc::new(RefCell::new(Vec::new()));
        {
            let mut scope = BindingScope::new();
            let s = Rc::clone(&seen);
            scope.subscribe(&obs, move |v| s.borrow_mut().push(*v));
            obs.set(1);
        }
        obs.set(2);
        assert_eq!(*seen.borrow(), vec![1]);
    }

    #[test]
    fn clear_keeps_scope_reusable() {
        let obs = Observable::new(0);
        let mut scope = BindingScope::new();
        scope.subscribe(&obs, |_| {});
        scope.clear();
        assert!(scope.is_empty());
        scope.subscribe(&obs, |_| {});
        assert_eq!(obs.subscriber_count(), 1);
    }
}
