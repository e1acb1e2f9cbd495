#![forbid(unsafe_code)]

//! One-shot "reveal on scroll" for page elements.
//!
//! A [`RevealTracker`] marks each observed element as pending (the
//! `animate-out` tag) and flips it to revealed (`animate-in`) the first time
//! the host reports it intersecting the viewport. Presentation rules keyed on
//! the two tags do the actual styling.
//!
//! # Lifecycle
//!
//! ```text
//! new() ──mount()──▶ initialized ──teardown()/drop──▶ torn down
//!          │
//!          └─ host has no intersection primitive ─▶ stays uninitialized
//!                                                   (observe is a no-op)
//! ```
//!
//! # Invariants
//!
//! 1. An element is in the observed set at most once.
//! 2. Reveal is one-shot: a later non-intersecting record never resets it.
//! 3. Teardown unobserves every element exactly once and clears the set; it
//!    is safe when no observer was ever created.
//! 4. Records for elements outside the observed set (including every record
//!    delivered after teardown) change nothing.
//!
//! # Failure Modes
//!
//! | Condition | Behavior |
//! |-----------|----------|
//! | `observe(None)` | no-op |
//! | empty or non-matching selector | no-op, returns 0 |
//! | no intersection primitive | elements stay pending, nothing fails |
//! | record delivered re-entrantly while the set is borrowed | record dropped |

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::host::{
    IntersectionCallback, IntersectionObserver, IntersectionRecord, ObserverOptions,
    RevealElement, ViewportHost,
};

/// Reveal settings. Defaults: 10% visible, viewport shrunk 50px from the
/// bottom, tags `animate-out` / `animate-in`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(serde::Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct RevealConfig {
    pub threshold: f64,
    pub root_margin: String,
    pub pending_class: String,
    pub revealed_class: String,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            threshold: 0.1,
            root_margin: "0px 0px -50px 0px".to_string(),
            pending_class: "animate-out".to_string(),
            revealed_class: "animate-in".to_string(),
        }
    }
}

impl RevealConfig {
    #[must_use]
    pub fn observer_options(&self) -> ObserverOptions {
        ObserverOptions {
            threshold: self.threshold,
            root_margin: self.root_margin.clone(),
        }
    }
}

/// Display state of an observed element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealState {
    Pending,
    Revealed,
}

struct Entry<E> {
    element: E,
    state: RevealState,
}

struct Observed<E> {
    entries: Vec<Entry<E>>,
}

impl<E: PartialEq> Observed<E> {
    fn position(&self, element: &E) -> Option<usize> {
        self.entries.iter().position(|e| e.element == *element)
    }
}

/// Tracks a page's elements and reveals each one when it scrolls into view.
pub struct RevealTracker<H: ViewportHost> {
    host: H,
    config: RevealConfig,
    observer: Option<H::Observer>,
    observed: Rc<RefCell<Observed<H::Element>>>,
    torn_down: bool,
}

impl<H: ViewportHost> fmt::Debug for RevealTracker<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RevealTracker")
            .field("initialized", &self.is_initialized())
            .field("observed", &self.observed_count())
            .field("revealed", &self.revealed_count())
            .field("torn_down", &self.torn_down)
            .finish()
    }
}

impl<H: ViewportHost> RevealTracker<H> {
    /// Unmounted tracker with default settings.
    pub fn new(host: H) -> Self {
        Self::with_config(host, RevealConfig::default())
    }

    pub fn with_config(host: H, config: RevealConfig) -> Self {
        Self {
            host,
            config,
            observer: None,
            observed: Rc::new(RefCell::new(Observed {
                entries: Vec::new(),
            })),
            torn_down: false,
        }
    }

    /// Create the host observer. Returns whether the tracker is initialized.
    ///
    /// Calling it again once initialized (or after teardown) changes nothing.
    pub fn mount(&mut self) -> bool {
        if self.torn_down || self.observer.is_some() {
            return self.is_initialized();
        }
        let callback = reveal_callback(
            Rc::downgrade(&self.observed),
            self.config.pending_class.clone(),
            self.config.revealed_class.clone(),
        );
        self.observer = self
            .host
            .create_observer(&self.config.observer_options(), callback);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            target: "rescuenet::reveal",
            initialized = self.observer.is_some(),
            "reveal tracker mounted"
        );

        self.is_initialized()
    }

    /// Mark `element` pending and start observing it.
    ///
    /// Returns `true` if the element was newly registered. `None`, an
    /// uninitialized tracker, and an already observed element are no-ops.
    pub fn observe(&mut self, element: Option<&H::Element>) -> bool {
        let (Some(element), Some(observer)) = (element, self.observer.as_ref()) else {
            return false;
        };
        {
            let mut observed = self.observed.borrow_mut();
            if observed.position(element).is_some() {
                return false;
            }
            element.add_class(&self.config.pending_class);
            observed.entries.push(Entry {
                element: element.clone(),
                state: RevealState::Pending,
            });
        }
        observer.observe(element);
        true
    }

    /// Observe every element matching `selector`. Returns how many were newly
    /// registered.
    pub fn observe_all(&mut self, selector: &str) -> usize {
        if selector.trim().is_empty() {
            return 0;
        }
        let elements = self.host.query_selector_all(selector);
        let added = elements
            .iter()
            .filter(|element| self.observe(Some(*element)))
            .count();

        #[cfg(feature = "tracing")]
        tracing::trace!(
            target: "rescuenet::reveal",
            selector,
            matched = elements.len(),
            added,
            "observe_all"
        );

        added
    }

    /// Release every observation and clear the set. Runs at most once.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;
        let entries = std::mem::take(&mut self.observed.borrow_mut().entries);
        if let Some(observer) = self.observer.take() {
            for entry in &entries {
                observer.unobserve(&entry.element);
            }
            observer.disconnect();
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            target: "rescuenet::reveal",
            released = entries.len(),
            "reveal tracker torn down"
        );
    }

    /// Whether the host observer exists.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.observer.is_some()
    }

    #[must_use]
    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    #[must_use]
    pub fn is_observed(&self, element: &H::Element) -> bool {
        self.observed.borrow().position(element).is_some()
    }

    /// State of `element`, or `None` if it is not observed.
    #[must_use]
    pub fn state(&self, element: &H::Element) -> Option<RevealState> {
        let observed = self.observed.borrow();
        observed.position(element).map(|i| observed.entries[i].state)
    }

    #[must_use]
    pub fn observed_count(&self) -> usize {
        self.observed.borrow().entries.len()
    }

    #[must_use]
    pub fn revealed_count(&self) -> usize {
        self.observed
            .borrow()
            .entries
            .iter()
            .filter(|e| e.state == RevealState::Revealed)
            .count()
    }

    #[must_use]
    pub fn config(&self) -> &RevealConfig {
        &self.config
    }

    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }
}

impl<H: ViewportHost> Drop for RevealTracker<H> {
    fn drop(&mut self) {
        self.teardown();
    }
}

fn reveal_callback<E: RevealElement>(
    observed: Weak<RefCell<Observed<E>>>,
    pending_class: String,
    revealed_class: String,
) -> IntersectionCallback<E> {
    Box::new(move |records: &[IntersectionRecord<E>]| {
        let Some(observed) = observed.upgrade() else {
            return;
        };
        let Ok(mut observed) = observed.try_borrow_mut() else {
            return;
        };
        for record in records.iter().filter(|r| r.is_intersecting) {
            let Some(i) = observed.position(&record.target) else {
                continue;
            };
            let entry = &mut observed.entries[i];
            if entry.state == RevealState::Revealed {
                continue;
            }
            entry.element.remove_class(&pending_class);
            entry.element.add_class(&revealed_class);
            entry.state = RevealState::Revealed;
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{SimElement, SimViewport};

    fn mounted(viewport: &SimViewport) -> RevealTracker<SimViewport> {
        let mut tracker = RevealTracker::new(viewport.clone());
        assert!(tracker.mount());
        tracker
    }

    #[test]
    fn default_options_match_design() {
        let options = RevealConfig::default().observer_options();
        assert_eq!(options.threshold, 0.1);
        assert_eq!(options.root_margin, "0px 0px -50px 0px");
    }

    #[test]
    fn mount_passes_options_to_host() {
        let viewport = SimViewport::new();
        let _tracker = mounted(&viewport);
        assert_eq!(
            viewport.last_options(),
            Some(RevealConfig::default().observer_options())
        );
    }

    #[test]
    fn observe_marks_pending() {
        let viewport = SimViewport::new();
        let card = viewport.append(SimElement::new("div").with_class("card"));
        let mut tracker = mounted(&viewport);

        assert!(tracker.observe(Some(&card)));
        assert!(card.has_class("animate-out"));
        assert!(!card.has_class("animate-in"));
        assert_eq!(tracker.state(&card), Some(RevealState::Pending));
    }

    #[test]
    fn observe_none_is_noop() {
        let viewport = SimViewport::new();
        let mut tracker = mounted(&viewport);
        assert!(!tracker.observe(None));
        assert_eq!(tracker.observed_count(), 0);
    }

    #[test]
    fn observe_before_mount_is_noop() {
        let viewport = SimViewport::new();
        let card = viewport.append(SimElement::new("div"));
        let mut tracker = RevealTracker::new(viewport.clone());
        assert!(!tracker.observe(Some(&card)));
        assert!(!card.has_class("animate-out"));
    }

    #[test]
    fn duplicate_observe_keeps_one_entry() {
        let viewport = SimViewport::new();
        let card = viewport.append(SimElement::new("div"));
        let mut tracker = mounted(&viewport);
        assert!(tracker.observe(Some(&card)));
        assert!(!tracker.observe(Some(&card)));
        assert_eq!(tracker.observed_count(), 1);
    }

    #[test]
    fn intersecting_record_reveals() {
        let viewport = SimViewport::new();
        let card = viewport.append(SimElement::new("div"));
        let mut tracker = mounted(&viewport);
        tracker.observe(Some(&card));

        viewport.intersect(&[(card.clone(), true)]);
        assert!(card.has_class("animate-in"));
        assert!(!card.has_class("animate-out"));
        assert_eq!(tracker.revealed_count(), 1);
    }

    #[test]
    fn non_intersecting_record_does_not_reveal() {
        let viewport = SimViewport::new();
        let card = viewport.append(SimElement::new("div"));
        let mut tracker = mounted(&viewport);
        tracker.observe(Some(&card));

        viewport.intersect(&[(card.clone(), false)]);
        assert_eq!(tracker.state(&card), Some(RevealState::Pending));
    }

    #[test]
    fn custom_tags_are_used() {
        let viewport = SimViewport::new();
        let card = viewport.append(SimElement::new("div"));
        let config = RevealConfig {
            pending_class: "opacity-0".into(),
            revealed_class: "fade-up".into(),
            ..RevealConfig::default()
        };
        let mut tracker = RevealTracker::with_config(viewport.clone(), config);
        tracker.mount();
        tracker.observe(Some(&card));
        assert!(card.has_class("opacity-0"));
        viewport.intersect(&[(card.clone(), true)]);
        assert!(card.has_class("fade-up"));
        assert!(!card.has_class("opacity-0"));
    }

    #[test]
    fn teardown_is_idempotent_and_safe_unmounted() {
        let viewport = SimViewport::new();
        let mut tracker = RevealTracker::new(viewport.clone());
        tracker.teardown();
        tracker.teardown();
        assert!(tracker.is_torn_down());
        assert!(!tracker.mount());
    }
}
