#![forbid(unsafe_code)]

//! Everything owned by one displayed page: its reveal tracker, its
//! count-up counters and their text bindings.
//!
//! A single-page app builds a fresh [`PageScope`] on every navigation and
//! drops the previous one, which releases every observation, cancels every
//! counter and disconnects every binding of the page that went away.
//!
//! # Invariants
//!
//! 1. An element drives at most one counter per scope.
//! 2. After [`teardown`](PageScope::teardown) or drop, no counter of the
//!    scope writes text and no element of the scope is observed.

use std::fmt;
use std::rc::Rc;

use rescuenet_runtime::{
    BindingScope, CountAnimation, FrameScheduler, RevealTracker, ViewportHost,
};

use crate::stats::bind_count_text;

/// Writes a counter's text into its element.
pub type RenderText<E> = Rc<dyn Fn(&E, &str)>;

pub struct PageScope<H: ViewportHost, S: FrameScheduler + Clone + 'static> {
    reveal: RevealTracker<H>,
    scheduler: S,
    counters: Vec<(H::Element, CountAnimation)>,
    bindings: BindingScope,
}

impl<H: ViewportHost, S: FrameScheduler + Clone + 'static> fmt::Debug for PageScope<H, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageScope")
            .field("reveal", &self.reveal)
            .field("counters", &self.counters.len())
            .field("bindings", &self.bindings)
            .finish()
    }
}

impl<H: ViewportHost, S: FrameScheduler + Clone + 'static> PageScope<H, S> {
    /// Scope with a mounted reveal tracker.
    pub fn new(host: H, scheduler: S) -> Self {
        let mut reveal = RevealTracker::new(host);
        reveal.mount();
        Self {
            reveal,
            scheduler,
            counters: Vec::new(),
            bindings: BindingScope::new(),
        }
    }

    /// Observe every element matching `selector` for reveal.
    pub fn reveal(&mut self, selector: &str) -> usize {
        self.reveal.observe_all(selector)
    }

    /// Start one counter per `(element, target)`, rendering its text through
    /// `render`. Elements that already have a counter are skipped. Returns
    /// the number of counters started.
    pub fn count_up(
        &mut self,
        targets: impl IntoIterator<Item = (H::Element, f64)>,
        render: RenderText<H::Element>,
    ) -> usize {
        let mut started = 0;
        for (element, target) in targets {
            if self.is_counting(&element) {
                continue;
            }
            let counter = CountAnimation::new(self.scheduler.clone(), target);
            let render = Rc::clone(&render);
            let node = element.clone();
            bind_count_text(&counter, &mut self.bindings, move |text| render(&node, &text));
            counter.animate();
            self.counters.push((element, counter));
            started += 1;
        }
        started
    }

    /// Whether `element` already drives a counter in this scope.
    #[must_use]
    pub fn is_counting(&self, element: &H::Element) -> bool {
        self.counters.iter().any(|(e, _)| e == element)
    }

    #[must_use]
    pub fn counter_count(&self) -> usize {
        self.counters.len()
    }

    #[must_use]
    pub fn tracker(&self) -> &RevealTracker<H> {
        &self.reveal
    }

    #[must_use]
    pub fn host(&self) -> &H {
        self.reveal.host()
    }

    /// Cancel every counter, disconnect its text and release the tracker.
    pub fn teardown(&mut self) {
        for (_, counter) in self.counters.drain(..) {
            counter.cancel();
        }
        self.bindings.clear();
        self.reveal.teardown();
    }
}

impl<H: ViewportHost, S: FrameScheduler + Clone + 'static> Drop for PageScope<H, S> {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    use pretty_assertions::assert_eq;
    use rescuenet_runtime::sim::{SimElement, SimViewport};
    use rescuenet_runtime::{FrameQueue, ManualClock};

    type Texts = Rc<RefCell<Vec<String>>>;

    fn recorder() -> (Texts, RenderText<SimElement>) {
        let texts: Texts = Rc::default();
        let sink = Rc::clone(&texts);
        (texts, Rc::new(move |_: &SimElement, text: &str| sink.borrow_mut().push(text.to_string())))
    }

    #[test]
    fn second_count_up_on_same_element_is_skipped() {
        let frames = FrameQueue::with_clock(ManualClock::new());
        let viewport = SimViewport::new();
        let stat = viewport.append(SimElement::new("span").with_class("stat-number"));
        let mut page = PageScope::new(viewport, frames.clone());
        let (texts, render) = recorder();

        assert_eq!(page.count_up([(stat.clone(), 1000.0)], Rc::clone(&render)), 1);
        frames.run_until(500.0, 16.0);
        assert_eq!(page.count_up([(stat.clone(), 1000.0)], render), 0);
        assert_eq!(page.counter_count(), 1);
        frames.run_until(3000.0, 16.0);

        let values: Vec<u32> = texts
            .borrow()
            .iter()
            .map(|t| t.replace(',', "").parse().expect("numeric text"))
            .collect();
        assert!(values.windows(2).all(|w| w[0] <= w[1]), "{values:?}");
        assert_eq!(texts.borrow().last().map(String::as_str), Some("1,000"));
    }

    #[test]
    fn replacing_the_scope_releases_the_previous_page() {
        let frames = FrameQueue::with_clock(ManualClock::new());
        let viewport = SimViewport::new();
        let old_card = viewport.append(SimElement::new("article").with_class("card"));
        let old_stat = viewport.append(SimElement::new("span"));
        let (texts, render) = recorder();

        let mut page = PageScope::new(viewport.clone(), frames.clone());
        assert_eq!(page.reveal(".card"), 1);
        page.count_up([(old_stat, 5000.0)], render);
        frames.run_until(100.0, 16.0);
        let written = texts.borrow().len();

        viewport.clear();
        let new_card = viewport.append(SimElement::new("article").with_class("card"));
        page = PageScope::new(viewport.clone(), frames.clone());
        assert_eq!(viewport.live_observers(), 1);
        assert_eq!(page.reveal(".card"), 1);
        assert_eq!(page.tracker().observed_count(), 1);
        assert!(!page.tracker().is_observed(&old_card));

        frames.run_until(3000.0, 16.0);
        assert_eq!(texts.borrow().len(), written);

        viewport.intersect(&[(old_card.clone(), true), (new_card.clone(), true)]);
        assert!(!old_card.has_class("animate-in"));
        assert!(new_card.has_class("animate-in"));
    }

    #[test]
    fn teardown_then_fresh_scope_can_reveal_again() {
        let frames = FrameQueue::with_clock(ManualClock::new());
        let viewport = SimViewport::new();
        let card = viewport.append(SimElement::new("article").with_class("card"));

        let mut page = PageScope::new(viewport.clone(), frames.clone());
        page.teardown();
        assert_eq!(page.reveal(".card"), 0);

        page = PageScope::new(viewport.clone(), frames);
        assert_eq!(page.reveal(".card"), 1);
        viewport.scroll_into_view(".card");
        assert!(card.has_class("animate-in"));
    }
}
