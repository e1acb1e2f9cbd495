#![forbid(unsafe_code)]

//! Deterministic in-memory viewport host.
//!
//! [`SimViewport`] stands in for a browser document: it holds a flat list of
//! [`SimElement`]s, answers simple selectors, and hands out observers whose
//! intersection records are delivered only when the caller says so with
//! [`SimViewport::intersect`]. Nothing is delivered asynchronously, which makes
//! reveal behavior reproducible in tests and in native tooling.
//!
//! Supported selectors: `.class`, `#id`, and a bare tag name.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::host::{
    IntersectionCallback, IntersectionObserver, IntersectionRecord, ObserverOptions,
    RevealElement, ViewportHost,
};

struct ElementData {
    tag: String,
    id: Option<String>,
    classes: RefCell<Vec<String>>,
}

/// An element handle. Clones refer to the same element; equality is identity.
#[derive(Clone)]
pub struct SimElement {
    data: Rc<ElementData>,
}

impl PartialEq for SimElement {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.data, &other.data)
    }
}

impl fmt::Debug for SimElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimElement")
            .field("tag", &self.data.tag)
            .field("id", &self.data.id)
            .field("classes", &self.data.classes.borrow())
            .finish()
    }
}

impl SimElement {
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            data: Rc::new(ElementData {
                tag: tag.into(),
                id: None,
                classes: RefCell::new(Vec::new()),
            }),
        }
    }

    /// Builder: add a class before the element is shared.
    #[must_use]
    pub fn with_class(self, class: &str) -> Self {
        self.add_class(class);
        self
    }

    /// Builder: set the id. Only meaningful before the element is cloned.
    #[must_use]
    pub fn with_id(self, id: impl Into<String>) -> Self {
        let data = ElementData {
            tag: self.data.tag.clone(),
            id: Some(id.into()),
            classes: RefCell::new(self.data.classes.borrow().clone()),
        };
        Self {
            data: Rc::new(data),
        }
    }

    #[must_use]
    pub fn tag(&self) -> &str {
        &self.data.tag
    }

    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.data.classes.borrow().iter().any(|c| c == class)
    }

    #[must_use]
    pub fn classes(&self) -> Vec<String> {
        self.data.classes.borrow().clone()
    }

    #[must_use]
    pub fn matches(&self, selector: &str) -> bool {
        let selector = selector.trim();
        if let Some(class) = selector.strip_prefix('.') {
            !class.is_empty() && self.has_class(class)
        } else if let Some(id) = selector.strip_prefix('#') {
            !id.is_empty() && self.data.id.as_deref() == Some(id)
        } else {
            !selector.is_empty() && self.data.tag.eq_ignore_ascii_case(selector)
        }
    }
}

impl RevealElement for SimElement {
    fn add_class(&self, class: &str) {
        let mut classes = self.data.classes.borrow_mut();
        if !classes.iter().any(|c| c == class) {
            classes.push(class.to_string());
        }
    }

    fn remove_class(&self, class: &str) {
        self.data.classes.borrow_mut().retain(|c| c != class);
    }
}

struct ObserverData {
    callback: IntersectionCallback<SimElement>,
    targets: RefCell<Vec<SimElement>>,
}

/// Observer handed out by [`SimViewport`]. Dropping it stops delivery.
pub struct SimObserver {
    data: Rc<ObserverData>,
}

impl fmt::Debug for SimObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimObserver")
            .field("targets", &self.data.targets.borrow().len())
            .finish()
    }
}

impl IntersectionObserver for SimObserver {
    type Element = SimElement;

    fn observe(&self, element: &SimElement) {
        let mut targets = self.data.targets.borrow_mut();
        if !targets.contains(element) {
            targets.push(element.clone());
        }
    }

    fn unobserve(&self, element: &SimElement) {
        self.data.targets.borrow_mut().retain(|t| t != element);
    }

    fn disconnect(&self) {
        self.data.targets.borrow_mut().clear();
    }
}

#[derive(Default)]
struct ViewportData {
    elements: RefCell<Vec<SimElement>>,
    observers: RefCell<Vec<Weak<ObserverData>>>,
    last_options: RefCell<Option<ObserverOptions>>,
    no_observer: bool,
}

/// In-memory document + viewport. Clones share the same state.
#[derive(Clone, Default)]
pub struct SimViewport {
    data: Rc<ViewportData>,
}

impl fmt::Debug for SimViewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimViewport")
            .field("elements", &self.data.elements.borrow().len())
            .field("observers", &self.live_observers())
            .finish()
    }
}

impl SimViewport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A viewport whose host lacks the intersection primitive.
    #[must_use]
    pub fn without_intersection_observer() -> Self {
        Self {
            data: Rc::new(ViewportData {
                no_observer: true,
                ..ViewportData::default()
            }),
        }
    }

    /// Add `element` to the document and return a handle to it.
    pub fn append(&self, element: SimElement) -> SimElement {
        self.data.elements.borrow_mut().push(element.clone());
        element
    }

    /// Remove every element from the document. Handles stay valid.
    pub fn clear(&self) {
        self.data.elements.borrow_mut().clear();
    }

    /// Deliver one batch of records, in order, to every live observer that
    /// observes the record's target. Returns the number of batches delivered.
    pub fn intersect(&self, records: &[(SimElement, bool)]) -> usize {
        let observers: Vec<Rc<ObserverData>> = {
            let mut observers = self.data.observers.borrow_mut();
            observers.retain(|w| w.strong_count() > 0);
            observers.iter().filter_map(Weak::upgrade).collect()
        };
        let mut delivered = 0;
        for observer in observers {
            let batch: Vec<IntersectionRecord<SimElement>> = {
                let targets = observer.targets.borrow();
                records
                    .iter()
                    .filter(|(el, _)| targets.contains(el))
                    .map(|(el, hit)| IntersectionRecord::new(el.clone(), *hit))
                    .collect()
            };
            if !batch.is_empty() {
                (observer.callback)(&batch);
                delivered += 1;
            }
        }
        delivered
    }

    /// Report every element matching `selector` as intersecting.
    pub fn scroll_into_view(&self, selector: &str) -> usize {
        let records: Vec<(SimElement, bool)> = self
            .query_selector_all(selector)
            .into_iter()
            .map(|el| (el, true))
            .collect();
        self.intersect(&records)
    }

    /// Observers still alive.
    #[must_use]
    pub fn live_observers(&self) -> usize {
        self.data
            .observers
            .borrow()
            .iter()
            .filter(|w| w.strong_count() > 0)
            .count()
    }

    /// Options of the most recently created observer.
    #[must_use]
    pub fn last_options(&self) -> Option<ObserverOptions> {
        self.data.last_options.borrow().clone()
    }
}

impl ViewportHost for SimViewport {
    type Element = SimElement;
    type Observer = SimObserver;

    fn query_selector_all(&self, selector: &str) -> Vec<SimElement> {
        self.data
            .elements
            .borrow()
            .iter()
            .filter(|el| el.matches(selector))
            .cloned()
            .collect()
    }

    fn create_observer(
        &self,
        options: &ObserverOptions,
        callback: IntersectionCallback<SimElement>,
    ) -> Option<SimObserver> {
        if self.data.no_observer {
            return None;
        }
        *self.data.last_options.borrow_mut() = Some(options.clone());
        let data = Rc::new(ObserverData {
            callback,
            targets: RefCell::new(Vec::new()),
        });
        self.data.observers.borrow_mut().push(Rc::downgrade(&data));
        Some(SimObserver { data })
    }
}
