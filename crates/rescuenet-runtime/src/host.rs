#![forbid(unsafe_code)]

//! Host primitives consumed by the runtime.
//!
//! The runtime never calls a platform API itself. A host supplies:
//!
//! | Trait | Browser equivalent |
//! |-------|--------------------|
//! | [`FrameScheduler`] | `performance.now()` + `requestAnimationFrame` |
//! | [`ViewportHost`] | `document.querySelectorAll` + `new IntersectionObserver` |
//! | [`IntersectionObserver`] | `observer.observe` / `observer.unobserve` |
//! | [`RevealElement`] | `element.classList.add` / `remove` |
//!
//! All callbacks are delivered on the single UI thread. A host must return
//! from `request_frame` / `observe` before invoking the callback it was given.

use std::rc::Rc;

/// One-shot per-frame callback. Receives the frame timestamp in milliseconds.
pub type FrameCallback = Box<dyn FnOnce(f64)>;

/// Per-display-frame callback scheduler plus its high-resolution clock.
pub trait FrameScheduler {
    /// Current high-resolution time in milliseconds.
    fn now(&self) -> f64;

    /// Run `callback` once, on the next frame.
    fn request_frame(&self, callback: FrameCallback);
}

impl<S: FrameScheduler + ?Sized> FrameScheduler for Rc<S> {
    fn now(&self) -> f64 {
        (**self).now()
    }

    fn request_frame(&self, callback: FrameCallback) {
        (**self).request_frame(callback);
    }
}

/// An element handle whose display-state tags the runtime can toggle.
///
/// Equality must be identity: two handles compare equal when they refer to
/// the same element.
pub trait RevealElement: Clone + PartialEq + 'static {
    fn add_class(&self, class: &str);
    fn remove_class(&self, class: &str);
}

/// Options passed to the host when creating an intersection observer.
#[derive(Debug, Clone, PartialEq)]
pub struct ObserverOptions {
    /// Fraction of the element that must be visible to count as intersecting.
    pub threshold: f64,
    /// CSS-style inset applied to the viewport (`top right bottom left`).
    pub root_margin: String,
}

/// Visibility notification for one observed element.
#[derive(Debug, Clone, PartialEq)]
pub struct IntersectionRecord<E> {
    pub target: E,
    pub is_intersecting: bool,
}

impl<E> IntersectionRecord<E> {
    #[must_use]
    pub fn new(target: E, is_intersecting: bool) -> Self {
        Self {
            target,
            is_intersecting,
        }
    }
}

/// Receives batches of intersection records, in host delivery order.
pub type IntersectionCallback<E> = Box<dyn Fn(&[IntersectionRecord<E>])>;

/// A live viewport-intersection observation handle.
pub trait IntersectionObserver {
    type Element;

    fn observe(&self, element: &Self::Element);
    fn unobserve(&self, element: &Self::Element);

    /// Stop delivering records for every element.
    fn disconnect(&self) {}
}

/// Document queries and the intersection primitive.
pub trait ViewportHost {
    type Element: RevealElement;
    type Observer: IntersectionObserver<Element = Self::Element>;

    /// Elements matching `selector`, in document order. Invalid or empty
    /// selectors yield no elements.
    fn query_selector_all(&self, selector: &str) -> Vec<Self::Element>;

    /// Create an observer, or `None` when the host has no intersection
    /// primitive.
    fn create_observer(
        &self,
        options: &ObserverOptions,
        callback: IntersectionCallback<Self::Element>,
    ) -> Option<Self::Observer>;
}
